//! Messages of the `myapp.hello.v1` package.

use crate::codec::Message;
use crate::descriptor::{FieldDescriptor, FieldType};
use crate::error::Result;
use crate::unknown::UnknownFields;
use crate::value::{FieldRef, FieldValue};

/// Request of `Hello.SayHello`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct HelloReq {
    pub name: String,
    unknown: UnknownFields,
}

impl HelloReq {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            unknown: UnknownFields::new(),
        }
    }
}

impl Message for HelloReq {
    const TYPE_NAME: &'static str = "myapp.hello.v1.HelloReq";
    const FIELDS: &'static [FieldDescriptor] =
        &[FieldDescriptor::new(1, "name", FieldType::String)];

    fn field(&self, number: u32) -> Option<FieldRef<'_>> {
        match number {
            1 => FieldRef::text(&self.name),
            _ => None,
        }
    }

    fn set_field(&mut self, field: &FieldDescriptor, value: FieldValue) -> Result<()> {
        if field.number == 1 {
            self.name = value.into_string(field)?;
        }
        Ok(())
    }

    fn unknown_fields(&self) -> &UnknownFields {
        &self.unknown
    }

    fn unknown_fields_mut(&mut self) -> &mut UnknownFields {
        &mut self.unknown
    }
}

/// Greeting text. Part of the schema; not returned by `SayHello`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct HelloResp {
    pub content: String,
    unknown: UnknownFields,
}

impl HelloResp {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            unknown: UnknownFields::new(),
        }
    }
}

impl Message for HelloResp {
    const TYPE_NAME: &'static str = "myapp.hello.v1.HelloResp";
    const FIELDS: &'static [FieldDescriptor] =
        &[FieldDescriptor::new(1, "content", FieldType::String)];

    fn field(&self, number: u32) -> Option<FieldRef<'_>> {
        match number {
            1 => FieldRef::text(&self.content),
            _ => None,
        }
    }

    fn set_field(&mut self, field: &FieldDescriptor, value: FieldValue) -> Result<()> {
        if field.number == 1 {
            self.content = value.into_string(field)?;
        }
        Ok(())
    }

    fn unknown_fields(&self) -> &UnknownFields {
        &self.unknown
    }

    fn unknown_fields_mut(&mut self) -> &mut UnknownFields {
        &mut self.unknown
    }
}
