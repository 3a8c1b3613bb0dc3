use crate::codec::Message;
use crate::descriptor::FieldDescriptor;
use crate::error::Result;
use crate::unknown::UnknownFields;
use crate::value::{FieldRef, FieldValue};

/// `google.protobuf.Empty`: an acknowledgment with no payload fields.
///
/// Still carries an unknown tail, so fields added by a newer peer survive
/// a pass through this type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Empty {
    unknown: UnknownFields,
}

impl Empty {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Message for Empty {
    const TYPE_NAME: &'static str = "google.protobuf.Empty";
    const FIELDS: &'static [FieldDescriptor] = &[];

    fn field(&self, _number: u32) -> Option<FieldRef<'_>> {
        None
    }

    fn set_field(&mut self, _field: &FieldDescriptor, _value: FieldValue) -> Result<()> {
        Ok(())
    }

    fn unknown_fields(&self) -> &UnknownFields {
        &self.unknown
    }

    fn unknown_fields_mut(&mut self) -> &mut UnknownFields {
        &mut self.unknown
    }
}
