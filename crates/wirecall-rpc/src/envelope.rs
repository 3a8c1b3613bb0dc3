//! Call envelopes: what actually crosses the channel.
//!
//! ```text
//! CallRequest  { method: string = 1, payload: bytes = 2 }
//! CallResponse { code: uint32 = 1, message: string = 2, payload: bytes = 3 }
//! ```
//!
//! Both are ordinary messages, so they get the same zero-value omission
//! and unknown-field preservation as application messages.

use bytes::Bytes;
use wirecall_message::{FieldDescriptor, FieldRef, FieldType, FieldValue, Message, UnknownFields};

use crate::status::{Code, Status};

/// A request payload addressed to one method path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallRequest {
    pub method: String,
    pub payload: Bytes,
    unknown: UnknownFields,
}

impl CallRequest {
    pub fn new(method: impl Into<String>, payload: Bytes) -> Self {
        Self {
            method: method.into(),
            payload,
            unknown: UnknownFields::new(),
        }
    }
}

impl Message for CallRequest {
    const TYPE_NAME: &'static str = "wirecall.rpc.CallRequest";
    const FIELDS: &'static [FieldDescriptor] = &[
        FieldDescriptor::new(1, "method", FieldType::String),
        FieldDescriptor::new(2, "payload", FieldType::Bytes),
    ];

    fn field(&self, number: u32) -> Option<FieldRef<'_>> {
        match number {
            1 => FieldRef::text(&self.method),
            2 => FieldRef::bytes(&self.payload),
            _ => None,
        }
    }

    fn set_field(
        &mut self,
        field: &FieldDescriptor,
        value: FieldValue,
    ) -> wirecall_message::Result<()> {
        match field.number {
            1 => self.method = value.into_string(field)?,
            2 => self.payload = value.into_bytes(),
            _ => {}
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

/// Outcome of one call: a status code with either a payload (OK) or an
/// error message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallResponse {
    pub code: u32,
    pub message: String,
    pub payload: Bytes,
    unknown: UnknownFields,
}

impl CallResponse {
    pub fn ok(payload: Bytes) -> Self {
        Self {
            code: Code::Ok.as_u32(),
            payload,
            ..Self::default()
        }
    }

    /// Envelope for a failed call. A status carrying `Ok` is sent as
    /// `Unknown` so the caller still sees a failure.
    pub fn from_status(status: &Status) -> Self {
        let code = match status.code() {
            Code::Ok => Code::Unknown,
            code => code,
        };
        Self {
            code: code.as_u32(),
            message: status.message().to_string(),
            ..Self::default()
        }
    }

    pub fn from_result(result: std::result::Result<Bytes, Status>) -> Self {
        match result {
            Ok(payload) => Self::ok(payload),
            Err(status) => Self::from_status(&status),
        }
    }

    /// Split back into the response payload or the carried status.
    pub fn into_result(self) -> std::result::Result<Bytes, Status> {
        match Code::from_u32(self.code) {
            Code::Ok => Ok(self.payload),
            code => Err(Status::new(code, self.message)),
        }
    }
}

impl Message for CallResponse {
    const TYPE_NAME: &'static str = "wirecall.rpc.CallResponse";
    const FIELDS: &'static [FieldDescriptor] = &[
        FieldDescriptor::new(1, "code", FieldType::UInt32),
        FieldDescriptor::new(2, "message", FieldType::String),
        FieldDescriptor::new(3, "payload", FieldType::Bytes),
    ];

    fn field(&self, number: u32) -> Option<FieldRef<'_>> {
        match number {
            1 => FieldRef::uint32(self.code),
            2 => FieldRef::text(&self.message),
            3 => FieldRef::bytes(&self.payload),
            _ => None,
        }
    }

    fn set_field(
        &mut self,
        field: &FieldDescriptor,
        value: FieldValue,
    ) -> wirecall_message::Result<()> {
        match field.number {
            1 => {
                self.code =
                    u32::try_from(value.as_u64()).unwrap_or_else(|_| Code::Unknown.as_u32())
            }
            2 => self.message = value.into_string(field)?,
            3 => self.payload = value.into_bytes(),
            _ => {}
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
