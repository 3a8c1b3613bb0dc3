use std::fmt;

use bytes::{BufMut, Bytes, BytesMut};
use tracing::trace;

use crate::descriptor::{find_field, FieldDescriptor};
use crate::error::{DecodeError, Result};
use crate::skip::skip_field;
use crate::unknown::UnknownFields;
use crate::value::{FieldRef, FieldValue};
use crate::wire::{decode_tag, WireKind};

/// A message type with a static field descriptor set.
///
/// Implementors only map field numbers to values and back; framing, size
/// accounting and unknown-field handling live in this module and are
/// driven by [`Message::FIELDS`].
pub trait Message: Default + fmt::Debug {
    /// Fully qualified type name, e.g. `myapp.hello.v1.HelloReq`.
    const TYPE_NAME: &'static str;

    /// Field descriptors, in the order fields are written on encode.
    const FIELDS: &'static [FieldDescriptor];

    /// Current value of field `number`, or `None` when it holds the zero
    /// value and must not be written.
    fn field(&self, number: u32) -> Option<FieldRef<'_>>;

    /// Store a decoded value. A later occurrence replaces an earlier one.
    fn set_field(&mut self, field: &FieldDescriptor, value: FieldValue) -> Result<()>;

    fn unknown_fields(&self) -> &UnknownFields;

    fn unknown_fields_mut(&mut self) -> &mut UnknownFields;

    /// Exact number of bytes [`Message::encode`] produces.
    fn encoded_len(&self) -> usize {
        size(self)
    }

    /// Append the encoded message to `dst`, reserving exactly
    /// [`Message::encoded_len`] bytes first.
    fn encode_to(&self, dst: &mut BytesMut) {
        encode_to(self, dst);
    }

    fn encode(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(size(self));
        encode_to(self, &mut buf);
        buf.freeze()
    }

    fn decode(bytes: &[u8]) -> Result<Self> {
        let mut message = Self::default();
        merge_fields(&mut message, bytes)?;
        Ok(message)
    }

    /// Decode `bytes` into `self`, overwriting fields present in `bytes`
    /// and appending unknown units to the existing tail. On error `self`
    /// is left untouched.
    fn merge(&mut self, bytes: &[u8]) -> Result<()> {
        merge(self, bytes)
    }

    fn reset(&mut self) {
        *self = Self::default();
    }

    fn discard_unknown(&mut self) {
        self.unknown_fields_mut().clear();
    }
}

/// Encoded size of `message`: every present wire unit plus the unknown
/// tail. Computed without encoding.
pub fn size<M: Message>(message: &M) -> usize {
    let known: usize = M::FIELDS
        .iter()
        .filter_map(|field| {
            message
                .field(field.number)
                .map(|value| field.tag().encoded_len() + value.encoded_len())
        })
        .sum();
    known + message.unknown_fields().len()
}

/// Append `message` to `dst`: present fields in descriptor order, then the
/// unknown tail verbatim.
pub fn encode_to<M: Message>(message: &M, dst: &mut BytesMut) {
    let expected = size(message);
    dst.reserve(expected);
    let start = dst.len();

    for field in M::FIELDS {
        if let Some(value) = message.field(field.number) {
            debug_assert_eq!(value.kind(), field.wire_kind(), "field {}", field.name);
            field.tag().encode(dst);
            value.encode(dst);
        }
    }
    dst.put_slice(message.unknown_fields().as_bytes());

    debug_assert_eq!(dst.len() - start, expected);
}

/// Decode `bytes` into `message`.
///
/// Fields may appear in any order; the last occurrence of a known field
/// wins. Units with unknown field numbers are skipped and preserved.
/// Input is validated against a scratch value first, so a failed merge
/// leaves `message` unchanged.
pub fn merge<M: Message>(message: &mut M, bytes: &[u8]) -> Result<()> {
    merge_fields(&mut M::default(), bytes)?;
    merge_fields(message, bytes)
}

fn merge_fields<M: Message>(message: &mut M, bytes: &[u8]) -> Result<()> {
    let mut pos = 0usize;

    while pos < bytes.len() {
        let start = pos;
        let (tag, body) = decode_tag(bytes, start)?;
        if tag.kind == WireKind::EndGroup {
            return Err(DecodeError::MalformedTag {
                number: u64::from(tag.number),
                kind: tag.kind.as_bits(),
            });
        }

        match find_field(M::FIELDS, tag.number) {
            Some(field) => {
                if tag.kind != field.wire_kind() {
                    return Err(DecodeError::WrongWireKind {
                        field: field.name,
                        expected: field.wire_kind(),
                        actual: tag.kind,
                    });
                }
                let (value, next) = FieldValue::read(bytes, body, tag)?;
                message.set_field(field, value)?;
                pos = next;
            }
            None => {
                let len = skip_field(&bytes[start..])?;
                trace!(
                    message = M::TYPE_NAME,
                    field = tag.number,
                    kind = %tag.kind,
                    len,
                    "preserving unknown field"
                );
                message.unknown_fields_mut().push_unit(&bytes[start..start + len]);
                pos = start + len;
            }
        }
    }

    Ok(())
}
