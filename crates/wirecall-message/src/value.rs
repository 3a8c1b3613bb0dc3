use bytes::{BufMut, Bytes};
use wirecall_varint::{decode_varint, encode_varint, encoded_len_varint, zigzag_decode, zigzag_encode};

use crate::descriptor::FieldDescriptor;
use crate::error::{DecodeError, Result};
use crate::wire::{read_length, take, Tag, WireKind};

/// Borrowed payload of a present field, handed to the encoder.
///
/// The constructors return `None` for the type's zero value: default
/// values are never written to the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRef<'a> {
    Varint(u64),
    Fixed64(u64),
    Fixed32(u32),
    Bytes(&'a [u8]),
}

impl<'a> FieldRef<'a> {
    pub fn text(value: &'a str) -> Option<Self> {
        Self::bytes(value.as_bytes())
    }

    pub fn bytes(value: &'a [u8]) -> Option<Self> {
        (!value.is_empty()).then_some(Self::Bytes(value))
    }

    pub fn boolean(value: bool) -> Option<Self> {
        value.then_some(Self::Varint(1))
    }

    pub fn uint32(value: u32) -> Option<Self> {
        Self::uint64(u64::from(value))
    }

    pub fn uint64(value: u64) -> Option<Self> {
        (value != 0).then_some(Self::Varint(value))
    }

    /// Negative values are sign-extended to 64 bits and take ten bytes.
    pub fn int32(value: i32) -> Option<Self> {
        Self::int64(i64::from(value))
    }

    pub fn int64(value: i64) -> Option<Self> {
        Self::uint64(value as u64)
    }

    pub fn sint32(value: i32) -> Option<Self> {
        Self::sint64(i64::from(value))
    }

    pub fn sint64(value: i64) -> Option<Self> {
        Self::uint64(zigzag_encode(value))
    }

    pub fn fixed32(value: u32) -> Option<Self> {
        (value != 0).then_some(Self::Fixed32(value))
    }

    pub fn fixed64(value: u64) -> Option<Self> {
        (value != 0).then_some(Self::Fixed64(value))
    }

    pub fn kind(&self) -> WireKind {
        match self {
            Self::Varint(_) => WireKind::Varint,
            Self::Fixed64(_) => WireKind::Fixed64,
            Self::Fixed32(_) => WireKind::Fixed32,
            Self::Bytes(_) => WireKind::LengthDelimited,
        }
    }

    /// Payload size in bytes, excluding the tag.
    pub fn encoded_len(&self) -> usize {
        match self {
            Self::Varint(value) => encoded_len_varint(*value),
            Self::Fixed64(_) => 8,
            Self::Fixed32(_) => 4,
            Self::Bytes(value) => encoded_len_varint(value.len() as u64) + value.len(),
        }
    }

    pub fn encode<B: BufMut>(&self, dst: &mut B) {
        match self {
            Self::Varint(value) => encode_varint(*value, dst),
            Self::Fixed64(value) => dst.put_u64_le(*value),
            Self::Fixed32(value) => dst.put_u32_le(*value),
            Self::Bytes(value) => {
                encode_varint(value.len() as u64, dst);
                dst.put_slice(value);
            }
        }
    }
}

/// Owned payload of one decoded wire unit.
///
/// Accessors read a value of another kind as the zero value; the codec
/// only hands a field the kind its descriptor declares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Varint(u64),
    Fixed64(u64),
    Fixed32(u32),
    Bytes(Bytes),
}

impl FieldValue {
    /// Read the payload that follows `tag` at `offset`.
    pub(crate) fn read(bytes: &[u8], offset: usize, tag: Tag) -> Result<(Self, usize)> {
        match tag.kind {
            WireKind::Varint => {
                let (value, next) = decode_varint(bytes, offset)?;
                Ok((Self::Varint(value), next))
            }
            WireKind::Fixed64 => {
                let (raw, next) = take(bytes, offset, 8)?;
                let mut le = [0u8; 8];
                le.copy_from_slice(raw);
                Ok((Self::Fixed64(u64::from_le_bytes(le)), next))
            }
            WireKind::Fixed32 => {
                let (raw, next) = take(bytes, offset, 4)?;
                let mut le = [0u8; 4];
                le.copy_from_slice(raw);
                Ok((Self::Fixed32(u32::from_le_bytes(le)), next))
            }
            WireKind::LengthDelimited => {
                let (len, start) = read_length(bytes, offset)?;
                let (raw, next) = take(bytes, start, len)?;
                Ok((Self::Bytes(Bytes::copy_from_slice(raw)), next))
            }
            WireKind::StartGroup | WireKind::EndGroup => Err(DecodeError::MalformedTag {
                number: u64::from(tag.number),
                kind: tag.kind.as_bits(),
            }),
        }
    }

    pub fn kind(&self) -> WireKind {
        match self {
            Self::Varint(_) => WireKind::Varint,
            Self::Fixed64(_) => WireKind::Fixed64,
            Self::Fixed32(_) => WireKind::Fixed32,
            Self::Bytes(_) => WireKind::LengthDelimited,
        }
    }

    pub fn into_string(self, field: &FieldDescriptor) -> Result<String> {
        match self {
            Self::Bytes(raw) => String::from_utf8(raw.to_vec())
                .map_err(|_| DecodeError::InvalidUtf8 { field: field.name }),
            _ => Ok(String::new()),
        }
    }

    pub fn into_bytes(self) -> Bytes {
        match self {
            Self::Bytes(raw) => raw,
            _ => Bytes::new(),
        }
    }

    pub fn as_u64(&self) -> u64 {
        match self {
            Self::Varint(value) | Self::Fixed64(value) => *value,
            Self::Fixed32(value) => u64::from(*value),
            Self::Bytes(_) => 0,
        }
    }

    /// Truncates to the low 32 bits, as `uint32` decoding does.
    pub fn as_u32(&self) -> u32 {
        self.as_u64() as u32
    }

    pub fn as_i64(&self) -> i64 {
        self.as_u64() as i64
    }

    pub fn as_i32(&self) -> i32 {
        self.as_u64() as i32
    }

    pub fn as_sint64(&self) -> i64 {
        zigzag_decode(self.as_u64())
    }

    pub fn as_sint32(&self) -> i32 {
        zigzag_decode(self.as_u64()) as i32
    }

    pub fn as_bool(&self) -> bool {
        self.as_u64() != 0
    }
}

#[cfg(test)]
mod tests {
    use bytes::BytesMut;

    use super::*;
    use crate::descriptor::FieldType;

    #[test]
    fn zero_values_are_absent() {
        assert_eq!(FieldRef::text(""), None);
        assert_eq!(FieldRef::bytes(&[]), None);
        assert_eq!(FieldRef::boolean(false), None);
        assert_eq!(FieldRef::uint64(0), None);
        assert_eq!(FieldRef::sint64(0), None);
        assert_eq!(FieldRef::fixed32(0), None);
    }

    #[test]
    fn negative_int32_is_sign_extended() {
        let value = FieldRef::int32(-1).unwrap();
        assert_eq!(value, FieldRef::Varint(u64::MAX));
        assert_eq!(value.encoded_len(), 10);
    }

    #[test]
    fn bytes_payload_carries_length_prefix() {
        let value = FieldRef::text("hi").unwrap();
        let mut buf = BytesMut::new();
        value.encode(&mut buf);
        assert_eq!(buf.as_ref(), &[0x02, b'h', b'i']);
        assert_eq!(value.encoded_len(), buf.len());
    }

    #[test]
    fn fixed_widths_are_little_endian() {
        let mut buf = BytesMut::new();
        FieldRef::Fixed32(0x0102_0304).encode(&mut buf);
        assert_eq!(buf.as_ref(), &[0x04, 0x03, 0x02, 0x01]);

        let (value, next) =
            FieldValue::read(&buf, 0, Tag::new(3, WireKind::Fixed32)).unwrap();
        assert_eq!(value, FieldValue::Fixed32(0x0102_0304));
        assert_eq!(next, 4);
    }

    #[test]
    fn truncated_fixed64_is_rejected() {
        let err = FieldValue::read(&[1, 2, 3], 0, Tag::new(1, WireKind::Fixed64)).unwrap_err();
        assert_eq!(err, DecodeError::UnexpectedEndOfInput);
    }

    #[test]
    fn invalid_utf8_names_the_field() {
        let field = FieldDescriptor::new(1, "name", FieldType::String);
        let err = FieldValue::Bytes(Bytes::from_static(&[0xFF, 0xFE]))
            .into_string(&field)
            .unwrap_err();
        assert_eq!(err, DecodeError::InvalidUtf8 { field: "name" });
    }

    #[test]
    fn signed_accessors_undo_encoding() {
        assert_eq!(FieldValue::Varint(3).as_sint64(), -2);
        assert_eq!(FieldValue::Varint(u64::MAX).as_i32(), -1);
        assert!(FieldValue::Varint(1).as_bool());
    }
}
