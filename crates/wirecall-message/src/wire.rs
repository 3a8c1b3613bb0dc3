use std::fmt;

use bytes::BufMut;
use wirecall_varint::{decode_varint, encode_varint, encoded_len_varint};

use crate::error::{DecodeError, Result};

/// Largest field number a schema may declare (2^29 - 1).
pub const MAX_FIELD_NUMBER: u32 = (1 << 29) - 1;

const KIND_BITS: u32 = 3;
const KIND_MASK: u64 = 0x7;

/// On-wire representation category of a field occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum WireKind {
    Varint = 0,
    Fixed64 = 1,
    LengthDelimited = 2,
    /// Deprecated group encoding; only ever skipped.
    StartGroup = 3,
    /// Deprecated group encoding; only ever skipped.
    EndGroup = 4,
    Fixed32 = 5,
}

impl WireKind {
    /// Map the low three bits of a tag to a wire kind. 6 and 7 are illegal.
    pub fn from_bits(bits: u8) -> Option<Self> {
        match bits {
            0 => Some(Self::Varint),
            1 => Some(Self::Fixed64),
            2 => Some(Self::LengthDelimited),
            3 => Some(Self::StartGroup),
            4 => Some(Self::EndGroup),
            5 => Some(Self::Fixed32),
            _ => None,
        }
    }

    pub fn as_bits(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Varint => "varint",
            Self::Fixed64 => "fixed64",
            Self::LengthDelimited => "length-delimited",
            Self::StartGroup => "start-group",
            Self::EndGroup => "end-group",
            Self::Fixed32 => "fixed32",
        }
    }
}

impl fmt::Display for WireKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Field number and wire kind prefixing every wire unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tag {
    pub number: u32,
    pub kind: WireKind,
}

impl Tag {
    pub const fn new(number: u32, kind: WireKind) -> Self {
        Self { number, kind }
    }

    /// The varint value carried on the wire: `number << 3 | kind`.
    pub fn key(self) -> u64 {
        (u64::from(self.number) << KIND_BITS) | u64::from(self.kind.as_bits())
    }

    pub fn encoded_len(self) -> usize {
        encoded_len_varint(self.key())
    }

    pub fn encode<B: BufMut>(self, dst: &mut B) {
        encode_varint(self.key(), dst);
    }
}

/// Decode the tag at `offset`, returning it and the offset past it.
///
/// Field number 0, numbers above [`MAX_FIELD_NUMBER`] and wire kinds 6/7
/// are rejected with [`DecodeError::MalformedTag`]. End-group tags are
/// returned as-is; whether one is legal depends on the caller's nesting.
pub fn decode_tag(bytes: &[u8], offset: usize) -> Result<(Tag, usize)> {
    let (key, next) = decode_varint(bytes, offset)?;
    let number = key >> KIND_BITS;
    let bits = (key & KIND_MASK) as u8;

    let malformed = DecodeError::MalformedTag { number, kind: bits };
    let kind = WireKind::from_bits(bits).ok_or(malformed.clone())?;
    if number == 0 || number > u64::from(MAX_FIELD_NUMBER) {
        return Err(malformed);
    }

    Ok((Tag::new(number as u32, kind), next))
}

/// Read a length prefix at `offset`.
pub(crate) fn read_length(bytes: &[u8], offset: usize) -> Result<(usize, usize)> {
    let (raw, next) = decode_varint(bytes, offset)?;
    if (raw as i64) < 0 {
        return Err(DecodeError::NegativeLength(raw));
    }
    // Longer than the address space means longer than the input.
    let len = usize::try_from(raw).map_err(|_| DecodeError::UnexpectedEndOfInput)?;
    Ok((len, next))
}

/// Borrow `len` bytes at `offset`, failing if the input is shorter.
pub(crate) fn take(bytes: &[u8], offset: usize, len: usize) -> Result<(&[u8], usize)> {
    if offset > bytes.len() || len > bytes.len() - offset {
        return Err(DecodeError::UnexpectedEndOfInput);
    }
    Ok((&bytes[offset..offset + len], offset + len))
}
