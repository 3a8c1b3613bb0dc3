//! Schema-less iteration over the wire units of an encoded message.

use wirecall_varint::decode_varint;

use crate::error::{DecodeError, Result};
use crate::skip::skip_field;
use crate::wire::{decode_tag, read_length, take, Tag, WireKind};

/// Payload of one wire unit, borrowed from the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawValue<'a> {
    Varint(u64),
    Fixed64(u64),
    Fixed32(u32),
    Bytes(&'a [u8]),
    /// Bytes between a start-group tag and its matching end-group tag.
    Group(&'a [u8]),
}

/// One field occurrence: its tag, payload and the exact bytes it spans.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WireUnit<'a> {
    pub tag: Tag,
    pub value: RawValue<'a>,
    pub raw: &'a [u8],
}

/// Iterator over the wire units of a byte stream.
///
/// Yields at most one error, after which it is exhausted.
#[derive(Debug, Clone)]
pub struct WireUnits<'a> {
    bytes: &'a [u8],
    pos: usize,
    failed: bool,
}

impl<'a> WireUnits<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            pos: 0,
            failed: false,
        }
    }

    fn read_unit(&self) -> Result<(WireUnit<'a>, usize)> {
        let bytes = self.bytes;
        let start = self.pos;
        let (tag, body) = decode_tag(bytes, start)?;

        let (value, end) = match tag.kind {
            WireKind::Varint => {
                let (value, next) = decode_varint(bytes, body)?;
                (RawValue::Varint(value), next)
            }
            WireKind::Fixed64 => {
                let (raw, next) = take(bytes, body, 8)?;
                let mut le = [0u8; 8];
                le.copy_from_slice(raw);
                (RawValue::Fixed64(u64::from_le_bytes(le)), next)
            }
            WireKind::Fixed32 => {
                let (raw, next) = take(bytes, body, 4)?;
                let mut le = [0u8; 4];
                le.copy_from_slice(raw);
                (RawValue::Fixed32(u32::from_le_bytes(le)), next)
            }
            WireKind::LengthDelimited => {
                let (len, payload) = read_length(bytes, body)?;
                let (raw, next) = take(bytes, payload, len)?;
                (RawValue::Bytes(raw), next)
            }
            WireKind::StartGroup => {
                let mut inner = body;
                loop {
                    let (inner_tag, after) = decode_tag(bytes, inner)?;
                    if inner_tag.kind == WireKind::EndGroup {
                        break (RawValue::Group(&bytes[body..inner]), after);
                    }
                    inner += skip_field(&bytes[inner..])?;
                }
            }
            WireKind::EndGroup => {
                return Err(DecodeError::MalformedTag {
                    number: u64::from(tag.number),
                    kind: tag.kind.as_bits(),
                })
            }
        };

        let unit = WireUnit {
            tag,
            value,
            raw: &bytes[start..end],
        };
        Ok((unit, end))
    }
}

impl<'a> Iterator for WireUnits<'a> {
    type Item = Result<WireUnit<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.pos >= self.bytes.len() {
            return None;
        }

        match self.read_unit() {
            Ok((unit, end)) => {
                self.pos = end;
                Some(Ok(unit))
            }
            Err(err) => {
                self.failed = true;
                Some(Err(err))
            }
        }
    }
}
