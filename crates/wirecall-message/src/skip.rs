use wirecall_varint::decode_varint;

use crate::error::{DecodeError, Result};
use crate::wire::{decode_tag, read_length, take, WireKind};

/// Length of the wire unit at the start of `bytes`, tag included.
///
/// Consumes exactly one unit: 4 bytes for fixed32, 8 for fixed64, a
/// varint for varint, a length-prefixed run for length-delimited, and
/// for start-group everything up to and including the matching end-group.
pub fn skip_field(bytes: &[u8]) -> Result<usize> {
    let mut pos = 0usize;
    let mut depth = 0usize;

    loop {
        let (tag, next) = decode_tag(bytes, pos)?;
        pos = next;

        match tag.kind {
            WireKind::Varint => {
                let (_, next) = decode_varint(bytes, pos)?;
                pos = next;
            }
            WireKind::Fixed64 => {
                let (_, next) = take(bytes, pos, 8)?;
                pos = next;
            }
            WireKind::LengthDelimited => {
                let (len, start) = read_length(bytes, pos)?;
                let (_, next) = take(bytes, start, len)?;
                pos = next;
            }
            WireKind::StartGroup => depth += 1,
            WireKind::EndGroup => {
                if depth == 0 {
                    return Err(DecodeError::MalformedTag {
                        number: u64::from(tag.number),
                        kind: tag.kind.as_bits(),
                    });
                }
                depth -= 1;
            }
            WireKind::Fixed32 => {
                let (_, next) = take(bytes, pos, 4)?;
                pos = next;
            }
        }

        if depth == 0 {
            return Ok(pos);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_each_scalar_kind() {
        // field 2 varint 300
        assert_eq!(skip_field(&[0x10, 0xAC, 0x02, 0xFF]).unwrap(), 3);
        // field 3 fixed64
        assert_eq!(skip_field(&[0x19, 1, 2, 3, 4, 5, 6, 7, 8, 0xFF]).unwrap(), 9);
        // field 4 length-delimited "abc"
        assert_eq!(skip_field(&[0x22, 0x03, b'a', b'b', b'c', 0xFF]).unwrap(), 5);
        // field 5 fixed32
        assert_eq!(skip_field(&[0x2D, 1, 2, 3, 4, 0xFF]).unwrap(), 5);
    }

    #[test]
    fn skips_nested_groups_to_matching_end() {
        let bytes = [
            0x1B, // field 3 start-group
            0x08, 0x01, // field 1 varint 1
            0x23, // field 4 start-group
            0x24, // field 4 end-group
            0x1C, // field 3 end-group
            0x08, 0x02, // trailing unit, not part of the group
        ];
        assert_eq!(skip_field(&bytes).unwrap(), 6);
    }

    #[test]
    fn unterminated_group_is_truncation() {
        assert_eq!(
            skip_field(&[0x1B, 0x08, 0x01]),
            Err(DecodeError::UnexpectedEndOfInput)
        );
    }

    #[test]
    fn bare_end_group_is_malformed() {
        assert_eq!(
            skip_field(&[0x1C]),
            Err(DecodeError::MalformedTag { number: 3, kind: 4 })
        );
    }

    #[test]
    fn truncated_payloads_are_rejected() {
        assert_eq!(
            skip_field(&[0x22, 0x05, b'a']),
            Err(DecodeError::UnexpectedEndOfInput)
        );
        assert_eq!(
            skip_field(&[0x2D, 1, 2]),
            Err(DecodeError::UnexpectedEndOfInput)
        );
        assert_eq!(skip_field(&[0x10]), Err(DecodeError::UnexpectedEndOfInput));
        assert_eq!(skip_field(&[]), Err(DecodeError::UnexpectedEndOfInput));
    }
}
