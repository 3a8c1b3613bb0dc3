use bytes::BufMut;

use crate::error::{Result, VarintError};

/// Longest possible encoding of a `u64`: ceil(64 / 7) bytes.
pub const MAX_VARINT_LEN: usize = 10;

const CONTINUATION: u8 = 0x80;
const PAYLOAD_MASK: u8 = 0x7F;

/// Number of bytes `value` occupies once varint-encoded.
///
/// Equal to `ceil(bit_length(value | 1) / 7)`, so zero still takes one byte.
pub fn encoded_len_varint(value: u64) -> usize {
    let bits = 64 - (value | 1).leading_zeros() as usize;
    (bits + 6) / 7
}

/// Append the varint encoding of `value` to `dst`.
///
/// ```text
/// 300 = 0b1_0010_1100
///   byte 0: 0b0010_1100 | 0x80 = 0xAC   (low 7 bits, more follows)
///   byte 1: 0b0000_0010        = 0x02   (remaining bits, last byte)
/// ```
pub fn encode_varint<B: BufMut>(mut value: u64, dst: &mut B) {
    while value >= u64::from(CONTINUATION) {
        dst.put_u8((value as u8 & PAYLOAD_MASK) | CONTINUATION);
        value >>= 7;
    }
    dst.put_u8(value as u8);
}

/// Decode a varint starting at `offset`.
///
/// Returns the value and the offset just past its final byte. Fails with
/// [`VarintError::IntegerOverflow`] when ten bytes all carry the
/// continuation bit, and with [`VarintError::UnexpectedEndOfInput`] when
/// `bytes` runs out first.
pub fn decode_varint(bytes: &[u8], offset: usize) -> Result<(u64, usize)> {
    let mut value = 0u64;
    let mut pos = offset;

    for shift in (0..64).step_by(7) {
        let byte = *bytes
            .get(pos)
            .ok_or(VarintError::UnexpectedEndOfInput)?;
        pos += 1;
        value |= u64::from(byte & PAYLOAD_MASK) << shift;
        if byte < CONTINUATION {
            return Ok((value, pos));
        }
    }

    Err(VarintError::IntegerOverflow)
}

#[cfg(test)]
mod tests {
    use bytes::BytesMut;

    use super::*;

    fn encode(value: u64) -> Vec<u8> {
        let mut buf = BytesMut::new();
        encode_varint(value, &mut buf);
        buf.to_vec()
    }

    #[test]
    fn zero_is_single_zero_byte() {
        assert_eq!(encode(0), vec![0x00]);
        assert_eq!(encoded_len_varint(0), 1);
    }

    #[test]
    fn three_hundred_is_ac_02() {
        assert_eq!(encode(300), vec![0xAC, 0x02]);
        assert_eq!(decode_varint(&[0xAC, 0x02], 0).unwrap(), (300, 2));
    }

    #[test]
    fn encoded_len_matches_output_at_group_boundaries() {
        for value in [
            1u64,
            127,
            128,
            16_383,
            16_384,
            (1 << 35) - 1,
            1 << 35,
            u64::from(u32::MAX),
            (1 << 63) - 1,
            1 << 63,
            u64::MAX,
        ] {
            assert_eq!(encode(value).len(), encoded_len_varint(value), "value {value}");
        }
    }

    #[test]
    fn max_value_uses_ten_bytes() {
        let wire = encode(u64::MAX);
        assert_eq!(wire.len(), MAX_VARINT_LEN);
        assert_eq!(wire[9], 0x01);
        assert_eq!(decode_varint(&wire, 0).unwrap(), (u64::MAX, 10));
    }

    #[test]
    fn decode_from_offset_returns_new_offset() {
        let bytes = [0xFF, 0xFF, 0x96, 0x01, 0x07];
        assert_eq!(decode_varint(&bytes, 2).unwrap(), (150, 4));
        assert_eq!(decode_varint(&bytes, 4).unwrap(), (7, 5));
    }

    #[test]
    fn decode_truncated_input() {
        assert_eq!(
            decode_varint(&[0x80, 0x80], 0),
            Err(VarintError::UnexpectedEndOfInput)
        );
        assert_eq!(decode_varint(&[], 0), Err(VarintError::UnexpectedEndOfInput));
        assert_eq!(
            decode_varint(&[0x01], 1),
            Err(VarintError::UnexpectedEndOfInput)
        );
    }

    #[test]
    fn decode_rejects_eleven_byte_varint() {
        let mut bytes = vec![0xFF; 10];
        bytes.push(0x01);
        assert_eq!(decode_varint(&bytes, 0), Err(VarintError::IntegerOverflow));
    }

    #[test]
    fn decode_accepts_non_minimal_encoding() {
        // 1 padded with redundant continuation groups.
        assert_eq!(decode_varint(&[0x81, 0x80, 0x00], 0).unwrap(), (1, 3));
    }
}
