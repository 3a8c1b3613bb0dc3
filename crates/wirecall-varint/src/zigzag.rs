//! Zigzag mapping of signed integers onto unsigned ones.
//!
//! Small magnitudes of either sign stay small: 0 → 0, -1 → 1, 1 → 2,
//! -2 → 3, and so on. Used by `sint32`/`sint64` fields.

use bytes::BufMut;

use crate::error::Result;
use crate::varint::{decode_varint, encode_varint};

pub fn zigzag_encode(n: i64) -> u64 {
    ((n << 1) ^ (n >> 63)) as u64
}

pub fn zigzag_decode(n: u64) -> i64 {
    ((n >> 1) as i64) ^ -((n & 1) as i64)
}

pub fn zigzag_encode32(n: i32) -> u32 {
    ((n << 1) ^ (n >> 31)) as u32
}

pub fn zigzag_decode32(n: u32) -> i32 {
    ((n >> 1) as i32) ^ -((n & 1) as i32)
}

/// Zigzag-map `value` and append it as a varint.
pub fn encode_zigzag<B: BufMut>(value: i64, dst: &mut B) {
    encode_varint(zigzag_encode(value), dst);
}

/// Decode a varint at `offset` and undo the zigzag mapping.
pub fn decode_zigzag(bytes: &[u8], offset: usize) -> Result<(i64, usize)> {
    let (raw, next) = decode_varint(bytes, offset)?;
    Ok((zigzag_decode(raw), next))
}

#[cfg(test)]
mod tests {
    use bytes::BytesMut;

    use super::*;

    #[test]
    fn small_magnitudes_interleave() {
        assert_eq!(zigzag_encode(0), 0);
        assert_eq!(zigzag_encode(-1), 1);
        assert_eq!(zigzag_encode(1), 2);
        assert_eq!(zigzag_encode(-2), 3);
        assert_eq!(zigzag_encode32(-64), 127);
    }

    #[test]
    fn extremes_map_to_top_of_range() {
        assert_eq!(zigzag_encode(i64::MAX), u64::MAX - 1);
        assert_eq!(zigzag_encode(i64::MIN), u64::MAX);
        assert_eq!(zigzag_decode(u64::MAX), i64::MIN);
        assert_eq!(zigzag_decode32(u32::MAX), i32::MIN);
    }

    #[test]
    fn negative_one_fits_in_one_byte() {
        let mut buf = BytesMut::new();
        encode_zigzag(-1, &mut buf);
        assert_eq!(buf.as_ref(), &[0x01]);
        assert_eq!(decode_zigzag(&buf, 0).unwrap(), (-1, 1));
    }
}
