//! Base-128 varint and zigzag integer encoding.
//!
//! This is the lowest layer of wirecall. Every tag, length prefix and
//! integer field on the wire goes through here:
//! - 7 data bits per byte, least significant group first
//! - the high bit (0x80) marks that another byte follows
//! - at most 10 bytes for a 64-bit value

pub mod error;
pub mod varint;
pub mod zigzag;

pub use error::{Result, VarintError};
pub use varint::{decode_varint, encode_varint, encoded_len_varint, MAX_VARINT_LEN};
pub use zigzag::{
    decode_zigzag, encode_zigzag, zigzag_decode, zigzag_decode32, zigzag_encode, zigzag_encode32,
};
