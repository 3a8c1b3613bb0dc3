//! Tag-length-value message codec with unknown-field preservation.
//!
//! Every field occurrence is written as a wire unit:
//! - a varint tag, `field_number << 3 | wire_kind`
//! - a kind-specific payload (varint, 4 or 8 little-endian bytes, or a
//!   varint length followed by that many bytes)
//!
//! Zero values are never written. Decoding accepts fields in any order,
//! keeps the last occurrence, and preserves units it does not recognize
//! so they are re-emitted byte-for-byte on encode.

pub mod codec;
pub mod descriptor;
pub mod empty;
pub mod error;
pub mod hello;
pub mod raw;
pub mod skip;
pub mod unknown;
pub mod value;
pub mod wire;

pub use codec::Message;
pub use descriptor::{find_field, FieldDescriptor, FieldType};
pub use empty::Empty;
pub use error::{DecodeError, Result};
pub use hello::{HelloReq, HelloResp};
pub use raw::{RawValue, WireUnit, WireUnits};
pub use skip::skip_field;
pub use unknown::UnknownFields;
pub use value::{FieldRef, FieldValue};
pub use wire::{decode_tag, Tag, WireKind, MAX_FIELD_NUMBER};
