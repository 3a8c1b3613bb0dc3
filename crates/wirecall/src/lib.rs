//! Tag-length-value messages and unary calls with status codes.
//!
//! wirecall encodes typed messages in the protobuf binary wire format,
//! keeps fields it does not understand so they survive a round trip, and
//! routes unary calls to handlers through an interceptor chain.
//!
//! # Crate Structure
//!
//! - [`varint`] — Base-128 varints and zigzag mapping
//! - [`message`] — Message codec with unknown-field preservation
//! - [`rpc`] — Call dispatch, status codes, interceptors (behind `rpc` feature)

/// Re-export varint types.
pub mod varint {
    pub use wirecall_varint::*;
}

/// Re-export message codec types.
pub mod message {
    pub use wirecall_message::*;
}

/// Re-export call dispatch types (requires `rpc` feature).
#[cfg(feature = "rpc")]
pub mod rpc {
    pub use wirecall_rpc::*;
}
