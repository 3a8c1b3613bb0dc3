use wirecall_varint::VarintError;

use crate::wire::WireKind;

/// Errors that can occur while decoding a message.
///
/// A decode never yields a partially populated message: any of these
/// aborts the whole operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// A tag carried an illegal field number or wire kind, or an end-group
    /// marker appeared without a matching start-group.
    #[error("malformed tag (field {number}, wire kind {kind})")]
    MalformedTag { number: u64, kind: u8 },

    /// A varint ran past ten bytes.
    #[error("integer overflow")]
    IntegerOverflow,

    /// The input ended in the middle of a wire unit.
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,

    /// A length prefix is negative when read as a signed 64-bit value.
    #[error("negative length found during decoding ({0:#x})")]
    NegativeLength(u64),

    /// A known field arrived with a wire kind other than the declared one.
    #[error("wrong wire kind for field {field}: expected {expected}, got {actual}")]
    WrongWireKind {
        field: &'static str,
        expected: WireKind,
        actual: WireKind,
    },

    /// A string field carried bytes that are not valid UTF-8.
    #[error("invalid UTF-8 in string field {field}")]
    InvalidUtf8 { field: &'static str },
}

impl From<VarintError> for DecodeError {
    fn from(err: VarintError) -> Self {
        match err {
            VarintError::IntegerOverflow => DecodeError::IntegerOverflow,
            VarintError::UnexpectedEndOfInput => DecodeError::UnexpectedEndOfInput,
        }
    }
}

pub type Result<T> = std::result::Result<T, DecodeError>;
