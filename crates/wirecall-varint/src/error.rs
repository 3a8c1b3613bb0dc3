/// Errors that can occur while decoding a varint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum VarintError {
    /// More than ten bytes carried the continuation bit.
    #[error("integer overflow (varint longer than 10 bytes)")]
    IntegerOverflow,

    /// The input ended before a terminating byte was found.
    #[error("unexpected end of input while reading varint")]
    UnexpectedEndOfInput,
}

pub type Result<T> = std::result::Result<T, VarintError>;
