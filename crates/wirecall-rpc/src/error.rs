/// Failures reported by a [`Channel`](crate::Channel).
///
/// The client surfaces any of these as `Unavailable`, message unchanged.
#[derive(Debug, thiserror::Error)]
pub enum ChannelError {
    /// The channel was closed before the response arrived.
    #[error("channel closed")]
    Closed,

    /// An I/O error occurred on the underlying connection.
    #[error("channel I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Any other transport-specific failure.
    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, ChannelError>;
