//! Error types shared by the stream adapters and the rendezvous engine.
//!
//! End-of-stream and shutdown are not errors: they travel in-band as
//! `None`. Everything here is a contract violation or a torn-down engine.

use std::io;

/// Errors returned by the blocking consumer-side API.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReadlineError {
    /// The input stream was closed explicitly.
    #[error("stream is closed")]
    Closed,

    /// A blocking call was made from the UI thread.
    #[error("cannot call {0} from the UI thread")]
    IllegalUse(&'static str),

    /// Offset and length do not fit the destination buffer.
    #[error("range {offset}..{offset}+{len} out of bounds for buffer of length {capacity}")]
    IndexOutOfRange {
        /// Requested start offset.
        offset: usize,
        /// Requested length.
        len: usize,
        /// Length of the destination buffer.
        capacity: usize,
    },

    /// The engine was dropped while a caller was waiting for a reply.
    #[error("rendezvous engine disconnected")]
    Disconnected,

    /// The engine answered a request with a reply meant for another channel.
    #[error("unexpected reply on channel {0}")]
    UnexpectedReply(&'static str),
}

/// Result alias for the consumer-side API.
pub type Result<T> = std::result::Result<T, ReadlineError>;

impl From<ReadlineError> for io::Error {
    fn from(err: ReadlineError) -> Self {
        let kind = match err {
            ReadlineError::Closed => io::ErrorKind::BrokenPipe,
            ReadlineError::IllegalUse(_) => io::ErrorKind::Unsupported,
            ReadlineError::IndexOutOfRange { .. } => io::ErrorKind::InvalidInput,
            ReadlineError::Disconnected => io::ErrorKind::NotConnected,
            ReadlineError::UnexpectedReply(_) => io::ErrorKind::InvalidData,
        };
        Self::new(kind, err)
    }
}
