//! Error types for wirestack

use thiserror::Error;

/// Result type alias for wirestack operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for wirestack
#[derive(Error, Debug)]
pub enum Error {
    /// A read would consume more bytes than the stream has left
    #[error("stream underrun: needed {needed} bytes, {remaining} remaining")]
    StreamUnderrun { needed: usize, remaining: usize },

    /// A write would produce more bytes than the stream has capacity for
    #[error("stream overrun: needed {needed} bytes, {remaining} remaining")]
    StreamOverrun { needed: usize, remaining: usize },

    /// Buffer is shorter than a layer's mandatory header
    #[error("truncated {pdu} header: needed {needed} bytes, got {available}")]
    TruncatedHeader {
        pdu: &'static str,
        needed: usize,
        available: usize,
    },

    /// A TLV option declares a length past the end of the option region
    #[error("malformed options: declared length {declared} exceeds {available} available bytes")]
    MalformedOptions { declared: usize, available: usize },

    /// A layer's header + trailer did not fit the region reserved for it.
    /// This cannot happen for an internally consistent chain and indicates
    /// a size-computation defect in a codec.
    #[error("insufficient buffer space: needed {needed} bytes, got {available}")]
    InsufficientBufferSpace { needed: usize, available: usize },

    /// Interface not found
    #[error("interface '{0}' not found")]
    InterfaceNotFound(String),

    /// Sink could not be opened
    #[error("sink unavailable: {0}")]
    SinkUnavailable(String),

    /// Sink rejected a write
    #[error("sink write failed: {0}")]
    SinkWriteFailed(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a truncated-header error for the named layer
    pub fn truncated(pdu: &'static str, needed: usize, available: usize) -> Self {
        Error::TruncatedHeader {
            pdu,
            needed,
            available,
        }
    }

    /// Create a sink-unavailable error with a custom message
    pub fn sink_unavailable<S: Into<String>>(msg: S) -> Self {
        Error::SinkUnavailable(msg.into())
    }

    /// Create a sink-write-failed error with a custom message
    pub fn sink_write_failed<S: Into<String>>(msg: S) -> Self {
        Error::SinkWriteFailed(msg.into())
    }
}
