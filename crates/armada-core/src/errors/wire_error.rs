//! Wire codec errors.

use super::error_code::{self, ArmadaErrorCode};

/// Errors raised while encoding or decoding oracle wire primitives.
#[derive(Debug, thiserror::Error)]
pub enum WireError {
    /// The peer closed the stream before a field was fully received.
    #[error("incomplete message: expected {expected} bytes, received {received}")]
    IncompleteMessage { expected: usize, received: usize },

    #[error("invalid length for {field}: {value}")]
    InvalidLength { field: &'static str, value: i64 },

    #[error("string field is not valid UTF-8: {reason}")]
    InvalidUtf8 { reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ArmadaErrorCode for WireError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::IncompleteMessage { .. } => error_code::INCOMPLETE_MESSAGE,
            Self::InvalidLength { .. } => error_code::INVALID_LENGTH,
            Self::InvalidUtf8 { .. } | Self::Io(_) => error_code::WIRE_ERROR,
        }
    }
}
