//! Planner client errors.

use super::error_code::{self, ArmadaErrorCode};
use super::WireError;

/// Errors that can occur while exchanging a request with the planning oracle.
#[derive(Debug, thiserror::Error)]
pub enum PlannerError {
    #[error("oracle unreachable at {address}: {reason}")]
    ConnectionFailure { address: String, reason: String },

    #[error("invalid oracle address {address:?}: {reason}")]
    InvalidAddress { address: String, reason: String },

    #[error("wire error: {0}")]
    Wire(#[from] WireError),

    #[error("oracle request exceeded its {timeout_ms}ms deadline")]
    Timeout { timeout_ms: u64 },

    #[error("oracle request cancelled")]
    Cancelled,

    #[error("protocol violation: {message}")]
    Protocol { message: String },
}

impl ArmadaErrorCode for PlannerError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::ConnectionFailure { .. } => error_code::CONNECTION_FAILURE,
            Self::InvalidAddress { .. } => error_code::INVALID_ADDRESS,
            Self::Wire(e) => e.error_code(),
            Self::Timeout { .. } => error_code::TIMEOUT,
            Self::Cancelled => error_code::CANCELLED,
            Self::Protocol { .. } => error_code::PROTOCOL_ERROR,
        }
    }
}
