//! ArmadaErrorCode trait for stable, machine-readable error codes.

/// Every error enum implements this to expose a structured code string
/// (used in CLI exit output and in structured log fields).
pub trait ArmadaErrorCode {
    /// Returns the error code string (e.g., "INCOMPLETE_MESSAGE").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted error string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const WIRE_ERROR: &str = "WIRE_ERROR";
pub const INCOMPLETE_MESSAGE: &str = "INCOMPLETE_MESSAGE";
pub const INVALID_LENGTH: &str = "INVALID_LENGTH";
pub const CONNECTION_FAILURE: &str = "CONNECTION_FAILURE";
pub const INVALID_ADDRESS: &str = "INVALID_ADDRESS";
pub const TIMEOUT: &str = "TIMEOUT";
pub const CANCELLED: &str = "CANCELLED";
pub const PROTOCOL_ERROR: &str = "PROTOCOL_ERROR";
pub const DEGENERATE_ARM: &str = "DEGENERATE_ARM";
pub const SAMPLING_EXHAUSTED: &str = "SAMPLING_EXHAUSTED";
pub const BANDIT_ERROR: &str = "BANDIT_ERROR";
pub const LEARNING_ERROR: &str = "LEARNING_ERROR";
pub const LOADER_ERROR: &str = "LOADER_ERROR";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
