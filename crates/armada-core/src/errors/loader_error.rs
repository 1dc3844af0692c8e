//! Demonstration loader errors.

use super::error_code::{self, ArmadaErrorCode};

/// Errors that can occur while loading a demonstration directory.
#[derive(Debug, thiserror::Error)]
pub enum LoaderError {
    #[error("file not found: {path}")]
    FileNotFound { path: String },

    #[error("parse error in {path}: {message}")]
    Parse { path: String, message: String },

    #[error("invalid task config: {message}")]
    InvalidTaskConfig { message: String },

    #[error("CSV error in {path}: {message}")]
    Csv { path: String, message: String },
}

impl ArmadaErrorCode for LoaderError {
    fn error_code(&self) -> &'static str {
        error_code::LOADER_ERROR
    }
}
