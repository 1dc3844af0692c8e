//! Active-learning loop and sweep errors.

use super::error_code::{self, ArmadaErrorCode};
use super::BanditError;

/// Errors that abort an active-learning run.
#[derive(Debug, thiserror::Error)]
pub enum LearningError {
    #[error("round {round} failed: {source}")]
    Round {
        round: usize,
        #[source]
        source: BanditError,
    },

    #[error("no arms to learn over")]
    NoArms,

    #[error("sweep log {path}: {message}")]
    SweepLog { path: String, message: String },

    #[error("sweep grid needs dimensions named x and y: {message}")]
    SweepGrid { message: String },
}

impl ArmadaErrorCode for LearningError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Round { source, .. } => source.error_code(),
            _ => error_code::LEARNING_ERROR,
        }
    }
}
