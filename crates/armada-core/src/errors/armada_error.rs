//! Top-level error aggregating every subsystem.

use super::error_code::ArmadaErrorCode;
use super::{BanditError, ConfigError, LearningError, LoaderError, PlannerError, WireError};

/// Any armada failure. Subsystem errors convert via `From`.
#[derive(Debug, thiserror::Error)]
pub enum ArmadaError {
    #[error("Wire error: {0}")]
    Wire(#[from] WireError),

    #[error("Planner error: {0}")]
    Planner(#[from] PlannerError),

    #[error("Bandit error: {0}")]
    Bandit(#[from] BanditError),

    #[error("Learning error: {0}")]
    Learning(#[from] LearningError),

    #[error("Loader error: {0}")]
    Loader(#[from] LoaderError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl ArmadaErrorCode for ArmadaError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Wire(e) => e.error_code(),
            Self::Planner(e) => e.error_code(),
            Self::Bandit(e) => e.error_code(),
            Self::Learning(e) => e.error_code(),
            Self::Loader(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
        }
    }
}

pub type ArmadaResult<T> = Result<T, ArmadaError>;
