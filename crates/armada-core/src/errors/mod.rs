//! Error handling for armada.
//! One error enum per subsystem, `thiserror` only.

pub mod armada_error;
pub mod bandit_error;
pub mod config_error;
pub mod error_code;
pub mod learning_error;
pub mod loader_error;
pub mod planner_error;
pub mod wire_error;

pub use armada_error::{ArmadaError, ArmadaResult};
pub use bandit_error::BanditError;
pub use config_error::ConfigError;
pub use error_code::ArmadaErrorCode;
pub use learning_error::LearningError;
pub use loader_error::LoaderError;
pub use planner_error::PlannerError;
pub use wire_error::WireError;
