//! # armada-core
//!
//! Foundation crate for armada.
//! Defines the task-space data model, the oracle trait, errors, config,
//! tracing setup, and SE(3) geometry. Every other crate in the workspace
//! depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod geometry;
pub mod models;
pub mod tracing;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::ArmadaConfig;
pub use errors::{ArmadaError, ArmadaResult};
pub use geometry::Se3;
pub use models::{
    Arm, ArmId, ArmSampleMetadata, Demonstration, Dimension, Interval, ObjectPose, PlanFailure,
    PlanResult, Point2, TaskInstance,
};
pub use traits::{Cancellable, CancellationToken, PlanRequest, PlanningOracle};
