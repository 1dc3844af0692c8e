//! Task-space data model: dimensions, arms, demonstrations, task instances,
//! plan results, and per-arm sample outcomes.

pub mod arm;
pub mod demonstration;
pub mod dimension;
pub mod plan;
pub mod sample_metadata;
pub mod task_instance;

pub use arm::{Arm, ArmId};
pub use demonstration::{by_descending_score, Demonstration, Point2};
pub use dimension::{Dimension, Interval};
pub use plan::{PlanFailure, PlanResult};
pub use sample_metadata::ArmSampleMetadata;
pub use task_instance::{ObjectPose, TaskInstance};
