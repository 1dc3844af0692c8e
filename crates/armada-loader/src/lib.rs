//! # armada-loader
//!
//! Reads a demonstration root: `config.json` describing the task space and
//! one sub-directory per recorded demonstration.

pub mod demo;
pub mod demo_set;
pub mod joint_limits;
pub mod task_config;

pub use demo::load_demonstration;
pub use demo_set::DemoSet;
pub use joint_limits::JointLimits;
pub use task_config::TaskConfig;
