//! Per-run parameters handed to the bandit.

use armada_core::config::{ArmadaConfig, BanditConfig, SearchConfig};
use armada_core::constants::DEFAULT_OBJECT_Z;

/// Shape of the task being learned.
#[derive(Debug, Clone, Copy)]
pub struct TaskContext<'a> {
    pub n_objects: usize,
    /// Dimensions per object. Only planar poses (x, y, θ) are plannable.
    pub dimension_count: usize,
    pub initial_joint_config: &'a [f64],
}

/// Parameters of one naive PAC round.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PacSettings {
    pub epsilon: f64,
    pub delta: f64,
    /// Re-evaluate each arm's stored failures instead of drawing afresh.
    pub reuse_samples: bool,
    /// Query the oracle for several arms at once.
    pub parallel_arms: bool,
    /// Height of the table plane objects are lifted onto.
    pub object_z: f64,
}

impl PacSettings {
    pub fn new(epsilon: f64, delta: f64) -> Self {
        Self {
            epsilon,
            delta,
            reuse_samples: false,
            parallel_arms: false,
            object_z: DEFAULT_OBJECT_Z,
        }
    }

    pub fn from_config(config: &BanditConfig) -> Self {
        Self {
            epsilon: config.effective_epsilon(),
            delta: config.effective_delta(),
            reuse_samples: config.effective_reuse_samples(),
            parallel_arms: config.effective_parallel_arms(),
            object_z: config.effective_object_z(),
        }
    }
}

/// Parameters of the bounded success search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchSettings {
    pub successes_per_arm: usize,
    pub max_attempts_per_arm: usize,
    pub object_z: f64,
}

impl SearchSettings {
    pub fn from_config(search: &SearchConfig, bandit: &BanditConfig) -> Self {
        Self {
            successes_per_arm: search.effective_successes_per_arm(),
            max_attempts_per_arm: search.effective_max_attempts_per_arm(),
            object_z: bandit.effective_object_z(),
        }
    }
}

impl From<&ArmadaConfig> for PacSettings {
    fn from(config: &ArmadaConfig) -> Self {
        Self::from_config(&config.bandit)
    }
}

impl From<&ArmadaConfig> for SearchSettings {
    fn from(config: &ArmadaConfig) -> Self {
        Self::from_config(&config.search, &config.bandit)
    }
}
