//! PAC bandit and active-learning configuration.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_OBJECT_Z;

/// Configuration for arm evaluation, worst-arm selection, and stopping.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct BanditConfig {
    /// Accuracy of the worst-arm estimate. Default: 0.25.
    pub epsilon: Option<f64>,
    /// Failure probability of the PAC guarantee. Default: 0.1.
    pub delta: Option<f64>,
    /// Target confidence for stopping. Default: 0.9.
    pub beta: Option<f64>,
    /// Re-evaluate stored failures with the newest demonstration only.
    /// Default: false.
    pub reuse_samples: Option<bool>,
    /// Run oracle calls for different arms concurrently. Default: false.
    pub parallel_arms: Option<bool>,
    /// RNG seed. Unset draws one from OS entropy.
    pub seed: Option<u64>,
    /// Height at which sampled objects are placed. Default: table height.
    pub object_z: Option<f64>,
}

impl BanditConfig {
    pub fn effective_epsilon(&self) -> f64 {
        self.epsilon.unwrap_or(0.25)
    }

    pub fn effective_delta(&self) -> f64 {
        self.delta.unwrap_or(0.1)
    }

    pub fn effective_beta(&self) -> f64 {
        self.beta.unwrap_or(0.9)
    }

    pub fn effective_reuse_samples(&self) -> bool {
        self.reuse_samples.unwrap_or(false)
    }

    pub fn effective_parallel_arms(&self) -> bool {
        self.parallel_arms.unwrap_or(false)
    }

    pub fn effective_object_z(&self) -> f64 {
        self.object_z.unwrap_or(DEFAULT_OBJECT_Z)
    }
}
