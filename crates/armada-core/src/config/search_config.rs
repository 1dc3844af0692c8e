//! Successful-plan search configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SearchConfig {
    /// Successful task instances wanted per arm. Default: 2.
    pub successes_per_arm: Option<usize>,
    /// Draws allowed per arm before giving up. Default: 10000.
    pub max_attempts_per_arm: Option<usize>,
}

impl SearchConfig {
    pub fn effective_successes_per_arm(&self) -> usize {
        self.successes_per_arm.unwrap_or(2)
    }

    pub fn effective_max_attempts_per_arm(&self) -> usize {
        self.max_attempts_per_arm.unwrap_or(10_000)
    }
}
