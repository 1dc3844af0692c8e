use serde::{Deserialize, Serialize};

use super::TaskInstance;

/// Outcome of evaluating one arm: which task instances the oracle solved,
/// which it did not, and how far each failure got.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ArmSampleMetadata {
    pub success: Vec<TaskInstance>,
    pub failure: Vec<TaskInstance>,
    /// Parallel to `failure`: mean planning progress of each failed instance.
    pub failure_score: Vec<f64>,
}

impl ArmSampleMetadata {
    pub fn total(&self) -> usize {
        self.success.len() + self.failure.len()
    }

    /// `failures / (failures + successes)`; `None` when nothing was evaluated.
    pub fn failure_rate(&self) -> Option<f64> {
        match self.total() {
            0 => None,
            n => Some(self.failure.len() as f64 / n as f64),
        }
    }

    /// Smallest failure score, if any instance failed.
    pub fn min_failure_score(&self) -> Option<f64> {
        self.failure_score.iter().copied().reduce(f64::min)
    }

    /// Indices of failed instances whose score equals the minimum.
    pub fn hardest_failures(&self) -> Vec<usize> {
        match self.min_failure_score() {
            Some(min) => self
                .failure_score
                .iter()
                .enumerate()
                .filter(|(_, s)| **s == min)
                .map(|(i, _)| i)
                .collect(),
            None => Vec::new(),
        }
    }
}
