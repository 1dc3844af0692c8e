//! Demonstration-count sweep configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Segment counts for the `x` and `y` dimensions; `K = x * y` arms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridEntry {
    pub x: usize,
    pub y: usize,
}

impl GridEntry {
    pub fn arm_count(&self) -> usize {
        self.x * self.y
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SweepConfig {
    /// Trials per grid entry. Default: 1000.
    pub runs_per_k: Option<usize>,
    /// JSON log of demonstration counts. Default: `sweep.json`.
    pub log_file: Option<PathBuf>,
    /// Grid to sweep. Default: K = 2, 4, 6, 8, 10, 12, 14, 16.
    pub grid: Vec<GridEntry>,
}

impl SweepConfig {
    pub fn effective_runs_per_k(&self) -> usize {
        self.runs_per_k.unwrap_or(1000)
    }

    pub fn effective_log_file(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| PathBuf::from("sweep.json"))
    }

    pub fn effective_grid(&self) -> Vec<GridEntry> {
        if !self.grid.is_empty() {
            return self.grid.clone();
        }
        [(1, 2), (1, 4), (2, 3), (2, 4), (2, 5), (3, 4), (2, 7), (4, 4)]
            .into_iter()
            .map(|(x, y)| GridEntry { x, y })
            .collect()
    }
}
