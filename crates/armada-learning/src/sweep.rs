//! How many demonstrations does the loop need as the arm count grows?
//!
//! For every grid entry the task space is re-partitioned and the loop is
//! run `runs_per_k` times from scratch. Demonstration counts of the
//! successful runs go to a JSON log keyed by arm count, which is re-read on
//! start so an interrupted sweep picks up where it stopped.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use armada_bandit::{assign_demonstrations, partition, TaskContext};
use armada_core::config::{ArmadaConfig, GridEntry};
use armada_core::errors::LearningError;
use armada_core::models::{Demonstration, Dimension};
use armada_core::traits::PlanningOracle;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{info, info_span};

use crate::active_loop::{run_active_learning, LearningSettings, LoopOutcome};
use crate::observer::NoopObserver;

#[derive(Debug, Clone, PartialEq)]
pub struct SweepSettings {
    pub learning: LearningSettings,
    pub runs_per_k: usize,
    pub grid: Vec<GridEntry>,
    pub log_file: PathBuf,
}

impl From<&ArmadaConfig> for SweepSettings {
    fn from(config: &ArmadaConfig) -> Self {
        Self {
            learning: LearningSettings::from(config),
            runs_per_k: config.sweep.effective_runs_per_k(),
            grid: config.sweep.effective_grid(),
            log_file: config.sweep.effective_log_file(),
        }
    }
}

/// Demonstration counts of successful runs, keyed by arm count.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SweepLog {
    runs: BTreeMap<String, Vec<usize>>,
}

impl SweepLog {
    /// Read the log at `path`; a missing file is an empty log.
    pub fn load(path: &Path) -> Result<Self, LearningError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).map_err(|e| log_error(path, e))?;
        serde_json::from_str(&content).map_err(|e| log_error(path, e))
    }

    pub fn save(&self, path: &Path) -> Result<(), LearningError> {
        let content = serde_json::to_string_pretty(self).map_err(|e| log_error(path, e))?;
        fs::write(path, content).map_err(|e| log_error(path, e))
    }

    pub fn runs(&self, arm_count: usize) -> &[usize] {
        self.runs
            .get(&arm_count.to_string())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn record(&mut self, arm_count: usize, demonstrations: usize) {
        self.runs
            .entry(arm_count.to_string())
            .or_default()
            .push(demonstrations);
    }

    /// Per arm count, sorted by arm count. Empty entries are left out.
    pub fn summary(&self) -> Vec<KSummary> {
        let mut summaries: Vec<KSummary> = self
            .runs
            .iter()
            .filter_map(|(k, counts)| KSummary::from_counts(k.parse().ok()?, counts))
            .collect();
        summaries.sort_by_key(|s| s.arm_count);
        summaries
    }
}

fn log_error(path: &Path, e: impl std::fmt::Display) -> LearningError {
    LearningError::SweepLog {
        path: path.display().to_string(),
        message: e.to_string(),
    }
}

/// Distribution of demonstration counts for one arm count.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KSummary {
    pub arm_count: usize,
    pub runs: usize,
    pub min: usize,
    pub mean: f64,
    pub max: usize,
    /// Share of runs that needed exactly that many demonstrations.
    pub pmf: BTreeMap<usize, f64>,
}

impl KSummary {
    pub fn from_counts(arm_count: usize, counts: &[usize]) -> Option<Self> {
        let min = *counts.iter().min()?;
        let max = *counts.iter().max()?;
        let runs = counts.len();
        let mean = counts.iter().sum::<usize>() as f64 / runs as f64;
        let mut pmf = BTreeMap::new();
        for count in counts {
            *pmf.entry(*count).or_insert(0.0) += 1.0 / runs as f64;
        }
        Some(Self {
            arm_count,
            runs,
            min,
            mean,
            max,
            pmf,
        })
    }
}

/// Run the sweep, appending to the log at `settings.log_file`.
///
/// `dimensions` must contain entries named `x` and `y`; their segment
/// counts are replaced by each grid entry's. Trials always reuse samples.
pub fn run_sweep<O, R>(
    oracle: &O,
    dimensions: &[Dimension],
    demos: &[Demonstration],
    task: &TaskContext<'_>,
    settings: &SweepSettings,
    rng: &mut R,
) -> Result<Vec<KSummary>, LearningError>
where
    O: PlanningOracle + ?Sized,
    R: Rng + ?Sized,
{
    let x_axis = axis(dimensions, "x")?;
    let y_axis = axis(dimensions, "y")?;
    let mut log = SweepLog::load(&settings.log_file)?;
    let mut learning = settings.learning;
    learning.pac.reuse_samples = true;

    for entry in &settings.grid {
        let arm_count = entry.arm_count();
        let done = log.runs(arm_count).len();
        if done >= settings.runs_per_k {
            info!(arm_count, done, "grid entry already complete");
            continue;
        }
        let _span = info_span!("armada.sweep", arm_count).entered();

        let mut grid_dimensions = dimensions.to_vec();
        grid_dimensions[x_axis].n_segments = entry.x;
        grid_dimensions[y_axis].n_segments = entry.y;
        let mut arms = partition(&grid_dimensions, task.n_objects);
        assign_demonstrations(&mut arms, demos.to_vec());

        for trial in done..settings.runs_per_k {
            let outcome =
                run_active_learning(oracle, arms.clone(), task, &learning, &mut NoopObserver, rng)?;
            if let LoopOutcome::Success(acquired) = outcome {
                if !acquired.is_empty() {
                    log.record(arm_count, acquired.len());
                    log.save(&settings.log_file)?;
                }
            }
            info!(arm_count, trial, "sweep trial finished");
        }
    }
    Ok(log.summary())
}

fn axis(dimensions: &[Dimension], name: &str) -> Result<usize, LearningError> {
    dimensions
        .iter()
        .position(|d| d.name == name)
        .ok_or_else(|| LearningError::SweepGrid {
            message: format!("no dimension named {name}"),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_reports_min_mean_max() {
        let mut log = SweepLog::default();
        for count in [2, 4, 4, 6] {
            log.record(4, count);
        }
        log.record(12, 9);
        let summary = log.summary();
        assert_eq!(summary.len(), 2);
        assert_eq!(summary[0].arm_count, 4);
        assert_eq!((summary[0].min, summary[0].max), (2, 6));
        assert!((summary[0].mean - 4.0).abs() < 1e-12);
        assert!((summary[0].pmf[&4] - 0.5).abs() < 1e-12);
        assert_eq!(summary[1].runs, 1);
    }

    #[test]
    fn summary_sorts_numerically() {
        let mut log = SweepLog::default();
        log.record(16, 3);
        log.record(2, 5);
        let ks: Vec<usize> = log.summary().iter().map(|s| s.arm_count).collect();
        assert_eq!(ks, vec![2, 16]);
    }

    #[test]
    fn log_is_a_plain_json_object() {
        let mut log = SweepLog::default();
        log.record(2, 3);
        let json = serde_json::to_string(&log).unwrap();
        assert_eq!(json, r#"{"2":[3]}"#);
    }

    #[test]
    fn missing_log_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let log = SweepLog::load(&dir.path().join("absent.json")).unwrap();
        assert_eq!(log, SweepLog::default());
    }

    #[test]
    fn corrupt_log_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sweep.json");
        fs::write(&path, "not json").unwrap();
        let err = SweepLog::load(&path).unwrap_err();
        assert!(matches!(err, LearningError::SweepLog { .. }));
    }

    #[test]
    fn grid_needs_x_and_y() {
        let dims = [Dimension::new("x", 0.0, 1.0, 1), Dimension::new("θ", 0.0, 1.0, 1)];
        assert!(axis(&dims, "x").is_ok());
        assert!(matches!(axis(&dims, "y"), Err(LearningError::SweepGrid { .. })));
    }
}
