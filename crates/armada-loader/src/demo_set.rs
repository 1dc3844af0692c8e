//! A whole demonstration root.

use std::fs;
use std::path::{Path, PathBuf};

use armada_bandit::{assign_demonstrations, partition, TaskContext};
use armada_core::errors::LoaderError;
use armada_core::models::{Arm, Demonstration};
use tracing::{info, warn};

use crate::demo::load_demonstration;
use crate::task_config::TaskConfig;

pub const TASK_CONFIG_FILE: &str = "config.json";

/// Task configuration plus every demonstration under a root directory.
#[derive(Debug, Clone)]
pub struct DemoSet {
    pub root: PathBuf,
    pub config: TaskConfig,
    /// In sorted directory-name order.
    pub demonstrations: Vec<Demonstration>,
}

impl DemoSet {
    /// Read `<root>/config.json` and every sub-directory of `root`.
    pub fn load(root: &Path) -> Result<Self, LoaderError> {
        if !root.is_dir() {
            return Err(LoaderError::FileNotFound {
                path: root.display().to_string(),
            });
        }
        let config = TaskConfig::load(&root.join(TASK_CONFIG_FILE))?;
        let limits = config.effective_joint_limits();

        let mut dirs: Vec<PathBuf> = fs::read_dir(root)
            .map_err(|e| LoaderError::Parse {
                path: root.display().to_string(),
                message: e.to_string(),
            })?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.is_dir())
            .collect();
        dirs.sort();

        let demonstrations = dirs
            .iter()
            .map(|dir| load_demonstration(dir, &limits))
            .collect::<Result<Vec<_>, _>>()?;

        info!(
            root = %root.display(),
            demonstrations = demonstrations.len(),
            n_objects = config.n_objects,
            "demonstrations loaded"
        );
        Ok(Self {
            root: root.to_path_buf(),
            config,
            demonstrations,
        })
    }

    /// Partition the task space and place every demonstration in its arm.
    pub fn arms(&self) -> Vec<Arm> {
        let mut arms = partition(&self.config.dimensions, self.config.n_objects);
        let unplaced = assign_demonstrations(&mut arms, self.demonstrations.clone());
        if !unplaced.is_empty() {
            warn!(unplaced = unplaced.len(), "demonstrations outside the task space were dropped");
        }
        arms
    }

    pub fn task_context(&self) -> TaskContext<'_> {
        TaskContext {
            n_objects: self.config.n_objects,
            dimension_count: self.config.dimension_count(),
            initial_joint_config: &self.config.initial_joint_config,
        }
    }
}
