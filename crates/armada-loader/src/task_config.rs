//! `config.json` at the root of a demonstration directory.

use std::fs;
use std::path::Path;

use armada_core::constants::POSE_DIMENSIONS;
use armada_core::errors::LoaderError;
use armada_core::models::Dimension;
use serde::{Deserialize, Serialize};

use crate::joint_limits::JointLimits;

/// Task-space description shared by every demonstration in a root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskConfig {
    pub dimensions: Vec<Dimension>,
    pub initial_joint_config: Vec<f64>,
    pub n_objects: usize,
    /// Defaults to the Baxter left-arm limits when absent.
    #[serde(default)]
    pub joint_limits: Option<JointLimits>,
}

impl TaskConfig {
    pub fn load(path: &Path) -> Result<Self, LoaderError> {
        if !path.is_file() {
            return Err(LoaderError::FileNotFound {
                path: path.display().to_string(),
            });
        }
        let content = fs::read_to_string(path).map_err(|e| LoaderError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_json(&content, path)
    }

    pub fn from_json(content: &str, path: &Path) -> Result<Self, LoaderError> {
        let config: Self = serde_json::from_str(content).map_err(|e| LoaderError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), LoaderError> {
        let invalid = |message: String| Err(LoaderError::InvalidTaskConfig { message });

        if self.dimensions.len() != POSE_DIMENSIONS {
            return invalid(format!(
                "expected {POSE_DIMENSIONS} dimensions (x, y, heading), found {}",
                self.dimensions.len()
            ));
        }
        for d in &self.dimensions {
            if d.n_segments == 0 {
                return invalid(format!("dimension {} has no segments", d.name));
            }
            if !(d.min.is_finite() && d.max.is_finite()) || d.min > d.max {
                return invalid(format!("dimension {} has bounds [{}, {}]", d.name, d.min, d.max));
            }
        }
        if self.n_objects == 0 {
            return invalid("n_objects must be at least 1".to_string());
        }
        if self.initial_joint_config.is_empty() {
            return invalid("initial_joint_config is empty".to_string());
        }
        let limits = self.effective_joint_limits();
        if limits.len() != self.initial_joint_config.len() {
            return invalid(format!(
                "{} joint limits for {} joints",
                limits.len(),
                self.initial_joint_config.len()
            ));
        }
        Ok(())
    }

    pub fn effective_joint_limits(&self) -> JointLimits {
        self.joint_limits.clone().unwrap_or_default()
    }

    pub fn dimension_count(&self) -> usize {
        self.dimensions.len()
    }
}
