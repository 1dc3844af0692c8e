//! Top-level armada configuration with layered resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{BanditConfig, OracleConfig, SearchConfig, SweepConfig};
use crate::errors::ConfigError;

/// Project config file name, looked up in the working directory.
pub const PROJECT_CONFIG_FILE: &str = "armada.toml";

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`ARMADA_*`)
/// 3. Project config (`armada.toml`, or an explicit `--config` file)
/// 4. User config (`~/.armada/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ArmadaConfig {
    pub oracle: OracleConfig,
    pub bandit: BanditConfig,
    pub search: SearchConfig,
    pub sweep: SweepConfig,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub oracle_address: Option<String>,
    pub epsilon: Option<f64>,
    pub delta: Option<f64>,
    pub beta: Option<f64>,
    pub seed: Option<u64>,
    pub reuse_samples: Option<bool>,
    pub parallel_arms: Option<bool>,
}

impl ArmadaConfig {
    /// Load configuration, reading the project layer from `root/armada.toml`.
    pub fn load(root: &Path, cli_overrides: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        let project = root.join(PROJECT_CONFIG_FILE);
        Self::resolve(project.exists().then_some(project.as_path()), cli_overrides)
    }

    /// Load configuration with an explicit project file, which must exist.
    pub fn load_file(path: &Path, cli_overrides: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.display().to_string(),
            });
        }
        Self::resolve(Some(path), cli_overrides)
    }

    fn resolve(
        project_file: Option<&Path>,
        cli_overrides: Option<&CliOverrides>,
    ) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Layer 4 (lowest priority): user config
        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                match Self::merge_toml_file(&mut config, &user_config_path) {
                    Ok(()) => {}
                    Err(e @ ConfigError::ParseError { .. }) => return Err(e),
                    Err(e) => {
                        ::tracing::warn!(error = %e, "ignoring unreadable user config");
                    }
                }
            }
        }

        // Layer 3: project config
        if let Some(path) = project_file {
            Self::merge_toml_file(&mut config, path)?;
        }

        // Layer 2: environment variables
        Self::apply_env_overrides(&mut config);

        // Layer 1 (highest priority): CLI flags
        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Validate the configuration values.
    pub fn validate(config: &ArmadaConfig) -> Result<(), ConfigError> {
        let open_unit = |field: &str, value: Option<f64>| match value {
            Some(v) if !(v > 0.0 && v < 1.0) => Err(ConfigError::ValidationFailed {
                field: field.to_string(),
                message: format!("must be strictly between 0 and 1, got {v}"),
            }),
            _ => Ok(()),
        };
        open_unit("bandit.epsilon", config.bandit.epsilon)?;
        open_unit("bandit.delta", config.bandit.delta)?;

        if let Some(beta) = config.bandit.beta {
            if !(beta > 0.0 && beta <= 1.0) {
                return Err(ConfigError::ValidationFailed {
                    field: "bandit.beta".to_string(),
                    message: format!("must be in (0, 1], got {beta}"),
                });
            }
        }

        for (field, value) in [
            ("oracle.connect_timeout_ms", config.oracle.connect_timeout_ms),
            ("oracle.request_timeout_ms", config.oracle.request_timeout_ms),
            ("oracle.poll_interval_ms", config.oracle.poll_interval_ms),
        ] {
            if value == Some(0) {
                return Err(ConfigError::ValidationFailed {
                    field: field.to_string(),
                    message: "must be greater than 0".to_string(),
                });
            }
        }

        if config.search.max_attempts_per_arm == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "search.max_attempts_per_arm".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if config.sweep.grid.iter().any(|g| g.x == 0 || g.y == 0) {
            return Err(ConfigError::ValidationFailed {
                field: "sweep.grid".to_string(),
                message: "segment counts must be greater than 0".to_string(),
            });
        }
        Ok(())
    }

    /// Returns the user config path: `~/.armada/config.toml`.
    fn user_config_path() -> Option<PathBuf> {
        home_dir().map(|h| h.join(".armada").join("config.toml"))
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored (forward-compatible).
    fn merge_toml_file(config: &mut ArmadaConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: ArmadaConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`; `other` wins wherever it has a value.
    fn merge(base: &mut ArmadaConfig, other: &ArmadaConfig) {
        // Oracle
        if other.oracle.address.is_some() {
            base.oracle.address = other.oracle.address.clone();
        }
        if other.oracle.connect_timeout_ms.is_some() {
            base.oracle.connect_timeout_ms = other.oracle.connect_timeout_ms;
        }
        if other.oracle.request_timeout_ms.is_some() {
            base.oracle.request_timeout_ms = other.oracle.request_timeout_ms;
        }
        if other.oracle.poll_interval_ms.is_some() {
            base.oracle.poll_interval_ms = other.oracle.poll_interval_ms;
        }

        // Bandit
        if other.bandit.epsilon.is_some() {
            base.bandit.epsilon = other.bandit.epsilon;
        }
        if other.bandit.delta.is_some() {
            base.bandit.delta = other.bandit.delta;
        }
        if other.bandit.beta.is_some() {
            base.bandit.beta = other.bandit.beta;
        }
        if other.bandit.reuse_samples.is_some() {
            base.bandit.reuse_samples = other.bandit.reuse_samples;
        }
        if other.bandit.parallel_arms.is_some() {
            base.bandit.parallel_arms = other.bandit.parallel_arms;
        }
        if other.bandit.seed.is_some() {
            base.bandit.seed = other.bandit.seed;
        }
        if other.bandit.object_z.is_some() {
            base.bandit.object_z = other.bandit.object_z;
        }

        // Search
        if other.search.successes_per_arm.is_some() {
            base.search.successes_per_arm = other.search.successes_per_arm;
        }
        if other.search.max_attempts_per_arm.is_some() {
            base.search.max_attempts_per_arm = other.search.max_attempts_per_arm;
        }

        // Sweep
        if other.sweep.runs_per_k.is_some() {
            base.sweep.runs_per_k = other.sweep.runs_per_k;
        }
        if other.sweep.log_file.is_some() {
            base.sweep.log_file = other.sweep.log_file.clone();
        }
        if !other.sweep.grid.is_empty() {
            base.sweep.grid = other.sweep.grid.clone();
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `ARMADA_ORACLE_ADDRESS`, `ARMADA_EPSILON`, etc.
    fn apply_env_overrides(config: &mut ArmadaConfig) {
        if let Ok(val) = std::env::var("ARMADA_ORACLE_ADDRESS") {
            config.oracle.address = Some(val);
        }
        if let Ok(val) = std::env::var("ARMADA_REQUEST_TIMEOUT_MS") {
            if let Ok(v) = val.parse::<u64>() {
                config.oracle.request_timeout_ms = Some(v);
            }
        }
        if let Ok(val) = std::env::var("ARMADA_EPSILON") {
            if let Ok(v) = val.parse::<f64>() {
                config.bandit.epsilon = Some(v);
            }
        }
        if let Ok(val) = std::env::var("ARMADA_DELTA") {
            if let Ok(v) = val.parse::<f64>() {
                config.bandit.delta = Some(v);
            }
        }
        if let Ok(val) = std::env::var("ARMADA_BETA") {
            if let Ok(v) = val.parse::<f64>() {
                config.bandit.beta = Some(v);
            }
        }
        if let Ok(val) = std::env::var("ARMADA_SEED") {
            if let Ok(v) = val.parse::<u64>() {
                config.bandit.seed = Some(v);
            }
        }
        if let Ok(val) = std::env::var("ARMADA_REUSE_SAMPLES") {
            if let Ok(v) = val.parse::<bool>() {
                config.bandit.reuse_samples = Some(v);
            }
        }
        if let Ok(val) = std::env::var("ARMADA_PARALLEL_ARMS") {
            if let Ok(v) = val.parse::<bool>() {
                config.bandit.parallel_arms = Some(v);
            }
        }
    }

    /// Apply CLI overrides (highest priority).
    fn apply_cli_overrides(config: &mut ArmadaConfig, cli: &CliOverrides) {
        if let Some(ref v) = cli.oracle_address {
            config.oracle.address = Some(v.clone());
        }
        if let Some(v) = cli.epsilon {
            config.bandit.epsilon = Some(v);
        }
        if let Some(v) = cli.delta {
            config.bandit.delta = Some(v);
        }
        if let Some(v) = cli.beta {
            config.bandit.beta = Some(v);
        }
        if let Some(v) = cli.seed {
            config.bandit.seed = Some(v);
        }
        if let Some(v) = cli.reuse_samples {
            config.bandit.reuse_samples = Some(v);
        }
        if let Some(v) = cli.parallel_arms {
            config.bandit.parallel_arms = Some(v);
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
