//! Everything a subcommand needs: resolved config, oracle, RNG and the
//! loaded demonstrations.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use armada_core::config::{ArmadaConfig, CliOverrides};
use armada_core::tracing::events;
use armada_loader::DemoSet;
use armada_planner::RemotePlanner;
use clap::Args;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

/// Flags accepted by every subcommand.
#[derive(Args, Debug, Default)]
pub struct GlobalArgs {
    /// Config file (default: ./armada.toml if present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// Oracle address: tcp://host:port, unix://path, host:port or a socket path
    #[arg(long, global = true)]
    pub oracle: Option<String>,
    /// RNG seed; drawn from OS entropy and logged when omitted
    #[arg(long, global = true)]
    pub seed: Option<u64>,
    /// PAC accuracy
    #[arg(long, global = true)]
    pub epsilon: Option<f64>,
    /// PAC failure probability
    #[arg(long, global = true)]
    pub delta: Option<f64>,
    /// Target confidence for the learning loop
    #[arg(long, global = true)]
    pub beta: Option<f64>,
    /// Re-evaluate stored failures instead of resampling each round
    #[arg(long, global = true)]
    pub reuse_samples: bool,
    /// Query the oracle for every arm concurrently
    #[arg(long, global = true)]
    pub parallel_arms: bool,
    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,
}

impl GlobalArgs {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            oracle_address: self.oracle.clone(),
            epsilon: self.epsilon,
            delta: self.delta,
            beta: self.beta,
            seed: self.seed,
            reuse_samples: self.reuse_samples.then_some(true),
            parallel_arms: self.parallel_arms.then_some(true),
        }
    }

    pub fn load_config(&self) -> Result<ArmadaConfig> {
        let overrides = self.overrides();
        let config = match &self.config {
            Some(path) => ArmadaConfig::load_file(path, Some(&overrides)),
            None => {
                let cwd = std::env::current_dir().context("reading the working directory")?;
                ArmadaConfig::load(&cwd, Some(&overrides))
            }
        };
        config.context("loading configuration")
    }
}

pub struct Session {
    pub config: ArmadaConfig,
    pub oracle: RemotePlanner,
    pub demos: DemoSet,
    pub rng: StdRng,
}

impl Session {
    pub fn open(global: &GlobalArgs, demo_dir: &Path) -> Result<Self> {
        let config = global.load_config()?;
        let oracle = RemotePlanner::from_config(&config.oracle).context("configuring the oracle")?;
        let demos = DemoSet::load(demo_dir)
            .with_context(|| format!("loading demonstrations from {}", demo_dir.display()))?;

        let seed = config.bandit.seed.unwrap_or_else(|| rand::rng().random());
        events::run_seeded(seed);
        info!(oracle = %oracle.address(), "session ready");

        Ok(Self {
            config,
            oracle,
            demos,
            rng: StdRng::seed_from_u64(seed),
        })
    }
}
