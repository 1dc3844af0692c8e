//! Configuration system for armada.
//! TOML-based, layered resolution: CLI > env > project > user > defaults.

pub mod armada_config;
pub mod bandit_config;
pub mod oracle_config;
pub mod search_config;
pub mod sweep_config;

pub use armada_config::{ArmadaConfig, CliOverrides};
pub use bandit_config::BanditConfig;
pub use oracle_config::OracleConfig;
pub use search_config::SearchConfig;
pub use sweep_config::{GridEntry, SweepConfig};
