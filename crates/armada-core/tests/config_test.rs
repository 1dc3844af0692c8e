//! Tests for the armada configuration system.

use std::sync::Mutex;

use armada_core::config::{ArmadaConfig, CliOverrides};
use armada_core::errors::ConfigError;

/// Serializes tests that modify environment variables.
static ENV_MUTEX: Mutex<()> = Mutex::new(());

fn tempdir() -> tempfile::TempDir {
    tempfile::TempDir::new().unwrap()
}

/// Clear ARMADA_ env vars and point HOME at an empty directory so the user
/// layer never leaks in from the machine running the tests.
fn isolate_env(home: &std::path::Path) {
    for key in [
        "ARMADA_ORACLE_ADDRESS",
        "ARMADA_REQUEST_TIMEOUT_MS",
        "ARMADA_EPSILON",
        "ARMADA_DELTA",
        "ARMADA_BETA",
        "ARMADA_SEED",
        "ARMADA_REUSE_SAMPLES",
        "ARMADA_PARALLEL_ARMS",
    ] {
        std::env::remove_var(key);
    }
    std::env::set_var("HOME", home);
    std::env::remove_var("USERPROFILE");
}

#[test]
fn layered_resolution_cli_beats_env_beats_project() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let home = tempdir();
    isolate_env(home.path());

    let dir = tempdir();
    std::fs::write(
        dir.path().join("armada.toml"),
        r#"
[oracle]
address = "127.0.0.1:9000"

[bandit]
epsilon = 0.3
delta = 0.2
"#,
    )
    .unwrap();

    std::env::set_var("ARMADA_EPSILON", "0.1");

    let cli = CliOverrides {
        delta: Some(0.05),
        ..Default::default()
    };
    let config = ArmadaConfig::load(dir.path(), Some(&cli)).unwrap();

    assert_eq!(config.bandit.effective_delta(), 0.05);
    assert_eq!(config.bandit.effective_epsilon(), 0.1);
    assert_eq!(config.oracle.effective_address(), "127.0.0.1:9000");

    isolate_env(home.path());
}

#[test]
fn user_layer_is_below_project_layer() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let home = tempdir();
    isolate_env(home.path());

    std::fs::create_dir_all(home.path().join(".armada")).unwrap();
    std::fs::write(
        home.path().join(".armada/config.toml"),
        "[bandit]\nbeta = 0.8\nseed = 7\n",
    )
    .unwrap();

    let dir = tempdir();
    std::fs::write(dir.path().join("armada.toml"), "[bandit]\nbeta = 0.95\n").unwrap();

    let config = ArmadaConfig::load(dir.path(), None).unwrap();
    assert_eq!(config.bandit.effective_beta(), 0.95);
    assert_eq!(config.bandit.seed, Some(7));
}

#[test]
fn missing_files_fall_back_to_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let home = tempdir();
    isolate_env(home.path());

    let dir = tempdir();
    let config = ArmadaConfig::load(dir.path(), None).unwrap();

    assert_eq!(config.bandit.effective_epsilon(), 0.25);
    assert_eq!(config.bandit.effective_delta(), 0.1);
    assert_eq!(config.bandit.effective_beta(), 0.9);
    assert!(!config.bandit.effective_reuse_samples());
    assert_eq!(config.search.effective_max_attempts_per_arm(), 10_000);
    assert_eq!(config.sweep.effective_grid().len(), 8);
    assert_eq!(config.oracle.effective_address(), "./socket_file");
}

#[test]
fn explicit_file_must_exist() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let home = tempdir();
    isolate_env(home.path());

    let dir = tempdir();
    let err = ArmadaConfig::load_file(&dir.path().join("nope.toml"), None).unwrap_err();
    assert!(matches!(err, ConfigError::FileNotFound { .. }));
}

#[test]
fn epsilon_outside_unit_interval_is_rejected() {
    let config = ArmadaConfig::from_toml("[bandit]\nepsilon = 1.5\n").unwrap();
    let err = ArmadaConfig::validate(&config).unwrap_err();
    match err {
        ConfigError::ValidationFailed { field, .. } => assert_eq!(field, "bandit.epsilon"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn zero_timeout_is_rejected() {
    let config = ArmadaConfig::from_toml("[oracle]\nrequest_timeout_ms = 0\n").unwrap();
    assert!(ArmadaConfig::validate(&config).is_err());
}

#[test]
fn invalid_toml_is_a_parse_error() {
    let err = ArmadaConfig::from_toml("[bandit\nepsilon = ").unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }));
}

#[test]
fn toml_round_trip_keeps_grid() {
    let config = ArmadaConfig::from_toml(
        r#"
[sweep]
runs_per_k = 10

[[sweep.grid]]
x = 2
y = 3
"#,
    )
    .unwrap();
    let text = config.to_toml().unwrap();
    let back = ArmadaConfig::from_toml(&text).unwrap();
    assert_eq!(back.sweep.effective_runs_per_k(), 10);
    assert_eq!(back.sweep.effective_grid()[0].arm_count(), 6);
}
