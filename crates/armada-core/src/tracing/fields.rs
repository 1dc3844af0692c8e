//! Structured field names shared by spans and events across the workspace.

/// Arm identifier.
pub const ARM_ID: &str = "arm_id";

/// Active-learning round number (1-based).
pub const ROUND: &str = "round";

/// Task instances sampled per arm in a PAC round.
pub const SAMPLES_PER_ARM: &str = "samples_per_arm";

/// Failure rate of an arm (0.0 - 1.0).
pub const FAILURE_RATE: &str = "failure_rate";

/// Demonstrations accumulated so far.
pub const DEMONSTRATIONS: &str = "demonstrations";

/// Oracle address.
pub const ORACLE: &str = "oracle";

/// Oracle round-trip time in milliseconds.
pub const ORACLE_ROUND_TRIP_MS: &str = "oracle_round_trip_ms";

/// RNG seed of a run.
pub const SEED: &str = "seed";
