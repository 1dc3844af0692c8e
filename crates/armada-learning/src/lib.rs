//! # armada-learning
//!
//! Drives the bandit round after round: take the demonstration nearest to
//! where the task space is weakest, re-run the PAC round, and stop once the
//! worst arm's failure rate is low enough.

pub mod active_loop;
pub mod observer;
pub mod sweep;

pub use active_loop::{run_active_learning, LearningSettings, LoopOutcome};
pub use observer::{NoopObserver, RoundObserver, RoundState};
pub use sweep::{run_sweep, KSummary, SweepLog, SweepSettings};
