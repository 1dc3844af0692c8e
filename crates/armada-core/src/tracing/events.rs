//! Structured log events for the active-learning pipeline.
//!
//! Each function emits a `tracing` event with structured fields.

use crate::models::{ArmId, Point2};

pub fn run_seeded(seed: u64) {
    ::tracing::info!(event = "run_seeded", seed = seed, "random source seeded");
}

pub fn arm_evaluated(arm_id: ArmId, failed: usize, total: usize) {
    ::tracing::info!(
        event = "arm_evaluated",
        arm_id = arm_id,
        failed = failed,
        total = total,
        "failed samples: {failed}/{total}"
    );
}

pub fn worst_arm_selected(arm_id: ArmId, failure_rate: f64, tied: usize) {
    ::tracing::info!(
        event = "worst_arm_selected",
        arm_id = arm_id,
        failure_rate = failure_rate,
        tied = tied,
        "worst arm selected"
    );
}

pub fn demonstration_acquired(round: usize, arm_id: ArmId, file: &str, distance: f64) {
    ::tracing::info!(
        event = "demonstration_acquired",
        round = round,
        arm_id = arm_id,
        file = %file,
        distance = distance,
        "demonstration acquired"
    );
}

pub fn arm_retargeted(from: ArmId, to: ArmId, target: Point2) {
    ::tracing::info!(
        event = "arm_retargeted",
        from = from,
        to = to,
        x = target.x,
        y = target.y,
        "no demonstration in target arm, using nearest arm"
    );
}

pub fn learning_finished(outcome: &str, rounds: usize, demonstrations: usize) {
    ::tracing::info!(
        event = "learning_finished",
        outcome = %outcome,
        rounds = rounds,
        demonstrations = demonstrations,
        "active learning finished"
    );
}
