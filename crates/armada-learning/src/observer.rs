//! Hooks for watching the loop, e.g. to render per-round heatmaps.

use armada_bandit::PacReport;
use armada_core::models::{Arm, ArmId, Demonstration, Point2};

/// Snapshot handed to observers after each PAC round.
#[derive(Debug, Clone, Copy)]
pub struct RoundState<'a> {
    /// 1-based round number.
    pub round: usize,
    /// Arm the round aimed at.
    pub target_arm: ArmId,
    /// Position the demonstration was chosen for.
    pub target: Point2,
    /// Arm the demonstration was taken from; differs from `target_arm`
    /// when the target arm had none left.
    pub source_arm: ArmId,
    pub acquired: &'a Demonstration,
    /// Demonstrations accumulated so far, in acquisition order.
    pub demonstrations: &'a [Demonstration],
    /// Arms as evaluated this round.
    pub arms: &'a [Arm],
    pub report: &'a PacReport,
}

/// Receives every round. Observers only read.
pub trait RoundObserver {
    fn on_round(&mut self, state: &RoundState<'_>);
}

/// Observer that ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl RoundObserver for NoopObserver {
    fn on_round(&mut self, _state: &RoundState<'_>) {}
}

impl<F> RoundObserver for F
where
    F: FnMut(&RoundState<'_>),
{
    fn on_round(&mut self, state: &RoundState<'_>) {
        self(state)
    }
}
