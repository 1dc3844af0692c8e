//! Active demonstration acquisition.
//!
//! Each round takes the not-yet-used demonstration nearest to the current
//! target, adds it to the accumulated set and runs a PAC round. The worst
//! arm and its hardest failure become the next target.

use armada_bandit::{run_naive_pac, PacReport, PacSettings, TaskContext};
use armada_core::config::ArmadaConfig;
use armada_core::errors::{BanditError, LearningError};
use armada_core::models::{Arm, Demonstration, Point2, TaskInstance};
use armada_core::tracing::events;
use armada_core::traits::PlanningOracle;
use rand::Rng;
use tracing::{debug, info_span};

use crate::observer::{RoundObserver, RoundState};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LearningSettings {
    pub pac: PacSettings,
    /// Target confidence; the loop stops once the worst failure rate drops
    /// below `1 + epsilon - beta`.
    pub beta: f64,
}

impl LearningSettings {
    pub fn new(pac: PacSettings, beta: f64) -> Self {
        Self { pac, beta }
    }

    pub fn stop_threshold(&self) -> f64 {
        1.0 + self.pac.epsilon - self.beta
    }
}

impl From<&ArmadaConfig> for LearningSettings {
    fn from(config: &ArmadaConfig) -> Self {
        Self {
            pac: PacSettings::from(config),
            beta: config.bandit.effective_beta(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoopOutcome {
    /// Demonstrations in acquisition order.
    Success(Vec<Demonstration>),
    /// Every arm ran out of demonstrations before the stopping rule held.
    Exhausted,
}

impl LoopOutcome {
    pub fn demonstrations(&self) -> &[Demonstration] {
        match self {
            Self::Success(demos) => demos,
            Self::Exhausted => &[],
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

/// Where the next demonstration comes from.
struct Pick {
    arm_index: usize,
    demo_index: usize,
    distance: f64,
}

/// Run the loop until the stopping rule holds or demonstrations run out.
///
/// The loop owns `arms` and their demonstration pools. Without sample reuse
/// every PAC round works on a copy of the arms; with reuse the stored
/// sample pools carry over from round to round.
pub fn run_active_learning<O, R, B>(
    oracle: &O,
    mut arms: Vec<Arm>,
    task: &TaskContext<'_>,
    settings: &LearningSettings,
    observer: &mut B,
    rng: &mut R,
) -> Result<LoopOutcome, LearningError>
where
    O: PlanningOracle + ?Sized,
    R: Rng + ?Sized,
    B: RoundObserver + ?Sized,
{
    if arms.is_empty() {
        return Err(LearningError::NoArms);
    }
    let threshold = settings.stop_threshold();
    let mut target_index = rng.random_range(0..arms.len());
    let mut candidate: Option<TaskInstance> = None;
    let mut acquired: Vec<Demonstration> = Vec::new();

    loop {
        let round = acquired.len() + 1;
        let _round = info_span!("armada.round", round).entered();

        let target = candidate
            .as_ref()
            .and_then(TaskInstance::first_pose)
            .map(|pose| Point2::new(pose.x, pose.y))
            .unwrap_or_else(|| arms[target_index].center());

        let target_arm = arms[target_index].id;
        let Some(pick) = pick_demonstration(&arms, target_index, target) else {
            events::learning_finished("exhausted", round - 1, acquired.len());
            return Ok(LoopOutcome::Exhausted);
        };
        if pick.arm_index != target_index {
            events::arm_retargeted(target_arm, arms[pick.arm_index].id, target);
        }
        let arm_id = arms[pick.arm_index].id;
        let Some(demo) = arms[pick.arm_index].take_demo(pick.demo_index) else {
            events::learning_finished("exhausted", round - 1, acquired.len());
            return Ok(LoopOutcome::Exhausted);
        };
        events::demonstration_acquired(round, arm_id, &demo.trajectory_file, pick.distance);
        acquired.push(demo);

        let report = if settings.pac.reuse_samples {
            run_naive_pac(oracle, &mut arms, &acquired, task, &settings.pac, rng)
                .map_err(|source| LearningError::Round { round, source })?
        } else {
            let mut working = arms.clone();
            run_naive_pac(oracle, &mut working, &acquired, task, &settings.pac, rng)
                .map_err(|source| LearningError::Round { round, source })?
        };

        if let Some(demo) = acquired.last() {
            observer.on_round(&RoundState {
                round,
                target_arm,
                target,
                source_arm: arm_id,
                acquired: demo,
                demonstrations: &acquired,
                arms: &arms,
                report: &report,
            });
        }

        if report.worst_failure_rate < threshold {
            events::learning_finished("success", round, acquired.len());
            return Ok(LoopOutcome::Success(acquired));
        }
        debug!(
            worst_arm = report.worst_arm_id,
            failure_rate = report.worst_failure_rate,
            threshold,
            "stopping rule not met"
        );

        target_index = locate(&arms, &report).ok_or_else(|| LearningError::Round {
            round,
            source: BanditError::UnknownArm {
                arm_id: report.worst_arm_id,
            },
        })?;
        candidate = report.next_demonstration;
    }
}

/// Nearest demonstration in the target arm, else the nearest across all
/// arms. Ties keep the earlier arm and the earlier demonstration.
fn pick_demonstration(arms: &[Arm], target_index: usize, target: Point2) -> Option<Pick> {
    if let Some((demo_index, distance)) = arms[target_index].nearest_demo(target) {
        return Some(Pick {
            arm_index: target_index,
            demo_index,
            distance,
        });
    }
    arms.iter()
        .enumerate()
        .filter_map(|(arm_index, arm)| {
            arm.nearest_demo(target).map(|(demo_index, distance)| Pick {
                arm_index,
                demo_index,
                distance,
            })
        })
        .fold(None, |best: Option<Pick>, pick| match best {
            Some(b) if b.distance <= pick.distance => Some(b),
            _ => Some(pick),
        })
}

fn locate(arms: &[Arm], report: &PacReport) -> Option<usize> {
    arms.iter().position(|arm| arm.id == report.worst_arm_id)
}
