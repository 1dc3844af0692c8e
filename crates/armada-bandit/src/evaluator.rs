//! Evaluating one arm against the oracle.
//!
//! Evaluation is split into three steps so a PAC round can draw every
//! arm's samples sequentially and still query the oracle in parallel:
//! [`prepare`] (all randomness), [`probe`] (the oracle call), and
//! [`commit`] (classification and sample storage).

use armada_core::constants::POSE_DIMENSIONS;
use armada_core::errors::{BanditError, PlannerError};
use armada_core::models::{by_descending_score, Arm, ArmId, ArmSampleMetadata, Demonstration, PlanResult, TaskInstance};
use armada_core::traits::{PlanRequest, PlanningOracle};
use rand::Rng;

use crate::sampling::sample_task_instances;
use crate::settings::TaskContext;

/// Task instances chosen for an arm, ready to send.
#[derive(Debug, Clone)]
pub(crate) enum Prepared {
    /// Fresh samples, or the stored failure pool when reusing.
    Probe {
        arm_id: ArmId,
        instances: Vec<TaskInstance>,
    },
    /// Reuse mode with nothing left to re-evaluate.
    Skip { arm_id: ArmId },
}

/// Oracle verdict per probed instance.
#[derive(Debug, Clone)]
pub(crate) struct Verdict {
    /// `None` on success, mean failure progress otherwise.
    pub outcomes: Vec<Option<f64>>,
}

/// Pick the task instances to evaluate for `arm`.
pub(crate) fn prepare<R: Rng + ?Sized>(
    arm: &Arm,
    task: &TaskContext<'_>,
    sample_count: usize,
    reuse: bool,
    rng: &mut R,
) -> Result<Prepared, BanditError> {
    if task.dimension_count != POSE_DIMENSIONS {
        return Err(BanditError::UnsupportedDimensions {
            expected: POSE_DIMENSIONS,
            found: task.dimension_count,
        });
    }
    if reuse {
        if let Some(stored) = &arm.samples {
            if stored.failure.is_empty() {
                return Ok(Prepared::Skip { arm_id: arm.id });
            }
            return Ok(Prepared::Probe {
                arm_id: arm.id,
                instances: stored.failure.clone(),
            });
        }
    }
    Ok(Prepared::Probe {
        arm_id: arm.id,
        instances: sample_task_instances(rng, arm, task.n_objects, sample_count)?,
    })
}

/// Demonstrations in the order the oracle should try them.
pub(crate) fn request_order(demos: &[Demonstration], reuse: bool) -> Result<Vec<&Demonstration>, BanditError> {
    if reuse {
        return demos
            .last()
            .map(|d| vec![d])
            .ok_or(BanditError::NoDemonstrations);
    }
    if demos.is_empty() {
        return Err(BanditError::NoDemonstrations);
    }
    Ok(by_descending_score(demos))
}

/// Send the prepared instances to the oracle and classify the answers.
pub(crate) fn probe<O: PlanningOracle + ?Sized>(
    oracle: &O,
    instances: &[TaskInstance],
    ordered_demos: &[&Demonstration],
    task: &TaskContext<'_>,
    object_z: f64,
) -> Result<Verdict, BanditError> {
    let transforms: Vec<_> = instances.iter().map(|t| t.to_se3(object_z)).collect();
    let responses = oracle.request_plans(&PlanRequest {
        demonstrations: ordered_demos,
        initial_joint_config: task.initial_joint_config,
        task_instances: &transforms,
    })?;
    if responses.len() != instances.len() {
        return Err(BanditError::ResponseMismatch {
            expected: instances.len(),
            found: responses.len(),
        });
    }

    let outcomes = responses
        .iter()
        .map(|attempts| classify(attempts))
        .collect::<Result<_, _>>()?;
    Ok(Verdict { outcomes })
}

/// Success is decided by the last attempt. A failure scores the mean
/// progress over every attempt made.
fn classify(attempts: &[PlanResult]) -> Result<Option<f64>, BanditError> {
    let last = attempts.last().ok_or_else(|| {
        BanditError::Planner(PlannerError::Protocol {
            message: "task instance answered with no plan attempts".to_string(),
        })
    })?;
    if last.is_successful {
        return Ok(None);
    }
    let total: f64 = attempts
        .iter()
        .map(|p| p.failure_progress().unwrap_or(0.0))
        .sum();
    Ok(Some(total / attempts.len() as f64))
}

/// Fold a verdict into sample metadata. In reuse mode successes accumulate
/// across rounds and the result is stored back on the arm.
pub(crate) fn commit(
    arm: &mut Arm,
    instances: Vec<TaskInstance>,
    verdict: Verdict,
    reuse: bool,
) -> ArmSampleMetadata {
    let mut metadata = ArmSampleMetadata::default();
    if reuse {
        if let Some(stored) = &arm.samples {
            metadata.success = stored.success.clone();
        }
    }
    for (instance, outcome) in instances.into_iter().zip(verdict.outcomes) {
        match outcome {
            None => metadata.success.push(instance),
            Some(score) => {
                metadata.failure.push(instance);
                metadata.failure_score.push(score);
            }
        }
    }
    if reuse {
        arm.samples = Some(metadata.clone());
    }
    metadata
}

/// Evaluate one arm end to end.
///
/// Returns `None` when reuse mode finds no stored failures to re-evaluate;
/// the arm's stored samples then stand for this round.
#[allow(clippy::too_many_arguments)]
pub fn evaluate_arm<O, R>(
    oracle: &O,
    arm: &mut Arm,
    demos: &[Demonstration],
    task: &TaskContext<'_>,
    sample_count: usize,
    reuse: bool,
    object_z: f64,
    rng: &mut R,
) -> Result<Option<ArmSampleMetadata>, BanditError>
where
    O: PlanningOracle + ?Sized,
    R: Rng + ?Sized,
{
    let ordered = request_order(demos, reuse)?;
    match prepare(arm, task, sample_count, reuse, rng)? {
        Prepared::Skip { .. } => Ok(None),
        Prepared::Probe { instances, .. } => {
            let verdict = probe(oracle, &instances, &ordered, task, object_z)?;
            Ok(Some(commit(arm, instances, verdict, reuse)))
        }
    }
}
