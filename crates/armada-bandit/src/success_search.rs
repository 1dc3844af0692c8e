//! Bounded search for task instances the oracle can solve.

use std::collections::BTreeMap;

use armada_core::errors::BanditError;
use armada_core::models::{Arm, ArmId, Demonstration, TaskInstance};
use armada_core::traits::{Cancellable, PlanRequest, PlanningOracle};
use rand::Rng;
use tracing::{debug, info, info_span};

use crate::sampling::sample_task_instances;
use crate::settings::{SearchSettings, TaskContext};

/// A solved task instance and the plan that solved it.
#[derive(Debug, Clone, PartialEq)]
pub struct SuccessfulPlan {
    pub arm_id: ArmId,
    pub task_instance: TaskInstance,
    /// Trajectory file of the demonstration the plan was adapted from.
    pub demonstration: String,
    pub plan: Vec<Vec<f64>>,
}

/// Find `successes_per_arm` solvable task instances in every arm.
///
/// Instances are drawn one at a time; each is offered to the demonstrations
/// one by one, in the given order, until one yields a plan. An arm that
/// needs more than `max_attempts_per_arm` draws fails the search with
/// `SamplingExhausted`. The token is checked before every draw.
pub fn collect_successful_plans<O, R, C>(
    oracle: &O,
    arms: &[Arm],
    demos: &[Demonstration],
    task: &TaskContext<'_>,
    settings: &SearchSettings,
    token: &C,
    rng: &mut R,
) -> Result<BTreeMap<ArmId, Vec<SuccessfulPlan>>, BanditError>
where
    O: PlanningOracle + ?Sized,
    R: Rng + ?Sized,
    C: Cancellable + ?Sized,
{
    if demos.is_empty() {
        return Err(BanditError::NoDemonstrations);
    }
    let wanted = settings.successes_per_arm;
    let mut found_by_arm = BTreeMap::new();

    for arm in arms {
        let _span = info_span!("armada.arm", arm_id = arm.id).entered();
        let mut found = Vec::with_capacity(wanted);
        let mut attempts = 0;

        while found.len() < wanted {
            if token.is_cancelled() {
                return Err(BanditError::Cancelled);
            }
            if attempts >= settings.max_attempts_per_arm {
                return Err(BanditError::SamplingExhausted {
                    arm_id: arm.id,
                    attempts,
                    found: found.len(),
                    wanted,
                });
            }
            attempts += 1;

            let Some(instance) = sample_task_instances(rng, arm, task.n_objects, 1)?.pop() else {
                continue;
            };
            let transforms = vec![instance.to_se3(settings.object_z)];

            for demo in demos {
                let responses = oracle.request_plans(&PlanRequest {
                    demonstrations: &[demo],
                    initial_joint_config: task.initial_joint_config,
                    task_instances: &transforms,
                })?;
                let solved = responses
                    .into_iter()
                    .next()
                    .and_then(|tries| tries.into_iter().last())
                    .filter(|attempt| attempt.is_successful);
                if let Some(attempt) = solved {
                    debug!(attempts, file = %demo.trajectory_file, "solvable instance found");
                    found.push(SuccessfulPlan {
                        arm_id: arm.id,
                        task_instance: instance,
                        demonstration: demo.trajectory_file.clone(),
                        plan: attempt.plan,
                    });
                    break;
                }
            }
        }

        info!(arm_id = arm.id, attempts, found = found.len(), "arm covered");
        found_by_arm.insert(arm.id, found);
    }
    Ok(found_by_arm)
}
