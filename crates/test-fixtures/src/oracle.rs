use std::sync::{Arc, Mutex};

use armada_core::errors::PlannerError;
use armada_core::geometry::Se3;
use armada_core::models::{PlanFailure, PlanResult};
use armada_core::traits::{PlanRequest, PlanningOracle};

/// One (task instance, demonstration) pair put to a scripted oracle.
#[derive(Debug, Clone, Copy)]
pub struct Probe<'a> {
    pub poses: &'a [Se3],
    /// Position of the demonstration in the request.
    pub demo_index: usize,
    pub trajectory_file: &'a str,
    pub score: f64,
}

/// Scripted planning outcome for a probe.
pub type Policy = Arc<dyn Fn(&Probe<'_>) -> PlanResult + Send + Sync>;

/// A policy that succeeds exactly where `solvable(x, y)` holds for the first
/// object. Failures report 4 screw segments with the failure at segment 1.
pub fn planar_policy<F>(solvable: F) -> Policy
where
    F: Fn(f64, f64) -> bool + Send + Sync + 'static,
{
    Arc::new(move |probe: &Probe<'_>| {
        let [x, y, _] = probe.poses.first().map(Se3::translation).unwrap_or_default();
        if solvable(x, y) {
            PlanResult::success(4, vec![vec![0.0; 7]; 4])
        } else {
            PlanResult::failed(
                4,
                vec![vec![0.0; 7]],
                PlanFailure {
                    screw_segment: 1,
                    joint_angle: -1,
                },
            )
        }
    })
}

/// Apply `policy` the way the oracle does: per instance, demonstrations in
/// order, stopping at the first success.
pub(crate) fn answer<'a>(
    policy: &Policy,
    instances: &[Vec<Se3>],
    demos: impl Iterator<Item = (&'a str, f64)> + Clone,
) -> Vec<Vec<PlanResult>> {
    instances
        .iter()
        .map(|poses| {
            let mut attempts = Vec::new();
            for (demo_index, (trajectory_file, score)) in demos.clone().enumerate() {
                let result = policy(&Probe {
                    poses,
                    demo_index,
                    trajectory_file,
                    score,
                });
                let solved = result.is_successful;
                attempts.push(result);
                if solved {
                    break;
                }
            }
            attempts
        })
        .collect()
}

/// What an [`FnOracle`] saw in one call.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub demonstrations: Vec<String>,
    pub task_instances: Vec<Vec<Se3>>,
}

/// In-memory oracle. Records every call.
#[derive(Clone)]
pub struct FnOracle {
    policy: Policy,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
    fail_with: Option<Arc<dyn Fn() -> PlannerError + Send + Sync>>,
}

impl FnOracle {
    pub fn new(policy: Policy) -> Self {
        Self {
            policy,
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: None,
        }
    }

    /// Oracle that solves every instance with the first demonstration.
    pub fn always_succeeds() -> Self {
        Self::new(planar_policy(|_, _| true))
    }

    /// Oracle that fails every instance with every demonstration.
    pub fn always_fails() -> Self {
        Self::new(planar_policy(|_, _| false))
    }

    /// Oracle whose every call returns the error built by `make`.
    pub fn failing<F>(make: F) -> Self
    where
        F: Fn() -> PlannerError + Send + Sync + 'static,
    {
        let mut oracle = Self::always_fails();
        oracle.fail_with = Some(Arc::new(make));
        oracle
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl PlanningOracle for FnOracle {
    fn request_plans(&self, request: &PlanRequest<'_>) -> Result<Vec<Vec<PlanResult>>, PlannerError> {
        self.calls.lock().unwrap().push(RecordedCall {
            demonstrations: request
                .demonstrations
                .iter()
                .map(|d| d.trajectory_file.clone())
                .collect(),
            task_instances: request.task_instances.to_vec(),
        });
        if let Some(make) = &self.fail_with {
            return Err(make());
        }
        let demos = request
            .demonstrations
            .iter()
            .map(|d| (d.trajectory_file.as_str(), d.score));
        Ok(answer(&self.policy, request.task_instances, demos))
    }
}
