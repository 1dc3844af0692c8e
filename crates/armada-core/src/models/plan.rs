use serde::{Deserialize, Serialize};

/// Where a failed plan stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanFailure {
    /// Screw segment at which planning failed (1-based, as reported).
    pub screw_segment: i32,
    /// Joint whose limit was violated, or -1 for other failures.
    pub joint_angle: i32,
}

/// Outcome of planning one demonstration against one task instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanResult {
    pub is_successful: bool,
    pub n_screw_segments: i32,
    /// Joint-angle vectors, possibly partial on failure.
    pub plan: Vec<Vec<f64>>,
    pub failure: Option<PlanFailure>,
}

impl PlanResult {
    pub fn success(n_screw_segments: i32, plan: Vec<Vec<f64>>) -> Self {
        Self {
            is_successful: true,
            n_screw_segments,
            plan,
            failure: None,
        }
    }

    pub fn failed(n_screw_segments: i32, plan: Vec<Vec<f64>>, failure: PlanFailure) -> Self {
        Self {
            is_successful: false,
            n_screw_segments,
            plan,
            failure: Some(failure),
        }
    }

    /// Fraction of the trajectory planned before failing,
    /// `failed_screw_segment / n_screw_segments`.
    ///
    /// `None` for successful plans. A plan with zero screw segments made no
    /// progress and reports `0.0`.
    pub fn failure_progress(&self) -> Option<f64> {
        let failure = self.failure.as_ref()?;
        if self.n_screw_segments <= 0 {
            return Some(0.0);
        }
        Some(f64::from(failure.screw_segment) / f64::from(self.n_screw_segments))
    }
}
