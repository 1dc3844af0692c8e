//! PlanningOracle trait: asks whether a demonstration can be adapted to a
//! task instance.

use std::sync::Arc;

use crate::errors::PlannerError;
use crate::geometry::Se3;
use crate::models::{Demonstration, PlanResult};

/// One planning request.
///
/// Demonstration order matters: for every task instance the oracle tries
/// demonstrations in the given order and stops at the first success.
#[derive(Debug, Clone, Copy)]
pub struct PlanRequest<'a> {
    pub demonstrations: &'a [&'a Demonstration],
    pub initial_joint_config: &'a [f64],
    /// One entry per task instance, one transform per object.
    pub task_instances: &'a [Vec<Se3>],
}

/// A motion-planning oracle.
///
/// The response has one entry per task instance, in request order. Each
/// entry lists the attempts made, in demonstration order, ending at the
/// first success or after the last demonstration.
pub trait PlanningOracle: Send + Sync {
    fn request_plans(&self, request: &PlanRequest<'_>) -> Result<Vec<Vec<PlanResult>>, PlannerError>;
}

impl<T: PlanningOracle + ?Sized> PlanningOracle for &T {
    fn request_plans(&self, request: &PlanRequest<'_>) -> Result<Vec<Vec<PlanResult>>, PlannerError> {
        (**self).request_plans(request)
    }
}

impl<T: PlanningOracle + ?Sized> PlanningOracle for Arc<T> {
    fn request_plans(&self, request: &PlanRequest<'_>) -> Result<Vec<Vec<PlanResult>>, PlannerError> {
        (**self).request_plans(request)
    }
}

impl<T: PlanningOracle + ?Sized> PlanningOracle for Box<T> {
    fn request_plans(&self, request: &PlanRequest<'_>) -> Result<Vec<Vec<PlanResult>>, PlannerError> {
        (**self).request_plans(request)
    }
}
