//! Arm evaluation and PAC controller errors.

use super::error_code::{self, ArmadaErrorCode};
use super::PlannerError;
use crate::models::ArmId;

/// Errors that can occur while evaluating arms or selecting the worst arm.
#[derive(Debug, thiserror::Error)]
pub enum BanditError {
    #[error("planner error: {0}")]
    Planner(#[from] PlannerError),

    /// An arm ended a round with zero evaluated samples, so its failure
    /// rate is undefined.
    #[error("arm #{arm_id} has no evaluated samples")]
    DegenerateArm { arm_id: ArmId },

    #[error("no arms to evaluate")]
    NoArms,

    #[error("no demonstrations to plan with")]
    NoDemonstrations,

    #[error("unknown arm #{arm_id}")]
    UnknownArm { arm_id: ArmId },

    #[error("expected {expected} pose dimensions per object, found {found}")]
    UnsupportedDimensions { expected: usize, found: usize },

    #[error("arm #{arm_id} segment has {found} bounds, expected {expected}")]
    SegmentMismatch {
        arm_id: ArmId,
        expected: usize,
        found: usize,
    },

    #[error("oracle answered {found} task instances, {expected} were sent")]
    ResponseMismatch { expected: usize, found: usize },

    #[error("arm #{arm_id}: found {found}/{wanted} successful task instances after {attempts} attempts")]
    SamplingExhausted {
        arm_id: ArmId,
        attempts: usize,
        found: usize,
        wanted: usize,
    },

    #[error("success search cancelled")]
    Cancelled,
}

impl ArmadaErrorCode for BanditError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Planner(e) => e.error_code(),
            Self::DegenerateArm { .. } => error_code::DEGENERATE_ARM,
            Self::SamplingExhausted { .. } => error_code::SAMPLING_EXHAUSTED,
            Self::Cancelled => error_code::CANCELLED,
            _ => error_code::BANDIT_ERROR,
        }
    }
}
