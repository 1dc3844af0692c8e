//! Uniform task-instance sampling inside an arm.

use armada_core::constants::POSE_DIMENSIONS;
use armada_core::errors::BanditError;
use armada_core::models::{Arm, ObjectPose, TaskInstance};
use rand::Rng;

/// Draw `count` task instances uniformly from `arm`.
///
/// Each coordinate is drawn independently within its bound, in instance,
/// object, dimension order. A degenerate bound (`low == high`) yields `low`.
pub fn sample_task_instances<R: Rng + ?Sized>(
    rng: &mut R,
    arm: &Arm,
    n_objects: usize,
    count: usize,
) -> Result<Vec<TaskInstance>, BanditError> {
    let expected = n_objects * POSE_DIMENSIONS;
    if arm.segment.len() != expected {
        return Err(BanditError::SegmentMismatch {
            arm_id: arm.id,
            expected,
            found: arm.segment.len(),
        });
    }

    let instances = (0..count)
        .map(|_| {
            let poses = arm
                .segment
                .chunks_exact(POSE_DIMENSIONS)
                .map(|bounds| {
                    let mut draw = |i: usize| {
                        let b = bounds[i];
                        if b.high > b.low {
                            rng.random_range(b.low..=b.high)
                        } else {
                            b.low
                        }
                    };
                    let x = draw(0);
                    let y = draw(1);
                    let heading = draw(2);
                    ObjectPose::new(x, y, heading)
                })
                .collect();
            TaskInstance::new(poses)
        })
        .collect();
    Ok(instances)
}
