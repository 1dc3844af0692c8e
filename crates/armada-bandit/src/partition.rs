//! Gridding the task space into arms.

use armada_core::models::{Arm, ArmId, Demonstration, Dimension, Interval};
use tracing::warn;

/// Split the task space into arms.
///
/// Each dimension contributes `n_segments` evenly spaced intervals. Arms
/// are the Cartesian product of those intervals over every dimension of
/// every object, numbered from 1 with the last axis varying fastest.
pub fn partition(dimensions: &[Dimension], n_objects: usize) -> Vec<Arm> {
    let axes: Vec<Vec<Interval>> = dimensions.iter().map(Dimension::intervals).collect();

    let mut segments: Vec<Vec<Interval>> = vec![Vec::new()];
    for _ in 0..n_objects {
        for axis in &axes {
            segments = segments
                .into_iter()
                .flat_map(|prefix| {
                    axis.iter().map(move |interval| {
                        let mut segment = prefix.clone();
                        segment.push(*interval);
                        segment
                    })
                })
                .collect();
        }
    }

    segments
        .into_iter()
        .enumerate()
        .map(|(i, segment)| Arm::new(i as ArmId + 1, segment))
        .collect()
}

/// Place each demonstration in the first arm whose x/y bounds contain the
/// recorded object position. Returns the demonstrations no arm contains.
pub fn assign_demonstrations(arms: &mut [Arm], demos: Vec<Demonstration>) -> Vec<Demonstration> {
    let mut unplaced = Vec::new();
    for demo in demos {
        match arms
            .iter_mut()
            .find(|arm| arm.contains_xy(demo.object_position))
        {
            Some(arm) => arm.demos.push(demo),
            None => {
                warn!(
                    file = %demo.trajectory_file,
                    x = demo.object_position.x,
                    y = demo.object_position.y,
                    "demonstration lies outside every arm"
                );
                unplaced.push(demo);
            }
        }
    }
    unplaced
}
