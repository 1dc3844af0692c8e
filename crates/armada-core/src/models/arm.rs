use serde::{Deserialize, Serialize};

use super::{ArmSampleMetadata, Demonstration, Interval, Point2};

/// Arms are numbered from 1 in partition order.
pub type ArmId = u32;

/// One hyper-rectangular cell of the partitioned task space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Arm {
    pub id: ArmId,
    /// Per-dimension bounds, repeated once per object.
    pub segment: Vec<Interval>,
    /// Demonstrations recorded inside this cell and not yet consumed.
    pub demos: Vec<Demonstration>,
    /// Stored outcome from earlier rounds, used when samples are reused.
    #[serde(default)]
    pub samples: Option<ArmSampleMetadata>,
}

impl Arm {
    pub fn new(id: ArmId, segment: Vec<Interval>) -> Self {
        Self {
            id,
            segment,
            demos: Vec::new(),
            samples: None,
        }
    }

    /// x/y bounds of the first object, if the segment has them.
    pub fn xy_bounds(&self) -> Option<(Interval, Interval)> {
        match self.segment.as_slice() {
            [x, y, ..] => Some((*x, *y)),
            _ => None,
        }
    }

    /// Geometric center of the first object's x/y bounds.
    pub fn center(&self) -> Point2 {
        self.xy_bounds()
            .map(|(x, y)| Point2::new(x.center(), y.center()))
            .unwrap_or_default()
    }

    pub fn contains_xy(&self, point: Point2) -> bool {
        self.xy_bounds()
            .map(|(x, y)| x.contains(point.x) && y.contains(point.y))
            .unwrap_or(false)
    }

    pub fn has_demos(&self) -> bool {
        !self.demos.is_empty()
    }

    /// Index and distance of the demonstration nearest to `target`.
    /// Ties keep the earliest demonstration.
    pub fn nearest_demo(&self, target: Point2) -> Option<(usize, f64)> {
        self.demos
            .iter()
            .enumerate()
            .map(|(i, d)| (i, d.distance_to(target)))
            .fold(None, |best, (i, dist)| match best {
                Some((_, best_dist)) if best_dist <= dist => best,
                _ => Some((i, dist)),
            })
    }

    /// Remove and return a demonstration from this arm's pool.
    pub fn take_demo(&mut self, index: usize) -> Option<Demonstration> {
        if index < self.demos.len() {
            Some(self.demos.remove(index))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn demo_at(x: f64, y: f64) -> Demonstration {
        Demonstration {
            trajectory_file: format!("{x}_{y}/joint_angles.csv"),
            object_poses_file: format!("{x}_{y}/object_poses.csv"),
            score: 0.1,
            region_of_interest: 1.5,
            object_position: Point2::new(x, y),
        }
    }

    fn unit_arm() -> Arm {
        Arm::new(
            1,
            vec![
                Interval::new(0.0, 1.0),
                Interval::new(0.0, 2.0),
                Interval::new(0.0, 6.28),
            ],
        )
    }

    #[test]
    fn center_uses_first_two_bounds() {
        assert_eq!(unit_arm().center(), Point2::new(0.5, 1.0));
    }

    #[test]
    fn nearest_demo_prefers_earliest_on_ties() {
        let mut arm = unit_arm();
        arm.demos = vec![demo_at(0.9, 0.9), demo_at(0.1, 0.1), demo_at(0.1, 0.1)];
        let (index, dist) = arm.nearest_demo(Point2::new(0.0, 0.0)).unwrap();
        assert_eq!(index, 1);
        assert!((dist - 0.02f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn take_demo_shrinks_the_pool() {
        let mut arm = unit_arm();
        arm.demos = vec![demo_at(0.2, 0.2)];
        assert!(arm.take_demo(3).is_none());
        assert!(arm.take_demo(0).is_some());
        assert!(!arm.has_demos());
    }
}
