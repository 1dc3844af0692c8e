use serde::{Deserialize, Serialize};

/// A point on the table plane.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: Point2) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// One recorded physical execution of the task.
///
/// File references are opaque to the client; the oracle opens them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Demonstration {
    /// Recorded joint-angle trajectory (CSV).
    pub trajectory_file: String,
    /// Recorded object poses (CSV of stacked 4x4 transforms).
    pub object_poses_file: String,
    /// Minimum distance to the joint limits over the whole trajectory.
    /// `-1` when the trajectory could not be traced.
    pub score: f64,
    pub region_of_interest: f64,
    /// Where the (first) object sat when the demonstration was recorded.
    pub object_position: Point2,
}

impl Demonstration {
    /// Euclidean x/y distance from the recorded object position to `target`.
    pub fn distance_to(&self, target: Point2) -> f64 {
        self.object_position.distance_to(target)
    }
}

/// Sort demonstrations by descending score, most joint-limit-safe first.
/// Stable, so equal scores keep acquisition order.
pub fn by_descending_score(demos: &[Demonstration]) -> Vec<&Demonstration> {
    let mut sorted: Vec<&Demonstration> = demos.iter().collect();
    sorted.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    sorted
}
