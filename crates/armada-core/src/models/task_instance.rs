use serde::{Deserialize, Serialize};

use crate::constants::POSE_DIMENSIONS;
use crate::geometry::Se3;

/// Planar pose of one object.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObjectPose {
    pub x: f64,
    pub y: f64,
    pub heading: f64,
}

impl ObjectPose {
    pub fn new(x: f64, y: f64, heading: f64) -> Self {
        Self { x, y, heading }
    }

    pub fn to_se3(&self, z: f64) -> Se3 {
        Se3::from_planar(self.x, self.y, self.heading, z)
    }
}

/// One sampled object configuration: a pose per object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskInstance {
    pub poses: Vec<ObjectPose>,
}

impl TaskInstance {
    pub fn new(poses: Vec<ObjectPose>) -> Self {
        Self { poses }
    }

    /// Build from flat `[x, y, θ, x, y, θ, ...]` coordinates.
    /// Returns `None` unless the length is a multiple of three.
    pub fn from_coordinates(coordinates: &[f64]) -> Option<Self> {
        if coordinates.is_empty() || coordinates.len() % POSE_DIMENSIONS != 0 {
            return None;
        }
        let poses = coordinates
            .chunks_exact(POSE_DIMENSIONS)
            .map(|c| ObjectPose::new(c[0], c[1], c[2]))
            .collect();
        Some(Self { poses })
    }

    pub fn coordinates(&self) -> Vec<f64> {
        self.poses
            .iter()
            .flat_map(|p| [p.x, p.y, p.heading])
            .collect()
    }

    pub fn to_se3(&self, z: f64) -> Vec<Se3> {
        self.poses.iter().map(|p| p.to_se3(z)).collect()
    }

    pub fn first_pose(&self) -> Option<&ObjectPose> {
        self.poses.first()
    }
}
