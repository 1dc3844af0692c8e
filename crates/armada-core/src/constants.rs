/// armada version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Pose dimensions per object: x, y, heading.
pub const POSE_DIMENSIONS: usize = 3;

/// Number of doubles in a flattened 4x4 transform.
pub const TRANSFORM_LEN: usize = 16;

/// Height of the table surface in the robot base frame. Objects rest on it.
pub const DEFAULT_OBJECT_Z: f64 = -0.06447185171756116;

/// Region of interest used when a demonstration does not record one
/// (1.5 times the minimum object-to-guiding-pose distance).
pub const DEFAULT_REGION_OF_INTEREST: f64 = 1.5;

/// Score assigned to a demonstration without a recorded trajectory.
pub const UNTRACEABLE_SCORE: f64 = -1.0;

/// Largest count or length accepted from the wire before allocating.
pub const MAX_WIRE_COUNT: i32 = 1 << 24;
