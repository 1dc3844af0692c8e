//! Rigid-body transforms in SE(3), stored as homogeneous 4x4 matrices.
//!
//! A planar object pose `(x, y, θ)` lifts to
//!
//! ```text
//! | cos θ  -sin θ  0  x |
//! | sin θ   cos θ  0  y |
//! |   0       0    1  z |
//! |   0       0    0  1 |
//! ```
//!
//! which rotates the xy plane counter-clockwise by θ about +z.

use serde::{Deserialize, Serialize};

use crate::constants::TRANSFORM_LEN;

/// Homogeneous 4x4 transform, row-major.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Se3 {
    rows: [[f64; 4]; 4],
}

impl Se3 {
    pub fn identity() -> Self {
        let mut rows = [[0.0; 4]; 4];
        for (i, row) in rows.iter_mut().enumerate() {
            row[i] = 1.0;
        }
        Self { rows }
    }

    /// Lift a planar pose onto the plane at height `z`.
    pub fn from_planar(x: f64, y: f64, heading: f64, z: f64) -> Self {
        let (sin, cos) = heading.sin_cos();
        Self {
            rows: [
                [cos, -sin, 0.0, x],
                [sin, cos, 0.0, y],
                [0.0, 0.0, 1.0, z],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    /// Rebuild a transform from 16 row-major values.
    /// Returns `None` when `values` has the wrong length.
    pub fn from_row_major(values: &[f64]) -> Option<Self> {
        if values.len() != TRANSFORM_LEN {
            return None;
        }
        let mut rows = [[0.0; 4]; 4];
        for (i, v) in values.iter().enumerate() {
            rows[i / 4][i % 4] = *v;
        }
        Some(Self { rows })
    }

    /// Flatten in row-major order, the order the oracle expects.
    pub fn to_row_major(&self) -> [f64; TRANSFORM_LEN] {
        let mut out = [0.0; TRANSFORM_LEN];
        for (i, slot) in out.iter_mut().enumerate() {
            *slot = self.rows[i / 4][i % 4];
        }
        out
    }

    pub fn rows(&self) -> &[[f64; 4]; 4] {
        &self.rows
    }

    pub fn translation(&self) -> [f64; 3] {
        [self.rows[0][3], self.rows[1][3], self.rows[2][3]]
    }

    /// Upper-left 3x3 rotation block.
    pub fn rotation(&self) -> [[f64; 3]; 3] {
        let mut r = [[0.0; 3]; 3];
        for (i, row) in r.iter_mut().enumerate() {
            row.copy_from_slice(&self.rows[i][..3]);
        }
        r
    }

    /// Rotation about +z, recovered from the rotation block.
    pub fn heading(&self) -> f64 {
        self.rows[1][0].atan2(self.rows[0][0])
    }

    pub fn rotation_determinant(&self) -> f64 {
        let r = self.rotation();
        r[0][0] * (r[1][1] * r[2][2] - r[1][2] * r[2][1])
            - r[0][1] * (r[1][0] * r[2][2] - r[1][2] * r[2][0])
            + r[0][2] * (r[1][0] * r[2][1] - r[1][1] * r[2][0])
    }

    /// True when `RᵀR = I` within `tolerance` and `det R = 1`.
    pub fn is_rigid(&self, tolerance: f64) -> bool {
        let r = self.rotation();
        for i in 0..3 {
            for j in 0..3 {
                let dot: f64 = (0..3).map(|k| r[k][i] * r[k][j]).sum();
                let expected = if i == j { 1.0 } else { 0.0 };
                if (dot - expected).abs() > tolerance {
                    return false;
                }
            }
        }
        let bottom_ok = self.rows[3] == [0.0, 0.0, 0.0, 1.0];
        bottom_ok && (self.rotation_determinant() - 1.0).abs() <= tolerance
    }
}

impl Default for Se3 {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn quarter_turn_maps_x_to_y() {
        let t = Se3::from_planar(1.0, 2.0, FRAC_PI_2, 0.0);
        let r = t.rotation();
        assert!((r[0][0]).abs() < 1e-12);
        assert!((r[1][0] - 1.0).abs() < 1e-12);
        assert_eq!(t.translation(), [1.0, 2.0, 0.0]);
    }

    #[test]
    fn row_major_round_trip() {
        let t = Se3::from_planar(0.7, -0.1, 2.5, -0.06);
        let flat = t.to_row_major();
        assert_eq!(flat[3], 0.7);
        assert_eq!(flat[7], -0.1);
        assert_eq!(flat[15], 1.0);
        assert_eq!(Se3::from_row_major(&flat), Some(t));
        assert_eq!(Se3::from_row_major(&flat[..15]), None);
    }

    #[test]
    fn heading_is_recovered() {
        let t = Se3::from_planar(0.0, 0.0, -1.2, 0.0);
        assert!((t.heading() + 1.2).abs() < 1e-12);
    }

    #[test]
    fn identity_is_rigid() {
        assert!(Se3::identity().is_rigid(1e-12));
    }
}
