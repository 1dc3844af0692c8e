//! Joint limits and the trajectory score derived from them.

use serde::{Deserialize, Serialize};

/// Lower/upper bounds per joint, in radians.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JointLimits(Vec<[f64; 2]>);

impl JointLimits {
    pub fn new(limits: Vec<[f64; 2]>) -> Self {
        Self(limits)
    }

    /// Baxter left arm: s0, s1, e0, e1, w0, w1, w2.
    pub fn baxter_left() -> Self {
        Self(vec![
            [-1.70167993878, 1.70167993878],
            [-2.147, 1.047],
            [-3.05417993878, 3.05417993878],
            [-0.05, 2.618],
            [-3.059, 3.059],
            [-1.57079632679, 2.094],
            [-3.059, 3.059],
        ])
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[[f64; 2]] {
        &self.0
    }

    /// Smallest clearance to any limit over every row and joint.
    ///
    /// Higher is better; a negative score means some joint left its range.
    /// `None` for a trajectory without rows.
    pub fn score<'a, I>(&self, rows: I) -> Option<f64>
    where
        I: IntoIterator<Item = &'a [f64]>,
    {
        rows.into_iter()
            .flat_map(|row| {
                row.iter()
                    .zip(&self.0)
                    .map(|(q, [lower, upper])| (q - lower).min(upper - q))
            })
            .reduce(f64::min)
    }
}

impl Default for JointLimits {
    fn default() -> Self {
        Self::baxter_left()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_is_the_tightest_clearance() {
        let limits = JointLimits::new(vec![[-1.0, 1.0], [0.0, 2.0]]);
        let rows: [&[f64]; 2] = [&[0.0, 1.0], &[0.9, 0.5]];
        let score = limits.score(rows).unwrap();
        assert!((score - 0.1).abs() < 1e-12);
    }

    #[test]
    fn out_of_range_is_negative() {
        let limits = JointLimits::new(vec![[-1.0, 1.0]]);
        let rows: [&[f64]; 1] = [&[1.5]];
        assert!((limits.score(rows).unwrap() + 0.5).abs() < 1e-12);
    }

    #[test]
    fn empty_trajectory_has_no_score() {
        let rows: [&[f64]; 0] = [];
        assert_eq!(JointLimits::baxter_left().score(rows), None);
    }

    #[test]
    fn baxter_has_seven_joints() {
        assert_eq!(JointLimits::default().len(), 7);
    }
}
