use serde::{Deserialize, Serialize};

/// A named scalar axis of the task-parameter space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dimension {
    pub name: String,
    pub min: f64,
    pub max: f64,
    pub n_segments: usize,
}

impl Dimension {
    pub fn new(name: impl Into<String>, min: f64, max: f64, n_segments: usize) -> Self {
        Self {
            name: name.into(),
            min,
            max,
            n_segments,
        }
    }

    /// Evenly spaced, contiguous intervals covering `[min, max]`.
    ///
    /// Interval `i` is `[min + i·w, min + (i+1)·w]`; the last upper bound is
    /// pinned to `max` so the cover is exact despite rounding.
    pub fn intervals(&self) -> Vec<Interval> {
        let n = self.n_segments.max(1);
        let width = (self.max - self.min) / n as f64;
        (0..n)
            .map(|i| {
                let low = self.min + width * i as f64;
                let high = if i + 1 == n {
                    self.max
                } else {
                    self.min + width * (i + 1) as f64
                };
                Interval::new(low, high)
            })
            .collect()
    }
}

/// Closed interval `[low, high]` on one dimension.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    pub low: f64,
    pub high: f64,
}

impl Interval {
    pub fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    pub fn contains(&self, value: f64) -> bool {
        self.low <= value && value <= self.high
    }

    pub fn center(&self) -> f64 {
        (self.low + self.high) / 2.0
    }

    pub fn width(&self) -> f64 {
        self.high - self.low
    }
}
