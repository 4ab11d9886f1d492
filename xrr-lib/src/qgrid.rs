use crate::error::{Result, XrrError};

/// `points` evenly spaced values from `start` to `stop`, both inclusive.
///
/// A single point yields `[start]`. The last value is exactly `stop`.
pub fn linspace(start: f64, stop: f64, points: usize) -> Vec<f64> {
    match points {
        0 => Vec::new(),
        1 => vec![start],
        n => {
            let step = (stop - start) / (n - 1) as f64;
            let mut values: Vec<f64> = (0..n).map(|i| start + i as f64 * step).collect();
            values[n - 1] = stop;
            values
        }
    }
}

/// Momentum-transfer sampling of a simulated curve, in Å⁻¹.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QGrid {
    pub q_min: f64,
    pub q_max: f64,
    pub points: usize,
}

impl QGrid {
    pub fn new(q_min: f64, q_max: f64, points: usize) -> Result<Self> {
        if !q_min.is_finite() || !q_max.is_finite() {
            return Err(XrrError::InvalidQGrid(format!(
                "bounds must be finite, got [{q_min}, {q_max}]"
            )));
        }
        if q_min < 0.0 {
            return Err(XrrError::InvalidQGrid(format!(
                "Q is a magnitude, q_min must be non-negative, got {q_min}"
            )));
        }
        if q_min > q_max {
            return Err(XrrError::InvalidQGrid(format!(
                "q_min ({q_min}) exceeds q_max ({q_max})"
            )));
        }
        if points == 0 {
            return Err(XrrError::InvalidQGrid(
                "at least one point is required".to_string(),
            ));
        }
        Ok(QGrid {
            q_min,
            q_max,
            points,
        })
    }

    pub fn values(&self) -> Vec<f64> {
        linspace(self.q_min, self.q_max, self.points)
    }
}
