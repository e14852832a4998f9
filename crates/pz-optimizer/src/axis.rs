//! Construction of the uniform value axes the grid search scans.

use pz_types::ConfigError;

/// An ascending, uniformly spaced sequence of candidate penalty values.
///
/// One axis exists per tuned parameter per cycle. Narrowing keeps the
/// resolution fixed and shrinks the window, so later cycles produce axes
/// with smaller steps over a tighter range.
#[derive(Debug, Clone, PartialEq)]
pub struct PenaltyAxis {
    values: Vec<f64>,
    step: f64,
}

impl PenaltyAxis {
    /// Build an axis of exactly `resolution` values running from `start`
    /// to `end` with uniform step `(end - start) / (resolution - 1)`.
    ///
    /// A resolution below 2 leaves the step undefined and is rejected
    /// outright rather than dividing by zero.
    pub fn build(start: f64, end: f64, resolution: usize) -> Result<Self, ConfigError> {
        if resolution < 2 {
            return Err(ConfigError::ResolutionTooLow {
                parameter: "axis resolution".to_string(),
                got: resolution,
            });
        }
        if !start.is_finite() {
            return Err(ConfigError::NonFinite {
                parameter: "axis start".to_string(),
                value: start,
            });
        }
        if !end.is_finite() {
            return Err(ConfigError::NonFinite {
                parameter: "axis end".to_string(),
                value: end,
            });
        }
        if start >= end {
            return Err(ConfigError::EmptyAxisRange {
                parameter: "axis".to_string(),
                start,
                end,
            });
        }

        let step = (end - start) / (resolution - 1) as f64;
        let values = (0..resolution)
            .map(|i| {
                let t = i as f64 / (resolution - 1) as f64;
                start + t * (end - start)
            })
            .collect();

        Ok(Self { values, step })
    }

    /// The axis values, in ascending order
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Spacing between adjacent values
    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// First axis value
    pub fn start(&self) -> f64 {
        self.values[0]
    }

    /// Last axis value
    pub fn end(&self) -> f64 {
        self.values[self.values.len() - 1]
    }
}
