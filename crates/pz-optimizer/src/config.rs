//! Tuner configuration and boundary validation.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use pz_types::ConfigError;

/// Default search window for the primary penalty
pub const DEFAULT_PENALTY_AXIS: AxisSpec = AxisSpec {
    start: 1.0,
    end: 3.5,
    resolution: 9,
};

/// Default search window for the outlier penalty
pub const DEFAULT_OUTLIER_AXIS: AxisSpec = AxisSpec {
    start: 0.5,
    end: 4.5,
    resolution: 9,
};

/// Default sample-size bounds forwarded to the evaluator
pub const DEFAULT_SAMPLE_SIZE_MIN: usize = 10;
pub const DEFAULT_SAMPLE_SIZE_MAX: usize = 100;

/// Start, end, and point count for one search axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisSpec {
    pub start: f64,
    pub end: f64,
    pub resolution: usize,
}

impl AxisSpec {
    pub fn new(start: f64, end: f64, resolution: usize) -> Self {
        Self {
            start,
            end,
            resolution,
        }
    }

    /// Validate the bounds, prefixing errors with the axis name
    pub fn validate(&self, axis: &str) -> Result<(), ConfigError> {
        if !self.start.is_finite() {
            return Err(ConfigError::NonFinite {
                parameter: format!("{axis} axis start"),
                value: self.start,
            });
        }
        if !self.end.is_finite() {
            return Err(ConfigError::NonFinite {
                parameter: format!("{axis} axis end"),
                value: self.end,
            });
        }
        if self.resolution < 2 {
            return Err(ConfigError::ResolutionTooLow {
                parameter: format!("{axis} axis resolution"),
                got: self.resolution,
            });
        }
        if self.start >= self.end {
            return Err(ConfigError::EmptyAxisRange {
                parameter: format!("{axis} axis"),
                start: self.start,
                end: self.end,
            });
        }
        Ok(())
    }
}

/// Numeric configuration for a full tuning run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TunerConfig {
    /// Unique identifier for this run, used in log spans
    pub id: Uuid,
    /// Upper bound on evaluator calls in flight within one cycle
    pub concurrency: usize,
    /// Number of refinement cycles to run
    pub cycles: usize,
    /// Smallest per-segment sample size forwarded to the evaluator
    pub sample_size_min: usize,
    /// Largest per-segment sample size forwarded to the evaluator
    pub sample_size_max: usize,
    /// First-cycle window for the primary penalty
    pub penalty_axis: AxisSpec,
    /// First-cycle window for the outlier penalty
    pub outlier_axis: AxisSpec,
}

impl TunerConfig {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            concurrency: 4,
            cycles: 2,
            sample_size_min: DEFAULT_SAMPLE_SIZE_MIN,
            sample_size_max: DEFAULT_SAMPLE_SIZE_MAX,
            penalty_axis: DEFAULT_PENALTY_AXIS,
            outlier_axis: DEFAULT_OUTLIER_AXIS,
        }
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    pub fn with_cycles(mut self, cycles: usize) -> Self {
        self.cycles = cycles;
        self
    }

    pub fn with_sample_bounds(mut self, min: usize, max: usize) -> Self {
        self.sample_size_min = min;
        self.sample_size_max = max;
        self
    }

    pub fn with_penalty_axis(mut self, start: f64, end: f64, resolution: usize) -> Self {
        self.penalty_axis = AxisSpec::new(start, end, resolution);
        self
    }

    pub fn with_outlier_axis(mut self, start: f64, end: f64, resolution: usize) -> Self {
        self.outlier_axis = AxisSpec::new(start, end, resolution);
        self
    }

    /// Boundary validation, run before any evaluation starts.
    ///
    /// Every failure names the offending parameter so the caller can fix
    /// the configuration without digging through a partial run.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.concurrency == 0 {
            return Err(ConfigError::ZeroCount {
                parameter: "concurrency".to_string(),
            });
        }
        if self.cycles == 0 {
            return Err(ConfigError::ZeroCount {
                parameter: "cycles".to_string(),
            });
        }
        if self.sample_size_min == 0 {
            return Err(ConfigError::ZeroCount {
                parameter: "sample_size_min".to_string(),
            });
        }
        if self.sample_size_min > self.sample_size_max {
            return Err(ConfigError::InvertedSampleBounds {
                min: self.sample_size_min,
                max: self.sample_size_max,
            });
        }
        self.penalty_axis.validate("penalty")?;
        self.outlier_axis.validate("outlier_penalty")?;
        Ok(())
    }
}

impl Default for TunerConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = TunerConfig::new();
        assert!(config.validate().is_ok());
        assert_eq!(config.penalty_axis, DEFAULT_PENALTY_AXIS);
        assert_eq!(config.outlier_axis, DEFAULT_OUTLIER_AXIS);
        assert_eq!(config.sample_size_min, 10);
        assert_eq!(config.sample_size_max, 100);
    }

    #[test]
    fn test_builder_chain() {
        let config = TunerConfig::new()
            .with_concurrency(8)
            .with_cycles(3)
            .with_sample_bounds(5, 50)
            .with_penalty_axis(0.5, 2.0, 5)
            .with_outlier_axis(0.2, 1.0, 5);

        assert_eq!(config.concurrency, 8);
        assert_eq!(config.cycles, 3);
        assert_eq!(config.sample_size_min, 5);
        assert_eq!(config.sample_size_max, 50);
        assert_eq!(config.penalty_axis, AxisSpec::new(0.5, 2.0, 5));
        assert_eq!(config.outlier_axis, AxisSpec::new(0.2, 1.0, 5));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_concurrency_is_rejected() {
        let err = TunerConfig::new().with_concurrency(0).validate().unwrap_err();
        assert!(matches!(err, ConfigError::ZeroCount { ref parameter } if parameter == "concurrency"));
    }

    #[test]
    fn test_zero_cycles_is_rejected() {
        let err = TunerConfig::new().with_cycles(0).validate().unwrap_err();
        assert!(matches!(err, ConfigError::ZeroCount { ref parameter } if parameter == "cycles"));
    }

    #[test]
    fn test_sample_bounds_must_be_ordered() {
        let err = TunerConfig::new().with_sample_bounds(80, 20).validate().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvertedSampleBounds { min: 80, max: 20 }
        ));
        // equal bounds are a one-point range, fine
        assert!(TunerConfig::new().with_sample_bounds(30, 30).validate().is_ok());
    }

    #[test]
    fn test_zero_sample_size_min_is_rejected() {
        let err = TunerConfig::new().with_sample_bounds(0, 20).validate().unwrap_err();
        assert!(matches!(err, ConfigError::ZeroCount { ref parameter } if parameter == "sample_size_min"));
    }

    #[test]
    fn test_axis_errors_name_the_axis() {
        let err = TunerConfig::new()
            .with_outlier_axis(2.0, 1.0, 9)
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("outlier_penalty axis"));

        let err = TunerConfig::new()
            .with_penalty_axis(1.0, 3.5, 1)
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("penalty axis resolution"));
    }

    #[test]
    fn test_each_config_gets_its_own_id() {
        assert_ne!(TunerConfig::new().id, TunerConfig::new().id);
    }
}
