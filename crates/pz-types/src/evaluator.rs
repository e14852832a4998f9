use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::PzResult;
use crate::table::SampleTable;

/// The four evaluator families shipped with the wider pipeline.
///
/// The tuner never looks inside an evaluator; the family exists to
/// standardise the labels that address [`LogRecord`] slots.
///
/// [`LogRecord`]: crate::record::LogRecord
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FragmentFamily {
    /// Timing-delay fragments
    Delay,
    /// Decay / half-life fragments
    HalfLife,
    /// Intensity fragments
    Intensity,
    /// Termination-intensity fragments
    Termination,
}

impl FragmentFamily {
    pub const ALL: [FragmentFamily; 4] = [
        FragmentFamily::Delay,
        FragmentFamily::HalfLife,
        FragmentFamily::Intensity,
        FragmentFamily::Termination,
    ];

    /// Label used to name this family's log record slots
    pub fn label(&self) -> &'static str {
        match self {
            FragmentFamily::Delay => "delay",
            FragmentFamily::HalfLife => "half_life",
            FragmentFamily::Intensity => "intensity",
            FragmentFamily::Termination => "termination",
        }
    }
}

impl fmt::Display for FragmentFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Outcome of scoring one (penalty, outlier penalty) pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    /// Fragment-family label; names the slots the final pair is written to
    pub label: String,
    /// Number of statistically correct splits
    pub correct: u32,
    /// Number of statistically wrong splits
    pub wrong: u32,
}

/// Scoring capability the tuner drives.
///
/// An implementation runs the downstream segmentation with the supplied
/// pair and counts how many splits came out statistically correct versus
/// wrong. Implementations must be read-only with respect to the table and
/// deterministic for fixed inputs; the tuner calls them from multiple
/// threads within a cycle.
pub trait Evaluator: Send + Sync {
    /// Score one pair against the table.
    ///
    /// `concurrency_hint` mirrors the tuner's own concurrency setting and
    /// is advisory; implementations may ignore it. Errors are propagated
    /// to the tuner's caller unchanged.
    fn evaluate(
        &self,
        table: &SampleTable,
        penalty: f64,
        outlier_penalty: f64,
        sample_size_min: usize,
        sample_size_max: usize,
        concurrency_hint: usize,
    ) -> PzResult<Evaluation>;
}
