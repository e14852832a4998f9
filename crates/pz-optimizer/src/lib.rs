//! # pz-optimizer
//!
//! Multi-resolution penalty grid search for PenZoom.
//!
//! Repeats a build-evaluate-select cycle over a (penalty, outlier penalty)
//! grid, recentring a shrinking window on each cycle's winner, and assembles
//! the final pair, the caller's log record, and the per-cycle score history
//! into one report.

mod axis;
mod config;
mod matrix;
mod refine;
mod report;
mod select;

pub use axis::PenaltyAxis;
pub use config::{
    AxisSpec, TunerConfig, DEFAULT_OUTLIER_AXIS, DEFAULT_PENALTY_AXIS, DEFAULT_SAMPLE_SIZE_MAX,
    DEFAULT_SAMPLE_SIZE_MIN,
};
pub use matrix::ScoreMatrix;
pub use refine::{narrowed_window, PenaltyTuner, FEASIBILITY_RATIO};
pub use report::{CycleRecord, TuneReport};
pub use select::{
    select_best, BestPick, Selection, SelectionOutcome, QUALIFYING_WRONG_FACTOR,
};
