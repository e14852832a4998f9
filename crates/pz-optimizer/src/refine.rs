//! Cycle orchestration: grid evaluation, selection, and window narrowing.

use rayon::prelude::*;
use tracing::{debug, info, warn};

use pz_types::{Evaluation, Evaluator, LogRecord, PzError, PzResult, SampleTable};

use crate::axis::PenaltyAxis;
use crate::config::TunerConfig;
use crate::matrix::ScoreMatrix;
use crate::report::{CycleRecord, TuneReport};
use crate::select::{select_best, SelectionOutcome};

/// Minimum ratio of outlier penalty to penalty for a pair to be evaluated.
/// Pairs below this line stay unset in the score grids. Inherited from the
/// original tool; no stronger rationale is documented.
pub const FEASIBILITY_RATIO: f64 = 0.4;

/// Next cycle's window for one axis: recentred on the winner, one current
/// step to each side. The resolution stays fixed, so the step shrinks by a
/// factor of `2 / (resolution - 1)` per cycle. The window is not clamped;
/// a winner near zero can push it negative.
pub fn narrowed_window(winner: f64, step: f64) -> (f64, f64) {
    (winner - step, winner + step)
}

/// Multi-resolution grid-search tuner for a (penalty, outlier penalty) pair.
///
/// Each cycle builds one axis per parameter, scores every feasible cell of
/// their cross product through the supplied [`Evaluator`], selects a winning
/// cell, and recentres the next cycle's window on it. Cycles run strictly
/// in sequence; cells within a cycle are scored in parallel.
pub struct PenaltyTuner {
    config: TunerConfig,
}

/// Inputs shared by every cycle of one run
struct RunContext<'a> {
    table: &'a SampleTable,
    evaluator: &'a dyn Evaluator,
    pool: &'a rayon::ThreadPool,
}

impl PenaltyTuner {
    pub fn new(config: TunerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TunerConfig {
        &self.config
    }

    /// Run the configured number of refinement cycles and assemble the report.
    ///
    /// All boundary validation happens before the first evaluator call; any
    /// failure aborts the run with [`PzError::Config`]. Evaluator errors
    /// propagate to the caller unchanged.
    pub fn run(
        &self,
        table: &SampleTable,
        evaluator: &dyn Evaluator,
        log_record: LogRecord,
    ) -> PzResult<TuneReport> {
        self.config.validate()?;
        log_record.validate()?;
        table.require_columns()?;

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.concurrency)
            .build()
            .map_err(|e| {
                PzError::Internal(format!("failed to build evaluation thread pool: {e}"))
            })?;

        let span = tracing::info_span!("penalty_tuning", run_id = %self.config.id);
        let _guard = span.enter();
        info!(
            cycles = self.config.cycles,
            concurrency = self.config.concurrency,
            rows = self.config.penalty_axis.resolution,
            cols = self.config.outlier_axis.resolution,
            "starting penalty grid search"
        );

        let context = RunContext {
            table,
            evaluator,
            pool: &pool,
        };
        let mut penalty_window = (self.config.penalty_axis.start, self.config.penalty_axis.end);
        let mut outlier_window = (self.config.outlier_axis.start, self.config.outlier_axis.end);
        let mut records = Vec::with_capacity(self.config.cycles);
        let mut label: Option<String> = None;

        for cycle in 0..self.config.cycles {
            let penalty_axis = PenaltyAxis::build(
                penalty_window.0,
                penalty_window.1,
                self.config.penalty_axis.resolution,
            )?;
            let outlier_axis = PenaltyAxis::build(
                outlier_window.0,
                outlier_window.1,
                self.config.outlier_axis.resolution,
            )?;

            let record =
                self.run_cycle(cycle, &context, &penalty_axis, &outlier_axis, &mut label)?;

            penalty_window = narrowed_window(record.pick.penalty, penalty_axis.step());
            outlier_window = narrowed_window(record.pick.outlier_penalty, outlier_axis.step());
            records.push(record);
        }

        let label = label.ok_or_else(|| {
            PzError::Internal("run finished without any evaluation producing a label".to_string())
        })?;

        info!(label = %label, "penalty grid search finished");
        TuneReport::assemble(&label, records, log_record)
    }

    fn run_cycle(
        &self,
        cycle: usize,
        context: &RunContext<'_>,
        penalty_axis: &PenaltyAxis,
        outlier_axis: &PenaltyAxis,
        label: &mut Option<String>,
    ) -> PzResult<CycleRecord> {
        let mut correct = ScoreMatrix::new(
            penalty_axis.values().to_vec(),
            outlier_axis.values().to_vec(),
        );
        let mut wrong = ScoreMatrix::new(
            penalty_axis.values().to_vec(),
            outlier_axis.values().to_vec(),
        );

        let feasible: Vec<(usize, usize)> = (0..penalty_axis.len())
            .flat_map(|row| (0..outlier_axis.len()).map(move |col| (row, col)))
            .filter(|&(row, col)| {
                outlier_axis.values()[col] >= FEASIBILITY_RATIO * penalty_axis.values()[row]
            })
            .collect();

        debug!(
            cycle,
            penalty_start = penalty_axis.start(),
            penalty_end = penalty_axis.end(),
            outlier_start = outlier_axis.start(),
            outlier_end = outlier_axis.end(),
            feasible = feasible.len(),
            skipped = penalty_axis.len() * outlier_axis.len() - feasible.len(),
            "evaluating cycle grid"
        );

        // score all feasible cells, then join before any grid write
        let evaluations: Vec<(usize, usize, Evaluation)> = context.pool.install(|| {
            feasible
                .par_iter()
                .map(|&(row, col)| {
                    let evaluation = context.evaluator.evaluate(
                        context.table,
                        penalty_axis.values()[row],
                        outlier_axis.values()[col],
                        self.config.sample_size_min,
                        self.config.sample_size_max,
                        self.config.concurrency,
                    )?;
                    Ok((row, col, evaluation))
                })
                .collect::<PzResult<Vec<_>>>()
        })?;

        for (row, col, evaluation) in evaluations {
            correct.set(row, col, evaluation.correct);
            wrong.set(row, col, evaluation.wrong);
            match label {
                None => *label = Some(evaluation.label),
                Some(seen) if *seen != evaluation.label => {
                    return Err(PzError::evaluator(format!(
                        "evaluator returned conflicting labels '{seen}' and '{}'",
                        evaluation.label
                    )));
                }
                Some(_) => {}
            }
        }

        let selection = select_best(&correct, &wrong)?;
        if selection.outcome == SelectionOutcome::Fallback {
            warn!(
                cycle,
                "no penalty pair satisfies the required correct-to-wrong ratio; used next-best available"
            );
        }
        debug!(
            cycle,
            penalty = selection.pick.penalty,
            outlier_penalty = selection.pick.outlier_penalty,
            diff = selection.diff,
            "cycle winner selected"
        );

        Ok(CycleRecord {
            cycle,
            correct,
            wrong,
            pick: selection.pick,
            outcome: selection.outcome,
        })
    }
}
