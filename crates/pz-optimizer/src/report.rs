//! Run history and final result assembly.

use serde::{Deserialize, Serialize};

use pz_types::{LogRecord, PzError, PzResult};

use crate::matrix::ScoreMatrix;
use crate::select::{BestPick, SelectionOutcome};

/// Everything one refinement cycle produced. Immutable once the cycle ends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CycleRecord {
    /// Cycle sequence number (0-indexed)
    pub cycle: usize,
    /// Correct-split counts over this cycle's grid
    pub correct: ScoreMatrix,
    /// Wrong-split counts over this cycle's grid
    pub wrong: ScoreMatrix,
    /// The winning pair the next cycle recentred on
    pub pick: BestPick,
    /// Which selection rule produced the pick
    pub outcome: SelectionOutcome,
}

/// Output bundle of a full tuning run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TuneReport {
    /// The caller's log record with the two winning slots written
    pub log_record: LogRecord,
    /// The final cycle's winning pair
    pub winning_pair: BestPick,
    /// Per-cycle history, in execution order
    pub cycles: Vec<CycleRecord>,
}

impl TuneReport {
    /// Write the final pair into the `<label>_penalty` and
    /// `<label>_outlier_penalty` slots and package the run history.
    pub fn assemble(
        label: &str,
        cycles: Vec<CycleRecord>,
        mut log_record: LogRecord,
    ) -> PzResult<Self> {
        let winning_pair = cycles
            .last()
            .map(|record| record.pick)
            .ok_or_else(|| PzError::Internal("assembled a report with no cycles".to_string()))?;

        log_record.set(&format!("{label}_penalty"), winning_pair.penalty)?;
        log_record.set(
            &format!("{label}_outlier_penalty"),
            winning_pair.outlier_penalty,
        )?;

        Ok(Self {
            log_record,
            winning_pair,
            cycles,
        })
    }

    /// History of per-cycle correct matrices, in execution order
    pub fn correct_history(&self) -> Vec<&ScoreMatrix> {
        self.cycles.iter().map(|record| &record.correct).collect()
    }

    /// History of per-cycle wrong matrices, in execution order
    pub fn wrong_history(&self) -> Vec<&ScoreMatrix> {
        self.cycles.iter().map(|record| &record.wrong).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one_cycle(cycle: usize, penalty: f64, outlier_penalty: f64) -> CycleRecord {
        let mut correct = ScoreMatrix::new(vec![penalty], vec![outlier_penalty]);
        let mut wrong = ScoreMatrix::new(vec![penalty], vec![outlier_penalty]);
        correct.set(0, 0, 10);
        wrong.set(0, 0, 2);
        CycleRecord {
            cycle,
            correct,
            wrong,
            pick: BestPick {
                penalty,
                outlier_penalty,
            },
            outcome: SelectionOutcome::Primary,
        }
    }

    #[test]
    fn test_assemble_writes_the_two_label_slots() {
        let cycles = vec![one_cycle(0, 2.0, 1.0), one_cycle(1, 2.25, 1.25)];
        let report = TuneReport::assemble("delay", cycles, LogRecord::new()).unwrap();

        assert_eq!(report.winning_pair.penalty, 2.25);
        assert_eq!(report.winning_pair.outlier_penalty, 1.25);
        assert_eq!(report.log_record.get("delay_penalty"), Some(2.25));
        assert_eq!(report.log_record.get("delay_outlier_penalty"), Some(1.25));

        // all six other slots stay untouched
        let touched = ["delay_penalty", "delay_outlier_penalty"];
        let untouched = report
            .log_record
            .slot_names()
            .filter(|name| !touched.contains(name))
            .count();
        assert_eq!(untouched, 6);
        assert!(report
            .log_record
            .slot_names()
            .filter(|name| !touched.contains(name))
            .all(|name| !report.log_record.is_set(name)));
    }

    #[test]
    fn test_winning_pair_comes_from_the_last_cycle() {
        let cycles = vec![one_cycle(0, 3.0, 2.0), one_cycle(1, 2.5, 1.5)];
        let report = TuneReport::assemble("intensity", cycles, LogRecord::new()).unwrap();
        assert_eq!(report.winning_pair.penalty, 2.5);
        assert_eq!(report.cycles.len(), 2);
        assert_eq!(report.correct_history().len(), 2);
        assert_eq!(report.wrong_history().len(), 2);
    }

    #[test]
    fn test_unknown_label_is_a_record_error() {
        let cycles = vec![one_cycle(0, 2.0, 1.0)];
        let err = TuneReport::assemble("coverage", cycles, LogRecord::new()).unwrap_err();
        assert!(matches!(err, PzError::Record(_)));
        assert!(err.to_string().contains("coverage_penalty"));
    }

    #[test]
    fn test_prefilled_slots_pass_through() {
        let mut record = LogRecord::new();
        record.set("half_life_penalty", 9.0).unwrap();
        let report =
            TuneReport::assemble("delay", vec![one_cycle(0, 2.0, 1.0)], record).unwrap();
        assert_eq!(report.log_record.get("half_life_penalty"), Some(9.0));
        assert_eq!(report.log_record.get("delay_penalty"), Some(2.0));
    }

    #[test]
    fn test_report_round_trips_through_json() {
        let report =
            TuneReport::assemble("delay", vec![one_cycle(0, 2.0, 1.0)], LogRecord::new())
                .unwrap();
        let json = serde_json::to_string(&report).unwrap();
        let back: TuneReport = serde_json::from_str(&json).unwrap();
        assert_eq!(report, back);
    }
}
