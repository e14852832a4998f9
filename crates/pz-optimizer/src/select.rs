//! Winning-cell selection over one cycle's score grids.

use serde::{Deserialize, Serialize};

use pz_types::{PzError, PzResult};

use crate::matrix::ScoreMatrix;

/// Factor of the wrong count that a cell's correct count must reach to
/// qualify for the primary rule: `correct >= 2 * wrong`, equivalently
/// `correct - wrong >= wrong`. Inherited from the original tool; no
/// stronger rationale is documented.
pub const QUALIFYING_WRONG_FACTOR: u32 = 2;

/// Which selection rule produced the pick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionOutcome {
    /// A cell satisfied the qualifying correct-to-wrong ratio
    Primary,
    /// No cell qualified; the global maximum of `correct - wrong` was used
    Fallback,
}

/// The threshold pair picked at the end of a cycle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BestPick {
    pub penalty: f64,
    pub outlier_penalty: f64,
}

/// A winning cell with its grid coordinates and score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    pub row: usize,
    pub col: usize,
    pub pick: BestPick,
    /// `correct - wrong` at the winning cell
    pub diff: i64,
    pub outcome: SelectionOutcome,
}

/// Apply the selection rule to one cycle's correct and wrong grids.
///
/// Primary rule: among cells whose correct count is at least twice the
/// wrong count, take the maximum of `correct - wrong`. If no cell
/// qualifies, fall back to the global maximum of `correct - wrong` over
/// all evaluated cells.
///
/// Ties break deterministically in column-major scan order: the lowest
/// column index wins, then the lowest row index within that column. The
/// scan keeps a candidate only on a strictly greater diff, so the first
/// cell reached at the winning value is kept.
pub fn select_best(correct: &ScoreMatrix, wrong: &ScoreMatrix) -> PzResult<Selection> {
    debug_assert_eq!(correct.rows(), wrong.rows());
    debug_assert_eq!(correct.cols(), wrong.cols());

    if let Some((row, col, diff)) = scan(correct, wrong, true) {
        return Ok(winner(correct, row, col, diff, SelectionOutcome::Primary));
    }
    if let Some((row, col, diff)) = scan(correct, wrong, false) {
        return Ok(winner(correct, row, col, diff, SelectionOutcome::Fallback));
    }
    Err(PzError::Selection(
        "no cell in the score grid was evaluated; the feasibility rule excluded every pair"
            .to_string(),
    ))
}

fn scan(
    correct: &ScoreMatrix,
    wrong: &ScoreMatrix,
    qualifying_only: bool,
) -> Option<(usize, usize, i64)> {
    let mut best: Option<(usize, usize, i64)> = None;
    for col in 0..correct.cols() {
        for row in 0..correct.rows() {
            let (Some(c), Some(w)) = (correct.get(row, col), wrong.get(row, col)) else {
                continue;
            };
            if qualifying_only && u64::from(c) < u64::from(QUALIFYING_WRONG_FACTOR) * u64::from(w)
            {
                continue;
            }
            let diff = i64::from(c) - i64::from(w);
            match best {
                Some((_, _, best_diff)) if diff <= best_diff => {}
                _ => best = Some((row, col, diff)),
            }
        }
    }
    best
}

fn winner(
    grid: &ScoreMatrix,
    row: usize,
    col: usize,
    diff: i64,
    outcome: SelectionOutcome,
) -> Selection {
    Selection {
        row,
        col,
        pick: BestPick {
            penalty: grid.penalty_values()[row],
            outlier_penalty: grid.outlier_values()[col],
        },
        diff,
        outcome,
    }
}
