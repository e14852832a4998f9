//! Per-cycle score grids.

use serde::{Deserialize, Serialize};

/// One count grid over the penalty x outlier-penalty search window.
///
/// Rows are labeled by the penalty axis, columns by the outlier penalty
/// axis. Cells start unset; the refiner only fills cells that pass the
/// feasibility rule, so an unset cell marks a pair that was never
/// evaluated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreMatrix {
    penalty_values: Vec<f64>,
    outlier_values: Vec<f64>,
    cells: Vec<Option<u32>>,
}

impl ScoreMatrix {
    /// Grid with the given axis labels and every cell unset
    pub fn new(penalty_values: Vec<f64>, outlier_values: Vec<f64>) -> Self {
        let cells = vec![None; penalty_values.len() * outlier_values.len()];
        Self {
            penalty_values,
            outlier_values,
            cells,
        }
    }

    pub fn rows(&self) -> usize {
        self.penalty_values.len()
    }

    pub fn cols(&self) -> usize {
        self.outlier_values.len()
    }

    /// Penalty value labeling each row
    pub fn penalty_values(&self) -> &[f64] {
        &self.penalty_values
    }

    /// Outlier penalty value labeling each column
    pub fn outlier_values(&self) -> &[f64] {
        &self.outlier_values
    }

    /// Read a cell; `None` means the pair was never evaluated
    pub fn get(&self, row: usize, col: usize) -> Option<u32> {
        self.cells[self.index(row, col)]
    }

    /// Fill a cell with an evaluated count
    pub fn set(&mut self, row: usize, col: usize, count: u32) {
        let index = self.index(row, col);
        self.cells[index] = Some(count);
    }

    /// Number of cells that were evaluated
    pub fn filled(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    fn index(&self, row: usize, col: usize) -> usize {
        debug_assert!(row < self.rows() && col < self.cols());
        row * self.cols() + col
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_matrix_is_fully_unset() {
        let matrix = ScoreMatrix::new(vec![1.0, 2.0, 3.0], vec![0.5, 1.5]);
        assert_eq!(matrix.rows(), 3);
        assert_eq!(matrix.cols(), 2);
        assert_eq!(matrix.filled(), 0);
        for row in 0..3 {
            for col in 0..2 {
                assert_eq!(matrix.get(row, col), None);
            }
        }
    }

    #[test]
    fn test_set_and_get_round() {
        let mut matrix = ScoreMatrix::new(vec![1.0, 2.0], vec![0.5, 1.5, 2.5]);
        matrix.set(1, 2, 42);
        assert_eq!(matrix.get(1, 2), Some(42));
        assert_eq!(matrix.get(0, 0), None);
        assert_eq!(matrix.filled(), 1);
    }

    #[test]
    fn test_axis_labels_are_preserved() {
        let matrix = ScoreMatrix::new(vec![1.0, 2.0], vec![0.5]);
        assert_eq!(matrix.penalty_values(), &[1.0, 2.0]);
        assert_eq!(matrix.outlier_values(), &[0.5]);
    }
}
