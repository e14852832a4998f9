use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::errors::ConfigError;

/// Columns every sample table must carry before a tuning run starts
pub const REQUIRED_COLUMNS: [&str; 4] = ["ID", "position", "strand", "position_segment"];

/// A single named column of sample data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Column {
    Int(Vec<i64>),
    Float(Vec<f64>),
    Text(Vec<String>),
}

impl Column {
    pub fn len(&self) -> usize {
        match self {
            Column::Int(values) => values.len(),
            Column::Float(values) => values.len(),
            Column::Text(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Read-only tabular input handed to the evaluators.
///
/// The tuner treats the table as opaque: it checks that the required
/// columns exist and forwards the table to every [`Evaluator`] call
/// unchanged. Evaluators may read any additional columns they need.
///
/// [`Evaluator`]: crate::evaluator::Evaluator
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SampleTable {
    columns: HashMap<String, Column>,
    rows: usize,
}

impl SampleTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a named column. The first column fixes the row count; every
    /// later column must match it.
    pub fn with_column(
        mut self,
        name: impl Into<String>,
        column: Column,
    ) -> Result<Self, ConfigError> {
        let name = name.into();
        if self.columns.is_empty() {
            self.rows = column.len();
        } else if column.len() != self.rows {
            return Err(ConfigError::ColumnLengthMismatch {
                column: name,
                got: column.len(),
                expected: self.rows,
            });
        }
        self.columns.insert(name, column);
        Ok(self)
    }

    /// Look up a column by name
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.get(name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    /// Verify the table carries every column in [`REQUIRED_COLUMNS`],
    /// naming the first missing one.
    pub fn require_columns(&self) -> Result<(), ConfigError> {
        for column in REQUIRED_COLUMNS {
            if !self.has_column(column) {
                return Err(ConfigError::MissingColumn {
                    column: column.to_string(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_table() -> SampleTable {
        SampleTable::new()
            .with_column("ID", Column::Int(vec![1, 1, 2]))
            .unwrap()
            .with_column("position", Column::Int(vec![10, 40, 70]))
            .unwrap()
            .with_column(
                "strand",
                Column::Text(vec!["+".to_string(), "+".to_string(), "-".to_string()]),
            )
            .unwrap()
            .with_column(
                "position_segment",
                Column::Text(vec![
                    "I_1".to_string(),
                    "I_1".to_string(),
                    "I_2".to_string(),
                ]),
            )
            .unwrap()
    }

    #[test]
    fn test_required_columns_pass() {
        let table = full_table();
        assert!(table.require_columns().is_ok());
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_missing_column_is_named() {
        let table = SampleTable::new()
            .with_column("ID", Column::Int(vec![1]))
            .unwrap()
            .with_column("position", Column::Int(vec![10]))
            .unwrap();
        let err = table.require_columns().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::MissingColumn { ref column } if column == "strand"
        ));
    }

    #[test]
    fn test_column_length_mismatch() {
        let err = SampleTable::new()
            .with_column("ID", Column::Int(vec![1, 2, 3]))
            .unwrap()
            .with_column("position", Column::Float(vec![1.5]))
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::ColumnLengthMismatch { got: 1, expected: 3, .. }
        ));
    }

    #[test]
    fn test_extra_columns_are_kept() {
        let table = full_table()
            .with_column("intensity", Column::Float(vec![0.1, 0.4, 0.9]))
            .unwrap();
        assert!(table.require_columns().is_ok());
        assert!(table.has_column("intensity"));
        assert_eq!(table.column("intensity").map(Column::len), Some(3));
    }
}
