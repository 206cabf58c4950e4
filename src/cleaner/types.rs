use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Uniform rule applied to every row carrying a [`ValueWarning`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowPolicy {
    /// Remove the whole row. Keeps the composed pipeline a fixed point.
    #[default]
    DropRow,
    /// Clear the offending cell and keep the row.
    NullCell,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    /// No accepted date format matched the value
    UnparseableDate,
    /// Removing special characters left nothing behind
    EmptiedByCleaning,
}

impl fmt::Display for WarningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnparseableDate => write!(f, "unparseable date"),
            Self::EmptiedByCleaning => write!(f, "emptied by cleaning"),
        }
    }
}

/// A value that could not be cleaned. Non-fatal; resolved by the [`RowPolicy`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueWarning {
    /// Row index in the frame the step ran on
    pub row: usize,
    pub column: String,
    pub value: String,
    pub kind: WarningKind,
}

/// Result of a step that rewrites cell values.
#[derive(Debug, Clone)]
pub struct StepOutput {
    pub df: DataFrame,
    /// Number of cells whose value changed
    pub changed: usize,
    pub warnings: Vec<ValueWarning>,
}

/// Profile of a frame, logged after renaming and printed by `inspect`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetInfo {
    pub rows: usize,
    pub columns: usize,
    pub column_names: Vec<String>,
    pub dtypes: BTreeMap<String, String>,
    pub null_counts: BTreeMap<String, usize>,
    pub duplicated_rows: usize,
}
