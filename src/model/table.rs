use super::Scalar;
use serde::Serialize;
use std::collections::HashMap;

/// Columns every row carries, always first in the schema.
pub const FIXED_COLUMNS: [&str; 3] = ["GlobalId", "Name", "Type"];

/// CCI classification columns, placed right after the fixed columns when
/// present. The declared order here is the output order.
pub const CCI_COLUMNS: [&str; 7] = [
    "CCILevel1ParentLocationID",
    "CCILevel1ParentTypeID",
    "CCILevel2ParentLocationID",
    "CCILevel2ParentTypeID",
    "CCILocationID",
    "CCIMultiLevelLocationID",
    "CCIMultiLevelTypeID",
];

/// Flattened form of one element. Keys are always a subset of the owning
/// table's column set.
pub type Row = HashMap<String, Scalar>;

/// An ordered sequence of rows plus a deterministic column schema.
/// Row order is element discovery order, never sorted.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

const ABSENT: Scalar = Scalar::Absent;

impl Table {
    #[must_use]
    pub fn new(columns: Vec<String>, rows: Vec<Row>) -> Self {
        Self { columns, rows }
    }

    /// Cell lookup by row index and column name. A column the row does not
    /// carry reads as [`Scalar::Absent`].
    #[must_use]
    pub fn cell(&self, row: usize, column: &str) -> &Scalar {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .unwrap_or(&ABSENT)
    }

    #[must_use]
    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}
