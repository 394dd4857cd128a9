use crate::error::ValidateError;
use crate::model::Table;
use serde::Serialize;

const L1_LOCATION: &str = "CCILevel1ParentLocationID";
const L1_TYPE: &str = "CCILevel1ParentTypeID";
const L2_LOCATION: &str = "CCILevel2ParentLocationID";
const L2_TYPE: &str = "CCILevel2ParentTypeID";
const LOCATION: &str = "CCILocationID";
const MULTI_LOCATION: &str = "CCIMultiLevelLocationID";
const MULTI_TYPE: &str = "CCIMultiLevelTypeID";

/// Columns the validator requires, checked before any row is inspected.
pub const REQUIRED_COLUMNS: [&str; 7] = [
    L1_LOCATION,
    L1_TYPE,
    L2_LOCATION,
    L2_TYPE,
    LOCATION,
    MULTI_LOCATION,
    MULTI_TYPE,
];

/// One cell whose stored composite identifier disagrees with the value
/// recomputed from its components.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CellFlag {
    pub row: usize,
    pub column: String,
}

#[derive(Debug, Default, Serialize)]
pub struct ValidationReport {
    pub flags: Vec<CellFlag>,
}

impl ValidationReport {
    #[must_use]
    pub fn is_flagged(&self, row: usize, column: &str) -> bool {
        self.flags.iter().any(|f| f.row == row && f.column == column)
    }

    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.flags.is_empty()
    }
}

/// Recompute both CCI multi-level identifiers for every row and flag cells
/// whose stored value disagrees.
///
/// Expected values:
/// - `CCIMultiLevelTypeID` = `§<L2 parent type>.<L1 parent type>`
/// - `CCIMultiLevelLocationID` = `+<L2 parent location>.<L1 parent location>.<location>`
///
/// Components are coerced to strings with an absent value reading as the
/// literal "None", matching how the source data stringifies. The pass only
/// reads and flags; stored values are never changed.
///
/// # Errors
///
/// Returns [`ValidateError::MissingColumns`] naming every absent required
/// column; no partial validation is attempted.
pub fn validate(table: &Table) -> Result<ValidationReport, ValidateError> {
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|column| table.column_index(column).is_none())
        .map(ToString::to_string)
        .collect();
    if !missing.is_empty() {
        return Err(ValidateError::MissingColumns { columns: missing });
    }

    let mut report = ValidationReport::default();

    for row in 0..table.row_count() {
        let expected_type = format!(
            "\u{a7}{}.{}",
            table.cell(row, L2_TYPE).coerced(),
            table.cell(row, L1_TYPE).coerced(),
        );
        if table.cell(row, MULTI_TYPE).coerced() != expected_type {
            report.flags.push(CellFlag {
                row,
                column: MULTI_TYPE.to_string(),
            });
        }

        let expected_location = format!(
            "+{}.{}.{}",
            table.cell(row, L2_LOCATION).coerced(),
            table.cell(row, L1_LOCATION).coerced(),
            table.cell(row, LOCATION).coerced(),
        );
        if table.cell(row, MULTI_LOCATION).coerced() != expected_location {
            report.flags.push(CellFlag {
                row,
                column: MULTI_LOCATION.to_string(),
            });
        }
    }

    Ok(report)
}
