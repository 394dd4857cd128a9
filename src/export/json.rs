use crate::error::ExportError;
use crate::model::Table;
use crate::pipeline::{CellFlag, ValidationReport};
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;

#[derive(Serialize)]
struct JsonReport<'a> {
    columns: &'a [String],
    rows: Vec<Vec<String>>,
    flags: &'a [CellFlag],
}

/// Write the consolidated table plus validation flags as pretty JSON.
/// Cells are rendered in column order so the output is stable run to run.
pub fn write_json_report<P: AsRef<Path>>(
    table: &Table,
    report: &ValidationReport,
    path: P,
) -> Result<(), ExportError> {
    let rows = (0..table.row_count())
        .map(|row| {
            table
                .columns
                .iter()
                .map(|column| table.cell(row, column).cell())
                .collect()
        })
        .collect();

    let json = serde_json::to_string_pretty(&JsonReport {
        columns: &table.columns,
        rows,
        flags: &report.flags,
    })?;

    let path_ref = path.as_ref();
    let mut file = File::create(path_ref).map_err(|source| ExportError::FileCreate {
        path: path_ref.to_path_buf(),
        source,
    })?;

    file.write_all(json.as_bytes())
        .map_err(|e| ExportError::WriteError {
            message: e.to_string(),
        })?;

    Ok(())
}
