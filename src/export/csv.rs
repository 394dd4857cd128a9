use crate::error::ExportError;
use crate::model::Table;
use std::fs::File;
use std::path::Path;

/// Write one table as a delimited file: header row first, then one record
/// per row in column order. Absent cells render as empty fields.
pub fn write_csv_table<P: AsRef<Path>>(table: &Table, path: P) -> Result<(), ExportError> {
    let path_ref = path.as_ref();
    let file = File::create(path_ref).map_err(|source| ExportError::FileCreate {
        path: path_ref.to_path_buf(),
        source,
    })?;

    let mut writer = csv::Writer::from_writer(file);

    writer.write_record(&table.columns)?;
    for row in 0..table.row_count() {
        let record: Vec<String> = table
            .columns
            .iter()
            .map(|column| table.cell(row, column).cell())
            .collect();
        writer.write_record(&record)?;
    }

    writer.flush().map_err(|e| ExportError::WriteError {
        message: e.to_string(),
    })?;

    Ok(())
}
