use crate::error::ExportError;
use crate::model::Table;
use crate::pipeline::ValidationReport;
use rust_xlsxwriter::{Color, Format, Workbook};
use std::path::Path;

/// Write the consolidated table as an xlsx workbook, filling every cell the
/// validator flagged with solid red so mismatches can be audited visually.
pub fn write_validated_xlsx<P: AsRef<Path>>(
    table: &Table,
    report: &ValidationReport,
    path: P,
) -> Result<(), ExportError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    let invalid_fill = Format::new().set_background_color(Color::Red);

    for (col, name) in table.columns.iter().enumerate() {
        worksheet.write_string(0, col as u16, name.as_str())?;
    }

    for row in 0..table.row_count() {
        for (col, column) in table.columns.iter().enumerate() {
            let value = table.cell(row, column).cell();
            let sheet_row = (row + 1) as u32;
            if report.is_flagged(row, column) {
                worksheet.write_string_with_format(
                    sheet_row,
                    col as u16,
                    value.as_str(),
                    &invalid_fill,
                )?;
            } else {
                worksheet.write_string(sheet_row, col as u16, value.as_str())?;
            }
        }
    }

    workbook.save(path.as_ref())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Row, Scalar};
    use crate::pipeline::CellFlag;

    #[test]
    fn writes_workbook_with_flags() {
        let mut row = Row::new();
        row.insert("GlobalId".to_string(), Scalar::Text("g-1".to_string()));
        row.insert(
            "CCIMultiLevelTypeID".to_string(),
            Scalar::Text("\u{a7}B1.03".to_string()),
        );
        let table = Table::new(
            vec!["GlobalId".to_string(), "CCIMultiLevelTypeID".to_string()],
            vec![row],
        );
        let report = ValidationReport {
            flags: vec![CellFlag {
                row: 0,
                column: "CCIMultiLevelTypeID".to_string(),
            }],
        };

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("validation.xlsx");
        write_validated_xlsx(&table, &report, &path).unwrap();
        assert!(path.metadata().unwrap().len() > 0);
    }
}
