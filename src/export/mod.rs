pub mod csv;
pub mod json;
pub mod xlsx;

pub use crate::error::ExportError;
pub use csv::write_csv_table;
pub use json::write_json_report;
pub use xlsx::write_validated_xlsx;
