pub mod extractor;
pub mod schema;

pub use extractor::{extract_row, PropertyFilter};
pub use schema::{columns_for_rows, unified_columns};
