use crate::extract::{unified_columns, PropertyFilter};
use crate::model::{Row, Scalar, Table, FIXED_COLUMNS};

/// Merge per-file tables into one table with outer-union-of-columns
/// semantics.
///
/// When `selected` is non-empty, every non-fixed column is filtered to it
/// per source table before the union is taken. The unified schema follows
/// the standard ordering rule; rows are concatenated one source table fully
/// before the next, and every output row carries an explicit
/// [`Scalar::Absent`] for columns its source did not have.
#[must_use]
pub fn consolidate(tables: &[Table], selected: &PropertyFilter, priority: &[&str]) -> Table {
    let retained = |name: &str| {
        FIXED_COLUMNS.contains(&name) || selected.retains(name)
    };

    let observed = tables
        .iter()
        .flat_map(|table| table.columns.iter())
        .filter(|name| retained(name.as_str()))
        .map(String::as_str);
    let columns = unified_columns(observed, priority);

    let mut rows = Vec::with_capacity(tables.iter().map(Table::row_count).sum());
    for table in tables {
        for source_row in &table.rows {
            let mut row = Row::with_capacity(columns.len());
            for column in &columns {
                let value = source_row.get(column).cloned().unwrap_or(Scalar::Absent);
                row.insert(column.clone(), value);
            }
            rows.push(row);
        }
    }

    Table::new(columns, rows)
}
