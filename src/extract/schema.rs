use crate::model::FIXED_COLUMNS;
use std::collections::BTreeSet;

/// Compute the deterministic column order for a set of observed column
/// names: the fixed prefix first, then the subset of `priority` that is
/// actually present (in the priority list's own order), then everything
/// else in ordinal string order.
///
/// Order-independent: any permutation of the input yields the same list.
pub fn unified_columns<I, S>(observed: I, priority: &[&str]) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut remaining: BTreeSet<String> = observed
        .into_iter()
        .map(|s| s.as_ref().to_string())
        .filter(|name| !FIXED_COLUMNS.contains(&name.as_str()))
        .collect();

    let mut columns: Vec<String> = FIXED_COLUMNS.iter().map(ToString::to_string).collect();
    for name in priority {
        if remaining.remove(*name) {
            columns.push((*name).to_string());
        }
    }
    columns.extend(remaining);

    columns
}

/// Column order for a slice of rows, from the union of their key sets.
pub fn columns_for_rows(rows: &[crate::model::Row], priority: &[&str]) -> Vec<String> {
    unified_columns(rows.iter().flat_map(|row| row.keys()), priority)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CCI_COLUMNS;
    use pretty_assertions::assert_eq;

    #[test]
    fn fixed_prefix_then_priority_then_lexicographic() {
        let observed = [
            "Material",
            "CCILocationID",
            "Area",
            "Name",
            "CCILevel1ParentTypeID",
            "GlobalId",
        ];
        let columns = unified_columns(observed, &CCI_COLUMNS);
        assert_eq!(
            columns,
            vec![
                "GlobalId",
                "Name",
                "Type",
                "CCILevel1ParentTypeID",
                "CCILocationID",
                "Area",
                "Material",
            ]
        );
    }

    #[test]
    fn order_independent_under_permutation() {
        let a = ["Zeta", "Area", "CCILocationID", "Fire Rating"];
        let b = ["Fire Rating", "CCILocationID", "Zeta", "Area"];
        assert_eq!(
            unified_columns(a, &CCI_COLUMNS),
            unified_columns(b, &CCI_COLUMNS)
        );
    }

    #[test]
    fn priority_subset_keeps_declared_order() {
        let observed = ["CCIMultiLevelTypeID", "CCILevel2ParentLocationID"];
        let columns = unified_columns(observed, &CCI_COLUMNS);
        assert_eq!(
            &columns[3..],
            ["CCILevel2ParentLocationID", "CCIMultiLevelTypeID"]
        );
    }

    #[test]
    fn empty_input_yields_fixed_columns_only() {
        let columns = unified_columns(std::iter::empty::<&str>(), &CCI_COLUMNS);
        assert_eq!(columns, vec!["GlobalId", "Name", "Type"]);
    }
}
