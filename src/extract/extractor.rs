use crate::error::FilterError;
use crate::model::{Element, Row, Scalar};
use std::collections::HashSet;
use std::path::Path;

/// Set of property names the extractor retains. An empty filter retains
/// everything.
#[derive(Debug, Clone, Default)]
pub struct PropertyFilter {
    names: HashSet<String>,
}

impl PropertyFilter {
    /// The empty filter: every property is retained.
    #[must_use]
    pub fn retain_all() -> Self {
        Self::default()
    }

    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Load from a plain newline-delimited list; blank lines are skipped.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, FilterError> {
        let content =
            std::fs::read_to_string(&path).map_err(|source| FilterError::FileRead {
                path: path.as_ref().to_path_buf(),
                source,
            })?;
        Ok(Self::from_names(
            content
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty()),
        ))
    }

    #[must_use]
    pub fn retains(&self, name: &str) -> bool {
        self.names.is_empty() || self.names.contains(name)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    #[must_use]
    pub fn names(&self) -> &HashSet<String> {
        &self.names
    }
}

/// Flatten one element into a row: the three fixed columns always, plus
/// every retained property. A recurring property name overwrites the
/// earlier entry.
#[must_use]
pub fn extract_row(element: &Element, filter: &PropertyFilter) -> Row {
    let mut row = Row::new();
    row.insert(
        "GlobalId".to_string(),
        Scalar::Text(element.global_id.clone()),
    );
    row.insert("Name".to_string(), Scalar::Text(element.name.clone()));
    row.insert("Type".to_string(), Scalar::Text(element.ifc_type.clone()));

    for (name, value) in &element.properties {
        if filter.retains(name) {
            row.insert(name.clone(), value.clone());
        }
    }

    row
}
