use super::Scalar;
use serde::Serialize;
use std::collections::HashMap;

/// One building-model entity as supplied by the parser: identity, display
/// name, classification and its raw property mapping.
#[derive(Debug, Clone, Serialize)]
pub struct Element {
    pub global_id: String,
    pub name: String,
    pub ifc_type: String,
    pub properties: HashMap<String, Scalar>,
}

impl Element {
    #[must_use]
    pub fn new(global_id: String, name: Option<String>, ifc_type: String) -> Self {
        Self {
            global_id,
            name: name.unwrap_or_else(|| "Unknown".to_string()),
            ifc_type,
            properties: HashMap::new(),
        }
    }
}
