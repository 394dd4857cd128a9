use crate::error::ParseError;
use crate::model::{Element, Scalar};
use crate::parser::step::{StepEntity, StepFile, StepValue};
use std::collections::HashMap;
use std::path::Path;

// IfcElement subtypes recognized as extractable elements (IFC4 and IFC2X3).
const IFC_ELEMENT_TYPES: &[&str] = &[
    "IFCWALL",
    "IFCWALLSTANDARDCASE",
    "IFCDOOR",
    "IFCWINDOW",
    "IFCSLAB",
    "IFCCOLUMN",
    "IFCBEAM",
    "IFCSTAIR",
    "IFCSTAIRFLIGHT",
    "IFCRAMP",
    "IFCRAMPFLIGHT",
    "IFCRAILING",
    "IFCROOF",
    "IFCCOVERING",
    "IFCCURTAINWALL",
    "IFCPLATE",
    "IFCMEMBER",
    "IFCFOOTING",
    "IFCPILE",
    "IFCFURNISHINGELEMENT",
    "IFCFLOWFIXTURE",
    "IFCFLOWTERMINAL",
    "IFCFLOWSEGMENT",
    "IFCFLOWFITTING",
    "IFCSANITARYTERMINAL",
    "IFCDISTRIBUTIONELEMENT",
    "IFCBUILDINGELEMENTPROXY",
];

/// Parses an IFC file and extracts its elements with their property sets.
///
/// Supports both IFC2x3 and IFC4 schemas. For every element entity this
/// reads the GlobalId, the display name (defaulting to "Unknown") and the
/// classification, then resolves
/// `IFCRELDEFINESBYPROPERTIES → IFCPROPERTYSET → IFCPROPERTYSINGLEVALUE`
/// into the element's property mapping. Elements come back in file order.
///
/// # Errors
///
/// Returns [`ParseError::FileRead`] if the file cannot be read.
/// Returns [`ParseError::InvalidStep`] if the STEP format is malformed.
pub fn parse_ifc_elements<P: AsRef<Path>>(path: P) -> Result<Vec<Element>, ParseError> {
    let content = std::fs::read_to_string(&path).map_err(|source| ParseError::FileRead {
        path: path.as_ref().to_path_buf(),
        source,
    })?;

    let step_file = StepFile::parse(&content)?;
    let properties_by_element = resolve_element_properties(&step_file);

    let mut elements = Vec::new();
    for entity in step_file.entities() {
        if !IFC_ELEMENT_TYPES.contains(&entity.entity_type.as_str()) {
            continue;
        }

        let global_id = string_attr(entity, 0).unwrap_or_else(|| format!("#{}", entity.id));
        let name = string_attr(entity, 2);
        let mut element = Element::new(global_id, name, entity.entity_type.clone());

        if let Some(props) = properties_by_element.get(&entity.id) {
            element.properties = props.clone();
        }

        elements.push(element);
    }

    Ok(elements)
}

fn string_attr(entity: &StepEntity, index: usize) -> Option<String> {
    match entity.values.get(index) {
        Some(StepValue::String(s)) => Some(s.clone()),
        _ => None,
    }
}

/// Build element id → property map from the property-definition
/// relationships. A property with no name or no scalar value is skipped.
fn resolve_element_properties(step_file: &StepFile) -> HashMap<u64, HashMap<String, Scalar>> {
    // Property set id → its scalar properties
    let mut pset_props: HashMap<u64, HashMap<String, Scalar>> = HashMap::new();

    for pset in step_file.entities_of_type("IFCPROPERTYSET") {
        let mut props = HashMap::new();

        // Index 4 = HasProperties (list of property refs)
        if let Some(StepValue::List(refs)) = pset.values.get(4) {
            for prop_ref in refs {
                let StepValue::Reference(prop_id) = prop_ref else {
                    continue;
                };
                let Some(prop) = step_file.entity(*prop_id) else {
                    continue;
                };
                if prop.entity_type != "IFCPROPERTYSINGLEVALUE" {
                    continue;
                }

                let name = match string_attr(prop, 0) {
                    Some(n) if !n.is_empty() => n,
                    _ => continue,
                };
                // Index 2 = NominalValue
                if let Some(value) = prop.values.get(2).and_then(scalar_from_step) {
                    props.insert(name, value);
                }
            }
        }

        pset_props.insert(pset.id, props);
    }

    // Link property sets to elements via IFCRELDEFINESBYPROPERTIES
    let mut element_properties: HashMap<u64, HashMap<String, Scalar>> = HashMap::new();

    for rel in step_file.entities_of_type("IFCRELDEFINESBYPROPERTIES") {
        // Index 4 = RelatedObjects, index 5 = RelatingPropertyDefinition
        let elements: Vec<u64> = match rel.values.get(4) {
            Some(StepValue::List(list)) => list
                .iter()
                .filter_map(|v| match v {
                    StepValue::Reference(id) => Some(*id),
                    _ => None,
                })
                .collect(),
            _ => Vec::new(),
        };

        let pset_id = match rel.values.get(5) {
            Some(StepValue::Reference(id)) => *id,
            _ => continue,
        };

        if let Some(props) = pset_props.get(&pset_id) {
            for elem_id in elements {
                element_properties
                    .entry(elem_id)
                    .or_default()
                    .extend(props.clone());
            }
        }
    }

    element_properties
}

fn scalar_from_step(value: &StepValue) -> Option<Scalar> {
    match value {
        StepValue::String(s) => Some(Scalar::Text(s.clone())),
        StepValue::Enum(e) => Some(Scalar::Text(e.clone())),
        StepValue::Real(f) => Some(Scalar::Number(*f)),
        StepValue::Integer(i) => Some(Scalar::Number(*i as f64)),
        StepValue::Boolean(b) => Some(Scalar::Boolean(*b)),
        // References, lists and unset values are not scalar properties
        _ => None,
    }
}
