use serde::Serialize;

/// A scalar property value carried through the pipeline.
///
/// IFC nominal values are dynamically typed at the source; this closed
/// variant pins the stringification rules the validator relies on.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Scalar {
    Text(String),
    Number(f64),
    Boolean(bool),
    Absent,
}

impl Scalar {
    /// Rendering form for CSV and xlsx cells. An absent value renders as the
    /// empty string, never as an omitted key.
    #[must_use]
    pub fn cell(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Number(n) => format_number(*n),
            Self::Boolean(b) => if *b { "True" } else { "False" }.to_string(),
            Self::Absent => String::new(),
        }
    }

    /// Coercion form used when recomputing composite identifiers. Identical
    /// to [`Scalar::cell`] except that an absent value coerces to the literal
    /// text "None". Intentional, observed behavior of the source data flow.
    #[must_use]
    pub fn coerced(&self) -> String {
        match self {
            Self::Absent => "None".to_string(),
            other => other.cell(),
        }
    }

    #[must_use]
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }
}

fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 {
        format!("{n:.0}")
    } else {
        format!("{n}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn absent_renders_empty_but_coerces_to_none() {
        assert_eq!(Scalar::Absent.cell(), "");
        assert_eq!(Scalar::Absent.coerced(), "None");
    }

    #[test]
    fn whole_numbers_render_without_decimals() {
        assert_eq!(Scalar::Number(240.0).cell(), "240");
        assert_eq!(Scalar::Number(2.5).cell(), "2.5");
    }

    #[test]
    fn booleans_render_capitalized() {
        assert_eq!(Scalar::Boolean(true).cell(), "True");
        assert_eq!(Scalar::Boolean(false).coerced(), "False");
    }
}
