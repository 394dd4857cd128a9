use std::collections::HashMap;

use crate::error::ParseError;

/// One attribute value of a STEP entity instance.
#[derive(Debug, Clone, PartialEq)]
pub enum StepValue {
    String(String),
    Real(f64),
    Integer(i64),
    Boolean(bool),
    Enum(String),
    Reference(u64),
    List(Vec<StepValue>),
    Null,
    Derived,
}

#[derive(Debug, Clone)]
pub struct StepEntity {
    pub id: u64,
    pub entity_type: String,
    pub values: Vec<StepValue>,
}

/// Parsed DATA section of a STEP file. Entities are kept in file order so
/// downstream rows come out in discovery order, with an id index for
/// reference resolution.
#[derive(Debug)]
pub struct StepFile {
    entities: Vec<StepEntity>,
    index: HashMap<u64, usize>,
    pub schema: String,
}

impl StepFile {
    pub fn parse(content: &str) -> Result<Self, ParseError> {
        let mut entities = Vec::new();
        let mut index = HashMap::new();
        let mut schema = String::new();
        let mut in_data = false;

        for line in content.lines() {
            let line = line.trim();

            if line.starts_with("FILE_SCHEMA") {
                if let Some(name) = extract_schema_name(line) {
                    schema = name;
                }
                continue;
            }

            match line {
                "DATA;" => {
                    in_data = true;
                    continue;
                }
                "ENDSEC;" => {
                    in_data = false;
                    continue;
                }
                _ => {}
            }

            if in_data && line.starts_with('#') {
                if let Some(entity) = parse_entity_line(line) {
                    index.insert(entity.id, entities.len());
                    entities.push(entity);
                }
            }
        }

        if entities.is_empty() && schema.is_empty() {
            return Err(ParseError::InvalidStep {
                message: "no FILE_SCHEMA and no DATA entities found".to_string(),
            });
        }

        Ok(StepFile {
            entities,
            index,
            schema,
        })
    }

    #[must_use]
    pub fn entity(&self, id: u64) -> Option<&StepEntity> {
        self.index.get(&id).map(|&i| &self.entities[i])
    }

    /// All entities of one type, in file order.
    pub fn entities_of_type<'a>(
        &'a self,
        entity_type: &'a str,
    ) -> impl Iterator<Item = &'a StepEntity> {
        self.entities
            .iter()
            .filter(move |e| e.entity_type == entity_type)
    }

    /// All entities in file order.
    pub fn entities(&self) -> impl Iterator<Item = &StepEntity> {
        self.entities.iter()
    }
}

fn extract_schema_name(line: &str) -> Option<String> {
    let start = line.find("('")? + 2;
    let len = line[start..].find('\'')?;
    Some(line[start..start + len].to_string())
}

// Format: #123=IFCWALL('guid',#ref,'name',...);
fn parse_entity_line(line: &str) -> Option<StepEntity> {
    let line = line.trim_end_matches(';');

    let eq_pos = line.find('=')?;
    let id: u64 = line[1..eq_pos].parse().ok()?;

    let body = line[eq_pos + 1..].trim();
    let paren_pos = body.find('(')?;
    let entity_type = body[..paren_pos].trim().to_string();
    let args = body.get(paren_pos + 1..body.len().checked_sub(1)?)?;

    Some(StepEntity {
        id,
        entity_type,
        values: parse_value_list(args),
    })
}

/// Split a comma-separated attribute list, respecting quoted strings and
/// nested parentheses, and parse each piece.
fn parse_value_list(s: &str) -> Vec<StepValue> {
    let mut values = Vec::new();
    let mut current = String::new();
    let mut in_string = false;
    let mut depth = 0u32;

    for ch in s.chars() {
        match ch {
            '\'' => {
                in_string = !in_string;
                current.push(ch);
            }
            '(' if !in_string => {
                depth += 1;
                current.push(ch);
            }
            ')' if !in_string => {
                depth = depth.saturating_sub(1);
                current.push(ch);
            }
            ',' if !in_string && depth == 0 => {
                values.push(parse_single_value(current.trim()));
                current.clear();
            }
            _ => current.push(ch),
        }
    }

    if !current.trim().is_empty() {
        values.push(parse_single_value(current.trim()));
    }

    values
}

fn parse_single_value(s: &str) -> StepValue {
    match s {
        "$" => return StepValue::Null,
        "*" => return StepValue::Derived,
        _ => {}
    }

    if let Some(id) = s.strip_prefix('#').and_then(|r| r.parse::<u64>().ok()) {
        return StepValue::Reference(id);
    }
    if s.len() >= 2 && s.starts_with('\'') && s.ends_with('\'') {
        return StepValue::String(decode_step_string(&s[1..s.len() - 1]));
    }
    if s.len() >= 2 && s.starts_with('.') && s.ends_with('.') {
        return match &s[1..s.len() - 1] {
            "T" => StepValue::Boolean(true),
            "F" => StepValue::Boolean(false),
            e => StepValue::Enum(e.to_string()),
        };
    }
    if s.starts_with('(') && s.ends_with(')') {
        return StepValue::List(parse_value_list(&s[1..s.len() - 1]));
    }
    if let Ok(i) = s.parse::<i64>() {
        return StepValue::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return StepValue::Real(f);
    }
    // Typed select like IFCLABEL('REI60') or IFCBOOLEAN(.T.)
    if let Some(open) = s.find('(') {
        if s.ends_with(')') {
            return parse_single_value(&s[open + 1..s.len() - 1]);
        }
    }

    StepValue::String(s.to_string())
}

/// Decode STEP-encoded string escapes: `\X2\..\X0\` (runs of 4-hex-digit
/// code points), `\X\NN` (ISO 8859-1 byte), `\S\c` (high-bit shift), `\\`
/// and `''`.
fn decode_step_string(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '\\' => match chars.peek() {
                Some('X') => {
                    chars.next();
                    decode_x_escape(&mut chars, &mut out);
                }
                Some('S') => {
                    chars.next();
                    chars.next(); // separating backslash
                    if let Some(c) = chars.next() {
                        out.push(((c as u8).wrapping_add(128)) as char);
                    }
                }
                Some('\\') => {
                    chars.next();
                    out.push('\\');
                }
                _ => out.push('\\'),
            },
            '\'' => {
                // '' is an escaped apostrophe
                if chars.peek() == Some(&'\'') {
                    chars.next();
                }
                out.push('\'');
            }
            _ => out.push(ch),
        }
    }

    out
}

fn decode_x_escape(chars: &mut std::iter::Peekable<std::str::Chars>, out: &mut String) {
    match chars.peek() {
        Some('2') => {
            chars.next();
            chars.next(); // opening backslash
            let mut hex = String::new();
            while let Some(&c) = chars.peek() {
                if c == '\\' {
                    break;
                }
                hex.push(c);
                chars.next();
            }
            // consume the \X0\ terminator
            for _ in 0..4 {
                chars.next();
            }
            for chunk in hex.as_bytes().chunks(4) {
                let code = std::str::from_utf8(chunk)
                    .ok()
                    .and_then(|s| u32::from_str_radix(s, 16).ok());
                if let Some(c) = code.and_then(char::from_u32) {
                    out.push(c);
                }
            }
        }
        // \X\NN - one ISO 8859-1 byte
        Some('\\') => {
            chars.next();
            let hex: String = chars.by_ref().take(2).collect();
            if let Ok(code) = u8::from_str_radix(&hex, 16) {
                out.push(code as char);
            }
        }
        _ => {
            out.push('\\');
            out.push('X');
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = "\
ISO-10303-21;
HEADER;
FILE_SCHEMA(('IFC4'));
ENDSEC;
DATA;
#1=IFCWALL('2O2Fr$t4X7Zf8NOew3FLOH',$,'Basic Wall',$,$,$,$,$,.ELEMENT.);
#2=IFCPROPERTYSINGLEVALUE('FireRating',$,IFCLABEL('REI60'),$);
#3=IFCPROPERTYSINGLEVALUE('LoadBearing',$,IFCBOOLEAN(.T.),$);
ENDSEC;
END-ISO-10303-21;
";

    #[test]
    fn parses_schema_and_entities_in_file_order() {
        let file = StepFile::parse(SAMPLE).unwrap();
        assert_eq!(file.schema, "IFC4");
        let ids: Vec<u64> = file.entities().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn resolves_entities_by_id() {
        let file = StepFile::parse(SAMPLE).unwrap();
        let wall = file.entity(1).unwrap();
        assert_eq!(wall.entity_type, "IFCWALL");
        assert_eq!(
            wall.values[0],
            StepValue::String("2O2Fr$t4X7Zf8NOew3FLOH".to_string())
        );
        assert_eq!(wall.values[1], StepValue::Null);
    }

    #[test]
    fn unwraps_typed_select_values() {
        let file = StepFile::parse(SAMPLE).unwrap();
        let prop = file.entity(2).unwrap();
        assert_eq!(prop.values[2], StepValue::String("REI60".to_string()));
        let flag = file.entity(3).unwrap();
        assert_eq!(flag.values[2], StepValue::Boolean(true));
    }

    #[test]
    fn parses_scalar_forms() {
        assert_eq!(parse_single_value("240."), StepValue::Real(240.0));
        assert_eq!(parse_single_value("12"), StepValue::Integer(12));
        assert_eq!(parse_single_value(".F."), StepValue::Boolean(false));
        assert_eq!(
            parse_single_value(".ELEMENT."),
            StepValue::Enum("ELEMENT".to_string())
        );
        assert_eq!(parse_single_value("#42"), StepValue::Reference(42));
        assert_eq!(
            parse_single_value("(#1,#2)"),
            StepValue::List(vec![StepValue::Reference(1), StepValue::Reference(2)])
        );
    }

    #[test]
    fn decodes_escaped_strings() {
        assert_eq!(decode_step_string("it''s"), "it's");
        assert_eq!(decode_step_string("a\\\\b"), "a\\b");
        assert_eq!(decode_step_string("\\X2\\0141\\X0\\ono"), "\u{141}ono");
        assert_eq!(decode_step_string("\\X\\E9tage"), "\u{e9}tage");
    }
}
