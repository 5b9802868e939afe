//! JSON output

use super::registry::{FormatError, Formatter};
use crate::odl::document::Document;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

pub const DEFAULT_JSON_INDENT: usize = 4;

/// Indented JSON. Non-finite floats are written as `null`.
pub struct JsonFormatter {
    indent: String,
}

impl JsonFormatter {
    pub fn new(indent: usize) -> Self {
        Self {
            indent: " ".repeat(indent),
        }
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new(DEFAULT_JSON_INDENT)
    }
}

impl Formatter for JsonFormatter {
    fn name(&self) -> &'static str {
        "json"
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        let mut buffer = Vec::new();
        let formatter = PrettyFormatter::with_indent(self.indent.as_bytes());
        let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
        doc.serialize(&mut serializer)
            .map_err(|e| FormatError::SerializationError(e.to_string()))?;
        String::from_utf8(buffer).map_err(|e| FormatError::SerializationError(e.to_string()))
    }

    fn description(&self) -> &'static str {
        "Indented JSON"
    }
}

pub struct CompactJsonFormatter;

impl Formatter for CompactJsonFormatter {
    fn name(&self) -> &'static str {
        "json-compact"
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        serde_json::to_string(doc).map_err(|e| FormatError::SerializationError(e.to_string()))
    }

    fn description(&self) -> &'static str {
        "Single-line JSON"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::odl::convert;

    #[test]
    fn test_json_indent() {
        let doc = convert("A = 1\nGROUP = G\nB = 'x'\nEND_GROUP = G\nEND").unwrap();
        let output = JsonFormatter::new(2).serialize(&doc).unwrap();

        assert_eq!(output, "{\n  \"A\": 1,\n  \"G\": {\n    \"B\": \"x\"\n  }\n}");
    }

    #[test]
    fn test_json_empty_document() {
        let doc = convert("END").unwrap();
        assert_eq!(JsonFormatter::default().serialize(&doc).unwrap(), "{}");
    }

    #[test]
    fn test_compact_json() {
        let doc = convert("FOO = 1; BAR = -0.5e1; END").unwrap();
        assert_eq!(
            CompactJsonFormatter.serialize(&doc).unwrap(),
            r#"{"FOO":1,"BAR":-5.0}"#
        );
    }

    #[test]
    fn test_non_finite_float_is_null() {
        let doc = convert("BIG = 1e999\nEND").unwrap();
        assert_eq!(CompactJsonFormatter.serialize(&doc).unwrap(), r#"{"BIG":null}"#);
    }
}
