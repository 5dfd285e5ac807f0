use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An extraction payload from the remote agent, held verbatim.
///
/// The backend never validates or rewrites agent output; accessors only
/// project the two top-level keys of the agreed schema, treating absence
/// as null.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExtractedDocument(Value);

impl ExtractedDocument {
    pub const RAW_TEXT_KEY: &'static str = "raw_urdu_text";
    pub const STRUCTURED_DATA_KEY: &'static str = "fir_structured_data";

    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// The full OCR text; empty when the agent omitted the field.
    pub fn raw_text(&self) -> &str {
        self.0
            .get(Self::RAW_TEXT_KEY)
            .and_then(Value::as_str)
            .unwrap_or("")
    }

    /// The structured FIR mapping; `null` when the agent omitted the field.
    pub fn structured_data(&self) -> Value {
        self.0
            .get(Self::STRUCTURED_DATA_KEY)
            .cloned()
            .unwrap_or(Value::Null)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn projects_both_keys() {
        let doc = ExtractedDocument::new(json!({
            "raw_urdu_text": "متن",
            "fir_structured_data": {"fir_number": "123/24"},
        }));
        assert_eq!(doc.raw_text(), "متن");
        assert_eq!(doc.structured_data()["fir_number"], "123/24");
    }

    #[test]
    fn absent_fields_read_as_null() {
        let doc = ExtractedDocument::new(json!({}));
        assert_eq!(doc.raw_text(), "");
        assert_eq!(doc.structured_data(), Value::Null);
    }

    #[test]
    fn serializes_transparently() {
        let value = json!({"raw_urdu_text": "abc", "extra": 1});
        let doc = ExtractedDocument::new(value.clone());
        assert_eq!(serde_json::to_value(&doc).unwrap(), value);
    }
}
