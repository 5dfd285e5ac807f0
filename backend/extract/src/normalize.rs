//! Agent payload normalization.
//!
//! The cloud agent is supposed to return a mapping with `raw_urdu_text` and
//! `fir_structured_data`, but it may hand back JSON-encoded text, a bare
//! scalar, or nothing at all. This module shapes all of those into the
//! two-key form the caller is guaranteed, without ever touching the content.

use serde_json::{json, Value};

use firlens_core::{AgentResult, ExtractedDocument, FirlensError};

/// Normalize a raw agent payload into an [`ExtractedDocument`].
///
/// - empty payload (absent, null, `""`, `{}`, `[]`, `0`, `false`) →
///   [`FirlensError::EmptyResult`]
/// - JSON-encoded text → decoded, decode failure →
///   [`FirlensError::MalformedResponse`]
/// - a decoded non-mapping → wrapped as
///   `{"raw_urdu_text": <stringified>, "fir_structured_data": null}`
pub fn normalize_payload(result: AgentResult) -> Result<ExtractedDocument, FirlensError> {
    let data = match result.data {
        Some(data) if !is_empty_payload(&data) => data,
        _ => return Err(FirlensError::EmptyResult),
    };

    let decoded = match data {
        Value::String(text) => serde_json::from_str(&text)
            .map_err(|e| FirlensError::MalformedResponse(e.to_string()))?,
        other => other,
    };

    let value = match decoded {
        mapping @ Value::Object(_) => mapping,
        other => json!({
            "raw_urdu_text": stringify(&other),
            "fir_structured_data": Value::Null,
        }),
    };

    Ok(ExtractedDocument::new(value))
}

/// Payloads the reference backend treats as "nothing was extracted".
fn is_empty_payload(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(value: Value) -> AgentResult {
        AgentResult { data: Some(value) }
    }

    #[test]
    fn mapping_passes_through_verbatim() {
        let doc = normalize_payload(payload(json!({
            "raw_urdu_text": "متن",
            "fir_structured_data": {"fir_number": "77/24"},
            "unexpected_extra": [1, 2],
        })))
        .unwrap();
        assert_eq!(doc.raw_text(), "متن");
        assert_eq!(doc.as_value()["unexpected_extra"], json!([1, 2]));
    }

    #[test]
    fn json_text_is_decoded() {
        let doc = normalize_payload(payload(json!(
            r#"{"raw_urdu_text": "abc", "fir_structured_data": null}"#
        )))
        .unwrap();
        assert_eq!(doc.raw_text(), "abc");
        assert_eq!(doc.structured_data(), Value::Null);
    }

    #[test]
    fn undecodable_text_is_malformed() {
        let err = normalize_payload(payload(json!("raw_urdu_text: not json"))).unwrap_err();
        assert!(matches!(err, FirlensError::MalformedResponse(_)));
    }

    #[test]
    fn non_mapping_is_wrapped_not_rejected() {
        let doc = normalize_payload(payload(json!(42))).unwrap();
        assert_eq!(doc.raw_text(), "42");
        assert_eq!(doc.structured_data(), Value::Null);
    }

    #[test]
    fn decoded_array_is_wrapped() {
        let doc = normalize_payload(payload(json!("[1, 2]"))).unwrap();
        assert_eq!(doc.raw_text(), "[1,2]");
    }

    #[test]
    fn empty_payloads_are_rejected() {
        for value in [json!(null), json!(""), json!({}), json!([]), json!(0), json!(false)] {
            let err = normalize_payload(payload(value)).unwrap_err();
            assert!(matches!(err, FirlensError::EmptyResult));
        }
        let err = normalize_payload(AgentResult { data: None }).unwrap_err();
        assert!(matches!(err, FirlensError::EmptyResult));
    }
}
