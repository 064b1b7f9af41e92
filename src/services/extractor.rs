//! Structured JSON extraction
//!
//! Recovers the JSON object a model embeds in free-form text. Absence is a
//! normal outcome and is reported as `None`, never as an error.

use serde::de::DeserializeOwned;
use serde_json::Value;

/// Parse the first balanced `{...}` region of `text`
///
/// Depth counting starts at the first `{` and the candidate ends where depth
/// returns to zero. Braces inside JSON strings are counted too. Anything after
/// the closing brace is ignored.
pub fn extract_structured_json(text: &str) -> Option<Value> {
    let start = text.find('{')?;
    let mut depth = 0usize;

    for (offset, byte) in text.as_bytes()[start..].iter().enumerate() {
        match byte {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    let candidate = &text[start..=start + offset];
                    return serde_json::from_str(candidate).ok();
                }
            }
            _ => {}
        }
    }

    None
}

/// Like [`extract_structured_json`] for an arbitrary JSON value; non-strings yield `None`
pub fn extract_structured_value(value: &Value) -> Option<Value> {
    value.as_str().and_then(extract_structured_json)
}

/// Extract and deserialize into `T`; a shape mismatch also yields `None`
pub fn extract_structured<T: DeserializeOwned>(text: &str) -> Option<T> {
    extract_structured_json(text).and_then(|value| serde_json::from_value(value).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RouteRecommendation;
    use serde_json::json;

    #[test]
    fn test_nested_object_with_trailing_text() {
        let text = r#"here is data: {"a":1, "b":{"c":2}} trailing text"#;
        assert_eq!(extract_structured_json(text), Some(json!({"a": 1, "b": {"c": 2}})));
    }

    #[test]
    fn test_not_found_cases() {
        assert_eq!(extract_structured_json("{a:1"), None);
        assert_eq!(extract_structured_json("no braces here"), None);
        assert_eq!(extract_structured_json(""), None);
        assert_eq!(extract_structured_json("} {"), None);
    }

    #[test]
    fn test_first_region_only() {
        assert_eq!(extract_structured_json(r#"{"x":1}{"y":2}"#), Some(json!({"x": 1})));
    }

    #[test]
    fn test_invalid_first_region_is_not_retried() {
        // the first balanced region is not JSON, later valid JSON is ignored
        assert_eq!(extract_structured_json(r#"{oops} then {"y":2}"#), None);
    }

    #[test]
    fn test_brace_inside_string_cuts_candidate() {
        assert_eq!(extract_structured_json(r#"{"a":"}"}"#), None);
    }

    #[test]
    fn test_multibyte_text_around_object() {
        let text = "Route → Aluva ₹240 {\"mode\":\"metro\"} ✓";
        assert_eq!(extract_structured_json(text), Some(json!({"mode": "metro"})));
    }

    #[test]
    fn test_non_string_value() {
        assert_eq!(extract_structured_value(&json!(42)), None);
        assert_eq!(extract_structured_value(&Value::Null), None);
        assert_eq!(
            extract_structured_value(&json!("x {\"k\":true}")),
            Some(json!({"k": true}))
        );
    }

    #[test]
    fn test_typed_extraction() {
        let text = r#"Take the metro.
{"best_route_index": 0, "recommended_mode": "metro", "estimated_time_minutes": 25, "estimated_cost": 40.5, "explanation": "fastest"}"#;

        let rec: RouteRecommendation = extract_structured(text).unwrap();
        assert_eq!(rec.best_route_index, Some(0));
        assert_eq!(rec.recommended_mode.as_deref(), Some("metro"));
        assert_eq!(rec.estimated_time_minutes, Some(25.0));

        assert!(extract_structured::<Vec<u32>>(text).is_none());
    }
}
