//! Turning a prediction `output` into a single image URL.
use serde_json::Value;

use crate::error::{AppError, AppResult};

/// A non-empty array yields its first element; anything else is used
/// whole. Strings are taken as-is, other values in compact JSON form.
/// `null` means the prediction produced nothing usable.
pub fn extract_image_url(output: &Value) -> AppResult<String> {
    let chosen = match output {
        Value::Array(items) if !items.is_empty() => &items[0],
        other => other,
    };
    match chosen {
        Value::Null => Err(AppError::Provider("provider returned no output".to_string())),
        Value::String(s) => Ok(s.clone()),
        other => Ok(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn first_element_of_a_sequence() {
        let out = json!(["https://replicate.delivery/a.jpg", "https://replicate.delivery/b.jpg"]);
        assert_eq!(extract_image_url(&out).unwrap(), "https://replicate.delivery/a.jpg");
    }

    #[test]
    fn scalar_is_used_directly() {
        let out = json!("https://replicate.delivery/only.png");
        assert_eq!(extract_image_url(&out).unwrap(), "https://replicate.delivery/only.png");
    }

    #[test]
    fn non_string_values_are_stringified() {
        assert_eq!(extract_image_url(&json!([])).unwrap(), "[]");
        assert_eq!(extract_image_url(&json!({"url": "x"})).unwrap(), r#"{"url":"x"}"#);
        assert_eq!(extract_image_url(&json!([7])).unwrap(), "7");
    }

    #[test]
    fn null_output_is_a_provider_error() {
        assert!(matches!(extract_image_url(&Value::Null), Err(AppError::Provider(_))));
        assert!(matches!(extract_image_url(&json!([null])), Err(AppError::Provider(_))));
    }
}
