//! DTOs for link shortening endpoint.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Request to shorten a URL.
///
/// Every field is optional at the JSON level; missing values are reported by
/// the link service with the proper error kind instead of a decode failure.
#[derive(Debug, Default, Deserialize)]
pub struct ShortenRequest {
    /// The original URL to shorten (must be absolute HTTP/HTTPS).
    #[serde(default)]
    pub url: Option<String>,

    /// Validity in minutes, as a JSON number or a numeric string.
    #[serde(default)]
    pub validity: Option<Value>,

    /// Optional custom short code. An empty string means "generate one".
    #[serde(default)]
    pub shortcode: Option<String>,
}

impl ShortenRequest {
    /// Interprets `validity` as minutes.
    ///
    /// - absent or `null` → `None` (service default applies)
    /// - number → its value
    /// - string → parsed after trimming; blank counts as `0`
    /// - anything unparsable → `NaN`, reported as not a number
    pub fn validity_minutes(&self) -> Option<f64> {
        match self.validity.as_ref()? {
            Value::Null => None,
            Value::Number(n) => Some(n.as_f64().unwrap_or(f64::NAN)),
            Value::String(s) => {
                let s = s.trim();
                if s.is_empty() {
                    Some(0.0)
                } else {
                    Some(s.parse::<f64>().unwrap_or(f64::NAN))
                }
            }
            _ => Some(f64::NAN),
        }
    }
}

/// Successful creation response.
#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    pub shortlink: String,
    pub expiry: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(body: Value) -> ShortenRequest {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn test_validity_absent_or_null() {
        assert_eq!(request(json!({})).validity_minutes(), None);
        assert_eq!(request(json!({ "validity": null })).validity_minutes(), None);
    }

    #[test]
    fn test_validity_number_and_numeric_string() {
        assert_eq!(request(json!({ "validity": 5 })).validity_minutes(), Some(5.0));
        assert_eq!(request(json!({ "validity": 0.5 })).validity_minutes(), Some(0.5));
        assert_eq!(request(json!({ "validity": "15" })).validity_minutes(), Some(15.0));
        assert_eq!(request(json!({ "validity": " 2.5 " })).validity_minutes(), Some(2.5));
    }

    #[test]
    fn test_validity_non_numeric_is_nan() {
        for body in [
            json!({ "validity": "abc" }),
            json!({ "validity": true }),
            json!({ "validity": [1] }),
            json!({ "validity": { "minutes": 1 } }),
        ] {
            let minutes = request(body).validity_minutes();
            assert!(minutes.is_some_and(f64::is_nan));
        }
    }

    #[test]
    fn test_validity_blank_string_is_zero() {
        assert_eq!(request(json!({ "validity": "" })).validity_minutes(), Some(0.0));
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let req = request(json!({ "url": "https://example.com", "extra": 1 }));
        assert_eq!(req.url.as_deref(), Some("https://example.com"));
        assert!(req.shortcode.is_none());
    }
}
