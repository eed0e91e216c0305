//! JSON pretty-printing for response bodies.

use crate::formatter::FormatError;
use serde_json::Value;

/// Maximum body size to pretty-print (10MB). Larger bodies are displayed
/// raw to keep the result view responsive.
const MAX_JSON_FORMAT_SIZE: usize = 10 * 1024 * 1024;

/// Pretty-prints a JSON string with 2-space indentation.
///
/// # Arguments
///
/// * `json` - JSON text to format
///
/// # Returns
///
/// `Ok(String)` with the reformatted JSON, or `Err(FormatError)` if the
/// input is not valid JSON or exceeds the size limit. Callers fall back to
/// the raw text on error.
///
/// # Examples
///
/// ```
/// use hurl_runner::formatter::json::format_json_pretty;
///
/// let formatted = format_json_pretty(r#"{"name":"Alice","id":7}"#).unwrap();
/// assert!(formatted.contains("  \"name\": \"Alice\""));
/// ```
pub fn format_json_pretty(json: &str) -> Result<String, FormatError> {
    if json.len() > MAX_JSON_FORMAT_SIZE {
        return Err(FormatError::BodyTooLarge(json.len()));
    }

    let value: Value =
        serde_json::from_str(json).map_err(|e| FormatError::JsonError(e.to_string()))?;
    serde_json::to_string_pretty(&value).map_err(|e| FormatError::JsonError(e.to_string()))
}

/// Cheap check for whether a body is worth attempting to parse as JSON.
pub fn looks_like_json(body: &str) -> bool {
    let trimmed = body.trim_start();
    trimmed.starts_with('{') || trimmed.starts_with('[')
}
