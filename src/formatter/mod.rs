//! Rendering of parsed records for display.
//!
//! Editor frontends show one result view per run. [`render_record`] turns a
//! [`TraceRecord`] into the plain-text form of that view: status line,
//! response headers, body (pretty-printed when it is JSON), then the
//! timings, captures, and curl command when present.

pub mod json;

use crate::models::TraceRecord;
use std::collections::HashMap;

/// Errors that can occur while formatting a body for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// The body is not valid JSON.
    JsonError(String),

    /// The body exceeds the formatting size limit; contains the byte size.
    BodyTooLarge(usize),
}

impl std::fmt::Display for FormatError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FormatError::JsonError(msg) => write!(f, "Invalid JSON: {}", msg),
            FormatError::BodyTooLarge(size) => {
                write!(f, "Body too large to format ({} bytes)", size)
            }
        }
    }
}

impl std::error::Error for FormatError {}

/// Renders a parsed record as plain text for the result view.
///
/// JSON bodies are pretty-printed; anything that fails to parse is shown
/// raw. Header, timing, and capture names are sorted so the output is
/// stable.
pub fn render_record(record: &TraceRecord) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "{} {}\n",
        record.request_method, record.request_url
    ));
    out.push_str(&record.response.status);
    out.push('\n');

    push_map_section(&mut out, "Headers", &record.response.headers);

    if !record.response.body.is_empty() {
        out.push_str("\nBody:\n");
        out.push_str(&display_body(&record.response.body));
        out.push('\n');
    }

    push_map_section(&mut out, "Timings", &record.timings);
    push_map_section(&mut out, "Captures", &record.captures);

    if let Some(curl) = &record.curl_command {
        out.push_str("\nEquivalent command:\n");
        out.push_str(curl);
        out.push('\n');
    }

    out
}

/// Returns the body as it should be displayed: pretty-printed when it is
/// JSON, raw otherwise.
fn display_body(body: &str) -> String {
    if json::looks_like_json(body) {
        if let Ok(formatted) = json::format_json_pretty(body) {
            return formatted;
        }
    }
    body.to_string()
}

fn push_map_section(out: &mut String, title: &str, map: &HashMap<String, String>) {
    if map.is_empty() {
        return;
    }

    let mut names: Vec<&String> = map.keys().collect();
    names.sort();

    out.push('\n');
    out.push_str(title);
    out.push_str(":\n");
    for name in names {
        out.push_str(&format!("  {}: {}\n", name, map[name]));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TraceResponse;

    fn sample_record() -> TraceRecord {
        let mut record = TraceRecord {
            request_method: "GET".to_string(),
            request_url: "/api/users".to_string(),
            response: TraceResponse {
                status: "HTTP/1.1 200 OK".to_string(),
                body: r#"{"id":7,"name":"Alice"}"#.to_string(),
                ..Default::default()
            },
            curl_command: Some("curl 'https://example.com/api/users'".to_string()),
            ..Default::default()
        };
        record
            .response
            .headers
            .insert("Content-Type".to_string(), "application/json".to_string());
        record
            .timings
            .insert("total".to_string(), "10.00 ms".to_string());
        record
    }

    #[test]
    fn test_render_record_sections() {
        let rendered = render_record(&sample_record());

        assert!(rendered.starts_with("GET /api/users\nHTTP/1.1 200 OK\n"));
        assert!(rendered.contains("Headers:\n  Content-Type: application/json"));
        assert!(rendered.contains("Body:\n{\n  \"id\": 7,\n  \"name\": \"Alice\"\n}"));
        assert!(rendered.contains("Timings:\n  total: 10.00 ms"));
        assert!(rendered.contains("Equivalent command:\ncurl 'https://example.com/api/users'"));
    }

    #[test]
    fn test_render_record_omits_empty_sections() {
        let record = TraceRecord::default();
        let rendered = render_record(&record);

        assert!(!rendered.contains("Headers:"));
        assert!(!rendered.contains("Body:"));
        assert!(!rendered.contains("Timings:"));
        assert!(!rendered.contains("Captures:"));
        assert!(!rendered.contains("Equivalent command:"));
    }

    #[test]
    fn test_render_record_non_json_body_raw() {
        let mut record = sample_record();
        record.response.body = "<html><body>hi</body></html>".to_string();

        let rendered = render_record(&record);
        assert!(rendered.contains("Body:\n<html><body>hi</body></html>"));
    }

    #[test]
    fn test_render_record_malformed_json_falls_back_to_raw() {
        let mut record = sample_record();
        record.response.body = "{broken".to_string();

        let rendered = render_record(&record);
        assert!(rendered.contains("Body:\n{broken"));
    }
}
