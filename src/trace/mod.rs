//! Parser for hurl's verbose trace output.
//!
//! When hurl runs with `--verbose` it writes a line-oriented diagnostic
//! trace to stderr and the final entry's response body to stdout. Per the
//! hurl manual, a line starting with `>` is data sent, a line starting with
//! `<` is data received, and a line starting with `*` is additional
//! information. This module reconstructs one [`TraceRecord`] per executed
//! entry from those two streams.
//!
//! The parser never fails: malformed lines are skipped individually and an
//! empty trace simply yields no records, so a crashed runner's partial
//! output still parses.

pub mod timing;

use crate::models::TraceRecord;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

/// Marker opening a new record in the trace.
const ENTRY_MARKER: &str = "* Executing entry";

/// Marker carrying the request summary (`* Request:` followed by method and
/// URL on the same line in some hurl versions).
const REQUEST_MARKER: &str = "* Request:";

/// Marker carrying the equivalent curl command.
const CURL_MARKER: &str = "* curl";

/// Marker opening the timings section.
const TIMINGS_MARKER: &str = "* Timings:";

/// Marker opening the captures section.
const CAPTURES_MARKER: &str = "* Captures:";

/// Matches a one-line request summary, capturing method and URL.
static REQUEST_SUMMARY_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\* Request:\s*\* (\w+) (.*)").expect("Failed to compile request summary regex")
});

/// Section the parser is currently collecting.
///
/// The trace interleaves free-form info lines with two line-run sections
/// (timings, captures) that are only recognizable by the marker that opened
/// them. Tracking the section explicitly keeps the "which lines belong to
/// what" decision in one place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    /// No record has been opened yet.
    Idle,

    /// Inside a record, outside any line-run section.
    InRecord,

    /// Collecting timing lines; ends when the `total` timing is seen.
    InTimings,

    /// Collecting capture lines; ends at the first blank line.
    InCaptures,
}

/// Parses hurl's verbose trace and raw output into structured records.
///
/// `trace` is the stderr-side diagnostic stream; `raw_output` is the
/// stdout-side body stream. Records are returned in the order their
/// `* Executing entry` markers appeared. The trimmed `raw_output` becomes
/// the body of the **last** record only, since hurl prints only the final
/// entry's body.
///
/// # Examples
///
/// ```
/// use hurl_runner::trace::parse_trace;
///
/// let trace = "* Executing entry 1\n> GET /api HTTP/1.1\n> Host: example.com\n< HTTP/1.1 200 OK\n";
/// let records = parse_trace(trace, "{\"ok\": true}");
///
/// assert_eq!(records.len(), 1);
/// assert_eq!(records[0].request_method, "GET");
/// assert_eq!(records[0].response.status, "HTTP/1.1 200 OK");
/// assert_eq!(records[0].response.body, "{\"ok\": true}");
/// ```
pub fn parse_trace(trace: &str, raw_output: &str) -> Vec<TraceRecord> {
    let mut records: Vec<TraceRecord> = Vec::new();
    let mut current: Option<TraceRecord> = None;
    let mut state = ParseState::Idle;

    for line in trace.split('\n') {
        if line.starts_with(ENTRY_MARKER) {
            if let Some(record) = current.take() {
                records.push(record);
            }
            current = Some(TraceRecord::default());
            state = ParseState::InRecord;
        } else if line.starts_with(REQUEST_MARKER) {
            if let (Some(record), Some(caps)) =
                (current.as_mut(), REQUEST_SUMMARY_REGEX.captures(line))
            {
                record.request_method = caps[1].to_string();
                record.request_url = caps[2].to_string();
            }
        } else if line.starts_with(CURL_MARKER) {
            if let Some(record) = current.as_mut() {
                record.curl_command = Some(line[2..].trim().to_string());
            }
        } else if let Some(content) = line.strip_prefix("> ") {
            if let Some(record) = current.as_mut() {
                parse_request_line(record, content);
            }
        } else if let Some(content) = line.strip_prefix("< ") {
            if let Some(record) = current.as_mut() {
                parse_response_line(record, content);
            }
        } else if line.starts_with(TIMINGS_MARKER) {
            if current.is_some() {
                state = ParseState::InTimings;
            }
        } else if line.starts_with(CAPTURES_MARKER) {
            if current.is_some() {
                state = ParseState::InCaptures;
            }
        } else if state == ParseState::InTimings && !line.trim().is_empty() {
            if let Some(record) = current.as_mut() {
                if parse_timing_line(record, line) {
                    state = ParseState::InRecord;
                }
            }
        } else if state == ParseState::InCaptures {
            if line.trim().is_empty() {
                state = ParseState::InRecord;
            } else if let Some(record) = current.as_mut() {
                parse_capture_line(record, line);
            }
        }
        // Everything else is informational noise.
    }

    if let Some(record) = current.take() {
        records.push(record);
    }

    if let Some(last) = records.last_mut() {
        last.response.body = raw_output.trim().to_string();
    }

    records
}

/// Handles one `> ` (request direction) line.
///
/// A line like `GET /api HTTP/1.1` overwrites method and URL; anything else
/// is treated as a `Name: value` header.
fn parse_request_line(record: &mut TraceRecord, content: &str) {
    let is_request_line = ["GET ", "POST ", "PUT ", "DELETE "]
        .iter()
        .any(|prefix| content.starts_with(prefix));

    if is_request_line {
        let mut tokens = content.split(' ');
        if let (Some(method), Some(url)) = (tokens.next(), tokens.next()) {
            record.request_method = method.to_string();
            record.request_url = url.to_string();
        }
    } else if let Some((name, value)) = split_key_value(content) {
        record.request_headers.insert(name, value);
    }
}

/// Handles one `< ` (response direction) line.
///
/// The status line (`HTTP/...`) is stored verbatim; anything else is a
/// header.
fn parse_response_line(record: &mut TraceRecord, content: &str) {
    if content.starts_with("HTTP/") {
        record.response.status = content.to_string();
    } else if let Some((name, value)) = split_key_value(content) {
        record.response.headers.insert(name, value);
    }
}

/// Handles one line inside the timings section.
///
/// Returns `true` when this line was the `total` timing, which closes the
/// section and triggers the one-shot formatting pass over the collected
/// values. The `begin`/`end` timestamps are dropped.
fn parse_timing_line(record: &mut TraceRecord, line: &str) -> bool {
    let cleaned = line.strip_prefix("* ").unwrap_or(line);
    let Some((name, value)) = split_key_value(cleaned) else {
        return false;
    };

    if name != "begin" && name != "end" {
        record.timings.insert(name.clone(), value);
    }

    if name == "total" {
        format_collected_timings(&mut record.timings);
        return true;
    }
    false
}

/// Converts every raw timing value in place. Runs once per record.
fn format_collected_timings(timings: &mut HashMap<String, String>) {
    for value in timings.values_mut() {
        let formatted = timing::format_timing_value(value);
        *value = formatted;
    }
}

/// Handles one line inside the captures section.
fn parse_capture_line(record: &mut TraceRecord, line: &str) {
    let cleaned = line.strip_prefix("* ").unwrap_or(line);
    if let Some((name, value)) = split_key_value(cleaned) {
        record.captures.insert(name, value);
    }
}

/// Splits a `key: value` line on the first colon, trimming both sides.
///
/// Returns `None` for lines with no colon, an empty key, or nothing after
/// the colon; such lines are skipped without affecting the record.
fn split_key_value(content: &str) -> Option<(String, String)> {
    let (key, value) = content.split_once(':')?;
    let key = key.trim();
    let value = value.trim();
    if key.is_empty() || value.is_empty() {
        return None;
    }
    Some((key.to_string(), value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_streams_yield_no_records() {
        assert!(parse_trace("", "").is_empty());
    }

    #[test]
    fn test_single_entry_request_and_response() {
        let trace = "\
* Executing entry 1
* Request:
* GET https://example.com/api
* curl 'https://example.com/api'
> GET /api HTTP/1.1
> Host: example.com
> Accept: */*
>
< HTTP/1.1 200 OK
< Content-Type: application/json
<
";
        let records = parse_trace(trace, "{\"message\": \"hi\"}");
        assert_eq!(records.len(), 1);

        let record = &records[0];
        // The `>` request line overrides the summary.
        assert_eq!(record.request_method, "GET");
        assert_eq!(record.request_url, "/api");
        assert_eq!(record.request_headers["Host"], "example.com");
        assert_eq!(record.request_headers["Accept"], "*/*");
        assert_eq!(record.response.status, "HTTP/1.1 200 OK");
        assert_eq!(record.response.headers["Content-Type"], "application/json");
        assert_eq!(record.response.body, "{\"message\": \"hi\"}");
        assert_eq!(
            record.curl_command.as_deref(),
            Some("curl 'https://example.com/api'")
        );
    }

    #[test]
    fn test_request_summary_used_when_no_request_lines() {
        let trace = "* Executing entry 1\n* Request:  * POST https://example.com/users\n";
        let records = parse_trace(trace, "");
        assert_eq!(records[0].request_method, "POST");
        assert_eq!(records[0].request_url, "https://example.com/users");
    }

    #[test]
    fn test_header_value_containing_colons() {
        let trace = "* Executing entry 1\n> Referer: https://example.com:8080/path\n";
        let records = parse_trace(trace, "");
        assert_eq!(
            records[0].request_headers["Referer"],
            "https://example.com:8080/path"
        );
    }

    #[test]
    fn test_duplicate_header_last_wins() {
        let trace = "\
* Executing entry 1
< HTTP/1.1 200 OK
< Set-Cookie: a=1
< Set-Cookie: b=2
";
        let records = parse_trace(trace, "");
        assert_eq!(records[0].response.headers["Set-Cookie"], "b=2");
    }

    #[test]
    fn test_malformed_header_lines_skipped() {
        let trace = "\
* Executing entry 1
> NoColonHere
> EmptyValue:
> Good: yes
< HTTP/1.1 200 OK
< :
";
        let records = parse_trace(trace, "");
        let record = &records[0];
        assert_eq!(record.request_headers.len(), 1);
        assert_eq!(record.request_headers["Good"], "yes");
        assert!(record.response.headers.is_empty());
    }

    #[test]
    fn test_timings_converted_once_at_total() {
        let trace = "\
* Executing entry 1
* Timings:
* begin: 2024-01-01T00:00:00Z
* namelookup: 1000 µs
* connect: 2000 µs
* total: 10000 µs
*
* after: should not be parsed as timing
";
        let records = parse_trace(trace, "");
        let timings = &records[0].timings;

        assert_eq!(timings["namelookup"], "1.00 ms");
        assert_eq!(timings["connect"], "2.00 ms");
        assert_eq!(timings["total"], "10.00 ms");
        assert!(!timings.contains_key("begin"));
        assert!(!timings.contains_key("after"));
    }

    #[test]
    fn test_timings_seconds_and_microseconds() {
        let trace = "\
* Executing entry 1
* Timings:
* app_connect: 500 µs
* total: 1500000 µs
";
        let records = parse_trace(trace, "");
        assert_eq!(records[0].timings["app_connect"], "500 µs");
        assert_eq!(records[0].timings["total"], "1.50 s");
    }

    #[test]
    fn test_captures_end_at_blank_line() {
        let trace = "\
* Executing entry 1
* Captures:
* id: 12345
* name: Example

* token: not-captured
";
        let records = parse_trace(trace, "");
        let captures = &records[0].captures;
        assert_eq!(captures.len(), 2);
        assert_eq!(captures["id"], "12345");
        assert_eq!(captures["name"], "Example");
    }

    #[test]
    fn test_captures_skip_separator_lines() {
        let trace = "\
* Executing entry 1
* Captures:
* id: 12345
* ------------------------------------------------------------------------------
";
        let records = parse_trace(trace, "");
        assert_eq!(records[0].captures.len(), 1);
    }

    #[test]
    fn test_multiple_entries_ordered_and_body_on_last() {
        let trace = "\
* Executing entry 1
> GET /first HTTP/1.1
< HTTP/1.1 200 OK
* Executing entry 2
> POST /second HTTP/1.1
< HTTP/1.1 201 Created
";
        let records = parse_trace(trace, "created");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].request_url, "/first");
        assert_eq!(records[1].request_url, "/second");
        assert_eq!(records[0].response.body, "");
        assert_eq!(records[1].response.body, "created");
    }

    #[test]
    fn test_body_trimmed() {
        let trace = "* Executing entry 1\n";
        let records = parse_trace(trace, "\n  {\"a\": 1}\n\n");
        assert_eq!(records[0].response.body, "{\"a\": 1}");
    }

    #[test]
    fn test_no_records_means_body_dropped() {
        // Raw output with no entries in the trace has nowhere to go.
        assert!(parse_trace("noise only\n", "body").is_empty());
    }

    #[test]
    fn test_timings_marker_closes_captures_section() {
        let trace = "\
* Executing entry 1
* Captures:
* id: 12345
* Timings:
* total: 1000 µs
";
        let records = parse_trace(trace, "");
        assert_eq!(records[0].captures.len(), 1);
        assert_eq!(records[0].timings["total"], "1.00 ms");
    }
}
