//! Structured records reconstructed from hurl's verbose output.
//!
//! One `TraceRecord` is produced per executed entry. The records are built
//! from two separate streams: the verbose trace hurl writes to stderr
//! (request/response lines, timings, captures) and the raw response body it
//! writes to stdout. Only the last record of a run receives a body, because
//! hurl emits only the final entry's body on stdout.

use serde::Serialize;
use std::collections::HashMap;

/// The response half of an executed entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TraceResponse {
    /// Full status line as received, e.g. `HTTP/1.1 200 OK`.
    pub status: String,

    /// Response headers. Duplicate header names keep the last occurrence.
    pub headers: HashMap<String, String>,

    /// Response body. Populated only for the last record of a run, from the
    /// runner's raw output stream.
    pub body: String,
}

/// A structured record of one executed Hurl entry.
///
/// Built by [`crate::trace::parse_trace`] from the runner's verbose trace.
/// Serializes to JSON so editor frontends can render it directly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TraceRecord {
    /// HTTP method actually sent, e.g. `GET`.
    pub request_method: String,

    /// Request URL (or path, when taken from the `> GET /path` line).
    pub request_url: String,

    /// Request headers sent by the runner. Last occurrence of a duplicate
    /// name wins.
    pub request_headers: HashMap<String, String>,

    /// Response status, headers, and (for the last record) body.
    pub response: TraceResponse,

    /// Equivalent curl command reported by the runner, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub curl_command: Option<String>,

    /// Named timing durations, human-formatted (e.g. `total` -> `10.00 ms`).
    /// Empty when the trace carried no timings section.
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub timings: HashMap<String, String>,

    /// Values captured from the response, keyed by capture name. Empty when
    /// the trace carried no captures section.
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub captures: HashMap<String, String>,
}
