//! Formatting of the timing durations reported in hurl's verbose trace.
//!
//! Hurl reports every timing as an integer microsecond count with a ` µs`
//! suffix. For display we scale to the largest unit that keeps the number
//! readable: seconds above one million microseconds, milliseconds above one
//! thousand, raw microseconds below that.

/// Formats a microsecond count as a human-readable duration.
///
/// # Examples
///
/// ```
/// use hurl_runner::trace::timing::format_duration;
///
/// assert_eq!(format_duration(2_500_000), "2.50 s");
/// assert_eq!(format_duration(10_000), "10.00 ms");
/// assert_eq!(format_duration(750), "750 µs");
/// ```
pub fn format_duration(microseconds: u64) -> String {
    if microseconds >= 1_000_000 {
        format!("{:.2} s", microseconds as f64 / 1_000_000.0)
    } else if microseconds >= 1_000 {
        format!("{:.2} ms", microseconds as f64 / 1_000.0)
    } else {
        format!("{} µs", microseconds)
    }
}

/// Formats one raw timing value from the trace.
///
/// Values carrying the trace's ` µs` suffix are converted with
/// [`format_duration`]; anything else (already formatted, or not a number)
/// is returned unchanged. This runs exactly once per record, when the
/// `total` timing closes the timings section, so already-converted values
/// are never reparsed.
pub fn format_timing_value(raw: &str) -> String {
    match raw.strip_suffix("µs") {
        Some(number) => match number.trim().parse::<u64>() {
            Ok(microseconds) => format_duration(microseconds),
            Err(_) => raw.to_string(),
        },
        None => raw.to_string(),
    }
}
