//! Entry detection for Hurl files.
//!
//! A Hurl file holds one or more entries, each opened by a line whose
//! trimmed text starts with an HTTP method keyword. This module maps a
//! cursor line to its enclosing entry ([`locate_entry`]) and lists every
//! entry in a file ([`scan_entries`]), which is what "run from here" and
//! "run whole file" commands are built on.
//!
//! Line numbers and entry ordinals are 1-based throughout, matching both
//! editor conventions and hurl's `--from-entry`/`--to-entry` numbering.

use crate::models::EntryRange;

/// HTTP method keywords that open a new entry.
///
/// A keyword only counts at the start of a line (after trimming); a method
/// name appearing mid-line, e.g. inside a comment, never opens an entry.
pub const HTTP_METHODS: &[&str] = &[
    "GET", "POST", "PUT", "DELETE", "PATCH", "HEAD", "OPTIONS", "TRACE", "CONNECT",
];

/// Returns the 1-based line numbers of all verb lines in the file, in order.
fn find_verb_lines(content: &str) -> Vec<usize> {
    content
        .split('\n')
        .enumerate()
        .filter_map(|(index, line)| {
            let trimmed = line.trim();
            if HTTP_METHODS.iter().any(|method| trimmed.starts_with(method)) {
                Some(index + 1)
            } else {
                None
            }
        })
        .collect()
}

/// Lists every entry in the file, in document order.
///
/// Each entry runs from its verb line to the line before the next verb line;
/// the last entry runs to the end of the file. Returns an empty vector for a
/// file with no verb lines.
///
/// # Examples
///
/// ```
/// use hurl_runner::entry::scan_entries;
///
/// let content = "GET https://example.com/a\n\nPOST https://example.com/b\nContent-Type: application/json\n";
/// let entries = scan_entries(content);
/// assert_eq!(entries.len(), 2);
/// assert_eq!(entries[0].start_line, 1);
/// assert_eq!(entries[0].end_line, 2);
/// assert_eq!(entries[1].start_line, 3);
/// ```
pub fn scan_entries(content: &str) -> Vec<EntryRange> {
    let verb_lines = find_verb_lines(content);
    let total_lines = content.split('\n').count();

    verb_lines
        .iter()
        .enumerate()
        .map(|(index, &start_line)| {
            let end_line = match verb_lines.get(index + 1) {
                Some(&next_start) => next_start - 1,
                None => total_lines,
            };
            EntryRange {
                start_line,
                end_line,
                entry_number: index + 1,
            }
        })
        .collect()
}

/// Finds the entry enclosing the given 1-based line.
///
/// Returns `None` when the file has no entries or the line precedes the
/// first verb line. Both are normal outcomes, not errors; a "not found" here
/// typically surfaces as a "no entry at cursor" message, not a failure.
///
/// A query on the verb line itself selects that entry: boundaries are
/// inclusive of the verb line.
///
/// # Examples
///
/// ```
/// use hurl_runner::entry::locate_entry;
///
/// let content = "# auth\nGET https://example.com/login\n\nGET https://example.com/me\n";
/// let entry = locate_entry(content, 3).unwrap();
/// assert_eq!(entry.entry_number, 1);
/// assert_eq!(entry.start_line, 2);
/// assert_eq!(entry.end_line, 3);
///
/// // Line 1 is a comment before the first entry.
/// assert!(locate_entry(content, 1).is_none());
/// ```
pub fn locate_entry(content: &str, line: usize) -> Option<EntryRange> {
    scan_entries(content)
        .into_iter()
        .find(|entry| entry.contains_line(line))
}

/// Number of entries in the file.
pub fn entry_count(content: &str) -> usize {
    find_verb_lines(content).len()
}
