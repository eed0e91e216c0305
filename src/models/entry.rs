//! Entry boundary model for Hurl files.

/// A single runnable entry within a Hurl file.
///
/// An entry is a contiguous line range starting at a line whose trimmed text
/// begins with an HTTP method keyword and extending to the line before the
/// next such keyword (or the end of the file).
///
/// All fields are 1-based. Entries within a file are contiguous,
/// non-overlapping, and ordered by `start_line`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryRange {
    /// Line of the HTTP verb that opens this entry (1-based).
    pub start_line: usize,

    /// Last line belonging to this entry, inclusive (1-based).
    pub end_line: usize,

    /// Ordinal of this entry among all entries in the file, in document
    /// order (1-based). Matches the numbering hurl uses for
    /// `--from-entry`/`--to-entry`.
    pub entry_number: usize,
}

impl EntryRange {
    /// Returns true if the given 1-based line falls within this entry.
    pub fn contains_line(&self, line: usize) -> bool {
        line >= self.start_line && line <= self.end_line
    }

    /// Number of lines spanned by this entry.
    pub fn line_count(&self) -> usize {
        self.end_line - self.start_line + 1
    }
}
