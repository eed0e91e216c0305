//! Codec for `name=value` environment files.
//!
//! The environment-file variable tier is backed by plain text files: one
//! `name=value` pair per line, `#` starting a comment line, blank lines
//! ignored. The first `=` on a line is the delimiter, so values may contain
//! `=` themselves.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::Path;

/// Errors that can occur while reading or writing an environment file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvFileError {
    /// The file could not be read.
    ReadError(String),

    /// The file could not be written.
    WriteError(String),
}

impl std::fmt::Display for EnvFileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EnvFileError::ReadError(msg) => write!(f, "Failed to read env file: {}", msg),
            EnvFileError::WriteError(msg) => write!(f, "Failed to write env file: {}", msg),
        }
    }
}

impl std::error::Error for EnvFileError {}

/// Parses environment-file content into a variable map.
///
/// Lines without an `=`, blank lines, and `#` comment lines are ignored.
/// Names and values are trimmed. A later line with the same name overwrites
/// the earlier one.
///
/// # Examples
///
/// ```
/// use hurl_runner::variables::parse_env_content;
///
/// let content = "# staging\nhost=staging.example.com\ntoken = abc=123\n\n";
/// let vars = parse_env_content(content);
/// assert_eq!(vars["host"], "staging.example.com");
/// assert_eq!(vars["token"], "abc=123");
/// ```
pub fn parse_env_content(content: &str) -> HashMap<String, String> {
    let mut variables = HashMap::new();

    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        if let Some((name, value)) = trimmed.split_once('=') {
            let name = name.trim();
            if !name.is_empty() {
                variables.insert(name.to_string(), value.trim().to_string());
            }
        }
    }

    variables
}

/// Serializes a variable map to environment-file content.
///
/// Names are emitted in sorted order so saving is deterministic and diffs
/// stay readable.
pub fn serialize_env_content(variables: &HashMap<String, String>) -> String {
    let mut names: Vec<&String> = variables.keys().collect();
    names.sort();

    let mut content = String::new();
    for name in names {
        content.push_str(name);
        content.push('=');
        content.push_str(&variables[name]);
        content.push('\n');
    }
    content
}

/// Loads a variable map from an environment file on disk.
pub fn load_env_file(path: &Path) -> Result<HashMap<String, String>, EnvFileError> {
    let content = fs::read_to_string(path).map_err(read_error)?;
    Ok(parse_env_content(&content))
}

/// Saves a variable map to an environment file on disk, replacing its
/// previous content.
pub fn save_env_file(path: &Path, variables: &HashMap<String, String>) -> Result<(), EnvFileError> {
    fs::write(path, serialize_env_content(variables)).map_err(write_error)
}

fn read_error(err: io::Error) -> EnvFileError {
    EnvFileError::ReadError(err.to_string())
}

fn write_error(err: io::Error) -> EnvFileError {
    EnvFileError::WriteError(err.to_string())
}
