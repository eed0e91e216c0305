//! Invocation glue for the external `hurl` binary.
//!
//! This crate never performs networking itself; requests are executed by
//! shelling out to hurl in verbose mode and parsing the two streams it
//! produces (see [`crate::trace`]). This module builds the argument vector,
//! runs the process, writes selections to temp files so they can be executed
//! like files, and promotes parsed captures back into the variable store.

use crate::models::TraceRecord;
use crate::variables::VariableStore;
use std::collections::HashMap;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::Command;
use uuid::Uuid;

/// Name of the runner binary, resolved through `PATH`.
pub const HURL_BINARY: &str = "hurl";

/// Options for one hurl invocation.
#[derive(Debug, Clone, Default)]
pub struct RunnerOptions {
    /// The Hurl file to execute (a real file or a selection temp file).
    pub file_path: PathBuf,

    /// Environment file passed via `--variables-file`, if one is selected.
    pub env_file: Option<PathBuf>,

    /// Pre-merged variables passed as `--variable name=value` flags.
    pub variables: HashMap<String, String>,

    /// First entry to execute (1-based), for single-entry and
    /// run-from-here invocations.
    pub from_entry: Option<usize>,

    /// Last entry to execute (1-based, inclusive).
    pub to_entry: Option<usize>,
}

/// Both output streams of a finished hurl process.
///
/// A non-zero exit is data, not an error: the trace parser tolerates
/// partial streams, and the caller decides how to surface the failure.
#[derive(Debug, Clone)]
pub struct RunnerOutput {
    /// Raw response body stream (stdout).
    pub stdout: String,

    /// Verbose trace stream (stderr).
    pub stderr: String,

    /// Process exit code, if the process terminated normally.
    pub exit_code: Option<i32>,
}

impl RunnerOutput {
    /// True if the runner exited with code 0.
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Errors that can occur when invoking the runner.
#[derive(Debug)]
pub enum RunnerError {
    /// The hurl binary could not be spawned (missing from PATH, permission
    /// denied, ...).
    SpawnFailed(String),
}

impl std::fmt::Display for RunnerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunnerError::SpawnFailed(msg) => {
                write!(f, "Failed to run '{}': {}", HURL_BINARY, msg)
            }
        }
    }
}

impl std::error::Error for RunnerError {}

/// Builds the argument vector for a hurl invocation.
///
/// Always requests verbose mode, since the trace parser depends on it.
/// Variables are emitted in sorted name order so invocations are
/// deterministic and loggable.
///
/// # Examples
///
/// ```
/// use hurl_runner::runner::{build_args, RunnerOptions};
/// use std::path::PathBuf;
///
/// let options = RunnerOptions {
///     file_path: PathBuf::from("api.hurl"),
///     from_entry: Some(2),
///     to_entry: Some(2),
///     ..Default::default()
/// };
///
/// assert_eq!(
///     build_args(&options),
///     vec!["api.hurl", "--verbose", "--from-entry", "2", "--to-entry", "2"],
/// );
/// ```
pub fn build_args(options: &RunnerOptions) -> Vec<String> {
    let mut args = vec![
        options.file_path.to_string_lossy().into_owned(),
        "--verbose".to_string(),
    ];

    let mut names: Vec<&String> = options.variables.keys().collect();
    names.sort();
    for name in names {
        args.push("--variable".to_string());
        args.push(format!("{}={}", name, options.variables[name]));
    }

    if let Some(env_file) = &options.env_file {
        args.push("--variables-file".to_string());
        args.push(env_file.to_string_lossy().into_owned());
    }

    if let Some(from_entry) = options.from_entry {
        args.push("--from-entry".to_string());
        args.push(from_entry.to_string());
    }

    if let Some(to_entry) = options.to_entry {
        args.push("--to-entry".to_string());
        args.push(to_entry.to_string());
    }

    args
}

/// Runs hurl with the given options, capturing both streams.
///
/// Blocks until the process exits. Output bytes are decoded lossily, so a
/// response body with invalid UTF-8 degrades instead of failing the run.
pub fn execute(options: &RunnerOptions) -> Result<RunnerOutput, RunnerError> {
    let output = Command::new(HURL_BINARY)
        .args(build_args(options))
        .output()
        .map_err(|err| RunnerError::SpawnFailed(err.to_string()))?;

    Ok(RunnerOutput {
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        exit_code: output.status.code(),
    })
}

/// Writes selected editor text to a uniquely named temp file so it can be
/// executed like any other Hurl file.
///
/// The caller owns the file and should remove it after the run.
pub fn write_selection_file(content: &str) -> io::Result<PathBuf> {
    let path = std::env::temp_dir().join(format!("hurl-runner-{}.hurl", Uuid::new_v4()));
    let mut file = std::fs::File::create(&path)?;
    file.write_all(content.as_bytes())?;
    Ok(path)
}

/// Promotes every capture from a parsed run into the store's global tier.
///
/// Overwrites on name collision, so re-running an entry refreshes its
/// captures. This is how a value captured by one entry becomes available to
/// later entries and later runs.
pub fn apply_captures(store: &mut VariableStore, records: &[TraceRecord]) {
    for record in records {
        for (name, value) in &record.captures {
            store.set_global_variable(name, value);
        }
    }
}

/// Convenience wrapper: the merged variables for a document, as held by the
/// store, combined with the remaining invocation details.
pub fn options_for_document(
    store: &VariableStore,
    file_path: &Path,
    env_file: Option<PathBuf>,
    from_entry: Option<usize>,
    to_entry: Option<usize>,
) -> RunnerOptions {
    RunnerOptions {
        file_path: file_path.to_path_buf(),
        env_file,
        variables: store.all_variables_for(file_path),
        from_entry,
        to_entry,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_args_minimal() {
        let options = RunnerOptions {
            file_path: PathBuf::from("requests.hurl"),
            ..Default::default()
        };
        assert_eq!(build_args(&options), vec!["requests.hurl", "--verbose"]);
    }

    #[test]
    fn test_build_args_variables_sorted() {
        let mut variables = HashMap::new();
        variables.insert("zeta".to_string(), "2".to_string());
        variables.insert("alpha".to_string(), "1".to_string());

        let options = RunnerOptions {
            file_path: PathBuf::from("requests.hurl"),
            variables,
            ..Default::default()
        };

        assert_eq!(
            build_args(&options),
            vec![
                "requests.hurl",
                "--verbose",
                "--variable",
                "alpha=1",
                "--variable",
                "zeta=2",
            ],
        );
    }

    #[test]
    fn test_build_args_full() {
        let mut variables = HashMap::new();
        variables.insert("host".to_string(), "example.com".to_string());

        let options = RunnerOptions {
            file_path: PathBuf::from("requests.hurl"),
            env_file: Some(PathBuf::from(".env.staging")),
            variables,
            from_entry: Some(1),
            to_entry: Some(3),
        };

        assert_eq!(
            build_args(&options),
            vec![
                "requests.hurl",
                "--verbose",
                "--variable",
                "host=example.com",
                "--variables-file",
                ".env.staging",
                "--from-entry",
                "1",
                "--to-entry",
                "3",
            ],
        );
    }

    #[test]
    fn test_write_selection_file_round_trip() {
        let content = "GET https://example.com\n";
        let path = write_selection_file(content).unwrap();

        assert_eq!(path.extension().unwrap(), "hurl");
        assert_eq!(std::fs::read_to_string(&path).unwrap(), content);

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_write_selection_files_are_unique() {
        let first = write_selection_file("GET https://example.com\n").unwrap();
        let second = write_selection_file("GET https://example.com\n").unwrap();
        assert_ne!(first, second);

        std::fs::remove_file(&first).unwrap();
        std::fs::remove_file(&second).unwrap();
    }

    #[test]
    fn test_apply_captures_overwrites() {
        let mut store = VariableStore::new();

        let mut first = TraceRecord::default();
        first
            .captures
            .insert("token".to_string(), "old".to_string());
        let mut second = TraceRecord::default();
        second
            .captures
            .insert("token".to_string(), "new".to_string());
        second.captures.insert("id".to_string(), "7".to_string());

        apply_captures(&mut store, &[first, second]);

        let globals = store.global_variables();
        assert_eq!(globals["token"], "new");
        assert_eq!(globals["id"], "7");
    }

    #[test]
    fn test_options_for_document_uses_merged_view() {
        use crate::variables::VariableTier;

        let mut store = VariableStore::new();
        let path = PathBuf::from("/workspace/api.hurl");
        store.add_variable(VariableTier::EnvFile, &path, "host", "env");
        store.add_variable(VariableTier::Inline, &path, "host", "inline");

        let options = options_for_document(&store, &path, None, Some(2), Some(2));
        assert_eq!(options.variables["host"], "inline");
        assert_eq!(options.from_entry, Some(2));
    }

    #[test]
    fn test_runner_output_success() {
        let output = RunnerOutput {
            stdout: String::new(),
            stderr: String::new(),
            exit_code: Some(0),
        };
        assert!(output.success());

        let failed = RunnerOutput {
            exit_code: Some(3),
            ..output.clone()
        };
        assert!(!failed.success());
    }
}
