//! Hurl Runner core.
//!
//! This crate is the editor-agnostic core of a Hurl integration: it lets an
//! editor map a cursor position to a runnable entry in a `.hurl` file,
//! manage the variables that flow into an execution, invoke the external
//! `hurl` binary, and turn its verbose output back into structured results.
//! The crate performs no networking of its own; all requests are executed
//! by hurl.
//!
//! # Architecture
//!
//! - **models**: Shared data structures (`EntryRange`, `TraceRecord`)
//! - **entry**: Maps cursor lines to entries and lists a file's entries
//! - **trace**: Parses hurl's verbose stderr + raw stdout into records
//! - **variables**: Layered variable store (env-file, inline, captured
//!   tiers) plus the `name=value` environment-file codec
//! - **runner**: Builds hurl invocations, runs them, and feeds captures
//!   back into the store
//! - **formatter**: Renders records for a result view, pretty-printing
//!   JSON bodies
//!
//! # Execution flow
//!
//! A frontend command ("run entry at cursor") composes the pieces like
//! this:
//!
//! 1. [`entry::locate_entry`] finds the entry under the cursor.
//! 2. [`variables::VariableStore::all_variables_for`] merges the env-file,
//!    captured, and inline variable tiers for the document.
//! 3. [`runner::execute`] runs hurl with `--from-entry`/`--to-entry`
//!    limited to that entry.
//! 4. [`trace::parse_trace`] reconstructs one record per executed entry
//!    from the two output streams.
//! 5. [`runner::apply_captures`] promotes captured values into the global
//!    tier so later entries and runs can use them.
//! 6. [`formatter::render_record`] produces the text shown in the result
//!    view.
//!
//! Only step 3 touches the outside world; everything before and after is
//! pure and synchronous, so the frontend can call it freely from its event
//! loop.

pub mod entry;
pub mod formatter;
pub mod models;
pub mod runner;
pub mod trace;
pub mod variables;

pub use entry::{locate_entry, scan_entries};
pub use models::{EntryRange, TraceRecord, TraceResponse};
pub use runner::{apply_captures, build_args, RunnerOptions, RunnerOutput};
pub use trace::parse_trace;
pub use variables::{VariableStore, VariableTier};
