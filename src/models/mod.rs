//! Core data structures for Hurl Runner.
//!
//! This module defines the types shared across the crate: entry boundaries
//! produced by the segmenter and the structured records reconstructed by the
//! trace parser.

pub mod entry;
pub mod trace;

pub use entry::EntryRange;
pub use trace::{TraceRecord, TraceResponse};
