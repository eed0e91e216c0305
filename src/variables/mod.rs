//! Variable management for Hurl Runner.
//!
//! Variables reach a hurl invocation from three places: an environment file
//! the user picked for the document, inline values entered ad hoc in the
//! editor, and values captured from earlier responses. The [`store`] module
//! holds all three tiers and computes the merged view; [`env_file`] is the
//! codec for the `name=value` files backing the first tier.

pub mod env_file;
pub mod store;

pub use env_file::{load_env_file, parse_env_content, save_env_file, EnvFileError};
pub use store::{VariableStore, VariableTier};
