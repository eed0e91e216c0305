//! Layered variable store.
//!
//! Two tiers are keyed by document path (environment-file variables and
//! inline overrides); a third, process-wide tier holds values captured from
//! responses. The merged view for a document resolves collisions with the
//! precedence: inline > captured/global > environment-file.
//!
//! The store is plain owned state with no interior locking: all mutation is
//! expected to come from a single-threaded editor event loop. Construct one
//! per session and pass it by reference; tests construct a fresh store each.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// The two document-scoped variable tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableTier {
    /// Variables loaded from the environment file selected for a document.
    EnvFile,

    /// Ephemeral variables entered inline for a document. Highest
    /// precedence.
    Inline,
}

/// In-memory layered map of variables.
///
/// Lookups for unknown documents return empty maps and removals of unknown
/// names are silent no-ops; none of the accessors can fail.
#[derive(Debug, Clone, Default)]
pub struct VariableStore {
    env_file: HashMap<PathBuf, HashMap<String, String>>,
    inline: HashMap<PathBuf, HashMap<String, String>>,
    global: HashMap<String, String>,
}

impl VariableStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of one tier's variables for a document.
    pub fn tier_variables(&self, tier: VariableTier, path: &Path) -> HashMap<String, String> {
        self.tier_map(tier)
            .get(path)
            .cloned()
            .unwrap_or_default()
    }

    /// Replaces one tier's variables for a document wholesale.
    pub fn set_tier_variables(
        &mut self,
        tier: VariableTier,
        path: &Path,
        variables: HashMap<String, String>,
    ) {
        self.tier_map_mut(tier).insert(path.to_path_buf(), variables);
    }

    /// Adds or overwrites a single variable in one tier for a document.
    pub fn add_variable(&mut self, tier: VariableTier, path: &Path, name: &str, value: &str) {
        self.tier_map_mut(tier)
            .entry(path.to_path_buf())
            .or_default()
            .insert(name.to_string(), value.to_string());
    }

    /// Removes a variable from one tier for a document, if present.
    pub fn remove_variable(&mut self, tier: VariableTier, path: &Path, name: &str) {
        if let Some(variables) = self.tier_map_mut(tier).get_mut(path) {
            variables.remove(name);
        }
    }

    /// Returns a copy of the process-wide captured variables.
    pub fn global_variables(&self) -> HashMap<String, String> {
        self.global.clone()
    }

    /// Sets a captured variable, overwriting any previous value. Re-setting
    /// the same name is always valid; the latest write wins.
    pub fn set_global_variable(&mut self, name: &str, value: &str) {
        self.global.insert(name.to_string(), value.to_string());
    }

    /// Removes a captured variable, if present.
    pub fn remove_global_variable(&mut self, name: &str) {
        self.global.remove(name);
    }

    /// Computes the merged variable view for a document.
    ///
    /// Later layers override earlier ones on name collisions:
    /// environment-file first, then captured/global, then inline. This is
    /// the view the execution driver turns into `--variable` flags.
    ///
    /// # Examples
    ///
    /// ```
    /// use hurl_runner::variables::{VariableStore, VariableTier};
    /// use std::path::Path;
    ///
    /// let mut store = VariableStore::new();
    /// let path = Path::new("/tmp/api.hurl");
    /// store.add_variable(VariableTier::EnvFile, path, "host", "localhost");
    /// store.set_global_variable("host", "captured.example.com");
    /// store.add_variable(VariableTier::Inline, path, "host", "override.example.com");
    ///
    /// let merged = store.all_variables_for(path);
    /// assert_eq!(merged["host"], "override.example.com");
    /// ```
    pub fn all_variables_for(&self, path: &Path) -> HashMap<String, String> {
        let mut merged = self.tier_variables(VariableTier::EnvFile, path);
        merged.extend(self.global.clone());
        merged.extend(self.tier_variables(VariableTier::Inline, path));
        merged
    }

    fn tier_map(&self, tier: VariableTier) -> &HashMap<PathBuf, HashMap<String, String>> {
        match tier {
            VariableTier::EnvFile => &self.env_file,
            VariableTier::Inline => &self.inline,
        }
    }

    fn tier_map_mut(&mut self, tier: VariableTier) -> &mut HashMap<PathBuf, HashMap<String, String>> {
        match tier {
            VariableTier::EnvFile => &mut self.env_file,
            VariableTier::Inline => &mut self.inline,
        }
    }
}
