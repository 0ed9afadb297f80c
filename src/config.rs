//! Merge configuration loaded from `.github/automerge.toml`

use crate::error::{Error, Result};
use crate::types::MergeMethod;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

/// Default location of the configuration file, relative to the repository root.
pub const DEFAULT_CONFIG_PATH: &str = ".github/automerge.toml";

/// Rules the evaluator applies, plus how to merge once they pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MergeConfig {
    /// Labels that must all be applied
    #[serde(alias = "labels")]
    pub required_labels: BTreeSet<String>,
    /// Labels whose presence vetoes the merge
    pub blocking_labels: BTreeSet<String>,
    /// Whether an approving review is required
    pub review_required: bool,
    /// Whether CI checks must have passed
    pub checks_enabled: bool,
    /// Merge method for the final merge call
    pub merge_method: MergeMethod,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            required_labels: BTreeSet::new(),
            blocking_labels: BTreeSet::new(),
            review_required: true,
            checks_enabled: true,
            merge_method: MergeMethod::default(),
        }
    }
}

/// Parse configuration from TOML text.
pub fn parse_config(content: &str) -> Result<MergeConfig> {
    toml::from_str(content).map_err(|e| Error::Config(format!("failed to parse config: {e}")))
}

/// Load configuration from disk.
///
/// Returns the default `MergeConfig` if the file doesn't exist.
pub fn load_config(path: &Path) -> Result<MergeConfig> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return Ok(MergeConfig::default());
    }

    let content = fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("failed to read {}: {e}", path.display())))?;

    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("failed to parse {}: {e}", path.display())))
}
