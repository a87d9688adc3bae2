//! Export settings persisted as a small JSON file.
//!
//! Stands in for the host platform's option store: a handful of named
//! scalars (`debug`, `output_dir`, `force`) that survive restarts. A
//! missing file or missing fields fall back to defaults rather than
//! failing, and the loaded struct is passed explicitly to the export job
//! rather than read through any process-wide state.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::Result;
use crate::files::normalize_path;

/// Base directory all configured output fragments are rooted under.
const DEFAULT_OUTPUT_BASE: &str = "admin-files";

/// The persisted settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Debug mode: verbose stage logging and the all-history date window.
    pub debug: bool,
    /// Base directory workbooks land under (the host upload area in the
    /// original deployment).
    pub base_dir: String,
    /// Output directory fragment, rooted under the base. Empty means the
    /// base directory itself.
    pub output_dir: String,
    /// One-shot flag requesting an immediate run; cleared on consumption.
    pub force: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debug: false,
            base_dir: DEFAULT_OUTPUT_BASE.to_string(),
            output_dir: String::new(),
            force: false,
        }
    }
}

impl Settings {
    /// Resolved output directory: the configured fragment under the base,
    /// with separators normalized.
    pub fn output_path(&self) -> String {
        normalize_path(&format!("{}/{}", self.base_dir, self.output_dir))
    }
}

/// Loads settings from `path`. A missing file yields the defaults.
///
/// # Errors
///
/// Returns [`TallysheetError::Json`](crate::TallysheetError::Json) if the
/// file exists but does not parse, or
/// [`TallysheetError::Io`](crate::TallysheetError::Io) if it cannot be read.
pub fn load_settings(path: &Path) -> Result<Settings> {
    if !path.exists() {
        return Ok(Settings::default());
    }

    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

/// Writes settings to `path` as pretty-printed JSON.
pub fn save_settings(path: &Path, settings: &Settings) -> Result<()> {
    let raw = serde_json::to_string_pretty(settings)?;
    std::fs::write(path, raw)?;
    Ok(())
}

/// Reads and clears the one-shot force flag, returning whether it was set.
pub fn consume_force(path: &Path) -> Result<bool> {
    let mut settings = load_settings(path)?;
    if !settings.force {
        return Ok(false);
    }

    settings.force = false;
    save_settings(path, &settings)?;
    Ok(true)
}
