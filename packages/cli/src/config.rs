use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use styletrend_editor::EditorOptions;
use styletrend_regen::RegenOptions;

pub const DEFAULT_CONFIG_NAME: &str = "styletrend.config.json";

/// Style Trend configuration file format
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// Edit-mode and export options
    pub editor: EditorOptions,

    /// Regeneration simulator options
    pub regen: RegenOptions,
}

impl Config {
    /// Load config from a directory, falling back to defaults
    pub fn load(cwd: &str) -> anyhow::Result<Self> {
        Self::load_from(&PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME))
    }

    pub fn load_from(config_path: &Path) -> anyhow::Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            tracing::debug!(path = %config_path.display(), "loaded config");
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }
}
