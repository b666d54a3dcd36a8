//! Configuration loading functions.

use std::fs;
use std::path::Path;

use super::error::ConfigError;
use super::types::Config;

/// Project-level config file names, in search order.
pub const CONFIG_FILE_NAMES: &[&str] = &[
    ".statescope.yaml",
    ".statescope.yml",
    ".statescope.json",
    ".statescope.toml",
];

impl Config {
    /// Load configuration from a file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
            path: path.display().to_string(),
            source: e,
        })?;

        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "yaml" | "yml" => serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseYaml {
                path: path.display().to_string(),
                source: e,
            }),
            "json" => serde_json::from_str(&content).map_err(|e| ConfigError::ParseJson {
                path: path.display().to_string(),
                source: e,
            }),
            "toml" => toml::from_str(&content).map_err(|e| ConfigError::ParseToml {
                path: path.display().to_string(),
                source: e,
            }),
            _ => Err(ConfigError::UnsupportedFormat(
                path.display().to_string(),
                ext,
            )),
        }
    }

    /// Load configuration from the project directory or global config.
    ///
    /// Search order:
    /// 1. `.statescope.{yaml,yml,json,toml}` in `project_root`
    /// 2. `~/.config/statescope/config.yaml`
    /// 3. Default configuration
    ///
    /// A file that exists but fails to load is an error rather than being
    /// skipped.
    pub fn load(project_root: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(root) = project_root {
            for filename in CONFIG_FILE_NAMES {
                let path = root.join(filename);
                if path.exists() {
                    return Self::from_file(&path);
                }
            }
        }

        if let Some(config_dir) = dirs::config_dir() {
            let global_config = config_dir.join("statescope").join("config.yaml");
            if global_config.exists() {
                return Self::from_file(&global_config);
            }
        }

        Ok(Self::default())
    }
}
