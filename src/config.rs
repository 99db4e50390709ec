//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/treegen/treegen.toml`
//! 3. Environment variables: `TREEGEN_*` prefix
//!
//! Separately, [`Preferences`] holds state written by the tool itself
//! (`<base_dir>/config.json`).

use std::io;
use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::ApplicationError;

/// Unified configuration for treegen.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Base directory for treegen data (default: ~/.tree-generator)
    pub base_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_dir: dirs_default_base_dir(),
        }
    }
}

/// Raw settings for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub base_dir: Option<PathBuf>,
}

/// Get the default base directory (~/.tree-generator).
fn dirs_default_base_dir() -> PathBuf {
    directories::BaseDirs::new()
        .map(|dirs| dirs.home_dir().join(".tree-generator"))
        .unwrap_or_else(|| PathBuf::from("~/.tree-generator"))
}

/// Get the XDG config directory for treegen.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "treegen").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("treegen.toml"))
}

/// Expand `~`, `$VAR` and `${VAR}` in a path string.
pub fn expand_path(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Directory holding one JSON file per template (base_dir/templates).
    pub fn templates_dir(&self) -> PathBuf {
        self.base_dir.join("templates")
    }

    /// Path of the preferences file (base_dir/config.json).
    pub fn preferences_path(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    fn expand_paths(&mut self) {
        let expanded = expand_path(self.base_dir.to_string_lossy().as_ref());
        self.base_dir = PathBuf::from(expanded);
    }

    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            base_dir: overlay
                .base_dir
                .clone()
                .unwrap_or_else(|| self.base_dir.clone()),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `config_file` - Explicit config file replacing the global one
    pub fn load(config_file: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        let file = config_file
            .map(Path::to_path_buf)
            .or_else(global_config_path);
        if let Some(path) = file {
            if path.exists() {
                debug!("load: config file {}", path.display());
                let raw = load_raw_settings(&path)?;
                current = current.merge_with(&raw);
            } else if config_file.is_some() {
                return Err(ApplicationError::Config {
                    message: format!("config file not found: {}", path.display()),
                });
            }
        }

        current = Self::apply_env_overrides(current)?;
        current.expand_paths();

        Ok(current)
    }

    /// Apply TREEGEN_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(Environment::with_prefix("TREEGEN").separator("__"))
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("base_dir") {
            settings.base_dir = PathBuf::from(val);
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

/// Persisted user preferences.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Preferences {
    /// Template used by `apply` when no name is given
    pub default_template: String,
}

impl Preferences {
    /// Load preferences. A missing or empty file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ApplicationError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => {
                return Err(ApplicationError::Config {
                    message: format!("read {}: {}", path.display(), e),
                })
            }
        };
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(&content).map_err(|e| ApplicationError::Config {
            message: format!("parse {}: {}", path.display(), e),
        })
    }

    /// Write preferences as pretty JSON, creating the parent directory.
    pub fn save(&self, path: &Path) -> Result<(), ApplicationError> {
        let json = serde_json::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize preferences: {e}"),
        })?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ApplicationError::Config {
                message: format!("create {}: {}", parent.display(), e),
            })?;
        }
        std::fs::write(path, json).map_err(|e| ApplicationError::Config {
            message: format!("write {}: {}", path.display(), e),
        })
    }

    pub fn has_default(&self) -> bool {
        !self.default_template.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_default_settings_when_deriving_paths_then_uses_base_dir() {
        let settings = Settings {
            base_dir: PathBuf::from("/data/tg"),
        };
        assert_eq!(settings.templates_dir(), PathBuf::from("/data/tg/templates"));
        assert_eq!(
            settings.preferences_path(),
            PathBuf::from("/data/tg/config.json")
        );
    }

    #[test]
    fn given_tilde_in_base_dir_when_expand_paths_then_expands_to_home() {
        let mut settings = Settings {
            base_dir: PathBuf::from("~/.tree-generator"),
        };

        settings.expand_paths();

        let home = std::env::var("HOME").expect("HOME should be set");
        let base = settings.base_dir.to_string_lossy();
        assert!(base.starts_with(&home), "base_dir should start with home: {}", base);
        assert!(!base.contains('~'));
    }

    #[test]
    fn given_overlay_without_base_dir_when_merging_then_keeps_base() {
        let base = Settings {
            base_dir: PathBuf::from("/a"),
        };
        assert_eq!(base.merge_with(&RawSettings::default()), base);
        let overlay = RawSettings {
            base_dir: Some(PathBuf::from("/b")),
        };
        assert_eq!(base.merge_with(&overlay).base_dir, PathBuf::from("/b"));
    }

    #[test]
    fn given_settings_when_to_toml_then_contains_base_dir() {
        let settings = Settings {
            base_dir: PathBuf::from("/data/tg"),
        };
        let toml = settings.to_toml().expect("serialize");
        assert!(toml.contains("base_dir = \"/data/tg\""));
    }
}
