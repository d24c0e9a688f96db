use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::Path;

use crate::history::DEFAULT_CAPACITY;
use crate::paths;
use crate::render::UnresolvedPolicy;
use crate::utils::{io, json};

/// Root configuration structure for cmdforge.json
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CmdforgeConfig {
    #[serde(default)]
    pub defaults: Defaults,
}

/// All configurable defaults that can be overridden via cmdforge.json
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Defaults {
    #[serde(default)]
    pub history: HistoryConfig,

    #[serde(default)]
    pub render: RenderConfig,

    #[serde(default)]
    pub catalog: CatalogConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryConfig {
    #[serde(default = "default_history_capacity")]
    pub capacity: usize,

    /// Keep history between CLI invocations
    #[serde(default = "default_history_persist")]
    pub persist: bool,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            capacity: default_history_capacity(),
            persist: default_history_persist(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct RenderConfig {
    #[serde(default)]
    pub unresolved: UnresolvedPolicy,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CatalogConfig {
    /// Catalog JSON file replacing the built-in catalog (supports `~`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

fn default_history_capacity() -> usize {
    DEFAULT_CAPACITY
}

fn default_history_persist() -> bool {
    true
}

impl CmdforgeConfig {
    pub fn validate(&self) -> crate::Result<()> {
        let capacity = self.defaults.history.capacity;
        if capacity == 0 {
            return Err(crate::Error::config_invalid_value(
                "defaults.history.capacity",
                Some(capacity.to_string()),
                "History capacity must be at least 1",
            ));
        }

        if let Some(path) = &self.defaults.catalog.path {
            if path.trim().is_empty() {
                return Err(crate::Error::config_invalid_value(
                    "defaults.catalog.path",
                    Some(path.clone()),
                    "Catalog path cannot be empty",
                ));
            }
        }

        Ok(())
    }
}

// =============================================================================
// Loading functions
// =============================================================================

/// Load the full cmdforge.json config, falling back to defaults on any error.
pub fn load_config() -> CmdforgeConfig {
    let path = match paths::cmdforge_json() {
        Ok(path) => path,
        Err(_) => return CmdforgeConfig::default(),
    };

    if !path.exists() {
        return CmdforgeConfig::default();
    }

    match load_config_from(&path) {
        Ok(config) => config,
        Err(err) => {
            crate::log_status!(
                "config",
                "Ignoring {}: {} ({})",
                path.display(),
                err.message,
                err.details
            );
            CmdforgeConfig::default()
        }
    }
}

/// Load and validate a config file at an explicit path.
pub fn load_config_from(path: &Path) -> crate::Result<CmdforgeConfig> {
    let content = io::read_file(path, &format!("read {}", path.display()))?;

    let config: CmdforgeConfig = serde_json::from_str(&content)
        .map_err(|e| crate::Error::config_invalid_json(path.display().to_string(), e))?;

    config.validate()?;
    Ok(config)
}

/// Save config to cmdforge.json (creates if missing).
pub fn save_config(config: &CmdforgeConfig) -> crate::Result<()> {
    save_config_to(&paths::cmdforge_json()?, config)
}

pub fn save_config_to(path: &Path, config: &CmdforgeConfig) -> crate::Result<()> {
    config.validate()?;
    io::ensure_parent_dir(path)?;

    let content = serde_json::to_string_pretty(config).map_err(|e| {
        crate::Error::internal_json(e.to_string(), Some("serialize cmdforge.json".to_string()))
    })?;

    io::write_file_atomic(path, &content, &format!("write {}", path.display()))
}

/// Return a copy of `config` with the JSON value at `pointer` replaced.
pub fn with_value(
    config: &CmdforgeConfig,
    pointer: &str,
    value: Value,
) -> crate::Result<CmdforgeConfig> {
    let mut config_json = serde_json::to_value(config).map_err(|e| {
        crate::Error::internal_json(e.to_string(), Some("serialize config".to_string()))
    })?;

    json::set_json_pointer(&mut config_json, pointer, value)?;

    let updated: CmdforgeConfig = serde_json::from_value(config_json)
        .map_err(|e| crate::Error::config_invalid_json(pointer.to_string(), e))?;

    updated.validate()?;
    Ok(updated)
}

/// Check if cmdforge.json file exists
pub fn config_exists() -> bool {
    paths::cmdforge_json()
        .map(|p| p.exists())
        .unwrap_or(false)
}

/// Delete cmdforge.json file (reset to defaults)
pub fn reset_config() -> crate::Result<bool> {
    let path = paths::cmdforge_json()?;

    if path.exists() {
        fs::remove_file(&path).map_err(|e| {
            crate::Error::internal_io(e.to_string(), Some(format!("delete {}", path.display())))
        })?;
        Ok(true)
    } else {
        Ok(false)
    }
}

/// Get the path to cmdforge.json (for display purposes)
pub fn config_path() -> crate::Result<String> {
    Ok(paths::cmdforge_json()?.display().to_string())
}

/// Path of the persisted command history
pub fn history_path() -> crate::Result<std::path::PathBuf> {
    paths::history_json()
}

/// Get built-in defaults (ignoring any file config)
pub fn builtin_defaults() -> Defaults {
    Defaults::default()
}
