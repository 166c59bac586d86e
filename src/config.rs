//! Composer configuration persistence
//!
//! Stores user preferences in `~/.config/inlay/config.yaml`

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::search::{DEFAULT_CACHE_CAPACITY, DEFAULT_SEARCH_LIMIT, SEARCH_DEBOUNCE_MS};

/// Composer configuration that persists across sessions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComposerConfig {
    /// Quiet period after the last keystroke before a reference search runs
    pub debounce_ms: u64,
    /// Number of distinct queries kept in the search cache
    pub cache_capacity: usize,
    /// Maximum results requested per search
    pub search_limit: usize,
    /// Inserted after a reference token
    pub separator: char,
    /// Empty the composer after a successful send
    pub clear_on_send: bool,
}

impl Default for ComposerConfig {
    fn default() -> Self {
        Self {
            debounce_ms: SEARCH_DEBOUNCE_MS,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            search_limit: DEFAULT_SEARCH_LIMIT,
            separator: ' ',
            clear_on_send: true,
        }
    }
}

impl ComposerConfig {
    /// Load config from disk, or return defaults if not found
    pub fn load() -> Self {
        match crate::config_paths::config_file() {
            Some(path) => Self::load_from(&path),
            None => {
                tracing::debug!("No config directory available, using defaults");
                Self::default()
            }
        }
    }

    /// Load config from `path`; a missing or unparsable file yields defaults
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save config to the user config file
    pub fn save(&self) -> Result<(), String> {
        let path = crate::config_paths::config_file()
            .ok_or_else(|| "No config directory available".to_string())?;
        self.save_to(&path)
    }

    /// Save config to `path`, creating its directory if needed
    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = serde_yaml::to_string(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        std::fs::write(path, content)
            .map_err(|e| format!("Failed to write config to {}: {}", path.display(), e))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Update the debounce window and save
    pub fn set_debounce_ms(&mut self, debounce_ms: u64) -> Result<(), String> {
        self.debounce_ms = debounce_ms;
        self.save()
    }
}
