//! Shell configuration persistence
//!
//! Stores user preferences in `~/.config/spikegui/config.yaml`

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Window defaults that persist across sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShellConfig {
    /// Initial window position in screen coordinates
    #[serde(default = "default_position")]
    pub position: (i32, i32),

    /// Initial window size in logical pixels
    #[serde(default = "default_size")]
    pub size: (u32, u32),

    /// Reapply the saved geometry state when the window is shown
    #[serde(default = "default_restore_layout")]
    pub restore_layout: bool,
}

fn default_position() -> (i32, i32) {
    (200, 200)
}

fn default_size() -> (u32, u32) {
    (800, 600)
}

fn default_restore_layout() -> bool {
    true
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            position: default_position(),
            size: default_size(),
            restore_layout: default_restore_layout(),
        }
    }
}

impl ShellConfig {
    /// Load config from the default location, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load config from a specific file, falling back to defaults on any failure
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

    /// Save config to a specific file
    ///
    /// Creates the parent directory if it doesn't exist.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            crate::config_paths::ensure_dir(parent)?;
        }

        let content = serde_yaml::to_string(self).context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }
}
