//! Centralized configuration paths for spikegui
//!
//! All config files live under:
//! - Unix/macOS: `~/.config/spikegui/`
//! - Windows: `%APPDATA%\spikegui\`
//!
//! Each named GUI keeps its persisted state in its own subdirectory:
//! `~/.config/spikegui/<gui name>/state.json`.

use std::{
    env, fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};

const APP_DIR: &str = "spikegui";

/// File name of the per-GUI state file
pub const STATE_FILE: &str = "state.json";

/// Base config directory for spikegui
///
/// Unix/macOS:
///   - If XDG_CONFIG_HOME is set: `$XDG_CONFIG_HOME/spikegui`
///   - Else: `~/.config/spikegui`
///
/// Windows:
///   - `%APPDATA%\spikegui`
pub fn config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        env::var("APPDATA")
            .ok()
            .map(|appdata| PathBuf::from(appdata).join(APP_DIR))
    }

    #[cfg(not(target_os = "windows"))]
    {
        env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| dirs::home_dir().map(|h| h.join(".config")))
            .map(|config| config.join(APP_DIR))
    }
}

/// `~/.config/spikegui/config.yaml`
pub fn config_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.yaml"))
}

/// `~/.config/spikegui/logs/`
pub fn logs_dir() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("logs"))
}

/// `<config_dir>/<name>/state.json`
pub fn state_file(config_dir: &Path, name: &str) -> PathBuf {
    config_dir.join(name).join(STATE_FILE)
}

/// Create a directory and all of its parents
pub fn ensure_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path)
        .with_context(|| format!("Failed to create directory {}", path.display()))
}

/// Ensure the base config dir exists, returning it
pub fn ensure_config_dir() -> Result<PathBuf> {
    let dir = config_dir().context("No config directory available")?;
    ensure_dir(&dir)?;
    Ok(dir)
}

/// Ensure logs dir exists, returning it
pub fn ensure_logs_dir() -> Result<PathBuf> {
    let logs = logs_dir().context("No config directory available")?;
    ensure_dir(&logs)?;
    Ok(logs)
}
