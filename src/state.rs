//! Persisted GUI state
//!
//! A flat JSON object stored at `<config_dir>/<gui name>/state.json`.
//! Keys are view display names (each holding that view's settings
//! object) plus the reserved `geometry_state` entry holding the
//! toolkit's window and dock layout blobs, base64-encoded.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Reserved key for the window/dock layout blobs
pub const GEOMETRY_STATE_KEY: &str = "geometry_state";

/// Keys that describe the state object itself and are never persisted
const BOOKKEEPING_KEYS: [&str; 2] = ["name", "config_dir"];

/// Window geometry and dock layout as produced by the toolkit
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeometryState {
    #[serde(default, with = "base64_bytes")]
    pub geometry: Vec<u8>,
    #[serde(default, with = "base64_bytes")]
    pub state: Vec<u8>,
}

impl GeometryState {
    pub fn is_empty(&self) -> bool {
        self.geometry.is_empty() && self.state.is_empty()
    }
}

mod base64_bytes {
    use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&BASE64.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        BASE64.decode(encoded.as_bytes()).map_err(de::Error::custom)
    }
}

/// Per-GUI persisted key-value state
#[derive(Debug, Clone)]
pub struct GuiState {
    name: String,
    config_dir: PathBuf,
    entries: Map<String, Value>,
}

impl GuiState {
    /// Create the state for `name` and load it from `config_dir`
    pub fn new(name: impl Into<String>, config_dir: impl Into<PathBuf>) -> Self {
        let mut state = Self::empty(name, config_dir);
        if let Some(dir) = state.path().parent() {
            if let Err(e) = crate::config_paths::ensure_dir(dir) {
                tracing::warn!("{:#}", e);
            }
        }
        state.load();
        state
    }

    /// Create an empty state without touching the disk
    pub fn empty(name: impl Into<String>, config_dir: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            config_dir: config_dir.into(),
            entries: Map::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// `<config_dir>/<name>/state.json`
    pub fn path(&self) -> PathBuf {
        crate::config_paths::state_file(&self.config_dir, &self.name)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.entries.insert(key.into(), value)
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.entries.remove(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Settings stored for a view, or an empty object
    pub fn view_state(&self, view_name: &str) -> Map<String, Value> {
        match self.entries.get(view_name) {
            Some(Value::Object(map)) => map.clone(),
            _ => Map::new(),
        }
    }

    /// Merge settings into the object stored for a view
    pub fn update_view_state(&mut self, view_name: &str, settings: Map<String, Value>) {
        let entry = self
            .entries
            .entry(view_name.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !entry.is_object() {
            *entry = Value::Object(Map::new());
        }
        if let Value::Object(map) = entry {
            map.extend(settings);
        }
        tracing::debug!("Update GUI state for {}", view_name);
    }

    /// The stored window/dock layout, if present and well-formed
    pub fn geometry_state(&self) -> Option<GeometryState> {
        let value = self.entries.get(GEOMETRY_STATE_KEY)?;
        match serde_json::from_value(value.clone()) {
            Ok(gs) => Some(gs),
            Err(e) => {
                tracing::warn!("Ignoring malformed geometry state: {}", e);
                None
            }
        }
    }

    pub fn set_geometry_state(&mut self, gs: &GeometryState) {
        match serde_json::to_value(gs) {
            Ok(value) => {
                self.entries.insert(GEOMETRY_STATE_KEY.to_string(), value);
            }
            Err(e) => tracing::warn!("Failed to encode geometry state: {}", e),
        }
    }

    /// Load the state from the JSON file in the config dir
    ///
    /// A missing, unreadable or malformed file leaves the state untouched.
    pub fn load(&mut self) {
        let path = self.path();
        if !path.exists() {
            tracing::debug!("The GUI state file `{}` doesn't exist.", path.display());
            return;
        }

        tracing::debug!("Load the GUI state from `{}`.", path.display());
        let contents = match std::fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) => {
                tracing::warn!("Failed to read GUI state at {}: {}", path.display(), e);
                return;
            }
        };

        match serde_json::from_str::<Value>(&contents) {
            Ok(Value::Object(map)) => {
                for (key, value) in map {
                    if !BOOKKEEPING_KEYS.contains(&key.as_str()) {
                        self.entries.insert(key, value);
                    }
                }
            }
            Ok(other) => {
                tracing::warn!(
                    "GUI state at {} is not a JSON object (found {}), ignoring",
                    path.display(),
                    json_type_name(&other)
                );
            }
            Err(e) => {
                tracing::warn!("Error decoding JSON: {}", e);
            }
        }
    }

    /// Save the state to the JSON file in the config dir
    pub fn save(&self) -> Result<()> {
        let path = self.path();
        tracing::debug!("Save the GUI state to `{}`.", path.display());

        if let Some(parent) = path.parent() {
            crate::config_paths::ensure_dir(parent)?;
        }

        let data: Map<String, Value> = self
            .entries
            .iter()
            .filter(|(key, _)| !BOOKKEEPING_KEYS.contains(&key.as_str()))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        let contents =
            serde_json::to_string_pretty(&data).context("Failed to serialize GUI state")?;
        std::fs::write(&path, contents)
            .with_context(|| format!("Failed to write GUI state to {}", path.display()))
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn settings(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected an object"),
        }
    }

    #[test]
    fn test_view_state_defaults_to_empty() {
        let tmp = tempfile::tempdir().unwrap();
        let mut state = GuiState::new("GUI", tmp.path());
        state.update_view_state("MyView0", settings(json!({"hello": "world"})));

        assert!(state.view_state("MyView").is_empty());
        assert!(state.view_state("MyView1").is_empty());
        assert_eq!(
            Value::Object(state.view_state("MyView0")),
            json!({"hello": "world"})
        );
    }

    #[test]
    fn test_update_view_state_merges() {
        let mut state = GuiState::empty("GUI", "/unused");
        state.update_view_state("TraceView", settings(json!({"scale": 1.0, "n": 3})));
        state.update_view_state("TraceView", settings(json!({"scale": 2.5})));
        assert_eq!(
            Value::Object(state.view_state("TraceView")),
            json!({"scale": 2.5, "n": 3})
        );
    }

    #[test]
    fn test_new_creates_gui_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let state = GuiState::new("TemplateGUI", tmp.path());
        assert!(tmp.path().join("TemplateGUI").is_dir());
        assert!(state.is_empty());
    }

    #[test]
    fn test_geometry_state_is_base64_in_json() {
        let mut state = GuiState::empty("GUI", "/unused");
        let gs = GeometryState {
            geometry: vec![1, 2, 3],
            state: b"docks".to_vec(),
        };
        state.set_geometry_state(&gs);
        assert_eq!(
            state.get(GEOMETRY_STATE_KEY),
            Some(&json!({"geometry": "AQID", "state": "ZG9ja3M="}))
        );
        assert_eq!(state.geometry_state(), Some(gs));
    }

    #[test]
    fn test_malformed_geometry_state_is_none() {
        let mut state = GuiState::empty("GUI", "/unused");
        state.insert(GEOMETRY_STATE_KEY, json!({"geometry": "!!not base64!!"}));
        assert_eq!(state.geometry_state(), None);
    }

    #[test]
    fn test_malformed_json_loads_empty() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("GUI");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("state.json"), "{ not json").unwrap();

        let state = GuiState::new("GUI", tmp.path());
        assert!(state.is_empty());
    }

    #[test]
    fn test_non_object_json_loads_empty() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("GUI");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("state.json"), "[1, 2, 3]").unwrap();

        let state = GuiState::new("GUI", tmp.path());
        assert!(state.is_empty());
    }

    #[test]
    fn test_bookkeeping_keys_are_not_persisted() {
        let tmp = tempfile::tempdir().unwrap();
        let mut state = GuiState::new("GUI", tmp.path());
        state.insert("name", json!("Other"));
        state.insert("config_dir", json!("/elsewhere"));
        state.insert("ClusterView", json!({"sort": "id"}));
        state.save().unwrap();

        let raw: Value =
            serde_json::from_str(&std::fs::read_to_string(state.path()).unwrap()).unwrap();
        assert_eq!(raw, json!({"ClusterView": {"sort": "id"}}));
    }
}
