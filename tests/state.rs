//! GUI state persistence tests

mod common;

use common::{test_gui, TestView};
use serde_json::{json, Map, Value};
use spikegui::{AddViewOptions, GeometryState, GuiState};

fn settings(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => panic!("expected an object"),
    }
}

#[test]
fn test_state_round_trip() {
    let tmp = tempfile::tempdir().unwrap();

    let mut state = GuiState::new("GUI", tmp.path());
    assert!(state.is_empty());
    state.update_view_state("WaveformView", settings(json!({"box_scaling": [1.5, 2.0]})));
    state.set_geometry_state(&GeometryState {
        geometry: vec![1, 2, 3],
        state: b"docks".to_vec(),
    });
    state.save().unwrap();

    let loaded = GuiState::new("GUI", tmp.path());
    assert_eq!(
        loaded.view_state("WaveformView")["box_scaling"],
        json!([1.5, 2.0])
    );
    let gs = loaded.geometry_state().unwrap();
    assert_eq!(gs.geometry, vec![1, 2, 3]);
    assert_eq!(gs.state, b"docks".to_vec());
}

#[test]
fn test_states_are_separate_per_gui_name() {
    let tmp = tempfile::tempdir().unwrap();

    let mut first = GuiState::new("FirstGUI", tmp.path());
    first.insert("key", json!(1));
    first.save().unwrap();

    let second = GuiState::new("SecondGUI", tmp.path());
    assert!(second.get("key").is_none());
    assert_eq!(GuiState::new("FirstGUI", tmp.path()).get("key"), Some(&json!(1)));
}

#[test]
fn test_missing_state_file_loads_empty() {
    let tmp = tempfile::tempdir().unwrap();
    let state = GuiState::new("Nothing", tmp.path().join("nested"));
    assert!(state.is_empty());
    assert!(!state.path().exists());
    assert!(state.geometry_state().is_none());
}

#[test]
fn test_malformed_state_file_is_ignored_and_overwritten() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("GUI").join("state.json");
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, "{ not json").unwrap();

    // The window still comes up, and closing replaces the bad file
    let mut gui = test_gui(tmp.path());
    assert!(gui.state().is_empty());
    gui.add_view(TestView::new("Canvas"), AddViewOptions::default());
    assert!(gui.close());

    let contents = std::fs::read_to_string(&path).unwrap();
    let value: Value = serde_json::from_str(&contents).unwrap();
    assert!(value.get("geometry_state").is_some());
}

#[test]
fn test_view_settings_survive_close() {
    let tmp = tempfile::tempdir().unwrap();

    let mut gui = test_gui(tmp.path());
    gui.add_view(TestView::new("Canvas"), AddViewOptions::default());
    gui.state_mut()
        .update_view_state("Canvas", settings(json!({"zoom": 2})));
    assert!(gui.close());

    let gui = test_gui(tmp.path());
    assert_eq!(gui.state().view_state("Canvas")["zoom"], json!(2));
    assert!(gui.state().geometry_state().is_some());
}
