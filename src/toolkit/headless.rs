//! In-memory docking toolkit
//!
//! Keeps the same bookkeeping a native docking toolkit does (window
//! geometry, docks per area in stacking order, floating and visibility
//! flags, menus, status text) without putting anything on screen. Its
//! geometry blobs are JSON documents, opaque to the shell.

use serde::{Deserialize, Serialize};

use super::{MenuHandle, Toolkit};
use crate::dock::{DockArea, DockHandle, DockSpec};

/// Position and size of the main window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowGeometry {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowGeometry {
    fn default() -> Self {
        Self {
            x: 0,
            y: 0,
            width: 640,
            height: 480,
        }
    }
}

/// Layout of one dock container, as stored in the state blob
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DockSnapshot {
    pub name: String,
    pub area: DockArea,
    pub floating: bool,
    pub visible: bool,
}

#[derive(Debug, Clone)]
struct HeadlessDock {
    handle: DockHandle,
    spec: DockSpec,
    area: DockArea,
    floating: bool,
    visible: bool,
}

impl HeadlessDock {
    fn snapshot(&self) -> DockSnapshot {
        DockSnapshot {
            name: self.spec.name.clone(),
            area: self.area,
            floating: self.floating,
            visible: self.visible,
        }
    }
}

/// Toolkit backend without a display
#[derive(Debug, Clone)]
pub struct HeadlessToolkit {
    application: bool,
    title: String,
    geometry: WindowGeometry,
    window_visible: bool,
    window_closed: bool,
    /// Docks in stacking order; per-area order is the order of appearance
    docks: Vec<HeadlessDock>,
    next_dock: u64,
    menus: Vec<(MenuHandle, String)>,
    status: String,
}

impl Default for HeadlessToolkit {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessToolkit {
    pub fn new() -> Self {
        Self {
            application: true,
            title: String::new(),
            geometry: WindowGeometry::default(),
            window_visible: false,
            window_closed: false,
            docks: Vec::new(),
            next_dock: 1,
            menus: Vec::new(),
            status: String::new(),
        }
    }

    /// A toolkit with no application context; windows cannot be created
    pub fn without_application() -> Self {
        Self {
            application: false,
            ..Self::new()
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn geometry(&self) -> WindowGeometry {
        self.geometry
    }

    pub fn is_visible(&self) -> bool {
        self.window_visible
    }

    pub fn is_closed(&self) -> bool {
        self.window_closed
    }

    pub fn status_message(&self) -> &str {
        &self.status
    }

    /// Menu titles in creation order
    pub fn menu_names(&self) -> Vec<&str> {
        self.menus.iter().map(|(_, name)| name.as_str()).collect()
    }

    /// All live docks in stacking order
    pub fn docks(&self) -> Vec<DockSnapshot> {
        self.docks.iter().map(HeadlessDock::snapshot).collect()
    }

    pub fn dock(&self, handle: DockHandle) -> Option<DockSnapshot> {
        self.find(handle).map(HeadlessDock::snapshot)
    }

    /// Names of the docks attached to an area, in stacking order
    pub fn docks_in(&self, area: DockArea) -> Vec<&str> {
        self.docks
            .iter()
            .filter(|d| d.area == area && !d.floating)
            .map(|d| d.spec.name.as_str())
            .collect()
    }

    /// Move a dock to another area, as a user drag would
    ///
    /// Returns false if the dock is unknown, not movable, or the area is not allowed.
    pub fn move_dock(&mut self, handle: DockHandle, area: DockArea) -> bool {
        let Some(dock) = self.find_mut(handle) else {
            return false;
        };
        if !dock.spec.features.movable || !dock.spec.allowed_areas.contains(&area) {
            return false;
        }
        dock.area = area;
        dock.floating = false;
        true
    }

    fn find(&self, handle: DockHandle) -> Option<&HeadlessDock> {
        self.docks.iter().find(|d| d.handle == handle)
    }

    fn find_mut(&mut self, handle: DockHandle) -> Option<&mut HeadlessDock> {
        self.docks.iter_mut().find(|d| d.handle == handle)
    }
}

impl Toolkit for HeadlessToolkit {
    fn has_application(&self) -> bool {
        self.application
    }

    fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    fn move_to(&mut self, x: i32, y: i32) {
        self.geometry.x = x;
        self.geometry.y = y;
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.geometry.width = width;
        self.geometry.height = height;
    }

    fn show_window(&mut self) {
        self.window_visible = true;
    }

    fn close_window(&mut self) {
        self.window_visible = false;
        self.window_closed = true;
    }

    fn add_dock(&mut self, spec: &DockSpec) -> DockHandle {
        let handle = DockHandle(self.next_dock);
        self.next_dock += 1;
        self.docks.push(HeadlessDock {
            handle,
            spec: spec.clone(),
            area: spec.area,
            floating: false,
            visible: false,
        });
        handle
    }

    fn set_dock_floating(&mut self, dock: DockHandle, floating: bool) {
        if let Some(dock) = self.find_mut(dock) {
            if floating && !dock.spec.features.floatable {
                tracing::debug!("Dock {} is not floatable", dock.spec.name);
                return;
            }
            dock.floating = floating;
        }
    }

    fn show_dock(&mut self, dock: DockHandle) {
        if let Some(dock) = self.find_mut(dock) {
            dock.visible = true;
        }
    }

    fn remove_dock(&mut self, dock: DockHandle) {
        self.docks.retain(|d| d.handle != dock);
    }

    fn add_menu(&mut self, name: &str) -> MenuHandle {
        let handle = MenuHandle(self.menus.len() as u64 + 1);
        self.menus.push((handle, name.to_string()));
        handle
    }

    fn show_status_message(&mut self, message: &str) {
        self.status = message.to_string();
    }

    fn save_geometry(&self) -> Vec<u8> {
        serde_json::to_vec(&self.geometry).unwrap_or_default()
    }

    fn save_state(&self) -> Vec<u8> {
        serde_json::to_vec(&self.docks()).unwrap_or_default()
    }

    fn restore_geometry(&mut self, geometry: &[u8]) -> bool {
        match serde_json::from_slice::<WindowGeometry>(geometry) {
            Ok(geometry) => {
                self.geometry = geometry;
                true
            }
            Err(e) => {
                tracing::warn!("Ignoring invalid window geometry: {}", e);
                false
            }
        }
    }

    fn restore_state(&mut self, state: &[u8]) -> bool {
        let snapshots: Vec<DockSnapshot> = match serde_json::from_slice(state) {
            Ok(snapshots) => snapshots,
            Err(e) => {
                tracing::warn!("Ignoring invalid dock state: {}", e);
                return false;
            }
        };

        for snapshot in &snapshots {
            // Docks that do not exist yet cannot be relocated
            let Some(dock) = self.docks.iter_mut().find(|d| d.spec.name == snapshot.name)
            else {
                tracing::debug!("No dock named {} to restore", snapshot.name);
                continue;
            };
            if dock.spec.allowed_areas.contains(&snapshot.area) {
                dock.area = snapshot.area;
            }
            dock.floating = snapshot.floating && dock.spec.features.floatable;
            dock.visible = snapshot.visible;
        }

        // Reapply the saved stacking order; docks missing from the blob go last
        let order = |name: &str| {
            snapshots
                .iter()
                .position(|s| s.name == name)
                .unwrap_or(usize::MAX)
        };
        self.docks.sort_by_key(|d| order(&d.spec.name));
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toolkit_with_docks() -> (HeadlessToolkit, DockHandle, DockHandle) {
        let mut tk = HeadlessToolkit::new();
        let a = tk.add_dock(&DockSpec::new("ClusterView", DockArea::Left));
        let b = tk.add_dock(&DockSpec::new("WaveformView", DockArea::Right));
        (tk, a, b)
    }

    #[test]
    fn test_docks_grouped_by_area() {
        let (tk, _, _) = toolkit_with_docks();
        assert_eq!(tk.docks_in(DockArea::Left), vec!["ClusterView"]);
        assert_eq!(tk.docks_in(DockArea::Right), vec!["WaveformView"]);
        assert!(tk.docks_in(DockArea::Top).is_empty());
    }

    #[test]
    fn test_floating_respects_feature_flag() {
        let mut tk = HeadlessToolkit::new();
        let fixed = tk.add_dock(&DockSpec::new("ProbeView", DockArea::Left).with_features(true, false));
        tk.set_dock_floating(fixed, true);
        assert!(!tk.dock(fixed).unwrap().floating);
    }

    #[test]
    fn test_state_blob_restores_existing_docks() {
        let (mut tk, a, b) = toolkit_with_docks();
        assert!(tk.move_dock(a, DockArea::Bottom));
        tk.set_dock_floating(b, true);
        let blob = tk.save_state();

        let (mut fresh, fa, fb) = toolkit_with_docks();
        assert!(fresh.restore_state(&blob));
        assert_eq!(fresh.dock(fa).unwrap().area, DockArea::Bottom);
        assert!(fresh.dock(fb).unwrap().floating);
    }

    #[test]
    fn test_state_blob_ignores_unknown_docks() {
        let (tk, _, _) = toolkit_with_docks();
        let blob = tk.save_state();

        let mut fresh = HeadlessToolkit::new();
        let only = fresh.add_dock(&DockSpec::new("WaveformView", DockArea::Top));
        assert!(fresh.restore_state(&blob));
        assert_eq!(fresh.docks().len(), 1);
        assert_eq!(fresh.dock(only).unwrap().area, DockArea::Right);
    }

    #[test]
    fn test_geometry_blob_roundtrip() {
        let mut tk = HeadlessToolkit::new();
        tk.move_to(200, 100);
        tk.resize(100, 100);
        let blob = tk.save_geometry();

        let mut fresh = HeadlessToolkit::new();
        assert!(fresh.restore_geometry(&blob));
        assert_eq!(fresh.geometry(), tk.geometry());
    }

    #[test]
    fn test_invalid_blobs_are_rejected() {
        let mut tk = HeadlessToolkit::new();
        assert!(!tk.restore_geometry(b"not json"));
        assert!(!tk.restore_state(b"{\"name\": 1}"));
    }

    #[test]
    fn test_move_dock_rejects_disallowed_area() {
        let mut tk = HeadlessToolkit::new();
        let mut spec = DockSpec::new("TraceView", DockArea::Bottom);
        spec.allowed_areas = vec![DockArea::Bottom, DockArea::Top];
        let handle = tk.add_dock(&spec);
        assert!(!tk.move_dock(handle, DockArea::Left));
        assert!(tk.move_dock(handle, DockArea::Top));
        assert!(!tk.move_dock(DockHandle(999), DockArea::Top));
    }
}
