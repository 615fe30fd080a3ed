//! Main window shell
//!
//! `Gui` hosts views in dock containers, keeps their unique names, a
//! menu registry and a status bar, and persists window/dock layout in a
//! `GuiState` across sessions.
//!
//! Lifecycle: `Created → Shown ⇄ (views added/removed) → Closing → Closed`.
//! A `close` listener can veto, which sends `Closing` back to the
//! previous phase.
//!
//! Events: `show`, `close`, `add_view`, `dock_closed`, `close_view`
//! (see [`crate::events`]).

mod attach;
mod menu;
mod naming;
mod status;

pub use attach::AttachContext;
pub use menu::MenuBar;
pub use status::StatusBar;

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use crate::config::ShellConfig;
use crate::dock::{DockHandle, DockSpec};
use crate::events::{EventKind, Flow, GuiEvent, ListenerId, Listeners};
use crate::state::{GeometryState, GuiState};
use crate::toolkit::{MenuHandle, NativeEvent, Toolkit};
use crate::view::{AddViewOptions, View, ViewId, ViewKind, ViewQuery, ViewRegistry};
use naming::ViewNamer;

/// Default window name, also the state subdirectory
pub const DEFAULT_NAME: &str = "GUI";

/// Where the window is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowPhase {
    Created,
    Shown,
    Closing,
    Closed,
}

/// Construction options for `Gui`
#[derive(Debug)]
pub struct GuiOptions {
    pub name: Option<String>,
    pub subtitle: Option<String>,
    pub position: (i32, i32),
    pub size: (u32, u32),
    /// Defaults to `config_paths::config_dir()`
    pub config_dir: Option<PathBuf>,
    pub view_creator: ViewRegistry,
    /// Reapply the saved geometry state when the window is shown
    pub restore_layout: bool,
}

impl Default for GuiOptions {
    fn default() -> Self {
        Self::from_config(&ShellConfig::default())
    }
}

impl GuiOptions {
    pub fn from_config(config: &ShellConfig) -> Self {
        Self {
            name: None,
            subtitle: None,
            position: config.position,
            size: config.size,
            config_dir: None,
            view_creator: ViewRegistry::new(),
            restore_layout: config.restore_layout,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    pub fn position(mut self, x: i32, y: i32) -> Self {
        self.position = (x, y);
        self
    }

    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.size = (width, height);
        self
    }

    pub fn config_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config_dir = Some(dir.into());
        self
    }

    pub fn view_creator(mut self, registry: ViewRegistry) -> Self {
        self.view_creator = registry;
        self
    }

    pub fn restore_layout(mut self, restore: bool) -> Self {
        self.restore_layout = restore;
        self
    }
}

struct ViewEntry {
    id: ViewId,
    name: String,
    kind: ViewKind,
    dock: DockHandle,
    view: Box<dyn View>,
}

impl ViewEntry {
    fn tracked(&self) -> TrackedView<'_> {
        TrackedView {
            id: self.id,
            name: &self.name,
            kind: &self.kind,
            dock: self.dock,
            view: self.view.as_ref(),
        }
    }
}

/// Read-only view of a docked view
#[derive(Debug, Clone, Copy)]
pub struct TrackedView<'a> {
    pub id: ViewId,
    pub name: &'a str,
    pub kind: &'a ViewKind,
    pub dock: DockHandle,
    pub view: &'a (dyn View + 'static),
}

/// Docking main window
pub struct Gui<T> {
    toolkit: T,
    name: String,
    title: String,
    phase: WindowPhase,
    views: Vec<ViewEntry>,
    namer: ViewNamer,
    next_view_id: u64,
    registry: ViewRegistry,
    menus: MenuBar,
    status: StatusBar,
    listeners: Listeners<T>,
    state: GuiState,
}

impl<T: Toolkit + 'static> Gui<T> {
    /// Create the main window
    ///
    /// Fails if the toolkit has no application context, or if no config
    /// directory is given and none can be determined.
    pub fn new(mut toolkit: T, options: GuiOptions) -> Result<Self> {
        if !toolkit.has_application() {
            bail!("A GUI application must be created before its main window");
        }

        let name = options.name.unwrap_or_else(|| DEFAULT_NAME.to_string());
        let title = match options.subtitle.as_deref() {
            Some(subtitle) if !subtitle.is_empty() => format!("{} - {}", name, subtitle),
            _ => name.clone(),
        };
        toolkit.set_title(&title);
        toolkit.move_to(options.position.0, options.position.1);
        toolkit.resize(options.size.0, options.size.1);

        let config_dir = match options.config_dir {
            Some(dir) => dir,
            None => crate::config_paths::config_dir().context("No config directory available")?,
        };
        let state = GuiState::new(name.clone(), config_dir);

        let mut gui = Self {
            toolkit,
            name,
            title,
            phase: WindowPhase::Created,
            views: Vec::new(),
            namer: ViewNamer::default(),
            next_view_id: 1,
            registry: options.view_creator,
            menus: MenuBar::new(),
            status: StatusBar::new(),
            listeners: Listeners::default(),
            state,
        };

        if options.restore_layout {
            gui.subscribe(EventKind::Show, |gui: &mut Gui<T>, _: &GuiEvent<'_>| {
                tracing::debug!("Load the geometry state.");
                let gs = gui.state.geometry_state();
                gui.restore_geometry_state(gs.as_ref());
            });
        }

        Ok(gui)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn phase(&self) -> WindowPhase {
        self.phase
    }

    pub fn toolkit(&self) -> &T {
        &self.toolkit
    }

    pub fn toolkit_mut(&mut self) -> &mut T {
        &mut self.toolkit
    }

    pub fn state(&self) -> &GuiState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GuiState {
        &mut self.state
    }

    pub fn registry_mut(&mut self) -> &mut ViewRegistry {
        &mut self.registry
    }

    // ------------------------------------------------------------------
    // Events
    // ------------------------------------------------------------------

    /// Register a listener; return `false` (or `Flow::Veto`) from a
    /// `close` listener to keep the window open
    pub fn subscribe<F, R>(&mut self, kind: EventKind, listener: F) -> ListenerId
    where
        F: FnMut(&mut Gui<T>, &GuiEvent<'_>) -> R + 'static,
        R: Into<Flow> + 'static,
    {
        self.listeners.subscribe(kind, listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }

    fn emit(&mut self, event: &GuiEvent<'_>) -> Vec<Flow> {
        let listeners = self.listeners.snapshot(event.kind());
        let mut flows = Vec::with_capacity(listeners.len());
        for (id, callback) in listeners {
            // Unsubscribed by an earlier listener of this dispatch
            if !self.listeners.contains(id) {
                continue;
            }
            let Ok(mut callback) = callback.try_borrow_mut() else {
                tracing::trace!("Skip running listener {:?} for {:?}", id, event.kind());
                continue;
            };
            flows.push((&mut *callback)(self, event));
        }
        flows
    }

    /// Route a native toolkit event; returns whether it was acted upon
    pub fn handle_native(&mut self, event: NativeEvent) -> bool {
        match event {
            NativeEvent::ShowRequested => self.show(),
            NativeEvent::CloseRequested => self.close(),
            NativeEvent::DockClosed(dock) => {
                let Some(id) = self.views.iter().find(|v| v.dock == dock).map(|v| v.id) else {
                    tracing::debug!("Close event for unknown dock {:?}", dock);
                    return false;
                };
                self.close_view(id).is_some()
            }
        }
    }

    // ------------------------------------------------------------------
    // Window lifecycle
    // ------------------------------------------------------------------

    /// Emit `show`, then show the native window
    pub fn show(&mut self) -> bool {
        if matches!(self.phase, WindowPhase::Closing | WindowPhase::Closed) {
            tracing::warn!("Cannot show {} while it is {:?}", self.name, self.phase);
            return false;
        }
        self.emit(&GuiEvent::Show);
        self.toolkit.show_window();
        self.phase = WindowPhase::Shown;
        true
    }

    /// Close the window unless a `close` listener vetoes
    ///
    /// On success the geometry state is captured and the state file saved.
    /// Returns true once the window is closed; closing again is a no-op.
    pub fn close(&mut self) -> bool {
        match self.phase {
            WindowPhase::Closed => return true,
            WindowPhase::Closing => return false,
            WindowPhase::Created | WindowPhase::Shown => {}
        }

        let previous = self.phase;
        self.phase = WindowPhase::Closing;
        let flows = self.emit(&GuiEvent::Close);
        if flows.contains(&Flow::Veto) {
            tracing::debug!("Close of {} vetoed by a listener", self.name);
            self.phase = previous;
            return false;
        }

        tracing::debug!("Save the geometry state.");
        let gs = self.save_geometry_state();
        self.state.set_geometry_state(&gs);
        if let Err(e) = self.state.save() {
            tracing::warn!("Failed to save GUI state: {:#}", e);
        }

        self.toolkit.close_window();
        self.phase = WindowPhase::Closed;
        true
    }

    // ------------------------------------------------------------------
    // Views
    // ------------------------------------------------------------------

    /// Dock a view and return its id
    pub fn add_view<V: View>(&mut self, view: V, options: AddViewOptions) -> ViewId {
        self.add_boxed_view(Box::new(view), options)
    }

    /// Dock an already boxed view and return its id
    pub fn add_boxed_view(&mut self, view: Box<dyn View>, options: AddViewOptions) -> ViewId {
        let kind = view.kind();
        let live = self.views.iter().filter(|v| v.kind == kind).count();
        let name = self
            .namer
            .assign(&kind, live, |candidate| self.views.iter().any(|v| v.name == candidate));
        debug_assert!(
            !self.views.iter().any(|v| v.name == name),
            "view name {} is already taken",
            name
        );

        let id = ViewId(self.next_view_id);
        self.next_view_id += 1;

        let spec = DockSpec::new(name.clone(), options.area())
            .with_features(options.closable, options.floatable);
        let dock = self.toolkit.add_dock(&spec);
        if let Some(floating) = options.floating {
            self.toolkit.set_dock_floating(dock, floating);
        }
        self.views.push(ViewEntry {
            id,
            name: name.clone(),
            kind,
            dock,
            view,
        });
        self.toolkit.show_dock(dock);

        let Gui {
            views,
            toolkit,
            menus,
            status,
            ..
        } = self;
        if let Some(entry) = views.last_mut() {
            let mut ctx = AttachContext {
                id,
                name: &entry.name,
                toolkit,
                menus,
                status,
            };
            entry.view.attach(&mut ctx);
        }

        self.emit(&GuiEvent::AddView { id, name: &name });
        tracing::trace!("Add {} to GUI.", name);
        id
    }

    /// Close a view's dock container and stop tracking the view
    ///
    /// Emits `dock_closed` then `close_view`, and hands the view back.
    pub fn close_view(&mut self, id: ViewId) -> Option<Box<dyn View>> {
        let name = self.views.iter().find(|v| v.id == id)?.name.clone();
        self.emit(&GuiEvent::DockClosed { id, name: &name });

        // A dock_closed listener may already have removed it
        let index = self.views.iter().position(|v| v.id == id)?;
        let entry = self.views.remove(index);
        self.toolkit.remove_dock(entry.dock);

        self.emit(&GuiEvent::CloseView {
            id,
            name: &entry.name,
            view: entry.view.as_ref(),
        });
        tracing::trace!("Remove {} from GUI.", entry.name);
        Some(entry.view)
    }

    /// All docked views in the order they were added
    pub fn views(&self) -> impl Iterator<Item = TrackedView<'_>> {
        self.views.iter().map(ViewEntry::tracked)
    }

    /// Number of docked views
    pub fn view_len(&self) -> usize {
        self.views.len()
    }

    pub fn has_views(&self) -> bool {
        !self.views.is_empty()
    }

    /// Views matching a kind or a name prefix
    pub fn list_views(&self, query: impl Into<ViewQuery>) -> Vec<TrackedView<'_>> {
        let query = query.into();
        self.views
            .iter()
            .filter(|v| query.matches(&v.kind, &v.name))
            .map(ViewEntry::tracked)
            .collect()
    }

    /// The `index`-th view matching a kind or a name prefix
    pub fn get_view(&self, query: impl Into<ViewQuery>, index: usize) -> Option<TrackedView<'_>> {
        self.list_views(query).into_iter().nth(index)
    }

    pub fn tracked(&self, id: ViewId) -> Option<TrackedView<'_>> {
        self.views.iter().find(|v| v.id == id).map(ViewEntry::tracked)
    }

    pub fn view(&self, id: ViewId) -> Option<&(dyn View + 'static)> {
        self.views
            .iter()
            .find(|v| v.id == id)
            .map(|v| v.view.as_ref())
    }

    pub fn view_mut(&mut self, id: ViewId) -> Option<&mut (dyn View + 'static)> {
        self.views
            .iter_mut()
            .find(|v| v.id == id)
            .map(|v| v.view.as_mut())
    }

    pub fn view_name(&self, id: ViewId) -> Option<&str> {
        self.views
            .iter()
            .find(|v| v.id == id)
            .map(|v| v.name.as_str())
    }

    pub fn dock(&self, id: ViewId) -> Option<DockHandle> {
        self.views.iter().find(|v| v.id == id).map(|v| v.dock)
    }

    /// Number of live views per kind
    pub fn view_count(&self) -> BTreeMap<ViewKind, usize> {
        let mut counts = BTreeMap::new();
        for entry in &self.views {
            *counts.entry(entry.kind.clone()).or_insert(0) += 1;
        }
        counts
    }

    /// Create one view of `kind` with the registry and dock it
    pub fn create_and_add_view(&mut self, kind: &ViewKind) -> Option<ViewId> {
        let Some(view) = self.registry.create(kind) else {
            tracing::debug!("No view creator registered for {}", kind);
            return None;
        };
        let options = view.dock_options();
        Some(self.add_boxed_view(view, options))
    }

    /// Create `n` views of each kind with the registry
    pub fn create_views(&mut self, view_count: &[(ViewKind, usize)]) -> Vec<ViewId> {
        let mut created = Vec::new();
        for (kind, n_views) in view_count {
            for _ in 0..*n_views {
                match self.create_and_add_view(kind) {
                    Some(id) => created.push(id),
                    None => break,
                }
            }
        }
        created
    }

    // ------------------------------------------------------------------
    // Menu and status bars
    // ------------------------------------------------------------------

    /// Return or create a menu
    pub fn get_menu(&mut self, name: &str) -> MenuHandle {
        self.menus.get_or_create(name, &mut self.toolkit)
    }

    pub fn menus(&self) -> &MenuBar {
        &self.menus
    }

    /// The message in the status bar
    pub fn status_message(&self) -> &str {
        self.status.message()
    }

    /// Set the status bar message; ignored while the status is locked
    pub fn set_status_message(&mut self, message: impl Into<String>) {
        if self.status.set(message) {
            self.toolkit.show_status_message(self.status.message());
        }
    }

    pub fn lock_status(&mut self) {
        self.status.lock();
    }

    pub fn unlock_status(&mut self) {
        self.status.unlock();
    }

    pub fn is_status_locked(&self) -> bool {
        self.status.is_locked()
    }

    // ------------------------------------------------------------------
    // Geometry state
    // ------------------------------------------------------------------

    /// Current geometry of the window and the docks
    ///
    /// Can be called from a `close` listener.
    pub fn save_geometry_state(&self) -> GeometryState {
        GeometryState {
            geometry: self.toolkit.save_geometry(),
            state: self.toolkit.save_state(),
        }
    }

    /// Restore the position of the main window and the docks
    ///
    /// The views need to be docked again first. Can be called from a
    /// `show` listener. Returns whether anything was applied.
    pub fn restore_geometry_state(&mut self, gs: Option<&GeometryState>) -> bool {
        let Some(gs) = gs else {
            return false;
        };
        let mut applied = false;
        if !gs.geometry.is_empty() {
            applied |= self.toolkit.restore_geometry(&gs.geometry);
        }
        if !gs.state.is_empty() {
            applied |= self.toolkit.restore_state(&gs.state);
        }
        applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toolkit::HeadlessToolkit;
    use crate::views::PlaceholderView;

    fn gui(dir: &std::path::Path) -> Gui<HeadlessToolkit> {
        Gui::new(HeadlessToolkit::new(), GuiOptions::default().config_dir(dir)).unwrap()
    }

    #[test]
    fn test_title_with_subtitle() {
        let tmp = tempfile::tempdir().unwrap();
        let gui = Gui::new(
            HeadlessToolkit::new(),
            GuiOptions::default()
                .name("TemplateGUI")
                .subtitle("dataset.dat")
                .config_dir(tmp.path()),
        )
        .unwrap();
        assert_eq!(gui.name(), "TemplateGUI");
        assert_eq!(gui.title(), "TemplateGUI - dataset.dat");
        assert_eq!(gui.toolkit().title(), "TemplateGUI - dataset.dat");
    }

    #[test]
    fn test_default_name_position_size() {
        let tmp = tempfile::tempdir().unwrap();
        let gui = gui(tmp.path());
        assert_eq!(gui.name(), "GUI");
        let geometry = gui.toolkit().geometry();
        assert_eq!((geometry.x, geometry.y), (200, 200));
        assert_eq!((geometry.width, geometry.height), (800, 600));
        assert_eq!(gui.phase(), WindowPhase::Created);
    }

    #[test]
    fn test_add_view_docks_in_requested_area() {
        let tmp = tempfile::tempdir().unwrap();
        let mut gui = gui(tmp.path());
        let right = gui.add_view(PlaceholderView::new("TraceView"), AddViewOptions::default());
        let left = gui.add_view(
            PlaceholderView::new("ClusterView"),
            AddViewOptions::at(crate::dock::DockArea::Left).floating(true),
        );

        let right_dock = gui.toolkit().dock(gui.dock(right).unwrap()).unwrap();
        assert_eq!(right_dock.area, crate::dock::DockArea::Right);
        assert!(right_dock.visible);
        assert!(!right_dock.floating);

        let left_dock = gui.toolkit().dock(gui.dock(left).unwrap()).unwrap();
        assert_eq!(left_dock.area, crate::dock::DockArea::Left);
        assert!(left_dock.floating);
    }

    #[test]
    fn test_view_ids_are_not_reused() {
        let tmp = tempfile::tempdir().unwrap();
        let mut gui = gui(tmp.path());
        let a = gui.add_view(PlaceholderView::new("Foo"), AddViewOptions::default());
        gui.close_view(a).unwrap();
        let b = gui.add_view(PlaceholderView::new("Foo"), AddViewOptions::default());
        assert_ne!(a, b);
        assert!(gui.view(a).is_none());
    }

    #[test]
    fn test_close_unknown_view_is_none() {
        let tmp = tempfile::tempdir().unwrap();
        let mut gui = gui(tmp.path());
        assert!(gui.close_view(ViewId(42)).is_none());
        assert!(!gui.handle_native(NativeEvent::DockClosed(DockHandle(42))));
    }

    #[test]
    fn test_show_after_close_is_ignored() {
        let tmp = tempfile::tempdir().unwrap();
        let mut gui = gui(tmp.path());
        assert!(gui.show());
        assert!(gui.close());
        assert!(!gui.show());
        assert_eq!(gui.phase(), WindowPhase::Closed);
    }

    #[test]
    fn test_restore_geometry_state_none_is_noop() {
        let tmp = tempfile::tempdir().unwrap();
        let mut gui = gui(tmp.path());
        assert!(!gui.restore_geometry_state(None));
        assert!(!gui.restore_geometry_state(Some(&GeometryState::default())));
    }
}
