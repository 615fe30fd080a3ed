//! Native toolkit seam
//!
//! The shell never subclasses toolkit widgets. It holds a `Toolkit`,
//! drives it through this trait, and receives the native events it cares
//! about as `NativeEvent`s via `Gui::handle_native`.

mod headless;

pub use headless::{DockSnapshot, HeadlessToolkit, WindowGeometry};

use crate::dock::{DockHandle, DockSpec};

/// Toolkit-issued identifier for a menu in the menu bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MenuHandle(pub u64);

/// Native events forwarded from the toolkit to the shell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NativeEvent {
    /// The platform asked the window to show
    ShowRequested,
    /// The user or platform asked the window to close
    CloseRequested,
    /// A dock container's close button was pressed
    DockClosed(DockHandle),
}

/// Operations the shell needs from a docking toolkit
pub trait Toolkit {
    /// Whether an application context exists to own windows
    fn has_application(&self) -> bool;

    // === Main window ===
    fn set_title(&mut self, title: &str);
    fn move_to(&mut self, x: i32, y: i32);
    fn resize(&mut self, width: u32, height: u32);
    fn show_window(&mut self);
    fn close_window(&mut self);

    // === Dock containers ===
    /// Create a dock container and attach it in `spec.area`
    fn add_dock(&mut self, spec: &DockSpec) -> DockHandle;
    fn set_dock_floating(&mut self, dock: DockHandle, floating: bool);
    fn show_dock(&mut self, dock: DockHandle);
    /// Destroy a dock container
    fn remove_dock(&mut self, dock: DockHandle);

    // === Menu and status bars ===
    fn add_menu(&mut self, name: &str) -> MenuHandle;
    fn show_status_message(&mut self, message: &str);

    // === Geometry blobs ===
    /// Opaque bytes describing the main window geometry
    fn save_geometry(&self) -> Vec<u8>;
    /// Opaque bytes describing the dock layout
    fn save_state(&self) -> Vec<u8>;
    /// Returns false if the blob could not be applied
    fn restore_geometry(&mut self, geometry: &[u8]) -> bool;
    /// Returns false if the blob could not be applied; docks must already exist
    fn restore_state(&mut self, state: &[u8]) -> bool;
}
