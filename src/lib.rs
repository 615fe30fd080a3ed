//! spikegui - docking main-window shell
//!
//! This crate hosts the views of a spike-sorting GUI in dock containers,
//! routes window-level events to listeners, and persists the window and
//! dock layout per named GUI across sessions.

pub mod cli;
pub mod config;
pub mod config_paths;
pub mod dock;
pub mod events;
pub mod gui;
pub mod state;
pub mod toolkit;
pub mod tracing;
pub mod view;
pub mod views;

// Re-export commonly used types
pub use config::ShellConfig;
pub use dock::DockArea;
pub use events::{EventKind, Flow, GuiEvent, ListenerId};
pub use gui::{Gui, GuiOptions, TrackedView, WindowPhase};
pub use state::{GeometryState, GuiState};
pub use toolkit::{HeadlessToolkit, NativeEvent, Toolkit};
pub use view::{AddViewOptions, View, ViewId, ViewKind, ViewQuery, ViewRegistry};
