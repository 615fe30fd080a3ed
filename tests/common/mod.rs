//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::any::Any;
use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

use spikegui::gui::AttachContext;
use spikegui::{AddViewOptions, Gui, GuiOptions, HeadlessToolkit, View, ViewKind};

/// Minimal view with a fixed kind
#[derive(Debug, Clone)]
pub struct TestView {
    pub kind: &'static str,
}

impl TestView {
    pub fn new(kind: &'static str) -> Self {
        Self { kind }
    }
}

impl View for TestView {
    fn kind(&self) -> ViewKind {
        ViewKind::from_static(self.kind)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// View that records the name it was attached under and touches menus/status
#[derive(Debug, Default)]
pub struct AttachingView {
    pub attached_as: Option<String>,
}

impl View for AttachingView {
    fn kind(&self) -> ViewKind {
        ViewKind::from_static("AttachingView")
    }

    fn dock_options(&self) -> AddViewOptions {
        AddViewOptions::at(spikegui::DockArea::Top).closable(false)
    }

    fn attach(&mut self, ctx: &mut AttachContext<'_>) {
        let name = ctx.name().to_string();
        ctx.get_menu("&Attaching");
        ctx.set_status_message(format!("attached {}", name));
        self.attached_as = Some(name);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Window with a headless toolkit storing its state under `dir`
pub fn test_gui(dir: &Path) -> Gui<HeadlessToolkit> {
    Gui::new(HeadlessToolkit::new(), GuiOptions::default().config_dir(dir))
        .expect("headless GUI")
}

/// Shared event log for listeners
pub fn event_log() -> Rc<RefCell<Vec<String>>> {
    Rc::new(RefCell::new(Vec::new()))
}
