//! Placeholder view for prototyping
//!
//! Stands in for a real plotting view: it has a kind, a preferred dock
//! area, and registers itself in the `&View` menu when attached.

use std::any::Any;

use super::default_area;
use crate::dock::DockArea;
use crate::gui::AttachContext;
use crate::view::{AddViewOptions, View, ViewKind};

/// Placeholder view state
#[derive(Debug, Clone)]
pub struct PlaceholderView {
    kind: ViewKind,
    area: DockArea,
    /// Display name assigned by the window, once attached
    name: Option<String>,
}

impl PlaceholderView {
    pub fn new(kind: impl Into<ViewKind>) -> Self {
        let kind = kind.into();
        let area = default_area(&kind);
        Self {
            kind,
            area,
            name: None,
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

impl View for PlaceholderView {
    fn kind(&self) -> ViewKind {
        self.kind.clone()
    }

    fn dock_options(&self) -> AddViewOptions {
        AddViewOptions::at(self.area)
    }

    fn attach(&mut self, ctx: &mut AttachContext<'_>) {
        ctx.get_menu("&View");
        self.name = Some(ctx.name().to_string());
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
