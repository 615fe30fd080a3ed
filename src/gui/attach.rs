//! Context handed to `View::attach`

use super::{MenuBar, StatusBar};
use crate::toolkit::{MenuHandle, Toolkit};
use crate::view::ViewId;

/// What a view may touch while it is being attached to a window
pub struct AttachContext<'a> {
    pub(crate) id: ViewId,
    pub(crate) name: &'a str,
    pub(crate) toolkit: &'a mut dyn Toolkit,
    pub(crate) menus: &'a mut MenuBar,
    pub(crate) status: &'a mut StatusBar,
}

impl AttachContext<'_> {
    pub fn id(&self) -> ViewId {
        self.id
    }

    /// Display name assigned to the view
    pub fn name(&self) -> &str {
        self.name
    }

    /// Return or create a window menu
    pub fn get_menu(&mut self, name: &str) -> MenuHandle {
        self.menus.get_or_create(name, &mut *self.toolkit)
    }

    /// Set the status bar message, unless the status bar is locked
    pub fn set_status_message(&mut self, message: impl Into<String>) {
        if self.status.set(message) {
            self.toolkit.show_status_message(self.status.message());
        }
    }
}
