//! Menu registry: one toolkit menu per name, created on first use

use crate::toolkit::{MenuHandle, Toolkit};

#[derive(Debug, Clone, Default)]
pub struct MenuBar {
    /// Menus in creation order
    menus: Vec<(String, MenuHandle)>,
}

impl MenuBar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the menu called `name`, creating it in the toolkit if needed
    pub fn get_or_create(&mut self, name: &str, toolkit: &mut dyn Toolkit) -> MenuHandle {
        if let Some(handle) = self.get(name) {
            return handle;
        }
        let handle = toolkit.add_menu(name);
        tracing::trace!("Create menu {}", name);
        self.menus.push((name.to_string(), handle));
        handle
    }

    pub fn get(&self, name: &str) -> Option<MenuHandle> {
        self.menus
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, handle)| *handle)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.menus.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.menus.len()
    }

    pub fn is_empty(&self) -> bool {
        self.menus.is_empty()
    }
}
