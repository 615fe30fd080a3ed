//! View creation registry: view kind → zero-argument factory

use std::collections::BTreeMap;
use std::fmt;

use super::{View, ViewKind};

/// Creates a fresh view instance
pub type ViewFactory = Box<dyn Fn() -> Box<dyn View>>;

/// Registry of view factories supplied by the application
#[derive(Default)]
pub struct ViewRegistry {
    factories: BTreeMap<ViewKind, ViewFactory>,
}

impl ViewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the factory for a view kind
    pub fn register<F>(&mut self, kind: impl Into<ViewKind>, factory: F)
    where
        F: Fn() -> Box<dyn View> + 'static,
    {
        self.factories.insert(kind.into(), Box::new(factory));
    }

    /// Builder-style `register`
    pub fn with<F>(mut self, kind: impl Into<ViewKind>, factory: F) -> Self
    where
        F: Fn() -> Box<dyn View> + 'static,
    {
        self.register(kind, factory);
        self
    }

    /// Create a view of the given kind, if a factory is registered
    pub fn create(&self, kind: &ViewKind) -> Option<Box<dyn View>> {
        self.factories.get(kind).map(|factory| factory())
    }

    pub fn contains(&self, kind: &ViewKind) -> bool {
        self.factories.contains_key(kind)
    }

    /// Registered kinds in sorted order
    pub fn kinds(&self) -> impl Iterator<Item = &ViewKind> {
        self.factories.keys()
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl fmt::Debug for ViewRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.factories.keys()).finish()
    }
}
