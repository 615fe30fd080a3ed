//! Views - application components hosted in dock containers
//!
//! Every view reports a `ViewKind` (its category, e.g. `WaveformView`).
//! The shell uses the kind to derive unique display names and to count
//! and look up views; it never inspects concrete types.

mod registry;

pub use registry::{ViewFactory, ViewRegistry};

use std::any::Any;
use std::borrow::Cow;
use std::fmt;

use crate::dock::DockArea;
use crate::gui::AttachContext;

/// Category tag of a view, used as the base of its display name
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewKind(Cow<'static, str>);

impl ViewKind {
    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ViewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ViewKind {
    fn from(name: &str) -> Self {
        Self(Cow::Owned(name.to_string()))
    }
}

impl From<String> for ViewKind {
    fn from(name: String) -> Self {
        Self(Cow::Owned(name))
    }
}

impl PartialEq<str> for ViewKind {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for ViewKind {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

/// Identifier of a view tracked by a window; never reused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewId(pub(crate) u64);

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "view#{}", self.0)
    }
}

/// Placement of a view's dock container
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddViewOptions {
    /// Dock area; `None` means the default (right)
    pub position: Option<DockArea>,
    pub closable: bool,
    pub floatable: bool,
    /// Force the container floating or docked; `None` keeps the toolkit default
    pub floating: Option<bool>,
}

impl Default for AddViewOptions {
    fn default() -> Self {
        Self {
            position: None,
            closable: true,
            floatable: true,
            floating: None,
        }
    }
}

impl AddViewOptions {
    pub fn at(area: DockArea) -> Self {
        Self {
            position: Some(area),
            ..Self::default()
        }
    }

    pub fn closable(mut self, closable: bool) -> Self {
        self.closable = closable;
        self
    }

    pub fn floatable(mut self, floatable: bool) -> Self {
        self.floatable = floatable;
        self
    }

    pub fn floating(mut self, floating: bool) -> Self {
        self.floating = Some(floating);
        self
    }

    /// The area the container is placed in
    pub fn area(&self) -> DockArea {
        self.position.unwrap_or_default()
    }
}

/// Capability interface every hosted view implements
pub trait View: Any {
    /// Category of this view
    fn kind(&self) -> ViewKind;

    /// Placement used when the view is created from the registry
    fn dock_options(&self) -> AddViewOptions {
        AddViewOptions::default()
    }

    /// Called once, right after the view has been docked
    fn attach(&mut self, _ctx: &mut AttachContext<'_>) {}

    fn as_any(&self) -> &dyn Any;
}

impl dyn View {
    pub fn downcast_ref<T: View>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }
}

impl fmt::Debug for dyn View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("View").field("kind", &self.kind()).finish()
    }
}

/// Filter for `Gui::list_views` / `Gui::get_view`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewQuery {
    /// Views whose kind equals this one
    Kind(ViewKind),
    /// Views whose display name starts with this prefix
    NamePrefix(String),
}

impl ViewQuery {
    pub fn matches(&self, kind: &ViewKind, name: &str) -> bool {
        match self {
            ViewQuery::Kind(k) => k == kind,
            ViewQuery::NamePrefix(prefix) => name.starts_with(prefix.as_str()),
        }
    }
}

impl From<ViewKind> for ViewQuery {
    fn from(kind: ViewKind) -> Self {
        ViewQuery::Kind(kind)
    }
}

impl From<&ViewKind> for ViewQuery {
    fn from(kind: &ViewKind) -> Self {
        ViewQuery::Kind(kind.clone())
    }
}

impl From<&str> for ViewQuery {
    fn from(prefix: &str) -> Self {
        ViewQuery::NamePrefix(prefix.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_kind_equality_across_ownership() {
        const WAVEFORM: ViewKind = ViewKind::from_static("WaveformView");
        assert_eq!(WAVEFORM, ViewKind::from("WaveformView"));
        assert_eq!(WAVEFORM, "WaveformView");
    }

    #[test]
    fn test_query_matches_kind_or_prefix() {
        let kind = ViewKind::from("TraceView");
        assert!(ViewQuery::from(&kind).matches(&kind, "anything"));
        assert!(!ViewQuery::from(ViewKind::from("Other")).matches(&kind, "TraceView"));

        let prefix = ViewQuery::from("view");
        assert!(prefix.matches(&kind, "view1"));
        assert!(prefix.matches(&kind, "view2 (1)"));
        assert!(!prefix.matches(&kind, "TraceView"));
    }

    #[test]
    fn test_add_view_options_defaults() {
        let opts = AddViewOptions::default();
        assert_eq!(opts.area(), DockArea::Right);
        assert!(opts.closable);
        assert!(opts.floatable);
        assert_eq!(opts.floating, None);

        let opts = AddViewOptions::at(DockArea::Bottom).closable(false).floating(true);
        assert_eq!(opts.area(), DockArea::Bottom);
        assert!(!opts.closable);
        assert_eq!(opts.floating, Some(true));
    }
}
