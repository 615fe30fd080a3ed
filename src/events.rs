//! Window-level events and the per-window listener registry
//!
//! Events are dispatched synchronously, in subscription order. Listeners
//! receive the window mutably and may call back into it, including
//! subscribing, unsubscribing and triggering nested events. A listener
//! that is already running is skipped by nested dispatches.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::gui::Gui;
use crate::view::{View, ViewId};

/// Event categories listeners subscribe to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// The window is about to be shown
    Show,
    /// The window is about to close; vetoable
    Close,
    /// A view was docked
    AddView,
    /// A view's dock container was closed
    DockClosed,
    /// A view was removed after its dock container closed
    CloseView,
}

/// An event emitted by the window
#[derive(Debug, Clone, Copy)]
pub enum GuiEvent<'a> {
    Show,
    Close,
    AddView {
        id: ViewId,
        name: &'a str,
    },
    DockClosed {
        id: ViewId,
        name: &'a str,
    },
    CloseView {
        id: ViewId,
        name: &'a str,
        view: &'a (dyn View + 'static),
    },
}

impl GuiEvent<'_> {
    pub fn kind(&self) -> EventKind {
        match self {
            GuiEvent::Show => EventKind::Show,
            GuiEvent::Close => EventKind::Close,
            GuiEvent::AddView { .. } => EventKind::AddView,
            GuiEvent::DockClosed { .. } => EventKind::DockClosed,
            GuiEvent::CloseView { .. } => EventKind::CloseView,
        }
    }

    /// The view this event concerns, if any
    pub fn view_id(&self) -> Option<ViewId> {
        match self {
            GuiEvent::Show | GuiEvent::Close => None,
            GuiEvent::AddView { id, .. }
            | GuiEvent::DockClosed { id, .. }
            | GuiEvent::CloseView { id, .. } => Some(*id),
        }
    }
}

/// Listener verdict; only `close` honors a veto
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Veto,
}

impl From<()> for Flow {
    fn from(_: ()) -> Self {
        Flow::Continue
    }
}

impl From<bool> for Flow {
    fn from(proceed: bool) -> Self {
        if proceed {
            Flow::Continue
        } else {
            Flow::Veto
        }
    }
}

/// Handle returned by `Gui::subscribe`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

pub(crate) type Callback<T> = Rc<RefCell<dyn FnMut(&mut Gui<T>, &GuiEvent<'_>) -> Flow>>;

struct Entry<T> {
    id: ListenerId,
    kind: EventKind,
    callback: Callback<T>,
}

/// Listeners owned by one window
pub(crate) struct Listeners<T> {
    next_id: u64,
    entries: Vec<Entry<T>>,
}

impl<T> Default for Listeners<T> {
    fn default() -> Self {
        Self {
            next_id: 1,
            entries: Vec::new(),
        }
    }
}

impl<T: 'static> Listeners<T> {
    pub(crate) fn subscribe<F, R>(&mut self, kind: EventKind, mut listener: F) -> ListenerId
    where
        F: FnMut(&mut Gui<T>, &GuiEvent<'_>) -> R + 'static,
        R: Into<Flow> + 'static,
    {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        let callback: Callback<T> = Rc::new(RefCell::new(
            move |gui: &mut Gui<T>, event: &GuiEvent<'_>| -> Flow { listener(gui, event).into() },
        ));
        self.entries.push(Entry { id, kind, callback });
        id
    }
}

impl<T> Listeners<T> {
    pub(crate) fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }

    pub(crate) fn contains(&self, id: ListenerId) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    /// Listeners for `kind` at this moment, in subscription order
    pub(crate) fn snapshot(&self, kind: EventKind) -> Vec<(ListenerId, Callback<T>)> {
        self.entries
            .iter()
            .filter(|e| e.kind == kind)
            .map(|e| (e.id, Rc::clone(&e.callback)))
            .collect()
    }

    #[cfg(test)]
    pub(crate) fn count(&self, kind: EventKind) -> usize {
        self.entries.iter().filter(|e| e.kind == kind).count()
    }
}

impl<T> fmt::Debug for Listeners<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|e| (e.id, e.kind)))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toolkit::HeadlessToolkit;

    #[test]
    fn test_flow_from_listener_returns() {
        assert_eq!(Flow::from(()), Flow::Continue);
        assert_eq!(Flow::from(true), Flow::Continue);
        assert_eq!(Flow::from(false), Flow::Veto);
    }

    #[test]
    fn test_subscribe_unsubscribe() {
        let mut listeners: Listeners<HeadlessToolkit> = Listeners::default();
        let a = listeners.subscribe(EventKind::Show, |_, _| {});
        let b = listeners.subscribe(EventKind::Close, |_, _| true);
        assert_ne!(a, b);
        assert_eq!(listeners.count(EventKind::Show), 1);
        assert_eq!(listeners.snapshot(EventKind::Close).len(), 1);

        assert!(listeners.unsubscribe(a));
        assert!(!listeners.unsubscribe(a));
        assert!(!listeners.contains(a));
        assert!(listeners.contains(b));
    }

    #[test]
    fn test_event_kind_and_view_id() {
        let event = GuiEvent::AddView {
            id: ViewId(7),
            name: "TraceView",
        };
        assert_eq!(event.kind(), EventKind::AddView);
        assert_eq!(event.view_id(), Some(ViewId(7)));
        assert_eq!(GuiEvent::Close.view_id(), None);
    }
}
