//! Unique display names for views
//!
//! The first live view of a kind is named after the kind (`TraceView`).
//! Further views get the kind's next index (`TraceView (1)`,
//! `TraceView (2)`, ...). The index only grows, and a candidate that
//! another live view already holds (kinds are free-form strings, so
//! kind `Foo (1)` can clash with the second `Foo`) is skipped.

use std::collections::HashMap;

use crate::view::ViewKind;

#[derive(Debug, Default)]
pub(crate) struct ViewNamer {
    /// Next usable index per kind
    next_index: HashMap<ViewKind, usize>,
}

impl ViewNamer {
    /// Name a new view of `kind`, given how many views of that kind are
    /// live and which names are taken
    pub(crate) fn assign<F>(&mut self, kind: &ViewKind, live: usize, is_taken: F) -> String
    where
        F: Fn(&str) -> bool,
    {
        let index = self.next_index.entry(kind.clone()).or_insert(0);
        if live == 0 {
            let name = kind.to_string();
            if !is_taken(&name) {
                *index += 1;
                return name;
            }
        }
        loop {
            let n = (*index).max(1);
            *index = n + 1;
            let name = format!("{} ({})", kind, n);
            if !is_taken(&name) {
                return name;
            }
        }
    }

    #[cfg(test)]
    fn next_index(&self, kind: &ViewKind) -> usize {
        self.next_index.get(kind).copied().unwrap_or(0)
    }
}
