// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Ordered listener storage
//!
//! Every record gets a sequence id when appended. Ids only grow, so the
//! entries stay sorted by id and a walk can resume after any id even when
//! records were added or removed in between.
//!
//! Borrows of the entry list are never held while user code runs.

use crate::listener::{Identity, Listener};
use crate::signature::Signature;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Sequence id of a registered listener
pub(crate) type ListenerId = u64;

struct Entry<S: Signature> {
    id: ListenerId,
    listener: Rc<Listener<S>>,
}

pub(crate) struct Registry<S: Signature> {
    entries: RefCell<Vec<Entry<S>>>,
    next_id: Cell<ListenerId>,
}

impl<S: Signature> Registry<S> {
    pub(crate) fn new() -> Self {
        Self {
            entries: RefCell::new(Vec::new()),
            next_id: Cell::new(0),
        }
    }

    /// Append a record at the end; duplicates are allowed
    pub(crate) fn append(&self, listener: Listener<S>) -> ListenerId {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.entries.borrow_mut().push(Entry {
            id,
            listener: Rc::new(listener),
        });
        id
    }

    /// Remove the earliest record equal to `probe`.
    ///
    /// Records whose receiver has expired never match; they are left for
    /// the invocation sweep.
    pub(crate) fn remove_first_matching(&self, probe: &Listener<S>) -> Option<ListenerId> {
        // Comparison may run receiver `PartialEq` impls, so scan a snapshot
        let candidates: Vec<(ListenerId, Rc<Listener<S>>)> = self
            .entries
            .borrow()
            .iter()
            .map(|entry| (entry.id, Rc::clone(&entry.listener)))
            .collect();

        let id = candidates
            .iter()
            .find(|(_, listener)| listener.identity(probe) == Identity::Equal)
            .map(|(id, _)| *id)?;

        self.prune(id).then_some(id)
    }

    /// Remove the record with the given id, if still present
    pub(crate) fn prune(&self, id: ListenerId) -> bool {
        let mut entries = self.entries.borrow_mut();
        match entries.binary_search_by_key(&id, |entry| entry.id) {
            Ok(index) => {
                entries.remove(index);
                true
            }
            Err(_) => false,
        }
    }

    /// Remove every record, returning how many were removed
    pub(crate) fn clear(&self) -> usize {
        let mut entries = self.entries.borrow_mut();
        let removed = entries.len();
        entries.clear();
        removed
    }

    /// First record registered after `cursor` (or the first record overall)
    pub(crate) fn next_after(
        &self,
        cursor: Option<ListenerId>,
    ) -> Option<(ListenerId, Rc<Listener<S>>)> {
        let entries = self.entries.borrow();
        let start = match cursor {
            Some(cursor) => entries.partition_point(|entry| entry.id <= cursor),
            None => 0,
        };
        entries
            .get(start)
            .map(|entry| (entry.id, Rc::clone(&entry.listener)))
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl<S: Signature> Default for Registry<S> {
    fn default() -> Self {
        Self::new()
    }
}

/// Deep copy: every record is duplicated, weak receivers stay weak
impl<S: Signature> Clone for Registry<S> {
    fn clone(&self) -> Self {
        let entries = self
            .entries
            .borrow()
            .iter()
            .map(|entry| Entry {
                id: entry.id,
                listener: Rc::new(Listener::clone(&entry.listener)),
            })
            .collect();

        Self {
            entries: RefCell::new(entries),
            next_id: Cell::new(self.next_id.get()),
        }
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
