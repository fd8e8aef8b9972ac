// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Multicast event channel
//!
//! An `EventChannel<S>` calls every registered listener with the same
//! arguments, in registration order, and collects their return values.
//! Listeners bound to a receiver are dropped from the channel the first
//! time an invocation finds the receiver gone.

use crate::error::ResolveError;
use crate::listener::Listener;
use crate::registry::Registry;
use crate::signature::Signature;
use std::cell::RefCell;
use std::fmt;
use std::ops::{AddAssign, SubAssign};
use std::rc::Rc;

/// A typed multicast delegate.
///
/// `S` is a function pointer type naming the listener signature:
///
/// ```
/// use relay_core::EventChannel;
///
/// fn same(x: i32) -> i32 { x }
/// fn double(x: i32) -> i32 { x * 2 }
///
/// let channel = EventChannel::<fn(i32) -> i32>::new();
/// channel.add(same);
/// channel.add(double);
/// assert_eq!(channel.invoke((5,)), vec![5, 10]);
/// ```
///
/// All methods take `&self`, so a listener holding a handle to the channel
/// may add, remove, or invoke while an invocation is in progress.
pub struct EventChannel<S: Signature> {
    label: Option<String>,
    registry: Registry<S>,
}

impl<S: Signature> EventChannel<S> {
    pub fn new() -> Self {
        Self {
            label: None,
            registry: Registry::new(),
        }
    }

    /// Create a channel with one listener already registered
    pub fn with_listener(f: S) -> Self {
        let channel = Self::new();
        channel.add(f);
        channel
    }

    /// Name the channel in log output
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Number of registered listeners, including ones not yet found stale
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    // -- registration --------------------------------------------------------

    /// Register a free function
    pub fn add(&self, f: S) {
        self.register(Listener::function(f));
    }

    /// Register a free function if one is given
    pub fn add_opt(&self, f: Option<S>) {
        if let Some(f) = f {
            self.add(f);
        }
    }

    /// Register a `&mut self` method on `owner`.
    ///
    /// The channel keeps only a weak reference; once `owner` is dropped the
    /// listener is pruned by the next invocation.
    pub fn add_method<C>(&self, owner: &Rc<RefCell<C>>, method: S::Method<C>)
    where
        C: PartialEq + 'static,
    {
        self.register(Listener::method(owner, method));
    }

    pub fn add_method_opt<C>(&self, owner: &Rc<RefCell<C>>, method: Option<S::Method<C>>)
    where
        C: PartialEq + 'static,
    {
        if let Some(method) = method {
            self.add_method(owner, method);
        }
    }

    /// Register a `&self` method on a mutable `owner`
    pub fn add_const_method<C>(&self, owner: &Rc<RefCell<C>>, method: S::ConstMethod<C>)
    where
        C: PartialEq + 'static,
    {
        self.register(Listener::const_method(owner, method));
    }

    pub fn add_const_method_opt<C>(
        &self,
        owner: &Rc<RefCell<C>>,
        method: Option<S::ConstMethod<C>>,
    ) where
        C: PartialEq + 'static,
    {
        if let Some(method) = method {
            self.add_const_method(owner, method);
        }
    }

    /// Register a `&self` method on a read-only `owner`.
    ///
    /// `&mut self` methods cannot be bound to an `Rc<C>`; use
    /// `Rc<RefCell<C>>` with [`add_method`](Self::add_method) instead.
    pub fn add_shared_method<C>(&self, owner: &Rc<C>, method: S::ConstMethod<C>)
    where
        C: PartialEq + 'static,
    {
        self.register(Listener::shared_method(owner, method));
    }

    pub fn add_shared_method_opt<C>(&self, owner: &Rc<C>, method: Option<S::ConstMethod<C>>)
    where
        C: PartialEq + 'static,
    {
        if let Some(method) = method {
            self.add_shared_method(owner, method);
        }
    }

    /// Remove every listener, then register `f`
    pub fn replace(&self, f: S) {
        self.remove_all();
        self.add(f);
    }

    // -- removal -------------------------------------------------------------

    /// Remove the earliest registration of `f`. Returns whether one was found.
    pub fn remove(&self, f: S) -> bool {
        self.unregister(&Listener::function(f))
    }

    /// Remove the earliest `&mut self` binding of `method` to a receiver
    /// equal to `owner`
    pub fn remove_method<C>(&self, owner: &Rc<RefCell<C>>, method: S::Method<C>) -> bool
    where
        C: PartialEq + 'static,
    {
        self.unregister(&Listener::method(owner, method))
    }

    /// Remove the earliest `&self` binding of `method` to a receiver equal
    /// to `owner`
    pub fn remove_const_method<C>(
        &self,
        owner: &Rc<RefCell<C>>,
        method: S::ConstMethod<C>,
    ) -> bool
    where
        C: PartialEq + 'static,
    {
        self.unregister(&Listener::const_method(owner, method))
    }

    pub fn remove_shared_method<C>(&self, owner: &Rc<C>, method: S::ConstMethod<C>) -> bool
    where
        C: PartialEq + 'static,
    {
        self.unregister(&Listener::shared_method(owner, method))
    }

    pub fn remove_all(&self) {
        let removed = self.registry.clear();
        tracing::trace!(channel = self.label_or_default(), removed, "listeners cleared");
    }

    // -- invocation ----------------------------------------------------------

    /// Call every live listener and collect the results in registration order.
    ///
    /// Listeners whose receiver was dropped are removed and contribute no
    /// result. A listener whose receiver is already borrowed (the receiver
    /// is mid-call higher up the stack) is skipped for this invocation only.
    pub fn invoke(&self, args: S::Args) -> Vec<S::Output> {
        let mut results = Vec::new();
        self.dispatch(args, |output| results.push(output));
        results
    }

    fn dispatch(&self, args: S::Args, mut collect: impl FnMut(S::Output)) {
        let mut cursor = None;
        while let Some((id, listener)) = self.registry.next_after(cursor) {
            // Advance first so the listener may remove itself
            cursor = Some(id);

            match listener.invoke(args.clone()) {
                Ok(output) => collect(output),
                Err(ResolveError::Expired) => {
                    self.registry.prune(id);
                    tracing::debug!(
                        channel = self.label_or_default(),
                        id,
                        kind = %listener.kind(),
                        "pruned listener with dropped receiver"
                    );
                }
                Err(ResolveError::Busy) => {
                    tracing::warn!(
                        channel = self.label_or_default(),
                        id,
                        kind = %listener.kind(),
                        "skipped listener whose receiver is already borrowed"
                    );
                }
            }
        }
    }

    fn register(&self, listener: Listener<S>) {
        let kind = listener.kind();
        let id = self.registry.append(listener);
        tracing::trace!(channel = self.label_or_default(), id, %kind, "listener added");
    }

    fn unregister(&self, probe: &Listener<S>) -> bool {
        match self.registry.remove_first_matching(probe) {
            Some(id) => {
                tracing::trace!(
                    channel = self.label_or_default(),
                    id,
                    kind = %probe.kind(),
                    "listener removed"
                );
                true
            }
            None => false,
        }
    }

    fn label_or_default(&self) -> &str {
        self.label.as_deref().unwrap_or("unlabeled")
    }
}

impl<S> EventChannel<S>
where
    S: Signature<Output = ()>,
{
    /// Call every live listener for its side effects
    pub fn emit(&self, args: S::Args) {
        self.dispatch(args, |_| {});
    }
}

impl<S: Signature> Default for EventChannel<S> {
    fn default() -> Self {
        Self::new()
    }
}

/// Copies every listener record. Bound receivers stay weakly held, so a clone
/// never keeps a receiver alive.
impl<S: Signature> Clone for EventChannel<S> {
    fn clone(&self) -> Self {
        Self {
            label: self.label.clone(),
            registry: self.registry.clone(),
        }
    }
}

impl<S: Signature> fmt::Debug for EventChannel<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventChannel")
            .field("label", &self.label)
            .field("listeners", &self.len())
            .finish()
    }
}

/// `channel += f` is [`EventChannel::add`]
impl<S: Signature> AddAssign<S> for EventChannel<S> {
    fn add_assign(&mut self, f: S) {
        self.add(f);
    }
}

/// `channel -= f` is [`EventChannel::remove`]
impl<S: Signature> SubAssign<S> for EventChannel<S> {
    fn sub_assign(&mut self, f: S) {
        self.remove(f);
    }
}

#[cfg(test)]
#[path = "channel_tests.rs"]
mod tests;
