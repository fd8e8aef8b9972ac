// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Listener records
//!
//! A listener is one of three shapes:
//! - `Function` - a plain function pointer
//! - `Method` - a `&mut self` method bound to an `Rc<RefCell<C>>` receiver
//! - `ConstMethod` - a `&self` method bound to an `Rc<C>` or `Rc<RefCell<C>>`
//!
//! Bound listeners hold only a `Weak` to their receiver. The receiver type is
//! erased behind the `Binding` trait so records of different receiver types
//! can share one registry.

use crate::error::ResolveError;
use crate::signature::Signature;
use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

/// Outcome of comparing two listener records
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Identity {
    Equal,
    NotEqual,
    /// One of the receivers has been dropped; never a match
    Expired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ListenerKind {
    Function,
    Method,
    ConstMethod,
}

impl fmt::Display for ListenerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ListenerKind::Function => "function",
            ListenerKind::Method => "method",
            ListenerKind::ConstMethod => "const-method",
        };
        f.write_str(name)
    }
}

/// Non-owning handle through which a bound listener reads its receiver
pub(crate) trait WeakReceiver<C>: Clone + 'static {
    /// Allocation address, or `None` once the receiver is dropped
    fn address(&self) -> Option<usize>;

    fn read<T>(&self, f: impl FnOnce(&C) -> T) -> Result<T, ResolveError>;
}

impl<C: 'static> WeakReceiver<C> for Weak<C> {
    fn address(&self) -> Option<usize> {
        (self.strong_count() > 0).then_some(self.as_ptr().cast::<()>() as usize)
    }

    fn read<T>(&self, f: impl FnOnce(&C) -> T) -> Result<T, ResolveError> {
        let receiver = self.upgrade().ok_or(ResolveError::Expired)?;
        Ok(f(&*receiver))
    }
}

impl<C: 'static> WeakReceiver<C> for Weak<RefCell<C>> {
    fn address(&self) -> Option<usize> {
        (self.strong_count() > 0).then_some(self.as_ptr().cast::<()>() as usize)
    }

    fn read<T>(&self, f: impl FnOnce(&C) -> T) -> Result<T, ResolveError> {
        let receiver = self.upgrade().ok_or(ResolveError::Expired)?;
        let guard = receiver.try_borrow().map_err(|_| ResolveError::Busy)?;
        Ok(f(&*guard))
    }
}

/// A method selector bound to a weakly-held receiver
pub(crate) trait Binding<S: Signature> {
    fn invoke(&self, args: S::Args) -> Result<S::Output, ResolveError>;

    /// Address of the bound method
    fn selector(&self) -> usize;

    fn receiver_address(&self) -> Option<usize>;

    /// Run `f` against the receiver, type-erased
    fn inspect(&self, f: &mut dyn FnMut(&dyn Any) -> bool) -> Result<bool, ResolveError>;

    fn identity(&self, other: &dyn Binding<S>) -> Identity;

    fn clone_box(&self) -> Box<dyn Binding<S>>;
}

/// Compare a typed receiver against another binding's erased receiver.
///
/// Receivers match when they share an allocation or compare equal by value.
/// Receivers of a different concrete type never match.
fn receiver_identity<S, C, W>(receiver: &W, selector: usize, other: &dyn Binding<S>) -> Identity
where
    S: Signature,
    C: PartialEq + 'static,
    W: WeakReceiver<C>,
{
    let (Some(lhs), Some(rhs)) = (receiver.address(), other.receiver_address()) else {
        return Identity::Expired;
    };
    if selector != other.selector() {
        return Identity::NotEqual;
    }
    if lhs == rhs {
        return Identity::Equal;
    }

    let same = receiver.read(|lhs| {
        other.inspect(&mut |rhs| rhs.downcast_ref::<C>().is_some_and(|rhs| lhs == rhs))
    });
    match same {
        Ok(Ok(true)) => Identity::Equal,
        Err(ResolveError::Expired) | Ok(Err(ResolveError::Expired)) => Identity::Expired,
        // A receiver that is mid-call cannot be compared by value
        _ => Identity::NotEqual,
    }
}

pub(crate) struct MethodBinding<S: Signature, C: 'static> {
    receiver: Weak<RefCell<C>>,
    method: S::Method<C>,
}

impl<S: Signature, C: 'static> Clone for MethodBinding<S, C> {
    fn clone(&self) -> Self {
        Self {
            receiver: Weak::clone(&self.receiver),
            method: self.method,
        }
    }
}

impl<S, C> Binding<S> for MethodBinding<S, C>
where
    S: Signature,
    C: PartialEq + 'static,
{
    fn invoke(&self, args: S::Args) -> Result<S::Output, ResolveError> {
        let receiver = self.receiver.upgrade().ok_or(ResolveError::Expired)?;
        let mut guard = receiver
            .try_borrow_mut()
            .map_err(|_| ResolveError::Busy)?;
        Ok(S::call_method::<C>(self.method, &mut *guard, args))
    }

    fn selector(&self) -> usize {
        S::method_address::<C>(self.method)
    }

    fn receiver_address(&self) -> Option<usize> {
        WeakReceiver::<C>::address(&self.receiver)
    }

    fn inspect(&self, f: &mut dyn FnMut(&dyn Any) -> bool) -> Result<bool, ResolveError> {
        WeakReceiver::<C>::read(&self.receiver, |receiver| f(receiver))
    }

    fn identity(&self, other: &dyn Binding<S>) -> Identity {
        receiver_identity::<S, C, _>(&self.receiver, self.selector(), other)
    }

    fn clone_box(&self) -> Box<dyn Binding<S>> {
        Box::new(self.clone())
    }
}

pub(crate) struct ConstMethodBinding<S: Signature, C: 'static, W> {
    receiver: W,
    method: S::ConstMethod<C>,
}

impl<S: Signature, C: 'static, W: Clone> Clone for ConstMethodBinding<S, C, W> {
    fn clone(&self) -> Self {
        Self {
            receiver: self.receiver.clone(),
            method: self.method,
        }
    }
}

impl<S, C, W> Binding<S> for ConstMethodBinding<S, C, W>
where
    S: Signature,
    C: PartialEq + 'static,
    W: WeakReceiver<C>,
{
    fn invoke(&self, args: S::Args) -> Result<S::Output, ResolveError> {
        let method = self.method;
        self.receiver
            .read(|receiver| S::call_const_method::<C>(method, receiver, args))
    }

    fn selector(&self) -> usize {
        S::const_method_address::<C>(self.method)
    }

    fn receiver_address(&self) -> Option<usize> {
        self.receiver.address()
    }

    fn inspect(&self, f: &mut dyn FnMut(&dyn Any) -> bool) -> Result<bool, ResolveError> {
        self.receiver.read(|receiver| f(receiver))
    }

    fn identity(&self, other: &dyn Binding<S>) -> Identity {
        receiver_identity::<S, C, W>(&self.receiver, self.selector(), other)
    }

    fn clone_box(&self) -> Box<dyn Binding<S>> {
        Box::new(self.clone())
    }
}

/// A registered callable
pub(crate) enum Listener<S: Signature> {
    Function(S),
    Method(Box<dyn Binding<S>>),
    ConstMethod(Box<dyn Binding<S>>),
}

impl<S: Signature> Listener<S> {
    pub(crate) fn function(f: S) -> Self {
        Listener::Function(f)
    }

    pub(crate) fn method<C>(owner: &Rc<RefCell<C>>, method: S::Method<C>) -> Self
    where
        C: PartialEq + 'static,
    {
        Listener::Method(Box::new(MethodBinding::<S, C> {
            receiver: Rc::downgrade(owner),
            method,
        }))
    }

    /// A `&self` method on a receiver that is otherwise mutable
    pub(crate) fn const_method<C>(owner: &Rc<RefCell<C>>, method: S::ConstMethod<C>) -> Self
    where
        C: PartialEq + 'static,
    {
        Listener::ConstMethod(Box::new(ConstMethodBinding::<S, C, Weak<RefCell<C>>> {
            receiver: Rc::downgrade(owner),
            method,
        }))
    }

    /// A `&self` method on a read-only receiver
    pub(crate) fn shared_method<C>(owner: &Rc<C>, method: S::ConstMethod<C>) -> Self
    where
        C: PartialEq + 'static,
    {
        Listener::ConstMethod(Box::new(ConstMethodBinding::<S, C, Weak<C>> {
            receiver: Rc::downgrade(owner),
            method,
        }))
    }

    pub(crate) fn kind(&self) -> ListenerKind {
        match self {
            Listener::Function(_) => ListenerKind::Function,
            Listener::Method(_) => ListenerKind::Method,
            Listener::ConstMethod(_) => ListenerKind::ConstMethod,
        }
    }

    pub(crate) fn invoke(&self, args: S::Args) -> Result<S::Output, ResolveError> {
        match self {
            Listener::Function(f) => Ok(f.call(args)),
            Listener::Method(binding) | Listener::ConstMethod(binding) => binding.invoke(args),
        }
    }

    /// Compare two records; records of different kinds never match
    pub(crate) fn identity(&self, other: &Self) -> Identity {
        match (self, other) {
            (Listener::Function(lhs), Listener::Function(rhs)) => {
                if lhs.address() == rhs.address() {
                    Identity::Equal
                } else {
                    Identity::NotEqual
                }
            }
            (Listener::Method(lhs), Listener::Method(rhs))
            | (Listener::ConstMethod(lhs), Listener::ConstMethod(rhs)) => {
                lhs.identity(rhs.as_ref())
            }
            _ => Identity::NotEqual,
        }
    }
}

impl<S: Signature> Clone for Listener<S> {
    fn clone(&self) -> Self {
        match self {
            Listener::Function(f) => Listener::Function(*f),
            Listener::Method(binding) => Listener::Method(binding.clone_box()),
            Listener::ConstMethod(binding) => Listener::ConstMethod(binding.clone_box()),
        }
    }
}

impl<S: Signature> fmt::Debug for Listener<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Listener::Function(func) => f
                .debug_tuple("Function")
                .field(&format_args!("{:#x}", func.address()))
                .finish(),
            Listener::Method(binding) | Listener::ConstMethod(binding) => {
                let name = match self.kind() {
                    ListenerKind::Method => "Method",
                    _ => "ConstMethod",
                };
                f.debug_struct(name)
                    .field("selector", &format_args!("{:#x}", binding.selector()))
                    .field("alive", &binding.receiver_address().is_some())
                    .finish()
            }
        }
    }
}

#[cfg(test)]
#[path = "listener_tests.rs"]
mod tests;
