// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Listener signatures
//!
//! A channel is parameterized by a function pointer type, e.g.
//! `EventChannel<fn(i32) -> i32>`. That type is the shape of free-function
//! listeners; the bound method shapes are derived from it:
//!
//! - `fn(&mut C, i32) -> i32` for methods that mutate the receiver
//! - `fn(&C, i32) -> i32` for methods that only read it
//!
//! Signatures with up to eight arguments are supported. Arguments are passed
//! to `invoke` as a tuple and cloned once per listener.

/// Function pointer type usable as a channel signature
pub trait Signature: Copy + 'static {
    /// Argument tuple, e.g. `(i32, String)`
    type Args: Clone;
    /// Listener return type
    type Output: 'static;
    /// Method that mutates its receiver
    type Method<C: 'static>: Copy + 'static;
    /// Method that only reads its receiver
    type ConstMethod<C: 'static>: Copy + 'static;

    fn call(self, args: Self::Args) -> Self::Output;

    fn call_method<C: 'static>(
        method: Self::Method<C>,
        receiver: &mut C,
        args: Self::Args,
    ) -> Self::Output;

    fn call_const_method<C: 'static>(
        method: Self::ConstMethod<C>,
        receiver: &C,
        args: Self::Args,
    ) -> Self::Output;

    /// Code address, used for listener identity
    fn address(self) -> usize;

    fn method_address<C: 'static>(method: Self::Method<C>) -> usize;

    fn const_method_address<C: 'static>(method: Self::ConstMethod<C>) -> usize;
}

macro_rules! impl_signature {
    ($($arg:ident),*) => {
        impl<R: 'static, $($arg: Clone + 'static),*> Signature for fn($($arg),*) -> R {
            type Args = ($($arg,)*);
            type Output = R;
            type Method<C: 'static> = fn(&mut C, $($arg),*) -> R;
            type ConstMethod<C: 'static> = fn(&C, $($arg),*) -> R;

            #[allow(non_snake_case)]
            fn call(self, ($($arg,)*): Self::Args) -> R {
                self($($arg),*)
            }

            #[allow(non_snake_case)]
            fn call_method<C: 'static>(
                method: Self::Method<C>,
                receiver: &mut C,
                ($($arg,)*): Self::Args,
            ) -> R {
                method(receiver, $($arg),*)
            }

            #[allow(non_snake_case)]
            fn call_const_method<C: 'static>(
                method: Self::ConstMethod<C>,
                receiver: &C,
                ($($arg,)*): Self::Args,
            ) -> R {
                method(receiver, $($arg),*)
            }

            fn address(self) -> usize {
                self as usize
            }

            fn method_address<C: 'static>(method: Self::Method<C>) -> usize {
                method as usize
            }

            fn const_method_address<C: 'static>(method: Self::ConstMethod<C>) -> usize {
                method as usize
            }
        }
    };
}

impl_signature!();
impl_signature!(A1);
impl_signature!(A1, A2);
impl_signature!(A1, A2, A3);
impl_signature!(A1, A2, A3, A4);
impl_signature!(A1, A2, A3, A4, A5);
impl_signature!(A1, A2, A3, A4, A5, A6);
impl_signature!(A1, A2, A3, A4, A5, A6, A7);
impl_signature!(A1, A2, A3, A4, A5, A6, A7, A8);

#[cfg(test)]
#[path = "signature_tests.rs"]
mod tests;
