// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! relay-core: typed multicast event channels
//!
//! This crate provides:
//! - `EventChannel` - call many listeners through one invocation and collect
//!   their results in registration order
//! - Free-function and bound-method listeners, with bound receivers held
//!   weakly and pruned once dropped
//! - `Signature` - the function pointer shapes a channel can carry

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod channel;
mod error;
mod listener;
mod registry;
mod signature;

pub use channel::EventChannel;
pub use signature::Signature;
