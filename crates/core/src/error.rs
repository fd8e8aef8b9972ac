// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Listener resolution errors
//!
//! These never escape `EventChannel::invoke`; the invocation loop consumes
//! them to decide whether a record is pruned or skipped.

use thiserror::Error;

/// Why a bound listener could not be called
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// Every strong reference to the receiver has been dropped
    #[error("listener receiver has been dropped")]
    Expired,
    /// The receiver is already borrowed (reentrant call on the same receiver)
    #[error("listener receiver is already borrowed")]
    Busy,
}
