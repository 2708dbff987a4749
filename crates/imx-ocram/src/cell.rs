// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Write-once boot cells.
//!
//! The boundary and the TLB address are sentinels: unset until the boot
//! hook resolves them, immutable afterwards. [`WriteOnce`] wraps
//! [`spin::Once`] so a second write is reported instead of being ignored.

use core::fmt;

use spin::Once;

/// A second write to a [`WriteOnce`] cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlreadySet;

impl fmt::Display for AlreadySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "value already set")
    }
}

/// A value that can be set exactly once.
pub struct WriteOnce<T> {
    inner: Once<T>,
}

impl<T> WriteOnce<T> {
    /// Create an unset cell.
    #[must_use]
    pub const fn new() -> Self {
        Self { inner: Once::new() }
    }

    /// Store `value` if the cell is unset.
    ///
    /// # Errors
    ///
    /// Returns [`AlreadySet`] and drops `value` if a value was stored before.
    pub fn set(&self, value: T) -> Result<&T, AlreadySet> {
        let mut stored_now = false;
        let stored = self.inner.call_once(|| {
            stored_now = true;
            value
        });
        if stored_now { Ok(stored) } else { Err(AlreadySet) }
    }

    /// The stored value, if any.
    #[inline]
    #[must_use]
    pub fn get(&self) -> Option<&T> {
        self.inner.get()
    }

    /// Returns true once a value has been stored.
    #[inline]
    #[must_use]
    pub fn is_set(&self) -> bool {
        self.inner.is_completed()
    }
}

impl<T> Default for WriteOnce<T> {
    fn default() -> Self {
        Self::new()
    }
}
