//! Extension trait to ignore mutex poisoning.
//!
//! The warm cache stores plain byte buffers where a panic in a fetch task can't leave the
//! map half-updated, so a poisoned lock is safe to keep using.

use std::sync::{Mutex, MutexGuard};

pub trait IgnorePoison<T> {
    /// Locks the mutex, ignoring poison.
    fn lock_ignore_poison(&self) -> MutexGuard<'_, T>;
}

impl<T> IgnorePoison<T> for Mutex<T> {
    fn lock_ignore_poison(&self) -> MutexGuard<'_, T> {
        self.lock().unwrap_or_else(|e| e.into_inner())
    }
}
