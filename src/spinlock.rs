// SPDX-License-Identifier: MIT OR Apache-2.0
//! A spinlock for the waiter lists of the parking primitives.
//!
//! Both [`Mutex`](crate::mutex::Mutex) and [`Condvar`](crate::condvar::Condvar)
//! keep a list of parked threads. Pushing and draining those lists takes a
//! handful of instructions, so they are protected by spinning rather than by
//! another parking lock.

use std::cell::UnsafeCell;
use std::sync::atomic::{AtomicBool, Ordering};

/// A spinlock for protecting short-lived critical sections.
///
/// The only way in is [`with_mut`](Self::with_mut), so every access is scoped
/// and the lock cannot be left held by accident.
#[derive(Debug)]
pub(crate) struct Spinlock<T> {
    data: UnsafeCell<T>,
    locked: AtomicBool,
}

impl<T> Spinlock<T> {
    pub(crate) const fn new(data: T) -> Self {
        Spinlock {
            data: UnsafeCell::new(data),
            locked: AtomicBool::new(false),
        }
    }

    /// Runs `f` with exclusive access to the protected data.
    ///
    /// The closure must not block or take another spinlock; waiters burn CPU
    /// for as long as it runs.
    pub(crate) fn with_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut T) -> R,
    {
        while self
            .locked
            .compare_exchange_weak(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            while self.locked.load(Ordering::Relaxed) {
                std::hint::spin_loop();
            }
        }

        let _unlock = Unlock(&self.locked);
        // SAFETY: `locked` was swapped from false to true by this thread, so
        // no other reference to `data` exists until `_unlock` drops.
        unsafe { f(&mut *self.data.get()) }
    }
}

/// Clears the flag on scope exit, including when the closure unwinds.
struct Unlock<'a>(&'a AtomicBool);

impl Drop for Unlock<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

unsafe impl<T: Send> Send for Spinlock<T> {}
unsafe impl<T: Send> Sync for Spinlock<T> {}
