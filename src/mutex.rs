// SPDX-License-Identifier: MIT OR Apache-2.0
//! The mutual-exclusion guard around a lock's bookkeeping.
//!
//! [`Mutex`] is a small parking mutex. A thread that finds it held records
//! itself in a waiter list and parks; the unlocking thread drains the list and
//! unparks everyone, and each woken thread races to take the lock again.
//! That is all [`RawRwLock`](crate::RawRwLock) needs: its critical sections
//! only touch a few counters.

use crate::guard::Guard;
use crate::spinlock::Spinlock;
use std::cell::UnsafeCell;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

mod block;

/// Returned by [`Mutex::try_lock`] when another thread holds the lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct NotAvailable;

#[derive(Debug)]
pub(crate) struct Mutex<T> {
    pub(crate) inner: UnsafeCell<T>,
    pub(crate) data_lock: AtomicBool,
    pub(crate) waiting_threads: Spinlock<Vec<thread::Thread>>,
}

impl<T> Mutex<T> {
    pub(crate) const fn new(value: T) -> Self {
        Mutex {
            inner: UnsafeCell::new(value),
            data_lock: AtomicBool::new(false),
            waiting_threads: Spinlock::new(vec![]),
        }
    }

    pub(crate) fn try_lock(&self) -> Result<Guard<'_, T>, NotAvailable> {
        if self
            .data_lock
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_ok()
        {
            // SAFETY: the compare-exchange above made this thread the only holder.
            let data = unsafe { &mut *self.inner.get() };
            Ok(Guard { mutex: self, data })
        } else {
            Err(NotAvailable)
        }
    }

    /// Acquires the lock, parking the current thread while it is held elsewhere.
    pub(crate) fn lock_block(&self) -> Guard<'_, T> {
        block::lock_block(self)
    }

    /// Wakes every thread that parked on this mutex.
    pub(crate) fn did_unlock(&self) {
        let threads = self.waiting_threads.with_mut(std::mem::take);
        for thread in threads {
            thread.unpark();
        }
    }
}

unsafe impl<T: Send> Send for Mutex<T> {}
unsafe impl<T: Send> Sync for Mutex<T> {}
