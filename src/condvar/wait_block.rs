// SPDX-License-Identifier: MIT OR Apache-2.0
use super::{Condvar, Waiter};
use crate::guard::Guard;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

impl Condvar {
    /// Releases the mutex behind `guard`, parks until notified, and
    /// re-acquires the mutex before returning.
    ///
    /// Registration happens before the mutex is released, so a notification
    /// issued by anyone who takes the mutex afterwards cannot be missed.
    pub(crate) fn wait_block<'a, T>(&self, guard: Guard<'a, T>) -> Guard<'a, T> {
        let mutex = guard.mutex;
        let notified = Arc::new(AtomicBool::new(false));

        self.waiting_threads.with_mut(|threads| {
            threads.push(Waiter {
                thread: thread::current(),
                notified: Arc::clone(&notified),
            });
        });

        drop(guard);

        while !notified.load(Ordering::Acquire) {
            thread::park();
        }

        mutex.lock_block()
    }

    /// Waits for as long as `condition` returns `true`, checking it before
    /// the first wait and after every wakeup.
    pub(crate) fn wait_block_while<'a, T, F>(
        &self,
        mut guard: Guard<'a, T>,
        mut condition: F,
    ) -> Guard<'a, T>
    where
        F: FnMut(&mut T) -> bool,
    {
        while condition(&mut guard) {
            guard = self.wait_block(guard);
        }
        guard
    }
}
