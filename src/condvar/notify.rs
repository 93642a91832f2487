// SPDX-License-Identifier: MIT OR Apache-2.0
use super::Condvar;
use std::sync::atomic::Ordering;

impl Condvar {
    /// Wakes one waiter, the most recently parked. No-op when nobody waits.
    #[cfg(test)]
    pub(crate) fn notify_one(&self) {
        let waiter = self.waiting_threads.with_mut(|threads| threads.pop());
        if let Some(waiter) = waiter {
            waiter.notified.store(true, Ordering::Release);
            waiter.thread.unpark();
        }
    }

    /// Wakes every thread waiting on this channel.
    ///
    /// Returns how many threads were woken, which the lock only uses for
    /// trace logging.
    pub(crate) fn notify_all(&self) -> usize {
        let waiters = self.waiting_threads.with_mut(std::mem::take);
        let woken = waiters.len();
        for waiter in waiters {
            waiter.notified.store(true, Ordering::Release);
            waiter.thread.unpark();
        }
        woken
    }
}
