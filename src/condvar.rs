// SPDX-License-Identifier: MIT OR Apache-2.0
//! A wait/notify channel paired with the internal [`Mutex`](crate::mutex::Mutex).
//!
//! A waiter records its thread handle and a `notified` flag in the channel
//! before it lets go of the mutex, then parks until the flag is set. Notifying
//! drains the list, sets each flag and unparks each thread. Because the flag
//! is checked around `park`, a stray unpark never counts as a notification.
//!
//! Callers are still expected to re-check their predicate after every return:
//! [`notify_all`](Condvar::notify_all) wakes every waiter, and only the
//! predicate decides which of them may proceed.

use crate::spinlock::Spinlock;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::thread;

#[derive(Debug)]
struct Waiter {
    thread: thread::Thread,
    notified: Arc<AtomicBool>,
}

#[derive(Debug)]
pub(crate) struct Condvar {
    waiting_threads: Spinlock<Vec<Waiter>>,
}

impl Condvar {
    pub(crate) const fn new() -> Self {
        Condvar {
            waiting_threads: Spinlock::new(vec![]),
        }
    }

    /// Number of threads currently parked on this channel.
    #[cfg(test)]
    pub(crate) fn waiters(&self) -> usize {
        self.waiting_threads.with_mut(|threads| threads.len())
    }
}

mod notify;
mod wait_block;
