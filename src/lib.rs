// SPDX-License-Identifier: MIT OR Apache-2.0
//! A reader-writer lock with writer priority bands.
//!
//! [`PriorityRwLock`] lets many readers share data while writers take turns
//! one at a time. Every writer names a *band* when it asks for the lock; band
//! `0` is served before band `1`, band `1` before band `2`, and so on. Any
//! writer that is waiting, in any band, holds back newly arriving readers, so
//! a busy stream of readers cannot starve writers.
//!
//! The crate has two layers:
//!
//! - [`PriorityRwLock<T>`] protects a value and hands out RAII guards.
//! - [`RawRwLock`] is the bare protocol with explicit acquire and release
//!   calls, for callers that manage pairing themselves.
//!
//! Both block the calling thread with thread parking. There are no timeouts,
//! no try-lock and no upgrades between modes.
//!
//! # Examples
//!
//! ```
//! use prio_rwlock::PriorityRwLock;
//!
//! let lock = PriorityRwLock::new(Vec::<u32>::new());
//!
//! lock.write(0).unwrap().push(1);
//! lock.with_write(2, |v| v.push(2)).unwrap();
//!
//! assert_eq!(*lock.read(), vec![1, 2]);
//! ```
//!
//! Misuse of the raw protocol is reported, not ignored:
//!
//! ```
//! use prio_rwlock::{LockError, RawRwLock};
//!
//! let lock = RawRwLock::with_bands(2).unwrap();
//! assert_eq!(lock.release_write(1), Err(LockError::NotWriteLocked { band: 1 }));
//! ```
//!
//! # Logging
//!
//! Acquisitions, releases and hand-off decisions are reported at `trace`
//! level through the [`log`] facade. The crate never installs a logger.

mod condvar;
mod error;
mod guard;
mod mutex;
pub mod rwlock;
mod spinlock;

#[cfg(test)]
mod harness;

pub use error::{ConfigError, LockError};
pub use guard::{ReadGuard, WriteGuard};
pub use rwlock::{Builder, DEFAULT_BANDS, Mode, PriorityRwLock, RawRwLock, Snapshot};
