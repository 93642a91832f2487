// SPDX-License-Identifier: MIT OR Apache-2.0
//! A reader-writer lock with writer priority bands.
//!
//! # Arbitration
//!
//! Writers are sorted into bands numbered from `0`; a lower number means
//! higher precedence. The lock enforces three rules:
//!
//! 1. **Mutual exclusion.** At most one writer holds the lock, and never
//!    together with a reader.
//! 2. **Writer preference.** A reader is not admitted while any writer, of any
//!    band, holds the lock or is waiting for it. Readers already inside keep
//!    the lock until they release it; new readers queue behind the writer.
//! 3. **Strict band ordering.** A writer does not proceed while a writer of a
//!    band with higher precedence is waiting.
//!
//! When a writer releases, the whole highest-precedence band with waiters is
//! woken and one of them takes the lock; if no writer waits, the waiting
//! readers are woken instead and all of them get in together.
//!
//! Fairness is strict but not cumulative: a steady stream of band-0 writers
//! starves band 1 and below, and a steady stream of writers starves readers.
//!
//! # Examples
//!
//! ```
//! use prio_rwlock::PriorityRwLock;
//! use std::sync::Arc;
//! use std::thread;
//!
//! let config = Arc::new(PriorityRwLock::new(vec![String::from("a")]));
//!
//! let readers: Vec<_> = (0..4)
//!     .map(|_| {
//!         let config = Arc::clone(&config);
//!         thread::spawn(move || config.with_read(|entries| entries.len()))
//!     })
//!     .collect();
//!
//! // An urgent update goes in band 0, a housekeeping one in band 2.
//! config.with_write(0, |entries| entries.push(String::from("b"))).unwrap();
//! config.with_write(2, |entries| entries.retain(|e| e != "a")).unwrap();
//!
//! for reader in readers {
//!     assert!(reader.join().unwrap() >= 1);
//! }
//! assert_eq!(*config.read(), vec![String::from("b")]);
//! ```

mod builder;
mod inner;
mod raw;
mod read;
mod state;
mod write;


pub use builder::Builder;
pub use inner::PriorityRwLock;
pub use raw::RawRwLock;
pub use state::{Mode, Snapshot};

/// The number of writer bands a lock gets unless configured otherwise.
pub const DEFAULT_BANDS: usize = 3;
