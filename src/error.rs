// SPDX-License-Identifier: MIT OR Apache-2.0
//! Error types.
//!
//! Invariant violations inside the lock are not errors: they panic, because
//! continuing would leave every thread sharing a corrupt state. The types
//! here cover the two things a caller can get wrong.

use std::fmt;

/// A lock could not be built with the requested configuration.
///
/// # Examples
///
/// ```
/// use prio_rwlock::{ConfigError, PriorityRwLock};
///
/// let result = PriorityRwLock::builder().bands(0).build(());
/// assert!(matches!(result, Err(ConfigError::NoBands)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ConfigError {
    /// A lock needs at least one writer band.
    NoBands,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NoBands => write!(f, "a priority lock needs at least one writer band"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// A lock operation was called in a way that does not match the lock's state.
///
/// None of these leave a mark on the lock: the operation is refused before
/// any counter changes.
///
/// # Examples
///
/// ```
/// use prio_rwlock::{LockError, RawRwLock};
///
/// let lock = RawRwLock::new();
/// assert_eq!(lock.release_read(), Err(LockError::NotReadLocked));
/// assert_eq!(
///     lock.acquire_write(7),
///     Err(LockError::BandOutOfRange { band: 7, bands: 3 })
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum LockError {
    /// The band is not one of the lock's configured bands.
    BandOutOfRange {
        /// The band that was passed.
        band: usize,
        /// How many bands the lock has.
        bands: usize,
    },
    /// A read release with no reader holding the lock.
    NotReadLocked,
    /// A write release for a band that does not hold the lock.
    NotWriteLocked {
        /// The band that was passed.
        band: usize,
    },
}

impl fmt::Display for LockError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LockError::BandOutOfRange { band, bands } => {
                write!(f, "band {band} out of range for a lock with {bands} bands")
            }
            LockError::NotReadLocked => write!(f, "lock is not held for reading"),
            LockError::NotWriteLocked { band } => {
                write!(f, "lock is not held for writing in band {band}")
            }
        }
    }
}

impl std::error::Error for LockError {}
