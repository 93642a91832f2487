// SPDX-License-Identifier: MIT OR Apache-2.0
use super::builder::Builder;
use super::raw::RawRwLock;
use super::state::Snapshot;
use std::cell::UnsafeCell;
use std::fmt;

/// A reader-writer lock whose writers are ordered by priority band.
///
/// Any number of readers may hold the lock together. A writer holds it alone,
/// and picks a band when it asks for it: band `0` goes first, then band `1`,
/// and so on. A writer that is merely *waiting* already keeps new readers out.
/// See the [module documentation](crate::rwlock) for the full rules.
///
/// Access goes through guards. [`read`](Self::read) returns a [`ReadGuard`],
/// [`write`](Self::write) a [`WriteGuard`]; dropping a guard releases the lock
/// in the mode it was taken.
///
/// [`ReadGuard`]: crate::ReadGuard
/// [`WriteGuard`]: crate::WriteGuard
///
/// # Examples
///
/// ```
/// use prio_rwlock::PriorityRwLock;
///
/// let lock = PriorityRwLock::new(0u32);
///
/// {
///     let a = lock.read();
///     let b = lock.read();
///     assert_eq!(*a + *b, 0);
/// }
///
/// {
///     let mut counter = lock.write(1).unwrap();
///     *counter += 1;
/// }
///
/// assert_eq!(lock.with_read(|counter| *counter), 1);
/// ```
pub struct PriorityRwLock<T> {
    pub(crate) raw: RawRwLock,
    pub(crate) data: UnsafeCell<T>,
}

unsafe impl<T: Send> Send for PriorityRwLock<T> {}
unsafe impl<T: Send + Sync> Sync for PriorityRwLock<T> {}

// Outside the generic impl so that `PriorityRwLock::builder()` needs no type
// annotation; the data type is fixed later by `Builder::build`.
impl PriorityRwLock<()> {
    /// Starts configuring a lock.
    ///
    /// # Examples
    ///
    /// ```
    /// use prio_rwlock::PriorityRwLock;
    ///
    /// let lock = PriorityRwLock::builder().bands(5).build("data").unwrap();
    /// assert_eq!(lock.bands(), 5);
    /// ```
    pub fn builder() -> Builder {
        Builder::new()
    }
}

impl<T> PriorityRwLock<T> {
    /// Creates an unlocked lock with [`DEFAULT_BANDS`](super::DEFAULT_BANDS)
    /// writer bands.
    pub fn new(value: T) -> Self {
        PriorityRwLock {
            raw: RawRwLock::new(),
            data: UnsafeCell::new(value),
        }
    }

    pub(crate) fn from_raw(raw: RawRwLock, value: T) -> Self {
        PriorityRwLock {
            raw,
            data: UnsafeCell::new(value),
        }
    }

    /// The number of writer bands.
    pub fn bands(&self) -> usize {
        self.raw.bands()
    }

    /// A copy of the lock's counters. See [`Snapshot`].
    pub fn snapshot(&self) -> Snapshot {
        self.raw.snapshot()
    }

    /// Consumes the lock and returns the data.
    pub fn into_inner(self) -> T {
        self.data.into_inner()
    }

    /// Mutable access without locking; the borrow checker already rules out
    /// other holders.
    pub fn get_mut(&mut self) -> &mut T {
        self.data.get_mut()
    }
}

impl<T: fmt::Debug> fmt::Debug for PriorityRwLock<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Reading the data would block behind writers, so only the counters are shown.
        f.debug_struct("PriorityRwLock")
            .field("state", &self.snapshot())
            .finish_non_exhaustive()
    }
}

impl<T: Default> Default for PriorityRwLock<T> {
    fn default() -> Self {
        PriorityRwLock::new(T::default())
    }
}

impl<T> From<T> for PriorityRwLock<T> {
    fn from(value: T) -> Self {
        PriorityRwLock::new(value)
    }
}
