// SPDX-License-Identifier: MIT OR Apache-2.0
//! Guard types for the internal mutex and for [`PriorityRwLock`].

use crate::PriorityRwLock;
use crate::mutex::Mutex;
use std::fmt;
use std::sync::atomic::Ordering;

/// Access to the data behind the internal [`Mutex`]; unlocks on drop.
pub(crate) struct Guard<'a, T> {
    pub(crate) mutex: &'a Mutex<T>,
    pub(crate) data: &'a mut T,
}

impl<T> std::ops::Deref for Guard<'_, T> {
    type Target = T;
    fn deref(&self) -> &Self::Target {
        self.data
    }
}

impl<T> std::ops::DerefMut for Guard<'_, T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.data
    }
}

impl<T> Drop for Guard<'_, T> {
    fn drop(&mut self) {
        self.mutex.data_lock.store(false, Ordering::Release);
        self.mutex.did_unlock();
    }
}

// ================================================================================================
// PriorityRwLock guards
// ================================================================================================

/// Shared access to the data protected by a [`PriorityRwLock`].
///
/// Created by [`PriorityRwLock::read`]. Any number of `ReadGuard`s may be
/// alive at once. Dropping the last one lets the next waiting writer in.
///
/// # Examples
///
/// ```
/// use prio_rwlock::PriorityRwLock;
///
/// let lock = PriorityRwLock::new(vec![1, 2, 3]);
///
/// let a = lock.read();
/// let b = lock.read();
/// assert_eq!(a.len(), b.len());
/// ```
pub struct ReadGuard<'a, T> {
    pub(crate) lock: &'a PriorityRwLock<T>,
}

/// Exclusive access to the data protected by a [`PriorityRwLock`].
///
/// Created by [`PriorityRwLock::write`]. The guard remembers the band it was
/// acquired in and releases in that band when dropped, handing the lock to
/// the highest-precedence band with waiters, or to waiting readers when no
/// writer is queued.
///
/// # Examples
///
/// ```
/// use prio_rwlock::PriorityRwLock;
///
/// let lock = PriorityRwLock::new(String::from("hello"));
/// {
///     let mut guard = lock.write(0).unwrap();
///     guard.push_str(", world");
///     assert_eq!(guard.band(), 0);
/// }
/// assert_eq!(&*lock.read(), "hello, world");
/// ```
pub struct WriteGuard<'a, T> {
    pub(crate) lock: &'a PriorityRwLock<T>,
    pub(crate) band: usize,
}

impl<T> WriteGuard<'_, T> {
    /// The priority band this guard was acquired in.
    pub fn band(&self) -> usize {
        self.band
    }
}

impl<T> std::ops::Deref for ReadGuard<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        // SAFETY: while a read guard lives no writer is active.
        unsafe { &*self.lock.data.get() }
    }
}

impl<T> std::ops::Deref for WriteGuard<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        // SAFETY: while a write guard lives it is the only holder.
        unsafe { &*self.lock.data.get() }
    }
}

impl<T> std::ops::DerefMut for WriteGuard<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        // SAFETY: while a write guard lives it is the only holder.
        unsafe { &mut *self.lock.data.get() }
    }
}

impl<T> Drop for ReadGuard<'_, T> {
    fn drop(&mut self) {
        let released = self.lock.raw.release_read();
        assert!(
            released.is_ok(),
            "read guard dropped without a matching reader: {released:?}"
        );
    }
}

impl<T> Drop for WriteGuard<'_, T> {
    fn drop(&mut self) {
        let released = self.lock.raw.release_write(self.band);
        assert!(
            released.is_ok(),
            "write guard dropped without holding band {}: {released:?}",
            self.band
        );
    }
}

// ================================================================================================
// Boilerplate trait implementations
// ================================================================================================

impl<T> AsRef<T> for ReadGuard<'_, T> {
    fn as_ref(&self) -> &T {
        self
    }
}

impl<T> AsRef<T> for WriteGuard<'_, T> {
    fn as_ref(&self) -> &T {
        self
    }
}

impl<T> AsMut<T> for WriteGuard<'_, T> {
    fn as_mut(&mut self) -> &mut T {
        &mut *self
    }
}

impl<T: fmt::Debug> fmt::Debug for ReadGuard<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReadGuard")
            .field("data", &**self)
            .finish_non_exhaustive()
    }
}

impl<T: fmt::Debug> fmt::Debug for WriteGuard<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WriteGuard")
            .field("band", &self.band)
            .field("data", &**self)
            .finish_non_exhaustive()
    }
}

impl<T: fmt::Display> fmt::Display for ReadGuard<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&**self, f)
    }
}

impl<T: fmt::Display> fmt::Display for WriteGuard<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&**self, f)
    }
}
