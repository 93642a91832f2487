// SPDX-License-Identifier: MIT OR Apache-2.0
use super::inner::PriorityRwLock;
use crate::guard::ReadGuard;

impl<T> PriorityRwLock<T> {
    /// Blocks until the lock can be shared, then returns a guard.
    ///
    /// The calling thread waits while a writer holds the lock **or while any
    /// writer is queued for it**, whatever its band. Readers that already hold
    /// the lock are not affected; a reader arriving behind a queued writer is.
    ///
    /// # Examples
    ///
    /// ```
    /// use prio_rwlock::PriorityRwLock;
    ///
    /// let lock = PriorityRwLock::new([1, 2, 3]);
    /// let first = lock.read();
    /// let second = lock.read();
    /// assert_eq!(first[0] + second[2], 4);
    /// assert_eq!(lock.snapshot().readers_active, 2);
    /// ```
    pub fn read(&self) -> ReadGuard<'_, T> {
        self.raw.acquire_read();
        ReadGuard { lock: self }
    }

    /// Runs `f` under a read lock.
    ///
    /// # Examples
    ///
    /// ```
    /// use prio_rwlock::PriorityRwLock;
    ///
    /// let lock = PriorityRwLock::new(vec![1, 2, 3]);
    /// let sum: i32 = lock.with_read(|v| v.iter().sum());
    /// assert_eq!(sum, 6);
    /// ```
    pub fn with_read<R, F: FnOnce(&T) -> R>(&self, f: F) -> R {
        let guard = self.read();
        f(&guard)
    }
}
