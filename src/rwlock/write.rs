// SPDX-License-Identifier: MIT OR Apache-2.0
use super::inner::PriorityRwLock;
use crate::error::LockError;
use crate::guard::WriteGuard;

impl<T> PriorityRwLock<T> {
    /// Blocks until the calling thread holds the lock exclusively in `band`.
    ///
    /// The writer is queued in `band` from the moment of the call, which
    /// already keeps new readers out. It proceeds once no reader holds the
    /// lock, no other writer holds it, and no writer is queued in a band with
    /// a lower number.
    ///
    /// # Errors
    ///
    /// [`LockError::BandOutOfRange`] when `band >= self.bands()`. Nothing is
    /// queued in that case.
    ///
    /// # Examples
    ///
    /// ```
    /// use prio_rwlock::{LockError, PriorityRwLock};
    ///
    /// let lock = PriorityRwLock::new(String::new());
    /// lock.write(2).unwrap().push_str("low priority");
    /// assert_eq!(&*lock.read(), "low priority");
    ///
    /// assert!(matches!(
    ///     lock.write(3),
    ///     Err(LockError::BandOutOfRange { band: 3, bands: 3 })
    /// ));
    /// ```
    pub fn write(&self, band: usize) -> Result<WriteGuard<'_, T>, LockError> {
        self.raw.acquire_write(band)?;
        Ok(WriteGuard { lock: self, band })
    }

    /// Runs `f` under a write lock taken in `band`.
    ///
    /// # Errors
    ///
    /// As [`write`](Self::write).
    pub fn with_write<R, F: FnOnce(&mut T) -> R>(
        &self,
        band: usize,
        f: F,
    ) -> Result<R, LockError> {
        let mut guard = self.write(band)?;
        Ok(f(&mut guard))
    }
}
