// SPDX-License-Identifier: MIT OR Apache-2.0
use super::DEFAULT_BANDS;
use super::inner::PriorityRwLock;
use super::raw::RawRwLock;
use crate::error::ConfigError;
use log::debug;

/// Configuration for a [`PriorityRwLock`] or a [`RawRwLock`].
///
/// # Examples
///
/// ```
/// use prio_rwlock::Builder;
///
/// let raw = Builder::new().bands(2).build_raw().unwrap();
/// assert_eq!(raw.bands(), 2);
///
/// let lock = Builder::new().build(0u8).unwrap();
/// assert_eq!(lock.bands(), prio_rwlock::DEFAULT_BANDS);
/// ```
#[derive(Debug)]
pub struct Builder {
    bands: usize,
}

impl Builder {
    /// A builder with [`DEFAULT_BANDS`] bands.
    pub fn new() -> Self {
        Builder {
            bands: DEFAULT_BANDS,
        }
    }

    /// Sets the number of writer bands. Band `0` takes precedence over all
    /// others, band `bands - 1` yields to all others.
    pub fn bands(mut self, bands: usize) -> Self {
        self.bands = bands;
        self
    }

    /// Builds the bare protocol.
    ///
    /// # Errors
    ///
    /// [`ConfigError::NoBands`] when configured with zero bands.
    pub fn build_raw(self) -> Result<RawRwLock, ConfigError> {
        let raw = RawRwLock::with_bands(self.bands)?;
        debug!("built priority lock with {} writer bands", self.bands);
        Ok(raw)
    }

    /// Builds a lock protecting `value`.
    ///
    /// # Errors
    ///
    /// [`ConfigError::NoBands`] when configured with zero bands.
    pub fn build<T>(self, value: T) -> Result<PriorityRwLock<T>, ConfigError> {
        Ok(PriorityRwLock::from_raw(self.build_raw()?, value))
    }
}

impl Default for Builder {
    fn default() -> Self {
        Builder::new()
    }
}
