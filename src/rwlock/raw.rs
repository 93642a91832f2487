// SPDX-License-Identifier: MIT OR Apache-2.0
use super::DEFAULT_BANDS;
use super::state::{LockState, Snapshot};
use crate::condvar::Condvar;
use crate::error::{ConfigError, LockError};
use crate::mutex::Mutex;
use log::trace;
use std::fmt;

/// The arbitration protocol of a priority reader-writer lock, without data.
///
/// `RawRwLock` is a monitor: one internal mutex guards the counters, readers
/// park on one channel, and each writer band parks on a channel of its own.
/// Every blocked thread re-checks its whole admission condition each time it
/// wakes, and every release wakes a whole channel.
///
/// The rules:
///
/// - Readers share the lock, but only while no writer holds it **and no
///   writer of any band is waiting**. A reader arriving behind a queued writer
///   waits for it.
/// - A writer needs the lock to be free of readers and other writers, and no
///   writer queued in a band of higher precedence (lower number).
/// - Releasing a write hands off to the highest-precedence band with waiters,
///   or to the waiting readers when no writer is queued, never both.
///
/// A continuous stream of band-0 writers can starve lower bands, and a stream
/// of writers can starve readers. Readers never starve writers.
///
/// Acquire and release calls must be paired by the caller;
/// [`PriorityRwLock`](crate::PriorityRwLock) does the pairing with guards.
///
/// # Examples
///
/// ```
/// use prio_rwlock::{Mode, RawRwLock};
///
/// let lock = RawRwLock::new();
///
/// lock.acquire_read();
/// lock.acquire_read();
/// assert_eq!(lock.snapshot().mode(), Mode::Shared(2));
/// lock.release_read().unwrap();
/// lock.release_read().unwrap();
///
/// lock.acquire_write(2).unwrap();
/// assert_eq!(lock.snapshot().mode(), Mode::Exclusive(2));
/// lock.release_write(2).unwrap();
/// ```
pub struct RawRwLock {
    pub(super) state: Mutex<LockState>,
    reader_channel: Condvar,
    writer_channels: Box<[Condvar]>,
}

impl RawRwLock {
    /// Creates an unlocked lock with [`DEFAULT_BANDS`] writer bands.
    pub fn new() -> Self {
        Self::build(DEFAULT_BANDS)
    }

    /// Creates an unlocked lock with `bands` writer bands, band `0` taking
    /// precedence over all others.
    ///
    /// # Errors
    ///
    /// [`ConfigError::NoBands`] when `bands` is zero.
    pub fn with_bands(bands: usize) -> Result<Self, ConfigError> {
        if bands == 0 {
            return Err(ConfigError::NoBands);
        }
        Ok(Self::build(bands))
    }

    fn build(bands: usize) -> Self {
        RawRwLock {
            state: Mutex::new(LockState::new(bands)),
            reader_channel: Condvar::new(),
            writer_channels: (0..bands).map(|_| Condvar::new()).collect(),
        }
    }

    /// The number of writer bands.
    pub fn bands(&self) -> usize {
        self.writer_channels.len()
    }

    /// Blocks until the calling thread holds the lock in shared mode.
    pub fn acquire_read(&self) {
        let mut state = self.state.lock_block();
        state.readers_waiting += 1;
        let mut state = self
            .reader_channel
            .wait_block_while(state, |state| state.reader_must_wait());
        state.readers_waiting -= 1;
        state.readers_active += 1;
        trace!("reader admitted, {} active", state.readers_active);
    }

    /// Gives up one shared hold. The last reader out wakes the reader
    /// channel, where writers wait for readers to drain.
    ///
    /// # Errors
    ///
    /// [`LockError::NotReadLocked`] when no reader holds the lock.
    pub fn release_read(&self) -> Result<(), LockError> {
        let mut state = self.state.lock_block();
        if state.readers_active == 0 {
            return Err(LockError::NotReadLocked);
        }
        state.readers_active -= 1;
        if state.readers_active == 0 {
            let woken = self.reader_channel.notify_all();
            trace!("last reader released, woke {woken} threads on the reader channel");
        }
        Ok(())
    }

    /// Blocks until the calling thread holds the lock exclusively in `band`.
    ///
    /// # Errors
    ///
    /// [`LockError::BandOutOfRange`] when `band` is not below
    /// [`bands`](Self::bands). The lock is left untouched.
    pub fn acquire_write(&self, band: usize) -> Result<(), LockError> {
        self.check_band(band)?;
        let mut state = self.state.lock_block();
        state.writers_waiting[band] += 1;
        loop {
            if state.readers_active > 0 {
                state = self.reader_channel.wait_block(state);
            } else if state.active_writer().is_some() || state.waiters_ahead_of(band) {
                state = self.writer_channels[band].wait_block(state);
            } else {
                break;
            }
        }
        state.writers_waiting[band] -= 1;
        state.writer_active[band] = true;
        trace!("writer admitted in band {band}");
        Ok(())
    }

    /// Gives up an exclusive hold in `band` and hands the lock on.
    ///
    /// # Errors
    ///
    /// [`LockError::BandOutOfRange`] for an unknown band and
    /// [`LockError::NotWriteLocked`] when `band` does not hold the lock.
    ///
    /// # Panics
    ///
    /// If a reader is found holding the lock alongside the writer.
    pub fn release_write(&self, band: usize) -> Result<(), LockError> {
        self.check_band(band)?;
        let mut state = self.state.lock_block();
        if !state.writer_active[band] {
            return Err(LockError::NotWriteLocked { band });
        }
        state.writer_active[band] = false;

        match state.highest_waiting_band() {
            Some(next) => {
                let woken = self.writer_channels[next].notify_all();
                trace!("band {band} released, handing off to band {next} ({woken} woken)");
            }
            None => {
                let woken = self.reader_channel.notify_all();
                trace!("band {band} released, no writers queued, {woken} woken on the reader channel");
            }
        }

        assert_eq!(
            state.readers_active, 0,
            "readers held the lock while band {band} was writing"
        );
        Ok(())
    }

    /// A copy of the lock's counters.
    pub fn snapshot(&self) -> Snapshot {
        self.state.lock_block().snapshot()
    }

    fn check_band(&self, band: usize) -> Result<(), LockError> {
        let bands = self.bands();
        if band < bands {
            Ok(())
        } else {
            Err(LockError::BandOutOfRange { band, bands })
        }
    }
}

impl fmt::Debug for RawRwLock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawRwLock")
            .field("state", &self.snapshot())
            .finish()
    }
}

impl Default for RawRwLock {
    fn default() -> Self {
        RawRwLock::new()
    }
}
