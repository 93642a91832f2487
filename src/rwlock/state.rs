// SPDX-License-Identifier: MIT OR Apache-2.0
use std::fmt;

/// The bookkeeping behind a [`RawRwLock`](super::RawRwLock).
///
/// Every field is read and written only under the lock's internal mutex.
#[derive(Debug)]
pub(crate) struct LockState {
    pub(crate) readers_active: usize,
    /// Readers parked on the reader channel. Never consulted by arbitration.
    pub(crate) readers_waiting: usize,
    pub(crate) writer_active: Box<[bool]>,
    pub(crate) writers_waiting: Box<[usize]>,
}

impl LockState {
    pub(crate) fn new(bands: usize) -> Self {
        LockState {
            readers_active: 0,
            readers_waiting: 0,
            writer_active: vec![false; bands].into_boxed_slice(),
            writers_waiting: vec![0; bands].into_boxed_slice(),
        }
    }

    /// The band currently holding the lock exclusively, if any.
    ///
    /// Panics if more than one band is marked active.
    pub(crate) fn active_writer(&self) -> Option<usize> {
        let mut active = self
            .writer_active
            .iter()
            .enumerate()
            .filter_map(|(band, &active)| active.then_some(band));
        let first = active.next();
        let second = active.next();
        assert!(
            second.is_none(),
            "writer bands {first:?} and {second:?} are both active"
        );
        first
    }

    /// The highest-precedence (lowest-numbered) band with a queued writer.
    pub(crate) fn highest_waiting_band(&self) -> Option<usize> {
        self.writers_waiting.iter().position(|&waiting| waiting > 0)
    }

    /// Whether any band that takes precedence over `band` has a queued writer.
    pub(crate) fn waiters_ahead_of(&self, band: usize) -> bool {
        self.writers_waiting[..band].iter().any(|&waiting| waiting > 0)
    }

    /// A reader must stay parked while a writer holds the lock or waits for it.
    pub(crate) fn reader_must_wait(&self) -> bool {
        self.active_writer().is_some() || self.highest_waiting_band().is_some()
    }

    pub(crate) fn snapshot(&self) -> Snapshot {
        Snapshot {
            readers_active: self.readers_active,
            readers_waiting: self.readers_waiting,
            active_band: self.active_writer(),
            writers_waiting: self.writers_waiting.to_vec(),
        }
    }
}

/// A copy of a lock's counters, taken under its internal mutex.
///
/// The numbers are exact at the moment of the call and may be stale by the
/// time they are read. They are meant for diagnostics and tests, never for
/// deciding whether to lock.
///
/// # Examples
///
/// ```
/// use prio_rwlock::{Mode, PriorityRwLock};
///
/// let lock = PriorityRwLock::new(0);
/// let guard = lock.write(1).unwrap();
/// let snapshot = lock.snapshot();
/// assert_eq!(snapshot.mode(), Mode::Exclusive(1));
/// assert_eq!(snapshot.writers_waiting, vec![0, 0, 0]);
/// drop(guard);
/// assert_eq!(lock.snapshot().mode(), Mode::Idle);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Snapshot {
    /// Readers holding the lock.
    pub readers_active: usize,
    /// Readers blocked in [`acquire_read`](super::RawRwLock::acquire_read).
    pub readers_waiting: usize,
    /// The band holding the lock exclusively, if any.
    pub active_band: Option<usize>,
    /// Blocked writers, indexed by band.
    pub writers_waiting: Vec<usize>,
}

impl Snapshot {
    /// Which of the three lock states the counters describe.
    pub fn mode(&self) -> Mode {
        match (self.active_band, self.readers_active) {
            (Some(band), _) => Mode::Exclusive(band),
            (None, 0) => Mode::Idle,
            (None, readers) => Mode::Shared(readers),
        }
    }

    /// Total writers blocked across all bands.
    pub fn total_writers_waiting(&self) -> usize {
        self.writers_waiting.iter().sum()
    }
}

/// The holding state of a lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Nobody holds the lock.
    Idle,
    /// The given number of readers hold the lock.
    Shared(usize),
    /// A writer of the given band holds the lock.
    Exclusive(usize),
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Idle => write!(f, "idle"),
            Mode::Shared(readers) => write!(f, "shared by {readers} readers"),
            Mode::Exclusive(band) => write!(f, "exclusive in band {band}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_highest_waiting_band() {
        let mut state = LockState::new(3);
        assert_eq!(state.highest_waiting_band(), None);
        state.writers_waiting[2] = 1;
        assert_eq!(state.highest_waiting_band(), Some(2));
        state.writers_waiting[1] = 4;
        assert_eq!(state.highest_waiting_band(), Some(1));
    }

    #[test]
    fn test_waiters_ahead_of() {
        let mut state = LockState::new(4);
        state.writers_waiting[1] = 1;
        assert!(!state.waiters_ahead_of(0));
        assert!(!state.waiters_ahead_of(1));
        assert!(state.waiters_ahead_of(2));
        assert!(state.waiters_ahead_of(3));
    }

    #[test]
    fn test_reader_must_wait() {
        let mut state = LockState::new(3);
        assert!(!state.reader_must_wait());
        state.writers_waiting[2] = 1;
        assert!(state.reader_must_wait());
        state.writers_waiting[2] = 0;
        state.writer_active[0] = true;
        assert!(state.reader_must_wait());
    }

    #[test]
    #[should_panic(expected = "both active")]
    fn test_two_active_bands_panics() {
        let mut state = LockState::new(3);
        state.writer_active[0] = true;
        state.writer_active[2] = true;
        state.active_writer();
    }

    #[test]
    fn test_mode() {
        let mut snapshot = LockState::new(2).snapshot();
        assert_eq!(snapshot.mode(), Mode::Idle);
        snapshot.readers_active = 2;
        assert_eq!(snapshot.mode(), Mode::Shared(2));
        assert_eq!(snapshot.mode().to_string(), "shared by 2 readers");
        snapshot.readers_active = 0;
        snapshot.active_band = Some(1);
        assert_eq!(snapshot.mode(), Mode::Exclusive(1));
    }
}
