// SPDX-License-Identifier: MIT OR Apache-2.0
//! A choreography harness for lock tests.
//!
//! Each [`Worker`] is a thread that owns one side of a command channel and
//! performs exactly one acquire/release pair per request. The test thread
//! drives workers one step at a time and checks two things: the worker's own
//! `holding` flag, and the lock's [`Snapshot`] counters, which tell when a
//! worker has registered as waiting.

use crate::{RawRwLock, Snapshot};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

const STEP_TIMEOUT: Duration = Duration::from_secs(10);
/// How long a worker expected to stay blocked is watched before moving on.
const SETTLE: Duration = Duration::from_millis(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Role {
    Reader,
    Writer(usize),
}

#[derive(Debug)]
enum Command {
    Acquire,
    Release,
}

#[derive(Debug)]
pub(crate) struct Worker {
    name: String,
    role: Role,
    commands: Option<mpsc::Sender<Command>>,
    holding: Arc<AtomicBool>,
    handle: Option<thread::JoinHandle<()>>,
}

impl Worker {
    fn spawn(lock: Arc<RawRwLock>, name: String, role: Role) -> Self {
        let (commands, inbox) = mpsc::channel();
        let holding = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&holding);
        let handle = thread::spawn(move || {
            for command in inbox {
                match (command, role) {
                    (Command::Acquire, Role::Reader) => {
                        lock.acquire_read();
                        flag.store(true, Ordering::SeqCst);
                    }
                    (Command::Acquire, Role::Writer(band)) => {
                        lock.acquire_write(band).expect("band in range");
                        flag.store(true, Ordering::SeqCst);
                    }
                    (Command::Release, Role::Reader) => {
                        lock.release_read().expect("reader held the lock");
                        flag.store(false, Ordering::SeqCst);
                    }
                    (Command::Release, Role::Writer(band)) => {
                        lock.release_write(band).expect("writer held the lock");
                        flag.store(false, Ordering::SeqCst);
                    }
                }
            }
        });
        Worker {
            name,
            role,
            commands: Some(commands),
            holding,
            handle: Some(handle),
        }
    }

    pub(crate) fn is_holding(&self) -> bool {
        self.holding.load(Ordering::SeqCst)
    }

    fn send(&self, command: Command) {
        self.commands
            .as_ref()
            .expect("worker is running")
            .send(command)
            .expect("worker thread is alive");
    }
}

impl Drop for Worker {
    fn drop(&mut self) {
        // Closing the channel ends the worker's loop. A failing test may leave
        // workers parked in the lock, and those are left behind, not joined.
        self.commands.take();
        if let Some(handle) = self.handle.take()
            && !thread::panicking()
        {
            handle.join().expect("worker panicked");
        }
    }
}

/// A lock plus a cast of reader and writer workers.
pub(crate) struct Stage {
    pub(crate) lock: Arc<RawRwLock>,
    readers: Vec<Worker>,
    writers: Vec<Worker>,
}

impl Stage {
    /// A stage with `readers` readers and one writer per entry of `writer_bands`.
    pub(crate) fn new(lock: RawRwLock, readers: usize, writer_bands: &[usize]) -> Self {
        let lock = Arc::new(lock);
        let readers = (0..readers)
            .map(|id| Worker::spawn(Arc::clone(&lock), format!("reader {id}"), Role::Reader))
            .collect();
        let writers = writer_bands
            .iter()
            .enumerate()
            .map(|(id, &band)| {
                Worker::spawn(Arc::clone(&lock), format!("writer {id}"), Role::Writer(band))
            })
            .collect();
        Stage {
            lock,
            readers,
            writers,
        }
    }

    pub(crate) fn reader(&self, id: usize) -> &Worker {
        &self.readers[id]
    }

    pub(crate) fn writer(&self, id: usize) -> &Worker {
        &self.writers[id]
    }

    pub(crate) fn snapshot(&self) -> Snapshot {
        self.lock.snapshot()
    }

    /// Sends a request that must be granted straight away.
    pub(crate) fn acquires(&self, worker: &Worker) {
        worker.send(Command::Acquire);
        self.expect_holding(worker);
    }

    /// Sends a request that must block; returns once the worker is parked.
    pub(crate) fn blocks(&self, worker: &Worker) {
        let before = self.waiting(worker.role);
        worker.send(Command::Acquire);
        wait_until(&format!("{} to queue", worker.name), || {
            worker.is_holding() || self.waiting(worker.role) == before + 1
        });
        assert!(!worker.is_holding(), "{} wrongly acquired the lock", worker.name);
    }

    /// Releases the worker's hold and waits for the release to land.
    pub(crate) fn releases(&self, worker: &Worker) {
        assert!(worker.is_holding(), "{} does not hold the lock", worker.name);
        worker.send(Command::Release);
        wait_until(&format!("{} to release", worker.name), || !worker.is_holding());
    }

    pub(crate) fn expect_holding(&self, worker: &Worker) {
        wait_until(&format!("{} to acquire", worker.name), || worker.is_holding());
    }

    /// Checks that the worker stays out of the lock and stays counted as
    /// waiting for a short settle window.
    pub(crate) fn expect_waiting(&self, worker: &Worker) {
        let deadline = Instant::now() + SETTLE;
        loop {
            assert!(!worker.is_holding(), "{} wrongly holds the lock", worker.name);
            assert!(
                self.waiting(worker.role) > 0,
                "{} is no longer counted as waiting",
                worker.name
            );
            if Instant::now() >= deadline {
                break;
            }
            thread::sleep(Duration::from_millis(1));
        }
    }

    fn waiting(&self, role: Role) -> usize {
        let snapshot = self.snapshot();
        match role {
            Role::Reader => snapshot.readers_waiting,
            Role::Writer(band) => snapshot.writers_waiting[band],
        }
    }
}

/// Spins (politely) until `condition` holds, failing the test after a timeout.
pub(crate) fn wait_until(what: &str, mut condition: impl FnMut() -> bool) {
    let deadline = Instant::now() + STEP_TIMEOUT;
    while !condition() {
        assert!(Instant::now() < deadline, "timed out waiting for {what}");
        thread::sleep(Duration::from_millis(1));
    }
}
