// SPDX-License-Identifier: MIT OR Apache-2.0
use super::{Mutex, NotAvailable};
use crate::guard::Guard;
use std::thread;

pub(crate) fn lock_block<T>(mutex: &Mutex<T>) -> Guard<'_, T> {
    loop {
        // Register under the waiter list's lock, so an unlock that lands after
        // the failed attempt is guaranteed to see us in the list.
        let r = mutex
            .waiting_threads
            .with_mut(|threads| match mutex.try_lock() {
                Ok(guard) => Ok(guard),
                Err(NotAvailable) => {
                    threads.push(thread::current());
                    Err(NotAvailable)
                }
            });
        match r {
            Ok(guard) => return guard,
            Err(NotAvailable) => thread::park(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::mpsc;
    use std::time::Duration;

    #[test]
    fn test_lock_block_uncontended() {
        let mutex = Mutex::new(5);
        let mut guard = lock_block(&mutex);
        *guard += 1;
        drop(guard);
        assert_eq!(*mutex.lock_block(), 6);
    }

    #[test]
    fn test_lock_block_waits_for_holder() {
        let mutex = Arc::new(Mutex::new(0));
        let guard = mutex.lock_block();

        let (tx, rx) = mpsc::channel();
        let mutex_clone = Arc::clone(&mutex);
        let handle = thread::spawn(move || {
            tx.send(()).unwrap();
            let mut guard = mutex_clone.lock_block();
            *guard += 1;
            tx.send(()).unwrap();
        });

        rx.recv().unwrap();
        assert!(rx.recv_timeout(Duration::from_millis(20)).is_err());
        drop(guard);
        rx.recv().unwrap();
        handle.join().unwrap();
        assert_eq!(*mutex.lock_block(), 1);
    }
}
