// src/simulation/state.rs

use crate::error::SimResult;
use crate::model::buffer::BoundedBuffer;
use crate::model::item::Item;
use crate::model::ledger::Ledger;
use parking_lot::{Condvar, Mutex};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// The one-way `running` flag plus a condvar so sleepers wake on stop.
pub struct RunState {
    running: AtomicBool,
    stopped: Mutex<bool>,
    wake: Condvar,
}

impl Default for RunState {
    fn default() -> Self {
        Self::new()
    }
}

impl RunState {
    pub fn new() -> Self {
        Self {
            running: AtomicBool::new(true),
            stopped: Mutex::new(false),
            wake: Condvar::new(),
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Flips the flag to stopped. Returns `false` if it was already stopped.
    pub fn stop(&self) -> bool {
        let mut stopped = self.stopped.lock();
        if *stopped {
            return false;
        }
        *stopped = true;
        self.running.store(false, Ordering::Release);
        drop(stopped);
        self.wake.notify_all();
        true
    }

    /// Sleeps for `duration` unless stopped first.
    /// Returns whether the run is still going.
    pub fn sleep(&self, duration: Duration) -> bool {
        let mut stopped = self.stopped.lock();
        self.wake
            .wait_while_for(&mut stopped, |stopped| !*stopped, duration);
        !*stopped
    }
}

/// Everything the actors share: the counter, the ledger and the run flag.
///
/// Built once per run and handed to each actor behind an `Arc`.
pub struct Shop {
    pub counter: BoundedBuffer<Item>,
    pub ledger: Ledger,
    pub run: RunState,
}

impl Shop {
    pub fn new(capacity: usize) -> SimResult<Self> {
        Ok(Self {
            counter: BoundedBuffer::new(capacity)?,
            ledger: Ledger::new(),
            run: RunState::new(),
        })
    }

    pub fn is_open(&self) -> bool {
        self.run.is_running()
    }

    /// Stops the run and releases every blocked actor.
    /// Returns `true` only for the call that actually closed the shop.
    pub fn shutdown(&self) -> bool {
        let first = self.run.stop();
        self.counter.close();
        first
    }
}

/// Cloneable handle for stopping a run from outside the controller.
#[derive(Clone)]
pub struct ShutdownHandle {
    shop: Arc<Shop>,
}

impl ShutdownHandle {
    pub(crate) fn new(shop: Arc<Shop>) -> Self {
        Self { shop }
    }

    pub fn request_shutdown(&self) -> bool {
        self.shop.shutdown()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::buffer::RemoveOutcome;
    use std::thread;
    use std::time::Instant;

    #[test]
    fn stop_happens_once() {
        let run = RunState::new();
        assert!(run.is_running());
        assert!(run.stop());
        assert!(!run.stop());
        assert!(!run.is_running());
    }

    #[test]
    fn sleep_runs_full_length_while_running() {
        let run = RunState::new();
        let start = Instant::now();
        assert!(run.sleep(Duration::from_millis(30)));
        assert!(start.elapsed() >= Duration::from_millis(25));
    }

    #[test]
    fn stop_interrupts_sleepers() {
        let run = Arc::new(RunState::new());
        let sleeper = {
            let run = Arc::clone(&run);
            thread::spawn(move || {
                let start = Instant::now();
                (run.sleep(Duration::from_secs(10)), start.elapsed())
            })
        };

        thread::sleep(Duration::from_millis(50));
        run.stop();

        let (still_running, slept) = sleeper.join().unwrap();
        assert!(!still_running);
        assert!(slept < Duration::from_secs(5));
    }

    #[test]
    fn shutdown_closes_the_counter() {
        let shop = Arc::new(Shop::new(1).unwrap());
        let handle = ShutdownHandle::new(Arc::clone(&shop));

        assert!(handle.request_shutdown());
        assert!(!handle.request_shutdown());
        assert!(!shop.is_open());
        assert_eq!(
            shop.counter.try_remove(Duration::from_secs(5)),
            RemoveOutcome::Closed
        );
    }
}
