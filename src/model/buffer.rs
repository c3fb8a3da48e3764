// src/model/buffer.rs

use crate::error::{SimError, SimResult};
use parking_lot::{Condvar, Mutex};
use std::collections::VecDeque;
use std::time::Duration;

/// Result of [`BoundedBuffer::try_insert`].
///
/// A rejected item is handed back so the caller can retry with it.
#[derive(Debug, PartialEq, Eq)]
pub enum InsertOutcome<T> {
    Inserted,
    /// No slot freed up before the timeout.
    TimedOut(T),
    /// The buffer was closed for shutdown.
    Closed(T),
}

/// Result of [`BoundedBuffer::try_remove`] and [`BoundedBuffer::try_remove_where`].
#[derive(Debug, PartialEq, Eq)]
pub enum RemoveOutcome<T> {
    Taken(T),
    /// Stock was present but nothing satisfied the predicate. Nothing was removed.
    NoMatch,
    /// The buffer stayed empty until the timeout.
    TimedOut,
    /// The buffer was closed for shutdown.
    Closed,
}

/// Point-in-time copy of the buffer contents, head first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot<T> {
    pub items: Vec<T>,
    pub count: usize,
    pub capacity: usize,
}

struct Slots<T> {
    items: VecDeque<T>,
    closed: bool,
}

/// Fixed-capacity FIFO shared between producer and consumer threads.
///
/// Every blocking call takes a timeout and also returns as soon as the
/// buffer is closed, so no waiter can outlive a shutdown.
pub struct BoundedBuffer<T> {
    slots: Mutex<Slots<T>>,
    not_empty: Condvar,
    not_full: Condvar,
    capacity: usize,
}

impl<T> BoundedBuffer<T> {
    pub fn new(capacity: usize) -> SimResult<Self> {
        if capacity == 0 {
            return Err(SimError::invalid_config(
                "buffer capacity must be at least 1",
            ));
        }

        Ok(Self {
            slots: Mutex::new(Slots {
                items: VecDeque::with_capacity(capacity),
                closed: false,
            }),
            not_empty: Condvar::new(),
            not_full: Condvar::new(),
            capacity,
        })
    }

    /// Appends `item` at the tail, waiting up to `timeout` for a free slot.
    pub fn try_insert(&self, item: T, timeout: Duration) -> InsertOutcome<T> {
        let capacity = self.capacity;
        let mut slots = self.slots.lock();
        self.not_full.wait_while_for(
            &mut slots,
            |s| !s.closed && s.items.len() >= capacity,
            timeout,
        );

        if slots.closed {
            return InsertOutcome::Closed(item);
        }
        if slots.items.len() >= capacity {
            return InsertOutcome::TimedOut(item);
        }

        slots.items.push_back(item);
        debug_assert!(slots.items.len() <= capacity, "counter overfilled");
        drop(slots);

        // Wake everyone: a picky consumer may pass on this item.
        self.not_empty.notify_all();
        InsertOutcome::Inserted
    }

    /// Removes the head item, waiting up to `timeout` for stock.
    pub fn try_remove(&self, timeout: Duration) -> RemoveOutcome<T> {
        self.try_remove_where(timeout, |_| true)
    }

    /// Waits up to `timeout` for stock, then removes the first item that
    /// satisfies `accept`.
    ///
    /// The scan runs under the lock. Items that are passed over keep their
    /// relative order, and a scan with no match leaves the buffer exactly as
    /// it was (`NoMatch`).
    pub fn try_remove_where<F>(&self, timeout: Duration, mut accept: F) -> RemoveOutcome<T>
    where
        F: FnMut(&T) -> bool,
    {
        let mut slots = self.slots.lock();
        self.not_empty
            .wait_while_for(&mut slots, |s| !s.closed && s.items.is_empty(), timeout);

        if slots.closed {
            return RemoveOutcome::Closed;
        }
        if slots.items.is_empty() {
            return RemoveOutcome::TimedOut;
        }

        let Some(index) = slots.items.iter().position(|item| accept(item)) else {
            return RemoveOutcome::NoMatch;
        };

        match slots.items.remove(index) {
            Some(item) => {
                drop(slots);
                self.not_full.notify_one();
                RemoveOutcome::Taken(item)
            }
            None => RemoveOutcome::NoMatch,
        }
    }

    /// Marks the buffer closed and wakes every waiter on both sides.
    pub fn close(&self) {
        self.slots.lock().closed = true;
        self.not_empty.notify_all();
        self.not_full.notify_all();
    }

    pub fn is_closed(&self) -> bool {
        self.slots.lock().closed
    }

    /// Takes whatever is still queued. Used once every actor has stopped.
    pub fn drain_remaining(&self) -> Vec<T> {
        let drained: Vec<T> = self.slots.lock().items.drain(..).collect();
        self.not_full.notify_all();
        drained
    }

    pub fn len(&self) -> usize {
        self.slots.lock().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl<T: Clone> BoundedBuffer<T> {
    /// Copies the current contents. Count and items come from the same
    /// lock acquisition, so they always agree.
    pub fn snapshot(&self) -> Snapshot<T> {
        let slots = self.slots.lock();
        let items: Vec<T> = slots.items.iter().cloned().collect();
        Snapshot {
            count: items.len(),
            items,
            capacity: self.capacity,
        }
    }
}
