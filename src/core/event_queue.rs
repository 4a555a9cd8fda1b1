//! Bounded input queue shared by the GUI thread (producer) and the user
//! thread (consumer).
//!
//! Every access goes through one non-reentrant lock. Consumers block on a
//! condition variable that producers signal, so waiting never spins.

use parking_lot::{Condvar, Mutex};
use std::collections::VecDeque;
use std::time::Instant;

use crate::core::data::event::Event;

pub const DEFAULT_QUEUE_CAPACITY: usize = 10_000;

pub struct EventQueue {
    events: Mutex<VecDeque<Event>>,
    capacity: usize,
    arrived: Condvar,
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new(DEFAULT_QUEUE_CAPACITY)
    }
}

impl EventQueue {
    /// Creates a queue holding at most `capacity` events (at least one).
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            events: Mutex::new(VecDeque::new()),
            capacity: capacity.max(1),
            arrived: Condvar::new(),
        }
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Appends `event`, evicting the oldest event first when full.
    pub fn push(&self, event: Event) {
        self.append(event);
    }

    /// Puts a previously popped event back into the queue.
    ///
    /// The event is appended at the back, like `push`. It is therefore
    /// retrieved after anything already queued, not restored to its
    /// original position.
    pub fn requeue(&self, event: Event) {
        self.append(event);
    }

    fn append(&self, event: Event) {
        {
            let mut events = self.events.lock();

            if events.len() >= self.capacity {
                events.pop_front();
                tracing::trace!("queue: full at {}, dropped oldest event", self.capacity);
            }

            events.push_back(event);
        }

        self.arrived.notify_all();
    }

    pub fn pop_front(&self) -> Option<Event> {
        self.events.lock().pop_front()
    }

    #[must_use]
    pub fn has_events(&self) -> bool {
        !self.events.lock().is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.has_events()
    }

    /// Discards every queued event in one critical section.
    pub fn flush(&self) {
        let mut events = self.events.lock();
        let dropped = events.len();
        *events = VecDeque::new();

        tracing::trace!("queue: flushed {dropped} events");
    }

    /// Copy of the queued events, oldest first.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Event> {
        self.events.lock().iter().copied().collect()
    }

    /// Pops events from the front until one satisfies `matches`.
    ///
    /// Non-matching events are consumed and discarded. Returns `None` once
    /// the queue is empty.
    pub fn take_first<F>(&self, mut matches: F) -> Option<Event>
    where
        F: FnMut(&Event) -> bool,
    {
        let mut events = self.events.lock();
        Self::drain_until(&mut events, &mut matches)
    }

    /// Like [`take_first`](Self::take_first) but blocks until a matching
    /// event arrives or `deadline` passes. `None` deadline waits forever.
    ///
    /// `matches` runs with the queue lock held and must not take other locks.
    pub fn wait_for<F>(&self, mut matches: F, deadline: Option<Instant>) -> Option<Event>
    where
        F: FnMut(&Event) -> bool,
    {
        let mut events = self.events.lock();

        loop {
            if let Some(event) = Self::drain_until(&mut events, &mut matches) {
                return Some(event);
            }

            match deadline {
                None => self.arrived.wait(&mut events),
                Some(deadline) => {
                    if Instant::now() >= deadline {
                        return None;
                    }

                    // A timeout still gets one more drain before giving up.
                    let _ = self.arrived.wait_until(&mut events, deadline);
                }
            }
        }
    }

    fn drain_until<F>(events: &mut VecDeque<Event>, matches: &mut F) -> Option<Event>
    where
        F: FnMut(&Event) -> bool,
    {
        while let Some(event) = events.pop_front() {
            if matches(&event) {
                return Some(event);
            }
        }

        None
    }
}
