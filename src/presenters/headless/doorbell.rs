use parking_lot::{Condvar, Mutex};

use crate::controllers::ports::waker::GuiWaker;

/// A level-triggered wake signal for a GUI loop without a native event loop.
///
/// Rings collapse: any number of `wake` calls before a `wait` release it once.
#[derive(Debug, Default)]
pub struct Doorbell {
    rung: Mutex<bool>,
    ringing: Condvar,
}

impl Doorbell {
    pub fn wait(&self) {
        let mut rung = self.rung.lock();
        while !*rung {
            self.ringing.wait(&mut rung);
        }
        *rung = false;
    }
}

impl GuiWaker for Doorbell {
    fn wake(&self) {
        *self.rung.lock() = true;
        self.ringing.notify_one();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_wait_returns_after_earlier_ring() {
        let bell = Doorbell::default();

        bell.wake();
        bell.wake();
        bell.wait();

        assert!(!*bell.rung.lock());
    }

    #[test]
    fn test_ring_from_other_thread_releases_waiter() {
        let bell = Arc::new(Doorbell::default());
        let ringer = Arc::clone(&bell);

        let waiter = thread::spawn(move || bell.wait());
        ringer.wake();

        waiter.join().unwrap();
    }
}
