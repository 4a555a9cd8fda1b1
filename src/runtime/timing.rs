use std::thread;
use std::time::Duration;

/// Suspends the calling user thread. Never call this on the GUI thread.
pub fn milli_sleep(ms: u64) {
    thread::sleep(Duration::from_millis(ms));
}

pub fn micro_sleep(us: u64) {
    thread::sleep(Duration::from_micros(us));
}
