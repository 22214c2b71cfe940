use std::sync::atomic::{AtomicUsize, Ordering};

use crate::fs::limit::OpenLimiter;

/// A limiter that never blocks but counts every call, so tests can see how many opens and stats
/// actually reached the OS.
#[derive(Debug, Default)]
pub struct RecordingLimiter {
    acquired: AtomicUsize,
    released: AtomicUsize,
}

impl RecordingLimiter {
    pub fn acquired(&self) -> usize {
        self.acquired.load(Ordering::SeqCst)
    }

    pub fn released(&self) -> usize {
        self.released.load(Ordering::SeqCst)
    }
}

impl OpenLimiter for RecordingLimiter {
    fn acquire(&self) {
        self.acquired.fetch_add(1, Ordering::SeqCst);
    }

    fn release(&self) {
        self.released.fetch_add(1, Ordering::SeqCst);
    }
}
