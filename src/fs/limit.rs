//! Hooks around every open and stat, letting an outside policy bound how many descriptors are in
//! use at once.
//!
//! The filesystem calls [`OpenLimiter::acquire`] immediately before each underlying open or
//! metadata probe and [`OpenLimiter::release`] once it is finished with it. The pairing is enforced
//! by [`OpenPermit`], which releases on drop, so early returns and errors can't leak a permit.

use std::fmt::{self, Debug, Formatter};
use std::sync::{Condvar, Mutex, PoisonError};

/// A scoped resource limiter, consulted around every open and stat.
///
/// Implementations may block in `acquire` until capacity is available. `release` is called exactly
/// once for every `acquire`.
pub trait OpenLimiter: Send + Sync {
    fn acquire(&self);

    fn release(&self);
}

/// Proof that a limiter was acquired. Releases it when dropped.
#[must_use = "the limiter is released as soon as the permit is dropped"]
pub struct OpenPermit<'a> {
    limiter: &'a dyn OpenLimiter,
}

impl<'a> OpenPermit<'a> {
    pub fn acquire(limiter: &'a dyn OpenLimiter) -> OpenPermit<'a> {
        limiter.acquire();
        OpenPermit { limiter }
    }
}

impl Drop for OpenPermit<'_> {
    fn drop(&mut self) {
        self.limiter.release();
    }
}

impl Debug for OpenPermit<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("OpenPermit")
    }
}

/// A limiter that never blocks. This is the default.
#[derive(Debug, Default, Clone, Copy)]
pub struct Unlimited;

impl OpenLimiter for Unlimited {
    fn acquire(&self) {}

    fn release(&self) {}
}

/// A counting semaphore allowing at most `max` opens to be in flight at once. Callers beyond that
/// block in `acquire` until another caller releases.
#[derive(Debug)]
pub struct CountingLimiter {
    max: usize,
    in_use: Mutex<usize>,
    freed: Condvar,
}

impl CountingLimiter {
    /// Creates a limiter with `max` slots. A `max` of 0 is treated as 1, since a limiter that
    /// admits nobody would deadlock the first caller.
    pub fn new(max: usize) -> CountingLimiter {
        CountingLimiter {
            max: max.max(1),
            in_use: Mutex::new(0),
            freed: Condvar::new(),
        }
    }

    pub const fn max(&self) -> usize {
        self.max
    }

    /// The number of permits currently held.
    pub fn in_use(&self) -> usize {
        *self.in_use.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl OpenLimiter for CountingLimiter {
    fn acquire(&self) {
        let mut in_use = self.in_use.lock().unwrap_or_else(PoisonError::into_inner);
        while *in_use >= self.max {
            in_use = self.freed.wait(in_use).unwrap_or_else(PoisonError::into_inner);
        }
        *in_use += 1;
    }

    fn release(&self) {
        let mut in_use = self.in_use.lock().unwrap_or_else(PoisonError::into_inner);
        *in_use = in_use.saturating_sub(1);
        drop(in_use);
        self.freed.notify_one();
    }
}
