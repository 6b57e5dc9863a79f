//! Time sources used to pace the frame loop.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Monotonic time source with a blocking wait.
pub trait Clock {
    /// Time since an arbitrary fixed origin.
    fn now(&self) -> Duration;
    /// Block the calling thread for `duration`.
    fn sleep(&mut self, duration: Duration);
}

/// Wall clock backed by [`Instant`] and [`std::thread::sleep`].
#[derive(Debug, Clone)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }

    fn sleep(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

#[derive(Debug, Default)]
struct ManualInner {
    now: Duration,
    sleeps: Vec<Duration>,
}

/// Virtual clock for tests and headless runs.
///
/// Sleeping advances virtual time instantly. Clones share the same timeline,
/// so a callback can hold a clone and [`advance`](Self::advance) it to
/// simulate work.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    inner: Rc<RefCell<ManualInner>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, duration: Duration) {
        self.inner.borrow_mut().now += duration;
    }

    /// Every wait requested so far, in order.
    pub fn sleeps(&self) -> Vec<Duration> {
        self.inner.borrow().sleeps.clone()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.inner.borrow().now
    }

    fn sleep(&mut self, duration: Duration) {
        let mut inner = self.inner.borrow_mut();
        inner.now += duration;
        inner.sleeps.push(duration);
    }
}
