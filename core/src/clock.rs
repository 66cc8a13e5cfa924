//! Time sources for the tolerance window
//!
//! This module provides two clocks:
//! - `MonotonicClock`: real time anchored at an `Instant` (immune to NTP skew)
//! - `ManualClock`: externally driven time for tests and simulation hosts

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Abstract monotonic time source
pub trait Clock: Send + Sync + std::fmt::Debug {
    /// Time elapsed since the clock's anchor
    fn now(&self) -> Duration;
}

/// Monotonic wall-independent clock anchored at construction
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    start_time: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> Duration {
        self.start_time.elapsed()
    }
}

/// Clock that only moves when told to
///
/// Share it through an `Arc` to keep a handle after handing it to an
/// interpreter.
///
/// # Example
///
/// ```rust
/// use failure_interpreter::{Clock, ManualClock};
/// use std::time::Duration;
///
/// let clock = ManualClock::new();
/// clock.advance(Duration::from_millis(250));
/// assert_eq!(clock.now(), Duration::from_millis(250));
/// ```
#[derive(Debug, Default)]
pub struct ManualClock {
    nanos: AtomicU64,
}

impl ManualClock {
    /// Create a clock reading zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the clock forward
    pub fn advance(&self, by: Duration) {
        self.nanos.fetch_add(duration_to_nanos(by), Ordering::AcqRel);
    }

    /// Jump to an absolute reading
    pub fn set(&self, at: Duration) {
        self.nanos.store(duration_to_nanos(at), Ordering::Release);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        Duration::from_nanos(self.nanos.load(Ordering::Acquire))
    }
}

impl<K: Clock + ?Sized> Clock for Arc<K> {
    fn now(&self) -> Duration {
        (**self).now()
    }
}

fn duration_to_nanos(d: Duration) -> u64 {
    u64::try_from(d.as_nanos()).unwrap_or(u64::MAX)
}
