//! Clock Module
//!
//! Injectable monotonic time sources used for TTL bookkeeping.
//!
//! Times are expressed as a [`Duration`] offset on the clock's own time line,
//! so expiry logic never touches wall-clock time and can be driven by hand
//! in tests.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

// == Clock Trait ==
/// Source of monotonically non-decreasing time.
///
/// Implementations must never return a reading smaller than a previous one.
/// Any `Fn() -> Duration + Send + Sync` closure is a clock.
pub trait Clock: Send + Sync {
    /// Current reading on this clock's time line.
    fn now(&self) -> Duration;
}

impl<F> Clock for F
where
    F: Fn() -> Duration + Send + Sync,
{
    fn now(&self) -> Duration {
        self()
    }
}

// == Monotonic Clock ==
/// Real clock backed by [`Instant`], reporting time elapsed since creation.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
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
        self.origin.elapsed()
    }
}

// == Manual Clock ==
/// Hand-driven clock for deterministic expiry tests.
///
/// Clones share the same reading, so a test can keep one handle and move
/// time forward while the cache reads through another.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    nanos: Arc<AtomicU64>,
}

impl ManualClock {
    /// Creates a clock reading zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a clock at the given reading.
    pub fn starting_at(start: Duration) -> Self {
        let clock = Self::new();
        clock.set(start);
        clock
    }

    /// Moves the clock forward by `delta`.
    pub fn advance(&self, delta: Duration) {
        self.nanos.fetch_add(to_nanos(delta), Ordering::SeqCst);
    }

    /// Sets the absolute reading. Callers must not move it backwards.
    pub fn set(&self, at: Duration) {
        self.nanos.store(to_nanos(at), Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        Duration::from_nanos(self.nanos.load(Ordering::SeqCst))
    }
}

fn to_nanos(d: Duration) -> u64 {
    u64::try_from(d.as_nanos()).unwrap_or(u64::MAX)
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_advance() {
        let clock = ManualClock::new();
        assert_eq!(clock.now(), Duration::ZERO);

        clock.advance(Duration::from_millis(5));
        clock.advance(Duration::from_millis(7));
        assert_eq!(clock.now(), Duration::from_millis(12));
    }

    #[test]
    fn test_manual_clock_clones_share_reading() {
        let clock = ManualClock::starting_at(Duration::from_secs(3));
        let handle = clock.clone();

        handle.set(Duration::from_secs(10));
        assert_eq!(clock.now(), Duration::from_secs(10));
    }

    #[test]
    fn test_monotonic_clock_never_goes_backwards() {
        let clock = MonotonicClock::new();
        let first = clock.now();
        let second = clock.now();
        assert!(second >= first);
    }

    #[test]
    fn test_closure_is_a_clock() {
        let fixed = || Duration::from_secs(42);
        assert_eq!(Clock::now(&fixed), Duration::from_secs(42));
    }
}
