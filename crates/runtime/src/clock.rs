use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// A monotonic tick source.
///
/// `now` counts ticks of `frequency` per second from an arbitrary origin.
pub trait Clock {
    fn now(&self) -> u64;
    fn frequency(&self) -> u64;
    fn sleep(&self, duration: Duration);
}

/// Convert a duration to ticks of a clock running at `frequency` Hz.
pub fn duration_to_ticks(duration: Duration, frequency: u64) -> u64 {
    let ticks = duration.as_nanos() * u128::from(frequency) / 1_000_000_000;
    u64::try_from(ticks).unwrap_or(u64::MAX)
}

/// Wall-clock time in nanoseconds since the clock was created.
#[derive(Debug, Clone, Copy)]
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
    fn now(&self) -> u64 {
        u64::try_from(self.origin.elapsed().as_nanos()).unwrap_or(u64::MAX)
    }

    fn frequency(&self) -> u64 {
        1_000_000_000
    }

    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// A clock that only moves when told to.
///
/// Clones share the same time, so a test can keep a handle while the
/// scheduler owns another. Sleeping advances time by the requested
/// duration (at least one tick) instead of blocking.
#[derive(Debug, Clone)]
pub struct ManualClock {
    ticks: Rc<Cell<u64>>,
    frequency: u64,
}

impl ManualClock {
    pub fn new(frequency: u64) -> Self {
        Self {
            ticks: Rc::new(Cell::new(0)),
            frequency,
        }
    }

    pub fn advance(&self, ticks: u64) {
        self.ticks.set(self.ticks.get().saturating_add(ticks));
    }

    pub fn advance_by(&self, duration: Duration) {
        self.advance(duration_to_ticks(duration, self.frequency));
    }

    /// Jump to an absolute time. Moving backwards is allowed.
    pub fn set(&self, ticks: u64) {
        self.ticks.set(ticks);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> u64 {
        self.ticks.get()
    }

    fn frequency(&self) -> u64 {
        self.frequency
    }

    fn sleep(&self, duration: Duration) {
        if duration.is_zero() {
            return;
        }
        self.advance(duration_to_ticks(duration, self.frequency).max(1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_clones_share_time() {
        let clock = ManualClock::new(1000);
        let handle = clock.clone();
        handle.advance(250);
        assert_eq!(clock.now(), 250);
        clock.set(10);
        assert_eq!(handle.now(), 10);
    }

    #[test]
    fn manual_sleep_advances_time() {
        let clock = ManualClock::new(1_000_000_000);
        clock.sleep(Duration::from_millis(1));
        assert_eq!(clock.now(), 1_000_000);
    }

    #[test]
    fn coarse_clock_sleep_still_moves() {
        let clock = ManualClock::new(60);
        clock.sleep(Duration::from_millis(1));
        assert_eq!(clock.now(), 1);
        clock.sleep(Duration::ZERO);
        assert_eq!(clock.now(), 1);
    }

    #[test]
    fn duration_conversion() {
        assert_eq!(duration_to_ticks(Duration::from_secs(2), 60), 120);
        assert_eq!(duration_to_ticks(Duration::from_millis(500), 1000), 500);
    }

    #[test]
    fn system_clock_is_monotonic() {
        let clock = SystemClock::new();
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
        assert_eq!(clock.frequency(), 1_000_000_000);
    }
}
