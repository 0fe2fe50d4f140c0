//! # Timestamp Tracker
//!
//! Turns successive readings of a wrapping down-counter into a monotonically
//! increasing 64-bit tick count.
//!
//! ## Polling Contract
//!
//! The tracker can only see one wrap between two reads. It must be polled at
//! least once per counter period; if the counter wraps twice between polls
//! the missed period is silently lost.

use hal::{DownCounter, TimerDevice, COUNTER_MAX};

/// Accumulates down-counter readings into a monotonic timestamp
///
/// # Examples
///
/// ```
/// use hal_aspeed::FakeDownCounter;
/// use timebase::TimestampTracker;
///
/// let counter = FakeDownCounter::new(vec![10, 0xFFFF_FFF5]);
/// let mut tracker = TimestampTracker::new(counter);
///
/// tracker.reset(); // last reading = 10
/// assert_eq!(tracker.poll(), 21); // wrapped once
/// ```
#[derive(Debug)]
pub struct TimestampTracker<C: DownCounter> {
    counter: C,
    /// Value the counter restarts from after 0
    reload_value: u32,
    /// Last raw counter value observed
    last_reading: u32,
    /// Accumulated ticks
    timestamp: u64,
}

impl<C: DownCounter> TimestampTracker<C> {
    /// Creates a tracker for a counter that reloads from `COUNTER_MAX`
    pub fn new(counter: C) -> Self {
        Self::with_reload(counter, COUNTER_MAX)
    }

    /// Creates a tracker for a counter that reloads from `reload_value`
    ///
    /// Note: This does not touch the hardware. Call `init()` to program the
    /// counter, or `reset()` if it is already running.
    pub fn with_reload(counter: C, reload_value: u32) -> Self {
        Self {
            counter,
            reload_value,
            last_reading: 0,
            timestamp: 0,
        }
    }

    /// Programs and starts the counter, then resets the timestamp
    pub fn init(&mut self) {
        self.counter.configure(self.reload_value);
        self.counter.enable();
        self.reset();
    }

    /// Restarts the timestamp from 0 at the current counter value
    pub fn reset(&mut self) {
        self.last_reading = self.counter.read();
        self.timestamp = 0;
        log::debug!("timestamp reset at counter {:#010x}", self.last_reading);
    }

    /// Reads the counter and advances the timestamp
    ///
    /// Returns the updated timestamp.
    pub fn poll(&mut self) -> u64 {
        let now = self.counter.read();

        let delta = if self.last_reading >= now {
            u64::from(self.last_reading - now)
        } else {
            // Counted down to 0, reloaded, and kept going. A reading above
            // the reload value still comes from an earlier, larger reload
            // and contributes nothing.
            (u64::from(self.last_reading) + self.period()).saturating_sub(u64::from(now))
        };

        self.timestamp = self.timestamp.wrapping_add(delta);
        self.last_reading = now;
        self.timestamp
    }

    /// Returns the ticks elapsed since `base`
    ///
    /// `base` is a value previously returned by `poll()` or
    /// `elapsed_since(0)`.
    pub fn elapsed_since(&mut self, base: u64) -> u64 {
        self.poll().wrapping_sub(base)
    }

    /// Overwrites the accumulated timestamp
    pub fn set(&mut self, value: u64) {
        log::debug!("timestamp rebased from {} to {}", self.timestamp, value);
        self.timestamp = value;
    }

    /// Returns the timestamp as of the last poll, without reading the counter
    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }

    /// Returns the last raw counter value observed
    pub fn last_reading(&self) -> u32 {
        self.last_reading
    }

    /// Returns the configured reload value
    pub fn reload_value(&self) -> u32 {
        self.reload_value
    }

    /// Returns the underlying counter
    pub fn counter(&self) -> &C {
        &self.counter
    }

    /// Consumes the tracker, returning the counter
    pub fn into_counter(self) -> C {
        self.counter
    }

    /// Counter ticks in one full period (reload value through 0)
    fn period(&self) -> u64 {
        u64::from(self.reload_value) + 1
    }
}

impl<C: DownCounter> TimerDevice for TimestampTracker<C> {
    fn poll_ticks(&mut self) -> u64 {
        self.poll()
    }
}
