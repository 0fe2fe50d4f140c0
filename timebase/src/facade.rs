//! # Timebase
//!
//! The single timekeeping context a boot stage owns. It bundles the
//! timestamp tracker, the delay engine and the board configuration, and is
//! passed by `&mut` to whatever needs time.

use hal::{DownCounter, SpinWait, WaitStrategy};

use crate::config::{ConfigError, TimebaseConfig};
use crate::delay::DelayEngine;
use crate::tracker::TimestampTracker;

/// Monotonic time and busy-wait delays over one down-counter
///
/// # Examples
///
/// ```
/// use hal_aspeed::FakeDownCounter;
/// use timebase::{Timebase, TimebaseConfig};
///
/// let counter = FakeDownCounter::free_running(0xFFFF_FFFF, 1);
/// let mut timebase = Timebase::init(counter, TimebaseConfig::default()).unwrap();
///
/// let start = timebase.now();
/// timebase.delay_microseconds(5000);
/// assert!(timebase.elapsed_since(start) >= 5);
/// ```
#[derive(Debug)]
pub struct Timebase<C: DownCounter, W: WaitStrategy = SpinWait> {
    tracker: TimestampTracker<C>,
    delay: DelayEngine<W>,
    config: TimebaseConfig,
}

impl<C: DownCounter> Timebase<C, SpinWait> {
    /// Programs and starts the counter and resets the timestamp
    pub fn init(counter: C, config: TimebaseConfig) -> Result<Self, ConfigError> {
        Self::with_wait_strategy(counter, config, SpinWait)
    }
}

impl<C: DownCounter, W: WaitStrategy> Timebase<C, W> {
    /// Like [`Timebase::init`], calling `wait` between delay polls
    pub fn with_wait_strategy(
        counter: C,
        config: TimebaseConfig,
        wait: W,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut tracker = TimestampTracker::with_reload(counter, config.reload_value);
        tracker.init();
        log::info!(
            "timebase: {} Hz, counter reload {:#010x}",
            config.hz,
            config.reload_value
        );

        Ok(Self {
            tracker,
            delay: DelayEngine::with_wait_strategy(config.hz, wait),
            config,
        })
    }

    /// Returns the current timestamp
    pub fn now(&mut self) -> u64 {
        self.tracker.elapsed_since(0)
    }

    /// Returns the current timestamp as a 64-bit tick count
    pub fn ticks(&mut self) -> u64 {
        self.now()
    }

    /// Returns the ticks elapsed since `base`
    pub fn elapsed_since(&mut self, base: u64) -> u64 {
        self.tracker.elapsed_since(base)
    }

    /// Returns true once at least `ticks` have passed since `base`
    pub fn has_elapsed(&mut self, base: u64, ticks: u64) -> bool {
        self.elapsed_since(base) >= ticks
    }

    /// Restarts the timestamp from 0
    pub fn reset(&mut self) {
        self.tracker.reset();
    }

    /// Overwrites the timestamp
    pub fn set(&mut self, value: u64) {
        self.tracker.set(value);
    }

    /// Busy-waits `usec` microseconds
    pub fn delay_microseconds(&mut self, usec: u64) {
        self.delay.delay_preserving_timestamp(&mut self.tracker, usec);
    }

    /// Busy-waits `usec` microseconds using a signed end-tick comparison
    pub fn delay_microseconds_resetting(&mut self, usec: u64) {
        self.delay.delay_resetting(&mut self.tracker, usec);
    }

    /// Busy-waits `msec` milliseconds
    pub fn delay_milliseconds(&mut self, msec: u64) {
        self.delay.delay_milliseconds(&mut self.tracker, msec);
    }

    /// Returns the configured tick rate
    pub fn ticks_per_second(&self) -> u64 {
        self.config.hz
    }

    /// Converts microseconds to ticks, as the delays do
    pub fn usec_to_ticks(&self, usec: u64) -> u64 {
        self.delay.ticks_for(usec)
    }

    /// Returns the board configuration
    pub fn config(&self) -> &TimebaseConfig {
        &self.config
    }

    /// Returns the timestamp tracker
    pub fn tracker(&self) -> &TimestampTracker<C> {
        &self.tracker
    }

    /// Returns the timestamp tracker mutably
    pub fn tracker_mut(&mut self) -> &mut TimestampTracker<C> {
        &mut self.tracker
    }

    /// Returns the wait strategy
    pub fn wait_strategy(&self) -> &W {
        self.delay.wait_strategy()
    }

    /// Consumes the timebase, returning the counter
    pub fn into_counter(self) -> C {
        self.tracker.into_counter()
    }
}
