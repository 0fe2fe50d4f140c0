//! # Delay Engine
//!
//! Busy-wait delays measured on a [`TimestampTracker`].
//!
//! There is no scheduler underneath: a delay spins until enough ticks have
//! been observed, calling the configured [`WaitStrategy`] between polls.
//! Delays cannot be cancelled and always run to completion.

use hal::{DownCounter, SpinWait, WaitStrategy};

use crate::tracker::TimestampTracker;

/// Converts microseconds to ticks at `hz` ticks per second
///
/// Large requests are scaled to milliseconds before multiplying so that the
/// intermediate product stays small. The two branches truncate at different
/// points, so the result is not exact for every input: 1500 µs at 1 MHz
/// gives 1000 ticks. Products that would overflow saturate.
///
/// # Examples
///
/// ```
/// use timebase::usec_to_ticks;
///
/// assert_eq!(usec_to_ticks(500, 1000), 0);
/// assert_eq!(usec_to_ticks(2500, 1000), 2);
/// assert_eq!(usec_to_ticks(250, 1_000_000), 250);
/// ```
pub fn usec_to_ticks(usec: u64, hz: u64) -> u64 {
    if usec >= 1000 {
        (usec / 1000).saturating_mul(hz) / 1000
    } else {
        usec.saturating_mul(hz) / 1_000_000
    }
}

/// Busy-wait delays at a fixed tick rate
#[derive(Debug, Clone)]
pub struct DelayEngine<W: WaitStrategy = SpinWait> {
    hz: u64,
    wait: W,
}

impl DelayEngine<SpinWait> {
    /// Creates an engine that spins with `core::hint::spin_loop`
    pub fn new(hz: u64) -> Self {
        Self::with_wait_strategy(hz, SpinWait)
    }
}

impl<W: WaitStrategy> DelayEngine<W> {
    /// Creates an engine that calls `wait` between polls
    pub fn with_wait_strategy(hz: u64, wait: W) -> Self {
        Self { hz, wait }
    }

    /// Returns the tick rate
    pub fn hz(&self) -> u64 {
        self.hz
    }

    /// Returns the ticks a delay of `usec` waits for
    pub fn ticks_for(&self, usec: u64) -> u64 {
        usec_to_ticks(usec, self.hz)
    }

    /// Returns the wait strategy
    pub fn wait_strategy(&self) -> &W {
        &self.wait
    }

    /// Waits `usec` microseconds, keeping the timestamp advancing
    ///
    /// Spins until the wrapping distance from the start tick reaches the
    /// requested tick count, so a timestamp that rolls over 64 bits during
    /// the wait does not stall it. The timestamp is never reset.
    pub fn delay_preserving_timestamp<C: DownCounter>(
        &mut self,
        tracker: &mut TimestampTracker<C>,
        usec: u64,
    ) {
        let ticks = self.ticks_for(usec);
        let start = tracker.elapsed_since(0);

        if start.checked_add(ticks).is_none() {
            log::debug!(
                "delay {}us: wake tick rolls over from {}, waiting on distance",
                usec,
                start
            );
        } else {
            log::trace!("delay {}us: {} ticks from {}", usec, ticks, start);
        }

        while tracker.poll().wrapping_sub(start) < ticks {
            self.wait.relax();
        }
    }

    /// Waits `usec` microseconds against a signed end-tick comparison
    ///
    /// Spins while `end - now` is non-negative, so the delay lasts at least
    /// one tick longer than requested. The timestamp is left untouched.
    pub fn delay_resetting<C: DownCounter>(
        &mut self,
        tracker: &mut TimestampTracker<C>,
        usec: u64,
    ) {
        let ticks = self.ticks_for(usec);
        let end = tracker.poll().wrapping_add(ticks);
        log::trace!("delay {}us: {} ticks, end at {}", usec, ticks, end);

        while end.wrapping_sub(tracker.poll()) as i64 >= 0 {
            self.wait.relax();
        }
    }

    /// Waits `msec` milliseconds, keeping the timestamp advancing
    pub fn delay_milliseconds<C: DownCounter>(
        &mut self,
        tracker: &mut TimestampTracker<C>,
        msec: u64,
    ) {
        self.delay_preserving_timestamp(tracker, msec.saturating_mul(1000));
    }
}
