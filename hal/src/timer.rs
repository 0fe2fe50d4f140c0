//! # Tick Source
//!
//! The view of time that sits above a raw down-counter: a 64-bit count that
//! only moves forward.
//!
//! A wrapping hardware counter cannot offer this on its own. Something has to
//! read it regularly and fold every wrap into the running total; the
//! timestamp tracker in the timebase crate is that something, and it exposes
//! the result through [`TimerDevice`].
//!
//! Reading the tick count never blocks and never arms an interrupt. Calendar
//! time is out of scope here, and so is the tick rate, which the board
//! configuration supplies.

/// Monotonic tick source
///
/// # Implementation Notes
///
/// - Must not block
/// - Tick frequency is implementation-defined
/// - Implementations built on wrapping hardware may require a minimum poll
///   rate to stay monotonic
///
/// # Examples
///
/// ```
/// use hal::TimerDevice;
///
/// fn measure_operation<T: TimerDevice>(timer: &mut T) -> u64 {
///     let start = timer.poll_ticks();
///     // ... do work ...
///     let end = timer.poll_ticks();
///     end - start
/// }
/// ```
pub trait TimerDevice {
    /// Returns the current cumulative tick count
    fn poll_ticks(&mut self) -> u64;
}
