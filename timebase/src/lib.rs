//! # Timebase
//!
//! Monotonic timestamps and busy-wait delays for boot stages that run before
//! any interrupt-driven scheduler exists.
//!
//! ## Philosophy
//!
//! **One counter, one owner.**
//!
//! A single free-running down-counter is the only time source. The
//! [`Timebase`] owns it and is passed by `&mut` to whatever needs time, so
//! there is no global timer state and no locking.
//!
//! ## Layers
//!
//! 1. [`TimestampTracker`]: wrapping 32-bit counter readings to a 64-bit timestamp
//! 2. [`DelayEngine`]: microsecond delays as spin loops on the tracker
//! 3. [`Timebase`]: the context object boot code holds, plus unit conversions
//!
//! ## Limitations
//!
//! The tracker must be polled at least once per counter period. Missed wraps
//! are not detected and make elapsed times read short.

pub mod config;
pub mod delay;
pub mod facade;
pub mod tracker;

pub use config::{ConfigError, TimebaseConfig, DEFAULT_HZ};
pub use delay::{usec_to_ticks, DelayEngine};
pub use facade::Timebase;
pub use tracker::TimestampTracker;
