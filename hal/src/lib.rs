//! # Hardware Abstraction Layer (HAL)
//!
//! This crate defines the hardware abstraction traits the timebase is built on.
//!
//! ## Philosophy
//!
//! **The timer register is a capability, not an address.**
//!
//! Nothing above this layer knows where the counter lives or how it is
//! programmed. Board crates implement these traits; the timebase consumes them.
//!
//! ## Design Principles
//!
//! 1. **No SoC-specific assumptions**: Register offsets live in board crates
//! 2. **Trait-based**: Counter reads, tick polling and spin hints go through traits
//! 3. **Minimal unsafe**: Register access requires unsafe, but keep it isolated
//! 4. **Testable**: Every trait can be backed by a scripted fake

pub mod counter;
pub mod timer;
pub mod wait;

pub use counter::{DownCounter, COUNTER_MAX};
pub use timer::TimerDevice;
pub use wait::{SpinWait, WaitStrategy};
