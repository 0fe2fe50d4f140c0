//! # ASPEED Hardware Abstraction Layer
//!
//! This crate implements the HAL counter trait for the ASPEED BMC SoC timer
//! block.
//!
//! ## Scope
//!
//! Only timer 1 is driven, as a free-running down-counter. Interrupt delivery
//! and the other timers of the block are left alone.

pub mod mmio;
pub mod timer;

pub use mmio::{FakeRegisters, MmioRegisters, RegisterIo};
pub use timer::{AstTimer, FakeDownCounter};

/// Base address of the SoC timer block
pub const AST_TIMER_BASE: usize = 0x1E78_2000;
