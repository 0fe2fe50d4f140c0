//! # ASPEED Timer Devices
//!
//! Down-counter implementations for the ASPEED timer block.
//!
//! ## Implementations
//!
//! - **AstTimer**: timer 1 of the SoC timer block, over any `RegisterIo`
//! - **FakeDownCounter**: scripted counter for testing without hardware
//!
//! ## Design Notes
//!
//! - Neither implementation accumulates ticks; that is done by the timebase
//! - Unsafe code is confined to `MmioRegisters`

use hal::{DownCounter, COUNTER_MAX};

use crate::mmio::{MmioRegisters, RegisterIo};
use crate::AST_TIMER_BASE;

/// Timer 1 of the ASPEED timer block
///
/// ## Hardware Details
///
/// - Counter register at offset `0x00`, counts down once per timer clock
/// - Reload register at offset `0x04`, loaded into the counter after 0
/// - Shared control register at offset `0x30`; bits 0-1 belong to timer 1
#[derive(Debug)]
pub struct AstTimer<R: RegisterIo> {
    regs: R,
}

impl<R: RegisterIo> AstTimer<R> {
    /// Timer 1 counter status register
    pub const COUNT: usize = 0x00;
    /// Timer 1 reload register
    pub const RELOAD: usize = 0x04;
    /// Timer control register (shared by all timers)
    pub const CONTROL: usize = 0x30;
    /// Timer 1 enable bit
    pub const CONTROL_ENABLE: u32 = 1 << 0;
    /// Timer 1 clock select: external 1 MHz reference
    pub const CONTROL_EXT_CLOCK: u32 = 1 << 1;

    /// Creates a timer over the given register window
    ///
    /// Note: This does not touch the hardware. The timebase programs and
    /// enables the timer during its own initialization.
    pub fn new(regs: R) -> Self {
        Self { regs }
    }

    /// Returns the underlying register window
    pub fn registers(&self) -> &R {
        &self.regs
    }

    /// Consumes the timer, returning the register window
    pub fn into_registers(self) -> R {
        self.regs
    }
}

impl AstTimer<MmioRegisters> {
    /// Creates a timer at the SoC's default timer block address
    ///
    /// # Safety
    ///
    /// The timer block must be mapped at `AST_TIMER_BASE` and must not be
    /// driven by anything else while this value exists.
    pub unsafe fn at_default_base() -> Self {
        // SAFETY: forwarded to the caller.
        Self::new(unsafe { MmioRegisters::new(AST_TIMER_BASE) })
    }
}

impl<R: RegisterIo> DownCounter for AstTimer<R> {
    fn read(&mut self) -> u32 {
        self.regs.read32(Self::COUNT)
    }

    fn configure(&mut self, reload_value: u32) {
        self.regs.write32(Self::RELOAD, reload_value);
    }

    fn enable(&mut self) {
        self.regs
            .write32(Self::CONTROL, Self::CONTROL_ENABLE | Self::CONTROL_EXT_CLOCK);
    }
}

/// Fake down-counter for testing
///
/// Returns the scripted readings first. Once the script is exhausted the
/// counter free-runs: every read decrements the last value by `step`,
/// reloading after 0 exactly like the hardware does. Free-running keeps
/// busy-wait loops under test from spinning forever.
///
/// # Examples
///
/// ```
/// use hal_aspeed::timer::FakeDownCounter;
/// use hal::DownCounter;
///
/// let mut counter = FakeDownCounter::new(vec![100, 60]);
///
/// assert_eq!(counter.read(), 100);
/// assert_eq!(counter.read(), 60);
/// assert_eq!(counter.read(), 59); // Free-running by 1 per read
/// ```
#[derive(Debug, Clone)]
pub struct FakeDownCounter {
    /// Scripted readings to return
    script: Vec<u32>,
    /// Current index in the script
    index: usize,
    /// Last value returned
    current: u32,
    /// Decrement applied per read once the script is exhausted
    step: u32,
    /// Programmed reload value
    reload_value: u32,
    /// Whether `enable` was called
    enabled: bool,
    /// Number of `read` calls so far
    reads: usize,
}

impl FakeDownCounter {
    /// Creates a counter that replays `script`, then free-runs by 1 per read
    pub fn new(script: Vec<u32>) -> Self {
        Self::with_step(script, 1)
    }

    /// Creates a counter that replays `script`, then free-runs by `step`
    pub fn with_step(script: Vec<u32>, step: u32) -> Self {
        Self {
            script,
            index: 0,
            current: COUNTER_MAX,
            step,
            reload_value: COUNTER_MAX,
            enabled: false,
            reads: 0,
        }
    }

    /// Creates a free-running counter whose first reading is `start`
    pub fn free_running(start: u32, step: u32) -> Self {
        Self::with_step(vec![start], step)
    }

    /// Returns the number of remaining scripted readings
    pub fn remaining(&self) -> usize {
        self.script.len().saturating_sub(self.index)
    }

    /// Returns the programmed reload value
    pub fn reload_value(&self) -> u32 {
        self.reload_value
    }

    /// Returns whether the counter was enabled
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Returns how many times the counter was read
    pub fn reads(&self) -> usize {
        self.reads
    }

    fn free_run(&self) -> u32 {
        // Counting down from `current` by `step`, reloading after 0.
        let modulus = u64::from(self.reload_value) + 1;
        let current = u64::from(self.current) % modulus;
        let step = u64::from(self.step) % modulus;
        ((current + modulus - step) % modulus) as u32
    }
}

impl DownCounter for FakeDownCounter {
    fn read(&mut self) -> u32 {
        self.reads += 1;
        self.current = if self.index < self.script.len() {
            let value = self.script[self.index];
            self.index += 1;
            value
        } else {
            self.free_run()
        };
        self.current
    }

    fn configure(&mut self, reload_value: u32) {
        self.reload_value = reload_value;
    }

    fn enable(&mut self) {
        self.enabled = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mmio::FakeRegisters;

    #[test]
    fn test_ast_timer_reads_count_register() {
        let mut regs = FakeRegisters::new();
        regs.script_reads(AstTimer::<FakeRegisters>::COUNT, &[0xFFFF_FFF0, 0xFFFF_FF00]);
        let mut timer = AstTimer::new(regs);

        assert_eq!(timer.read(), 0xFFFF_FFF0);
        assert_eq!(timer.read(), 0xFFFF_FF00);
        assert_eq!(timer.registers().remaining_reads(), 0);
    }

    #[test]
    fn test_ast_timer_programming_sequence() {
        let mut timer = AstTimer::new(FakeRegisters::new());
        timer.configure(COUNTER_MAX);
        timer.enable();

        let regs = timer.into_registers();
        assert_eq!(regs.writes(), &[(0x04, 0xFFFF_FFFF), (0x30, 0x3)]);
    }

    #[test]
    fn test_fake_counter_replays_script() {
        let mut counter = FakeDownCounter::new(vec![50, 40, 30]);

        assert_eq!(counter.remaining(), 3);
        assert_eq!(counter.read(), 50);
        assert_eq!(counter.read(), 40);
        assert_eq!(counter.read(), 30);
        assert_eq!(counter.remaining(), 0);
        assert_eq!(counter.reads(), 3);
    }

    #[test]
    fn test_fake_counter_free_runs_after_script() {
        let mut counter = FakeDownCounter::with_step(vec![100], 25);

        assert_eq!(counter.read(), 100);
        assert_eq!(counter.read(), 75);
        assert_eq!(counter.read(), 50);
    }

    #[test]
    fn test_fake_counter_wraps_through_reload_value() {
        let mut counter = FakeDownCounter::free_running(2, 3);

        assert_eq!(counter.read(), 2);
        assert_eq!(counter.read(), COUNTER_MAX);
        assert_eq!(counter.read(), COUNTER_MAX - 3);
    }

    #[test]
    fn test_fake_counter_honours_small_reload() {
        let mut counter = FakeDownCounter::free_running(1, 2);
        counter.configure(999);

        assert_eq!(counter.read(), 1);
        assert_eq!(counter.read(), 999);
        assert_eq!(counter.read(), 997);
    }

    #[test]
    fn test_fake_counter_empty_script_starts_at_max() {
        let mut counter = FakeDownCounter::new(vec![]);
        assert_eq!(counter.read(), COUNTER_MAX - 1);
    }

    #[test]
    fn test_fake_counter_records_programming() {
        let mut counter = FakeDownCounter::new(vec![]);
        assert!(!counter.is_enabled());

        counter.configure(0x1000);
        counter.enable();

        assert_eq!(counter.reload_value(), 0x1000);
        assert!(counter.is_enabled());
    }
}
