//! Register I/O abstraction for the ASPEED peripheral window
//!
//! This module provides a trait-based abstraction for 32-bit memory-mapped
//! register access, allowing for both real hardware access and fake
//! implementations for testing.
//!
//! ## Safety
//!
//! Memory-mapped register access is inherently unsafe as it directly interacts
//! with hardware. Care must be taken to:
//! - Only map a window that really belongs to the peripheral
//! - Not interfere with other system components
//!
//! The `MmioRegisters` implementation isolates all unsafe code to its
//! constructor and two small, auditable accessors.

use core::ptr::{read_volatile, write_volatile};

/// 32-bit register window
///
/// Offsets are byte offsets from the start of the peripheral block.
///
/// ## Implementation Notes
///
/// Implementations must guarantee:
/// - Each access is a single 32-bit read or write
/// - Operations complete synchronously before returning
pub trait RegisterIo {
    /// Reads the register at `offset`
    fn read32(&mut self, offset: usize) -> u32;

    /// Writes `value` to the register at `offset`
    fn write32(&mut self, offset: usize, value: u32);
}

/// Real memory-mapped register window
///
/// ## Example
///
/// ```rust,ignore
/// let mut regs = unsafe { MmioRegisters::new(AST_TIMER_BASE) };
/// let count = regs.read32(0x00);
/// ```
#[derive(Debug)]
pub struct MmioRegisters {
    base: usize,
}

impl MmioRegisters {
    /// Creates a register window starting at `base`
    ///
    /// # Safety
    ///
    /// The caller must ensure `base` is the mapped address of a peripheral
    /// block whose registers may be accessed with 32-bit volatile operations
    /// for as long as this value exists.
    pub const unsafe fn new(base: usize) -> Self {
        Self { base }
    }

    /// Returns the base address of the window
    pub fn base(&self) -> usize {
        self.base
    }

    fn register(&self, offset: usize) -> *mut u32 {
        (self.base + offset) as *mut u32
    }
}

impl RegisterIo for MmioRegisters {
    #[inline]
    fn read32(&mut self, offset: usize) -> u32 {
        // SAFETY: `new` requires the window to be valid for volatile 32-bit
        // accesses.
        unsafe { read_volatile(self.register(offset)) }
    }

    #[inline]
    fn write32(&mut self, offset: usize, value: u32) {
        // SAFETY: see `read32`.
        unsafe { write_volatile(self.register(offset), value) }
    }
}

/// Fake register window for testing
///
/// Allows scripted reads and captures writes for test verification.
///
/// ## Example
///
/// ```rust
/// use hal_aspeed::mmio::{FakeRegisters, RegisterIo};
///
/// let mut regs = FakeRegisters::new();
/// regs.script_read(0x00, 0xFFFF_FF00);
///
/// assert_eq!(regs.read32(0x00), 0xFFFF_FF00);
/// regs.write32(0x30, 0x3);
///
/// assert_eq!(regs.remaining_reads(), 0);
/// assert_eq!(regs.writes(), &[(0x30, 0x3)]);
/// ```
#[derive(Debug, Default)]
pub struct FakeRegisters {
    /// Scripted read values: (offset, value)
    read_script: Vec<(usize, u32)>,
    /// Current read index
    read_index: usize,
    /// Captured write operations: (offset, value)
    writes: Vec<(usize, u32)>,
}

impl FakeRegisters {
    /// Creates an empty fake register window
    pub fn new() -> Self {
        Self::default()
    }

    /// Scripts a read: the next `read32(offset)` returns `value`
    pub fn script_read(&mut self, offset: usize, value: u32) {
        self.read_script.push((offset, value));
    }

    /// Scripts several reads of the same register
    pub fn script_reads(&mut self, offset: usize, values: &[u32]) {
        self.read_script
            .extend(values.iter().map(|&value| (offset, value)));
    }

    /// Returns the number of scripted reads remaining
    pub fn remaining_reads(&self) -> usize {
        self.read_script.len() - self.read_index
    }

    /// Returns all captured writes
    pub fn writes(&self) -> &[(usize, u32)] {
        &self.writes
    }

    /// Returns the last value written to `offset`, if any
    pub fn last_write(&self, offset: usize) -> Option<u32> {
        self.writes
            .iter()
            .rev()
            .find(|(written, _)| *written == offset)
            .map(|&(_, value)| value)
    }
}

impl RegisterIo for FakeRegisters {
    fn read32(&mut self, offset: usize) -> u32 {
        if self.read_index >= self.read_script.len() {
            panic!(
                "FakeRegisters: No scripted read for offset 0x{:02X} (read_index={}, script_len={})",
                offset,
                self.read_index,
                self.read_script.len()
            );
        }

        let (expected, value) = self.read_script[self.read_index];
        if offset != expected {
            panic!(
                "FakeRegisters: Offset mismatch at read_index={}: expected 0x{:02X}, got 0x{:02X}",
                self.read_index, expected, offset
            );
        }

        self.read_index += 1;
        value
    }

    fn write32(&mut self, offset: usize, value: u32) {
        self.writes.push((offset, value));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fake_registers_creation() {
        let regs = FakeRegisters::new();
        assert_eq!(regs.remaining_reads(), 0);
        assert!(regs.writes().is_empty());
    }

    #[test]
    fn test_fake_registers_script_reads() {
        let mut regs = FakeRegisters::new();
        regs.script_reads(0x00, &[30, 20, 10]);

        assert_eq!(regs.remaining_reads(), 3);
        assert_eq!(regs.read32(0x00), 30);
        assert_eq!(regs.read32(0x00), 20);
        assert_eq!(regs.read32(0x00), 10);
        assert_eq!(regs.remaining_reads(), 0);
    }

    #[test]
    fn test_fake_registers_last_write() {
        let mut regs = FakeRegisters::new();
        regs.write32(0x04, 0x1000);
        regs.write32(0x30, 0x3);
        regs.write32(0x04, 0xFFFF_FFFF);

        assert_eq!(regs.last_write(0x04), Some(0xFFFF_FFFF));
        assert_eq!(regs.last_write(0x30), Some(0x3));
        assert_eq!(regs.last_write(0x08), None);
    }

    #[test]
    #[should_panic(expected = "No scripted read")]
    fn test_fake_registers_panic_on_unscripted_read() {
        let mut regs = FakeRegisters::new();
        regs.read32(0x00);
    }

    #[test]
    #[should_panic(expected = "Offset mismatch")]
    fn test_fake_registers_panic_on_wrong_offset() {
        let mut regs = FakeRegisters::new();
        regs.script_read(0x00, 1);
        regs.read32(0x04);
    }

    #[test]
    fn test_mmio_registers_on_local_memory() {
        let mut window = [0u32; 4];
        let base = window.as_mut_ptr() as usize;
        // SAFETY: `window` outlives `regs` and is 4 aligned u32 cells.
        let mut regs = unsafe { MmioRegisters::new(base) };

        regs.write32(0x04, 0xDEAD_BEEF);
        assert_eq!(regs.read32(0x04), 0xDEAD_BEEF);
        assert_eq!(regs.read32(0x00), 0);
        assert_eq!(regs.base(), base);
        drop(regs);
        assert_eq!(window[1], 0xDEAD_BEEF);
    }
}
