//! # Down-Counting Hardware Counter
//!
//! The raw capability a free-running timer register exposes: a 32-bit value
//! that decrements once per hardware tick and restarts from its reload value
//! after passing zero.
//!
//! This layer does not accumulate, scale or interpret readings. That is the
//! job of the timestamp tracker built on top of it.

/// Largest value a 32-bit down-counter can hold, and the default reload value.
pub const COUNTER_MAX: u32 = 0xFFFF_FFFF;

/// Free-running, down-counting hardware counter
///
/// # Implementation Notes
///
/// - `read` must return the live counter value without side effects on it
/// - After reaching 0 the counter continues from the programmed reload value
/// - Register accesses are treated as atomic 32-bit reads/writes
///
/// # Examples
///
/// ```
/// use hal::DownCounter;
///
/// fn ticks_between<C: DownCounter>(counter: &mut C) -> u32 {
///     let before = counter.read();
///     let after = counter.read();
///     before.wrapping_sub(after)
/// }
/// ```
pub trait DownCounter {
    /// Reads the current counter value
    fn read(&mut self) -> u32;

    /// Programs the value the counter restarts from after reaching 0
    fn configure(&mut self, reload_value: u32);

    /// Starts the counter
    fn enable(&mut self);
}

impl<C: DownCounter + ?Sized> DownCounter for &mut C {
    fn read(&mut self) -> u32 {
        (**self).read()
    }

    fn configure(&mut self, reload_value: u32) {
        (**self).configure(reload_value)
    }

    fn enable(&mut self) {
        (**self).enable()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StepCounter {
        value: u32,
        reload: u32,
        enabled: bool,
    }

    impl DownCounter for StepCounter {
        fn read(&mut self) -> u32 {
            let current = self.value;
            if self.enabled {
                self.value = if self.value == 0 {
                    self.reload
                } else {
                    self.value - 1
                };
            }
            current
        }

        fn configure(&mut self, reload_value: u32) {
            self.reload = reload_value;
        }

        fn enable(&mut self) {
            self.enabled = true;
        }
    }

    #[test]
    fn test_counter_decrements_and_reloads() {
        let mut counter = StepCounter {
            value: 1,
            reload: 0,
            enabled: false,
        };
        counter.configure(COUNTER_MAX);
        counter.enable();

        assert_eq!(counter.read(), 1);
        assert_eq!(counter.read(), 0);
        assert_eq!(counter.read(), COUNTER_MAX);
        assert_eq!(counter.read(), COUNTER_MAX - 1);
    }

    fn program<C: DownCounter>(mut counter: C, reload_value: u32) -> u32 {
        counter.configure(reload_value);
        counter.enable();
        counter.read()
    }

    #[test]
    fn test_counter_through_mutable_reference() {
        let mut counter = StepCounter {
            value: 5,
            reload: 9,
            enabled: false,
        };

        assert_eq!(program(&mut counter, 3), 5);
        assert_eq!(counter.reload, 3);
        assert!(counter.enabled);
        assert_eq!(counter.read(), 4);
    }
}
