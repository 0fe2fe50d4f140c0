//! Busy-wait hook
//!
//! Delay loops call [`WaitStrategy::relax`] once per poll. The default
//! strategy only hints the CPU that it is spinning; a scheduler-aware
//! environment can substitute one that yields instead.

/// Called once per iteration of a polling wait loop
pub trait WaitStrategy {
    /// Gives the CPU a chance to relax before the next poll
    fn relax(&mut self);
}

/// Plain spin loop
#[derive(Debug, Default, Clone, Copy)]
pub struct SpinWait;

impl WaitStrategy for SpinWait {
    #[inline]
    fn relax(&mut self) {
        core::hint::spin_loop();
    }
}

impl<W: WaitStrategy + ?Sized> WaitStrategy for &mut W {
    fn relax(&mut self) {
        (**self).relax()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct CountingWait(usize);

    impl WaitStrategy for CountingWait {
        fn relax(&mut self) {
            self.0 += 1;
        }
    }

    #[test]
    fn test_spin_wait_returns() {
        let mut wait = SpinWait;
        wait.relax();
        wait.relax();
    }

    fn relax_twice<W: WaitStrategy>(mut wait: W) {
        wait.relax();
        wait.relax();
    }

    #[test]
    fn test_borrowed_strategy_forwards() {
        let mut wait = CountingWait(0);
        relax_twice(&mut wait);
        assert_eq!(wait.0, 2);
    }
}
