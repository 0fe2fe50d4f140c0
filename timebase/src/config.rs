//! Timebase configuration
//!
//! The tick rate and the counter reload value are board properties. They are
//! passed in explicitly; nothing is read from the environment.

use hal::COUNTER_MAX;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default logical tick rate (ticks per second)
pub const DEFAULT_HZ: u64 = 1000;

/// Errors that can occur when validating a [`TimebaseConfig`]
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Tick rate of zero would make every delay zero ticks long
    #[error("Tick rate must be non-zero")]
    ZeroFrequency,

    /// A zero reload value leaves the counter stuck at 0
    #[error("Counter reload value must be non-zero")]
    ZeroReload,
}

/// Board timing parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimebaseConfig {
    /// Ticks per second of the tracked counter
    pub hz: u64,
    /// Value the counter restarts from after reaching 0
    pub reload_value: u32,
}

impl TimebaseConfig {
    /// Creates a configuration with the default tick rate and full-range reload
    pub const fn new() -> Self {
        Self {
            hz: DEFAULT_HZ,
            reload_value: COUNTER_MAX,
        }
    }

    /// Sets the tick rate
    pub const fn with_hz(mut self, hz: u64) -> Self {
        self.hz = hz;
        self
    }

    /// Sets the counter reload value
    pub const fn with_reload_value(mut self, reload_value: u32) -> Self {
        self.reload_value = reload_value;
        self
    }

    /// Checks the configuration can drive a timebase
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.hz == 0 {
            return Err(ConfigError::ZeroFrequency);
        }
        if self.reload_value == 0 {
            return Err(ConfigError::ZeroReload);
        }
        Ok(())
    }
}

impl Default for TimebaseConfig {
    fn default() -> Self {
        Self::new()
    }
}
