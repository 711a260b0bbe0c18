//! Configuration type definitions

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tumbler_hal::UartConfig;
use tumbler_protocol::FRAME_LEN;

/// Baud rate of the safe service port
pub const DEVICE_BAUDRATE: u32 = 4800;

/// Wake pulse low time required by the receiver (3.4 ms)
pub const WAKE_HOLD_US: u32 = 3_400;

/// Time the line is kept open after the burst
pub const SETTLE_MS: u32 = 100;

/// Time the device needs to commit an overwrite before it accepts an unlock
pub const INTER_COMMAND_MS: u32 = 500;

/// Bits per byte on an 8N1 line (start + 8 data + stop)
const BITS_PER_BYTE: u32 = 10;

/// Configuration error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Baud rate of zero
    InvalidBaudrate,
    /// Wake pulse of zero length
    WakeHoldTooShort,
    /// Settle time shorter than the time needed to drain one frame
    SettleTooShort,
    /// Inter-command delay below what the device needs to commit a code
    InterCommandTooShort,
    /// Repeat or long-press threshold inconsistent with debounce
    InvalidInputTiming,
}

/// Timing of one transmission and of the overwrite/unlock pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct LinkTiming {
    /// Low time of the wake pulse in microseconds
    pub wake_hold_us: u32,
    /// Wait after writing the frame, before releasing the line
    pub settle_ms: u32,
    /// Wait between the overwrite and the unlock command
    pub inter_command_ms: u32,
}

impl LinkTiming {
    /// Timing expected by the device
    pub const PROTOCOL: Self = Self {
        wake_hold_us: WAKE_HOLD_US,
        settle_ms: SETTLE_MS,
        inter_command_ms: INTER_COMMAND_MS,
    };
}

impl Default for LinkTiming {
    fn default() -> Self {
        Self::PROTOCOL
    }
}

/// Serial link configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct LinkConfig {
    /// Baud rate in bits per second
    pub baudrate: u32,
    /// Wake pulse and delay timings
    pub timing: LinkTiming,
}

impl LinkConfig {
    /// Configuration expected by the device
    pub const PROTOCOL: Self = Self {
        baudrate: DEVICE_BAUDRATE,
        timing: LinkTiming::PROTOCOL,
    };

    /// UART settings for one burst (8N1)
    pub const fn uart_config(&self) -> UartConfig {
        UartConfig::eight_n_one(self.baudrate)
    }

    /// Time needed to shift one frame out, rounded up to whole milliseconds
    pub const fn frame_drain_ms(&self) -> u32 {
        if self.baudrate == 0 {
            return u32::MAX;
        }
        let bits = FRAME_LEN as u32 * BITS_PER_BYTE * 1000;
        bits.div_ceil(self.baudrate)
    }

    /// Check the configuration against the device's timing contract
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.baudrate == 0 {
            return Err(ConfigError::InvalidBaudrate);
        }
        if self.timing.wake_hold_us == 0 {
            return Err(ConfigError::WakeHoldTooShort);
        }
        if self.timing.settle_ms < self.frame_drain_ms() {
            return Err(ConfigError::SettleTooShort);
        }
        if self.timing.inter_command_ms < INTER_COMMAND_MS {
            return Err(ConfigError::InterCommandTooShort);
        }
        Ok(())
    }
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self::PROTOCOL
    }
}

/// Button timing used by the input front-end
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct InputTiming {
    /// Minimum stable time before a level change counts
    pub debounce_ms: u32,
    /// Hold time after which a press becomes a long press
    pub long_press_ms: u32,
    /// Interval between repeats of a held arrow key
    pub repeat_ms: u32,
}

impl InputTiming {
    /// Check that thresholds are ordered sensibly
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.repeat_ms == 0 || self.long_press_ms <= self.debounce_ms {
            return Err(ConfigError::InvalidInputTiming);
        }
        Ok(())
    }
}

impl Default for InputTiming {
    fn default() -> Self {
        Self {
            debounce_ms: 20,
            long_press_ms: 500,
            repeat_ms: 150,
        }
    }
}
