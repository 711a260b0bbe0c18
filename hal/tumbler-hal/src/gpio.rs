//! GPIO signal line abstraction
//!
//! The wake line is not a permanently configured output: it is switched
//! to a driven output right before a transmission and handed back to a
//! high-impedance state when the session ends.

/// Logic level of a driven pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    Low,
    High,
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high {
            Level::High
        } else {
            Level::Low
        }
    }
}

/// Reconfigurable digital signal pin
///
/// Implementations should handle the actual pad and function-select
/// register manipulation for the specific chip.
pub trait SignalPin {
    /// Error raised when the pin cannot be claimed as an output
    type Error: core::fmt::Debug;

    /// Configure the pin as a push-pull output, driving high
    ///
    /// The level is set before the driver is enabled so the line does not
    /// glitch low. Calling this on a pin that is already an output must be
    /// harmless.
    fn configure_output(&mut self) -> Result<(), Self::Error>;

    /// Drive the pin to the given level
    fn set_level(&mut self, level: Level);

    /// Drive the pin high (logic 1)
    fn set_high(&mut self) {
        self.set_level(Level::High);
    }

    /// Drive the pin low (logic 0)
    fn set_low(&mut self) {
        self.set_level(Level::Low);
    }

    /// Return the pin to a floating, undriven state
    fn release(&mut self);
}
