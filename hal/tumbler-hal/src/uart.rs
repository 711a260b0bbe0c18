//! UART serial channel abstractions
//!
//! The injector never keeps the serial peripheral open between
//! transmissions. A [`SerialPort`] hands out a channel guard configured
//! for one burst. Once the guard is gone, [`SerialPort::close`] shuts the
//! peripheral down and gives its pin back to GPIO control.

use embedded_io_async::Write;

/// Serial peripheral that can be acquired for a single burst
pub trait SerialPort {
    /// Error type for acquisition and transmit operations
    type Error: embedded_io_async::Error;

    /// Channel guard, open for as long as it is alive
    type Channel<'a>: Write<Error = Self::Error>
    where
        Self: 'a;

    /// Claim the peripheral and configure it
    ///
    /// Fails if the peripheral is held elsewhere or rejects the
    /// configuration.
    fn acquire(&mut self, config: &UartConfig) -> Result<Self::Channel<'_>, Self::Error>;

    /// Detach the peripheral from its pin
    ///
    /// Must be called after every [`acquire`](Self::acquire), whether or
    /// not it succeeded. Closing an already closed port does nothing.
    fn close(&mut self);
}

/// UART configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UartConfig {
    /// Baud rate in bits per second
    pub baudrate: u32,
    /// Number of data bits (typically 8)
    pub data_bits: DataBits,
    /// Parity mode
    pub parity: Parity,
    /// Number of stop bits
    pub stop_bits: StopBits,
}

impl UartConfig {
    /// 8N1 framing at the given baud rate
    pub const fn eight_n_one(baudrate: u32) -> Self {
        Self {
            baudrate,
            data_bits: DataBits::Eight,
            parity: Parity::None,
            stop_bits: StopBits::One,
        }
    }
}

impl Default for UartConfig {
    fn default() -> Self {
        Self::eight_n_one(115200)
    }
}

/// Number of data bits per frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DataBits {
    Seven,
    Eight,
}

/// Parity mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Parity {
    None,
    Even,
    Odd,
}

/// Number of stop bits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StopBits {
    One,
    Two,
}
