//! UART transmitter for the service line
//!
//! A [`UartTx`] is built from reborrowed peripherals on every acquire and
//! lives only as long as its [`RpSerialChannel`]. Handing the pin back to
//! GPIO is the line's job, see [`crate::line`].

use embassy_rp::uart::{
    self, Async, Config as RpUartConfig, DataBits as RpDataBits, Parity as RpParity,
    StopBits as RpStopBits, UartTx,
};
use embassy_time::{Duration, Timer};
use embedded_io_async::{ErrorKind, ErrorType, Write};
use tumbler_hal::{DataBits, Parity, StopBits, UartConfig};

/// Poll interval while the shift register drains, under one byte time at 4800 baud
const DRAIN_POLL: Duration = Duration::from_millis(1);

/// Error from UART operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SerialError {
    /// Receiver overrun
    Overrun,
    /// Break condition
    Break,
    /// Parity error
    Parity,
    /// Framing error
    Framing,
    /// Other error
    Other,
}

impl From<uart::Error> for SerialError {
    fn from(e: uart::Error) -> Self {
        match e {
            uart::Error::Overrun => SerialError::Overrun,
            uart::Error::Break => SerialError::Break,
            uart::Error::Parity => SerialError::Parity,
            uart::Error::Framing => SerialError::Framing,
            _ => SerialError::Other,
        }
    }
}

impl embedded_io_async::Error for SerialError {
    fn kind(&self) -> ErrorKind {
        match self {
            SerialError::Overrun => ErrorKind::OutOfMemory,
            SerialError::Parity | SerialError::Framing => ErrorKind::InvalidData,
            SerialError::Break | SerialError::Other => ErrorKind::Other,
        }
    }
}

/// Configured transmitter, open until dropped and the line is closed
pub struct RpSerialChannel<'d> {
    tx: UartTx<'d, Async>,
}

impl<'d> RpSerialChannel<'d> {
    pub(crate) fn new(tx: UartTx<'d, Async>) -> Self {
        Self { tx }
    }
}

impl ErrorType for RpSerialChannel<'_> {
    type Error = SerialError;
}

impl Write for RpSerialChannel<'_> {
    async fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        self.tx.write(buf).await?;
        Ok(buf.len())
    }

    async fn flush(&mut self) -> Result<(), Self::Error> {
        // DMA completion only means the FIFO was filled
        while self.tx.busy() {
            Timer::after(DRAIN_POLL).await;
        }
        Ok(())
    }
}

pub(crate) fn rp_config(config: &UartConfig) -> RpUartConfig {
    let mut cfg = RpUartConfig::default();
    cfg.baudrate = config.baudrate;
    cfg.data_bits = match config.data_bits {
        DataBits::Seven => RpDataBits::DataBits7,
        DataBits::Eight => RpDataBits::DataBits8,
    };
    cfg.parity = match config.parity {
        Parity::None => RpParity::ParityNone,
        Parity::Even => RpParity::ParityEven,
        Parity::Odd => RpParity::ParityOdd,
    };
    cfg.stop_bits = match config.stop_bits {
        StopBits::One => RpStopBits::STOP1,
        StopBits::Two => RpStopBits::STOP2,
    };
    cfg
}
