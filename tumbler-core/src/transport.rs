//! Physical transport: wake pulse followed by a serial burst
//!
//! The receiver in the safe's keypad sleeps until it sees the signal line
//! held low for a few milliseconds and released. Only then does it sample
//! the serial line. Each transmission therefore runs, in order:
//!
//! 1. configure the signal pin as an output
//! 2. drive low, hold [`LinkTiming::wake_hold_us`], drive high
//! 3. acquire the UART (8N1), write the 8-byte frame, wait
//!    [`LinkTiming::settle_ms`]
//! 4. close the UART, returning the pin to GPIO control
//!
//! There is no acknowledgement: `Ok(())` means the bytes left the pin.
//!
//! [`LinkTiming::wake_hold_us`]: crate::config::LinkTiming::wake_hold_us
//! [`LinkTiming::settle_ms`]: crate::config::LinkTiming::settle_ms

use embedded_hal_async::delay::DelayNs;
use embedded_io_async::Write;
use tumbler_hal::{SerialPort, SignalPin};
use tumbler_protocol::Frame;

use crate::config::LinkConfig;

/// Something that can put a frame on the wire
///
/// Implemented by [`WakeSerialTransport`] and by recording stubs in tests.
#[allow(async_fn_in_trait)]
pub trait Transmit {
    /// Error returned when the frame could not be sent
    type Error;

    /// Send one frame, including any wake-up handshake
    async fn transmit(&mut self, frame: &Frame) -> Result<(), Self::Error>;
}

/// Transport failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransportError<P, S> {
    /// Signal pin could not be configured as an output
    Pin(P),
    /// Serial peripheral could not be acquired or configured
    Acquire(S),
    /// Serial write or flush failed
    Write(S),
}

/// Wake pulse + UART transport over a single line
///
/// `L` is the pin and the UART behind it. The pin is a GPIO output for
/// the wake pulse and is handed to the UART for the burst.
pub struct WakeSerialTransport<L, D> {
    line: L,
    delay: D,
    link: LinkConfig,
}

type LineError<L> = TransportError<<L as SignalPin>::Error, <L as SerialPort>::Error>;

impl<L, D> WakeSerialTransport<L, D>
where
    L: SignalPin + SerialPort,
    D: DelayNs,
{
    /// Create a transport using the device's protocol timing
    pub fn new(line: L, delay: D) -> Self {
        Self::with_config(line, delay, LinkConfig::PROTOCOL)
    }

    /// Create a transport with explicit link settings
    pub fn with_config(line: L, delay: D, link: LinkConfig) -> Self {
        Self { line, delay, link }
    }

    /// Link settings in use
    pub fn link(&self) -> &LinkConfig {
        &self.link
    }

    /// Float the signal line
    ///
    /// Called when the session ends so the line is not left driven while
    /// wires are being disconnected.
    pub fn release(&mut self) {
        self.line.release();
    }

    /// Take the transport apart
    pub fn into_parts(self) -> (L, D) {
        (self.line, self.delay)
    }

    async fn wake(&mut self) -> Result<(), <L as SignalPin>::Error> {
        self.line.configure_output()?;
        self.line.set_low();
        self.delay.delay_us(self.link.timing.wake_hold_us).await;
        self.line.set_high();
        Ok(())
    }

    async fn burst(&mut self, frame: &Frame) -> Result<(), LineError<L>> {
        let uart = self.link.uart_config();
        let mut channel = self.line.acquire(&uart).map_err(TransportError::Acquire)?;

        channel
            .write_all(frame.as_bytes())
            .await
            .map_err(TransportError::Write)?;
        channel.flush().await.map_err(TransportError::Write)?;

        self.delay.delay_ms(self.link.timing.settle_ms).await;
        Ok(())
    }
}

impl<L, D> Transmit for WakeSerialTransport<L, D>
where
    L: SignalPin + SerialPort,
    D: DelayNs,
{
    type Error = LineError<L>;

    async fn transmit(&mut self, frame: &Frame) -> Result<(), Self::Error> {
        self.wake().await.map_err(TransportError::Pin)?;

        let result = self.burst(frame).await;
        // The pin stays on the UART function until closed, even on error.
        self.line.close();
        result
    }
}
