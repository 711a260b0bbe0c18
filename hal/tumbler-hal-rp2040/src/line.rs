//! Service line: one pin carrying both the wake pulse and the serial burst
//!
//! The pin is in GPIO (SIO) mode except while a channel is open. For the
//! wake pulse it is a push-pull output. [`SerialPort::acquire`] hands it
//! to the UART function, and [`SerialPort::close`] takes it back as a
//! floating input. The UART block keeps its configuration after close,
//! but with the pad detached it drives nothing.

use core::convert::Infallible;
use core::mem::ManuallyDrop;

use embassy_rp::dma::Channel as DmaChannel;
use embassy_rp::gpio::{Flex, Level as RpLevel, Pull};
use embassy_rp::uart::{Instance, TxPin, UartTx};
use embassy_rp::Peri;
use tumbler_hal::{Level, SerialPort, SignalPin, UartConfig};

use crate::uart::{rp_config, RpSerialChannel, SerialError};

/// UART TX pin that doubles as the wake line
pub struct RpServiceLine<T, P, C>
where
    T: Instance + 'static,
    P: TxPin<T> + 'static,
    C: DmaChannel,
{
    uart: Peri<'static, T>,
    pin: Peri<'static, P>,
    dma: Peri<'static, C>,
}

impl<T, P, C> RpServiceLine<T, P, C>
where
    T: Instance + 'static,
    P: TxPin<T> + 'static,
    C: DmaChannel,
{
    /// Take the peripherals and leave the pin floating
    pub fn new(uart: Peri<'static, T>, pin: Peri<'static, P>, dma: Peri<'static, C>) -> Self {
        let mut line = Self { uart, pin, dma };
        line.float();
        line
    }

    /// SIO view of the pin
    ///
    /// Dropping a `Flex` disconnects the pad, so the view is never dropped
    /// and the pad keeps whatever was written through it.
    fn gpio(&mut self) -> ManuallyDrop<Flex<'_>> {
        ManuallyDrop::new(Flex::new(self.pin.reborrow()))
    }

    fn float(&mut self) {
        let mut gpio = self.gpio();
        gpio.set_as_input();
        gpio.set_pull(Pull::None);
    }
}

impl<T, P, C> SignalPin for RpServiceLine<T, P, C>
where
    T: Instance + 'static,
    P: TxPin<T> + 'static,
    C: DmaChannel,
{
    type Error = Infallible;

    fn configure_output(&mut self) -> Result<(), Self::Error> {
        let mut gpio = self.gpio();
        gpio.set_high();
        gpio.set_as_output();
        Ok(())
    }

    fn set_level(&mut self, level: Level) {
        let level = match level {
            Level::Low => RpLevel::Low,
            Level::High => RpLevel::High,
        };
        self.gpio().set_level(level);
    }

    fn release(&mut self) {
        self.float();
    }
}

impl<T, P, C> SerialPort for RpServiceLine<T, P, C>
where
    T: Instance + 'static,
    P: TxPin<T> + 'static,
    C: DmaChannel,
{
    type Error = SerialError;
    type Channel<'a>
        = RpSerialChannel<'a>
    where
        Self: 'a;

    fn acquire(&mut self, config: &UartConfig) -> Result<Self::Channel<'_>, Self::Error> {
        let tx = UartTx::new(
            self.uart.reborrow(),
            self.pin.reborrow(),
            self.dma.reborrow(),
            rp_config(config),
        );
        Ok(RpSerialChannel::new(tx))
    }

    fn close(&mut self) {
        self.float();
    }
}
