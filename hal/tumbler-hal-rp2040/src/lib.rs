//! RP2040 implementations of the Tumbler HAL traits
//!
//! - [`RpServiceLine`]: the UART TX pin, also driven as a GPIO for the
//!   wake pulse. Implements both [`SignalPin`](tumbler_hal::SignalPin)
//!   and [`SerialPort`](tumbler_hal::SerialPort).
//! - [`RpSerialChannel`]: a DMA-backed transmitter built on every
//!   acquire. Closing the line takes the pin back from the UART.

#![no_std]

pub mod line;
pub mod uart;

pub use line::RpServiceLine;
pub use uart::{RpSerialChannel, SerialError};
