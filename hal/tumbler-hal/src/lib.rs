//! Tumbler Hardware Abstraction Layer
//!
//! This crate defines the two hardware-facing seams the code injector
//! needs. Chip-specific crates implement them, and the host test suites
//! implement them with recording mocks.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  tumbler-core (transport, sequencer)    │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  tumbler-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ tumbler-hal-  │       │  test mocks   │
//! │    rp2040     │       │   (host)      │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::SignalPin`] - The wake line, reconfigurable between output and high-Z
//! - [`uart::SerialPort`] - A serial peripheral acquired per transmission
//!
//! The wake pulse and the serial burst travel on the same wire, so one
//! type implements both traits and switches its pin between GPIO and
//! UART function.

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod uart;

pub use gpio::{Level, SignalPin};
pub use uart::{DataBits, Parity, SerialPort, StopBits, UartConfig};
