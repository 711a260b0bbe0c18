//! Safe lock service-port protocol
//!
//! This crate defines the one-way serial protocol spoken to the keypad
//! controller of the supported safes, and the abstract input events the
//! editor consumes.
//!
//! # Protocol Overview
//!
//! Every command is a fixed 8-byte burst sent at 4800 baud, 8N1, after a
//! wake pulse on the signal line:
//! ```text
//! ┌──────────┬────────┬─────────────────────┬──────────┐
//! │ PREAMBLE │ OPCODE │ D0  D1  D2  D3  D4  │ CHECKSUM │
//! │ 0x00     │ 1B     │ 5 × 1B, each 0–9    │ 1B       │
//! └──────────┴────────┴─────────────────────┴──────────┘
//! ```
//!
//! The checksum is the sum of OPCODE and the five digits, modulo 256.
//! The device never answers; there is nothing to parse on the way back.

#![no_std]
#![deny(unsafe_code)]

pub mod events;
pub mod frame;

pub use events::{InputEvent, Key, Phase};
pub use frame::{
    CommandKind, Code, Digit, Frame, FrameError, Mode, CODE_LEN, FRAME_LEN, PREAMBLE,
};
