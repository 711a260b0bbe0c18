//! Board-agnostic core logic for the code injector
//!
//! This crate contains all application logic that does not depend on
//! a specific chip:
//!
//! - Link and input timing configuration
//! - Button debounce and gesture recognition
//! - Physical transport (wake pulse + serial burst)
//! - Command sequencing (overwrite, settle, unlock)
//! - Editor state machine and its shared, lock-guarded session
//! - Help document layout

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod help;
pub mod input;
pub mod sequencer;
pub mod shared;
pub mod state;
pub mod transport;

pub use sequencer::{CommandSequencer, SequenceError, SequenceStep};
pub use shared::SharedSession;
pub use state::{Action, EditorSession, SendOutcome, SendRequest, SendStatus, Snapshot};
pub use transport::{Transmit, TransportError, WakeSerialTransport};
