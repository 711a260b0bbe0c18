//! Inter-task communication channels
//!
//! Defines the static channels and the shared editing session used by
//! the Embassy tasks.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;

use tumbler_core::{SendRequest, SharedSession};
use tumbler_protocol::InputEvent;

use crate::help;

/// Channel capacity for button events
const INPUT_CHANNEL_SIZE: usize = 8;

/// Button events from the input task
pub static INPUT_CHANNEL: Channel<CriticalSectionRawMutex, InputEvent, INPUT_CHANNEL_SIZE> =
    Channel::new();

/// Confirmed sends for the sender task
///
/// A second send cannot be confirmed while one is in flight, so one slot
/// is enough.
pub static SEND_REQUEST: Channel<CriticalSectionRawMutex, SendRequest, 1> = Channel::new();

/// The user ended the session; the sender releases the service line
pub static SESSION_END: Signal<CriticalSectionRawMutex, ()> = Signal::new();

/// Signal that the screen should be redrawn
pub static SCREEN_UPDATE: Signal<CriticalSectionRawMutex, ()> = Signal::new();

/// The editing session, shared by the controller, sender and display
pub static SESSION: SharedSession<CriticalSectionRawMutex> = SharedSession::new(help::MAX_SCROLL);
