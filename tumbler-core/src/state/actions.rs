//! Side effects requested by the state machine

use tumbler_protocol::{Code, Mode};

/// A send captured at the moment it was confirmed
///
/// Carries copies of the mode and code, so later edits cannot change a
/// send that is already in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SendRequest {
    pub mode: Mode,
    pub code: Code,
}

/// Work the caller must perform after a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Action {
    /// Run the overwrite/unlock sequence
    Send(SendRequest),
    /// The user left the editor; end the session
    Exit,
}

/// How a send finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SendOutcome {
    /// Both frames were put on the wire
    Delivered,
    /// A transmission failed and the sequence was aborted
    Failed,
}

impl<E> From<&Result<(), E>> for SendOutcome {
    fn from(result: &Result<(), E>) -> Self {
        match result {
            Ok(()) => SendOutcome::Delivered,
            Err(_) => SendOutcome::Failed,
        }
    }
}
