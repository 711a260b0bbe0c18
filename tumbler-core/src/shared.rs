//! Session shared between the input, display and sender tasks
//!
//! The lock is only held for the duration of a state transition or a
//! snapshot copy. A send runs with the lock released, so the display can
//! observe `Sending` while frames are on the wire.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embedded_hal_async::delay::DelayNs;
use tumbler_protocol::InputEvent;

use crate::sequencer::{CommandSequencer, SequenceError};
use crate::state::{Action, EditorSession, SendOutcome, SendRequest, Snapshot};
use crate::transport::Transmit;

/// Lock-guarded [`EditorSession`]
pub struct SharedSession<M: RawMutex> {
    inner: Mutex<M, RefCell<EditorSession>>,
}

impl<M: RawMutex> SharedSession<M> {
    /// Wrap a fresh session; usable in a `static`
    pub const fn new(max_scroll: u8) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(EditorSession::new(max_scroll))),
        }
    }

    /// Apply an input event atomically
    pub fn handle_input(&self, event: InputEvent) -> Option<Action> {
        self.inner.lock(|cell| cell.borrow_mut().handle(event))
    }

    /// Copy the current state for rendering
    pub fn snapshot(&self) -> Snapshot {
        self.inner.lock(|cell| cell.borrow().snapshot())
    }

    /// Commit the result of a send
    pub fn finish_send(&self, outcome: SendOutcome) -> bool {
        self.inner.lock(|cell| cell.borrow_mut().finish_send(outcome))
    }

    /// Replace the session with a fresh one, keeping the help bound
    pub fn reset(&self) {
        self.inner.lock(|cell| {
            let mut session = cell.borrow_mut();
            let max_scroll = session.max_scroll();
            *session = EditorSession::new(max_scroll);
        })
    }

    /// Run a confirmed send and commit its outcome
    ///
    /// The session must already be `Sending` (it is after `handle_input`
    /// returned [`Action::Send`]). The sequence runs without holding the
    /// lock.
    pub async fn run_send<T, D>(
        &self,
        request: SendRequest,
        sequencer: &mut CommandSequencer<T, D>,
    ) -> Result<(), SequenceError<T::Error>>
    where
        T: Transmit,
        D: DelayNs,
    {
        let result = sequencer.send(request.mode, &request.code).await;
        self.finish_send(SendOutcome::from(&result));
        result
    }
}
