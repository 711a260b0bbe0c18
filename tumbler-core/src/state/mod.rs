//! Editor state machine
//!
//! Defines the editing session and how input events change it. The
//! machine is explicit and deterministic: the same session and event
//! always give the same result, and the only side effect is the returned
//! [`Action`].

pub mod actions;
pub mod session;

pub use actions::{Action, SendOutcome, SendRequest};
pub use session::{EditorSession, Field, Selector, SendStatus, Snapshot, INITIAL_CODE};
