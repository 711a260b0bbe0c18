//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels/signals.

pub mod controller;
pub mod display;
pub mod input;
pub mod sender;

pub use controller::controller_task;
pub use display::{display_task, Panel};
pub use input::{input_task, Buttons};
pub use sender::{sender_task, ServiceLink, Sequencer};
