//! Configuration types
//!
//! Protocol defaults live here; the firmware overrides them from its
//! build-time device file.

pub mod report;
pub mod types;

pub use types::*;
