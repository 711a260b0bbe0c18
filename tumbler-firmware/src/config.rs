//! Device configuration
//!
//! Constants generated by build.rs from device.toml. Values are validated
//! at build time, so the firmware never sees an out-of-contract timing.

use tumbler_core::config::{InputTiming, LinkConfig, LinkTiming};

include!(concat!(env!("OUT_DIR"), "/device_config.rs"));
