//! Screen output for the code injector
//!
//! ```text
//! Snapshot ──▶ Renderer ──▶ FrameBuffer (DrawTarget) ──▶ Sh1106 ──▶ I2C
//! ```
//!
//! The renderer draws through `embedded-graphics`, so it runs unchanged
//! against the in-memory [`FrameBuffer`] in host tests.

#![no_std]

pub mod framebuffer;
pub mod renderer;
pub mod sh1106;

pub use framebuffer::{FrameBuffer, HEIGHT, PAGES, WIDTH};
pub use renderer::Renderer;
pub use sh1106::Sh1106;
