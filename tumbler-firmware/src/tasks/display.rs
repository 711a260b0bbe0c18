//! Display task
//!
//! Redraws the panel from a session snapshot whenever the screen is
//! flagged dirty.

use defmt::*;
use embassy_rp::i2c::{Async, I2c};
use embassy_rp::peripherals::I2C0;

use tumbler_display::{FrameBuffer, Renderer, Sh1106};

use crate::channels::{SCREEN_UPDATE, SESSION};
use crate::help::HELP;

/// SH1106 on I2C0
pub type Panel = Sh1106<I2c<'static, I2C0, Async>>;

#[embassy_executor::task]
pub async fn display_task(mut panel: Panel) {
    info!("Display task started");

    if let Err(e) = panel.init().await {
        error!("Display init failed: {:?}", e);
    }

    let renderer = Renderer::new(HELP);
    let mut frame = FrameBuffer::new();

    loop {
        let snapshot = SESSION.snapshot();
        let Ok(()) = renderer.render(&snapshot, &mut frame);
        trace!("Rendered {:?}", snapshot);

        if let Err(e) = panel.flush(&frame).await {
            warn!("Display flush failed: {:?}", e);
        }

        SCREEN_UPDATE.wait().await;
    }
}
