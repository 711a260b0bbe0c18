//! Sender task
//!
//! Owns the service line. Runs confirmed sends with the session lock
//! released, so the display keeps showing "Sending..." during the
//! sequence, and floats the line when a session ends.

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_rp::peripherals::{DMA_CH0, PIN_0, UART0};
use embassy_time::Delay;

use tumbler_core::{CommandSequencer, WakeSerialTransport};
use tumbler_hal_rp2040::RpServiceLine;

use crate::channels::{SCREEN_UPDATE, SEND_REQUEST, SESSION, SESSION_END};

/// Wake pulse + UART0 transport on the service line
pub type ServiceLink = WakeSerialTransport<RpServiceLine<UART0, PIN_0, DMA_CH0>, Delay>;

/// Overwrite/unlock sequencer over the service line
pub type Sequencer = CommandSequencer<ServiceLink, Delay>;

#[embassy_executor::task]
pub async fn sender_task(mut sequencer: Sequencer) {
    info!("Sender task started");

    loop {
        match select(SEND_REQUEST.receive(), SESSION_END.wait()).await {
            Either::First(request) => {
                match SESSION.run_send(request, &mut sequencer).await {
                    Ok(()) => info!("Code sent"),
                    Err(e) => error!(
                        "Send aborted at {:?}: {:?}",
                        e.step,
                        defmt::Debug2Format(&e.error)
                    ),
                }
                SCREEN_UPDATE.signal(());
            }
            Either::Second(()) => {
                sequencer.transport_mut().release();
                info!("Service line released");
            }
        }
    }
}
