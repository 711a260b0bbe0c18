//! Main controller task
//!
//! Feeds button events into the editing session and dispatches the
//! actions it returns.

use defmt::*;

use tumbler_core::Action;

use crate::channels::{INPUT_CHANNEL, SCREEN_UPDATE, SEND_REQUEST, SESSION, SESSION_END};

#[embassy_executor::task]
pub async fn controller_task() {
    info!("Controller task started");
    SCREEN_UPDATE.signal(());

    loop {
        let event = INPUT_CHANNEL.receive().await;
        debug!("Input: {:?}", event);

        match SESSION.handle_input(event) {
            Some(Action::Send(request)) => {
                info!("Send requested: {:?} {:?}", request.mode, request.code);
                SEND_REQUEST.send(request).await;
            }
            Some(Action::Exit) => {
                info!("Session ended, starting a new one");
                SESSION_END.signal(());
                SESSION.reset();
            }
            None => {}
        }

        SCREEN_UPDATE.signal(());
    }
}
