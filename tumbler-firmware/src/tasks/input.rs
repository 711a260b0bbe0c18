//! Button polling task
//!
//! Samples the six active-low buttons on a fixed tick and feeds the
//! levels through the debounce and gesture logic.

use defmt::*;
use embassy_rp::gpio::Input;
use embassy_time::{Duration, Instant, Ticker};

use tumbler_core::config::InputTiming;
use tumbler_core::input::Keypad;

use crate::channels::INPUT_CHANNEL;

/// Sample interval in milliseconds
pub const SAMPLE_INTERVAL_MS: u64 = 5;

/// Buttons in `Key::ALL` order: Up, Down, Left, Right, Confirm, Cancel
pub type Buttons = [Input<'static>; 6];

#[embassy_executor::task]
pub async fn input_task(buttons: Buttons, timing: InputTiming) {
    info!("Input task started");

    let mut keypad = Keypad::new(timing);
    let mut ticker = Ticker::every(Duration::from_millis(SAMPLE_INTERVAL_MS));
    let start = Instant::now();

    loop {
        ticker.next().await;

        let now_ms = start.elapsed().as_millis() as u32;
        let levels = buttons.each_ref().map(|button| button.is_low());

        keypad.sample(now_ms, levels, |event| {
            if INPUT_CHANNEL.try_send(event).is_err() {
                warn!("Input queue full, dropped {:?}", event);
            }
        });
    }
}
