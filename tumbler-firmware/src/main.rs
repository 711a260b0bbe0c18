//! Tumbler - code injector firmware
//!
//! Edits a five-digit code on a small OLED with six buttons and writes it
//! into a lock controller over its service line: a wake pulse followed by
//! a 4800 baud frame, once to overwrite the stored code and once to
//! unlock with it.
//!
//! Board wiring (RP2040):
//!
//! | Signal         | GPIO        |
//! |----------------|-------------|
//! | Data wire      | 0 (UART0 TX)|
//! | I2C0 SDA / SCL | 4 / 5       |
//! | Buttons        | 10-15       |
//!
//! GPIO 0 drives the wake pulse as a plain output, then carries the frame
//! as UART0 TX.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Pull};
use embassy_rp::i2c::{self, I2c};
use embassy_rp::peripherals::I2C0;
use embassy_time::Delay;
use {defmt_rtt as _, panic_probe as _};

use tumbler_core::{CommandSequencer, WakeSerialTransport};
use tumbler_display::Sh1106;
use tumbler_hal_rp2040::RpServiceLine;

mod channels;
mod config;
mod help;
mod tasks;

bind_interrupts!(struct Irqs {
    I2C0_IRQ => i2c::InterruptHandler<I2C0>;
});

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Tumbler firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let link = config::LINK;
    info!(
        "Link: {} baud, wake {} us, settle {} ms, gap {} ms",
        link.baudrate,
        link.timing.wake_hold_us,
        link.timing.settle_ms,
        link.timing.inter_command_ms
    );

    // Service line: wake pulse and UART TX on the same pin
    let line = RpServiceLine::new(p.UART0, p.PIN_0, p.DMA_CH0);
    let transport = WakeSerialTransport::with_config(line, Delay, link);
    let sequencer = CommandSequencer::with_timing(transport, Delay, &link.timing);

    // Buttons are active-low with internal pull-ups
    let buttons = [
        Input::new(p.PIN_10, Pull::Up),
        Input::new(p.PIN_11, Pull::Up),
        Input::new(p.PIN_12, Pull::Up),
        Input::new(p.PIN_13, Pull::Up),
        Input::new(p.PIN_14, Pull::Up),
        Input::new(p.PIN_15, Pull::Up),
    ];

    let i2c_config = {
        let mut cfg = i2c::Config::default();
        cfg.frequency = 400_000;
        cfg
    };
    let bus = I2c::new_async(p.I2C0, p.PIN_5, p.PIN_4, Irqs, i2c_config);
    let panel = Sh1106::with_address(bus, config::DISPLAY_ADDRESS);
    info!("Display bus initialized");

    spawner.spawn(tasks::display_task(panel)).unwrap();
    spawner.spawn(tasks::sender_task(sequencer)).unwrap();
    spawner.spawn(tasks::controller_task()).unwrap();
    spawner
        .spawn(tasks::input_task(buttons, config::INPUT))
        .unwrap();

    info!("All tasks spawned, firmware running");
}
