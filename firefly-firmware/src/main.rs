//! Firefly - OLED bring-up demo firmware
//!
//! Demo binary for the Raspberry Pi Pico: greets over UART0, blinks the
//! on-board LED, and drives a 128x64 SSD1306 OLED with a logo, a text
//! overlay, and a contrast sweep. All behavior lives in the
//! board-agnostic sequencer; this binary only wires up the hardware.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::i2c::{self, I2c};
use embassy_rp::uart::{self, Uart};
use embassy_time::Timer;
use {defmt_rtt as _, panic_probe as _};

use firefly_core::run::RunControl;
use firefly_core::sequencer::{Sequencer, SequencerConfig};
use firefly_display::CharFramebuffer;
use firefly_drivers::oled::ssd1306::{Ssd1306, DEFAULT_ADDR};

mod board;
mod logo;

/// Board identifier printed in the console greeting
const BOARD_NAME: &str = "rpi-pico";

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Firefly firmware starting...");

    let p = embassy_rp::init(Default::default());

    // UART0 console on GP0/GP1
    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart::Config::default());
    let (tx, _rx) = uart.split();
    let console = board::Console::new(tx);
    info!("Console initialized");

    // On-board LED, constructed at its active level; the sequencer
    // drives it dark before the first heartbeat.
    let led = board::Led::new(Output::new(p.PIN_25, Level::High));

    // I2C1 on GP2 (SDA) / GP3 (SCL) for the OLED
    let i2c = I2c::new_blocking(p.I2C1, p.PIN_3, p.PIN_2, i2c::Config::default());
    let mut oled = Ssd1306::new(i2c, DEFAULT_ADDR);
    if oled.init().is_err() {
        // Leave the panel not-ready; the sequencer will fault-blink.
        warn!("OLED init failed, panel stays not ready");
    } else {
        info!("OLED initialized");
    }

    let config = SequencerConfig {
        board_name: BOARD_NAME,
        ..Default::default()
    };

    let mut sequencer = Sequencer::new(
        console,
        led,
        Some(oled),
        CharFramebuffer::new(),
        board::BusyDelay,
        &logo::LOGO,
        config,
    );

    let mut ctl = RunControl::forever();
    let halt = sequencer.run(&mut ctl);

    // Only fatal conditions end up here; there is no recovery path.
    error!("sequencer halted: {}", halt);

    loop {
        Timer::after_secs(60).await;
        trace!("halted, idle");
    }
}
