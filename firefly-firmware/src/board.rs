//! Adapters from embassy-rp peripherals to the firefly-hal traits

use embassy_rp::gpio::Output;
use embassy_rp::peripherals::UART0;
use embassy_rp::uart::{self, Blocking, UartTx};
use embassy_time::{block_for, Duration};

use firefly_hal::{Delay, OutputPin, SerialTx};

/// Status LED
pub struct Led {
    pin: Output<'static>,
}

impl Led {
    pub fn new(pin: Output<'static>) -> Self {
        Self { pin }
    }
}

impl OutputPin for Led {
    fn set_high(&mut self) {
        self.pin.set_high();
    }

    fn set_low(&mut self) {
        self.pin.set_low();
    }

    fn is_set_high(&self) -> bool {
        self.pin.is_set_high()
    }

    fn toggle(&mut self) {
        self.pin.toggle();
    }
}

/// Serial console over a blocking UART transmitter
///
/// Construction only succeeds once the UART peripheral is configured,
/// so the transport reports ready from then on.
pub struct Console {
    tx: UartTx<'static, UART0, Blocking>,
}

impl Console {
    pub fn new(tx: UartTx<'static, UART0, Blocking>) -> Self {
        Self { tx }
    }
}

impl SerialTx for Console {
    type Error = uart::Error;

    fn is_ready(&self) -> bool {
        true
    }

    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.tx.blocking_write(data)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.tx.blocking_flush()
    }
}

/// Blocking delays on top of the embassy time driver
pub struct BusyDelay;

impl Delay for BusyDelay {
    fn delay_ms(&mut self, ms: u32) {
        block_for(Duration::from_millis(ms as u64));
    }
}
