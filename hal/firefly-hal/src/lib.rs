//! Hardware abstraction traits for the Firefly demo firmware
//!
//! The demo only touches three kinds of hardware: a digital output pin
//! (the status LED), a serial transmitter (the console), and a blocking
//! delay source. Chip-specific code implements these traits; everything
//! above this crate stays board-agnostic and host-testable.

#![no_std]
#![deny(unsafe_code)]

pub mod delay;
pub mod gpio;
pub mod serial;

pub use delay::Delay;
pub use gpio::OutputPin;
pub use serial::SerialTx;
