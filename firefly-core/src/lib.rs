//! Board-agnostic core logic for the Firefly demo firmware
//!
//! This crate contains everything that does not depend on specific
//! hardware:
//!
//! - The boot-and-render sequencer (console greeting, LED heartbeat,
//!   logo and text rendering, degraded fault-blink mode)
//! - State machine for the sequencer lifecycle
//! - The contrast sweep routine
//! - Run control for bounding or cancelling the otherwise infinite loops
//!
//! Devices are consumed through the `firefly-hal` and `firefly-display`
//! traits, so the whole sequencer runs on the host against mock devices.

#![no_std]
#![deny(unsafe_code)]

// Declared first so the log shims are visible to the rest of the crate.
mod fmt;

pub mod contrast;
pub mod run;
pub mod sequencer;
pub mod state;
