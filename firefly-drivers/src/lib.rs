//! Hardware driver implementations for the Firefly demo
//!
//! Panel drivers implementing the `firefly-display` backend over
//! `embedded-hal` buses.

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod oled;
