//! Display abstraction and shared rendering for the Firefly demo
//!
//! This crate provides:
//! - `DisplayBackend` trait for panel drivers (raw writes, contrast,
//!   capability reporting)
//! - Capability and frame geometry types (`Capabilities`,
//!   `BufferDescriptor`, pixel format and screen info masks)
//! - `CharFramebuffer`, a monochrome text overlay composited into a
//!   page-major shadow buffer and flushed to the panel on finalize
//!
//! # Architecture
//!
//! Panel drivers implement `DisplayBackend` with their bus-specific code.
//! The sequencer renders through these abstractions without caring which
//! panel is attached, and host tests substitute recording fakes.

#![no_std]
#![deny(unsafe_code)]

pub mod backend;
pub mod font;
pub mod framebuffer;
pub mod geometry;

// Re-export key types
pub use backend::{DisplayBackend, DisplayError};
pub use framebuffer::{CharFramebuffer, TextRender, MAX_FRAME_BYTES};
pub use geometry::{
    BufferDescriptor, Capabilities, Orientation, PixelFormat, PixelFormatSet, ScreenInfo,
};
