//! Sequencer lifecycle state machine

mod events;
mod machine;

pub use events::Event;
pub use machine::{HaltReason, State};
