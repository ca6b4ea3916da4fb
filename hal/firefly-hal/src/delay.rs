//! Blocking delay abstraction
//!
//! All suspension in the demo is a timed blocking sleep. Keeping the
//! clock behind a trait lets tests record requested delays instead of
//! actually waiting them out.

/// Blocking delay source
pub trait Delay {
    /// Block for at least `ms` milliseconds
    fn delay_ms(&mut self, ms: u32);

    /// Block for at least `secs` seconds
    fn delay_s(&mut self, secs: u32) {
        self.delay_ms(secs.saturating_mul(1000));
    }
}
