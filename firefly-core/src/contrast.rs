//! Contrast sweep
//!
//! A cosmetic effect: drive panel contrast up through every level and
//! back down, pausing briefly between steps so the glow is visible.
//! Contrast never affects correctness, so set failures are dropped
//! without logging or retries.

use firefly_display::DisplayBackend;
use firefly_hal::Delay;

/// Levels visited by one full sweep, in order: 1 up to 254, then 255
/// down to 1. 509 levels total; 255 is the turning point and appears
/// once.
pub fn levels() -> impl Iterator<Item = u8> {
    (1..=254u8).chain((1..=255u8).rev())
}

/// Run one full sweep, sleeping `step_ms` after every level change
///
/// Blocks the caller for the whole sweep (roughly 509 x `step_ms`);
/// there is no cancellation inside a sweep.
pub fn sweep<D, C>(display: &mut D, clock: &mut C, step_ms: u32)
where
    D: DisplayBackend,
    C: Delay,
{
    for level in levels() {
        let _ = display.set_contrast(level);
        clock.delay_ms(step_ms);
    }
}
