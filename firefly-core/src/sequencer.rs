//! Boot-and-render sequencer
//!
//! The whole program lifecycle in one place: check the console, greet,
//! bring up the LED and the display, then render a logo and a greeting
//! forever while sweeping contrast.
//!
//! Error policy, by class:
//! - serial transport not ready: silent return, nothing else touched
//! - display absent, overlay init/render/finalize failure, logo size
//!   mismatch: logged and terminal
//! - display attached but not ready: logged, then the LED blinks at 1 Hz
//!   forever (alive but degraded)
//! - contrast and raw-write failures: logged at most, never terminal
//!
//! Raw-write failures keep the loop running while render/finalize
//! failures stop it; that asymmetry is part of the behavior contract and
//! is covered by tests.

use firefly_display::{BufferDescriptor, DisplayBackend, TextRender};
use firefly_hal::{Delay, OutputPin, SerialTx};

use crate::contrast;
use crate::run::RunControl;
use crate::state::{Event, HaltReason, State};

/// Row stride, in pixels, of every raw frame transfer
pub const DISPLAY_BUFFER_PITCH: u16 = 128;

/// Text rendered into the overlay each iteration
const GREETING: &str = "Hello World!";

/// Compiled-in tunables
///
/// The program exposes no flags, environment variables, or persisted
/// state; the entry point constructs this once and hands it over.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SequencerConfig {
    /// Board identifier for the console greeting
    pub board_name: &'static str,
    /// Sleep between render-loop phases
    pub heartbeat_period_ms: u32,
    /// LED period in the degraded fault-blink state
    pub fault_blink_period_ms: u32,
    /// Pause after each contrast level change
    pub contrast_step_ms: u32,
}

impl Default for SequencerConfig {
    fn default() -> Self {
        Self {
            board_name: "unknown",
            heartbeat_period_ms: 2000,
            fault_blink_period_ms: 1000,
            contrast_step_ms: 5,
        }
    }
}

/// Owns every device the demo touches and drives them through one run
///
/// The display is an `Option`: `None` models a board with no panel
/// attached. All handles live for the whole run; there is no shutdown
/// or release path.
pub struct Sequencer<S, L, D, F, C> {
    serial: S,
    led: L,
    display: Option<D>,
    overlay: F,
    clock: C,
    logo: &'static [u8],
    config: SequencerConfig,
    state: State,
}

impl<S, L, D, F, C> Sequencer<S, L, D, F, C>
where
    S: SerialTx,
    L: OutputPin,
    D: DisplayBackend,
    F: TextRender<D>,
    C: Delay,
{
    pub fn new(
        serial: S,
        led: L,
        display: Option<D>,
        overlay: F,
        clock: C,
        logo: &'static [u8],
        config: SequencerConfig,
    ) -> Self {
        Self {
            serial,
            led,
            display,
            overlay,
            clock,
            logo,
            config,
            state: State::Boot,
        }
    }

    /// Current lifecycle state
    pub fn state(&self) -> State {
        self.state
    }

    /// Run the whole lifecycle; single-shot
    ///
    /// Returns only on a terminal condition or when `ctl` stops one of
    /// the two infinite loops.
    pub fn run(&mut self, ctl: &mut RunControl) -> HaltReason {
        if !self.serial.is_ready() {
            // The one purely silent exit: no log, no device traffic.
            return self.halt(Event::SerialAbsent);
        }

        let _ = self.serial.write_blocking(b"Hello World! ");
        let _ = self.serial.write_blocking(self.config.board_name.as_bytes());
        let _ = self.serial.write_blocking(b"\r\n");
        let _ = self.serial.flush();

        // The pin is constructed at its active level; start dark.
        self.led.set_low();

        let Some(mut display) = self.display.take() else {
            error!("display device is missing");
            return self.halt(Event::DisplayAbsent);
        };

        if !display.is_ready() {
            error!("display device {} is not ready", display.name());
            self.state = self.state.transition(Event::DisplayNotReady);
            loop {
                if !ctl.proceed() {
                    return self.halt(Event::Cancelled);
                }
                self.led.toggle();
                self.clock.delay_ms(self.config.fault_blink_period_ms);
            }
        }

        let caps = display.capabilities();
        info!("x_resolution: {}", caps.x_resolution);
        info!("y_resolution: {}", caps.y_resolution);
        info!("supported pixel formats: {}", caps.supported_formats.bits());
        info!("screen_info: {}", caps.screen_info.bits());
        info!("current_pixel_format: {}", caps.current_format);
        info!("current_orientation: {}", caps.current_orientation);

        let buf_desc = BufferDescriptor::full_frame(&caps, DISPLAY_BUFFER_PITCH);

        let needed = buf_desc.required_bytes(caps.current_format);
        if self.logo.len() != needed {
            error!(
                "logo asset is {} bytes but the frame needs {}",
                self.logo.len(),
                needed
            );
            return self.halt(Event::LogoMismatch);
        }

        let _ = self.overlay.clear(&mut display, true);
        if self.overlay.init(&caps).is_err() {
            error!("framebuffer initialization failed");
            return self.halt(Event::OverlayInitFailed);
        }

        if display.set_contrast(0).is_err() {
            error!("could not set display contrast");
        }

        // Setup done; first toggle marks the transition to steady state.
        self.led.toggle();
        self.state = self.state.transition(Event::SetupComplete);

        loop {
            if !ctl.proceed() {
                return self.halt(Event::Cancelled);
            }

            self.led.toggle();
            self.clock.delay_ms(self.config.heartbeat_period_ms);

            if display.write(0, 0, &buf_desc, self.logo).is_err() {
                error!("could not write to display");
            }
            contrast::sweep(&mut display, &mut self.clock, self.config.contrast_step_ms);

            self.clock.delay_ms(self.config.heartbeat_period_ms);

            if self.overlay.print(GREETING, 0, 0).is_err() {
                error!("failed to print a string on the screen");
                return self.halt(Event::RenderFailed);
            }
            if self.overlay.finalize(&mut display).is_err() {
                error!("framebuffer finalization failed");
                return self.halt(Event::RenderFailed);
            }
            contrast::sweep(&mut display, &mut self.clock, self.config.contrast_step_ms);
        }
    }

    fn halt(&mut self, event: Event) -> HaltReason {
        self.state = self.state.transition(event);
        match self.state {
            State::Halted(reason) => reason,
            // Halt events always land in a terminal state; keep the
            // fallback total anyway.
            _ => HaltReason::Cancelled,
        }
    }
}
