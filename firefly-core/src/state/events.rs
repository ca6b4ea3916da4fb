//! Events driving the sequencer state machine

/// Events observed while booting or rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// Serial transport failed its readiness check
    SerialAbsent,
    /// No display device is attached
    DisplayAbsent,
    /// Display attached but failed its readiness check
    DisplayNotReady,
    /// Embedded logo does not fit the queried frame
    LogoMismatch,
    /// Text overlay could not be initialized
    OverlayInitFailed,
    /// Boot phase finished, steady-state rendering begins
    SetupComplete,
    /// Text render or finalize failed inside the render loop
    RenderFailed,
    /// Run control asked the sequencer to stop
    Cancelled,
}
