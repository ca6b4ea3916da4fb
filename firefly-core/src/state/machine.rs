//! State machine definition
//!
//! The sequencer's whole lifecycle is a function of the current state
//! and an event. Terminal states carry the reason the run ended.

use super::events::Event;

/// Sequencer states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    /// Power-on checks: console, LED, display, overlay
    Boot,
    /// Display detected but not operational; LED signals the fault
    /// forever. Alive but performs no further useful work.
    FaultBlink,
    /// Steady-state render loop
    Running,
    /// Run ended; nothing executes anymore
    Halted(HaltReason),
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HaltReason {
    /// Serial transport not ready; the only silent exit
    SerialNotReady,
    /// No display device attached
    DisplayAbsent,
    /// Embedded logo and queried frame geometry disagree
    LogoSizeMismatch,
    /// Text overlay initialization failed
    FramebufferInit,
    /// Text render or finalize failed in the render loop
    RenderFailed,
    /// Stopped through run control
    Cancelled,
}

impl State {
    /// Check if this state executes nothing anymore
    pub fn is_terminal(&self) -> bool {
        matches!(self, State::Halted(_))
    }

    /// Check if this state keeps the process alive (possibly degraded)
    pub fn is_alive(&self) -> bool {
        matches!(self, State::FaultBlink | State::Running)
    }

    /// Process an event and return the next state
    pub fn transition(self, event: Event) -> Self {
        use Event::*;
        use State::*;

        match (self, event) {
            // Boot outcomes
            (Boot, SerialAbsent) => Halted(HaltReason::SerialNotReady),
            (Boot, DisplayAbsent) => Halted(HaltReason::DisplayAbsent),
            (Boot, DisplayNotReady) => FaultBlink,
            (Boot, LogoMismatch) => Halted(HaltReason::LogoSizeMismatch),
            (Boot, OverlayInitFailed) => Halted(HaltReason::FramebufferInit),
            (Boot, SetupComplete) => Running,

            // Render loop outcomes
            (Running, RenderFailed) => Halted(HaltReason::RenderFailed),

            // Run control can stop either live loop
            (FaultBlink | Running, Cancelled) => Halted(HaltReason::Cancelled),

            // Default: stay in current state
            _ => self,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boot_outcomes() {
        assert_eq!(
            State::Boot.transition(Event::SerialAbsent),
            State::Halted(HaltReason::SerialNotReady)
        );
        assert_eq!(
            State::Boot.transition(Event::DisplayAbsent),
            State::Halted(HaltReason::DisplayAbsent)
        );
        assert_eq!(State::Boot.transition(Event::DisplayNotReady), State::FaultBlink);
        assert_eq!(
            State::Boot.transition(Event::LogoMismatch),
            State::Halted(HaltReason::LogoSizeMismatch)
        );
        assert_eq!(
            State::Boot.transition(Event::OverlayInitFailed),
            State::Halted(HaltReason::FramebufferInit)
        );
        assert_eq!(State::Boot.transition(Event::SetupComplete), State::Running);
    }

    #[test]
    fn render_failure_is_terminal() {
        let state = State::Running.transition(Event::RenderFailed);
        assert_eq!(state, State::Halted(HaltReason::RenderFailed));
        assert!(state.is_terminal());
    }

    #[test]
    fn cancel_stops_both_live_loops() {
        assert_eq!(
            State::FaultBlink.transition(Event::Cancelled),
            State::Halted(HaltReason::Cancelled)
        );
        assert_eq!(
            State::Running.transition(Event::Cancelled),
            State::Halted(HaltReason::Cancelled)
        );
    }

    #[test]
    fn halted_states_are_sticky() {
        let halted = State::Halted(HaltReason::RenderFailed);
        for event in [
            Event::SerialAbsent,
            Event::SetupComplete,
            Event::Cancelled,
            Event::RenderFailed,
        ] {
            assert_eq!(halted.transition(event), halted);
        }
    }

    #[test]
    fn unrelated_events_keep_state() {
        assert_eq!(State::Running.transition(Event::SetupComplete), State::Running);
        assert_eq!(State::FaultBlink.transition(Event::RenderFailed), State::FaultBlink);
    }

    #[test]
    fn liveness_flags() {
        assert!(State::FaultBlink.is_alive());
        assert!(State::Running.is_alive());
        assert!(!State::Boot.is_alive());
        assert!(!State::Halted(HaltReason::Cancelled).is_alive());

        assert!(!State::FaultBlink.is_terminal());
        assert!(State::Halted(HaltReason::SerialNotReady).is_terminal());
    }
}
