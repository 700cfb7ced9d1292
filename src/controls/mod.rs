//! Control sources and the dispatcher
//!
//! Each input modality is an isolated pending-input record: event listeners
//! write into it through the dispatcher, and once per frame the active source
//! is polled and its command committed into `GameState`. Sources never touch
//! game state themselves, so an input event can't tear a physics step.

pub mod keyboard;
pub mod tilt;
pub mod touch;

pub use keyboard::KeyboardControls;
pub use tilt::TiltControls;
pub use touch::TouchControls;

use crate::sim::state::{ControlScheme, GameState};

/// A discrete control identifier shared by the keyboard mapping and the
/// on-screen buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlButton {
    RotateLeft,
    RotateRight,
    Thrust,
}

/// One polled command from the active source.
///
/// `rotation: None` leaves the committed rotation unchanged (the tilt source
/// emits nothing until permission is granted and a reading arrives).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlCommand {
    pub rotation: Option<f32>,
    pub thrust: bool,
}

/// The active input modality
#[derive(Debug, Clone)]
pub enum ControlSource {
    Keyboard(KeyboardControls),
    Touch(TouchControls),
    Tilt(TiltControls),
}

impl ControlSource {
    pub fn for_scheme(scheme: ControlScheme) -> Self {
        match scheme {
            ControlScheme::Keyboard => ControlSource::Keyboard(KeyboardControls::new()),
            ControlScheme::Touch => ControlSource::Touch(TouchControls::new()),
            ControlScheme::Tilt => ControlSource::Tilt(TiltControls::new()),
        }
    }

    pub fn scheme(&self) -> ControlScheme {
        match self {
            ControlSource::Keyboard(_) => ControlScheme::Keyboard,
            ControlSource::Touch(_) => ControlScheme::Touch,
            ControlSource::Tilt(_) => ControlScheme::Tilt,
        }
    }
}

/// Routes raw input events to the active source and commits its polled
/// command into the game state once per frame.
///
/// Events aimed at an inactive modality are dropped, so a stale listener can
/// never drive the craft after a scheme switch.
#[derive(Debug, Clone)]
pub struct ControlDispatcher {
    source: ControlSource,
}

impl ControlDispatcher {
    pub fn new(scheme: ControlScheme) -> Self {
        Self {
            source: ControlSource::for_scheme(scheme),
        }
    }

    pub fn scheme(&self) -> ControlScheme {
        self.source.scheme()
    }

    /// Replace the active source with a fresh record for `scheme`.
    ///
    /// Thrust is cleared so the old source can't leave the engine stuck on;
    /// it comes back only if the new source asserts it. Rotation is left
    /// as-is until the new source commands otherwise.
    pub fn switch_scheme(&mut self, scheme: ControlScheme, state: &mut GameState) {
        if scheme == self.source.scheme() {
            return;
        }
        log::info!("Control scheme switched to {}", scheme.as_str());
        self.source = ControlSource::for_scheme(scheme);
        state.control_scheme = scheme;
        state.thrust = false;
    }

    /// Key or on-screen button went down
    pub fn press(&mut self, button: ControlButton) {
        match &mut self.source {
            ControlSource::Keyboard(k) => k.press(button),
            ControlSource::Touch(t) => t.press(button),
            ControlSource::Tilt(t) => t.press(button),
        }
    }

    /// Key or on-screen button was released
    pub fn release(&mut self, button: ControlButton) {
        match &mut self.source {
            ControlSource::Keyboard(k) => k.release(button),
            ControlSource::Touch(t) => t.release(button),
            ControlSource::Tilt(t) => t.release(button),
        }
    }

    /// A device-orientation reading arrived (gamma, degrees)
    pub fn orientation_reading(&mut self, gamma: f32) {
        if let ControlSource::Tilt(t) = &mut self.source {
            t.reading(gamma);
        }
    }

    /// The orientation permission prompt resolved with a grant
    pub fn grant_tilt_permission(&mut self) {
        if let ControlSource::Tilt(t) = &mut self.source {
            t.grant_permission();
        }
    }

    /// Poll the active source and commit rotation/thrust. Called by the
    /// session inside the frame tick, never from an event listener.
    pub fn apply(&mut self, state: &mut GameState) {
        let command = match &mut self.source {
            ControlSource::Keyboard(k) => k.poll(),
            ControlSource::Touch(t) => t.poll(),
            ControlSource::Tilt(t) => t.poll(state.tilt_sensitivity),
        };

        if let Some(rotation) = command.rotation {
            state.rotation = rotation;
        }
        state.thrust = command.thrust && state.fuel > 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_switch_clears_thrust_but_not_rotation() {
        let mut state = GameState::new();
        let mut dispatcher = ControlDispatcher::new(ControlScheme::Keyboard);

        dispatcher.press(ControlButton::Thrust);
        dispatcher.press(ControlButton::RotateRight);
        dispatcher.apply(&mut state);
        assert!(state.thrust);
        assert!(state.rotation > 0.0);
        let rotation = state.rotation;

        dispatcher.switch_scheme(ControlScheme::Touch, &mut state);
        assert_eq!(state.control_scheme, ControlScheme::Touch);
        assert!(!state.thrust);
        assert_eq!(state.rotation, rotation);
    }

    #[test]
    fn test_switch_to_same_scheme_keeps_pending_input() {
        let mut state = GameState::new();
        let mut dispatcher = ControlDispatcher::new(ControlScheme::Touch);

        dispatcher.press(ControlButton::Thrust);
        dispatcher.switch_scheme(ControlScheme::Touch, &mut state);
        dispatcher.apply(&mut state);
        assert!(state.thrust);
    }

    #[test]
    fn test_events_for_inactive_modality_are_dropped() {
        let mut state = GameState::new();
        let mut dispatcher = ControlDispatcher::new(ControlScheme::Keyboard);

        // Orientation readings mean nothing to the keyboard source
        dispatcher.orientation_reading(45.0);
        dispatcher.apply(&mut state);
        assert_eq!(state.rotation, 0.0);
    }

    #[test]
    fn test_thrust_requires_fuel() {
        let mut state = GameState::new();
        state.fuel = 0.0;
        let mut dispatcher = ControlDispatcher::new(ControlScheme::Touch);

        dispatcher.press(ControlButton::Thrust);
        dispatcher.apply(&mut state);
        assert!(!state.thrust);
    }
}
