//! Touch control source
//!
//! The two rotation buttons command a fixed attitude while pressed and snap
//! straight back to upright on release - no easing, no angular integration.

use crate::consts::MAX_CONTROL_ROTATION;
use crate::controls::{ControlButton, ControlCommand};

#[derive(Debug, Clone, Default)]
pub struct TouchControls {
    rotation: f32,
    thrust_held: bool,
}

impl TouchControls {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, button: ControlButton) {
        match button {
            ControlButton::RotateLeft => self.rotation = -MAX_CONTROL_ROTATION,
            ControlButton::RotateRight => self.rotation = MAX_CONTROL_ROTATION,
            ControlButton::Thrust => self.thrust_held = true,
        }
    }

    pub fn release(&mut self, button: ControlButton) {
        match button {
            ControlButton::RotateLeft | ControlButton::RotateRight => self.rotation = 0.0,
            ControlButton::Thrust => self.thrust_held = false,
        }
    }

    pub fn poll(&mut self) -> ControlCommand {
        ControlCommand {
            rotation: Some(self.rotation),
            thrust: self.thrust_held,
        }
    }
}
