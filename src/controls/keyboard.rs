//! Keyboard control source
//!
//! Held arrow keys ramp the heading toward ±90° at a fixed step per poll;
//! with no rotation key held the heading eases back to upright at the same
//! rate, snapping to zero instead of overshooting. Thrust mirrors the thrust
//! key state directly.

use crate::consts::{MAX_CONTROL_ROTATION, ROTATION_SPEED};
use crate::controls::{ControlButton, ControlCommand};

#[derive(Debug, Clone, Default)]
pub struct KeyboardControls {
    left_held: bool,
    right_held: bool,
    thrust_held: bool,
    rotation: f32,
}

impl KeyboardControls {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, button: ControlButton) {
        match button {
            ControlButton::RotateLeft => self.left_held = true,
            ControlButton::RotateRight => self.right_held = true,
            ControlButton::Thrust => self.thrust_held = true,
        }
    }

    pub fn release(&mut self, button: ControlButton) {
        match button {
            ControlButton::RotateLeft => self.left_held = false,
            ControlButton::RotateRight => self.right_held = false,
            ControlButton::Thrust => self.thrust_held = false,
        }
    }

    pub fn poll(&mut self) -> ControlCommand {
        if self.left_held {
            self.rotation = (self.rotation - ROTATION_SPEED).max(-MAX_CONTROL_ROTATION);
        }
        if self.right_held {
            self.rotation = (self.rotation + ROTATION_SPEED).min(MAX_CONTROL_ROTATION);
        }
        if !self.left_held && !self.right_held {
            // Ease back to upright
            if self.rotation.abs() < ROTATION_SPEED {
                self.rotation = 0.0;
            } else if self.rotation > 0.0 {
                self.rotation -= ROTATION_SPEED;
            } else {
                self.rotation += ROTATION_SPEED;
            }
        }

        ControlCommand {
            rotation: Some(self.rotation),
            thrust: self.thrust_held,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_held_key_ramps_rotation() {
        let mut controls = KeyboardControls::new();
        controls.press(ControlButton::RotateRight);

        let cmd = controls.poll();
        assert_eq!(cmd.rotation, Some(ROTATION_SPEED));
        let cmd = controls.poll();
        assert_eq!(cmd.rotation, Some(2.0 * ROTATION_SPEED));
    }

    #[test]
    fn test_rotation_saturates_at_limit() {
        let mut controls = KeyboardControls::new();
        controls.press(ControlButton::RotateLeft);

        let mut last = 0.0;
        for _ in 0..100 {
            last = controls.poll().rotation.unwrap();
        }
        assert_eq!(last, -MAX_CONTROL_ROTATION);
    }

    #[test]
    fn test_eases_back_to_upright_without_overshoot() {
        let mut controls = KeyboardControls::new();
        controls.press(ControlButton::RotateRight);
        for _ in 0..4 {
            controls.poll();
        }
        controls.release(ControlButton::RotateRight);

        let mut previous = controls.poll().rotation.unwrap();
        loop {
            let current = controls.poll().rotation.unwrap();
            assert!(current >= 0.0, "eased past upright");
            if current == 0.0 {
                break;
            }
            assert!(current < previous);
            previous = current;
        }
        // Stays at rest once centered
        assert_eq!(controls.poll().rotation, Some(0.0));
    }

    #[test]
    fn test_opposing_keys_cancel() {
        let mut controls = KeyboardControls::new();
        controls.press(ControlButton::RotateLeft);
        controls.press(ControlButton::RotateRight);

        let cmd = controls.poll();
        assert_eq!(cmd.rotation, Some(0.0));
    }

    #[test]
    fn test_thrust_follows_key_state() {
        let mut controls = KeyboardControls::new();
        assert!(!controls.poll().thrust);

        controls.press(ControlButton::Thrust);
        assert!(controls.poll().thrust);

        controls.release(ControlButton::Thrust);
        assert!(!controls.poll().thrust);
    }
}
