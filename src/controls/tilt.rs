//! Tilt control source
//!
//! Maps the device-orientation gamma angle (left/right tilt) directly to the
//! craft's heading, scaled by the player's sensitivity setting. Readings are
//! ignored until the one-time permission grant resolves, and malformed
//! readings are clamped at the boundary rather than propagated. Thrust comes
//! from a separate held button, not from orientation.

use crate::consts::MAX_TILT_ROTATION;
use crate::controls::{ControlButton, ControlCommand};

/// Raw gamma readings are reported in [-90, 90] degrees
const GAMMA_RANGE: f32 = 90.0;

#[derive(Debug, Clone, Default)]
pub struct TiltControls {
    permission_granted: bool,
    /// Latest clamped gamma reading; `None` until one arrives
    gamma: Option<f32>,
    thrust_held: bool,
}

impl TiltControls {
    pub fn new() -> Self {
        Self::default()
    }

    /// The permission prompt resolved with a grant; readings are accepted
    /// from here on.
    pub fn grant_permission(&mut self) {
        self.permission_granted = true;
    }

    pub fn has_permission(&self) -> bool {
        self.permission_granted
    }

    /// Store an orientation reading. Non-finite values are treated as a
    /// level device; anything else is clamped to the sensor's range.
    pub fn reading(&mut self, gamma: f32) {
        if !self.permission_granted {
            return;
        }
        let gamma = if gamma.is_finite() {
            gamma.clamp(-GAMMA_RANGE, GAMMA_RANGE)
        } else {
            0.0
        };
        self.gamma = Some(gamma);
    }

    pub fn press(&mut self, button: ControlButton) {
        if button == ControlButton::Thrust {
            self.thrust_held = true;
        }
    }

    pub fn release(&mut self, button: ControlButton) {
        if button == ControlButton::Thrust {
            self.thrust_held = false;
        }
    }

    /// Poll with the current sensitivity multiplier. Emits no rotation until
    /// a reading has arrived, leaving the committed heading untouched.
    pub fn poll(&mut self, sensitivity: f32) -> ControlCommand {
        let rotation = self
            .gamma
            .map(|g| (g * sensitivity * 2.0).clamp(-MAX_TILT_ROTATION, MAX_TILT_ROTATION));

        ControlCommand {
            rotation,
            thrust: self.thrust_held,
        }
    }
}
