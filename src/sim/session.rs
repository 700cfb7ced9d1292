//! Session state machine and the per-frame update
//!
//! Owns the game state and the control dispatcher. The frame driver only
//! calls `advance` with wall-clock deltas; everything else happens through
//! the explicit transitions, so the whole loop is testable with synthetic
//! `dt` values and no real timer.

use glam::Vec2;

use crate::consts::{FUEL_CONSUMPTION_RATE, MAX_FRAME_DT};
use crate::controls::ControlDispatcher;
use crate::sim::landing::{self, LandingOutcome};
use crate::sim::physics;
use crate::sim::state::{ControlScheme, GamePhase, GameState};

#[derive(Debug, Clone)]
pub struct Session {
    state: GameState,
    controls: ControlDispatcher,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        let state = GameState::new();
        let controls = ControlDispatcher::new(state.control_scheme);
        Self { state, controls }
    }

    /// Fresh session with the player's saved preferences applied
    pub fn with_preferences(scheme: ControlScheme, tilt_sensitivity: f32) -> Self {
        let mut session = Self::new();
        session.state.control_scheme = scheme;
        session.controls = ControlDispatcher::new(scheme);
        session.set_tilt_sensitivity(tilt_sensitivity);
        session
    }

    /// Latest committed state, for rendering and HUD reads
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Event-feed access for the platform input listeners
    pub fn controls_mut(&mut self) -> &mut ControlDispatcher {
        &mut self.controls
    }

    /// Start the descent with the given control scheme. No-op unless the
    /// session is on the start screen.
    pub fn begin(&mut self, scheme: ControlScheme) {
        if self.state.phase != GamePhase::Start {
            return;
        }
        self.controls.switch_scheme(scheme, &mut self.state);
        self.state.phase = GamePhase::Playing;
        log::info!("Descent started ({} controls)", scheme.as_str());
    }

    pub fn pause(&mut self) {
        if self.state.phase == GamePhase::Playing {
            self.state.phase = GamePhase::Paused;
            log::info!("Paused");
        }
    }

    pub fn resume(&mut self) {
        if self.state.phase == GamePhase::Paused {
            self.state.phase = GamePhase::Playing;
            log::info!("Resumed");
        }
    }

    /// Return to the start screen with a fresh craft. The control scheme and
    /// tilt sensitivity carry over; any held input is discarded with the old
    /// source.
    pub fn reset(&mut self) {
        let scheme = self.state.control_scheme;
        let sensitivity = self.state.tilt_sensitivity;
        self.state = GameState::new();
        self.state.control_scheme = scheme;
        self.state.tilt_sensitivity = sensitivity;
        self.controls = ControlDispatcher::new(scheme);
        log::info!("Session reset");
    }

    pub fn select_scheme(&mut self, scheme: ControlScheme) {
        self.controls.switch_scheme(scheme, &mut self.state);
    }

    pub fn set_tilt_sensitivity(&mut self, sensitivity: f32) {
        if sensitivity.is_finite() && sensitivity > 0.0 {
            self.state.tilt_sensitivity = sensitivity;
        }
    }

    /// Advance one frame by `dt` seconds.
    ///
    /// Commits the active control command, integrates the craft, and resolves
    /// the landing the first time the surface is reached. Once the phase
    /// leaves `Playing` this is a no-op, which is what makes the landing
    /// resolution exactly-once.
    pub fn advance(&mut self, dt: f32) {
        if self.state.phase != GamePhase::Playing {
            return;
        }
        // Rejects NaN as well as zero and negative deltas
        if !(dt > 0.0) {
            return;
        }
        let dt = dt.min(MAX_FRAME_DT);

        self.controls.apply(&mut self.state);

        // Tank dry and at rest: nothing left to evolve this frame
        if self.state.fuel <= 0.0 && self.state.velocity == Vec2::ZERO {
            return;
        }

        let thrust_active = self.state.thrust && self.state.fuel > 0.0;
        let (altitude, velocity) = physics::step(
            self.state.altitude,
            self.state.velocity,
            self.state.rotation,
            thrust_active,
            dt,
        );

        if altitude == 0.0 {
            if let LandingOutcome::Touchdown { success, score } =
                landing::evaluate(altitude, velocity, self.state.rotation)
            {
                self.state.altitude = altitude;
                self.state.velocity = velocity;
                self.state.score = score;
                self.state.phase = GamePhase::GameOver;
                if success {
                    log::info!("Touchdown! score {score}");
                } else {
                    log::info!(
                        "Crashed at {:.1} m/s vertical, {:.1} m/s horizontal",
                        velocity.y.abs(),
                        velocity.x.abs()
                    );
                }
                return;
            }
        }

        if thrust_active {
            self.state.fuel = (self.state.fuel - FUEL_CONSUMPTION_RATE * dt).max(0.0);
        }
        self.state.altitude = altitude;
        self.state.velocity = velocity;
    }
}
