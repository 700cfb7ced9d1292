//! Moonlander - a lunar descent arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, landing, session state machine)
//! - `controls`: Tilt/touch/keyboard control sources and the dispatcher
//! - `settings`: Player preferences persisted to LocalStorage
//!
//! The simulation is pure and frame-rate independent: the browser glue in
//! `main.rs` only feeds input events and wall-clock deltas into a `Session`.

pub mod controls;
pub mod settings;
pub mod sim;

pub use settings::Settings;
pub use sim::{GamePhase, GameState, Session};

/// Game configuration constants
pub mod consts {
    /// Lunar gravity, m/s² (negative = downward)
    pub const GRAVITY: f32 = -1.62;
    /// Engine acceleration along the craft's axis, m/s²
    pub const THRUST_FORCE: f32 = 3.0;
    /// Keyboard rotation step, degrees per control poll
    pub const ROTATION_SPEED: f32 = 3.0;
    /// Fuel burned while thrusting, percent per second
    pub const FUEL_CONSUMPTION_RATE: f32 = 0.5;
    /// Hard clamp on each velocity axis, m/s
    pub const TERMINAL_VELOCITY: f32 = 20.0;
    /// Maximum touchdown speed per axis for a safe landing, m/s
    pub const SAFE_LANDING_VELOCITY: f32 = 2.0;
    /// Maximum touchdown attitude for a safe landing, degrees
    pub const SAFE_LANDING_ROTATION: f32 = 15.0;
    /// Score for a perfect touchdown
    pub const MAX_SCORE: u32 = 1000;

    /// Session starting altitude, meters
    pub const START_ALTITUDE: f32 = 100.0;
    /// Session starting fuel, percent
    pub const START_FUEL: f32 = 100.0;

    /// Rotation commanded by the keyboard/touch schemes saturates here, degrees
    pub const MAX_CONTROL_ROTATION: f32 = 90.0;
    /// Rotation reachable through tilt after sensitivity scaling, degrees
    pub const MAX_TILT_ROTATION: f32 = 180.0;

    /// Cap on a single frame delta so a suspended tab can't tunnel the
    /// craft through the surface in one giant step
    pub const MAX_FRAME_DT: f32 = 0.1;
}
