//! Game state and core types
//!
//! A single mutable record per session, mutated only by `Session` and the
//! control dispatcher.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{START_ALTITUDE, START_FUEL};

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Waiting on the start screen
    Start,
    /// Active descent
    Playing,
    /// Frozen mid-descent
    Paused,
    /// Touched down (or crashed); the score is final
    GameOver,
}

/// Which input modality drives rotation and thrust
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ControlScheme {
    Tilt,
    Touch,
    #[default]
    Keyboard,
}

impl ControlScheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            ControlScheme::Tilt => "tilt",
            ControlScheme::Touch => "touch",
            ControlScheme::Keyboard => "keyboard",
        }
    }
}

/// Complete state of one descent
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub phase: GamePhase,
    /// Final touchdown score, 0 until the craft lands
    pub score: u32,
    /// Remaining fuel, percent
    pub fuel: f32,
    /// Height above the surface, meters
    pub altitude: f32,
    /// (horizontal, vertical) velocity, m/s
    pub velocity: Vec2,
    /// Heading, degrees from vertical
    pub rotation: f32,
    /// Engine firing this frame
    pub thrust: bool,
    pub control_scheme: ControlScheme,
    /// Multiplier applied to raw tilt readings
    pub tilt_sensitivity: f32,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    pub fn new() -> Self {
        Self {
            phase: GamePhase::Start,
            score: 0,
            fuel: START_FUEL,
            altitude: START_ALTITUDE,
            velocity: Vec2::ZERO,
            rotation: 0.0,
            thrust: false,
            control_scheme: ControlScheme::default(),
            tilt_sensitivity: 1.0,
        }
    }
}
