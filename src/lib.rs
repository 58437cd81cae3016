//! Dial Snake - a free-steering snake game driven by a rotary encoder
//!
//! Core modules:
//! - `sim`: Deterministic simulation (heading, kinematics, trail, collisions, game state)
//! - `input`: Rotary device line protocol and non-blocking polling
//! - `render`: Read-only per-tick snapshot handed to a renderer
//! - `runner`: Fixed-rate tick driver
//! - `settings`: Configuration constants

pub mod input;
pub mod render;
pub mod runner;
pub mod settings;
pub mod sim;

pub use settings::{ScorePolicy, Settings, SettingsError};

/// Game configuration defaults
pub mod consts {
    /// Arena dimensions
    pub const ARENA_WIDTH: f32 = 1080.0;
    pub const ARENA_HEIGHT: f32 = 720.0;

    /// Tick rate of the game loop
    pub const TICK_RATE: u32 = 60;

    /// Diameter of a body segment (collision circles use half of it)
    pub const SEGMENT_SIZE: f32 = 30.0;

    /// Maximum head rotation per tick (degrees)
    pub const MAX_TURN_RATE: f32 = 5.0;
    /// Forward speed (units per tick)
    pub const SNAKE_SPEED: f32 = 3.0;
    /// Ticks between visible body segments, also the growth per apple
    pub const SPACING: usize = 10;

    /// Encoder steps for one full turn of the dial
    pub const ENCODER_STEPS_PER_TURN: f32 = 30.0;
    /// Snake rotations per dial rotation
    pub const SENSITIVITY: f32 = 0.8;

    /// Radius shrink applied to the head for obstacle and self hits
    pub const COLLISION_CLEARANCE: f32 = 5.0;

    /// Apples snap to this grid
    pub const TARGET_GRID: f32 = 10.0;
}

/// Normalize an angle in degrees to [0, 360)
#[inline]
pub fn normalize_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Signed shortest rotation from `from` to `to`, in [-180, 180]
#[inline]
pub fn shortest_delta_degrees(from: f32, to: f32) -> f32 {
    let delta = normalize_degrees(to - from);
    if delta > 180.0 { delta - 360.0 } else { delta }
}
