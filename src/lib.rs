//! Dino Dash - A side-scrolling obstacle-avoidance runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (motion, spawning, collisions, session lifecycle)
//! - `platform`: Host collaborators (frame clock)
//! - `tuning`: Data-driven game constants

pub mod platform;
pub mod sim;
pub mod tuning;

pub use tuning::{Tuning, TuningError};

/// Built-in game constants (defaults for [`Tuning`])
///
/// Horizontal offsets are world units (percent of world width). The runner's
/// vertical offset is percent of world height. Times are milliseconds.
pub mod consts {
    /// Logical world size
    pub const WORLD_WIDTH: f32 = 100.0;
    pub const WORLD_HEIGHT: f32 = 30.0;

    /// Ground strip: two segments, each three world widths long
    pub const GROUND_WIDTH: f32 = 300.0;
    pub const GROUND_SPEED: f32 = 0.05;

    /// Obstacles enter just off the right edge and die past the left one
    pub const CACTUS_SPEED: f32 = 0.05;
    pub const CACTUS_SPAWN_OFFSET: f32 = 100.0;
    pub const CACTUS_CULL_OFFSET: f32 = -100.0;
    pub const CACTUS_INTERVAL_MIN: u32 = 500;
    pub const CACTUS_INTERVAL_MAX: u32 = 2000;
    pub const CACTUS_WIDTH: f32 = 4.5;
    pub const CACTUS_HEIGHT: f32 = 9.0;

    /// Runner geometry (fixed horizontal position)
    pub const DINO_LEFT: f32 = 1.0;
    pub const DINO_WIDTH: f32 = 8.0;
    pub const DINO_HEIGHT: f32 = 9.0;

    /// Jump arc
    pub const JUMP_SPEED: f32 = 0.45;
    pub const GRAVITY: f32 = 0.0015;

    /// Duration of one run-animation frame
    pub const FRAME_TIME: f32 = 100.0;

    /// Difficulty ramp and scoring (per millisecond)
    pub const SPEED_SCALE_INCREASE: f32 = 0.00001;
    pub const SCORE_RATE: f32 = 0.01;

    /// Delay between a loss and the start prompt reappearing
    pub const LOSE_COOLDOWN_MS: f64 = 100.0;
}

/// Convert a runner vertical offset (percent of world height) to world units
#[inline]
pub fn percent_of_height(offset: f32) -> f32 {
    offset * consts::WORLD_HEIGHT / 100.0
}
