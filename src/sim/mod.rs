//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering and
//! platform code:
//! - Time comes in as host-supplied millisecond timestamps
//! - Seeded RNG only
//! - Obstacles kept in spawn order

pub mod autopilot;
pub mod collision;
pub mod runner;
pub mod session;
pub mod spawner;
pub mod track;

pub use collision::{Rect, any_collision};
pub use runner::{AnimationPhase, JumpTrigger, Runner};
pub use session::{FrameOutcome, RenderSnapshot, Session, SessionEvent, SessionPhase};
pub use spawner::{Obstacle, ObstacleSpawner};
pub use track::{GroundSegment, ScrollTrack};

/// Panic on a frame step the motion integration has no meaning for
#[inline]
#[track_caller]
pub(crate) fn assert_step(dt: f32, speed_scale: f32) {
    assert!(
        dt.is_finite() && dt >= 0.0,
        "delta time must be finite and non-negative, got {}",
        dt
    );
    assert!(
        speed_scale.is_finite() && speed_scale > 0.0,
        "speed scale must be finite and positive, got {}",
        speed_scale
    );
}
