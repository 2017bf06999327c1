//! Demo-mode player
//!
//! Jumps when the nearest obstacle ahead is about to reach the runner. Good
//! enough for unattended demo runs, not for closely packed obstacles.

use super::session::{Session, SessionPhase};
use crate::consts::*;

/// How far ahead (in ms of obstacle travel) to start the jump
pub const LOOKAHEAD_MS: f32 = 150.0;

/// Gap between the runner's front edge and the closest obstacle still ahead
pub fn nearest_gap(session: &Session) -> Option<f32> {
    let front = DINO_LEFT + DINO_WIDTH;
    session
        .spawner()
        .bounding_boxes()
        .filter(|rect| rect.right() > DINO_LEFT)
        .map(|rect| rect.left() - front)
        .min_by(|a, b| a.total_cmp(b))
}

/// Should the demo player press jump before the next frame?
pub fn should_jump(session: &Session) -> bool {
    if session.phase() != SessionPhase::Running || session.runner().is_airborne() {
        return false;
    }

    let lookahead = LOOKAHEAD_MS * session.tuning().cactus_speed * session.speed_scale();
    nearest_gap(session).is_some_and(|gap| gap <= lookahead)
}
