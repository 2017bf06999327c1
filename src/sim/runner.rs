//! The player-controlled runner
//!
//! Grounded ⇄ Airborne. While grounded the run animation cycles; while
//! airborne the runner follows a single-axis jump arc under constant gravity.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::consts::*;
use crate::{Tuning, percent_of_height};

/// Sprite the renderer should show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AnimationPhase {
    #[default]
    Stationary,
    RunFrame0,
    RunFrame1,
    Lose,
}

impl AnimationPhase {
    /// Next frame of the run cycle
    pub fn next_run_frame(self) -> Self {
        match self {
            AnimationPhase::RunFrame0 => AnimationPhase::RunFrame1,
            _ => AnimationPhase::RunFrame0,
        }
    }
}

/// Single-slot jump request shared with an input source
///
/// Firing it from any thread is safe. The runner consumes it at the start of
/// its next `advance`; extra fires before then collapse into one request.
#[derive(Debug, Clone, Default)]
pub struct JumpTrigger(Arc<AtomicBool>);

impl JumpTrigger {
    pub fn fire(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_pending(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    fn take(&self) -> bool {
        self.0.swap(false, Ordering::AcqRel)
    }

    fn clear(&self) {
        self.0.store(false, Ordering::Release);
    }
}

#[derive(Debug, Clone)]
pub struct Runner {
    /// Height above ground, percent of world height (never negative)
    vertical_offset: f32,
    vertical_velocity: f32,
    airborne: bool,
    phase: AnimationPhase,
    animation_timer: f32,
    lose_appearance: bool,
    trigger: JumpTrigger,
    jump_speed: f32,
    gravity: f32,
    frame_time: f32,
}

impl Runner {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            vertical_offset: 0.0,
            vertical_velocity: 0.0,
            airborne: false,
            phase: AnimationPhase::Stationary,
            animation_timer: 0.0,
            lose_appearance: false,
            trigger: JumpTrigger::default(),
            jump_speed: tuning.jump_speed,
            gravity: tuning.gravity,
            frame_time: tuning.frame_time,
        }
    }

    /// Back on the ground at rest. Drops any jump request left over from the
    /// previous run.
    pub fn reset(&mut self) {
        self.vertical_offset = 0.0;
        self.vertical_velocity = 0.0;
        self.airborne = false;
        self.phase = AnimationPhase::Stationary;
        self.animation_timer = 0.0;
        self.lose_appearance = false;
        self.trigger.clear();
    }

    pub fn advance(&mut self, dt: f32, speed_scale: f32) {
        super::assert_step(dt, speed_scale);
        if self.trigger.take() {
            self.on_jump_requested();
        }
        self.handle_run(dt, speed_scale);
        self.handle_jump(dt);
    }

    fn handle_run(&mut self, dt: f32, speed_scale: f32) {
        if self.airborne {
            self.phase = AnimationPhase::Stationary;
            return;
        }

        self.animation_timer += dt * speed_scale;
        if self.animation_timer >= self.frame_time {
            self.phase = self.phase.next_run_frame();
            // Carry the remainder so frame rate doesn't skew the cycle
            self.animation_timer -= self.frame_time;
        }
    }

    fn handle_jump(&mut self, dt: f32) {
        if !self.airborne {
            return;
        }

        self.vertical_offset += self.vertical_velocity * dt;
        if self.vertical_offset <= 0.0 {
            self.vertical_offset = 0.0;
            self.airborne = false;
        }

        // Applied on the landing frame too
        self.vertical_velocity -= self.gravity * dt;
    }

    /// Launch if grounded; ignored mid-air (no double jump, no buffering)
    pub fn on_jump_requested(&mut self) {
        if self.airborne {
            return;
        }
        self.vertical_velocity = self.jump_speed;
        self.airborne = true;
    }

    /// Handle for input sources that cannot borrow the runner
    pub fn jump_trigger(&self) -> JumpTrigger {
        self.trigger.clone()
    }

    /// Visual-only marker for the renderer; simulation state is untouched
    pub fn set_lose_appearance(&mut self) {
        self.phase = AnimationPhase::Lose;
        self.lose_appearance = true;
    }

    pub fn bounding_box(&self) -> Rect {
        let bottom = WORLD_HEIGHT - percent_of_height(self.vertical_offset);
        Rect::from_bottom_left(DINO_LEFT, bottom, DINO_WIDTH, DINO_HEIGHT)
    }

    pub fn vertical_offset(&self) -> f32 {
        self.vertical_offset
    }

    pub fn vertical_velocity(&self) -> f32 {
        self.vertical_velocity
    }

    pub fn is_airborne(&self) -> bool {
        self.airborne
    }

    pub fn animation_phase(&self) -> AnimationPhase {
        self.phase
    }

    pub fn animation_timer(&self) -> f32 {
        self.animation_timer
    }

    pub fn has_lose_appearance(&self) -> bool {
        self.lose_appearance
    }
}
