//! Session lifecycle and per-frame orchestration
//!
//! Idle → Running → Ended → (cooldown) → Idle. The host owns the frame clock:
//! while [`Session::wants_frame`] is true it feeds one timestamp per display
//! refresh into [`Session::frame`]. Frames delivered in any other phase are
//! dropped, so nothing mutates the world after a run ends.

use serde::Serialize;

use super::collision::{Rect, any_collision};
use super::runner::{AnimationPhase, JumpTrigger, Runner};
use super::spawner::ObstacleSpawner;
use super::track::ScrollTrack;
use crate::consts::SPEED_SCALE_INCREASE;
use crate::{Tuning, TuningError};

/// Lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum SessionPhase {
    /// Waiting for start input (start prompt visible)
    #[default]
    Idle,
    /// Simulation advancing every frame
    Running,
    /// Collision happened; waiting out the cooldown
    Ended,
}

/// Notifications for the renderer/host, drained once per frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SessionEvent {
    Started,
    ObstacleSpawned,
    Collided,
    /// Swap the runner sprite to its lose pose (once per run)
    LoseAppearance,
    ShowStartPrompt,
}

/// What a call to [`Session::frame`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Not running; the frame was dropped
    Ignored,
    /// First frame of a run: timestamp recorded, nothing advanced
    Baseline,
    /// World advanced, keep scheduling frames
    Continue,
    /// World advanced and the runner hit an obstacle
    Ended,
}

/// Everything the renderer reads for one frame
#[derive(Debug, Clone, Serialize)]
pub struct RenderSnapshot {
    pub phase: SessionPhase,
    pub ground_offsets: [f32; 2],
    pub runner: Rect,
    pub animation: AnimationPhase,
    pub lose_appearance: bool,
    pub obstacles: Vec<Rect>,
    pub score: u64,
    pub start_prompt_visible: bool,
}

/// Owns the clock, difficulty ramp, score, and the three world components
#[derive(Debug, Clone)]
pub struct Session {
    phase: SessionPhase,
    /// Timestamp (ms) of the previous frame; `None` until the baseline frame
    last_frame_ms: Option<f64>,
    elapsed_ms: f32,
    speed_scale: f32,
    score: f32,
    /// Timestamp of the frame that ended the run
    ended_at_ms: Option<f64>,
    start_prompt_visible: bool,
    runs_started: u32,
    track: ScrollTrack,
    runner: Runner,
    spawner: ObstacleSpawner,
    events: Vec<SessionEvent>,
    tuning: Tuning,
}

impl Session {
    /// Create an idle session; `seed` drives obstacle spacing for every run
    ///
    /// Fails if `tuning` holds values the simulation cannot integrate.
    pub fn new(tuning: Tuning, seed: u64) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self {
            phase: SessionPhase::Idle,
            last_frame_ms: None,
            elapsed_ms: 0.0,
            speed_scale: 1.0,
            score: 0.0,
            ended_at_ms: None,
            start_prompt_visible: true,
            runs_started: 0,
            track: ScrollTrack::new(&tuning),
            runner: Runner::new(&tuning),
            spawner: ObstacleSpawner::new(&tuning, seed),
            events: Vec::new(),
            tuning,
        })
    }

    /// Pin the obstacle spawn interval range
    #[cfg(test)]
    pub(crate) fn with_interval_range(mut self, min: u32, max: u32) -> Self {
        self.spawner = self.spawner.with_interval_range(min, max);
        self
    }

    /// Start (or restart) a run. Ignored unless idle; returns whether it took.
    pub fn handle_start_input(&mut self) -> bool {
        if self.phase != SessionPhase::Idle {
            log::trace!("Start input ignored in {:?}", self.phase);
            return false;
        }

        self.last_frame_ms = None;
        self.elapsed_ms = 0.0;
        self.speed_scale = 1.0;
        self.score = 0.0;
        self.ended_at_ms = None;
        self.track.reset();
        self.runner.reset();
        self.spawner.reset();

        self.start_prompt_visible = false;
        self.phase = SessionPhase::Running;
        self.runs_started += 1;
        self.events.push(SessionEvent::Started);
        log::info!("Run {} started", self.runs_started);
        true
    }

    /// Jump input from the host's event loop; ignored unless running
    pub fn handle_jump_input(&mut self) {
        if self.phase == SessionPhase::Running {
            self.runner.on_jump_requested();
        }
    }

    /// Thread-safe jump handle; consumed at the start of the next frame
    pub fn jump_trigger(&self) -> JumpTrigger {
        self.runner.jump_trigger()
    }

    /// True while the session is subscribed to the frame clock
    pub fn wants_frame(&self) -> bool {
        self.phase == SessionPhase::Running
    }

    /// Advance one display frame
    ///
    /// # Panics
    ///
    /// If `timestamp_ms` is not finite or goes backwards. Motion integration
    /// has no meaning for either.
    pub fn frame(&mut self, timestamp_ms: f64) -> FrameOutcome {
        assert!(
            timestamp_ms.is_finite(),
            "frame timestamp must be finite, got {}",
            timestamp_ms
        );

        if self.phase != SessionPhase::Running {
            log::trace!("Dropped frame at {:.1} ms in {:?}", timestamp_ms, self.phase);
            return FrameOutcome::Ignored;
        }

        let Some(last) = self.last_frame_ms else {
            self.last_frame_ms = Some(timestamp_ms);
            return FrameOutcome::Baseline;
        };

        let delta = timestamp_ms - last;
        assert!(
            delta >= 0.0,
            "frame timestamps must not go backwards ({} -> {})",
            last,
            timestamp_ms
        );
        let dt = delta as f32;
        self.elapsed_ms = dt;

        let speed_scale = self.speed_scale;
        self.track.advance(dt, speed_scale);
        self.runner.advance(dt, speed_scale);
        if self.spawner.advance(dt, speed_scale) {
            self.events.push(SessionEvent::ObstacleSpawned);
        }

        self.speed_scale += dt * SPEED_SCALE_INCREASE;
        self.score += dt * self.tuning.score_rate;

        if self.check_lose() {
            self.handle_lose(timestamp_ms);
            return FrameOutcome::Ended;
        }

        self.last_frame_ms = Some(timestamp_ms);
        FrameOutcome::Continue
    }

    fn check_lose(&self) -> bool {
        any_collision(&self.runner.bounding_box(), self.spawner.bounding_boxes())
    }

    fn handle_lose(&mut self, timestamp_ms: f64) {
        self.phase = SessionPhase::Ended;
        self.ended_at_ms = Some(timestamp_ms);
        self.runner.set_lose_appearance();
        self.events.push(SessionEvent::Collided);
        self.events.push(SessionEvent::LoseAppearance);
        log::info!(
            "Run {} ended: score {}, speed x{:.3}",
            self.runs_started,
            self.display_score(),
            self.speed_scale
        );
    }

    /// When the host should call [`Session::poll_cooldown`] next
    pub fn cooldown_deadline(&self) -> Option<f64> {
        match self.phase {
            SessionPhase::Ended => self.ended_at_ms.map(|t| t + self.tuning.lose_cooldown_ms),
            _ => None,
        }
    }

    /// Finish the post-loss cooldown once `now_ms` reaches the deadline:
    /// back to idle with the start prompt showing. Returns true on expiry.
    pub fn poll_cooldown(&mut self, now_ms: f64) -> bool {
        match self.cooldown_deadline() {
            Some(deadline) if now_ms >= deadline => {
                self.phase = SessionPhase::Idle;
                self.start_prompt_visible = true;
                self.events.push(SessionEvent::ShowStartPrompt);
                log::info!("Ready for run {}", self.runs_started + 1);
                true
            }
            _ => false,
        }
    }

    /// Take every event raised since the last call
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    /// Restart the obstacle interval sequence
    pub fn reseed(&mut self, seed: u64) {
        self.spawner.reseed(seed);
    }

    pub fn snapshot(&self) -> RenderSnapshot {
        RenderSnapshot {
            phase: self.phase,
            ground_offsets: self.track.segments().map(|s| s.offset),
            runner: self.runner.bounding_box(),
            animation: self.runner.animation_phase(),
            lose_appearance: self.runner.has_lose_appearance(),
            obstacles: self.spawner.bounding_boxes().collect(),
            score: self.display_score(),
            start_prompt_visible: self.start_prompt_visible,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn speed_scale(&self) -> f32 {
        self.speed_scale
    }

    pub fn score(&self) -> f32 {
        self.score
    }

    /// Score as shown to the player
    pub fn display_score(&self) -> u64 {
        self.score.floor() as u64
    }

    pub fn elapsed_since_last_frame(&self) -> f32 {
        self.elapsed_ms
    }

    pub fn last_frame_ms(&self) -> Option<f64> {
        self.last_frame_ms
    }

    pub fn start_prompt_visible(&self) -> bool {
        self.start_prompt_visible
    }

    pub fn runs_started(&self) -> u32 {
        self.runs_started
    }

    pub fn track(&self) -> &ScrollTrack {
        &self.track
    }

    pub fn runner(&self) -> &Runner {
        &self.runner
    }

    pub fn spawner(&self) -> &ObstacleSpawner {
        &self.spawner
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }
}
