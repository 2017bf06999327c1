//! Obstacle spawning and scrolling
//!
//! Obstacles travel right to left at the scaled world speed. A countdown timer
//! spawns a new one whenever it runs out, then re-arms with a random interval
//! that shrinks as the game speeds up.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::Tuning;
use crate::consts::*;

/// A single cactus
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Left edge in world units; starts just off the right edge
    pub offset: f32,
}

impl Obstacle {
    pub fn bounding_box(&self) -> Rect {
        Rect::from_bottom_left(self.offset, WORLD_HEIGHT, CACTUS_WIDTH, CACTUS_HEIGHT)
    }
}

/// Owns every live obstacle (oldest first) and the spawn countdown
///
/// Generic over the RNG so tests can substitute their own source.
#[derive(Debug, Clone)]
pub struct ObstacleSpawner<R = Pcg32> {
    obstacles: Vec<Obstacle>,
    /// Milliseconds until the next spawn
    next_spawn_ms: f32,
    speed: f32,
    interval_min: u32,
    interval_max: u32,
    rng: R,
}

impl ObstacleSpawner<Pcg32> {
    pub fn new(tuning: &Tuning, seed: u64) -> Self {
        Self::with_rng(tuning, Pcg32::seed_from_u64(seed))
    }

    /// Restart the interval sequence from a new seed
    pub fn reseed(&mut self, seed: u64) {
        self.rng = Pcg32::seed_from_u64(seed);
    }
}

impl<R: Rng> ObstacleSpawner<R> {
    pub fn with_rng(tuning: &Tuning, rng: R) -> Self {
        let mut spawner = Self {
            obstacles: Vec::new(),
            next_spawn_ms: 0.0,
            speed: tuning.cactus_speed,
            interval_min: CACTUS_INTERVAL_MIN,
            interval_max: CACTUS_INTERVAL_MAX,
            rng,
        };
        spawner.reset();
        spawner
    }

    /// Pin the spawn interval range (fixed spacing keeps scenarios predictable)
    #[cfg(test)]
    pub(crate) fn with_interval_range(mut self, min: u32, max: u32) -> Self {
        assert!(min > 0 && min <= max, "bad interval range {}..={}", min, max);
        self.interval_min = min;
        self.interval_max = max;
        self.reset();
        self
    }

    /// Drop every obstacle; the first spawn waits the minimum interval
    pub fn reset(&mut self) {
        self.obstacles.clear();
        self.next_spawn_ms = self.interval_min as f32;
    }

    /// Move, cull, and spawn. Returns true if an obstacle spawned this frame.
    pub fn advance(&mut self, dt: f32, speed_scale: f32) -> bool {
        super::assert_step(dt, speed_scale);
        let step = dt * speed_scale * self.speed;
        for obstacle in &mut self.obstacles {
            obstacle.offset -= step;
        }
        self.obstacles.retain(|o| o.offset > CACTUS_CULL_OFFSET);

        self.next_spawn_ms -= dt;
        if self.next_spawn_ms > 0.0 {
            return false;
        }

        self.spawn_at(CACTUS_SPAWN_OFFSET);
        let interval = self.rng.random_range(self.interval_min..=self.interval_max);
        self.next_spawn_ms = interval as f32 / speed_scale;
        log::debug!(
            "Spawned obstacle ({} live), next in {:.0} ms",
            self.obstacles.len(),
            self.next_spawn_ms
        );
        true
    }

    /// Insert an obstacle at an arbitrary offset
    pub fn spawn_at(&mut self, offset: f32) {
        self.obstacles.push(Obstacle { offset });
    }

    pub fn bounding_boxes(&self) -> impl Iterator<Item = Rect> + '_ {
        self.obstacles.iter().map(Obstacle::bounding_box)
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn next_spawn_ms(&self) -> f32 {
        self.next_spawn_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand_pcg::Pcg64Mcg;

    #[test]
    fn test_reset_clears_and_warms_up() {
        let mut spawner = ObstacleSpawner::new(&Tuning::default(), 1);
        spawner.spawn_at(50.0);
        spawner.spawn_at(20.0);
        spawner.reset();
        assert!(spawner.obstacles().is_empty());
        assert_eq!(spawner.next_spawn_ms(), CACTUS_INTERVAL_MIN as f32);
    }

    #[test]
    fn test_first_spawn_after_minimum_interval() {
        let mut spawner = ObstacleSpawner::new(&Tuning::default(), 7);
        assert!(!spawner.advance(499.0, 1.0));
        assert!(spawner.obstacles().is_empty());

        assert!(spawner.advance(1.0, 1.0));
        assert_eq!(spawner.obstacles(), &[Obstacle { offset: 100.0 }]);

        let next = spawner.next_spawn_ms();
        assert!((500.0..=2000.0).contains(&next), "interval {} out of range", next);
        assert_eq!(next.fract(), 0.0);
    }

    #[test]
    fn test_interval_divided_by_speed_scale() {
        let mut spawner = ObstacleSpawner::with_rng(&Tuning::default(), Pcg64Mcg::seed_from_u64(3))
            .with_interval_range(800, 800);
        assert!(spawner.advance(800.0, 2.0));
        assert_eq!(spawner.next_spawn_ms(), 400.0);
    }

    #[test]
    fn test_offscreen_obstacles_are_culled() {
        let mut spawner = ObstacleSpawner::new(&Tuning::default(), 1);
        spawner.spawn_at(-99.0);
        spawner.spawn_at(10.0);
        // Moves both 2 units left: -101 is past the threshold
        spawner.advance(40.0, 1.0);
        assert_eq!(spawner.obstacles().len(), 1);
        assert!((spawner.obstacles()[0].offset - 8.0).abs() < 1e-4);
    }

    #[test]
    fn test_cull_threshold_is_inclusive() {
        let mut spawner = ObstacleSpawner::new(&Tuning::default(), 1);
        spawner.spawn_at(-99.0);
        spawner.advance(20.0, 1.0);
        assert!(spawner.obstacles().is_empty());
    }

    #[test]
    fn test_bounding_box_sits_on_ground() {
        let rect = Obstacle { offset: 42.0 }.bounding_box();
        assert_eq!(rect.left(), 42.0);
        assert_eq!(rect.right(), 42.0 + CACTUS_WIDTH);
        assert_eq!(rect.bottom(), WORLD_HEIGHT);
        assert_eq!(rect.top(), WORLD_HEIGHT - CACTUS_HEIGHT);
    }

    #[test]
    fn test_same_seed_same_spawns() {
        let mut a = ObstacleSpawner::new(&Tuning::default(), 99);
        let mut b = ObstacleSpawner::new(&Tuning::default(), 99);
        for _ in 0..2000 {
            assert_eq!(a.advance(16.0, 1.2), b.advance(16.0, 1.2));
        }
        assert_eq!(a.obstacles(), b.obstacles());

        b.reseed(99);
        a.reseed(99);
        a.reset();
        b.reset();
        a.advance(500.0, 1.0);
        b.advance(500.0, 1.0);
        assert_eq!(a.next_spawn_ms(), b.next_spawn_ms());
    }

    #[test]
    #[should_panic(expected = "delta time")]
    fn test_negative_dt_panics() {
        let mut spawner = ObstacleSpawner::new(&Tuning::default(), 1);
        spawner.spawn_at(50.0);
        spawner.advance(-10.0, 1.0);
    }

    #[test]
    #[should_panic(expected = "speed scale")]
    fn test_zero_speed_scale_panics() {
        // Would otherwise re-arm the timer to infinity and stop spawning
        ObstacleSpawner::new(&Tuning::default(), 1).advance(600.0, 0.0);
    }

    proptest! {
        #[test]
        fn prop_live_obstacles_move_left(
            offsets in prop::collection::vec(-99.0f32..100.0, 1..16),
            dt in 0.1f32..50.0,
            scale in 1.0f32..5.0,
        ) {
            let mut spawner = ObstacleSpawner::new(&Tuning::default(), 5);
            for &offset in &offsets {
                spawner.spawn_at(offset);
            }
            let before = spawner.obstacles().to_vec();
            let spawned = spawner.advance(dt, scale);

            // Survivors keep their relative order and each moved left
            let survivors = if spawned {
                &spawner.obstacles()[..spawner.obstacles().len() - 1]
            } else {
                spawner.obstacles()
            };
            let mut old = before.iter().filter(|o| o.offset - dt * scale * CACTUS_SPEED > CACTUS_CULL_OFFSET);
            for now in survivors {
                let was = old.next().unwrap();
                prop_assert!(now.offset < was.offset);
            }
        }
    }
}
