//! Scrolling ground track
//!
//! Two segments tile the floor. Each one wraps forward by two segment widths
//! once it has fully left the screen, so the pair never shows a gap.

use serde::{Deserialize, Serialize};

use crate::Tuning;

/// One tile of the ground strip
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GroundSegment {
    pub offset: f32,
}

#[derive(Debug, Clone)]
pub struct ScrollTrack {
    segments: [GroundSegment; 2],
    width: f32,
    speed: f32,
}

impl ScrollTrack {
    pub fn new(tuning: &Tuning) -> Self {
        let mut track = Self {
            segments: [GroundSegment { offset: 0.0 }; 2],
            width: tuning.ground_width,
            speed: tuning.ground_speed,
        };
        track.reset();
        track
    }

    pub fn reset(&mut self) {
        self.segments[0].offset = 0.0;
        self.segments[1].offset = self.width;
    }

    pub fn advance(&mut self, dt: f32, speed_scale: f32) {
        super::assert_step(dt, speed_scale);
        let step = dt * speed_scale * self.speed;
        for segment in &mut self.segments {
            segment.offset -= step;
            // Wrap rather than snap to zero to keep the phase continuous
            if segment.offset <= -self.width {
                segment.offset += self.width * 2.0;
            }
        }
    }

    pub fn segments(&self) -> &[GroundSegment; 2] {
        &self.segments
    }

    pub fn segment_width(&self) -> f32 {
        self.width
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Distance between the segments folded into [0, 2w)
    fn phase_gap(track: &ScrollTrack) -> f32 {
        let [a, b] = track.segments();
        (b.offset - a.offset).rem_euclid(track.segment_width() * 2.0)
    }

    #[test]
    fn test_reset_layout() {
        let track = ScrollTrack::new(&Tuning::default());
        let [a, b] = track.segments();
        assert_eq!(a.offset, 0.0);
        assert_eq!(b.offset, 300.0);
    }

    #[test]
    fn test_wraps_by_two_widths() {
        let mut track = ScrollTrack::new(&Tuning::default());
        // 0.05 units/ms * 6000 ms = 300 units: first segment reaches -300
        track.advance(6000.0, 1.0);
        let [a, b] = track.segments();
        assert_eq!(a.offset, 300.0);
        assert_eq!(b.offset, 0.0);
    }

    #[test]
    fn test_speed_scale_multiplies_scroll() {
        let mut slow = ScrollTrack::new(&Tuning::default());
        let mut fast = ScrollTrack::new(&Tuning::default());
        slow.advance(100.0, 1.0);
        fast.advance(100.0, 2.0);
        assert!((slow.segments()[0].offset + 5.0).abs() < 1e-4);
        assert!((fast.segments()[0].offset + 10.0).abs() < 1e-4);
    }

    #[test]
    #[should_panic(expected = "delta time")]
    fn test_negative_dt_panics() {
        ScrollTrack::new(&Tuning::default()).advance(-1.0, 1.0);
    }

    #[test]
    #[should_panic(expected = "speed scale")]
    fn test_zero_speed_scale_panics() {
        ScrollTrack::new(&Tuning::default()).advance(16.0, 0.0);
    }

    proptest! {
        #[test]
        fn prop_segments_always_tile(
            steps in prop::collection::vec((0.0f32..50.0, 1.0f32..3.0), 1..400)
        ) {
            let mut track = ScrollTrack::new(&Tuning::default());
            for (dt, scale) in steps {
                track.advance(dt, scale);
                let gap = phase_gap(&track);
                prop_assert!((gap - track.segment_width()).abs() < 0.05, "gap drifted to {}", gap);
            }
        }
    }
}
