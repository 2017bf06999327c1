//! Axis-aligned bounding boxes and overlap tests
//!
//! Boxes live in world space with screen orientation: `top < bottom`, y grows
//! downward and the ground line sits at `WORLD_HEIGHT`.

use std::borrow::Borrow;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle (`min` = top-left, `max` = bottom-right)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn from_ltrb(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            min: Vec2::new(left, top),
            max: Vec2::new(right, bottom),
        }
    }

    /// Box of the given size whose bottom-left corner is at `(left, bottom)`
    pub fn from_bottom_left(left: f32, bottom: f32, width: f32, height: f32) -> Self {
        Self::from_ltrb(left, bottom - height, left + width, bottom)
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.min.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.min.y
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.max.x
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.max.y
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// Strict overlap: boxes that only share an edge do not collide
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.top() < other.bottom()
            && self.right() > other.left()
            && self.bottom() > other.top()
    }
}

/// True if `runner` overlaps any of `obstacles` (stops at the first hit)
pub fn any_collision<I>(runner: &Rect, obstacles: I) -> bool
where
    I: IntoIterator,
    I::Item: Borrow<Rect>,
{
    obstacles
        .into_iter()
        .any(|obstacle| runner.overlaps(obstacle.borrow()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlapping_boxes_collide() {
        let runner = Rect::from_ltrb(0.0, 0.0, 10.0, 10.0);
        let cactus = Rect::from_ltrb(5.0, 5.0, 15.0, 15.0);
        assert!(runner.overlaps(&cactus));
        assert!(cactus.overlaps(&runner));
    }

    #[test]
    fn test_edge_touching_is_not_collision() {
        let runner = Rect::from_ltrb(0.0, 0.0, 10.0, 10.0);
        let beside = Rect::from_ltrb(10.0, 0.0, 20.0, 10.0);
        let below = Rect::from_ltrb(0.0, 10.0, 10.0, 20.0);
        assert!(!runner.overlaps(&beside));
        assert!(!runner.overlaps(&below));
    }

    #[test]
    fn test_contained_box_collides() {
        let outer = Rect::from_ltrb(0.0, 0.0, 10.0, 10.0);
        let inner = Rect::from_ltrb(2.0, 2.0, 3.0, 3.0);
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
    }

    #[test]
    fn test_from_bottom_left() {
        let rect = Rect::from_bottom_left(1.0, 30.0, 8.0, 9.0);
        assert_eq!(rect.left(), 1.0);
        assert_eq!(rect.top(), 21.0);
        assert_eq!(rect.right(), 9.0);
        assert_eq!(rect.bottom(), 30.0);
        assert_eq!(rect.size(), Vec2::new(8.0, 9.0));
    }

    #[test]
    fn test_any_collision() {
        let runner = Rect::from_ltrb(0.0, 0.0, 10.0, 10.0);
        let misses = [
            Rect::from_ltrb(10.0, 0.0, 20.0, 10.0),
            Rect::from_ltrb(50.0, 0.0, 60.0, 10.0),
        ];
        assert!(!any_collision(&runner, &misses));
        assert!(!any_collision(&runner, Vec::<Rect>::new()));

        let mut with_hit = misses.to_vec();
        with_hit.push(Rect::from_ltrb(5.0, 5.0, 15.0, 15.0));
        assert!(any_collision(&runner, &with_hit));
    }
}
