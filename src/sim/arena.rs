//! Rectangular arena geometry
//!
//! Origin is the top-left corner, +Y points down. Entity positions are the
//! centers of square bodies.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Playfield bounds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Arena {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Center of the arena (player start and finale origin)
    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Strictly inside the bounds; points on the edge are out
    #[inline]
    pub fn contains(&self, point: Vec2) -> bool {
        point.x > 0.0 && point.x < self.width && point.y > 0.0 && point.y < self.height
    }

    /// Inside or on the bounds
    #[inline]
    pub fn contains_inclusive(&self, point: Vec2) -> bool {
        point.x >= 0.0 && point.x <= self.width && point.y >= 0.0 && point.y <= self.height
    }

    /// Clamp a point onto the bounds
    pub fn clamp_point(&self, point: Vec2) -> Vec2 {
        point.clamp(Vec2::ZERO, Vec2::new(self.width, self.height))
    }

    /// Clamp a body center so the whole body of `size` stays inside
    pub fn clamp_body(&self, center: Vec2, size: f32) -> Vec2 {
        let half = size / 2.0;
        Vec2::new(
            center.x.clamp(half, (self.width - half).max(half)),
            center.y.clamp(half, (self.height - half).max(half)),
        )
    }

    /// Corners of the region where a body of `size` can be centred
    pub fn body_corners(&self, size: f32) -> [Vec2; 4] {
        let half = size / 2.0;
        let (x0, x1) = (half, self.width - half);
        let (y0, y1) = (half, self.height - half);
        [
            Vec2::new(x0, y0),
            Vec2::new(x1, y0),
            Vec2::new(x0, y1),
            Vec2::new(x1, y1),
        ]
    }

    /// Body-center corner farthest from `from`
    pub fn farthest_body_corner(&self, from: Vec2, size: f32) -> Vec2 {
        self.body_corners(size)
            .into_iter()
            .max_by(|a, b| {
                a.distance_squared(from)
                    .partial_cmp(&b.distance_squared(from))
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .unwrap_or(from)
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self::new(crate::consts::ARENA_WIDTH, crate::consts::ARENA_HEIGHT)
    }
}
