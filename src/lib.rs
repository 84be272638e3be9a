//! Planet Breaker - An asteroid shooter with a planetary boss phase
//!
//! Core modules:
//! - `sim`: Deterministic simulation (ship, bullets, asteroids, boss, scoring)
//! - `platform`: Keyboard and touch adapters that produce tick input
//! - `settings`: Presentation preferences (particles, shake, flash)
//! - `tuning`: Data-driven game balance
//! - `error`: Configuration loading errors

pub mod error;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::ConfigError;
pub use settings::{QualityPreset, Settings};
pub use tuning::Tuning;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Game configuration constants
pub mod consts {
    /// Default play area (logical pixels)
    pub const DEFAULT_WIDTH: f32 = 800.0;
    pub const DEFAULT_HEIGHT: f32 = 600.0;

    /// Ship defaults
    pub const SHIP_RADIUS: f32 = 15.0;
    pub const SHIP_MAX_HP: i32 = 100;
    /// Facing straight up (screen coordinates, y grows downward)
    pub const SHIP_START_ANGLE: f32 = -std::f32::consts::FRAC_PI_2;
    /// Fraction of ship velocity inherited by fired projectiles
    pub const SHOT_VELOCITY_INHERIT: f32 = 0.3;

    /// Starting lives for a session
    pub const START_LIVES: u8 = 3;

    /// Bullet arena capacity
    pub const BULLET_POOL_CAPACITY: usize = 100;
    /// Bullets are removed once this far past any edge
    pub const BULLET_EDGE_MARGIN: f32 = 10.0;

    /// Radius of a freshly spawned large asteroid
    pub const LARGE_ASTEROID_RADIUS: f32 = 50.0;

    /// Boss planet scaling
    pub const BOSS_BASE_RADIUS: f32 = 80.0;
    pub const BOSS_RADIUS_PER_LEVEL: f32 = 10.0;
    pub const BOSS_BASE_HEALTH: i32 = 20;
    pub const BOSS_HEALTH_PER_LEVEL: i32 = 10;
    pub const BOSS_ROTATION_SPEED: f32 = 0.002;

    /// Score popup lifetime (ticks) and rise speed
    pub const POPUP_LIFE: u32 = 60;
    pub const POPUP_RISE_SPEED: f32 = 2.0;
}

/// Play-area dimensions, supplied by the host every tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            width: consts::DEFAULT_WIDTH,
            height: consts::DEFAULT_HEIGHT,
        }
    }
}

impl Bounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Centre of the play area (ship spawn point, boss position)
    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// True if `pos` lies more than `margin` outside any edge
    #[inline]
    pub fn is_outside(&self, pos: Vec2, margin: f32) -> bool {
        pos.x < -margin
            || pos.x > self.width + margin
            || pos.y < -margin
            || pos.y > self.height + margin
    }
}

/// Toroidal wraparound: once a body is more than one radius past an edge it
/// reappears one radius beyond the opposite edge.
#[inline]
pub fn wrap_position(pos: Vec2, radius: f32, bounds: Bounds) -> Vec2 {
    let mut out = pos;
    if out.x < -radius {
        out.x = bounds.width + radius;
    } else if out.x > bounds.width + radius {
        out.x = -radius;
    }
    if out.y < -radius {
        out.y = bounds.height + radius;
    } else if out.y > bounds.height + radius {
        out.y = -radius;
    }
    out
}

/// Unit vector for an angle (radians)
#[inline]
pub fn direction(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Normalize angle to [-PI, PI)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Circle overlap test (strict: touching circles do not overlap)
#[inline]
pub fn circles_overlap(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    a.distance(b) < ra + rb
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_angle() {
        use std::f32::consts::PI;
        assert!((normalize_angle(2.5 * PI) - 0.5 * PI).abs() < 1e-5);
        assert!((normalize_angle(-0.5) - (-0.5)).abs() < 1e-6);
        assert!((normalize_angle(2.0 * PI + 0.25) - 0.25).abs() < 1e-5);
    }

    #[test]
    fn test_wrap_each_edge() {
        let bounds = Bounds::new(800.0, 600.0);
        let r = 10.0;

        assert_eq!(wrap_position(Vec2::new(-10.5, 300.0), r, bounds).x, 810.0);
        assert_eq!(wrap_position(Vec2::new(810.5, 300.0), r, bounds).x, -10.0);
        assert_eq!(wrap_position(Vec2::new(400.0, -10.5), r, bounds).y, 610.0);
        assert_eq!(wrap_position(Vec2::new(400.0, 610.5), r, bounds).y, -10.0);
    }

    #[test]
    fn test_wrap_within_margin_is_untouched() {
        let bounds = Bounds::new(800.0, 600.0);
        let pos = Vec2::new(-5.0, 605.0);
        assert_eq!(wrap_position(pos, 10.0, bounds), pos);
    }

    #[test]
    fn test_circles_overlap() {
        assert!(circles_overlap(Vec2::ZERO, 5.0, Vec2::new(9.0, 0.0), 5.0));
        assert!(!circles_overlap(Vec2::ZERO, 5.0, Vec2::new(10.0, 0.0), 5.0));
    }

    #[test]
    fn test_bounds_outside() {
        let bounds = Bounds::new(100.0, 100.0);
        assert!(!bounds.is_outside(Vec2::new(-9.0, 50.0), 10.0));
        assert!(bounds.is_outside(Vec2::new(-11.0, 50.0), 10.0));
        assert!(bounds.is_outside(Vec2::new(50.0, 111.0), 10.0));
    }
}
