//! The boss planet that guards each level once the asteroid field is cleared

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::Bounds;
use crate::consts::*;

/// Decorative landmass on the planet surface
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Continent {
    /// Direction from planet centre (radians)
    pub angle: f32,
    /// Distance from centre as a fraction of the radius
    pub dist: f32,
    /// Size as a fraction of the radius
    pub size: f32,
    /// Hue in degrees (green range)
    pub hue: f32,
    /// Lightness percentage
    pub lightness: f32,
}

/// The boss planet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Boss {
    pub pos: Vec2,
    pub radius: f32,
    pub health: i32,
    pub max_health: i32,
    /// Rotation angle (radians)
    pub angle: f32,
    pub rotation_speed: f32,
    pub continents: Vec<Continent>,
    /// Atmosphere hue in degrees, shifts with level
    pub atmosphere_hue: f32,
    pub destroyed: bool,
}

impl Boss {
    /// Boss for `level`, centred in the play area
    pub fn spawn(rng: &mut impl Rng, bounds: Bounds, level: u32) -> Self {
        let health = BOSS_BASE_HEALTH + BOSS_HEALTH_PER_LEVEL * level as i32;
        let continent_count = rng.random_range(5..=7);
        let continents = (0..continent_count)
            .map(|_| Continent {
                angle: rng.random::<f32>() * std::f32::consts::TAU,
                dist: rng.random::<f32>() * 0.6,
                size: 0.15 + rng.random::<f32>() * 0.2,
                hue: 100.0 + rng.random::<f32>() * 60.0,
                lightness: 30.0 + rng.random::<f32>() * 20.0,
            })
            .collect();

        Self {
            pos: bounds.center(),
            radius: BOSS_BASE_RADIUS + BOSS_RADIUS_PER_LEVEL * level as f32,
            health,
            max_health: health,
            angle: 0.0,
            rotation_speed: BOSS_ROTATION_SPEED,
            continents,
            atmosphere_hue: (200.0 + level as f32 * 30.0) % 360.0,
            destroyed: false,
        }
    }

    /// Spin in place. Destroyed planets stay still.
    pub fn update(&mut self) {
        if !self.destroyed {
            self.angle += self.rotation_speed;
        }
    }

    /// Apply damage. Returns true only on the hit that destroys the planet;
    /// once destroyed, further damage is ignored.
    pub fn apply_damage(&mut self, damage: i32) -> bool {
        if self.destroyed {
            return false;
        }
        self.health -= damage.max(0);
        if self.health <= 0 {
            self.destroyed = true;
            return true;
        }
        false
    }

    /// Remaining health as a fraction (0-1), for the health bar
    pub fn health_fraction(&self) -> f32 {
        (self.health.max(0) as f32 / self.max_health as f32).clamp(0.0, 1.0)
    }
}
