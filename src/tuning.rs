//! Data-driven game balance
//!
//! Every gameplay constant that a designer might want to tweak without a
//! rebuild. Missing keys in a JSON file fall back to [`Tuning::default`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, load_json};

/// Gameplay tuning values (all per-tick units)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Ship ===
    /// Turn rate while a turn control is held (radians/tick)
    pub ship_turn_step: f32,
    /// Forward acceleration while thrusting
    pub ship_thrust: f32,
    /// Extra velocity decay while braking
    pub ship_brake: f32,
    /// Ambient drag applied every tick
    pub ship_drag: f32,
    /// Invulnerability after (re)spawning
    pub respawn_invulnerability: u32,
    /// Invulnerability after a non-fatal hit
    pub hit_invulnerability: u32,

    // === Contact damage to the ship ===
    pub asteroid_damage: i32,
    pub boss_damage: i32,
    pub dust_damage: i32,

    // === Asteroids ===
    /// Base asteroid drift speed
    pub asteroid_speed: f32,
    /// Fraction of closing speed exchanged in an asteroid/asteroid impact
    pub asteroid_restitution: f32,
    /// Keep initial asteroids at least this far from the ship spawn (0 disables)
    pub spawn_safe_radius: f32,

    // === Dust hazard ===
    /// Large asteroids shed dust when split from this level on
    pub dust_enabled: bool,
    pub dust_min_level: u32,
    pub dust_per_split: u32,
    pub dust_life: u32,
    pub dust_radius: f32,
    pub dust_speed: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            ship_turn_step: 0.1,
            ship_thrust: 0.1,
            ship_brake: 0.95,
            ship_drag: 0.99,
            respawn_invulnerability: 120,
            hit_invulnerability: 60,

            asteroid_damage: 34,
            boss_damage: 50,
            dust_damage: 5,

            asteroid_speed: 1.5,
            asteroid_restitution: 0.8,
            spawn_safe_radius: 150.0,

            dust_enabled: true,
            dust_min_level: 2,
            dust_per_split: 6,
            dust_life: 180,
            dust_radius: 3.0,
            dust_speed: 1.5,
        }
    }
}

impl Tuning {
    /// Parse tuning from a JSON string
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|source| ConfigError::Parse {
            origin: "<inline>".to_string(),
            source,
        })
    }

    /// Load tuning from a JSON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let tuning: Self = load_json(path)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning.sanitized())
    }

    /// Clamp values that would break the simulation back into range
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if !(0.0..=1.0).contains(&self.ship_drag) {
            log::warn!("ship_drag {} out of range, using default", self.ship_drag);
            self.ship_drag = defaults.ship_drag;
        }
        if !(0.0..=1.0).contains(&self.ship_brake) {
            log::warn!("ship_brake {} out of range, using default", self.ship_brake);
            self.ship_brake = defaults.ship_brake;
        }
        if !(0.0..=1.0).contains(&self.asteroid_restitution) {
            log::warn!(
                "asteroid_restitution {} out of range, using default",
                self.asteroid_restitution
            );
            self.asteroid_restitution = defaults.asteroid_restitution;
        }
        self.spawn_safe_radius = self.spawn_safe_radius.max(0.0);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "asteroid_damage": 10 }"#).unwrap();
        assert_eq!(tuning.asteroid_damage, 10);
        assert_eq!(tuning.boss_damage, Tuning::default().boss_damage);
        assert_eq!(tuning.hit_invulnerability, 60);
    }

    #[test]
    fn test_bad_json_is_parse_error() {
        let err = Tuning::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_sanitize_rejects_out_of_range_drag() {
        let tuning = Tuning {
            ship_drag: 1.5,
            spawn_safe_radius: -3.0,
            ..Default::default()
        }
        .sanitized();
        assert_eq!(tuning.ship_drag, 0.99);
        assert_eq!(tuning.spawn_safe_radius, 0.0);
    }
}
