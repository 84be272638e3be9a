//! Asteroids: procedural generation, drift, mutual impacts and splitting

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::{circle_contact, resolve_elastic};
use crate::consts::LARGE_ASTEROID_RADIUS;
use crate::{Bounds, direction, wrap_position};

/// Asteroid size class
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Tier {
    Small = 1,
    Medium = 2,
    Large = 3,
}

impl Tier {
    #[inline]
    pub fn value(self) -> u8 {
        self as u8
    }

    /// Tier of the children produced when this tier splits
    pub fn smaller(self) -> Option<Tier> {
        match self {
            Tier::Large => Some(Tier::Medium),
            Tier::Medium => Some(Tier::Small),
            Tier::Small => None,
        }
    }

    /// Points awarded for destroying an asteroid of this tier
    pub fn points(self) -> u64 {
        (4 - self.value() as u64) * 10
    }

    pub fn max_health(self) -> i32 {
        2 * self.value() as i32
    }
}

/// A crater on the asteroid surface (local coordinates)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Crater {
    pub offset: Vec2,
    pub size: f32,
    pub large: bool,
}

/// A surface crack, baked as a polyline (local coordinates)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Crack {
    pub points: Vec<Vec2>,
}

/// A coloured surface patch (local coordinates)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Patch {
    pub offset: Vec2,
    pub size: f32,
    /// RGB colour
    pub color: u32,
}

/// Procedural look of an asteroid, generated once at creation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AsteroidVisual {
    /// Radius multiplier for each outline vertex, evenly spaced in angle
    pub outline: Vec<f32>,
    pub craters: Vec<Crater>,
    pub cracks: Vec<Crack>,
    pub patches: Vec<Patch>,
}

impl AsteroidVisual {
    pub fn generate(rng: &mut impl Rng, radius: f32, tier: Tier) -> Self {
        use std::f32::consts::TAU;
        let t = tier.value() as f32;

        let vertex_count = rng.random_range(8..=14);
        let outline = (0..vertex_count)
            .map(|_| rng.random_range(0.8f32..1.2))
            .collect();

        let crater_count = (t * 2.0 + rng.random::<f32>() * 3.0) as usize;
        let craters = (0..crater_count)
            .map(|_| {
                let angle = rng.random::<f32>() * TAU;
                let dist = rng.random::<f32>() * radius * 0.6;
                let large = rng.random_bool(0.1);
                let size = if large {
                    radius * (0.12 + rng.random::<f32>() * 0.08)
                } else {
                    radius * (0.03 + rng.random::<f32>() * 0.04)
                };
                Crater {
                    offset: direction(angle) * dist,
                    size,
                    large,
                }
            })
            .collect();

        let crack_count = (t * 3.0 + rng.random::<f32>() * 4.0) as usize;
        let cracks = (0..crack_count)
            .map(|_| {
                let start_angle = rng.random::<f32>() * TAU;
                let start_dist = rng.random::<f32>() * radius * 0.7;
                let length = radius * (0.15 + rng.random::<f32>() * 0.35);
                let curve = (rng.random::<f32>() - 0.5) * 1.2;
                let segments = rng.random_range(2..=4);

                let segment_len = length / segments as f32;
                let mut point = direction(start_angle) * start_dist;
                let mut heading = start_angle + curve;
                let mut points = Vec::with_capacity(segments + 1);
                points.push(point);
                for _ in 0..segments {
                    heading += (rng.random::<f32>() - 0.5) * 0.8;
                    point += direction(heading) * segment_len;
                    points.push(point);
                }
                Crack { points }
            })
            .collect();

        let patch_count = ((radius / 5.0) as usize).min(10);
        let patches = (0..patch_count)
            .map(|i| {
                let angle = (i as f32 / patch_count as f32) * TAU + rng.random::<f32>() * 0.5;
                let dist = radius * (0.25 + rng.random::<f32>() * 0.4);
                let shade: u32 = rng.random_range(90..160);
                Patch {
                    offset: direction(angle) * dist,
                    size: radius * (0.08 + rng.random::<f32>() * 0.04),
                    color: ((shade + 20) << 16) | (shade << 8) | (shade - 20),
                }
            })
            .collect();

        Self {
            outline,
            craters,
            cracks,
            patches,
        }
    }
}

/// An asteroid
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asteroid {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Rotation angle (radians)
    pub angle: f32,
    /// Rotation per tick (radians)
    pub spin: f32,
    pub radius: f32,
    pub tier: Tier,
    pub health: i32,
    pub max_health: i32,
    visual: AsteroidVisual,
}

impl Asteroid {
    /// Create an asteroid with fresh velocity and visuals.
    ///
    /// A missing position is drawn uniformly from the bounds. Drift speed grows
    /// as tier shrinks and as the level rises.
    pub fn spawn(
        rng: &mut impl Rng,
        pos: Option<Vec2>,
        radius: f32,
        tier: Tier,
        bounds: Bounds,
        base_speed: f32,
        level: u32,
    ) -> Self {
        let pos = pos.unwrap_or_else(|| {
            Vec2::new(
                rng.random::<f32>() * bounds.width,
                rng.random::<f32>() * bounds.height,
            )
        });
        let scale = base_speed * (4.0 - tier.value() as f32) * 0.5 * (1.0 + level as f32 * 0.1);
        let vel = Vec2::new(
            (rng.random::<f32>() * 2.0 - 1.0) * scale,
            (rng.random::<f32>() * 2.0 - 1.0) * scale,
        );
        let angle = rng.random::<f32>() * std::f32::consts::TAU;
        let spin = (rng.random::<f32>() * 2.0 - 1.0) * 0.02;
        let visual = AsteroidVisual::generate(rng, radius, tier);

        Self {
            pos,
            vel,
            angle,
            spin,
            radius,
            tier,
            health: tier.max_health(),
            max_health: tier.max_health(),
            visual,
        }
    }

    /// The baked visual descriptor
    pub fn visual(&self) -> &AsteroidVisual {
        &self.visual
    }

    pub fn is_destroyed(&self) -> bool {
        self.health <= 0
    }

    /// Apply bullet damage. Returns true if this hit destroyed the asteroid.
    pub fn apply_damage(&mut self, damage: i32) -> bool {
        if self.is_destroyed() {
            return false;
        }
        self.health -= damage.max(0);
        self.is_destroyed()
    }

    /// Children produced when this asteroid is destroyed: two of the next
    /// smaller tier at half the radius, or none for the smallest tier.
    pub fn split(
        &self,
        rng: &mut impl Rng,
        bounds: Bounds,
        base_speed: f32,
        level: u32,
    ) -> Vec<Asteroid> {
        match self.tier.smaller() {
            Some(tier) => (0..2)
                .map(|_| {
                    Asteroid::spawn(
                        rng,
                        Some(self.pos),
                        self.radius / 2.0,
                        tier,
                        bounds,
                        base_speed,
                        level,
                    )
                })
                .collect(),
            None => Vec::new(),
        }
    }
}

/// Move, spin and wrap every asteroid, then resolve overlapping pairs
pub fn update_asteroids(asteroids: &mut [Asteroid], bounds: Bounds, restitution: f32) {
    for a in asteroids.iter_mut() {
        a.pos += a.vel;
        a.angle += a.spin;
        a.pos = wrap_position(a.pos, a.radius, bounds);
    }

    for i in 0..asteroids.len() {
        let (head, tail) = asteroids.split_at_mut(i + 1);
        let a = &mut head[i];
        for b in tail.iter_mut() {
            if let Some(contact) = circle_contact(a.pos, a.radius, b.pos, b.radius) {
                resolve_elastic(
                    &mut a.pos,
                    &mut a.vel,
                    &mut b.pos,
                    &mut b.vel,
                    contact,
                    restitution,
                );
            }
        }
    }
}

/// Spawn a field of large asteroids.
///
/// When `safe_radius > 0`, positions closer than that to `safe_center` are
/// re-rolled (bounded attempts, so a tiny play area cannot stall the tick).
pub fn spawn_field(
    rng: &mut impl Rng,
    count: usize,
    bounds: Bounds,
    base_speed: f32,
    level: u32,
    safe_center: Vec2,
    safe_radius: f32,
) -> Vec<Asteroid> {
    const MAX_PLACEMENT_ATTEMPTS: u32 = 32;

    (0..count)
        .map(|_| {
            let mut pos = random_point(rng, bounds);
            let mut attempts = 1;
            while safe_radius > 0.0
                && pos.distance(safe_center) < safe_radius
                && attempts < MAX_PLACEMENT_ATTEMPTS
            {
                pos = random_point(rng, bounds);
                attempts += 1;
            }
            if safe_radius > 0.0 && pos.distance(safe_center) < safe_radius {
                log::debug!("No safe spawn found after {} attempts, placing anyway", attempts);
            }
            Asteroid::spawn(
                rng,
                Some(pos),
                LARGE_ASTEROID_RADIUS,
                Tier::Large,
                bounds,
                base_speed,
                level,
            )
        })
        .collect()
}

fn random_point(rng: &mut impl Rng, bounds: Bounds) -> Vec2 {
    Vec2::new(
        rng.random::<f32>() * bounds.width,
        rng.random::<f32>() * bounds.height,
    )
}

/// Debris shed by a large asteroid at higher levels; hurts the ship on contact
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DustMote {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Ticks remaining
    pub life: u32,
}

/// A ring of dust motes drifting out from `pos`
pub fn shed_dust(
    rng: &mut impl Rng,
    pos: Vec2,
    count: u32,
    speed: f32,
    radius: f32,
    life: u32,
) -> Vec<DustMote> {
    (0..count)
        .map(|_| {
            let angle = rng.random::<f32>() * std::f32::consts::TAU;
            DustMote {
                pos,
                vel: direction(angle) * (0.5 + rng.random::<f32>() * speed),
                radius,
                life,
            }
        })
        .collect()
}

/// Drift, wrap and expire dust motes
pub fn update_dust(dust: &mut Vec<DustMote>, bounds: Bounds) {
    for mote in dust.iter_mut() {
        mote.pos = wrap_position(mote.pos + mote.vel, mote.radius, bounds);
        mote.life = mote.life.saturating_sub(1);
    }
    dust.retain(|m| m.life > 0);
}
