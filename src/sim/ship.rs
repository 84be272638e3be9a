//! The player's ship

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::pool::{BulletPool, BulletSpawn};
use super::tick::TickInput;
use super::weapon::WeaponKind;
use crate::consts::*;
use crate::{Bounds, Tuning, direction, wrap_position};

/// Ticks per on/off phase of the invulnerability blink
pub const BLINK_PERIOD: u32 = 10;

/// The player ship (one per world, never removed)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ship {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Facing angle (radians, 0 = +x, screen coordinates)
    pub angle: f32,
    pub radius: f32,
    pub hp: i32,
    pub max_hp: i32,
    pub weapon: WeaponKind,
    /// Ticks until the next shot is allowed
    pub shoot_cooldown: u32,
    /// Ticks of invulnerability left
    pub invulnerable: u32,
    /// False during the "off" half of the invulnerability blink
    pub visible: bool,
    /// Thrust held this tick (for the renderer's engine flame)
    pub thrusting: bool,
    /// Brake held this tick
    pub braking: bool,
}

impl Ship {
    /// A ship centred in `bounds`, freshly spawned
    pub fn new(bounds: Bounds, tuning: &Tuning) -> Self {
        let mut ship = Self {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            angle: SHIP_START_ANGLE,
            radius: SHIP_RADIUS,
            hp: SHIP_MAX_HP,
            max_hp: SHIP_MAX_HP,
            weapon: WeaponKind::Plasma,
            shoot_cooldown: 0,
            invulnerable: 0,
            visible: true,
            thrusting: false,
            braking: false,
        };
        ship.reset(bounds, tuning);
        ship
    }

    /// Respawn at the centre: still, facing up, full HP, temporarily invulnerable
    pub fn reset(&mut self, bounds: Bounds, tuning: &Tuning) {
        self.pos = bounds.center();
        self.vel = Vec2::ZERO;
        self.angle = SHIP_START_ANGLE;
        self.hp = self.max_hp;
        self.invulnerable = tuning.respawn_invulnerability;
        self.visible = true;
        self.shoot_cooldown = 0;
        self.thrusting = false;
        self.braking = false;
    }

    /// True while hits are ignored
    pub fn is_invulnerable(&self) -> bool {
        self.invulnerable > 0
    }

    /// Can a hazard hurt the ship right now?
    pub fn is_vulnerable(&self) -> bool {
        self.visible && !self.is_invulnerable()
    }

    /// Advance the invulnerability countdown and the blink it drives
    fn tick_invulnerability(&mut self) {
        if self.invulnerable > 0 {
            self.invulnerable -= 1;
            self.visible = (self.invulnerable / BLINK_PERIOD) % 2 == 0;
        } else {
            self.visible = true;
        }
    }

    /// Advance the ship one tick.
    ///
    /// Once the game is over only the blink timer runs.
    pub fn update(&mut self, input: &TickInput, bounds: Bounds, tuning: &Tuning, game_over: bool) {
        self.tick_invulnerability();

        if game_over {
            self.thrusting = false;
            self.braking = false;
            return;
        }

        if input.turn_left {
            self.angle -= tuning.ship_turn_step;
        }
        if input.turn_right {
            self.angle += tuning.ship_turn_step;
        }

        self.thrusting = input.thrust;
        if self.thrusting {
            self.vel += direction(self.angle) * tuning.ship_thrust;
        }

        self.braking = input.brake;
        if self.braking {
            self.vel *= tuning.ship_brake;
        }

        self.vel *= tuning.ship_drag;
        self.pos = wrap_position(self.pos + self.vel, self.radius, bounds);
    }

    /// Fire the current weapon from the nose. Cooldown is the caller's job.
    ///
    /// Returns the number of bullets actually placed in the pool.
    pub fn shoot(&self, pool: &mut BulletPool) -> u32 {
        let spec = self.weapon.spec();
        let nose = self.pos + direction(self.angle) * self.radius;
        let inherited = self.vel * SHOT_VELOCITY_INHERIT;

        let mut fired = 0;
        for i in 0..spec.count {
            let heading = self.angle + self.weapon.spread_offset(i);
            let spawn = BulletSpawn {
                pos: nose,
                vel: direction(heading) * spec.speed + inherited,
                life: spec.life,
                radius: spec.size,
                weapon: self.weapon,
                damage: spec.damage,
            };
            match pool.acquire(spawn) {
                Some(_) => fired += 1,
                None => {
                    log::debug!("Bullet pool exhausted, dropping shot");
                    break;
                }
            }
        }
        fired
    }
}
