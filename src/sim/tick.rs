//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::asteroid::{update_asteroids, update_dust};
use super::state::{GameEvent, GameWorld};
use super::weapon::WeaponKind;
use crate::{Bounds, normalize_angle};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    pub turn_left: bool,
    pub turn_right: bool,
    pub thrust: bool,
    pub brake: bool,
    /// Fire held (rate limited by the weapon cooldown)
    pub fire: bool,
    /// Switch weapon (edge-triggered)
    pub cycle_weapon: bool,
    /// Start a new run (only honoured after game over)
    pub restart: bool,
    /// Idle/demo mode - AI plays the game
    pub idle_mode: bool,
}

impl TickInput {
    /// Combine two input sources; a control is held if either holds it
    pub fn merge(self, other: TickInput) -> TickInput {
        TickInput {
            turn_left: self.turn_left || other.turn_left,
            turn_right: self.turn_right || other.turn_right,
            thrust: self.thrust || other.thrust,
            brake: self.brake || other.brake,
            fire: self.fire || other.fire,
            cycle_weapon: self.cycle_weapon || other.cycle_weapon,
            restart: self.restart || other.restart,
            idle_mode: self.idle_mode || other.idle_mode,
        }
    }
}

/// Half-width of the cone the autopilot considers "on target" (radians)
const DEMO_AIM_TOLERANCE: f32 = 0.05;
const DEMO_FIRE_CONE: f32 = 0.2;
/// Closer than this the autopilot stops thrusting toward its target
const DEMO_STANDOFF: f32 = 250.0;
const DEMO_MAX_SPEED: f32 = 3.0;

/// Advance the world by one fixed timestep.
///
/// Order: effects, restart, weapon switch, ship, firing, projectiles,
/// hazards, collisions, level progression.
pub fn tick(world: &mut GameWorld, input: &TickInput, bounds: Bounds) {
    world.bounds = bounds;
    world.events.clear();
    world.time_ticks += 1;

    world.effects.update(&mut world.fx_rng);

    let mut input = *input;
    if input.idle_mode {
        input = demo_input(world, input);
    }

    if world.session.game_over && input.restart {
        world.restart();
    }
    let game_over = world.session.game_over;

    // Weapon switching fires once per press
    if !game_over && input.cycle_weapon && !world.prev_input.cycle_weapon {
        let next = world.ship.weapon.next_unlocked(world.session.score);
        if next != world.ship.weapon {
            world.ship.weapon = next;
            world.events.push(GameEvent::WeaponSwitched { weapon: next });
            log::debug!("Weapon switched to {}", next.spec().name);
        }
    }

    world.ship.update(&input, bounds, &world.tuning, game_over);

    if !game_over {
        fire(world, input.fire);
    }

    world.bullets.update(bounds);
    update_asteroids(&mut world.asteroids, bounds, world.tuning.asteroid_restitution);
    if let Some(boss) = &mut world.boss {
        boss.update();
    }
    update_dust(&mut world.dust, bounds);

    world.resolve_collisions();
    world.check_progression();

    world.prev_input = input;
}

/// Count down the shot cooldown and shoot when fire is held and ready
fn fire(world: &mut GameWorld, held: bool) {
    let ship = &mut world.ship;
    ship.shoot_cooldown = ship.shoot_cooldown.saturating_sub(1);
    if !held || ship.shoot_cooldown > 0 {
        return;
    }

    let fired = ship.shoot(&mut world.bullets);
    if fired > 0 {
        ship.shoot_cooldown = ship.weapon.spec().cooldown;
        world.events.push(GameEvent::BulletsFired {
            weapon: ship.weapon,
            count: fired,
        });
    }
}

/// Autopilot: face the nearest hazard (leading its motion), shoot when lined
/// up, keep speed modest, take the best weapon, and restart after game over.
fn demo_input(world: &GameWorld, mut input: TickInput) -> TickInput {
    if world.session.game_over {
        input.restart = true;
        return input;
    }

    let ship = &world.ship;

    // Pulse the switch on alternate ticks so each press registers as an edge
    let best = WeaponKind::unlocked(world.session.score)
        .last()
        .unwrap_or(ship.weapon);
    input.cycle_weapon = best != ship.weapon && world.time_ticks % 2 == 0;

    let target = world
        .asteroids
        .iter()
        .map(|a| (a.pos, a.vel))
        .chain(
            world
                .boss
                .iter()
                .filter(|b| !b.destroyed)
                .map(|b| (b.pos, Vec2::ZERO)),
        )
        .min_by(|a, b| {
            a.0.distance_squared(ship.pos)
                .partial_cmp(&b.0.distance_squared(ship.pos))
                .unwrap_or(std::cmp::Ordering::Equal)
        });

    let speed = ship.vel.length();
    input.brake = speed > DEMO_MAX_SPEED;

    let Some((target_pos, target_vel)) = target else {
        return input;
    };

    // Lead the target by the bullet travel time
    let dist = target_pos.distance(ship.pos);
    let travel = dist / ship.weapon.spec().speed;
    let aim = target_pos + target_vel * travel - ship.pos;
    let diff = normalize_angle(aim.y.atan2(aim.x) - ship.angle);

    input.turn_left = diff < -DEMO_AIM_TOLERANCE;
    input.turn_right = diff > DEMO_AIM_TOLERANCE;
    input.fire = diff.abs() < DEMO_FIRE_CONE;
    input.thrust = dist > DEMO_STANDOFF && diff.abs() < 0.5 && !input.brake;
    input
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::GamePhase;

    /// One motionless asteroid tucked in a corner, ship vulnerable
    fn quiet_world(seed: u64) -> GameWorld {
        let mut world = GameWorld::new(seed, Bounds::default());
        world.asteroids.truncate(1);
        world.asteroids[0].pos = Vec2::new(60.0, 60.0);
        world.asteroids[0].vel = Vec2::ZERO;
        world.ship.invulnerable = 0;
        world
    }

    fn fired(world: &GameWorld) -> u32 {
        world
            .events
            .iter()
            .map(|e| match e {
                GameEvent::BulletsFired { count, .. } => *count,
                _ => 0,
            })
            .sum()
    }

    #[test]
    fn test_fire_respects_cooldown() {
        let mut world = quiet_world(1);
        let input = TickInput {
            fire: true,
            ..Default::default()
        };

        let mut shots = 0;
        for _ in 0..26 {
            tick(&mut world, &input, Bounds::default());
            shots += fired(&world);
        }
        // Plasma cooldown is 25: shots on the 1st and 26th tick
        assert_eq!(shots, 2);
        assert_eq!(world.bullets.len(), 2);
    }

    #[test]
    fn test_weapon_cycle_is_edge_triggered() {
        let mut world = quiet_world(2);
        world.session.score = 600;
        let press = TickInput {
            cycle_weapon: true,
            ..Default::default()
        };

        tick(&mut world, &press, Bounds::default());
        assert_eq!(world.ship.weapon, WeaponKind::Missile);
        let switched = GameEvent::WeaponSwitched {
            weapon: WeaponKind::Missile,
        };
        assert!(world.events.contains(&switched));

        // Still held: no further switch
        tick(&mut world, &press, Bounds::default());
        assert_eq!(world.ship.weapon, WeaponKind::Missile);

        tick(&mut world, &TickInput::default(), Bounds::default());
        tick(&mut world, &press, Bounds::default());
        assert_eq!(world.ship.weapon, WeaponKind::Plasma);
    }

    #[test]
    fn test_locked_weapons_do_not_cycle() {
        let mut world = quiet_world(3);
        let press = TickInput {
            cycle_weapon: true,
            ..Default::default()
        };
        tick(&mut world, &press, Bounds::default());
        assert_eq!(world.ship.weapon, WeaponKind::Plasma);
        assert!(world.events.is_empty());
    }

    #[test]
    fn test_restart_only_after_game_over() {
        let mut world = quiet_world(4);
        world.session.score = 90;
        let restart = TickInput {
            restart: true,
            ..Default::default()
        };
        tick(&mut world, &restart, Bounds::default());
        assert_eq!(world.session.score, 90);

        world.session.game_over = true;
        world.session.lives = 0;
        tick(&mut world, &restart, Bounds::default());
        assert_eq!(world.phase(), GamePhase::Playing);
        assert_eq!(world.session.score, 0);
        assert_eq!(world.session.lives, 3);
        assert!(world.events.contains(&GameEvent::Restarted));
    }

    #[test]
    fn test_game_over_freezes_ship_but_not_hazards() {
        let mut world = quiet_world(5);
        world.session.game_over = true;
        world.asteroids[0].vel = Vec2::new(1.0, 0.0);
        let ship_pos = world.ship.pos;
        let input = TickInput {
            thrust: true,
            fire: true,
            ..Default::default()
        };
        tick(&mut world, &input, Bounds::default());
        assert_eq!(world.ship.pos, ship_pos);
        assert!(world.bullets.is_empty());
        assert_eq!(world.asteroids[0].pos, Vec2::new(61.0, 60.0));
    }

    #[test]
    fn test_merge_inputs() {
        let keys = TickInput {
            thrust: true,
            ..Default::default()
        };
        let touch = TickInput {
            fire: true,
            ..Default::default()
        };
        let merged = keys.merge(touch);
        assert!(merged.thrust && merged.fire);
        assert!(!merged.brake);
    }

    #[test]
    fn test_determinism() {
        // Two worlds with same seed should produce identical results
        let mut world1 = GameWorld::new(99999, Bounds::default());
        let mut world2 = GameWorld::new(99999, Bounds::default());

        let inputs = [
            TickInput {
                thrust: true,
                turn_left: true,
                ..Default::default()
            },
            TickInput {
                fire: true,
                ..Default::default()
            },
            TickInput::default(),
        ];

        for i in 0..600 {
            let input = &inputs[i % inputs.len()];
            tick(&mut world1, input, Bounds::default());
            tick(&mut world2, input, Bounds::default());
        }

        assert_eq!(world1.time_ticks, world2.time_ticks);
        assert_eq!(world1.session, world2.session);
        assert_eq!(world1.ship.pos, world2.ship.pos);
        assert_eq!(world1.asteroids.len(), world2.asteroids.len());
        for (a, b) in world1.asteroids.iter().zip(&world2.asteroids) {
            assert_eq!(a.pos, b.pos);
        }
    }

    #[test]
    fn test_presentation_settings_do_not_change_gameplay() {
        use crate::{Settings, Tuning};

        let quiet = Settings {
            particles: false,
            screen_shake: false,
            screen_flash: false,
            score_popups: false,
            ..Default::default()
        };
        let mut plain = GameWorld::new(31, Bounds::default());
        let mut muted = GameWorld::with_config(31, Bounds::default(), Tuning::default(), quiet);
        let input = TickInput {
            idle_mode: true,
            ..Default::default()
        };
        for _ in 0..900 {
            tick(&mut plain, &input, Bounds::default());
            tick(&mut muted, &input, Bounds::default());
        }
        assert_eq!(plain.session, muted.session);
        assert_eq!(plain.ship.pos, muted.ship.pos);
        assert!(muted.effects.particles.is_empty());
    }

    #[test]
    fn test_idle_mode_scores() {
        let mut world = GameWorld::new(2024, Bounds::default());
        let input = TickInput {
            idle_mode: true,
            ..Default::default()
        };
        let mut hits = 0;
        for _ in 0..3000 {
            tick(&mut world, &input, Bounds::default());
            hits += world
                .events
                .iter()
                .filter(|e| {
                    matches!(
                        e,
                        GameEvent::AsteroidHit { .. } | GameEvent::AsteroidDestroyed { .. }
                    )
                })
                .count();
        }
        assert!(hits > 0);
    }
}
