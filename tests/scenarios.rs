use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use planet_breaker::Bounds;
use planet_breaker::sim::{
    Asteroid, BulletSpawn, GameEvent, GamePhase, GameWorld, TickInput, Tier, WeaponKind, tick,
};

const BOUNDS: Bounds = Bounds {
    width: 800.0,
    height: 600.0,
};

fn still_asteroid(tier: Tier, radius: f32, pos: Vec2) -> Asteroid {
    let mut rng = Pcg32::seed_from_u64(0xA57E);
    let mut asteroid = Asteroid::spawn(&mut rng, Some(pos), radius, tier, BOUNDS, 1.5, 1);
    asteroid.vel = Vec2::ZERO;
    asteroid.spin = 0.0;
    asteroid
}

/// A world holding only `targets` plus a parked asteroid in the corner so the
/// field never counts as cleared.
fn world_with(targets: Vec<Asteroid>) -> GameWorld {
    let mut world = GameWorld::new(0xC0FFEE, BOUNDS);
    world.asteroids = vec![still_asteroid(Tier::Small, 12.5, Vec2::new(30.0, 30.0))];
    world.asteroids.extend(targets);
    world
}

fn fire_once(world: &mut GameWorld) {
    let fire = TickInput {
        fire: true,
        ..Default::default()
    };
    tick(world, &fire, BOUNDS);
}

/// Tick with no input until `pred` matches an event, returning that tick's events
fn run_until(
    world: &mut GameWorld,
    max_ticks: u32,
    pred: impl Fn(&GameEvent) -> bool,
) -> Vec<GameEvent> {
    for _ in 0..max_ticks {
        tick(world, &TickInput::default(), BOUNDS);
        if world.events.iter().any(&pred) {
            return world.events.clone();
        }
    }
    panic!("event not seen within {max_ticks} ticks");
}

#[test]
fn basic_kill_awards_points() {
    // Small asteroid straight above the ship, which faces up
    let mut world = world_with(vec![still_asteroid(Tier::Small, 12.5, Vec2::new(400.0, 200.0))]);
    assert_eq!(world.ship.weapon, WeaponKind::Plasma);

    fire_once(&mut world);
    assert_eq!(world.bullets.len(), 1);

    let events = run_until(&mut world, 40, |e| matches!(e, GameEvent::AsteroidDestroyed { .. }));
    assert!(events.iter().any(|e| matches!(
        e,
        GameEvent::AsteroidDestroyed {
            tier: Tier::Small,
            points: 30,
            children: 0,
            ..
        }
    )));
    assert_eq!(world.session.score, 30);
    assert_eq!(world.asteroids.len(), 1);
    assert!(world.bullets.is_empty());
}

#[test]
fn kill_and_split() {
    let target_pos = Vec2::new(400.0, 150.0);
    let mut target = still_asteroid(Tier::Large, 50.0, target_pos);
    target.health = 1;
    let mut world = world_with(vec![target]);

    fire_once(&mut world);
    let events = run_until(&mut world, 40, |e| matches!(e, GameEvent::AsteroidDestroyed { .. }));

    let Some(GameEvent::AsteroidDestroyed { pos, points, children, .. }) = events
        .iter()
        .copied()
        .find(|e| matches!(e, GameEvent::AsteroidDestroyed { .. }))
    else {
        unreachable!();
    };
    assert_eq!(pos, target_pos);
    assert_eq!(points, 10);
    assert_eq!(children, 2);
    assert_eq!(world.session.score, 10);

    let fragments: Vec<&Asteroid> = world
        .asteroids
        .iter()
        .filter(|a| a.tier == Tier::Medium)
        .collect();
    assert_eq!(fragments.len(), 2);
    for fragment in fragments {
        assert_eq!(fragment.radius, 25.0);
        assert_eq!(fragment.pos, target_pos);
        assert_eq!(fragment.health, 4);
    }
}

fn bullet_at(world: &mut GameWorld, pos: Vec2, damage: i32) {
    world.bullets.acquire(BulletSpawn {
        pos,
        vel: Vec2::ZERO,
        life: 10,
        radius: 5.0,
        weapon: WeaponKind::Plasma,
        damage,
    });
}

#[test]
fn single_pass_hit_leaves_large_asteroid_damaged() {
    let center = Vec2::new(500.0, 400.0);
    let mut world = world_with(vec![still_asteroid(Tier::Large, 50.0, center)]);
    bullet_at(&mut world, center, 3);

    world.resolve_collisions();

    let target = world.asteroids.iter().find(|a| a.tier == Tier::Large).unwrap();
    assert_eq!(target.health, 3);
    assert!(world.bullets.is_empty());
    assert_eq!(world.session.score, 0);
}

#[test]
fn single_pass_kill_splits_in_place() {
    let center = Vec2::new(500.0, 400.0);
    let mut target = still_asteroid(Tier::Large, 50.0, center);
    target.health = 2;
    let mut world = world_with(vec![target]);
    bullet_at(&mut world, center, 3);

    world.resolve_collisions();

    assert_eq!(world.session.score, 10);
    let children: Vec<&Asteroid> = world
        .asteroids
        .iter()
        .filter(|a| a.tier == Tier::Medium)
        .collect();
    assert_eq!(children.len(), 2);
    assert!(children.iter().all(|c| c.pos == center && c.radius == 25.0));
    assert!(!world.asteroids.iter().any(|a| a.tier == Tier::Large));
}

#[test]
fn damage_without_kill_keeps_asteroid() {
    let mut world = world_with(vec![still_asteroid(Tier::Large, 50.0, Vec2::new(400.0, 150.0))]);

    fire_once(&mut world);
    run_until(&mut world, 40, |e| matches!(e, GameEvent::AsteroidHit { .. }));

    let target = world
        .asteroids
        .iter()
        .find(|a| a.tier == Tier::Large)
        .unwrap();
    assert_eq!(target.health, 3);
    assert_eq!(world.session.score, 0);
}

#[test]
fn life_loss_then_game_over_then_restart() {
    let mut world = world_with(vec![]);
    world.ship.invulnerable = 0;
    world.ship.hp = 34;
    world.session.lives = 1;
    let ship_pos = world.ship.pos;
    world.asteroids.push(still_asteroid(Tier::Medium, 25.0, ship_pos));

    tick(&mut world, &TickInput::default(), BOUNDS);

    assert_eq!(world.phase(), GamePhase::GameOver);
    assert_eq!(world.session.lives, 0);
    assert_eq!(world.ship.hp, world.ship.max_hp);
    assert!(world.events.contains(&GameEvent::LifeLost { lives_left: 0 }));
    assert!(world.events.contains(&GameEvent::GameOver { score: 0 }));

    // Frozen until restart
    let thrust = TickInput {
        thrust: true,
        fire: true,
        ..Default::default()
    };
    tick(&mut world, &thrust, BOUNDS);
    assert_eq!(world.ship.pos, ship_pos);
    assert!(world.bullets.is_empty());

    let restart = TickInput {
        restart: true,
        ..Default::default()
    };
    tick(&mut world, &restart, BOUNDS);
    assert_eq!(world.phase(), GamePhase::Playing);
    assert_eq!(world.session.lives, 3);
    assert_eq!(world.session.level, 1);
    assert_eq!(world.asteroids.len(), 5);
}

#[test]
fn life_loss_respawns_with_lives_left() {
    let mut world = world_with(vec![]);
    world.ship.invulnerable = 0;
    world.ship.hp = 20;
    world.ship.pos = Vec2::new(600.0, 450.0);
    world.asteroids.push(still_asteroid(Tier::Medium, 25.0, Vec2::new(600.0, 450.0)));

    tick(&mut world, &TickInput::default(), BOUNDS);
    assert_eq!(world.session.lives, 2);
    assert_eq!(world.phase(), GamePhase::Playing);
    assert_eq!(world.ship.pos, BOUNDS.center());
    assert_eq!(world.ship.hp, 100);
    assert_eq!(world.ship.invulnerable, 120);
}

#[test]
fn invulnerability_window_blocks_repeat_hits() {
    let mut world = world_with(vec![]);
    world.ship.invulnerable = 0;
    let ship_pos = world.ship.pos;
    world.asteroids.push(still_asteroid(Tier::Large, 50.0, ship_pos));

    tick(&mut world, &TickInput::default(), BOUNDS);
    assert_eq!(world.ship.hp, 66);
    assert_eq!(world.ship.invulnerable, 60);

    for _ in 0..59 {
        tick(&mut world, &TickInput::default(), BOUNDS);
        assert_eq!(world.ship.hp, 66);
    }

    // Window over: the next overlapping tick lands
    tick(&mut world, &TickInput::default(), BOUNDS);
    assert_eq!(world.ship.hp, 32);
}

#[test]
fn level_progression_through_boss() {
    let mut world = GameWorld::new(0xBEEF, BOUNDS);
    world.asteroids.clear();
    world.ship.pos = Vec2::new(20.0, 20.0);

    tick(&mut world, &TickInput::default(), BOUNDS);
    assert!(world.events.contains(&GameEvent::BossSpawned { level: 1 }));
    let boss = world.boss.as_ref().unwrap();
    assert_eq!(boss.health, 30);
    assert_eq!(boss.radius, 90.0);

    // Boss still standing: nothing more happens
    tick(&mut world, &TickInput::default(), BOUNDS);
    assert_eq!(world.session.level, 1);
    assert!(world.boss.is_some());

    let center = world.boss.as_ref().unwrap().pos;
    world.boss.as_mut().unwrap().health = 2;
    bullet_at(&mut world, center, 3);
    tick(&mut world, &TickInput::default(), BOUNDS);

    let destroyed = GameEvent::BossDestroyed {
        pos: center,
        points: 150,
    };
    assert!(world.events.contains(&destroyed));
    assert!(world.events.contains(&GameEvent::LevelUp { level: 2 }));
    assert_eq!(world.session.score, 150);
    assert_eq!(world.session.level, 2);
    assert!(world.boss.is_none());
    assert_eq!(world.asteroids.len(), 7);
}

#[test]
fn worlds_are_independent() {
    let mut a = GameWorld::new(1, BOUNDS);
    let b = GameWorld::new(1, BOUNDS);
    a.session.score = 500;
    a.asteroids.clear();
    tick(&mut a, &TickInput::default(), BOUNDS);
    assert_eq!(b.session.score, 0);
    assert_eq!(b.asteroids.len(), 5);
    assert!(b.boss.is_none());
}
