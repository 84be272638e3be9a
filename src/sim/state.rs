//! Game state and core simulation types
//!
//! Everything one session needs lives in [`GameWorld`]; there is no global
//! state, so independent worlds can run side by side.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::asteroid::{Asteroid, DustMote, Tier, spawn_field};
use super::boss::Boss;
use super::effects::{Effects, Particle, ScorePopup, ScreenFlash, ScreenShake};
use super::pool::{Bullet, BulletPool};
use super::ship::Ship;
use super::tick::TickInput;
use super::weapon::WeaponKind;
use crate::consts::*;
use crate::{Bounds, Settings, Tuning};

/// Stream selector for the presentation RNG
const FX_STREAM_SALT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Out of lives, waiting for restart
    GameOver,
}

/// Score, lives and level for one run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub score: u64,
    pub lives: u8,
    /// 1-based level
    pub level: u32,
    pub game_over: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            score: 0,
            lives: START_LIVES,
            level: 1,
            game_over: false,
        }
    }
}

impl Session {
    pub fn phase(&self) -> GamePhase {
        if self.game_over {
            GamePhase::GameOver
        } else {
            GamePhase::Playing
        }
    }

    /// Asteroids in a freshly spawned field for the current level
    pub fn field_size(&self) -> usize {
        3 + 2 * self.level as usize
    }
}

/// Something noteworthy that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    BulletsFired { weapon: WeaponKind, count: u32 },
    WeaponSwitched { weapon: WeaponKind },
    AsteroidHit { pos: Vec2, tier: Tier },
    AsteroidDestroyed {
        pos: Vec2,
        tier: Tier,
        points: u64,
        children: u8,
    },
    DustShed { pos: Vec2, count: u32 },
    BossSpawned { level: u32 },
    BossHit { pos: Vec2 },
    BossDestroyed { pos: Vec2, points: u64 },
    ShipHit { pos: Vec2, damage: i32 },
    LifeLost { lives_left: u8 },
    GameOver { score: u64 },
    LevelUp { level: u32 },
    Restarted,
}

/// The whole simulation: one session's worth of state
#[derive(Debug, Clone)]
pub struct GameWorld {
    /// Run seed for reproducibility
    pub seed: u64,
    pub session: Session,
    pub ship: Ship,
    pub bullets: BulletPool,
    pub asteroids: Vec<Asteroid>,
    pub boss: Option<Boss>,
    pub dust: Vec<DustMote>,
    /// Visual feedback (not gameplay-affecting)
    pub effects: Effects,
    /// Events raised by the most recent tick
    pub events: Vec<GameEvent>,
    pub tuning: Tuning,
    pub settings: Settings,
    /// Play area as of the most recent tick
    pub bounds: Bounds,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Input from the previous tick (edge detection)
    pub(crate) prev_input: TickInput,
    /// Gameplay RNG
    pub(crate) rng: Pcg32,
    /// Presentation RNG; never consulted by gameplay
    pub(crate) fx_rng: Pcg32,
}

impl GameWorld {
    /// New world with default tuning and settings
    pub fn new(seed: u64, bounds: Bounds) -> Self {
        Self::with_config(seed, bounds, Tuning::default(), Settings::default())
    }

    /// New world with the initial asteroid field already spawned
    pub fn with_config(seed: u64, bounds: Bounds, tuning: Tuning, settings: Settings) -> Self {
        let ship = Ship::new(bounds, &tuning);
        let mut world = Self {
            seed,
            session: Session::default(),
            ship,
            bullets: BulletPool::with_capacity(BULLET_POOL_CAPACITY),
            asteroids: Vec::new(),
            boss: None,
            dust: Vec::new(),
            effects: Effects::default(),
            events: Vec::new(),
            tuning,
            settings,
            bounds,
            time_ticks: 0,
            prev_input: TickInput::default(),
            rng: Pcg32::seed_from_u64(seed),
            fx_rng: Pcg32::seed_from_u64(seed ^ FX_STREAM_SALT),
        };
        world.spawn_field();
        log::info!(
            "New world (seed {}, {}x{}, {} asteroids)",
            seed,
            bounds.width,
            bounds.height,
            world.asteroids.len()
        );
        world
    }

    pub fn phase(&self) -> GamePhase {
        self.session.phase()
    }

    /// Replace the current asteroids with a fresh field for the current level,
    /// keeping clear of wherever the ship is now.
    pub fn spawn_field(&mut self) {
        self.asteroids = spawn_field(
            &mut self.rng,
            self.session.field_size(),
            self.bounds,
            self.tuning.asteroid_speed,
            self.session.level,
            self.ship.pos,
            self.tuning.spawn_safe_radius,
        );
    }

    /// Start a new run: fresh session, ship and field
    pub fn restart(&mut self) {
        let final_score = self.session.score;
        self.session = Session::default();
        self.ship.reset(self.bounds, &self.tuning);
        self.ship.weapon = WeaponKind::Plasma;
        self.bullets.clear();
        self.effects.clear();
        self.dust.clear();
        self.boss = None;
        self.spawn_field();
        self.events.push(GameEvent::Restarted);
        log::info!("Restarted (previous score {})", final_score);
    }

    /// Read-only view for the renderer
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            time_ticks: self.time_ticks,
            phase: self.phase(),
            session: &self.session,
            ship: &self.ship,
            bullets: self.bullets.iter().map(|(_, b)| b).collect(),
            asteroids: &self.asteroids,
            boss: self.boss.as_ref(),
            dust: &self.dust,
            particles: &self.effects.particles,
            popups: &self.effects.popups,
            shake: &self.effects.shake,
            flash: &self.effects.flash,
            events: &self.events,
        }
    }
}

/// Borrowed, serializable view of a world for one frame
#[derive(Debug, Serialize)]
pub struct Snapshot<'a> {
    pub time_ticks: u64,
    pub phase: GamePhase,
    pub session: &'a Session,
    pub ship: &'a Ship,
    pub bullets: Vec<&'a Bullet>,
    pub asteroids: &'a [Asteroid],
    pub boss: Option<&'a Boss>,
    pub dust: &'a [DustMote],
    pub particles: &'a [Particle],
    pub popups: &'a [ScorePopup],
    pub shake: &'a ScreenShake,
    pub flash: &'a ScreenFlash,
    pub events: &'a [GameEvent],
}
