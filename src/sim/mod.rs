//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only (presentation effects draw from their own stream)
//! - Stable iteration order
//! - No rendering or platform dependencies

pub mod asteroid;
pub mod boss;
pub mod collision;
pub mod effects;
pub mod pool;
pub mod scoring;
pub mod ship;
pub mod state;
pub mod tick;
pub mod weapon;

pub use asteroid::{Asteroid, AsteroidVisual, DustMote, Tier};
pub use boss::Boss;
pub use collision::{Contact, circle_contact, resolve_elastic};
pub use effects::{Burst, Effects, FlashColor, Particle, ScorePopup, ScreenFlash, ScreenShake};
pub use pool::{Bullet, BulletId, BulletPool, BulletSpawn};
pub use ship::Ship;
pub use state::{GameEvent, GamePhase, GameWorld, Session, Snapshot};
pub use tick::{TickInput, tick};
pub use weapon::{WeaponKind, WeaponSpec};
