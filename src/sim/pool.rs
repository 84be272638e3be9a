//! Bullet arena
//!
//! A fixed-capacity slot array plus a stack of free slot indices. Slots are
//! never moved, so releasing a bullet mid-iteration cannot disturb the index
//! of any other bullet, and a stale or repeated release is simply ignored.

use std::collections::VecDeque;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::weapon::WeaponKind;
use crate::Bounds;
use crate::consts::BULLET_EDGE_MARGIN;

/// Number of past positions kept for the trail
pub const TRAIL_LENGTH: usize = 8;

/// Handle to a live bullet slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BulletId(pub usize);

/// A projectile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Ticks left before expiry
    pub life: u32,
    pub radius: f32,
    pub weapon: WeaponKind,
    pub damage: i32,
    /// Most recent positions, oldest first
    pub trail: VecDeque<Vec2>,
}

impl Default for Bullet {
    fn default() -> Self {
        Self {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            life: 0,
            radius: 0.0,
            weapon: WeaponKind::Plasma,
            damage: 0,
            trail: VecDeque::with_capacity(TRAIL_LENGTH + 1),
        }
    }
}

impl Bullet {
    /// Record the current position, dropping the oldest beyond TRAIL_LENGTH
    fn record_trail(&mut self) {
        self.trail.push_back(self.pos);
        while self.trail.len() > TRAIL_LENGTH {
            self.trail.pop_front();
        }
    }
}

/// Parameters for a freshly fired bullet
#[derive(Debug, Clone, Copy)]
pub struct BulletSpawn {
    pub pos: Vec2,
    pub vel: Vec2,
    pub life: u32,
    pub radius: f32,
    pub weapon: WeaponKind,
    pub damage: i32,
}

/// Fixed-capacity bullet arena with a free-index stack
#[derive(Debug, Clone)]
pub struct BulletPool {
    slots: Vec<Bullet>,
    alive: Vec<bool>,
    /// Free slot indices; the top of the stack is reused first
    free: Vec<usize>,
}

impl BulletPool {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: (0..capacity).map(|_| Bullet::default()).collect(),
            alive: vec![false; capacity],
            // Reverse so slot 0 is handed out first
            free: (0..capacity).rev().collect(),
        }
    }

    /// Total number of slots
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of live bullets
    pub fn len(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of slots waiting on the free stack
    pub fn free_len(&self) -> usize {
        self.free.len()
    }

    /// Take a free slot and initialise it. Returns `None` when every slot is live.
    pub fn acquire(&mut self, spawn: BulletSpawn) -> Option<BulletId> {
        let index = self.free.pop()?;
        let bullet = &mut self.slots[index];
        bullet.pos = spawn.pos;
        bullet.vel = spawn.vel;
        bullet.life = spawn.life;
        bullet.radius = spawn.radius;
        bullet.weapon = spawn.weapon;
        bullet.damage = spawn.damage;
        bullet.trail.clear();
        bullet.trail.push_back(spawn.pos);
        self.alive[index] = true;
        Some(BulletId(index))
    }

    /// Return a bullet's slot to the free stack.
    ///
    /// Returns false (and does nothing) if the id is out of range or already free.
    pub fn release(&mut self, id: BulletId) -> bool {
        match self.alive.get_mut(id.0) {
            Some(alive) if *alive => {
                *alive = false;
                self.free.push(id.0);
                true
            }
            _ => false,
        }
    }

    /// Release every live bullet
    pub fn clear(&mut self) {
        for index in 0..self.slots.len() {
            self.release(BulletId(index));
        }
    }

    pub fn get(&self, id: BulletId) -> Option<&Bullet> {
        match self.alive.get(id.0) {
            Some(true) => self.slots.get(id.0),
            _ => None,
        }
    }

    /// Live bullets in slot order
    pub fn iter(&self) -> impl Iterator<Item = (BulletId, &Bullet)> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(i, _)| self.alive[*i])
            .map(|(i, b)| (BulletId(i), b))
    }

    /// Snapshot of live ids, for loops that release while iterating
    pub fn ids(&self) -> Vec<BulletId> {
        self.iter().map(|(id, _)| id).collect()
    }

    /// Advance every live bullet one tick.
    ///
    /// Bullets do not wrap: they are released once past the edge margin or
    /// when their life runs out. Returns the number released.
    pub fn update(&mut self, bounds: Bounds) -> usize {
        let mut expired = 0;
        for index in 0..self.slots.len() {
            if !self.alive[index] {
                continue;
            }
            let bullet = &mut self.slots[index];
            bullet.record_trail();
            bullet.pos += bullet.vel;
            bullet.life = bullet.life.saturating_sub(1);

            if bullet.life == 0 || bounds.is_outside(bullet.pos, BULLET_EDGE_MARGIN) {
                self.release(BulletId(index));
                expired += 1;
            }
        }
        expired
    }
}
