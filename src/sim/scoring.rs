//! Collision resolution, damage and scoring
//!
//! Runs once per tick after every body has moved. Bullets are checked against
//! asteroids and then the boss; the ship is checked against solid hazards and
//! then dust, taking at most one hit per tick.

use super::asteroid::{Tier, shed_dust};
use super::boss::Boss;
use super::effects::{Burst, FlashColor};
use super::state::{GameEvent, GameWorld};
use crate::circles_overlap;

/// Base bonus for destroying a boss, plus a per-level bonus
const BOSS_BASE_POINTS: u64 = 100;
const BOSS_POINTS_PER_LEVEL: u64 = 50;

impl GameWorld {
    /// Resolve every collision for this tick. Nothing happens after game over.
    pub fn resolve_collisions(&mut self) {
        if self.session.game_over {
            return;
        }
        self.bullets_vs_asteroids();
        self.bullets_vs_boss();
        if !self.ship_vs_hazards() {
            self.ship_vs_dust();
        }
    }

    /// Each bullet damages at most one asteroid, searching newest first
    fn bullets_vs_asteroids(&mut self) {
        for id in self.bullets.ids() {
            let Some(bullet) = self.bullets.get(id) else {
                continue;
            };
            let (pos, radius, damage) = (bullet.pos, bullet.radius, bullet.damage);

            let Some(index) = self
                .asteroids
                .iter()
                .rposition(|a| circles_overlap(pos, radius, a.pos, a.radius))
            else {
                continue;
            };

            self.bullets.release(id);
            self.effects.burst(&mut self.fx_rng, &self.settings, pos, Burst::HIT_SPARK);

            if self.asteroids[index].apply_damage(damage) {
                self.destroy_asteroid(index);
            } else {
                let asteroid = &self.asteroids[index];
                let (apos, tier) = (asteroid.pos, asteroid.tier);
                self.effects.burst(&mut self.fx_rng, &self.settings, apos, Burst::HIT_FLASH);
                self.events.push(GameEvent::AsteroidHit { pos: apos, tier });
            }
        }
    }

    /// Award points for the asteroid at `index`, remove it and add its fragments
    fn destroy_asteroid(&mut self, index: usize) {
        let asteroid = self.asteroids.remove(index);
        let pos = asteroid.pos;
        let tier = asteroid.tier;
        let points = tier.points();
        self.session.score += points;

        self.effects.popup(&self.settings, pos, points);
        self.effects.burst(
            &mut self.fx_rng,
            &self.settings,
            pos,
            Burst::asteroid_explosion(tier.value()),
        );
        if tier == Tier::Large {
            self.effects.shake(&self.settings, 3.0, 8);
        }

        let level = self.session.level;
        let children =
            asteroid.split(&mut self.rng, self.bounds, self.tuning.asteroid_speed, level);

        if tier == Tier::Large && self.tuning.dust_enabled && level >= self.tuning.dust_min_level {
            let tuning = &self.tuning;
            let motes = shed_dust(
                &mut self.rng,
                pos,
                tuning.dust_per_split,
                tuning.dust_speed,
                tuning.dust_radius,
                tuning.dust_life,
            );
            self.effects.burst(&mut self.fx_rng, &self.settings, pos, Burst::DUST_PUFF);
            self.events.push(GameEvent::DustShed {
                pos,
                count: motes.len() as u32,
            });
            self.dust.extend(motes);
        }

        log::debug!(
            "Asteroid tier {} destroyed at ({:.0}, {:.0}), +{} (score {})",
            tier.value(),
            pos.x,
            pos.y,
            points,
            self.session.score
        );
        self.events.push(GameEvent::AsteroidDestroyed {
            pos,
            tier,
            points,
            children: children.len() as u8,
        });
        self.asteroids.extend(children);
    }

    fn bullets_vs_boss(&mut self) {
        let Some(boss) = self.boss.as_mut() else {
            return;
        };

        for id in self.bullets.ids() {
            if boss.destroyed {
                break;
            }
            let Some(bullet) = self.bullets.get(id) else {
                continue;
            };
            let (pos, damage) = (bullet.pos, bullet.damage);
            if !circles_overlap(pos, bullet.radius, boss.pos, boss.radius) {
                continue;
            }

            self.bullets.release(id);
            if boss.apply_damage(damage) {
                let points = BOSS_BASE_POINTS + BOSS_POINTS_PER_LEVEL * self.session.level as u64;
                self.session.score += points;
                for burst in Burst::BOSS_DEATH {
                    self.effects.burst(&mut self.fx_rng, &self.settings, boss.pos, burst);
                }
                self.effects.popup(&self.settings, boss.pos, points);
                self.effects.shake(&self.settings, 15.0, 40);
                self.effects.flash(&self.settings, FlashColor::White);
                self.events.push(GameEvent::BossDestroyed {
                    pos: boss.pos,
                    points,
                });
                log::info!(
                    "Boss destroyed on level {}, +{} (score {})",
                    self.session.level,
                    points,
                    self.session.score
                );
            } else {
                self.effects.burst(&mut self.fx_rng, &self.settings, pos, Burst::BOSS_HIT);
                self.events.push(GameEvent::BossHit { pos });
            }
        }
    }

    /// Ship against asteroids and the boss. Returns true if the ship was hit.
    fn ship_vs_hazards(&mut self) -> bool {
        if !self.ship.is_vulnerable() {
            return false;
        }
        let (pos, radius) = (self.ship.pos, self.ship.radius);

        let damage = if self
            .asteroids
            .iter()
            .any(|a| circles_overlap(pos, radius, a.pos, a.radius))
        {
            Some(self.tuning.asteroid_damage)
        } else if self
            .boss
            .as_ref()
            .is_some_and(|b| !b.destroyed && circles_overlap(pos, radius, b.pos, b.radius))
        {
            Some(self.tuning.boss_damage)
        } else {
            None
        };

        match damage {
            Some(damage) => self.ship_hit(damage),
            None => false,
        }
    }

    /// Ship against dust; a mote that connects is consumed
    fn ship_vs_dust(&mut self) {
        if !self.ship.is_vulnerable() {
            return;
        }
        let (pos, radius) = (self.ship.pos, self.ship.radius);
        if let Some(i) = self
            .dust
            .iter()
            .position(|m| circles_overlap(pos, radius, m.pos, m.radius))
        {
            self.dust.remove(i);
            self.ship_hit(self.tuning.dust_damage);
        }
    }

    /// Damage the ship. Ignored (returns false) while it is invulnerable or
    /// blinked out.
    ///
    /// A hit that empties HP costs a life: with lives left the ship respawns
    /// at the centre, otherwise the game is over. A survivable hit grants a
    /// short invulnerability window.
    pub fn ship_hit(&mut self, damage: i32) -> bool {
        if !self.ship.is_vulnerable() {
            return false;
        }
        let pos = self.ship.pos;

        self.effects.burst(&mut self.fx_rng, &self.settings, pos, Burst::SHIP_HIT);
        self.effects.shake(&self.settings, 10.0, 20);
        self.effects.flash(&self.settings, FlashColor::Red);
        self.events.push(GameEvent::ShipHit { pos, damage });

        self.ship.hp -= damage;
        if self.ship.hp > 0 {
            self.ship.invulnerable = self.tuning.hit_invulnerability;
            log::debug!("Ship hit for {} ({} hp left)", damage, self.ship.hp);
            return true;
        }

        self.session.lives = self.session.lives.saturating_sub(1);
        self.ship.hp = self.ship.max_hp;
        self.events.push(GameEvent::LifeLost {
            lives_left: self.session.lives,
        });

        if self.session.lives > 0 {
            self.ship.reset(self.bounds, &self.tuning);
            log::info!("Life lost, {} remaining", self.session.lives);
        } else {
            self.session.game_over = true;
            self.effects.burst(&mut self.fx_rng, &self.settings, pos, Burst::SHIP_DESTROYED);
            self.events.push(GameEvent::GameOver {
                score: self.session.score,
            });
            log::info!(
                "Game over on level {} with score {}",
                self.session.level,
                self.session.score
            );
        }
        true
    }

    /// Level flow once the field is clear: spawn the boss, then after it falls
    /// clear it, advance the level and spawn a bigger field.
    pub fn check_progression(&mut self) {
        if self.session.game_over || !self.asteroids.is_empty() {
            return;
        }

        match self.boss.as_ref().map(|b| b.destroyed) {
            None => {
                let boss = Boss::spawn(&mut self.rng, self.bounds, self.session.level);
                log::info!(
                    "Boss spawned on level {} ({} hp)",
                    self.session.level,
                    boss.health
                );
                self.boss = Some(boss);
                self.events.push(GameEvent::BossSpawned {
                    level: self.session.level,
                });
            }
            Some(true) => {
                self.boss = None;
                self.session.level += 1;
                self.spawn_field();
                self.events.push(GameEvent::LevelUp {
                    level: self.session.level,
                });
                log::info!(
                    "Level {} ({} asteroids)",
                    self.session.level,
                    self.asteroids.len()
                );
            }
            Some(false) => {}
        }
    }
}
