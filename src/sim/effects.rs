//! Visual feedback state: particles, score popups, screen shake and flash
//!
//! None of this feeds back into gameplay. It draws from its own RNG stream so
//! that toggling an effect in [`Settings`] never changes what the gameplay RNG
//! produces.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::Settings;
use crate::consts::{POPUP_LIFE, POPUP_RISE_SPEED};
use crate::direction;

/// Particle colours (RGB)
pub mod colors {
    pub const WHITE: u32 = 0xffffff;
    pub const ORANGE: u32 = 0xffa500;
    pub const YELLOW: u32 = 0xffff00;
    pub const RED: u32 = 0xff3300;
    pub const DUST: u32 = 0x8a7f70;
}

/// A particle for visual effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: u32,
    /// Ticks remaining
    pub life: u32,
    pub size: f32,
}

/// Shape of a particle burst
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Burst {
    pub count: u32,
    pub color: u32,
    /// Maximum particle speed
    pub speed: f32,
    /// Maximum extra lifetime on top of the 10-tick floor
    pub life: u32,
}

impl Burst {
    pub const HIT_SPARK: Burst = Burst::new(5, colors::YELLOW, 2.0, 15);
    pub const HIT_FLASH: Burst = Burst::new(8, colors::ORANGE, 2.5, 20);
    pub const BOSS_HIT: Burst = Burst::new(10, colors::ORANGE, 3.0, 25);
    pub const SHIP_HIT: Burst = Burst::new(30, colors::ORANGE, 4.0, 50);
    pub const SHIP_DESTROYED: Burst = Burst::new(50, colors::YELLOW, 5.0, 60);
    pub const DUST_PUFF: Burst = Burst::new(12, colors::DUST, 1.5, 30);
    pub const BOSS_DEATH: [Burst; 3] = [
        Burst::new(60, colors::ORANGE, 6.0, 60),
        Burst::new(40, colors::YELLOW, 4.0, 50),
        Burst::new(30, colors::WHITE, 8.0, 40),
    ];

    pub const fn new(count: u32, color: u32, speed: f32, life: u32) -> Burst {
        Burst {
            count,
            color,
            speed,
            life,
        }
    }

    /// Explosion for a destroyed asteroid, scaled by tier
    pub fn asteroid_explosion(tier: u8) -> Burst {
        Burst::new(tier as u32 * 8, colors::WHITE, 2.0 + tier as f32, 40)
    }
}

/// Floating "+points" text
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScorePopup {
    pub pos: Vec2,
    pub score: u64,
    pub life: u32,
}

/// Camera shake
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScreenShake {
    pub intensity: f32,
    /// Ticks remaining
    pub duration: u32,
    /// Offset to apply to the camera this frame
    pub offset: Vec2,
}

impl ScreenShake {
    /// Start a shake unless a stronger one is already running
    pub fn trigger(&mut self, intensity: f32, duration: u32) {
        if self.duration == 0 || intensity >= self.intensity {
            self.intensity = intensity;
            self.duration = duration;
        }
    }

    fn update(&mut self, rng: &mut impl Rng) {
        if self.duration > 0 {
            self.offset = Vec2::new(
                (rng.random::<f32>() - 0.5) * self.intensity * 2.0,
                (rng.random::<f32>() - 0.5) * self.intensity * 2.0,
            );
            self.duration -= 1;
            self.intensity *= 0.9;
        } else {
            self.offset = Vec2::ZERO;
            self.intensity = 0.0;
        }
    }

    pub fn is_active(&self) -> bool {
        self.duration > 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FlashColor {
    #[default]
    White,
    Red,
}

/// Full-screen colour flash
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScreenFlash {
    pub alpha: f32,
    pub color: FlashColor,
}

impl ScreenFlash {
    pub const START_ALPHA: f32 = 0.5;
    pub const FADE_PER_TICK: f32 = 0.02;

    pub fn trigger(&mut self, color: FlashColor) {
        self.alpha = Self::START_ALPHA;
        self.color = color;
    }

    fn update(&mut self) {
        self.alpha = (self.alpha - Self::FADE_PER_TICK).max(0.0);
    }
}

/// All presentation feedback owned by the world
#[derive(Debug, Clone, Default)]
pub struct Effects {
    pub particles: Vec<Particle>,
    pub popups: Vec<ScorePopup>,
    pub shake: ScreenShake,
    pub flash: ScreenFlash,
}

impl Effects {
    /// Emit a burst of particles at `pos`, up to the settings' particle cap
    pub fn burst(&mut self, rng: &mut impl Rng, settings: &Settings, pos: Vec2, burst: Burst) {
        let cap = settings.max_particles();
        for _ in 0..burst.count {
            if self.particles.len() >= cap {
                break;
            }
            let angle = rng.random::<f32>() * std::f32::consts::TAU;
            let speed = rng.random::<f32>() * burst.speed;
            self.particles.push(Particle {
                pos,
                vel: direction(angle) * speed,
                color: burst.color,
                life: (rng.random::<f32>() * burst.life as f32) as u32 + 10,
                size: rng.random::<f32>() * 3.0 + 1.0,
            });
        }
    }

    pub fn popup(&mut self, settings: &Settings, pos: Vec2, score: u64) {
        if settings.score_popups {
            self.popups.push(ScorePopup {
                pos,
                score,
                life: POPUP_LIFE,
            });
        }
    }

    pub fn shake(&mut self, settings: &Settings, intensity: f32, duration: u32) {
        if settings.effective_screen_shake() {
            self.shake.trigger(intensity, duration);
        }
    }

    pub fn flash(&mut self, settings: &Settings, color: FlashColor) {
        if settings.effective_screen_flash() {
            self.flash.trigger(color);
        }
    }

    /// Advance every effect one tick
    pub fn update(&mut self, rng: &mut impl Rng) {
        for p in &mut self.particles {
            p.pos += p.vel;
            p.vel *= 0.98;
            p.life = p.life.saturating_sub(1);
        }
        self.particles.retain(|p| p.life > 0);

        for popup in &mut self.popups {
            popup.pos.y -= POPUP_RISE_SPEED;
            popup.life = popup.life.saturating_sub(1);
        }
        self.popups.retain(|p| p.life > 0);

        self.shake.update(rng);
        self.flash.update();
    }

    pub fn clear(&mut self) {
        self.particles.clear();
        self.popups.clear();
        self.shake = ScreenShake::default();
        self.flash = ScreenFlash::default();
    }
}
