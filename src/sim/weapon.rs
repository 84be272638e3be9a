//! Weapon catalog
//!
//! Four score-gated weapons. Each kind indexes a static [`WeaponSpec`] table.

use serde::{Deserialize, Serialize};

/// Weapon kinds, in unlock order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WeaponKind {
    #[default]
    Plasma,
    Missile,
    Laser,
    Spread,
}

/// Static configuration for one weapon
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeaponSpec {
    pub name: &'static str,
    /// RGB colour for projectiles and the HUD
    pub color: u32,
    /// Projectile speed (pixels/tick)
    pub speed: f32,
    /// Projectile radius
    pub size: f32,
    /// Projectile lifetime (ticks)
    pub life: u32,
    /// Ticks between shots
    pub cooldown: u32,
    /// Angle between adjacent projectiles of one shot (radians)
    pub spread: f32,
    /// Projectiles per shot
    pub count: u32,
    pub damage: i32,
    /// Score required before the weapon can be selected
    pub unlock_score: u64,
}

const WEAPONS: [WeaponSpec; 4] = [
    WeaponSpec {
        name: "PLASMA",
        color: 0xff00ff,
        speed: 6.0,
        size: 5.0,
        life: 40,
        cooldown: 25,
        spread: 0.0,
        count: 1,
        damage: 3,
        unlock_score: 0,
    },
    WeaponSpec {
        name: "MISSILE",
        color: 0xff6600,
        speed: 5.0,
        size: 4.0,
        life: 120,
        cooldown: 35,
        spread: 0.0,
        count: 1,
        damage: 5,
        unlock_score: 500,
    },
    WeaponSpec {
        name: "LASER",
        color: 0x00ffff,
        speed: 8.0,
        size: 3.0,
        life: 90,
        cooldown: 15,
        spread: 0.0,
        count: 1,
        damage: 7,
        unlock_score: 1500,
    },
    WeaponSpec {
        name: "SPREAD",
        color: 0xffff00,
        speed: 7.0,
        size: 2.0,
        life: 60,
        cooldown: 20,
        spread: 0.3,
        count: 3,
        damage: 2,
        unlock_score: 3000,
    },
];

impl WeaponKind {
    pub const ALL: [WeaponKind; 4] = [
        WeaponKind::Plasma,
        WeaponKind::Missile,
        WeaponKind::Laser,
        WeaponKind::Spread,
    ];

    #[inline]
    pub fn spec(self) -> &'static WeaponSpec {
        &WEAPONS[self as usize]
    }

    pub fn is_unlocked(self, score: u64) -> bool {
        score >= self.spec().unlock_score
    }

    /// All weapons available at `score`, in catalog order
    pub fn unlocked(score: u64) -> impl Iterator<Item = WeaponKind> {
        Self::ALL.into_iter().filter(move |w| w.is_unlocked(score))
    }

    /// Next unlocked weapon after this one, wrapping around.
    ///
    /// A weapon that is no longer unlocked (score reset) cycles to the first
    /// unlocked entry.
    pub fn next_unlocked(self, score: u64) -> WeaponKind {
        let unlocked: Vec<WeaponKind> = Self::unlocked(score).collect();
        match unlocked.iter().position(|&w| w == self) {
            Some(i) => unlocked[(i + 1) % unlocked.len()],
            None => unlocked.first().copied().unwrap_or_default(),
        }
    }

    /// Angular offset of projectile `index` within one shot
    pub fn spread_offset(self, index: u32) -> f32 {
        let spec = self.spec();
        if spec.count > 1 {
            spec.spread * (index as f32 - (spec.count - 1) as f32 / 2.0)
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_indexed_by_kind() {
        assert_eq!(WeaponKind::Plasma.spec().name, "PLASMA");
        assert_eq!(WeaponKind::Spread.spec().count, 3);
        assert_eq!(WeaponKind::Laser.spec().damage, 7);
    }

    #[test]
    fn test_unlock_thresholds() {
        assert_eq!(WeaponKind::unlocked(0).count(), 1);
        assert_eq!(WeaponKind::unlocked(500).count(), 2);
        assert_eq!(WeaponKind::unlocked(2999).count(), 3);
        assert_eq!(WeaponKind::unlocked(3000).count(), 4);
    }

    #[test]
    fn test_cycle_wraps_over_unlocked_only() {
        assert_eq!(WeaponKind::Plasma.next_unlocked(0), WeaponKind::Plasma);
        assert_eq!(WeaponKind::Plasma.next_unlocked(600), WeaponKind::Missile);
        assert_eq!(WeaponKind::Missile.next_unlocked(600), WeaponKind::Plasma);
        assert_eq!(WeaponKind::Spread.next_unlocked(5000), WeaponKind::Plasma);
        // Locked current weapon falls back to the first unlocked one
        assert_eq!(WeaponKind::Laser.next_unlocked(0), WeaponKind::Plasma);
    }

    #[test]
    fn test_spread_is_symmetric() {
        let w = WeaponKind::Spread;
        assert!((w.spread_offset(0) + 0.3).abs() < 1e-6);
        assert_eq!(w.spread_offset(1), 0.0);
        assert!((w.spread_offset(2) - 0.3).abs() < 1e-6);
        assert_eq!(WeaponKind::Laser.spread_offset(0), 0.0);
    }
}
