//! Circle collision detection and response
//!
//! Every body in the game is a circle. Detection is a centre-distance test;
//! response between two asteroids is a lossy equal-mass impulse along the
//! contact normal followed by positional separation.

use glam::Vec2;

/// Contact between two overlapping circles
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Unit normal pointing from the first body toward the second
    pub normal: Vec2,
    /// Sum of radii minus centre distance (always > 0)
    pub overlap: f32,
}

/// Compute the contact between two circles.
///
/// Returns `None` when the circles do not overlap, or when their centres
/// coincide exactly (no normal can be defined).
pub fn circle_contact(a: Vec2, ra: f32, b: Vec2, rb: f32) -> Option<Contact> {
    let delta = b - a;
    let dist = delta.length();
    let min_dist = ra + rb;
    if dist >= min_dist || dist <= 0.0 {
        return None;
    }
    Some(Contact {
        normal: delta / dist,
        overlap: min_dist - dist,
    })
}

/// Closing speed along the contact normal (positive when approaching)
#[inline]
pub fn closing_speed(vel_a: Vec2, vel_b: Vec2, normal: Vec2) -> f32 {
    (vel_a - vel_b).dot(normal)
}

/// Resolve an equal-mass impact between two bodies in place.
///
/// Bodies already separating are left untouched. Otherwise each velocity
/// changes by `restitution * closing_speed` along the normal and the positions
/// are pushed apart by half the overlap each. Returns true if resolved.
pub fn resolve_elastic(
    pos_a: &mut Vec2,
    vel_a: &mut Vec2,
    pos_b: &mut Vec2,
    vel_b: &mut Vec2,
    contact: Contact,
    restitution: f32,
) -> bool {
    let dvn = closing_speed(*vel_a, *vel_b, contact.normal);
    if dvn <= 0.0 {
        return false;
    }

    let impulse = contact.normal * (dvn * restitution);
    *vel_a -= impulse;
    *vel_b += impulse;

    let push = contact.normal * (contact.overlap / 2.0);
    *pos_a -= push;
    *pos_b += push;
    true
}
