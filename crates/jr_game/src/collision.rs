//! Player-versus-world collision resolution.
//!
//! Resolution is **axis-separated**: the controller moves along X and calls
//! these with only `vx` set, then moves along Y and calls them again with
//! only `vy` set. The side to snap to is chosen from the sign of the velocity
//! passed in, never from penetration depth, so each call corrects exactly the
//! axis that just moved.

use jr_core::Rect;

use crate::entities::{Enemy, JumpPad, Platform};
use crate::mask::CollisionMask;

/// Horizontal tolerance of the resting-on-pad check.
const PAD_REACH: i32 = 30;

/// Returns true when the bottom edge was snapped onto a platform top.
pub fn resolve_platforms(body: &mut Rect, vx: f32, vy: f32, platforms: &[Platform]) -> bool {
    let mut landed = false;
    for platform in platforms {
        let p = &platform.rect;
        if !body.intersects(p) {
            continue;
        }
        if vx > 0.0 {
            body.set_right(p.left());
        }
        if vx < 0.0 {
            body.set_left(p.right());
        }
        if vy > 0.0 {
            body.set_bottom(p.top());
            landed = true;
        }
        if vy < 0.0 {
            body.set_top(p.bottom());
        }
    }
    landed
}

/// Returns true when any pad launches the body.
///
/// Two independent triggers: falling into a pad (snapped onto its top), or
/// resting exactly on its top within `PAD_REACH` of its left edge, which
/// catches a body that ended the previous frame already on the pad.
pub fn resolve_jump_pads(body: &mut Rect, vy: f32, pads: &[JumpPad]) -> bool {
    let mut launched = false;
    for pad in pads {
        let p = &pad.rect;
        if body.intersects(p) && vy > 0.0 {
            body.set_bottom(p.top());
            launched = true;
        }
        let near = p.left() - PAD_REACH < body.left() && body.left() < p.left() + PAD_REACH;
        if near && body.bottom() == p.top() {
            launched = true;
        }
    }
    launched
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnemyContact {
    pub kills: u32,
    pub fatal: bool,
}

/// Mask-test the body against every enemy.
///
/// Falling onto an enemy kills it. Any horizontal motion into one is fatal,
/// and so is an overlap while both velocities are zero: an enemy walking into
/// a standing player is not safe. Rising into an enemy does nothing.
pub fn resolve_enemies(
    body: &Rect,
    body_mask: &CollisionMask,
    vx: f32,
    vy: f32,
    enemies: &mut Vec<Enemy>,
    enemy_mask: &CollisionMask,
) -> EnemyContact {
    let mut contact = EnemyContact::default();
    enemies.retain(|enemy| {
        let offset = (enemy.rect.x - body.x, enemy.rect.y - body.y);
        if !body_mask.overlaps(enemy_mask, offset) {
            return true;
        }
        if vx != 0.0 || (vx == 0.0 && vy == 0.0) {
            contact.fatal = true;
        }
        if vy > 0.0 {
            contact.kills += 1;
            log::debug!("Enemy stomped at ({}, {})", enemy.rect.x, enemy.rect.y);
            return false;
        }
        true
    });
    contact
}

/// Remove every item the body touches and return how many were taken.
pub fn take_touching<T>(body: &Rect, items: &mut Vec<T>, rect_of: impl Fn(&T) -> &Rect) -> u32 {
    let before = items.len();
    items.retain(|item| !body.intersects(rect_of(item)));
    (before - items.len()) as u32
}

pub fn touches_any<'a>(body: &Rect, mut rects: impl Iterator<Item = &'a Rect>) -> bool {
    rects.any(|r| body.intersects(r))
}
