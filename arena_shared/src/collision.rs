//! Collision tests.
//!
//! Bullet hits use an axis-aligned box of side `player.size` centered on the
//! player. Iteration stops at the first qualifying player, so a bullet hits
//! at most one player per tick (known limitation, kept deliberately). AOE
//! targeting collects every qualifying player before any effect is applied.

use crate::boost::Boost;
use crate::bullet::Bullet;
use crate::math::Coordinate;
use crate::player::{Player, PlayerId};
use crate::shape::Shape;

/// Point-in-AABB test against the box of side `player.size` centered on the
/// player.
pub fn point_in_player_box(point: Coordinate, player: &Player) -> bool {
    let half = player.size / 2.0;
    point.x >= player.coordinate.x - half
        && point.x <= player.coordinate.x + half
        && point.y >= player.coordinate.y - half
        && point.y <= player.coordinate.y + half
}

/// First player the bullet is inside, excluding its owner and anyone
/// blocking.
pub fn bullet_hit(bullet: &Bullet, players: &[Player]) -> Option<PlayerId> {
    players
        .iter()
        .find(|p| p.id != bullet.owner && !p.blocking && point_in_player_box(bullet.current, p))
        .map(|p| p.id)
}

/// Every player inside the shape, excluding the caster and anyone blocking.
/// The full set is collected before any effect applies, so application is
/// order-independent within the tick.
pub fn aoe_targets(
    caster: PlayerId,
    shape: Shape,
    anchor: Coordinate,
    rotation: f32,
    players: &[Player],
) -> Vec<PlayerId> {
    players
        .iter()
        .filter(|p| p.id != caster && !p.blocking && shape.contains(anchor, rotation, p.coordinate))
        .map(|p| p.id)
        .collect()
}

/// Pickup test: the player's coordinate inside the boost's own bounding box.
pub fn player_over_boost(player: &Player, boost: &Boost) -> bool {
    let half = boost.size / 2.0;
    player.coordinate.x >= boost.coordinate.x - half
        && player.coordinate.x <= boost.coordinate.x + half
        && player.coordinate.y >= boost.coordinate.y - half
        && player.coordinate.y <= boost.coordinate.y + half
}
