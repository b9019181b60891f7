//! Bullet entity.

use serde::{Deserialize, Serialize};

use crate::math::Coordinate;
use crate::movement;
use crate::player::PlayerId;

/// Distance a bullet covers per tick.
pub const BULLET_SPEED: f32 = 10.0;
/// Hp removed from a player hit by a bullet.
pub const BULLET_DAMAGE: f32 = 10.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub origin: Coordinate,
    pub current: Coordinate,
    pub destination: Coordinate,
    pub speed: f32,
    pub alive: bool,
    /// Weak back-reference: the owner may have disconnected, in which case
    /// lookups resolve to absent and the bullet flies on.
    pub owner: PlayerId,
}

impl Bullet {
    pub fn new(owner: PlayerId, origin: Coordinate, destination: Coordinate) -> Self {
        Self {
            origin,
            current: origin,
            destination,
            speed: BULLET_SPEED,
            alive: true,
            owner,
        }
    }

    /// One seek step toward the fixed destination; arrival kills the bullet.
    pub fn advance(&mut self) {
        self.current = movement::advance(self.current, self.destination, self.speed);
        if self.current == self.destination {
            self.alive = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bullet_dies_exactly_on_arrival() {
        let mut bullet = Bullet::new(
            PlayerId(1),
            Coordinate::ZERO,
            Coordinate::new(100.0, 0.0),
        );
        for _ in 0..9 {
            bullet.advance();
            assert!(bullet.alive);
        }
        bullet.advance();
        assert!(!bullet.alive);
        assert_eq!(bullet.current, Coordinate::new(100.0, 0.0));
    }
}
