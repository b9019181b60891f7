//! Boost pickups and their timed effects.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::math::Coordinate;

/// Side of a boost's bounding box in world units.
pub const BOOST_SIZE: f32 = 20.0;
/// Speed added while a speed boost is held.
pub const BOOST_SPEED_DELTA: f32 = 1.0;
/// Seconds an unclaimed boost stays in the world.
pub const BOOST_LIFETIME_SECS: f32 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoostId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoostKind {
    Speed,
}

impl BoostKind {
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        const ALL: [BoostKind; 1] = [BoostKind::Speed];
        ALL[rng.gen_range(0..ALL.len())]
    }

    pub fn speed_delta(self) -> f32 {
        match self {
            BoostKind::Speed => BOOST_SPEED_DELTA,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Boost {
    pub id: BoostId,
    pub coordinate: Coordinate,
    pub kind: BoostKind,
    pub color: String,
    pub size: f32,
    /// Despawns when this reaches zero.
    pub remaining_ticks: u32,
}

impl Boost {
    pub fn new(
        id: BoostId,
        coordinate: Coordinate,
        kind: BoostKind,
        color: String,
        lifetime_ticks: u32,
    ) -> Self {
        Self {
            id,
            coordinate,
            kind,
            color,
            size: BOOST_SIZE,
            remaining_ticks: lifetime_ticks,
        }
    }
}

/// The effect a picked-up boost holds on a player. The recorded delta is
/// what removal subtracts, so the modifier never compounds and never
/// clobbers a profession's base stats.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActiveBoost {
    pub kind: BoostKind,
    pub delta: f32,
}
