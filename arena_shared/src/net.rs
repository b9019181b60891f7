//! Protocol types at the transport boundary.
//!
//! Goals:
//! - Typed inbound commands and outbound snapshot messages.
//! - Keep serialization explicit so a transport layer can frame messages
//!   without depending on `serde_json` itself.
//!
//! The transport/session layer is an external collaborator; these types are
//! its contract with the simulation core. View structs carry exactly the
//! fields a client renders, so runtime-only state stays off the wire by
//! construction.

use anyhow::Context;
use bytes::Bytes;
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::boost::{Boost, BoostId, BoostKind};
use crate::bullet::Bullet;
use crate::effect::Effect;
use crate::math::{Coordinate, Dimension};
use crate::player::{Player, PlayerId};
use crate::shape::Shape;
use crate::spell::{Invocation, Special, Spell, SpellAction, Targeting};

/// Inbound command from one player's session. Ephemeral: consumed exactly
/// once per tick, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Command {
    /// Sets the issuing player's seek target.
    Moving { target: Coordinate },
    /// Fires a bullet from the player's coordinate toward the target.
    Shoot { target: Coordinate },
    /// Requests a cast by action slot.
    Spell {
        action: SpellAction,
        target: Option<Coordinate>,
    },
    /// Requests the player's special ability.
    Special { target: Option<Coordinate> },
}

impl Command {
    /// Structural sanity only: every carried coordinate must be finite.
    /// Malformed commands are dropped, never errors.
    pub fn is_well_formed(&self) -> bool {
        match self {
            Command::Moving { target } | Command::Shoot { target } => target.is_finite(),
            Command::Spell { target, .. } | Command::Special { target } => {
                target.map_or(true, |t| t.is_finite())
            }
        }
    }
}

// ─── Outbound messages ───

/// Sent once, on join.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Welcome {
    pub id: PlayerId,
    pub dimension: Dimension,
    pub player: PlayerView,
}

/// Broadcast every tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Update {
    pub tick: u64,
    pub players: Vec<PlayerView>,
    pub bullets: Vec<BulletView>,
    pub boosts: Vec<BoostView>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerView {
    pub id: PlayerId,
    pub name: String,
    pub color: String,
    pub coordinate: Coordinate,
    pub rotation: f32,
    pub hp: f32,
    pub max_hp: f32,
    pub score: u32,
    pub spells: Vec<SpellView>,
    pub special: SpecialView,
}

impl PlayerView {
    pub fn of(player: &Player) -> Self {
        Self {
            id: player.id,
            name: player.name.clone(),
            color: player.color.clone(),
            coordinate: player.coordinate,
            rotation: player.rotation,
            hp: player.hp,
            max_hp: player.max_hp,
            score: player.score,
            spells: player.spells.iter().map(SpellView::of).collect(),
            special: SpecialView::of(&player.special),
        }
    }
}

/// Spell definitions ride along with the live counters because clients draw
/// cast indicators and cooldown bars from the same broadcast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpellView {
    pub name: String,
    pub action: SpellAction,
    pub shape: Shape,
    pub effect: Effect,
    pub targeting: Targeting,
    pub remaining_cast: u32,
    pub remaining_cooldown: u32,
    /// Live anchor/rotation while casting.
    pub invocation: Option<Invocation>,
}

impl SpellView {
    pub fn of(spell: &Spell) -> Self {
        Self {
            name: spell.name.clone(),
            action: spell.action,
            shape: spell.shape,
            effect: spell.effect,
            targeting: spell.targeting,
            remaining_cast: spell.remaining_cast,
            remaining_cooldown: spell.remaining_cooldown,
            invocation: spell.invocation,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecialView {
    pub name: String,
    pub effect: Effect,
    pub targeting: Targeting,
    pub remaining_cast: u32,
    pub remaining_cooldown: u32,
    pub invocation: Option<Invocation>,
}

impl SpecialView {
    pub fn of(special: &Special) -> Self {
        Self {
            name: special.name.clone(),
            effect: special.effect,
            targeting: special.targeting,
            remaining_cast: special.remaining_cast,
            remaining_cooldown: special.remaining_cooldown,
            invocation: special.invocation,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulletView {
    pub coordinate: Coordinate,
    pub alive: bool,
}

impl BulletView {
    pub fn of(bullet: &Bullet) -> Self {
        Self {
            coordinate: bullet.current,
            alive: bullet.alive,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoostView {
    pub id: BoostId,
    pub coordinate: Coordinate,
    pub kind: BoostKind,
}

impl BoostView {
    pub fn of(boost: &Boost) -> Self {
        Self {
            id: boost.id,
            coordinate: boost.coordinate,
            kind: boost.kind,
        }
    }
}

// ─── Codec helpers ───

pub fn encode_to_bytes<T: Serialize>(msg: &T) -> anyhow::Result<Bytes> {
    let payload = serde_json::to_vec(msg).context("serialize")?;
    Ok(Bytes::from(payload))
}

pub fn decode_from_bytes<T: DeserializeOwned>(b: &[u8]) -> anyhow::Result<T> {
    serde_json::from_slice(b).context("deserialize")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_roundtrip_bytes() {
        let cmd = Command::Spell {
            action: SpellAction::Spell1,
            target: Some(Coordinate::new(10.0, 20.0)),
        };
        let bytes = encode_to_bytes(&cmd).unwrap();
        let back: Command = decode_from_bytes(&bytes).unwrap();
        assert_eq!(cmd, back);
    }

    #[test]
    fn action_slots_use_wire_names() {
        let json = serde_json::to_string(&SpellAction::BasicAttack).unwrap();
        assert_eq!(json, r#""basicAttack""#);
        assert_eq!(
            serde_json::to_string(&SpellAction::Spell1).unwrap(),
            r#""spell1""#
        );
    }

    #[test]
    fn non_finite_coordinates_are_malformed() {
        let bad = Command::Moving {
            target: Coordinate::new(f32::NAN, 0.0),
        };
        assert!(!bad.is_well_formed());
        let fine = Command::Special { target: None };
        assert!(fine.is_well_formed());
    }
}
