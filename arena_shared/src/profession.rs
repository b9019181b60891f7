//! Profession loadouts.
//!
//! A profession is configuration, not behavior: stat defaults plus a fixed
//! list of spell records. Everything a profession does lives in its
//! shape + effect + timing data.

use serde::{Deserialize, Serialize};

use crate::effect::Effect;
use crate::shape::Shape;
use crate::spell::{Special, Spell, SpellAction, Targeting};

/// Seconds the warrior dash travels; its per-tick speed derives from
/// distance / travel ticks.
pub const DASH_TRAVEL_SECS: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Profession {
    Warrior,
}

impl Profession {
    pub fn base_hp(self) -> f32 {
        match self {
            Profession::Warrior => 140.0,
        }
    }

    pub fn base_speed(self) -> f32 {
        match self {
            Profession::Warrior => 4.0,
        }
    }

    pub fn size(self) -> f32 {
        match self {
            Profession::Warrior => 25.0,
        }
    }

    /// Builds the ordered spell list (basic attack, spell1, spell2).
    /// Timings are authored in seconds and converted at the world tick rate.
    pub fn spells(self, tick_hz: u32) -> Vec<Spell> {
        match self {
            Profession::Warrior => vec![
                Spell::new(
                    "Sword strike",
                    "PushBack the enemies in front of you",
                    1.25,
                    1.25,
                    10.0,
                    Shape::SemiCircle { radius: 50.0 },
                    Effect::PushBack,
                    Targeting::OnCharacter,
                    SpellAction::BasicAttack,
                    tick_hz,
                ),
                Spell::new(
                    "Sword swing",
                    "PushBack the enemies around you",
                    0.75,
                    4.0,
                    40.0,
                    Shape::Circle { radius: 50.0 },
                    Effect::PushBack,
                    Targeting::OnCharacter,
                    SpellAction::Spell1,
                    tick_hz,
                ),
                Spell::new(
                    "Sword slash",
                    "Heal yourself (1% of each enemy's hp)",
                    1.0,
                    2.5,
                    15.0,
                    Shape::Rectangle {
                        width: 125.0,
                        length: 25.0,
                    },
                    Effect::Heal,
                    Targeting::OnCharacter,
                    SpellAction::Spell2,
                    tick_hz,
                ),
            ],
        }
    }

    pub fn special(self, tick_hz: u32) -> Special {
        match self {
            Profession::Warrior => Special::new(
                "Dash for my life",
                "Dash forward (block all incoming damage during the dash)",
                15.0,
                200.0,
                DASH_TRAVEL_SECS,
                Effect::Block,
                Targeting::OnCharacter,
                tick_hz,
            ),
        }
    }
}
