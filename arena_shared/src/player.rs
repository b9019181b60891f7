//! Player entity.

use serde::{Deserialize, Serialize};

use crate::boost::{ActiveBoost, BoostKind};
use crate::math::{Coordinate, Dimension, Vec2};
use crate::profession::Profession;
use crate::spell::{Special, Spell, SpellAction};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u32);

#[derive(Debug, Clone)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// `#rrggbb`, server-assigned.
    pub color: String,
    pub profession: Profession,
    pub coordinate: Coordinate,
    /// Last received pointer coordinate; seek movement heads here.
    pub target: Coordinate,
    /// Facing angle in radians, refreshed when the target moves.
    pub rotation: f32,
    pub base_speed: f32,
    /// Current speed: base plus any active boost delta.
    pub speed: f32,
    pub hp: f32,
    pub max_hp: f32,
    pub size: f32,
    pub score: u32,
    /// Client window dimension from the join command.
    pub viewport: Dimension,
    /// At most one boost effect at a time.
    pub boost: Option<ActiveBoost>,
    /// Ordered: basic attack, spell1, spell2.
    pub spells: Vec<Spell>,
    pub special: Special,
    /// Transient immunity while a Block special travels; collision checks
    /// against a blocking player are discarded, never queued.
    pub blocking: bool,
}

impl Player {
    pub fn new(
        id: PlayerId,
        name: String,
        color: String,
        profession: Profession,
        coordinate: Coordinate,
        viewport: Dimension,
        tick_hz: u32,
    ) -> Self {
        let hp = profession.base_hp();
        let speed = profession.base_speed();
        Self {
            id,
            name,
            color,
            profession,
            coordinate,
            target: coordinate,
            rotation: 0.0,
            base_speed: speed,
            speed,
            hp,
            max_hp: hp,
            size: profession.size(),
            score: 0,
            viewport,
            boost: None,
            spells: profession.spells(tick_hz),
            special: profession.special(tick_hz),
            blocking: false,
        }
    }

    pub fn spell(&self, action: SpellAction) -> Option<&Spell> {
        self.spells.iter().find(|s| s.action == action)
    }

    pub fn spell_mut(&mut self, action: SpellAction) -> Option<&mut Spell> {
        self.spells.iter_mut().find(|s| s.action == action)
    }

    /// Facing angle toward `target`, or the current rotation when standing
    /// exactly on it.
    pub fn facing_toward(&self, target: Coordinate) -> f32 {
        let v = Vec2::between(self.coordinate, target);
        if v.magnitude() > 0.0 {
            v.angle()
        } else {
            self.rotation
        }
    }

    /// Applies a boost effect, first fully reversing any held one so the
    /// modifier never compounds.
    pub fn apply_boost(&mut self, kind: BoostKind) {
        self.clear_boost();
        let delta = kind.speed_delta();
        self.speed += delta;
        self.boost = Some(ActiveBoost { kind, delta });
    }

    /// Reverses the held boost effect, if any.
    pub fn clear_boost(&mut self) {
        if let Some(active) = self.boost.take() {
            self.speed -= active.delta;
        }
    }

    pub fn heal(&mut self, amount: f32) {
        self.hp = (self.hp + amount).min(self.max_hp);
    }

    /// Removes hp, clamped at zero. Returns true when the hit is fatal.
    pub fn take_damage(&mut self, amount: f32) -> bool {
        self.hp = (self.hp - amount).max(0.0);
        self.hp == 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_player() -> Player {
        Player::new(
            PlayerId(1),
            "Tester".to_string(),
            "#ff0000".to_string(),
            Profession::Warrior,
            Coordinate::new(100.0, 100.0),
            Dimension::new(800.0, 600.0),
            30,
        )
    }

    #[test]
    fn boost_never_compounds() {
        let mut player = test_player();
        let base = player.speed;
        player.apply_boost(BoostKind::Speed);
        assert_eq!(player.speed, base + 1.0);
        // A second pickup reverses the first delta before applying its own.
        player.apply_boost(BoostKind::Speed);
        assert_eq!(player.speed, base + 1.0);
        player.clear_boost();
        assert_eq!(player.speed, base);
        assert!(player.boost.is_none());
    }

    #[test]
    fn heal_clamps_at_max_hp() {
        let mut player = test_player();
        player.hp = player.max_hp - 1.0;
        player.heal(50.0);
        assert_eq!(player.hp, player.max_hp);
    }

    #[test]
    fn damage_clamps_at_zero_and_reports_fatal() {
        let mut player = test_player();
        assert!(!player.take_damage(10.0));
        assert_eq!(player.hp, player.max_hp - 10.0);
        assert!(player.take_damage(1000.0));
        assert_eq!(player.hp, 0.0);
    }

    #[test]
    fn facing_keeps_rotation_when_target_is_self() {
        let mut player = test_player();
        player.rotation = 1.0;
        assert_eq!(player.facing_toward(player.coordinate), 1.0);
        let ahead = Coordinate::new(player.coordinate.x + 10.0, player.coordinate.y);
        assert_eq!(player.facing_toward(ahead), 0.0);
    }
}
