//! Spell effect definitions.
//!
//! Effects are pure: functions from a caster, a pre-collected target set,
//! and a magnitude to state mutations. Orchestration (collecting targets,
//! mutating players) stays in the world step so application is
//! order-independent within a tick.

use serde::{Deserialize, Serialize};

use crate::math::{Coordinate, Vec2};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effect {
    /// Displaces each target away from the caster.
    PushBack,
    /// Restores caster hp from the targets' current hp.
    Heal,
    /// Transient immunity on the caster for the cast/travel phase.
    Block,
}

/// Fraction of each target's current hp restored to the caster by a heal.
pub const HEAL_FRACTION: f32 = 0.01;

/// Displacement applied to a pushed-back target: `magnitude` along the
/// caster→target direction. A target standing exactly on the caster is
/// pushed along the invocation rotation instead.
pub fn push_back_displacement(
    caster: Coordinate,
    target: Coordinate,
    rotation: f32,
    magnitude: f32,
) -> Vec2 {
    let dir = Vec2::between(caster, target);
    if dir.magnitude() > 0.0 {
        dir.normalized().scaled(magnitude)
    } else {
        Vec2::from_angle(rotation).scaled(magnitude)
    }
}

/// Hp restored to the caster for the given target hp values.
pub fn heal_amount(target_hp: &[f32]) -> f32 {
    target_hp.iter().sum::<f32>() * HEAL_FRACTION
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_back_points_away_from_caster() {
        let d = push_back_displacement(
            Coordinate::new(0.0, 0.0),
            Coordinate::new(3.0, 4.0),
            0.0,
            10.0,
        );
        assert!((d.x - 6.0).abs() < 1e-5);
        assert!((d.y - 8.0).abs() < 1e-5);
    }

    #[test]
    fn push_back_falls_back_to_rotation_when_coincident() {
        let at = Coordinate::new(5.0, 5.0);
        let d = push_back_displacement(at, at, 0.0, 10.0);
        assert!((d.x - 10.0).abs() < 1e-5);
        assert!(d.y.abs() < 1e-5);
    }

    #[test]
    fn heal_amount_is_one_percent_of_target_hp_sum() {
        assert_eq!(heal_amount(&[100.0, 50.0, 150.0]), 3.0);
        assert_eq!(heal_amount(&[]), 0.0);
    }
}
