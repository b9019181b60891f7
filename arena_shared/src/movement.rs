//! Seek movement integration.

use crate::math::{Coordinate, Vec2};

/// Advances `position` toward `target`, capped at `speed_per_tick`.
///
/// Snaps exactly onto the target once it is within reach, so repeated calls
/// converge without overshoot or oscillation. Strictly linear; no
/// acceleration or deceleration curve.
pub fn advance(position: Coordinate, target: Coordinate, speed_per_tick: f32) -> Coordinate {
    let to_target = Vec2::between(position, target);
    if to_target.magnitude() > speed_per_tick {
        position.translated(to_target.normalized().scaled(speed_per_tick))
    } else {
        target
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_converges_in_ceil_distance_over_speed_steps() {
        let target = Coordinate::new(100.0, 0.0);
        let speed = 7.0;
        let mut pos = Coordinate::ZERO;
        let mut steps = 0;
        while pos != target {
            let before = pos.distance_to(target);
            pos = advance(pos, target, speed);
            assert!(pos.distance_to(target) < before, "must move closer");
            steps += 1;
            assert!(steps <= 15, "ceil(100/7) = 15 steps at most");
        }
        assert_eq!(steps, 15);
        assert_eq!(pos, target);
    }

    #[test]
    fn advance_snaps_without_overshoot() {
        let target = Coordinate::new(5.0, 0.0);
        let pos = advance(Coordinate::ZERO, target, 10.0);
        assert_eq!(pos, target);
        // Once arrived, it stays put.
        assert_eq!(advance(pos, target, 10.0), target);
    }

    #[test]
    fn advance_moves_along_the_diagonal() {
        let pos = advance(Coordinate::ZERO, Coordinate::new(30.0, 40.0), 5.0);
        assert!((pos.x - 3.0).abs() < 1e-5);
        assert!((pos.y - 4.0).abs() < 1e-5);
    }
}
