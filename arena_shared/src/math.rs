//! 2D math types.
//!
//! This module intentionally stays small and deterministic.
//! It avoids SIMD/unsafe and focuses on stable semantics.

use serde::{Deserialize, Serialize};

/// Absolute position on the world plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Coordinate {
    pub x: f32,
    pub y: f32,
}

impl Coordinate {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance_to(self, other: Self) -> f32 {
        Vec2::between(self, other).magnitude()
    }

    /// Structural sanity check for inbound coordinates.
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Clamps the coordinate into the given world dimensions.
    pub fn clamped(self, dim: Dimension) -> Self {
        Self::new(self.x.clamp(0.0, dim.width), self.y.clamp(0.0, dim.height))
    }

    pub fn translated(self, v: Vec2) -> Self {
        Self::new(self.x + v.x, self.y + v.y)
    }
}

/// Displacement between two coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn between(from: Coordinate, to: Coordinate) -> Self {
        Self::new(to.x - from.x, to.y - from.y)
    }

    /// Unit vector pointing along `angle` radians from the positive x axis.
    pub fn from_angle(angle: f32) -> Self {
        Self::new(angle.cos(), angle.sin())
    }

    pub fn magnitude(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Angle in radians from the positive x axis, in `[-PI, PI]`.
    pub fn angle(self) -> f32 {
        self.y.atan2(self.x)
    }

    pub fn dot(self, rhs: Self) -> f32 {
        self.x * rhs.x + self.y * rhs.y
    }

    pub fn scaled(self, factor: f32) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }

    /// Unit vector in the same direction, or zero when the magnitude is zero.
    pub fn normalized(self) -> Self {
        let m = self.magnitude();
        if m > 0.0 {
            self.scaled(1.0 / m)
        } else {
            Self::ZERO
        }
    }
}

/// Width/height pair, used for both the world and client viewports.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Dimension {
    pub width: f32,
    pub height: f32,
}

impl Dimension {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vec2_between_and_magnitude() {
        let v = Vec2::between(Coordinate::new(1.0, 2.0), Coordinate::new(4.0, 6.0));
        assert_eq!(v, Vec2::new(3.0, 4.0));
        assert_eq!(v.magnitude(), 5.0);
    }

    #[test]
    fn vec2_normalized_zero_is_zero() {
        assert_eq!(Vec2::ZERO.normalized(), Vec2::ZERO);
    }

    #[test]
    fn vec2_angle_quadrants() {
        assert_eq!(Vec2::new(1.0, 0.0).angle(), 0.0);
        let up = Vec2::new(0.0, 1.0).angle();
        assert!((up - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn coordinate_clamped_into_bounds() {
        let dim = Dimension::new(100.0, 50.0);
        assert_eq!(
            Coordinate::new(-5.0, 75.0).clamped(dim),
            Coordinate::new(0.0, 50.0)
        );
        assert_eq!(
            Coordinate::new(40.0, 20.0).clamped(dim),
            Coordinate::new(40.0, 20.0)
        );
    }

    #[test]
    fn coordinate_finiteness() {
        assert!(Coordinate::new(1.0, 2.0).is_finite());
        assert!(!Coordinate::new(f32::NAN, 2.0).is_finite());
        assert!(!Coordinate::new(1.0, f32::INFINITY).is_finite());
    }
}
