//! AOE shape primitives.
//!
//! Shapes are tagged variants carrying only their own fields. Hit tests are
//! point tests against a shape anchored at a coordinate and rotated to the
//! caster's facing captured at invocation time.

use serde::{Deserialize, Serialize};

use crate::math::{Coordinate, Vec2};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Circle { radius: f32 },
    /// Half disc facing the rotation.
    SemiCircle { radius: f32 },
    /// Width is centered on the rotation axis; length extends forward from
    /// the anchor.
    Rectangle { width: f32, length: f32 },
}

impl Shape {
    /// Tests whether `point` falls inside the shape anchored at `anchor` and
    /// rotated to `rotation`.
    pub fn contains(self, anchor: Coordinate, rotation: f32, point: Coordinate) -> bool {
        let offset = Vec2::between(anchor, point);
        match self {
            Shape::Circle { radius } => offset.magnitude() <= radius,
            Shape::SemiCircle { radius } => {
                offset.magnitude() <= radius && offset.dot(Vec2::from_angle(rotation)) >= 0.0
            }
            Shape::Rectangle { width, length } => {
                let facing = Vec2::from_angle(rotation);
                let forward = offset.dot(facing);
                let lateral = offset.y * facing.x - offset.x * facing.y;
                (0.0..=length).contains(&forward) && lateral.abs() <= width / 2.0
            }
        }
    }
}
