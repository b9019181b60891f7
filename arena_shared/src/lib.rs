//! `arena_shared`
//!
//! The server-authoritative arena simulation, shared by the server binary
//! and any embedder (headless runners, tests).
//!
//! Design goals:
//! - Deterministic fixed-timestep simulation (tick counters, seedable RNG).
//! - Clear separation of concerns (math, shapes, effects, spells, world).
//! - Tagged variants with exhaustive dispatch instead of class hierarchies.
//! - No `unsafe`.

pub mod boost;
pub mod bullet;
pub mod collision;
pub mod config;
pub mod effect;
pub mod math;
pub mod movement;
pub mod net;
pub mod player;
pub mod profession;
pub mod shape;
pub mod spell;
pub mod world;

pub mod prelude {
    //! Commonly used exports.

    pub use crate::boost::*;
    pub use crate::bullet::*;
    pub use crate::config::*;
    pub use crate::effect::*;
    pub use crate::math::*;
    pub use crate::net::*;
    pub use crate::player::*;
    pub use crate::profession::*;
    pub use crate::shape::*;
    pub use crate::spell::*;
    pub use crate::world::*;
}
