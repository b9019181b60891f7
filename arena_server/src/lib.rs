//! `arena_server`
//!
//! Server-side tick scheduler:
//! - Fixed timestep loop around the world step
//! - Drains session messages at the start of each tick
//! - Broadcasts one snapshot per tick
//!
//! Transport model: the network/session layer is an external collaborator.
//! Its contract is the channel endpoints in [`server::ServerHandle`].

pub mod server;

pub use server::{GameServer, ServerHandle, SessionMsg};
