//! Configuration system.
//!
//! Loads simulation configuration from JSON strings/files (file IO left to
//! the app).

use serde::{Deserialize, Serialize};

use crate::math::Dimension;

/// Root configuration for the simulation core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArenaConfig {
    /// World width in world units.
    #[serde(default = "default_width")]
    pub width: f32,
    /// World height in world units.
    #[serde(default = "default_height")]
    pub height: f32,
    /// Fixed simulation tick rate.
    #[serde(default = "default_tick_hz")]
    pub tick_hz: u32,
    /// RNG seed for deterministic runs; entropy-seeded when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_width() -> f32 {
    2000.0
}

fn default_height() -> f32 {
    2000.0
}

fn default_tick_hz() -> u32 {
    30
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            tick_hz: default_tick_hz(),
            seed: None,
        }
    }
}

impl ArenaConfig {
    /// Parses config from JSON.
    pub fn from_json_str(s: &str) -> serde_json::Result<Self> {
        serde_json::from_str(s)
    }

    pub fn dimension(&self) -> Dimension {
        Dimension::new(self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let cfg = ArenaConfig::from_json_str(r#"{"tick_hz": 60}"#).unwrap();
        assert_eq!(cfg.tick_hz, 60);
        assert_eq!(cfg.width, 2000.0);
        assert_eq!(cfg.height, 2000.0);
        assert_eq!(cfg.seed, None);
    }

    #[test]
    fn seed_roundtrips() {
        let cfg = ArenaConfig::from_json_str(r#"{"seed": 42}"#).unwrap();
        assert_eq!(cfg.seed, Some(42));
    }
}
