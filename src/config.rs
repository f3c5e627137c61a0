//! Game tuning
//!
//! Defaults reproduce the classic feel. Overrides are persisted separately
//! from anything else in LocalStorage and may be partial JSON.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Configuration problems
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{name} must be positive, got {value}")]
    NonPositive { name: &'static str, value: f32 },
    #[error("{name} must not be negative, got {value}")]
    Negative { name: &'static str, value: f32 },
    #[error("gravity must not be negative, got {0}")]
    NegativeGravity(f32),
    #[error("lift must be negative (upward), got {0}")]
    NonNegativeLift(f32),
    #[error("spawn interval must be at least one tick")]
    ZeroSpawnInterval,
    /// Gap plus both minimum segments does not fit the surface
    #[error("pipe gap {gap} + 2 x {min_segment} minimum segment exceeds surface height {surface_height}")]
    DegenerateGap {
        gap: f32,
        min_segment: f32,
        surface_height: f32,
    },
    #[error("invalid config JSON: {0}")]
    Json(String),
}

/// Physics and obstacle tuning for one game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Bird ===
    pub gravity: f32,
    pub lift: f32,
    pub avatar_x: f32,
    pub avatar_width: f32,
    pub avatar_height: f32,

    // === Pipes ===
    pub pipe_width: f32,
    pub pipe_gap: f32,
    pub pipe_speed: f32,
    /// Ticks between spawns
    pub spawn_interval: u64,
    pub min_segment: f32,

    /// Fixed RNG seed for reproducible pipe layouts (random per run if unset)
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            lift: LIFT,
            avatar_x: AVATAR_X,
            avatar_width: AVATAR_WIDTH,
            avatar_height: AVATAR_HEIGHT,

            pipe_width: PIPE_WIDTH,
            pipe_gap: PIPE_GAP,
            pipe_speed: PIPE_SPEED,
            spawn_interval: SPAWN_INTERVAL,
            min_segment: MIN_SEGMENT,

            seed: None,
        }
    }
}

impl GameConfig {
    /// Parse a (possibly partial) JSON override on top of the defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json).map_err(|e| ConfigError::Json(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check surface-independent constraints
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("avatar_width", self.avatar_width),
            ("avatar_height", self.avatar_height),
            ("pipe_width", self.pipe_width),
            ("pipe_gap", self.pipe_gap),
            ("pipe_speed", self.pipe_speed),
        ];
        for (name, value) in positive {
            // Written this way so NaN is rejected too
            if !(value > 0.0) {
                return Err(ConfigError::NonPositive { name, value });
            }
        }
        if !(self.gravity >= 0.0) {
            return Err(ConfigError::NegativeGravity(self.gravity));
        }
        if !(self.lift < 0.0) {
            return Err(ConfigError::NonNegativeLift(self.lift));
        }
        if self.spawn_interval == 0 {
            return Err(ConfigError::ZeroSpawnInterval);
        }
        if !(self.min_segment >= 0.0) {
            return Err(ConfigError::Negative {
                name: "min_segment",
                value: self.min_segment,
            });
        }
        Ok(())
    }

    /// Check that a pipe with both minimum segments fits a surface of this height.
    ///
    /// A failure here is not fatal: spawning clamps the geometry instead.
    pub fn check_surface(&self, surface_height: f32) -> Result<(), ConfigError> {
        if self.pipe_gap + 2.0 * self.min_segment > surface_height {
            return Err(ConfigError::DegenerateGap {
                gap: self.pipe_gap,
                min_segment: self.min_segment,
                surface_height,
            });
        }
        Ok(())
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "flappy_pipes_config";

    /// Load config overrides from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(config) => {
                        log::info!("Loaded config from LocalStorage");
                        return config;
                    }
                    Err(e) => log::warn!("Ignoring stored config: {}", e),
                }
            }
        }

        log::info!("Using default config");
        Self::default()
    }

    /// Save config to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Config saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.spawn_interval, 50);
        assert_eq!(config.lift, -12.0);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = GameConfig::from_json(r#"{ "pipe_gap": 200.0, "seed": 7 }"#).unwrap();
        assert_eq!(config.pipe_gap, 200.0);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.pipe_width, PIPE_WIDTH);
        assert_eq!(config.gravity, GRAVITY);
    }

    #[test]
    fn test_bad_json() {
        assert!(matches!(
            GameConfig::from_json("{ not json"),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn test_rejects_bad_values() {
        let config = GameConfig {
            lift: 3.0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::NonNegativeLift(3.0)));

        let config = GameConfig {
            spawn_interval: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroSpawnInterval));

        let config = GameConfig {
            pipe_speed: f32::NAN,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositive { name: "pipe_speed", .. })
        ));

        let config = GameConfig {
            gravity: -0.1,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::NegativeGravity(-0.1)));
    }

    #[test]
    fn test_min_segment_may_be_zero_but_not_negative() {
        let config = GameConfig {
            min_segment: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_ok());

        let config = GameConfig {
            min_segment: -5.0,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::Negative {
                name: "min_segment",
                value: -5.0
            })
        );

        let config = GameConfig {
            min_segment: f32::NAN,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Negative { name: "min_segment", .. })
        ));
    }

    #[test]
    fn test_check_surface() {
        let config = GameConfig::default();
        // 180 + 2 * 50 = 280
        assert!(config.check_surface(600.0).is_ok());
        assert!(config.check_surface(280.0).is_ok());
        assert_eq!(
            config.check_surface(279.0),
            Err(ConfigError::DegenerateGap {
                gap: 180.0,
                min_segment: 50.0,
                surface_height: 279.0,
            })
        );
    }
}
