/*
 * Game Parameters Module
 *
 * This module defines the GameConfig struct that holds every tuning constant
 * of a session: grid dimensions, speed ramp, trail length and consumable
 * settings. A config can be loaded from JSON, edited through the UI and is
 * validated before a session is built from it.
 */

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;

// Upper bounds for values that size allocations
pub const MAX_GRID_SIZE: u32 = 4096;
pub const MAX_TRAIL_LENGTH: usize = 100_000;
pub const MAX_CONSUMABLES: usize = 1_000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // Grid size in cells
    pub grid_width: u32,
    pub grid_height: u32,
    // Squash applied to rows when mapping onto the bowl
    pub vertical_compression: f32,
    // Movement speed in cells per second
    pub base_speed: f32,
    pub max_speed: f32,
    // Speed gained per second of play while below max_speed
    pub speed_gain: f32,
    pub trail_length: usize,
    pub consumable_count: usize,
    // Consumable radius range, inclusive
    pub consumable_min_size: u32,
    pub consumable_max_size: u32,
    pub head_radius: f32,
    // Random picks tried before a consumable is placed regardless of occupancy
    pub spawn_attempts: u32,
    // Frames longer than this (seconds) are skipped instead of simulated
    pub max_frame_delta: f32,
    pub rng_seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 100,
            grid_height: 100,
            vertical_compression: crate::grid::DEFAULT_VERTICAL_COMPRESSION,
            base_speed: 10.0,
            max_speed: 60.0,
            speed_gain: 0.1,
            trail_length: 500,
            consumable_count: 5,
            consumable_min_size: 1,
            consumable_max_size: 6,
            head_radius: 1.0,
            spawn_attempts: 8,
            max_frame_delta: 1.0,
            rng_seed: None,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        // The world mapping divides by (size - 1)
        if self.grid_width < 2 || self.grid_height < 2 {
            return Err(ConfigError::Invalid("grid dimensions must be at least 2x2"));
        }
        if self.grid_width > MAX_GRID_SIZE || self.grid_height > MAX_GRID_SIZE {
            return Err(ConfigError::Invalid("grid dimensions must not exceed MAX_GRID_SIZE"));
        }
        // Rows at v >= 1 would collapse or invert the bowl
        if !(self.vertical_compression > 0.0 && self.vertical_compression < 1.0) {
            return Err(ConfigError::Invalid("vertical_compression must be in (0, 1)"));
        }
        if !(self.base_speed > 0.0) || !(self.max_speed > 0.0) {
            return Err(ConfigError::Invalid("speeds must be positive"));
        }
        if self.base_speed > self.max_speed {
            return Err(ConfigError::Invalid("base_speed must not exceed max_speed"));
        }
        if self.speed_gain < 0.0 {
            return Err(ConfigError::Invalid("speed_gain must be non-negative"));
        }
        if self.trail_length == 0 || self.trail_length > MAX_TRAIL_LENGTH {
            return Err(ConfigError::Invalid("trail_length must be in 1..=MAX_TRAIL_LENGTH"));
        }
        if self.consumable_count > MAX_CONSUMABLES {
            return Err(ConfigError::Invalid("consumable_count must not exceed MAX_CONSUMABLES"));
        }
        if self.consumable_min_size == 0 {
            return Err(ConfigError::Invalid("consumable_min_size must be positive"));
        }
        if self.consumable_min_size > self.consumable_max_size {
            return Err(ConfigError::Invalid(
                "consumable_min_size must not exceed consumable_max_size",
            ));
        }
        if self.head_radius < 0.0 {
            return Err(ConfigError::Invalid("head_radius must be non-negative"));
        }
        if self.spawn_attempts == 0 {
            return Err(ConfigError::Invalid("spawn_attempts must be at least 1"));
        }
        if !(self.max_frame_delta > 0.0) {
            return Err(ConfigError::Invalid("max_frame_delta must be positive"));
        }
        Ok(())
    }

    // Parse and validate a JSON config. Missing fields fall back to defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    // Get parameter ranges for UI sliders
    pub fn get_grid_size_range() -> std::ops::RangeInclusive<u32> {
        10..=200
    }

    pub fn get_speed_range() -> std::ops::RangeInclusive<f32> {
        1.0..=120.0
    }

    pub fn get_speed_gain_range() -> std::ops::RangeInclusive<f32> {
        0.0..=5.0
    }

    pub fn get_trail_length_range() -> std::ops::RangeInclusive<usize> {
        1..=2000
    }

    pub fn get_consumable_count_range() -> std::ops::RangeInclusive<usize> {
        0..=50
    }
}
