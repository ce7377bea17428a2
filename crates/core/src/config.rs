//! Generation parameters and their entry-point validation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_GRID_SIZE: u32 = 4;
pub const DEFAULT_ROOM_PROBABILITY: f64 = 0.7;
pub const DEFAULT_BARRIER_PROBABILITY: f64 = 0.3;
pub const DEFAULT_FLOOR_COUNT: u32 = 1;
pub const DEFAULT_SEED: u64 = 42;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DungeonConfig {
    pub grid_size: u32,
    pub room_probability: f64,
    pub barrier_probability: f64,
    pub floor_count: u32,
    pub seed: u64,
}

impl Default for DungeonConfig {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            room_probability: DEFAULT_ROOM_PROBABILITY,
            barrier_probability: DEFAULT_BARRIER_PROBABILITY,
            floor_count: DEFAULT_FLOOR_COUNT,
            seed: DEFAULT_SEED,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    #[error("grid_size must be at least 1, got {0}")]
    GridSize(u32),
    #[error("floor_count must be at least 1, got {0}")]
    FloorCount(u32),
    #[error("room_probability must lie in [0, 1], got {0}")]
    RoomProbability(f64),
    #[error("barrier_probability must lie in [0, 1], got {0}")]
    BarrierProbability(f64),
}

impl DungeonConfig {
    /// Rejects out-of-range values. Nothing is clamped.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_size == 0 {
            return Err(ConfigError::GridSize(self.grid_size));
        }
        if self.floor_count == 0 {
            return Err(ConfigError::FloorCount(self.floor_count));
        }
        if !is_probability(self.room_probability) {
            return Err(ConfigError::RoomProbability(self.room_probability));
        }
        if !is_probability(self.barrier_probability) {
            return Err(ConfigError::BarrierProbability(self.barrier_probability));
        }
        Ok(())
    }
}

// NaN fails both comparisons.
fn is_probability(value: f64) -> bool {
    (0.0..=1.0).contains(&value)
}
