//! TOML configuration file and command-line overrides.
//!
//! ```toml
//! [dungeon]
//! grid_size = 6
//! floor_count = 3
//!
//! [placement]
//! room_size = 8.0
//! ```
//!
//! Missing tables and keys fall back to defaults; unknown keys are rejected.

use std::fs;
use std::io;
use std::path::Path;

use dungeon_core::{DungeonConfig, Placement};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub dungeon: DungeonConfig,
    pub placement: Placement,
}

impl ConfigFile {
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn load(path: &Path) -> io::Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }
}

/// Per-field values given on the command line; each one replaces the file's value.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Overrides {
    pub seed: Option<u64>,
    pub grid_size: Option<u32>,
    pub floor_count: Option<u32>,
    pub room_probability: Option<f64>,
    pub barrier_probability: Option<f64>,
}

impl Overrides {
    pub fn apply(&self, config: &mut DungeonConfig) {
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(grid_size) = self.grid_size {
            config.grid_size = grid_size;
        }
        if let Some(floor_count) = self.floor_count {
            config.floor_count = floor_count;
        }
        if let Some(room_probability) = self.room_probability {
            config.room_probability = room_probability;
        }
        if let Some(barrier_probability) = self.barrier_probability {
            config.barrier_probability = barrier_probability;
        }
    }
}
