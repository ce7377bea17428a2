//! JSON export of a generated layout together with the settings that produced it.

use std::fs;
use std::io;
use std::path::Path;

use dungeon_core::{DungeonConfig, DungeonLayout};
use serde::{Deserialize, Serialize};

pub const FORMAT_VERSION: u32 = 1;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LayoutFile {
    pub format_version: u32,
    pub config: DungeonConfig,
    pub layout: DungeonLayout,
}

impl LayoutFile {
    pub fn new(config: DungeonConfig, layout: DungeonLayout) -> Self {
        Self { format_version: FORMAT_VERSION, config, layout }
    }

    pub fn write_atomic(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let tmp_path = path.with_extension("json.tmp");
        let json = serde_json::to_string_pretty(self).map_err(io::Error::other)?;
        fs::write(&tmp_path, json)?;
        fs::rename(&tmp_path, path)?;
        Ok(())
    }

    pub fn load(path: &Path) -> io::Result<Self> {
        let content = fs::read_to_string(path)?;
        let file: Self = serde_json::from_str(&content)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        if file.format_version != FORMAT_VERSION {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("unsupported layout format version {}", file.format_version),
            ));
        }
        Ok(file)
    }
}
