pub mod config;
pub mod generator;
pub mod graph;
pub mod layout;
pub mod render;
pub mod rng;
pub mod types;

pub use config::{ConfigError, DungeonConfig};
pub use generator::{GenerationPhase, LayoutGenerator, generate_layout};
pub use graph::{FloorGraph, GraphGenerator, RoomSet};
pub use layout::{
    Barrier, Corridor, DungeonLayout, Facing, FloorLayout, GridPoint, InvariantViolation, Key,
    Room, RoomOrigin, Stairwell,
};
pub use render::{Placement, Renderer, render_layout};
pub use rng::RandomSource;
pub use types::*;
