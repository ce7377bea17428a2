//! Orchestrates per-floor generation, stairwell stitching and key placement.

use tracing::{debug, info};

use crate::config::{ConfigError, DungeonConfig};
use crate::graph::{FloorGraph, GraphGenerator};
use crate::layout::{
    Barrier, Corridor, DungeonLayout, FloorLayout, Key, Room, RoomOrigin, Stairwell,
};
use crate::rng::RandomSource;
use crate::types::GridCell;

/// Where the generator is in its strictly forward run.
///
/// Floors alternate `Generating` and `Stitching` from the bottom up; the top floor goes
/// straight from `Generating` to `KeyPlacement`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GenerationPhase {
    Uninitialized,
    Generating { floor: u32 },
    Stitching { floor: u32 },
    KeyPlacement,
    Complete,
}

pub struct LayoutGenerator {
    config: DungeonConfig,
    rng: RandomSource,
    graphs: GraphGenerator,
    phase: GenerationPhase,
    floors: Vec<FloorLayout>,
    pending_landing: Option<GridCell>,
    key: Option<Key>,
}

impl LayoutGenerator {
    pub fn new(config: DungeonConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            rng: RandomSource::new(config.seed),
            graphs: GraphGenerator::new(config.grid_size, config.room_probability),
            phase: GenerationPhase::Uninitialized,
            floors: Vec::with_capacity(config.floor_count as usize),
            pending_landing: None,
            key: None,
            config,
        })
    }

    pub fn phase(&self) -> GenerationPhase {
        self.phase
    }

    pub fn config(&self) -> &DungeonConfig {
        &self.config
    }

    /// Performs the work of the current phase and moves to the next one.
    pub fn step(&mut self) -> GenerationPhase {
        let next = match self.phase {
            GenerationPhase::Uninitialized => GenerationPhase::Generating { floor: 0 },
            GenerationPhase::Generating { floor } => {
                let landing = self.pending_landing.take();
                let generated = self.generate_floor(floor, landing);
                self.floors.push(generated);
                if floor + 1 < self.config.floor_count {
                    GenerationPhase::Stitching { floor }
                } else {
                    GenerationPhase::KeyPlacement
                }
            }
            GenerationPhase::Stitching { floor } => {
                self.place_stairwell(floor);
                GenerationPhase::Generating { floor: floor + 1 }
            }
            GenerationPhase::KeyPlacement => {
                self.place_key();
                GenerationPhase::Complete
            }
            GenerationPhase::Complete => GenerationPhase::Complete,
        };
        if next != self.phase {
            debug!(from = ?self.phase, to = ?next, "generation phase transition");
        }
        self.phase = next;
        next
    }

    pub fn run(mut self) -> DungeonLayout {
        while self.phase != GenerationPhase::Complete {
            self.step();
        }
        let layout = self.assemble();
        info!(
            seed = layout.seed,
            floors = layout.floors.len(),
            rooms = layout.room_count(),
            key_placed = layout.key.is_some(),
            "dungeon layout complete"
        );
        layout
    }

    /// The finished layout, or `None` if the run has not reached `Complete`.
    pub fn into_layout(self) -> Option<DungeonLayout> {
        (self.phase == GenerationPhase::Complete).then(|| self.assemble())
    }

    fn assemble(self) -> DungeonLayout {
        DungeonLayout {
            grid_size: self.config.grid_size,
            seed: self.config.seed,
            floors: self.floors,
            key: self.key,
        }
    }

    fn generate_floor(&mut self, index: u32, landing: Option<GridCell>) -> FloorLayout {
        let mut cells = self.graphs.populate(&mut self.rng);
        let landing_created = landing.filter(|&cell| cells.insert(cell));
        let graph = FloorGraph::build(&cells, self.config.grid_size);

        let rooms: Vec<Room> = cells
            .iter()
            .map(|cell| Room {
                cell,
                floor: index,
                open: graph.open_directions(cell),
                origin: if landing_created == Some(cell) {
                    RoomOrigin::StairwellLanding
                } else {
                    RoomOrigin::Generated
                },
            })
            .collect();

        let mut corridors = Vec::with_capacity(graph.edges().len());
        let mut barriers = Vec::new();
        for &(from, to) in graph.edges() {
            let corridor = Corridor { floor: index, from, to };
            if self.rng.chance(self.config.barrier_probability) {
                barriers.push(Barrier::on_corridor(&corridor));
            }
            corridors.push(corridor);
        }

        debug!(
            floor = index,
            rooms = rooms.len(),
            corridors = corridors.len(),
            barriers = barriers.len(),
            isolated = graph.isolated_rooms().count(),
            landing = ?landing_created,
            "generated floor"
        );

        FloorLayout { index, rooms, corridors, barriers, stairwell: None }
    }

    fn place_stairwell(&mut self, index: u32) {
        let Some(floor) = self.floors.get_mut(index as usize) else {
            return;
        };
        if floor.rooms.is_empty() {
            debug!(floor = index, "no rooms, skipping stairwell");
            return;
        }
        let cell = self.rng.choose(&floor.rooms).cell;
        floor.stairwell = Some(Stairwell { cell, lower_floor: index });
        self.pending_landing = Some(cell);
        debug!(floor = index, %cell, "placed stairwell");
    }

    fn place_key(&mut self) {
        let Some(top) = self.floors.last() else {
            return;
        };
        if top.rooms.is_empty() {
            debug!(floor = top.index, "top floor is empty, no key placed");
            return;
        }
        let cell = self.rng.choose(&top.rooms).cell;
        self.key = Some(Key { cell, floor: top.index });
        debug!(floor = top.index, %cell, "placed key");
    }
}

/// Validates `config` and runs a generator to completion.
pub fn generate_layout(config: DungeonConfig) -> Result<DungeonLayout, ConfigError> {
    Ok(LayoutGenerator::new(config)?.run())
}
