//! Public data model for a generated multi-floor dungeon.

mod invariants;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::{DirectionSet, GridCell};

pub use invariants::InvariantViolation;

/// How a room came to exist on its floor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoomOrigin {
    /// Selected by the floor's own random population.
    Generated,
    /// Created on this floor because the floor below put its stairwell here.
    StairwellLanding,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub cell: GridCell,
    pub floor: u32,
    /// Sides with a neighbouring room; the renderer leaves those walls out.
    pub open: DirectionSet,
    pub origin: RoomOrigin,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Corridor {
    pub floor: u32,
    pub from: GridCell,
    pub to: GridCell,
}

impl Corridor {
    /// `true` when the corridor runs along the x axis.
    pub fn is_horizontal(&self) -> bool {
        self.from.y == self.to.y
    }

    /// Midpoint in fractional grid coordinates.
    pub fn midpoint(&self) -> GridPoint {
        GridPoint {
            x: (f64::from(self.from.x) + f64::from(self.to.x)) / 2.0,
            y: (f64::from(self.from.y) + f64::from(self.to.y)) / 2.0,
        }
    }
}

/// A point in fractional grid coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridPoint {
    pub x: f64,
    pub y: f64,
}

/// Fraction of the edge, measured from `to` back toward `from`, at which a barrier sits.
pub const BARRIER_OFFSET: f64 = 0.4;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Facing {
    PositiveX,
    NegativeX,
    PositiveY,
    NegativeY,
}

/// A door on a corridor edge.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Barrier {
    pub floor: u32,
    pub from: GridCell,
    pub to: GridCell,
    pub position: GridPoint,
    /// Unit step from `to` back toward `from`: the room the door opens into.
    pub orientation: (i32, i32),
}

impl Barrier {
    pub fn on_corridor(corridor: &Corridor) -> Self {
        let (x1, y1) = (f64::from(corridor.from.x), f64::from(corridor.from.y));
        let (x2, y2) = (f64::from(corridor.to.x), f64::from(corridor.to.y));
        let position =
            GridPoint { x: x2 - BARRIER_OFFSET * (x2 - x1), y: y2 - BARRIER_OFFSET * (y2 - y1) };
        let orientation = (
            corridor.from.x as i32 - corridor.to.x as i32,
            corridor.from.y as i32 - corridor.to.y as i32,
        );
        Self { floor: corridor.floor, from: corridor.from, to: corridor.to, position, orientation }
    }

    pub fn facing(&self) -> Facing {
        let (dx, dy) = self.orientation;
        if dy != 0 {
            if dy > 0 { Facing::PositiveY } else { Facing::NegativeY }
        } else if dx >= 0 {
            Facing::PositiveX
        } else {
            Facing::NegativeX
        }
    }
}

/// Vertical link from `lower_floor` to `lower_floor + 1` at the same cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Stairwell {
    pub cell: GridCell,
    pub lower_floor: u32,
}

impl Stairwell {
    pub fn upper_floor(&self) -> u32 {
        self.lower_floor + 1
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Key {
    pub cell: GridCell,
    pub floor: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FloorLayout {
    pub index: u32,
    /// Sorted by cell.
    pub rooms: Vec<Room>,
    pub corridors: Vec<Corridor>,
    pub barriers: Vec<Barrier>,
    pub stairwell: Option<Stairwell>,
}

impl FloorLayout {
    pub fn room_at(&self, cell: GridCell) -> Option<&Room> {
        let index = self.rooms.binary_search_by_key(&cell, |room| room.cell).ok()?;
        Some(&self.rooms[index])
    }

    pub fn has_room(&self, cell: GridCell) -> bool {
        self.room_at(cell).is_some()
    }

    pub fn cells(&self) -> impl Iterator<Item = GridCell> + '_ {
        self.rooms.iter().map(|room| room.cell)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DungeonLayout {
    pub grid_size: u32,
    pub seed: u64,
    /// Indexed by floor, bottom floor first.
    pub floors: Vec<FloorLayout>,
    pub key: Option<Key>,
}

impl DungeonLayout {
    pub fn floor(&self, index: u32) -> Option<&FloorLayout> {
        self.floors.get(index as usize)
    }

    pub fn top_floor(&self) -> Option<&FloorLayout> {
        self.floors.last()
    }

    pub fn room_count(&self) -> usize {
        self.floors.iter().map(|floor| floor.rooms.len()).sum()
    }

    pub fn stairwells(&self) -> impl Iterator<Item = &Stairwell> + '_ {
        self.floors.iter().filter_map(|floor| floor.stairwell.as_ref())
    }

    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        invariants::check(self)
    }

    /// Stable byte encoding of the grid/graph structure, used for fingerprinting.
    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend(self.grid_size.to_le_bytes());
        bytes.extend(self.seed.to_le_bytes());
        bytes.extend((self.floors.len() as u32).to_le_bytes());
        for floor in &self.floors {
            bytes.extend(floor.index.to_le_bytes());

            bytes.extend((floor.rooms.len() as u32).to_le_bytes());
            for room in &floor.rooms {
                push_cell(&mut bytes, room.cell);
                bytes.push(room.open.bits());
                bytes.push(match room.origin {
                    RoomOrigin::Generated => 0,
                    RoomOrigin::StairwellLanding => 1,
                });
            }

            bytes.extend((floor.corridors.len() as u32).to_le_bytes());
            for corridor in &floor.corridors {
                push_cell(&mut bytes, corridor.from);
                push_cell(&mut bytes, corridor.to);
            }

            bytes.extend((floor.barriers.len() as u32).to_le_bytes());
            for barrier in &floor.barriers {
                push_cell(&mut bytes, barrier.from);
                push_cell(&mut bytes, barrier.to);
                bytes.extend(barrier.position.x.to_bits().to_le_bytes());
                bytes.extend(barrier.position.y.to_bits().to_le_bytes());
                bytes.extend(barrier.orientation.0.to_le_bytes());
                bytes.extend(barrier.orientation.1.to_le_bytes());
            }

            match floor.stairwell {
                Some(stairwell) => {
                    bytes.push(1);
                    push_cell(&mut bytes, stairwell.cell);
                }
                None => bytes.push(0),
            }
        }

        match self.key {
            Some(key) => {
                bytes.push(1);
                push_cell(&mut bytes, key.cell);
                bytes.extend(key.floor.to_le_bytes());
            }
            None => bytes.push(0),
        }

        bytes
    }

    pub fn summary(&self) -> String {
        self.to_string()
    }
}

fn push_cell(bytes: &mut Vec<u8>, cell: GridCell) {
    bytes.extend(cell.x.to_le_bytes());
    bytes.extend(cell.y.to_le_bytes());
}

impl fmt::Display for DungeonLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Dungeon generated with {} floors", self.floors.len())?;
        for floor in &self.floors {
            write!(f, "\nFloor {}: {} rooms", floor.index, floor.rooms.len())?;
        }
        Ok(())
    }
}
