//! Structural checks every generated layout must pass.

use std::collections::BTreeSet;

use thiserror::Error;

use super::{DungeonLayout, FloorLayout};
use crate::types::{Direction, GridCell};

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("floor at position {position} carries index {index}")]
    FloorIndexGap { position: usize, index: u32 },
    #[error("floor {floor}: room {cell} lies outside the {grid_size}x{grid_size} grid")]
    CellOutOfBounds { floor: u32, cell: GridCell, grid_size: u32 },
    #[error("floor {floor}: rooms are not strictly sorted at {cell}")]
    RoomsUnsorted { floor: u32, cell: GridCell },
    #[error("floor {floor}: room {cell} records floor {recorded}")]
    RoomFloorMismatch { floor: u32, cell: GridCell, recorded: u32 },
    #[error("floor {floor}: room {cell} open directions disagree with its neighbours")]
    DirectionMismatch { floor: u32, cell: GridCell },
    #[error("floor {floor}: corridor {from} -> {to} does not join two adjacent rooms")]
    InvalidCorridor { floor: u32, from: GridCell, to: GridCell },
    #[error("floor {floor}: corridor {from} -> {to} appears more than once")]
    DuplicateCorridor { floor: u32, from: GridCell, to: GridCell },
    #[error("floor {floor}: adjacent rooms {from} and {to} have no corridor")]
    MissingCorridor { floor: u32, from: GridCell, to: GridCell },
    #[error("floor {floor}: barrier {from} -> {to} is not on a corridor")]
    OrphanBarrier { floor: u32, from: GridCell, to: GridCell },
    #[error("floor {floor} has rooms but no stairwell")]
    MissingStairwell { floor: u32 },
    #[error("floor {floor} has a stairwell but no floor above")]
    StairwellOnTopFloor { floor: u32 },
    #[error("floor {floor}: stairwell {cell} is not a room on floors {floor} and {above}")]
    StairwellNotLinked { floor: u32, above: u32, cell: GridCell },
    #[error("top floor has rooms but no key")]
    MissingKey,
    #[error("key at {cell} on floor {floor} is not a room on the top floor")]
    MisplacedKey { floor: u32, cell: GridCell },
}

pub(super) fn check(layout: &DungeonLayout) -> Result<(), InvariantViolation> {
    for (position, floor) in layout.floors.iter().enumerate() {
        if floor.index as usize != position {
            return Err(InvariantViolation::FloorIndexGap { position, index: floor.index });
        }
        check_rooms(floor, layout.grid_size)?;
        check_corridors(floor, layout.grid_size)?;
        check_barriers(floor)?;
    }
    check_stairwells(layout)?;
    check_key(layout)
}

fn check_rooms(floor: &FloorLayout, grid_size: u32) -> Result<(), InvariantViolation> {
    let mut previous: Option<GridCell> = None;
    for room in &floor.rooms {
        let cell = room.cell;
        if cell.x >= grid_size || cell.y >= grid_size {
            return Err(InvariantViolation::CellOutOfBounds { floor: floor.index, cell, grid_size });
        }
        if previous.is_some_and(|previous| previous >= cell) {
            return Err(InvariantViolation::RoomsUnsorted { floor: floor.index, cell });
        }
        previous = Some(cell);
        if room.floor != floor.index {
            return Err(InvariantViolation::RoomFloorMismatch {
                floor: floor.index,
                cell,
                recorded: room.floor,
            });
        }
        for direction in Direction::ALL {
            let neighbor_exists =
                cell.neighbor(direction, grid_size).is_some_and(|next| floor.has_room(next));
            if room.open.contains(direction) != neighbor_exists {
                return Err(InvariantViolation::DirectionMismatch { floor: floor.index, cell });
            }
        }
    }
    Ok(())
}

fn check_corridors(floor: &FloorLayout, grid_size: u32) -> Result<(), InvariantViolation> {
    let mut seen = BTreeSet::new();
    for corridor in &floor.corridors {
        let (from, to) = (corridor.from, corridor.to);
        if !from.is_orthogonally_adjacent(to)
            || !floor.has_room(from)
            || !floor.has_room(to)
            || corridor.floor != floor.index
        {
            return Err(InvariantViolation::InvalidCorridor { floor: floor.index, from, to });
        }
        let key = if from < to { (from, to) } else { (to, from) };
        if !seen.insert(key) {
            return Err(InvariantViolation::DuplicateCorridor { floor: floor.index, from, to });
        }
    }

    for cell in floor.cells() {
        for direction in [Direction::East, Direction::North] {
            let Some(next) = cell.neighbor(direction, grid_size) else {
                continue;
            };
            if floor.has_room(next) && !seen.contains(&(cell, next)) {
                return Err(InvariantViolation::MissingCorridor {
                    floor: floor.index,
                    from: cell,
                    to: next,
                });
            }
        }
    }
    Ok(())
}

fn check_barriers(floor: &FloorLayout) -> Result<(), InvariantViolation> {
    for barrier in &floor.barriers {
        let on_corridor = floor
            .corridors
            .iter()
            .any(|corridor| corridor.from == barrier.from && corridor.to == barrier.to);
        if !on_corridor || barrier.floor != floor.index {
            return Err(InvariantViolation::OrphanBarrier {
                floor: floor.index,
                from: barrier.from,
                to: barrier.to,
            });
        }
    }
    Ok(())
}

fn check_stairwells(layout: &DungeonLayout) -> Result<(), InvariantViolation> {
    let floor_count = layout.floors.len();
    for (position, floor) in layout.floors.iter().enumerate() {
        let is_top = position + 1 == floor_count;
        match floor.stairwell {
            None if !is_top && !floor.rooms.is_empty() => {
                return Err(InvariantViolation::MissingStairwell { floor: floor.index });
            }
            None => {}
            Some(_) if is_top => {
                return Err(InvariantViolation::StairwellOnTopFloor { floor: floor.index });
            }
            Some(stairwell) => {
                let above = &layout.floors[position + 1];
                let linked = stairwell.lower_floor == floor.index
                    && floor.has_room(stairwell.cell)
                    && above.has_room(stairwell.cell);
                if !linked {
                    return Err(InvariantViolation::StairwellNotLinked {
                        floor: floor.index,
                        above: above.index,
                        cell: stairwell.cell,
                    });
                }
            }
        }
    }
    Ok(())
}

fn check_key(layout: &DungeonLayout) -> Result<(), InvariantViolation> {
    let Some(top) = layout.top_floor() else {
        return match layout.key {
            Some(key) => Err(InvariantViolation::MisplacedKey { floor: key.floor, cell: key.cell }),
            None => Ok(()),
        };
    };
    match layout.key {
        None if top.rooms.is_empty() => Ok(()),
        None => Err(InvariantViolation::MissingKey),
        Some(key) if key.floor == top.index && top.has_room(key.cell) => Ok(()),
        Some(key) => Err(InvariantViolation::MisplacedKey { floor: key.floor, cell: key.cell }),
    }
}
