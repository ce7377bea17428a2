//! The seam between layout generation and whatever draws it.
//!
//! A [`Renderer`] is walked over a finished [`DungeonLayout`] by [`render_layout`].
//! [`Placement`] turns grid/floor coordinates into world-space positions for renderers
//! that need them; its constants are presentation parameters only.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::layout::{Barrier, Corridor, DungeonLayout, Facing, FloorLayout, Key, Room, Stairwell};
use crate::types::{Direction, GridCell};

pub trait Renderer {
    fn begin_floor(&mut self, _floor: &FloorLayout) {}
    fn room(&mut self, room: &Room);
    fn corridor(&mut self, corridor: &Corridor);
    fn barrier(&mut self, barrier: &Barrier);
    fn stairwell(&mut self, stairwell: &Stairwell);
    fn key(&mut self, key: &Key);
}

/// Visits floors bottom-up; within a floor rooms, corridors, barriers, then the stairwell.
/// The key comes last.
pub fn render_layout<R: Renderer + ?Sized>(layout: &DungeonLayout, renderer: &mut R) {
    for floor in &layout.floors {
        renderer.begin_floor(floor);
        for room in &floor.rooms {
            renderer.room(room);
        }
        for corridor in &floor.corridors {
            renderer.corridor(corridor);
        }
        for barrier in &floor.barriers {
            renderer.barrier(barrier);
        }
        if let Some(stairwell) = &floor.stairwell {
            renderer.stairwell(stairwell);
        }
    }
    if let Some(key) = &layout.key {
        renderer.key(key);
    }
}

pub type WorldPoint = [f64; 3];

/// Height of the key marker above the floor surface.
const KEY_LIFT: f64 = 0.5;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Placement {
    pub room_size: f64,
    /// Multiplier on `room_size` between neighbouring room centres.
    pub room_spacing: f64,
    pub wall_height: f64,
    pub floor_thickness_ratio: f64,
    pub corridor_width: f64,
    pub corridor_height: f64,
    pub wall_thickness: f64,
}

impl Default for Placement {
    fn default() -> Self {
        Self {
            room_size: 6.0,
            room_spacing: 1.5,
            wall_height: 5.0,
            floor_thickness_ratio: 0.1,
            corridor_width: 2.0,
            corridor_height: 0.2,
            wall_thickness: 0.2,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WallPlacement {
    pub side: Direction,
    pub center: WorldPoint,
    /// Full extent along x, y, z.
    pub size: WorldPoint,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CorridorPlacement {
    pub center: WorldPoint,
    pub size: WorldPoint,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BarrierPlacement {
    pub center: WorldPoint,
    pub size: WorldPoint,
    pub facing: Facing,
    /// Rotation about the vertical axis, radians.
    pub yaw: f64,
}

impl Placement {
    fn cell_pitch(&self) -> f64 {
        self.room_size * self.room_spacing
    }

    fn floor_base(&self, floor: u32) -> f64 {
        f64::from(floor) * (self.wall_height + 1.0)
    }

    /// Top surface of a floor slab whose centre sits at `base`.
    pub fn floor_top(&self, base: f64) -> f64 {
        base + (self.room_size * self.floor_thickness_ratio) / 2.0
    }

    pub fn room_origin(&self, cell: GridCell, floor: u32) -> WorldPoint {
        let pitch = self.cell_pitch();
        [f64::from(cell.x) * pitch, f64::from(cell.y) * pitch, self.floor_base(floor)]
    }

    /// Walls for every side without a neighbouring room.
    pub fn room_walls(&self, room: &Room) -> Vec<WallPlacement> {
        let [ox, oy, oz] = self.room_origin(room.cell, room.floor);
        let reach = self.room_size / 2.0 + self.wall_thickness / 2.0;
        let wall_z = self.floor_top(oz) + self.wall_height / 2.0;
        Direction::ALL
            .into_iter()
            .filter(|side| !room.open.contains(*side))
            .map(|side| {
                let (dx, dy) = side.offset();
                let size = if dx != 0 {
                    [self.wall_thickness, self.room_size, self.wall_height]
                } else {
                    [self.room_size, self.wall_thickness, self.wall_height]
                };
                WallPlacement {
                    side,
                    center: [ox + f64::from(dx) * reach, oy + f64::from(dy) * reach, wall_z],
                    size,
                }
            })
            .collect()
    }

    pub fn corridor(&self, corridor: &Corridor) -> CorridorPlacement {
        let pitch = self.cell_pitch();
        let mid = corridor.midpoint();
        let top = self.floor_top(self.floor_base(corridor.floor));
        let center = [mid.x * pitch, mid.y * pitch, top];
        // Half a pitch long: spans the gap between two rooms plus some overlap.
        let size = if corridor.is_horizontal() {
            [pitch / 2.0, self.corridor_width, self.corridor_height / 2.0]
        } else {
            [self.corridor_width, pitch / 2.0, self.corridor_height / 2.0]
        };
        CorridorPlacement { center, size }
    }

    pub fn barrier(&self, barrier: &Barrier) -> BarrierPlacement {
        let pitch = self.cell_pitch();
        let top = self.floor_top(self.floor_base(barrier.floor));
        let center =
            [barrier.position.x * pitch, barrier.position.y * pitch, top + self.wall_height / 2.0];
        let facing = barrier.facing();
        let size = match facing {
            Facing::PositiveX | Facing::NegativeX => {
                [self.wall_thickness, self.corridor_width, self.wall_height]
            }
            Facing::PositiveY | Facing::NegativeY => {
                [self.corridor_width, self.wall_thickness, self.wall_height]
            }
        };
        let yaw = match facing {
            Facing::PositiveX | Facing::PositiveY => 0.0,
            Facing::NegativeX => PI,
            Facing::NegativeY => -PI,
        };
        BarrierPlacement { center, size, facing, yaw }
    }

    pub fn stairwell(&self, stairwell: &Stairwell) -> WorldPoint {
        let [ox, oy, oz] = self.room_origin(stairwell.cell, stairwell.lower_floor);
        [ox, oy, self.floor_top(oz) + self.wall_height / 2.0]
    }

    pub fn key(&self, key: &Key) -> WorldPoint {
        let [ox, oy, oz] = self.room_origin(key.cell, key.floor);
        [ox, oy, self.floor_top(oz) + KEY_LIFT]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{GridPoint, RoomOrigin};
    use crate::types::DirectionSet;

    fn close(left: WorldPoint, right: WorldPoint) -> bool {
        left.iter().zip(right).all(|(a, b)| (a - b).abs() < 1e-9)
    }

    #[derive(Default)]
    struct Trace(Vec<String>);

    impl Renderer for Trace {
        fn begin_floor(&mut self, floor: &FloorLayout) {
            self.0.push(format!("floor {}", floor.index));
        }
        fn room(&mut self, room: &Room) {
            self.0.push(format!("room {}", room.cell));
        }
        fn corridor(&mut self, corridor: &Corridor) {
            self.0.push(format!("corridor {} {}", corridor.from, corridor.to));
        }
        fn barrier(&mut self, barrier: &Barrier) {
            self.0.push(format!("barrier {} {}", barrier.from, barrier.to));
        }
        fn stairwell(&mut self, stairwell: &Stairwell) {
            self.0.push(format!("stairwell {}", stairwell.cell));
        }
        fn key(&mut self, key: &Key) {
            self.0.push(format!("key {}", key.cell));
        }
    }

    fn room(x: u32, y: u32, floor: u32, open: DirectionSet) -> Room {
        Room { cell: GridCell::new(x, y), floor, open, origin: RoomOrigin::Generated }
    }

    #[test]
    fn render_visits_in_documented_order() {
        let from = GridCell::new(0, 0);
        let to = GridCell::new(1, 0);
        let corridor = Corridor { floor: 0, from, to };
        let layout = DungeonLayout {
            grid_size: 2,
            seed: 1,
            floors: vec![
                FloorLayout {
                    index: 0,
                    rooms: vec![
                        room(0, 0, 0, [Direction::East].into_iter().collect()),
                        room(1, 0, 0, [Direction::West].into_iter().collect()),
                    ],
                    corridors: vec![corridor],
                    barriers: vec![Barrier::on_corridor(&corridor)],
                    stairwell: Some(Stairwell { cell: to, lower_floor: 0 }),
                },
                FloorLayout {
                    index: 1,
                    rooms: vec![room(1, 0, 1, DirectionSet::EMPTY)],
                    corridors: Vec::new(),
                    barriers: Vec::new(),
                    stairwell: None,
                },
            ],
            key: Some(Key { cell: to, floor: 1 }),
        };

        let mut trace = Trace::default();
        render_layout(&layout, &mut trace);
        assert_eq!(
            trace.0,
            vec![
                "floor 0",
                "room (0, 0)",
                "room (1, 0)",
                "corridor (0, 0) (1, 0)",
                "barrier (0, 0) (1, 0)",
                "stairwell (1, 0)",
                "floor 1",
                "room (1, 0)",
                "key (1, 0)",
            ]
        );
    }

    #[test]
    fn room_origin_scales_by_pitch_and_floor_height() {
        let placement = Placement::default();
        assert!(close(placement.room_origin(GridCell::new(2, 1), 3), [18.0, 9.0, 18.0]));
        assert!((placement.floor_top(0.0) - 0.3).abs() < 1e-9);
    }

    #[test]
    fn open_sides_have_no_walls() {
        let placement = Placement::default();
        let open: DirectionSet = [Direction::East, Direction::North].into_iter().collect();
        let walls = placement.room_walls(&room(0, 0, 0, open));
        let sides: Vec<Direction> = walls.iter().map(|wall| wall.side).collect();
        assert_eq!(sides, vec![Direction::West, Direction::South]);
        assert!(close(walls[0].center, [-3.1, 0.0, 2.8]));
        assert!(close(walls[0].size, [0.2, 6.0, 5.0]));
    }

    #[test]
    fn corridor_sits_on_floor_top_at_midpoint() {
        let placement = Placement::default();
        let corridor = Corridor { floor: 0, from: GridCell::new(0, 0), to: GridCell::new(0, 1) };
        let placed = placement.corridor(&corridor);
        assert!(close(placed.center, [0.0, 4.5, 0.3]));
        assert!(close(placed.size, [2.0, 4.5, 0.1]));
    }

    #[test]
    fn barrier_yaw_follows_facing() {
        let placement = Placement::default();
        let barrier = Barrier {
            floor: 0,
            from: GridCell::new(0, 0),
            to: GridCell::new(1, 0),
            position: GridPoint { x: 0.6, y: 0.0 },
            orientation: (-1, 0),
        };
        let placed = placement.barrier(&barrier);
        assert_eq!(placed.facing, Facing::NegativeX);
        assert!((placed.yaw - PI).abs() < 1e-12);
        assert!(close(placed.center, [5.4, 0.0, 2.8]));
    }

    #[test]
    fn key_floats_above_floor() {
        let placement = Placement::default();
        let key = Key { cell: GridCell::new(1, 1), floor: 0 };
        assert!(close(placement.key(&key), [9.0, 9.0, 0.8]));
    }
}
