//! World-space placement listing, one line per element.

use dungeon_core::render::WorldPoint;
use dungeon_core::{Barrier, Corridor, Key, Placement, Renderer, Room, Stairwell};

pub struct WorldListing {
    placement: Placement,
    out: String,
}

impl WorldListing {
    pub fn new(placement: Placement) -> Self {
        Self { placement, out: String::new() }
    }

    pub fn finish(self) -> String {
        self.out
    }
}

fn point(p: WorldPoint) -> String {
    format!("({:.2}, {:.2}, {:.2})", p[0], p[1], p[2])
}

impl Renderer for WorldListing {
    fn room(&mut self, room: &Room) {
        let origin = self.placement.room_origin(room.cell, room.floor);
        let walls: Vec<&str> = self
            .placement
            .room_walls(room)
            .iter()
            .map(|wall| wall.side.short_name())
            .collect();
        self.out.push_str(&format!(
            "room {} floor {} at {} walls [{}]\n",
            room.cell,
            room.floor,
            point(origin),
            walls.join(",")
        ));
    }

    fn corridor(&mut self, corridor: &Corridor) {
        let placed = self.placement.corridor(corridor);
        self.out.push_str(&format!(
            "corridor {} -> {} floor {} at {} size {}\n",
            corridor.from,
            corridor.to,
            corridor.floor,
            point(placed.center),
            point(placed.size)
        ));
    }

    fn barrier(&mut self, barrier: &Barrier) {
        let placed = self.placement.barrier(barrier);
        self.out.push_str(&format!(
            "barrier {} -> {} floor {} at {} facing {:?} yaw {:.3}\n",
            barrier.from,
            barrier.to,
            barrier.floor,
            point(placed.center),
            placed.facing,
            placed.yaw
        ));
    }

    fn stairwell(&mut self, stairwell: &Stairwell) {
        self.out.push_str(&format!(
            "stairwell {} floors {}-{} at {}\n",
            stairwell.cell,
            stairwell.lower_floor,
            stairwell.upper_floor(),
            point(self.placement.stairwell(stairwell))
        ));
    }

    fn key(&mut self, key: &Key) {
        self.out.push_str(&format!(
            "key {} floor {} at {}\n",
            key.cell,
            key.floor,
            point(self.placement.key(key))
        ));
    }
}
