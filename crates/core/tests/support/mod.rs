//! Shared fixtures for the integration suites.

use dungeon_core::{Barrier, Corridor, FloorLayout, Key, Renderer, Room, Stairwell};

/// Counts every callback a renderer receives.
#[derive(Default)]
pub struct CountingRenderer {
    pub floors: usize,
    pub rooms: usize,
    pub corridors: usize,
    pub barriers: usize,
    pub stairwells: usize,
    pub keys: usize,
}

impl Renderer for CountingRenderer {
    fn begin_floor(&mut self, _floor: &FloorLayout) {
        self.floors += 1;
    }

    fn room(&mut self, _room: &Room) {
        self.rooms += 1;
    }

    fn corridor(&mut self, _corridor: &Corridor) {
        self.corridors += 1;
    }

    fn barrier(&mut self, _barrier: &Barrier) {
        self.barriers += 1;
    }

    fn stairwell(&mut self, _stairwell: &Stairwell) {
        self.stairwells += 1;
    }

    fn key(&mut self, _key: &Key) {
        self.keys += 1;
    }
}
