//! Plain-text floor maps.
//!
//! Each floor is drawn on a `(2n - 1)`-wide character grid: rooms on even coordinates,
//! corridors between them. North is up.

use dungeon_core::{Barrier, Corridor, FloorLayout, GridCell, Key, Renderer, Room, Stairwell};

const EMPTY: char = '.';
const GAP: char = ' ';
const ROOM: char = '#';
const STAIRS: char = 'S';
const KEY: char = 'K';
const HORIZONTAL: char = '-';
const VERTICAL: char = '|';
const DOOR: char = '+';

struct Canvas {
    floor: u32,
    cells: Vec<char>,
}

pub struct AsciiRenderer {
    width: usize,
    canvases: Vec<Canvas>,
}

impl AsciiRenderer {
    pub fn new(grid_size: u32) -> Self {
        Self { width: (grid_size as usize * 2).saturating_sub(1), canvases: Vec::new() }
    }

    fn plot(&mut self, floor: u32, column: usize, row: usize, glyph: char) {
        let width = self.width;
        if let Some(canvas) = self.canvases.iter_mut().find(|canvas| canvas.floor == floor) {
            canvas.cells[row * width + column] = glyph;
        }
    }

    fn plot_cell(&mut self, floor: u32, cell: GridCell, glyph: char) {
        self.plot(floor, cell.x as usize * 2, cell.y as usize * 2, glyph);
    }

    fn plot_between(&mut self, floor: u32, from: GridCell, to: GridCell, glyph: char) {
        let column = from.x as usize + to.x as usize;
        let row = from.y as usize + to.y as usize;
        self.plot(floor, column, row, glyph);
    }

    pub fn finish(self) -> String {
        let mut out = String::new();
        for canvas in &self.canvases {
            if !out.is_empty() {
                out.push('\n');
            }
            out.push_str(&format!("Floor {}\n", canvas.floor));
            for row in canvas.cells.chunks(self.width.max(1)).rev() {
                out.extend(row.iter());
                out.push('\n');
            }
        }
        out
    }
}

impl Renderer for AsciiRenderer {
    fn begin_floor(&mut self, floor: &FloorLayout) {
        let width = self.width;
        let cells = (0..width * width)
            .map(|index| {
                let (column, row) = (index % width, index / width);
                if column % 2 == 0 && row % 2 == 0 { EMPTY } else { GAP }
            })
            .collect();
        self.canvases.push(Canvas { floor: floor.index, cells });
    }

    fn room(&mut self, room: &Room) {
        self.plot_cell(room.floor, room.cell, ROOM);
    }

    fn corridor(&mut self, corridor: &Corridor) {
        let glyph = if corridor.is_horizontal() { HORIZONTAL } else { VERTICAL };
        self.plot_between(corridor.floor, corridor.from, corridor.to, glyph);
    }

    fn barrier(&mut self, barrier: &Barrier) {
        self.plot_between(barrier.floor, barrier.from, barrier.to, DOOR);
    }

    fn stairwell(&mut self, stairwell: &Stairwell) {
        self.plot_cell(stairwell.lower_floor, stairwell.cell, STAIRS);
    }

    fn key(&mut self, key: &Key) {
        self.plot_cell(key.floor, key.cell, KEY);
    }
}
