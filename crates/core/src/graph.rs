//! Per-floor room population and the orthogonal adjacency graph over it.

use std::collections::{BTreeMap, BTreeSet};

use crate::rng::RandomSource;
use crate::types::{Direction, DirectionSet, GridCell};

/// Cells that hold a room on one floor, kept in `(x, y)` order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RoomSet {
    cells: BTreeSet<GridCell>,
}

impl RoomSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` when the cell was not already present.
    pub fn insert(&mut self, cell: GridCell) -> bool {
        self.cells.insert(cell)
    }

    pub fn contains(&self, cell: GridCell) -> bool {
        self.cells.contains(&cell)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = GridCell> + '_ {
        self.cells.iter().copied()
    }
}

impl FromIterator<GridCell> for RoomSet {
    fn from_iter<I: IntoIterator<Item = GridCell>>(iter: I) -> Self {
        Self { cells: iter.into_iter().collect() }
    }
}

/// Adjacency over a [`RoomSet`]. The neighbour relation is computed once per room and
/// both corridor edges and wall openings are read from it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FloorGraph {
    neighbors: BTreeMap<GridCell, DirectionSet>,
    edges: Vec<(GridCell, GridCell)>,
}

impl FloorGraph {
    pub fn build(rooms: &RoomSet, grid_size: u32) -> Self {
        let mut neighbors = BTreeMap::new();
        let mut edges = Vec::new();

        for cell in rooms.iter() {
            let mut open = DirectionSet::EMPTY;
            for direction in Direction::ALL {
                let Some(next) = cell.neighbor(direction, grid_size) else {
                    continue;
                };
                if !rooms.contains(next) {
                    continue;
                }
                open.insert(direction);
                // Only the forward half of each pair, so every edge appears once.
                if matches!(direction, Direction::East | Direction::North) {
                    edges.push((cell, next));
                }
            }
            neighbors.insert(cell, open);
        }

        Self { neighbors, edges }
    }

    /// Directions from `cell` toward neighbouring rooms. Empty for cells without a room.
    pub fn open_directions(&self, cell: GridCell) -> DirectionSet {
        self.neighbors.get(&cell).copied().unwrap_or_default()
    }

    /// Edges as `(lower, higher)` pairs in room order, east neighbour before north.
    pub fn edges(&self) -> &[(GridCell, GridCell)] {
        &self.edges
    }

    pub fn room_count(&self) -> usize {
        self.neighbors.len()
    }

    pub fn degree(&self, cell: GridCell) -> usize {
        self.open_directions(cell).len()
    }

    /// Rooms with no neighbouring room. They are kept, never pruned or retried.
    pub fn isolated_rooms(&self) -> impl Iterator<Item = GridCell> + '_ {
        self.neighbors.iter().filter(|(_, open)| open.is_empty()).map(|(cell, _)| *cell)
    }
}

pub struct GraphGenerator {
    grid_size: u32,
    room_probability: f64,
}

impl GraphGenerator {
    pub fn new(grid_size: u32, room_probability: f64) -> Self {
        Self { grid_size, room_probability }
    }

    /// One draw per cell, `x` outer and `y` inner.
    pub fn populate(&self, rng: &mut RandomSource) -> RoomSet {
        let mut rooms = RoomSet::new();
        for x in 0..self.grid_size {
            for y in 0..self.grid_size {
                if rng.chance(self.room_probability) {
                    rooms.insert(GridCell::new(x, y));
                }
            }
        }
        rooms
    }

    pub fn generate_floor_graph(&self, rng: &mut RandomSource) -> (RoomSet, FloorGraph) {
        let rooms = self.populate(rng);
        let graph = FloorGraph::build(&rooms, self.grid_size);
        (rooms, graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(pairs: &[(u32, u32)]) -> RoomSet {
        pairs.iter().map(|&(x, y)| GridCell::new(x, y)).collect()
    }

    #[test]
    fn zero_probability_produces_empty_floor() {
        let mut rng = RandomSource::new(3);
        let (rooms, graph) = GraphGenerator::new(6, 0.0).generate_floor_graph(&mut rng);
        assert!(rooms.is_empty());
        assert!(graph.edges().is_empty());
        assert_eq!(graph.room_count(), 0);
    }

    #[test]
    fn full_probability_produces_full_grid_adjacency() {
        let mut rng = RandomSource::new(3);
        let size = 5;
        let (rooms, graph) = GraphGenerator::new(size, 1.0).generate_floor_graph(&mut rng);
        assert_eq!(rooms.len(), (size * size) as usize);
        // 2 * n * (n - 1) edges in an n x n grid graph.
        assert_eq!(graph.edges().len(), (2 * size * (size - 1)) as usize);
    }

    #[test]
    fn population_consumes_one_draw_per_cell() {
        let mut generated = RandomSource::new(77);
        let mut expected = RandomSource::new(77);
        GraphGenerator::new(3, 0.5).populate(&mut generated);
        for _ in 0..9 {
            expected.next_f64();
        }
        assert_eq!(generated.next_f64().to_bits(), expected.next_f64().to_bits());
    }

    #[test]
    fn edges_are_unique_forward_pairs() {
        let rooms = cells(&[(0, 0), (1, 0), (0, 1), (1, 1)]);
        let graph = FloorGraph::build(&rooms, 2);
        let expected = vec![
            (GridCell::new(0, 0), GridCell::new(1, 0)),
            (GridCell::new(0, 0), GridCell::new(0, 1)),
            (GridCell::new(0, 1), GridCell::new(1, 1)),
            (GridCell::new(1, 0), GridCell::new(1, 1)),
        ];
        assert_eq!(graph.edges(), expected.as_slice());
    }

    #[test]
    fn diagonal_rooms_stay_isolated() {
        let rooms = cells(&[(0, 0), (1, 1)]);
        let graph = FloorGraph::build(&rooms, 2);
        assert!(graph.edges().is_empty());
        assert_eq!(graph.isolated_rooms().count(), 2);
        assert_eq!(graph.degree(GridCell::new(0, 0)), 0);
    }

    #[test]
    fn open_directions_follow_neighbor_existence() {
        let rooms = cells(&[(1, 1), (2, 1), (1, 0)]);
        let graph = FloorGraph::build(&rooms, 3);
        let center = graph.open_directions(GridCell::new(1, 1));
        assert!(center.contains(Direction::East));
        assert!(center.contains(Direction::South));
        assert!(!center.contains(Direction::West));
        assert!(!center.contains(Direction::North));
        assert!(graph.open_directions(GridCell::new(0, 0)).is_empty());
    }
}
