use std::collections::BTreeSet;

use dungeon_core::{Direction, DungeonConfig, DungeonLayout, generate_layout};
use proptest::prelude::*;

fn assert_layout_properties(layout: &DungeonLayout, config: &DungeonConfig) {
    assert_eq!(layout.floors.len(), config.floor_count as usize);

    for (position, floor) in layout.floors.iter().enumerate() {
        assert_eq!(floor.index as usize, position, "floor indices are contiguous from 0");

        for room in &floor.rooms {
            assert!(room.cell.x < config.grid_size && room.cell.y < config.grid_size);
            for direction in Direction::ALL {
                let neighbor_is_room = room
                    .cell
                    .neighbor(direction, config.grid_size)
                    .is_some_and(|cell| floor.has_room(cell));
                assert_eq!(room.open.contains(direction), neighbor_is_room);
            }
        }

        let mut edges = BTreeSet::new();
        for corridor in &floor.corridors {
            assert_ne!(corridor.from, corridor.to, "no self loops");
            assert!(corridor.from.is_orthogonally_adjacent(corridor.to), "no diagonal edges");
            assert!(floor.has_room(corridor.from) && floor.has_room(corridor.to));
            assert!(edges.insert((corridor.from, corridor.to)), "no duplicate edges");
        }

        let is_top = position + 1 == layout.floors.len();
        if !is_top && !floor.rooms.is_empty() {
            let stairwell = floor.stairwell.expect("populated lower floors get a stairwell");
            assert!(floor.has_room(stairwell.cell));
            assert!(layout.floors[position + 1].has_room(stairwell.cell));
        } else {
            assert!(floor.stairwell.is_none());
        }
    }

    let top = layout.top_floor().expect("at least one floor");
    match layout.key {
        Some(key) => {
            assert_eq!(key.floor, top.index);
            assert!(top.has_room(key.cell));
        }
        None => assert!(top.rooms.is_empty(), "a populated top floor always gets the key"),
    }
}

#[test]
fn sparse_dungeons_never_choose_from_an_empty_floor() {
    // Low probabilities make empty floors common; generation must skip them, not panic.
    for seed in 0..500 {
        let config = DungeonConfig {
            grid_size: 2,
            room_probability: 0.1,
            barrier_probability: 0.5,
            floor_count: 6,
            seed,
        };
        let layout = generate_layout(config.clone()).expect("valid config");
        assert_layout_properties(&layout, &config);
        layout.check_invariants().expect("invariants hold");
    }
}

#[test]
fn empty_floor_breaks_the_vertical_chain_without_error() {
    let mut saw_gap = false;
    for seed in 0..500 {
        let config = DungeonConfig {
            grid_size: 2,
            room_probability: 0.15,
            barrier_probability: 0.0,
            floor_count: 4,
            seed,
        };
        let layout = generate_layout(config).expect("valid config");
        let lower = &layout.floors[..layout.floors.len() - 1];
        if lower.iter().any(|floor| floor.rooms.is_empty()) {
            saw_gap = true;
            layout.check_invariants().expect("a gap is a valid outcome");
        }
    }
    assert!(saw_gap, "sparse settings should produce at least one empty lower floor");
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]
    #[test]
    fn generated_layouts_satisfy_structural_invariants(
        seed in any::<u64>(),
        grid_size in 1_u32..=8,
        room_probability in 0.0_f64..=1.0,
        barrier_probability in 0.0_f64..=1.0,
        floor_count in 1_u32..=5,
    ) {
        let config = DungeonConfig {
            grid_size,
            room_probability,
            barrier_probability,
            floor_count,
            seed,
        };
        let layout = generate_layout(config.clone()).expect("valid config");
        assert_layout_properties(&layout, &config);
        prop_assert_eq!(layout.check_invariants(), Ok(()));

        let again = generate_layout(config).expect("valid config");
        prop_assert_eq!(layout.canonical_bytes(), again.canonical_bytes());
    }

    #[test]
    fn out_of_range_probabilities_are_rejected(
        probability in prop_oneof![-10.0_f64..-0.000_001, 1.000_001_f64..10.0],
    ) {
        let config = DungeonConfig { room_probability: probability, ..DungeonConfig::default() };
        prop_assert!(generate_layout(config).is_err());

        let config = DungeonConfig { barrier_probability: probability, ..DungeonConfig::default() };
        prop_assert!(generate_layout(config).is_err());
    }
}
