use dungeon_core::{DungeonConfig, generate_layout, render_layout};
use proptest::prelude::*;
use tools::ascii::AsciiRenderer;
use tools::layout_file::LayoutFile;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]
    #[test]
    fn ascii_map_has_one_block_per_floor(
        seed in any::<u64>(),
        grid_size in 1_u32..=6,
        floor_count in 1_u32..=4,
        room_probability in 0.0_f64..=1.0,
    ) {
        let config = DungeonConfig {
            grid_size,
            room_probability,
            barrier_probability: 0.5,
            floor_count,
            seed,
        };
        let layout = generate_layout(config).expect("valid config");
        let mut renderer = AsciiRenderer::new(grid_size);
        render_layout(&layout, &mut renderer);
        let text = renderer.finish();

        let headers = text.lines().filter(|line| line.starts_with("Floor ")).count();
        prop_assert_eq!(headers, floor_count as usize);

        let rooms = text.matches(['#', 'S', 'K']).count();
        prop_assert_eq!(rooms, layout.room_count());
    }

    #[test]
    fn exported_layouts_reload_unchanged(seed in any::<u64>(), floor_count in 1_u32..=4) {
        let config = DungeonConfig { floor_count, seed, ..DungeonConfig::default() };
        let layout = generate_layout(config.clone()).expect("valid config");
        let file = LayoutFile::new(config, layout);

        let json = serde_json::to_string(&file).expect("serialize");
        let decoded: LayoutFile = serde_json::from_str(&json).expect("deserialize");
        prop_assert_eq!(decoded.layout.canonical_bytes(), file.layout.canonical_bytes());
        prop_assert_eq!(decoded.config, file.config);
    }
}
