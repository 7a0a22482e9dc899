use tile_grid_core::error::TileLayoutError;
use tile_grid_core::prelude::*;

fn vga() -> TileSample {
    TileSample::new(640.0, 480.0)
}

#[test]
fn stage_lifecycle_tracks_tiles_and_layouts() {
    let mut stage: Stage = Stage::default();
    assert_eq!(stage.tile_style(), TileStyle::default());

    // Camera granted before the panel was measured.
    let r = stage.add_tile("me".to_string(), None);
    assert_eq!(r, Err(TileLayoutError::LayoutUnavailable));
    assert!(stage.applied().is_none());

    // Panel measured, but no video metadata yet.
    let r = stage.resize(Container::new(1000.0, 600.0));
    assert_eq!(r, Err(TileLayoutError::NoTiles));
    assert_eq!(stage.generation(), 0);

    let one = stage.set_sample("me", vga()).expect("layout");
    assert_eq!(one.tile_count, 1);
    assert!(one.fallback);
    assert_eq!(stage.generation(), 1);

    let two = stage
        .add_tile("peer".to_string(), Some(vga()))
        .expect("layout");
    assert_eq!(two.columns, 2);
    assert!(!two.fallback);
    assert_eq!(two.tile.width, 500.0);
    assert_eq!(two.tile.height, 375.0);
    assert_eq!(stage.tile_style().max_width, "500px");
    assert_eq!(stage.tile_style().max_height, "375px");

    // Duplicate join does not add a second tile.
    stage.add_tile("peer".to_string(), None).expect("layout");
    assert_eq!(stage.tile_count(), 2);
    assert_eq!(stage.tiles()[1].sample, Some(vga()));

    // Unknown removal leaves the list untouched.
    stage.remove_tile("ghost").expect("layout");
    assert_eq!(stage.tile_count(), 2);

    stage.remove_tile("me").expect("layout");
    assert_eq!(stage.tile_count(), 1);
    assert_eq!(stage.tiles()[0].key, "peer");
    assert_eq!(stage.generation(), 5);
}

#[test]
fn failed_relayout_keeps_previous_layout() {
    let mut stage: Stage<u32> = Stage::new(PackerConfig::default());
    let _ = stage.resize(Container::new(1280.0, 720.0));
    stage.add_tile(1, Some(vga())).expect("layout");
    let applied = *stage.applied().expect("applied");
    let generation = stage.generation();

    stage.detach();
    assert_eq!(
        stage.relayout(Trigger::Manual),
        Err(TileLayoutError::LayoutUnavailable)
    );
    assert_eq!(stage.applied(), Some(&applied));
    assert_eq!(stage.generation(), generation);

    // Removing the last tile is a NoTiles pass; the old layout stays too.
    stage.resize(Container::new(1280.0, 720.0)).expect("layout");
    assert_eq!(stage.remove_tile(&1), Err(TileLayoutError::NoTiles));
    assert!(stage.applied().is_some());
}

#[test]
fn resize_recomputes_for_new_geometry() {
    let mut stage: Stage = Stage::default();
    let _ = stage.add_tile("a".into(), Some(vga()));
    let _ = stage.add_tile("b".into(), Some(vga()));
    let _ = stage.add_tile("c".into(), Some(vga()));

    let wide = stage.resize(Container::new(1000.0, 600.0)).expect("layout");
    assert_eq!(wide.columns, 3);
    let tall = stage.resize(Container::new(600.0, 1000.0)).expect("layout");
    assert!(tall.columns < wide.columns);
    assert_eq!(stage.container(), Some(Container::new(600.0, 1000.0)));
}

#[test]
fn clear_resets_tiles_and_style() {
    let mut stage: Stage = Stage::default();
    let _ = stage.resize(Container::new(800.0, 600.0));
    stage.add_tile("a".into(), Some(vga())).expect("layout");
    assert_ne!(stage.tile_style(), TileStyle::default());
    let before = stage.generation();

    stage.clear();
    assert_eq!(stage.generation(), before + 1);
    assert_eq!(stage.tile_count(), 0);
    assert!(stage.applied().is_none());
    assert_eq!(stage.tile_style(), TileStyle::default());
    assert_eq!(stage.container(), Some(Container::new(800.0, 600.0)));

    // The next layout outranks anything computed before the clear.
    let layout = stage.add_tile("b".into(), Some(vga())).expect("layout");
    assert_eq!(layout.tile_count, 1);
    assert_eq!(stage.generation(), before + 2);
}

#[test]
fn first_tile_decides_ratio_ties() {
    let mut stage: Stage = Stage::default();
    let _ = stage.resize(Container::new(1200.0, 1200.0));
    stage
        .add_tile("landscape".into(), Some(TileSample::new(400.0, 300.0)))
        .expect("layout");
    let layout = stage
        .add_tile("portrait".into(), Some(TileSample::new(300.0, 400.0)))
        .expect("layout");
    let ratio = layout.tile.width / layout.tile.height;
    assert!((ratio - 4.0 / 3.0).abs() < 1e-9);
}
