use tile_grid_core::prelude::*;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn four_tiles_4x3_in_1000x600() {
    let layout = pack(
        Some(Container::new(1000.0, 600.0)),
        &[TileSample::new(640.0, 480.0)],
        4,
    )
    .expect("layout");

    // Initial estimate 447 px wide -> the search starts (and stops) at 3 columns.
    assert_eq!(layout.columns, 3);
    assert_eq!(layout.rows, 2);
    assert!(!layout.fallback);
    assert!(close(layout.tile.width, 1000.0 / 3.0));
    assert!(close(layout.tile.height, 250.0));
    assert!(layout.capacity_rows() * layout.columns >= 4);
}

#[test]
fn single_tile_fills_matching_container() {
    let layout = pack(
        Some(Container::new(800.0, 600.0)),
        &[TileSample::new(640.0, 480.0)],
        1,
    )
    .expect("layout");
    assert_eq!(layout.columns, 1);
    assert!(!layout.fallback);
    assert!(close(layout.tile.width, 800.0));
    assert!(close(layout.tile.height, 600.0));
}

#[test]
fn single_tile_in_landscape_container_takes_fallback() {
    // The truncated estimate (894 px) starts the search at 2 columns, beyond n = 1.
    let c = Container::new(1000.0, 600.0);
    let layout = pack(Some(c), &[TileSample::new(640.0, 480.0)], 1).expect("layout");
    assert!(layout.fallback);
    assert_eq!(layout.columns, 2);
    assert_eq!(layout.rows, 1);
    assert!(close(layout.tile.width, 500.0));
    assert_eq!(layout.tile.height, 600.0);
    assert!(layout.tile.width <= c.width);
}

#[test]
fn wide_short_container_with_portrait_reference_falls_back() {
    let c = Container::new(2000.0, 100.0);
    let layout = pack(Some(c), &[TileSample::new(360.0, 960.0)], 50).expect("layout");
    assert!(layout.fallback);
    assert_eq!(layout.tile.height, 100.0);
    assert_eq!(layout.columns, 53);
    assert!(close(layout.tile.width, 2000.0 / 53.0));
}

#[test]
fn wide_short_container_with_landscape_reference_converges() {
    let c = Container::new(2000.0, 100.0);
    let layout = pack(Some(c), &[TileSample::new(640.0, 480.0)], 50).expect("layout");
    assert!(!layout.fallback);
    assert_eq!(layout.columns, 31);
    assert_eq!(layout.rows, 2);
    assert!(layout.tile.height < c.height);
    assert!(layout.capacity_rows() * layout.columns >= 50);
}

#[test]
fn hd_reference_in_hd_container() {
    let layout = pack(
        Some(Container::new(1280.0, 720.0)),
        &[TileSample::new(1280.0, 720.0)],
        9,
    )
    .expect("layout");
    assert_eq!((layout.columns, layout.rows), (4, 3));
    assert!(close(layout.tile.width, 320.0));
    assert!(close(layout.tile.height, 180.0));
}

#[test]
fn portrait_container_stacks_tiles() {
    let c = Container::new(720.0, 1280.0);
    assert_eq!(c.orientation(), Orientation::Portrait);
    let layout = pack(Some(c), &[TileSample::new(1280.0, 720.0)], 3).expect("layout");
    assert_eq!(layout.columns, 1);
    assert_eq!(layout.rows, 3);
    assert!(close(layout.tile.width, 720.0));
    assert!(close(layout.tile.height, 405.0));
}

#[test]
fn square_container_square_tiles() {
    let c = Container::new(600.0, 600.0);
    assert_eq!(c.orientation(), Orientation::Square);
    let layout = pack(Some(c), &[TileSample::new(640.0, 640.0)], 5).expect("layout");
    assert_eq!((layout.columns, layout.rows), (3, 2));
    assert!(close(layout.tile.width, 200.0));
    assert!(close(layout.tile.height, 200.0));
}

#[test]
fn largest_sample_sets_the_ratio() {
    let c = Some(Container::new(1920.0, 1080.0));
    let a = pack(
        c,
        &[TileSample::new(1280.0, 720.0), TileSample::new(640.0, 480.0)],
        4,
    )
    .expect("layout");
    let b = pack(
        c,
        &[TileSample::new(640.0, 480.0), TileSample::new(1280.0, 720.0)],
        4,
    )
    .expect("layout");
    assert_eq!(a, b);
    assert!(close(a.tile.width, 960.0));
    assert!(close(a.tile.height, 540.0));
}

#[test]
fn dominant_policy_ignores_wide_short_outlier() {
    let c = Some(Container::new(1600.0, 900.0));
    let samples = [TileSample::new(640.0, 480.0), TileSample::new(1920.0, 400.0)];

    let by_area = pack(c, &samples, 4).expect("layout");
    assert_eq!(by_area.columns, 2);
    assert!(close(by_area.tile.width / by_area.tile.height, 4.8));

    let cfg = PackerConfig::builder()
        .reference(ReferencePolicy::Dominant)
        .build();
    let dominant = pack_with_config(c, &samples, 4, cfg).expect("layout");
    assert_eq!(dominant.columns, 3);
    assert!(close(dominant.tile.width / dominant.tile.height, 4.0 / 3.0));
}

#[test]
fn exact_rounding_can_start_one_column_earlier() {
    let c = Some(Container::new(2000.0, 100.0));
    let samples = [TileSample::new(360.0, 960.0)];
    let truncated = pack(c, &samples, 50).expect("layout");
    let exact = pack_with_config(
        c,
        &samples,
        50,
        PackerConfig::builder().rounding(Rounding::Exact).build(),
    )
    .expect("layout");
    assert_eq!(truncated.columns, 53);
    assert_eq!(exact.columns, 52);
    assert!(exact.fallback && truncated.fallback);
}

#[test]
fn cells_are_row_major() {
    let layout = pack(
        Some(Container::new(1000.0, 600.0)),
        &[TileSample::new(640.0, 480.0)],
        4,
    )
    .expect("layout");
    let cells = layout.cells();
    assert_eq!(cells.len(), 4);
    assert_eq!((cells[0].x, cells[0].y), (0.0, 0.0));
    assert!(close(cells[2].x, 2000.0 / 3.0));
    assert_eq!(cells[2].y, 0.0);
    assert_eq!(cells[3].x, 0.0);
    assert!(close(cells[3].y, 250.0));
    for cell in &cells {
        assert!(cell.x + cell.width <= 1000.0 + 1e-9);
        assert!(cell.y + cell.height <= 600.0 + 1e-9);
    }
}

#[test]
fn layout_stats_report_occupancy() {
    let layout = pack(
        Some(Container::new(1280.0, 720.0)),
        &[TileSample::new(1280.0, 720.0)],
        9,
    )
    .expect("layout");
    let stats = layout.stats();
    assert_eq!(stats.tile_count, 9);
    assert!(close(stats.tile_area, 320.0 * 180.0));
    assert!(close(stats.used_area, 9.0 * 320.0 * 180.0));
    assert!(close(stats.occupancy, 0.5625));
    assert!(close(stats.wasted_area(), 1280.0 * 720.0 * 0.4375));
    assert!(stats.summary().contains("Grid: 4x3"));
}
