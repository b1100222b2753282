use gridpaint_core::{
    export_json, flood_fill, import_json, import_text, pointer_to_cell, CellPos, CoreError,
    EditorSession, Grid, Palette, Tool,
};

/// Collect every cell reachable from `seed` through equal 4-neighbours.
fn reachable(grid: &Grid, seed: CellPos) -> Vec<CellPos> {
    let target = grid.get(seed.row, seed.col).unwrap();
    let mut seen = vec![false; grid.cells().len()];
    let mut out = Vec::new();
    let mut stack = vec![seed];
    while let Some(c) = stack.pop() {
        let idx = (c.row * grid.cols() + c.col) as usize;
        if seen[idx] || grid.get(c.row, c.col) != Some(target) {
            continue;
        }
        seen[idx] = true;
        out.push(c);
        let (r, k) = (c.row as i64, c.col as i64);
        for (dr, dc) in [(-1, 0), (1, 0), (0, -1), (0, 1)] {
            let (nr, nc) = (r + dr, k + dc);
            if nr >= 0 && nc >= 0 && grid.contains(nr as u32, nc as u32) {
                stack.push(CellPos::new(nr as u32, nc as u32));
            }
        }
    }
    out
}

#[test]
fn flood_fill_changes_exactly_the_reachable_region() {
    let grid = Grid::from_rows(vec![
        vec![2, 2, 0, 1, 1],
        vec![0, 2, 0, 0, 1],
        vec![2, 2, 2, 0, 0],
        vec![1, 0, 2, 2, 2],
    ])
    .unwrap();
    let seed = CellPos::new(0, 0);
    let region = reachable(&grid, seed);

    let mut filled = grid.clone();
    let n = flood_fill(&mut filled, seed.row, seed.col, 9);
    assert_eq!(n, region.len());

    for r in 0..grid.rows() {
        for c in 0..grid.cols() {
            let in_region = region.contains(&CellPos::new(r, c));
            let expected = if in_region { 9 } else { grid.get(r, c).unwrap() };
            assert_eq!(filled.get(r, c), Some(expected), "cell ({r}, {c})");
        }
    }
}

#[test]
fn every_palette_color_maps_back_to_its_index() {
    let palette = Palette::default();
    for (i, _) in palette.entries() {
        assert_eq!(palette.nearest_index(palette.color_of(i)), i);
    }
}

#[test]
fn pointer_mapping_guards_grid_writes() {
    assert_eq!(pointer_to_cell(25.0, 5.0, 0.0, 0.0, 10.0, 2, 2), None);

    let mut session = EditorSession::new(Grid::new(2, 2), Palette::default(), 10);
    let cell = pointer_to_cell(25.0, 5.0, 0.0, 0.0, 10.0, 2, 2);
    assert!(!session.press(cell));
    session.release();
    assert_eq!(session.grid().count_of(0), 4);
}

#[test]
fn import_examples() {
    let g = import_json(r#"{"bitmap": [[1,2],[3,4]]}"#).unwrap();
    assert_eq!(g.to_rows(), vec![vec![1, 2], vec![3, 4]]);
    assert!(matches!(
        import_json("{}"),
        Err(CoreError::MalformedPayload { .. })
    ));
}

#[test]
fn export_import_round_trip() {
    let g = Grid::from_rows(vec![vec![0, 1], vec![1, 0]]).unwrap();
    assert_eq!(import_text(&export_json(&g).unwrap()).unwrap(), g);
}

#[test]
fn drawing_session_end_to_end() {
    let mut session = EditorSession::new(Grid::new(8, 8), Palette::default(), 10);

    // Draw a closed box outline with drag strokes.
    let corners = [(1, 1), (1, 6), (6, 6), (6, 1), (1, 1)];
    let to_px = |(r, c): (u32, u32)| (c as f32 * 10.0 + 5.0, r as f32 * 10.0 + 5.0);
    let (x0, y0) = to_px(corners[0]);
    session.press(pointer_to_cell(x0, y0, 0.0, 0.0, 10.0, 8, 8));
    for &corner in &corners[1..] {
        let (x, y) = to_px(corner);
        session.drag(pointer_to_cell(x, y, 0.0, 0.0, 10.0, 8, 8));
    }
    session.release();
    assert_eq!(session.grid().count_of(1), 20);

    // Fill the inside; the outline keeps the outside untouched.
    session.set_tool(Tool::Fill);
    session.set_active_value(2);
    session.press(Some(CellPos::new(3, 3)));
    session.release();
    assert_eq!(session.grid().count_of(2), 16);
    assert_eq!(session.grid().count_of(0), 64 - 20 - 16);

    // Grow, then shrink back: nothing is lost.
    let before = session.grid().clone();
    session.resize(12, 12, 10);
    session.resize(8, 8, 10);
    assert_eq!(session.grid(), &before);
}
