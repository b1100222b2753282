use gridpaint_core::{import_text, pointer_to_cell, EditorSession, Grid, Palette, Tool};
use gridpaint_render::{export_png, import_png, rasterize, ExportMetadata};

#[test]
fn edit_rasterize_and_reload_through_png() {
    let mut session = EditorSession::new(Grid::new(6, 6), Palette::default(), 8);
    session.set_active_value(2);
    session.press(pointer_to_cell(4.0, 4.0, 0.0, 0.0, 8.0, 6, 6));
    session.drag(pointer_to_cell(44.0, 44.0, 0.0, 0.0, 8.0, 6, 6));
    session.release();
    assert_eq!(session.grid().count_of(2), 6);

    let buffer =
        rasterize(session.grid(), session.palette(), session.cell_size(), false).unwrap();
    assert_eq!((buffer.width, buffer.height), (48, 48));
    assert_eq!(buffer.pixel(47, 47), [255, 68, 68, 255]);
    assert_eq!(buffer.pixel(47, 0), [255, 255, 255, 255]);

    let dir = std::env::temp_dir().join("gridpaint_integration_png");
    let _ = std::fs::create_dir_all(&dir);
    let path = dir.join("diagonal.png");
    let meta = ExportMetadata::for_grid(session.grid(), session.cell_size()).unwrap();
    export_png(&buffer, &path, &meta).expect("export should succeed");

    let reloaded = import_png(&path).expect("import should succeed");
    assert_eq!(&reloaded, session.grid());

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn invert_changes_rendered_colors() {
    let mut session = EditorSession::new(Grid::new(2, 2), Palette::default(), 1);
    session.set_tool(Tool::Fill);
    session.set_active_value(4);
    session.press(pointer_to_cell(0.5, 0.5, 0.0, 0.0, 1.0, 2, 2));
    session.release();

    let before = rasterize(session.grid(), session.palette(), 1, false).unwrap();
    assert_eq!(before.pixel(0, 0), [255, 238, 51, 255]);

    assert!(session.invert());
    let after = rasterize(session.grid(), session.palette(), 1, false).unwrap();
    assert_eq!(after.pixel(1, 1), [68, 136, 255, 255]);
}

#[test]
fn palette_switch_without_grid_change() {
    let grid = import_text("[[0, 1], [1, 0]]").unwrap();
    let mono = Palette::new([
        (0, "#000000".parse().unwrap()),
        (1, "#00ff00".parse().unwrap()),
    ])
    .unwrap();

    let a = rasterize(&grid, &Palette::default(), 2, false).unwrap();
    let b = rasterize(&grid, &mono, 2, false).unwrap();
    assert_eq!(a.pixels.len(), b.pixels.len());
    assert_ne!(a.pixels, b.pixels, "different palettes should produce different images");
}
