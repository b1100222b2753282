/// A cell position inside a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellPos {
    pub row: u32,
    pub col: u32,
}

impl CellPos {
    pub const fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }
}

/// Map a pointer position to the grid cell underneath it.
///
/// The grid's top-left corner sits at `(origin_x, origin_y)` and each cell
/// is `cell_size` pixels square.  Returns `None` when the pointer lies
/// outside `[0, rows) × [0, cols)`; this is the only bounds check standing
/// between pointer events and grid writes.
pub fn pointer_to_cell(
    pointer_x: f32,
    pointer_y: f32,
    origin_x: f32,
    origin_y: f32,
    cell_size: f32,
    rows: u32,
    cols: u32,
) -> Option<CellPos> {
    if cell_size.is_nan() || cell_size <= 0.0 {
        return None;
    }
    let col = ((pointer_x - origin_x) / cell_size).floor();
    let row = ((pointer_y - origin_y) / cell_size).floor();
    if !row.is_finite() || !col.is_finite() || row < 0.0 || col < 0.0 {
        return None;
    }
    if row >= rows as f32 || col >= cols as f32 {
        return None;
    }
    Some(CellPos::new(row as u32, col as u32))
}

/// Every cell on the straight line from `from` to `to`, endpoints included.
///
/// Used by drag painting so a fast pointer that jumps several cells between
/// two move events still leaves a continuous stroke.
pub fn cells_on_segment(from: CellPos, to: CellPos) -> Vec<CellPos> {
    let (mut x, mut y) = (from.col as i64, from.row as i64);
    let (x1, y1) = (to.col as i64, to.row as i64);
    let dx = (x1 - x).abs();
    let dy = -(y1 - y).abs();
    let sx = if x < x1 { 1 } else { -1 };
    let sy = if y < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    let mut cells = Vec::with_capacity((dx.max(-dy) + 1) as usize);
    loop {
        cells.push(CellPos::new(y as u32, x as u32));
        if x == x1 && y == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
    cells
}
