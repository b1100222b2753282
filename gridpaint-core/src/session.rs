use serde_json::Value;
use tracing::{debug, info};

use crate::coords::{cells_on_segment, CellPos};
use crate::fill::flood_fill;
use crate::grid::{clamp_dimension, Grid, PaletteIndex};
use crate::palette::{invert_grid, Palette};
use crate::payload::{export_json, import_text, import_value};

/// Maximum undo/redo history entries.
pub const MAX_HISTORY: usize = 100;

pub const DEFAULT_ROWS: u32 = 16;
pub const DEFAULT_COLS: u32 = 16;
pub const DEFAULT_CELL_SIZE: u32 = 24;

/// Cell size bounds applied when a loaded grid is fitted to the view.
const FIT_MIN_CELL: u32 = 8;
const FIT_MAX_CELL: u32 = 28;
/// Pixel extent a loaded grid's longer side is fitted into.
const FIT_EXTENT: u32 = 256;

/// Cell size that fits a `rows`×`cols` grid into roughly 256 px, bounded to
/// 8..=28.
pub fn fit_cell_size(rows: u32, cols: u32) -> u32 {
    (FIT_EXTENT / rows.max(cols).max(1)).clamp(FIT_MIN_CELL, FIT_MAX_CELL)
}

/// What a press on the canvas does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tool {
    /// Set single cells; dragging paints a continuous stroke.
    #[default]
    Paint,
    /// Like [`Paint`](Self::Paint) but always writes the background value 0.
    Erase,
    /// Flood-fill the 4-connected region under the pointer.
    Fill,
    /// Take the active value from the cell under the pointer.
    Pick,
}

impl Tool {
    pub fn label(self) -> &'static str {
        match self {
            Self::Paint => "Paint",
            Self::Erase => "Erase",
            Self::Fill => "Fill",
            Self::Pick => "Pick",
        }
    }

    /// Whether the tool paints single cells along a drag.
    pub fn is_brush(self) -> bool {
        matches!(self, Self::Paint | Self::Erase)
    }
}

/// All mutable editor state for one grid.
///
/// Pointer events arrive already mapped to cells (see
/// [`pointer_to_cell`](crate::pointer_to_cell)); `None` means the pointer is
/// outside the grid.  Every mutating call returns whether something visible
/// changed, and [`revision`](Self::revision) increases with each such change
/// so a renderer can skip redraws.
#[derive(Debug, Clone)]
pub struct EditorSession {
    grid: Grid,
    palette: Palette,
    active_value: PaletteIndex,
    tool: Tool,
    cell_size: u32,

    drawing: bool,
    last_cell: Option<CellPos>,
    /// Set once the current brush stroke has pushed its undo snapshot.
    stroke_recorded: bool,

    undo: Vec<Grid>,
    redo: Vec<Grid>,
    revision: u64,
}

impl EditorSession {
    pub fn new(grid: Grid, palette: Palette, cell_size: u32) -> Self {
        let active_value = if palette.contains(1) { 1 } else { 0 };
        Self {
            grid,
            palette,
            active_value,
            tool: Tool::default(),
            cell_size: cell_size.max(1),
            drawing: false,
            last_cell: None,
            stroke_recorded: false,
            undo: Vec::new(),
            redo: Vec::new(),
            revision: 0,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn active_value(&self) -> PaletteIndex {
        self.active_value
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn cell_size(&self) -> u32 {
        self.cell_size
    }

    pub fn is_drawing(&self) -> bool {
        self.drawing
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub fn set_tool(&mut self, tool: Tool) {
        self.tool = tool;
    }

    /// Select the value to paint with.  Indices missing from the palette are
    /// ignored; returns whether the selection was accepted.
    pub fn set_active_value(&mut self, value: PaletteIndex) -> bool {
        if !self.palette.contains(value) {
            return false;
        }
        self.active_value = value;
        true
    }

    /// Replace the palette.  The active value falls back to 0 if the new
    /// palette does not register it.
    pub fn set_palette(&mut self, palette: Palette) {
        if !palette.contains(self.active_value) {
            self.active_value = 0;
        }
        self.palette = palette;
        self.revision += 1;
    }

    // -----------------------------------------------------------------------
    // Pointer gestures
    // -----------------------------------------------------------------------

    /// Pointer pressed on the canvas.  Starts a drag and applies the tool.
    pub fn press(&mut self, cell: Option<CellPos>) -> bool {
        self.drawing = true;
        self.last_cell = None;
        self.stroke_recorded = false;
        let Some(cell) = cell else {
            return false;
        };
        match self.tool {
            Tool::Paint | Tool::Erase => self.paint_segment(cell),
            Tool::Fill => {
                let before = self.grid.clone();
                let filled = flood_fill(&mut self.grid, cell.row, cell.col, self.active_value);
                if filled > 0 {
                    debug!("Filled {filled} cells from ({}, {})", cell.row, cell.col);
                    self.commit(before);
                }
                filled > 0
            }
            Tool::Pick => {
                // Values the palette does not register are not selectable.
                if let Some(value) = self.grid.get(cell.row, cell.col) {
                    self.set_active_value(value);
                }
                false
            }
        }
    }

    /// Pointer moved.  Paints while a brush drag is active.
    pub fn drag(&mut self, cell: Option<CellPos>) -> bool {
        if !self.drawing || !self.tool.is_brush() {
            return false;
        }
        match cell {
            Some(cell) => self.paint_segment(cell),
            None => {
                self.last_cell = None;
                false
            }
        }
    }

    /// Pointer released anywhere.  Ends the drag.
    pub fn release(&mut self) {
        self.drawing = false;
        self.last_cell = None;
        self.stroke_recorded = false;
    }

    /// Paint every cell from the previous drag position to `cell`.
    fn paint_segment(&mut self, cell: CellPos) -> bool {
        let cells = match self.last_cell {
            Some(prev) if prev == cell => return false,
            Some(prev) => cells_on_segment(prev, cell),
            None => vec![cell],
        };
        self.last_cell = Some(cell);

        let value = match self.tool {
            Tool::Erase => 0,
            _ => self.active_value,
        };
        let mut changed = false;
        for c in cells {
            if self.grid.contains(c.row, c.col) && self.grid.get(c.row, c.col) != Some(value) {
                // Snapshot only once the stroke really changes something.
                if !self.stroke_recorded {
                    self.push_undo(self.grid.clone());
                    self.stroke_recorded = true;
                }
                changed |= self.grid.set(c.row, c.col, value);
            }
        }
        if changed {
            self.revision += 1;
        }
        changed
    }

    // -----------------------------------------------------------------------
    // Whole-grid actions
    // -----------------------------------------------------------------------

    /// Resize the grid and cell size.  Each value is coerced to at least 1.
    pub fn resize(&mut self, rows: i64, cols: i64, cell_size: i64) -> bool {
        let rows = clamp_dimension(rows);
        let cols = clamp_dimension(cols);
        let cell_size = clamp_dimension(cell_size);
        let mut changed = false;
        if cell_size != self.cell_size {
            self.cell_size = cell_size;
            self.revision += 1;
            changed = true;
        }
        if rows != self.grid.rows() || cols != self.grid.cols() {
            let resized = self.grid.resized(rows, cols);
            let before = std::mem::replace(&mut self.grid, resized);
            self.commit(before);
            changed = true;
        }
        changed
    }

    /// Reset every cell to the background value.
    pub fn clear(&mut self) -> bool {
        let before = self.grid.clone();
        let changed = self.grid.clear();
        if changed {
            self.commit(before);
        }
        changed
    }

    /// Invert every cell's color, snapped back onto the palette.
    pub fn invert(&mut self) -> bool {
        let before = self.grid.clone();
        let changed = invert_grid(&mut self.grid, &self.palette) > 0;
        if changed {
            self.commit(before);
        }
        changed
    }

    /// Replace the grid with one parsed from pasted text or file contents.
    ///
    /// On error the current grid is left untouched.
    pub fn load_text(&mut self, text: &str) -> crate::Result<()> {
        let grid = import_text(text)?;
        self.load_grid(grid);
        Ok(())
    }

    /// Replace the grid with one decoded from a JSON value.
    ///
    /// On error the current grid is left untouched.
    pub fn load_value(&mut self, value: &Value) -> crate::Result<()> {
        let grid = import_value(value)?;
        self.load_grid(grid);
        Ok(())
    }

    /// Replace the grid wholesale as one undoable step and refit the cell
    /// size with [`fit_cell_size`].
    pub fn load_grid(&mut self, grid: Grid) {
        info!("Loaded {}x{} grid", grid.rows(), grid.cols());
        self.release();
        self.cell_size = fit_cell_size(grid.rows(), grid.cols());
        let before = std::mem::replace(&mut self.grid, grid);
        self.commit(before);
    }

    pub fn export_json(&self) -> crate::Result<String> {
        export_json(&self.grid)
    }

    // -----------------------------------------------------------------------
    // History
    // -----------------------------------------------------------------------

    pub fn undo(&mut self) -> bool {
        let Some(prev) = self.undo.pop() else {
            return false;
        };
        self.release();
        let current = std::mem::replace(&mut self.grid, prev);
        self.redo.push(current);
        self.revision += 1;
        true
    }

    pub fn redo(&mut self) -> bool {
        let Some(next) = self.redo.pop() else {
            return false;
        };
        self.release();
        let current = std::mem::replace(&mut self.grid, next);
        self.undo.push(current);
        self.revision += 1;
        true
    }

    fn commit(&mut self, before: Grid) {
        self.push_undo(before);
        self.revision += 1;
    }

    fn push_undo(&mut self, before: Grid) {
        self.undo.push(before);
        if self.undo.len() > MAX_HISTORY {
            self.undo.remove(0);
        }
        self.redo.clear();
    }
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new(
            Grid::new(DEFAULT_ROWS, DEFAULT_COLS),
            Palette::default(),
            DEFAULT_CELL_SIZE,
        )
    }
}
