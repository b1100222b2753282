use tracing::debug;

use crate::error::CoreError;

/// A palette index stored in a grid cell.
pub type PaletteIndex = u32;

/// Coerce a requested dimension (rows, cols, or cell size) to at least 1.
#[inline]
pub fn clamp_dimension(value: i64) -> u32 {
    value.clamp(1, u32::MAX as i64) as u32
}

/// A rectangular bitmap of palette indices.
///
/// Cells are stored row-major in a single flat buffer.  Both dimensions are
/// always at least 1, and a fresh grid is filled with index 0 (the
/// background entry of every palette).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: u32,
    cols: u32,
    data: Vec<PaletteIndex>,
}

impl Grid {
    /// Create a `rows × cols` grid of zeros.  Zero dimensions are raised to 1.
    pub fn new(rows: u32, cols: u32) -> Self {
        let rows = rows.max(1);
        let cols = cols.max(1);
        Self {
            rows,
            cols,
            data: vec![0; rows as usize * cols as usize],
        }
    }

    /// Build a grid from nested rows, rejecting empty or ragged input.
    pub fn from_rows(rows: Vec<Vec<PaletteIndex>>) -> crate::Result<Self> {
        let row_count = rows.len();
        if row_count == 0 {
            return Err(CoreError::malformed("grid has no rows"));
        }
        let cols = rows[0].len();
        if cols == 0 {
            return Err(CoreError::malformed("grid rows are empty"));
        }
        if let Some((i, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != cols) {
            return Err(CoreError::malformed(format!(
                "row {i} has {} cells, expected {cols}",
                row.len()
            )));
        }
        if row_count > u32::MAX as usize || cols > u32::MAX as usize {
            return Err(CoreError::malformed("grid dimensions too large"));
        }
        Ok(Self {
            rows: row_count as u32,
            cols: cols as u32,
            data: rows.into_iter().flatten().collect(),
        })
    }

    /// Copy the grid out as nested rows.
    pub fn to_rows(&self) -> Vec<Vec<PaletteIndex>> {
        self.data
            .chunks_exact(self.cols as usize)
            .map(<[PaletteIndex]>::to_vec)
            .collect()
    }

    #[inline]
    pub fn rows(&self) -> u32 {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> u32 {
        self.cols
    }

    #[inline]
    pub fn contains(&self, row: u32, col: u32) -> bool {
        row < self.rows && col < self.cols
    }

    #[inline]
    fn offset(&self, row: u32, col: u32) -> usize {
        row as usize * self.cols as usize + col as usize
    }

    /// Value at `(row, col)`, or `None` outside the grid.
    #[inline]
    pub fn get(&self, row: u32, col: u32) -> Option<PaletteIndex> {
        if self.contains(row, col) {
            Some(self.data[self.offset(row, col)])
        } else {
            None
        }
    }

    /// Set a cell, returning whether its value actually changed.
    ///
    /// Writing the value a cell already holds is a no-op, so callers can use
    /// the return value to decide whether a redraw is needed.  Coordinates
    /// outside the grid are ignored.
    pub fn set(&mut self, row: u32, col: u32, value: PaletteIndex) -> bool {
        if !self.contains(row, col) {
            return false;
        }
        let idx = self.offset(row, col);
        if self.data[idx] == value {
            return false;
        }
        self.data[idx] = value;
        true
    }

    /// Return a new grid of the requested size with the old contents
    /// anchored at the top-left corner.
    ///
    /// Cells that exist in both bounds keep their value; newly exposed cells
    /// are 0.  Zero dimensions are raised to 1.
    pub fn resized(&self, new_rows: u32, new_cols: u32) -> Self {
        let mut out = Self::new(new_rows, new_cols);
        let keep_rows = self.rows.min(out.rows) as usize;
        let keep_cols = self.cols.min(out.cols) as usize;
        for r in 0..keep_rows {
            let src = r * self.cols as usize;
            let dst = r * out.cols as usize;
            out.data[dst..dst + keep_cols].copy_from_slice(&self.data[src..src + keep_cols]);
        }
        debug!(
            "Resized grid {}x{} -> {}x{}",
            self.rows, self.cols, out.rows, out.cols
        );
        out
    }

    /// Reset every cell to index 0.  Returns whether anything changed.
    pub fn clear(&mut self) -> bool {
        let dirty = self.data.iter().any(|&v| v != 0);
        if dirty {
            self.data.fill(0);
        }
        dirty
    }

    /// Number of cells holding `value`.
    pub fn count_of(&self, value: PaletteIndex) -> usize {
        self.data.iter().filter(|&&v| v == value).count()
    }

    /// Flat row-major view of the cells.
    pub fn cells(&self) -> &[PaletteIndex] {
        &self.data
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [PaletteIndex] {
        &mut self.data
    }

    /// Iterate over rows as slices.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[PaletteIndex]> {
        self.data.chunks_exact(self.cols as usize)
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(16, 16)
    }
}
