use gridpaint_core::{Grid, Palette, Rgb};
use rayon::prelude::*;
use tracing::debug;

use crate::error::RenderError;

/// Grid lines are only drawn when cells are at least this many pixels wide.
const MIN_CELL_FOR_LINES: u32 = 4;

/// An RGBA pixel buffer representing a rendered grid.
#[derive(Debug, Clone)]
pub struct RenderBuffer {
    pub width: u32,
    pub height: u32,
    /// RGBA pixel data, 4 bytes per pixel, row-major order.
    pub pixels: Vec<u8>,
}

impl RenderBuffer {
    /// Create a new buffer filled with opaque black.
    pub fn new(width: u32, height: u32) -> Self {
        let mut pixels = vec![0u8; width as usize * height as usize * 4];
        for chunk in pixels.chunks_exact_mut(4) {
            chunk[3] = 255;
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    /// RGBA value at pixel `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = (y as usize * self.width as usize + x as usize) * 4;
        [
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ]
    }
}

/// Paint every cell as a `cell_px × cell_px` block of its palette color.
///
/// With `grid_lines`, the top and left pixel edge of each cell is darkened
/// (skipped for cells smaller than 4 px).  Pixel rows are filled in
/// parallel.
pub fn rasterize(
    grid: &Grid,
    palette: &Palette,
    cell_px: u32,
    grid_lines: bool,
) -> crate::Result<RenderBuffer> {
    if cell_px == 0 {
        return Err(RenderError::InvalidCellSize(cell_px));
    }
    let width = grid.cols() as u64 * cell_px as u64;
    let height = grid.rows() as u64 * cell_px as u64;
    if width > u32::MAX as u64 || height > u32::MAX as u64 || width * height > (1 << 30) {
        return Err(RenderError::InvalidDimensions { width, height });
    }
    let (width, height) = (width as u32, height as u32);
    let lines = grid_lines && cell_px >= MIN_CELL_FOR_LINES;
    let stride = width as usize * 4;

    let mut buf = RenderBuffer::new(width, height);
    buf.pixels
        .par_chunks_mut(stride)
        .enumerate()
        .for_each(|(y, line)| {
            let y = y as u32;
            let row = y / cell_px;
            let row_edge = lines && y % cell_px == 0;
            for (x, pixel) in line.chunks_exact_mut(4).enumerate() {
                let x = x as u32;
                let col = x / cell_px;
                let value = grid.get(row, col).unwrap_or(0);
                let mut color = palette.color_of(value);
                if row_edge || (lines && x % cell_px == 0) {
                    color = line_color(color);
                }
                pixel[0] = color.r;
                pixel[1] = color.g;
                pixel[2] = color.b;
                pixel[3] = 255;
            }
        });

    debug!(
        "Rasterized {}x{} grid at {} px/cell -> {}x{}",
        grid.rows(),
        grid.cols(),
        cell_px,
        width,
        height
    );
    Ok(buf)
}

/// Darken a cell color by a quarter for its border pixels.
#[inline]
fn line_color(c: Rgb) -> Rgb {
    Rgb::new(
        (c.r as u16 * 3 / 4) as u8,
        (c.g as u16 * 3 / 4) as u8,
        (c.b as u16 * 3 / 4) as u8,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_buffer_is_black_opaque() {
        let buf = RenderBuffer::new(4, 4);
        assert_eq!(buf.pixels.len(), 4 * 4 * 4);
        for chunk in buf.pixels.chunks_exact(4) {
            assert_eq!(chunk, &[0, 0, 0, 255]);
        }
    }

    #[test]
    fn rasterize_scales_cells() {
        let grid = Grid::from_rows(vec![vec![0, 1], vec![2, 0]]).unwrap();
        let palette = Palette::default();
        let buf = rasterize(&grid, &palette, 3, false).unwrap();
        assert_eq!((buf.width, buf.height), (6, 6));
        assert_eq!(buf.pixel(0, 0), [255, 255, 255, 255]);
        assert_eq!(buf.pixel(5, 2), [0, 0, 0, 255]);
        assert_eq!(buf.pixel(2, 3), [255, 68, 68, 255]);
        assert_eq!(buf.pixel(3, 3), [255, 255, 255, 255]);
    }

    #[test]
    fn unregistered_values_render_as_background() {
        let grid = Grid::from_rows(vec![vec![99]]).unwrap();
        let buf = rasterize(&grid, &Palette::default(), 1, false).unwrap();
        assert_eq!(buf.pixel(0, 0), [255, 255, 255, 255]);
    }

    #[test]
    fn grid_lines_darken_cell_edges() {
        let grid = Grid::new(2, 2);
        let buf = rasterize(&grid, &Palette::default(), 4, true).unwrap();
        assert_eq!(buf.pixel(0, 0), [191, 191, 191, 255]);
        assert_eq!(buf.pixel(4, 1), [191, 191, 191, 255]);
        assert_eq!(buf.pixel(1, 1), [255, 255, 255, 255]);

        // Too small for lines.
        let buf = rasterize(&grid, &Palette::default(), 2, true).unwrap();
        assert_eq!(buf.pixel(0, 0), [255, 255, 255, 255]);
    }

    #[test]
    fn zero_cell_size_is_rejected() {
        let grid = Grid::new(1, 1);
        assert!(matches!(
            rasterize(&grid, &Palette::default(), 0, false),
            Err(RenderError::InvalidCellSize(0))
        ));
    }
}
