//! PNG export with the grid embedded as tEXt metadata, and the reverse import.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use gridpaint_core::Grid;
use tracing::debug;

use crate::buffer::RenderBuffer;
use crate::error::RenderError;

const SOFTWARE: &str = "GridPaint";
const KEY_BITMAP: &str = "GridPaint.Bitmap";

/// Metadata to embed in an exported PNG as tEXt chunks.
pub struct ExportMetadata {
    pub rows: u32,
    pub cols: u32,
    pub cell_size: u32,
    /// The grid in its JSON export form, so the PNG can be loaded back.
    pub bitmap_json: String,
}

impl ExportMetadata {
    pub fn for_grid(grid: &Grid, cell_size: u32) -> crate::Result<Self> {
        Ok(Self {
            rows: grid.rows(),
            cols: grid.cols(),
            cell_size,
            bitmap_json: gridpaint_core::export_json(grid)?,
        })
    }
}

/// Write an RGBA pixel buffer as a PNG file with embedded grid metadata.
pub fn export_png(
    buffer: &RenderBuffer,
    path: &Path,
    metadata: &ExportMetadata,
) -> crate::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);

    let mut encoder = png::Encoder::new(writer, buffer.width, buffer.height);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_compression(png::Compression::Default);

    encoder.add_text_chunk("Software".to_string(), SOFTWARE.to_string())?;
    for (key, value) in build_metadata_pairs(metadata) {
        encoder.add_text_chunk(key, value)?;
    }

    let mut png_writer = encoder.write_header()?;
    png_writer.write_image_data(&buffer.pixels)?;
    png_writer.finish()?;

    debug!(
        "Exported PNG {}x{} to {}",
        buffer.width,
        buffer.height,
        path.display()
    );
    Ok(())
}

/// The grid JSON embedded by [`export_png`], if the file carries one.
pub fn read_png_bitmap(path: &Path) -> crate::Result<Option<String>> {
    let decoder = png::Decoder::new(BufReader::new(File::open(path)?));
    let reader = decoder.read_info()?;
    let text = reader
        .info()
        .uncompressed_latin1_text
        .iter()
        .find(|t| t.keyword == KEY_BITMAP)
        .map(|t| t.text.clone());
    Ok(text)
}

/// Load the grid embedded in a PNG written by [`export_png`].
pub fn import_png(path: &Path) -> crate::Result<Grid> {
    let json = read_png_bitmap(path)?.ok_or(RenderError::MissingBitmap)?;
    Ok(gridpaint_core::import_json(&json)?)
}

fn build_metadata_pairs(meta: &ExportMetadata) -> Vec<(String, String)> {
    vec![
        ("GridPaint.Rows".into(), meta.rows.to_string()),
        ("GridPaint.Cols".into(), meta.cols.to_string()),
        ("GridPaint.CellSize".into(), meta.cell_size.to_string()),
        (KEY_BITMAP.into(), meta.bitmap_json.clone()),
    ]
}
