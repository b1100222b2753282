use thiserror::Error;

/// Errors originating from rasterization and PNG I/O.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("invalid cell size: {0} (must be > 0)")]
    InvalidCellSize(u32),

    #[error("invalid image dimensions: {width}×{height}")]
    InvalidDimensions { width: u64, height: u64 },

    #[error("PNG has no embedded GridPaint bitmap")]
    MissingBitmap,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Encoding(#[from] png::EncodingError),

    #[error(transparent)]
    Decoding(#[from] png::DecodingError),

    #[error(transparent)]
    Core(#[from] gridpaint_core::CoreError),
}
