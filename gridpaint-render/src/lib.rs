pub mod buffer;
pub mod error;
pub mod export;

pub use buffer::{rasterize, RenderBuffer};
pub use error::RenderError;
pub use export::{export_png, import_png, read_png_bitmap, ExportMetadata};

/// Convenience result type for the render crate.
pub type Result<T> = std::result::Result<T, RenderError>;
