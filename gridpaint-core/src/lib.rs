pub mod coords;
pub mod error;
pub mod fill;
pub mod grid;
pub mod literal;
pub mod palette;
pub mod payload;
pub mod session;

// Re-export primary types for convenience.
pub use coords::{cells_on_segment, pointer_to_cell, CellPos};
pub use error::CoreError;
pub use fill::flood_fill;
pub use grid::{clamp_dimension, Grid, PaletteIndex};
pub use literal::parse_literal;
pub use palette::{invert_grid, Palette, Rgb};
pub use payload::{export_json, import_json, import_text, import_value, BITMAP_KEY};
pub use session::{fit_cell_size, EditorSession, Tool};

/// Convenience result type for the core crate.
pub type Result<T> = std::result::Result<T, CoreError>;
