use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use gridpaint_core::session::{DEFAULT_CELL_SIZE, DEFAULT_COLS, DEFAULT_ROWS};

/// Largest grid side the UI allows.
pub const MAX_GRID_SIDE: u32 = 512;
/// Largest cell size (pixels) the UI allows.
pub const MAX_CELL_SIZE: u32 = 64;

const PREFERENCES_FILE: &str = "preferences.json";

/// Reject grids with a side over [`MAX_GRID_SIDE`]; the canvas texture holds
/// one texel per cell.
pub fn check_grid_side(rows: u32, cols: u32) -> Result<(), String> {
    if rows > MAX_GRID_SIDE || cols > MAX_GRID_SIDE {
        return Err(format!(
            "{rows}×{cols} grid exceeds the {MAX_GRID_SIDE}×{MAX_GRID_SIDE} limit"
        ));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Last-size snapshot
// ---------------------------------------------------------------------------

/// Grid dimensions from the previous session, restored on startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastSize {
    pub rows: u32,
    pub cols: u32,
    pub cell_size: u32,
}

// ---------------------------------------------------------------------------
// Application preferences
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppPreferences {
    #[serde(default = "default_window_width")]
    pub window_width: f32,
    #[serde(default = "default_window_height")]
    pub window_height: f32,
    #[serde(default = "default_rows")]
    pub default_rows: u32,
    #[serde(default = "default_cols")]
    pub default_cols: u32,
    #[serde(default = "default_cell_size")]
    pub default_cell_size: u32,
    /// Overlay cell borders on the canvas.
    #[serde(default = "default_true")]
    pub show_grid_lines: bool,
    /// Bake cell borders into exported PNGs.
    #[serde(default)]
    pub export_grid_lines: bool,
    #[serde(default = "default_true")]
    pub restore_last_size: bool,
    #[serde(default)]
    pub last_size: Option<LastSize>,
    /// Palette file name, resolved next to the executable.
    #[serde(default = "default_palette_file")]
    pub palette_file: String,
}

fn default_window_width() -> f32 {
    1100.0
}
fn default_window_height() -> f32 {
    760.0
}
fn default_rows() -> u32 {
    DEFAULT_ROWS
}
fn default_cols() -> u32 {
    DEFAULT_COLS
}
fn default_cell_size() -> u32 {
    DEFAULT_CELL_SIZE
}
fn default_true() -> bool {
    true
}
fn default_palette_file() -> String {
    "palette.json".to_string()
}

impl Default for AppPreferences {
    fn default() -> Self {
        Self {
            window_width: default_window_width(),
            window_height: default_window_height(),
            default_rows: default_rows(),
            default_cols: default_cols(),
            default_cell_size: default_cell_size(),
            show_grid_lines: true,
            export_grid_lines: false,
            restore_last_size: true,
            last_size: None,
            palette_file: default_palette_file(),
        }
    }
}

impl AppPreferences {
    /// Load preferences from next to the executable, falling back to defaults.
    pub fn load() -> Self {
        let path = config_path();
        if path.exists() {
            match fs::read_to_string(&path) {
                Ok(json) => match serde_json::from_str::<AppPreferences>(&json) {
                    Ok(prefs) => {
                        info!("Loaded preferences from {}", path.display());
                        return prefs;
                    }
                    Err(e) => {
                        error!("Failed to parse preferences: {e}");
                    }
                },
                Err(e) => {
                    error!("Failed to read preferences file: {e}");
                }
            }
        } else {
            debug!("No preferences file at {}", path.display());
        }
        Self::default()
    }

    /// Persist preferences to disk.
    pub fn save(&self) {
        let path = config_path();
        if let Some(parent) = path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                error!("Failed to create config directory: {e}");
                return;
            }
        }
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = fs::write(&path, &json) {
                    error!("Failed to write preferences: {e}");
                } else {
                    debug!("Saved preferences");
                }
            }
            Err(e) => error!("Failed to serialize preferences: {e}"),
        }
    }

    /// Grid size to open with: the last session's if enabled, else the defaults.
    pub fn startup_size(&self) -> LastSize {
        let size = match self.last_size {
            Some(last) if self.restore_last_size => last,
            _ => LastSize {
                rows: self.default_rows,
                cols: self.default_cols,
                cell_size: self.default_cell_size,
            },
        };
        LastSize {
            rows: size.rows.clamp(1, MAX_GRID_SIDE),
            cols: size.cols.clamp(1, MAX_GRID_SIDE),
            cell_size: size.cell_size.clamp(1, MAX_CELL_SIZE),
        }
    }
}

fn config_path() -> PathBuf {
    crate::app_dir::data_file(PREFERENCES_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let prefs: AppPreferences = serde_json::from_str("{}").unwrap();
        assert_eq!(prefs.default_rows, DEFAULT_ROWS);
        assert!(prefs.show_grid_lines);
        assert_eq!(prefs.palette_file, "palette.json");
    }

    #[test]
    fn oversized_grids_are_rejected() {
        assert!(check_grid_side(MAX_GRID_SIDE, MAX_GRID_SIDE).is_ok());
        assert!(check_grid_side(1, 1).is_ok());
        assert!(check_grid_side(1, 5000).is_err());
        assert!(check_grid_side(MAX_GRID_SIDE + 1, 1).is_err());
    }

    #[test]
    fn startup_size_prefers_last_and_clamps() {
        let mut prefs = AppPreferences::default();
        prefs.last_size = Some(LastSize {
            rows: 0,
            cols: 9000,
            cell_size: 12,
        });
        let size = prefs.startup_size();
        assert_eq!((size.rows, size.cols, size.cell_size), (1, MAX_GRID_SIDE, 12));

        prefs.restore_last_size = false;
        assert_eq!(prefs.startup_size().rows, DEFAULT_ROWS);
    }
}
