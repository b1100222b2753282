//! Palette file I/O: the session palette is read from a JSON object of
//! `"index": "#rrggbb"` pairs stored next to the executable.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use gridpaint_core::Palette;

/// Resolve the palette file name against the executable directory.
pub fn palette_path(file_name: &str) -> PathBuf {
    crate::app_dir::data_file(file_name)
}

/// Write the built-in palette if no palette file exists yet.
pub fn ensure_default_palette(path: &Path) {
    if path.exists() {
        return;
    }
    match save_palette(path, &Palette::default()) {
        Ok(()) => info!("Created default palette at {}", path.display()),
        Err(e) => warn!("Could not create palette file {}: {}", path.display(), e),
    }
}

/// Load a palette. Returns the built-in palette on error.
pub fn load_palette(path: &Path) -> Palette {
    match fs::read_to_string(path) {
        Ok(json) => match serde_json::from_str::<Palette>(&json) {
            Ok(p) => {
                debug!("Loaded {}-color palette from {}", p.len(), path.display());
                p
            }
            Err(e) => {
                warn!("Invalid palette {}: {}", path.display(), e);
                Palette::default()
            }
        },
        Err(e) => {
            warn!("Could not read palette {}: {}", path.display(), e);
            Palette::default()
        }
    }
}

pub fn save_palette(path: &Path, palette: &Palette) -> std::io::Result<()> {
    let json = serde_json::to_string_pretty(palette)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_palette_is_written_and_reloaded() {
        let dir = std::env::temp_dir().join("gridpaint_test_palette");
        let _ = fs::remove_dir_all(&dir);
        let path = dir.join("palette.json");
        ensure_default_palette(&path);
        assert!(path.exists());
        assert_eq!(load_palette(&path), Palette::default());
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn invalid_palette_falls_back() {
        let dir = std::env::temp_dir().join("gridpaint_test_palette_bad");
        let _ = fs::create_dir_all(&dir);
        let path = dir.join("palette.json");
        fs::write(&path, r##"{"1": "#000000"}"##).unwrap();
        assert_eq!(load_palette(&path), Palette::default());
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn custom_palette_loads() {
        let dir = std::env::temp_dir().join("gridpaint_test_palette_custom");
        let _ = fs::create_dir_all(&dir);
        let path = dir.join("palette.json");
        fs::write(&path, r##"{"0": "#101010", "2": "#ff8800"}"##).unwrap();
        let p = load_palette(&path);
        assert_eq!(p.len(), 2);
        assert_eq!(p.color_of(2).to_string(), "#ff8800");
        let _ = fs::remove_dir_all(&dir);
    }
}
