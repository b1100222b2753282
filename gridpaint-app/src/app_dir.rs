//! Preferences and the palette file live beside the executable, so a copied
//! binary carries its settings with it.

use std::path::PathBuf;

/// Directory holding the running binary, or the working directory when the
/// binary path cannot be resolved.
pub fn exe_directory() -> PathBuf {
    match std::env::current_exe() {
        Ok(exe) => match exe.parent() {
            Some(dir) => dir.to_path_buf(),
            None => PathBuf::from("."),
        },
        Err(_) => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    }
}

/// `file_name` resolved against [`exe_directory`].
pub fn data_file(file_name: &str) -> PathBuf {
    exe_directory().join(file_name)
}
