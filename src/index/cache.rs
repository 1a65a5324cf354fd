//! Whole-value disk cache of the parsed index
//!
//! One JSON record holding the entire mapping, fully overwritten on
//! every store. There is no expiry and no validation against the
//! source page; a re-parse only happens when the cache is absent or
//! unreadable. Delete the file to force one.

use crate::genindex::DocIndex;
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};

pub fn default_cache_path() -> PathBuf {
    let Some(dirs) = ProjectDirs::from("com", "docdex", "docdex") else {
        return Path::new(".docdex-index.json").to_path_buf();
    };
    dirs.cache_dir().join("index.json")
}

pub fn save_cache(path: &Path, index: &DocIndex) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string(index)?;
    fs::write(path, json)?;
    Ok(())
}

/// Load the cached index, treating any read or decode failure as a
/// cache miss.
pub fn load_cache(path: &Path) -> Option<DocIndex> {
    let json = fs::read_to_string(path).ok()?;
    match serde_json::from_str::<DocIndex>(&json) {
        Ok(index) => Some(index),
        Err(e) => {
            eprintln!("[CACHE] Discarding unreadable cache {:?}: {}", path, e);
            None
        }
    }
}
