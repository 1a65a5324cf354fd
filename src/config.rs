use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

/// Persisted application configuration. A single value today: the
/// root directory of the documentation set, under which relative
/// hrefs from the index are resolved.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocsConfig {
    #[serde(default)]
    pub docs_root: Option<PathBuf>,
}

pub fn default_config_path() -> PathBuf {
    let Some(dirs) = ProjectDirs::from("com", "docdex", "docdex") else {
        return Path::new("docdex.json").to_path_buf();
    };
    dirs.config_dir().join("config.json")
}

pub fn load_config(path: &Path) -> DocsConfig {
    let Ok(bytes) = fs::read(path) else {
        return DocsConfig::default();
    };
    serde_json::from_slice::<DocsConfig>(&bytes).unwrap_or_default()
}

pub fn save_config(path: &Path, cfg: &DocsConfig) -> Result<(), String> {
    let json = serde_json::to_vec_pretty(cfg).map_err(|e| e.to_string())?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| e.to_string())?;
    }
    fs::write(path, json).map_err(|e| e.to_string())
}
