pub mod config;
pub mod genindex;
pub mod index;

use std::path::PathBuf;
use std::sync::Mutex;

use tauri::State;
use tauri_plugin_dialog::DialogExt;
use tauri_plugin_opener::OpenerExt;

use crate::config::DocsConfig;
use crate::genindex::DocIndex;
use crate::index::IndexModel;

pub struct AppState {
    pub config: Mutex<DocsConfig>,
    pub model: Mutex<Option<IndexModel>>,
}

impl AppState {
    pub fn new() -> Self {
        let config_path = config::default_config_path();
        let config = config::load_config(&config_path);
        match &config.docs_root {
            Some(root) => eprintln!("[CONFIG] Using docs root {:?}", root),
            None => eprintln!("[CONFIG] No docs root configured yet"),
        }
        Self {
            config: Mutex::new(config),
            model: Mutex::new(None),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

fn persist_docs_root(state: &AppState, root: PathBuf) -> Result<(), String> {
    if !root.is_dir() {
        return Err(format!("Not a directory: {}", root.display()));
    }

    let cfg = DocsConfig {
        docs_root: Some(root),
    };
    config::save_config(&config::default_config_path(), &cfg)?;

    *state.config.lock().unwrap() = cfg;
    // Any loaded index belongs to the previous root.
    *state.model.lock().unwrap() = None;
    Ok(())
}

#[tauri::command]
fn get_docs_root(state: State<AppState>) -> Option<String> {
    state
        .config
        .lock()
        .unwrap()
        .docs_root
        .as_ref()
        .map(|p| p.display().to_string())
}

#[tauri::command]
fn set_docs_root(path: String, state: State<AppState>) -> Result<(), String> {
    persist_docs_root(&state, PathBuf::from(path))
}

/// One-time directory picker for first-run setup. Returns the chosen
/// root, or None if the user cancelled.
#[tauri::command]
fn pick_docs_root(app: tauri::AppHandle, state: State<AppState>) -> Result<Option<String>, String> {
    let mut dialog = app.dialog().file();
    if let Some(home) = dirs::home_dir() {
        dialog = dialog.set_directory(home);
    }

    let Some(picked) = dialog.blocking_pick_folder() else {
        eprintln!("[CONFIG] Directory picker cancelled");
        return Ok(None);
    };

    let root = picked.into_path().map_err(|e| e.to_string())?;
    let display = root.display().to_string();
    persist_docs_root(&state, root)?;
    Ok(Some(display))
}

/// Cache-or-parse startup flow. Returns the number of indexed terms.
#[tauri::command]
fn load_index(state: State<AppState>) -> Result<usize, String> {
    let docs_root = state
        .config
        .lock()
        .unwrap()
        .docs_root
        .clone()
        .ok_or("No documentation directory configured")?;

    let index = index::obtain_index(&docs_root, &index::default_cache_path())?;
    let count = index.term_count();

    let DocIndex { entries, .. } = index;
    *state.model.lock().unwrap() = Some(IndexModel::new(entries));

    eprintln!("[INDEX] Ready with {} terms", count);
    Ok(count)
}

#[tauri::command]
fn filter_index(query: String, state: State<AppState>) -> Result<usize, String> {
    let mut guard = state.model.lock().unwrap();
    let model = guard.as_mut().ok_or("Index not loaded")?;
    model.set_filter(&query);
    Ok(model.visible_count())
}

#[tauri::command]
fn visible_terms(offset: usize, limit: usize, state: State<AppState>) -> Result<Vec<String>, String> {
    let guard = state.model.lock().unwrap();
    let model = guard.as_ref().ok_or("Index not loaded")?;
    Ok(model.visible_range(offset, limit).to_vec())
}

/// Resolve the visible row at `position` to a file:// URL under the
/// configured docs root, for the embedded page viewer.
#[tauri::command]
fn resolve_entry(position: usize, state: State<AppState>) -> Result<String, String> {
    let docs_root = state
        .config
        .lock()
        .unwrap()
        .docs_root
        .clone()
        .ok_or("No documentation directory configured")?;

    let guard = state.model.lock().unwrap();
    let model = guard.as_ref().ok_or("Index not loaded")?;
    let rel_href = model.resolve(position).map_err(|e| e.to_string())?;

    Ok(format!("file://{}", docs_root.join(rel_href).display()))
}

/// Open the resolved page in the system browser instead of the
/// embedded viewer.
#[tauri::command]
fn open_in_browser(
    position: usize,
    app: tauri::AppHandle,
    state: State<AppState>,
) -> Result<(), String> {
    let url = resolve_entry(position, state)?;
    app.opener()
        .open_url(url, None::<&str>)
        .map_err(|e| e.to_string())
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    tauri::Builder::default()
        .plugin(tauri_plugin_opener::init())
        .plugin(tauri_plugin_dialog::init())
        .manage(AppState::new())
        .invoke_handler(tauri::generate_handler![
            get_docs_root,
            set_docs_root,
            pick_docs_root,
            load_index,
            filter_index,
            visible_terms,
            resolve_entry,
            open_in_browser,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
