pub mod cache;
pub mod model;

pub use cache::{default_cache_path, load_cache, save_cache};
pub use model::{IndexModel, IndexModelError};

use crate::genindex::{self, DocIndex};
use std::path::Path;

/// Startup cache-or-parse flow: return the cached index if one
/// exists, otherwise parse the documentation set and write the result
/// back. A failed cache write is logged and otherwise ignored.
pub fn obtain_index(docs_root: &Path, cache_path: &Path) -> Result<DocIndex, String> {
    if let Some(index) = cache::load_cache(cache_path) {
        eprintln!("[INDEX] Loaded {} terms from cache", index.term_count());
        return Ok(index);
    }

    let index = genindex::read_genindex(docs_root)
        .map_err(|e| format!("Failed to build documentation index: {}", e))?;

    if let Err(e) = cache::save_cache(cache_path, &index) {
        eprintln!("[INDEX] Failed to write cache {:?}: {}", cache_path, e);
    }

    Ok(index)
}
