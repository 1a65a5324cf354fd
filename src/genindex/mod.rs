pub mod parser;
pub mod types;

pub use parser::{parse_genindex, ParseError};
pub use types::DocIndex;

use std::fs;
use std::path::Path;

/// File name of the generated index page inside a documentation set.
pub const INDEX_FILENAME: &str = "genindex.html";

/// Read and parse the index page of the documentation set rooted at
/// `docs_root`.
pub fn read_genindex(docs_root: &Path) -> Result<DocIndex, ParseError> {
    let path = docs_root.join(INDEX_FILENAME);
    let html = fs::read_to_string(&path)?;
    let entries = parse_genindex(&html)?;
    eprintln!("[GENINDEX] Parsed {} terms from {:?}", entries.len(), path);
    Ok(DocIndex::new(entries, path))
}
