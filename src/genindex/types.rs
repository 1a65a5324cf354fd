use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// The parsed documentation index: term -> relative href.
///
/// Hrefs are kept verbatim from the source markup (path plus optional
/// fragment) and are resolved against the configured docs root only
/// when a page is opened.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocIndex {
    pub entries: HashMap<String, String>,
    pub generated_at: DateTime<Utc>,
    pub source: PathBuf,
}

impl DocIndex {
    pub fn new(entries: HashMap<String, String>, source: PathBuf) -> Self {
        Self {
            entries,
            generated_at: Utc::now(),
            source,
        }
    }

    pub fn term_count(&self) -> usize {
        self.entries.len()
    }
}
