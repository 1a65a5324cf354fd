//! Filterable view over the parsed index
//!
//! Holds the term -> href mapping together with a sorted list of
//! terms and an optional prefix filter. The filtered view is always a
//! contiguous run of the sorted list, so filtering is two binary
//! searches rather than a scan.

use std::collections::HashMap;
use std::fmt;
use std::ops::Range;

#[derive(Debug, PartialEq, Eq)]
pub enum IndexModelError {
    OutOfRange { position: usize, len: usize },
}

impl fmt::Display for IndexModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexModelError::OutOfRange { position, len } => {
                write!(f, "position {} out of range for view of {} terms", position, len)
            }
        }
    }
}

impl std::error::Error for IndexModelError {}

pub struct IndexModel {
    items: HashMap<String, String>,
    // Sorted key set of `items`; never mutated after construction.
    titles: Vec<String>,
    filtered: Option<Range<usize>>,
}

impl IndexModel {
    /// Build the model from the parsed entries. Sorts once; an empty
    /// mapping must be passed explicitly.
    pub fn new(items: HashMap<String, String>) -> Self {
        let mut titles: Vec<String> = items.keys().cloned().collect();
        titles.sort();
        Self {
            items,
            titles,
            filtered: None,
        }
    }

    /// Narrow the view to terms starting with `query`, case-sensitive.
    /// An empty query clears the filter. Replaces any previous filter;
    /// the underlying mapping is untouched.
    pub fn set_filter(&mut self, query: &str) {
        if query.is_empty() {
            self.filtered = None;
            return;
        }
        let lo = self.titles.partition_point(|t| t.as_str() < query);
        let hi = self
            .titles
            .partition_point(|t| t.as_str() < query || t.starts_with(query));
        self.filtered = Some(lo..hi);
    }

    pub fn visible_count(&self) -> usize {
        self.visible().len()
    }

    /// Display text for the row at `position` in the current view.
    pub fn term_at(&self, position: usize) -> Result<&str, IndexModelError> {
        let view = self.visible();
        view.get(position)
            .map(String::as_str)
            .ok_or(IndexModelError::OutOfRange {
                position,
                len: view.len(),
            })
    }

    /// Relative href of the row at `position` in the current view.
    pub fn resolve(&self, position: usize) -> Result<&str, IndexModelError> {
        let term = self.term_at(position)?;
        // `titles` is the key set of `items`, so the lookup cannot miss.
        Ok(self.items[term].as_str())
    }

    /// A window of the current view for list rendering.
    pub fn visible_range(&self, offset: usize, limit: usize) -> &[String] {
        let view = self.visible();
        let start = offset.min(view.len());
        let end = offset.saturating_add(limit).min(view.len());
        &view[start..end]
    }

    fn visible(&self) -> &[String] {
        match &self.filtered {
            Some(range) => &self.titles[range.clone()],
            None => &self.titles,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_model() -> IndexModel {
        let mut items = HashMap::new();
        items.insert("Apple".to_string(), "a.html".to_string());
        items.insert("Banana".to_string(), "b.html".to_string());
        items.insert("Banana split".to_string(), "bs.html".to_string());
        items.insert("Cherry".to_string(), "c.html#pit".to_string());
        items.insert("apricot".to_string(), "ap.html".to_string());
        IndexModel::new(items)
    }

    #[test]
    fn test_terms_are_sorted_on_build() {
        let model = sample_model();
        let all: Vec<_> = model.visible_range(0, 100).to_vec();
        assert_eq!(all, vec!["Apple", "Banana", "Banana split", "Cherry", "apricot"]);
    }

    #[test]
    fn test_prefix_filter_is_contiguous_sorted_run() {
        let mut model = sample_model();
        model.set_filter("Ban");
        assert_eq!(model.visible_count(), 2);
        assert_eq!(model.term_at(0).unwrap(), "Banana");
        assert_eq!(model.term_at(1).unwrap(), "Banana split");
    }

    #[test]
    fn test_filter_is_case_sensitive() {
        let mut model = sample_model();
        model.set_filter("ap");
        assert_eq!(model.visible_count(), 1);
        assert_eq!(model.term_at(0).unwrap(), "apricot");
    }

    #[test]
    fn test_empty_query_restores_full_view() {
        let mut model = sample_model();
        model.set_filter("Ban");
        model.set_filter("");
        assert_eq!(model.visible_count(), 5);
        assert_eq!(model.term_at(0).unwrap(), "Apple");
        assert_eq!(model.term_at(4).unwrap(), "apricot");
    }

    #[test]
    fn test_refilter_replaces_previous_filter() {
        let mut model = sample_model();
        model.set_filter("Banana s");
        assert_eq!(model.visible_count(), 1);
        model.set_filter("A");
        assert_eq!(model.visible_count(), 1);
        assert_eq!(model.term_at(0).unwrap(), "Apple");
    }

    #[test]
    fn test_no_match_yields_empty_view() {
        let mut model = sample_model();
        model.set_filter("zzz");
        assert_eq!(model.visible_count(), 0);
        assert!(model.resolve(0).is_err());
    }

    #[test]
    fn test_resolve_maps_view_position_to_href() {
        let mut model = sample_model();
        assert_eq!(model.resolve(3).unwrap(), "c.html#pit");
        model.set_filter("Ba");
        assert_eq!(model.resolve(0).unwrap(), "b.html");
        assert_eq!(model.resolve(1).unwrap(), "bs.html");
    }

    #[test]
    fn test_resolve_out_of_range_fails() {
        let model = sample_model();
        assert_eq!(
            model.resolve(5),
            Err(IndexModelError::OutOfRange { position: 5, len: 5 })
        );
    }

    #[test]
    fn test_visible_range_clamps() {
        let mut model = sample_model();
        assert_eq!(model.visible_range(3, 10), &["Cherry", "apricot"]);
        assert_eq!(model.visible_range(9, 10), &[] as &[String]);
        model.set_filter("Ban");
        assert_eq!(model.visible_range(1, 1), &["Banana split"]);
    }

    #[test]
    fn test_empty_index_must_be_passed_explicitly() {
        let model = IndexModel::new(HashMap::new());
        assert_eq!(model.visible_count(), 0);
    }
}
