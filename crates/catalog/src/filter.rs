//! Category selection and free-text search, combined into one predicate.

use contracts::catalog::CatalogItem;
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FilterState {
    /// `None` means all categories.
    pub category_id: Option<String>,
    pub search_text: String,
}

impl FilterState {
    /// Selecting a category abandons the active search. The reverse does
    /// not hold: a search runs within the selected category.
    pub fn set_category(&mut self, category_id: Option<String>) {
        self.category_id = category_id;
        self.search_text.clear();
    }

    pub fn set_search_text(&mut self, text: &str) {
        self.search_text = text.to_owned();
    }

    pub fn clear(&mut self) {
        self.category_id = None;
        self.search_text.clear();
    }

    pub fn is_active(&self) -> bool {
        self.category_id.is_some() || !self.search_text.trim().is_empty()
    }

    pub fn matches(&self, item: &CatalogItem) -> bool {
        if let Some(category_id) = &self.category_id {
            if item.category_id.as_deref() != Some(category_id.as_str()) {
                return false;
            }
        }
        let keyword = self.search_text.trim();
        keyword.is_empty() || text_matches(item, keyword)
    }
}

/// Case-insensitive substring match; a hit on any one field qualifies.
fn text_matches(item: &CatalogItem, keyword: &str) -> bool {
    let keyword = keyword.to_lowercase();
    let hit = |field: &str| field.to_lowercase().contains(&keyword);
    hit(&item.name)
        || item.name_alt.as_deref().is_some_and(hit)
        || item.code.as_deref().is_some_and(hit)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(json: &str) -> CatalogItem {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn matches_on_name_alt_and_code() {
        let record = item(r#"{"id": 1, "name": "Tháp B1", "name_en": "Tower B1", "code": "MS-B1"}"#);
        let mut filter = FilterState::default();

        filter.set_search_text("tower");
        assert!(filter.matches(&record));
        filter.set_search_text("ms-b");
        assert!(filter.matches(&record));
        filter.set_search_text("  Tháp  ");
        assert!(filter.matches(&record));
        filter.set_search_text("xyz");
        assert!(!filter.matches(&record));
    }

    #[test]
    fn category_narrows_the_search() {
        let record = item(r#"{"id": 1, "name": "Tháp B1", "cate_id": 2}"#);
        let mut filter = FilterState::default();
        filter.set_category(Some("3".into()));
        filter.set_search_text("tháp");
        assert!(!filter.matches(&record));

        filter.set_category(Some("2".into()));
        assert!(filter.matches(&record));
    }

    #[test]
    fn category_selection_clears_search_but_not_vice_versa() {
        let mut filter = FilterState::default();
        filter.set_search_text("abc");
        filter.set_category(Some("2".into()));
        assert_eq!(filter.search_text, "");

        filter.set_search_text("def");
        assert_eq!(filter.category_id.as_deref(), Some("2"));
    }

    #[test]
    fn item_without_category_only_matches_all() {
        let record = item(r#"{"id": 1, "name": "x"}"#);
        let mut filter = FilterState::default();
        assert!(filter.matches(&record));
        filter.set_category(Some("2".into()));
        assert!(!filter.matches(&record));
    }
}
