//! Raw dataset plus the view the active filter produces over it.

use contracts::catalog::CatalogItem;

#[derive(Debug, Default)]
pub struct CatalogStore {
    raw: Vec<CatalogItem>,
    filtered: Vec<CatalogItem>,
}

impl CatalogStore {
    /// Replaces the dataset. The filtered view resets to the full set;
    /// callers that keep an active filter re-apply it explicitly.
    pub fn load(&mut self, items: Vec<CatalogItem>) {
        self.filtered = items.clone();
        self.raw = items;
    }

    /// Recomputes the filtered view. Raw order is preserved; items are
    /// never re-sorted by relevance.
    pub fn apply_filter<F>(&mut self, predicate: F)
    where
        F: Fn(&CatalogItem) -> bool,
    {
        self.filtered = self.raw.iter().filter(|item| predicate(item)).cloned().collect();
    }

    pub fn raw(&self) -> &[CatalogItem] {
        &self.raw
    }

    pub fn filtered(&self) -> &[CatalogItem] {
        &self.filtered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, name: &str) -> CatalogItem {
        serde_json::from_str(&format!(r#"{{"id": "{id}", "name": "{name}"}}"#)).unwrap()
    }

    #[test]
    fn load_resets_filtered_to_full_set() {
        let mut store = CatalogStore::default();
        store.load(vec![item("1", "a"), item("2", "b")]);
        store.apply_filter(|i| i.name == "a");
        assert_eq!(store.filtered().len(), 1);

        store.load(vec![item("3", "c")]);
        assert_eq!(store.filtered().len(), 1);
        assert_eq!(store.filtered()[0].id, "3");
    }

    #[test]
    fn filter_preserves_raw_order() {
        let mut store = CatalogStore::default();
        store.load(vec![item("1", "ba"), item("2", "zz"), item("3", "ab")]);
        store.apply_filter(|i| i.name.contains('a'));
        let ids: Vec<_> = store.filtered().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, ["1", "3"]);
    }
}
