//! Static knobs of one catalog widget instance.

use crate::locale::LocalizedText;

#[derive(Debug, Clone)]
pub struct CatalogConfig {
    pub data_url: String,
    /// Categories are optional; a widget without them renders no filter
    /// bar at all.
    pub category_url: Option<String>,
    /// Name of the panel component inside the tour player.
    pub panel_name: String,
    /// Prepended to an item id to form the player's media identifier.
    pub media_prefix: String,
    pub items_per_page: usize,
    pub max_page_buttons: usize,
    /// Derive the page size from the painted grid instead of keeping the
    /// configured one.
    pub auto_page_size: bool,
    /// Stretch thumbnails so a full page fills the available height.
    pub auto_image_aspect: bool,
    pub min_rows: usize,
    pub search_debounce_ms: u32,
    pub resize_debounce_ms: u32,
    /// Delay between a render and the layout probe, so the grid has
    /// painted before it is measured.
    pub settle_delay_ms: u32,
    pub locale_poll_ms: u32,
    pub host_poll_ms: u32,
    pub host_timeout_ms: u32,
    pub placeholder_image: String,
    pub search_placeholder: LocalizedText,
    pub no_results: LocalizedText,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            data_url: String::new(),
            category_url: None,
            panel_name: String::new(),
            media_prefix: String::new(),
            items_per_page: 20,
            max_page_buttons: 5,
            auto_page_size: false,
            auto_image_aspect: false,
            min_rows: 2,
            search_debounce_ms: 300,
            resize_debounce_ms: 300,
            settle_delay_ms: 150,
            locale_poll_ms: 500,
            host_poll_ms: 100,
            host_timeout_ms: 10_000,
            placeholder_image: "images/no-image.png".into(),
            search_placeholder: LocalizedText::new("Tìm kiếm...", "Search..."),
            no_results: LocalizedText::new("Không có kết quả", "No results found"),
        }
    }
}

impl CatalogConfig {
    /// Artifact catalog: a flat list without categories or search.
    pub fn artifacts() -> Self {
        Self {
            data_url: "./jsons/assets.json".into(),
            panel_name: "Container Artifacts".into(),
            media_prefix: "asset".into(),
            items_per_page: 20,
            no_results: LocalizedText::new("Không có hiện vật", "No artifacts found"),
            ..Self::default()
        }
    }

    /// Tower-group catalog: categories, search and adaptive layout.
    pub fn towers() -> Self {
        Self {
            data_url: "./jsons/towers.json".into(),
            category_url: Some("./jsons/tower_category.json".into()),
            panel_name: "Container Tower Group".into(),
            media_prefix: "tower".into(),
            items_per_page: 27,
            auto_page_size: true,
            auto_image_aspect: true,
            search_placeholder: LocalizedText::new("Tìm kiếm tháp...", "Search towers..."),
            no_results: LocalizedText::new("Không có tháp", "No towers found"),
            ..Self::default()
        }
    }

    /// Reconstruction-workspace catalog; same shape as the towers.
    pub fn reconstructions() -> Self {
        Self {
            data_url: "./jsons/workspaces.json".into(),
            category_url: Some("./jsons/workspace_category.json".into()),
            panel_name: "Container Reconstruction".into(),
            media_prefix: "workspace".into(),
            items_per_page: 27,
            auto_page_size: true,
            auto_image_aspect: true,
            search_placeholder: LocalizedText::new("Tìm kiếm...", "Search..."),
            no_results: LocalizedText::new("Không có kết quả", "No results found"),
            ..Self::default()
        }
    }

    pub fn has_filter_bar(&self) -> bool {
        self.category_url.is_some()
    }

    pub fn media_id_for(&self, item_id: &str) -> String {
        format!("{}{}", self.media_prefix, item_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profiles_differ_where_the_widgets_do() {
        let artifacts = CatalogConfig::artifacts();
        assert!(!artifacts.has_filter_bar());
        assert!(!artifacts.auto_page_size);
        assert_eq!(artifacts.items_per_page, 20);

        let towers = CatalogConfig::towers();
        assert!(towers.has_filter_bar());
        assert!(towers.auto_page_size);
        assert_eq!(towers.media_id_for("5"), "tower5");

        let reconstructions = CatalogConfig::reconstructions();
        assert_eq!(reconstructions.media_id_for("9"), "workspace9");
    }
}
