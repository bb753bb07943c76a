//! The render tree.
//!
//! Each render pass builds a complete `PanelView` from current state; the
//! drawing adapter replaces the panel content with it wholesale. There is
//! no incremental diffing at this level, which keeps a render trivially
//! idempotent: same state, same tree.

use contracts::catalog::{Category, CatalogItem};

use crate::config::CatalogConfig;
use crate::filter::FilterState;
use crate::locale::{self, ui_text, UiText};
use crate::pagination::{PageButton, PaginationEngine};

#[derive(Debug, Clone, PartialEq)]
pub enum PanelView {
    Loading { message: String },
    LoadError { message: String },
    Ready(ReadyView),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReadyView {
    pub filter_bar: Option<FilterBarView>,
    pub cards: Vec<CardView>,
    /// Localized empty-state message; set exactly when `cards` is empty.
    pub no_results: Option<String>,
    /// Present only when there is more than one page.
    pub pagination: Option<PaginationView>,
    pub placeholder_image: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FilterBarView {
    pub search_placeholder: String,
    pub search_text: String,
    pub clear_visible: bool,
    pub buttons: Vec<CategoryButton>,
}

/// `id == None` is the "all categories" button.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryButton {
    pub id: Option<String>,
    pub label: String,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CardView {
    pub id: String,
    /// The host runtime key this card navigates to.
    pub media_id: String,
    pub image: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PaginationView {
    pub current_page: usize,
    pub total_pages: usize,
    pub prev_enabled: bool,
    pub next_enabled: bool,
    pub buttons: Vec<PageButton>,
}

pub fn loading(locale: &str) -> PanelView {
    PanelView::Loading { message: ui_text(locale, UiText::Loading).to_owned() }
}

pub fn load_error(locale: &str, detail: &str) -> PanelView {
    PanelView::LoadError { message: format!("{} ({detail})", ui_text(locale, UiText::LoadFailed)) }
}

pub fn ready(
    config: &CatalogConfig,
    categories: &[Category],
    filter: &FilterState,
    pagination: &PaginationEngine,
    filtered: &[CatalogItem],
    locale: &str,
) -> PanelView {
    let filter_bar = config.has_filter_bar().then(|| filter_bar(config, categories, filter, locale));

    let cards: Vec<CardView> = pagination
        .slice_of(filtered)
        .iter()
        .map(|item| card(config, item, locale))
        .collect();

    let no_results = cards.is_empty().then(|| config.no_results.pick(locale).to_owned());

    let pagination = (pagination.total_pages() > 1).then(|| PaginationView {
        current_page: pagination.current_page(),
        total_pages: pagination.total_pages(),
        prev_enabled: pagination.current_page() > 1,
        next_enabled: pagination.current_page() < pagination.total_pages(),
        buttons: pagination.page_buttons(),
    });

    PanelView::Ready(ReadyView {
        filter_bar,
        cards,
        no_results,
        pagination,
        placeholder_image: config.placeholder_image.clone(),
    })
}

fn filter_bar(
    config: &CatalogConfig,
    categories: &[Category],
    filter: &FilterState,
    locale: &str,
) -> FilterBarView {
    let mut buttons = Vec::with_capacity(categories.len() + 1);
    buttons.push(CategoryButton {
        id: None,
        label: ui_text(locale, UiText::AllCategories).to_owned(),
        active: filter.category_id.is_none(),
    });
    for category in categories {
        buttons.push(CategoryButton {
            id: Some(category.id.clone()),
            label: locale::localized(locale, &category.name, category.name_alt.as_deref()).to_owned(),
            active: filter.category_id.as_deref() == Some(category.id.as_str()),
        });
    }
    FilterBarView {
        search_placeholder: config.search_placeholder.pick(locale).to_owned(),
        search_text: filter.search_text.clone(),
        clear_visible: !filter.search_text.is_empty(),
        buttons,
    }
}

fn card(config: &CatalogConfig, item: &CatalogItem, locale: &str) -> CardView {
    CardView {
        id: item.id.clone(),
        media_id: config.media_id_for(&item.id),
        image: item
            .images
            .first()
            .cloned()
            .unwrap_or_else(|| config.placeholder_image.clone()),
        label: locale::localized(locale, &item.name, item.name_alt.as_deref()).to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::LocalizedText;

    fn items(count: usize) -> Vec<CatalogItem> {
        (1..=count)
            .map(|i| {
                serde_json::from_str(&format!(
                    r#"{{"id": {i}, "name": "Tháp {i}", "name_en": "Tower {i}", "cate_id": 1,
                        "photo": ["img/{i}.jpg"]}}"#
                ))
                .unwrap()
            })
            .collect()
    }

    fn categories() -> Vec<Category> {
        vec![serde_json::from_str(r#"{"id": 1, "name": "Nhóm A", "nameEn": "Group A"}"#).unwrap()]
    }

    fn config() -> CatalogConfig {
        CatalogConfig { no_results: LocalizedText::new("Không có tháp", "No towers found"), ..CatalogConfig::towers() }
    }

    #[test]
    fn render_is_idempotent() {
        let config = config();
        let cats = categories();
        let data = items(30);
        let filter = FilterState::default();
        let mut pagination = PaginationEngine::new(27, 5);
        pagination.set_total(data.len());

        let first = ready(&config, &cats, &filter, &pagination, &data, "vi");
        let second = ready(&config, &cats, &filter, &pagination, &data, "vi");
        assert_eq!(first, second);
    }

    #[test]
    fn locale_switches_labels_without_touching_structure() {
        let config = config();
        let cats = categories();
        let data = items(3);
        let filter = FilterState::default();
        let mut pagination = PaginationEngine::new(27, 5);
        pagination.set_total(data.len());

        let PanelView::Ready(vi) = ready(&config, &cats, &filter, &pagination, &data, "vi") else {
            panic!("expected ready view");
        };
        let PanelView::Ready(en) = ready(&config, &cats, &filter, &pagination, &data, "en") else {
            panic!("expected ready view");
        };
        assert_eq!(vi.cards[0].label, "Tháp 1");
        assert_eq!(en.cards[0].label, "Tower 1");
        assert_eq!(en.filter_bar.as_ref().unwrap().buttons[0].label, "All");
        assert_eq!(vi.cards.len(), en.cards.len());
        assert_eq!(vi.cards[0].media_id, en.cards[0].media_id);
    }

    #[test]
    fn empty_result_renders_message_without_grid_or_pagination() {
        let config = config();
        let filter = FilterState::default();
        let mut pagination = PaginationEngine::new(27, 5);
        pagination.set_total(0);

        let PanelView::Ready(view) = ready(&config, &categories(), &filter, &pagination, &[], "en")
        else {
            panic!("expected ready view");
        };
        assert!(view.cards.is_empty());
        assert_eq!(view.no_results.as_deref(), Some("No towers found"));
        assert!(view.pagination.is_none());
        // The filter bar stays available so the user can back out.
        assert!(view.filter_bar.is_some());
    }

    #[test]
    fn pagination_appears_only_beyond_one_page() {
        let config = config();
        let data = items(57);
        let filter = FilterState::default();
        let mut pagination = PaginationEngine::new(20, 5);
        pagination.set_total(data.len());
        pagination.go_to(3);

        let PanelView::Ready(view) = ready(&config, &categories(), &filter, &pagination, &data, "vi")
        else {
            panic!("expected ready view");
        };
        assert_eq!(view.cards.len(), 17);
        let controls = view.pagination.unwrap();
        assert_eq!(controls.total_pages, 3);
        assert!(!controls.next_enabled);
        assert!(controls.prev_enabled);
    }

    #[test]
    fn missing_photo_falls_back_to_placeholder() {
        let config = config();
        let item: CatalogItem = serde_json::from_str(r#"{"id": 1, "name": "x"}"#).unwrap();
        let card = card(&config, &item, "vi");
        assert_eq!(card.image, config.placeholder_image);
        assert_eq!(card.media_id, "tower1");
    }
}
