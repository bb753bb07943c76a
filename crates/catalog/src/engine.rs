//! The engine behind one catalog widget instance.
//!
//! Owns the store, the filter, the pagination and the probe arming, and
//! turns them into a render tree on demand. One instance per widget;
//! nothing here is shared or global, so several widgets coexist without
//! collision (the frontend shell owns timers and DOM).

use contracts::catalog::{Category, CatalogItem};
use serde::Serialize;

use crate::config::CatalogConfig;
use crate::filter::FilterState;
use crate::layout::{self, LayoutMeasurement};
use crate::locale::DEFAULT_LOCALE;
use crate::pagination::PaginationEngine;
use crate::store::CatalogStore;
use crate::view::{self, PanelView};

#[derive(Debug, Clone, PartialEq)]
enum LoadPhase {
    Loading,
    Failed(String),
    Ready,
}

pub struct CatalogEngine {
    config: CatalogConfig,
    store: CatalogStore,
    categories: Vec<Category>,
    filter: FilterState,
    pagination: PaginationEngine,
    locale: String,
    phase: LoadPhase,
    /// Set by external triggers (data/filter/page/locale change, resize),
    /// consumed by one page-size reconciliation. Bounds the measure/render
    /// loop to a single extra render per trigger.
    probe_armed: bool,
}

impl CatalogEngine {
    pub fn new(config: CatalogConfig) -> Self {
        let pagination = PaginationEngine::new(config.items_per_page, config.max_page_buttons);
        Self {
            config,
            store: CatalogStore::default(),
            categories: Vec::new(),
            filter: FilterState::default(),
            pagination,
            locale: DEFAULT_LOCALE.to_owned(),
            phase: LoadPhase::Loading,
            probe_armed: false,
        }
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn begin_loading(&mut self) {
        self.phase = LoadPhase::Loading;
    }

    pub fn fail_loading(&mut self, detail: impl Into<String>) {
        let detail = detail.into();
        log::error!(target: "catalog", "{}: load failed: {detail}", self.config.panel_name);
        self.phase = LoadPhase::Failed(detail);
    }

    pub fn finish_loading(&mut self, items: Vec<CatalogItem>, categories: Vec<Category>) {
        log::debug!(
            target: "catalog",
            "{}: loaded {} items, {} categories",
            self.config.panel_name,
            items.len(),
            categories.len()
        );
        self.categories = categories;
        self.store.load(items);
        self.filter.clear();
        self.pagination.set_total(self.store.filtered().len());
        self.pagination.reset_page();
        self.phase = LoadPhase::Ready;
        self.probe_armed = true;
    }

    fn apply_filters(&mut self) {
        let filter = self.filter.clone();
        self.store.apply_filter(|item| filter.matches(item));
        self.pagination.set_total(self.store.filtered().len());
        // A filter change must never leave the user on a now-irrelevant page.
        self.pagination.reset_page();
        self.probe_armed = true;
        log::debug!(
            target: "catalog",
            "{}: filters applied, category={:?}, search={:?}, {} of {} match",
            self.config.panel_name,
            self.filter.category_id,
            self.filter.search_text,
            self.store.filtered().len(),
            self.store.raw().len()
        );
    }

    pub fn set_category(&mut self, category_id: Option<String>) {
        self.filter.set_category(category_id);
        self.apply_filters();
    }

    pub fn set_search(&mut self, text: &str) {
        self.filter.set_search_text(text);
        self.apply_filters();
    }

    pub fn reset_filters(&mut self) {
        self.filter.clear();
        self.apply_filters();
    }

    /// Returns whether the page actually changed (the caller re-renders and
    /// scrolls to top only then).
    pub fn go_to_page(&mut self, page: usize) -> bool {
        let moved = self.pagination.go_to(page);
        if moved {
            self.probe_armed = true;
        }
        moved
    }

    pub fn next_page(&mut self) -> bool {
        let moved = self.pagination.next();
        if moved {
            self.probe_armed = true;
        }
        moved
    }

    pub fn prev_page(&mut self) -> bool {
        let moved = self.pagination.prev();
        if moved {
            self.probe_armed = true;
        }
        moved
    }

    /// Adopts an observed locale. True means the caller must re-render;
    /// data, filter and pagination are left untouched.
    pub fn set_locale(&mut self, locale: &str) -> bool {
        if locale == self.locale {
            return false;
        }
        log::debug!(target: "catalog", "{}: locale {} -> {locale}", self.config.panel_name, self.locale);
        self.locale = locale.to_owned();
        self.probe_armed = true;
        true
    }

    pub fn arm_probe(&mut self) {
        self.probe_armed = true;
    }

    /// Applies the measured optimal page size. Consumes the probe arming,
    /// so the extra render this requests cannot trigger a second resize;
    /// only the next external trigger re-arms it. Returns whether the
    /// caller must re-render.
    pub fn apply_measured_page_size(&mut self, measurement: &LayoutMeasurement) -> bool {
        if !self.config.auto_page_size || !self.probe_armed {
            return false;
        }
        self.probe_armed = false;
        if self.store.filtered().is_empty() {
            return false;
        }
        let page_size = layout::optimal_page_size(measurement, self.config.min_rows);
        if !self.pagination.set_page_size(page_size) {
            return false;
        }
        log::debug!(
            target: "catalog",
            "{}: page size recalculated to {page_size}, now on page {}",
            self.config.panel_name,
            self.pagination.current_page()
        );
        true
    }

    pub fn image_aspect_percent(&self, measurement: &LayoutMeasurement) -> Option<f64> {
        self.config.auto_image_aspect.then(|| {
            layout::image_aspect_percent(measurement, self.pagination.page_size(), self.config.min_rows)
        })
    }

    pub fn build_view(&self) -> PanelView {
        match &self.phase {
            LoadPhase::Loading => view::loading(&self.locale),
            LoadPhase::Failed(detail) => view::load_error(&self.locale, detail),
            LoadPhase::Ready => view::ready(
                &self.config,
                &self.categories,
                &self.filter,
                &self.pagination,
                self.store.filtered(),
                &self.locale,
            ),
        }
    }

    pub fn snapshot(&self) -> WidgetSnapshot {
        WidgetSnapshot {
            loaded: self.phase == LoadPhase::Ready,
            locale: self.locale.clone(),
            total_items: self.store.raw().len(),
            filtered_items: self.store.filtered().len(),
            category_id: self.filter.category_id.clone(),
            search_text: self.filter.search_text.clone(),
            page_size: self.pagination.page_size(),
            current_page: self.pagination.current_page(),
            total_pages: self.pagination.total_pages(),
        }
    }
}

/// Read-only state snapshot for diagnostics (`getState()`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WidgetSnapshot {
    pub loaded: bool,
    pub locale: String,
    pub total_items: usize,
    pub filtered_items: usize,
    pub category_id: Option<String>,
    pub search_text: String,
    pub page_size: usize,
    pub current_page: usize,
    pub total_pages: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset() -> Vec<CatalogItem> {
        // 57 items; ids 1..=5 belong to category X, the rest to Y.
        // Within X, items 1 and 2 carry an "abc" code.
        (1..=57)
            .map(|i| {
                let category = if i <= 5 { "X" } else { "Y" };
                let code = if i <= 2 { ", \"code\": \"abc\"" } else { "" };
                serde_json::from_str(&format!(
                    r#"{{"id": {i}, "name": "Item {i}", "cate_id": "{category}"{code}}}"#
                ))
                .unwrap()
            })
            .collect()
    }

    fn engine() -> CatalogEngine {
        let mut engine = CatalogEngine::new(CatalogConfig::towers());
        engine.finish_loading(dataset(), Vec::new());
        engine
    }

    fn measurement() -> LayoutMeasurement {
        LayoutMeasurement {
            columns: 3,
            gap_px: 15.0,
            card_height_px: 280.0,
            available_height_px: 900.0,
            label_height_px: 50.0,
            card_width_px: 180.0,
        }
    }

    #[test]
    fn category_then_search_narrows_and_resets_page() {
        let mut engine = engine();
        engine.go_to_page(2);
        engine.set_category(Some("X".into()));
        assert_eq!(engine.snapshot().filtered_items, 5);
        assert_eq!(engine.snapshot().current_page, 1);

        engine.set_search("abc");
        let snapshot = engine.snapshot();
        assert_eq!(snapshot.filtered_items, 2);
        assert_eq!(snapshot.current_page, 1);
        assert_eq!(snapshot.category_id.as_deref(), Some("X"));
    }

    #[test]
    fn selecting_a_category_abandons_the_search() {
        let mut engine = engine();
        engine.set_search("abc");
        assert_eq!(engine.snapshot().filtered_items, 2);
        engine.set_category(Some("Y".into()));
        let snapshot = engine.snapshot();
        assert_eq!(snapshot.search_text, "");
        assert_eq!(snapshot.filtered_items, 52);
    }

    #[test]
    fn measured_page_size_applies_once_per_trigger() {
        let mut engine = engine();
        assert!(engine.apply_measured_page_size(&measurement()));
        assert_eq!(engine.snapshot().page_size, 9);
        // The re-render pass this requested must not resize again.
        let bigger = LayoutMeasurement { available_height_px: 1500.0, ..measurement() };
        assert!(!engine.apply_measured_page_size(&bigger));
        // The next external trigger re-arms the probe.
        engine.go_to_page(2);
        assert!(engine.apply_measured_page_size(&bigger));
    }

    #[test]
    fn empty_filtered_set_keeps_the_configured_page_size() {
        let mut engine = engine();
        engine.set_search("no such item");
        assert!(!engine.apply_measured_page_size(&measurement()));
        assert_eq!(engine.snapshot().page_size, 27);
    }

    #[test]
    fn locale_change_rerenders_without_resetting_state() {
        let mut engine = engine();
        engine.set_category(Some("Y".into()));
        engine.go_to_page(2);
        assert!(engine.set_locale("en"));
        assert!(!engine.set_locale("en"));
        let snapshot = engine.snapshot();
        assert_eq!(snapshot.current_page, 2);
        assert_eq!(snapshot.category_id.as_deref(), Some("Y"));
    }

    #[test]
    fn load_failure_renders_the_error_view() {
        let mut engine = CatalogEngine::new(CatalogConfig::towers());
        engine.fail_loading("HTTP 404");
        match engine.build_view() {
            PanelView::LoadError { message } => assert!(message.contains("HTTP 404")),
            other => panic!("expected load error, got {other:?}"),
        }
        assert!(!engine.snapshot().loaded);
    }

    #[test]
    fn aspect_follows_the_auto_flag() {
        let mut engine = engine();
        assert!(engine.image_aspect_percent(&measurement()).is_some());
        let mut config = CatalogConfig::towers();
        config.auto_image_aspect = false;
        engine = CatalogEngine::new(config);
        engine.finish_loading(dataset(), Vec::new());
        assert!(engine.image_aspect_percent(&measurement()).is_none());
    }
}
