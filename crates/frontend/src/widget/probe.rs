//! DOM measurement for the adaptive layout.
//!
//! Column count is responsive and only knowable after paint, so the probe
//! reads the painted grid: resolved column tracks, gap, one card's height,
//! and the container height net of its own padding. The math over these
//! numbers lives in `catalog::layout`.

use catalog::LayoutMeasurement;
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

const DEFAULT_GAP_PX: f64 = 15.0;
const DEFAULT_LABEL_HEIGHT_PX: f64 = 50.0;

fn query(root: &web_sys::Element, selector: &str) -> Option<web_sys::Element> {
    root.query_selector(selector).ok().flatten()
}

fn style_px(style: &web_sys::CssStyleDeclaration, property: &str, default: f64) -> f64 {
    style
        .get_property_value(property)
        .ok()
        .and_then(|value| value.trim_end_matches("px").parse::<f64>().ok())
        .unwrap_or(default)
}

/// Reads the painted grid. `None` while no card has been painted (empty
/// result or before the first paint); the caller then keeps the previous
/// page size rather than measuring a degenerate layout.
pub fn measure(panel: &HtmlElement) -> Option<LayoutMeasurement> {
    let window = web_sys::window()?;
    let container = query(panel, ".catalog-grid-container")?;
    let grid = query(&container, ".catalog-grid")?;
    let card: HtmlElement = query(&grid, ".catalog-card")?.dyn_into().ok()?;

    let grid_style = window.get_computed_style(&grid).ok()??;
    let columns = grid_style
        .get_property_value("grid-template-columns")
        .ok()
        .map(|tracks| tracks.split_whitespace().count())
        .filter(|count| *count > 0)
        .unwrap_or(1);
    let gap_px = style_px(&grid_style, "gap", DEFAULT_GAP_PX);

    let container_style = window.get_computed_style(&container).ok()??;
    let vertical_padding = style_px(&container_style, "padding-top", 0.0)
        + style_px(&container_style, "padding-bottom", 0.0);
    let available_height_px = container.client_height() as f64 - vertical_padding;

    let label_height_px = query(&grid, ".catalog-card-name")
        .and_then(|element| element.dyn_into::<HtmlElement>().ok())
        .map(|element| element.offset_height() as f64)
        .unwrap_or(DEFAULT_LABEL_HEIGHT_PX);
    let card_width_px = query(&grid, ".catalog-card-thumb")
        .and_then(|element| element.dyn_into::<HtmlElement>().ok())
        .map(|element| element.offset_width() as f64)
        .unwrap_or_else(|| card.offset_width() as f64);

    Some(LayoutMeasurement {
        columns,
        gap_px,
        card_height_px: card.offset_height() as f64,
        available_height_px,
        label_height_px,
        card_width_px,
    })
}

pub fn scroll_to_top(panel: &HtmlElement) {
    if let Some(container) = query(panel, ".catalog-grid-container") {
        container.set_scroll_top(0);
    }
}
