//! Viewport-driven page-size and card-aspect math.
//!
//! The column count of the card grid is responsive and only knowable after
//! paint, so these functions work on geometry measured from the rendered
//! grid. They are pure; the DOM reads live in the frontend probe.

/// Geometry of the painted grid, read once per render pass and discarded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutMeasurement {
    /// Resolved column tracks of the grid.
    pub columns: usize,
    pub gap_px: f64,
    /// Rendered height of one card.
    pub card_height_px: f64,
    /// Container height minus its own vertical padding.
    pub available_height_px: f64,
    /// Rendered height of one card's text label block.
    pub label_height_px: f64,
    /// Rendered width of one card's thumbnail box.
    pub card_width_px: f64,
}

pub const MIN_ASPECT_PERCENT: f64 = 50.0;
pub const MAX_ASPECT_PERCENT: f64 = 200.0;

/// How many cards fill the visible area without internal scrolling, never
/// below one full row and never below `min_rows` rows.
pub fn optimal_page_size(m: &LayoutMeasurement, min_rows: usize) -> usize {
    let columns = m.columns.max(1);
    let rows = ((m.available_height_px + m.gap_px) / (m.card_height_px + m.gap_px)).floor();
    let rows = if rows.is_finite() && rows > 0.0 { rows as usize } else { 0 };
    let rows = rows.max(min_rows);
    (rows * columns).max(columns)
}

/// Thumbnail height as a percentage of its width (the `padding-top`
/// convention), sized so a full page of cards fills the available height.
/// Clamped to keep thumbnails usable in degenerate geometries.
pub fn image_aspect_percent(m: &LayoutMeasurement, page_size: usize, min_rows: usize) -> f64 {
    let columns = m.columns.max(1);
    let rows = page_size.div_ceil(columns).max(min_rows).max(1);
    let card_height = (m.available_height_px - m.gap_px * (rows as f64 - 1.0)) / rows as f64;
    let image_height = card_height - m.label_height_px;
    let aspect = image_height / m.card_width_px * 100.0;
    if aspect.is_finite() {
        aspect.clamp(MIN_ASPECT_PERCENT, MAX_ASPECT_PERCENT)
    } else {
        MIN_ASPECT_PERCENT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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
    fn three_columns_three_rows() {
        // floor((900 + 15) / (280 + 15)) = 3 rows of 3 columns
        assert_eq!(optimal_page_size(&measurement(), 2), 9);
    }

    #[test]
    fn min_rows_is_a_hard_floor() {
        let short = LayoutMeasurement { available_height_px: 200.0, ..measurement() };
        assert_eq!(optimal_page_size(&short, 2), 6);
    }

    #[test]
    fn never_below_one_full_row() {
        let tiny = LayoutMeasurement { available_height_px: 0.0, columns: 4, ..measurement() };
        assert_eq!(optimal_page_size(&tiny, 0), 4);
    }

    #[test]
    fn aspect_fits_the_height_budget() {
        // 9 cards in 3 columns: 3 rows, card height (900 - 30) / 3 = 290,
        // image height 240, width 180 -> 133.3%
        let aspect = image_aspect_percent(&measurement(), 9, 2);
        assert!((aspect - 240.0 / 180.0 * 100.0).abs() < 0.01);
    }

    #[test]
    fn aspect_is_always_clamped() {
        let squashed = LayoutMeasurement { available_height_px: 120.0, ..measurement() };
        assert_eq!(image_aspect_percent(&squashed, 9, 2), MIN_ASPECT_PERCENT);

        let towering = LayoutMeasurement {
            available_height_px: 4000.0,
            card_width_px: 100.0,
            ..measurement()
        };
        assert_eq!(image_aspect_percent(&towering, 3, 2), MAX_ASPECT_PERCENT);
    }

    #[test]
    fn zero_width_card_clamps_instead_of_exploding() {
        let degenerate = LayoutMeasurement { card_width_px: 0.0, ..measurement() };
        let aspect = image_aspect_percent(&degenerate, 9, 2);
        assert!((MIN_ASPECT_PERCENT..=MAX_ASPECT_PERCENT).contains(&aspect));
    }
}
