//! Core engine of the tour catalog widgets.
//!
//! Everything in this crate is independent of the browser: filtering,
//! pagination, the viewport-driven page-size/aspect-ratio math and the
//! render tree are plain data and plain functions, so the whole widget
//! behavior is unit-testable without wasm. The `frontend` crate owns the
//! DOM, the timers and the tour runtime bridge and feeds this engine.

pub mod config;
pub mod debounce;
pub mod engine;
pub mod error;
pub mod filter;
pub mod layout;
pub mod locale;
pub mod pagination;
pub mod store;
pub mod view;

pub use config::CatalogConfig;
pub use debounce::Debounce;
pub use engine::{CatalogEngine, WidgetSnapshot};
pub use error::CatalogError;
pub use filter::FilterState;
pub use layout::LayoutMeasurement;
pub use pagination::{PageButton, PaginationEngine};
pub use view::PanelView;
