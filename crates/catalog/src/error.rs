//! Widget-level error taxonomy.
//!
//! Load failures and a missing host runtime abort or mark the widget; an
//! empty filtered result or a skipped layout measurement never surface
//! here, they are ordinary render states.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to load catalog data: {0}")]
    Load(String),

    #[error("tour runtime not ready after {waited_ms} ms")]
    HostUnavailable { waited_ms: u32 },

    #[error("panel {name:?} not found in the tour")]
    PanelNotFound { name: String },
}
