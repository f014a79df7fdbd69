//! stocklens-report: pure formatting over the analysis core's output.
//!
//! Consumes `KpiReport` and `InventoryReport` read-only; nothing here
//! feeds derived values back into the core.

pub mod format;
pub mod insight;
pub mod summary;

pub use insight::compose_insight;
pub use summary::render_report;
