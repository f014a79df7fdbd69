//! stocklens-core: the sales & inventory analysis core.
//!
//! A run is a chain of pure stages over immutable inputs:
//!
//! 1. `loader::load_products` reads and normalizes the CSV export.
//! 2. `filter::ProductFilter` optionally narrows the record set.
//! 3. `kpi::calculate_kpis` attaches financial metrics and aggregates.
//! 4. `inventory::analyze_inventory` attaches stock-health annotations
//!    and partitions the rows.
//!
//! Each stage returns new values; no stage mutates what it was given.
//! There is no shared state, so independent runs are safe from any
//! number of threads without locking.

pub mod error;
pub mod filter;
pub mod inventory;
pub mod kpi;
pub mod loader;
pub mod types;
pub mod util;

pub use error::{DashboardError, DashboardResult};
