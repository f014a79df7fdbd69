//! Shared data model for the analysis core.
//!
//! A run moves through three typed stages: `ProductRecord` (loaded and
//! normalized), `EnrichedProduct` (financial KPIs attached), and
//! `StockProfile` (inventory-health annotations attached). Each stage
//! is produced by a pure function over the previous one, so stage
//! ordering is enforced by the type system rather than by convention.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::Serialize;

// ---------------------------------------------------------------------------
// Input records
// ---------------------------------------------------------------------------

/// One row of the sales/inventory export after normalization.
///
/// Numeric fields are zero-filled: an absent or unparseable cell loads
/// as 0.0 rather than rejecting the row. Columns the loader does not
/// recognize pass through untouched in `extras`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProductRecord {
    pub model: String,
    pub category: String,
    pub price: f64,
    pub cost: f64,
    pub sales_2024: f64,
    pub sales_2023: f64,
    pub inventory: f64,
    pub annual_target: f64,
    pub order: f64,
    /// Unrecognized source columns, keyed by trimmed header name.
    pub extras: BTreeMap<String, String>,
}

// ---------------------------------------------------------------------------
// KPI stage
// ---------------------------------------------------------------------------

/// A product record with its per-row financial KPIs attached.
///
/// Every derived field is a pure function of the record's normalized
/// inputs; divisions are collapsed to zero on a zero denominator.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EnrichedProduct {
    pub record: ProductRecord,
    /// (Price - Cost) x Sales 2024.
    pub gross_profit: f64,
    /// Inventory x Cost.
    pub inventory_value: f64,
    /// Sales 2024 / Annual Target, zero when the target is zero.
    pub target_achievement: f64,
    /// Sales 2024 / 12.
    pub avg_monthly_sales: f64,
}

/// Aggregate output of the KPI stage.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct KpiReport {
    pub total_sales: f64,
    pub total_revenue: f64,
    pub gross_profit: f64,
    pub inventory_value: f64,
    /// Summed Sales 2024 per model, sorted by value descending.
    pub sales_by_model: Vec<(String, f64)>,
    /// Summed Order per model, sorted by value descending.
    pub orders_by_model: Vec<(String, f64)>,
    /// Summed Sales 2024 per category, sorted by value descending.
    pub sales_by_category: Vec<(String, f64)>,
    /// Highest Sales 2024; first occurrence wins a tie. None on empty input.
    pub top_seller: Option<EnrichedProduct>,
    pub worst_seller: Option<EnrichedProduct>,
    pub top_profit: Option<EnrichedProduct>,
    pub worst_profit: Option<EnrichedProduct>,
    /// Top five by gross profit.
    pub top_profitable: Vec<EnrichedProduct>,
    /// Top five by sales among products with positive sales and less
    /// than one month of inventory on hand.
    pub low_stock_movers: Vec<EnrichedProduct>,
    /// The full enriched table, in input order.
    pub products: Vec<EnrichedProduct>,
}

// ---------------------------------------------------------------------------
// Inventory stage
// ---------------------------------------------------------------------------

/// How many months of current sales velocity the on-hand inventory
/// represents, bucketed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum RiskLevel {
    #[serde(rename = "High Risk")]
    HighRisk,
    #[serde(rename = "Medium Risk")]
    MediumRisk,
    #[serde(rename = "Overstock")]
    Overstock,
}

impl RiskLevel {
    /// Bucket an inventory/sales ratio. Total over all finite inputs;
    /// the boundaries 1 and 3 both land in the medium bucket.
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio < 1.0 {
            RiskLevel::HighRisk
        } else if ratio <= 3.0 {
            RiskLevel::MediumRisk
        } else {
            RiskLevel::Overstock
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskLevel::HighRisk => write!(f, "High Risk"),
            RiskLevel::MediumRisk => write!(f, "Medium Risk"),
            RiskLevel::Overstock => write!(f, "Overstock"),
        }
    }
}

/// An enriched product with its inventory-health annotations attached.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StockProfile {
    pub product: EnrichedProduct,
    /// Inventory / Avg Monthly Sales, zero when there are no sales.
    pub sales_ratio: f64,
    /// Sales 2024 / Inventory, zero exactly when inventory is zero.
    pub stock_turnover: f64,
    pub risk: RiskLevel,
}

/// Aggregate output of the inventory stage.
///
/// The five partitions are independent predicates over the same rows;
/// a product may appear in more than one of them. `risk_counts`
/// iteration order is unspecified and callers must not depend on it.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct InventoryReport {
    pub risk_counts: HashMap<RiskLevel, usize>,
    /// Mean stock turnover across all rows, rounded to 2 decimals.
    pub average_turnover: f64,
    /// Positive sales with under a month of stock, by sales descending.
    pub high_demand_risk: Vec<StockProfile>,
    /// Stock on hand with zero sales, by inventory descending.
    pub dead_stock: Vec<StockProfile>,
    /// No stock but positive sales, by sales descending.
    pub out_of_stock_high_demand: Vec<StockProfile>,
    /// Stock on hand selling below the mean, by inventory descending.
    pub slow_moving: Vec<StockProfile>,
    /// Neither stock nor sales. Unsorted.
    pub stagnant: Vec<StockProfile>,
    /// The full annotated table, in input order.
    pub profiles: Vec<StockProfile>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn risk_buckets_are_exhaustive_and_exclusive() {
        for ratio in [0.0, 0.5, 0.999, 1.0, 1.5, 2.999, 3.0, 3.001, 12.0] {
            let level = RiskLevel::from_ratio(ratio);
            let expected = if ratio < 1.0 {
                RiskLevel::HighRisk
            } else if ratio <= 3.0 {
                RiskLevel::MediumRisk
            } else {
                RiskLevel::Overstock
            };
            assert_eq!(level, expected, "ratio {}", ratio);
        }
    }

    #[test]
    fn boundary_ratios_are_medium() {
        assert_eq!(RiskLevel::from_ratio(1.0), RiskLevel::MediumRisk);
        assert_eq!(RiskLevel::from_ratio(3.0), RiskLevel::MediumRisk);
    }

    #[test]
    fn risk_labels() {
        assert_eq!(RiskLevel::HighRisk.to_string(), "High Risk");
        assert_eq!(RiskLevel::MediumRisk.to_string(), "Medium Risk");
        assert_eq!(RiskLevel::Overstock.to_string(), "Overstock");
    }
}
