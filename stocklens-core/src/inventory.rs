//! Inventory health: risk classification, turnover, stock partitions.
//!
//! Runs after the KPI stage; the `EnrichedProduct` input type encodes
//! that ordering (Avg Monthly Sales must already exist). Like the KPI
//! stage this never fails, never mutates its input, and derives only
//! from base fields, so re-running it over its own output reproduces
//! identical values.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::types::{EnrichedProduct, InventoryReport, RiskLevel, StockProfile};
use crate::util::{round2, safe_div};

/// Annotate every row with ratio/turnover/risk and partition the set.
pub fn analyze_inventory(products: &[EnrichedProduct]) -> InventoryReport {
    let profiles: Vec<StockProfile> = products.iter().cloned().map(profile).collect();

    let mut risk_counts: HashMap<RiskLevel, usize> = HashMap::new();
    for p in &profiles {
        *risk_counts.entry(p.risk).or_insert(0) += 1;
    }

    let turnover_sum: f64 = profiles.iter().map(|p| p.stock_turnover).sum();
    let average_turnover = round2(safe_div(turnover_sum, profiles.len() as f64));

    let mean_sales = safe_div(
        profiles.iter().map(|p| sales(p)).sum(),
        profiles.len() as f64,
    );

    let mut high_demand_risk: Vec<StockProfile> = profiles
        .iter()
        .filter(|p| sales(p) > 0.0 && inventory(p) < p.product.avg_monthly_sales)
        .cloned()
        .collect();
    sort_desc_by(&mut high_demand_risk, sales);

    let mut dead_stock: Vec<StockProfile> = profiles
        .iter()
        .filter(|p| inventory(p) > 0.0 && sales(p) == 0.0)
        .cloned()
        .collect();
    sort_desc_by(&mut dead_stock, inventory);

    let mut out_of_stock_high_demand: Vec<StockProfile> = profiles
        .iter()
        .filter(|p| inventory(p) == 0.0 && sales(p) > 0.0)
        .cloned()
        .collect();
    sort_desc_by(&mut out_of_stock_high_demand, sales);

    let mut slow_moving: Vec<StockProfile> = profiles
        .iter()
        .filter(|p| inventory(p) > 0.0 && sales(p) < mean_sales)
        .cloned()
        .collect();
    sort_desc_by(&mut slow_moving, inventory);

    let stagnant: Vec<StockProfile> = profiles
        .iter()
        .filter(|p| inventory(p) == 0.0 && sales(p) == 0.0)
        .cloned()
        .collect();

    InventoryReport {
        risk_counts,
        average_turnover,
        high_demand_risk,
        dead_stock,
        out_of_stock_high_demand,
        slow_moving,
        stagnant,
        profiles,
    }
}

/// Attach ratio, turnover and risk level to one enriched row.
fn profile(product: EnrichedProduct) -> StockProfile {
    let sales_ratio = safe_div(product.record.inventory, product.avg_monthly_sales);
    let stock_turnover = safe_div(product.record.sales_2024, product.record.inventory);
    let risk = RiskLevel::from_ratio(sales_ratio);
    StockProfile {
        product,
        sales_ratio,
        stock_turnover,
        risk,
    }
}

fn sales(p: &StockProfile) -> f64 {
    p.product.record.sales_2024
}

fn inventory(p: &StockProfile) -> f64 {
    p.product.record.inventory
}

/// Stable descending sort; ties keep input order.
fn sort_desc_by(list: &mut [StockProfile], metric: impl Fn(&StockProfile) -> f64) {
    list.sort_by(|a, b| metric(b).partial_cmp(&metric(a)).unwrap_or(Ordering::Equal));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kpi::calculate_kpis;
    use crate::types::ProductRecord;
    use std::collections::BTreeMap;

    fn product(model: &str, sales: f64, inventory: f64) -> ProductRecord {
        ProductRecord {
            model: model.to_string(),
            category: "SUV".to_string(),
            price: 50_000.0,
            cost: 40_000.0,
            sales_2024: sales,
            sales_2023: 0.0,
            inventory,
            annual_target: 1_000.0,
            order: 0.0,
            extras: BTreeMap::new(),
        }
    }

    fn analyze(records: &[ProductRecord]) -> InventoryReport {
        analyze_inventory(&calculate_kpis(records).products)
    }

    #[test]
    fn worked_example_xc60() {
        let report = analyze(&[product("XC60", 100.0, 10.0)]);
        let p = &report.profiles[0];
        assert!((p.sales_ratio - 1.2).abs() < 1e-9);
        assert_eq!(p.risk, RiskLevel::MediumRisk);
        assert_eq!(p.stock_turnover, 10.0);
        assert_eq!(report.average_turnover, 10.0);
    }

    #[test]
    fn turnover_is_zero_exactly_when_inventory_is_zero() {
        let report = analyze(&[
            product("A", 80.0, 0.0),
            product("B", 0.0, 0.0),
            product("C", 30.0, 6.0),
        ]);
        assert_eq!(report.profiles[0].stock_turnover, 0.0);
        assert_eq!(report.profiles[1].stock_turnover, 0.0);
        assert_eq!(report.profiles[2].stock_turnover, 5.0);
        for p in &report.profiles {
            assert!(p.stock_turnover.is_finite());
            assert!(p.stock_turnover >= 0.0);
        }
    }

    #[test]
    fn average_turnover_rounds_to_two_decimals() {
        // Turnovers 5.0, 0.0, 5.0 -> mean 10/3 = 3.3333 -> 3.33.
        let report = analyze(&[
            product("A", 30.0, 6.0),
            product("B", 0.0, 10.0),
            product("C", 10.0, 2.0),
        ]);
        assert_eq!(report.average_turnover, 3.33);
    }

    #[test]
    fn risk_counts_cover_every_row_once() {
        let report = analyze(&[
            product("A", 120.0, 2.0),  // ratio 0.2 -> High Risk
            product("B", 120.0, 20.0), // ratio 2.0 -> Medium Risk
            product("C", 12.0, 50.0),  // ratio 50 -> Overstock
            product("D", 120.0, 1.0),  // ratio 0.1 -> High Risk
        ]);
        assert_eq!(report.risk_counts.get(&RiskLevel::HighRisk), Some(&2));
        assert_eq!(report.risk_counts.get(&RiskLevel::MediumRisk), Some(&1));
        assert_eq!(report.risk_counts.get(&RiskLevel::Overstock), Some(&1));
        let counted: usize = report.risk_counts.values().sum();
        assert_eq!(counted, report.profiles.len());
    }

    #[test]
    fn zero_sales_rows_classify_high_risk_via_zero_ratio() {
        // Dead stock has ratio 0 (safe divide), landing in High Risk.
        let report = analyze(&[product("A", 0.0, 40.0)]);
        assert_eq!(report.profiles[0].sales_ratio, 0.0);
        assert_eq!(report.profiles[0].risk, RiskLevel::HighRisk);
    }

    #[test]
    fn high_demand_risk_sorted_by_sales_descending() {
        let report = analyze(&[
            product("A", 60.0, 1.0),
            product("B", 240.0, 2.0),
            product("C", 120.0, 3.0),
        ]);
        let models: Vec<&str> = report
            .high_demand_risk
            .iter()
            .map(|p| p.product.record.model.as_str())
            .collect();
        assert_eq!(models, vec!["B", "C", "A"]);
    }

    #[test]
    fn dead_stock_requires_stock_and_zero_sales() {
        let report = analyze(&[
            product("A", 0.0, 40.0),
            product("B", 0.0, 90.0),
            product("C", 10.0, 5.0),
            product("D", 0.0, 0.0),
        ]);
        let models: Vec<&str> = report
            .dead_stock
            .iter()
            .map(|p| p.product.record.model.as_str())
            .collect();
        assert_eq!(models, vec!["B", "A"]);
    }

    #[test]
    fn out_of_stock_high_demand_sorted_by_sales() {
        let report = analyze(&[
            product("A", 30.0, 0.0),
            product("B", 300.0, 0.0),
            product("C", 10.0, 5.0),
        ]);
        let models: Vec<&str> = report
            .out_of_stock_high_demand
            .iter()
            .map(|p| p.product.record.model.as_str())
            .collect();
        assert_eq!(models, vec!["B", "A"]);
    }

    #[test]
    fn slow_moving_compares_against_mean_sales() {
        // Mean sales = (100 + 20 + 0) / 3 = 40.
        let report = analyze(&[
            product("A", 100.0, 5.0),
            product("B", 20.0, 8.0),
            product("C", 0.0, 50.0),
        ]);
        let models: Vec<&str> = report
            .slow_moving
            .iter()
            .map(|p| p.product.record.model.as_str())
            .collect();
        assert_eq!(models, vec!["C", "B"]);
    }

    #[test]
    fn zero_zero_rows_only_appear_stagnant() {
        let report = analyze(&[product("A", 0.0, 0.0), product("B", 50.0, 10.0)]);
        assert_eq!(report.stagnant.len(), 1);
        assert_eq!(report.stagnant[0].product.record.model, "A");
        let in_others = report
            .dead_stock
            .iter()
            .chain(&report.high_demand_risk)
            .chain(&report.out_of_stock_high_demand)
            .any(|p| p.product.record.model == "A");
        assert!(!in_others);
    }

    #[test]
    fn partitions_may_overlap() {
        // A: sales 10 < mean 55, inventory 0.5 < avg monthly 0.83 --
        // both high-demand-risk and slow-moving.
        let report = analyze(&[product("A", 10.0, 0.5), product("B", 100.0, 200.0)]);
        let in_high_demand = report
            .high_demand_risk
            .iter()
            .any(|p| p.product.record.model == "A");
        let in_slow_moving = report
            .slow_moving
            .iter()
            .any(|p| p.product.record.model == "A");
        assert!(in_high_demand);
        assert!(in_slow_moving);
    }

    #[test]
    fn empty_input_yields_empty_report() {
        let report = analyze_inventory(&[]);
        assert_eq!(report.average_turnover, 0.0);
        assert!(report.risk_counts.is_empty());
        assert!(report.profiles.is_empty());
        assert!(report.stagnant.is_empty());
    }

    #[test]
    fn reanalyzing_own_output_is_identical() {
        let first = analyze(&[
            product("A", 120.0, 2.0),
            product("B", 0.0, 40.0),
            product("C", 30.0, 90.0),
        ]);
        let enriched: Vec<_> = first.profiles.iter().map(|p| p.product.clone()).collect();
        let second = analyze_inventory(&enriched);
        assert_eq!(first, second);
    }
}
