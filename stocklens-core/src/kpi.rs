//! Per-product financial KPIs and dataset-level aggregates.
//!
//! `calculate_kpis` is the first analysis stage. It never fails: the
//! schema was validated at load time, so every computation here is a
//! total function over the typed records. Derivations read only the
//! normalized base fields, never previously derived columns, which
//! makes the stage idempotent over its own output.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::types::{EnrichedProduct, KpiReport, ProductRecord};
use crate::util::safe_div;

const MONTHS_PER_YEAR: f64 = 12.0;
/// Length of the ranked "top products" lists.
const TOP_LIST_SIZE: usize = 5;

/// Compute per-row financial metrics and dataset aggregates.
pub fn calculate_kpis(records: &[ProductRecord]) -> KpiReport {
    let products: Vec<EnrichedProduct> = records.iter().cloned().map(enrich).collect();

    let total_sales = products.iter().map(|p| p.record.sales_2024).sum();
    let total_revenue = products
        .iter()
        .map(|p| p.record.sales_2024 * p.record.price)
        .sum();
    let gross_profit = products.iter().map(|p| p.gross_profit).sum();
    let inventory_value = products.iter().map(|p| p.inventory_value).sum();

    let sales_by_model = group_sum(&products, |p| p.record.model.as_str(), |p| p.record.sales_2024);
    let orders_by_model = group_sum(&products, |p| p.record.model.as_str(), |p| p.record.order);
    let sales_by_category =
        group_sum(&products, |p| p.record.category.as_str(), |p| p.record.sales_2024);

    let top_seller = extreme_max(&products, |p| p.record.sales_2024);
    let worst_seller = extreme_min(&products, |p| p.record.sales_2024);
    let top_profit = extreme_max(&products, |p| p.gross_profit);
    let worst_profit = extreme_min(&products, |p| p.gross_profit);

    let top_profitable = top_n(&products, |p| p.gross_profit, TOP_LIST_SIZE, |_| true);
    let low_stock_movers = top_n(
        &products,
        |p| p.record.sales_2024,
        TOP_LIST_SIZE,
        is_low_stock_mover,
    );

    KpiReport {
        total_sales,
        total_revenue,
        gross_profit,
        inventory_value,
        sales_by_model,
        orders_by_model,
        sales_by_category,
        top_seller,
        worst_seller,
        top_profit,
        worst_profit,
        top_profitable,
        low_stock_movers,
        products,
    }
}

/// Attach the per-row financial metrics to one record.
fn enrich(record: ProductRecord) -> EnrichedProduct {
    let gross_profit = (record.price - record.cost) * record.sales_2024;
    let inventory_value = record.inventory * record.cost;
    let target_achievement = safe_div(record.sales_2024, record.annual_target);
    let avg_monthly_sales = record.sales_2024 / MONTHS_PER_YEAR;
    EnrichedProduct {
        record,
        gross_profit,
        inventory_value,
        target_achievement,
        avg_monthly_sales,
    }
}

/// Selling faster than the shelf can cover: positive sales with less
/// than one month of inventory on hand.
pub fn is_low_stock_mover(product: &EnrichedProduct) -> bool {
    product.record.sales_2024 > 0.0 && product.record.inventory < product.avg_monthly_sales
}

/// Sum `value` per `key`, sorted by summed value descending.
///
/// The sort is stable over key discovery order, so ties keep the order
/// in which the keys first appear in the input.
fn group_sum(
    products: &[EnrichedProduct],
    key: impl Fn(&EnrichedProduct) -> &str,
    value: impl Fn(&EnrichedProduct) -> f64,
) -> Vec<(String, f64)> {
    let mut discovery: Vec<String> = Vec::new();
    let mut sums: HashMap<String, f64> = HashMap::new();
    for product in products {
        let k = key(product);
        if !sums.contains_key(k) {
            discovery.push(k.to_string());
        }
        *sums.entry(k.to_string()).or_insert(0.0) += value(product);
    }

    let mut grouped: Vec<(String, f64)> = discovery
        .into_iter()
        .map(|k| {
            let total = sums.get(&k).copied().unwrap_or(0.0);
            (k, total)
        })
        .collect();
    grouped.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    grouped
}

/// First record with the strictly greatest metric; None on empty input.
fn extreme_max(
    products: &[EnrichedProduct],
    metric: impl Fn(&EnrichedProduct) -> f64,
) -> Option<EnrichedProduct> {
    let mut best: Option<(usize, f64)> = None;
    for (i, product) in products.iter().enumerate() {
        let value = metric(product);
        match best {
            Some((_, current)) if value <= current => {}
            _ => best = Some((i, value)),
        }
    }
    best.map(|(i, _)| products[i].clone())
}

/// First record with the strictly smallest metric; None on empty input.
fn extreme_min(
    products: &[EnrichedProduct],
    metric: impl Fn(&EnrichedProduct) -> f64,
) -> Option<EnrichedProduct> {
    let mut best: Option<(usize, f64)> = None;
    for (i, product) in products.iter().enumerate() {
        let value = metric(product);
        match best {
            Some((_, current)) if value >= current => {}
            _ => best = Some((i, value)),
        }
    }
    best.map(|(i, _)| products[i].clone())
}

/// Keep the matching records, sorted by metric descending, truncated to
/// `n`. Stable sort, so ties keep input order.
fn top_n(
    products: &[EnrichedProduct],
    metric: impl Fn(&EnrichedProduct) -> f64,
    n: usize,
    keep: impl Fn(&EnrichedProduct) -> bool,
) -> Vec<EnrichedProduct> {
    let mut picked: Vec<EnrichedProduct> = products.iter().filter(|p| keep(p)).cloned().collect();
    picked.sort_by(|a, b| metric(b).partial_cmp(&metric(a)).unwrap_or(Ordering::Equal));
    picked.truncate(n);
    picked
}
