//! Plain-text report rendering.
//!
//! Renders the same sections the exported summary document carries:
//! KPI figures, risk distribution, stock partitions, and the insight
//! paragraphs. Chart and PDF rendering live outside this workspace;
//! consumers embed this text or feed the structured reports to their
//! own layout engine.

use std::fmt::Write;

use stocklens_core::types::{InventoryReport, KpiReport, RiskLevel, StockProfile};

use crate::format::{format_currency, format_units};

/// Rows shown per partition section before eliding the rest.
const SECTION_ROW_LIMIT: usize = 10;

/// Render the full text report for one analysis run.
pub fn render_report(kpis: &KpiReport, inventory: &InventoryReport, insight: &str) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "SALES & INVENTORY REPORT");
    let _ = writeln!(out, "========================");
    let _ = writeln!(out);

    let _ = writeln!(out, "Key Performance Indicators");
    let _ = writeln!(out, "--------------------------");
    let _ = writeln!(out, "Total Sales:         {} units", format_units(kpis.total_sales));
    let _ = writeln!(out, "Revenue:             £{}", format_currency(kpis.total_revenue));
    let _ = writeln!(out, "Gross Profit:        £{}", format_currency(kpis.gross_profit));
    let _ = writeln!(out, "Inventory Value:     £{}", format_currency(kpis.inventory_value));
    let _ = writeln!(out, "Avg Stock Turnover:  {:.2}", inventory.average_turnover);
    let _ = writeln!(out);

    let _ = writeln!(out, "Inventory Risk Distribution");
    let _ = writeln!(out, "---------------------------");
    // Fixed label order for stable output; the counts map itself is
    // unordered.
    for level in [RiskLevel::HighRisk, RiskLevel::MediumRisk, RiskLevel::Overstock] {
        let count = inventory.risk_counts.get(&level).copied().unwrap_or(0);
        let _ = writeln!(out, "{:<12} {}", level.to_string(), count);
    }
    let _ = writeln!(out);

    partition_section(&mut out, "High-Demand Risk (selling faster than stock)", &inventory.high_demand_risk);
    partition_section(&mut out, "Dead Stock (inventory, no sales)", &inventory.dead_stock);
    partition_section(&mut out, "Out of Stock, High Demand", &inventory.out_of_stock_high_demand);
    partition_section(&mut out, "Slow-Moving Inventory", &inventory.slow_moving);
    partition_section(&mut out, "Stagnant (no inventory, no sales)", &inventory.stagnant);

    let _ = writeln!(out, "Insight Summary");
    let _ = writeln!(out, "---------------");
    let _ = writeln!(out, "{}", insight);

    out
}

fn partition_section(out: &mut String, title: &str, rows: &[StockProfile]) {
    let _ = writeln!(out, "{}: {} product(s)", title, rows.len());
    for profile in rows.iter().take(SECTION_ROW_LIMIT) {
        let record = &profile.product.record;
        let _ = writeln!(
            out,
            "  {:<16} {:<10} sales {:>8}  inventory {:>8}  [{}]",
            record.model,
            record.category,
            format_units(record.sales_2024),
            format_units(record.inventory),
            profile.risk,
        );
    }
    if rows.len() > SECTION_ROW_LIMIT {
        let _ = writeln!(out, "  ... and {} more", rows.len() - SECTION_ROW_LIMIT);
    }
    let _ = writeln!(out);
}
