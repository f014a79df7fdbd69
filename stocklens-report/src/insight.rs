//! Natural-language summary of a completed analysis run.

use stocklens_core::types::{InventoryReport, KpiReport};

use crate::format::{format_currency, format_units};

/// Compose the two-paragraph executive insight.
///
/// The template is fixed; only the embedded figures vary. The inventory
/// report is part of the composer's contract even though the current
/// template embeds only KPI figures.
pub fn compose_insight(kpis: &KpiReport, _inventory: &InventoryReport) -> String {
    format!(
        "In 2024, the business recorded total sales of {} units, generating \
£{} in revenue with a gross profit of approximately £{}. \
Current inventory value stands at £{}.\n\n\
These figures highlight the importance of aligning procurement with actual \
demand and addressing dead stock more efficiently.",
        format_units(kpis.total_sales),
        format_currency(kpis.total_revenue),
        format_currency(kpis.gross_profit),
        format_currency(kpis.inventory_value),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use stocklens_core::inventory::analyze_inventory;
    use stocklens_core::kpi::calculate_kpis;
    use stocklens_core::types::ProductRecord;

    fn run(records: &[ProductRecord]) -> (KpiReport, InventoryReport) {
        let kpis = calculate_kpis(records);
        let inventory = analyze_inventory(&kpis.products);
        (kpis, inventory)
    }

    #[test]
    fn embeds_grouped_figures_in_the_fixed_template() {
        let record = ProductRecord {
            model: "XC60".into(),
            category: "SUV".into(),
            price: 50_000.0,
            cost: 40_000.0,
            sales_2024: 100.0,
            sales_2023: 0.0,
            inventory: 10.0,
            annual_target: 1_000.0,
            order: 0.0,
            extras: BTreeMap::new(),
        };
        let (kpis, inventory) = run(&[record]);
        let text = compose_insight(&kpis, &inventory);
        assert_eq!(
            text,
            "In 2024, the business recorded total sales of 100 units, generating \
£5,000,000 in revenue with a gross profit of approximately £1,000,000. \
Current inventory value stands at £400,000.\n\n\
These figures highlight the importance of aligning procurement with actual \
demand and addressing dead stock more efficiently."
        );
    }

    #[test]
    fn two_paragraphs_always() {
        let (kpis, inventory) = run(&[]);
        let text = compose_insight(&kpis, &inventory);
        assert_eq!(text.matches("\n\n").count(), 1);
        assert!(text.contains("total sales of 0 units"));
    }
}
