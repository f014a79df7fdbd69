//! Subset selection by model/category membership.
//!
//! The narrowing step between loading and KPI computation. Filtering
//! copies the matching records; the source slice is never mutated.

use crate::types::ProductRecord;

/// Membership filter over the loaded table. An empty list places no
/// restriction on that attribute.
#[derive(Clone, Debug, Default)]
pub struct ProductFilter {
    pub models: Vec<String>,
    pub categories: Vec<String>,
}

impl ProductFilter {
    pub fn is_empty(&self) -> bool {
        self.models.is_empty() && self.categories.is_empty()
    }

    pub fn matches(&self, record: &ProductRecord) -> bool {
        let model_ok = self.models.is_empty() || self.models.iter().any(|m| *m == record.model);
        let category_ok =
            self.categories.is_empty() || self.categories.iter().any(|c| *c == record.category);
        model_ok && category_ok
    }

    pub fn apply(&self, records: &[ProductRecord]) -> Vec<ProductRecord> {
        records.iter().filter(|r| self.matches(r)).cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn record(model: &str, category: &str) -> ProductRecord {
        ProductRecord {
            model: model.to_string(),
            category: category.to_string(),
            price: 0.0,
            cost: 0.0,
            sales_2024: 0.0,
            sales_2023: 0.0,
            inventory: 0.0,
            annual_target: 0.0,
            order: 0.0,
            extras: BTreeMap::new(),
        }
    }

    #[test]
    fn empty_filter_passes_everything() {
        let records = vec![record("XC60", "SUV"), record("S60", "Sedan")];
        let filter = ProductFilter::default();
        assert!(filter.is_empty());
        assert_eq!(filter.apply(&records), records);
    }

    #[test]
    fn model_membership_narrows() {
        let records = vec![
            record("XC60", "SUV"),
            record("S60", "Sedan"),
            record("XC90", "SUV"),
        ];
        let filter = ProductFilter {
            models: vec!["XC60".into(), "XC90".into()],
            categories: Vec::new(),
        };
        let kept = filter.apply(&records);
        assert_eq!(kept.len(), 2);
        assert!(kept.iter().all(|r| r.model.starts_with("XC")));
    }

    #[test]
    fn model_and_category_intersect() {
        let records = vec![
            record("XC60", "SUV"),
            record("XC60", "Fleet"),
            record("S60", "Sedan"),
        ];
        let filter = ProductFilter {
            models: vec!["XC60".into()],
            categories: vec!["Fleet".into()],
        };
        let kept = filter.apply(&records);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].category, "Fleet");
    }
}
