//! CSV product data loader.
//!
//! Reads a delimited sales/inventory export into `ProductRecord`s.
//! Recognized columns (exact post-trim names): Model, Category, Price,
//! Cost, "Sales 2024", "Sales 2023", Inventory, "Annual Target", Order.
//! Numeric cells are stripped of comma separators and whitespace; any
//! cell that still fails to parse loads as 0.0. Columns the loader does
//! not recognize pass through untouched in `ProductRecord::extras`.
//!
//! Schema policy is strict: all recognized columns must be present in
//! the header or loading fails with `MissingColumns`. Validating once
//! here makes every downstream stage a total function.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{DashboardError, DashboardResult};
use crate::types::ProductRecord;

/// Columns coerced to numbers during load.
pub const NUMERIC_COLUMNS: [&str; 7] = [
    "Price",
    "Cost",
    "Sales 2024",
    "Sales 2023",
    "Inventory",
    "Annual Target",
    "Order",
];

/// Categorical columns required alongside the numeric set.
pub const TEXT_COLUMNS: [&str; 2] = ["Model", "Category"];

/// Header prefix marking placeholder columns emitted by malformed
/// exports (e.g. "Unnamed: 12"). Their cells are discarded entirely.
const PLACEHOLDER_PREFIX: &str = "Unnamed";

/// Load product records from a CSV file path.
pub fn load_products(path: impl AsRef<Path>) -> DashboardResult<Vec<ProductRecord>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| DashboardError::DataSource {
        path: path.display().to_string(),
        source,
    })?;
    load_products_from_reader(file)
}

/// Load product records from any CSV reader.
pub fn load_products_from_reader<R: Read>(reader: R) -> DashboardResult<Vec<ProductRecord>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader
        .headers()?
        .iter()
        .map(|name| name.trim().to_string())
        .collect();
    let keep: Vec<bool> = headers
        .iter()
        .map(|h| !h.starts_with(PLACEHOLDER_PREFIX))
        .collect();

    let dropped = keep.iter().filter(|k| !**k).count();
    if dropped > 0 {
        log::warn!("dropping {} placeholder column(s) from header", dropped);
    }

    let columns = resolve_columns(&headers, &keep)?;

    let mut records = Vec::new();
    for result in csv_reader.records() {
        let row = result?;
        records.push(build_record(&row, &headers, &columns));
    }

    log::info!("loaded {} product records", records.len());
    Ok(records)
}

/// Header indices for the recognized columns, plus the pass-through set.
struct ColumnMap {
    model: usize,
    category: usize,
    price: usize,
    cost: usize,
    sales_2024: usize,
    sales_2023: usize,
    inventory: usize,
    annual_target: usize,
    order: usize,
    extras: Vec<usize>,
}

fn resolve_columns(headers: &[String], keep: &[bool]) -> DashboardResult<ColumnMap> {
    let find = |name: &str| {
        headers
            .iter()
            .enumerate()
            .position(|(i, h)| keep[i] && h == name)
    };

    let mut missing: Vec<String> = Vec::new();
    let mut required = |name: &str| -> usize {
        match find(name) {
            Some(i) => i,
            None => {
                missing.push(name.to_string());
                usize::MAX
            }
        }
    };

    let recognized = |name: &str| {
        TEXT_COLUMNS.contains(&name) || NUMERIC_COLUMNS.contains(&name)
    };

    let columns = ColumnMap {
        model: required("Model"),
        category: required("Category"),
        price: required("Price"),
        cost: required("Cost"),
        sales_2024: required("Sales 2024"),
        sales_2023: required("Sales 2023"),
        inventory: required("Inventory"),
        annual_target: required("Annual Target"),
        order: required("Order"),
        extras: headers
            .iter()
            .enumerate()
            .filter(|(i, h)| keep[*i] && !recognized(h))
            .map(|(i, _)| i)
            .collect(),
    };

    if missing.is_empty() {
        Ok(columns)
    } else {
        Err(DashboardError::MissingColumns { columns: missing })
    }
}

fn build_record(row: &csv::StringRecord, headers: &[String], columns: &ColumnMap) -> ProductRecord {
    let cell = |idx: usize| row.get(idx).unwrap_or("");

    let mut extras = BTreeMap::new();
    for &idx in &columns.extras {
        extras.insert(headers[idx].clone(), cell(idx).to_string());
    }

    ProductRecord {
        model: cell(columns.model).trim().to_string(),
        category: cell(columns.category).trim().to_string(),
        price: parse_numeric(cell(columns.price)),
        cost: parse_numeric(cell(columns.cost)),
        sales_2024: parse_numeric(cell(columns.sales_2024)),
        sales_2023: parse_numeric(cell(columns.sales_2023)),
        inventory: parse_numeric(cell(columns.inventory)),
        annual_target: parse_numeric(cell(columns.annual_target)),
        order: parse_numeric(cell(columns.order)),
        extras,
    }
}

/// Coerce a numeric cell: strip comma thousands separators and
/// surrounding whitespace, then parse. Unparseable cells zero-fill.
fn parse_numeric(cell: &str) -> f64 {
    let cleaned = cell.replace(',', "");
    cleaned.trim().parse().unwrap_or(0.0)
}
