//! stocklens: run the sales & inventory analysis over a CSV export and
//! print a dashboard summary, as formatted text or JSON.

use std::collections::HashMap;
use std::env;
use std::process;
use std::time::Instant;

use chrono::Utc;
use serde::Serialize;

use stocklens_core::filter::ProductFilter;
use stocklens_core::inventory::analyze_inventory;
use stocklens_core::kpi::calculate_kpis;
use stocklens_core::loader::load_products;
use stocklens_core::types::{EnrichedProduct, InventoryReport, KpiReport, RiskLevel, StockProfile};
use stocklens_report::format::{format_currency, format_units};
use stocklens_report::{compose_insight, render_report};

// ---------------------------------------------------------------------------
// JSON output contract
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct DashboardJson {
    generated_at: String,
    model_filter: Vec<String>,
    category_filter: Vec<String>,
    load_ms: u128,
    analysis_ms: u128,
    records_analyzed: usize,
    kpis: KpiJson,
    inventory: InventoryJson,
    insight: String,
}

#[derive(Serialize)]
struct KpiJson {
    total_sales: f64,
    total_revenue: f64,
    gross_profit: f64,
    inventory_value: f64,
    sales_by_model: Vec<GroupJson>,
    orders_by_model: Vec<GroupJson>,
    sales_by_category: Vec<GroupJson>,
    top_seller: Option<ProductJson>,
    worst_seller: Option<ProductJson>,
    top_profit: Option<ProductJson>,
    worst_profit: Option<ProductJson>,
    top_profitable: Vec<ProductJson>,
    low_stock_movers: Vec<ProductJson>,
}

#[derive(Serialize)]
struct GroupJson {
    key: String,
    value: f64,
}

#[derive(Serialize)]
struct ProductJson {
    model: String,
    category: String,
    sales_2024: f64,
    inventory: f64,
    gross_profit: f64,
    target_achievement: f64,
}

#[derive(Serialize)]
struct InventoryJson {
    risk_counts: HashMap<String, usize>,
    average_turnover: f64,
    high_demand_risk: Vec<StockJson>,
    dead_stock: Vec<StockJson>,
    out_of_stock_high_demand: Vec<StockJson>,
    slow_moving: Vec<StockJson>,
    stagnant: Vec<StockJson>,
}

#[derive(Serialize)]
struct StockJson {
    model: String,
    category: String,
    sales_2024: f64,
    inventory: f64,
    sales_ratio: f64,
    stock_turnover: f64,
    risk_level: String,
}

fn product_json(product: &EnrichedProduct) -> ProductJson {
    ProductJson {
        model: product.record.model.clone(),
        category: product.record.category.clone(),
        sales_2024: product.record.sales_2024,
        inventory: product.record.inventory,
        gross_profit: product.gross_profit,
        target_achievement: product.target_achievement,
    }
}

fn stock_json(profile: &StockProfile) -> StockJson {
    StockJson {
        model: profile.product.record.model.clone(),
        category: profile.product.record.category.clone(),
        sales_2024: profile.product.record.sales_2024,
        inventory: profile.product.record.inventory,
        sales_ratio: profile.sales_ratio,
        stock_turnover: profile.stock_turnover,
        risk_level: profile.risk.to_string(),
    }
}

fn group_json(grouped: &[(String, f64)]) -> Vec<GroupJson> {
    grouped
        .iter()
        .map(|(key, value)| GroupJson {
            key: key.clone(),
            value: *value,
        })
        .collect()
}

fn build_json(
    kpis: &KpiReport,
    inventory: &InventoryReport,
    insight: &str,
    filter: &ProductFilter,
    load_ms: u128,
    analysis_ms: u128,
) -> DashboardJson {
    DashboardJson {
        generated_at: Utc::now().to_rfc3339(),
        model_filter: filter.models.clone(),
        category_filter: filter.categories.clone(),
        load_ms,
        analysis_ms,
        records_analyzed: kpis.products.len(),
        kpis: KpiJson {
            total_sales: kpis.total_sales,
            total_revenue: kpis.total_revenue,
            gross_profit: kpis.gross_profit,
            inventory_value: kpis.inventory_value,
            sales_by_model: group_json(&kpis.sales_by_model),
            orders_by_model: group_json(&kpis.orders_by_model),
            sales_by_category: group_json(&kpis.sales_by_category),
            top_seller: kpis.top_seller.as_ref().map(product_json),
            worst_seller: kpis.worst_seller.as_ref().map(product_json),
            top_profit: kpis.top_profit.as_ref().map(product_json),
            worst_profit: kpis.worst_profit.as_ref().map(product_json),
            top_profitable: kpis.top_profitable.iter().map(product_json).collect(),
            low_stock_movers: kpis.low_stock_movers.iter().map(product_json).collect(),
        },
        inventory: InventoryJson {
            risk_counts: inventory
                .risk_counts
                .iter()
                .map(|(level, count)| (level.to_string(), *count))
                .collect(),
            average_turnover: inventory.average_turnover,
            high_demand_risk: inventory.high_demand_risk.iter().map(stock_json).collect(),
            dead_stock: inventory.dead_stock.iter().map(stock_json).collect(),
            out_of_stock_high_demand: inventory
                .out_of_stock_high_demand
                .iter()
                .map(stock_json)
                .collect(),
            slow_moving: inventory.slow_moving.iter().map(stock_json).collect(),
            stagnant: inventory.stagnant.iter().map(stock_json).collect(),
        },
        insight: insight.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Human-readable output
// ---------------------------------------------------------------------------

fn print_human(
    kpis: &KpiReport,
    inventory: &InventoryReport,
    insight: &str,
    total_records: usize,
    load_ms: u128,
    analysis_ms: u128,
) {
    println!();
    println!("  ================================================");
    println!("      STOCKLENS :: Sales & Inventory Dashboard");
    println!("  ================================================");
    println!();
    println!(
        "  {} records analyzed \u{00b7} loaded in {}ms \u{00b7} analyzed in {}ms",
        total_records, load_ms, analysis_ms
    );
    println!();

    println!("  Key Performance Indicators");
    println!(
        "    Total Sales       {} units",
        format_units(kpis.total_sales)
    );
    println!(
        "    Revenue           \u{00a3}{}",
        format_currency(kpis.total_revenue)
    );
    println!(
        "    Gross Profit      \u{00a3}{}",
        format_currency(kpis.gross_profit)
    );
    println!(
        "    Inventory Value   \u{00a3}{}",
        format_currency(kpis.inventory_value)
    );
    println!("    Avg Turnover      {:.2}", inventory.average_turnover);
    println!();

    if let Some(top) = &kpis.top_seller {
        println!(
            "  Top seller:  {} ({} units)",
            top.record.model,
            format_units(top.record.sales_2024)
        );
    }
    if let Some(top) = &kpis.top_profit {
        println!(
            "  Top profit:  {} (\u{00a3}{})",
            top.record.model,
            format_currency(top.gross_profit)
        );
    }
    println!();

    println!("  Inventory Risk Distribution");
    for level in [
        RiskLevel::HighRisk,
        RiskLevel::MediumRisk,
        RiskLevel::Overstock,
    ] {
        let count = inventory.risk_counts.get(&level).copied().unwrap_or(0);
        println!("    {:<12} {}", level.to_string(), count);
    }
    println!();

    println!("  Stock Alerts");
    println!(
        "    High-demand risk      {:>4}",
        inventory.high_demand_risk.len()
    );
    println!(
        "    Dead stock            {:>4}",
        inventory.dead_stock.len()
    );
    println!(
        "    Out of stock, selling {:>4}",
        inventory.out_of_stock_high_demand.len()
    );
    println!(
        "    Slow-moving           {:>4}",
        inventory.slow_moving.len()
    );
    println!("    Stagnant              {:>4}", inventory.stagnant.len());
    println!();

    if !kpis.low_stock_movers.is_empty() {
        println!("  Low stock, high sales (restock first):");
        for (i, product) in kpis.low_stock_movers.iter().enumerate() {
            println!(
                "    {}. {:<16} {} units sold \u{00b7} {} on hand",
                i + 1,
                product.record.model,
                format_units(product.record.sales_2024),
                format_units(product.record.inventory)
            );
        }
        println!();
    }

    println!("  Insight");
    for line in insight.split('\n') {
        println!("    {}", line);
    }
    println!();
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn usage() -> ! {
    eprintln!("Usage: stocklens <data.csv> [--models m1,m2,...] [--categories c1,c2,...] [--json] [--report <path>]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --models      Comma-separated model names to analyze");
    eprintln!("  --categories  Comma-separated categories to analyze");
    eprintln!("  --json        Output as JSON instead of formatted text");
    eprintln!("  --report      Also write the plain-text report to a file");
    eprintln!();
    eprintln!("Example:");
    eprintln!("  stocklens data/dealer_export.csv");
    eprintln!("  stocklens data/dealer_export.csv --categories SUV,EV --json");
    process::exit(1);
}

fn comma_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        usage();
    }

    let csv_path = &args[1];
    let mut filter = ProductFilter::default();
    let mut json_output = false;
    let mut report_path: Option<String> = None;

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--models" => {
                if i + 1 < args.len() {
                    filter.models = comma_list(&args[i + 1]);
                    i += 2;
                } else {
                    eprintln!("Error: --models requires a comma-separated list");
                    process::exit(1);
                }
            }
            "--categories" => {
                if i + 1 < args.len() {
                    filter.categories = comma_list(&args[i + 1]);
                    i += 2;
                } else {
                    eprintln!("Error: --categories requires a comma-separated list");
                    process::exit(1);
                }
            }
            "--json" => {
                json_output = true;
                i += 1;
            }
            "--report" => {
                if i + 1 < args.len() {
                    report_path = Some(args[i + 1].clone());
                    i += 2;
                } else {
                    eprintln!("Error: --report requires an output path");
                    process::exit(1);
                }
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                process::exit(1);
            }
        }
    }

    let load_start = Instant::now();
    let records = match load_products(csv_path) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error loading data: {}", e);
            process::exit(1);
        }
    };
    let load_ms = load_start.elapsed().as_millis();

    let selected = if filter.is_empty() {
        records
    } else {
        let narrowed = filter.apply(&records);
        log::info!(
            "filter kept {} of {} records",
            narrowed.len(),
            records.len()
        );
        narrowed
    };

    if selected.is_empty() {
        eprintln!("Error: no records match the requested models/categories");
        process::exit(1);
    }

    let analysis_start = Instant::now();
    let kpis = calculate_kpis(&selected);
    let inventory = analyze_inventory(&kpis.products);
    let insight = compose_insight(&kpis, &inventory);
    let analysis_ms = analysis_start.elapsed().as_millis();

    if let Some(path) = &report_path {
        let report = render_report(&kpis, &inventory, &insight);
        if let Err(e) = std::fs::write(path, report) {
            eprintln!("Error writing report to {}: {}", path, e);
            process::exit(1);
        }
        log::info!("report written to {}", path);
    }

    if json_output {
        let dashboard = build_json(&kpis, &inventory, &insight, &filter, load_ms, analysis_ms);
        match serde_json::to_string_pretty(&dashboard) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("Error serializing output: {}", e);
                process::exit(1);
            }
        }
    } else {
        print_human(
            &kpis,
            &inventory,
            &insight,
            kpis.products.len(),
            load_ms,
            analysis_ms,
        );
    }
}
