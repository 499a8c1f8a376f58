//! Compare processing methods on one feedstock
//!
//! Environment:
//! - `SCENARIO_PATH`: JSON scenario (placeholder inputs when unset)
//! - `METHOD_TABLE`: CSV of method profiles, replacing the scenario's methods
//! - `OUTPUT_CSV`: write the comparison table here
//!
//! Placeholder inputs are illustrative only and should be replaced with
//! local prices, assays and plant data before drawing conclusions.

use anyhow::Result;
use ewaste_recovery_rust::data::load_method_table;
use ewaste_recovery_rust::report::{format_money, format_value, method_frame, method_records, write_csv};
use ewaste_recovery_rust::{
    cheapest_per_kg_mixture, BioCulture, Metal, MethodComparison, Organism, Scenario,
};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ewaste_recovery_rust=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut comparison = match std::env::var("SCENARIO_PATH") {
        Ok(path) => Scenario::load(&PathBuf::from(path))?.comparison()?,
        Err(_) => {
            tracing::warn!("SCENARIO_PATH not set, using placeholder inputs");
            MethodComparison::placeholder(BioCulture::Single(
                Organism::AcidithiobacillusFerrooxidans,
            ))
        }
    };

    if let Ok(path) = std::env::var("METHOD_TABLE") {
        let methods = load_method_table(&PathBuf::from(path))?;
        comparison = MethodComparison::new(
            comparison.feedstock().clone(),
            *comparison.economics(),
            methods,
        );
    }

    let results = comparison.run();
    let currency = comparison.economics().currency();
    let feed = comparison.feedstock();

    println!("\n{}", "=".repeat(70));
    println!("METHOD COMPARISON: {:.2} t feed", feed.mass_tonnes());
    println!("{}", "=".repeat(70));
    for metal in Metal::ALL {
        println!(
            "  {:<10} fraction {:>8.5}  contained {:>10.3} kg",
            metal.display_name(),
            feed.fraction(metal),
            feed.metal_mass_kg(metal)
        );
    }

    for r in &results {
        println!("\n{}", r.method);
        println!("  Energy cost:       {}", format_money(Some(r.energy_cost), currency));
        println!("  Operating cost:    {}", format_money(Some(r.operating_cost), currency));
        println!("  Capex:             {}", format_money(Some(r.capex_per_tonne), currency));
        println!("  Total per tonne:   {}", format_money(Some(r.total_cost_per_tonne), currency));
        println!("  Recovered:");
        for metal in Metal::ALL {
            println!(
                "    {:<10} {:>10} kg   {:>18} /kg",
                metal.display_name(),
                format_value(Some(r.recovered(metal)), 3),
                format_money(r.cost_per_kg_of(metal), currency)
            );
        }
        println!(
            "    {:<10} {:>10} kg   {:>18} /kg",
            "Mixture",
            format_value(Some(r.total_recovered_kg), 3),
            format_money(r.cost_per_kg_mixture, currency)
        );
    }

    println!("\n{}", "=".repeat(70));
    match cheapest_per_kg_mixture(&results) {
        Some(best) => println!(
            "Lowest cost per kg recovered: {} ({})",
            best.method,
            format_money(best.cost_per_kg_mixture, currency)
        ),
        None => println!("No method recovers any metal"),
    }
    println!("{}", "=".repeat(70));

    if let Ok(path) = std::env::var("OUTPUT_CSV") {
        let mut df = method_frame(&method_records(&results))?;
        write_csv(&mut df, &PathBuf::from(path))?;
    }

    Ok(())
}
