//! Bioleaching recovery under operating conditions
//!
//! Prints the optimum-conditions table, the predicted recovery of each
//! organism at one operating point, and the peak of a pH sweep.
//!
//! Environment:
//! - `SCENARIO_PATH`: JSON scenario supplying rule, operating point and organisms
//! - `ORGANISM_TABLE`: CSV of organism profiles, replacing the scenario's
//! - `COMBINATION_RULE`: `multiplicative_weighted` or `weighted_sum_exponent`
//!   (both rules are reported when neither this nor the scenario picks one)
//! - `OPERATING_PH`, `OPERATING_TEMP_C`, `OPERATING_DO_MG_L`: override the point
//! - `OUTPUT_CSV`: write every swept prediction here

use anyhow::{Context, Result};
use ewaste_recovery_rust::bioleach::literature_profiles;
use ewaste_recovery_rust::data::load_organism_table;
use ewaste_recovery_rust::report::{format_value, recovery_frame, recovery_records, write_csv};
use ewaste_recovery_rust::utils::linspace;
use ewaste_recovery_rust::{
    optimum_conditions_summary, sweep, BioleachResponseModel, CombinationRule, Metal,
    OperatingGrid, OperatingPoint, OrganismProfile, RecoveryPrediction, Scenario,
};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn env_f64(name: &str) -> Result<Option<f64>> {
    match std::env::var(name) {
        Ok(raw) => {
            let value = raw
                .trim()
                .parse::<f64>()
                .with_context(|| format!("{} is not a number: {:?}", name, raw))?;
            Ok(Some(value))
        }
        Err(_) => Ok(None),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ewaste_recovery_rust=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = match std::env::var("SCENARIO_PATH") {
        Ok(path) => Scenario::load(&PathBuf::from(path))?.bioleach,
        Err(_) => None,
    };

    let rules: Vec<CombinationRule> = match std::env::var("COMBINATION_RULE") {
        Ok(raw) => vec![raw.parse()?],
        Err(_) => match &settings {
            Some(s) => vec![s.rule],
            None => CombinationRule::ALL.to_vec(),
        },
    };

    let base = settings
        .as_ref()
        .map(|s| s.operating_point)
        .unwrap_or_else(OperatingPoint::placeholder);
    let point = OperatingPoint::new(
        env_f64("OPERATING_PH")?.unwrap_or(base.ph()),
        env_f64("OPERATING_TEMP_C")?.unwrap_or(base.temperature_c()),
        env_f64("OPERATING_DO_MG_L")?.unwrap_or(base.dissolved_oxygen_mg_l()),
    )?;

    let profiles: Vec<OrganismProfile> = match std::env::var("ORGANISM_TABLE") {
        Ok(path) => load_organism_table(&PathBuf::from(path))?,
        Err(_) => settings
            .as_ref()
            .map(|s| s.organism_profiles())
            .unwrap_or_else(literature_profiles),
    };

    println!("\n{}", "=".repeat(70));
    println!("OPTIMUM CONDITIONS");
    println!("{}", "=".repeat(70));
    println!(
        "  {:<32} {:<6} {:>6} {:>8} {:>6} {:>8}",
        "Organism", "Metal", "pH", "Temp °C", "K_O", "Max %"
    );
    for row in optimum_conditions_summary(&profiles) {
        println!(
            "  {:<32} {:<6} {:>6.2} {:>8.1} {:>6.2} {:>8.1}",
            row.organism,
            row.metal,
            row.optimum_ph,
            row.optimum_temp_c,
            row.oxygen_half_saturation,
            row.max_recovery_pct
        );
    }

    let ph_axis = linspace(1.0, 4.0, 31);
    let temp_axis = linspace(15.0, 50.0, 36);
    let oxygen_axis = linspace(0.0, 8.0, 33);
    let mut swept: Vec<RecoveryPrediction> = Vec::new();

    for rule in rules {
        let model = BioleachResponseModel::new(rule);

        println!("\n{}", "=".repeat(70));
        println!(
            "RULE {}: pH {:.2}, {:.1} °C, DO {:.2} mg/L",
            rule,
            point.ph(),
            point.temperature_c(),
            point.dissolved_oxygen_mg_l()
        );
        println!("{}", "=".repeat(70));

        for profile in &profiles {
            let prediction = model.predict_all(profile, &point)?;
            println!("\n{}", profile.organism().scientific_name());
            println!(
                "  Factors: pH {:.3}  temp {:.3}  oxygen {:.3}",
                prediction.factors.ph, prediction.factors.temperature, prediction.factors.oxygen
            );
            for metal in Metal::ALL {
                let recovery = profile
                    .max_recovery(metal)
                    .map(|_| prediction.recovery_of(metal) * 100.0);
                println!("  {:<10} {:>8} %", metal.display_name(), format_value(recovery, 1));
            }

            let ph_sweep = sweep(&model, profile, &OperatingGrid::ph_slice(&point, ph_axis.clone()))?;
            if let Some(peak) = ph_sweep
                .iter()
                .max_by(|a, b| a.recovery_of(Metal::Cu).total_cmp(&b.recovery_of(Metal::Cu)))
            {
                println!(
                    "  Cu peak along pH: {:.1} % at pH {:.2}",
                    peak.recovery_of(Metal::Cu) * 100.0,
                    peak.point.ph()
                );
            }

            swept.extend(ph_sweep);
            swept.extend(sweep(
                &model,
                profile,
                &OperatingGrid::temperature_slice(&point, temp_axis.clone()),
            )?);
            swept.extend(sweep(
                &model,
                profile,
                &OperatingGrid::oxygen_slice(&point, oxygen_axis.clone()),
            )?);
        }
    }

    if let Ok(path) = std::env::var("OUTPUT_CSV") {
        let mut df = recovery_frame(&recovery_records(&swept))?;
        write_csv(&mut df, &PathBuf::from(path))?;
    }

    Ok(())
}
