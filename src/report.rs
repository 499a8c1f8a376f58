//! Flat report records and tabular export
//!
//! Evaluation results and recovery predictions are flattened into records
//! with one column per metal, so they serialize to JSON or CSV without nested
//! maps. Undefined values stay `None`: `null` in JSON, "N/A" in CSV and in
//! printed tables.

use crate::bioleach::{OptimumConditionsRow, RecoveryPrediction};
use crate::metal::Metal;
use crate::methods::EvaluationResult;
use anyhow::{Context, Result};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;

pub use crate::utils::{format_money, format_value, NOT_AVAILABLE};

/// One row of the method comparison table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodRecord {
    pub method: String,
    pub energy_kwh_per_tonne: f64,
    pub energy_cost: f64,
    pub chemical_cost_per_tonne: f64,
    pub operating_cost: f64,
    pub capex_per_tonne: f64,
    pub total_cost_per_tonne: f64,
    pub recovered_au_kg: f64,
    pub recovered_pd_kg: f64,
    pub recovered_cu_kg: f64,
    pub total_recovered_kg: f64,
    pub cost_per_kg_au: Option<f64>,
    pub cost_per_kg_pd: Option<f64>,
    pub cost_per_kg_cu: Option<f64>,
    pub cost_per_kg_mixture: Option<f64>,
}

impl From<&EvaluationResult> for MethodRecord {
    fn from(r: &EvaluationResult) -> Self {
        MethodRecord {
            method: r.method.clone(),
            energy_kwh_per_tonne: r.energy_kwh_per_tonne,
            energy_cost: r.energy_cost,
            chemical_cost_per_tonne: r.chemical_cost_per_tonne,
            operating_cost: r.operating_cost,
            capex_per_tonne: r.capex_per_tonne,
            total_cost_per_tonne: r.total_cost_per_tonne,
            recovered_au_kg: r.recovered(Metal::Au),
            recovered_pd_kg: r.recovered(Metal::Pd),
            recovered_cu_kg: r.recovered(Metal::Cu),
            total_recovered_kg: r.total_recovered_kg,
            cost_per_kg_au: r.cost_per_kg_of(Metal::Au),
            cost_per_kg_pd: r.cost_per_kg_of(Metal::Pd),
            cost_per_kg_cu: r.cost_per_kg_of(Metal::Cu),
            cost_per_kg_mixture: r.cost_per_kg_mixture,
        }
    }
}

/// One organism at one operating point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecoveryRecord {
    pub organism: String,
    pub rule: String,
    pub ph: f64,
    pub temperature_c: f64,
    pub dissolved_oxygen_mg_l: f64,
    pub f_ph: f64,
    pub f_temperature: f64,
    pub f_oxygen: f64,
    pub recovery_au: f64,
    pub recovery_pd: f64,
    pub recovery_cu: f64,
}

impl From<&RecoveryPrediction> for RecoveryRecord {
    fn from(p: &RecoveryPrediction) -> Self {
        RecoveryRecord {
            organism: p.organism.short_name().to_string(),
            rule: p.rule.as_str().to_string(),
            ph: p.point.ph(),
            temperature_c: p.point.temperature_c(),
            dissolved_oxygen_mg_l: p.point.dissolved_oxygen_mg_l(),
            f_ph: p.factors.ph,
            f_temperature: p.factors.temperature,
            f_oxygen: p.factors.oxygen,
            recovery_au: p.recovery_of(Metal::Au),
            recovery_pd: p.recovery_of(Metal::Pd),
            recovery_cu: p.recovery_of(Metal::Cu),
        }
    }
}

pub fn method_records(results: &[EvaluationResult]) -> Vec<MethodRecord> {
    results.iter().map(MethodRecord::from).collect()
}

pub fn recovery_records(predictions: &[RecoveryPrediction]) -> Vec<RecoveryRecord> {
    predictions.iter().map(RecoveryRecord::from).collect()
}

/// Build DataFrame from method records
pub fn method_frame(records: &[MethodRecord]) -> Result<DataFrame> {
    let values = |f: fn(&MethodRecord) -> f64| records.iter().map(f).collect::<Vec<f64>>();
    let opt = |f: fn(&MethodRecord) -> Option<f64>| {
        records.iter().map(f).collect::<Vec<Option<f64>>>()
    };

    df!(
        "method" => records.iter().map(|r| r.method.as_str()).collect::<Vec<_>>(),
        "energy_kwh_per_tonne" => values(|r| r.energy_kwh_per_tonne),
        "energy_cost" => values(|r| r.energy_cost),
        "chemical_cost_per_tonne" => values(|r| r.chemical_cost_per_tonne),
        "operating_cost" => values(|r| r.operating_cost),
        "capex_per_tonne" => values(|r| r.capex_per_tonne),
        "total_cost_per_tonne" => values(|r| r.total_cost_per_tonne),
        "recovered_au_kg" => values(|r| r.recovered_au_kg),
        "recovered_pd_kg" => values(|r| r.recovered_pd_kg),
        "recovered_cu_kg" => values(|r| r.recovered_cu_kg),
        "total_recovered_kg" => values(|r| r.total_recovered_kg),
        "cost_per_kg_au" => opt(|r| r.cost_per_kg_au),
        "cost_per_kg_pd" => opt(|r| r.cost_per_kg_pd),
        "cost_per_kg_cu" => opt(|r| r.cost_per_kg_cu),
        "cost_per_kg_mixture" => opt(|r| r.cost_per_kg_mixture)
    )
    .with_context(|| "Failed to build method comparison frame")
}

/// Build DataFrame from recovery records
pub fn recovery_frame(records: &[RecoveryRecord]) -> Result<DataFrame> {
    let values = |f: fn(&RecoveryRecord) -> f64| records.iter().map(f).collect::<Vec<f64>>();

    df!(
        "organism" => records.iter().map(|r| r.organism.as_str()).collect::<Vec<_>>(),
        "rule" => records.iter().map(|r| r.rule.as_str()).collect::<Vec<_>>(),
        "ph" => values(|r| r.ph),
        "temperature_c" => values(|r| r.temperature_c),
        "dissolved_oxygen_mg_l" => values(|r| r.dissolved_oxygen_mg_l),
        "f_ph" => values(|r| r.f_ph),
        "f_temperature" => values(|r| r.f_temperature),
        "f_oxygen" => values(|r| r.f_oxygen),
        "recovery_au" => values(|r| r.recovery_au),
        "recovery_pd" => values(|r| r.recovery_pd),
        "recovery_cu" => values(|r| r.recovery_cu)
    )
    .with_context(|| "Failed to build recovery frame")
}

/// Build DataFrame from the optimum-conditions summary
pub fn optimum_frame(rows: &[OptimumConditionsRow]) -> Result<DataFrame> {
    df!(
        "organism" => rows.iter().map(|r| r.organism.as_str()).collect::<Vec<_>>(),
        "metal" => rows.iter().map(|r| r.metal.as_str()).collect::<Vec<_>>(),
        "optimum_ph" => rows.iter().map(|r| r.optimum_ph).collect::<Vec<_>>(),
        "optimum_temp_c" => rows.iter().map(|r| r.optimum_temp_c).collect::<Vec<_>>(),
        "k_o" => rows.iter().map(|r| r.oxygen_half_saturation).collect::<Vec<_>>(),
        "max_recovery_pct" => rows.iter().map(|r| r.max_recovery_pct).collect::<Vec<_>>()
    )
    .with_context(|| "Failed to build optimum conditions frame")
}

/// Write frame as CSV; null cells are written as "N/A".
pub fn write_csv(df: &mut DataFrame, path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create output file: {:?}", path))?;

    CsvWriter::new(file)
        .include_header(true)
        .with_null_value(NOT_AVAILABLE.to_string())
        .finish(df)
        .with_context(|| format!("Failed to write CSV: {:?}", path))?;

    tracing::info!("Wrote {} rows to {:?}", df.height(), path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bioleach::{BioleachResponseModel, CombinationRule, OperatingPoint, Organism};
    use crate::feedstock::Feedstock;
    use crate::metal::{metal_map, MetalMap};
    use crate::methods::{evaluate, EconomicParameters, MethodProfile};
    use approx::assert_relative_eq;

    fn results() -> Vec<EvaluationResult> {
        let feed = Feedstock::placeholder();
        let econ = EconomicParameters::placeholder();
        let copper_only =
            MethodProfile::new("Copper only", 100.0, 10.0, 20.0, metal_map([(Metal::Cu, 0.5)]))
                .unwrap();
        let nothing = MethodProfile::new("Nothing", 0.0, 0.0, 0.0, MetalMap::default()).unwrap();
        vec![
            evaluate(&feed, &copper_only, &econ),
            evaluate(&feed, &nothing, &econ),
        ]
    }

    #[test]
    fn test_method_record_flattens_metals() {
        let records = method_records(&results());

        assert_eq!(records[0].method, "Copper only");
        assert_relative_eq!(records[0].recovered_cu_kg, 100.0, epsilon = 1e-9);
        assert_eq!(records[0].recovered_au_kg, 0.0);
        assert!(records[0].cost_per_kg_au.is_none());
        assert!(records[0].cost_per_kg_cu.is_some());
        assert!(records[1].cost_per_kg_mixture.is_none());
    }

    #[test]
    fn test_undefined_serializes_as_null() {
        let records = method_records(&results());
        let json = serde_json::to_value(&records[1]).unwrap();
        assert!(json["cost_per_kg_mixture"].is_null());
    }

    #[test]
    fn test_method_frame_shape_and_nulls() {
        let df = method_frame(&method_records(&results())).unwrap();

        assert_eq!(df.height(), 2);
        assert_eq!(df.width(), 15);
        let mixture = df.column("cost_per_kg_mixture").unwrap();
        assert_eq!(mixture.null_count(), 1);
    }

    #[test]
    fn test_recovery_record_from_prediction() {
        let model = BioleachResponseModel::new(CombinationRule::MultiplicativeWeighted);
        let profile = Organism::AcidithiobacillusFerrooxidans.profile();
        let point = OperatingPoint::new(2.0, 30.0, 3.0).unwrap();
        let prediction = model.predict_all(&profile, &point).unwrap();

        let record = RecoveryRecord::from(&prediction);
        assert_eq!(record.organism, "A. ferrooxidans");
        assert_eq!(record.rule, "multiplicative_weighted");
        assert_eq!(record.f_ph, 1.0);
        assert_relative_eq!(record.recovery_cu, 0.801, epsilon = 1e-3);

        let df = recovery_frame(&[record]).unwrap();
        assert_eq!(df.height(), 1);
    }

    #[test]
    fn test_write_csv_renders_na() {
        let mut df = method_frame(&method_records(&results())).unwrap();
        let path = std::env::temp_dir().join("ewaste_recovery_report_test.csv");

        write_csv(&mut df, &path).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).ok();

        let mut lines = contents.lines();
        assert!(lines.next().unwrap().starts_with("method,energy_kwh_per_tonne"));
        assert!(contents.contains("N/A"));
        assert_eq!(contents.lines().count(), 3);
    }
}
