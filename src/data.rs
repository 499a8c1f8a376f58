//! Parameter table loading
//!
//! Method and organism parameter tables are read from CSV with Polars and
//! converted row by row into validated profiles. Conversion is split from the
//! file read so in-memory frames can be converted directly.
//!
//! Method table columns:
//! `method, energy_kwh_per_tonne, chemical_cost_per_tonne, capex_per_tonne,
//!  recovery_au, recovery_pd, recovery_cu`
//!
//! Organism table columns:
//! `organism, ph_opt, ph_sigma, temp_opt_c, temp_sigma_c, k_o,
//!  max_recovery_au, max_recovery_pd, max_recovery_cu`
//!
//! Numeric columns may be stored as integers or numeric strings; they are
//! cast to Float64 and any cell that does not parse is an error.
//! Per-metal columns are optional and a null cell means the metal has no data.

use crate::bioleach::{Organism, OrganismProfile, OrganismProfileSpec};
use crate::metal::{Metal, MetalMap};
use crate::methods::MethodProfile;
use anyhow::{bail, Context, Result};
use polars::prelude::*;
use std::path::Path;

/// Load method profiles from CSV
pub fn load_method_table(path: &Path) -> Result<Vec<MethodProfile>> {
    let df = read_csv(path)?;
    let methods = methods_from_frame(&df)
        .with_context(|| format!("Invalid method table: {:?}", path))?;

    tracing::info!("Loaded {} method profiles from {:?}", methods.len(), path);
    Ok(methods)
}

/// Load organism profiles from CSV
pub fn load_organism_table(path: &Path) -> Result<Vec<OrganismProfile>> {
    let df = read_csv(path)?;
    let organisms = organisms_from_frame(&df)
        .with_context(|| format!("Invalid organism table: {:?}", path))?;

    tracing::info!("Loaded {} organism profiles from {:?}", organisms.len(), path);
    Ok(organisms)
}

fn read_csv(path: &Path) -> Result<DataFrame> {
    CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path.into()))
        .with_context(|| format!("Failed to create CSV reader: {:?}", path))?
        .finish()
        .with_context(|| format!("Failed to load CSV: {:?}", path))
}

pub fn methods_from_frame(df: &DataFrame) -> Result<Vec<MethodProfile>> {
    let names = string_column(df, "method")?;
    let energy = float_column(df, "energy_kwh_per_tonne")?;
    let chemical = float_column(df, "chemical_cost_per_tonne")?;
    let capex = float_column(df, "capex_per_tonne")?;
    let recovery = metal_columns(df, "recovery")?;

    let mut methods = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        let Some(name) = names.get(idx) else {
            bail!("Row {}: missing method name", idx);
        };

        let profile = MethodProfile::new(
            name,
            required(&energy, idx, "energy_kwh_per_tonne")?,
            required(&chemical, idx, "chemical_cost_per_tonne")?,
            required(&capex, idx, "capex_per_tonne")?,
            row_metals(&recovery, idx),
        )
        .with_context(|| format!("Row {} ({})", idx, name))?;

        methods.push(profile);
    }

    Ok(methods)
}

pub fn organisms_from_frame(df: &DataFrame) -> Result<Vec<OrganismProfile>> {
    let names = string_column(df, "organism")?;
    let ph_opt = float_column(df, "ph_opt")?;
    let ph_sigma = float_column(df, "ph_sigma")?;
    let temp_opt = float_column(df, "temp_opt_c")?;
    let temp_sigma = float_column(df, "temp_sigma_c")?;
    let k_o = float_column(df, "k_o")?;
    let max_recovery = metal_columns(df, "max_recovery")?;

    let mut organisms = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        let Some(name) = names.get(idx) else {
            bail!("Row {}: missing organism name", idx);
        };
        let organism: Organism = name
            .parse()
            .with_context(|| format!("Row {}", idx))?;

        let profile = OrganismProfile::new(OrganismProfileSpec {
            organism,
            ph_opt: required(&ph_opt, idx, "ph_opt")?,
            ph_sigma: required(&ph_sigma, idx, "ph_sigma")?,
            temp_opt_c: required(&temp_opt, idx, "temp_opt_c")?,
            temp_sigma_c: required(&temp_sigma, idx, "temp_sigma_c")?,
            oxygen_half_saturation: required(&k_o, idx, "k_o")?,
            max_recovery: row_metals(&max_recovery, idx),
        })
        .with_context(|| format!("Row {} ({})", idx, name))?;

        organisms.push(profile);
    }

    Ok(organisms)
}

fn string_column(df: &DataFrame, name: &str) -> Result<StringChunked> {
    let column = df
        .column(name)
        .with_context(|| format!("Column '{}' not found", name))?;
    Ok(column
        .str()
        .with_context(|| format!("Column '{}' is not string type", name))?
        .clone())
}

fn float_column(df: &DataFrame, name: &str) -> Result<Float64Chunked> {
    let column = df
        .column(name)
        .with_context(|| format!("Column '{}' not found", name))?
        .strict_cast(&DataType::Float64)
        .with_context(|| format!("Column '{}' is not numeric", name))?;
    Ok(column.f64()?.clone())
}

/// `{prefix}_au`, `{prefix}_pd`, `{prefix}_cu` where present.
fn metal_columns(df: &DataFrame, prefix: &str) -> Result<Vec<(Metal, Float64Chunked)>> {
    let present = df.get_column_names();
    let mut columns = Vec::new();
    for metal in Metal::ALL {
        let name = format!("{}_{}", prefix, metal.column_suffix());
        if present.iter().any(|c| c.as_str() == name) {
            columns.push((metal, float_column(df, &name)?));
        }
    }
    Ok(columns)
}

fn required(values: &Float64Chunked, idx: usize, name: &str) -> Result<f64> {
    match values.get(idx) {
        Some(v) => Ok(v),
        None => bail!("Row {}: missing value for '{}'", idx, name),
    }
}

fn row_metals(columns: &[(Metal, Float64Chunked)], idx: usize) -> MetalMap {
    columns
        .iter()
        .filter_map(|(metal, values)| values.get(idx).map(|v| (*metal, v)))
        .collect()
}
