//! Method cost/yield rollup
//!
//! Turns a method's flat rates (energy, chemicals, capex) plus the shared
//! economics of a comparison run into recovered masses and cost per kilogram.
//!
//! Cost model is a flat additive sum per tonne processed. No economies of
//! scale, no interaction terms between components.

use crate::error::{ensure_non_negative, ensure_unit_fraction, ValidationError};
use crate::feedstock::Feedstock;
use crate::metal::{Metal, MetalMap};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Display currency for cost figures (values are not converted)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Currency {
    #[default]
    USD,
    EGP,
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Currency::USD => f.write_str("USD"),
            Currency::EGP => f.write_str("EGP"),
        }
    }
}

impl FromStr for Currency {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "USD" => Ok(Currency::USD),
            "EGP" => Ok(Currency::EGP),
            _ => Err(ValidationError::UnknownCurrency(s.to_string())),
        }
    }
}

/// Economic parameters shared by every method in one comparison run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "EconomicParametersSpec", into = "EconomicParametersSpec")]
pub struct EconomicParameters {
    electricity_price: f64,
    labor_cost: f64,
    env_cost_proxy: f64,
    currency: Currency,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EconomicParametersSpec {
    /// Currency per kWh
    pub electricity_price: f64,
    /// Currency per tonne processed
    pub labor_cost: f64,
    /// Currency per tonne processed
    pub env_cost_proxy: f64,
    #[serde(default)]
    pub currency: Currency,
}

impl EconomicParameters {
    pub fn new(
        electricity_price: f64,
        labor_cost: f64,
        env_cost_proxy: f64,
        currency: Currency,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            electricity_price: ensure_non_negative("electricity_price", electricity_price)?,
            labor_cost: ensure_non_negative("labor_cost", labor_cost)?,
            env_cost_proxy: ensure_non_negative("env_cost_proxy", env_cost_proxy)?,
            currency,
        })
    }

    /// 0.06 per kWh, 50 per tonne labor, 20 per tonne environmental proxy.
    pub fn placeholder() -> Self {
        Self {
            electricity_price: 0.06,
            labor_cost: 50.0,
            env_cost_proxy: 20.0,
            currency: Currency::USD,
        }
    }

    pub fn electricity_price(&self) -> f64 {
        self.electricity_price
    }

    pub fn labor_cost(&self) -> f64 {
        self.labor_cost
    }

    pub fn env_cost_proxy(&self) -> f64 {
        self.env_cost_proxy
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }
}

impl TryFrom<EconomicParametersSpec> for EconomicParameters {
    type Error = ValidationError;

    fn try_from(spec: EconomicParametersSpec) -> Result<Self, Self::Error> {
        EconomicParameters::new(
            spec.electricity_price,
            spec.labor_cost,
            spec.env_cost_proxy,
            spec.currency,
        )
    }
}

impl From<EconomicParameters> for EconomicParametersSpec {
    fn from(p: EconomicParameters) -> Self {
        EconomicParametersSpec {
            electricity_price: p.electricity_price,
            labor_cost: p.labor_cost,
            env_cost_proxy: p.env_cost_proxy,
            currency: p.currency,
        }
    }
}

/// Rates for one processing method.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MethodProfileSpec", into = "MethodProfileSpec")]
pub struct MethodProfile {
    name: String,
    energy_kwh_per_tonne: f64,
    chemical_cost_per_tonne: f64,
    capex_per_tonne: f64,
    recovery: MetalMap,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MethodProfileSpec {
    pub name: String,
    pub energy_kwh_per_tonne: f64,
    pub chemical_cost_per_tonne: f64,
    pub capex_per_tonne: f64,
    #[serde(default)]
    pub recovery: MetalMap,
}

impl MethodProfile {
    pub fn new(
        name: impl Into<String>,
        energy_kwh_per_tonne: f64,
        chemical_cost_per_tonne: f64,
        capex_per_tonne: f64,
        recovery: MetalMap,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::EmptyMethodName);
        }
        for (metal, &fraction) in recovery.iter() {
            ensure_unit_fraction("recovery fraction", metal.symbol(), fraction)?;
        }
        Ok(Self {
            name,
            energy_kwh_per_tonne: ensure_non_negative(
                "energy_kwh_per_tonne",
                energy_kwh_per_tonne,
            )?,
            chemical_cost_per_tonne: ensure_non_negative(
                "chemical_cost_per_tonne",
                chemical_cost_per_tonne,
            )?,
            capex_per_tonne: ensure_non_negative("capex_per_tonne", capex_per_tonne)?,
            recovery,
        })
    }

    /// Skips validation; only for the built-in reference tables.
    pub(crate) fn from_trusted(
        name: &str,
        energy_kwh_per_tonne: f64,
        chemical_cost_per_tonne: f64,
        capex_per_tonne: f64,
        recovery: MetalMap,
    ) -> Self {
        Self {
            name: name.to_string(),
            energy_kwh_per_tonne,
            chemical_cost_per_tonne,
            capex_per_tonne,
            recovery,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn energy_kwh_per_tonne(&self) -> f64 {
        self.energy_kwh_per_tonne
    }

    pub fn chemical_cost_per_tonne(&self) -> f64 {
        self.chemical_cost_per_tonne
    }

    pub fn capex_per_tonne(&self) -> f64 {
        self.capex_per_tonne
    }

    /// Recovery fraction for `metal`; 0 when the method has no figure for it.
    pub fn recovery(&self, metal: Metal) -> f64 {
        self.recovery.get(&metal).copied().unwrap_or(0.0)
    }

    /// Same rates with a different recovery table.
    pub fn with_recovery(&self, recovery: MetalMap) -> Result<Self, ValidationError> {
        MethodProfile::new(
            self.name.clone(),
            self.energy_kwh_per_tonne,
            self.chemical_cost_per_tonne,
            self.capex_per_tonne,
            recovery,
        )
    }
}

impl TryFrom<MethodProfileSpec> for MethodProfile {
    type Error = ValidationError;

    fn try_from(spec: MethodProfileSpec) -> Result<Self, Self::Error> {
        MethodProfile::new(
            spec.name,
            spec.energy_kwh_per_tonne,
            spec.chemical_cost_per_tonne,
            spec.capex_per_tonne,
            spec.recovery,
        )
    }
}

impl From<MethodProfile> for MethodProfileSpec {
    fn from(p: MethodProfile) -> Self {
        MethodProfileSpec {
            name: p.name,
            energy_kwh_per_tonne: p.energy_kwh_per_tonne,
            chemical_cost_per_tonne: p.chemical_cost_per_tonne,
            capex_per_tonne: p.capex_per_tonne,
            recovery: p.recovery,
        }
    }
}

/// Outcome of evaluating one method against one feedstock.
///
/// Cost-per-kg fields are `None` when the recovered mass they divide by is
/// zero. Reporting renders these as "N/A".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub method: String,
    pub energy_kwh_per_tonne: f64,
    pub energy_cost: f64,
    pub chemical_cost_per_tonne: f64,
    /// Energy + chemicals + labor + environmental proxy (no capex)
    pub operating_cost: f64,
    pub capex_per_tonne: f64,
    pub total_cost_per_tonne: f64,
    pub recovered_kg: MetalMap,
    pub total_recovered_kg: f64,
    pub cost_per_kg: CostMap,
    pub cost_per_kg_mixture: Option<f64>,
}

/// Per-metal cost per kg; `None` where undefined.
pub type CostMap = rustc_hash::FxHashMap<Metal, Option<f64>>;

impl EvaluationResult {
    pub fn recovered(&self, metal: Metal) -> f64 {
        self.recovered_kg.get(&metal).copied().unwrap_or(0.0)
    }

    pub fn cost_per_kg_of(&self, metal: Metal) -> Option<f64> {
        self.cost_per_kg.get(&metal).copied().flatten()
    }
}

/// Evaluate a processing method.
///
/// Cost components are summed left to right as energy, chemicals, capex,
/// labor, environmental proxy. Per-metal cost allocates the total by share of
/// recovered mass and then divides by that metal's mass, so every metal ends
/// up at the blended mixture rate.
pub fn evaluate(
    feedstock: &Feedstock,
    profile: &MethodProfile,
    economics: &EconomicParameters,
) -> EvaluationResult {
    let recovered_kg: MetalMap = Metal::ALL
        .iter()
        .map(|&m| (m, feedstock.metal_mass_kg(m) * profile.recovery(m)))
        .collect();

    let energy_cost = profile.energy_kwh_per_tonne * economics.electricity_price;

    let total_cost_per_tonne = energy_cost
        + profile.chemical_cost_per_tonne
        + profile.capex_per_tonne
        + economics.labor_cost
        + economics.env_cost_proxy;

    let operating_cost = energy_cost
        + profile.chemical_cost_per_tonne
        + economics.labor_cost
        + economics.env_cost_proxy;

    let total_recovered_kg: f64 = Metal::ALL.iter().map(|m| recovered_kg[m]).sum();

    let cost_per_kg_mixture = if total_recovered_kg > 0.0 {
        Some(total_cost_per_tonne / total_recovered_kg)
    } else {
        None
    };

    let cost_per_kg: CostMap = Metal::ALL
        .iter()
        .map(|&m| {
            let mass = recovered_kg[&m];
            let cost = if mass > 0.0 && total_recovered_kg > 0.0 {
                Some((total_cost_per_tonne * (mass / total_recovered_kg)) / mass)
            } else {
                None
            };
            (m, cost)
        })
        .collect();

    tracing::debug!(
        "{}: total cost {:.2}/t, recovered {:.4} kg",
        profile.name,
        total_cost_per_tonne,
        total_recovered_kg
    );

    EvaluationResult {
        method: profile.name.clone(),
        energy_kwh_per_tonne: profile.energy_kwh_per_tonne,
        energy_cost,
        chemical_cost_per_tonne: profile.chemical_cost_per_tonne,
        operating_cost,
        capex_per_tonne: profile.capex_per_tonne,
        total_cost_per_tonne,
        recovered_kg,
        total_recovered_kg,
        cost_per_kg,
        cost_per_kg_mixture,
    }
}
