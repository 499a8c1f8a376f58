//! Reference method profiles
//!
//! Placeholder rates for the four compared methods. Every figure here is meant
//! to be replaced with lab-calibrated recoveries, local electricity prices and
//! real CAPEX estimates; they exist so a comparison can run out of the box.

use crate::bioleach::Organism;
use crate::error::{ensure_non_negative, ValidationError};
use crate::metal::{metal_map, Metal, MetalMap};
use crate::methods::evaluator::MethodProfile;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Culture used for the bioleaching method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BioCulture {
    Single(Organism),
    Consortium,
}

impl BioCulture {
    pub const ALL: [BioCulture; 4] = [
        BioCulture::Single(Organism::AcidithiobacillusFerrooxidans),
        BioCulture::Single(Organism::AcidithiobacillusThiooxidans),
        BioCulture::Single(Organism::LeptospirillumFerrooxidans),
        BioCulture::Consortium,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            BioCulture::Single(organism) => organism.short_name(),
            BioCulture::Consortium => "Consortium",
        }
    }

    /// Bench-scale recovery fractions for the culture at its usual conditions
    pub fn default_recovery(&self) -> MetalMap {
        let (au, pd, cu) = match self {
            BioCulture::Single(Organism::AcidithiobacillusFerrooxidans) => (0.40, 0.30, 0.85),
            BioCulture::Single(Organism::AcidithiobacillusThiooxidans) => (0.30, 0.25, 0.80),
            BioCulture::Single(Organism::LeptospirillumFerrooxidans) => (0.35, 0.28, 0.82),
            BioCulture::Consortium => (0.55, 0.40, 0.90),
        };
        metal_map([(Metal::Au, au), (Metal::Pd, pd), (Metal::Cu, cu)])
    }

    /// Multiplier on culture cost & maintenance
    pub fn cost_factor(&self) -> f64 {
        match self {
            BioCulture::Single(Organism::AcidithiobacillusFerrooxidans) => 1.0,
            BioCulture::Single(Organism::AcidithiobacillusThiooxidans) => 0.9,
            BioCulture::Single(Organism::LeptospirillumFerrooxidans) => 1.1,
            BioCulture::Consortium => 1.4,
        }
    }
}

impl fmt::Display for BioCulture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Per-tonne cost breakdown of keeping a bioleaching culture working.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BioConditionCosts {
    /// Baseline plant energy (kWh/t)
    pub baseline_energy_kwh_per_tonne: f64,
    /// Aeration energy (kWh/t)
    pub aeration_energy_kwh_per_tonne: f64,
    /// Reagents & nutrients (per t)
    pub base_reagent_cost_per_tonne: f64,
    /// Acid for holding the target pH (per t)
    pub ph_control_cost_per_tonne: f64,
    /// Culture cost & maintenance before the culture factor (per t)
    pub culture_cost_per_tonne: f64,
    pub capex_per_tonne: f64,
    /// Total energy (kWh/t) used in place of baseline + aeration when set
    #[serde(default)]
    pub total_energy_override_kwh_per_tonne: Option<f64>,
}

impl Default for BioConditionCosts {
    fn default() -> Self {
        Self {
            baseline_energy_kwh_per_tonne: 50.0,
            aeration_energy_kwh_per_tonne: 30.0,
            base_reagent_cost_per_tonne: 30.0,
            ph_control_cost_per_tonne: 20.0,
            culture_cost_per_tonne: 15.0,
            capex_per_tonne: 50.0,
            total_energy_override_kwh_per_tonne: None,
        }
    }
}

impl BioConditionCosts {
    pub fn total_energy_kwh_per_tonne(&self) -> f64 {
        self.total_energy_override_kwh_per_tonne.unwrap_or(
            self.baseline_energy_kwh_per_tonne + self.aeration_energy_kwh_per_tonne,
        )
    }

    pub fn total_chemical_cost_per_tonne(&self, culture: BioCulture) -> f64 {
        self.base_reagent_cost_per_tonne
            + self.ph_control_cost_per_tonne
            + self.culture_cost_per_tonne * culture.cost_factor()
    }

    fn validate(&self) -> Result<(), ValidationError> {
        ensure_non_negative("baseline_energy_kwh_per_tonne", self.baseline_energy_kwh_per_tonne)?;
        ensure_non_negative("aeration_energy_kwh_per_tonne", self.aeration_energy_kwh_per_tonne)?;
        ensure_non_negative("base_reagent_cost_per_tonne", self.base_reagent_cost_per_tonne)?;
        ensure_non_negative("ph_control_cost_per_tonne", self.ph_control_cost_per_tonne)?;
        ensure_non_negative("culture_cost_per_tonne", self.culture_cost_per_tonne)?;
        ensure_non_negative("capex_per_tonne", self.capex_per_tonne)?;
        if let Some(total) = self.total_energy_override_kwh_per_tonne {
            ensure_non_negative("total_energy_override_kwh_per_tonne", total)?;
        }
        Ok(())
    }
}

pub fn pyrometallurgy() -> MethodProfile {
    reference(
        "Pyrometallurgy",
        1500.0,
        30.0,
        200.0,
        (0.95, 0.90, 0.95),
    )
}

pub fn hydrometallurgy() -> MethodProfile {
    reference(
        "Hydrometallurgy",
        300.0,
        300.0,
        150.0,
        (0.98, 0.95, 0.98),
    )
}

/// Acid baths and open burning; near-zero energy and capex, poor yields.
pub fn informal() -> MethodProfile {
    reference("Informal (Egypt)", 10.0, 5.0, 10.0, (0.20, 0.15, 0.50))
}

/// Bioleaching profile assembled from the condition cost breakdown.
///
/// `recovery` overrides the culture's default recovery table, e.g. with a
/// prediction from the response model.
pub fn bioleaching(
    culture: BioCulture,
    costs: &BioConditionCosts,
    recovery: Option<MetalMap>,
) -> Result<MethodProfile, ValidationError> {
    costs.validate()?;
    let profile = culture_profile(culture, costs);
    match recovery {
        Some(recovery) => profile.with_recovery(recovery),
        None => Ok(profile),
    }
}

/// The four methods in display order, bioleaching with the given culture.
pub fn reference_methods(culture: BioCulture) -> Vec<MethodProfile> {
    vec![
        pyrometallurgy(),
        hydrometallurgy(),
        culture_profile(culture, &BioConditionCosts::default()),
        informal(),
    ]
}

/// Caller has validated `costs`.
fn culture_profile(culture: BioCulture, costs: &BioConditionCosts) -> MethodProfile {
    MethodProfile::from_trusted(
        &format!("Bioleaching ({})", culture.label()),
        costs.total_energy_kwh_per_tonne(),
        costs.total_chemical_cost_per_tonne(culture),
        costs.capex_per_tonne,
        culture.default_recovery(),
    )
}

fn reference(
    name: &str,
    energy_kwh_per_tonne: f64,
    chemical_cost_per_tonne: f64,
    capex_per_tonne: f64,
    (au, pd, cu): (f64, f64, f64),
) -> MethodProfile {
    MethodProfile::from_trusted(
        name,
        energy_kwh_per_tonne,
        chemical_cost_per_tonne,
        capex_per_tonne,
        metal_map([(Metal::Au, au), (Metal::Pd, pd), (Metal::Cu, cu)]),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_bioleaching_costs_include_culture_factor() {
        let costs = BioConditionCosts::default();
        let profile = bioleaching(BioCulture::Consortium, &costs, None).unwrap();

        assert_eq!(profile.name(), "Bioleaching (Consortium)");
        assert_relative_eq!(profile.energy_kwh_per_tonne(), 80.0);
        // 30 + 20 + 15 * 1.4
        assert_relative_eq!(profile.chemical_cost_per_tonne(), 71.0, epsilon = 1e-9);
        assert_relative_eq!(profile.recovery(Metal::Cu), 0.90);
    }

    #[test]
    fn test_bioleaching_recovery_override() {
        let costs = BioConditionCosts::default();
        let culture = BioCulture::Single(Organism::AcidithiobacillusFerrooxidans);
        let profile =
            bioleaching(culture, &costs, Some(metal_map([(Metal::Cu, 0.8)]))).unwrap();

        assert_eq!(profile.name(), "Bioleaching (A. ferrooxidans)");
        assert_relative_eq!(profile.recovery(Metal::Cu), 0.8);
        assert_eq!(profile.recovery(Metal::Au), 0.0);
    }

    #[test]
    fn test_negative_condition_cost_rejected() {
        let costs = BioConditionCosts {
            ph_control_cost_per_tonne: -1.0,
            ..Default::default()
        };
        assert!(bioleaching(BioCulture::Consortium, &costs, None).is_err());
    }

    #[test]
    fn test_bioleaching_recovery_override_is_validated() {
        let culture = BioCulture::Consortium;
        let err = bioleaching(
            culture,
            &BioConditionCosts::default(),
            Some(metal_map([(Metal::Au, 1.2)])),
        )
        .unwrap_err();
        assert!(matches!(err, ValidationError::FractionOutOfRange { .. }));
    }

    #[test]
    fn test_total_energy_override() {
        let costs = BioConditionCosts {
            total_energy_override_kwh_per_tonne: Some(120.0),
            ..Default::default()
        };
        assert_relative_eq!(costs.total_energy_kwh_per_tonne(), 120.0);

        let profile = bioleaching(BioCulture::Consortium, &costs, None).unwrap();
        assert_relative_eq!(profile.energy_kwh_per_tonne(), 120.0);

        let negative = BioConditionCosts {
            total_energy_override_kwh_per_tonne: Some(-5.0),
            ..Default::default()
        };
        assert!(bioleaching(BioCulture::Consortium, &negative, None).is_err());
    }

    #[test]
    fn test_energy_override_defaults_to_absent_in_json() {
        let costs: BioConditionCosts = serde_json::from_str(
            r#"{"baseline_energy_kwh_per_tonne": 40, "aeration_energy_kwh_per_tonne": 20,
                "base_reagent_cost_per_tonne": 30, "ph_control_cost_per_tonne": 20,
                "culture_cost_per_tonne": 15, "capex_per_tonne": 50}"#,
        )
        .unwrap();
        assert!(costs.total_energy_override_kwh_per_tonne.is_none());
        assert_relative_eq!(costs.total_energy_kwh_per_tonne(), 60.0);
    }

    #[test]
    fn test_reference_bioleaching_matches_validated_path() {
        for culture in BioCulture::ALL {
            let reference = &reference_methods(culture)[2];
            let validated = bioleaching(culture, &BioConditionCosts::default(), None).unwrap();
            assert_eq!(reference, &validated);
        }
    }

    #[test]
    fn test_reference_methods_order() {
        let methods = reference_methods(BioCulture::Single(Organism::LeptospirillumFerrooxidans));
        let names: Vec<&str> = methods.iter().map(|m| m.name()).collect();
        assert_eq!(
            names,
            vec![
                "Pyrometallurgy",
                "Hydrometallurgy",
                "Bioleaching (Leptospirillum)",
                "Informal (Egypt)",
            ]
        );
    }
}
