//! Scenario configuration
//!
//! A scenario bundles everything a caller supplies for one run: shared
//! economics, the feedstock assay, method profiles and bioleaching settings.
//! Scenarios are JSON files; every numeric field is validated while
//! deserializing, so a loaded `Scenario` is always usable.
//!
//! ```json
//! {
//!   "economics": { "electricity_price": 0.06, "labor_cost": 50, "env_cost_proxy": 20 },
//!   "feedstock": { "mass_tonnes": 1.0, "metal_fractions": { "Au": 0.0005, "Pd": 0.0002, "Cu": 0.2 } },
//!   "bio_culture": "consortium",
//!   "bioleach": {
//!     "rule": "multiplicative_weighted",
//!     "operating_point": { "ph": 2.0, "temperature_c": 30.0, "dissolved_oxygen_mg_l": 3.0 }
//!   }
//! }
//! ```

use crate::bioleach::{
    literature_profiles, BioleachResponseModel, CombinationRule, OperatingPoint, Organism,
    OrganismProfile,
};
use crate::comparison::MethodComparison;
use crate::feedstock::Feedstock;
use crate::methods::defaults::{bioleaching, hydrometallurgy, informal, pyrometallurgy};
use crate::methods::{BioConditionCosts, BioCulture, EconomicParameters, MethodProfile};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    pub economics: EconomicParameters,
    pub feedstock: Feedstock,

    /// Explicit method list. When empty, the four reference methods are used
    /// with bioleaching assembled from `bio_culture` and `bio_condition_costs`.
    #[serde(default)]
    pub methods: Vec<MethodProfile>,

    #[serde(default = "default_culture")]
    pub bio_culture: BioCulture,

    #[serde(default)]
    pub bio_condition_costs: BioConditionCosts,

    #[serde(default)]
    pub bioleach: Option<BioleachSettings>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BioleachSettings {
    /// No default: the combination rule is always an explicit choice
    pub rule: CombinationRule,
    pub operating_point: OperatingPoint,
    /// Organism profiles to evaluate; literature values when empty
    #[serde(default)]
    pub organisms: Vec<OrganismProfile>,
}

fn default_culture() -> BioCulture {
    BioCulture::Single(Organism::AcidithiobacillusFerrooxidans)
}

impl Scenario {
    /// Load scenario from JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read scenario file: {:?}", path))?;

        let scenario: Scenario = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse scenario JSON: {:?}", path))?;

        tracing::info!(
            "Loaded scenario {:?} ({} explicit methods)",
            path,
            scenario.methods.len()
        );

        Ok(scenario)
    }

    /// Placeholder inputs; every value should be localized before use.
    pub fn placeholder(rule: CombinationRule) -> Self {
        Self {
            economics: EconomicParameters::placeholder(),
            feedstock: Feedstock::placeholder(),
            methods: Vec::new(),
            bio_culture: default_culture(),
            bio_condition_costs: BioConditionCosts::default(),
            bioleach: Some(BioleachSettings {
                rule,
                operating_point: OperatingPoint::placeholder(),
                organisms: Vec::new(),
            }),
        }
    }

    /// Methods to compare, in display order.
    pub fn method_profiles(&self) -> Result<Vec<MethodProfile>> {
        if !self.methods.is_empty() {
            return Ok(self.methods.clone());
        }
        let bio = bioleaching(self.bio_culture, &self.bio_condition_costs, None)
            .with_context(|| "Invalid bioleaching condition costs")?;
        Ok(vec![pyrometallurgy(), hydrometallurgy(), bio, informal()])
    }

    pub fn comparison(&self) -> Result<MethodComparison> {
        Ok(MethodComparison::new(
            self.feedstock.clone(),
            self.economics,
            self.method_profiles()?,
        ))
    }
}

impl BioleachSettings {
    pub fn model(&self) -> BioleachResponseModel {
        BioleachResponseModel::new(self.rule)
    }

    pub fn organism_profiles(&self) -> Vec<OrganismProfile> {
        if self.organisms.is_empty() {
            literature_profiles()
        } else {
            self.organisms.clone()
        }
    }
}
