//! Leaching organisms and their response parameters
//!
//! Three acidophilic iron/sulfur oxidisers are modelled. Their optima and
//! tolerance widths are literature values for bench-scale PCB leaching; the
//! maximum recoveries are the best reported per metal.

use crate::error::{ensure_finite, ensure_unit_fraction, ValidationError};
use crate::metal::{metal_map, Metal, MetalMap};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Organism {
    AcidithiobacillusFerrooxidans,
    AcidithiobacillusThiooxidans,
    LeptospirillumFerrooxidans,
}

impl Organism {
    pub const ALL: [Organism; 3] = [
        Organism::AcidithiobacillusFerrooxidans,
        Organism::AcidithiobacillusThiooxidans,
        Organism::LeptospirillumFerrooxidans,
    ];

    pub fn scientific_name(&self) -> &'static str {
        match self {
            Organism::AcidithiobacillusFerrooxidans => "Acidithiobacillus ferrooxidans",
            Organism::AcidithiobacillusThiooxidans => "Acidithiobacillus thiooxidans",
            Organism::LeptospirillumFerrooxidans => "Leptospirillum ferrooxidans",
        }
    }

    pub fn short_name(&self) -> &'static str {
        match self {
            Organism::AcidithiobacillusFerrooxidans => "A. ferrooxidans",
            Organism::AcidithiobacillusThiooxidans => "A. thiooxidans",
            Organism::LeptospirillumFerrooxidans => "Leptospirillum",
        }
    }

    /// Literature parameter set for this organism.
    pub fn profile(&self) -> OrganismProfile {
        let (ph_opt, ph_sigma, temp_opt, temp_sigma, k_o, (au, pd, cu)) = match self {
            // Fe2+ oxidiser, mesophile
            Organism::AcidithiobacillusFerrooxidans => (2.0, 0.7, 30.0, 6.0, 0.5, (0.40, 0.30, 0.85)),
            // S0 oxidiser, tolerates slightly higher pH
            Organism::AcidithiobacillusThiooxidans => (2.5, 0.8, 28.0, 5.0, 0.6, (0.30, 0.25, 0.80)),
            // Fe2+ specialist, more acid- and heat-tolerant
            Organism::LeptospirillumFerrooxidans => (1.7, 0.5, 37.0, 7.0, 0.4, (0.35, 0.28, 0.82)),
        };
        OrganismProfile {
            organism: *self,
            ph_opt,
            ph_sigma,
            temp_opt_c: temp_opt,
            temp_sigma_c: temp_sigma,
            oxygen_half_saturation: k_o,
            max_recovery: metal_map([(Metal::Au, au), (Metal::Pd, pd), (Metal::Cu, cu)]),
        }
    }
}

impl fmt::Display for Organism {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.scientific_name())
    }
}

impl FromStr for Organism {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .to_ascii_lowercase()
            .chars()
            .map(|c| if c == ' ' || c == '.' || c == '-' { '_' } else { c })
            .collect();
        match key.as_str() {
            "acidithiobacillus_ferrooxidans" | "a__ferrooxidans" | "a_ferrooxidans" => {
                Ok(Organism::AcidithiobacillusFerrooxidans)
            }
            "acidithiobacillus_thiooxidans" | "a__thiooxidans" | "a_thiooxidans" => {
                Ok(Organism::AcidithiobacillusThiooxidans)
            }
            "leptospirillum_ferrooxidans" | "leptospirillum" | "l__ferrooxidans" => {
                Ok(Organism::LeptospirillumFerrooxidans)
            }
            _ => Err(ValidationError::UnknownOrganism(s.to_string())),
        }
    }
}

/// Environmental optima and tolerance of one organism.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "OrganismProfileSpec", into = "OrganismProfileSpec")]
pub struct OrganismProfile {
    organism: Organism,
    ph_opt: f64,
    ph_sigma: f64,
    temp_opt_c: f64,
    temp_sigma_c: f64,
    oxygen_half_saturation: f64,
    max_recovery: MetalMap,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrganismProfileSpec {
    pub organism: Organism,
    pub ph_opt: f64,
    pub ph_sigma: f64,
    pub temp_opt_c: f64,
    pub temp_sigma_c: f64,
    /// Dissolved-oxygen half-saturation constant K_O (mg/L)
    pub oxygen_half_saturation: f64,
    #[serde(default)]
    pub max_recovery: MetalMap,
}

impl OrganismProfile {
    pub fn new(spec: OrganismProfileSpec) -> Result<Self, ValidationError> {
        let ph_opt = ensure_finite("ph_opt", spec.ph_opt)?;
        let temp_opt_c = ensure_finite("temp_opt_c", spec.temp_opt_c)?;
        let ph_sigma = ensure_spread("ph_sigma", spec.ph_sigma)?;
        let temp_sigma_c = ensure_spread("temp_sigma_c", spec.temp_sigma_c)?;

        let k_o = spec.oxygen_half_saturation;
        if !(k_o.is_finite() && k_o > 0.0) {
            return Err(ValidationError::NonPositiveHalfSaturation(k_o));
        }

        for (metal, &max) in spec.max_recovery.iter() {
            ensure_unit_fraction("max_recovery", metal.symbol(), max)?;
        }

        Ok(Self {
            organism: spec.organism,
            ph_opt,
            ph_sigma,
            temp_opt_c,
            temp_sigma_c,
            oxygen_half_saturation: k_o,
            max_recovery: spec.max_recovery,
        })
    }

    pub fn organism(&self) -> Organism {
        self.organism
    }

    pub fn ph_opt(&self) -> f64 {
        self.ph_opt
    }

    pub fn ph_sigma(&self) -> f64 {
        self.ph_sigma
    }

    pub fn temp_opt_c(&self) -> f64 {
        self.temp_opt_c
    }

    pub fn temp_sigma_c(&self) -> f64 {
        self.temp_sigma_c
    }

    pub fn oxygen_half_saturation(&self) -> f64 {
        self.oxygen_half_saturation
    }

    /// Maximum achievable recovery; `None` when there is no data for `metal`.
    pub fn max_recovery(&self, metal: Metal) -> Option<f64> {
        self.max_recovery.get(&metal).copied()
    }

    /// Metals with recorded maxima, in reporting order.
    pub fn recorded_metals(&self) -> Vec<Metal> {
        Metal::ALL
            .into_iter()
            .filter(|m| self.max_recovery.contains_key(m))
            .collect()
    }
}

impl TryFrom<OrganismProfileSpec> for OrganismProfile {
    type Error = ValidationError;

    fn try_from(spec: OrganismProfileSpec) -> Result<Self, Self::Error> {
        OrganismProfile::new(spec)
    }
}

impl From<OrganismProfile> for OrganismProfileSpec {
    fn from(p: OrganismProfile) -> Self {
        OrganismProfileSpec {
            organism: p.organism,
            ph_opt: p.ph_opt,
            ph_sigma: p.ph_sigma,
            temp_opt_c: p.temp_opt_c,
            temp_sigma_c: p.temp_sigma_c,
            oxygen_half_saturation: p.oxygen_half_saturation,
            max_recovery: p.max_recovery,
        }
    }
}

fn ensure_spread(field: &'static str, value: f64) -> Result<f64, ValidationError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ValidationError::NonPositiveSpread { field, value })
    }
}

/// Literature profiles for every organism, in enumeration order.
pub fn literature_profiles() -> Vec<OrganismProfile> {
    Organism::ALL.iter().map(|o| o.profile()).collect()
}
