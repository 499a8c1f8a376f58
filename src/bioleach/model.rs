//! Bioleaching response model
//!
//! Maps an operating point (pH, temperature, dissolved oxygen) and an
//! organism's parameters to a predicted recovery fraction per metal.
//!
//! Two combination rules are supported and must be chosen explicitly:
//!
//! - `MultiplicativeWeighted`: pH and temperature are independently limiting,
//!   oxygen scales the result between 0.6 and 1.0.
//!   `max * f_pH * f_T * (0.6 + 0.4 * f_O)`
//! - `WeightedSumExponent`: factors partially compensate each other and the
//!   exponent sharpens the peak.
//!   `max * min(1, (0.5 * f_pH + 0.3 * f_T + 0.2 * f_O)^1.2)`

use crate::bioleach::organism::{Organism, OrganismProfile};
use crate::bioleach::response::{gaussian_factor, monod_factor};
use crate::error::{ensure_finite, ValidationError};
use crate::metal::{Metal, MetalMap};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const OXYGEN_FLOOR: f64 = 0.6;
const OXYGEN_SPAN: f64 = 0.4;

const WEIGHT_PH: f64 = 0.5;
const WEIGHT_TEMP: f64 = 0.3;
const WEIGHT_OXYGEN: f64 = 0.2;
const SYNERGY_EXPONENT: f64 = 1.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CombinationRule {
    MultiplicativeWeighted,
    WeightedSumExponent,
}

impl CombinationRule {
    pub const ALL: [CombinationRule; 2] = [
        CombinationRule::MultiplicativeWeighted,
        CombinationRule::WeightedSumExponent,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CombinationRule::MultiplicativeWeighted => "multiplicative_weighted",
            CombinationRule::WeightedSumExponent => "weighted_sum_exponent",
        }
    }

    /// Combined environmental multiplier in [0, 1] applied to max recovery.
    pub fn combine(&self, factors: &ResponseFactors) -> f64 {
        match self {
            CombinationRule::MultiplicativeWeighted => {
                factors.ph * factors.temperature * (OXYGEN_FLOOR + OXYGEN_SPAN * factors.oxygen)
            }
            CombinationRule::WeightedSumExponent => {
                let weighted = WEIGHT_PH * factors.ph
                    + WEIGHT_TEMP * factors.temperature
                    + WEIGHT_OXYGEN * factors.oxygen;
                libm::pow(weighted, SYNERGY_EXPONENT).min(1.0)
            }
        }
    }
}

impl fmt::Display for CombinationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CombinationRule {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "multiplicative_weighted" | "multiplicative" | "a" => {
                Ok(CombinationRule::MultiplicativeWeighted)
            }
            "weighted_sum_exponent" | "weighted_sum" | "b" => {
                Ok(CombinationRule::WeightedSumExponent)
            }
            _ => Err(ValidationError::UnknownCombinationRule(s.to_string())),
        }
    }
}

/// A single point in condition space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "OperatingPointSpec", into = "OperatingPointSpec")]
pub struct OperatingPoint {
    ph: f64,
    temperature_c: f64,
    dissolved_oxygen_mg_l: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct OperatingPointSpec {
    pub ph: f64,
    pub temperature_c: f64,
    pub dissolved_oxygen_mg_l: f64,
}

impl OperatingPoint {
    pub fn new(
        ph: f64,
        temperature_c: f64,
        dissolved_oxygen_mg_l: f64,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            ph: ensure_finite("ph", ph)?,
            temperature_c: ensure_finite("temperature_c", temperature_c)?,
            dissolved_oxygen_mg_l: ensure_finite("dissolved_oxygen_mg_l", dissolved_oxygen_mg_l)?,
        })
    }

    /// pH 2.0, 30 °C, 3 mg/L: near the A. ferrooxidans optimum.
    pub fn placeholder() -> Self {
        Self {
            ph: 2.0,
            temperature_c: 30.0,
            dissolved_oxygen_mg_l: 3.0,
        }
    }

    pub fn ph(&self) -> f64 {
        self.ph
    }

    pub fn temperature_c(&self) -> f64 {
        self.temperature_c
    }

    pub fn dissolved_oxygen_mg_l(&self) -> f64 {
        self.dissolved_oxygen_mg_l
    }
}

impl TryFrom<OperatingPointSpec> for OperatingPoint {
    type Error = ValidationError;

    fn try_from(spec: OperatingPointSpec) -> Result<Self, Self::Error> {
        OperatingPoint::new(spec.ph, spec.temperature_c, spec.dissolved_oxygen_mg_l)
    }
}

impl From<OperatingPoint> for OperatingPointSpec {
    fn from(p: OperatingPoint) -> Self {
        OperatingPointSpec {
            ph: p.ph,
            temperature_c: p.temperature_c,
            dissolved_oxygen_mg_l: p.dissolved_oxygen_mg_l,
        }
    }
}

/// Individual environmental factors, each in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResponseFactors {
    pub ph: f64,
    pub temperature: f64,
    pub oxygen: f64,
}

impl ResponseFactors {
    pub fn compute(
        profile: &OrganismProfile,
        point: &OperatingPoint,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            ph: gaussian_factor(point.ph, profile.ph_opt(), profile.ph_sigma())?,
            temperature: gaussian_factor(
                point.temperature_c,
                profile.temp_opt_c(),
                profile.temp_sigma_c(),
            )?,
            oxygen: monod_factor(point.dissolved_oxygen_mg_l, profile.oxygen_half_saturation())?,
        })
    }
}

/// Predicted recoveries for one organism at one operating point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecoveryPrediction {
    pub organism: Organism,
    pub point: OperatingPoint,
    pub rule: CombinationRule,
    pub factors: ResponseFactors,
    /// Every tracked metal; 0 where the organism has no data
    pub recovery: MetalMap,
}

impl RecoveryPrediction {
    pub fn recovery_of(&self, metal: Metal) -> f64 {
        self.recovery.get(&metal).copied().unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BioleachResponseModel {
    rule: CombinationRule,
}

impl BioleachResponseModel {
    pub fn new(rule: CombinationRule) -> Self {
        Self { rule }
    }

    pub fn rule(&self) -> CombinationRule {
        self.rule
    }

    /// Recovery fraction for `metal`, in `[0, max_recovery[metal]]`.
    ///
    /// A metal without a recorded maximum yields 0.
    pub fn predict(
        &self,
        profile: &OrganismProfile,
        point: &OperatingPoint,
        metal: Metal,
    ) -> Result<f64, ValidationError> {
        let factors = ResponseFactors::compute(profile, point)?;
        Ok(self.recovery_from_factors(profile, &factors, metal))
    }

    /// Factor breakdown plus recovery for every tracked metal.
    pub fn predict_all(
        &self,
        profile: &OrganismProfile,
        point: &OperatingPoint,
    ) -> Result<RecoveryPrediction, ValidationError> {
        let factors = ResponseFactors::compute(profile, point)?;
        let recovery: MetalMap = Metal::ALL
            .iter()
            .map(|&m| (m, self.recovery_from_factors(profile, &factors, m)))
            .collect();

        tracing::debug!(
            "{} at pH {:.2}, {:.1} °C, DO {:.2} mg/L: f_pH={:.3} f_T={:.3} f_O={:.3}",
            profile.organism().short_name(),
            point.ph,
            point.temperature_c,
            point.dissolved_oxygen_mg_l,
            factors.ph,
            factors.temperature,
            factors.oxygen
        );

        Ok(RecoveryPrediction {
            organism: profile.organism(),
            point: *point,
            rule: self.rule,
            factors,
            recovery,
        })
    }

    fn recovery_from_factors(
        &self,
        profile: &OrganismProfile,
        factors: &ResponseFactors,
        metal: Metal,
    ) -> f64 {
        let Some(max) = profile.max_recovery(metal) else {
            return 0.0;
        };
        (max * self.rule.combine(factors)).clamp(0.0, 1.0)
    }
}
