//! Feedstock composition
//!
//! A batch of e-waste: total mass in tonnes and the mass fraction of each
//! tracked metal. Fractions are only checked for sign; whether they sum to
//! something sensible is the caller's business. Derived masses in kg, and
//! their sum, must stay finite.

use crate::error::{ensure_finite, ensure_non_negative, ValidationError};
use crate::metal::{Metal, MetalMap};
use serde::{Deserialize, Serialize};

pub const KG_PER_TONNE: f64 = 1000.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "FeedstockSpec", into = "FeedstockSpec")]
pub struct Feedstock {
    mass_tonnes: f64,
    metal_fractions: MetalMap,
}

/// Unvalidated wire form, as found in scenario files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedstockSpec {
    pub mass_tonnes: f64,
    #[serde(default)]
    pub metal_fractions: MetalMap,
}

impl Feedstock {
    pub fn new(mass_tonnes: f64, metal_fractions: MetalMap) -> Result<Self, ValidationError> {
        let mass_tonnes = ensure_non_negative("feedstock mass_tonnes", mass_tonnes)?;
        let mass_kg = ensure_finite("feedstock mass_kg", mass_tonnes * KG_PER_TONNE)?;

        let mut contained_kg = 0.0;
        for (_, &fraction) in metal_fractions.iter() {
            let fraction = ensure_non_negative("feedstock metal fraction", fraction)?;
            contained_kg += ensure_finite("feedstock metal mass_kg", mass_kg * fraction)?;
        }
        ensure_finite("feedstock contained metal mass_kg", contained_kg)?;
        Ok(Self {
            mass_tonnes,
            metal_fractions,
        })
    }

    /// Placeholder assay: 1 t of mixed boards, 0.5 kg Au, 0.2 kg Pd, 200 kg Cu.
    pub fn placeholder() -> Self {
        Self {
            mass_tonnes: 1.0,
            metal_fractions: [(Metal::Au, 0.0005), (Metal::Pd, 0.0002), (Metal::Cu, 0.20)]
                .into_iter()
                .collect(),
        }
    }

    pub fn mass_tonnes(&self) -> f64 {
        self.mass_tonnes
    }

    pub fn mass_kg(&self) -> f64 {
        self.mass_tonnes * KG_PER_TONNE
    }

    /// Mass fraction of `metal`; 0 when not assayed.
    pub fn fraction(&self, metal: Metal) -> f64 {
        self.metal_fractions.get(&metal).copied().unwrap_or(0.0)
    }

    /// Mass of `metal` in the feed, in kg.
    pub fn metal_mass_kg(&self, metal: Metal) -> f64 {
        self.mass_kg() * self.fraction(metal)
    }
}

impl TryFrom<FeedstockSpec> for Feedstock {
    type Error = ValidationError;

    fn try_from(spec: FeedstockSpec) -> Result<Self, Self::Error> {
        Feedstock::new(spec.mass_tonnes, spec.metal_fractions)
    }
}

impl From<Feedstock> for FeedstockSpec {
    fn from(feedstock: Feedstock) -> Self {
        FeedstockSpec {
            mass_tonnes: feedstock.mass_tonnes,
            metal_fractions: feedstock.metal_fractions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metal::metal_map;
    use approx::assert_relative_eq;

    #[test]
    fn test_metal_mass_from_fraction() {
        let feed = Feedstock::placeholder();
        assert_relative_eq!(feed.metal_mass_kg(Metal::Au), 0.5, epsilon = 1e-12);
        assert_relative_eq!(feed.metal_mass_kg(Metal::Pd), 0.2, epsilon = 1e-12);
        assert_relative_eq!(feed.metal_mass_kg(Metal::Cu), 200.0, epsilon = 1e-9);
    }

    #[test]
    fn test_missing_fraction_is_zero() {
        let feed = Feedstock::new(2.0, metal_map([(Metal::Cu, 0.1)])).unwrap();
        assert_eq!(feed.metal_mass_kg(Metal::Au), 0.0);
        assert_relative_eq!(feed.metal_mass_kg(Metal::Cu), 200.0, epsilon = 1e-9);
    }

    #[test]
    fn test_negative_fraction_rejected() {
        let err = Feedstock::new(1.0, metal_map([(Metal::Pd, -0.01)])).unwrap_err();
        assert!(matches!(err, ValidationError::Negative { .. }));
    }

    #[test]
    fn test_fraction_above_one_is_allowed() {
        // No upper bound is enforced on assay fractions
        assert!(Feedstock::new(1.0, metal_map([(Metal::Cu, 1.5)])).is_ok());
    }

    #[test]
    fn test_mass_overflowing_kg_rejected() {
        let err = Feedstock::new(1e306, metal_map([(Metal::Au, 0.0005), (Metal::Cu, 0.2)]))
            .unwrap_err();
        assert!(matches!(err, ValidationError::NonFinite { .. }));
    }

    #[test]
    fn test_metal_mass_overflow_rejected() {
        // 1e303 kg of feed; a fraction of 1e10 pushes Cu past f64::MAX
        let err = Feedstock::new(1e300, metal_map([(Metal::Cu, 1e10)])).unwrap_err();
        assert!(matches!(err, ValidationError::NonFinite { .. }));

        // 1e308 kg per metal is finite, three of them are not
        let err = Feedstock::new(
            1e300,
            metal_map([(Metal::Au, 1e5), (Metal::Pd, 1e5), (Metal::Cu, 1e5)]),
        )
        .unwrap_err();
        assert!(matches!(err, ValidationError::NonFinite { .. }));
    }

    #[test]
    fn test_deserialize_validates() {
        let bad = r#"{"mass_tonnes": -1.0, "metal_fractions": {}}"#;
        assert!(serde_json::from_str::<Feedstock>(bad).is_err());

        let good = r#"{"mass_tonnes": 0.5, "metal_fractions": {"Au": 0.001}}"#;
        let feed: Feedstock = serde_json::from_str(good).unwrap();
        assert_relative_eq!(feed.metal_mass_kg(Metal::Au), 0.5, epsilon = 1e-12);
    }
}
