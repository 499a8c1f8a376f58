//! Tracked metals
//!
//! The model follows three metals through every method: gold, palladium and
//! copper. Per-metal values are stored in small `FxHashMap`s so that "no data
//! for this metal" can be represented by absence.

use crate::error::ValidationError;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Metal {
    Au,
    Pd,
    Cu,
}

/// Per-metal scalar values (fractions, masses, costs).
pub type MetalMap = FxHashMap<Metal, f64>;

impl Metal {
    /// Fixed reporting order. Sums over metals always run in this order.
    pub const ALL: [Metal; 3] = [Metal::Au, Metal::Pd, Metal::Cu];

    pub fn symbol(&self) -> &'static str {
        match self {
            Metal::Au => "Au",
            Metal::Pd => "Pd",
            Metal::Cu => "Cu",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Metal::Au => "Gold",
            Metal::Pd => "Palladium",
            Metal::Cu => "Copper",
        }
    }

    /// Lower-case suffix used in flat column names (`recovery_au`, ...)
    pub fn column_suffix(&self) -> &'static str {
        match self {
            Metal::Au => "au",
            Metal::Pd => "pd",
            Metal::Cu => "cu",
        }
    }
}

impl fmt::Display for Metal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Metal {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "au" | "gold" => Ok(Metal::Au),
            "pd" | "palladium" => Ok(Metal::Pd),
            "cu" | "copper" => Ok(Metal::Cu),
            _ => Err(ValidationError::UnknownMetal(s.to_string())),
        }
    }
}

/// Build a map from `(metal, value)` pairs.
pub fn metal_map<I>(pairs: I) -> MetalMap
where
    I: IntoIterator<Item = (Metal, f64)>,
{
    pairs.into_iter().collect()
}
