//! Optimum-conditions summary table
//!
//! One row per organism and recorded metal, listing where the organism does
//! best and how much it can recover at most.

use crate::bioleach::organism::OrganismProfile;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimumConditionsRow {
    pub organism: String,
    pub metal: String,
    pub optimum_ph: f64,
    pub optimum_temp_c: f64,
    pub oxygen_half_saturation: f64,
    pub max_recovery_pct: f64,
}

pub fn optimum_conditions_summary(profiles: &[OrganismProfile]) -> Vec<OptimumConditionsRow> {
    profiles
        .iter()
        .flat_map(|p| {
            p.recorded_metals().into_iter().filter_map(move |metal| {
                p.max_recovery(metal).map(|max| OptimumConditionsRow {
                    organism: p.organism().scientific_name().to_string(),
                    metal: metal.symbol().to_string(),
                    optimum_ph: p.ph_opt(),
                    optimum_temp_c: p.temp_opt_c(),
                    oxygen_half_saturation: p.oxygen_half_saturation(),
                    max_recovery_pct: max * 100.0,
                })
            })
        })
        .collect()
}
