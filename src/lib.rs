//! E-waste Metal Recovery Models
//!
//! Cost/yield comparison of processing methods for recovering gold, palladium
//! and copper from electronic waste, and a bioleaching response model that
//! predicts recovery from pH, temperature and dissolved oxygen.
//!
//! Module layout:
//! - `metal`, `feedstock`: tracked metals and the input feed
//! - `methods/`: method profiles, shared economics and the cost rollup
//! - `bioleach/`: organism parameters, response curves, sweeps and summaries
//! - `comparison`: runs every configured method against one feedstock
//! - `config`: JSON scenario files
//! - `data`: CSV parameter tables with Polars
//! - `report`: flat records, DataFrames and CSV export
//! - `utils/`: sweep axes and value formatting

pub mod error;
pub mod metal;
pub mod feedstock;
pub mod methods;
pub mod bioleach;
pub mod comparison;
pub mod config;
pub mod data;
pub mod report;
pub mod utils;

// Re-export commonly used types
pub use error::ValidationError;
pub use metal::{metal_map, Metal, MetalMap};
pub use feedstock::Feedstock;
pub use methods::{
    evaluate, BioConditionCosts, BioCulture, Currency, EconomicParameters, EvaluationResult,
    MethodProfile,
};
pub use bioleach::{
    optimum_conditions_summary, sweep, BioleachResponseModel, CombinationRule, OperatingGrid,
    OperatingPoint, Organism, OrganismProfile, RecoveryPrediction,
};
pub use comparison::{cheapest_per_kg_mixture, MethodComparison};
pub use config::{BioleachSettings, Scenario};
pub use report::{MethodRecord, RecoveryRecord};
