//! Bioleaching response model
//!
//! - `response`: Gaussian and Monod response primitives
//! - `organism`: organism enumeration and literature parameters
//! - `model`: combination rules and per-metal recovery prediction
//! - `sweep`: parallel evaluation over operating-point grids
//! - `summary`: optimum-conditions table

pub mod response;
pub mod organism;
pub mod model;
pub mod sweep;
pub mod summary;

pub use response::{gaussian_factor, monod_factor};
pub use organism::{literature_profiles, Organism, OrganismProfile, OrganismProfileSpec};
pub use model::{
    BioleachResponseModel, CombinationRule, OperatingPoint, OperatingPointSpec,
    RecoveryPrediction, ResponseFactors,
};
pub use sweep::{sweep, OperatingGrid};
pub use summary::{optimum_conditions_summary, OptimumConditionsRow};
