//! Processing method evaluation
//!
//! - `evaluator`: profile types and the cost/yield rollup
//! - `defaults`: reference profiles for pyro, hydro, bio and informal recovery

pub mod evaluator;
pub mod defaults;

pub use evaluator::{
    evaluate, CostMap, Currency, EconomicParameters, EconomicParametersSpec, EvaluationResult,
    MethodProfile, MethodProfileSpec,
};
pub use defaults::{BioConditionCosts, BioCulture};
