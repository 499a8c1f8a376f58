//! Method Comparison - coordinator for a comparison run
//!
//! Holds one feedstock, the shared economics and an ordered list of method
//! profiles, and evaluates every method against them. Results come back in
//! the same order as the methods were given.

use crate::feedstock::Feedstock;
use crate::methods::defaults::{reference_methods, BioCulture};
use crate::methods::{evaluate, EconomicParameters, EvaluationResult, MethodProfile};

#[derive(Debug, Clone)]
pub struct MethodComparison {
    feedstock: Feedstock,
    economics: EconomicParameters,
    methods: Vec<MethodProfile>,
}

impl MethodComparison {
    pub fn new(
        feedstock: Feedstock,
        economics: EconomicParameters,
        methods: Vec<MethodProfile>,
    ) -> Self {
        Self {
            feedstock,
            economics,
            methods,
        }
    }

    /// Placeholder feedstock and economics with the four reference methods.
    pub fn placeholder(culture: BioCulture) -> Self {
        Self::new(
            Feedstock::placeholder(),
            EconomicParameters::placeholder(),
            reference_methods(culture),
        )
    }

    pub fn feedstock(&self) -> &Feedstock {
        &self.feedstock
    }

    pub fn economics(&self) -> &EconomicParameters {
        &self.economics
    }

    pub fn methods(&self) -> &[MethodProfile] {
        &self.methods
    }

    /// Evaluate every method, in order.
    pub fn run(&self) -> Vec<EvaluationResult> {
        tracing::info!(
            "Comparing {} methods on {:.2} t feed",
            self.methods.len(),
            self.feedstock.mass_tonnes()
        );

        self.methods
            .iter()
            .map(|profile| evaluate(&self.feedstock, profile, &self.economics))
            .collect()
    }
}

/// Result with the lowest defined cost per kg of recovered mixture.
///
/// Methods with undefined cost (nothing recovered) never win.
pub fn cheapest_per_kg_mixture(results: &[EvaluationResult]) -> Option<&EvaluationResult> {
    results
        .iter()
        .filter_map(|r| r.cost_per_kg_mixture.map(|cost| (r, cost)))
        .min_by(|(_, a), (_, b)| a.total_cmp(b))
        .map(|(r, _)| r)
}
