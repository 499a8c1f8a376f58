//! Operating-point sweeps
//!
//! Evaluates the response model over the Cartesian product of pH,
//! temperature and dissolved-oxygen axes. Points are independent, so the grid
//! is evaluated with Rayon and collected back in row-major order
//! (pH outermost, oxygen innermost).

use crate::bioleach::model::{BioleachResponseModel, OperatingPoint, RecoveryPrediction};
use crate::bioleach::organism::OrganismProfile;
use crate::error::ValidationError;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OperatingGrid {
    pub ph: Vec<f64>,
    pub temperature_c: Vec<f64>,
    pub dissolved_oxygen_mg_l: Vec<f64>,
}

impl OperatingGrid {
    /// Grid that varies one axis and pins the other two at `anchor`.
    pub fn ph_slice(anchor: &OperatingPoint, ph: Vec<f64>) -> Self {
        Self {
            ph,
            temperature_c: vec![anchor.temperature_c()],
            dissolved_oxygen_mg_l: vec![anchor.dissolved_oxygen_mg_l()],
        }
    }

    pub fn temperature_slice(anchor: &OperatingPoint, temperature_c: Vec<f64>) -> Self {
        Self {
            ph: vec![anchor.ph()],
            temperature_c,
            dissolved_oxygen_mg_l: vec![anchor.dissolved_oxygen_mg_l()],
        }
    }

    pub fn oxygen_slice(anchor: &OperatingPoint, dissolved_oxygen_mg_l: Vec<f64>) -> Self {
        Self {
            ph: vec![anchor.ph()],
            temperature_c: vec![anchor.temperature_c()],
            dissolved_oxygen_mg_l,
        }
    }

    pub fn len(&self) -> usize {
        self.ph.len() * self.temperature_c.len() * self.dissolved_oxygen_mg_l.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every grid point, validated, in row-major order.
    pub fn points(&self) -> Result<Vec<OperatingPoint>, ValidationError> {
        let mut points = Vec::with_capacity(self.len());
        for &ph in &self.ph {
            for &t in &self.temperature_c {
                for &o in &self.dissolved_oxygen_mg_l {
                    points.push(OperatingPoint::new(ph, t, o)?);
                }
            }
        }
        Ok(points)
    }
}

/// Evaluate `model` at every point of `grid` for one organism.
pub fn sweep(
    model: &BioleachResponseModel,
    profile: &OrganismProfile,
    grid: &OperatingGrid,
) -> Result<Vec<RecoveryPrediction>, ValidationError> {
    let points = grid.points()?;

    tracing::debug!(
        "Sweeping {} points for {} ({})",
        points.len(),
        profile.organism().short_name(),
        model.rule()
    );

    points
        .par_iter()
        .map(|point| model.predict_all(profile, point))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bioleach::model::CombinationRule;
    use crate::bioleach::organism::Organism;
    use crate::metal::Metal;
    use crate::utils::linspace;

    #[test]
    fn test_sweep_matches_pointwise_predictions() {
        let model = BioleachResponseModel::new(CombinationRule::WeightedSumExponent);
        let profile = Organism::AcidithiobacillusThiooxidans.profile();
        let grid = OperatingGrid {
            ph: linspace(1.0, 4.0, 7),
            temperature_c: linspace(20.0, 40.0, 5),
            dissolved_oxygen_mg_l: vec![0.0, 2.0, 8.0],
        };

        let results = sweep(&model, &profile, &grid).unwrap();
        assert_eq!(results.len(), 7 * 5 * 3);

        for (prediction, point) in results.iter().zip(grid.points().unwrap()) {
            assert_eq!(prediction.point, point);
            assert_eq!(prediction, &model.predict_all(&profile, &point).unwrap());
        }
    }

    #[test]
    fn test_sweep_order_is_row_major() {
        let model = BioleachResponseModel::new(CombinationRule::MultiplicativeWeighted);
        let profile = Organism::AcidithiobacillusFerrooxidans.profile();
        let grid = OperatingGrid {
            ph: vec![1.5, 2.5],
            temperature_c: vec![30.0],
            dissolved_oxygen_mg_l: vec![1.0, 4.0],
        };
        let results = sweep(&model, &profile, &grid).unwrap();
        let phs: Vec<f64> = results.iter().map(|r| r.point.ph()).collect();
        let dos: Vec<f64> = results.iter().map(|r| r.point.dissolved_oxygen_mg_l()).collect();
        assert_eq!(phs, vec![1.5, 1.5, 2.5, 2.5]);
        assert_eq!(dos, vec![1.0, 4.0, 1.0, 4.0]);
    }

    #[test]
    fn test_empty_axis_gives_empty_sweep() {
        let model = BioleachResponseModel::new(CombinationRule::MultiplicativeWeighted);
        let profile = Organism::LeptospirillumFerrooxidans.profile();
        let grid = OperatingGrid {
            ph: vec![],
            temperature_c: vec![30.0],
            dissolved_oxygen_mg_l: vec![3.0],
        };
        assert!(grid.is_empty());
        assert!(sweep(&model, &profile, &grid).unwrap().is_empty());
    }

    #[test]
    fn test_ph_slice_peaks_at_optimum() {
        let model = BioleachResponseModel::new(CombinationRule::MultiplicativeWeighted);
        let profile = Organism::AcidithiobacillusFerrooxidans.profile();
        let anchor = OperatingPoint::new(2.0, 30.0, 3.0).unwrap();
        let grid = OperatingGrid::ph_slice(&anchor, linspace(0.0, 4.0, 9));

        let results = sweep(&model, &profile, &grid).unwrap();
        let best = results
            .iter()
            .max_by(|a, b| a.recovery_of(Metal::Cu).total_cmp(&b.recovery_of(Metal::Cu)))
            .unwrap();
        assert_eq!(best.point.ph(), 2.0);
    }

    #[test]
    fn test_non_finite_axis_value_rejected() {
        let model = BioleachResponseModel::new(CombinationRule::MultiplicativeWeighted);
        let profile = Organism::AcidithiobacillusFerrooxidans.profile();
        let grid = OperatingGrid {
            ph: vec![2.0, f64::NAN],
            temperature_c: vec![30.0],
            dissolved_oxygen_mg_l: vec![3.0],
        };
        assert!(sweep(&model, &profile, &grid).is_err());
    }
}
