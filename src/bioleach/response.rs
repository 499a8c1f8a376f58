//! Response-curve primitives
//!
//! Two shapes cover the environmental dependence of leaching activity:
//! a Gaussian tolerance curve around a biological optimum (pH, temperature)
//! and a Monod saturation curve for dissolved oxygen.

use crate::error::{ensure_finite, ValidationError};

/// Symmetric tolerance factor in (0, 1], exactly 1 at `optimum`.
///
/// `exp(-0.5 * ((x - optimum) / spread)^2)`
pub fn gaussian_factor(x: f64, optimum: f64, spread: f64) -> Result<f64, ValidationError> {
    if !(spread.is_finite() && spread > 0.0) {
        return Err(ValidationError::NonPositiveSpread {
            field: "gaussian",
            value: spread,
        });
    }
    let x = ensure_finite("gaussian input", x)?;
    let optimum = ensure_finite("gaussian optimum", optimum)?;

    let z = (x - optimum) / spread;
    Ok(libm::exp(-0.5 * z * z))
}

/// Saturation factor `c / (K + c)` in [0, 1).
///
/// Negative concentrations are treated as zero.
pub fn monod_factor(concentration: f64, half_saturation: f64) -> Result<f64, ValidationError> {
    if !(half_saturation.is_finite() && half_saturation > 0.0) {
        return Err(ValidationError::NonPositiveHalfSaturation(half_saturation));
    }
    let c = ensure_finite("monod concentration", concentration)?.max(0.0);
    if c == 0.0 {
        return Ok(0.0);
    }
    // Ratio form: K + c can overflow near f64::MAX
    Ok(1.0 / (1.0 + half_saturation / c))
}
