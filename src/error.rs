//! Validation errors for model inputs
//!
//! Every parameter struct is checked once, at construction. After that the
//! evaluators only deal with degenerate cases (zero recovered mass, missing
//! metal data), which are values and not errors.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{field} must be finite, got {value}")]
    NonFinite { field: &'static str, value: f64 },

    #[error("{field} must be non-negative, got {value}")]
    Negative { field: &'static str, value: f64 },

    #[error("{field} spread must be strictly positive, got {value}")]
    NonPositiveSpread { field: &'static str, value: f64 },

    #[error("half-saturation constant must be strictly positive, got {0}")]
    NonPositiveHalfSaturation(f64),

    #[error("{field} for {metal} must lie in [0, 1], got {value}")]
    FractionOutOfRange {
        field: &'static str,
        metal: &'static str,
        value: f64,
    },

    #[error("unknown metal '{0}' (expected Au, Pd or Cu)")]
    UnknownMetal(String),

    #[error("unknown organism '{0}'")]
    UnknownOrganism(String),

    #[error("unknown currency '{0}' (expected USD or EGP)")]
    UnknownCurrency(String),

    #[error("unknown combination rule '{0}'")]
    UnknownCombinationRule(String),

    #[error("method name must not be empty")]
    EmptyMethodName,
}

/// Reject NaN and infinities.
pub(crate) fn ensure_finite(field: &'static str, value: f64) -> Result<f64, ValidationError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ValidationError::NonFinite { field, value })
    }
}

/// Finite and `>= 0`.
pub(crate) fn ensure_non_negative(
    field: &'static str,
    value: f64,
) -> Result<f64, ValidationError> {
    let value = ensure_finite(field, value)?;
    if value < 0.0 {
        return Err(ValidationError::Negative { field, value });
    }
    Ok(value)
}

/// Finite and within `[0, 1]`.
pub(crate) fn ensure_unit_fraction(
    field: &'static str,
    metal: &'static str,
    value: f64,
) -> Result<f64, ValidationError> {
    let value = ensure_finite(field, value)?;
    if !(0.0..=1.0).contains(&value) {
        return Err(ValidationError::FractionOutOfRange { field, metal, value });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_negative_rejects_nan_before_sign() {
        let err = ensure_non_negative("labor_cost", f64::NAN).unwrap_err();
        assert!(matches!(err, ValidationError::NonFinite { field: "labor_cost", .. }));
    }

    #[test]
    fn test_unit_fraction_bounds_are_inclusive() {
        assert_eq!(ensure_unit_fraction("recovery", "Au", 0.0).unwrap(), 0.0);
        assert_eq!(ensure_unit_fraction("recovery", "Au", 1.0).unwrap(), 1.0);
        assert!(ensure_unit_fraction("recovery", "Au", 1.0001).is_err());
    }

    #[test]
    fn test_error_messages_name_the_field() {
        let err = ValidationError::Negative { field: "capex_per_tonne", value: -1.0 };
        assert_eq!(err.to_string(), "capex_per_tonne must be non-negative, got -1");
    }
}
