//! Finite-value guards
//!
//! The thermal model places no bounds on temperature, so the only runtime
//! fault is numeric divergence (NaN or infinity). These guards turn that
//! into an error at the tick boundary instead of letting it propagate.

use crate::error::{SimError, StateField};

/// Guard status for a single value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GuardStatus {
    /// Value is a finite number
    Ok,
    /// Value is NaN or infinite
    Fault(StateField),
}

/// Check a runtime value
pub fn check(value: f64, field: StateField) -> GuardStatus {
    if value.is_finite() {
        GuardStatus::Ok
    } else {
        GuardStatus::Fault(field)
    }
}

/// Return the value unchanged if finite, otherwise `InvalidState`
pub fn ensure_finite(value: f64, field: StateField) -> Result<f64, SimError> {
    match check(value, field) {
        GuardStatus::Ok => Ok(value),
        GuardStatus::Fault(field) => Err(SimError::InvalidState(field)),
    }
}

/// `true` if `value` is finite and `>= 0`
pub fn is_non_negative(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

/// `true` if `value` is finite and `> 0`
pub fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finite_values_pass() {
        assert_eq!(check(25.0, StateField::Temperature), GuardStatus::Ok);
        assert_eq!(check(-273.0, StateField::Temperature), GuardStatus::Ok);
        assert_eq!(ensure_finite(180.0, StateField::Setpoint), Ok(180.0));
    }

    #[test]
    fn test_nan_and_infinity_fail() {
        assert_eq!(
            check(f64::NAN, StateField::Setpoint),
            GuardStatus::Fault(StateField::Setpoint)
        );
        assert_eq!(
            ensure_finite(f64::INFINITY, StateField::Temperature),
            Err(SimError::InvalidState(StateField::Temperature))
        );
        assert_eq!(
            ensure_finite(f64::NEG_INFINITY, StateField::Temperature),
            Err(SimError::InvalidState(StateField::Temperature))
        );
    }

    #[test]
    fn test_range_helpers() {
        assert!(is_non_negative(0.0));
        assert!(!is_non_negative(-0.1));
        assert!(!is_non_negative(f64::NAN));
        assert!(is_positive(0.1));
        assert!(!is_positive(0.0));
        assert!(!is_positive(f64::INFINITY));
    }
}
