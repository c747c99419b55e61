//! Checks shared by the derivative methods.

use optiviz_core::Bracket;

use crate::{ConfigError, DivergenceError};

/// Accepts `next` as the iterate after `from`, or explains why not.
///
/// The iterate must be finite and lie within `bracket` widened by
/// `margin * width` on each side.
pub(crate) fn check_iterate(
    from: f64,
    next: f64,
    bracket: &Bracket,
    margin: f64,
) -> Result<f64, DivergenceError> {
    if !next.is_finite() {
        return Err(DivergenceError::NonFinite { x: from });
    }
    if !bracket.contains_with_margin(next, margin) {
        let pad = margin * bracket.width();
        return Err(DivergenceError::LeftBracket {
            x: next,
            low: bracket.low() - pad,
            high: bracket.high() + pad,
        });
    }
    Ok(next)
}

pub(crate) fn validate_tolerance(tolerance: f64) -> Result<f64, ConfigError> {
    if tolerance.is_finite() && tolerance > 0.0 {
        Ok(tolerance)
    } else {
        Err(ConfigError::Tolerance(tolerance))
    }
}

pub(crate) fn validate_margin(margin: f64) -> Result<f64, ConfigError> {
    if margin.is_finite() && margin >= 0.0 {
        Ok(margin)
    } else {
        Err(ConfigError::Margin(margin))
    }
}

pub(crate) fn validate_threshold(threshold: f64) -> Result<f64, ConfigError> {
    if threshold.is_finite() && threshold > 0.0 {
        Ok(threshold)
    } else {
        Err(ConfigError::Threshold(threshold))
    }
}

pub(crate) fn validate_start(x: f64) -> Result<f64, ConfigError> {
    if x.is_finite() {
        Ok(x)
    } else {
        Err(ConfigError::Start(x))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iterate_within_margin_is_accepted() {
        let bracket = Bracket::new(0.0, 1.0).unwrap();

        assert_eq!(check_iterate(0.5, 1.8, &bracket, 1.0), Ok(1.8));
        assert_eq!(
            check_iterate(0.5, 2.5, &bracket, 1.0),
            Err(DivergenceError::LeftBracket {
                x: 2.5,
                low: -1.0,
                high: 2.0
            })
        );
        assert_eq!(
            check_iterate(0.5, f64::NAN, &bracket, 1.0),
            Err(DivergenceError::NonFinite { x: 0.5 })
        );
    }

    #[test]
    fn validators_reject_bad_numbers() {
        assert!(validate_tolerance(0.0).is_err());
        assert!(validate_margin(-0.1).is_err());
        assert!(validate_margin(0.0).is_ok());
        assert!(validate_threshold(f64::INFINITY).is_err());
        assert!(validate_start(f64::NAN).is_err());
    }
}
