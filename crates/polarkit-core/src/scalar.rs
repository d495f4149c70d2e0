//! Numeric helpers for label precision and scaling decisions.
//!
//! All functions are pure and total: degenerate input (equal endpoints,
//! zero or non-finite ranges) yields a neutral answer rather than a panic.

use crate::constants::{LABEL_EXPONENT_CUT_MAX, LABEL_EXPONENT_CUT_MIN, MAXIMUM_LABEL_DIGITS};

/// Truncate toward zero.
#[inline]
pub fn ffix(value: f64) -> f64 {
    value.trunc()
}

/// Magnitude of `value` carrying the sign of `sign`.
///
/// A zero `sign` counts as positive.
#[inline]
pub fn fsign(value: f64, sign: f64) -> f64 {
    let magnitude = value.abs();
    if sign < 0.0 {
        -magnitude
    } else {
        magnitude
    }
}

/// The larger of two values.
#[inline]
pub fn max_of(a: f64, b: f64) -> f64 {
    if a > b {
        a
    } else {
        b
    }
}

/// Decimals needed to tell `min` and `max` apart.
///
/// Ranges of ten or more need no decimals; smaller ranges get one digit
/// more than their order of magnitude, capped at five.
pub fn digits(min: f64, max: f64) -> usize {
    let range = max - min;
    if !range.is_finite() || range <= 0.0 {
        return 0;
    }

    let pow10 = range.log10().floor() as i32;
    let past_decimal = -pow10;
    if past_decimal < 0 {
        0
    } else {
        (past_decimal + 1).min(MAXIMUM_LABEL_DIGITS) as usize
    }
}

/// Power of ten that brings `[min, max]` into a readable magnitude.
///
/// Returns 0 while the larger magnitude lies within `[10^-1.5, 10^3]`;
/// outside that window the exponent is rounded down to a multiple of three.
pub fn label_exponent(min: f64, max: f64) -> i32 {
    if min == max {
        return 0;
    }

    let range = max_of(min.abs(), max.abs());
    if !range.is_finite() || range <= 0.0 {
        return 0;
    }

    let cut_min = 10f64.powf(LABEL_EXPONENT_CUT_MIN);
    let cut_max = 10f64.powf(LABEL_EXPONENT_CUT_MAX);
    if (cut_min..=cut_max).contains(&range) {
        return 0;
    }

    let pow10 = range.log10().floor() as i32;
    pow10.div_euclid(3) * 3
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ffix_truncates_toward_zero() {
        assert_eq!(ffix(2.7), 2.0);
        assert_eq!(ffix(-2.7), -2.0);
        assert_eq!(ffix(0.0), 0.0);
    }

    #[test]
    fn test_fsign() {
        assert_eq!(fsign(3.0, -1.0), -3.0);
        assert_eq!(fsign(-3.0, 2.0), 3.0);
        assert_eq!(fsign(-3.0, 0.0), 3.0);
    }

    #[test]
    fn test_max_of() {
        assert_eq!(max_of(1.0, 2.0), 2.0);
        assert_eq!(max_of(-1.0, -2.0), -1.0);
    }

    #[test]
    fn test_digits() {
        assert_eq!(digits(0.0, 100.0), 0);
        assert_eq!(digits(0.0, 10.0), 0);
        assert_eq!(digits(0.0, 2.5), 1);
        assert_eq!(digits(0.0, 0.25), 2);
        assert_eq!(digits(0.0, 1.0e-9), 5);
        assert_eq!(digits(1.0, 1.0), 0);
        assert_eq!(digits(2.0, 1.0), 0);
    }

    #[test]
    fn test_label_exponent() {
        assert_eq!(label_exponent(0.0, 10.0), 0);
        assert_eq!(label_exponent(0.0, 900.0), 0);
        assert_eq!(label_exponent(0.0, 25_000.0), 3);
        assert_eq!(label_exponent(0.0, 2.0e7), 6);
        assert_eq!(label_exponent(0.0, 0.002), -3);
        assert_eq!(label_exponent(0.0, 2.0e-5), -6);
        assert_eq!(label_exponent(5.0, 5.0), 0);
    }
}
