use polarkit_core::{digits, ffix, fsign, label_exponent, max_of, LabelFormat};
use proptest::prelude::*;

proptest! {
    #[test]
    fn prop_ffix_never_grows_magnitude(x in -1.0e9f64..1.0e9) {
        let t = ffix(x);
        prop_assert!(t.abs() <= x.abs());
        prop_assert!((x - t).abs() < 1.0);
        prop_assert_eq!(t.fract(), 0.0);
    }

    #[test]
    fn prop_fsign_takes_sign_keeps_magnitude(v in -1.0e6f64..1.0e6, s in -1.0e6f64..1.0e6) {
        let r = fsign(v, s);
        prop_assert_eq!(r.abs(), v.abs());
        if s < 0.0 && v != 0.0 {
            prop_assert!(r < 0.0);
        } else {
            prop_assert!(r >= 0.0);
        }
    }

    #[test]
    fn prop_max_of_is_an_upper_bound(a in -1.0e6f64..1.0e6, b in -1.0e6f64..1.0e6) {
        let m = max_of(a, b);
        prop_assert!(m >= a && m >= b);
        prop_assert!(m == a || m == b);
    }

    #[test]
    fn prop_digits_bounded(min in -1.0e6f64..1.0e6, len in 0.0f64..1.0e6) {
        prop_assert!(digits(min, min + len) <= 5);
    }

    #[test]
    fn prop_label_exponent_is_engineering(max in 1.0e-12f64..1.0e12) {
        let e = label_exponent(0.0, max);
        prop_assert_eq!(e.rem_euclid(3), 0);
        let scaled = max / 10f64.powi(e);
        prop_assert!(scaled < 1.0e3 + 1.0e-9);
        prop_assert!(scaled >= 10f64.powf(-1.5) - 1.0e-12);
    }

    #[test]
    fn prop_fixed_format_has_requested_decimals(v in -1.0e6f64..1.0e6, decimals in 0usize..6) {
        let out = LabelFormat::fixed(decimals).format(v);
        match out.split_once('.') {
            Some((_, fraction)) => prop_assert_eq!(fraction.len(), decimals),
            None => prop_assert_eq!(decimals, 0),
        }
    }
}
