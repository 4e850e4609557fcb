//! Malt Core - Fundamental types
//!
//! This crate provides the numeric type shared by the Malt crates:
//! - `Number`: exact rationals for unit factors, floats for empirical formulas
//! - `NumberError`: failures of checked arithmetic and parsing

mod number;

pub use number::{Number, NumberError, MAX_DECIMAL_EXPONENT, MAX_EXACT_POWER};

#[cfg(test)]
mod tests {
    use super::*;

    mod number_tests {
        use super::*;

        #[test]
        fn test_from_i64() {
            let n = Number::from_i64(42);
            assert!(n.is_exact());
            assert_eq!(n.to_f64(), 42.0);
        }

        #[test]
        fn test_from_str_integer() {
            let n = Number::from_str("123").unwrap();
            assert_eq!(n, Number::from_i64(123));
        }

        #[test]
        fn test_from_str_decimal_is_exact() {
            let n = Number::from_str("0.0254").unwrap();
            assert!(n.is_exact());
            assert_eq!(n, Number::ratio(254, 10000));
        }

        #[test]
        fn test_from_str_fraction() {
            let n = Number::from_str("2000/197").unwrap();
            assert_eq!(n, Number::ratio(2000, 197));
            assert_eq!(n.to_string(), "2000/197");
        }

        #[test]
        fn test_from_str_scientific() {
            assert_eq!(Number::from_str("1e-6").unwrap(), Number::ratio(1, 1_000_000));
            assert_eq!(Number::from_str("1.5E3").unwrap(), Number::from_i64(1500));
            assert_eq!(Number::from_str("-2.5").unwrap(), Number::ratio(-5, 2));
        }

        #[test]
        fn test_from_str_invalid() {
            assert!(Number::from_str("abc").is_err());
            assert!(Number::from_str("").is_err());
            assert!(Number::from_str("-").is_err());
            assert_eq!(Number::from_str("1/0"), Err(NumberError::DivisionByZero));
        }

        #[test]
        fn test_exact_arithmetic() {
            let a = Number::ratio(1, 3);
            let b = Number::ratio(2, 3);
            assert_eq!(a.add(&b), Number::one());
            assert_eq!(b.sub(&a), a);
            assert_eq!(a.mul(&Number::from_i64(3)), Number::one());
            assert_eq!(a.checked_div(&b).unwrap(), Number::ratio(1, 2));
        }

        #[test]
        fn test_mixed_arithmetic_is_approx() {
            let exact = Number::ratio(1, 4);
            let approx = Number::from_f64(0.5);
            let sum = exact.add(&approx);
            assert!(!sum.is_exact());
            assert_eq!(sum.to_f64(), 0.75);
        }

        #[test]
        fn test_division_by_zero() {
            let result = Number::one().checked_div(&Number::zero());
            assert_eq!(result, Err(NumberError::DivisionByZero));
        }

        #[test]
        fn test_pow() {
            assert_eq!(Number::ratio(1, 2).pow(3).unwrap(), Number::ratio(1, 8));
            assert_eq!(Number::from_i64(10).pow(-2).unwrap(), Number::ratio(1, 100));
            assert_eq!(Number::from_i64(7).pow(0).unwrap(), Number::one());
            assert!(Number::zero().pow(-1).is_err());
            assert_eq!(Number::from_i64(2).pow(64).unwrap().to_string(), "18446744073709551616");
            assert_eq!(Number::from_i64(-3).pow(5).unwrap(), Number::from_i64(-243));
        }

        #[test]
        fn test_pow_rejects_huge_exponents() {
            let km = Number::from_i64(1000);
            assert!(matches!(km.pow(1_000_000_000), Err(NumberError::DomainError(_))));
            assert!(matches!(km.pow(i32::MIN), Err(NumberError::DomainError(_))));
            assert!(km.pow(MAX_EXACT_POWER as i32).is_ok());
            // floats have no size problem
            assert_eq!(Number::from_f64(1.0).pow(i32::MAX).unwrap().to_f64(), 1.0);
        }

        #[test]
        fn test_from_str_rejects_huge_exponents() {
            assert!(matches!(
                Number::from_str("1e999999999"),
                Err(NumberError::DomainError(_))
            ));
            assert!(matches!(
                Number::from_str("1/1e-99999"),
                Err(NumberError::DomainError(_))
            ));
            assert!(matches!(
                Number::from_str("1e99999999999999999999"),
                Err(NumberError::ParseError(_))
            ));
            let limit = format!("1e{}", MAX_DECIMAL_EXPONENT);
            assert!(Number::from_str(&limit).is_ok());
        }

        #[test]
        fn test_checked_ratio() {
            assert_eq!(Number::checked_ratio(3, 6), Ok(Number::ratio(1, 2)));
            assert_eq!(Number::checked_ratio(1, 0), Err(NumberError::DivisionByZero));
        }

        #[test]
        #[cfg(debug_assertions)]
        #[should_panic(expected = "Number::ratio(7, 0)")]
        fn test_ratio_zero_denominator_asserts() {
            let _ = Number::ratio(7, 0);
        }

        #[test]
        fn test_ordering() {
            assert!(Number::ratio(1, 3) < Number::ratio(1, 2));
            assert!(Number::from_f64(0.4) < Number::ratio(1, 2));
            assert!(Number::from_i64(-1).is_negative());
        }

        #[test]
        fn test_display() {
            assert_eq!(Number::from_i64(42).to_string(), "42");
            assert_eq!(Number::ratio(-1, 3).to_string(), "-1/3");
            assert_eq!(Number::from_f64(1.5).to_string(), "1.5");
        }

        #[test]
        fn test_serde_as_string() {
            let json = serde_json::to_string(&Number::ratio(100, 197)).unwrap();
            assert_eq!(json, "\"100/197\"");
            let back: Number = serde_json::from_str(&json).unwrap();
            assert_eq!(back, Number::ratio(100, 197));
        }

        #[test]
        fn test_serde_keeps_floats() {
            let json = serde_json::to_string(&Number::from_f64(0.1)).unwrap();
            assert_eq!(json, "\"~0.1\"");
            let back: Number = serde_json::from_str(&json).unwrap();
            assert!(!back.is_exact());
            assert_eq!(back.to_f64(), 0.1);

            for special in [f64::INFINITY, f64::NEG_INFINITY] {
                let json = serde_json::to_string(&Number::from_f64(special)).unwrap();
                let back: Number = serde_json::from_str(&json).unwrap();
                assert_eq!(back.to_f64(), special);
            }
            let json = serde_json::to_string(&Number::from_f64(f64::NAN)).unwrap();
            let back: Number = serde_json::from_str(&json).unwrap();
            assert!(back.to_f64().is_nan());
            assert!(serde_json::from_str::<Number>("\"~abc\"").is_err());
        }
    }
}
