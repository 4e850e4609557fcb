//! Magnitudes for quantities
//!
//! A `Number` is either an exact rational (dashu-ratio `RBig`) or an
//! IEEE-754 double. Unit scale factors are kept exact so that chains such as
//! gallon -> quart -> pint -> cup compose without rounding. Anything that
//! touches a float (logarithmic scales, empirical formulas) becomes a float.

use std::cmp::Ordering;
use std::fmt;

use dashu_base::Approximation;
use dashu_int::{IBig, UBig};
use dashu_ratio::RBig;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Error type for number operations
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
pub enum NumberError {
    #[error("Invalid number format: {0}")]
    ParseError(String),

    #[error("Division by zero")]
    DivisionByZero,

    #[error("Domain error: {0}")]
    DomainError(String),
}

/// Largest |exponent| accepted by `Number::pow` for exact bases
pub const MAX_EXACT_POWER: u32 = 1024;

/// Largest |exponent| accepted in scientific notation, as in "1.5e10"
pub const MAX_DECIMAL_EXPONENT: i64 = 4096;

/// Exact rational or floating magnitude.
///
/// Arithmetic never panics. Exact op exact stays exact; mixing in a float
/// yields a float.
#[derive(Debug, Clone)]
pub enum Number {
    Exact(RBig),
    Approx(f64),
}

impl Number {
    // ========== Construction ==========

    /// Create from string representation
    /// Supports: "123", "3.14", "1/3", "1.5e10", "-42"
    ///
    /// Decimal strings are read exactly, so "0.0254" is 254/10000.
    pub fn from_str(s: &str) -> Result<Self, NumberError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(NumberError::ParseError(s.to_string()));
        }

        // Rational format "a/b"
        if let Some((num_str, den_str)) = s.split_once('/') {
            let num = parse_decimal(s, num_str.trim())?;
            let den = parse_decimal(s, den_str.trim())?;
            if den == RBig::ZERO {
                return Err(NumberError::DivisionByZero);
            }
            return Ok(Number::Exact(num / den));
        }

        parse_decimal(s, s).map(Number::Exact)
    }

    /// Create an exact integer
    pub fn from_i64(n: i64) -> Self {
        Number::Exact(RBig::from(IBig::from(n)))
    }

    /// Create an exact ratio `num / den` from constants.
    ///
    /// A zero denominator is a programming error: it trips a debug
    /// assertion, and release builds yield zero. Use [`Number::checked_ratio`]
    /// for denominators that are not literals.
    pub fn ratio(num: i64, den: i64) -> Self {
        debug_assert!(den != 0, "Number::ratio({}, 0)", num);
        Self::checked_ratio(num, den).unwrap_or_else(|_| Self::zero())
    }

    /// Create an exact ratio `num / den`
    pub fn checked_ratio(num: i64, den: i64) -> Result<Self, NumberError> {
        if den == 0 {
            return Err(NumberError::DivisionByZero);
        }
        let n = RBig::from(IBig::from(num));
        let d = RBig::from(IBig::from(den));
        Ok(Number::Exact(n / d))
    }

    /// Wrap a float. NaN and infinities are kept as-is; callers that need
    /// finite values check `is_finite`.
    pub fn from_f64(f: f64) -> Self {
        Number::Approx(f)
    }

    /// 0 as an exact number
    pub fn zero() -> Self {
        Number::Exact(RBig::ZERO)
    }

    /// 1 as an exact number
    pub fn one() -> Self {
        Number::Exact(RBig::ONE)
    }

    // ========== Predicates ==========

    pub fn is_exact(&self) -> bool {
        matches!(self, Number::Exact(_))
    }

    pub fn is_zero(&self) -> bool {
        match self {
            Number::Exact(r) => *r == RBig::ZERO,
            Number::Approx(f) => *f == 0.0,
        }
    }

    pub fn is_one(&self) -> bool {
        match self {
            Number::Exact(r) => *r == RBig::ONE,
            Number::Approx(f) => *f == 1.0,
        }
    }

    pub fn is_negative(&self) -> bool {
        match self {
            Number::Exact(r) => *r < RBig::ZERO,
            Number::Approx(f) => *f < 0.0,
        }
    }

    pub fn is_finite(&self) -> bool {
        match self {
            Number::Exact(_) => true,
            Number::Approx(f) => f.is_finite(),
        }
    }

    // ========== Basic Arithmetic ==========

    /// Addition
    pub fn add(&self, other: &Self) -> Self {
        match (self, other) {
            (Number::Exact(a), Number::Exact(b)) => Number::Exact(a + b),
            _ => Number::Approx(self.to_f64() + other.to_f64()),
        }
    }

    /// Subtraction
    pub fn sub(&self, other: &Self) -> Self {
        match (self, other) {
            (Number::Exact(a), Number::Exact(b)) => Number::Exact(a - b),
            _ => Number::Approx(self.to_f64() - other.to_f64()),
        }
    }

    /// Multiplication
    pub fn mul(&self, other: &Self) -> Self {
        match (self, other) {
            (Number::Exact(a), Number::Exact(b)) => Number::Exact(a * b),
            _ => Number::Approx(self.to_f64() * other.to_f64()),
        }
    }

    /// Safe division (returns Result, never panics)
    pub fn checked_div(&self, other: &Self) -> Result<Self, NumberError> {
        if other.is_zero() {
            return Err(NumberError::DivisionByZero);
        }
        Ok(match (self, other) {
            (Number::Exact(a), Number::Exact(b)) => Number::Exact(a / b),
            _ => Number::Approx(self.to_f64() / other.to_f64()),
        })
    }

    /// Negation
    pub fn neg(&self) -> Self {
        match self {
            Number::Exact(r) => Number::Exact(-r.clone()),
            Number::Approx(f) => Number::Approx(-f),
        }
    }

    /// Integer power (exact for exact bases)
    ///
    /// Exact bases reject exponents beyond `MAX_EXACT_POWER`.
    pub fn pow(&self, exp: i32) -> Result<Self, NumberError> {
        if exp == 0 {
            return Ok(Self::one());
        }
        if let Number::Approx(f) = self {
            return Ok(Number::Approx(f.powi(exp)));
        }
        if exp.unsigned_abs() > MAX_EXACT_POWER {
            return Err(NumberError::DomainError(format!(
                "exponent {} exceeds {} for an exact base",
                exp, MAX_EXACT_POWER
            )));
        }

        // square and multiply
        let mut result = Self::one();
        let mut base = self.clone();
        let mut n = exp.unsigned_abs();
        while n > 0 {
            if n & 1 == 1 {
                result = result.mul(&base);
            }
            n >>= 1;
            if n > 0 {
                base = base.mul(&base);
            }
        }

        if exp < 0 {
            Self::one().checked_div(&result)
        } else {
            Ok(result)
        }
    }

    // ========== Conversion ==========

    /// Nearest f64 (exact values are rounded)
    pub fn to_f64(&self) -> f64 {
        match self {
            Number::Exact(r) => match r.to_f64() {
                Approximation::Exact(f) => f,
                Approximation::Inexact(f, _) => f,
            },
            Number::Approx(f) => *f,
        }
    }

    /// Exact value if this number is exact
    pub fn as_rational(&self) -> Option<&RBig> {
        match self {
            Number::Exact(r) => Some(r),
            Number::Approx(_) => None,
        }
    }
}

/// Parse "12", "-3.25", "1.5e-3" into an exact rational. `input` is the
/// full string, reported in errors.
fn parse_decimal(input: &str, s: &str) -> Result<RBig, NumberError> {
    let invalid = || NumberError::ParseError(input.to_string());

    let (mantissa, exponent) = match s.find(|c: char| c == 'e' || c == 'E') {
        Some(pos) => (&s[..pos], s[pos + 1..].parse::<i64>().map_err(|_| invalid())?),
        None => (s, 0),
    };
    if exponent.unsigned_abs() > MAX_DECIMAL_EXPONENT.unsigned_abs() {
        return Err(NumberError::DomainError(format!(
            "exponent in {} exceeds {}",
            input, MAX_DECIMAL_EXPONENT
        )));
    }

    let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    if !frac_part.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid());
    }
    let digits = format!("{}{}", int_part, frac_part);
    if !digits.chars().any(|c| c.is_ascii_digit()) {
        return Err(invalid());
    }
    let digits = digits.strip_prefix('+').unwrap_or(&digits);
    let significand: IBig = digits.parse().map_err(|_| invalid())?;

    let scale = exponent - frac_part.len() as i64;
    let ten = UBig::from(10u8);
    if scale >= 0 {
        let factor = IBig::from(ten.pow(scale as usize));
        Ok(RBig::from(significand * factor))
    } else {
        Ok(RBig::from_parts(significand, ten.pow(scale.unsigned_abs() as usize)))
    }
}

// ========== Trait Implementations ==========

impl From<i64> for Number {
    fn from(n: i64) -> Self {
        Number::from_i64(n)
    }
}

impl From<f64> for Number {
    fn from(f: f64) -> Self {
        Number::from_f64(f)
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Exact(r) if *r.denominator() == UBig::ONE => write!(f, "{}", r.numerator()),
            Number::Exact(r) => write!(f, "{}/{}", r.numerator(), r.denominator()),
            Number::Approx(x) => write!(f, "{:?}", x),
        }
    }
}

/// Exact values serialize as "a/b" or "a"; floats carry a "~" tag so they
/// read back as floats, non-finite values included ("~NaN", "~-inf").
impl Serialize for Number {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Number::Exact(_) => serializer.serialize_str(&self.to_string()),
            Number::Approx(x) => serializer.serialize_str(&format!("~{:?}", x)),
        }
    }
}

impl<'de> Deserialize<'de> for Number {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        match s.strip_prefix('~') {
            Some(float) => float
                .parse::<f64>()
                .map(Number::Approx)
                .map_err(serde::de::Error::custom),
            None => Self::from_str(&s).map_err(serde::de::Error::custom),
        }
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Number::Exact(a), Number::Exact(b)) => a == b,
            _ => self.to_f64() == other.to_f64(),
        }
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Number::Exact(a), Number::Exact(b)) => Some(a.cmp(b)),
            _ => self.to_f64().partial_cmp(&other.to_f64()),
        }
    }
}
