//! Unit representation with conversion scales

use std::fmt;
use serde::{Serialize, Deserialize};
use malt_core::{Number, NumberError};
use crate::{ConversionError, DeclarationError, Dimension};

/// How a declared unit relates to its parent unit.
///
/// `v` is a value in the declared unit, `p` the same amount in the parent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum UnitRelation {
    /// The coherent unit of its dimension
    Reference,
    /// p = factor · v
    Linear { parent: &'static str, factor: Number },
    /// p = scale · v + offset
    Affine {
        parent: &'static str,
        scale: Number,
        offset: Number,
    },
    /// p = base^(v / multiplier); the parent must not be logarithmic
    Logarithmic {
        parent: &'static str,
        base: f64,
        multiplier: f64,
    },
}

impl UnitRelation {
    /// Symbol of the parent unit, `None` for reference units
    pub fn parent(&self) -> Option<&'static str> {
        match self {
            UnitRelation::Reference => None,
            UnitRelation::Linear { parent, .. }
            | UnitRelation::Affine { parent, .. }
            | UnitRelation::Logarithmic { parent, .. } => Some(*parent),
        }
    }
}

/// Which kind of relation a unit was declared with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnitKind {
    Reference,
    Linear,
    Affine,
    Logarithmic,
    /// Product, quotient or power of linear units
    Compound,
}

/// Flattened transform from a unit to its dimension's reference unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Scale {
    /// reference = factor · v + offset
    Affine { factor: Number, offset: Number },
    /// reference = factor · base^(v / multiplier) + offset
    Logarithmic {
        base: f64,
        multiplier: f64,
        factor: Number,
        offset: Number,
    },
}

impl Scale {
    fn identity() -> Self {
        Scale::Affine {
            factor: Number::one(),
            offset: Number::zero(),
        }
    }
}

/// Represents a physical unit with its dimension and conversion scale
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    /// The unit symbol (e.g., "m", "kg", "°P")
    pub symbol: String,
    /// The unit name (e.g., "meter", "kilogram", "degree Plato")
    pub name: String,
    /// The dimensional signature
    pub dimension: Dimension,
    /// How the unit was declared
    pub kind: UnitKind,
    /// Transform to the reference unit of `dimension`
    pub scale: Scale,
}

impl Unit {
    /// Create the reference unit of a dimension
    pub fn reference(symbol: &str, name: &str, dimension: Dimension) -> Self {
        Unit {
            symbol: symbol.to_string(),
            name: name.to_string(),
            dimension,
            kind: UnitKind::Reference,
            scale: Scale::identity(),
        }
    }

    /// Create a unit from its parent by composing the parent's scale with `relation`
    pub fn derived(
        symbol: &str,
        name: &str,
        parent: &Unit,
        relation: &UnitRelation,
    ) -> Result<Self, DeclarationError> {
        let (factor, offset) = match &parent.scale {
            Scale::Affine { factor, offset } => (factor, offset),
            Scale::Logarithmic { .. } => {
                return Err(DeclarationError::LogarithmicParent {
                    symbol: symbol.to_string(),
                    parent: parent.symbol.clone(),
                })
            }
        };

        let (kind, scale) = match relation {
            UnitRelation::Reference => {
                return Err(DeclarationError::Malformed {
                    symbol: symbol.to_string(),
                    reason: "a reference unit has no parent".to_string(),
                })
            }
            UnitRelation::Linear { factor: f, .. } => (
                UnitKind::Linear,
                Scale::Affine {
                    factor: factor.mul(f),
                    offset: offset.clone(),
                },
            ),
            UnitRelation::Affine { scale: s, offset: o, .. } => (
                UnitKind::Affine,
                Scale::Affine {
                    factor: factor.mul(s),
                    offset: factor.mul(o).add(offset),
                },
            ),
            UnitRelation::Logarithmic { base, multiplier, .. } => (
                UnitKind::Logarithmic,
                Scale::Logarithmic {
                    base: *base,
                    multiplier: *multiplier,
                    factor: factor.clone(),
                    offset: offset.clone(),
                },
            ),
        };

        Ok(Unit {
            symbol: symbol.to_string(),
            name: name.to_string(),
            dimension: parent.dimension,
            kind,
            scale,
        })
    }

    /// Check if this is the coherent reference unit
    pub fn is_reference(&self) -> bool {
        self.kind == UnitKind::Reference
    }

    /// Check if conversion to the reference unit is a pure multiplication
    pub fn is_linear(&self) -> bool {
        matches!(&self.scale, Scale::Affine { offset, .. } if offset.is_zero())
    }

    pub fn is_logarithmic(&self) -> bool {
        matches!(self.scale, Scale::Logarithmic { .. })
    }

    /// Reference units per one of this unit, for linear units
    pub fn factor(&self) -> Option<&Number> {
        match &self.scale {
            Scale::Affine { factor, offset } if offset.is_zero() => Some(factor),
            _ => None,
        }
    }

    /// Check if two units are dimensionally compatible (can be converted)
    pub fn is_compatible(&self, other: &Unit) -> bool {
        self.dimension == other.dimension
    }

    /// Convert a value from this unit to the reference unit
    pub fn to_reference(&self, value: &Number) -> Result<Number, NumberError> {
        match &self.scale {
            Scale::Affine { factor, offset } => Ok(value.mul(factor).add(offset)),
            Scale::Logarithmic { base, multiplier, factor, offset } => {
                let power = base.powf(value.to_f64() / multiplier);
                if !power.is_finite() {
                    return Err(NumberError::DomainError(format!(
                        "{} {} overflows the reference unit",
                        value, self.symbol
                    )));
                }
                Ok(Number::from_f64(power).mul(factor).add(offset))
            }
        }
    }

    /// Convert a value from the reference unit to this unit
    pub fn from_reference(&self, value: &Number) -> Result<Number, NumberError> {
        match &self.scale {
            Scale::Affine { factor, offset } => value.sub(offset).checked_div(factor),
            Scale::Logarithmic { base, multiplier, factor, offset } => {
                let argument = value.sub(offset).checked_div(factor)?.to_f64();
                if argument <= 0.0 || !argument.is_finite() {
                    return Err(NumberError::DomainError(format!(
                        "{} is undefined for {}",
                        self.symbol, argument
                    )));
                }
                Ok(Number::from_f64(multiplier * argument.ln() / base.ln()))
            }
        }
    }

    /// Convert a value from this unit to another unit of the same dimension
    pub fn convert_to(&self, value: &Number, target: &Unit) -> Result<Number, ConversionError> {
        if !self.is_compatible(target) {
            return Err(ConversionError::IncompatibleDimensions {
                from: self.symbol.clone(),
                to: target.symbol.clone(),
                from_dim: self.dimension,
                to_dim: target.dimension,
            });
        }
        if self.symbol == target.symbol {
            return Ok(value.clone());
        }

        let reference = self.to_reference(value)?;
        Ok(target.from_reference(&reference)?)
    }

    fn overflow(&self, op: &str, other: impl fmt::Display) -> ConversionError {
        ConversionError::DimensionOverflow(format!("{}{}{}", self.symbol, op, other))
    }

    fn linear_factor(&self) -> Result<&Number, ConversionError> {
        self.factor()
            .ok_or_else(|| ConversionError::NonlinearCompound(self.symbol.clone()))
    }

    /// Multiply two units (e.g., m * m -> m^2)
    pub fn multiply(&self, other: &Unit) -> Result<Unit, ConversionError> {
        let factor = self.linear_factor()?.mul(other.linear_factor()?);
        let dimension = self
            .dimension
            .checked_multiply(&other.dimension)
            .ok_or_else(|| self.overflow("·", &other.symbol))?;
        Ok(Unit {
            symbol: format!("{}·{}", self.symbol, other.symbol),
            name: format!("{} {}", self.name, other.name),
            dimension,
            kind: UnitKind::Compound,
            scale: Scale::Affine { factor, offset: Number::zero() },
        })
    }

    /// Divide two units (e.g., kg / L -> kg/L)
    pub fn divide(&self, other: &Unit) -> Result<Unit, ConversionError> {
        let factor = self.linear_factor()?.checked_div(other.linear_factor()?)?;
        let dimension = self
            .dimension
            .checked_divide(&other.dimension)
            .ok_or_else(|| self.overflow("/", &other.symbol))?;
        Ok(Unit {
            symbol: format!("{}/{}", self.symbol, other.symbol),
            name: format!("{} per {}", self.name, other.name),
            dimension,
            kind: UnitKind::Compound,
            scale: Scale::Affine { factor, offset: Number::zero() },
        })
    }

    /// Raise unit to a power (e.g., m^2, m^3)
    pub fn power(&self, exp: i32) -> Result<Unit, ConversionError> {
        if exp == 1 {
            return Ok(self.clone());
        }
        let dimension = self
            .dimension
            .checked_power(exp)
            .ok_or_else(|| self.overflow("^", exp))?;
        let factor = self.linear_factor()?.pow(exp)?;
        Ok(Unit {
            symbol: format!("{}^{}", self.symbol, exp),
            name: format!("{} to the {}", self.name, exp),
            dimension,
            kind: UnitKind::Compound,
            scale: Scale::Affine { factor, offset: Number::zero() },
        })
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meter() -> Unit {
        Unit::reference("m", "meter", Dimension::LENGTH)
    }

    fn kilometer() -> Unit {
        let relation = UnitRelation::Linear { parent: "m", factor: Number::from_i64(1000) };
        Unit::derived("km", "kilometer", &meter(), &relation).unwrap()
    }

    fn second() -> Unit {
        Unit::reference("s", "second", Dimension::TIME)
    }

    fn kelvin() -> Unit {
        Unit::reference("K", "kelvin", Dimension::TEMPERATURE)
    }

    fn celsius() -> Unit {
        let relation = UnitRelation::Affine {
            parent: "K",
            scale: Number::one(),
            offset: Number::ratio(27315, 100),
        };
        Unit::derived("°C", "degree Celsius", &kelvin(), &relation).unwrap()
    }

    fn fahrenheit() -> Unit {
        let relation = UnitRelation::Affine {
            parent: "°C",
            scale: Number::ratio(5, 9),
            offset: Number::ratio(-160, 9),
        };
        Unit::derived("°F", "degree Fahrenheit", &celsius(), &relation).unwrap()
    }

    fn bel() -> Unit {
        let unity = Unit::reference("1", "unity", Dimension::DIMENSIONLESS);
        let relation = UnitRelation::Logarithmic { parent: "1", base: 10.0, multiplier: 1.0 };
        Unit::derived("B", "bel", &unity, &relation).unwrap()
    }

    #[test]
    fn test_reference_unit() {
        assert!(meter().is_reference());
        assert!(!kilometer().is_reference());
        assert!(kilometer().is_linear());
    }

    #[test]
    fn test_compatible_units() {
        assert!(meter().is_compatible(&kilometer()));
        assert!(!meter().is_compatible(&second()));
    }

    #[test]
    fn test_to_reference() {
        let value = kilometer().to_reference(&Number::from_i64(5)).unwrap();
        assert_eq!(value, Number::from_i64(5000));
    }

    #[test]
    fn test_unit_conversion() {
        let converted = meter()
            .convert_to(&Number::from_i64(5000), &kilometer())
            .unwrap();
        assert_eq!(converted, Number::from_i64(5));
    }

    #[test]
    fn test_incompatible_conversion() {
        let result = meter().convert_to(&Number::one(), &second());
        assert!(matches!(result, Err(ConversionError::IncompatibleDimensions { .. })));
    }

    #[test]
    fn test_affine_chain_composes() {
        let f = fahrenheit();
        assert!(!f.is_linear());
        // 32 °F = 0 °C = 273.15 K, exactly
        let k = f.to_reference(&Number::from_i64(32)).unwrap();
        assert_eq!(k, Number::ratio(27315, 100));
        let c = f.convert_to(&Number::from_i64(212), &celsius()).unwrap();
        assert_eq!(c, Number::from_i64(100));
    }

    #[test]
    fn test_logarithmic_unit() {
        let b = bel();
        assert!(b.is_logarithmic());
        let r = b.to_reference(&Number::from_i64(2)).unwrap();
        assert!((r.to_f64() - 100.0).abs() < 1e-9);
        let back = b.from_reference(&Number::from_i64(1000)).unwrap();
        assert!((back.to_f64() - 3.0).abs() < 1e-12);
        assert!(b.from_reference(&Number::zero()).is_err());
    }

    #[test]
    fn test_logarithmic_parent_rejected() {
        let relation = UnitRelation::Linear { parent: "B", factor: Number::from_i64(10) };
        let result = Unit::derived("dB", "decibel", &bel(), &relation);
        assert!(matches!(result, Err(DeclarationError::LogarithmicParent { .. })));
    }

    #[test]
    fn test_unit_power() {
        let m2 = meter().power(2).unwrap();
        assert_eq!(m2.symbol, "m^2");
        assert_eq!(m2.dimension, Dimension::AREA);
        assert_eq!(kilometer().power(2).unwrap().factor(), Some(&Number::from_i64(1_000_000)));
    }

    #[test]
    fn test_unit_power_bounds() {
        let m2 = meter().power(2).unwrap();
        assert!(matches!(m2.power(i32::MAX), Err(ConversionError::DimensionOverflow(_))));
        assert!(matches!(
            kilometer().power(i32::MIN),
            Err(ConversionError::Number(NumberError::DomainError(_)))
        ));

        let huge = Unit { dimension: Dimension::LENGTH.power(i32::MAX), ..meter() };
        assert!(matches!(huge.multiply(&meter()), Err(ConversionError::DimensionOverflow(_))));
        assert!(matches!(
            huge.divide(&meter().power(-1).unwrap()),
            Err(ConversionError::DimensionOverflow(_))
        ));
    }

    #[test]
    fn test_unit_divide() {
        let velocity = meter().divide(&second()).unwrap();
        assert_eq!(velocity.dimension, Dimension::VELOCITY);
        assert_eq!(velocity.kind, UnitKind::Compound);
    }

    #[test]
    fn test_nonlinear_compound_rejected() {
        assert_eq!(
            celsius().multiply(&meter()),
            Err(ConversionError::NonlinearCompound("°C".to_string()))
        );
        assert!(bel().power(2).is_err());
    }
}
