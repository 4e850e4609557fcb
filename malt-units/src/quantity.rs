//! Quantity type - a value with an associated unit

use std::cmp::Ordering;
use std::fmt;
use serde::{Serialize, Deserialize};
use malt_core::Number;
use crate::{ConversionError, Dimension, Unit};

/// A physical quantity: a numeric value with an associated unit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quantity {
    /// The numeric value
    pub value: Number,
    /// The unit of measurement
    pub unit: Unit,
}

impl Quantity {
    /// Create a new quantity
    pub fn new(value: Number, unit: Unit) -> Self {
        Quantity { value, unit }
    }

    /// Create a dimensionless quantity (pure number)
    pub fn dimensionless(value: Number) -> Self {
        Quantity {
            value,
            unit: Unit::reference("1", "unity", Dimension::DIMENSIONLESS),
        }
    }

    /// Get the dimension of this quantity
    pub fn dimension(&self) -> Dimension {
        self.unit.dimension
    }

    /// Check if this is a dimensionless quantity
    pub fn is_dimensionless(&self) -> bool {
        self.unit.dimension.is_dimensionless()
    }

    /// Check if two quantities have compatible dimensions
    pub fn is_compatible(&self, other: &Quantity) -> bool {
        self.unit.is_compatible(&other.unit)
    }

    /// Get the value in the reference unit of its dimension
    pub fn reference_value(&self) -> Result<Number, ConversionError> {
        Ok(self.unit.to_reference(&self.value)?)
    }

    /// Convert to another unit of the same dimension
    pub fn convert_to(&self, target: &Unit) -> Result<Quantity, ConversionError> {
        let new_value = self.unit.convert_to(&self.value, target)?;
        Ok(Quantity::new(new_value, target.clone()))
    }

    fn check_additive(&self, other: &Quantity) -> Result<(), ConversionError> {
        if !self.is_compatible(other) {
            return Err(ConversionError::IncompatibleDimensions {
                from: other.unit.symbol.clone(),
                to: self.unit.symbol.clone(),
                from_dim: other.unit.dimension,
                to_dim: self.unit.dimension,
            });
        }
        if self.unit.is_logarithmic() {
            return Err(ConversionError::NonlinearCompound(self.unit.symbol.clone()));
        }
        Ok(())
    }

    /// Add two quantities (must have compatible dimensions)
    pub fn add(&self, other: &Quantity) -> Result<Quantity, ConversionError> {
        self.check_additive(other)?;
        // Convert other to same unit as self, then add
        let converted = other.convert_to(&self.unit)?;
        Ok(Quantity::new(self.value.add(&converted.value), self.unit.clone()))
    }

    /// Subtract two quantities (must have compatible dimensions)
    pub fn sub(&self, other: &Quantity) -> Result<Quantity, ConversionError> {
        self.check_additive(other)?;
        let converted = other.convert_to(&self.unit)?;
        Ok(Quantity::new(self.value.sub(&converted.value), self.unit.clone()))
    }

    /// Multiply two quantities (dimensions are multiplied)
    pub fn mul(&self, other: &Quantity) -> Result<Quantity, ConversionError> {
        let new_unit = self.unit.multiply(&other.unit)?;
        Ok(Quantity::new(self.value.mul(&other.value), new_unit))
    }

    /// Divide two quantities (dimensions are divided)
    pub fn div(&self, other: &Quantity) -> Result<Quantity, ConversionError> {
        let new_unit = self.unit.divide(&other.unit)?;
        let new_value = self.value.checked_div(&other.value)?;
        Ok(Quantity::new(new_value, new_unit))
    }

    /// Raise quantity to an integer power
    pub fn pow(&self, exp: i32) -> Result<Quantity, ConversionError> {
        let new_unit = self.unit.power(exp)?;
        Ok(Quantity::new(self.value.pow(exp)?, new_unit))
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.unit.symbol.is_empty() || self.unit.symbol == "1" {
            write!(f, "{}", self.value)
        } else {
            write!(f, "{} {}", self.value, self.unit.symbol)
        }
    }
}

/// Quantities compare through their reference values, so logarithmic and
/// affine units order by the amount they denote, not their magnitude.
impl PartialEq for Quantity {
    fn eq(&self, other: &Self) -> bool {
        self.partial_cmp(other) == Some(Ordering::Equal)
    }
}

impl PartialOrd for Quantity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if !self.is_compatible(other) {
            return None;
        }
        let lhs = self.reference_value().ok()?;
        let rhs = other.reference_value().ok()?;
        lhs.partial_cmp(&rhs)
    }
}
