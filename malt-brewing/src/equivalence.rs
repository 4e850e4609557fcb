//! The Brewing equivalence: conversions between dimensions that are not
//! linearly related
//!
//! | source        | target        | rule                         |
//! |---------------|---------------|------------------------------|
//! | dimensionless | density       | value × 1 kg/L               |
//! | density       | dimensionless | value in kg/L                |
//! | dimensionless | sugar content | `gu_to_plato`, result in °P  |
//! | sugar content | dimensionless | `plato_to_gu`, result in gu  |

use std::fmt;

use tracing::trace;

use malt_core::Number;
use malt_units::{table, Dimension, Equivalence, EquivalenceError, Quantity, Unit, UnitTable};

use crate::dimensions::SUGAR_CONTENT;

/// gu coefficient of the gravity to Plato quadratic
pub const PLATO_PER_GU: f64 = 0.25802;

/// gu² coefficient of the gravity to Plato quadratic
pub const PLATO_PER_GU_SQUARED: f64 = 0.00020535;

/// Vertex of the gravity to Plato parabola, in gu
const GU_VERTEX: f64 = 628.2444606768931;

/// 1 / PLATO_PER_GU_SQUARED
const GU_DISCRIMINANT_SLOPE: f64 = 4869.734599464329;

/// Degrees Plato for a gravity in gravity units.
pub fn gu_to_plato(gu: f64) -> f64 {
    PLATO_PER_GU * gu - PLATO_PER_GU_SQUARED * gu.powi(2)
}

/// Gravity units for a sugar content in degrees Plato; inverse of
/// [`gu_to_plato`] on its rising branch.
///
/// Above roughly 81 °P the quadratic has no real root and the vertex
/// (628.24 gu) is returned. That value has no physical meaning.
pub fn plato_to_gu(plato: f64) -> f64 {
    let discriminant = GU_VERTEX * GU_VERTEX - GU_DISCRIMINANT_SLOPE * plato;
    if discriminant >= 0.0 {
        GU_VERTEX - discriminant.sqrt()
    } else {
        GU_VERTEX
    }
}

/// Dimension families the Brewing equivalence distinguishes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Family {
    Dimensionless,
    Density,
    SugarContent,
    Other,
}

impl Family {
    fn of(dimension: &Dimension, sugar_content: Option<Dimension>) -> Self {
        if dimension.is_dimensionless() {
            Family::Dimensionless
        } else if *dimension == Dimension::DENSITY {
            Family::Density
        } else if Some(*dimension) == sugar_content {
            Family::SugarContent
        } else {
            Family::Other
        }
    }
}

/// Conversion context for brewing quantities.
///
/// Pass `Some(&Brewing)` to [`malt_units::convert`] to allow conversions
/// between gravity, sugar content and mass concentration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Brewing;

impl Brewing {
    fn numeric(&self, reason: impl fmt::Display) -> EquivalenceError {
        EquivalenceError::Numeric {
            context: self.name().to_string(),
            reason: reason.to_string(),
        }
    }

    fn unit(&self, table: &UnitTable, expr: &str) -> Result<Unit, EquivalenceError> {
        table.parse_unit(expr).map_err(|e| self.numeric(e))
    }

    /// Magnitude of `source` expressed in `unit`
    fn value_in(&self, source: &Quantity, unit: &Unit) -> Result<Number, EquivalenceError> {
        source
            .convert_to(unit)
            .map(|q| q.value)
            .map_err(|e| self.numeric(e))
    }
}

impl Equivalence for Brewing {
    fn name(&self) -> &'static str {
        "Brewing"
    }

    fn resolve(&self, target: &Dimension, source: &Quantity) -> Result<Quantity, EquivalenceError> {
        let table = table().map_err(|e| self.numeric(e))?;
        let sugar_content = table.dimension_named(SUGAR_CONTENT);
        let from = Family::of(&source.dimension(), sugar_content);
        let to = Family::of(target, sugar_content);
        trace!(?from, ?to, source = %source, "brewing equivalence");

        match (from, to) {
            (Family::Dimensionless, Family::Density) => {
                let kg_per_liter = self.unit(table, "kg/L")?;
                let fraction = self.value_in(source, &self.unit(table, "1")?)?;
                Ok(Quantity::new(fraction, kg_per_liter))
            }
            (Family::Density, Family::Dimensionless) => {
                let fraction = self.value_in(source, &self.unit(table, "kg/L")?)?;
                Ok(Quantity::new(fraction, self.unit(table, "1")?))
            }
            (Family::Dimensionless, Family::SugarContent) => {
                let gu = self.value_in(source, &self.unit(table, "gu")?)?.to_f64();
                let plato = Number::from_f64(gu_to_plato(gu));
                Ok(Quantity::new(plato, self.unit(table, "°P")?))
            }
            (Family::SugarContent, Family::Dimensionless) => {
                let plato = self.value_in(source, &self.unit(table, "°P")?)?.to_f64();
                let gu = Number::from_f64(plato_to_gu(plato));
                Ok(Quantity::new(gu, self.unit(table, "gu")?))
            }
            _ => Err(EquivalenceError::Unsupported {
                context: self.name().to_string(),
                from: source.dimension(),
                to: *target,
            }),
        }
    }
}
