//! Malt Units - Physical Quantity and Unit Conversion
//!
//! Provides unit-aware quantities with dimensional analysis.
//! The host table covers SI base units and a few common derived units;
//! extensions declare further dimensions and units through `UnitExtension`.
//!
//! Unit kinds:
//! - Reference (one coherent unit per dimension)
//! - Linear (m, km, L, %, ...)
//! - Affine (°C, °F)
//! - Logarithmic
//!
//! The table is installed once with `initialize`; parsing and conversion
//! fail with `ConversionError::NotInitialized` until then.

mod dimension;
mod error;
mod unit;
mod table;
mod units;
mod quantity;
mod convert;
mod parse;

pub use dimension::{Dimension, BASE_COUNT, EXTENSION_SLOTS, SI_BASE_COUNT};
pub use error::{ConversionError, DeclarationError, EquivalenceError};
pub use unit::{Scale, Unit, UnitKind, UnitRelation};
pub use table::{
    initialize, table, DimensionInfo, UnitDecl, UnitExtension, UnitTable, UnitTableBuilder,
};
pub use quantity::Quantity;
pub use convert::{convert, Equivalence};
pub use parse::{parse_conversion, parse_quantity, parse_unit, MAX_UNIT_POWER};
