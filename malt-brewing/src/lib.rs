//! Malt Brewing - brewing units and conversions
//!
//! Adds brewing dimensions (color, diastatic power, bitterness, sugar
//! content) and units to the Malt unit table, plus the `Brewing`
//! equivalence for conversions between gravity, sugar content and mass
//! concentration.
//!
//! Call [`initialize`] once at startup before parsing or converting:
//!
//! ```no_run
//! use malt_brewing::Brewing;
//! use malt_units::{convert, parse_quantity, parse_unit};
//!
//! malt_brewing::initialize()?;
//! let gravity = parse_quantity("1.040 sg")?;
//! let plato = convert(&parse_unit("°P")?, &gravity, Some(&Brewing))?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod dimensions;
mod equivalence;
mod units;

pub use equivalence::{gu_to_plato, plato_to_gu, Brewing, PLATO_PER_GU, PLATO_PER_GU_SQUARED};
pub use units::BREWING_SYMBOLS;

use malt_units::{DeclarationError, UnitExtension, UnitTable, UnitTableBuilder};
use tracing::info;

/// Brewing dimensions and units as a unit table extension
#[derive(Debug, Clone, Copy, Default)]
pub struct BrewingExtension;

impl UnitExtension for BrewingExtension {
    fn name(&self) -> &'static str {
        "brewing"
    }

    fn declare(&self, builder: &mut UnitTableBuilder) -> Result<(), DeclarationError> {
        let dims = dimensions::declare(builder)?;
        units::declare(builder, &dims)?;
        info!(units = BREWING_SYMBOLS.len(), dimensions = 4, "brewing units declared");
        Ok(())
    }
}

/// Install the unit table with the brewing extension.
///
/// Safe to call from several threads and more than once; the table is built
/// exactly once and every call returns the same outcome. Fails with
/// `DeclarationError::AlreadyInitialized` if the table was installed
/// without the brewing units.
pub fn initialize() -> Result<&'static UnitTable, DeclarationError> {
    malt_units::initialize(&[&BrewingExtension])
}

/// Symbols of every brewing unit, in declaration order
pub fn symbols() -> impl Iterator<Item = &'static str> {
    BREWING_SYMBOLS.iter().map(|(symbol, _)| *symbol)
}
