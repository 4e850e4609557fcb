//! Brewing base dimensions

use malt_units::{table, ConversionError, DeclarationError, Dimension, UnitTableBuilder};

pub const COLOR: &str = "Color";
pub const DIASTATIC_POWER: &str = "DiastaticPower";
pub const BITTERNESS: &str = "Bitterness";
pub const SUGAR_CONTENT: &str = "SugarContent";

/// Dimensions handed out by the builder while declaring brewing units
#[derive(Debug, Clone, Copy)]
pub(crate) struct BrewingDimensions {
    pub color: Dimension,
    pub diastatic_power: Dimension,
    pub bitterness: Dimension,
    pub sugar_content: Dimension,
}

pub(crate) fn declare(builder: &mut UnitTableBuilder) -> Result<BrewingDimensions, DeclarationError> {
    Ok(BrewingDimensions {
        color: builder.declare_dimension(COLOR, "C")?,
        diastatic_power: builder.declare_dimension(DIASTATIC_POWER, "DP")?,
        bitterness: builder.declare_dimension(BITTERNESS, "B")?,
        sugar_content: builder.declare_dimension(SUGAR_CONTENT, "S")?,
    })
}

fn installed(name: &str) -> Result<Dimension, ConversionError> {
    table()?
        .dimension_named(name)
        .ok_or(ConversionError::NotInitialized)
}

/// Beer color (SRM, EBC, °L)
pub fn color() -> Result<Dimension, ConversionError> {
    installed(COLOR)
}

/// Enzymatic strength of malt (°Lintner, °WK)
pub fn diastatic_power() -> Result<Dimension, ConversionError> {
    installed(DIASTATIC_POWER)
}

pub fn bitterness() -> Result<Dimension, ConversionError> {
    installed(BITTERNESS)
}

/// Dissolved sugar by weight (°P, Brix, Balling)
pub fn sugar_content() -> Result<Dimension, ConversionError> {
    installed(SUGAR_CONTENT)
}
