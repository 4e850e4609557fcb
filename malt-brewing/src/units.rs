//! Brewing unit definitions
//!
//! Every factor is an exact ratio so that chains like
//! barrel -> gallon -> quart -> pint -> cup compose without rounding.

use malt_core::Number;
use malt_units::{DeclarationError, Dimension, UnitDecl, UnitTableBuilder};

use crate::dimensions::BrewingDimensions;

/// Every brewing unit symbol with its display name, in declaration order
pub const BREWING_SYMBOLS: &[(&str, &str)] = &[
    ("gal", "US gallon"),
    ("qt", "US quart"),
    ("pt", "US pint"),
    ("cup", "US cup"),
    ("floz", "US fluid ounce"),
    ("tbsp", "US tablespoon"),
    ("tsp", "US teaspoon"),
    ("bbl", "US beer barrel"),
    ("igal", "Imperial gallon"),
    ("iqt", "Imperial quart"),
    ("ipt", "Imperial pint"),
    ("ifloz", "Imperial fluid ounce"),
    ("gi", "Imperial gill"),
    ("ibbl", "Imperial barrel"),
    ("°P", "degree Plato"),
    ("Brix", "degree Brix"),
    ("Balling", "degree Balling"),
    ("sg", "specific gravity"),
    ("gu", "gravity unit"),
    ("ppm", "parts per million"),
    ("ppb", "parts per billion"),
    ("ppt", "parts per trillion"),
    ("pH⁺", "hydrogen ion activity"),
    ("°Lintner", "degree Lintner"),
    ("°WK", "degree Windisch-Kolbach"),
    ("SRM", "Standard Reference Method"),
    ("EBC", "European Brewery Convention"),
    ("°L", "degree Lovibond"),
    ("IBU", "International Bitterness Unit"),
];

pub(crate) fn declare(
    builder: &mut UnitTableBuilder,
    dims: &BrewingDimensions,
) -> Result<(), DeclarationError> {
    register_us_volume_units(builder)?;
    register_imperial_volume_units(builder)?;
    register_sugar_units(builder, dims.sugar_content)?;
    register_gravity_units(builder)?;
    register_diastatic_power_units(builder, dims.diastatic_power)?;
    register_color_units(builder, dims.color)?;
    builder.declare(UnitDecl::reference("IBU", "International Bitterness Unit", dims.bitterness))?;
    Ok(())
}

fn register_us_volume_units(b: &mut UnitTableBuilder) -> Result<(), DeclarationError> {
    let volume = Dimension::VOLUME;

    // 231 cubic inches
    b.declare(UnitDecl::linear("gal", "US gallon", volume, "m³", Number::ratio(473176473, 125000000000)))?;
    b.declare(UnitDecl::linear("qt", "US quart", volume, "gal", Number::ratio(1, 4)))?;
    b.declare(UnitDecl::linear("pt", "US pint", volume, "qt", Number::ratio(1, 2)))?;
    b.declare(UnitDecl::linear("cup", "US cup", volume, "pt", Number::ratio(1, 2)))?;
    b.declare(UnitDecl::linear("floz", "US fluid ounce", volume, "cup", Number::ratio(1, 8)))?;
    b.declare(UnitDecl::linear("tbsp", "US tablespoon", volume, "floz", Number::ratio(1, 2)))?;
    b.declare(UnitDecl::linear("tsp", "US teaspoon", volume, "tbsp", Number::ratio(1, 3)))?;
    b.declare(UnitDecl::linear("bbl", "US beer barrel", volume, "gal", Number::from_i64(42)))?;

    b.alias("gallon", "gal")?;
    b.alias("gallons", "gal")?;
    b.alias("quart", "qt")?;
    b.alias("pint", "pt")?;
    b.alias("cups", "cup")?;
    b.alias("fl_oz", "floz")?;
    b.alias("tablespoon", "tbsp")?;
    b.alias("teaspoon", "tsp")?;
    b.alias("barrel", "bbl")?;
    Ok(())
}

fn register_imperial_volume_units(b: &mut UnitTableBuilder) -> Result<(), DeclarationError> {
    let volume = Dimension::VOLUME;

    b.declare(UnitDecl::linear("igal", "Imperial gallon", volume, "L", Number::ratio(454609, 100000)))?;
    b.declare(UnitDecl::linear("iqt", "Imperial quart", volume, "igal", Number::ratio(1, 4)))?;
    b.declare(UnitDecl::linear("ipt", "Imperial pint", volume, "iqt", Number::ratio(1, 2)))?;
    b.declare(UnitDecl::linear("ifloz", "Imperial fluid ounce", volume, "ipt", Number::ratio(1, 20)))?;
    b.declare(UnitDecl::linear("gi", "Imperial gill", volume, "ifloz", Number::from_i64(5)))?;
    b.declare(UnitDecl::linear("ibbl", "Imperial barrel", volume, "igal", Number::from_i64(36)))?;

    b.alias("impgal", "igal")?;
    b.alias("imppt", "ipt")?;
    Ok(())
}

fn register_sugar_units(b: &mut UnitTableBuilder, sugar: Dimension) -> Result<(), DeclarationError> {
    b.declare(UnitDecl::reference("°P", "degree Plato", sugar))?;
    b.declare(UnitDecl::linear("Brix", "degree Brix", sugar, "°P", Number::one()))?;
    b.declare(UnitDecl::linear("Balling", "degree Balling", sugar, "°P", Number::one()))?;

    b.alias("plato", "°P")?;
    b.alias("°Plato", "°P")?;
    b.alias("°Bx", "Brix")?;
    Ok(())
}

fn register_gravity_units(b: &mut UnitTableBuilder) -> Result<(), DeclarationError> {
    let none = Dimension::DIMENSIONLESS;

    b.declare(UnitDecl::linear("sg", "specific gravity", none, "1", Number::one()))?;
    // ‰ = gu + 1000, so gu = 1000·(sg − 1)
    b.declare(UnitDecl::affine("gu", "gravity unit", none, "‰", Number::one(), Number::from_i64(1000)))?;

    b.declare(UnitDecl::linear("ppm", "parts per million", none, "1", Number::ratio(1, 1_000_000)))?;
    b.declare(UnitDecl::linear("ppb", "parts per billion", none, "1", Number::ratio(1, 1_000_000_000)))?;
    b.declare(UnitDecl::linear("ppt", "parts per trillion", none, "1", Number::ratio(1, 1_000_000_000_000)))?;

    b.declare(UnitDecl::logarithmic("pH⁺", "hydrogen ion activity", none, "1", 10.0, 1.0))?;

    b.alias("SG", "sg")?;
    b.alias("GU", "gu")?;
    Ok(())
}

fn register_diastatic_power_units(b: &mut UnitTableBuilder, power: Dimension) -> Result<(), DeclarationError> {
    b.declare(UnitDecl::reference("°Lintner", "degree Lintner", power))?;
    // °WK = 3.5·°Lintner − 16
    b.declare(UnitDecl::affine(
        "°WK", "degree Windisch-Kolbach", power, "°Lintner",
        Number::ratio(10, 35),
        Number::ratio(160, 35),
    ))?;

    b.alias("Lintner", "°Lintner")?;
    b.alias("WK", "°WK")?;
    Ok(())
}

fn register_color_units(b: &mut UnitTableBuilder, color: Dimension) -> Result<(), DeclarationError> {
    b.declare(UnitDecl::reference("SRM", "Standard Reference Method", color))?;
    b.declare(UnitDecl::linear("EBC", "European Brewery Convention", color, "SRM", Number::ratio(100, 197)))?;
    // SRM = 1.3546·°L − 0.76
    b.declare(UnitDecl::affine(
        "°L", "degree Lovibond", color, "SRM",
        Number::ratio(13546, 10000),
        Number::ratio(-76, 100),
    ))?;

    b.alias("Lovibond", "°L")?;
    Ok(())
}
