//! Host unit definitions, organized by dimension
//!
//! Declared through the same builder API extensions use, so every factor is
//! an exact ratio relative to a parent and the chain ends at the dimension's
//! reference unit.

use malt_core::Number;
use crate::{DeclarationError, Dimension, UnitDecl, UnitTableBuilder};

impl UnitTableBuilder {
    pub(crate) fn register_builtin_units(&mut self) -> Result<(), DeclarationError> {
        self.register_length_units()?;
        self.register_mass_units()?;
        self.register_time_units()?;
        self.register_temperature_units()?;
        self.register_base_units()?;
        self.register_volume_units()?;
        self.register_dimensionless_units()?;
        Ok(())
    }

    fn register_length_units(&mut self) -> Result<(), DeclarationError> {
        let length = Dimension::LENGTH;
        self.declare(UnitDecl::reference("m", "meter", length))?;
        self.declare(UnitDecl::linear("km", "kilometer", length, "m", Number::from_i64(1000)))?;
        self.declare(UnitDecl::linear("cm", "centimeter", length, "m", Number::ratio(1, 100)))?;
        self.declare(UnitDecl::linear("mm", "millimeter", length, "m", Number::ratio(1, 1000)))?;

        // International inch, exact since 1959
        self.declare(UnitDecl::linear("in", "inch", length, "m", Number::ratio(254, 10000)))?;
        self.declare(UnitDecl::linear("ft", "foot", length, "in", Number::from_i64(12)))?;

        self.alias("meter", "m")?;
        self.alias("meters", "m")?;
        self.alias("metre", "m")?;
        self.alias("kilometer", "km")?;
        self.alias("centimeter", "cm")?;
        self.alias("millimeter", "mm")?;
        self.alias("inch", "in")?;
        self.alias("inches", "in")?;
        self.alias("foot", "ft")?;
        self.alias("feet", "ft")?;
        Ok(())
    }

    fn register_mass_units(&mut self) -> Result<(), DeclarationError> {
        let mass = Dimension::MASS;
        self.declare(UnitDecl::reference("kg", "kilogram", mass))?;
        self.declare(UnitDecl::linear("g", "gram", mass, "kg", Number::ratio(1, 1000)))?;
        self.declare(UnitDecl::linear("mg", "milligram", mass, "g", Number::ratio(1, 1000)))?;
        self.declare(UnitDecl::linear("µg", "microgram", mass, "mg", Number::ratio(1, 1000)))?;

        // Avoirdupois pound
        self.declare(UnitDecl::linear("lb", "pound", mass, "kg", Number::ratio(45359237, 100000000)))?;
        self.declare(UnitDecl::linear("oz", "ounce", mass, "lb", Number::ratio(1, 16)))?;

        self.alias("kilogram", "kg")?;
        self.alias("gram", "g")?;
        self.alias("grams", "g")?;
        self.alias("milligram", "mg")?;
        self.alias("ug", "µg")?;
        self.alias("μg", "µg")?;
        self.alias("mcg", "µg")?;
        self.alias("pound", "lb")?;
        self.alias("lbs", "lb")?;
        self.alias("ounce", "oz")?;
        Ok(())
    }

    fn register_time_units(&mut self) -> Result<(), DeclarationError> {
        let time = Dimension::TIME;
        self.declare(UnitDecl::reference("s", "second", time))?;
        self.declare(UnitDecl::linear("min", "minute", time, "s", Number::from_i64(60)))?;
        self.declare(UnitDecl::linear("h", "hour", time, "min", Number::from_i64(60)))?;
        self.declare(UnitDecl::linear("d", "day", time, "h", Number::from_i64(24)))?;

        self.alias("second", "s")?;
        self.alias("sec", "s")?;
        self.alias("minute", "min")?;
        self.alias("hour", "h")?;
        self.alias("hr", "h")?;
        self.alias("day", "d")?;
        Ok(())
    }

    fn register_temperature_units(&mut self) -> Result<(), DeclarationError> {
        let temperature = Dimension::TEMPERATURE;
        self.declare(UnitDecl::reference("K", "kelvin", temperature))?;

        // K = °C + 273.15
        self.declare(UnitDecl::affine(
            "°C", "degree Celsius", temperature, "K",
            Number::one(),
            Number::ratio(27315, 100),
        ))?;

        // °C = 5/9 · °F − 160/9
        self.declare(UnitDecl::affine(
            "°F", "degree Fahrenheit", temperature, "°C",
            Number::ratio(5, 9),
            Number::ratio(-160, 9),
        ))?;

        self.alias("kelvin", "K")?;
        self.alias("degC", "°C")?;
        self.alias("celsius", "°C")?;
        self.alias("degF", "°F")?;
        self.alias("fahrenheit", "°F")?;
        Ok(())
    }

    fn register_base_units(&mut self) -> Result<(), DeclarationError> {
        self.declare(UnitDecl::reference("A", "ampere", Dimension::CURRENT))?;
        self.declare(UnitDecl::reference("mol", "mole", Dimension::AMOUNT))?;
        self.declare(UnitDecl::reference("cd", "candela", Dimension::LUMINOSITY))?;

        self.alias("ampere", "A")?;
        self.alias("mole", "mol")?;
        self.alias("candela", "cd")?;
        Ok(())
    }

    fn register_volume_units(&mut self) -> Result<(), DeclarationError> {
        let volume = Dimension::VOLUME;
        self.declare(UnitDecl::reference("m³", "cubic meter", volume))?;
        self.declare(UnitDecl::linear("L", "liter", volume, "m³", Number::ratio(1, 1000)))?;
        self.declare(UnitDecl::linear("mL", "milliliter", volume, "L", Number::ratio(1, 1000)))?;
        self.declare(UnitDecl::linear("hL", "hectoliter", volume, "L", Number::from_i64(100)))?;

        self.alias("m3", "m³")?;
        self.alias("l", "L")?;
        self.alias("liter", "L")?;
        self.alias("litre", "L")?;
        self.alias("ml", "mL")?;
        self.alias("hl", "hL")?;
        Ok(())
    }

    fn register_dimensionless_units(&mut self) -> Result<(), DeclarationError> {
        let none = Dimension::DIMENSIONLESS;
        self.declare(UnitDecl::reference("1", "unity", none))?;
        self.declare(UnitDecl::linear("%", "percent", none, "1", Number::ratio(1, 100)))?;
        self.declare(UnitDecl::linear("‰", "permille", none, "1", Number::ratio(1, 1000)))?;

        self.alias("percent", "%")?;
        self.alias("permille", "‰")?;
        Ok(())
    }
}
