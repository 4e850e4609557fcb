//! Dimensional analysis types
//!
//! Each physical quantity has dimensions represented as an exponent vector:
//! [length, mass, time, current, temperature, amount, luminosity, x0 .. x7]
//!
//! The trailing slots are handed out by the unit table when an extension
//! declares a new base dimension (e.g. Color). Equality is structural over
//! the whole vector, so `D * D` and `D^2` are the same value.

use std::fmt;
use serde::{Serialize, Deserialize};

/// Dimension indices for the 7 SI base quantities
pub const LENGTH: usize = 0;
pub const MASS: usize = 1;
pub const TIME: usize = 2;
pub const CURRENT: usize = 3;
pub const TEMPERATURE: usize = 4;
pub const AMOUNT: usize = 5;
pub const LUMINOSITY: usize = 6;

/// Number of SI base quantities
pub const SI_BASE_COUNT: usize = 7;

/// Number of base dimensions extensions may declare
pub const EXTENSION_SLOTS: usize = 8;

/// Total length of the exponent vector
pub const BASE_COUNT: usize = SI_BASE_COUNT + EXTENSION_SLOTS;

const SI_SYMBOLS: [&str; SI_BASE_COUNT] = ["L", "M", "T", "I", "Θ", "N", "J"];

/// Represents the dimensions of a physical quantity
/// as exponents of the SI base dimensions and declared extension dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimension {
    pub exponents: [i32; BASE_COUNT],
}

const fn si(l: i32, m: i32, t: i32, i: i32, th: i32, n: i32, j: i32) -> Dimension {
    let mut exponents = [0i32; BASE_COUNT];
    exponents[LENGTH] = l;
    exponents[MASS] = m;
    exponents[TIME] = t;
    exponents[CURRENT] = i;
    exponents[TEMPERATURE] = th;
    exponents[AMOUNT] = n;
    exponents[LUMINOSITY] = j;
    Dimension { exponents }
}

impl Dimension {
    /// Dimensionless quantity (all exponents zero)
    pub const DIMENSIONLESS: Dimension = si(0, 0, 0, 0, 0, 0, 0);

    /// Length dimension [L]
    pub const LENGTH: Dimension = si(1, 0, 0, 0, 0, 0, 0);

    /// Mass dimension [M]
    pub const MASS: Dimension = si(0, 1, 0, 0, 0, 0, 0);

    /// Time dimension [T]
    pub const TIME: Dimension = si(0, 0, 1, 0, 0, 0, 0);

    /// Electric current dimension [I]
    pub const CURRENT: Dimension = si(0, 0, 0, 1, 0, 0, 0);

    /// Temperature dimension [Θ]
    pub const TEMPERATURE: Dimension = si(0, 0, 0, 0, 1, 0, 0);

    /// Amount of substance dimension [N]
    pub const AMOUNT: Dimension = si(0, 0, 0, 0, 0, 1, 0);

    /// Luminous intensity dimension [J]
    pub const LUMINOSITY: Dimension = si(0, 0, 0, 0, 0, 0, 1);

    /// Area [L^2]
    pub const AREA: Dimension = si(2, 0, 0, 0, 0, 0, 0);

    /// Volume [L^3]
    pub const VOLUME: Dimension = si(3, 0, 0, 0, 0, 0, 0);

    /// Mass concentration / density [M L^-3]
    pub const DENSITY: Dimension = si(-3, 1, 0, 0, 0, 0, 0);

    /// Velocity [L T^-1]
    pub const VELOCITY: Dimension = si(1, 0, -1, 0, 0, 0, 0);

    /// Frequency [T^-1]
    pub const FREQUENCY: Dimension = si(0, 0, -1, 0, 0, 0, 0);

    /// Create a new dimension from exponents
    pub fn new(exponents: [i32; BASE_COUNT]) -> Self {
        Dimension { exponents }
    }

    /// The base dimension occupying extension slot `slot`
    pub fn extension(slot: usize) -> Option<Self> {
        if slot >= EXTENSION_SLOTS {
            return None;
        }
        let mut exponents = [0i32; BASE_COUNT];
        exponents[SI_BASE_COUNT + slot] = 1;
        Some(Dimension { exponents })
    }

    /// Extension slots with a non-zero exponent
    pub fn extension_slots(&self) -> impl Iterator<Item = usize> + '_ {
        self.exponents[SI_BASE_COUNT..]
            .iter()
            .enumerate()
            .filter(|(_, &e)| e != 0)
            .map(|(slot, _)| slot)
    }

    /// Check if this is a dimensionless quantity
    pub fn is_dimensionless(&self) -> bool {
        self.exponents.iter().all(|&e| e == 0)
    }

    /// Multiply dimensions (add exponents). Exponents from user input go
    /// through `checked_multiply`.
    pub fn multiply(&self, other: &Dimension) -> Dimension {
        let mut result = [0i32; BASE_COUNT];
        for (i, slot) in result.iter_mut().enumerate() {
            *slot = self.exponents[i] + other.exponents[i];
        }
        Dimension { exponents: result }
    }

    /// Divide dimensions (subtract exponents)
    pub fn divide(&self, other: &Dimension) -> Dimension {
        self.multiply(&other.invert())
    }

    /// Raise to integer power (multiply exponents)
    pub fn power(&self, exp: i32) -> Dimension {
        let mut result = [0i32; BASE_COUNT];
        for (i, slot) in result.iter_mut().enumerate() {
            *slot = self.exponents[i] * exp;
        }
        Dimension { exponents: result }
    }

    /// Invert dimensions (negate exponents)
    pub fn invert(&self) -> Dimension {
        self.power(-1)
    }

    /// `multiply`, or `None` if an exponent overflows
    pub fn checked_multiply(&self, other: &Dimension) -> Option<Dimension> {
        let mut result = [0i32; BASE_COUNT];
        for (i, slot) in result.iter_mut().enumerate() {
            *slot = self.exponents[i].checked_add(other.exponents[i])?;
        }
        Some(Dimension { exponents: result })
    }

    /// `divide`, or `None` if an exponent overflows
    pub fn checked_divide(&self, other: &Dimension) -> Option<Dimension> {
        self.checked_multiply(&other.checked_power(-1)?)
    }

    /// `power`, or `None` if an exponent overflows
    pub fn checked_power(&self, exp: i32) -> Option<Dimension> {
        let mut result = [0i32; BASE_COUNT];
        for (i, slot) in result.iter_mut().enumerate() {
            *slot = self.exponents[i].checked_mul(exp)?;
        }
        Some(Dimension { exponents: result })
    }

    /// Get the dimension name if it matches a common or declared dimension
    pub fn name(&self) -> Option<&'static str> {
        let known = [
            (Dimension::DIMENSIONLESS, "dimensionless"),
            (Dimension::LENGTH, "length"),
            (Dimension::MASS, "mass"),
            (Dimension::TIME, "time"),
            (Dimension::CURRENT, "current"),
            (Dimension::TEMPERATURE, "temperature"),
            (Dimension::AMOUNT, "amount"),
            (Dimension::LUMINOSITY, "luminosity"),
            (Dimension::AREA, "area"),
            (Dimension::VOLUME, "volume"),
            (Dimension::DENSITY, "density"),
            (Dimension::VELOCITY, "velocity"),
            (Dimension::FREQUENCY, "frequency"),
        ];
        if let Some((_, name)) = known.iter().find(|(d, _)| d == self) {
            return Some(*name);
        }
        crate::table::installed_dimension(self).map(|info| info.name)
    }

    /// Name and formula, e.g. "density (L^-3 M)"
    pub fn describe(&self) -> String {
        match self.name() {
            Some(name) => format!("{} ({})", name, self),
            None => self.to_string(),
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();

        for (i, &exp) in self.exponents.iter().enumerate() {
            if exp == 0 {
                continue;
            }
            let symbol = if i < SI_BASE_COUNT {
                SI_SYMBOLS[i].to_string()
            } else {
                let slot = i - SI_BASE_COUNT;
                crate::table::extension_symbol(slot)
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| format!("X{}", slot))
            };
            if exp == 1 {
                parts.push(symbol);
            } else {
                parts.push(format!("{}^{}", symbol, exp));
            }
        }

        if parts.is_empty() {
            write!(f, "1")
        } else {
            write!(f, "{}", parts.join(" "))
        }
    }
}

impl Default for Dimension {
    fn default() -> Self {
        Self::DIMENSIONLESS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimensionless() {
        assert!(Dimension::DIMENSIONLESS.is_dimensionless());
        assert!(!Dimension::LENGTH.is_dimensionless());
    }

    #[test]
    fn test_divide() {
        let velocity = Dimension::LENGTH.divide(&Dimension::TIME);
        assert_eq!(velocity, Dimension::VELOCITY);
    }

    #[test]
    fn test_density() {
        let density = Dimension::MASS.divide(&Dimension::VOLUME);
        assert_eq!(density, Dimension::DENSITY);
    }

    #[test]
    fn test_power() {
        let area = Dimension::LENGTH.power(2);
        assert_eq!(area, Dimension::AREA);
        assert_eq!(Dimension::LENGTH.multiply(&Dimension::LENGTH), area);
    }

    #[test]
    fn test_checked_overflow() {
        assert_eq!(Dimension::LENGTH.checked_power(3), Some(Dimension::VOLUME));
        assert_eq!(Dimension::MASS.checked_divide(&Dimension::VOLUME), Some(Dimension::DENSITY));
        assert_eq!(Dimension::LENGTH.checked_power(i32::MIN).and_then(|d| d.checked_power(-1)), None);
        assert_eq!(Dimension::AREA.checked_power(i32::MAX), None);

        let huge = Dimension::LENGTH.checked_power(i32::MAX).unwrap();
        assert_eq!(huge.checked_multiply(&Dimension::LENGTH), None);
        assert_eq!(huge.checked_divide(&Dimension::LENGTH.invert()), None);
        assert!(huge.checked_multiply(&Dimension::MASS).is_some());
    }

    #[test]
    fn test_extension_closed_under_products() {
        let color = Dimension::extension(0).unwrap();
        let squared = color.multiply(&color);
        assert_eq!(squared, color.power(2));
        assert_ne!(squared, color);
        assert_ne!(color, Dimension::extension(1).unwrap());
        assert!(color.divide(&color).is_dimensionless());
        assert_eq!(squared.extension_slots().collect::<Vec<_>>(), vec![0]);
    }

    #[test]
    fn test_extension_out_of_range() {
        assert!(Dimension::extension(EXTENSION_SLOTS).is_none());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Dimension::DIMENSIONLESS), "1");
        assert_eq!(format!("{}", Dimension::LENGTH), "L");
        assert_eq!(format!("{}", Dimension::VELOCITY), "L T^-1");
        assert_eq!(format!("{}", Dimension::DENSITY), "L^-3 M");
    }

    #[test]
    fn test_describe() {
        assert_eq!(Dimension::DENSITY.describe(), "density (L^-3 M)");
    }
}
