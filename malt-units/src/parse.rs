//! Unit string parsing - parse expressions like "kg/L" or "m^2"

use malt_core::Number;
use crate::{table, ConversionError, Quantity, Unit, UnitTable};

/// Largest |exponent| accepted in a unit expression such as "m^3"
pub const MAX_UNIT_POWER: i32 = 64;

const SUPERSCRIPT_DIGITS: [char; 10] = ['⁰', '¹', '²', '³', '⁴', '⁵', '⁶', '⁷', '⁸', '⁹'];

impl UnitTable {
    /// Parse a unit string into a Unit
    ///
    /// Supported formats:
    /// - Simple: "m", "kg", "°P"
    /// - Powers: "m^2", "s^-1", "m²"
    /// - Products: "m*s", "kg·m"
    /// - Quotients: "kg/L", "mg/m^3"
    pub fn parse_unit(&self, s: &str) -> Result<Unit, ConversionError> {
        let s = s.trim();

        if s.is_empty() {
            return self.lookup("1");
        }

        // Try simple lookup first
        if let Some(unit) = self.get(s) {
            return Ok(unit.clone());
        }

        // Split by '/' to handle quotients
        match s.split_once('/') {
            Some((numerator, denominator)) => {
                let numerator = self.parse_product(numerator)?;
                let denominator = self.parse_product(denominator)?;
                numerator.divide(&denominator)
            }
            None => self.parse_product(s),
        }
    }

    /// Parse a quantity string like "5 m", "1.040 sg" or "100kg"
    pub fn parse_quantity(&self, s: &str) -> Result<Quantity, ConversionError> {
        let s = s.trim();
        let split_pos = number_prefix_len(s);
        if split_pos == 0 {
            return Err(ConversionError::Parse(format!("no number found in: {}", s)));
        }

        let value = Number::from_str(&s[..split_pos])?;
        let unit = self.parse_unit(&s[split_pos..])?;
        Ok(Quantity::new(value, unit))
    }

    /// Parse a conversion specification like "gal->L" or "°P → sg"
    pub fn parse_conversion(&self, s: &str) -> Result<(Unit, Unit), ConversionError> {
        let parts: Vec<&str> = ["->", "→", " to ", " in "]
            .iter()
            .find(|arrow| s.contains(*arrow))
            .map(|arrow| s.split(*arrow).collect())
            .unwrap_or_default();

        if parts.len() != 2 {
            return Err(ConversionError::Parse(format!(
                "invalid conversion format: {}, expected 'unit1->unit2'",
                s
            )));
        }

        Ok((self.parse_unit(parts[0])?, self.parse_unit(parts[1])?))
    }

    /// Parse a product of units like "kg*m" or "m^2·s"
    fn parse_product(&self, s: &str) -> Result<Unit, ConversionError> {
        let mut factors = s
            .split(|c| c == '*' || c == '·' || c == ' ')
            .filter(|p| !p.is_empty());

        let Some(first) = factors.next() else {
            return self.lookup("1");
        };

        let mut result = self.parse_power(first)?;
        for factor in factors {
            result = result.multiply(&self.parse_power(factor)?)?;
        }
        Ok(result)
    }

    /// Parse a unit with optional power like "m^2", "s^-1" or "m³"
    fn parse_power(&self, s: &str) -> Result<Unit, ConversionError> {
        // Symbols such as "m³" are declared as-is
        if let Some(unit) = self.get(s) {
            return Ok(unit.clone());
        }

        if let Some((base, exp_str)) = s.split_once('^') {
            let exponent: i32 = exp_str
                .parse()
                .map_err(|_| ConversionError::Parse(format!("invalid exponent: {}", exp_str)))?;
            return self.lookup(base)?.power(bounded_power(exponent)?);
        }

        if let Some((base, exponent)) = split_superscript(s) {
            return self.lookup(base)?.power(bounded_power(exponent)?);
        }

        self.lookup(s)
    }

    fn lookup(&self, symbol: &str) -> Result<Unit, ConversionError> {
        self.get(symbol)
            .cloned()
            .ok_or_else(|| ConversionError::UnknownUnit(symbol.to_string()))
    }
}

fn bounded_power(exponent: i32) -> Result<i32, ConversionError> {
    if exponent.unsigned_abs() > MAX_UNIT_POWER.unsigned_abs() {
        return Err(ConversionError::Parse(format!(
            "exponent {} is outside ±{}",
            exponent, MAX_UNIT_POWER
        )));
    }
    Ok(exponent)
}

/// Split "m⁻²" into ("m", -2)
fn split_superscript(s: &str) -> Option<(&str, i32)> {
    let mut exponent = 0i32;
    let mut place = 1i32;
    let mut end = s.len();

    for (i, c) in s.char_indices().rev() {
        let Some(digit) = SUPERSCRIPT_DIGITS.iter().position(|&d| d == c) else {
            break;
        };
        exponent = exponent.checked_add((digit as i32).checked_mul(place)?)?;
        place = place.checked_mul(10)?;
        end = i;
    }
    if end == s.len() {
        return None;
    }

    let (base, exponent) = match s[..end].strip_suffix('⁻') {
        Some(base) => (base, -exponent),
        None => (&s[..end], exponent),
    };
    (!base.is_empty()).then_some((base, exponent))
}

/// Length of the leading number in "1.5e-3 kg", "-2 m", "2000/197 SRM"
fn number_prefix_len(s: &str) -> usize {
    let chars: Vec<(usize, char)> = s.char_indices().collect();
    let mut end = 0;

    for (k, &(i, c)) in chars.iter().enumerate() {
        let prev = k.checked_sub(1).map(|p| chars[p].1);
        let next = chars.get(k + 1).map(|&(_, n)| n);
        let accepted = match c {
            '0'..='9' | '.' | '/' => true,
            '+' | '-' => matches!(prev, None | Some('e' | 'E')),
            'e' | 'E' => k > 0 && matches!(next, Some('0'..='9' | '+' | '-')),
            _ => false,
        };
        if !accepted {
            break;
        }
        end = i + c.len_utf8();
    }
    end
}

/// Parse a unit string against the installed table
pub fn parse_unit(s: &str) -> Result<Unit, ConversionError> {
    table()?.parse_unit(s)
}

/// Parse a quantity string against the installed table
pub fn parse_quantity(s: &str) -> Result<Quantity, ConversionError> {
    table()?.parse_quantity(s)
}

/// Parse a conversion specification against the installed table
pub fn parse_conversion(s: &str) -> Result<(Unit, Unit), ConversionError> {
    table()?.parse_conversion(s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{initialize, Dimension};

    fn setup() {
        initialize(&[]).unwrap();
    }

    #[test]
    fn test_parse_simple_unit() {
        setup();
        let unit = parse_unit("m").unwrap();
        assert_eq!(unit.symbol, "m");
        assert_eq!(unit.dimension, Dimension::LENGTH);
    }

    #[test]
    fn test_parse_unit_with_power() {
        setup();
        assert_eq!(parse_unit("m^2").unwrap().dimension, Dimension::AREA);
        assert_eq!(parse_unit("s^-1").unwrap().dimension, Dimension::FREQUENCY);
        assert_eq!(parse_unit("cm³").unwrap().dimension, Dimension::VOLUME);
        assert_eq!(parse_unit("s⁻¹").unwrap().dimension, Dimension::FREQUENCY);
    }

    #[test]
    fn test_parse_declared_superscript_symbol() {
        setup();
        let unit = parse_unit("m³").unwrap();
        assert_eq!(unit.symbol, "m³");
        assert!(unit.is_reference());
    }

    #[test]
    fn test_parse_quotient() {
        setup();
        let unit = parse_unit("kg/L").unwrap();
        assert_eq!(unit.dimension, Dimension::DENSITY);
        assert_eq!(unit.factor(), Some(&Number::from_i64(1000)));
    }

    #[test]
    fn test_parse_product() {
        setup();
        let unit = parse_unit("kg*m").unwrap();
        let expected = Dimension::MASS.multiply(&Dimension::LENGTH);
        assert_eq!(unit.dimension, expected);
    }

    #[test]
    fn test_parse_nonlinear_product() {
        setup();
        assert_eq!(
            parse_unit("°C*m").err(),
            Some(ConversionError::NonlinearCompound("°C".to_string()))
        );
    }

    #[test]
    fn test_parse_conversion() {
        setup();
        let (from, to) = parse_conversion("km->ft").unwrap();
        assert_eq!(from.symbol, "km");
        assert_eq!(to.symbol, "ft");

        let (from, to) = parse_conversion("degC → degF").unwrap();
        assert_eq!(from.symbol, "°C");
        assert_eq!(to.symbol, "°F");

        assert!(matches!(parse_conversion("km"), Err(ConversionError::Parse(_))));
    }

    #[test]
    fn test_parse_quantity() {
        setup();
        let q = parse_quantity("5 m").unwrap();
        assert_eq!(q.value, Number::from_i64(5));
        assert_eq!(q.unit.symbol, "m");

        let q = parse_quantity("100kg").unwrap();
        assert_eq!(q.value, Number::from_i64(100));
        assert_eq!(q.unit.symbol, "kg");

        let q = parse_quantity("-1.5e-3 L").unwrap();
        assert_eq!(q.value, Number::ratio(-15, 10000));

        let q = parse_quantity("2000/197").unwrap();
        assert_eq!(q.value, Number::ratio(2000, 197));
        assert!(q.is_dimensionless());
    }

    #[test]
    fn test_parse_quantity_no_number() {
        setup();
        assert!(matches!(parse_quantity("kg"), Err(ConversionError::Parse(_))));
    }

    #[test]
    fn test_alias_lookup() {
        setup();
        assert_eq!(parse_unit("meter").unwrap().symbol, "m");
        assert_eq!(parse_unit("kilogram").unwrap().symbol, "kg");
    }

    #[test]
    fn test_unknown_unit() {
        setup();
        assert_eq!(
            parse_unit("unknown_xyz").err(),
            Some(ConversionError::UnknownUnit("unknown_xyz".to_string()))
        );
    }

    #[test]
    fn test_parse_exponent_out_of_range() {
        setup();
        for expr in ["m³^1000000000", "km^-2147483648", "m^65", "s⁻⁹⁹", "kg/m^2147483647"] {
            assert!(
                matches!(parse_unit(expr), Err(ConversionError::Parse(_))),
                "{} was accepted",
                expr
            );
        }
        assert!(matches!(
            parse_unit("m^9999999999"),
            Err(ConversionError::Parse(_))
        ));
        assert_eq!(parse_unit("m^64").unwrap().dimension, Dimension::LENGTH.power(64));
        assert_eq!(parse_unit("km^-64").unwrap().dimension, Dimension::LENGTH.power(-64));
    }

    #[test]
    fn test_parse_quantity_huge_decimal_exponent() {
        setup();
        assert!(matches!(
            parse_quantity("1e999999999 m"),
            Err(ConversionError::Number(malt_core::NumberError::DomainError(_)))
        ));
    }

    #[test]
    fn test_split_superscript() {
        assert_eq!(split_superscript("m²"), Some(("m", 2)));
        assert_eq!(split_superscript("s⁻¹"), Some(("s", -1)));
        assert_eq!(split_superscript("m¹²"), Some(("m", 12)));
        assert_eq!(split_superscript("m"), None);
        assert_eq!(split_superscript("²"), None);
    }
}
