//! Generic conversion entry point and the equivalence extension seam

use tracing::trace;

use crate::{ConversionError, Dimension, EquivalenceError, Quantity, Unit};

/// A named context that converts between dimensions which are not linearly
/// related. Consulted only when the caller passes it to [`convert`].
pub trait Equivalence: Send + Sync {
    /// Context name used in errors and logs
    fn name(&self) -> &'static str;

    /// Produce a quantity of dimension `target` from `source`.
    /// The result may be in any unit of that dimension.
    fn resolve(&self, target: &Dimension, source: &Quantity) -> Result<Quantity, EquivalenceError>;
}

/// Convert `quantity` to `target`.
///
/// Same-dimension conversions go through the reference unit. Crossing
/// dimensions requires an equivalence context; without one the conversion
/// fails with `EquivalenceError::MissingContext`.
pub fn convert(
    target: &Unit,
    quantity: &Quantity,
    equivalence: Option<&dyn Equivalence>,
) -> Result<Quantity, ConversionError> {
    if quantity.unit.is_compatible(target) {
        return quantity.convert_to(target);
    }

    let from = quantity.dimension();
    let to = target.dimension;
    let Some(equivalence) = equivalence else {
        return Err(EquivalenceError::MissingContext { from, to }.into());
    };

    trace!(
        context = equivalence.name(),
        from = %from,
        to = %to,
        "resolving cross-dimension conversion"
    );
    let resolved = equivalence.resolve(&to, quantity)?;
    if resolved.dimension() != to {
        return Err(EquivalenceError::Unsupported {
            context: equivalence.name().to_string(),
            from,
            to,
        }
        .into());
    }
    resolved.convert_to(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use malt_core::Number;
    use crate::{UnitTable, UnitTableBuilder};

    /// Water: 1 kg occupies 1 L. Claims mass -> time but answers in mass.
    struct Water {
        liter: Unit,
    }

    impl Equivalence for Water {
        fn name(&self) -> &'static str {
            "Water"
        }

        fn resolve(&self, target: &Dimension, source: &Quantity) -> Result<Quantity, EquivalenceError> {
            let kilograms = source.reference_value().map_err(|e| EquivalenceError::Numeric {
                context: self.name().to_string(),
                reason: e.to_string(),
            })?;
            match (source.dimension(), *target) {
                (Dimension::MASS, Dimension::VOLUME) => Ok(Quantity::new(kilograms, self.liter.clone())),
                (Dimension::MASS, Dimension::TIME) => Ok(source.clone()),
                _ => Err(EquivalenceError::Unsupported {
                    context: self.name().to_string(),
                    from: source.dimension(),
                    to: *target,
                }),
            }
        }
    }

    fn table() -> UnitTable {
        UnitTableBuilder::with_builtins().unwrap().build()
    }

    fn water(t: &UnitTable) -> Water {
        Water { liter: t.get("L").unwrap().clone() }
    }

    fn q(t: &UnitTable, value: i64, symbol: &str) -> Quantity {
        Quantity::new(Number::from_i64(value), t.get(symbol).unwrap().clone())
    }

    #[test]
    fn test_same_dimension_ignores_context() {
        let t = table();
        let result = convert(t.get("g").unwrap(), &q(&t, 2, "kg"), None).unwrap();
        assert_eq!(result.value, Number::from_i64(2000));
    }

    #[test]
    fn test_missing_context() {
        let t = table();
        let result = convert(t.get("L").unwrap(), &q(&t, 2, "kg"), None);
        assert_eq!(
            result.err(),
            Some(ConversionError::Equivalence(EquivalenceError::MissingContext {
                from: Dimension::MASS,
                to: Dimension::VOLUME,
            }))
        );
    }

    #[test]
    fn test_context_resolves() {
        let t = table();
        let result = convert(t.get("mL").unwrap(), &q(&t, 2, "kg"), Some(&water(&t))).unwrap();
        assert_eq!(result.value, Number::from_i64(2000));
        assert_eq!(result.unit.symbol, "mL");
    }

    #[test]
    fn test_context_unsupported_pair() {
        let t = table();
        let result = convert(t.get("m").unwrap(), &q(&t, 2, "kg"), Some(&water(&t)));
        assert!(matches!(
            result,
            Err(ConversionError::Equivalence(EquivalenceError::Unsupported { .. }))
        ));
    }

    #[test]
    fn test_context_wrong_result_dimension() {
        let t = table();
        let result = convert(t.get("s").unwrap(), &q(&t, 2, "kg"), Some(&water(&t)));
        assert!(matches!(
            result,
            Err(ConversionError::Equivalence(EquivalenceError::Unsupported { .. }))
        ));
    }
}
