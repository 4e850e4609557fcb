//! Unit table: declaration, validation and the process-wide install

use std::collections::HashMap;
use std::sync::OnceLock;

use serde::Serialize;
use tracing::{debug, info, warn};

use malt_core::Number;
use crate::dimension::SI_BASE_COUNT;
use crate::{ConversionError, DeclarationError, Dimension, Unit, UnitRelation};

/// The installed table, written once by `initialize`
static TABLE: OnceLock<Result<UnitTable, DeclarationError>> = OnceLock::new();

/// Characters the unit expression parser treats as operators
const RESERVED: [char; 4] = ['*', '/', '^', '·'];

/// A base dimension declared by an extension
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DimensionInfo {
    pub name: &'static str,
    pub symbol: &'static str,
    pub slot: usize,
    pub dimension: Dimension,
}

/// A unit declaration: symbol, display name, dimension and relation to its parent
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnitDecl {
    pub symbol: &'static str,
    pub name: &'static str,
    pub dimension: Dimension,
    pub relation: UnitRelation,
}

impl UnitDecl {
    pub fn reference(symbol: &'static str, name: &'static str, dimension: Dimension) -> Self {
        UnitDecl { symbol, name, dimension, relation: UnitRelation::Reference }
    }

    /// `1 symbol = factor parent`
    pub fn linear(
        symbol: &'static str,
        name: &'static str,
        dimension: Dimension,
        parent: &'static str,
        factor: Number,
    ) -> Self {
        UnitDecl {
            symbol,
            name,
            dimension,
            relation: UnitRelation::Linear { parent, factor },
        }
    }

    /// `v symbol = (scale · v + offset) parent`
    pub fn affine(
        symbol: &'static str,
        name: &'static str,
        dimension: Dimension,
        parent: &'static str,
        scale: Number,
        offset: Number,
    ) -> Self {
        UnitDecl {
            symbol,
            name,
            dimension,
            relation: UnitRelation::Affine { parent, scale, offset },
        }
    }

    /// `v symbol = base^(v / multiplier) parent`
    pub fn logarithmic(
        symbol: &'static str,
        name: &'static str,
        dimension: Dimension,
        parent: &'static str,
        base: f64,
        multiplier: f64,
    ) -> Self {
        UnitDecl {
            symbol,
            name,
            dimension,
            relation: UnitRelation::Logarithmic { parent, base, multiplier },
        }
    }
}

/// A set of dimensions and units installed alongside the host units
pub trait UnitExtension {
    /// Name recorded in the installed table
    fn name(&self) -> &'static str;

    /// Declare dimensions, units and aliases
    fn declare(&self, builder: &mut UnitTableBuilder) -> Result<(), DeclarationError>;
}

/// Mutable table used while declaring units
#[derive(Debug, Default)]
pub struct UnitTableBuilder {
    units: HashMap<String, Unit>,
    aliases: HashMap<String, String>,
    references: HashMap<Dimension, String>,
    dimensions: Vec<DimensionInfo>,
    order: Vec<String>,
    extensions: Vec<&'static str>,
}

impl UnitTableBuilder {
    /// Empty builder without host units
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder pre-populated with the host units
    pub fn with_builtins() -> Result<Self, DeclarationError> {
        let mut builder = Self::new();
        builder.register_builtin_units()?;
        Ok(builder)
    }

    /// Declare a new base dimension in the next free extension slot
    pub fn declare_dimension(
        &mut self,
        name: &'static str,
        symbol: &'static str,
    ) -> Result<Dimension, DeclarationError> {
        if name.trim().is_empty() || symbol.trim().is_empty() {
            return Err(DeclarationError::Malformed {
                symbol: symbol.to_string(),
                reason: "dimension name and symbol must not be empty".to_string(),
            });
        }
        if self.dimensions.iter().any(|d| d.name == name || d.symbol == symbol) {
            return Err(DeclarationError::DuplicateDimension {
                name: name.to_string(),
                symbol: symbol.to_string(),
            });
        }

        let slot = self.dimensions.len();
        let dimension = Dimension::extension(slot)
            .ok_or_else(|| DeclarationError::NoFreeDimensionSlot(name.to_string()))?;

        debug!(name, symbol, slot, "declared dimension");
        self.dimensions.push(DimensionInfo { name, symbol, slot, dimension });
        Ok(dimension)
    }

    /// Declare a unit. The parent must already be declared.
    pub fn declare(&mut self, decl: UnitDecl) -> Result<&Unit, DeclarationError> {
        let UnitDecl { symbol, name, dimension, relation } = decl;
        self.check_symbol(symbol)?;

        let unit = match relation.parent() {
            None => {
                self.check_extension_slots(symbol, &dimension)?;
                if let Some(existing) = self.references.get(&dimension) {
                    return Err(DeclarationError::DuplicateReference {
                        symbol: symbol.to_string(),
                        existing: existing.clone(),
                        dimension,
                    });
                }
                Unit::reference(symbol, name, dimension)
            }
            Some(parent_symbol) => {
                validate_parameters(symbol, &relation)?;
                let parent = self.get(parent_symbol).ok_or_else(|| {
                    DeclarationError::UnknownParent {
                        symbol: symbol.to_string(),
                        parent: parent_symbol.to_string(),
                    }
                })?;
                if parent.dimension != dimension {
                    return Err(DeclarationError::DimensionMismatch {
                        symbol: symbol.to_string(),
                        parent: parent_symbol.to_string(),
                        declared: dimension,
                        actual: parent.dimension,
                    });
                }
                Unit::derived(symbol, name, parent, &relation)?
            }
        };

        debug!(symbol, kind = ?unit.kind, parent = relation.parent(), "declared unit");
        if unit.is_reference() {
            self.references.insert(dimension, symbol.to_string());
        }
        self.order.push(symbol.to_string());
        let unit: &Unit = self.units.entry(symbol.to_string()).or_insert(unit);
        Ok(unit)
    }

    /// Add an alternative spelling for a declared unit
    pub fn alias(&mut self, alias: &'static str, symbol: &str) -> Result<(), DeclarationError> {
        self.check_symbol(alias)?;
        let canonical = self
            .get(symbol)
            .map(|unit| unit.symbol.clone())
            .ok_or_else(|| DeclarationError::UnknownParent {
                symbol: alias.to_string(),
                parent: symbol.to_string(),
            })?;
        self.aliases.insert(alias.to_string(), canonical);
        Ok(())
    }

    /// Get a unit declared so far by symbol or alias
    pub fn get(&self, symbol: &str) -> Option<&Unit> {
        lookup(&self.units, &self.aliases, symbol)
    }

    /// Get a dimension declared so far by name
    pub fn dimension_named(&self, name: &str) -> Option<Dimension> {
        self.dimensions
            .iter()
            .find(|d| d.name == name)
            .map(|d| d.dimension)
    }

    /// Freeze the builder into a read-only table
    pub fn build(self) -> UnitTable {
        UnitTable {
            units: self.units,
            aliases: self.aliases,
            dimensions: self.dimensions,
            order: self.order,
            extensions: self.extensions,
        }
    }

    fn check_symbol(&self, symbol: &str) -> Result<(), DeclarationError> {
        if symbol.is_empty()
            || symbol.chars().any(|c| c.is_whitespace() || RESERVED.contains(&c))
        {
            return Err(DeclarationError::Malformed {
                symbol: symbol.to_string(),
                reason: "symbols must be non-empty without whitespace or operators".to_string(),
            });
        }
        if self.units.contains_key(symbol) || self.aliases.contains_key(symbol) {
            return Err(DeclarationError::DuplicateSymbol(symbol.to_string()));
        }
        Ok(())
    }

    fn check_extension_slots(&self, symbol: &str, dimension: &Dimension) -> Result<(), DeclarationError> {
        match dimension.extension_slots().find(|&slot| slot >= self.dimensions.len()) {
            Some(slot) => Err(DeclarationError::Malformed {
                symbol: symbol.to_string(),
                reason: format!("uses undeclared dimension slot {}", SI_BASE_COUNT + slot),
            }),
            None => Ok(()),
        }
    }
}

fn validate_parameters(symbol: &str, relation: &UnitRelation) -> Result<(), DeclarationError> {
    let reason = match relation {
        UnitRelation::Reference => None,
        UnitRelation::Linear { factor, .. } => (factor.is_zero() || !factor.is_finite())
            .then_some("linear factor must be finite and non-zero"),
        UnitRelation::Affine { scale, offset, .. } => {
            (scale.is_zero() || !scale.is_finite() || !offset.is_finite())
                .then_some("affine scale must be non-zero and both parameters finite")
        }
        UnitRelation::Logarithmic { base, multiplier, .. } => {
            let bad_base = !base.is_finite() || *base <= 0.0 || *base == 1.0;
            let bad_multiplier = !multiplier.is_finite() || *multiplier == 0.0;
            (bad_base || bad_multiplier)
                .then_some("logarithmic base must be positive and not 1, multiplier non-zero")
        }
    };
    match reason {
        Some(reason) => Err(DeclarationError::Malformed {
            symbol: symbol.to_string(),
            reason: reason.to_string(),
        }),
        None => Ok(()),
    }
}

fn lookup<'a>(
    units: &'a HashMap<String, Unit>,
    aliases: &HashMap<String, String>,
    symbol: &str,
) -> Option<&'a Unit> {
    // Try direct lookup first
    if let Some(unit) = units.get(symbol) {
        return Some(unit);
    }
    aliases.get(symbol).and_then(|canonical| units.get(canonical))
}

/// Read-only table of every declared unit
#[derive(Debug)]
pub struct UnitTable {
    units: HashMap<String, Unit>,
    aliases: HashMap<String, String>,
    dimensions: Vec<DimensionInfo>,
    order: Vec<String>,
    extensions: Vec<&'static str>,
}

impl UnitTable {
    /// Get a unit by symbol or alias
    pub fn get(&self, symbol: &str) -> Option<&Unit> {
        lookup(&self.units, &self.aliases, symbol)
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.get(symbol).is_some()
    }

    /// Number of units (aliases not counted)
    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Get all unit symbols in declaration order
    pub fn symbols(&self) -> Vec<&str> {
        self.order.iter().map(|s| s.as_str()).collect()
    }

    /// Get all units of a dimension in declaration order
    pub fn by_dimension(&self, dimension: &Dimension) -> Vec<&Unit> {
        self.order
            .iter()
            .filter_map(|s| self.units.get(s))
            .filter(|u| u.dimension == *dimension)
            .collect()
    }

    /// The reference unit of a dimension, if one was declared
    pub fn reference_unit(&self, dimension: &Dimension) -> Option<&Unit> {
        self.by_dimension(dimension)
            .into_iter()
            .find(|u| u.is_reference())
    }

    /// Look up a declared base dimension by name
    pub fn dimension_named(&self, name: &str) -> Option<Dimension> {
        self.dimensions
            .iter()
            .find(|d| d.name == name)
            .map(|d| d.dimension)
    }

    /// Declared base dimensions in slot order
    pub fn dimensions(&self) -> &[DimensionInfo] {
        &self.dimensions
    }

    /// Names of the extensions installed into this table
    pub fn extensions(&self) -> &[&'static str] {
        &self.extensions
    }

    pub fn has_extension(&self, name: &str) -> bool {
        self.extensions.contains(&name)
    }
}

/// Build and install the process-wide unit table.
///
/// Runs once per process: the first caller's extensions are declared on top
/// of the host units and the outcome is stored. Later calls return that same
/// outcome; asking for an extension that is not part of the installed table
/// fails with `DeclarationError::AlreadyInitialized`.
pub fn initialize(extensions: &[&dyn UnitExtension]) -> Result<&'static UnitTable, DeclarationError> {
    let installed = TABLE.get_or_init(|| build_table(extensions));
    let table = installed.as_ref().map_err(Clone::clone)?;

    if let Some(missing) = extensions.iter().find(|ext| !table.has_extension(ext.name())) {
        warn!(
            extension = missing.name(),
            installed = ?table.extensions(),
            "unit table already initialized without extension"
        );
        return Err(DeclarationError::AlreadyInitialized(missing.name().to_string()));
    }
    Ok(table)
}

fn build_table(extensions: &[&dyn UnitExtension]) -> Result<UnitTable, DeclarationError> {
    let mut builder = UnitTableBuilder::with_builtins()?;
    for extension in extensions {
        extension.declare(&mut builder)?;
        builder.extensions.push(extension.name());
        debug!(extension = extension.name(), "declared extension");
    }
    let table = builder.build();
    info!(
        units = table.len(),
        dimensions = table.dimensions.len(),
        extensions = ?table.extensions,
        "unit table installed"
    );
    Ok(table)
}

/// The installed unit table
pub fn table() -> Result<&'static UnitTable, ConversionError> {
    match TABLE.get() {
        Some(Ok(table)) => Ok(table),
        _ => Err(ConversionError::NotInitialized),
    }
}

pub(crate) fn installed_dimension(dimension: &Dimension) -> Option<&'static DimensionInfo> {
    match TABLE.get() {
        Some(Ok(table)) => table.dimensions.iter().find(|d| d.dimension == *dimension),
        _ => None,
    }
}

pub(crate) fn extension_symbol(slot: usize) -> Option<&'static str> {
    match TABLE.get() {
        Some(Ok(table)) => table.dimensions.get(slot).map(|d| d.symbol),
        _ => None,
    }
}
