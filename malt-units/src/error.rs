//! Error types for declarations, conversions and equivalences

use malt_core::NumberError;
use serde::Serialize;
use thiserror::Error;

use crate::Dimension;

/// A unit or dimension declaration was rejected
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
pub enum DeclarationError {
    #[error("unit symbol '{0}' is already declared")]
    DuplicateSymbol(String),

    #[error("dimension '{name}' (symbol '{symbol}') is already declared")]
    DuplicateDimension { name: String, symbol: String },

    #[error("no free extension slot left for dimension '{0}'")]
    NoFreeDimensionSlot(String),

    #[error("unit '{symbol}' refers to undeclared parent '{parent}'")]
    UnknownParent { symbol: String, parent: String },

    #[error("unit '{symbol}' is declared as {} but its parent '{parent}' is {}", .declared.describe(), .actual.describe())]
    DimensionMismatch {
        symbol: String,
        parent: String,
        declared: Dimension,
        actual: Dimension,
    },

    #[error("{} already has reference unit '{existing}', cannot add reference '{symbol}'", .dimension.describe())]
    DuplicateReference {
        symbol: String,
        existing: String,
        dimension: Dimension,
    },

    #[error("unit '{symbol}' cannot be derived from logarithmic unit '{parent}'")]
    LogarithmicParent { symbol: String, parent: String },

    #[error("malformed declaration of '{symbol}': {reason}")]
    Malformed { symbol: String, reason: String },

    #[error("unit table was already initialized without extension '{0}'")]
    AlreadyInitialized(String),
}

/// A cross-dimension conversion could not be resolved
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
pub enum EquivalenceError {
    #[error("converting {} to {} needs an equivalence context", .from.describe(), .to.describe())]
    MissingContext { from: Dimension, to: Dimension },

    #[error("{context} equivalence cannot convert {} to {}", .from.describe(), .to.describe())]
    Unsupported {
        context: String,
        from: Dimension,
        to: Dimension,
    },

    #[error("{context} equivalence failed: {reason}")]
    Numeric { context: String, reason: String },
}

/// Errors that can occur during unit conversion
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
pub enum ConversionError {
    #[error("cannot convert {from} ({from_dim}) to {to} ({to_dim}): incompatible dimensions")]
    IncompatibleDimensions {
        from: String,
        to: String,
        from_dim: Dimension,
        to_dim: Dimension,
    },

    #[error("unknown unit: {0}")]
    UnknownUnit(String),

    #[error("invalid unit expression: {0}")]
    Parse(String),

    #[error("unit '{0}' is not linear and cannot be combined")]
    NonlinearCompound(String),

    #[error("dimension exponent overflow in {0}")]
    DimensionOverflow(String),

    #[error("unit table is not initialized")]
    NotInitialized,

    #[error("numeric error: {0}")]
    Number(#[from] NumberError),

    #[error(transparent)]
    Equivalence(#[from] EquivalenceError),
}
