//! Error types used by the crate.

use geozero::error::GeozeroError;
use thiserror::Error;

use crate::geometry::GeometryType;

/// Reason a geometry constructor did not produce a value.
///
/// Constructors return this as a regular result. It describes input the factory cannot turn into a geometry,
/// it never hides a panic.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConstructionError {
    /// One of the coordinates is not finite or lies outside of the factory coordinate space.
    #[error("coordinate ({x}, {y}) is outside of the factory coordinate space")]
    InvalidCoordinate {
        /// X (longitude) value of the rejected coordinate.
        x: f64,
        /// Y (latitude) value of the rejected coordinate.
        y: f64,
    },
    /// Arguments do not satisfy the structural requirements of the variant.
    #[error("invalid {variant}: {reason}")]
    InvalidShape {
        /// Variant that was being constructed.
        variant: GeometryType,
        /// Description of the violated requirement.
        reason: &'static str,
    },
    /// A child geometry belongs to a factory with a different configuration.
    #[error("{variant} belongs to a factory with a different configuration")]
    ForeignFactory {
        /// Variant of the rejected child geometry.
        variant: GeometryType,
    },
    /// The geometry kind cannot be represented by this factory.
    #[error("{0} is not supported by the factory")]
    Unsupported(String),
}

/// Factory error type.
#[derive(Debug, Error)]
pub enum GeoFactoryError {
    /// A geometry was given to a factory operation that does not own it.
    #[error("invalid geometry: {0}")]
    InvalidGeometry(&'static str),
    /// The projector could not map a coordinate.
    #[error("failed to project coordinate ({x}, {y})")]
    Projection {
        /// X value of the input coordinate.
        x: f64,
        /// Y value of the input coordinate.
        y: f64,
    },
    /// A geometry could not be rebuilt in the target coordinate space.
    #[error("failed to construct geometry: {0}")]
    Construction(#[from] ConstructionError),
    /// Configuration tag is not known.
    #[error("unknown factory namespace: {0}")]
    UnknownNamespace(String),
    /// Inconsistent factory configuration.
    #[error("configuration error: {0}")]
    Configuration(String),
}

/// Error returned by the WKT and WKB readers.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The input is not valid WKT or WKB.
    #[error("malformed input: {0}")]
    Format(#[from] GeozeroError),
    /// Hex encoded WKB could not be decoded.
    #[error("invalid hex string: {0}")]
    Hex(#[from] hex::FromHexError),
    /// The input is well formed, but describes a geometry the factory rejects.
    #[error(transparent)]
    Construction(#[from] ConstructionError),
    /// The input did not contain any geometry.
    #[error("input does not contain a geometry")]
    Empty,
}
