//! Error types used by the crate.

use srgeo_crs::{CrsError, Srid};
use thiserror::Error;

/// Errors of operations on spatially referenced geometries.
///
/// The variants fall into three groups: bad input ([`InvalidCoordinate`](Self::InvalidCoordinate),
/// [`UnsupportedGeometryKind`](Self::UnsupportedGeometryKind),
/// [`UnsupportedUnit`](Self::UnsupportedUnit), [`InvalidArgument`](Self::InvalidArgument)),
/// environment problems ([`UnresolvableCrs`](Self::UnresolvableCrs),
/// [`InvalidDefinition`](Self::InvalidDefinition)) and transformation domain problems
/// ([`Transformation`](Self::Transformation)).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SrGeometryError {
    /// Latitude or longitude outside of the valid range.
    #[error("invalid geographic coordinate: lat={lat}, lon={lon}")]
    InvalidCoordinate {
        /// Latitude in degrees.
        lat: f64,
        /// Longitude in degrees.
        lon: f64,
    },
    /// The kernel geometry does not match any supported variant.
    #[error("unsupported geometry: {0}")]
    UnsupportedGeometryKind(String),
    /// The CRS identifier is not known to the registry.
    #[error("unresolvable spatial reference {0}")]
    UnresolvableCrs(Srid),
    /// The CRS definition cannot be used by the projection engine.
    #[error("invalid CRS definition '{0}'")]
    InvalidDefinition(String),
    /// A coordinate cannot be transformed between two known CRSs.
    #[error("failed to transform from {from} to {to}: {reason}")]
    Transformation {
        /// Source CRS.
        from: Srid,
        /// Target CRS.
        to: Srid,
        /// Details.
        reason: String,
    },
    /// The requested unit cannot be mapped to a linear CRS.
    #[error("unsupported unit: {0}")]
    UnsupportedUnit(String),
    /// Operation parameter is out of range.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl From<CrsError> for SrGeometryError {
    fn from(value: CrsError) -> Self {
        match value {
            CrsError::UnresolvableCrs(srid) => Self::UnresolvableCrs(srid),
            CrsError::Transformation {
                from,
                to,
                x,
                y,
                reason,
            } => Self::Transformation {
                from,
                to,
                reason: format!("({x}, {y}): {reason}"),
            },
            CrsError::InvalidCoordinate { lat, lon } => Self::InvalidCoordinate { lat, lon },
            CrsError::UnsupportedUnit(unit) => Self::UnsupportedUnit(unit),
            CrsError::InvalidDefinition(definition) => Self::InvalidDefinition(definition),
        }
    }
}

/// Result alias for this crate.
pub type Result<T> = std::result::Result<T, SrGeometryError>;
