//! Error type used by the crate.

use thiserror::Error;

use crate::srid::Srid;

/// Error enum.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CrsError {
    /// The registry has no definition for the identifier.
    #[error("unresolvable spatial reference {0}")]
    UnresolvableCrs(Srid),
    /// Both CRSs are known, but the coordinate cannot be transformed between them.
    #[error("failed to transform ({x}, {y}) from {from} to {to}: {reason}")]
    Transformation {
        /// Source CRS.
        from: Srid,
        /// Target CRS.
        to: Srid,
        /// X (or longitude) of the offending coordinate.
        x: f64,
        /// Y (or latitude) of the offending coordinate.
        y: f64,
        /// What went wrong.
        reason: String,
    },
    /// Latitude or longitude outside of the valid angular range.
    #[error("invalid geographic coordinate: lat={lat}, lon={lon}")]
    InvalidCoordinate {
        /// Latitude in degrees.
        lat: f64,
        /// Longitude in degrees.
        lon: f64,
    },
    /// The unit has no linear CRS counterpart or is not known at all.
    #[error("unsupported unit: {0}")]
    UnsupportedUnit(String),
    /// The operator pipeline of a CRS definition was rejected by the projection engine.
    #[error("invalid CRS definition '{0}'")]
    InvalidDefinition(String),
}

/// Result alias for this crate.
pub type Result<T> = std::result::Result<T, CrsError>;
