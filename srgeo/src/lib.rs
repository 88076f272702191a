//! Spatially referenced geometries.
//!
//! Every [`SrGeometry`] carries the identifier of the coordinate reference system its coordinates
//! are expressed in. On top of this the crate provides reprojection ([`transform`]), selection of
//! the UTM zone of a location and unit-aware area, length and buffer ([`measure`]) that work the
//! same way whether the coordinates are degrees or meters.
//!
//! Planar geometry algorithms come from the [`geo`] crate and projection math from `geodesy`,
//! wrapped by [`srgeo_crs`].
//!
//! ```
//! use srgeo::{Georeferenced, SrPoint, Srid, Unit};
//!
//! let point = SrPoint::from_lat_lon(45.553670, -94.142430).unwrap();
//!
//! let utm = point.as_utm().unwrap();
//! assert_eq!(utm.srid(), Srid::new(32615));
//!
//! let area = point.buffer(5.0, Unit::Meters).unwrap().area(Unit::Meters).unwrap();
//! assert!((area - 78.41).abs() < 0.05);
//! ```

pub mod config;
pub mod error;
#[cfg(feature = "geojson")]
mod geojson;
pub mod geometry;
pub mod kernel;
pub mod measure;
pub mod transform;

pub use config::SrConfig;
pub use error::{Result, SrGeometryError};
pub use geometry::{
    sr_shape, sr_shape_in, GeometryKind, Georeferenced, Shape, SrGeometry, SrMultiPoint,
    SrMultiPolygon, SrMultiPolyline, SrPoint, SrPolygon, SrPolyline, SrShape,
};
pub use measure::{BufferOptions, MetricProjection};
pub use srgeo_crs::{CrsDefinition, CrsRegistry, Dimension, Hemisphere, Srid, Unit};
