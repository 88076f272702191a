//! Unit-aware area, length and buffer.
//!
//! Each operation picks a route depending on the native unit of the geometry's CRS and the unit
//! the caller asked for:
//!
//! * the units match: the kernel value is used as is;
//! * both are linear: the kernel value is scaled;
//! * the native unit is angular: the geometry is reprojected into a metric CRS chosen by
//!   [`MetricProjection`] and measured there.
//!
//! Asking for an angular unit on a geometry with a linear CRS is an
//! [`UnsupportedUnit`](SrGeometryError::UnsupportedUnit) error. Buffered geometries are always
//! returned in the CRS of the input.

use geo_types::MultiPolygon;
use serde::{Deserialize, Serialize};
use srgeo_crs::{CrsRegistry, Dimension, Srid, Unit};

use crate::error::{Result, SrGeometryError};
use crate::geometry::{Georeferenced, SrGeometry, SrShape};
use crate::kernel;
use crate::transform;

/// Default number of segments used to approximate a quarter of a circle.
pub const DEFAULT_BUFFER_RESOLUTION: usize = 16;

/// Largest accepted number of segments per quarter circle.
pub const MAX_BUFFER_RESOLUTION: usize = 10_000;

/// Metric CRS used to measure geometries whose CRS is angular.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricProjection {
    /// UTM zone of the geometry location. Accurate for localized features.
    #[default]
    Utm,
    /// Web Mercator. Distances are exaggerated away from the equator.
    WebMercator,
    /// A specific CRS, which must have a linear unit.
    Fixed(Srid),
}

impl MetricProjection {
    fn working_srid<T: Georeferenced>(
        &self,
        geometry: &T,
        registry: &CrsRegistry,
    ) -> Result<Srid> {
        match self {
            MetricProjection::Utm => transform::utm_srid_for(geometry, registry),
            MetricProjection::WebMercator => Ok(Srid::WEB_MERCATOR),
            MetricProjection::Fixed(srid) => Ok(*srid),
        }
    }
}

/// Parameters of [`buffer`].
#[derive(Debug, Copy, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct BufferOptions {
    resolution: usize,
    projection: MetricProjection,
}

impl Default for BufferOptions {
    fn default() -> Self {
        Self {
            resolution: DEFAULT_BUFFER_RESOLUTION,
            projection: MetricProjection::default(),
        }
    }
}

impl BufferOptions {
    /// Sets the number of segments per quarter circle.
    ///
    /// [`buffer`] rejects `0` and values above [`MAX_BUFFER_RESOLUTION`].
    pub fn with_resolution(mut self, resolution: usize) -> Self {
        self.resolution = resolution;
        self
    }

    /// Sets the metric CRS used for geometries with angular coordinates.
    pub fn with_projection(mut self, projection: MetricProjection) -> Self {
        self.projection = projection;
        self
    }

    /// Number of segments per quarter circle.
    pub fn resolution(&self) -> usize {
        self.resolution
    }

    /// Metric CRS used for geometries with angular coordinates.
    pub fn projection(&self) -> MetricProjection {
        self.projection
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
enum Route {
    Native,
    Scaled { native: Unit },
    Projected { srid: Srid, unit: Unit },
}

fn route<T: Georeferenced>(
    geometry: &T,
    units: Unit,
    projection: MetricProjection,
    registry: &CrsRegistry,
) -> Result<Route> {
    let native = registry.unit(geometry.srid())?;
    let route = if native == units {
        Route::Native
    } else if !units.is_linear() {
        return Err(SrGeometryError::UnsupportedUnit(format!(
            "cannot express {} geometry in {units}",
            geometry.srid()
        )));
    } else if native.is_linear() {
        Route::Scaled { native }
    } else {
        let srid = projection.working_srid(geometry, registry)?;
        let unit = registry.unit(srid)?;
        if !unit.is_linear() {
            return Err(SrGeometryError::UnsupportedUnit(format!(
                "{srid} is not a metric CRS"
            )));
        }
        Route::Projected { srid, unit }
    };

    log::debug!("Measuring {} geometry in {units}: {route:?}", geometry.srid());
    Ok(route)
}

fn measured<T: Georeferenced>(
    geometry: &T,
    units: Unit,
    projection: MetricProjection,
    registry: &CrsRegistry,
    dimension: Dimension,
    measure: fn(&geo_types::Geometry<f64>) -> f64,
) -> Result<f64> {
    let value = match route(geometry, units, projection, registry)? {
        Route::Native => measure(&geometry.to_geometry()),
        Route::Scaled { native } => {
            native.convert(measure(&geometry.to_geometry()), units, dimension)?
        }
        Route::Projected { srid, unit } => {
            let projected = transform::reproject(geometry, srid, registry)?;
            unit.convert(measure(&projected.to_geometry()), units, dimension)?
        }
    };

    Ok(value)
}

/// Area of the geometry in square `units`.
pub fn area<T: Georeferenced>(geometry: &T, units: Unit, registry: &CrsRegistry) -> Result<f64> {
    area_with(geometry, units, MetricProjection::default(), registry)
}

/// Area of the geometry in square `units`, measuring angular geometries in `projection`.
pub fn area_with<T: Georeferenced>(
    geometry: &T,
    units: Unit,
    projection: MetricProjection,
    registry: &CrsRegistry,
) -> Result<f64> {
    measured(
        geometry,
        units,
        projection,
        registry,
        Dimension::Area,
        kernel::area,
    )
}

/// Length of the geometry in `units`. Points have zero length, polygons report their perimeter.
pub fn length<T: Georeferenced>(geometry: &T, units: Unit, registry: &CrsRegistry) -> Result<f64> {
    length_with(geometry, units, MetricProjection::default(), registry)
}

/// Length of the geometry in `units`, measuring angular geometries in `projection`.
pub fn length_with<T: Georeferenced>(
    geometry: &T,
    units: Unit,
    projection: MetricProjection,
    registry: &CrsRegistry,
) -> Result<f64> {
    measured(
        geometry,
        units,
        projection,
        registry,
        Dimension::Length,
        kernel::length,
    )
}

/// Buffers the geometry by `radius` expressed in `units`.
///
/// The result is expressed in the CRS of the input. It is a polygon when the buffer has a single
/// part and a multipolygon otherwise.
///
/// A non-positive radius on points and lines, or a negative radius that erodes a polygon
/// completely, produces an empty multipolygon. Such a value has no coordinates and reports
/// [`SrGeometry::is_empty`]; it cannot be rebuilt with [`sr_shape`](crate::sr_shape).
///
/// # Errors
///
/// [`SrGeometryError::InvalidArgument`] for a non-finite radius or a resolution outside
/// `1..=MAX_BUFFER_RESOLUTION`. Unit and CRS problems are reported as in [`area`].
///
/// ```
/// use srgeo::{measure, CrsRegistry, SrPoint, Unit};
/// use srgeo::measure::BufferOptions;
///
/// let registry = CrsRegistry::shared();
/// let point = SrPoint::from_lat_lon(45.553670, -94.142430).unwrap();
/// let options = BufferOptions::default().with_resolution(1000);
/// let buffered = measure::buffer(&point, 5.0, Unit::Meters, &options, registry).unwrap();
///
/// assert_eq!(buffered.srid(), point.srid());
/// let area = measure::area(&buffered, Unit::Meters, registry).unwrap();
/// assert!((area - 78.5398).abs() < 0.01);
/// ```
pub fn buffer<T: Georeferenced>(
    geometry: &T,
    radius: f64,
    units: Unit,
    options: &BufferOptions,
    registry: &CrsRegistry,
) -> Result<SrGeometry> {
    if !radius.is_finite() {
        return Err(SrGeometryError::InvalidArgument(format!(
            "buffer radius must be finite, got {radius}"
        )));
    }
    if !(1..=MAX_BUFFER_RESOLUTION).contains(&options.resolution) {
        return Err(SrGeometryError::InvalidArgument(format!(
            "buffer resolution must be in 1..={MAX_BUFFER_RESOLUTION}, got {}",
            options.resolution
        )));
    }

    let source = geometry.srid();
    let buffered = match route(geometry, units, options.projection, registry)? {
        Route::Native => wrap(
            kernel::buffer(&geometry.to_geometry(), radius, options.resolution),
            source,
        ),
        Route::Scaled { native } => {
            let distance = units.convert(radius, native, Dimension::Length)?;
            wrap(
                kernel::buffer(&geometry.to_geometry(), distance, options.resolution),
                source,
            )
        }
        Route::Projected { srid, unit } => {
            let distance = units.convert(radius, unit, Dimension::Length)?;
            let projected = transform::reproject(geometry, srid, registry)?;
            let buffered = wrap(
                kernel::buffer(&projected.to_geometry(), distance, options.resolution),
                srid,
            );
            transform::reproject(&buffered, source, registry)?
        }
    };

    Ok(buffered)
}

fn wrap(mut polygons: MultiPolygon<f64>, srid: Srid) -> SrGeometry {
    if polygons.0.len() == 1 {
        if let Some(polygon) = polygons.0.pop() {
            return SrShape::new(polygon, srid).into();
        }
    }

    SrShape::new(polygons, srid).into()
}
