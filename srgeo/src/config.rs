//! Application-level defaults.

use geo_types::Geometry;
use serde::{Deserialize, Serialize};
use srgeo_crs::Srid;

use crate::error::Result;
use crate::geometry::{sr_shape, SrGeometry};
use crate::measure::{BufferOptions, MetricProjection, DEFAULT_BUFFER_RESOLUTION};

/// Defaults applied when the caller does not specify a CRS or buffer options.
///
/// Can be loaded from the application configuration file; missing fields take their default
/// values.
///
/// ```
/// use srgeo::{SrConfig, Srid};
///
/// let config: SrConfig = serde_json::from_str(r#"{"default_srid": 3857}"#).unwrap();
/// assert_eq!(config.default_srid(), Srid::WEB_MERCATOR);
/// assert_eq!(config.buffer_resolution(), 16);
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SrConfig {
    default_srid: Srid,
    buffer_resolution: usize,
    metric_projection: MetricProjection,
}

impl Default for SrConfig {
    fn default() -> Self {
        Self {
            default_srid: Srid::WGS84,
            buffer_resolution: DEFAULT_BUFFER_RESOLUTION,
            metric_projection: MetricProjection::Utm,
        }
    }
}

impl SrConfig {
    /// Sets the CRS assigned to geometries created without one.
    pub fn with_default_srid(mut self, srid: Srid) -> Self {
        self.default_srid = srid;
        self
    }

    /// Sets the number of segments per quarter circle used for buffers.
    pub fn with_buffer_resolution(mut self, resolution: usize) -> Self {
        self.buffer_resolution = resolution;
        self
    }

    /// Sets the metric CRS used to measure geometries with angular coordinates.
    pub fn with_metric_projection(mut self, projection: MetricProjection) -> Self {
        self.metric_projection = projection;
        self
    }

    /// CRS assigned to geometries created without one.
    pub fn default_srid(&self) -> Srid {
        self.default_srid
    }

    /// Number of segments per quarter circle used for buffers.
    pub fn buffer_resolution(&self) -> usize {
        self.buffer_resolution
    }

    /// Metric CRS used to measure geometries with angular coordinates.
    pub fn metric_projection(&self) -> MetricProjection {
        self.metric_projection
    }

    /// Wraps a kernel geometry, assigning it the default CRS.
    pub fn sr_shape(&self, geometry: impl Into<Geometry<f64>>) -> Result<SrGeometry> {
        sr_shape(geometry, self.default_srid)
    }

    /// Buffer options built from this configuration.
    pub fn buffer_options(&self) -> BufferOptions {
        BufferOptions::default()
            .with_resolution(self.buffer_resolution)
            .with_projection(self.metric_projection)
    }
}
