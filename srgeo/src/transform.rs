//! Reprojection of spatially referenced geometries and UTM zone selection.

use geo_types::Coord;
use srgeo_crs::{utm, CrsRegistry, Srid};

use crate::error::{Result, SrGeometryError};
use crate::geometry::Georeferenced;
use crate::kernel;

/// Reprojects every coordinate of `geometry` into `target`.
///
/// The variant and the order of points and rings are preserved. If `target` is the CRS of the
/// geometry, an unchanged copy is returned without touching the projection engine. Either all
/// coordinates are transformed or an error is returned.
pub fn reproject<T: Georeferenced>(
    geometry: &T,
    target: Srid,
    registry: &CrsRegistry,
) -> Result<T> {
    let source = geometry.srid();
    if source == target {
        return Ok(geometry.clone());
    }

    let transform = registry.transformation(source, target)?;
    log::trace!("Reprojecting geometry from {source} to {target}");

    geometry.try_map_coords(target, |coord: Coord<f64>| {
        transform
            .apply(coord.x_y())
            .map(Coord::from)
            .map_err(SrGeometryError::from)
    })
}

/// UTM zone CRS matching the location of the geometry.
///
/// The zone is selected by the anchor point of the geometry (its centroid) expressed in WGS84.
pub fn utm_srid_for<T: Georeferenced>(geometry: &T, registry: &CrsRegistry) -> Result<Srid> {
    let anchor = kernel::anchor_point(&geometry.to_geometry()).ok_or_else(|| {
        SrGeometryError::UnsupportedGeometryKind("geometry without coordinates".to_string())
    })?;

    let (lon, lat) = registry.transform(geometry.srid(), Srid::WGS84, anchor.x_y())?;
    Ok(utm::utm_srid(lat, lon)?)
}

/// Reprojects the geometry into the UTM zone of its location.
///
/// All coordinates go to the same zone, chosen by [`utm_srid_for`], even if the geometry spans
/// several zones.
pub fn as_utm<T: Georeferenced>(geometry: &T, registry: &CrsRegistry) -> Result<T> {
    let zone = utm_srid_for(geometry, registry)?;
    reproject(geometry, zone, registry)
}
