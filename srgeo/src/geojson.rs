//! Conversion between [`SrGeometry`] and GeoJSON geometries.
//!
//! GeoJSON has no CRS member, so the CRS is supplied by the caller when reading and dropped when
//! writing. Use [`SrGeometry::as_wgs84`](crate::Georeferenced::as_wgs84) first to produce
//! standard-conforming output.

use srgeo_crs::Srid;

use crate::error::{Result, SrGeometryError};
use crate::geometry::{sr_shape, SrGeometry};

impl SrGeometry {
    /// GeoJSON geometry with the same coordinates.
    pub fn to_geojson(&self) -> ::geojson::Geometry {
        ::geojson::Geometry::new(::geojson::Value::from(&self.to_geometry()))
    }

    /// Reads a GeoJSON geometry whose coordinates are expressed in `srid`.
    pub fn from_geojson(geometry: ::geojson::Geometry, srid: Srid) -> Result<Self> {
        let geometry = geo_types::Geometry::<f64>::try_from(geometry)
            .map_err(|err| SrGeometryError::UnsupportedGeometryKind(err.to_string()))?;
        sr_shape(geometry, srid)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::geometry::GeometryKind;

    fn parse(text: &str) -> ::geojson::Geometry {
        text.parse::<::geojson::GeoJson>()
            .unwrap()
            .try_into()
            .unwrap()
    }

    #[test]
    fn reads_and_writes_geojson() {
        let parsed = parse(
            r#"{"type": "Polygon", "coordinates": [
                [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]
            ]}"#,
        );

        let geometry = SrGeometry::from_geojson(parsed.clone(), Srid::WGS84).unwrap();
        assert_eq!(geometry.kind(), GeometryKind::Polygon);
        assert_eq!(geometry.srid(), Srid::WGS84);
        assert_eq!(geometry.to_geojson(), parsed);
    }

    #[test]
    fn collections_are_rejected() {
        let parsed = parse(
            r#"{"type": "GeometryCollection", "geometries": [
                {"type": "Point", "coordinates": [0.0, 0.0]}
            ]}"#,
        );

        assert_matches!(
            SrGeometry::from_geojson(parsed, Srid::WGS84),
            Err(SrGeometryError::UnsupportedGeometryKind(_))
        );
    }

    #[test]
    fn unknown_crs_is_rejected() {
        let parsed = parse(r#"{"type": "Point", "coordinates": [1.0, 2.0]}"#);

        assert_matches!(
            SrGeometry::from_geojson(parsed, Srid::new(999999999)),
            Err(SrGeometryError::UnresolvableCrs(_))
        );
    }
}
