//! Geometries bound to the coordinate reference system their coordinates are expressed in.
//!
//! [`SrShape<G>`] pairs a kernel geometry with a [`Srid`]; [`SrGeometry`] is the closed set of
//! supported shapes. Values are immutable: reprojection and buffering always produce new ones.

use std::fmt;

use geo::MapCoords;
use geo_types::{
    Coord, Geometry, LineString, MultiLineString, MultiPoint, MultiPolygon, Point, Polygon,
};
use serde::{Deserialize, Serialize};
use srgeo_crs::{CrsRegistry, Srid, Unit};

use crate::error::{Result, SrGeometryError};
use crate::measure::{self, BufferOptions};
use crate::{kernel, transform};

mod shapes;

/// Tag of a geometry variant.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum GeometryKind {
    /// Single point.
    Point,
    /// Set of points.
    MultiPoint,
    /// Line string.
    Polyline,
    /// Set of line strings.
    MultiPolyline,
    /// Polygon with optional holes.
    Polygon,
    /// Set of polygons.
    MultiPolygon,
}

impl GeometryKind {
    /// Name of the variant.
    pub fn as_str(&self) -> &'static str {
        match self {
            GeometryKind::Point => "Point",
            GeometryKind::MultiPoint => "MultiPoint",
            GeometryKind::Polyline => "Polyline",
            GeometryKind::MultiPolyline => "MultiPolyline",
            GeometryKind::Polygon => "Polygon",
            GeometryKind::MultiPolygon => "MultiPolygon",
        }
    }
}

impl fmt::Display for GeometryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kernel geometry types that can be wrapped into an [`SrShape`].
pub trait Shape: Clone + fmt::Debug + Into<Geometry<f64>> {
    /// Variant tag of the shape.
    const KIND: GeometryKind;

    /// Copy of the shape as a generic kernel geometry.
    fn to_geometry(&self) -> Geometry<f64>;

    /// Same shape with every coordinate replaced by `func(coordinate)`.
    fn try_map_coords<E>(
        &self,
        func: impl Fn(Coord<f64>) -> std::result::Result<Coord<f64>, E> + Copy,
    ) -> std::result::Result<Self, E>;

    /// Wraps the shape into the matching [`SrGeometry`] variant.
    fn into_sr_geometry(shape: SrShape<Self>) -> SrGeometry;
}

macro_rules! impl_shape {
    ($shape:ident, $kind:ident) => {
        impl Shape for $shape<f64> {
            const KIND: GeometryKind = GeometryKind::$kind;

            fn to_geometry(&self) -> Geometry<f64> {
                Geometry::$shape(self.clone())
            }

            fn try_map_coords<E>(
                &self,
                func: impl Fn(Coord<f64>) -> std::result::Result<Coord<f64>, E> + Copy,
            ) -> std::result::Result<Self, E> {
                MapCoords::try_map_coords(self, func)
            }

            fn into_sr_geometry(shape: SrShape<Self>) -> SrGeometry {
                SrGeometry::$kind(shape)
            }
        }
    };
}

impl_shape!(Point, Point);
impl_shape!(MultiPoint, MultiPoint);
impl_shape!(LineString, Polyline);
impl_shape!(MultiLineString, MultiPolyline);
impl_shape!(Polygon, Polygon);
impl_shape!(MultiPolygon, MultiPolygon);

/// Kernel geometry together with the CRS of its coordinates.
///
/// Built with [`SrShape::try_new`] or [`sr_shape`], which reject malformed geometries and CRSs the
/// registry cannot resolve. Deserialization applies the same checks against the shared registry.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(
    try_from = "RawShape<G>",
    bound(deserialize = "G: Shape + Deserialize<'de>")
)]
pub struct SrShape<G> {
    srid: Srid,
    geometry: G,
}

#[derive(Deserialize)]
struct RawShape<G> {
    srid: Srid,
    geometry: G,
}

impl<G: Shape> TryFrom<RawShape<G>> for SrShape<G> {
    type Error = SrGeometryError;

    fn try_from(raw: RawShape<G>) -> Result<Self> {
        Self::try_new(raw.geometry, raw.srid)
    }
}

/// Spatially referenced point.
pub type SrPoint = SrShape<Point<f64>>;
/// Spatially referenced set of points.
pub type SrMultiPoint = SrShape<MultiPoint<f64>>;
/// Spatially referenced line string.
pub type SrPolyline = SrShape<LineString<f64>>;
/// Spatially referenced set of line strings.
pub type SrMultiPolyline = SrShape<MultiLineString<f64>>;
/// Spatially referenced polygon.
pub type SrPolygon = SrShape<Polygon<f64>>;
/// Spatially referenced set of polygons.
pub type SrMultiPolygon = SrShape<MultiPolygon<f64>>;

impl<G: Shape> SrShape<G> {
    /// Wraps a geometry without any checks. Callers guarantee that `srid` resolves.
    pub(crate) fn new(geometry: G, srid: Srid) -> Self {
        Self { srid, geometry }
    }

    /// Wraps a kernel geometry whose coordinates are expressed in `srid`.
    ///
    /// Fails with [`SrGeometryError::UnsupportedGeometryKind`] for empty or malformed geometries
    /// and with [`SrGeometryError::UnresolvableCrs`] if the shared registry does not know `srid`.
    pub fn try_new(geometry: G, srid: Srid) -> Result<Self> {
        Self::try_new_in(geometry, srid, CrsRegistry::shared())
    }

    /// Same as [`SrShape::try_new`], resolving `srid` in the given registry.
    pub fn try_new_in(geometry: G, srid: Srid, registry: &CrsRegistry) -> Result<Self> {
        check_shape(&geometry.to_geometry())?;
        registry.resolve(srid)?;
        Ok(Self::new(geometry, srid))
    }

    /// CRS of the coordinates.
    pub fn srid(&self) -> Srid {
        self.srid
    }

    /// The kernel geometry.
    pub fn geometry(&self) -> &G {
        &self.geometry
    }

    /// Unwraps the kernel geometry.
    pub fn into_inner(self) -> G {
        self.geometry
    }

    /// Variant tag.
    pub fn kind(&self) -> GeometryKind {
        G::KIND
    }

    /// Number of coordinates.
    pub fn coords_count(&self) -> usize {
        kernel::coords_count(&self.geometry.to_geometry())
    }

    /// Coordinates as `(x, y)` pairs in traversal order.
    pub fn coords(&self) -> Vec<(f64, f64)> {
        kernel::coords(&self.geometry.to_geometry())
    }

    /// True if the shape has no coordinates, as a fully eroded buffer.
    pub fn is_empty(&self) -> bool {
        self.coords_count() == 0
    }
}

impl<G: Shape> PartialEq for SrShape<G> {
    fn eq(&self, other: &Self) -> bool {
        self.srid == other.srid
            && kernel::topo_equals(&self.geometry.to_geometry(), &other.geometry.to_geometry())
    }
}

impl<G: Shape> From<SrShape<G>> for SrGeometry {
    fn from(value: SrShape<G>) -> Self {
        G::into_sr_geometry(value)
    }
}

/// A spatially referenced geometry of any supported shape.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(tag = "type")]
pub enum SrGeometry {
    /// Point.
    Point(SrPoint),
    /// Set of points.
    MultiPoint(SrMultiPoint),
    /// Line string.
    Polyline(SrPolyline),
    /// Set of line strings.
    MultiPolyline(SrMultiPolyline),
    /// Polygon.
    Polygon(SrPolygon),
    /// Set of polygons.
    MultiPolygon(SrMultiPolygon),
}

impl SrGeometry {
    /// CRS of the coordinates.
    pub fn srid(&self) -> Srid {
        match self {
            SrGeometry::Point(v) => v.srid(),
            SrGeometry::MultiPoint(v) => v.srid(),
            SrGeometry::Polyline(v) => v.srid(),
            SrGeometry::MultiPolyline(v) => v.srid(),
            SrGeometry::Polygon(v) => v.srid(),
            SrGeometry::MultiPolygon(v) => v.srid(),
        }
    }

    /// Variant tag.
    pub fn kind(&self) -> GeometryKind {
        match self {
            SrGeometry::Point(_) => GeometryKind::Point,
            SrGeometry::MultiPoint(_) => GeometryKind::MultiPoint,
            SrGeometry::Polyline(_) => GeometryKind::Polyline,
            SrGeometry::MultiPolyline(_) => GeometryKind::MultiPolyline,
            SrGeometry::Polygon(_) => GeometryKind::Polygon,
            SrGeometry::MultiPolygon(_) => GeometryKind::MultiPolygon,
        }
    }

    /// Copy of the kernel geometry.
    pub fn to_geometry(&self) -> Geometry<f64> {
        match self {
            SrGeometry::Point(v) => v.geometry().to_geometry(),
            SrGeometry::MultiPoint(v) => v.geometry().to_geometry(),
            SrGeometry::Polyline(v) => v.geometry().to_geometry(),
            SrGeometry::MultiPolyline(v) => v.geometry().to_geometry(),
            SrGeometry::Polygon(v) => v.geometry().to_geometry(),
            SrGeometry::MultiPolygon(v) => v.geometry().to_geometry(),
        }
    }

    /// Unwraps the kernel geometry.
    pub fn into_geometry(self) -> Geometry<f64> {
        match self {
            SrGeometry::Point(v) => v.into_inner().into(),
            SrGeometry::MultiPoint(v) => v.into_inner().into(),
            SrGeometry::Polyline(v) => v.into_inner().into(),
            SrGeometry::MultiPolyline(v) => v.into_inner().into(),
            SrGeometry::Polygon(v) => v.into_inner().into(),
            SrGeometry::MultiPolygon(v) => v.into_inner().into(),
        }
    }

    /// Number of coordinates.
    pub fn coords_count(&self) -> usize {
        kernel::coords_count(&self.to_geometry())
    }

    /// Coordinates as `(x, y)` pairs in traversal order.
    pub fn coords(&self) -> Vec<(f64, f64)> {
        kernel::coords(&self.to_geometry())
    }

    /// True if the geometry has no coordinates.
    ///
    /// Only [`measure::buffer`] produces such values: an empty multipolygon for a buffer that
    /// covers nothing.
    pub fn is_empty(&self) -> bool {
        self.coords_count() == 0
    }

    /// The point, if this is a point.
    pub fn as_point(&self) -> Option<&SrPoint> {
        match self {
            SrGeometry::Point(v) => Some(v),
            _ => None,
        }
    }

    /// The line string, if this is a polyline.
    pub fn as_polyline(&self) -> Option<&SrPolyline> {
        match self {
            SrGeometry::Polyline(v) => Some(v),
            _ => None,
        }
    }

    /// The polygon, if this is a polygon.
    pub fn as_polygon(&self) -> Option<&SrPolygon> {
        match self {
            SrGeometry::Polygon(v) => Some(v),
            _ => None,
        }
    }

    /// The polygons, if this is a multipolygon.
    pub fn as_multi_polygon(&self) -> Option<&SrMultiPolygon> {
        match self {
            SrGeometry::MultiPolygon(v) => Some(v),
            _ => None,
        }
    }

    fn try_map_coords<E>(
        &self,
        srid: Srid,
        func: impl Fn(Coord<f64>) -> std::result::Result<Coord<f64>, E> + Copy,
    ) -> std::result::Result<Self, E> {
        Ok(match self {
            SrGeometry::Point(v) => SrGeometry::Point(v.try_map_coords(srid, func)?),
            SrGeometry::MultiPoint(v) => SrGeometry::MultiPoint(v.try_map_coords(srid, func)?),
            SrGeometry::Polyline(v) => SrGeometry::Polyline(v.try_map_coords(srid, func)?),
            SrGeometry::MultiPolyline(v) => {
                SrGeometry::MultiPolyline(v.try_map_coords(srid, func)?)
            }
            SrGeometry::Polygon(v) => SrGeometry::Polygon(v.try_map_coords(srid, func)?),
            SrGeometry::MultiPolygon(v) => {
                SrGeometry::MultiPolygon(v.try_map_coords(srid, func)?)
            }
        })
    }
}

/// Same CRS and the same point set. The variant does not matter: a polygon equals a multipolygon
/// made of that polygon alone.
impl PartialEq for SrGeometry {
    fn eq(&self, other: &Self) -> bool {
        self.srid() == other.srid()
            && kernel::topo_equals(&self.to_geometry(), &other.to_geometry())
    }
}

impl fmt::Display for SrGeometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}({} coordinates, {})",
            self.kind(),
            self.coords_count(),
            self.srid()
        )
    }
}

/// Values that carry a kernel geometry and the CRS of its coordinates.
///
/// Implemented by every [`SrShape`] and by [`SrGeometry`]. Reprojection, UTM conversion and
/// unit-aware measurement are available through the provided methods, which use the process-wide
/// [`CrsRegistry::shared`]. The functions in
/// [`transform`](crate::transform) and [`measure`](crate::measure) accept an explicit registry.
pub trait Georeferenced: Clone {
    /// CRS of the coordinates.
    fn srid(&self) -> Srid;

    /// Copy of the kernel geometry.
    fn to_geometry(&self) -> Geometry<f64>;

    /// Same value with every coordinate replaced by `func(coordinate)` and tagged with `srid`.
    ///
    /// The structure (point order, ring order) is preserved.
    fn try_map_coords<E>(
        &self,
        srid: Srid,
        func: impl Fn(Coord<f64>) -> std::result::Result<Coord<f64>, E> + Copy,
    ) -> std::result::Result<Self, E>;

    /// Copy of the geometry reprojected into `target`.
    fn to_srid(&self, target: Srid) -> Result<Self> {
        transform::reproject(self, target, CrsRegistry::shared())
    }

    /// Copy of the geometry in WGS84 longitude/latitude.
    fn as_wgs84(&self) -> Result<Self> {
        self.to_srid(Srid::WGS84)
    }

    /// Copy of the geometry in the UTM zone of its location.
    fn as_utm(&self) -> Result<Self> {
        transform::as_utm(self, CrsRegistry::shared())
    }

    /// Area in square `units`.
    fn area(&self, units: Unit) -> Result<f64> {
        measure::area(self, units, CrsRegistry::shared())
    }

    /// Length in `units`.
    fn length(&self, units: Unit) -> Result<f64> {
        measure::length(self, units, CrsRegistry::shared())
    }

    /// Buffer of `radius` in `units` with default options, in the CRS of the geometry.
    fn buffer(&self, radius: f64, units: Unit) -> Result<SrGeometry> {
        measure::buffer(
            self,
            radius,
            units,
            &BufferOptions::default(),
            CrsRegistry::shared(),
        )
    }
}

impl<G: Shape> Georeferenced for SrShape<G> {
    fn srid(&self) -> Srid {
        self.srid
    }

    fn to_geometry(&self) -> Geometry<f64> {
        self.geometry.to_geometry()
    }

    fn try_map_coords<E>(
        &self,
        srid: Srid,
        func: impl Fn(Coord<f64>) -> std::result::Result<Coord<f64>, E> + Copy,
    ) -> std::result::Result<Self, E> {
        Ok(SrShape::new(self.geometry.try_map_coords(func)?, srid))
    }
}

impl Georeferenced for SrGeometry {
    fn srid(&self) -> Srid {
        SrGeometry::srid(self)
    }

    fn to_geometry(&self) -> Geometry<f64> {
        SrGeometry::to_geometry(self)
    }

    fn try_map_coords<E>(
        &self,
        srid: Srid,
        func: impl Fn(Coord<f64>) -> std::result::Result<Coord<f64>, E> + Copy,
    ) -> std::result::Result<Self, E> {
        SrGeometry::try_map_coords(self, srid, func)
    }
}

/// Wraps a kernel geometry into the [`SrGeometry`] variant matching its shape.
///
/// `Line` becomes a polyline, `Rect` and `Triangle` become polygons. Geometry collections, empty
/// or malformed geometries and geometries with non-finite coordinates are rejected with
/// [`SrGeometryError::UnsupportedGeometryKind`]. A `srid` unknown to the shared registry is
/// rejected with [`SrGeometryError::UnresolvableCrs`].
pub fn sr_shape(geometry: impl Into<Geometry<f64>>, srid: Srid) -> Result<SrGeometry> {
    sr_shape_in(geometry, srid, CrsRegistry::shared())
}

/// Same as [`sr_shape`], resolving `srid` in the given registry.
pub fn sr_shape_in(
    geometry: impl Into<Geometry<f64>>,
    srid: Srid,
    registry: &CrsRegistry,
) -> Result<SrGeometry> {
    let wrapped: SrGeometry = match geometry.into() {
        Geometry::Point(point) => SrShape::try_new_in(point, srid, registry)?.into(),
        Geometry::Line(line) => {
            let line_string = LineString::new(vec![line.start, line.end]);
            SrShape::try_new_in(line_string, srid, registry)?.into()
        }
        Geometry::LineString(line_string) => {
            SrShape::try_new_in(line_string, srid, registry)?.into()
        }
        Geometry::Polygon(polygon) => SrShape::try_new_in(polygon, srid, registry)?.into(),
        Geometry::Rect(rect) => SrShape::try_new_in(rect.to_polygon(), srid, registry)?.into(),
        Geometry::Triangle(triangle) => {
            SrShape::try_new_in(triangle.to_polygon(), srid, registry)?.into()
        }
        Geometry::MultiPoint(mp) => SrShape::try_new_in(mp, srid, registry)?.into(),
        Geometry::MultiLineString(mls) => SrShape::try_new_in(mls, srid, registry)?.into(),
        Geometry::MultiPolygon(mp) => SrShape::try_new_in(mp, srid, registry)?.into(),
        Geometry::GeometryCollection(_) => return Err(unsupported("geometry collection")),
    };

    Ok(wrapped)
}

fn check_shape(geometry: &Geometry<f64>) -> Result<()> {
    if !kernel::is_finite(geometry) {
        return Err(unsupported("geometry with non-finite coordinates"));
    }

    match geometry {
        Geometry::LineString(line_string) => check_line_string(line_string),
        Geometry::Polygon(polygon) => check_polygon(polygon),
        Geometry::MultiPoint(mp) if mp.0.is_empty() => Err(unsupported("empty multipoint")),
        Geometry::MultiLineString(mls) => {
            if mls.0.is_empty() {
                return Err(unsupported("empty multilinestring"));
            }
            mls.iter().try_for_each(check_line_string)
        }
        Geometry::MultiPolygon(mp) => {
            if mp.0.is_empty() {
                return Err(unsupported("empty multipolygon"));
            }
            mp.iter().try_for_each(check_polygon)
        }
        Geometry::GeometryCollection(_) => Err(unsupported("geometry collection")),
        _ => Ok(()),
    }
}

fn check_line_string(line_string: &LineString<f64>) -> Result<()> {
    if line_string.0.len() < 2 {
        return Err(unsupported("line string with less than 2 coordinates"));
    }
    Ok(())
}

fn check_polygon(polygon: &Polygon<f64>) -> Result<()> {
    // Closed ring of a triangle has 4 coordinates.
    if polygon.exterior().0.len() < 4 {
        return Err(unsupported("polygon with less than 3 vertices"));
    }
    Ok(())
}

fn unsupported(what: &str) -> SrGeometryError {
    SrGeometryError::UnsupportedGeometryKind(what.to_string())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use geo_types::{line_string, point, polygon, GeometryCollection, Line, Rect};

    use super::*;
    use srgeo_crs::CrsDefinition;

    const WEB_MERCATOR: Srid = Srid::WEB_MERCATOR;

    #[test]
    fn sr_shape_picks_variant_by_shape() {
        let cases: Vec<(Geometry<f64>, Srid, GeometryKind)> = vec![
            (point!(x: 0.0, y: 0.0).into(), Srid::WGS84, GeometryKind::Point),
            (point!(x: 0.0, y: 0.0).into(), WEB_MERCATOR, GeometryKind::Point),
            (
                line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 1.0), (x: 2.0, y: 0.0)].into(),
                WEB_MERCATOR,
                GeometryKind::Polyline,
            ),
            (
                polygon![(x: 0.0, y: 0.0), (x: 1.0, y: 1.0), (x: 1.0, y: 0.0)].into(),
                Srid::new(32619),
                GeometryKind::Polygon,
            ),
            (
                MultiPoint::from(vec![(0.0, 0.0), (1.0, 1.0), (0.0, 2.0), (2.0, 2.0)]).into(),
                WEB_MERCATOR,
                GeometryKind::MultiPoint,
            ),
            (
                MultiLineString::new(vec![
                    line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 1.0)],
                    line_string![(x: -1.0, y: 0.0), (x: 1.0, y: 0.0)],
                ])
                .into(),
                WEB_MERCATOR,
                GeometryKind::MultiPolyline,
            ),
            (
                MultiPolygon::new(vec![
                    polygon![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0), (x: 1.0, y: 1.0)],
                    polygon![(x: 5.0, y: 0.0), (x: 6.0, y: 0.0), (x: 6.0, y: 1.0)],
                ])
                .into(),
                WEB_MERCATOR,
                GeometryKind::MultiPolygon,
            ),
            (
                Line::new((0.0, 0.0), (1.0, 1.0)).into(),
                Srid::WGS84,
                GeometryKind::Polyline,
            ),
            (
                Rect::new((0.0, 0.0), (1.0, 1.0)).into(),
                Srid::WGS84,
                GeometryKind::Polygon,
            ),
        ];

        for (geometry, srid, kind) in cases {
            let wrapped = sr_shape(geometry, srid).unwrap();
            assert_eq!(wrapped.kind(), kind);
            assert_eq!(wrapped.srid(), srid);
        }
    }

    #[test]
    fn variant_names() {
        let line = sr_shape(
            line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 1.0), (x: 2.0, y: 0.0)],
            Srid::WGS84,
        )
        .unwrap();
        let polygon = sr_shape(
            polygon![(x: 0.0, y: 0.0), (x: 1.0, y: 1.0), (x: 1.0, y: 0.0)],
            Srid::WGS84,
        )
        .unwrap();

        assert_eq!(line.kind().to_string(), "Polyline");
        assert_eq!(polygon.kind().to_string(), "Polygon");
        assert_eq!(line.coords_count(), 3);
        assert_eq!(polygon.coords_count(), 4);
    }

    #[test]
    fn sr_shape_rejects_unsupported_geometries() {
        let cases: Vec<Geometry<f64>> = vec![
            Geometry::GeometryCollection(GeometryCollection::from(vec![Geometry::from(point!(x: 0.0, y: 0.0))])),
            MultiPoint::<f64>::new(vec![]).into(),
            MultiPolygon::<f64>::new(vec![]).into(),
            MultiLineString::<f64>::new(vec![]).into(),
            LineString::<f64>::new(vec![]).into(),
            line_string![(x: 0.0, y: 0.0)].into(),
            Polygon::<f64>::new(LineString::new(vec![]), vec![]).into(),
            point!(x: f64::NAN, y: 0.0).into(),
        ];

        for geometry in cases {
            assert_matches!(
                sr_shape(geometry, Srid::WGS84),
                Err(SrGeometryError::UnsupportedGeometryKind(_))
            );
        }
    }

    #[test]
    fn equality_needs_same_crs_and_same_shape() {
        let a = SrShape::try_new(
            polygon![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0), (x: 1.0, y: 1.0)],
            Srid::WGS84,
        )
        .unwrap();
        let b = SrShape::try_new(
            polygon![(x: 1.0, y: 0.0), (x: 1.0, y: 1.0), (x: 0.0, y: 0.0)],
            Srid::WGS84,
        )
        .unwrap();
        let c = SrShape::try_new(a.geometry().clone(), WEB_MERCATOR).unwrap();

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(SrGeometry::from(a.clone()), SrGeometry::from(b));
        assert_ne!(SrGeometry::from(a), SrGeometry::from(c));
    }

    #[test]
    fn accessors() {
        let geometry = sr_shape(
            line_string![(x: 1.0, y: 2.0), (x: 3.0, y: 4.0)],
            Srid::new(32615),
        )
        .unwrap();

        assert_eq!(geometry.coords(), vec![(1.0, 2.0), (3.0, 4.0)]);
        assert!(geometry.as_polyline().is_some());
        assert!(geometry.as_point().is_none());
        assert_eq!(geometry.to_string(), "Polyline(2 coordinates, EPSG:32615)");
        assert_matches!(geometry.into_geometry(), Geometry::LineString(_));
    }

    #[test]
    fn serializes_with_type_tag() {
        let geometry = sr_shape(point!(x: -94.14243, y: 45.55367), Srid::WGS84).unwrap();
        let json = serde_json::to_value(&geometry).unwrap();

        assert_eq!(json["type"], "Point");
        assert_eq!(json["srid"], 4326);

        let restored: SrGeometry = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(restored, geometry);

        let mut unknown_crs = json.clone();
        unknown_crs["srid"] = serde_json::json!(999999999);
        assert!(serde_json::from_value::<SrGeometry>(unknown_crs).is_err());

        let empty: SrGeometry = SrShape::new(MultiPolygon::<f64>::new(vec![]), Srid::WGS84).into();
        let json = serde_json::to_value(&empty).unwrap();
        assert!(serde_json::from_value::<SrGeometry>(json).is_err());
    }

    #[test]
    fn unknown_crs_is_rejected() {
        let unknown = Srid::new(999999999);

        assert_matches!(
            sr_shape(point!(x: 0.0, y: 0.0), unknown),
            Err(SrGeometryError::UnresolvableCrs(srid)) if srid == unknown
        );
        assert_matches!(
            SrShape::try_new(point!(x: 0.0, y: 0.0), unknown),
            Err(SrGeometryError::UnresolvableCrs(_))
        );
        assert_matches!(
            SrShape::try_new(MultiPolygon::<f64>::new(vec![]), Srid::WGS84),
            Err(SrGeometryError::UnsupportedGeometryKind(_))
        );

        let local = CrsRegistry::new();
        local
            .register(unknown, CrsDefinition::geographic())
            .unwrap();
        let wrapped = sr_shape_in(point!(x: 1.0, y: 2.0), unknown, &local).unwrap();
        assert_eq!(wrapped.srid(), unknown);
    }

    #[test]
    fn polygon_equals_single_part_multipolygon() {
        let ring = polygon![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0), (x: 1.0, y: 1.0)];
        let polygon = sr_shape(ring.clone(), Srid::WGS84).unwrap();
        let multi = sr_shape(MultiPolygon::new(vec![ring.clone()]), Srid::WGS84).unwrap();

        assert_eq!(polygon.kind(), GeometryKind::Polygon);
        assert_eq!(multi.kind(), GeometryKind::MultiPolygon);
        assert_eq!(polygon, multi);
        assert_eq!(multi, polygon);
        assert_ne!(polygon, sr_shape(MultiPolygon::new(vec![ring]), WEB_MERCATOR).unwrap());
    }
}
