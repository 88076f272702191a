use geo_types::{Coord, Geometry, LineString, MultiPoint, Point, Polygon};
use srgeo_crs::{utm, Srid};

use super::{Shape, SrGeometry, SrMultiPoint, SrPoint, SrPolygon, SrPolyline, SrShape};
use crate::error::Result;
use crate::kernel;

impl SrPoint {
    /// Creates a WGS84 point from latitude and longitude in degrees.
    ///
    /// ```
    /// use srgeo::{SrPoint, Srid};
    ///
    /// let point = SrPoint::from_lat_lon(45.553670, -94.142430).unwrap();
    /// assert_eq!(point.srid(), Srid::WGS84);
    /// assert_eq!(point.x(), -94.142430);
    /// ```
    pub fn from_lat_lon(lat: f64, lon: f64) -> Result<Self> {
        utm::validate_lat_lon(lat, lon)?;
        Ok(Self::new(Point::new(lon, lat), Srid::WGS84))
    }

    /// Creates a point from coordinates expressed in `srid`.
    ///
    /// Fails if a coordinate is not finite or the shared registry cannot resolve `srid`.
    pub fn from_coords(x: f64, y: f64, srid: Srid) -> Result<Self> {
        Self::try_new(Point::new(x, y), srid)
    }

    /// X coordinate (longitude for geographic CRSs).
    pub fn x(&self) -> f64 {
        self.geometry().x()
    }

    /// Y coordinate (latitude for geographic CRSs).
    pub fn y(&self) -> f64 {
        self.geometry().y()
    }
}

impl SrMultiPoint {
    /// Creates a multipoint from a sequence of `(x, y)` pairs.
    pub fn from_coords(coords: impl IntoIterator<Item = (f64, f64)>, srid: Srid) -> Result<Self> {
        let points: MultiPoint<f64> = coords.into_iter().map(Point::from).collect();
        Self::try_new(points, srid)
    }
}

impl SrPolyline {
    /// Creates a line string from a sequence of `(x, y)` pairs. At least two are required.
    pub fn from_coords(coords: impl IntoIterator<Item = (f64, f64)>, srid: Srid) -> Result<Self> {
        Self::try_new(line_string_from(coords), srid)
    }
}

impl SrPolygon {
    /// Creates a polygon from an exterior ring and a list of holes. Rings are closed automatically.
    pub fn from_coords<I>(
        exterior: impl IntoIterator<Item = (f64, f64)>,
        interiors: impl IntoIterator<Item = I>,
        srid: Srid,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        let polygon = Polygon::new(
            line_string_from(exterior),
            interiors.into_iter().map(line_string_from).collect(),
        );
        Self::try_new(polygon, srid)
    }
}

impl<G: Shape> SrShape<G> {
    /// Representative point of the shape, in the same CRS.
    ///
    /// See [`SrGeometry::location`].
    pub fn location(&self) -> Option<SrPoint> {
        location_of(&self.geometry().to_geometry()).map(|p| SrPoint::new(p, self.srid()))
    }
}

impl SrGeometry {
    /// Representative point of the geometry, in the same CRS.
    ///
    /// A point is its own location, a polyline is located at half of its length, other shapes at
    /// a point lying inside them.
    pub fn location(&self) -> Option<SrPoint> {
        location_of(&self.to_geometry()).map(|p| SrPoint::new(p, self.srid()))
    }
}

fn location_of(geometry: &Geometry<f64>) -> Option<Point<f64>> {
    match geometry {
        Geometry::Point(point) => Some(*point),
        Geometry::LineString(line_string) => kernel::point_along(line_string, 0.5),
        _ => kernel::interior_point(geometry),
    }
}

fn line_string_from(coords: impl IntoIterator<Item = (f64, f64)>) -> LineString<f64> {
    coords.into_iter().map(Coord::from).collect()
}
