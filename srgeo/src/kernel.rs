//! Planar operations on kernel geometries.
//!
//! This is the only place that talks to the `geo` algorithms. Nothing in here knows about
//! coordinate reference systems: distances and areas are in whatever unit the coordinates are.

use std::f64::consts::FRAC_PI_2;

use geo::algorithm::buffer::{BufferStyle, LineCap, LineJoin};
use geo::{
    Area, Buffer, Centroid, CoordsIter, Euclidean, InteriorPoint, InterpolatableLine, Length,
    Relate,
};
use geo_types::{Geometry, LineString, MultiPolygon, Point, Polygon};

/// Unsigned planar area. Zero for points and lines.
pub fn area(geometry: &Geometry<f64>) -> f64 {
    geometry.unsigned_area()
}

/// Planar length. Zero for points, perimeter of all rings for polygons.
pub fn length(geometry: &Geometry<f64>) -> f64 {
    match geometry {
        Geometry::Point(_) | Geometry::MultiPoint(_) => 0.0,
        Geometry::Line(line) => Euclidean.length(line),
        Geometry::LineString(line_string) => Euclidean.length(line_string),
        Geometry::MultiLineString(mls) => Euclidean.length(mls),
        Geometry::Polygon(polygon) => perimeter(polygon),
        Geometry::MultiPolygon(mp) => mp.iter().map(perimeter).sum(),
        Geometry::Rect(rect) => perimeter(&rect.to_polygon()),
        Geometry::Triangle(triangle) => perimeter(&triangle.to_polygon()),
        Geometry::GeometryCollection(collection) => collection.iter().map(length).sum(),
    }
}

fn perimeter(polygon: &Polygon<f64>) -> f64 {
    std::iter::once(polygon.exterior())
        .chain(polygon.interiors())
        .map(|ring| Euclidean.length(ring))
        .sum()
}

/// All coordinates in traversal order.
pub fn coords(geometry: &Geometry<f64>) -> Vec<(f64, f64)> {
    geometry.coords_iter().map(|c| (c.x, c.y)).collect()
}

/// Number of coordinates.
pub fn coords_count(geometry: &Geometry<f64>) -> usize {
    geometry.coords_count()
}

/// True if no coordinate is NaN or infinite.
pub fn is_finite(geometry: &Geometry<f64>) -> bool {
    geometry
        .coords_iter()
        .all(|c| c.x.is_finite() && c.y.is_finite())
}

/// Topological equality: both geometries cover exactly the same point set.
pub fn topo_equals(a: &Geometry<f64>, b: &Geometry<f64>) -> bool {
    let a_empty = a.coords_count() == 0;
    let b_empty = b.coords_count() == 0;
    if a_empty || b_empty {
        return a_empty && b_empty;
    }

    a.relate(b).is_equal_topo()
}

/// Point that stands for the location of the whole geometry: its centroid, or the first
/// coordinate for degenerate geometries.
pub fn anchor_point(geometry: &Geometry<f64>) -> Option<Point<f64>> {
    geometry
        .centroid()
        .or_else(|| geometry.coords_iter().next().map(Point::from))
}

/// A point guaranteed to lie on the geometry.
pub fn interior_point(geometry: &Geometry<f64>) -> Option<Point<f64>> {
    geometry.interior_point()
}

/// Point at the given fraction (0..=1) of the length of the line.
pub fn point_along(line_string: &LineString<f64>, fraction: f64) -> Option<Point<f64>> {
    line_string.point_at_ratio_from_start(&Euclidean, fraction.clamp(0.0, 1.0))
}

/// Area within `distance` of the geometry.
///
/// `resolution` is the number of segments used to approximate a quarter of a circle, both for
/// point discs and for round joins and caps. Negative distances shrink polygons and give an empty
/// result for points and lines.
///
/// Joins and caps of lines and polygons use between 2 and 50 segments per quarter circle whatever
/// the resolution, since the overlay engine clamps the angular step to `[0.01π, 0.25π]`.
pub fn buffer(geometry: &Geometry<f64>, distance: f64, resolution: usize) -> MultiPolygon<f64> {
    let angle = FRAC_PI_2 / resolution.max(1) as f64;
    let style = BufferStyle::new(distance)
        .line_join(LineJoin::Round(angle))
        .line_cap(LineCap::Round(angle));

    geometry.buffer_with_style(style)
}
