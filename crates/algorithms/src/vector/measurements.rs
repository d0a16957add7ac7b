//! Geometric measurements: vertex count, ring area

use geo::{Area as GeoArea, CoordsIter, Geometry, LineString, Polygon};

/// Total number of coordinates in a geometry.
///
/// Multi-part geometries sum their parts; polygons count the exterior and
/// every interior ring, closing coordinates included.
pub fn num_points(geom: &Geometry<f64>) -> usize {
    geom.coords_count()
}

/// Unsigned area enclosed by a ring, regardless of its orientation.
pub fn ring_area(ring: &LineString<f64>) -> f64 {
    Polygon::new(ring.clone(), vec![]).unsigned_area()
}
