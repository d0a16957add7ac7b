//! Vector geometry types
//!
//! Geometry values are `geo_types::Geometry<f64>`; this module adds the
//! type algebra used to classify and convert them.

mod geometry_type;

pub use geometry_type::{
    to_geometry_type, to_multi_variant, to_primitive_type, GeometryType, IntoGeometryType,
    PrimitiveType,
};

use geo_types::{Geometry, LineString};

/// Convert the auxiliary `geo` variants into their canonical form.
///
/// `Line` becomes a two-point `LineString`, `Rect` and `Triangle` become
/// `Polygon`s. Every other variant is returned as-is. Only the top level is
/// converted; collection members are left untouched.
pub fn canonicalize(geometry: Geometry<f64>) -> Geometry<f64> {
    match geometry {
        Geometry::Line(line) => Geometry::LineString(LineString::new(vec![line.start, line.end])),
        Geometry::Rect(rect) => Geometry::Polygon(rect.to_polygon()),
        Geometry::Triangle(triangle) => Geometry::Polygon(triangle.to_polygon()),
        other => other,
    }
}
