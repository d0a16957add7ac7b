//! Validity repair
//!
//! `make_valid` hands the geometry to the kernel's [`ValidityRepairer`].
//! The `geo` binding below removes repeated vertices from lines and
//! re-nodes invalid polygons through a boolean union.

use geo::{
    BooleanOps, Geometry, GeometryCollection, LineString, MultiLineString, MultiPolygon, Point,
    Polygon, Validation,
};
use geonorm_core::vector::canonicalize;
use geonorm_core::{GeometryType, PrimitiveType};
use tracing::debug;

use super::collect::collect;
use super::kernel::{GeoKernel, Kernel, ValidityRepairer};

/// Make a geometry valid using the `geo` kernel.
///
/// The result may have a different type than the input: a self-intersecting
/// polygon can come back as a MultiPolygon, a collapsed line as a Point.
pub fn make_valid(geometry: &Geometry<f64>) -> Geometry<f64> {
    make_valid_with(&Kernel::geo(), geometry)
}

/// Make a geometry valid using the repairer of `kernel`.
pub fn make_valid_with(kernel: &Kernel<'_>, geometry: &Geometry<f64>) -> Geometry<f64> {
    let repaired = kernel.repairer.make_valid(geometry);
    let (before, after) = (GeometryType::of(geometry), GeometryType::of(&repaired));
    if before != after {
        debug!(%before, %after, "validity repair changed geometry type");
    }
    repaired
}

impl ValidityRepairer for GeoKernel {
    fn make_valid(&self, geometry: &Geometry<f64>) -> Geometry<f64> {
        match canonicalize(geometry.clone()) {
            Geometry::LineString(ls) => repair_line_string(ls),
            Geometry::MultiLineString(mls) => repair_multi_line_string(mls),
            Geometry::Polygon(polygon) => {
                if polygon.is_valid() {
                    Geometry::Polygon(polygon)
                } else {
                    repair_polygons(MultiPolygon::new(vec![polygon]))
                }
            }
            Geometry::MultiPolygon(mp) => {
                if mp.is_valid() {
                    Geometry::MultiPolygon(mp)
                } else {
                    repair_polygons(mp)
                }
            }
            Geometry::GeometryCollection(gc) => Geometry::GeometryCollection(
                gc.0.iter()
                    .map(|child| self.make_valid(child))
                    .collect::<GeometryCollection<f64>>(),
            ),
            // Points are always valid
            other => other,
        }
    }
}

/// Drop repeated consecutive vertices of an invalid line; a line with a
/// single distinct vertex collapses to a point.
fn repair_line_string(line: LineString<f64>) -> Geometry<f64> {
    let distinct = line.0.windows(2).any(|pair| pair[0] != pair[1]);
    if distinct && line.is_valid() {
        return Geometry::LineString(line);
    }
    let mut coords = line.0;
    coords.dedup();
    if coords.len() == 1 {
        return Geometry::Point(Point::from(coords[0]));
    }
    Geometry::LineString(LineString::new(coords))
}

fn repair_multi_line_string(mls: MultiLineString<f64>) -> Geometry<f64> {
    if mls.0.is_empty() {
        return Geometry::MultiLineString(mls);
    }
    let parts: Vec<Geometry<f64>> = mls.0.into_iter().map(repair_line_string).collect();
    collect(parts).unwrap_or_else(|_| PrimitiveType::LineString.empty_geometry())
}

/// Re-node polygons through a union with nothing.
fn repair_polygons(polygons: MultiPolygon<f64>) -> Geometry<f64> {
    let empty = MultiPolygon::<f64>::new(vec![]);
    let mut parts: Vec<Polygon<f64>> = polygons.union(&empty).0;
    match parts.len() {
        0 => PrimitiveType::Polygon.empty_geometry(),
        1 => Geometry::Polygon(parts.remove(0)),
        _ => Geometry::MultiPolygon(MultiPolygon::new(parts)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use geo::{line_string, point, polygon, Area};

    fn bowtie() -> Polygon<f64> {
        polygon![
            (x: 0.0, y: 0.0),
            (x: 2.0, y: 2.0),
            (x: 2.0, y: 0.0),
            (x: 0.0, y: 2.0),
            (x: 0.0, y: 0.0),
        ]
    }

    fn square() -> Polygon<f64> {
        polygon![
            (x: 0.0, y: 0.0),
            (x: 4.0, y: 0.0),
            (x: 4.0, y: 4.0),
            (x: 0.0, y: 4.0),
            (x: 0.0, y: 0.0),
        ]
    }

    #[test]
    fn test_valid_polygon_unchanged() {
        let g = Geometry::Polygon(square());
        assert_eq!(make_valid(&g), g);
    }

    #[test]
    fn test_bowtie_repaired() {
        let g = Geometry::Polygon(bowtie());
        assert!(!g.is_valid());

        let repaired = make_valid(&g);
        assert!(repaired.is_valid());
        assert!(matches!(
            GeometryType::of(&repaired),
            GeometryType::Polygon | GeometryType::MultiPolygon
        ));
        let area = match &repaired {
            Geometry::Polygon(p) => p.unsigned_area(),
            Geometry::MultiPolygon(mp) => mp.unsigned_area(),
            other => panic!("Expected polygonal result, got {:?}", other),
        };
        assert_relative_eq!(area, 2.0, epsilon = 1e-9);
    }

    #[test]
    fn test_collapsed_polygon_becomes_empty() {
        let flat: Polygon<f64> = polygon![
            (x: 0.0, y: 0.0),
            (x: 1.0, y: 0.0),
            (x: 2.0, y: 0.0),
            (x: 0.0, y: 0.0),
        ];
        let repaired = make_valid(&Geometry::Polygon(flat));
        match repaired {
            Geometry::Polygon(p) => assert_eq!(p.unsigned_area(), 0.0),
            other => panic!("Expected Polygon, got {:?}", other),
        }
    }

    #[test]
    fn test_valid_line_with_repeated_vertex_unchanged() {
        let ls = Geometry::LineString(line_string![
            (x: 0.0, y: 0.0),
            (x: 0.0, y: 0.0),
            (x: 1.0, y: 1.0),
        ]);
        assert!(ls.is_valid());
        assert_eq!(make_valid(&ls), ls);

        let mls = Geometry::MultiLineString(MultiLineString::new(vec![
            line_string![(x: 0.0, y: 0.0), (x: 0.0, y: 0.0), (x: 1.0, y: 1.0)],
            line_string![(x: 5.0, y: 5.0), (x: 6.0, y: 5.0)],
        ]));
        assert_eq!(make_valid(&mls), mls);
    }

    #[test]
    fn test_degenerate_part_changes_multi_line_tag() {
        let mls = MultiLineString::new(vec![
            line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 1.0)],
            line_string![(x: 4.0, y: 4.0), (x: 4.0, y: 4.0)],
        ]);
        match make_valid(&Geometry::MultiLineString(mls)) {
            Geometry::GeometryCollection(gc) => {
                assert_eq!(gc.0.len(), 2);
                assert!(matches!(gc.0[0], Geometry::LineString(_)));
                assert_eq!(gc.0[1], Geometry::Point(point!(x: 4.0, y: 4.0)));
            }
            other => panic!("Expected GeometryCollection, got {:?}", other),
        }
    }

    #[test]
    fn test_degenerate_line_becomes_point() {
        let ls = line_string![(x: 3.0, y: 3.0), (x: 3.0, y: 3.0)];
        let repaired = make_valid(&Geometry::LineString(ls));
        assert_eq!(repaired, Geometry::Point(point!(x: 3.0, y: 3.0)));
    }

    #[test]
    fn test_points_untouched() {
        let g = Geometry::Point(point!(x: 1.0, y: 2.0));
        assert_eq!(make_valid(&g), g);
    }

    #[test]
    fn test_collection_repaired_per_child() {
        let gc = GeometryCollection::new_from(vec![
            Geometry::Point(point!(x: 9.0, y: 9.0)),
            Geometry::Polygon(bowtie()),
        ]);
        let repaired = make_valid(&Geometry::GeometryCollection(gc));
        match repaired {
            Geometry::GeometryCollection(gc) => {
                assert_eq!(gc.0.len(), 2);
                assert!(matches!(gc.0[0], Geometry::Point(_)));
                assert!(gc.0[1].is_valid());
            }
            other => panic!("Expected GeometryCollection, got {:?}", other),
        }
    }
}
