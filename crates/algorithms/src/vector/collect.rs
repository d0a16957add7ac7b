//! Collection normalization
//!
//! - `collect`: combine a list of geometries into one (Multi)geometry
//! - `collection_extract`: keep only the parts of one primitive type

use geo::{
    Geometry, GeometryCollection, HasDimensions, LineString, MultiLineString, MultiPoint,
    MultiPolygon, Point, Polygon,
};
use geonorm_core::vector::canonicalize;
use geonorm_core::{Error, GeometryType, PrimitiveType, Result};

/// Collect a list of geometries into one geometry.
///
/// `None` entries are skipped. A single remaining geometry is returned
/// unchanged. Otherwise:
/// - only Points → MultiPoint, only LineStrings → MultiLineString,
///   only Polygons → MultiPolygon
/// - only MultiPoints/MultiLineStrings/MultiPolygons of one kind → their
///   parts merged into one geometry of that kind
/// - anything else → GeometryCollection of the inputs as-is
///
/// # Errors
/// `EmptyInput` if no geometry remains after skipping `None`s.
pub fn collect<I>(geometries: I) -> Result<Geometry<f64>>
where
    I: IntoIterator,
    I::Item: Into<Option<Geometry<f64>>>,
{
    let mut geometries: Vec<Geometry<f64>> =
        geometries.into_iter().filter_map(Into::into).collect();

    if geometries.len() <= 1 {
        return geometries
            .pop()
            .ok_or_else(|| Error::EmptyInput("geometry list should not be empty".into()));
    }

    let geometries: Vec<Geometry<f64>> = geometries.into_iter().map(canonicalize).collect();
    let first = GeometryType::of(&geometries[0]);
    let uniform = if geometries.iter().all(|g| GeometryType::of(g) == first) {
        first
    } else {
        GeometryType::GeometryCollection
    };

    let collected = match uniform {
        GeometryType::Point => Geometry::MultiPoint(
            geometries
                .into_iter()
                .filter_map(|g| Point::try_from(g).ok())
                .collect::<MultiPoint<f64>>(),
        ),
        GeometryType::LineString => Geometry::MultiLineString(MultiLineString::new(
            geometries
                .into_iter()
                .filter_map(|g| LineString::try_from(g).ok())
                .collect(),
        )),
        GeometryType::Polygon => Geometry::MultiPolygon(
            geometries
                .into_iter()
                .filter_map(|g| Polygon::try_from(g).ok())
                .collect::<MultiPolygon<f64>>(),
        ),
        GeometryType::MultiPoint => Geometry::MultiPoint(
            geometries
                .into_iter()
                .filter_map(|g| MultiPoint::try_from(g).ok())
                .flat_map(|mp| mp.0)
                .collect::<MultiPoint<f64>>(),
        ),
        GeometryType::MultiLineString => Geometry::MultiLineString(MultiLineString::new(
            geometries
                .into_iter()
                .filter_map(|g| MultiLineString::try_from(g).ok())
                .flat_map(|mls| mls.0)
                .collect(),
        )),
        GeometryType::MultiPolygon => Geometry::MultiPolygon(
            geometries
                .into_iter()
                .filter_map(|g| MultiPolygon::try_from(g).ok())
                .flat_map(|mp| mp.0)
                .collect::<MultiPolygon<f64>>(),
        ),
        GeometryType::GeometryCollection => {
            Geometry::GeometryCollection(GeometryCollection::new_from(geometries))
        }
        GeometryType::Missing | GeometryType::LinearRing => {
            return Err(Error::invalid_argument(format!(
                "unsupported geometry type to collect: {}",
                uniform
            )))
        }
    };

    Ok(collected)
}

/// Extract the parts of `geometry` that have primitive type `primitive_type`.
///
/// Single and multi geometries are returned unchanged when their primitive
/// type matches, otherwise an empty geometry of `primitive_type` is
/// returned. Collections are searched recursively and the matching parts
/// are combined with [`collect`].
///
/// # Errors
/// `InvalidArgument` for geometry types without a primitive type.
pub fn collection_extract(
    geometry: &Geometry<f64>,
    primitive_type: PrimitiveType,
) -> Result<Geometry<f64>> {
    if let Geometry::GeometryCollection(gc) = geometry {
        let mut extracted = Vec::with_capacity(gc.0.len());
        for child in gc.0.iter() {
            let part = collection_extract(child, primitive_type)?;
            if !part.is_empty() {
                extracted.push(part);
            }
        }
        if extracted.is_empty() {
            return Ok(primitive_type.empty_geometry());
        }
        return collect(extracted);
    }

    if GeometryType::of(geometry).primitive()? == primitive_type {
        Ok(canonicalize(geometry.clone()))
    } else {
        Ok(primitive_type.empty_geometry())
    }
}

/// Extract the polygonal parts of a geometry: a Polygon or MultiPolygon.
pub fn collection_extract_polygon(geometry: &Geometry<f64>) -> Result<Geometry<f64>> {
    collection_extract(geometry, PrimitiveType::Polygon)
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{line_string, point, polygon};

    fn square(x0: f64, y0: f64, size: f64) -> Polygon<f64> {
        polygon![
            (x: x0, y: y0),
            (x: x0 + size, y: y0),
            (x: x0 + size, y: y0 + size),
            (x: x0, y: y0 + size),
            (x: x0, y: y0),
        ]
    }

    fn mixed_collection() -> Geometry<f64> {
        Geometry::GeometryCollection(GeometryCollection::new_from(vec![
            Geometry::Point(point!(x: 0.0, y: 0.0)),
            Geometry::LineString(line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 1.0)]),
            Geometry::Polygon(square(0.0, 0.0, 1.0)),
        ]))
    }

    #[test]
    fn test_collect_single_unwrapped() {
        let poly = Geometry::Polygon(square(0.0, 0.0, 1.0));
        assert_eq!(collect(vec![poly.clone()]).unwrap(), poly);
        assert_eq!(collect(vec![None, Some(poly.clone()), None]).unwrap(), poly);
    }

    #[test]
    fn test_collect_empty_input() {
        assert!(matches!(
            collect(Vec::<Geometry<f64>>::new()),
            Err(Error::EmptyInput(_))
        ));
        assert!(matches!(
            collect(vec![None::<Geometry<f64>>]),
            Err(Error::EmptyInput(_))
        ));
    }

    #[test]
    fn test_collect_polygons_in_order() {
        let a = square(0.0, 0.0, 1.0);
        let b = square(5.0, 5.0, 2.0);
        let result =
            collect(vec![Geometry::Polygon(a.clone()), Geometry::Polygon(b.clone())]).unwrap();
        assert_eq!(result, Geometry::MultiPolygon(MultiPolygon::new(vec![a, b])));
    }

    #[test]
    fn test_collect_points_and_lines() {
        let result = collect(vec![
            Geometry::Point(point!(x: 0.0, y: 0.0)),
            Geometry::Point(point!(x: 1.0, y: 1.0)),
        ])
        .unwrap();
        assert_eq!(GeometryType::of(&result), GeometryType::MultiPoint);

        let result = collect(vec![
            Geometry::LineString(line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 1.0)]),
            Geometry::LineString(line_string![(x: 2.0, y: 2.0), (x: 3.0, y: 3.0)]),
        ])
        .unwrap();
        match result {
            Geometry::MultiLineString(mls) => assert_eq!(mls.0.len(), 2),
            other => panic!("Expected MultiLineString, got {:?}", other),
        }
    }

    #[test]
    fn test_collect_mixed_is_collection() {
        let result = collect(vec![
            Geometry::Point(point!(x: 0.0, y: 0.0)),
            Geometry::Polygon(square(0.0, 0.0, 1.0)),
        ])
        .unwrap();
        assert_eq!(GeometryType::of(&result), GeometryType::GeometryCollection);
    }

    #[test]
    fn test_collect_polygon_and_multipolygon_not_flattened() {
        let a = Geometry::Polygon(square(0.0, 0.0, 1.0));
        let b = Geometry::MultiPolygon(MultiPolygon::new(vec![square(3.0, 3.0, 1.0)]));
        match collect(vec![a.clone(), b.clone()]).unwrap() {
            Geometry::GeometryCollection(gc) => assert_eq!(gc.0, vec![a, b]),
            other => panic!("Expected GeometryCollection, got {:?}", other),
        }
    }

    #[test]
    fn test_collect_uniform_multipolygons_merged() {
        let a = MultiPolygon::new(vec![square(0.0, 0.0, 1.0), square(2.0, 0.0, 1.0)]);
        let b = MultiPolygon::new(vec![square(4.0, 0.0, 1.0)]);
        match collect(vec![Geometry::MultiPolygon(a), Geometry::MultiPolygon(b)]).unwrap() {
            Geometry::MultiPolygon(mp) => {
                assert_eq!(mp.0.len(), 3);
                assert_eq!(mp.0[2], square(4.0, 0.0, 1.0));
            }
            other => panic!("Expected MultiPolygon, got {:?}", other),
        }
    }

    #[test]
    fn test_collect_uniform_collections_nested() {
        let gc = mixed_collection();
        match collect(vec![gc.clone(), gc.clone()]).unwrap() {
            Geometry::GeometryCollection(outer) => {
                assert_eq!(outer.0.len(), 2);
                assert_eq!(outer.0[0], gc);
            }
            other => panic!("Expected GeometryCollection, got {:?}", other),
        }
    }

    #[test]
    fn test_extract_polygon_from_collection() {
        let result = collection_extract(&mixed_collection(), PrimitiveType::Polygon).unwrap();
        assert_eq!(result, Geometry::Polygon(square(0.0, 0.0, 1.0)));
        assert_eq!(collection_extract_polygon(&mixed_collection()).unwrap(), result);
    }

    #[test]
    fn test_extract_missing_type_gives_empty() {
        let gc = Geometry::GeometryCollection(GeometryCollection::new_from(vec![
            Geometry::Point(point!(x: 0.0, y: 0.0)),
        ]));
        let result = collection_extract(&gc, PrimitiveType::LineString).unwrap();
        assert_eq!(GeometryType::of(&result), GeometryType::LineString);
        assert!(result.is_empty());

        let poly = Geometry::Polygon(square(0.0, 0.0, 1.0));
        let result = collection_extract(&poly, PrimitiveType::Point).unwrap();
        assert!(result.is_empty());
        assert_eq!(GeometryType::of(&result).primitive().unwrap(), PrimitiveType::Point);
    }

    #[test]
    fn test_extract_matching_unchanged() {
        let mp = Geometry::MultiPolygon(MultiPolygon::new(vec![square(0.0, 0.0, 1.0)]));
        assert_eq!(collection_extract(&mp, PrimitiveType::Polygon).unwrap(), mp);
    }

    #[test]
    fn test_extract_nested_collections() {
        let inner = mixed_collection();
        let outer = Geometry::GeometryCollection(GeometryCollection::new_from(vec![
            inner,
            Geometry::Polygon(square(5.0, 5.0, 1.0)),
            Geometry::LineString(line_string![(x: 9.0, y: 9.0), (x: 8.0, y: 8.0)]),
        ]));
        let result = collection_extract(&outer, PrimitiveType::Polygon).unwrap();
        assert_eq!(
            result,
            Geometry::MultiPolygon(MultiPolygon::new(vec![
                square(0.0, 0.0, 1.0),
                square(5.0, 5.0, 1.0)
            ]))
        );
    }

    #[test]
    fn test_extract_idempotent() {
        let samples = vec![
            mixed_collection(),
            Geometry::Polygon(square(0.0, 0.0, 1.0)),
            Geometry::Point(point!(x: 1.0, y: 1.0)),
            Geometry::GeometryCollection(GeometryCollection::new_from(vec![
                mixed_collection(),
                Geometry::Point(point!(x: 4.0, y: 4.0)),
            ])),
        ];
        for g in &samples {
            for p in [PrimitiveType::Point, PrimitiveType::LineString, PrimitiveType::Polygon] {
                let once = collection_extract(g, p).unwrap();
                let twice = collection_extract(&once, p).unwrap();
                assert_eq!(once, twice);
                assert_eq!(GeometryType::of(&once).primitive().unwrap(), p);
            }
        }
    }
}
