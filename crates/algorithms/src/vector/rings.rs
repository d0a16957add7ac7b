//! Interior ring filtering

use geo::{Geometry, MultiPolygon, Polygon};
use geonorm_core::vector::canonicalize;
use geonorm_core::{Error, GeometryType, Result};
use tracing::debug;

use super::measurements::ring_area;

/// Remove interior rings (holes) from a Polygon or MultiPolygon.
///
/// With `min_area_to_keep` `None` or `Some(0.0)` every interior ring is
/// removed. Otherwise only rings with an area smaller than or equal to the
/// threshold are removed, the rest keep their order.
///
/// The geometry is taken by value: polygons that need no change are moved
/// back out untouched.
///
/// # Errors
/// `InvalidArgument` if the geometry is not a Polygon or MultiPolygon.
pub fn remove_inner_rings(
    geometry: Geometry<f64>,
    min_area_to_keep: Option<f64>,
) -> Result<Geometry<f64>> {
    match canonicalize(geometry) {
        Geometry::Polygon(polygon) => Ok(Geometry::Polygon(remove_inner_rings_polygon(
            polygon,
            min_area_to_keep,
        ))),
        Geometry::MultiPolygon(mp) => Ok(Geometry::MultiPolygon(
            mp.into_iter()
                .map(|polygon| remove_inner_rings_polygon(polygon, min_area_to_keep))
                .collect::<MultiPolygon<f64>>(),
        )),
        other => Err(Error::invalid_argument(format!(
            "remove_inner_rings is not possible with geometry type {}",
            GeometryType::of(&other)
        ))),
    }
}

/// Remove interior rings from a single polygon, see [`remove_inner_rings`].
pub fn remove_inner_rings_polygon(
    polygon: Polygon<f64>,
    min_area_to_keep: Option<f64>,
) -> Polygon<f64> {
    if polygon.interiors().is_empty() {
        return polygon;
    }

    match min_area_to_keep.filter(|area| *area != 0.0) {
        None => {
            let (exterior, _) = polygon.into_inner();
            Polygon::new(exterior, vec![])
        }
        Some(threshold) => {
            if !polygon.interiors().iter().any(|ring| ring_area(ring) <= threshold) {
                return polygon;
            }
            let (exterior, interiors) = polygon.into_inner();
            let before = interiors.len();
            let kept: Vec<_> = interiors
                .into_iter()
                .filter(|ring| ring_area(ring) > threshold)
                .collect();
            debug!(removed = before - kept.len(), threshold, "removed small interior rings");
            Polygon::new(exterior, kept)
        }
    }
}
