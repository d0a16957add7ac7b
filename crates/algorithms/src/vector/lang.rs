//! Lang line simplification
//!
//! A sliding-window generalization: starting at a retained vertex, the
//! window reaches `lookahead` vertices ahead. If every vertex inside the
//! window lies within `tolerance` of the chord between the window ends, the
//! far end is retained and the window slides forward; otherwise the window
//! shrinks by one vertex and the test is repeated.
//!
//! Reference: Lang, T. (1969). Rules for robot draughtsmen.
//! Geographical Magazine 42(1), 50-51.

use geo::Coord;
use geonorm_core::{Error, Result};
use tracing::trace;

/// Distance from `p` to the infinite line through `a` and `b`.
///
/// NaN when `a` and `b` coincide.
fn perpendicular_distance(p: Coord<f64>, a: Coord<f64>, b: Coord<f64>) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    (dx * (a.y - p.y) - (a.x - p.x) * dy).abs() / (dx * dx + dy * dy).sqrt()
}

/// True if every vertex strictly between `start` and `end` is within
/// `tolerance` of the chord. A degenerate chord never fits.
fn window_fits(coords: &[Coord<f64>], start: usize, end: usize, tolerance: f64) -> bool {
    let (a, b) = (coords[start], coords[end]);
    coords[start + 1..end]
        .iter()
        .all(|&p| perpendicular_distance(p, a, b) <= tolerance)
}

/// Indices of the coordinates retained by the Lang algorithm.
///
/// `lookahead` is the maximum window size in vertices; `None` uses the
/// whole line as the initial window. The result is strictly increasing and
/// contains the first and the last index.
///
/// # Errors
/// `InvalidParameter` for a NaN tolerance or a lookahead of zero.
pub fn simplify_coords_lang_idx(
    coords: &[Coord<f64>],
    tolerance: f64,
    lookahead: Option<usize>,
) -> Result<Vec<usize>> {
    if tolerance.is_nan() {
        return Err(Error::InvalidParameter {
            name: "tolerance",
            value: tolerance.to_string(),
            reason: "must be a number".into(),
        });
    }
    if lookahead == Some(0) {
        return Err(Error::InvalidParameter {
            name: "lookahead",
            value: "0".into(),
            reason: "window must span at least one segment".into(),
        });
    }
    if coords.is_empty() {
        return Ok(Vec::new());
    }

    let last = coords.len() - 1;
    let window_size = lookahead.map_or(last, |n| n.min(last));

    let mut keep = vec![0];
    let mut start = 0;
    let mut end = window_size;
    while start < last {
        if window_fits(coords, start, end, tolerance) {
            keep.push(end);
            start = end;
            end = (start + window_size).min(last);
        } else {
            trace!(start, end, "lang window shrinks");
            end -= 1;
        }
    }

    Ok(keep)
}

/// Coordinates retained by the Lang algorithm, see [`simplify_coords_lang_idx`].
pub fn simplify_coords_lang(
    coords: &[Coord<f64>],
    tolerance: f64,
    lookahead: Option<usize>,
) -> Result<Vec<Coord<f64>>> {
    let idx = simplify_coords_lang_idx(coords, tolerance, lookahead)?;
    Ok(idx.into_iter().map(|i| coords[i]).collect())
}
