//! Geometry simplification
//!
//! Three vertex reduction algorithms share one engine:
//! - Ramer-Douglas-Peucker: distance based, delegated to the kernel
//! - Visvalingam-Whyatt: area based, delegated to the kernel
//! - Lang: sliding window, implemented in [`super::lang`]
//!
//! On top of the chosen algorithm the engine can force vertices to survive
//! (`keep_points_on`), fall back to the original line or ring when the
//! result degenerates (`preserve_topology`), and always repairs the result.

use std::fmt;
use std::str::FromStr;

use geo::{
    Coord, Geometry, GeometryCollection, HasDimensions, LineString, MultiLineString, MultiPolygon,
    Point, Polygon,
};
use geonorm_core::vector::canonicalize;
use geonorm_core::{Algorithm, Error, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::collect::{collect, collection_extract_polygon};
use super::kernel::Kernel;
use super::lang::simplify_coords_lang_idx;

/// Vertex reduction algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SimplifyAlgorithm {
    /// Ramer-Douglas-Peucker, tolerance is a distance
    #[default]
    #[serde(rename = "rdp")]
    RamerDouglasPeucker,
    /// Lang sliding window, tolerance is a distance
    #[serde(rename = "lang")]
    Lang,
    /// Visvalingam-Whyatt, tolerance is an area
    #[serde(rename = "vw")]
    VisvalingamWhyatt,
}

impl SimplifyAlgorithm {
    pub const SUPPORTED: &'static str = "rdp, lang, vw";

    pub fn name(self) -> &'static str {
        match self {
            SimplifyAlgorithm::RamerDouglasPeucker => "rdp",
            SimplifyAlgorithm::Lang => "lang",
            SimplifyAlgorithm::VisvalingamWhyatt => "vw",
        }
    }

    /// True if the algorithm runs in the kernel's index selector
    pub fn needs_index_selector(self) -> bool {
        match self {
            SimplifyAlgorithm::RamerDouglasPeucker | SimplifyAlgorithm::VisvalingamWhyatt => true,
            SimplifyAlgorithm::Lang => false,
        }
    }
}

impl fmt::Display for SimplifyAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SimplifyAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "rdp" => Ok(SimplifyAlgorithm::RamerDouglasPeucker),
            "lang" => Ok(SimplifyAlgorithm::Lang),
            "vw" => Ok(SimplifyAlgorithm::VisvalingamWhyatt),
            _ => Err(Error::UnsupportedAlgorithm {
                name: s.to_string(),
                supported: SimplifyAlgorithm::SUPPORTED,
            }),
        }
    }
}

/// Parameters for simplification
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimplifyParams {
    /// Distance (RDP, Lang) or area (VW) tolerance
    pub tolerance: f64,
    pub algorithm: SimplifyAlgorithm,
    /// Lang window size in vertices; `None` for the whole line (default: 8)
    pub lookahead: Option<usize>,
    /// Fall back to the original line/ring instead of returning a
    /// degenerate one, and keep polygon results polygonal (default: true)
    pub preserve_topology: bool,
    /// Vertices intersecting this geometry are never removed
    #[serde(skip)]
    pub keep_points_on: Option<Geometry<f64>>,
}

impl Default for SimplifyParams {
    fn default() -> Self {
        Self {
            tolerance: 1.0,
            algorithm: SimplifyAlgorithm::RamerDouglasPeucker,
            lookahead: Some(8),
            preserve_topology: true,
            keep_points_on: None,
        }
    }
}

impl SimplifyParams {
    pub fn new(tolerance: f64, algorithm: SimplifyAlgorithm) -> Self {
        Self {
            tolerance,
            algorithm,
            ..Self::default()
        }
    }

    pub fn with_lookahead(mut self, lookahead: Option<usize>) -> Self {
        self.lookahead = lookahead;
        self
    }

    pub fn with_preserve_topology(mut self, preserve_topology: bool) -> Self {
        self.preserve_topology = preserve_topology;
        self
    }

    pub fn with_keep_points_on(mut self, geometry: Geometry<f64>) -> Self {
        self.keep_points_on = Some(geometry);
        self
    }

    fn validate(&self) -> Result<()> {
        if self.tolerance.is_nan() {
            return Err(Error::InvalidParameter {
                name: "tolerance",
                value: self.tolerance.to_string(),
                reason: "must be a number".into(),
            });
        }
        if self.lookahead == Some(0) {
            return Err(Error::InvalidParameter {
                name: "lookahead",
                value: "0".into(),
                reason: "window must span at least one segment".into(),
            });
        }
        Ok(())
    }
}

/// Simplification algorithm
#[derive(Debug, Clone, Default)]
pub struct Simplify;

impl Algorithm for Simplify {
    type Input = Geometry<f64>;
    type Output = Geometry<f64>;
    type Params = SimplifyParams;
    type Error = Error;

    fn name(&self) -> &'static str {
        "Simplify"
    }

    fn description(&self) -> &'static str {
        "Reduce vertex count with RDP, Lang or Visvalingam-Whyatt while keeping geometries valid"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        simplify(&input, &params)
    }
}

/// Simplify a geometry with the `geo` kernel.
///
/// Points and MultiPoints are returned unchanged. Lines and polygon rings
/// are reduced with the configured algorithm; multi-part geometries and
/// collections are simplified part by part and recombined with
/// [`collect`], leaving out parts that collapsed to empty. Every other
/// result is passed through validity repair.
///
/// # Errors
/// - `InvalidParameter` for a NaN tolerance or zero lookahead
/// - `MissingDependency` if RDP/VW is requested without an index selector
///
/// Empty MultiLineStrings, MultiPolygons and GeometryCollections are not an
/// error: they come back unchanged instead of failing in [`collect`] with
/// `EmptyInput`.
pub fn simplify(geometry: &Geometry<f64>, params: &SimplifyParams) -> Result<Geometry<f64>> {
    simplify_with(&Kernel::geo(), geometry, params)
}

/// Simplify a geometry against an explicit kernel, see [`simplify`].
pub fn simplify_with(
    kernel: &Kernel<'_>,
    geometry: &Geometry<f64>,
    params: &SimplifyParams,
) -> Result<Geometry<f64>> {
    params.validate()?;
    if params.algorithm.needs_index_selector() {
        kernel.index_selector()?;
    }
    simplify_geometry(kernel, geometry, params)
}

/// Retained coordinates of a line or ring, using the `geo` kernel.
pub fn simplify_coords(
    coords: &[Coord<f64>],
    params: &SimplifyParams,
) -> Result<Vec<Coord<f64>>> {
    params.validate()?;
    simplify_coords_with(&Kernel::geo(), coords, params)
}

fn simplify_geometry(
    kernel: &Kernel<'_>,
    geometry: &Geometry<f64>,
    params: &SimplifyParams,
) -> Result<Geometry<f64>> {
    let simplified = match canonicalize(geometry.clone()) {
        Geometry::LineString(ls) => Geometry::LineString(simplify_linestring(kernel, &ls, params)?),
        Geometry::Polygon(polygon) => simplify_polygon(kernel, &polygon, params)?,
        Geometry::MultiLineString(mls) => simplify_parts(
            &mls.0,
            Geometry::MultiLineString(MultiLineString::new(vec![])),
            |ls| {
                let line = Geometry::LineString(simplify_linestring(kernel, ls, params)?);
                Ok(kernel.repairer.make_valid(&line))
            },
        )?,
        Geometry::MultiPolygon(mp) => simplify_parts(
            &mp.0,
            Geometry::MultiPolygon(MultiPolygon::new(vec![])),
            |polygon| {
                let simplified = simplify_polygon(kernel, polygon, params)?;
                Ok(kernel.repairer.make_valid(&simplified))
            },
        )?,
        Geometry::GeometryCollection(gc) => simplify_parts(
            &gc.0,
            Geometry::GeometryCollection(GeometryCollection::new_from(vec![])),
            |child| simplify_geometry(kernel, child, params),
        )?,
        // points have no vertices to drop
        other => return Ok(other),
    };

    Ok(kernel.repairer.make_valid(&simplified))
}

/// Simplify every part and recombine the non-empty results.
///
/// Parts are independent, so with the `parallel` feature they are spread
/// over rayon's thread pool. When no part survives, `empty` is returned.
fn simplify_parts<T, F>(
    parts: &[T],
    empty: Geometry<f64>,
    simplify_part: F,
) -> Result<Geometry<f64>>
where
    T: Sync,
    F: Fn(&T) -> Result<Geometry<f64>> + Sync + Send,
{
    #[cfg(feature = "parallel")]
    let simplified = {
        use rayon::prelude::*;
        parts
            .par_iter()
            .map(simplify_part)
            .collect::<Result<Vec<Geometry<f64>>>>()?
    };
    #[cfg(not(feature = "parallel"))]
    let simplified = parts
        .iter()
        .map(simplify_part)
        .collect::<Result<Vec<Geometry<f64>>>>()?;

    let before = simplified.len();
    let kept: Vec<Geometry<f64>> = simplified.into_iter().filter(|g| !g.is_empty()).collect();
    if kept.len() < before {
        debug!(dropped = before - kept.len(), "parts collapsed to empty");
    }
    if kept.is_empty() {
        return Ok(empty);
    }
    collect(kept)
}

fn simplify_coords_with(
    kernel: &Kernel<'_>,
    coords: &[Coord<f64>],
    params: &SimplifyParams,
) -> Result<Vec<Coord<f64>>> {
    let mut keep = match params.algorithm {
        SimplifyAlgorithm::RamerDouglasPeucker => {
            kernel.index_selector()?.select_rdp(coords, params.tolerance)
        }
        SimplifyAlgorithm::VisvalingamWhyatt => {
            kernel.index_selector()?.select_vw(coords, params.tolerance)
        }
        SimplifyAlgorithm::Lang => {
            simplify_coords_lang_idx(coords, params.tolerance, params.lookahead)?
        }
    };

    if let Some(mask) = &params.keep_points_on {
        keep.extend(
            coords
                .iter()
                .enumerate()
                .filter(|(_, c)| kernel.predicate.intersects(&Point::from(**c), mask))
                .map(|(i, _)| i),
        );
    }

    keep.sort_unstable();
    keep.dedup();
    Ok(keep.into_iter().filter_map(|i| coords.get(i).copied()).collect())
}

fn simplify_linestring(
    kernel: &Kernel<'_>,
    line: &LineString<f64>,
    params: &SimplifyParams,
) -> Result<LineString<f64>> {
    if line.0.len() <= 2 {
        return Ok(line.clone());
    }

    let coords = simplify_coords_with(kernel, &line.0, params)?;
    if params.preserve_topology && coords.len() < 2 {
        debug!(points = line.0.len(), "simplified line degenerated, keeping original");
        return Ok(line.clone());
    }
    Ok(LineString::new(coords))
}

/// Simplify the rings of a polygon. Can result in a MultiPolygon.
fn simplify_polygon(
    kernel: &Kernel<'_>,
    polygon: &Polygon<f64>,
    params: &SimplifyParams,
) -> Result<Geometry<f64>> {
    let exterior = simplify_coords_with(kernel, &polygon.exterior().0, params)?;

    let mut interiors = Vec::with_capacity(polygon.interiors().len());
    for ring in polygon.interiors() {
        let simplified = simplify_coords_with(kernel, &ring.0, params)?;
        if simplified.len() >= 3 {
            interiors.push(LineString::new(simplified));
        } else if params.preserve_topology {
            debug!(points = ring.0.len(), "interior ring degenerated, keeping original");
            interiors.push(ring.clone());
        } else {
            debug!(points = ring.0.len(), "interior ring degenerated, dropping it");
        }
    }

    let result = Geometry::Polygon(Polygon::new(LineString::new(exterior), interiors));
    if params.preserve_topology {
        collection_extract_polygon(&kernel.repairer.make_valid(&result))
    } else {
        Ok(result)
    }
}
