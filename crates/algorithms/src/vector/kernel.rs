//! Geometry kernel boundary
//!
//! The engine never computes RDP/VW index sets, validity repairs or
//! intersection predicates itself. It asks a [`Kernel`], which bundles one
//! implementation of each collaborator. [`GeoKernel`] binds them to the
//! `geo` crate; tests plug in fakes.

use std::fmt;

use geo::{Coord, Geometry, Intersects, LineString, Point, SimplifyIdx, SimplifyVwIdx};
use geonorm_core::{Error, Result};

/// Selects the coordinate indices that survive a reduction algorithm.
pub trait IndexSelector: Send + Sync {
    /// Ramer-Douglas-Peucker with a perpendicular distance tolerance
    fn select_rdp(&self, coords: &[Coord<f64>], tolerance: f64) -> Vec<usize>;

    /// Visvalingam-Whyatt with a triangle area tolerance
    fn select_vw(&self, coords: &[Coord<f64>], tolerance: f64) -> Vec<usize>;
}

/// Turns any geometry into a valid one. The output tag may differ.
pub trait ValidityRepairer: Send + Sync {
    fn make_valid(&self, geometry: &Geometry<f64>) -> Geometry<f64>;
}

/// Point-versus-geometry intersection test (touching counts).
pub trait GeometryPredicate: Send + Sync {
    fn intersects(&self, point: &Point<f64>, geometry: &Geometry<f64>) -> bool;
}

/// Kernel backed by the `geo` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct GeoKernel;

impl IndexSelector for GeoKernel {
    fn select_rdp(&self, coords: &[Coord<f64>], tolerance: f64) -> Vec<usize> {
        LineString::new(coords.to_vec()).simplify_idx(&tolerance)
    }

    fn select_vw(&self, coords: &[Coord<f64>], tolerance: f64) -> Vec<usize> {
        LineString::new(coords.to_vec()).simplify_vw_idx(&tolerance)
    }
}

impl GeometryPredicate for GeoKernel {
    fn intersects(&self, point: &Point<f64>, geometry: &Geometry<f64>) -> bool {
        geometry.intersects(point)
    }
}

static GEO_KERNEL: GeoKernel = GeoKernel;

/// The set of collaborators an operation runs against.
///
/// The index selector is optional: without one, only the Lang algorithm is
/// available and RDP/VW requests fail with [`Error::MissingDependency`].
#[derive(Clone, Copy)]
pub struct Kernel<'a> {
    pub index_selector: Option<&'a dyn IndexSelector>,
    pub repairer: &'a dyn ValidityRepairer,
    pub predicate: &'a dyn GeometryPredicate,
}

impl Kernel<'static> {
    /// Production kernel: every collaborator bound to `geo`.
    pub fn geo() -> Self {
        Kernel {
            index_selector: Some(&GEO_KERNEL),
            repairer: &GEO_KERNEL,
            predicate: &GEO_KERNEL,
        }
    }
}

impl Default for Kernel<'static> {
    fn default() -> Self {
        Kernel::geo()
    }
}

impl<'a> Kernel<'a> {
    /// Kernel without an index selector.
    pub fn new(repairer: &'a dyn ValidityRepairer, predicate: &'a dyn GeometryPredicate) -> Self {
        Kernel {
            index_selector: None,
            repairer,
            predicate,
        }
    }

    pub fn with_index_selector(mut self, selector: &'a dyn IndexSelector) -> Self {
        self.index_selector = Some(selector);
        self
    }

    pub fn without_index_selector(mut self) -> Self {
        self.index_selector = None;
        self
    }

    /// The index selector, or `MissingDependency` if none is wired in.
    pub fn index_selector(&self) -> Result<&'a dyn IndexSelector> {
        self.index_selector.ok_or_else(|| {
            Error::MissingDependency(
                "rdp and vw simplification need an index selector in the kernel".into(),
            )
        })
    }
}

impl fmt::Debug for Kernel<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Kernel")
            .field("index_selector", &self.index_selector.is_some())
            .finish_non_exhaustive()
    }
}
