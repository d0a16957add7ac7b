//! Vector normalization algorithms
//!
//! Operations on `geo` geometries used between higher level spatial steps:
//! - Collect: combine geometries into one canonical (Multi)geometry
//! - Collection extract: keep only points, lines or polygons
//! - Remove inner rings: drop (small) polygon holes
//! - Make valid: repair invalid topology
//! - Simplify: reduce vertex count (Douglas-Peucker, Lang, Visvalingam)
//! - Measurements: vertex count, ring area

mod collect;
pub mod kernel;
mod lang;
mod measurements;
mod repair;
mod rings;
mod simplify;

pub use collect::{collect, collection_extract, collection_extract_polygon};
pub use kernel::{GeoKernel, GeometryPredicate, IndexSelector, Kernel, ValidityRepairer};
pub use lang::{simplify_coords_lang, simplify_coords_lang_idx};
pub use measurements::{num_points, ring_area};
pub use repair::{make_valid, make_valid_with};
pub use rings::{remove_inner_rings, remove_inner_rings_polygon};
pub use simplify::{
    simplify, simplify_coords, simplify_with, Simplify, SimplifyAlgorithm, SimplifyParams,
};
