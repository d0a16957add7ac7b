//! # geonorm Algorithms
//!
//! Geometry normalization and simplification for geonorm.
//!
//! ## Available Algorithm Categories
//!
//! - **vector**: collect, collection extract, inner ring removal, validity
//!   repair, simplification (RDP, Lang, Visvalingam-Whyatt)
//!
//! All operations are pure functions over `geo` geometries. Collaborators
//! that are not implemented here (RDP/VW index selection, validity repair,
//! intersection tests) sit behind the traits in [`vector::kernel`].

pub mod vector;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::vector::{
        collect, collection_extract, collection_extract_polygon, make_valid, num_points,
        remove_inner_rings, simplify, simplify_coords_lang_idx, GeoKernel, Kernel, Simplify,
        SimplifyAlgorithm, SimplifyParams,
    };
    pub use geonorm_core::prelude::*;
}
