//! # geonorm Core
//!
//! Core types and traits for the geonorm geometry normalization library.
//!
//! This crate provides:
//! - `Error` / `Result`: the error taxonomy shared by every operation
//! - `GeometryType` / `PrimitiveType`: the closed geometry type algebra
//! - `Algorithm`: trait for consistent algorithm objects

pub mod error;
pub mod vector;

pub use error::{Error, Result};
pub use vector::{GeometryType, PrimitiveType};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::vector::{
        canonicalize, to_geometry_type, to_multi_variant, to_primitive_type, GeometryType,
        IntoGeometryType, PrimitiveType,
    };
    pub use crate::Algorithm;
}

/// Core trait for all algorithms in geonorm.
///
/// Algorithms are pure functions that transform input data according to parameters.
pub trait Algorithm {
    /// Input type for the algorithm
    type Input;
    /// Output type for the algorithm
    type Output;
    /// Parameters controlling algorithm behavior
    type Params: Default;
    /// Error type for algorithm execution
    type Error: std::error::Error;

    /// Returns the algorithm name
    fn name(&self) -> &'static str;

    /// Returns a description of what the algorithm does
    fn description(&self) -> &'static str;

    /// Execute the algorithm
    fn execute(
        &self,
        input: Self::Input,
        params: Self::Params,
    ) -> std::result::Result<Self::Output, Self::Error>;

    /// Execute with default parameters
    fn execute_default(
        &self,
        input: Self::Input,
    ) -> std::result::Result<Self::Output, Self::Error> {
        self.execute(input, Self::Params::default())
    }
}
