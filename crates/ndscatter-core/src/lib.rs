//! Core types for the ndscatter projection engine.
//!
//! This crate provides fundamental data structures with no external dependencies:
//! - `linalg` - matrix primitives and Gram-Schmidt orthogonalization
//! - `Projection` - the orthonormal projection basis and point projection
//! - `DataMatrix` - row-major high-dimensional point storage
//! - `geometry` - point-in-polygon hit testing for lasso selection

pub mod dataset;
pub mod geometry;
pub mod linalg;
pub mod projection;

pub use dataset::DataMatrix;
pub use geometry::points_in_polygon;
pub use linalg::Matrix;
pub use projection::{proximity, Projection};
