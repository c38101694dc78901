//! # surfview reconstruction
//!
//! Builds renderable surfaces from height field samples.
//!
//! The pipeline triangulates the `(x, y)` projection of the samples with a
//! Delaunay triangulation, expands the triangles into a soup in the scene's
//! up-axis frame, welds coincident vertices and computes vertex normals.

pub mod delaunay;
pub mod pipeline;

// Re-export commonly used items
pub use delaunay::*;
pub use pipeline::*;
