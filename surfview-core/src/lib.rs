//! Core data structures for surfview
//!
//! This crate provides the geometry types shared by the rest of the
//! workspace: points and height ranges, named vertex attributes, indexed
//! meshes, and the vertex welding routine that turns a triangle soup into a
//! compact indexed mesh.

pub mod point;
pub mod attribute;
pub mod mesh;
pub mod weld;
pub mod traits;
pub mod error;

pub use point::*;
pub use attribute::*;
pub use mesh::*;
pub use weld::*;
pub use traits::*;
pub use error::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::{Point3, Vector3};
