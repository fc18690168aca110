//! Core data structures for stereoatlas
//! 
//! This crate provides the coordinate types shared by the rest of the workspace,
//! the stereotaxic to atlas (CCF) transform, triangle meshes and colours.

pub mod point;
pub mod mesh;
pub mod color;
pub mod traits;
pub mod transform;
pub mod error;

pub use point::*;
pub use mesh::*;
pub use color::*;
pub use traits::*;
pub use transform::*;
pub use error::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::{Point3, Vector3, Matrix3, Matrix4};

// Type aliases for easier imports
pub type Mesh = TriangleMesh;
