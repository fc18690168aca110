//! Visualization and rendering for atlas scenes
//! 
//! This crate composes brain region meshes and trajectory markers into a scene
//! and shows it in a window using wgpu and winit:
//! - Region actors loaded from a BrainGlobe atlas
//! - Cylinder markers between two atlas points
//! - Shading styles, axes and an overview inset
//! - Orbit/zoom camera controls

pub mod actor;
pub mod settings;
pub mod scene;
pub mod camera;
pub mod viewer;

pub use actor::*;
pub use settings::*;
pub use scene::*;
pub use camera::*;
pub use viewer::*;
