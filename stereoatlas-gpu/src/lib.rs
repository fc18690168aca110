//! # stereoatlas GPU
//!
//! wgpu device setup and the translucent mesh renderer used to draw atlas
//! regions and trajectory markers.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use stereoatlas_gpu::{MeshRenderer, MeshRenderConfig};
//!
//! fn example(window: Arc<winit::window::Window>) -> stereoatlas_core::Result<()> {
//!     let renderer = pollster::block_on(MeshRenderer::new(window, MeshRenderConfig::default()))?;
//!     Ok(())
//! }
//! ```

pub mod device;
pub mod mesh;

// Re-export commonly used items
pub use device::GpuContext;
pub use mesh::{
    mesh_to_gpu_mesh, plan_passes, surface_error_status, CameraUniform, DrawUniform, FrameStatus,
    GpuMesh, MaterialParams, MeshRenderConfig, MeshRenderer, MeshVertex, PassSetup, ViewPass,
};
