//! # stereoatlas
//!
//! Plot stereotaxic injection trajectories inside the Allen mouse brain atlas.
//!
//! This is the umbrella crate that ties the workspace together. It re-exports the
//! individual crates, and it holds the configuration layer and the trajectory
//! driver behind the `plot-trajectories` binary.
//!
//! ## Crates
//!
//! - **Core**: coordinates, the stereotaxic to CCF transform, meshes and colours
//! - **I/O**: OBJ meshes and BrainGlobe atlas directories
//! - **GPU**: wgpu mesh renderer
//! - **Visualization**: scenes, markers, camera and the viewer window
//!
//! ## Quick Start
//!
//! ```rust
//! use stereoatlas::prelude::*;
//!
//! let bregma = stereo_to_ccf(StereotaxicCoord::new(0.0, 0.0, 0.0), DEFAULT_ROTATION_RADIANS);
//! assert_eq!(bregma.lr(), 5700.0);
//! ```

pub mod config;
pub mod trajectories;

// Re-export core functionality
pub use stereoatlas_core::*;

// Re-export sub-crates
pub use stereoatlas_gpu as gpu;
pub use stereoatlas_io as io;
pub use stereoatlas_visualization as visualization;

pub use config::{load_config, Config, ConfigError};
pub use trajectories::{assemble_scene, example_markers, example_regions, run, RegionSpec, Trajectory};

/// Convenient imports for common use cases
pub mod prelude {
    pub use stereoatlas_core::*;
    pub use stereoatlas_io::{Atlas, Structure};
    pub use stereoatlas_visualization::{
        create_scene, make_segment_actor, RenderSettings, Scene, SceneRenderer, SegmentMarker,
        ShaderStyle,
    };

    pub use crate::config::Config;
    pub use crate::trajectories::{assemble_scene, example_markers, run};
}
