//! I/O operations for atlas meshes
//! 
//! This crate reads Wavefront OBJ meshes and BrainGlobe atlas packages
//! (metadata, structure table and per-region meshes) from disk.

pub mod obj;
pub mod atlas;

pub use crate::obj::ObjReader;
pub use atlas::{Atlas, AtlasMetadata, Structure, default_brainglobe_dir};

use stereoatlas_core::{Error, Result, TriangleMesh};

/// Trait for reading meshes from files
pub trait MeshReader {
    fn read_mesh<P: AsRef<std::path::Path>>(path: P) -> Result<TriangleMesh>;
}

/// Auto-detect format and read mesh
pub fn read_mesh<P: AsRef<std::path::Path>>(path: P) -> Result<TriangleMesh> {
    let path = path.as_ref();
    match path.extension().and_then(|s| s.to_str()) {
        Some("obj") | Some("OBJ") => ObjReader::read_mesh(path),
        _ => Err(Error::UnsupportedFormat(
            format!("Unsupported mesh format: {:?}", path.extension())
        )),
    }
}
