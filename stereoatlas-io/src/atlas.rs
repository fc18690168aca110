//! BrainGlobe atlas packages
//!
//! An installed atlas is a directory named `<atlas_name>_v<version>` holding
//! `metadata.json`, `structures.json` and a `meshes/` folder with one OBJ file
//! per structure id. Meshes are already in atlas micrometres.

use crate::{MeshReader, ObjReader};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use stereoatlas_core::{Color, Error, Result, TriangleMesh};
use tracing::{debug, info};

/// Contents of `metadata.json`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtlasMetadata {
    pub name: String,
    #[serde(default)]
    pub citation: String,
    #[serde(default)]
    pub atlas_link: String,
    #[serde(default)]
    pub species: String,
    #[serde(default = "default_symmetric")]
    pub symmetric: bool,
    /// Voxel size in micrometres, per axis
    pub resolution: [f64; 3],
    #[serde(default = "default_orientation")]
    pub orientation: String,
    #[serde(default)]
    pub version: String,
    /// Volume shape in voxels, per axis
    pub shape: [usize; 3],
}

fn default_symmetric() -> bool {
    true
}

fn default_orientation() -> String {
    "asr".to_string()
}

/// One row of `structures.json`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Structure {
    pub acronym: String,
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub structure_id_path: Vec<u32>,
    #[serde(default = "default_rgb")]
    pub rgb_triplet: [u8; 3],
}

fn default_rgb() -> [u8; 3] {
    [255, 255, 255]
}

impl Structure {
    /// Atlas-defined display colour
    pub fn color(&self) -> Color {
        Color::from_rgb8(self.rgb_triplet)
    }
}

/// An atlas package opened from disk
#[derive(Debug, Clone)]
pub struct Atlas {
    root: PathBuf,
    metadata: AtlasMetadata,
    structures: Vec<Structure>,
    by_acronym: HashMap<String, usize>,
}

/// `~/.brainglobe`, where BrainGlobe installs atlases
pub fn default_brainglobe_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".brainglobe")
}

/// Version suffix of an installed atlas directory, as comparable numbers
fn parse_version(dir_name: &str, atlas_name: &str) -> Option<Vec<u32>> {
    let rest = dir_name.strip_prefix(atlas_name)?.strip_prefix("_v")?;
    rest.split('.').map(|part| part.parse().ok()).collect()
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let text = fs::read_to_string(path).map_err(|e| {
        Error::Io(std::io::Error::new(
            e.kind(),
            format!("Failed to read {}: {}", path.display(), e),
        ))
    })?;
    serde_json::from_str(&text)
        .map_err(|e| Error::InvalidData(format!("Malformed {}: {}", path.display(), e)))
}

impl Atlas {
    /// Open an atlas package directory
    pub fn open<P: AsRef<Path>>(root: P) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        if !root.is_dir() {
            return Err(Error::AtlasNotFound(format!(
                "{} is not a directory",
                root.display()
            )));
        }

        let metadata: AtlasMetadata = read_json(&root.join("metadata.json"))?;
        let structures: Vec<Structure> = read_json(&root.join("structures.json"))?;
        let by_acronym = structures
            .iter()
            .enumerate()
            .map(|(i, s)| (s.acronym.clone(), i))
            .collect();

        debug!(
            atlas = %metadata.name,
            structures = structures.len(),
            path = %root.display(),
            "opened atlas"
        );

        Ok(Self {
            root,
            metadata,
            structures,
            by_acronym,
        })
    }

    /// Find an installed atlas by name, e.g. `allen_mouse_10um`.
    ///
    /// When several versions are installed the highest one is used.
    pub fn locate<P: AsRef<Path>>(brainglobe_dir: P, atlas_name: &str) -> Result<Self> {
        let brainglobe_dir = brainglobe_dir.as_ref();
        let entries = fs::read_dir(brainglobe_dir).map_err(|e| {
            Error::AtlasNotFound(format!(
                "Cannot read atlas directory {}: {}",
                brainglobe_dir.display(),
                e
            ))
        })?;

        let mut best: Option<(Vec<u32>, PathBuf)> = None;
        for entry in entries.flatten() {
            let path = entry.path();
            if !path.is_dir() {
                continue;
            }
            let Some(dir_name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if let Some(version) = parse_version(dir_name, atlas_name) {
                if best.as_ref().map_or(true, |(v, _)| version > *v) {
                    best = Some((version, path.clone()));
                }
            }
        }

        let (_, path) = best.ok_or_else(|| {
            Error::AtlasNotFound(format!(
                "No installed atlas named '{}' under {}",
                atlas_name,
                brainglobe_dir.display()
            ))
        })?;
        info!(atlas = atlas_name, path = %path.display(), "using atlas");
        Self::open(path)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn metadata(&self) -> &AtlasMetadata {
        &self.metadata
    }

    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    pub fn structures(&self) -> &[Structure] {
        &self.structures
    }

    /// Look up a structure by acronym, e.g. `ENTm`
    pub fn structure(&self, acronym: &str) -> Result<&Structure> {
        self.by_acronym
            .get(acronym)
            .map(|&i| &self.structures[i])
            .ok_or_else(|| Error::UnknownRegion {
                name: acronym.to_string(),
                atlas: self.metadata.name.clone(),
            })
    }

    /// Volume extent in micrometres (shape times resolution)
    pub fn extent(&self) -> [f64; 3] {
        let m = &self.metadata;
        [
            m.shape[0] as f64 * m.resolution[0],
            m.shape[1] as f64 * m.resolution[1],
            m.shape[2] as f64 * m.resolution[2],
        ]
    }

    /// Left-right position of the midline
    pub fn midline(&self) -> f64 {
        self.extent()[2] / 2.0
    }

    pub fn mesh_path(&self, structure: &Structure) -> PathBuf {
        self.root.join("meshes").join(format!("{}.obj", structure.id))
    }

    /// Load the mesh of a region by acronym
    pub fn region_mesh(&self, acronym: &str) -> Result<TriangleMesh> {
        let structure = self.structure(acronym)?;
        let path = self.mesh_path(structure);
        if !path.is_file() {
            return Err(Error::InvalidData(format!(
                "Atlas {} has no mesh for {} (expected {})",
                self.metadata.name,
                acronym,
                path.display()
            )));
        }
        let mesh = ObjReader::read_mesh(&path)?;
        debug!(region = acronym, faces = mesh.face_count(), "loaded region mesh");
        Ok(mesh)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const METADATA: &str = r#"{
        "name": "allen_mouse",
        "citation": "Wang et al. 2020, https://doi.org/10.1016/j.cell.2020.04.007",
        "atlas_link": "http://www.brain-map.org",
        "species": "Mus musculus",
        "symmetric": true,
        "resolution": [10.0, 10.0, 10.0],
        "orientation": "asr",
        "version": "1.2",
        "shape": [1320, 800, 1140],
        "trasform_to_bg": [[1.0, 0.0, 0.0, 0.0], [0.0, 1.0, 0.0, 0.0], [0.0, 0.0, 1.0, 0.0], [0.0, 0.0, 0.0, 1.0]],
        "additional_references": []
    }"#;

    const STRUCTURES: &str = r#"[
        {"acronym": "root", "id": 997, "name": "root", "structure_id_path": [997], "rgb_triplet": [255, 255, 255]},
        {"acronym": "ENTm", "id": 926, "name": "Entorhinal area, medial part, dorsal zone", "structure_id_path": [997, 8, 926], "rgb_triplet": [50, 184, 37]}
    ]"#;

    const TRIANGLE: &str = "v 0 0 0\nv 100 0 0\nv 0 100 0\nf 1 2 3\n";

    fn write_atlas(dir: &Path) {
        fs::create_dir_all(dir.join("meshes")).unwrap();
        fs::write(dir.join("metadata.json"), METADATA).unwrap();
        fs::write(dir.join("structures.json"), STRUCTURES).unwrap();
        fs::write(dir.join("meshes").join("997.obj"), TRIANGLE).unwrap();
    }

    #[test]
    fn test_open_and_lookup() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("allen_mouse_10um_v1.2");
        write_atlas(&dir);

        let atlas = Atlas::open(&dir).unwrap();
        assert_eq!(atlas.name(), "allen_mouse");
        assert_eq!(atlas.structure("ENTm").unwrap().id, 926);
        assert_eq!(atlas.extent(), [13200.0, 8000.0, 11400.0]);
        assert_eq!(atlas.midline(), 5700.0);
        assert_eq!(atlas.structure("root").unwrap().color(), Color::WHITE);
    }

    #[test]
    fn test_unknown_region() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("allen_mouse_10um_v1.2");
        write_atlas(&dir);

        let atlas = Atlas::open(&dir).unwrap();
        let err = atlas.region_mesh("NOPE").unwrap_err();
        assert!(matches!(err, Error::UnknownRegion { ref name, .. } if name == "NOPE"));
    }

    #[test]
    fn test_region_mesh_and_missing_mesh() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("allen_mouse_10um_v1.2");
        write_atlas(&dir);

        let atlas = Atlas::open(&dir).unwrap();
        assert_eq!(atlas.region_mesh("root").unwrap().face_count(), 1);
        assert!(matches!(atlas.region_mesh("ENTm"), Err(Error::InvalidData(_))));
    }

    #[test]
    fn test_locate_picks_highest_version() {
        let tmp = tempfile::tempdir().unwrap();
        write_atlas(&tmp.path().join("allen_mouse_10um_v1.2"));
        write_atlas(&tmp.path().join("allen_mouse_10um_v1.10"));
        write_atlas(&tmp.path().join("allen_mouse_25um_v9.0"));

        let atlas = Atlas::locate(tmp.path(), "allen_mouse_10um").unwrap();
        assert!(atlas.root().ends_with("allen_mouse_10um_v1.10"));
    }

    #[test]
    fn test_locate_missing_atlas() {
        let tmp = tempfile::tempdir().unwrap();
        let err = Atlas::locate(tmp.path(), "allen_mouse_10um").unwrap_err();
        assert!(matches!(err, Error::AtlasNotFound(_)));

        let err = Atlas::locate(tmp.path().join("nowhere"), "allen_mouse_10um").unwrap_err();
        assert!(matches!(err, Error::AtlasNotFound(_)));
    }

    #[test]
    fn test_malformed_structures() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("allen_mouse_10um_v1.2");
        write_atlas(&dir);
        fs::write(dir.join("structures.json"), "{not json").unwrap();
        assert!(matches!(Atlas::open(&dir), Err(Error::InvalidData(_))));
    }

    #[test]
    fn test_parse_version() {
        assert_eq!(parse_version("allen_mouse_10um_v1.2", "allen_mouse_10um"), Some(vec![1, 2]));
        assert_eq!(parse_version("allen_mouse_10um_vx", "allen_mouse_10um"), None);
        assert_eq!(parse_version("allen_mouse_25um_v1.2", "allen_mouse_10um"), None);
    }
}
