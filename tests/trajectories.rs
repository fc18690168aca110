//! End-to-end plot against a temporary BrainGlobe atlas

use std::fs;
use std::path::Path;

use stereoatlas::config::Config;
use stereoatlas::trajectories::{example_markers, run};
use stereoatlas::visualization::{ActorKind, ComposedScene, SceneRenderer};
use stereoatlas::{stereo_to_ccf, Color, Error, Result, StereotaxicCoord, DEFAULT_ROTATION_RADIANS};

const METADATA: &str = r#"{
    "name": "allen_mouse",
    "citation": "Wang et al 2020, https://doi.org/10.1016/j.cell.2020.04.007",
    "atlas_link": "http://www.brain-map.org",
    "species": "Mus musculus",
    "symmetric": true,
    "resolution": [10.0, 10.0, 10.0],
    "orientation": "asr",
    "version": "1.2",
    "shape": [1320, 800, 1140]
}"#;

const STRUCTURES: &str = r#"[
    {"acronym": "root", "id": 997, "name": "root", "structure_id_path": [997], "rgb_triplet": [255, 255, 255]},
    {"acronym": "ENTm", "id": 926, "name": "Entorhinal area, medial part, dorsal zone", "structure_id_path": [997, 8, 567, 688, 695, 822, 926], "rgb_triplet": [50, 184, 37]}
]"#;

const TETRAHEDRON: &str = "v 2000 1000 2000\nv 11000 1000 2000\nv 6000 7000 9000\nv 6000 1000 10000\n\
f 1 2 3\nf 1 2 4\nf 1 3 4\nf 2 3 4\n";

#[derive(Default)]
struct RecordingRenderer {
    frames: Vec<(ComposedScene, f32)>,
}

impl SceneRenderer for RecordingRenderer {
    fn render(&mut self, scene: &ComposedScene, zoom: f32) -> Result<()> {
        self.frames.push((scene.clone(), zoom));
        Ok(())
    }
}

fn install_atlas(brainglobe_dir: &Path, version: &str, meshes: &[u32]) {
    let dir = brainglobe_dir.join(format!("allen_mouse_10um_v{}", version));
    fs::create_dir_all(dir.join("meshes")).unwrap();
    fs::write(dir.join("metadata.json"), METADATA).unwrap();
    fs::write(dir.join("structures.json"), STRUCTURES).unwrap();
    for id in meshes {
        fs::write(dir.join("meshes").join(format!("{}.obj", id)), TETRAHEDRON).unwrap();
    }
}

fn config_for(dir: &Path) -> Config {
    Config {
        brainglobe_dir: Some(dir.to_path_buf()),
        ..Config::default()
    }
}

#[test]
fn test_bregma_marker_matches_transform() {
    let markers = example_markers(DEFAULT_ROTATION_RADIANS);
    let bregma = &markers[2].marker;
    assert_eq!(
        bregma.start,
        stereo_to_ccf(StereotaxicCoord::new(0.0, 0.0, 0.0), DEFAULT_ROTATION_RADIANS)
    );
    assert_eq!(
        bregma.end,
        stereo_to_ccf(StereotaxicCoord::new(0.0, 4000.0, 0.0), DEFAULT_ROTATION_RADIANS)
    );
    assert_eq!(bregma.color, Color::RED);
}

#[test]
fn test_run_renders_regions_and_markers() {
    let tmp = tempfile::tempdir().unwrap();
    install_atlas(tmp.path(), "1.2", &[997, 926]);

    let mut renderer = RecordingRenderer::default();
    let scene = run(&config_for(tmp.path()), &mut renderer).unwrap();

    let names: Vec<&str> = scene.actors().iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["root", "ENTm", "Cylinder", "Cylinder", "Cylinder"]);
    assert_eq!(scene.actors()[0].alpha, 0.1);
    assert_eq!(scene.actors()[1].alpha, 0.2);

    assert_eq!(renderer.frames.len(), 1);
    let (frame, zoom) = &renderer.frames[0];
    assert_eq!(*zoom, 1.2);
    // Five actors plus the three axis cylinders
    assert_eq!(frame.actors.len(), 8);
    assert_eq!(frame.actors.iter().filter(|a| a.kind == ActorKind::Axis).count(), 3);
    assert!(frame.inset.is_none());
}

#[test]
fn test_newest_atlas_version_is_used() {
    let tmp = tempfile::tempdir().unwrap();
    install_atlas(tmp.path(), "1.0", &[997]);
    install_atlas(tmp.path(), "1.2", &[997, 926]);

    let mut renderer = RecordingRenderer::default();
    let scene = run(&config_for(tmp.path()), &mut renderer).unwrap();
    assert!(scene.atlas().root().ends_with("allen_mouse_10um_v1.2"));
}

#[test]
fn test_missing_region_mesh_fails_before_rendering() {
    let tmp = tempfile::tempdir().unwrap();
    install_atlas(tmp.path(), "1.2", &[997]);

    let mut renderer = RecordingRenderer::default();
    let result = run(&config_for(tmp.path()), &mut renderer);
    assert!(matches!(result, Err(Error::InvalidData(_))));
    assert!(renderer.frames.is_empty());
}

#[test]
fn test_missing_atlas_is_reported() {
    let tmp = tempfile::tempdir().unwrap();
    let mut renderer = RecordingRenderer::default();
    let result = run(&config_for(tmp.path()), &mut renderer);
    assert!(matches!(result, Err(Error::AtlasNotFound(_))));
}
