//! Atlas scenes: region meshes and markers composed for rendering

use crate::actor::{make_segment_actor, Actor, ActorKind};
use crate::settings::RenderSettings;
use std::path::Path;
use stereoatlas_core::{
    union_bounds, AtlasCoord, Color, Drawable, Hemisphere, Point3f, Result, TriangleMesh,
};
use stereoatlas_io::{default_brainglobe_dir, Atlas};
use tracing::{debug, info};

/// Radius of the axis cylinders drawn when `show_axes` is set
const AXIS_RADIUS: f32 = 20.0;

/// Scene construction flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SceneOptions {
    /// Add the whole-brain outline as a translucent region
    pub show_root_outline: bool,
    /// Draw a small overview of the root outline in a corner viewport
    pub show_inset: bool,
}

/// Everything a renderer needs for one frame, fully resolved
#[derive(Debug, Clone)]
pub struct ComposedScene {
    pub actors: Vec<Actor>,
    pub inset: Option<TriangleMesh>,
    pub settings: RenderSettings,
    pub bounds: (Point3f, Point3f),
}

/// Draws a composed scene, typically in a window
pub trait SceneRenderer {
    fn render(&mut self, scene: &ComposedScene, zoom: f32) -> Result<()>;
}

/// Regions and markers in one atlas
pub struct Scene {
    atlas: Atlas,
    options: SceneOptions,
    settings: RenderSettings,
    actors: Vec<Actor>,
}

/// Build a scene over an installed atlas in the default BrainGlobe directory
pub fn create_scene(show_root_outline: bool, show_inset: bool, atlas_name: &str) -> Result<Scene> {
    create_scene_in(
        default_brainglobe_dir(),
        atlas_name,
        SceneOptions {
            show_root_outline,
            show_inset,
        },
        RenderSettings::default(),
    )
}

/// Build a scene over an installed atlas under `brainglobe_dir`
pub fn create_scene_in<P: AsRef<Path>>(
    brainglobe_dir: P,
    atlas_name: &str,
    options: SceneOptions,
    settings: RenderSettings,
) -> Result<Scene> {
    let atlas = Atlas::locate(brainglobe_dir, atlas_name)?;
    Scene::new(atlas, options, settings)
}

impl Scene {
    pub fn new(atlas: Atlas, options: SceneOptions, settings: RenderSettings) -> Result<Self> {
        let mut scene = Self {
            atlas,
            options,
            settings,
            actors: Vec::new(),
        };
        if options.show_root_outline {
            let alpha = scene.settings.root_alpha;
            scene.add_region("root", alpha, Some(Color::GREY), Hemisphere::Both)?;
        }
        Ok(scene)
    }

    pub fn atlas(&self) -> &Atlas {
        &self.atlas
    }

    pub fn options(&self) -> SceneOptions {
        self.options
    }

    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut RenderSettings {
        &mut self.settings
    }

    pub fn actors(&self) -> &[Actor] {
        &self.actors
    }

    /// Add a brain region as a coloured, possibly translucent mesh.
    ///
    /// `color` defaults to the atlas colour of the region.
    pub fn add_region(
        &mut self,
        name: &str,
        alpha: f32,
        color: Option<Color>,
        hemisphere: Hemisphere,
    ) -> Result<&Actor> {
        let structure = self.atlas.structure(name)?;
        let color = color.unwrap_or_else(|| structure.color());
        let mesh = self
            .atlas
            .region_mesh(name)?
            .clip_hemisphere(hemisphere, self.atlas.midline() as f32);

        info!(region = name, %hemisphere, faces = mesh.face_count(), "adding brain region");
        Ok(self.push(Actor::new(name, ActorKind::Region, mesh, color, alpha)))
    }

    /// Add any prepared actor
    pub fn add_actor(&mut self, actor: Actor) -> &Actor {
        debug!(name = %actor.name, kind = ?actor.kind, "adding actor");
        self.push(actor)
    }

    /// Add a cylinder between two atlas points
    pub fn add_segment_marker(
        &mut self,
        start: AtlasCoord,
        end: AtlasCoord,
        color: Color,
        radius: f32,
        alpha: f32,
    ) -> &Actor {
        info!(%start, %end, %color, radius, "adding segment marker");
        self.push(make_segment_actor(start, end, color, radius, alpha))
    }

    fn push(&mut self, actor: Actor) -> &Actor {
        self.actors.push(actor);
        let last = self.actors.len() - 1;
        &self.actors[last]
    }

    /// Axis cylinders from the atlas origin along each axis
    fn axis_actors(&self) -> Vec<Actor> {
        let [ap, dv, lr] = self.atlas.extent();
        [
            ("AP", AtlasCoord::new(ap, 0.0, 0.0), Color::RED),
            ("DV", AtlasCoord::new(0.0, dv, 0.0), Color::GREEN),
            ("LR", AtlasCoord::new(0.0, 0.0, lr), Color::BLUE),
        ]
        .into_iter()
        .map(|(name, end, color)| {
            let mut actor = make_segment_actor(AtlasCoord::origin(), end, color, AXIS_RADIUS, 1.0);
            actor.name = format!("{} axis", name);
            actor.kind = ActorKind::Axis;
            actor
        })
        .collect()
    }

    /// Resolve actors, axes and inset into a frame description
    pub fn compose(&self) -> Result<ComposedScene> {
        let mut actors = self.actors.clone();
        if self.settings.show_axes {
            actors.extend(self.axis_actors());
        }

        let inset = if self.options.show_inset {
            Some(self.atlas.region_mesh("root")?)
        } else {
            None
        };

        let bounds = actors
            .iter()
            .filter(|a| !a.mesh.vertices.is_empty())
            .map(|a| a.bounding_box())
            .reduce(union_bounds)
            .unwrap_or_else(|| {
                let [ap, dv, lr] = self.atlas.extent();
                (Point3f::origin(), Point3f::new(ap as f32, dv as f32, lr as f32))
            });

        Ok(ComposedScene {
            actors,
            inset,
            settings: self.settings.clone(),
            bounds,
        })
    }

    /// Compose the scene and hand it to `renderer`
    pub fn render<R: SceneRenderer + ?Sized>(&self, renderer: &mut R, zoom: f32) -> Result<()> {
        let composed = self.compose()?;
        info!(actors = composed.actors.len(), zoom, "rendering scene");
        renderer.render(&composed, zoom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use stereoatlas_core::Error;

    const METADATA: &str = r#"{"name": "allen_mouse", "resolution": [10.0, 10.0, 10.0],
        "orientation": "asr", "version": "1.2", "shape": [1320, 800, 1140], "symmetric": true}"#;

    const STRUCTURES: &str = r#"[
        {"acronym": "root", "id": 997, "name": "root", "structure_id_path": [997], "rgb_triplet": [255, 255, 255]},
        {"acronym": "ENTm", "id": 926, "name": "Entorhinal area, medial part", "structure_id_path": [997, 926], "rgb_triplet": [50, 184, 37]}
    ]"#;

    // One triangle in each hemisphere (midline at 5700)
    const BILATERAL: &str = "v 1000 1000 1000\nv 2000 1000 1000\nv 1000 2000 1000\n\
v 1000 1000 10000\nv 2000 1000 10000\nv 1000 2000 10000\nf 1 2 3\nf 4 5 6\n";

    struct Recorder {
        calls: Vec<(usize, f32)>,
    }

    impl SceneRenderer for Recorder {
        fn render(&mut self, scene: &ComposedScene, zoom: f32) -> Result<()> {
            self.calls.push((scene.actors.len(), zoom));
            Ok(())
        }
    }

    fn atlas_dir() -> tempfile::TempDir {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("allen_mouse_10um_v1.2");
        fs::create_dir_all(dir.join("meshes")).unwrap();
        fs::write(dir.join("metadata.json"), METADATA).unwrap();
        fs::write(dir.join("structures.json"), STRUCTURES).unwrap();
        fs::write(dir.join("meshes/997.obj"), BILATERAL).unwrap();
        fs::write(dir.join("meshes/926.obj"), BILATERAL).unwrap();
        tmp
    }

    fn scene(tmp: &tempfile::TempDir, options: SceneOptions) -> Scene {
        create_scene_in(tmp.path(), "allen_mouse_10um", options, RenderSettings::default()).unwrap()
    }

    #[test]
    fn test_root_outline_added_on_creation() {
        let tmp = atlas_dir();
        let with_root = scene(&tmp, SceneOptions { show_root_outline: true, show_inset: false });
        assert_eq!(with_root.actors().len(), 1);
        assert_eq!(with_root.actors()[0].name, "root");
        assert_eq!(with_root.actors()[0].alpha, 0.2);

        let without = scene(&tmp, SceneOptions::default());
        assert!(without.actors().is_empty());
    }

    #[test]
    fn test_add_region_colors_and_hemispheres() {
        let tmp = atlas_dir();
        let mut scene = scene(&tmp, SceneOptions::default());

        let both = scene
            .add_region("ENTm", 0.2, Some("lightskyblue".parse().unwrap()), Hemisphere::Both)
            .unwrap();
        assert_eq!(both.mesh.face_count(), 2);
        assert_eq!(both.color.to_string(), "#87cefa");

        let right = scene.add_region("ENTm", 0.5, None, Hemisphere::Right).unwrap();
        assert_eq!(right.mesh.face_count(), 1);
        assert!(right.mesh.vertices.iter().all(|v| v.z > 5700.0));
        assert_eq!(right.color, Color::from_rgb8([50, 184, 37]));
    }

    #[test]
    fn test_unknown_region_is_fatal() {
        let tmp = atlas_dir();
        let mut scene = scene(&tmp, SceneOptions::default());
        let err = scene.add_region("XYZ", 0.2, None, Hemisphere::Both).unwrap_err();
        assert!(matches!(err, Error::UnknownRegion { .. }));
        assert!(scene.actors().is_empty());
    }

    #[test]
    fn test_compose_adds_axes_and_inset() {
        let tmp = atlas_dir();
        let mut scene = scene(&tmp, SceneOptions { show_root_outline: false, show_inset: true });
        scene.add_segment_marker(
            AtlasCoord::new(5400.0, 440.0, 5700.0),
            AtlasCoord::new(5769.7, 4663.8, 5700.0),
            Color::RED,
            100.0,
            1.0,
        );
        scene.settings_mut().show_axes = true;

        let composed = scene.compose().unwrap();
        assert_eq!(composed.actors.len(), 4);
        assert_eq!(
            composed.actors.iter().filter(|a| a.kind == ActorKind::Axis).count(),
            3
        );
        assert!(composed.inset.is_some());
        let (_, max) = composed.bounds;
        assert!(max.x >= 13200.0 && max.y >= 8000.0 && max.z >= 11400.0);
    }

    #[test]
    fn test_render_passes_zoom_to_renderer() {
        let tmp = atlas_dir();
        let mut scene = scene(&tmp, SceneOptions::default());
        scene.add_actor(make_segment_actor(
            AtlasCoord::origin(),
            AtlasCoord::new(100.0, 0.0, 0.0),
            Color::BLUE,
            10.0,
            1.0,
        ));
        let mut recorder = Recorder { calls: Vec::new() };
        scene.render(&mut recorder, 1.2).unwrap();
        assert_eq!(recorder.calls, vec![(1, 1.2)]);
    }

    #[test]
    fn test_missing_atlas() {
        let tmp = tempfile::tempdir().unwrap();
        let result = create_scene_in(tmp.path(), "allen_mouse_10um", SceneOptions::default(), RenderSettings::default());
        assert!(matches!(result, Err(Error::AtlasNotFound(_))));
    }
}
