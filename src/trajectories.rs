//! Trajectory plot of the lateral entorhinal cortex injection
//!
//! Converts a fixed set of stereotaxic trajectories into atlas space and draws
//! them as cylinders alongside the brain outline and the medial entorhinal
//! cortex.

use crate::config::Config;
use stereoatlas_core::{stereo_to_ccf, AtlasCoord, Color, Hemisphere, Result, StereotaxicCoord};
use stereoatlas_visualization::{create_scene_in, Scene, SceneOptions, SceneRenderer, SegmentMarker};
use tracing::info;

/// A labelled marker in atlas space
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    pub label: &'static str,
    pub marker: SegmentMarker,
}

/// A brain region to show and how to draw it
#[derive(Debug, Clone, PartialEq)]
pub struct RegionSpec {
    pub name: &'static str,
    pub alpha: f32,
    pub color: Color,
    pub hemisphere: Hemisphere,
}

fn trajectory(
    label: &'static str,
    start: AtlasCoord,
    end: AtlasCoord,
    color: Color,
    radius: f32,
) -> Trajectory {
    Trajectory {
        label,
        marker: SegmentMarker::new(start, end, color, radius),
    }
}

/// The three markers of the plot, with stereotaxic points converted at `angle`.
///
/// 1. The extent of atlas space, drawn directly in atlas coordinates.
/// 2. LEC injection site (Vandrey et al. 2022, 3.8 mm posterior and 4 mm
///    lateral) down to an estimated target 4 mm deep.
/// 3. Bregma to 4 mm straight below it, as a check on the transform.
pub fn example_markers(angle: f64) -> Vec<Trajectory> {
    let convert = |ap, dv, lr| stereo_to_ccf(StereotaxicCoord::new(ap, dv, lr), angle);

    vec![
        trajectory(
            "atlas extent",
            AtlasCoord::origin(),
            AtlasCoord::new(13200.0, 8000.0, 11400.0),
            Color::BLUE,
            10.0,
        ),
        trajectory(
            "LEC injection",
            convert(3800.0, 0.0, 4000.0),
            convert(4200.0, 4000.0, 4000.0),
            Color::GREEN,
            100.0,
        ),
        trajectory(
            "Bregma",
            convert(0.0, 0.0, 0.0),
            convert(0.0, 4000.0, 0.0),
            Color::RED,
            100.0,
        ),
    ]
}

/// Whole-brain outline and the medial entorhinal cortex
pub fn example_regions() -> Vec<RegionSpec> {
    vec![
        RegionSpec {
            name: "root",
            alpha: 0.1,
            color: Color::GREY,
            hemisphere: Hemisphere::Both,
        },
        RegionSpec {
            name: "ENTm",
            alpha: 0.2,
            color: Color::from_name("lightskyblue").unwrap_or(Color::BLUE),
            hemisphere: Hemisphere::Both,
        },
    ]
}

/// Add the plot's regions, then `markers`, to `scene`
pub fn assemble_scene(scene: &mut Scene, markers: &[Trajectory]) -> Result<()> {
    for region in example_regions() {
        scene.add_region(region.name, region.alpha, Some(region.color), region.hemisphere)?;
    }
    for trajectory in markers {
        let m = &trajectory.marker;
        info!(label = trajectory.label, "placing marker");
        scene.add_segment_marker(m.start, m.end, m.color, m.radius, m.alpha);
    }
    Ok(())
}

/// Build the full plot from `config` and hand it to `renderer`
pub fn run<R: SceneRenderer + ?Sized>(config: &Config, renderer: &mut R) -> Result<Scene> {
    let markers = example_markers(config.rotation_radians);

    let brainglobe_dir = config.brainglobe_dir();
    info!(atlas = %config.atlas_name, dir = %brainglobe_dir.display(), "creating scene");
    let mut scene = create_scene_in(
        &brainglobe_dir,
        &config.atlas_name,
        SceneOptions {
            show_root_outline: false,
            show_inset: false,
        },
        config.render_settings(),
    )?;

    assemble_scene(&mut scene, &markers)?;
    scene.render(renderer, config.zoom)?;
    Ok(scene)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use stereoatlas_core::DEFAULT_ROTATION_RADIANS;

    #[test]
    fn test_marker_plan() {
        let markers = example_markers(DEFAULT_ROTATION_RADIANS);
        assert_eq!(markers.len(), 3);
        let radii: Vec<f32> = markers.iter().map(|t| t.marker.radius).collect();
        assert_eq!(radii, vec![10.0, 100.0, 100.0]);
        assert_eq!(markers[0].marker.end, AtlasCoord::new(13200.0, 8000.0, 11400.0));
    }

    #[test]
    fn test_lec_marker_in_atlas_space() {
        let markers = example_markers(DEFAULT_ROTATION_RADIANS);
        let lec = &markers[1].marker;
        assert_relative_eq!(lec.start.ap(), 9185.528743307, epsilon = 1e-6);
        assert_relative_eq!(lec.start.dv(), 108.681220580, epsilon = 1e-6);
        assert_eq!(lec.start.lr(), 9700.0);
        assert_eq!(lec.end.lr(), 9700.0);
    }

    #[test]
    fn test_bregma_marker_follows_angle() {
        let straight = example_markers(0.0);
        let bregma = &straight[2].marker;
        assert_eq!(bregma.start, AtlasCoord::new(5400.0, 440.0, 5700.0));
        assert_relative_eq!(bregma.end.dv(), 440.0 + 4000.0 / 0.9434, epsilon = 1e-9);
        assert_eq!(bregma.end.ap(), 5400.0);
    }

    #[test]
    fn test_regions() {
        let regions = example_regions();
        assert_eq!(regions[0].name, "root");
        assert_eq!(regions[1].name, "ENTm");
        assert_eq!(Some(regions[1].color), Color::from_name("lightskyblue"));
        assert_eq!(regions[1].color.to_string(), "#87cefa");
        assert_eq!(regions[1].hemisphere, Hemisphere::Both);
    }
}
