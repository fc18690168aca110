//! Stereotaxic to atlas (CCF) coordinate transform
//!
//! The transform stretches the superior-inferior axis, rotates the
//! anterior-posterior/superior-inferior plane and then moves the origin from
//! Bregma to the CCF origin.
//!
//! Parameters follow the Allen Institute community post describing the opposite
//! conversion (CCF to stereotaxic):
//! <https://community.brain-map.org/t/how-to-transform-ccf-x-y-z-coordinates-into-stereotactic-coordinates/1858/3>.
//! The axis schematic at the top of that post is wrong; the corrected one is
//! further down the thread.
//!
//! This is a very approximate alignment. The constants may also be applied in
//! the reverse direction relative to the cited derivation. They are kept as
//! published; results are good enough for visual checks only.

use crate::point::{AtlasCoord, Point3d, StereotaxicCoord, Vector3d};
use nalgebra::Matrix4;
use serde::{Deserialize, Serialize};

/// Per-axis divisor compensating the superior-inferior scale difference.
pub const CCF_STRETCH: [f64; 3] = [1.0, 0.9434, 1.0];

/// Tilt between the stereotaxic and CCF frames, about -5 degrees.
pub const DEFAULT_ROTATION_RADIANS: f64 = -0.0873;

/// Position of Bregma in CCF micrometres.
pub const CCF_TRANSLATION: [f64; 3] = [5400.0, 440.0, 5700.0];

/// Stretch, rotate, translate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StereotaxicTransform {
    pub stretch: Vector3d,
    pub angle: f64,
    pub translation: Vector3d,
}

impl StereotaxicTransform {
    /// Default constants with a different rotation angle
    pub fn with_angle(angle: f64) -> Self {
        Self {
            angle,
            ..Self::default()
        }
    }

    /// Map a stereotaxic coordinate into atlas space
    pub fn apply(&self, coord: StereotaxicCoord) -> AtlasCoord {
        let p = coord.0;

        let stretched = Vector3d::new(
            p.x / self.stretch.x,
            p.y / self.stretch.y,
            p.z / self.stretch.z,
        );

        let (sin, cos) = self.angle.sin_cos();
        let rotated = Vector3d::new(
            stretched.x * cos - stretched.y * sin,
            stretched.x * sin + stretched.y * cos,
            stretched.z,
        );

        AtlasCoord(Point3d::from(rotated + self.translation))
    }

    /// The same mapping as a homogeneous 4x4 matrix
    pub fn to_homogeneous(&self) -> Matrix4<f64> {
        let (sin, cos) = self.angle.sin_cos();
        let mut rotation = Matrix4::identity();
        rotation[(0, 0)] = cos;
        rotation[(0, 1)] = -sin;
        rotation[(1, 0)] = sin;
        rotation[(1, 1)] = cos;

        let stretch = Matrix4::new_nonuniform_scaling(&Vector3d::new(
            1.0 / self.stretch.x,
            1.0 / self.stretch.y,
            1.0 / self.stretch.z,
        ));

        Matrix4::new_translation(&self.translation) * rotation * stretch
    }
}

impl Default for StereotaxicTransform {
    fn default() -> Self {
        Self {
            stretch: Vector3d::from(CCF_STRETCH),
            angle: DEFAULT_ROTATION_RADIANS,
            translation: Vector3d::from(CCF_TRANSLATION),
        }
    }
}

/// Convert a stereotaxic coordinate to CCF micrometres.
///
/// Pass [`DEFAULT_ROTATION_RADIANS`] for the published alignment.
pub fn stereo_to_ccf(coord: StereotaxicCoord, angle: f64) -> AtlasCoord {
    StereotaxicTransform::with_angle(angle).apply(coord)
}
