//! Camera utilities for 3D visualization

use nalgebra::{Matrix4, Perspective3, Point3, Rotation3, Unit, Vector3};

// Perspective3 produces OpenGL clip depth in [-1, 1]; wgpu expects [0, 1]
#[rustfmt::skip]
fn opengl_to_wgpu() -> Matrix4<f32> {
    Matrix4::new(
        1.0, 0.0, 0.0, 0.0,
        0.0, 1.0, 0.0, 0.0,
        0.0, 0.0, 0.5, 0.5,
        0.0, 0.0, 0.0, 1.0,
    )
}

/// Default view direction from the target: anterior, superior and lateral
pub const THREE_QUARTER_VIEW: [f32; 3] = [-1.0, -0.75, 1.0];

/// Atlas dorsal-ventral axis points inferior, so superior is -y
pub const ATLAS_UP: [f32; 3] = [0.0, -1.0, 0.0];

const DEFAULT_FOV: f32 = std::f32::consts::FRAC_PI_6;

/// A 3D camera for viewing atlas scenes
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub position: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
    pub fov: f32,
    pub aspect_ratio: f32,
    pub near: f32,
    pub far: f32,
    home: Option<Box<Camera>>,
}

impl Camera {
    /// Create a new camera
    pub fn new(
        position: Point3<f32>,
        target: Point3<f32>,
        up: Vector3<f32>,
        fov: f32,
        aspect_ratio: f32,
        near: f32,
        far: f32,
    ) -> Self {
        Self {
            position,
            target,
            up,
            fov,
            aspect_ratio,
            near,
            far,
            home: None,
        }
    }

    /// Camera looking at the box `min..max` from a three-quarter view, far
    /// enough back for the whole box to fit.
    pub fn framing(min: Point3<f32>, max: Point3<f32>, aspect_ratio: f32) -> Self {
        let target = nalgebra::center(&min, &max);
        let radius = ((max - min).norm() / 2.0).max(1.0);
        let fov = DEFAULT_FOV;
        // Fit the bounding sphere in the narrower of the two view angles
        let half_angle = if aspect_ratio < 1.0 {
            ((fov / 2.0).tan() * aspect_ratio).atan()
        } else {
            fov / 2.0
        };
        let distance = radius / half_angle.sin();
        let direction = Vector3::from(THREE_QUARTER_VIEW).normalize();

        Self::new(
            target + direction * distance,
            target,
            Vector3::from(ATLAS_UP),
            fov,
            aspect_ratio,
            (distance - radius * 2.0).max(distance * 0.01),
            distance + radius * 2.0,
        )
    }

    /// Get the view matrix
    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(&self.position, &self.target, &self.up)
    }

    /// Get the projection matrix
    pub fn projection_matrix(&self) -> Matrix4<f32> {
        let perspective = Perspective3::new(self.aspect_ratio, self.fov, self.near, self.far);
        opengl_to_wgpu() * perspective.into_inner()
    }

    pub fn view_projection(&self) -> Matrix4<f32> {
        self.projection_matrix() * self.view_matrix()
    }

    /// Narrow the field of view by `factor`; values above 1 magnify.
    pub fn zoom(&mut self, factor: f32) {
        if factor > 0.0 && factor.is_finite() {
            self.fov = (self.fov / factor).clamp(0.01, 3.0);
        }
    }

    /// Move the camera forward
    pub fn move_forward(&mut self, distance: f32) {
        let direction = (self.target - self.position).normalize();
        self.position += direction * distance;
        self.target += direction * distance;
    }

    /// Rotate the camera around the target
    pub fn orbit(&mut self, horizontal: f32, vertical: f32) {
        let offset = self.position - self.target;
        let yaw = Rotation3::from_axis_angle(&Unit::new_normalize(self.up), -horizontal);
        let offset = yaw * offset;

        let right = offset.cross(&self.up);
        let offset = match Unit::try_new(right, f32::EPSILON) {
            Some(axis) => {
                let pitched = Rotation3::from_axis_angle(&axis, vertical) * offset;
                // Stop short of the poles so the up vector stays valid
                if pitched.normalize().dot(&self.up.normalize()).abs() < 0.99 {
                    pitched
                } else {
                    offset
                }
            }
            None => offset,
        };
        self.position = self.target + offset;
    }

    /// Slide camera and target in the view plane
    pub fn pan(&mut self, dx: f32, dy: f32) {
        let distance = (self.position - self.target).norm();
        let forward = (self.target - self.position).normalize();
        let Some(right) = forward.cross(&self.up).try_normalize(f32::EPSILON) else {
            return;
        };
        let up = right.cross(&forward);
        let shift = (right * -dx + up * dy) * distance;
        self.position += shift;
        self.target += shift;
    }

    /// Remember the current view for [`Camera::reset`]
    pub fn set_home(&mut self) {
        let mut home = self.clone();
        home.home = None;
        self.home = Some(Box::new(home));
    }

    /// Return to the remembered view
    pub fn reset(&mut self) {
        if let Some(home) = self.home.take() {
            let aspect_ratio = self.aspect_ratio;
            *self = (*home).clone();
            self.aspect_ratio = aspect_ratio;
            self.home = Some(home);
        }
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(
            Point3::new(0.0, 0.0, 5.0),
            Point3::new(0.0, 0.0, 0.0),
            Vector3::new(0.0, 1.0, 0.0),
            std::f32::consts::FRAC_PI_4,
            16.0 / 9.0,
            0.1,
            100.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn atlas_camera() -> Camera {
        Camera::framing(Point3::origin(), Point3::new(13200.0, 8000.0, 11400.0), 1.5)
    }

    #[test]
    fn test_framing_targets_box_center() {
        let camera = atlas_camera();
        assert_relative_eq!(camera.target, Point3::new(6600.0, 4000.0, 5700.0), epsilon = 1e-3);
        assert!(camera.near > 0.0 && camera.near < camera.far);
        // Anterior (-x) and superior (-y) of the target
        assert!(camera.position.x < camera.target.x);
        assert!(camera.position.y < camera.target.y);
    }

    #[test]
    fn test_framed_box_projects_inside_clip_volume() {
        let camera = atlas_camera();
        let vp = camera.view_projection();
        for corner in [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(13200.0, 8000.0, 11400.0),
            Point3::new(13200.0, 0.0, 0.0),
            Point3::new(0.0, 8000.0, 11400.0),
        ] {
            let clip = vp * corner.to_homogeneous();
            let ndc = clip.xyz() / clip.w;
            assert!(ndc.x.abs() <= 1.0 && ndc.y.abs() <= 1.0, "{:?}", ndc);
            assert!(ndc.z >= 0.0 && ndc.z <= 1.0, "{:?}", ndc);
        }
    }

    #[test]
    fn test_zoom_divides_field_of_view() {
        let mut camera = atlas_camera();
        let fov = camera.fov;
        camera.zoom(1.2);
        assert_relative_eq!(camera.fov, fov / 1.2, epsilon = 1e-6);
        camera.zoom(0.0);
        assert_relative_eq!(camera.fov, fov / 1.2, epsilon = 1e-6);
    }

    #[test]
    fn test_orbit_keeps_distance() {
        let mut camera = atlas_camera();
        let before = (camera.position - camera.target).norm();
        camera.orbit(0.4, 0.2);
        let after = (camera.position - camera.target).norm();
        assert_relative_eq!(before, after, epsilon = before * 1e-4);
    }

    #[test]
    fn test_reset_restores_home() {
        let mut camera = atlas_camera();
        camera.set_home();
        let home_position = camera.position;
        camera.orbit(1.0, 0.3);
        camera.pan(0.1, 0.1);
        camera.zoom(2.0);
        camera.reset();
        assert_relative_eq!(camera.position, home_position, epsilon = 1e-3);
    }
}
