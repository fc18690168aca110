//! Scene actors

use stereoatlas_core::{AtlasCoord, Color, Drawable, Point3f, TriangleMesh, DEFAULT_CYLINDER_RESOLUTION};

/// What an actor represents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActorKind {
    Region,
    Cylinder,
    Axis,
    Mesh,
}

/// A coloured mesh placed in atlas space
#[derive(Debug, Clone)]
pub struct Actor {
    pub name: String,
    pub kind: ActorKind,
    pub mesh: TriangleMesh,
    pub color: Color,
    pub alpha: f32,
}

impl Actor {
    pub fn new(name: impl Into<String>, kind: ActorKind, mesh: TriangleMesh, color: Color, alpha: f32) -> Self {
        Self {
            name: name.into(),
            kind,
            mesh,
            color,
            alpha: alpha.clamp(0.0, 1.0),
        }
    }

    pub fn is_translucent(&self) -> bool {
        self.alpha < stereoatlas_gpu::mesh::OPAQUE_ALPHA
    }
}

impl Drawable for Actor {
    fn bounding_box(&self) -> (Point3f, Point3f) {
        self.mesh.bounding_box()
    }
}

/// Marker radius in microns when none is given
pub const DEFAULT_MARKER_RADIUS: f32 = 350.0;

/// A thick line between two atlas points
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentMarker {
    pub start: AtlasCoord,
    pub end: AtlasCoord,
    pub color: Color,
    pub radius: f32,
    pub alpha: f32,
}

impl SegmentMarker {
    pub fn new(start: AtlasCoord, end: AtlasCoord, color: Color, radius: f32) -> Self {
        Self {
            start,
            end,
            color,
            radius,
            alpha: 1.0,
        }
    }

    /// Powder-blue marker of the default radius
    pub fn between(start: AtlasCoord, end: AtlasCoord) -> Self {
        let color = Color::from_name("powderblue").unwrap_or(Color::BLUE);
        Self::new(start, end, color, DEFAULT_MARKER_RADIUS)
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn to_actor(&self) -> Actor {
        make_segment_actor(self.start, self.end, self.color, self.radius, self.alpha)
    }
}

/// Cylinder actor running from `start` to `end`
pub fn make_segment_actor(start: AtlasCoord, end: AtlasCoord, color: Color, radius: f32, alpha: f32) -> Actor {
    let mesh = TriangleMesh::cylinder(
        start.to_point3f(),
        end.to_point3f(),
        radius,
        DEFAULT_CYLINDER_RESOLUTION,
    );
    Actor::new("Cylinder", ActorKind::Cylinder, mesh, color, alpha)
}
