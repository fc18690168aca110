//! Core traits for stereoatlas

use crate::{mesh::*, point::*};

/// Trait for drawable/renderable objects
pub trait Drawable {
    /// Get the bounding box of the object
    fn bounding_box(&self) -> (Point3f, Point3f);

    /// Get the center point of the object
    fn center(&self) -> Point3f {
        let (min, max) = self.bounding_box();
        Point3f::new(
            (min.x + max.x) / 2.0,
            (min.y + max.y) / 2.0,
            (min.z + max.z) / 2.0,
        )
    }
}

impl Drawable for TriangleMesh {
    fn bounding_box(&self) -> (Point3f, Point3f) {
        if self.vertices.is_empty() {
            return (Point3f::origin(), Point3f::origin());
        }

        let mut min = self.vertices[0];
        let mut max = self.vertices[0];

        for vertex in &self.vertices {
            min.x = min.x.min(vertex.x);
            min.y = min.y.min(vertex.y);
            min.z = min.z.min(vertex.z);

            max.x = max.x.max(vertex.x);
            max.y = max.y.max(vertex.y);
            max.z = max.z.max(vertex.z);
        }

        (min, max)
    }
}

/// Merge two bounding boxes
pub fn union_bounds(a: (Point3f, Point3f), b: (Point3f, Point3f)) -> (Point3f, Point3f) {
    (
        Point3f::new(a.0.x.min(b.0.x), a.0.y.min(b.0.y), a.0.z.min(b.0.z)),
        Point3f::new(a.1.x.max(b.1.x), a.1.y.max(b.1.y), a.1.z.max(b.1.z)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mesh_bounds_and_center() {
        let mesh = TriangleMesh::cylinder(
            Point3f::new(0.0, 0.0, 0.0),
            Point3f::new(100.0, 0.0, 0.0),
            5.0,
            16,
        );
        let (min, max) = mesh.bounding_box();
        assert!((min.x - 0.0).abs() < 1e-4 && (max.x - 100.0).abs() < 1e-4);
        assert!((min.y + 5.0).abs() < 1e-3 && (max.y - 5.0).abs() < 1e-3);
        let c = mesh.center();
        assert!((c.x - 50.0).abs() < 1e-3);
    }

    #[test]
    fn test_union_bounds() {
        let a = (Point3f::new(0.0, 0.0, 0.0), Point3f::new(1.0, 1.0, 1.0));
        let b = (Point3f::new(-1.0, 0.5, 0.0), Point3f::new(0.5, 2.0, 3.0));
        let (min, max) = union_bounds(a, b);
        assert_eq!(min, Point3f::new(-1.0, 0.0, 0.0));
        assert_eq!(max, Point3f::new(1.0, 2.0, 3.0));
    }
}
