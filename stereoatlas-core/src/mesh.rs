//! Mesh data structures and functionality

use crate::point::*;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;
use std::fmt;
use std::str::FromStr;

/// Number of radial segments used for marker cylinders
pub const DEFAULT_CYLINDER_RESOLUTION: usize = 24;

/// A triangle mesh with vertices and faces
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TriangleMesh {
    pub vertices: Vec<Point3f>,
    pub faces: Vec<[usize; 3]>,
    pub normals: Option<Vec<Vector3f>>,
}

/// Which copy of a bilateral region to keep
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Hemisphere {
    #[default]
    Both,
    Left,
    Right,
}

impl FromStr for Hemisphere {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "both" | "none" | "" => Ok(Hemisphere::Both),
            "left" => Ok(Hemisphere::Left),
            "right" => Ok(Hemisphere::Right),
            other => Err(crate::Error::InvalidData(format!("Unknown hemisphere: {}", other))),
        }
    }
}

impl fmt::Display for Hemisphere {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Hemisphere::Both => "both",
            Hemisphere::Left => "left",
            Hemisphere::Right => "right",
        };
        f.write_str(s)
    }
}

impl TriangleMesh {
    /// Create a new empty mesh
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mesh from vertices and faces
    pub fn from_vertices_and_faces(vertices: Vec<Point3f>, faces: Vec<[usize; 3]>) -> Self {
        Self {
            vertices,
            faces,
            normals: None,
        }
    }

    /// Closed cylinder between two points, with flat caps.
    ///
    /// Returns an empty mesh when the endpoints coincide.
    pub fn cylinder(start: Point3f, end: Point3f, radius: f32, resolution: usize) -> Self {
        let axis = end - start;
        let length = axis.norm();
        if length <= f32::EPSILON || resolution < 3 {
            return Self::new();
        }
        let dir = axis / length;

        // Any vector not parallel to the axis gives a stable orthonormal frame
        let helper = if dir.x.abs() < 0.9 {
            Vector3f::x()
        } else {
            Vector3f::y()
        };
        let u = dir.cross(&helper).normalize();
        let v = dir.cross(&u);

        let mut mesh = Self::new();
        let mut normals = Vec::with_capacity(resolution * 4 + 2);

        // Side rings carry radial normals
        for i in 0..resolution {
            let theta = TAU * i as f32 / resolution as f32;
            let radial = u * theta.cos() + v * theta.sin();
            mesh.add_vertex(start + radial * radius);
            mesh.add_vertex(end + radial * radius);
            normals.push(radial);
            normals.push(radial);
        }
        for i in 0..resolution {
            let j = (i + 1) % resolution;
            let (a0, a1) = (2 * i, 2 * i + 1);
            let (b0, b1) = (2 * j, 2 * j + 1);
            mesh.add_face([a0, b0, b1]);
            mesh.add_face([a0, b1, a1]);
        }

        // Caps get their own vertices so shading stays flat
        let start_center = mesh.add_vertex(start);
        normals.push(-dir);
        let end_center = mesh.add_vertex(end);
        normals.push(dir);
        let cap_base = mesh.vertices.len();
        for i in 0..resolution {
            let theta = TAU * i as f32 / resolution as f32;
            let radial = u * theta.cos() + v * theta.sin();
            mesh.add_vertex(start + radial * radius);
            normals.push(-dir);
            mesh.add_vertex(end + radial * radius);
            normals.push(dir);
        }
        for i in 0..resolution {
            let j = (i + 1) % resolution;
            let (s_i, e_i) = (cap_base + 2 * i, cap_base + 2 * i + 1);
            let (s_j, e_j) = (cap_base + 2 * j, cap_base + 2 * j + 1);
            mesh.add_face([start_center, s_j, s_i]);
            mesh.add_face([end_center, e_i, e_j]);
        }

        mesh.normals = Some(normals);
        mesh
    }

    /// Get the number of vertices
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of faces
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Check if the mesh is empty
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() || self.faces.is_empty()
    }

    /// Add a vertex to the mesh
    pub fn add_vertex(&mut self, vertex: Point3f) -> usize {
        let index = self.vertices.len();
        self.vertices.push(vertex);
        index
    }

    /// Add a face to the mesh
    pub fn add_face(&mut self, face: [usize; 3]) {
        self.faces.push(face);
    }

    /// Calculate face normals
    pub fn calculate_face_normals(&self) -> Vec<Vector3f> {
        self.faces
            .iter()
            .map(|face| {
                let v0 = self.vertices[face[0]];
                let v1 = self.vertices[face[1]];
                let v2 = self.vertices[face[2]];

                let edge1 = v1 - v0;
                let edge2 = v2 - v0;

                edge1.cross(&edge2).try_normalize(f32::EPSILON).unwrap_or_else(Vector3f::zeros)
            })
            .collect()
    }

    /// Area-weighted vertex normals
    pub fn calculate_vertex_normals(&self) -> Vec<Vector3f> {
        let mut normals = vec![Vector3f::zeros(); self.vertices.len()];
        for face in &self.faces {
            let v0 = self.vertices[face[0]];
            let v1 = self.vertices[face[1]];
            let v2 = self.vertices[face[2]];
            // Unnormalised cross product weights by area
            let n = (v1 - v0).cross(&(v2 - v0));
            for &i in face {
                normals[i] += n;
            }
        }
        normals
            .into_iter()
            .map(|n| n.try_normalize(f32::EPSILON).unwrap_or_else(Vector3f::z))
            .collect()
    }

    /// Fill in vertex normals if the mesh has none
    pub fn ensure_normals(&mut self) {
        let valid = self
            .normals
            .as_ref()
            .is_some_and(|n| n.len() == self.vertices.len());
        if !valid {
            self.normals = Some(self.calculate_vertex_normals());
        }
    }

    /// Set vertex normals
    pub fn set_normals(&mut self, normals: Vec<Vector3f>) {
        if normals.len() == self.vertices.len() {
            self.normals = Some(normals);
        }
    }

    /// Keep the faces belonging to one hemisphere.
    ///
    /// `midline` is the left-right (z) position splitting the hemispheres. A
    /// face is kept when its centroid is on the requested side; `Right` takes
    /// centroids at or beyond the midline. Unreferenced vertices are dropped.
    pub fn clip_hemisphere(&self, hemisphere: Hemisphere, midline: f32) -> Self {
        if hemisphere == Hemisphere::Both {
            return self.clone();
        }

        let keep_face = |face: &[usize; 3]| {
            let z = (self.vertices[face[0]].z + self.vertices[face[1]].z + self.vertices[face[2]].z) / 3.0;
            match hemisphere {
                Hemisphere::Right => z >= midline,
                Hemisphere::Left => z < midline,
                Hemisphere::Both => true,
            }
        };

        let mut remap = vec![usize::MAX; self.vertices.len()];
        let mut clipped = Self::new();
        let mut normals = self.normals.as_ref().map(|_| Vec::new());

        for face in self.faces.iter().filter(|f| keep_face(f)) {
            let mut new_face = [0usize; 3];
            for (k, &old) in face.iter().enumerate() {
                if remap[old] == usize::MAX {
                    remap[old] = clipped.add_vertex(self.vertices[old]);
                    if let (Some(out), Some(src)) = (normals.as_mut(), self.normals.as_ref()) {
                        out.push(src[old]);
                    }
                }
                new_face[k] = remap[old];
            }
            clipped.add_face(new_face);
        }

        clipped.normals = normals;
        clipped
    }

    /// Append another mesh, offsetting its face indices
    pub fn append(&mut self, other: &TriangleMesh) {
        let offset = self.vertices.len();
        let merge_normals = self.normals.is_some() && other.normals.is_some();
        self.vertices.extend_from_slice(&other.vertices);
        self.faces
            .extend(other.faces.iter().map(|f| [f[0] + offset, f[1] + offset, f[2] + offset]));
        if merge_normals {
            if let (Some(dst), Some(src)) = (self.normals.as_mut(), other.normals.as_ref()) {
                dst.extend_from_slice(src);
            }
        } else {
            self.normals = None;
        }
    }

    /// Clear the mesh
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.faces.clear();
        self.normals = None;
    }
}
