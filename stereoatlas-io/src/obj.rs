//! OBJ format support

use crate::MeshReader;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use stereoatlas_core::{Error, Point3f, Result, TriangleMesh, Vector3f};
use tracing::debug;

pub struct ObjReader;

impl ObjReader {
    /// Parse OBJ text from any reader. Polygons are fan-triangulated.
    pub fn read_from<R: Read>(input: R) -> Result<TriangleMesh> {
        let data = ::obj::ObjData::load_buf(input)
            .map_err(|e| Error::InvalidData(format!("Failed to parse OBJ: {}", e)))?;

        let vertices: Vec<Point3f> = data
            .position
            .iter()
            .map(|p| Point3f::new(p[0], p[1], p[2]))
            .collect();

        let mut faces = Vec::new();
        // File normals are only usable when they are indexed like the positions
        let mut normals_match = !data.normal.is_empty();

        for object in &data.objects {
            for group in &object.groups {
                for poly in &group.polys {
                    let tuples = &poly.0;
                    if tuples.len() < 3 {
                        continue;
                    }
                    for t in tuples {
                        if t.0 >= vertices.len() {
                            return Err(Error::InvalidData(format!(
                                "OBJ face references vertex {} of {}",
                                t.0 + 1,
                                vertices.len()
                            )));
                        }
                        if t.2 != Some(t.0) {
                            normals_match = false;
                        }
                    }
                    for i in 1..tuples.len() - 1 {
                        faces.push([tuples[0].0, tuples[i].0, tuples[i + 1].0]);
                    }
                }
            }
        }

        let mut mesh = TriangleMesh::from_vertices_and_faces(vertices, faces);
        if normals_match && data.normal.len() == mesh.vertex_count() {
            mesh.set_normals(
                data.normal
                    .iter()
                    .map(|n| Vector3f::new(n[0], n[1], n[2]))
                    .collect(),
            );
        } else {
            mesh.ensure_normals();
        }

        debug!(
            vertices = mesh.vertex_count(),
            faces = mesh.face_count(),
            "parsed OBJ mesh"
        );
        Ok(mesh)
    }
}

impl MeshReader for ObjReader {
    fn read_mesh<P: AsRef<Path>>(path: P) -> Result<TriangleMesh> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            Error::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to open {}: {}", path.display(), e),
            ))
        })?;
        Self::read_from(BufReader::new(file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::io::Write;

    const QUAD: &str = "# unit quad\n\
v 0.0 0.0 0.0\n\
v 1.0 0.0 0.0\n\
v 1.0 1.0 0.0\n\
v 0.0 1.0 0.0\n\
f 1 2 3 4\n";

    #[test]
    fn test_quad_is_fan_triangulated() {
        let mesh = ObjReader::read_from(QUAD.as_bytes()).unwrap();
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.face_count(), 2);
        assert_eq!(mesh.faces[0], [0, 1, 2]);
        assert_eq!(mesh.faces[1], [0, 2, 3]);
        let normals = mesh.normals.as_ref().unwrap();
        assert_eq!(normals.len(), 4);
        assert_relative_eq!(normals[0].z, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_file_normals_used_when_indexed_with_positions() {
        let src = "v 0 0 0\nv 1 0 0\nv 0 1 0\n\
vn 0 0 -1\nvn 0 0 -1\nvn 0 0 -1\n\
f 1//1 2//2 3//3\n";
        let mesh = ObjReader::read_from(src.as_bytes()).unwrap();
        let normals = mesh.normals.unwrap();
        for n in &normals {
            assert_relative_eq!(n.z, -1.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_read_mesh_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("997.obj");
        let mut file = File::create(&path).unwrap();
        file.write_all(QUAD.as_bytes()).unwrap();
        drop(file);

        let mesh = crate::read_mesh(&path).unwrap();
        assert_eq!(mesh.face_count(), 2);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ObjReader::read_mesh(dir.path().join("missing.obj")).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
