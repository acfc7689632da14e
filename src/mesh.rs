//! Minimal triangle-mesh loader.
//!
//! Reads the vertex/face subset of the Wavefront OBJ text format:
//!
//! ```text
//! # comment
//! v 0.0 1.0 0.0
//! v 1.0 0.0 0.0
//! v 0.0 0.0 1.0
//! f 1 2 3
//! ```
//!
//! Face indices are 1-based. `i/j/k` face tokens keep only the vertex index,
//! polygons with more than three vertices are split into a triangle fan, and
//! every other record type is ignored.

use std::path::Path;

use glam::DVec3;

use crate::material::MaterialId;
use crate::triangle::Triangle;

/// Errors raised while loading a mesh.
#[derive(Debug, thiserror::Error)]
pub enum MeshError {
    /// The file could not be read.
    #[error("failed to read mesh file: {0}")]
    Io(#[from] std::io::Error),

    /// A vertex coordinate or face index is not a number.
    #[error("line {line}: invalid {what} '{token}'")]
    Parse {
        /// 1-based line number.
        line: usize,
        /// What was being parsed.
        what: &'static str,
        /// Offending token.
        token: String,
    },

    /// A vertex record does not have three coordinates.
    #[error("line {line}: vertex needs 3 coordinates, found {found}")]
    VertexArity {
        /// 1-based line number.
        line: usize,
        /// Number of coordinates present.
        found: usize,
    },

    /// A face record has fewer than three vertices.
    #[error("line {line}: face needs at least 3 vertices, found {found}")]
    FaceArity {
        /// 1-based line number.
        line: usize,
        /// Number of vertices present.
        found: usize,
    },

    /// A face refers to a vertex that does not exist.
    #[error("line {line}: vertex index {index} out of range 1..={count}")]
    IndexOutOfRange {
        /// 1-based line number.
        line: usize,
        /// Index as written in the file.
        index: usize,
        /// Number of vertices read so far.
        count: usize,
    },
}

/// Indexed triangle mesh.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    /// Vertex positions.
    pub vertices: Vec<DVec3>,
    /// Faces as 0-based indices into `vertices`.
    pub faces: Vec<[usize; 3]>,
}

impl Mesh {
    /// Load and parse a mesh file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Mesh, MeshError> {
        let content = std::fs::read_to_string(path)?;
        Mesh::parse(&content)
    }

    /// Parse mesh text.
    ///
    /// Faces may only refer to vertices defined on earlier lines.
    pub fn parse(content: &str) -> Result<Mesh, MeshError> {
        let mut mesh = Mesh::default();

        for (idx, raw) in content.lines().enumerate() {
            let line = idx + 1;
            let mut tokens = raw.split_whitespace();

            match tokens.next() {
                Some("v") => {
                    let coords = tokens
                        .map(|tok| parse_token::<f64>(tok, line, "coordinate"))
                        .collect::<Result<Vec<_>, _>>()?;
                    if coords.len() < 3 {
                        return Err(MeshError::VertexArity {
                            line,
                            found: coords.len(),
                        });
                    }
                    // an optional 4th (w) component is ignored
                    mesh.vertices.push(DVec3::new(coords[0], coords[1], coords[2]));
                }
                Some("f") => {
                    let count = mesh.vertices.len();
                    let indices = tokens
                        .map(|tok| {
                            let vertex = tok.split('/').next().unwrap_or(tok);
                            let index = parse_token::<usize>(vertex, line, "face index")?;
                            if index == 0 || index > count {
                                return Err(MeshError::IndexOutOfRange { line, index, count });
                            }
                            Ok(index - 1)
                        })
                        .collect::<Result<Vec<_>, _>>()?;
                    if indices.len() < 3 {
                        return Err(MeshError::FaceArity {
                            line,
                            found: indices.len(),
                        });
                    }
                    for pair in indices[1..].windows(2) {
                        mesh.faces.push([indices[0], pair[0], pair[1]]);
                    }
                }
                _ => {}
            }
        }

        Ok(mesh)
    }

    /// World-space triangles `scale * v + offset`, all using `material`.
    ///
    /// Faces referring to vertices the mesh does not have are skipped.
    pub fn triangles(&self, scale: f64, offset: DVec3, material: MaterialId) -> impl Iterator<Item = Triangle> + '_ {
        self.faces.iter().filter_map(move |&[a, b, c]| {
            let place = |i: usize| self.vertices.get(i).map(|&v| scale * v + offset);
            Some(Triangle::new(place(a)?, place(b)?, place(c)?, material))
        })
    }
}

fn parse_token<T: std::str::FromStr>(token: &str, line: usize, what: &'static str) -> Result<T, MeshError> {
    token.parse().map_err(|_| MeshError::Parse {
        line,
        what,
        token: token.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUAD: &str = "\
# unit square
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0

vn 0 0 1
f 1 2 3
f 1/1/1 3/3/1 4/4/1
";

    #[test]
    fn parses_vertices_and_faces() {
        let mesh = Mesh::parse(QUAD).unwrap();
        assert_eq!(mesh.vertices.len(), 4);
        assert_eq!(mesh.vertices[2], DVec3::new(1.0, 1.0, 0.0));
        assert_eq!(mesh.faces, vec![[0, 1, 2], [0, 2, 3]]);
    }

    #[test]
    fn polygon_is_fan_triangulated() {
        let mesh = Mesh::parse("v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n").unwrap();
        assert_eq!(mesh.faces, vec![[0, 1, 2], [0, 2, 3]]);
    }

    #[test]
    fn index_out_of_range_is_reported() {
        let err = Mesh::parse("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 4\n").unwrap_err();
        assert!(matches!(err, MeshError::IndexOutOfRange { line: 4, index: 4, count: 3 }));

        let err = Mesh::parse("v 0 0 0\nf 0 1 1\n").unwrap_err();
        assert!(matches!(err, MeshError::IndexOutOfRange { index: 0, .. }));
    }

    #[test]
    fn malformed_records_are_reported() {
        let err = Mesh::parse("v 0 zero 0\n").unwrap_err();
        assert!(matches!(err, MeshError::Parse { line: 1, what: "coordinate", .. }));

        let err = Mesh::parse("v 0 0\n").unwrap_err();
        assert!(matches!(err, MeshError::VertexArity { line: 1, found: 2 }));

        let err = Mesh::parse("v 0 0 0\nv 1 0 0\nf 1 2\n").unwrap_err();
        assert!(matches!(err, MeshError::FaceArity { line: 3, found: 2 }));
    }

    #[test]
    fn triangles_are_transformed() {
        let mesh = Mesh::parse(QUAD).unwrap();
        let tris: Vec<Triangle> = mesh.triangles(4.0, DVec3::new(40.0, 21.0, 70.0), MaterialId(5)).collect();
        assert_eq!(tris.len(), 2);
        assert_eq!(tris[0].vertices[1], DVec3::new(44.0, 21.0, 70.0));
        assert_eq!(tris[1].vertices[2], DVec3::new(40.0, 25.0, 70.0));
        assert!(tris.iter().all(|t| t.material == MaterialId(5)));
        assert!(tris[0].normal.abs_diff_eq(DVec3::Z, 1e-12));
    }

    #[test]
    fn hand_built_face_with_missing_vertex_is_skipped() {
        let mesh = Mesh {
            vertices: vec![DVec3::ZERO, DVec3::X, DVec3::Y],
            faces: vec![[0, 1, 2], [0, 1, 9]],
        };
        let tris: Vec<Triangle> = mesh.triangles(1.0, DVec3::ZERO, MaterialId(0)).collect();
        assert_eq!(tris.len(), 1);
        assert_eq!(tris[0].vertices, [DVec3::ZERO, DVec3::X, DVec3::Y]);
    }

    #[test]
    fn load_reads_file_and_reports_missing() {
        let path = std::env::temp_dir().join("phongtrace_mesh_test.obj");
        std::fs::write(&path, QUAD).unwrap();
        let mesh = Mesh::load(&path).unwrap();
        assert_eq!(mesh.faces.len(), 2);
        let _ = std::fs::remove_file(&path);

        let err = Mesh::load("/nonexistent/mesh.obj").unwrap_err();
        assert!(matches!(err, MeshError::Io(_)));
    }
}
