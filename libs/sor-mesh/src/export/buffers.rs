//! GPU buffer export.
//!
//! The renderer binds positions and normals as vertex attributes and draws
//! `indices` as a triangle list. Per-vertex normals upload as-is; per-face
//! normals need each triangle to own its three corners, so flat meshes are
//! expanded before upload.

use crate::mesh::{flatten_f32, Mesh, Normals};

/// Mesh buffers suitable for GPU rendering.
///
/// # Examples
/// ```
/// use sor_mesh::export::MeshBuffers;
/// use sor_mesh::ops::revolve::{build_surface_of_revolution, RevolutionParams};
/// use sor_mesh::profile::{Profile, ProfilePoint};
///
/// let profile = Profile::new(vec![ProfilePoint::new(1.0, 0.0), ProfilePoint::new(1.0, 1.0)]);
/// let out = build_surface_of_revolution(&profile, &RevolutionParams::new(4, false)).unwrap();
/// let buffers = MeshBuffers::from_mesh(&out.mesh);
///
/// // Flat shading: three corners per triangle
/// assert_eq!(buffers.vertex_count(), 8 * 3);
/// assert_eq!(buffers.triangle_count(), 8);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshBuffers {
    /// Vertex positions as flat array [x, y, z, ...].
    pub positions: Vec<f32>,
    /// Normals as flat array, one per position; empty if the mesh has none.
    pub normals: Vec<f32>,
    /// Triangle indices as flat array [i0, i1, i2, ...].
    pub indices: Vec<u32>,
}

impl MeshBuffers {
    /// Converts a mesh into upload-ready buffers.
    pub fn from_mesh(mesh: &Mesh) -> Self {
        match mesh.normals() {
            Some(Normals::PerFace(face_normals)) => {
                let mut positions = Vec::with_capacity(mesh.triangle_count() * 9);
                let mut normals = Vec::with_capacity(mesh.triangle_count() * 9);

                for (index, normal) in face_normals.iter().enumerate() {
                    for corner in mesh.triangle_corners(index) {
                        positions.extend([corner.x as f32, corner.y as f32, corner.z as f32]);
                        normals.extend([normal.x as f32, normal.y as f32, normal.z as f32]);
                    }
                }

                let indices = (0..(mesh.triangle_count() * 3) as u32).collect();
                Self {
                    positions,
                    normals,
                    indices,
                }
            }
            Some(Normals::PerVertex(vertex_normals)) => Self {
                positions: mesh.vertices_f32(),
                normals: flatten_f32(vertex_normals),
                indices: mesh.indices_u32(),
            },
            None => Self {
                positions: mesh.vertices_f32(),
                normals: Vec::new(),
                indices: mesh.indices_u32(),
            },
        }
    }

    /// Returns the number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Returns the number of triangles.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Returns true if 16-bit indices are enough to address every vertex.
    pub fn fits_u16_indices(&self) -> bool {
        self.vertex_count() <= usize::from(u16::MAX) + 1
    }
}

/// Positions plus a line list, for wireframe drawing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WireframeBuffers {
    /// Vertex positions as flat array [x, y, z, ...].
    pub positions: Vec<f32>,
    /// Line indices as flat array [a, b, a, b, ...], each edge once.
    pub lines: Vec<u32>,
}

impl WireframeBuffers {
    /// Collects the unique edges of a mesh.
    pub fn from_mesh(mesh: &Mesh) -> Self {
        Self {
            positions: mesh.vertices_f32(),
            lines: mesh.wireframe_edges(),
        }
    }

    /// Returns the number of line segments.
    pub fn line_count(&self) -> usize {
        self.lines.len() / 2
    }
}
