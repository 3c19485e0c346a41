//! # Mesh Data Structure
//!
//! Core mesh representation: vertices, triangles and per-face or per-vertex
//! normals.

use config::constants::is_unit_length;
use glam::{DMat4, DVec3};
use std::collections::BTreeSet;

/// Normals attached to a mesh.
///
/// Flat shading stores one normal per triangle, smooth shading one per
/// vertex. A zero vector marks a degenerate face (or a vertex with no usable
/// adjacent face) and contributes no lighting.
#[derive(Debug, Clone, PartialEq)]
pub enum Normals {
    /// One normal per triangle, in triangle order.
    PerFace(Vec<DVec3>),
    /// One normal per vertex, in vertex order.
    PerVertex(Vec<DVec3>),
}

impl Normals {
    /// Returns the normal vectors regardless of mode.
    pub fn vectors(&self) -> &[DVec3] {
        match self {
            Normals::PerFace(v) | Normals::PerVertex(v) => v,
        }
    }

    fn vectors_mut(&mut self) -> &mut Vec<DVec3> {
        match self {
            Normals::PerFace(v) | Normals::PerVertex(v) => v,
        }
    }

    /// Returns true for per-face normals.
    pub fn is_per_face(&self) -> bool {
        matches!(self, Normals::PerFace(_))
    }
}

/// A triangle mesh with vertices, indices and optional normals.
///
/// Vertex order is significant: a vertex's index is its position in the
/// list. All geometry uses f64; conversion to f32 only happens in the
/// buffer exports.
///
/// # Example
///
/// ```rust
/// use sor_mesh::Mesh;
/// use glam::DVec3;
///
/// let mut mesh = Mesh::new();
/// mesh.add_vertex(DVec3::new(0.0, 0.0, 0.0));
/// mesh.add_vertex(DVec3::new(1.0, 0.0, 0.0));
/// mesh.add_vertex(DVec3::new(0.0, 1.0, 0.0));
/// mesh.add_triangle(0, 1, 2);
/// assert!(mesh.validate());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    vertices: Vec<DVec3>,
    triangles: Vec<[u32; 3]>,
    normals: Option<Normals>,
}

impl Mesh {
    /// Creates an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mesh with pre-allocated capacity.
    pub fn with_capacity(vertex_count: usize, triangle_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            triangles: Vec::with_capacity(triangle_count),
            normals: None,
        }
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of triangles.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Returns true if the mesh is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Adds a vertex and returns its index.
    pub fn add_vertex(&mut self, position: DVec3) -> u32 {
        let index = self.vertices.len() as u32;
        self.vertices.push(position);
        index
    }

    /// Adds a triangle by vertex indices.
    pub fn add_triangle(&mut self, v0: u32, v1: u32, v2: u32) {
        self.triangles.push([v0, v1, v2]);
    }

    /// Returns a reference to the vertices.
    #[inline]
    pub fn vertices(&self) -> &[DVec3] {
        &self.vertices
    }

    /// Returns a reference to the triangles.
    #[inline]
    pub fn triangles(&self) -> &[[u32; 3]] {
        &self.triangles
    }

    /// Returns the vertex at the given index.
    #[inline]
    pub fn vertex(&self, index: u32) -> DVec3 {
        self.vertices[index as usize]
    }

    /// Returns the triangle at the given index.
    #[inline]
    pub fn triangle(&self, index: usize) -> [u32; 3] {
        self.triangles[index]
    }

    /// Returns the three corner positions of a triangle.
    pub fn triangle_corners(&self, index: usize) -> [DVec3; 3] {
        let [a, b, c] = self.triangles[index];
        [self.vertex(a), self.vertex(b), self.vertex(c)]
    }

    /// Sets the normals.
    pub fn set_normals(&mut self, normals: Normals) {
        self.normals = Some(normals);
    }

    /// Returns the normals, if computed.
    pub fn normals(&self) -> Option<&Normals> {
        self.normals.as_ref()
    }

    /// Computes the axis-aligned bounding box.
    ///
    /// Returns (min, max) corners of the bounding box.
    pub fn bounding_box(&self) -> (DVec3, DVec3) {
        let Some((first, rest)) = self.vertices.split_first() else {
            return (DVec3::ZERO, DVec3::ZERO);
        };

        rest.iter()
            .fold((*first, *first), |(min, max), v| (min.min(*v), max.max(*v)))
    }

    /// Transforms all vertices by a 4x4 matrix.
    ///
    /// Normals are carried through the inverse transpose and renormalized;
    /// zero normals stay zero.
    pub fn transform(&mut self, matrix: &DMat4) {
        for v in &mut self.vertices {
            *v = matrix.transform_point3(*v);
        }

        if let Some(normals) = &mut self.normals {
            let normal_matrix = matrix.inverse().transpose();
            for n in normals.vectors_mut() {
                *n = normal_matrix.transform_vector3(*n).normalize_or_zero();
            }
        }
    }

    /// Returns the unique undirected edges as a flat line list
    /// `[a, b, a, b, ...]`, sorted by `(min, max)` index.
    ///
    /// Used to draw the mesh as a wireframe.
    pub fn wireframe_edges(&self) -> Vec<u32> {
        let mut edges = BTreeSet::new();
        for tri in &self.triangles {
            for (a, b) in [(tri[0], tri[1]), (tri[1], tri[2]), (tri[2], tri[0])] {
                if a != b {
                    edges.insert((a.min(b), a.max(b)));
                }
            }
        }
        edges.into_iter().flat_map(|(a, b)| [a, b]).collect()
    }

    /// Validates the mesh for correctness.
    ///
    /// Checks:
    /// - All triangle indices are valid
    /// - The normal count matches the normal mode
    /// - Every normal is unit length or exactly zero
    ///
    /// Zero-area triangles are allowed; they are reported as diagnostics by
    /// the builder instead.
    pub fn validate(&self) -> bool {
        let vertex_count = self.vertices.len() as u32;

        if self
            .triangles
            .iter()
            .flatten()
            .any(|&index| index >= vertex_count)
        {
            return false;
        }

        match &self.normals {
            None => true,
            Some(normals) => {
                let expected = match normals {
                    Normals::PerFace(_) => self.triangles.len(),
                    Normals::PerVertex(_) => self.vertices.len(),
                };
                normals.vectors().len() == expected
                    && normals
                        .vectors()
                        .iter()
                        .all(|n| *n == DVec3::ZERO || is_unit_length(n.length()))
            }
        }
    }

    /// Exports vertices as f32 array for GPU.
    ///
    /// Returns flattened [x, y, z, x, y, z, ...] array.
    pub fn vertices_f32(&self) -> Vec<f32> {
        flatten_f32(&self.vertices)
    }

    /// Exports triangle indices as u32 array for GPU.
    ///
    /// Returns flattened [i0, i1, i2, i0, i1, i2, ...] array.
    pub fn indices_u32(&self) -> Vec<u32> {
        self.triangles.iter().flatten().copied().collect()
    }

    /// Exports normals as f32 array for GPU.
    pub fn normals_f32(&self) -> Option<Vec<f32>> {
        self.normals.as_ref().map(|n| flatten_f32(n.vectors()))
    }
}

pub(crate) fn flatten_f32(vectors: &[DVec3]) -> Vec<f32> {
    let mut result = Vec::with_capacity(vectors.len() * 3);
    for v in vectors {
        result.push(v.x as f32);
        result.push(v.y as f32);
        result.push(v.z as f32);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_triangle() -> Mesh {
        let mut mesh = Mesh::new();
        mesh.add_vertex(DVec3::ZERO);
        mesh.add_vertex(DVec3::X);
        mesh.add_vertex(DVec3::Y);
        mesh.add_triangle(0, 1, 2);
        mesh
    }

    #[test]
    fn test_mesh_new() {
        let mesh = Mesh::new();
        assert!(mesh.is_empty());
        assert_eq!(mesh.vertex_count(), 0);
        assert_eq!(mesh.triangle_count(), 0);
    }

    #[test]
    fn test_mesh_add_vertex() {
        let mut mesh = Mesh::new();
        let idx = mesh.add_vertex(DVec3::new(1.0, 2.0, 3.0));
        assert_eq!(idx, 0);
        assert_eq!(mesh.vertex_count(), 1);
        assert_eq!(mesh.vertex(0), DVec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_mesh_add_triangle() {
        let mesh = unit_triangle();
        assert_eq!(mesh.triangle_count(), 1);
        assert_eq!(mesh.triangle(0), [0, 1, 2]);
        assert_eq!(mesh.triangle_corners(0), [DVec3::ZERO, DVec3::X, DVec3::Y]);
    }

    #[test]
    fn test_mesh_bounding_box() {
        let mut mesh = Mesh::new();
        mesh.add_vertex(DVec3::new(-1.0, -2.0, -3.0));
        mesh.add_vertex(DVec3::new(4.0, 5.0, 6.0));
        let (min, max) = mesh.bounding_box();
        assert_eq!(min, DVec3::new(-1.0, -2.0, -3.0));
        assert_eq!(max, DVec3::new(4.0, 5.0, 6.0));
    }

    #[test]
    fn test_mesh_validate_invalid_index() {
        let mut mesh = Mesh::new();
        mesh.add_vertex(DVec3::ZERO);
        mesh.add_triangle(0, 1, 2);
        assert!(!mesh.validate());
    }

    #[test]
    fn test_mesh_validate_normal_count() {
        let mut mesh = unit_triangle();
        mesh.set_normals(Normals::PerFace(vec![DVec3::Z]));
        assert!(mesh.validate());

        mesh.set_normals(Normals::PerVertex(vec![DVec3::Z]));
        assert!(!mesh.validate());
    }

    #[test]
    fn test_mesh_validate_normal_length() {
        let mut mesh = unit_triangle();
        mesh.set_normals(Normals::PerFace(vec![DVec3::ZERO]));
        assert!(mesh.validate());

        mesh.set_normals(Normals::PerFace(vec![DVec3::new(0.0, 0.0, 0.5)]));
        assert!(!mesh.validate());
    }

    #[test]
    fn test_mesh_transform_keeps_zero_normals() {
        let mut mesh = unit_triangle();
        mesh.set_normals(Normals::PerVertex(vec![DVec3::Z, DVec3::ZERO, DVec3::Z]));
        mesh.transform(&DMat4::from_scale(DVec3::new(2.0, 2.0, 4.0)));

        assert_eq!(mesh.vertex(1), DVec3::new(2.0, 0.0, 0.0));
        let normals = mesh.normals().map(Normals::vectors).unwrap_or_default();
        assert_eq!(normals[1], DVec3::ZERO);
        assert!((normals[0] - DVec3::Z).length() < 1e-12);
    }

    #[test]
    fn test_mesh_wireframe_edges_are_unique() {
        let mut mesh = Mesh::new();
        mesh.add_vertex(DVec3::ZERO);
        mesh.add_vertex(DVec3::X);
        mesh.add_vertex(DVec3::Y);
        mesh.add_vertex(DVec3::ONE);
        mesh.add_triangle(0, 1, 2);
        mesh.add_triangle(1, 3, 2);

        // Shared edge 1-2 appears once
        assert_eq!(mesh.wireframe_edges(), vec![0, 1, 0, 2, 1, 2, 1, 3, 2, 3]);
    }

    #[test]
    fn test_mesh_vertices_f32() {
        let mut mesh = Mesh::new();
        mesh.add_vertex(DVec3::new(1.0, 2.0, 3.0));
        assert_eq!(mesh.vertices_f32(), vec![1.0f32, 2.0, 3.0]);
        assert_eq!(mesh.normals_f32(), None);
    }
}
