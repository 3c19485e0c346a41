//! # Normal Computation
//!
//! Face and vertex normals for shading:
//! - **Flat**: one unit normal per triangle, `normalize(cross(v1 - v0, v2 - v0))`
//! - **Smooth**: one unit normal per vertex, the normalized unweighted sum of
//!   the unit normals of every adjacent triangle
//!
//! A triangle whose corner angle has a sine at or below the tolerance is
//! degenerate and gets the zero vector. Zero face normals add nothing to the
//! vertex sums; a vertex with no usable adjacent face keeps the zero vector.

use crate::mesh::{Mesh, Normals};
use glam::DVec3;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[cfg(test)]
mod tests;

/// How normals are attached to the mesh.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShadingMode {
    /// One normal per triangle (faceted look).
    #[default]
    Flat,
    /// One normal per vertex, averaged from adjacent faces.
    Smooth,
}

impl fmt::Display for ShadingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShadingMode::Flat => f.write_str("flat"),
            ShadingMode::Smooth => f.write_str("smooth"),
        }
    }
}

impl FromStr for ShadingMode {
    type Err = String;

    /// Parses a shading selector. Gouraud and Phong both interpolate vertex
    /// normals, so they select smooth normals.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "flat" => Ok(ShadingMode::Flat),
            "smooth" | "gouraud" | "phong" => Ok(ShadingMode::Smooth),
            other => Err(format!(
                "unknown shading mode '{other}' (expected flat, smooth, gouraud or phong)"
            )),
        }
    }
}

/// Per-triangle normals plus the indices of degenerate triangles.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FaceNormals {
    /// One entry per triangle; zero for degenerate triangles.
    pub normals: Vec<DVec3>,
    /// Triangle indices whose normal is the zero vector.
    pub degenerate: Vec<usize>,
}

/// Unit normal of the triangle `(v0, v1, v2)`, or `None` when the triangle is
/// degenerate.
///
/// The test is scale-free: a triangle is degenerate when
/// `|e1 x e2| <= tolerance * |e1| * |e2|`, i.e. the sine of the angle at `v0`
/// is at most `tolerance`. Both edges are divided by their largest component
/// first, so tiny and huge (but finite) triangles neither underflow nor
/// overflow.
///
/// # Example
///
/// ```rust
/// use sor_mesh::ops::normals::face_normal;
/// use glam::DVec3;
///
/// let n = face_normal(DVec3::ZERO, DVec3::X, DVec3::Y, 1e-12);
/// assert_eq!(n, Some(DVec3::Z));
///
/// // Scale does not matter
/// let n = face_normal(DVec3::ZERO, DVec3::X * 1e-9, DVec3::Y * 1e-9, 1e-12);
/// assert_eq!(n, Some(DVec3::Z));
///
/// // Collinear corners have no normal
/// assert_eq!(face_normal(DVec3::ZERO, DVec3::X, DVec3::X * 2.0, 1e-12), None);
/// ```
pub fn face_normal(v0: DVec3, v1: DVec3, v2: DVec3, tolerance: f64) -> Option<DVec3> {
    let (e1, e2) = (v1 - v0, v2 - v0);
    let scale = e1.abs().max_element().max(e2.abs().max_element());
    if scale == 0.0 || !scale.is_finite() {
        return None;
    }

    let (e1, e2) = (e1 / scale, e2 / scale);
    let cross = e1.cross(e2);
    let length = cross.length();
    if length <= tolerance * e1.length() * e2.length() {
        None
    } else {
        Some(cross / length)
    }
}

/// Computes one normal per triangle.
pub fn face_normals(vertices: &[DVec3], triangles: &[[u32; 3]], tolerance: f64) -> FaceNormals {
    let mut result = FaceNormals {
        normals: Vec::with_capacity(triangles.len()),
        degenerate: Vec::new(),
    };

    for (index, tri) in triangles.iter().enumerate() {
        let [v0, v1, v2] = tri.map(|i| vertices[i as usize]);
        match face_normal(v0, v1, v2, tolerance) {
            Some(normal) => result.normals.push(normal),
            None => {
                result.normals.push(DVec3::ZERO);
                result.degenerate.push(index);
            }
        }
    }

    result
}

/// Computes one normal per vertex from precomputed face normals.
///
/// Face normals are unit length (or zero), so a sum of `k` of them is at most
/// `k` long whatever the size of the geometry. A sum no longer than
/// `tolerance * k` has cancelled out and yields the zero vector.
///
/// `welds` lists vertex pairs that occupy the same position (the seam of a
/// closed revolution); both vertices of a pair receive the combined sum so
/// smooth shading shows no crease along the seam.
pub fn vertex_normals(
    vertex_count: usize,
    triangles: &[[u32; 3]],
    face_normals: &[DVec3],
    welds: &[(u32, u32)],
    tolerance: f64,
) -> Vec<DVec3> {
    let mut sums = vec![(DVec3::ZERO, 0u32); vertex_count];

    for (tri, normal) in triangles.iter().zip(face_normals) {
        if *normal == DVec3::ZERO {
            continue;
        }
        for &index in tri {
            let (sum, count) = &mut sums[index as usize];
            *sum += *normal;
            *count += 1;
        }
    }

    for &(a, b) in welds {
        let (sa, ca) = sums[a as usize];
        let (sb, cb) = sums[b as usize];
        let combined = (sa + sb, ca + cb);
        sums[a as usize] = combined;
        sums[b as usize] = combined;
    }

    sums.into_iter()
        .map(|(sum, count)| {
            let length = sum.length();
            if length <= tolerance * f64::from(count) {
                DVec3::ZERO
            } else {
                sum / length
            }
        })
        .collect()
}

/// Computes normals for `mesh` in the requested mode and stores them on it.
///
/// Returns the indices of degenerate triangles.
pub fn apply_normals(
    mesh: &mut Mesh,
    mode: ShadingMode,
    welds: &[(u32, u32)],
    tolerance: f64,
) -> Vec<usize> {
    let faces = face_normals(mesh.vertices(), mesh.triangles(), tolerance);

    let normals = match mode {
        ShadingMode::Flat => Normals::PerFace(faces.normals),
        ShadingMode::Smooth => Normals::PerVertex(vertex_normals(
            mesh.vertex_count(),
            mesh.triangles(),
            &faces.normals,
            welds,
            tolerance,
        )),
    };
    mesh.set_normals(normals);

    faces.degenerate
}
