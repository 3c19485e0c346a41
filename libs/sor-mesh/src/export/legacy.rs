//! Legacy two-file export.
//!
//! The coordinates file starts with the vertex count, followed by one
//! `index,x,y,z` line per vertex (1-based index, two decimals). The polygons
//! file starts with the triangle count, followed by one `tri<N> a b c` line
//! per triangle (1-based vertex indices). Numbers are rounded the way
//! JavaScript's `toFixed` rounds, so existing consumers see identical text.

use crate::error::MeshResult;
use crate::mesh::Mesh;
use config::constants::{COORDINATE_DECIMALS, LEGACY_COORDINATES_FILE, LEGACY_POLYGONS_FILE};
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

/// The two text artifacts of a legacy export.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LegacyObj {
    /// Vertex listing.
    pub coordinates: String,
    /// Triangle listing.
    pub polygons: String,
}

impl LegacyObj {
    /// Writes both files into `dir` under their default names and returns
    /// the paths written.
    pub fn write_to_dir(&self, dir: &Path) -> MeshResult<(PathBuf, PathBuf)> {
        let coordinates = dir.join(LEGACY_COORDINATES_FILE);
        let polygons = dir.join(LEGACY_POLYGONS_FILE);
        fs::write(&coordinates, &self.coordinates)?;
        fs::write(&polygons, &self.polygons)?;
        Ok((coordinates, polygons))
    }
}

/// Formats the mesh as the legacy coordinates/polygons pair.
///
/// # Example
///
/// ```rust
/// use sor_mesh::export::to_legacy;
/// use sor_mesh::Mesh;
/// use glam::DVec3;
///
/// let mut mesh = Mesh::new();
/// mesh.add_vertex(DVec3::new(1.0, 0.0, 0.5));
/// mesh.add_vertex(DVec3::new(0.0, 1.0, 0.5));
/// mesh.add_vertex(DVec3::new(0.0, 0.0, 0.5));
/// mesh.add_triangle(0, 1, 2);
///
/// let legacy = to_legacy(&mesh);
/// assert_eq!(legacy.coordinates, "3\n1,1.00,0.00,0.50\n2,0.00,1.00,0.50\n3,0.00,0.00,0.50\n");
/// assert_eq!(legacy.polygons, "1\ntri1 1 2 3\n");
/// ```
pub fn to_legacy(mesh: &Mesh) -> LegacyObj {
    let mut coordinates = format!("{}\n", mesh.vertex_count());
    for (i, v) in mesh.vertices().iter().enumerate() {
        // Writing to a String cannot fail
        let _ = writeln!(
            coordinates,
            "{},{},{},{}",
            i + 1,
            to_fixed(v.x, COORDINATE_DECIMALS),
            to_fixed(v.y, COORDINATE_DECIMALS),
            to_fixed(v.z, COORDINATE_DECIMALS)
        );
    }

    let mut polygons = format!("{}\n", mesh.triangle_count());
    for (i, [a, b, c]) in mesh.triangles().iter().enumerate() {
        let _ = writeln!(polygons, "tri{} {} {} {}", i + 1, a + 1, b + 1, c + 1);
    }

    LegacyObj {
        coordinates,
        polygons,
    }
}

/// Formats `value` with `decimals` fraction digits using JavaScript
/// `Number.prototype.toFixed` rounding: exact ties round away from zero and
/// negative zero prints without a sign.
///
/// # Example
///
/// ```rust
/// use sor_mesh::export::to_fixed;
///
/// assert_eq!(to_fixed(0.125, 2), "0.13");
/// assert_eq!(to_fixed(-0.125, 2), "-0.13");
/// assert_eq!(to_fixed(-0.0, 2), "0.00");
/// assert_eq!(to_fixed(-1e-17, 2), "-0.00");
/// ```
pub fn to_fixed(value: f64, decimals: usize) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    let value = if value == 0.0 { 0.0 } else { value };
    if is_exact_tie(value, decimals) {
        let nudge = 0.5 * 10f64.powi(-(decimals as i32));
        return format!("{:.*}", decimals, value + nudge.copysign(value));
    }
    format!("{:.*}", decimals, value)
}

/// True when the exact decimal expansion of `value` ends in a 5 right after
/// the last kept digit. `fmt` resolves those ties to even.
fn is_exact_tie(value: f64, decimals: usize) -> bool {
    const EXTRA: usize = 40;
    let digits = format!("{:.*}", decimals + EXTRA, value.abs());
    let tail = &digits[digits.len() - EXTRA..];
    tail.starts_with('5') && tail[1..].bytes().all(|b| b == b'0')
}
