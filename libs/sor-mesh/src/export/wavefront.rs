//! Standard Wavefront OBJ export.
//!
//! Emits `v` lines, then `vn` lines when the mesh has normals, then one `f`
//! line per triangle. Face normal references follow the normal mode: per-face
//! normals are indexed by triangle, per-vertex normals by vertex.

use crate::error::MeshResult;
use crate::mesh::{Mesh, Normals};
use std::io::Write;

/// Writes the mesh as OBJ text.
pub fn write_wavefront<W: Write>(mesh: &Mesh, mut out: W) -> MeshResult<()> {
    writeln!(
        out,
        "# surface of revolution: {} vertices, {} triangles",
        mesh.vertex_count(),
        mesh.triangle_count()
    )?;

    for v in mesh.vertices() {
        writeln!(out, "v {} {} {}", v.x, v.y, v.z)?;
    }

    let normals = mesh.normals();
    if let Some(normals) = normals {
        for n in normals.vectors() {
            writeln!(out, "vn {} {} {}", n.x, n.y, n.z)?;
        }
    }

    for (index, [a, b, c]) in mesh.triangles().iter().enumerate() {
        let (a, b, c) = (a + 1, b + 1, c + 1);
        match normals {
            None => writeln!(out, "f {a} {b} {c}")?,
            Some(Normals::PerFace(_)) => {
                let n = index + 1;
                writeln!(out, "f {a}//{n} {b}//{n} {c}//{n}")?
            }
            Some(Normals::PerVertex(_)) => writeln!(out, "f {a}//{a} {b}//{b} {c}//{c}")?,
        }
    }

    out.flush()?;
    Ok(())
}

/// Renders the mesh as an OBJ string.
pub fn to_wavefront_string(mesh: &Mesh) -> MeshResult<String> {
    let mut buffer = Vec::new();
    write_wavefront(mesh, &mut buffer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}
