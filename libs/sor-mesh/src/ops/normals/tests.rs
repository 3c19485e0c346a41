//! Tests for face and vertex normals.

use super::*;
use approx::assert_relative_eq;

const TOL: f64 = 1e-12;

/// Two triangles folded along the X axis: one in the XY plane, one in XZ.
fn folded_pair() -> (Vec<DVec3>, Vec<[u32; 3]>) {
    let vertices = vec![DVec3::ZERO, DVec3::X, DVec3::Y, DVec3::NEG_Z];
    let triangles = vec![[0, 1, 2], [0, 1, 3]];
    (vertices, triangles)
}

#[test]
fn test_face_normal_orientation_follows_winding() {
    assert_eq!(face_normal(DVec3::ZERO, DVec3::X, DVec3::Y, TOL), Some(DVec3::Z));
    assert_eq!(
        face_normal(DVec3::ZERO, DVec3::Y, DVec3::X, TOL),
        Some(DVec3::NEG_Z)
    );
}

#[test]
fn test_face_normal_is_unit_for_large_triangles() {
    let n = face_normal(
        DVec3::ZERO,
        DVec3::new(100.0, 0.0, 0.0),
        DVec3::new(0.0, 0.0, 250.0),
        TOL,
    )
    .unwrap();
    assert_relative_eq!(n.length(), 1.0, epsilon = 1e-12);
    assert_relative_eq!(n.y, -1.0);
}

#[test]
fn test_face_normal_ignores_scale() {
    for scale in [1e-9, 1e-6, 1e6, 1e200, 1e300] {
        let n = face_normal(DVec3::ZERO, DVec3::X * scale, DVec3::Y * scale, TOL);
        assert_eq!(n, Some(DVec3::Z), "scale {scale}");
    }
}

#[test]
fn test_face_normal_thin_sliver_is_degenerate_at_any_scale() {
    for scale in [1e-6, 1.0, 1e200] {
        let tip = DVec3::new(1.0, 1e-14, 0.0) * scale;
        let n = face_normal(DVec3::ZERO, DVec3::X * scale, tip, TOL);
        assert_eq!(n, None, "scale {scale}");
    }
}

#[test]
fn test_tiny_and_huge_cylinders_have_unit_normals() {
    use crate::ops::revolve::{build_surface_of_revolution, RevolutionParams};
    use crate::profile::{Profile, ProfilePoint};

    for r in [1e-6, 1e200] {
        let profile = Profile::new(vec![ProfilePoint::new(r, 0.0), ProfilePoint::new(r, r)]);
        for shading in [ShadingMode::Flat, ShadingMode::Smooth] {
            let params = RevolutionParams::new(8, false).with_shading(shading);
            let out = build_surface_of_revolution(&profile, &params).unwrap();

            assert!(out.diagnostics.is_clean(), "radius {r}, {shading}");
            for n in out.mesh.normals().map(Normals::vectors).unwrap_or_default() {
                assert_relative_eq!(n.length(), 1.0, epsilon = 1e-9);
                assert!(n.z.abs() < 1e-9);
            }
        }
    }
}

#[test]
fn test_face_normals_marks_degenerate() {
    let vertices = vec![DVec3::ZERO, DVec3::X, DVec3::Y, DVec3::X * 2.0];
    let triangles = vec![[0, 1, 2], [0, 1, 3], [2, 2, 2]];
    let faces = face_normals(&vertices, &triangles, TOL);

    assert_eq!(faces.normals.len(), 3);
    assert_eq!(faces.normals[0], DVec3::Z);
    assert_eq!(faces.normals[1], DVec3::ZERO);
    assert_eq!(faces.normals[2], DVec3::ZERO);
    assert_eq!(faces.degenerate, vec![1, 2]);
}

#[test]
fn test_vertex_normals_average_adjacent_faces() {
    let (vertices, triangles) = folded_pair();
    let faces = face_normals(&vertices, &triangles, TOL);
    assert_eq!(faces.normals[1], DVec3::Y);

    let normals = vertex_normals(vertices.len(), &triangles, &faces.normals, &[], TOL);

    // Shared edge vertices see both faces
    let expected = (DVec3::Z + DVec3::Y).normalize();
    assert_relative_eq!(normals[0].x, expected.x);
    assert_relative_eq!(normals[0].y, expected.y);
    assert_relative_eq!(normals[0].z, expected.z);
    assert_eq!(normals[1], normals[0]);
    // Unshared vertices keep their single face normal
    assert_eq!(normals[2], DVec3::Z);
    assert_eq!(normals[3], DVec3::Y);
}

#[test]
fn test_vertex_normals_isolated_vertex_is_zero() {
    let (mut vertices, triangles) = folded_pair();
    vertices.push(DVec3::splat(5.0));
    let faces = face_normals(&vertices, &triangles, TOL);
    let normals = vertex_normals(vertices.len(), &triangles, &faces.normals, &[], TOL);
    assert_eq!(normals[4], DVec3::ZERO);
}

#[test]
fn test_vertex_normals_cancelling_faces_give_zero() {
    // Same triangle twice with opposite winding
    let vertices = vec![DVec3::ZERO, DVec3::X, DVec3::Y];
    let triangles = vec![[0, 1, 2], [0, 2, 1]];
    let faces = face_normals(&vertices, &triangles, TOL);
    let normals = vertex_normals(3, &triangles, &faces.normals, &[], TOL);
    assert!(normals.iter().all(|n| *n == DVec3::ZERO));
}

#[test]
fn test_vertex_normals_welds_share_sums() {
    let (mut vertices, mut triangles) = folded_pair();
    // Vertex 4 duplicates vertex 3 and carries the second face instead
    vertices.push(DVec3::NEG_Z);
    triangles[1] = [0, 1, 4];
    let faces = face_normals(&vertices, &triangles, TOL);

    let unwelded = vertex_normals(5, &triangles, &faces.normals, &[], TOL);
    assert_eq!(unwelded[3], DVec3::ZERO);

    let welded = vertex_normals(5, &triangles, &faces.normals, &[(3, 4)], TOL);
    assert_eq!(welded[3], DVec3::Y);
    assert_eq!(welded[4], DVec3::Y);
}

#[test]
fn test_apply_normals_modes() {
    let (vertices, triangles) = folded_pair();
    let mut mesh = Mesh::new();
    for v in vertices {
        mesh.add_vertex(v);
    }
    for [a, b, c] in triangles {
        mesh.add_triangle(a, b, c);
    }

    let degenerate = apply_normals(&mut mesh, ShadingMode::Flat, &[], TOL);
    assert!(degenerate.is_empty());
    assert!(matches!(mesh.normals(), Some(Normals::PerFace(n)) if n.len() == 2));

    apply_normals(&mut mesh, ShadingMode::Smooth, &[], TOL);
    assert!(matches!(mesh.normals(), Some(Normals::PerVertex(n)) if n.len() == 4));
    assert!(mesh.validate());
}

#[test]
fn test_shading_mode_from_str() {
    assert_eq!("flat".parse::<ShadingMode>(), Ok(ShadingMode::Flat));
    assert_eq!("Smooth".parse::<ShadingMode>(), Ok(ShadingMode::Smooth));
    assert_eq!("gouraud".parse::<ShadingMode>(), Ok(ShadingMode::Smooth));
    assert_eq!("phong".parse::<ShadingMode>(), Ok(ShadingMode::Smooth));
    assert!("wireframe".parse::<ShadingMode>().is_err());
    assert_eq!(ShadingMode::default(), ShadingMode::Flat);
}
