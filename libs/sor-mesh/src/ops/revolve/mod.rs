//! # Surface of Revolution
//!
//! Revolves a profile curve around the Z axis into a triangle mesh.
//!
//! ## Algorithm
//!
//! 1. For `i` in `0..=sides` the whole profile is rotated by
//!    `i * 2π / sides`, giving `sides + 1` rings of `len(profile)` vertices.
//!    Ring `sides` coincides with ring 0; the duplicate closes the loop
//!    without index wrap-around.
//! 2. Each quad between ring `i` and `i + 1`, points `j` and `j + 1`, becomes
//!    the triangles `(r_i[j], r_i[j+1], r_{i+1}[j])` and
//!    `(r_i[j+1], r_{i+1}[j+1], r_{i+1}[j])`.
//! 3. Optional end caps fan a center vertex on the axis against the first
//!    and last profile point of every ring.
//! 4. Flat or smooth normals are computed; zero-length ones are reported.
//!
//! ## Orientation
//!
//! Side normals point away from the axis when the profile runs from top to
//! bottom and towards it when the profile runs bottom to top. Cap fans use
//! the same orientation as the side band they close.

use crate::diagnostics::{CapEnd, MeshDiagnostics, MeshWarning};
use crate::error::{MeshError, MeshResult};
use crate::mesh::Mesh;
use crate::ops::normals::{apply_normals, ShadingMode};
use crate::profile::Profile;
use config::constants::{on_axis, DEFAULT_SIDES, DEGENERATE_NORMAL_EPSILON, MAX_VERTICES, MIN_SIDES};
use glam::DVec3;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;


/// Parameters for a surface-of-revolution build.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RevolutionParams {
    /// Number of rotational steps around the axis (at least 3).
    pub sides: u32,
    /// Close the bottom and top with triangle fans.
    pub draw_end_caps: bool,
    /// Per-face or per-vertex normals.
    pub shading: ShadingMode,
    /// Corner-angle sine at or below which a triangle is degenerate.
    pub tolerance: f64,
}

impl Default for RevolutionParams {
    fn default() -> Self {
        Self {
            sides: DEFAULT_SIDES,
            draw_end_caps: false,
            shading: ShadingMode::Flat,
            tolerance: DEGENERATE_NORMAL_EPSILON,
        }
    }
}

impl RevolutionParams {
    /// Creates parameters with flat shading and the default tolerance.
    pub fn new(sides: u32, draw_end_caps: bool) -> Self {
        Self {
            sides,
            draw_end_caps,
            ..Self::default()
        }
    }

    /// Returns a copy with the given shading mode.
    pub fn with_shading(mut self, shading: ShadingMode) -> Self {
        self.shading = shading;
        self
    }

    /// Rejects a side count below the minimum or an unusable tolerance.
    pub fn validate(&self) -> MeshResult<()> {
        if self.sides < MIN_SIDES {
            return Err(MeshError::invalid_parameter(format!(
                "sides must be at least {MIN_SIDES}, got {}",
                self.sides
            )));
        }
        if self.tolerance <= 0.0 || !self.tolerance.is_finite() {
            return Err(MeshError::invalid_parameter(format!(
                "tolerance must be positive and finite, got {}",
                self.tolerance
            )));
        }
        Ok(())
    }
}

/// A built mesh and what was found while building it.
#[derive(Debug, Clone, PartialEq)]
pub struct SorOutput {
    /// The generated mesh, normals attached.
    pub mesh: Mesh,
    /// Counts and degenerate-geometry warnings.
    pub diagnostics: MeshDiagnostics,
}

/// Builds the surface of revolution of `profile` around the Z axis.
///
/// # Errors
///
/// - [`MeshError::InvalidParameter`] if `sides < 3`, the profile has fewer
///   than two points or a non-finite coordinate
/// - [`MeshError::TooManyVertices`] if the mesh would exceed the vertex limit
///
/// # Example
///
/// ```rust
/// use sor_mesh::ops::revolve::{build_surface_of_revolution, RevolutionParams};
/// use sor_mesh::profile::{Profile, ProfilePoint};
///
/// let profile = Profile::new(vec![ProfilePoint::new(1.0, 0.0), ProfilePoint::new(1.0, 1.0)]);
/// let output = build_surface_of_revolution(&profile, &RevolutionParams::new(4, false)).unwrap();
///
/// assert_eq!(output.mesh.vertex_count(), 10);
/// assert_eq!(output.mesh.triangle_count(), 8);
/// assert!(output.diagnostics.is_clean());
/// ```
pub fn build_surface_of_revolution(
    profile: &Profile,
    params: &RevolutionParams,
) -> MeshResult<SorOutput> {
    params.validate()?;
    profile.validate()?;

    let points = profile.points();
    let n = points.len();
    let sides = params.sides as usize;
    let (first, last) = (points[0], points[n - 1]);

    let extent = points
        .iter()
        .map(|p| p.radius.abs().max(p.height.abs()))
        .fold(0.0, f64::max);
    let mut diagnostics = MeshDiagnostics::default();
    let mut cap_allowed = |radius: f64, end: CapEnd| {
        params.draw_end_caps && allow_cap(radius, extent, params.tolerance, end, &mut diagnostics)
    };
    let cap_bottom = cap_allowed(first.radius, CapEnd::Bottom);
    let cap_top = cap_allowed(last.radius, CapEnd::Top);

    let ring_vertices = (sides + 1)
        .checked_mul(n)
        .ok_or(MeshError::TooManyVertices { count: usize::MAX, max: MAX_VERTICES })?;
    let vertex_count = ring_vertices + usize::from(cap_bottom) + usize::from(cap_top);
    if vertex_count > MAX_VERTICES {
        return Err(MeshError::TooManyVertices {
            count: vertex_count,
            max: MAX_VERTICES,
        });
    }
    let triangle_count =
        2 * sides * (n - 1) + sides * (usize::from(cap_bottom) + usize::from(cap_top));

    let mut mesh = Mesh::with_capacity(vertex_count, triangle_count);

    // Rings
    let angle_step = TAU / sides as f64;
    for i in 0..=sides {
        let (sin, cos) = (i as f64 * angle_step).sin_cos();
        for p in points {
            mesh.add_vertex(DVec3::new(p.radius * cos, p.radius * sin, p.height));
        }
    }

    // Side bands
    let index = |ring: usize, point: usize| (ring * n + point) as u32;
    for i in 0..sides {
        for j in 0..n - 1 {
            mesh.add_triangle(index(i, j), index(i, j + 1), index(i + 1, j));
            mesh.add_triangle(index(i, j + 1), index(i + 1, j + 1), index(i + 1, j));
        }
    }

    // End caps
    if cap_bottom {
        let center = mesh.add_vertex(DVec3::new(0.0, 0.0, first.height));
        for i in 0..sides {
            mesh.add_triangle(center, index(i, 0), index(i + 1, 0));
        }
    }
    if cap_top {
        let center = mesh.add_vertex(DVec3::new(0.0, 0.0, last.height));
        for i in 0..sides {
            mesh.add_triangle(center, index(i + 1, n - 1), index(i, n - 1));
        }
    }

    // Ring `sides` sits on ring 0; smooth shading sums them together.
    let seam: Vec<(u32, u32)> = (0..n).map(|j| (index(0, j), index(sides, j))).collect();
    let degenerate = apply_normals(&mut mesh, params.shading, &seam, params.tolerance);
    if !degenerate.is_empty() {
        warn!(
            "degenerate geometry: {} of {} triangles have zero-length normals",
            degenerate.len(),
            mesh.triangle_count()
        );
    }
    for triangle in degenerate {
        diagnostics.push(MeshWarning::DegenerateTriangle { triangle });
    }

    diagnostics.vertex_count = mesh.vertex_count();
    diagnostics.triangle_count = mesh.triangle_count();

    debug!(
        "revolved {} profile points over {} sides ({} shading, caps: {}): {} vertices, {} triangles",
        n,
        sides,
        params.shading,
        params.draw_end_caps,
        diagnostics.vertex_count,
        diagnostics.triangle_count
    );

    Ok(SorOutput { mesh, diagnostics })
}

/// A cap fanned against a ring of radius zero has only zero-area triangles;
/// such a cap is skipped and reported instead.
fn allow_cap(
    radius: f64,
    extent: f64,
    tolerance: f64,
    end: CapEnd,
    diagnostics: &mut MeshDiagnostics,
) -> bool {
    if on_axis(radius, extent, tolerance) {
        warn!("degenerate geometry: {end} profile point lies on the axis, cap skipped");
        diagnostics.push(MeshWarning::DegenerateCap { end });
        false
    } else {
        true
    }
}
