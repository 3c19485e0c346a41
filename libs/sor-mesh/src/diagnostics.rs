//! # Mesh Diagnostics
//!
//! Non-fatal findings collected while a mesh is built. A build either fails
//! with a [`crate::MeshError`] or returns a usable mesh together with these
//! diagnostics; degenerate triangles and skipped caps never abort a build.

use serde::Serialize;
use std::fmt;

/// Which end of the profile a cap closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CapEnd {
    /// Cap at the first profile point.
    Bottom,
    /// Cap at the last profile point.
    Top,
}

impl fmt::Display for CapEnd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CapEnd::Bottom => f.write_str("bottom"),
            CapEnd::Top => f.write_str("top"),
        }
    }
}

/// A degenerate-geometry warning attached to a built mesh.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MeshWarning {
    /// Triangle with a zero-length normal; its normal is the zero vector.
    DegenerateTriangle {
        /// Index into the mesh's triangle list.
        triangle: usize,
    },
    /// Cap requested on an end whose profile point lies on the axis. The fan
    /// would only contain zero-area triangles, so it was not generated.
    DegenerateCap {
        /// End whose cap was skipped.
        end: CapEnd,
    },
}

impl fmt::Display for MeshWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeshWarning::DegenerateTriangle { triangle } => {
                write!(f, "degenerate geometry: triangle {triangle} has a zero-length normal")
            }
            MeshWarning::DegenerateCap { end } => {
                write!(
                    f,
                    "degenerate geometry: {end} cap skipped, profile endpoint lies on the axis"
                )
            }
        }
    }
}

/// Summary of a finished build.
///
/// # Example
///
/// ```rust
/// use sor_mesh::diagnostics::{MeshDiagnostics, MeshWarning};
///
/// let mut diagnostics = MeshDiagnostics::default();
/// assert!(diagnostics.is_clean());
///
/// diagnostics.push(MeshWarning::DegenerateTriangle { triangle: 4 });
/// assert_eq!(diagnostics.degenerate_triangle_count(), 1);
/// ```
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct MeshDiagnostics {
    /// Total number of vertices in the final mesh.
    pub vertex_count: usize,
    /// Total number of triangles in the final mesh.
    pub triangle_count: usize,
    /// Degenerate-geometry warnings, in the order they were found.
    pub warnings: Vec<MeshWarning>,
}

impl MeshDiagnostics {
    /// Records a warning.
    pub fn push(&mut self, warning: MeshWarning) {
        self.warnings.push(warning);
    }

    /// Returns true when no warning was recorded.
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Number of triangles that received a zero normal.
    pub fn degenerate_triangle_count(&self) -> usize {
        self.warnings
            .iter()
            .filter(|w| matches!(w, MeshWarning::DegenerateTriangle { .. }))
            .count()
    }

    /// Ends whose caps were skipped.
    pub fn skipped_caps(&self) -> impl Iterator<Item = CapEnd> + '_ {
        self.warnings.iter().filter_map(|w| match w {
            MeshWarning::DegenerateCap { end } => Some(*end),
            MeshWarning::DegenerateTriangle { .. } => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warning_display() {
        let w = MeshWarning::DegenerateTriangle { triangle: 7 };
        assert!(w.to_string().contains("triangle 7"));

        let w = MeshWarning::DegenerateCap { end: CapEnd::Top };
        assert!(w.to_string().contains("top cap skipped"));
    }

    #[test]
    fn test_skipped_caps() {
        let mut d = MeshDiagnostics::default();
        d.push(MeshWarning::DegenerateCap { end: CapEnd::Bottom });
        d.push(MeshWarning::DegenerateTriangle { triangle: 0 });
        assert!(!d.is_clean());
        assert_eq!(d.skipped_caps().collect::<Vec<_>>(), vec![CapEnd::Bottom]);
        assert_eq!(d.degenerate_triangle_count(), 1);
    }
}
