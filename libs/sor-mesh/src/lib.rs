//! # SOR Mesh
//!
//! Surface-of-revolution mesh generation.
//! Revolves a 2D profile curve around the Z axis into a triangle mesh with
//! per-face or per-vertex normals.
//!
//! ## Architecture
//!
//! ```text
//! Profile → ops::revolve (Mesh + diagnostics) → export (buffers, OBJ)
//!                 ↑
//!         pipeline (parameter changes, last good mesh)
//! ```
//!
//! ## Modules
//!
//! - **profile**: 2D `(radius, height)` curves, canvas and plane conversion
//! - **ops**: the revolution builder and normal computation
//! - **mesh**: indexed triangle mesh with attached normals
//! - **transform**: model and normal matrices for the renderer
//! - **export**: GPU buffers, legacy two-file listing, Wavefront OBJ
//! - **pipeline**: rebuilds on input events, keeps the last good mesh
//!
//! ## Usage
//!
//! ```rust
//! use sor_mesh::{build_surface_of_revolution, Profile, ProfilePoint, RevolutionParams};
//!
//! let profile = Profile::new(vec![ProfilePoint::new(1.0, 0.0), ProfilePoint::new(1.0, 1.0)]);
//! let output = build_surface_of_revolution(&profile, &RevolutionParams::new(4, false)).unwrap();
//! assert_eq!(output.mesh.vertex_count(), 10);
//! ```

pub mod diagnostics;
pub mod error;
pub mod export;
pub mod mesh;
pub mod ops;
pub mod pipeline;
pub mod profile;
pub mod transform;

pub use diagnostics::{MeshDiagnostics, MeshWarning};
pub use error::{MeshError, MeshResult};
pub use mesh::{Mesh, Normals};
pub use ops::{build_surface_of_revolution, RevolutionParams, ShadingMode, SorOutput};
pub use pipeline::{SorConfig, SorPipeline};
pub use profile::{Profile, ProfilePoint};
pub use transform::Transform;
