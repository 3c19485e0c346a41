//! # Mesh Operations
//!
//! - **revolve**: Surface-of-revolution builder
//! - **normals**: Flat and smooth normal computation

pub mod normals;
pub mod revolve;

pub use normals::ShadingMode;
pub use revolve::{build_surface_of_revolution, RevolutionParams, SorOutput};
