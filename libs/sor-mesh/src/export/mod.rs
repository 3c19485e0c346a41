//! # Mesh Export
//!
//! Consumers of a finished mesh:
//! - **buffers**: flat `f32`/`u32` arrays for GPU upload
//! - **legacy**: the two-file `index,x,y,z` / `tri<N> a b c` listing
//! - **wavefront**: standard Wavefront OBJ (`v`, `vn`, `f`)

mod buffers;
mod legacy;
mod wavefront;


pub use buffers::{MeshBuffers, WireframeBuffers};
pub use legacy::{to_fixed, to_legacy, LegacyObj};
pub use wavefront::{to_wavefront_string, write_wavefront};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Text export format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjFormat {
    /// Separate coordinates and polygons files.
    #[default]
    Legacy,
    /// A single standard OBJ file.
    Wavefront,
}

impl fmt::Display for ObjFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjFormat::Legacy => f.write_str("legacy"),
            ObjFormat::Wavefront => f.write_str("obj"),
        }
    }
}

impl FromStr for ObjFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "legacy" => Ok(ObjFormat::Legacy),
            "obj" | "wavefront" => Ok(ObjFormat::Wavefront),
            other => Err(format!("unknown export format '{other}' (expected legacy or obj)")),
        }
    }
}
