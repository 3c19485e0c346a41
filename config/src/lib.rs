//! # Config Crate
//!
//! Centralized configuration constants for the surface-of-revolution pipeline.
//! All magic numbers and tunable parameters are defined here so the mesh
//! builder, the exporters and the CLI agree on tolerances and defaults.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{on_axis, DEFAULT_SIDES, DEGENERATE_NORMAL_EPSILON, MIN_SIDES};
//!
//! // Tolerances are relative to the size of the geometry
//! assert!(on_axis(1e-20, 1e-6, DEGENERATE_NORMAL_EPSILON));
//! assert!(!on_axis(1e-7, 1e-6, DEGENERATE_NORMAL_EPSILON));
//!
//! // Fall back to the default side count when none is supplied
//! let requested: Option<u32> = None;
//! let sides = requested.unwrap_or(DEFAULT_SIDES);
//! assert!(sides >= MIN_SIDES);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **Strict Defaults**: Defaults always satisfy the builder's own validation
//! - **Output Compatibility**: File names and precision match the legacy exports

pub mod constants;
