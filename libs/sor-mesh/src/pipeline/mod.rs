//! # Rebuild Pipeline
//!
//! Explicit "parameters changed -> rebuild mesh -> re-render" flow. The
//! pipeline owns the profile, the configuration and the last mesh that built
//! successfully; every input event is one [`ParamChange`] applied
//! synchronously.
//!
//! ## Failure Policy
//!
//! A change that makes the build fail is still recorded in the
//! configuration (it mirrors what the user entered), but the previous mesh
//! stays current so the renderer keeps drawing it. [`SorPipeline::is_stale`]
//! reports when the current mesh no longer matches the configuration.

use crate::error::MeshResult;
use crate::export::MeshBuffers;
use crate::mesh::Mesh;
use crate::ops::normals::ShadingMode;
use crate::ops::revolve::{build_surface_of_revolution, RevolutionParams, SorOutput};
use crate::profile::Profile;
use crate::transform::Transform;
use config::constants::{GlobalConfig, MIN_SIDES};
use glam::{DMat3, DMat4};
use log::{debug, warn};
use serde::{Deserialize, Serialize};


/// What to do with a side count below the minimum.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SidesPolicy {
    /// Pass the value through; the builder rejects it.
    #[default]
    Strict,
    /// Raise the value to the minimum before building.
    Clamp,
}

/// Everything the builder and the renderer need, in one place.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SorConfig {
    /// Number of rotational steps.
    pub sides: u32,
    /// Close the ends with triangle fans.
    pub draw_end_caps: bool,
    /// Flat or smooth normals.
    pub shading: ShadingMode,
    /// Model transform used by the renderer only.
    pub transform: Transform,
    /// Degenerate-triangle tolerance.
    pub tolerance: f64,
    /// Handling of side counts below the minimum.
    pub sides_policy: SidesPolicy,
}

impl Default for SorConfig {
    fn default() -> Self {
        Self::from_global(&GlobalConfig::default())
    }
}

impl SorConfig {
    /// Builds a configuration from the shared defaults.
    pub fn from_global(global: &GlobalConfig) -> Self {
        Self {
            sides: global.default_sides,
            draw_end_caps: false,
            shading: ShadingMode::Flat,
            transform: Transform::default(),
            tolerance: global.tolerance,
            sides_policy: SidesPolicy::Strict,
        }
    }

    /// True when the sides policy raises the configured side count.
    pub fn sides_clamped(&self) -> bool {
        self.sides_policy == SidesPolicy::Clamp && self.sides < MIN_SIDES
    }

    /// Builder parameters after applying the sides policy.
    pub fn revolution_params(&self) -> RevolutionParams {
        let sides = if self.sides_clamped() { MIN_SIDES } else { self.sides };

        RevolutionParams {
            sides,
            draw_end_caps: self.draw_end_caps,
            shading: self.shading,
            tolerance: self.tolerance,
        }
    }
}

/// A single input event.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamChange {
    /// New side count.
    Sides(u32),
    /// End caps toggled.
    EndCaps(bool),
    /// Shading mode selected.
    Shading(ShadingMode),
    /// Model moved, rotated or scaled.
    Transform(Transform),
    /// A new profile was drawn.
    Profile(Profile),
}

/// Result of applying a change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rebuild {
    /// A new mesh was built and is now current.
    Rebuilt,
    /// The mesh inputs did not change; nothing was rebuilt.
    Skipped,
}

/// Everything a renderer needs to draw the current mesh.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    /// Upload-ready vertex data.
    pub buffers: MeshBuffers,
    /// Model matrix for the vertex shader.
    pub model: DMat4,
    /// Normal matrix for lighting.
    pub normal: DMat3,
}

/// Owns the inputs and the last good mesh.
///
/// # Example
///
/// ```rust
/// use sor_mesh::pipeline::{ParamChange, Rebuild, SorConfig, SorPipeline};
/// use sor_mesh::profile::{Profile, ProfilePoint};
///
/// let profile = Profile::new(vec![ProfilePoint::new(1.0, 0.0), ProfilePoint::new(1.0, 1.0)]);
/// let mut pipeline = SorPipeline::build(profile, SorConfig::default()).unwrap();
///
/// assert_eq!(pipeline.apply(ParamChange::Sides(8)).unwrap(), Rebuild::Rebuilt);
/// assert_eq!(pipeline.mesh().map(|m| m.vertex_count()), Some(18));
///
/// // Invalid input keeps the previous mesh
/// assert!(pipeline.apply(ParamChange::Sides(2)).is_err());
/// assert_eq!(pipeline.mesh().map(|m| m.vertex_count()), Some(18));
/// assert!(pipeline.is_stale());
/// ```
#[derive(Debug, Clone)]
pub struct SorPipeline {
    profile: Profile,
    config: SorConfig,
    current: Option<SorOutput>,
    built_from: Option<(Profile, RevolutionParams)>,
    rebuilds: u64,
}

impl SorPipeline {
    /// Creates a pipeline without building.
    pub fn new(profile: Profile, config: SorConfig) -> Self {
        Self {
            profile,
            config,
            current: None,
            built_from: None,
            rebuilds: 0,
        }
    }

    /// Creates a pipeline and builds the first mesh.
    pub fn build(profile: Profile, config: SorConfig) -> MeshResult<Self> {
        let mut pipeline = Self::new(profile, config);
        pipeline.rebuild()?;
        Ok(pipeline)
    }

    /// Applies one input event and rebuilds if the mesh inputs changed.
    pub fn apply(&mut self, change: ParamChange) -> MeshResult<Rebuild> {
        match change {
            ParamChange::Sides(sides) => self.config.sides = sides,
            ParamChange::EndCaps(caps) => self.config.draw_end_caps = caps,
            ParamChange::Shading(shading) => self.config.shading = shading,
            ParamChange::Transform(transform) => self.config.transform = transform,
            ParamChange::Profile(profile) => self.profile = profile,
        }
        self.rebuild()
    }

    /// Replaces the whole configuration.
    pub fn set_config(&mut self, config: SorConfig) -> MeshResult<Rebuild> {
        self.config = config;
        self.rebuild()
    }

    /// Replaces the profile.
    pub fn set_profile(&mut self, profile: Profile) -> MeshResult<Rebuild> {
        self.profile = profile;
        self.rebuild()
    }

    /// Builds the mesh for the current inputs unless it is already current.
    ///
    /// On failure the previous mesh is kept.
    pub fn rebuild(&mut self) -> MeshResult<Rebuild> {
        let params = self.config.revolution_params();
        if let Some((profile, built)) = &self.built_from {
            if *built == params && *profile == self.profile {
                return Ok(Rebuild::Skipped);
            }
        }
        if self.config.sides_clamped() {
            warn!("sides {} below minimum, clamped to {MIN_SIDES}", self.config.sides);
        }

        match build_surface_of_revolution(&self.profile, &params) {
            Ok(output) => {
                for warning in &output.diagnostics.warnings {
                    debug!("{warning}");
                }
                self.current = Some(output);
                self.built_from = Some((self.profile.clone(), params));
                self.rebuilds += 1;
                Ok(Rebuild::Rebuilt)
            }
            Err(err) => {
                warn!("mesh rebuild failed, keeping previous mesh: {err}");
                Err(err)
            }
        }
    }

    /// The last successful build, if any.
    pub fn current(&self) -> Option<&SorOutput> {
        self.current.as_ref()
    }

    /// The last successfully built mesh, if any.
    pub fn mesh(&self) -> Option<&Mesh> {
        self.current.as_ref().map(|output| &output.mesh)
    }

    /// The configuration as last set, including values that failed to build.
    pub fn config(&self) -> &SorConfig {
        &self.config
    }

    /// The profile as last set.
    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    /// Number of successful builds so far.
    pub fn rebuild_count(&self) -> u64 {
        self.rebuilds
    }

    /// True when the current mesh was built from different inputs than the
    /// present ones (or nothing has been built).
    pub fn is_stale(&self) -> bool {
        match &self.built_from {
            Some((profile, params)) => {
                *profile != self.profile || *params != self.config.revolution_params()
            }
            None => true,
        }
    }

    /// Buffers and matrices for drawing the current mesh.
    ///
    /// A transform without an inverse (a zero scale, or a non-finite
    /// component) yields a zero normal matrix, so every normal collapses to
    /// the zero vector and contributes no lighting.
    pub fn render_buffers(&self) -> Option<RenderFrame> {
        let transform = &self.config.transform;
        let normal = if transform.is_invertible() {
            transform.normal_matrix()
        } else {
            warn!("model transform is not invertible, normals disabled");
            DMat3::ZERO
        };

        self.mesh().map(|mesh| RenderFrame {
            buffers: MeshBuffers::from_mesh(mesh),
            model: transform.model_matrix(),
            normal,
        })
    }
}
