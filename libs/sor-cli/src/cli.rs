//! Command-line arguments and profile loading.

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use config::constants::{DEFAULT_SIDES, MAX_PROFILE_FILE_SIZE};
use glam::DVec2;
use sor_mesh::export::ObjFormat;
use sor_mesh::pipeline::{SidesPolicy, SorConfig};
use sor_mesh::{Profile, ProfilePoint, ShadingMode};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "sor", version, about = "Build surface-of-revolution meshes from 2D profiles")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build a mesh and write it to disk
    Build {
        #[command(flatten)]
        input: MeshArgs,

        /// Output format (legacy, obj)
        #[arg(long, default_value_t = ObjFormat::Legacy)]
        format: ObjFormat,

        /// Directory for the output files
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },

    /// Build a mesh and print a JSON summary
    Inspect {
        #[command(flatten)]
        input: MeshArgs,

        /// Pretty-print JSON
        #[arg(long)]
        pretty: bool,
    },
}

/// Canvas dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasSize {
    pub width: f64,
    pub height: f64,
}

/// Profile source and build parameters shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct MeshArgs {
    /// JSON file holding an array of {"radius", "height"} points
    #[arg(long, conflicts_with = "points")]
    pub profile: Option<PathBuf>,

    /// Profile point as `radius,height` (repeat in order, bottom to top)
    #[arg(long = "point", value_name = "R,H", allow_hyphen_values = true, value_parser = parse_point)]
    pub points: Vec<ProfilePoint>,

    /// Treat the points as pixels on a WxH canvas
    #[arg(long, value_name = "WxH", value_parser = parse_canvas)]
    pub canvas: Option<CanvasSize>,

    /// Number of rotational steps
    #[arg(long, default_value_t = DEFAULT_SIDES)]
    pub sides: u32,

    /// Close both ends with triangle fans
    #[arg(long)]
    pub caps: bool,

    /// Normal mode (flat, smooth, gouraud, phong)
    #[arg(long, default_value_t = ShadingMode::Flat)]
    pub shading: ShadingMode,

    /// Raise a side count below the minimum instead of failing
    #[arg(long)]
    pub clamp_sides: bool,
}

impl MeshArgs {
    /// Builder configuration from the flags.
    pub fn sor_config(&self) -> SorConfig {
        SorConfig {
            sides: self.sides,
            draw_end_caps: self.caps,
            shading: self.shading,
            sides_policy: if self.clamp_sides {
                SidesPolicy::Clamp
            } else {
                SidesPolicy::Strict
            },
            ..SorConfig::default()
        }
    }

    /// Loads the profile from the file or the `--point` flags, converting
    /// canvas pixels when `--canvas` is given.
    pub fn load_profile(&self) -> Result<Profile> {
        let profile = match &self.profile {
            Some(path) => read_profile(path)?,
            None if self.points.is_empty() => bail!("no profile given: use --profile or --point"),
            None => self.points.iter().copied().collect(),
        };

        match self.canvas {
            Some(canvas) => {
                let pixels: Vec<DVec2> = profile
                    .points()
                    .iter()
                    .map(|p| DVec2::new(p.radius, p.height))
                    .collect();
                Ok(Profile::from_canvas(&pixels, canvas.width, canvas.height)?)
            }
            None => Ok(profile),
        }
    }
}

/// Reads a JSON profile, refusing oversized files.
pub fn read_profile(path: &Path) -> Result<Profile> {
    let size = fs::metadata(path)
        .with_context(|| format!("cannot read {}", path.display()))?
        .len();
    if size > MAX_PROFILE_FILE_SIZE {
        bail!(
            "{} is {size} bytes, larger than the {MAX_PROFILE_FILE_SIZE} byte limit",
            path.display()
        );
    }

    let text = fs::read_to_string(path)?;
    serde_json::from_str(&text).with_context(|| format!("invalid profile in {}", path.display()))
}

/// Parses `radius,height`.
pub fn parse_point(s: &str) -> Result<ProfilePoint, String> {
    let (radius, height) = s
        .split_once(',')
        .ok_or_else(|| format!("expected radius,height but got '{s}'"))?;
    let radius: f64 = radius
        .trim()
        .parse()
        .map_err(|_| format!("bad radius in '{s}'"))?;
    let height: f64 = height
        .trim()
        .parse()
        .map_err(|_| format!("bad height in '{s}'"))?;
    Ok(ProfilePoint::new(radius, height))
}

/// Parses `WxH`.
pub fn parse_canvas(s: &str) -> Result<CanvasSize, String> {
    let (width, height) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT but got '{s}'"))?;
    let width: f64 = width.parse().map_err(|_| format!("bad width in '{s}'"))?;
    let height: f64 = height.parse().map_err(|_| format!("bad height in '{s}'"))?;
    if width <= 0.0 || height <= 0.0 {
        return Err(format!("canvas size must be positive: '{s}'"));
    }
    Ok(CanvasSize { width, height })
}
