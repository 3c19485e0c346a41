//! `sor`: build surface-of-revolution meshes from the command line.

mod cli;

use anyhow::{anyhow, Result};
use clap::Parser;
use cli::{Cli, Commands, MeshArgs};
use config::constants::WAVEFRONT_FILE;
use log::{info, warn};
use serde::Serialize;
use sor_mesh::export::{to_legacy, write_wavefront, ObjFormat};
use sor_mesh::{MeshWarning, ShadingMode, SorOutput, SorPipeline};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// JSON printed by `sor inspect`.
#[derive(Serialize, Debug)]
struct Summary<'a> {
    vertices: usize,
    triangles: usize,
    sides: u32,
    draw_end_caps: bool,
    shading: ShadingMode,
    bounding_box: [[f64; 3]; 2],
    warnings: &'a [MeshWarning],
}

impl<'a> Summary<'a> {
    fn new(pipeline: &SorPipeline, output: &'a SorOutput) -> Self {
        let (min, max) = output.mesh.bounding_box();
        let params = pipeline.config().revolution_params();
        Self {
            vertices: output.diagnostics.vertex_count,
            triangles: output.diagnostics.triangle_count,
            sides: params.sides,
            draw_end_caps: params.draw_end_caps,
            shading: params.shading,
            bounding_box: [min.to_array(), max.to_array()],
            warnings: &output.diagnostics.warnings,
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Build { input, format, out_dir } => {
            let pipeline = build(&input)?;
            let output = current(&pipeline)?;
            for path in write_outputs(output, format, &out_dir)? {
                println!("Wrote {}", path.display());
            }
        }
        Commands::Inspect { input, pretty } => {
            let pipeline = build(&input)?;
            let summary = Summary::new(&pipeline, current(&pipeline)?);
            let json = if pretty {
                serde_json::to_string_pretty(&summary)?
            } else {
                serde_json::to_string(&summary)?
            };
            println!("{json}");
        }
    }
    Ok(())
}

fn build(input: &MeshArgs) -> Result<SorPipeline> {
    let profile = input.load_profile()?;
    let pipeline = SorPipeline::build(profile, input.sor_config())?;

    if let Some(output) = pipeline.current() {
        info!(
            "built {} vertices, {} triangles",
            output.diagnostics.vertex_count, output.diagnostics.triangle_count
        );
        for warning in &output.diagnostics.warnings {
            warn!("{warning}");
        }
    }
    Ok(pipeline)
}

fn current(pipeline: &SorPipeline) -> Result<&SorOutput> {
    pipeline.current().ok_or_else(|| anyhow!("no mesh was built"))
}

fn write_outputs(output: &SorOutput, format: ObjFormat, out_dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(out_dir)?;

    match format {
        ObjFormat::Legacy => {
            let (coordinates, polygons) = to_legacy(&output.mesh).write_to_dir(out_dir)?;
            Ok(vec![coordinates, polygons])
        }
        ObjFormat::Wavefront => {
            let path = out_dir.join(WAVEFRONT_FILE);
            let mut writer = BufWriter::new(File::create(&path)?);
            write_wavefront(&output.mesh, &mut writer)?;
            writer.flush()?;
            Ok(vec![path])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use cli::{parse_canvas, parse_point, read_profile, CanvasSize};
    use sor_mesh::pipeline::SidesPolicy;
    use sor_mesh::ProfilePoint;
    use tempfile::TempDir;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    fn mesh_args(cli: Cli) -> MeshArgs {
        match cli.command {
            Commands::Build { input, .. } | Commands::Inspect { input, .. } => input,
        }
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_point() {
        assert_eq!(parse_point("1,0").unwrap(), ProfilePoint::new(1.0, 0.0));
        assert_eq!(parse_point(" -0.5 , 2.25 ").unwrap(), ProfilePoint::new(-0.5, 2.25));
        assert!(parse_point("1").is_err());
        assert!(parse_point("a,1").is_err());
        assert!(parse_point("1,b").is_err());
    }

    #[test]
    fn test_parse_canvas() {
        assert_eq!(
            parse_canvas("501x501").unwrap(),
            CanvasSize { width: 501.0, height: 501.0 }
        );
        assert_eq!(parse_canvas("640X480").unwrap().height, 480.0);
        assert!(parse_canvas("640").is_err());
        assert!(parse_canvas("0x10").is_err());
    }

    #[test]
    fn test_build_defaults() {
        let cli = parse(&["sor", "build", "--point", "1,0", "--point", "1,1"]);
        let Commands::Build { input, format, out_dir } = cli.command else {
            panic!("expected build");
        };
        assert_eq!(input.points.len(), 2);
        assert_eq!(input.sides, 12);
        assert!(!input.caps);
        assert_eq!(input.shading, ShadingMode::Flat);
        assert_eq!(format, ObjFormat::Legacy);
        assert_eq!(out_dir, PathBuf::from("."));
    }

    #[test]
    fn test_build_flags() {
        let cli = parse(&[
            "sor", "build", "--point", "-1,0", "--point", "1,1", "--sides", "2", "--caps",
            "--shading", "phong", "--clamp-sides", "--format", "obj",
        ]);
        let Commands::Build { input, format, .. } = cli.command else {
            panic!("expected build");
        };
        assert_eq!(input.points[0], ProfilePoint::new(-1.0, 0.0));
        assert_eq!(format, ObjFormat::Wavefront);

        let config = input.sor_config();
        assert_eq!(config.sides, 2);
        assert!(config.draw_end_caps);
        assert_eq!(config.shading, ShadingMode::Smooth);
        assert_eq!(config.sides_policy, SidesPolicy::Clamp);
    }

    #[test]
    fn test_profile_and_points_conflict() {
        let result = Cli::try_parse_from(["sor", "inspect", "--profile", "p.json", "--point", "1,0"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_profile_is_an_error() {
        let input = mesh_args(parse(&["sor", "inspect"]));
        assert!(input.load_profile().is_err());
    }

    #[test]
    fn test_canvas_points_are_converted() {
        let input = mesh_args(parse(&[
            "sor", "inspect", "--canvas", "500x500", "--point", "500,500", "--point", "250,0",
        ]));
        let profile = input.load_profile().unwrap();
        assert_eq!(profile.points()[0], ProfilePoint::new(1.0, -1.0));
        assert_eq!(profile.points()[1], ProfilePoint::new(0.0, 1.0));
    }

    #[test]
    fn test_read_profile_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("profile.json");
        fs::write(&path, r#"[{"radius": 1.0, "height": 0.0}, {"radius": 0.5, "height": 2.0}]"#).unwrap();

        let profile = read_profile(&path).unwrap();
        assert_eq!(profile.len(), 2);
        assert_eq!(profile.points()[1], ProfilePoint::new(0.5, 2.0));

        fs::write(&path, "not json").unwrap();
        assert!(read_profile(&path).is_err());
        assert!(read_profile(&dir.path().join("missing.json")).is_err());
    }

    #[test]
    fn test_invalid_sides_fail_to_build() {
        let input = mesh_args(parse(&["sor", "inspect", "--point", "1,0", "--point", "1,1", "--sides", "2"]));
        assert!(build(&input).is_err());
    }

    #[test]
    fn test_summary_reports_skipped_cap() {
        let input = mesh_args(parse(&[
            "sor", "inspect", "--point", "1,0", "--point", "0,1", "--sides", "4", "--caps",
        ]));
        let pipeline = build(&input).unwrap();
        let output = current(&pipeline).unwrap();
        let summary = Summary::new(&pipeline, output);

        assert_eq!(summary.vertices, 11);
        assert_eq!(summary.sides, 4);
        let json = serde_json::to_value(&summary).unwrap();
        let warnings = json["warnings"].as_array().unwrap();
        assert!(warnings.iter().any(|w| w["kind"] == "degenerate_cap"));
    }

    #[test]
    fn test_write_outputs() {
        let input = mesh_args(parse(&["sor", "build", "--point", "1,0", "--point", "1,1", "--sides", "4"]));
        let pipeline = build(&input).unwrap();
        let output = current(&pipeline).unwrap();
        let dir = TempDir::new().unwrap();
        let out_dir = dir.path().join("nested");

        let legacy = write_outputs(output, ObjFormat::Legacy, &out_dir).unwrap();
        assert_eq!(legacy.len(), 2);
        let coordinates = fs::read_to_string(&legacy[0]).unwrap();
        assert_eq!(coordinates.lines().next(), Some("10"));

        let obj = write_outputs(output, ObjFormat::Wavefront, &out_dir).unwrap();
        let text = fs::read_to_string(&obj[0]).unwrap();
        assert_eq!(text.lines().filter(|l| l.starts_with("v ")).count(), 10);
        assert_eq!(text.lines().filter(|l| l.starts_with("f ")).count(), 8);
    }
}
