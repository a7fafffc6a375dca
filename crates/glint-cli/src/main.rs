//! glint CLI — translate a CAD geometry database into a renderer project.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use glint::{assemble, RenderSettings};
use glint_db::Database;

#[derive(Parser, Debug)]
#[command(name = "glint")]
#[command(about = "Translate a CAD geometry database into a renderer project", long_about = None)]
struct Cli {
    /// Path to the geometry database (JSON)
    database: PathBuf,

    /// Top-level objects to render
    objects: Vec<String>,

    /// Camera azimuth in degrees
    #[arg(short, long, allow_negative_numbers = true)]
    azimuth: Option<f64>,

    /// Camera elevation in degrees
    #[arg(short, long, allow_negative_numbers = true)]
    elevation: Option<f64>,

    /// Image width in pixels
    #[arg(short, long)]
    width: Option<u32>,

    /// Image height in pixels
    #[arg(short = 'n', long)]
    height: Option<u32>,

    /// Pixel samples for the final render configuration
    #[arg(short, long)]
    samples: Option<u32>,

    /// Width-over-height framing ratio
    #[arg(long)]
    aspect: Option<f64>,

    /// Explicit view diameter, bypassing the bounding-box fit
    #[arg(long = "view-size")]
    view_size: Option<f64>,

    /// Output project file (defaults to <database stem>.project.json)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Settings file (TOML); command-line flags override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Usage and configuration problems exit 1; load and geometry
    // failures past this point exit 255.
    let settings = match build_settings(&cli) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("glint: {e:#}");
            return ExitCode::from(1);
        }
    };

    match run(&cli, &settings) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("glint: {e:#}");
            ExitCode::from(255)
        }
    }
}

fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();
}

/// Merge the optional settings file with command-line overrides.
fn build_settings(cli: &Cli) -> Result<RenderSettings> {
    if cli.objects.is_empty() {
        anyhow::bail!("no objects specified");
    }
    let mut settings = match &cli.config {
        Some(path) => RenderSettings::load(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => RenderSettings::default(),
    };
    if let Some(azimuth) = cli.azimuth {
        settings.azimuth = azimuth;
    }
    if let Some(elevation) = cli.elevation {
        settings.elevation = elevation;
    }
    if let Some(width) = cli.width {
        settings.width = width;
    }
    if let Some(height) = cli.height {
        settings.height = height;
    }
    if let Some(samples) = cli.samples {
        settings.samples = samples;
    }
    if let Some(aspect) = cli.aspect {
        settings.aspect = aspect;
    }
    if let Some(view_size) = cli.view_size {
        settings.view_size_override = Some(view_size);
    }
    settings.validate()?;
    Ok(settings)
}

fn run(cli: &Cli, settings: &RenderSettings) -> Result<()> {
    let db = Database::from_path(&cli.database)
        .with_context(|| format!("loading database {}", cli.database.display()))?;
    info!("database title: {}", db.title);

    let (project, view) = assemble(Arc::new(db), &cli.objects, settings)?;
    info!("view size: {:.6}", view.view_size);
    // Display in the renderer's axis convention, matching the camera.
    info!(
        "eye point: ({:.6}, {:.6}, {:.6})",
        view.eye_point.x, -view.eye_point.z, view.eye_point.y
    );

    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| default_output(&cli.database));
    project
        .write_json(&output)
        .with_context(|| format!("writing {}", output.display()))?;
    info!("wrote {}", output.display());
    Ok(())
}

fn default_output(database: &Path) -> PathBuf {
    let stem = database
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("scene");
    database.with_file_name(format!("{stem}.project.json"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("glint").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn parses_database_objects_and_flags() {
        let cli = parse(&[
            "model.json",
            "all.g",
            "extra.r",
            "-a",
            "90",
            "-e",
            "-10",
            "-w",
            "800",
            "-n",
            "600",
            "--view-size",
            "12.5",
        ]);
        assert_eq!(cli.database, PathBuf::from("model.json"));
        assert_eq!(cli.objects, vec!["all.g", "extra.r"]);
        assert_eq!(cli.azimuth, Some(90.0));
        assert_eq!(cli.elevation, Some(-10.0));
        assert_eq!(cli.width, Some(800));
        assert_eq!(cli.height, Some(600));
        assert_eq!(cli.view_size, Some(12.5));
    }

    #[test]
    fn missing_database_argument_is_a_parse_error() {
        assert!(Cli::try_parse_from(["glint"]).is_err());
    }

    #[test]
    fn flags_override_defaults() {
        let cli = parse(&["model.json", "all.g", "-a", "120", "-s", "4"]);
        let settings = build_settings(&cli).unwrap();
        assert_eq!(settings.azimuth, 120.0);
        assert_eq!(settings.samples, 4);
        // Untouched fields keep their defaults.
        assert_eq!(settings.elevation, 25.0);
        assert!(settings.view_size_override.is_none());
    }

    #[test]
    fn no_objects_is_rejected() {
        let cli = parse(&["model.json"]);
        assert!(build_settings(&cli).is_err());
    }

    #[test]
    fn invalid_overrides_are_rejected() {
        let cli = parse(&["model.json", "all.g", "-s", "0"]);
        assert!(build_settings(&cli).is_err());
    }

    #[test]
    fn default_output_uses_the_database_stem() {
        assert_eq!(
            default_output(Path::new("models/truck.json")),
            PathBuf::from("models/truck.project.json")
        );
        assert_eq!(
            default_output(Path::new("cube.json")),
            PathBuf::from("cube.project.json")
        );
    }
}
