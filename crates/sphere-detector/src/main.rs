//! Command-line entry point for the reference detector.
//!
//! Constructs the detector, places the spherical parameterisation, and prints
//! the resolved bounds of one voxel or of all of them.
//!
//! ```text
//! sphere-detector [--config detector.json] [--seed N] [--copy N] [--quiet]
//! ```

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use sphere_detector::{DetectorConfig, DetectorConstruction};
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_SEED: i64 = 1;

/// Spherical voxel parameterisation demo
#[derive(Parser)]
#[command(name = "sphere-detector")]
#[command(about = "Place a spherical voxel parameterisation and print its voxels", long_about = None)]
#[command(version)]
struct Cli {
    /// JSON detector configuration (defaults to the reference detector)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Random seed recorded for the run
    #[arg(long)]
    seed: Option<i64>,

    /// Describe only this copy number
    #[arg(long)]
    copy: Option<usize>,

    /// Skip the per-voxel report
    #[arg(long)]
    quiet: bool,

    /// Print the effective configuration as JSON and exit
    #[arg(long)]
    dump_config: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => DetectorConfig::load(path)?,
        None => DetectorConfig::default(),
    };

    let mut stdout = io::stdout().lock();

    if cli.dump_config {
        writeln!(stdout, "{}", config.to_json()?)?;
        return Ok(());
    }

    let seed = cli.seed.unwrap_or_else(|| {
        info!("No random seed given on command line, using seed: {DEFAULT_SEED}");
        DEFAULT_SEED
    });
    info!(seed, "Run seed");

    let detector = DetectorConstruction::new(config)
        .construct()
        .context("detector construction failed")?;

    if !cli.quiet || cli.copy.is_some() {
        let reports = detector
            .param
            .describe(cli.copy)
            .context("cannot describe voxel")?;
        for report in reports {
            writeln!(stdout, "{report}")?;
            writeln!(stdout)?;
        }
    }

    info!(voxels = detector.voxel_count(), "Geometry ready");
    Ok(())
}
