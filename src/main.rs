use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use stereoatlas::config::load_config;
use stereoatlas::trajectories::{example_markers, run};
use stereoatlas::visualization::WindowViewer;

/// Plot stereotaxic injection trajectories in the Allen mouse brain atlas
#[derive(Parser, Debug)]
#[command(name = "plot-trajectories", version, author, long_about = None)]
struct Args {
    /// Configuration file (default: ./stereoatlas.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory holding installed BrainGlobe atlases
    #[arg(long)]
    atlas_dir: Option<PathBuf>,

    /// Camera zoom factor; values above 1 magnify
    #[arg(long)]
    zoom: Option<f32>,

    /// Print the converted markers without opening a window
    #[arg(long, default_value_t = false)]
    dry_run: bool,

    /// Enable verbose logging
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .init();

    let mut config = load_config(args.config.as_deref()).context("Failed to load configuration")?;
    if let Some(dir) = args.atlas_dir {
        config.brainglobe_dir = Some(dir);
    }
    if let Some(zoom) = args.zoom {
        config.zoom = zoom;
    }
    config.validate().context("Invalid command line options")?;

    if args.dry_run {
        for trajectory in example_markers(config.rotation_radians) {
            let m = &trajectory.marker;
            println!(
                "{:<14} {} -> {}  {} r={}",
                trajectory.label, m.start, m.end, m.color, m.radius
            );
        }
        return Ok(());
    }

    let mut viewer = WindowViewer::new(
        config.window.title.clone(),
        config.window.width,
        config.window.height,
    );
    let scene = run(&config, &mut viewer).with_context(|| {
        format!(
            "Failed to plot trajectories in atlas '{}' under {}",
            config.atlas_name,
            config.brainglobe_dir().display()
        )
    })?;

    info!(actors = scene.actors().len(), "done");
    Ok(())
}
