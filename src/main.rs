use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use polarkit::{
    init_logging, shared, OrbitCamera, PolarAxesActor, PolarAxesConfig, RecordingViewport,
    Renderable, BUILD_DATE,
};
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ViewPreset {
    /// Straight down the Z axis
    Top,
    /// Classic isometric view
    Iso,
}

#[derive(Parser, Debug)]
#[command(name = "polarkit")]
#[command(author, version, about = "Render a polar axes frame to SVG")]
#[command(long_version = concat!(env!("CARGO_PKG_VERSION"), " (built ", env!("BUILD_DATE"), ")"))]
struct Args {
    /// Config file path (TOML or JSON); defaults to the user config if present
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Image width in pixels
    #[arg(long, default_value = "800")]
    width: u32,

    /// Image height in pixels
    #[arg(long, default_value = "600")]
    height: u32,

    /// Output SVG path; stdout when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Camera preset
    #[arg(long, value_enum, default_value = "iso")]
    view: ViewPreset,

    /// Background fill, any SVG color
    #[arg(long)]
    background: Option<String>,

    /// Use a parallel projection instead of perspective
    #[arg(long)]
    parallel: bool,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    dump_config: bool,
}

fn load_config(path: Option<&PathBuf>) -> Result<PolarAxesConfig> {
    if let Some(path) = path {
        return PolarAxesConfig::load_from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()));
    }

    match PolarAxesConfig::default_path() {
        Ok(path) if path.exists() => PolarAxesConfig::load_from_file(&path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        Ok(_) => Ok(PolarAxesConfig::default()),
        Err(e) => {
            warn!("No user config directory ({}), using defaults", e);
            Ok(PolarAxesConfig::default())
        }
    }
}

fn main() -> Result<()> {
    init_logging()?;

    let args = Args::parse();
    let config = load_config(args.config.as_ref())?;

    if args.dump_config {
        print!("{}", config.to_toml().context("Failed to serialize config")?);
        return Ok(());
    }

    info!("polarkit {} (built {})", polarkit::VERSION, BUILD_DATE);

    let mut actor = PolarAxesActor::from_config(config);

    let mut camera = OrbitCamera::default();
    match args.view {
        ViewPreset::Top => camera.set_top_view(),
        ViewPreset::Iso => camera.set_isometric(),
    }
    camera.parallel = args.parallel;
    camera.fit_to_bounds(&actor.bounds());
    actor.set_camera(shared(camera));

    let mut viewport = RecordingViewport::new(args.width, args.height);
    let report = actor.render_opaque_geometry(&mut viewport);
    if report.rendered {
        info!(
            "Rendered {} draw calls at {}x{}",
            report.draw_calls, args.width, args.height
        );
    } else {
        warn!("Nothing to draw, writing an empty image");
    }

    let svg = viewport.to_svg(args.background.as_deref());
    match &args.output {
        Some(path) => {
            std::fs::write(path, svg)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Wrote {}", path.display());
        }
        None => print!("{}", svg),
    }

    actor.release_graphics_resources();
    Ok(())
}
