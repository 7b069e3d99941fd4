use std::path::PathBuf;

use clap::Parser;
use floorflip::pipeline::{self, PipelineConfig};
use floorflip::{RasterBackend, RasterOptions};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "floorflip")]
#[command(about = "Mirror a floor plan embedded in HTML and export it as SVG/PNG", long_about = None)]
struct Cli {
    /// Input HTML document
    #[arg(default_value = "full.html")]
    input: PathBuf,

    /// Where to write the mirrored HTML
    #[arg(long, default_value = "mirror.html")]
    mirrored: PathBuf,

    /// Where to write the extracted SVG
    #[arg(long, default_value = "mirror.svg")]
    svg: PathBuf,

    /// Where to write the PNG
    #[arg(long, default_value = "mirror.png")]
    png: PathBuf,

    /// PNG width in pixels
    #[arg(short, long, default_value = "2450")]
    width: u32,

    /// Stop after writing the SVG
    #[arg(long)]
    no_png: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let config = PipelineConfig {
        input: cli.input,
        mirrored_output: cli.mirrored,
        svg_output: cli.svg,
        png_output: (!cli.no_png).then_some(cli.png),
        raster: RasterOptions {
            width: cli.width,
            ..RasterOptions::default()
        },
        ..PipelineConfig::default()
    };

    let summary = pipeline::run(&config)?;

    eprintln!(
        "mirrored {} group(s) and {} room label(s), left {} group(s) unchanged",
        summary.mirror.groups_mirrored, summary.mirror.labels_mirrored, summary.mirror.groups_skipped
    );
    if summary.mirror.skipped_tokens > 0 {
        eprintln!(
            "{} coordinate(s) could not be parsed and were kept as-is",
            summary.mirror.skipped_tokens
        );
    }
    eprintln!("{} -> {}", config.input.display(), config.svg_output.display());
    if let (Some(png), Some(backend)) = (&config.png_output, summary.raster) {
        let how = match backend {
            RasterBackend::External => config.raster.program.as_str(),
            RasterBackend::Fallback => "built-in renderer (text needs system fonts)",
        };
        eprintln!("{} -> {} via {}", config.svg_output.display(), png.display(), how);
    }

    Ok(())
}
