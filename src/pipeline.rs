//! The mirror → extract → rasterize run.
//!
//! Stages run in order and the first failure stops the run. Files written by
//! earlier stages stay on disk.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::MirrorConfig;
use crate::error::FloorflipError;
use crate::extract::extract_svg;
use crate::mirror::{MirrorReport, mirror_markup};
use crate::raster::{RasterBackend, RasterOptions, rasterize};
use crate::serialize::SerializeOptions;

/// Input and output locations plus per-stage settings.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub input: PathBuf,
    pub mirrored_output: PathBuf,
    pub svg_output: PathBuf,
    /// `None` skips rasterization
    pub png_output: Option<PathBuf>,
    pub mirror: MirrorConfig,
    pub serialize: SerializeOptions,
    pub raster: RasterOptions,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("full.html"),
            mirrored_output: PathBuf::from("mirror.html"),
            svg_output: PathBuf::from("mirror.svg"),
            png_output: Some(PathBuf::from("mirror.png")),
            mirror: MirrorConfig::default(),
            serialize: SerializeOptions::default(),
            raster: RasterOptions::default(),
        }
    }
}

/// What a successful run produced.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub mirror: MirrorReport,
    pub svg_bytes: usize,
    pub raster: Option<RasterBackend>,
}

/// Run every stage against the configured files.
pub fn run(config: &PipelineConfig) -> Result<RunSummary, FloorflipError> {
    let input = read(&config.input)?;
    let mirrored = mirror_markup(&input, &config.mirror)?;
    write(&config.mirrored_output, &mirrored.markup)?;
    info!(
        path = %config.mirrored_output.display(),
        groups = mirrored.report.groups_mirrored,
        skipped_groups = mirrored.report.groups_skipped,
        labels = mirrored.report.labels_mirrored,
        "wrote mirrored markup"
    );

    // The extracted SVG comes from a fresh parse of the file just written.
    let markup = read(&config.mirrored_output)?;
    let svg = extract_svg(&markup, &config.serialize)?;
    write(&config.svg_output, &svg)?;
    info!(path = %config.svg_output.display(), bytes = svg.len(), "wrote SVG");

    let raster = match &config.png_output {
        Some(png) => Some(rasterize(&svg, png, &config.raster)?),
        None => None,
    };

    Ok(RunSummary {
        mirror: mirrored.report,
        svg_bytes: svg.len(),
        raster,
    })
}

fn read(path: &Path) -> Result<String, FloorflipError> {
    fs::read_to_string(path).map_err(|e| FloorflipError::file(path, e))
}

fn write(path: &Path, contents: &str) -> Result<(), FloorflipError> {
    fs::write(path, contents).map_err(|e| FloorflipError::file(path, e))
}
