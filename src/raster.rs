//! PNG output.
//!
//! `rsvg-convert` is preferred since it renders text properly. When it is
//! missing or fails, the SVG is rendered in-process with resvg instead.

use std::io::Write;
use std::path::Path;
use std::process::Command;

use tracing::{info, warn};

use crate::error::FloorflipError;
use crate::strip::{has_mirror_transform, strip_mirror_transforms};

/// Raster output settings.
#[derive(Debug, Clone)]
pub struct RasterOptions {
    /// Output width in pixels; height follows the aspect ratio
    pub width: u32,
    /// External rasterizer executable
    pub program: String,
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self {
            width: 2450,
            program: "rsvg-convert".to_string(),
        }
    }
}

/// Which rasterizer produced the PNG.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RasterBackend {
    External,
    Fallback,
}

/// Render `svg` to a PNG at `png_path` on a white background.
///
/// Mirror transforms are stripped first. An external rasterizer failure is
/// not fatal: the in-process renderer takes over and flips the bitmap if the
/// SVG carried the whole-canvas flip.
pub fn rasterize(
    svg: &str,
    png_path: &Path,
    options: &RasterOptions,
) -> Result<RasterBackend, FloorflipError> {
    let clean = strip_mirror_transforms(svg);

    match run_external(&clean, png_path, options) {
        Ok(()) => {
            info!(path = %png_path.display(), program = %options.program, "wrote PNG");
            Ok(RasterBackend::External)
        }
        Err(err @ FloorflipError::Subprocess(_)) => {
            warn!(error = %err, "falling back to the built-in rasterizer");
            render_fallback(&clean, has_mirror_transform(svg), png_path, options)?;
            info!(path = %png_path.display(), "wrote PNG with the built-in rasterizer");
            Ok(RasterBackend::Fallback)
        }
        Err(err) => Err(err),
    }
}

fn run_external(svg: &str, png_path: &Path, options: &RasterOptions) -> Result<(), FloorflipError> {
    let mut tmp = tempfile::Builder::new()
        .prefix("floorflip-")
        .suffix(".svg")
        .tempfile()
        .map_err(|e| FloorflipError::file(std::env::temp_dir(), e))?;
    tmp.write_all(svg.as_bytes())
        .and_then(|()| tmp.flush())
        .map_err(|e| FloorflipError::file(tmp.path(), e))?;

    let output = Command::new(&options.program)
        .arg("-w")
        .arg(options.width.to_string())
        .args(["-b", "white", "--keep-aspect-ratio", "-o"])
        .arg(png_path)
        .arg(tmp.path())
        .output()
        .map_err(|e| FloorflipError::Subprocess(format!("cannot run {}: {}", options.program, e)))?;

    if !output.status.success() {
        let mut detail = String::from_utf8_lossy(&output.stderr).trim().to_string();
        if detail.is_empty() {
            detail = String::from_utf8_lossy(&output.stdout).trim().to_string();
        }
        return Err(FloorflipError::Subprocess(format!(
            "{} exited with {}: {}",
            options.program, output.status, detail
        )));
    }

    Ok(())
}

#[cfg(feature = "png")]
fn render_fallback(
    svg: &str,
    flip: bool,
    png_path: &Path,
    options: &RasterOptions,
) -> Result<(), FloorflipError> {
    use resvg::tiny_skia;

    let mut opt = usvg::Options::default();
    // Without system fonts text is silently skipped.
    opt.fontdb_mut().load_system_fonts();

    let tree = usvg::Tree::from_str(svg, &opt)
        .map_err(|e| FloorflipError::Raster(format!("cannot parse SVG: {}", e)))?;

    let size = tree.size();
    let width = options.width.max(1);
    let scale = width as f32 / size.width();
    let height = (size.height() * scale).ceil().max(1.0) as u32;

    let mut pixmap = tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| FloorflipError::Raster(format!("cannot allocate {}x{} pixmap", width, height)))?;
    pixmap.fill(tiny_skia::Color::WHITE);

    let mut transform = tiny_skia::Transform::from_scale(scale, scale);
    if flip {
        transform = transform.post_concat(tiny_skia::Transform::from_row(
            -1.0,
            0.0,
            0.0,
            1.0,
            width as f32,
            0.0,
        ));
    }

    resvg::render(&tree, transform, &mut pixmap.as_mut());

    pixmap
        .save_png(png_path)
        .map_err(|e| FloorflipError::Raster(format!("cannot write {}: {}", png_path.display(), e)))
}

#[cfg(not(feature = "png"))]
fn render_fallback(
    _svg: &str,
    _flip: bool,
    _png_path: &Path,
    options: &RasterOptions,
) -> Result<(), FloorflipError> {
    Err(FloorflipError::Raster(format!(
        "{} is unavailable and floorflip was built without the png feature",
        options.program
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="200" height="100" viewBox="0 0 200 100" transform="scale(-1, 1)">
    <rect x="0" y="0" width="50" height="100" fill="#000" />
</svg>
"##;

    fn missing_program() -> RasterOptions {
        RasterOptions {
            width: 40,
            program: "floorflip-no-such-rasterizer".to_string(),
        }
    }

    #[test]
    fn test_missing_program_is_subprocess_failure() {
        let dir = tempfile::tempdir().unwrap();
        let err = run_external(SVG, &dir.path().join("out.png"), &missing_program()).unwrap_err();
        assert!(matches!(err, FloorflipError::Subprocess(_)));
    }

    #[cfg(unix)]
    #[test]
    fn test_nonzero_exit_is_subprocess_failure() {
        let dir = tempfile::tempdir().unwrap();
        let options = RasterOptions {
            program: "false".to_string(),
            ..RasterOptions::default()
        };
        let err = run_external(SVG, &dir.path().join("out.png"), &options).unwrap_err();
        assert!(matches!(err, FloorflipError::Subprocess(_)));
    }

    #[cfg(feature = "png")]
    #[test]
    fn test_fallback_renders_png() {
        let dir = tempfile::tempdir().unwrap();
        let png = dir.path().join("out.png");

        let backend = rasterize(SVG, &png, &missing_program()).unwrap();
        assert_eq!(backend, RasterBackend::Fallback);

        let bytes = std::fs::read(&png).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
        let width = u32::from_be_bytes(bytes[16..20].try_into().unwrap());
        let height = u32::from_be_bytes(bytes[20..24].try_into().unwrap());
        assert_eq!((width, height), (40, 20));
    }
}
