use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FloorflipError {
    #[error("cannot access {}: {source}", .path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("XML parsing error: {0}")]
    Parse(#[from] quick_xml::Error),

    #[error("Invalid markup: {0}")]
    InvalidMarkup(String),

    #[error("no <{0}> element found in document")]
    MissingElement(&'static str),

    #[error("external rasterizer failed: {0}")]
    Subprocess(String),

    #[error("rasterization failed: {0}")]
    Raster(String),

    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::str::Utf8Error),
}

impl FloorflipError {
    pub(crate) fn file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileAccess {
            path: path.into(),
            source,
        }
    }
}
