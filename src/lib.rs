//! floorflip - mirror floor-plan SVGs embedded in HTML
//!
//! floorflip flips each wing of a floor plan inside its own width, moves the
//! wing to the opposite side of the canvas, then pulls the SVG out of the page
//! as a standalone file and rasterizes it.

mod ast;
mod config;
mod error;
mod extract;
mod mirror;
mod parse;
pub mod pipeline;
mod points;
mod raster;
mod serialize;
mod strip;

pub use ast::*;
pub use config::*;
pub use error::*;
pub use extract::*;
pub use mirror::*;
pub use parse::*;
pub use points::{Rewrite, Translate, mirror_points};
pub use raster::*;
pub use serialize::*;
pub use strip::*;
