//! Geometry mirror passes.
//!
//! Each wing of the plan is a `<g transform="translate(ox, oy)">` drawn in its
//! own local coordinates. Mirroring a wing flips its geometry inside the
//! wing's width and moves the wing to the opposite side of the canvas. Room
//! labels live in canvas coordinates and are flipped across the whole canvas.
//!
//! Only `points`, line `x1`/`x2`, the wing offset and label `x` are touched.
//! Circles, paths, rects and everything else keep their coordinates.

use tracing::debug;

use crate::ast::*;
use crate::config::MirrorConfig;
use crate::error::FloorflipError;
use crate::parse::parse_markup;
use crate::points::{Translate, format_fixed, mirror_points, parse_coord};
use crate::serialize::write_markup;

/// What a mirror pass did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MirrorReport {
    /// Wings found in the table and flipped
    pub groups_mirrored: usize,
    /// Translate groups whose offset is not in the table
    pub groups_skipped: usize,
    /// Room labels flipped across the canvas
    pub labels_mirrored: usize,
    /// Coordinates left as-is because they did not parse
    pub skipped_tokens: usize,
}

/// Mirrored markup plus the pass statistics.
#[derive(Debug, Clone)]
pub struct Mirrored {
    pub markup: String,
    pub report: MirrorReport,
}

/// Mirror a whole HTML/SVG document given as text.
///
/// Markup outside the rewritten elements comes back byte for byte.
pub fn mirror_markup(text: &str, config: &MirrorConfig) -> Result<Mirrored, FloorflipError> {
    let mut doc = parse_markup(text)?;
    let report = mirror_document(&mut doc, config);
    Ok(Mirrored {
        markup: write_markup(&doc),
        report,
    })
}

/// Apply the wing and room-label mirrors to a parsed document.
pub fn mirror_document(doc: &mut Document, config: &MirrorConfig) -> MirrorReport {
    let mut report = MirrorReport::default();

    for elem in doc.child_elements_mut() {
        mirror_groups(elem, config, &mut report);
    }

    for elem in doc.child_elements_mut() {
        mirror_room_labels(elem, config, &mut report);
    }

    report
}

/// Find the outermost translate groups below `elem` and mirror the ones the
/// table knows. Unknown groups are left alone entirely, children included.
fn mirror_groups(elem: &mut Element, config: &MirrorConfig, report: &mut MirrorReport) {
    if let Some(translate) = group_translate(elem) {
        match config.table.width_for(translate.x) {
            Some(width) => mirror_wing(elem, translate, width, config.canvas_width, report),
            None => {
                debug!(offset = translate.x, "no width for group offset, leaving it unchanged");
                report.groups_skipped += 1;
            }
        }
        return;
    }

    for child in elem.child_elements_mut() {
        mirror_groups(child, config, report);
    }
}

fn group_translate(elem: &Element) -> Option<Translate> {
    if !elem.is("g") {
        return None;
    }
    Translate::parse(elem.get_attr("transform")?)
}

fn mirror_wing(
    group: &mut Element,
    translate: Translate,
    width: f64,
    canvas_width: f64,
    report: &mut MirrorReport,
) {
    for child in group.child_elements_mut() {
        child.for_each_element_mut(&mut |e: &mut Element| mirror_geometry(e, width, report));
    }

    let moved = Translate {
        x: canvas_width - translate.x - width,
        y: translate.y,
    };
    debug!(
        offset = translate.x,
        width,
        new_offset = moved.x,
        "mirrored group"
    );
    group.set_attr("transform", moved.to_attr());
    report.groups_mirrored += 1;
}

/// Flip one geometry node inside a wing of `width`.
fn mirror_geometry(elem: &mut Element, width: f64, report: &mut MirrorReport) {
    if elem.is("polygon") || elem.is("polyline") {
        if let Some(points) = elem.get_attr("points") {
            let rewrite = mirror_points(points, width);
            if rewrite.skipped > 0 {
                debug!(skipped = rewrite.skipped, "unparseable point tokens left as-is");
            }
            report.skipped_tokens += rewrite.skipped;
            elem.set_attr("points", rewrite.value);
        }
    } else if elem.is("line") {
        for name in ["x1", "x2"] {
            let Some(value) = elem.get_attr(name) else {
                continue;
            };
            match parse_coord(value) {
                Some(x) => elem.set_attr(name, format_fixed(width - x, 1)),
                None => {
                    debug!(attr = name, value, "unparseable line endpoint left as-is");
                    report.skipped_tokens += 1;
                }
            }
        }
    }
}

fn mirror_room_labels(elem: &mut Element, config: &MirrorConfig, report: &mut MirrorReport) {
    if elem.is("g") && elem.get_attr("id") == Some(config.label_container_id.as_str()) {
        let canvas_width = config.canvas_width;
        elem.for_each_element_mut(&mut |e: &mut Element| {
            if e.is("text") {
                mirror_label(e, canvas_width, report);
            }
        });
        return;
    }

    for child in elem.child_elements_mut() {
        mirror_room_labels(child, config, report);
    }
}

fn mirror_label(text: &mut Element, canvas_width: f64, report: &mut MirrorReport) {
    let Some(value) = text.get_attr("x") else {
        return;
    };
    match parse_coord(value) {
        Some(x) => {
            text.set_attr("x", format_fixed(canvas_width - x, 0));
            text.set_attr("text-anchor", "end");
            report.labels_mirrored += 1;
        }
        None => {
            debug!(value, "unparseable label x left as-is");
            report.skipped_tokens += 1;
        }
    }
}
