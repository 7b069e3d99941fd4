//! Removing the whole-canvas flip from a serialized SVG.
//!
//! Plain text surgery on known spellings. Anything formatted differently is
//! left in place.

/// The root-level horizontal flip.
pub const MIRROR_TRANSFORM: &str = r#"transform="scale(-1, 1)""#;

/// Companion style on the root that pins the flip to the center.
pub const MIRROR_ORIGIN_STYLE: &str = r#"style="transform-origin: center;""#;

/// Stylesheet lines that counter-flip text.
pub const TEXT_COUNTER_TRANSFORMS: &[&str] = &[
    "transform: scale(-1, 1);",
    "transform-box: fill-box;",
    "transform-origin: center;",
];

/// Whether the SVG carries the whole-canvas flip.
pub fn has_mirror_transform(svg: &str) -> bool {
    svg.contains(MIRROR_TRANSFORM)
}

/// Drop the flip attribute, its origin style and every stylesheet line whose
/// trimmed content is one of the counter-transform declarations.
pub fn strip_mirror_transforms(svg: &str) -> String {
    let svg = svg.replace(MIRROR_TRANSFORM, "").replace(MIRROR_ORIGIN_STYLE, "");

    svg.split('\n')
        .filter(|line| !TEXT_COUNTER_TRANSFORMS.contains(&line.trim()))
        .collect::<Vec<_>>()
        .join("\n")
}
