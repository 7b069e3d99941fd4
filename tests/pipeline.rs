//! End-to-end runs over a realistic floor-plan page.

use std::fs;
use std::path::Path;

use floorflip::pipeline::{self, PipelineConfig};
use floorflip::{
    MirrorConfig, SerializeOptions, extract_svg, find_first_svg, mirror_markup, parse_markup,
    strip_mirror_transforms,
};

fn fixture() -> String {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/plan.html");
    fs::read_to_string(path).unwrap()
}

#[test]
fn test_mirror_plan() {
    let input = fixture();
    let out = mirror_markup(&input, &MirrorConfig::default()).unwrap();

    assert_eq!(out.report.groups_mirrored, 3);
    assert_eq!(out.report.groups_skipped, 1);
    assert_eq!(out.report.labels_mirrored, 2);
    assert_eq!(out.report.skipped_tokens, 0);

    let m = &out.markup;
    assert!(m.contains(r#"<g transform="translate(1480, 100)">"#));
    assert!(m.contains(r#"<g transform="translate(560, 100)">"#));
    assert!(m.contains(r#"<g transform="translate(40, 100)">"#));

    // Multi-line point list keeps its line break and indentation.
    assert!(m.contains(
        "<polygon points=\"910,20 890,40\n                             420,40 420,20\" fill=\"#ddd\" stroke=\"#000\"/>"
    ));
    assert!(m.contains(r##"<line x1="910.0" y1="300" x2="10.0" y2="300" stroke="#000"/>"##));
    assert!(m.contains(r#"<polyline points="920,0 820,0 820,50"/>"#));
    assert!(m.contains(r#"<polygon points="520,0 0,0 0,600 520,600"/>"#));

    // Out-of-scope geometry and the unknown wing are untouched.
    assert!(m.contains(r#"<circle cx="40" cy="40" r="5"/>"#));
    assert!(m.contains(
        "<g transform=\"translate(2420, 10)\">\n            <polygon points=\"1,1 2,2\"/>\n        </g>"
    ));

    assert!(m.contains(r#"<text x="2150" y="200" font-size="24" text-anchor="end">301</text>"#));
    assert!(m.contains(r#"<text x="1250" y="200" font-size="24" text-anchor="end">302</text>"#));
}

#[test]
fn test_page_outside_the_plan_is_byte_identical() {
    let input = fixture();
    let out = mirror_markup(&input, &MirrorConfig::default()).unwrap();

    let head = |s: &str| s[..s.find("<svg").unwrap()].to_string();
    let tail = |s: &str| s[s.find("</svg>").unwrap()..].to_string();
    assert_eq!(head(&out.markup), head(&input));
    assert_eq!(tail(&out.markup), tail(&input));
}

#[test]
fn test_mirroring_twice_restores_geometry() {
    // With the wing table inverted, a second pass maps every wing back.
    let input = fixture();
    let first = mirror_markup(&input, &MirrorConfig::default()).unwrap();
    let back = MirrorConfig {
        table: floorflip::MirrorTable::new([(1480.0, 920.0), (560.0, 920.0), (40.0, 520.0)]),
        ..MirrorConfig::default()
    };
    let second = mirror_markup(&first.markup, &back).unwrap();
    let m = &second.markup;

    assert!(m.contains(r#"<g transform="translate(50, 100)">"#));
    assert!(m.contains(r#"<g transform="translate(970, 100)">"#));
    assert!(m.contains(r#"<g transform="translate(1890, 100)">"#));
    assert!(m.contains("<polygon points=\"10,20 30,40\n                             500,40 500,20\""));
    assert!(m.contains(r#"<polyline points="0,0 100,0 100,50"/>"#));
    assert!(m.contains(r#"<text x="300" y="200" font-size="24" text-anchor="end">301</text>"#));
}

#[test]
fn test_extract_mirrored_svg() {
    let mirrored = mirror_markup(&fixture(), &MirrorConfig::default()).unwrap();
    let svg = extract_svg(&mirrored.markup, &SerializeOptions::default()).unwrap();

    assert!(svg.starts_with(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"2450\" height=\"830\""
    ));
    assert!(svg.ends_with("</svg>\n"));
    assert!(svg.contains("    <rect x=\"0\" y=\"0\" width=\"2450\" height=\"830\" fill=\"#fff\" />\n"));
    assert!(svg.contains("        <circle cx=\"40\" cy=\"40\" r=\"5\" />\n"));
    assert!(svg.contains("    <g id=\"legend\">\n    </g>\n"));
    assert!(svg.contains(
        "        <text x=\"2150\" y=\"200\" font-size=\"24\" text-anchor=\"end\">301</text>\n"
    ));
    assert!(!svg.contains("<h1>"));
    assert!(!svg.contains("main-content"));

    // The standalone file parses back to a single SVG root.
    let doc = parse_markup(&svg).unwrap();
    assert_eq!(doc.child_elements().count(), 1);
    assert!(find_first_svg(&doc).unwrap().is("svg"));
}

#[test]
fn test_strip_extracted_svg() {
    let mirrored = mirror_markup(&fixture(), &MirrorConfig::default()).unwrap();
    let svg = extract_svg(&mirrored.markup, &SerializeOptions::default()).unwrap();
    let clean = strip_mirror_transforms(&svg);

    assert!(!clean.contains("scale(-1, 1)"));
    assert!(!clean.contains("transform-origin"));
    assert!(!clean.contains("transform-box"));
    assert!(clean.contains("font-family: Arial, sans-serif;"));
    assert!(clean.contains(r#"<g transform="translate(1480, 100)">"#));
}

#[test]
fn test_pipeline_writes_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    let config = PipelineConfig {
        input: dir.path().join("full.html"),
        mirrored_output: dir.path().join("mirror.html"),
        svg_output: dir.path().join("mirror.svg"),
        png_output: None,
        ..PipelineConfig::default()
    };
    fs::write(&config.input, fixture()).unwrap();

    let summary = pipeline::run(&config).unwrap();
    assert_eq!(summary.mirror.groups_mirrored, 3);
    assert!(summary.raster.is_none());

    let mirrored = fs::read_to_string(&config.mirrored_output).unwrap();
    assert!(mirrored.contains(r#"translate(1480, 100)"#));

    let svg = fs::read_to_string(&config.svg_output).unwrap();
    assert_eq!(svg.len(), summary.svg_bytes);
    assert!(svg.starts_with("<svg "));
}
