use fireworks_wasm::error::SceneError;
use fireworks_wasm::text::build_text_geometry;
use fireworks_wasm::text::extrude::ExtrudeOptions;
use fireworks_wasm::text::font::Typeface;

// Squares stand in for letters: "O" has a counter, "I" is a bar, "?" is the
// fallback glyph. Solids are clockwise, as in TrueType outlines.
const FONT: &str = r#"{
    "familyName": "Blocks",
    "resolution": 1000,
    "boundingBox": { "xMin": 0, "xMax": 700, "yMin": -200, "yMax": 800 },
    "underlineThickness": 50,
    "glyphs": {
        "O": { "ha": 700, "o": "m 0 0 l 0 600 l 600 600 l 600 0 l 0 0 m 150 150 l 450 150 l 450 450 l 150 450 l 150 150" },
        "I": { "ha": 300, "o": "m 0 0 l 0 700 l 200 700 l 200 0 l 0 0" },
        "?": { "ha": 200, "o": "m 0 0 l 0 100 l 100 100 l 100 0" },
        " ": { "ha": 250 }
    }
}"#;

fn face() -> Typeface {
    Typeface::from_json(FONT).unwrap()
}

#[test]
fn counter_becomes_a_hole() {
    let shapes = face().generate_shapes("O", 1.0, 12).unwrap();
    assert_eq!(shapes.len(), 1);
    assert_eq!(shapes[0].contour.len(), 4);
    assert_eq!(shapes[0].holes.len(), 1);
}

#[test]
fn unknown_characters_use_the_fallback_glyph() {
    let shapes = face().generate_shapes("Z", 1.0, 12).unwrap();
    assert_eq!(shapes.len(), 1);
    let max_x = shapes[0].contour.iter().map(|p| p.x).fold(f32::MIN, f32::max);
    assert!((max_x - 0.1).abs() < 1e-6);
}

#[test]
fn missing_fallback_is_an_error() {
    let json = FONT.replace(r#""?": { "ha": 200, "o": "m 0 0 l 0 100 l 100 100 l 100 0" },"#, "");
    let face = Typeface::from_json(&json).unwrap();
    assert!(matches!(
        face.generate_shapes("Z", 1.0, 12),
        Err(SceneError::MissingGlyph('Z'))
    ));
}

#[test]
fn advance_and_newline_place_glyphs() {
    let face = face();

    let row = face.generate_shapes("I I", 1.0, 12).unwrap();
    assert_eq!(row.len(), 2);
    let second_min_x = row[1].contour.iter().map(|p| p.x).fold(f32::MAX, f32::min);
    assert!((second_min_x - 0.55).abs() < 1e-6);

    let column = face.generate_shapes("I\nI", 1.0, 12).unwrap();
    assert_eq!(column.len(), 2);
    let second_min_y = column[1].contour.iter().map(|p| p.y).fold(f32::MAX, f32::min);
    // (800 + 200 + 50) / 1000
    assert!((second_min_y + 1.05).abs() < 1e-6);
    let second_min_x = column[1].contour.iter().map(|p| p.x).fold(f32::MAX, f32::min);
    assert!(second_min_x.abs() < 1e-6);
}

#[test]
fn text_mesh_is_centred_with_bevelled_depth() {
    let size = 2.2;
    let geometry = build_text_geometry(&face(), "OI", size).unwrap();
    assert!(!geometry.is_empty());
    assert_eq!(geometry.positions.len(), geometry.normals.len());

    let bounds = geometry.bounding_box().unwrap();
    assert!(bounds.center().length() < 1e-4);

    let options = ExtrudeOptions::for_text_size(size);
    let depth = options.depth + 2.0 * options.bevel_thickness;
    assert!((bounds.size().z - depth).abs() < 1e-4);
}

#[test]
fn single_bar_width_includes_the_bevel() {
    let geometry = build_text_geometry(&face(), "I", 1.0).unwrap();
    let bounds = geometry.bounding_box().unwrap();
    let options = ExtrudeOptions::for_text_size(1.0);
    assert!((bounds.size().x - (0.2 + 2.0 * options.bevel_size)).abs() < 1e-4);
    assert!((bounds.size().y - (0.7 + 2.0 * options.bevel_size)).abs() < 1e-4);
}

#[test]
fn blank_text_gives_an_empty_mesh() {
    let geometry = build_text_geometry(&face(), "", 2.2).unwrap();
    assert!(geometry.is_empty());
    assert!(geometry.bounding_box().is_none());
}

#[test]
fn malformed_outline_is_rejected() {
    let json = FONT.replace("m 0 0 l 0 700", "m 0 0 x 0 700");
    let face = Typeface::from_json(&json).unwrap();
    assert!(matches!(
        face.generate_shapes("I", 1.0, 12),
        Err(SceneError::Outline(_))
    ));
}
