//! Glitch text: turns the text field's contents into an extruded, centred
//! mesh.

pub mod extrude;
pub mod font;
pub mod path;
pub mod triangulate;

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::Result;
use crate::geometry::Geometry;
use extrude::{extrude, ExtrudeOptions};
use font::Typeface;

pub const DEFAULT_TEXT: &str = "AASoft";

/// Text size slider range.
pub const SIZE_RANGE: crate::sky::ParameterRange = crate::sky::ParameterRange::new(2.0, 10.0, 0.1);

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextParams {
    pub color: Color,
    pub size: f32,
}

impl Default for TextParams {
    fn default() -> Self {
        Self {
            color: Color::from_hex(0x00ff00),
            size: 2.2,
        }
    }
}

/// Capitalises each space-separated word and collapses runs of spaces.
pub fn normalize_input(raw: &str) -> String {
    raw.split(' ')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Text shown after a size change: the field's raw value as typed, or
/// `fallback` when the field is empty.
pub fn text_for_resize(raw: &str, fallback: &str) -> String {
    if raw.is_empty() {
        fallback.to_owned()
    } else {
        raw.to_owned()
    }
}

pub fn build_text_geometry(face: &Typeface, text: &str, size: f32) -> Result<Geometry> {
    let options = ExtrudeOptions::for_text_size(size);
    let shapes = face.generate_shapes(text, size, options.curve_segments)?;
    let mut geometry = extrude(&shapes, &options);
    geometry.center();
    tracing::debug!(
        text,
        size,
        shapes = shapes.len(),
        vertices = geometry.vertex_count(),
        "text geometry rebuilt"
    );
    Ok(geometry)
}
