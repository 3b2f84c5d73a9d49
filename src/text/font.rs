//! Typeface JSON fonts (the facetype.js format): per-glyph advance and a
//! compact outline string of `m`/`l`/`q`/`b` commands in font units.

use glam::Vec2;
use serde::Deserialize;
use std::collections::HashMap;

use super::path::{build_shapes, Segment, Shape, SubPath};
use crate::error::{Result, SceneError};

#[derive(Debug, Clone, Deserialize)]
pub struct Glyph {
    /// Horizontal advance.
    pub ha: f32,
    #[serde(default)]
    pub o: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FontBounds {
    pub x_min: f32,
    pub x_max: f32,
    pub y_min: f32,
    pub y_max: f32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Typeface {
    pub glyphs: HashMap<char, Glyph>,
    #[serde(default)]
    pub family_name: String,
    #[serde(default = "default_resolution")]
    pub resolution: f32,
    #[serde(default)]
    pub bounding_box: FontBounds,
    #[serde(default)]
    pub underline_thickness: f32,
}

fn default_resolution() -> f32 {
    1000.0
}

impl Typeface {
    pub fn from_json(json: &str) -> Result<Self> {
        let face: Typeface = serde_json::from_str(json)?;
        tracing::info!(
            family = %face.family_name,
            glyphs = face.glyphs.len(),
            "typeface parsed"
        );
        Ok(face)
    }

    fn glyph(&self, c: char) -> Result<&Glyph> {
        self.glyphs
            .get(&c)
            .or_else(|| self.glyphs.get(&'?'))
            .ok_or(SceneError::MissingGlyph(c))
    }

    /// Lays `text` out at `size` world units per em and returns each glyph's
    /// outline as sub-paths, already offset into place.
    pub fn layout(&self, text: &str, size: f32) -> Result<Vec<Vec<SubPath>>> {
        let scale = size / self.resolution;
        let line_height =
            (self.bounding_box.y_max - self.bounding_box.y_min + self.underline_thickness) * scale;

        let mut glyph_paths = Vec::new();
        let mut offset = Vec2::ZERO;
        for c in text.chars() {
            if c == '\n' {
                offset.x = 0.0;
                offset.y -= line_height;
                continue;
            }
            let glyph = self.glyph(c)?;
            if let Some(outline) = &glyph.o {
                glyph_paths.push(parse_outline(outline, scale, offset)?);
            }
            offset.x += glyph.ha * scale;
        }
        Ok(glyph_paths)
    }

    /// Outlines grouped into fillable shapes, curves flattened into
    /// `curve_segments` pieces.
    pub fn generate_shapes(&self, text: &str, size: f32, curve_segments: usize) -> Result<Vec<Shape>> {
        Ok(self
            .layout(text, size)?
            .iter()
            .flat_map(|paths| build_shapes(paths, curve_segments))
            .collect())
    }
}

/// Parses an outline string. `q` lists its end point before the control
/// point; `b` lists its end point before both control points.
pub fn parse_outline(outline: &str, scale: f32, offset: Vec2) -> Result<Vec<SubPath>> {
    let mut tokens = outline.split_whitespace();
    let mut paths: Vec<SubPath> = Vec::new();

    let point = |tokens: &mut std::str::SplitWhitespace<'_>, cmd: &str| -> Result<Vec2> {
        let mut coord = || -> Result<f32> {
            tokens
                .next()
                .and_then(|t| t.parse::<f32>().ok())
                .ok_or_else(|| SceneError::Outline(cmd.to_owned()))
        };
        let x = coord()?;
        let y = coord()?;
        Ok(Vec2::new(x, y) * scale + offset)
    };

    while let Some(cmd) = tokens.next() {
        match cmd {
            "m" => {
                let start = point(&mut tokens, cmd)?;
                paths.push(SubPath::new(start));
            }
            "l" | "q" | "b" => {
                let to = point(&mut tokens, cmd)?;
                let segment = match cmd {
                    "l" => Segment::Line(to),
                    "q" => Segment::Quadratic { control: point(&mut tokens, cmd)?, to },
                    _ => {
                        let control1 = point(&mut tokens, cmd)?;
                        let control2 = point(&mut tokens, cmd)?;
                        Segment::Cubic { control1, control2, to }
                    }
                };
                let current = paths
                    .last_mut()
                    .ok_or_else(|| SceneError::Outline(format!("{cmd} before m")))?;
                current.segments.push(segment);
            }
            other => return Err(SceneError::Outline(other.to_owned())),
        }
    }
    Ok(paths)
}
