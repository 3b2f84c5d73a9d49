//! Bevelled extrusion of 2D shapes into closed triangle meshes.

use glam::{Vec2, Vec3};
use std::f32::consts::FRAC_PI_2;

use super::path::{signed_area, Shape};
use super::triangulate::triangulate;
use crate::geometry::Geometry;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtrudeOptions {
    pub depth: f32,
    pub curve_segments: usize,
    pub bevel_enabled: bool,
    pub bevel_thickness: f32,
    pub bevel_size: f32,
    pub bevel_offset: f32,
    pub bevel_segments: usize,
}

impl ExtrudeOptions {
    /// Proportions used for the glitch text at a given glyph size.
    pub fn for_text_size(size: f32) -> Self {
        Self {
            depth: size * 0.2,
            curve_segments: 12,
            bevel_enabled: true,
            bevel_thickness: size * 0.03,
            bevel_size: size * 0.02,
            bevel_offset: 0.0,
            bevel_segments: 5,
        }
    }
}

/// Outward offset direction per vertex, scaled so that moving every vertex
/// by `d` along it pushes each edge out by `d`. Expects solids
/// counter-clockwise and holes clockwise.
fn bevel_directions(ring: &[Vec2]) -> Vec<Vec2> {
    let n = ring.len();
    (0..n)
        .map(|i| {
            let prev = ring[(i + n - 1) % n];
            let cur = ring[i];
            let next = ring[(i + 1) % n];
            let n1 = right_normal(cur - prev);
            let n2 = right_normal(next - cur);
            let sum = n1 + n2;
            if sum.length_squared() <= 1e-12 {
                return n1;
            }
            let dir = sum.normalize();
            // clamp the miter so hairpin turns do not spike out
            dir / dir.dot(n1).max(0.5)
        })
        .collect()
}

fn right_normal(edge: Vec2) -> Vec2 {
    Vec2::new(edge.y, -edge.x).normalize_or_zero()
}

/// Extrudes every shape along +z and appends the triangles to one geometry.
pub fn extrude(shapes: &[Shape], options: &ExtrudeOptions) -> Geometry {
    let mut geometry = Geometry::default();
    for shape in shapes {
        extrude_shape(shape, options, &mut geometry);
    }
    geometry
}

fn extrude_shape(shape: &Shape, options: &ExtrudeOptions, out: &mut Geometry) {
    if shape.contour.len() < 3 {
        return;
    }

    let mut contour = shape.contour.clone();
    if signed_area(&contour) < 0.0 {
        contour.reverse();
    }
    let holes: Vec<Vec<Vec2>> = shape
        .holes
        .iter()
        .filter(|h| h.len() >= 3)
        .map(|h| {
            let mut h = h.clone();
            if signed_area(&h) > 0.0 {
                h.reverse();
            }
            h
        })
        .collect();

    let faces = triangulate(&contour, &holes);

    // every ring laid end to end, the same order `triangulate` indexes
    let rings: Vec<&[Vec2]> = std::iter::once(contour.as_slice())
        .chain(holes.iter().map(Vec::as_slice))
        .collect();
    let flat: Vec<Vec2> = rings.iter().flat_map(|r| r.iter().copied()).collect();
    let directions: Vec<Vec2> = rings.iter().flat_map(|r| bevel_directions(r)).collect();

    let layer = |inset: f32, z: f32| -> Vec<Vec3> {
        flat.iter()
            .zip(&directions)
            .map(|(p, d)| (*p + *d * inset).extend(z))
            .collect()
    };

    // layers ordered by increasing z
    let mut layers: Vec<Vec<Vec3>> = Vec::new();
    let segments = if options.bevel_enabled { options.bevel_segments } else { 0 };
    for b in 0..segments {
        let t = b as f32 / segments as f32;
        let z = options.bevel_thickness * (t * FRAC_PI_2).cos();
        let inset = options.bevel_size * (t * FRAC_PI_2).sin() + options.bevel_offset;
        layers.push(layer(inset, -z));
    }
    let body_inset = if options.bevel_enabled {
        options.bevel_size + options.bevel_offset
    } else {
        0.0
    };
    layers.push(layer(body_inset, 0.0));
    layers.push(layer(body_inset, options.depth));
    for b in (0..segments).rev() {
        let t = b as f32 / segments as f32;
        let z = options.bevel_thickness * (t * FRAC_PI_2).cos();
        let inset = options.bevel_size * (t * FRAC_PI_2).sin() + options.bevel_offset;
        layers.push(layer(inset, options.depth + z));
    }

    let (front, back) = (&layers[0], &layers[layers.len() - 1]);
    for &[a, b, c] in &faces {
        out.push_triangle(front[c], front[b], front[a]);
        out.push_triangle(back[a], back[b], back[c]);
    }

    let mut start = 0;
    for ring in &rings {
        let len = ring.len();
        for pair in layers.windows(2) {
            let (lower, upper) = (&pair[0], &pair[1]);
            for j in 0..len {
                let a = start + j;
                let b = start + (j + 1) % len;
                out.push_triangle(lower[a], lower[b], upper[a]);
                out.push_triangle(lower[b], upper[b], upper[a]);
            }
        }
        start += len;
    }
}
