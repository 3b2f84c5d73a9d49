//! 2D outlines: curve flattening and solid/hole classification.

use glam::Vec2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Segment {
    Line(Vec2),
    Quadratic { control: Vec2, to: Vec2 },
    Cubic { control1: Vec2, control2: Vec2, to: Vec2 },
}

/// One closed sub-path of a glyph outline.
#[derive(Debug, Clone, PartialEq)]
pub struct SubPath {
    pub start: Vec2,
    pub segments: Vec<Segment>,
}

impl SubPath {
    pub fn new(start: Vec2) -> Self {
        Self { start, segments: Vec::new() }
    }

    /// Flattens into a closed polyline without the repeated closing point.
    /// Straight segments contribute their end point only; curves are split
    /// into `divisions` pieces.
    pub fn flatten(&self, divisions: usize) -> Vec<Vec2> {
        let divisions = divisions.max(1);
        let mut points = vec![self.start];
        let mut current = self.start;

        let push = |points: &mut Vec<Vec2>, p: Vec2| {
            if points.last().is_none_or(|last| last.distance_squared(p) > f32::EPSILON) {
                points.push(p);
            }
        };

        for segment in &self.segments {
            match *segment {
                Segment::Line(to) => {
                    push(&mut points, to);
                    current = to;
                }
                Segment::Quadratic { control, to } => {
                    for i in 1..=divisions {
                        let t = i as f32 / divisions as f32;
                        push(&mut points, quadratic(current, control, to, t));
                    }
                    current = to;
                }
                Segment::Cubic { control1, control2, to } => {
                    for i in 1..=divisions {
                        let t = i as f32 / divisions as f32;
                        push(&mut points, cubic(current, control1, control2, to, t));
                    }
                    current = to;
                }
            }
        }

        while points.len() > 1 && points[0].distance_squared(points[points.len() - 1]) <= f32::EPSILON {
            points.pop();
        }
        points
    }
}

fn quadratic(p0: Vec2, p1: Vec2, p2: Vec2, t: f32) -> Vec2 {
    let k = 1.0 - t;
    p0 * (k * k) + p1 * (2.0 * k * t) + p2 * (t * t)
}

fn cubic(p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2, t: f32) -> Vec2 {
    let k = 1.0 - t;
    p0 * (k * k * k) + p1 * (3.0 * k * k * t) + p2 * (3.0 * k * t * t) + p3 * (t * t * t)
}

/// Signed area; positive for counter-clockwise in a y-up frame.
pub fn signed_area(contour: &[Vec2]) -> f32 {
    let n = contour.len();
    if n < 3 {
        return 0.0;
    }
    let mut a = 0.0;
    for i in 0..n {
        let p = contour[(i + n - 1) % n];
        let q = contour[i];
        a += p.x * q.y - q.x * p.y;
    }
    a * 0.5
}

pub fn is_clockwise(contour: &[Vec2]) -> bool {
    signed_area(contour) < 0.0
}

/// Even-odd point-in-polygon test.
pub fn contains_point(polygon: &[Vec2], p: Vec2) -> bool {
    let n = polygon.len();
    let mut inside = false;
    let mut j = n.wrapping_sub(1);
    for i in 0..n {
        let a = polygon[i];
        let b = polygon[j];
        if (a.y > p.y) != (b.y > p.y) && p.x < (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// A filled region: an outer contour and the holes cut out of it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Shape {
    pub contour: Vec<Vec2>,
    pub holes: Vec<Vec<Vec2>>,
}

/// Groups flattened sub-paths into shapes. Clockwise contours are solids and
/// counter-clockwise contours holes, which is how TrueType-derived outlines
/// are wound. Each hole goes to the first solid containing it, or to the
/// most recent solid when none does.
pub fn build_shapes(sub_paths: &[SubPath], divisions: usize) -> Vec<Shape> {
    let contours: Vec<Vec<Vec2>> = sub_paths
        .iter()
        .map(|s| s.flatten(divisions))
        .filter(|c| c.len() >= 3 && signed_area(c).abs() > f32::EPSILON)
        .collect();

    let mut shapes: Vec<Shape> = Vec::new();
    let mut holes: Vec<(Option<usize>, Vec<Vec2>)> = Vec::new();

    for contour in contours {
        if is_clockwise(&contour) {
            shapes.push(Shape { contour, holes: Vec::new() });
        } else {
            holes.push((shapes.len().checked_sub(1), contour));
        }
    }

    // an outline with no clockwise contour is wound the other way round
    if shapes.is_empty() {
        return holes
            .into_iter()
            .map(|(_, contour)| Shape { contour, holes: Vec::new() })
            .collect();
    }

    for (fallback, hole) in holes {
        let owner = shapes
            .iter()
            .position(|s| contains_point(&s.contour, hole[0]))
            .or(fallback)
            .unwrap_or(0);
        shapes[owner].holes.push(hole);
    }
    shapes
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(min: f32, max: f32, clockwise: bool) -> SubPath {
        let mut corners = vec![
            Vec2::new(min, min),
            Vec2::new(max, min),
            Vec2::new(max, max),
            Vec2::new(min, max),
        ];
        if clockwise {
            corners.reverse();
        }
        let mut path = SubPath::new(corners[0]);
        for c in &corners[1..] {
            path.segments.push(Segment::Line(*c));
        }
        path.segments.push(Segment::Line(corners[0]));
        path
    }

    #[test]
    fn closing_point_is_dropped() {
        let points = square(0.0, 1.0, false).flatten(12);
        assert_eq!(points.len(), 4);
        assert!((signed_area(&points) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn curves_split_into_divisions() {
        let mut path = SubPath::new(Vec2::ZERO);
        path.segments.push(Segment::Quadratic {
            control: Vec2::new(1.0, 2.0),
            to: Vec2::new(2.0, 0.0),
        });
        let points = path.flatten(12);
        assert_eq!(points.len(), 13);
        assert_eq!(points[12], Vec2::new(2.0, 0.0));
        // apex of the parabola
        assert!((points[6] - Vec2::new(1.0, 1.0)).length() < 1e-5);
    }

    #[test]
    fn cubic_hits_its_end_points() {
        let mut path = SubPath::new(Vec2::ZERO);
        path.segments.push(Segment::Cubic {
            control1: Vec2::new(0.0, 1.0),
            control2: Vec2::new(1.0, 1.0),
            to: Vec2::new(1.0, 0.0),
        });
        let points = path.flatten(4);
        assert_eq!(points.len(), 5);
        assert!((points[2] - Vec2::new(0.5, 0.75)).length() < 1e-6);
    }

    #[test]
    fn holes_attach_to_containing_solid() {
        let shapes = build_shapes(
            &[
                square(0.0, 10.0, true),
                square(20.0, 30.0, true),
                square(22.0, 28.0, false),
                square(2.0, 8.0, false),
            ],
            12,
        );
        assert_eq!(shapes.len(), 2);
        assert_eq!(shapes[0].holes.len(), 1);
        assert_eq!(shapes[0].holes[0][0], Vec2::new(2.0, 2.0));
        assert_eq!(shapes[1].holes.len(), 1);
    }

    #[test]
    fn all_counter_clockwise_outline_is_all_solid() {
        let shapes = build_shapes(&[square(0.0, 1.0, false), square(2.0, 3.0, false)], 12);
        assert_eq!(shapes.len(), 2);
        assert!(shapes.iter().all(|s| s.holes.is_empty()));
    }

    #[test]
    fn point_in_polygon() {
        let poly = square(0.0, 1.0, false).flatten(1);
        assert!(contains_point(&poly, Vec2::new(0.5, 0.5)));
        assert!(!contains_point(&poly, Vec2::new(1.5, 0.5)));
    }
}
