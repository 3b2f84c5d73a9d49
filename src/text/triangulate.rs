//! Ear-clipping triangulation of a polygon with holes.
//!
//! Holes are first spliced into the outer ring through a bridge edge from
//! each hole's right-most vertex to a visible outer vertex, turning the
//! region into a single weakly simple polygon that is then clipped ear by
//! ear.

use glam::Vec2;

use super::path::signed_area;

/// Triangulates `contour` minus `holes`.
///
/// Returned indices address the concatenation `contour ++ holes[0] ++
/// holes[1] ...`. Every triangle is counter-clockwise.
pub fn triangulate(contour: &[Vec2], holes: &[Vec<Vec2>]) -> Vec<[usize; 3]> {
    if contour.len() < 3 {
        return Vec::new();
    }

    let mut points: Vec<Vec2> = contour.to_vec();
    let mut ring: Vec<usize> = (0..contour.len()).collect();
    if signed_area(contour) < 0.0 {
        ring.reverse();
    }

    let mut hole_rings: Vec<Vec<usize>> = Vec::with_capacity(holes.len());
    for hole in holes {
        let base = points.len();
        points.extend_from_slice(hole);
        if hole.len() < 3 {
            continue;
        }
        let mut indices: Vec<usize> = (base..base + hole.len()).collect();
        if signed_area(hole) > 0.0 {
            indices.reverse();
        }
        hole_rings.push(indices);
    }

    // right-most holes first so later bridges can pass over earlier ones
    hole_rings.sort_by(|a, b| {
        let ax = rightmost(&points, a).1;
        let bx = rightmost(&points, b).1;
        bx.total_cmp(&ax)
    });

    for hole in hole_rings {
        ring = splice_hole(&points, ring, &hole);
    }

    clip_ears(&points, ring)
}

fn rightmost(points: &[Vec2], ring: &[usize]) -> (usize, f32) {
    let mut best = 0;
    for (i, &idx) in ring.iter().enumerate() {
        let p = points[idx];
        let q = points[ring[best]];
        if p.x > q.x || (p.x == q.x && p.y < q.y) {
            best = i;
        }
    }
    (best, points[ring[best]].x)
}

fn splice_hole(points: &[Vec2], ring: Vec<usize>, hole: &[usize]) -> Vec<usize> {
    let (m_pos, _) = rightmost(points, hole);
    let m = points[hole[m_pos]];

    let Some(bridge) = find_bridge(points, &ring, m) else {
        tracing::warn!("no bridge found for glyph hole; dropping it");
        return ring;
    };

    let mut out = Vec::with_capacity(ring.len() + hole.len() + 2);
    out.extend_from_slice(&ring[..=bridge]);
    for k in 0..=hole.len() {
        out.push(hole[(m_pos + k) % hole.len()]);
    }
    out.push(ring[bridge]);
    out.extend_from_slice(&ring[bridge + 1..]);
    out
}

/// Finds the ring position of an outer vertex that can be joined to `m`
/// without crossing the outline.
fn find_bridge(points: &[Vec2], ring: &[usize], m: Vec2) -> Option<usize> {
    let n = ring.len();
    let mut best_x = f32::INFINITY;
    let mut candidate = None;

    for i in 0..n {
        let a = points[ring[i]];
        let b = points[ring[(i + 1) % n]];
        if a.y == b.y {
            continue;
        }
        let straddles = (a.y <= m.y && b.y >= m.y) || (b.y <= m.y && a.y >= m.y);
        if !straddles {
            continue;
        }
        let x = a.x + (m.y - a.y) * (b.x - a.x) / (b.y - a.y);
        if x >= m.x && x < best_x {
            best_x = x;
            candidate = Some(if a.x > b.x { i } else { (i + 1) % n });
            if x == m.x {
                break;
            }
        }
    }

    let Some(mut p_pos) = candidate else {
        return ring
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| {
                points[**a].distance_squared(m).total_cmp(&points[**b].distance_squared(m))
            })
            .map(|(i, _)| i);
    };

    // a vertex inside the triangle (m, hit, p) would occlude p; take the one
    // closest in angle to the ray instead
    let hit = Vec2::new(best_x, m.y);
    let p = points[ring[p_pos]];
    let mut best_tan = f32::INFINITY;
    for (i, &idx) in ring.iter().enumerate() {
        let q = points[idx];
        if i == p_pos || q.x < m.x || q == p {
            continue;
        }
        let (t0, t1, t2) = if m.y < p.y { (m, p, hit) } else { (m, hit, p) };
        if point_in_triangle(t0, t1, t2, q) {
            let tan = (m.y - q.y).abs() / (q.x - m.x).max(f32::EPSILON);
            if tan < best_tan
                || (tan == best_tan && q.distance_squared(m) < points[ring[p_pos]].distance_squared(m))
            {
                best_tan = tan;
                p_pos = i;
            }
        }
    }

    // earlier bridges duplicate ring vertices; join the copy whose corner
    // actually faces m
    let p = points[ring[p_pos]];
    let resolved = (0..n)
        .filter(|&i| points[ring[i]] == p)
        .find(|&i| locally_inside(points, ring, i, m))
        .unwrap_or(p_pos);
    Some(resolved)
}

/// Whether `b` lies inside the interior corner of the ring at position `i`.
fn locally_inside(points: &[Vec2], ring: &[usize], i: usize, b: Vec2) -> bool {
    let n = ring.len();
    let prev = points[ring[(i + n - 1) % n]];
    let a = points[ring[i]];
    let next = points[ring[(i + 1) % n]];
    if cross(prev, a, next) > 0.0 {
        cross(a, next, b) >= 0.0 && cross(a, b, prev) >= 0.0
    } else {
        cross(a, prev, b) <= 0.0 || cross(a, b, next) <= 0.0
    }
}

fn cross(a: Vec2, b: Vec2, c: Vec2) -> f32 {
    (b - a).perp_dot(c - a)
}

/// Inclusive of the boundary, independent of winding.
fn point_in_triangle(a: Vec2, b: Vec2, c: Vec2, p: Vec2) -> bool {
    let d1 = cross(a, b, p);
    let d2 = cross(b, c, p);
    let d3 = cross(c, a, p);
    let has_neg = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
    let has_pos = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;
    !(has_neg && has_pos)
}

fn is_ear(points: &[Vec2], ring: &[usize], i: usize) -> bool {
    let n = ring.len();
    let ia = ring[(i + n - 1) % n];
    let ib = ring[i];
    let ic = ring[(i + 1) % n];
    let (a, b, c) = (points[ia], points[ib], points[ic]);

    if cross(a, b, c) <= 0.0 {
        return false;
    }

    ring.iter().all(|&idx| {
        let p = points[idx];
        p == a || p == b || p == c || !point_in_triangle(a, b, c, p)
    })
}

fn clip_ears(points: &[Vec2], mut ring: Vec<usize>) -> Vec<[usize; 3]> {
    let mut triangles = Vec::with_capacity(ring.len().saturating_sub(2));
    let mut i = 0;
    let mut stalled = 0;

    while ring.len() > 3 {
        let n = ring.len();
        i %= n;
        if is_ear(points, &ring, i) || stalled >= n {
            let a = ring[(i + n - 1) % n];
            let b = ring[i];
            let c = ring[(i + 1) % n];
            if cross(points[a], points[b], points[c]) > 0.0 {
                triangles.push([a, b, c]);
            }
            ring.remove(i);
            stalled = 0;
            // re-test the predecessor, whose neighbourhood just changed
            i = (i + ring.len() - 1) % ring.len();
        } else {
            i += 1;
            stalled += 1;
        }
    }

    if let [a, b, c] = ring[..] {
        if cross(points[a], points[b], points[c]) > 0.0 {
            triangles.push([a, b, c]);
        }
    }
    triangles
}

#[cfg(test)]
mod tests {
    use super::*;

    fn area_of(points: &[Vec2], triangles: &[[usize; 3]]) -> f32 {
        triangles
            .iter()
            .map(|&[a, b, c]| cross(points[a], points[b], points[c]) * 0.5)
            .sum()
    }

    fn rect(x0: f32, y0: f32, x1: f32, y1: f32) -> Vec<Vec2> {
        vec![
            Vec2::new(x0, y0),
            Vec2::new(x1, y0),
            Vec2::new(x1, y1),
            Vec2::new(x0, y1),
        ]
    }

    #[test]
    fn square_makes_two_triangles() {
        let square = rect(0.0, 0.0, 1.0, 1.0);
        let tris = triangulate(&square, &[]);
        assert_eq!(tris.len(), 2);
        assert!((area_of(&square, &tris) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn clockwise_input_still_covers_area() {
        let mut square = rect(0.0, 0.0, 2.0, 2.0);
        square.reverse();
        let tris = triangulate(&square, &[]);
        assert!((area_of(&square, &tris) - 4.0).abs() < 1e-5);
        for &[a, b, c] in &tris {
            assert!(cross(square[a], square[b], square[c]) > 0.0);
        }
    }

    #[test]
    fn concave_outline() {
        // an "L"
        let l = vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(3.0, 0.0),
            Vec2::new(3.0, 1.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(1.0, 3.0),
            Vec2::new(0.0, 3.0),
        ];
        let tris = triangulate(&l, &[]);
        assert_eq!(tris.len(), 4);
        assert!((area_of(&l, &tris) - 5.0).abs() < 1e-5);
    }

    #[test]
    fn square_with_hole() {
        let outer = rect(0.0, 0.0, 10.0, 10.0);
        let hole = rect(2.0, 2.0, 8.0, 8.0);
        let tris = triangulate(&outer, &[hole.clone()]);

        let mut all = outer.clone();
        all.extend_from_slice(&hole);
        assert!((area_of(&all, &tris) - 64.0).abs() < 1e-3);

        // nothing may land inside the hole
        for &[a, b, c] in &tris {
            let centroid = (all[a] + all[b] + all[c]) / 3.0;
            let inside_hole = centroid.x > 2.0 && centroid.x < 8.0 && centroid.y > 2.0 && centroid.y < 8.0;
            assert!(!inside_hole, "triangle centroid {centroid:?} inside hole");
        }
    }

    #[test]
    fn two_holes() {
        let outer = rect(0.0, 0.0, 10.0, 4.0);
        let left = rect(1.0, 1.0, 3.0, 3.0);
        let right = rect(6.0, 1.0, 9.0, 3.0);
        let tris = triangulate(&outer, &[left.clone(), right.clone()]);

        let mut all = outer.clone();
        all.extend_from_slice(&left);
        all.extend_from_slice(&right);
        assert!((area_of(&all, &tris) - (40.0 - 4.0 - 6.0)).abs() < 1e-3);
    }

    fn assert_covers(outer: &[Vec2], holes: &[Vec<Vec2>], expected: f32) {
        let tris = triangulate(outer, holes);
        let mut all = outer.to_vec();
        for hole in holes {
            all.extend_from_slice(hole);
        }
        let area = area_of(&all, &tris);
        assert!((area - expected).abs() < 1e-3, "area {area}, expected {expected}");

        for &[a, b, c] in &tris {
            let centroid = (all[a] + all[b] + all[c]) / 3.0;
            for hole in holes {
                let (lo, hi) = (hole[0], hole[2]);
                let inside = centroid.x > lo.x && centroid.x < hi.x && centroid.y > lo.y && centroid.y < hi.y;
                assert!(!inside, "triangle centroid {centroid:?} inside hole {hole:?}");
            }
        }
    }

    #[test]
    fn stacked_holes_with_offset_right_edges() {
        let outer = rect(0.0, 0.0, 6.0, 10.0);
        let lower = rect(1.0, 1.0, 4.5, 4.0);
        let upper = rect(1.0, 6.0, 4.0, 9.0);
        assert_covers(&outer, &[lower, upper], 60.0 - 10.5 - 9.0);
    }

    #[test]
    fn stacked_holes_with_aligned_right_edges() {
        // the two counters of a "B"
        let outer = rect(0.0, 0.0, 6.0, 10.0);
        let lower = rect(1.0, 1.0, 4.0, 4.0);
        let upper = rect(1.0, 6.0, 4.0, 9.0);
        assert_covers(&outer, &[lower, upper], 60.0 - 9.0 - 9.0);
    }

    #[test]
    fn three_stacked_holes() {
        let outer = rect(0.0, 0.0, 6.0, 14.0);
        let holes = vec![
            rect(1.0, 1.0, 4.0, 4.0),
            rect(1.0, 5.0, 4.5, 8.0),
            rect(1.0, 10.0, 5.0, 13.0),
        ];
        assert_covers(&outer, &holes, 84.0 - 9.0 - 10.5 - 12.0);
    }

    #[test]
    fn degenerate_input_is_empty() {
        assert!(triangulate(&[Vec2::ZERO, Vec2::X], &[]).is_empty());
    }
}
