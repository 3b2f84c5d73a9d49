//! Non-indexed triangle geometry ready for upload.

use glam::Vec3;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Geometry {
    /// xyz per vertex, three vertices per triangle.
    pub positions: Vec<f32>,
    pub normals: Vec<f32>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: Vec3,
    pub max: Vec3,
}

impl BoundingBox {
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }
}

impl Geometry {
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Appends a triangle with its face normal on all three corners.
    /// Degenerate triangles are dropped.
    pub fn push_triangle(&mut self, a: Vec3, b: Vec3, c: Vec3) {
        let normal = (b - a).cross(c - a);
        if normal.length_squared() <= f32::EPSILON * f32::EPSILON {
            return;
        }
        let normal = normal.normalize();
        for v in [a, b, c] {
            self.positions.extend_from_slice(&v.to_array());
            self.normals.extend_from_slice(&normal.to_array());
        }
    }

    pub fn bounding_box(&self) -> Option<BoundingBox> {
        let mut points = self.positions.chunks_exact(3).map(Vec3::from_slice);
        let first = points.next()?;
        let (min, max) = points.fold((first, first), |(min, max), p| (min.min(p), max.max(p)));
        Some(BoundingBox { min, max })
    }

    pub fn translate(&mut self, offset: Vec3) {
        for p in self.positions.chunks_exact_mut(3) {
            p[0] += offset.x;
            p[1] += offset.y;
            p[2] += offset.z;
        }
    }

    /// Moves the geometry so its bounding box is centred on the origin.
    pub fn center(&mut self) {
        if let Some(bounds) = self.bounding_box() {
            self.translate(-bounds.center());
        }
    }
}

/// Unit cube centred on the origin, wound so its faces point inwards. Only
/// positions are needed.
pub fn inward_cube() -> Vec<f32> {
    const CORNERS: [[f32; 3]; 8] = [
        [-0.5, -0.5, -0.5],
        [0.5, -0.5, -0.5],
        [0.5, 0.5, -0.5],
        [-0.5, 0.5, -0.5],
        [-0.5, -0.5, 0.5],
        [0.5, -0.5, 0.5],
        [0.5, 0.5, 0.5],
        [-0.5, 0.5, 0.5],
    ];
    // each face listed counter-clockwise as seen from inside the cube
    const FACES: [[usize; 4]; 6] = [
        [0, 1, 2, 3], // -z
        [5, 4, 7, 6], // +z
        [4, 0, 3, 7], // -x
        [1, 5, 6, 2], // +x
        [4, 5, 1, 0], // -y
        [3, 2, 6, 7], // +y
    ];

    let mut out = Vec::with_capacity(6 * 6 * 3);
    for [a, b, c, d] in FACES {
        for i in [a, b, c, a, c, d] {
            out.extend_from_slice(&CORNERS[i]);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degenerate_triangles_are_skipped() {
        let mut geometry = Geometry::default();
        geometry.push_triangle(Vec3::ZERO, Vec3::X, Vec3::X * 2.0);
        assert!(geometry.is_empty());
        geometry.push_triangle(Vec3::ZERO, Vec3::X, Vec3::Y);
        assert_eq!(geometry.vertex_count(), 3);
        assert_eq!(&geometry.normals[0..3], &[0.0, 0.0, 1.0]);
    }

    #[test]
    fn center_moves_bounds_to_origin() {
        let mut geometry = Geometry::default();
        geometry.push_triangle(
            Vec3::new(1.0, 1.0, 1.0),
            Vec3::new(3.0, 1.0, 1.0),
            Vec3::new(1.0, 5.0, 2.0),
        );
        geometry.center();
        let bounds = geometry.bounding_box().unwrap();
        assert!(bounds.center().length() < 1e-6);
        assert_eq!(bounds.size(), Vec3::new(2.0, 4.0, 1.0));
    }

    #[test]
    fn cube_faces_point_inwards() {
        let cube = inward_cube();
        assert_eq!(cube.len(), 36 * 3);
        for tri in cube.chunks_exact(9) {
            let a = Vec3::from_slice(&tri[0..3]);
            let b = Vec3::from_slice(&tri[3..6]);
            let c = Vec3::from_slice(&tri[6..9]);
            let normal = (b - a).cross(c - a);
            let centroid = (a + b + c) / 3.0;
            assert!(normal.dot(centroid) < 0.0);
        }
    }
}
