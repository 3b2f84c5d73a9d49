//! Perspective camera and viewport sizing.

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees.
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    pub position: [f32; 3],
    pub target: [f32; 3],
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov: 75.0,
            near: 0.1,
            far: 100.0,
            position: [1.5, 0.0, 6.0],
            target: [0.0, 0.0, 0.0],
        }
    }
}

#[derive(Debug, Clone)]
pub struct PerspectiveCamera {
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
    pub target: Vec3,
}

impl PerspectiveCamera {
    pub fn new(config: &CameraConfig, aspect: f32) -> Self {
        Self {
            fov: config.fov,
            aspect,
            near: config.near,
            far: config.far,
            position: Vec3::from_array(config.position),
            target: Vec3::from_array(config.target),
        }
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        if aspect.is_finite() && aspect > 0.0 {
            self.aspect = aspect;
        }
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    /// OpenGL clip space (z in [-1, 1]).
    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov.to_radians(), self.aspect, self.near, self.far)
    }
}

/// Window size in CSS pixels plus the capped device pixel ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sizes {
    pub width: f32,
    pub height: f32,
    pub pixel_ratio: f32,
}

impl Sizes {
    pub fn from_window(width: f32, height: f32, device_pixel_ratio: f32, max_ratio: f32) -> Self {
        let pixel_ratio = if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
            device_pixel_ratio.min(max_ratio)
        } else {
            1.0
        };
        Self {
            width: width.max(1.0),
            height: height.max(1.0),
            pixel_ratio,
        }
    }

    pub fn aspect(&self) -> f32 {
        self.width / self.height
    }

    /// Drawing-buffer size in device pixels.
    pub fn resolution(&self) -> [f32; 2] {
        [self.width * self.pixel_ratio, self.height * self.pixel_ratio]
    }

    pub fn buffer_size(&self) -> (u32, u32) {
        let [w, h] = self.resolution();
        (w.round() as u32, h.round() as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_ratio_is_capped() {
        let sizes = Sizes::from_window(800.0, 600.0, 3.0, 2.0);
        assert_eq!(sizes.pixel_ratio, 2.0);
        assert_eq!(sizes.resolution(), [1600.0, 1200.0]);
        assert_eq!(sizes.buffer_size(), (1600, 1200));
    }

    #[test]
    fn bogus_pixel_ratio_falls_back_to_one() {
        let sizes = Sizes::from_window(800.0, 600.0, 0.0, 2.0);
        assert_eq!(sizes.pixel_ratio, 1.0);
    }

    #[test]
    fn target_projects_to_screen_centre() {
        let camera = PerspectiveCamera::new(&CameraConfig::default(), 16.0 / 9.0);
        let clip = camera.projection() * camera.view() * camera.target.extend(1.0);
        let ndc = clip.truncate() / clip.w;
        assert!(ndc.x.abs() < 1e-5 && ndc.y.abs() < 1e-5);
        assert!(ndc.z > -1.0 && ndc.z < 1.0);
    }

    #[test]
    fn projection_tracks_aspect() {
        let mut camera = PerspectiveCamera::new(&CameraConfig::default(), 2.0);
        let p = camera.projection();
        assert!((p.x_axis.x * 2.0 - p.y_axis.y).abs() < 1e-5);

        camera.set_aspect(0.5);
        let p = camera.projection();
        assert_eq!(camera.aspect, 0.5);
        assert!((p.x_axis.x * 0.5 - p.y_axis.y).abs() < 1e-5);
    }

    #[test]
    fn set_aspect_ignores_degenerate_values() {
        let mut camera = PerspectiveCamera::new(&CameraConfig::default(), 2.0);
        camera.set_aspect(0.0);
        assert_eq!(camera.aspect, 2.0);
        camera.set_aspect(f32::NAN);
        assert_eq!(camera.aspect, 2.0);
        camera.set_aspect(-1.5);
        assert_eq!(camera.aspect, 2.0);
    }
}
