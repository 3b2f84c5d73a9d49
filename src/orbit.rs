//! Damped orbit controls: drag to rotate around the target, wheel to dolly.

use glam::Vec3;
use std::f32::consts::PI;

const MIN_POLAR: f32 = 1e-4;

#[derive(Debug, Clone)]
pub struct OrbitControls {
    pub damping: f32,
    pub rotate_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    theta_delta: f32,
    phi_delta: f32,
    scale: f32,
    dragging: Option<(f32, f32)>,
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self {
            damping: 0.05,
            rotate_speed: 1.0,
            min_distance: 0.5,
            max_distance: 60.0,
            theta_delta: 0.0,
            phi_delta: 0.0,
            scale: 1.0,
            dragging: None,
        }
    }
}

impl OrbitControls {
    pub fn pointer_down(&mut self, x: f32, y: f32) {
        self.dragging = Some((x, y));
    }

    pub fn pointer_up(&mut self) {
        self.dragging = None;
    }

    /// `viewport_height` is the element's client height in CSS pixels.
    pub fn pointer_move(&mut self, x: f32, y: f32, viewport_height: f32) {
        let Some((last_x, last_y)) = self.dragging else {
            return;
        };
        let height = viewport_height.max(1.0);
        self.theta_delta -= 2.0 * PI * (x - last_x) / height * self.rotate_speed;
        self.phi_delta -= 2.0 * PI * (y - last_y) / height * self.rotate_speed;
        self.dragging = Some((x, y));
    }

    /// Positive `delta_y` (scrolling down) moves the camera away.
    pub fn wheel(&mut self, delta_y: f32) {
        if delta_y > 0.0 {
            self.scale /= 0.95;
        } else if delta_y < 0.0 {
            self.scale *= 0.95;
        }
    }

    /// Applies one damped step to `position` orbiting `target`.
    pub fn update(&mut self, position: &mut Vec3, target: Vec3) {
        let offset = *position - target;
        let radius = offset.length();
        if radius <= f32::EPSILON {
            return;
        }

        let mut theta = offset.x.atan2(offset.z);
        let mut phi = (offset.y / radius).clamp(-1.0, 1.0).acos();

        theta += self.theta_delta * self.damping;
        phi += self.phi_delta * self.damping;
        phi = phi.clamp(MIN_POLAR, PI - MIN_POLAR);

        let radius = (radius * self.scale).clamp(self.min_distance, self.max_distance);

        let sin_phi = phi.sin();
        *position = target
            + Vec3::new(
                radius * sin_phi * theta.sin(),
                radius * phi.cos(),
                radius * sin_phi * theta.cos(),
            );

        self.theta_delta *= 1.0 - self.damping;
        self.phi_delta *= 1.0 - self.damping;
        self.scale = 1.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_controls_leave_camera_alone() {
        let mut controls = OrbitControls::default();
        let mut position = Vec3::new(1.5, 0.0, 6.0);
        controls.update(&mut position, Vec3::ZERO);
        assert!((position - Vec3::new(1.5, 0.0, 6.0)).length() < 1e-4);
    }

    #[test]
    fn drag_rotates_and_damping_settles() {
        let mut controls = OrbitControls::default();
        let mut position = Vec3::new(0.0, 0.0, 6.0);
        controls.pointer_down(100.0, 100.0);
        controls.pointer_move(200.0, 100.0, 600.0);
        controls.pointer_up();

        controls.update(&mut position, Vec3::ZERO);
        let first = position;
        assert!(first.x < 0.0, "dragging right swings the camera left");

        for _ in 0..500 {
            controls.update(&mut position, Vec3::ZERO);
        }
        let settled = position;
        controls.update(&mut position, Vec3::ZERO);
        assert!((position - settled).length() < 1e-4);
        assert!((position.length() - 6.0).abs() < 1e-3);
    }

    #[test]
    fn polar_angle_never_flips_over_the_pole() {
        let mut controls = OrbitControls::default();
        let mut position = Vec3::new(0.0, 0.0, 6.0);
        controls.pointer_down(0.0, 0.0);
        controls.pointer_move(0.0, 100_000.0, 600.0);
        for _ in 0..100 {
            controls.update(&mut position, Vec3::ZERO);
        }
        assert!(position.y > 5.99 && position.y <= 6.0 + 1e-4);
        assert!(position.is_finite());
    }

    #[test]
    fn wheel_dollies_within_limits() {
        let mut controls = OrbitControls::default();
        let mut position = Vec3::new(0.0, 0.0, 6.0);
        controls.wheel(-1.0);
        controls.update(&mut position, Vec3::ZERO);
        assert!((position.length() - 5.7).abs() < 1e-4);

        for _ in 0..200 {
            controls.wheel(1.0);
            controls.update(&mut position, Vec3::ZERO);
        }
        assert!((position.length() - 60.0).abs() < 1e-3);
    }

    #[test]
    fn moves_without_drag_are_ignored() {
        let mut controls = OrbitControls::default();
        controls.pointer_move(50.0, 50.0, 600.0);
        let mut position = Vec3::new(0.0, 0.0, 6.0);
        controls.update(&mut position, Vec3::ZERO);
        assert!((position - Vec3::new(0.0, 0.0, 6.0)).length() < 1e-5);
    }
}
