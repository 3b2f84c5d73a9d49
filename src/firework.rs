//! Firework bursts: point-cloud generation, spawn parameters, and the
//! lifetime bookkeeping that tells the renderer when to free GPU buffers.

use glam::Vec3;
use rand::Rng;
use std::f32::consts::PI;

use crate::color::Color;
use crate::tween::Tween;

/// Everything needed to build one burst.
#[derive(Debug, Clone, PartialEq)]
pub struct FireworkSpec {
    pub count: usize,
    pub position: Vec3,
    pub size: f32,
    /// Index into the loaded particle textures.
    pub texture: usize,
    pub radius: f32,
    pub color: Color,
}

impl FireworkSpec {
    /// The burst fired on a pointer click.
    pub fn random<R: Rng + ?Sized>(rng: &mut R, texture_count: usize) -> Self {
        let count = (400.0 + rng.random::<f32>() * 1000.0).round() as usize;
        let position = Vec3::new(
            (rng.random::<f32>() - 0.5) * 15.0,
            rng.random::<f32>(),
            (rng.random::<f32>() - 0.5) * 15.0,
        );
        let size = 0.2 + rng.random::<f32>() * 0.2;
        let texture = pick_texture(rng, texture_count);
        let radius = 2.0 + rng.random::<f32>() * 1.5;
        let color = Color::from_hsl(rng.random::<f32>(), 1.0, 0.7);
        Self { count, position, size, texture, radius, color }
    }

    /// The small cyan burst shown when the page opens.
    pub fn opening<R: Rng + ?Sized>(rng: &mut R, texture_count: usize) -> Self {
        Self {
            count: 100,
            position: Vec3::ZERO,
            size: 0.4,
            texture: pick_texture(rng, texture_count),
            radius: 1.0,
            color: Color::from_hex(0x00ffff),
        }
    }
}

fn pick_texture<R: Rng + ?Sized>(rng: &mut R, texture_count: usize) -> usize {
    if texture_count == 0 {
        0
    } else {
        rng.random_range(0..texture_count)
    }
}

/// Per-point vertex attributes, laid out for direct upload.
#[derive(Debug, Clone, Default)]
pub struct ParticleCloud {
    /// xyz triples.
    pub positions: Vec<f32>,
    pub sizes: Vec<f32>,
    pub timers: Vec<f32>,
}

impl ParticleCloud {
    pub fn generate<R: Rng + ?Sized>(rng: &mut R, count: usize, radius: f32) -> Self {
        let mut positions = Vec::with_capacity(count * 3);
        let mut sizes = Vec::with_capacity(count);
        let mut timers = Vec::with_capacity(count);

        for _ in 0..count {
            let r = radius * (0.75 + rng.random::<f32>() * 0.25);
            let phi = rng.random::<f32>() * PI;
            let theta = rng.random::<f32>() * PI * 2.0;
            let offset = spherical_to_cartesian(r, phi, theta);
            positions.extend_from_slice(&offset.to_array());

            sizes.push(rng.random::<f32>());
            timers.push(1.0 + rng.random::<f32>());
        }

        Self { positions, sizes, timers }
    }

    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }
}

/// `phi` is the polar angle from +Y, `theta` the azimuth from +Z towards +X.
pub fn spherical_to_cartesian(radius: f32, phi: f32, theta: f32) -> Vec3 {
    let sin_phi_radius = phi.sin() * radius;
    Vec3::new(
        sin_phi_radius * theta.sin(),
        phi.cos() * radius,
        sin_phi_radius * theta.cos(),
    )
}

fn remap(value: f32, from_min: f32, from_max: f32, to_min: f32, to_max: f32) -> f32 {
    to_min + (value - from_min) * (to_max - to_min) / (from_max - from_min)
}

fn ease_out_cubic(t: f32) -> f32 {
    1.0 - (1.0 - t).powi(3)
}

/// CPU mirror of the burst vertex stage for one particle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BurstCurves {
    /// Multiplier on the spherical offset.
    pub explode: f32,
    /// Downward drop in world units.
    pub fall: f32,
    /// Open/close size envelope.
    pub size: f32,
    /// Twinkle multiplier on size.
    pub twinkle: f32,
}

pub fn burst_curves(progress: f32, timer: f32) -> BurstCurves {
    let p = progress * timer;

    let explode = ease_out_cubic(remap(p, 0.0, 0.1, 0.0, 1.0).clamp(0.0, 1.0));
    let fall = ease_out_cubic(remap(p, 0.1, 1.0, 0.0, 1.0).clamp(0.0, 1.0)) * 0.2;

    let opening = remap(p, 0.0, 0.125, 0.0, 1.0);
    let closing = remap(p, 0.125, 1.0, 1.0, 0.0);
    let size = opening.min(closing).clamp(0.0, 1.0);

    let twinkling = remap(p, 0.2, 0.8, 0.0, 1.0).clamp(0.0, 1.0);
    let twinkle = 1.0 - ((p * 30.0).sin() * 0.5 + 0.5) * twinkling;

    BurstCurves { explode, fall, size, twinkle }
}

/// A live burst. `H` is whatever the renderer keeps per burst (buffers,
/// VAO); the set hands it back when the burst finishes.
#[derive(Debug)]
pub struct Burst<H> {
    pub spec: FireworkSpec,
    pub handle: H,
    progress: Tween,
}

impl<H> Burst<H> {
    pub fn progress(&self) -> f32 {
        self.progress.value()
    }
}

#[derive(Debug)]
pub struct BurstSet<H> {
    bursts: Vec<Burst<H>>,
    duration: f32,
}

impl<H> BurstSet<H> {
    pub fn new(duration: f32) -> Self {
        Self { bursts: Vec::new(), duration }
    }

    pub fn spawn(&mut self, spec: FireworkSpec, handle: H) {
        tracing::debug!(
            count = spec.count,
            texture = spec.texture,
            radius = spec.radius,
            "spawning firework"
        );
        self.bursts.push(Burst {
            spec,
            handle,
            progress: Tween::new(0.0, 1.0, self.duration),
        });
    }

    /// Advances every burst and removes the ones that finished this step,
    /// returning their handles for disposal.
    pub fn advance(&mut self, dt: f32) -> Vec<H> {
        let mut finished = Vec::new();
        let mut i = 0;
        while i < self.bursts.len() {
            if self.bursts[i].progress.advance(dt).just_completed {
                finished.push(self.bursts.swap_remove(i).handle);
            } else {
                i += 1;
            }
        }
        finished
    }

    pub fn iter(&self) -> impl Iterator<Item = &Burst<H>> {
        self.bursts.iter()
    }

    pub fn len(&self) -> usize {
        self.bursts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bursts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn spherical_axes() {
        let up = spherical_to_cartesian(1.0, 0.0, 0.0);
        assert!((up - Vec3::Y).length() < 1e-6);
        let forward = spherical_to_cartesian(2.0, PI / 2.0, 0.0);
        assert!((forward - Vec3::new(0.0, 0.0, 2.0)).length() < 1e-5);
        let right = spherical_to_cartesian(1.0, PI / 2.0, PI / 2.0);
        assert!((right - Vec3::X).length() < 1e-5);
    }

    #[test]
    fn curves_at_key_points() {
        let start = burst_curves(0.0, 1.0);
        assert_eq!(start.explode, 0.0);
        assert_eq!(start.size, 0.0);
        assert_eq!(start.fall, 0.0);

        let exploded = burst_curves(0.1, 1.0);
        assert!((exploded.explode - 1.0).abs() < 1e-6);

        let peak = burst_curves(0.125, 1.0);
        assert!((peak.size - 1.0).abs() < 1e-6);

        let end = burst_curves(1.0, 1.0);
        assert!((end.fall - 0.2).abs() < 1e-6);
        assert!(end.size.abs() < 1e-6);
    }

    #[test]
    fn slow_timers_finish_early() {
        // timer 2 doubles the local clock: the particle is gone at half progress
        let c = burst_curves(0.5, 2.0);
        assert!(c.size.abs() < 1e-6);
    }

    #[test]
    fn twinkle_holds_early_then_oscillates() {
        for p in [0.0, 0.1, 0.2] {
            let c = burst_curves(p, 1.0);
            assert!((c.twinkle - 1.0).abs() < 1e-6, "twinkle at {p} = {}", c.twinkle);
        }
        for p in [0.8f32, 0.9, 1.0] {
            let c = burst_curves(p, 1.0);
            let expected = 1.0 - ((p * 30.0).sin() * 0.5 + 0.5);
            assert!((c.twinkle - expected).abs() < 1e-5, "twinkle at {p} = {}", c.twinkle);
        }
    }

    #[test]
    fn pick_texture_handles_empty_set() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(pick_texture(&mut rng, 0), 0);
    }

    #[test]
    fn burst_set_counts() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut set = BurstSet::new(1.0);
        assert!(set.is_empty());
        set.spawn(FireworkSpec::opening(&mut rng, 8), 'a');
        set.spawn(FireworkSpec::opening(&mut rng, 8), 'b');
        assert_eq!(set.len(), 2);
        assert!(set.advance(0.5).is_empty());
        let mut finished = set.advance(0.5);
        finished.sort();
        assert_eq!(finished, vec!['a', 'b']);
        assert!(set.is_empty());
    }
}
