use glam::Mat4;
use rand::rngs::StdRng;
use web_sys::{HtmlImageElement, WebGl2RenderingContext as GL, WebGlTexture};

use super::gl::{texture_from_image, Mesh, Program};
use crate::camera::{PerspectiveCamera, Sizes};
use crate::error::Result;
use crate::firework::{BurstSet, FireworkSpec, ParticleCloud};
use crate::shaders;

/// Live bursts and the sprite textures they sample.
pub struct FireworkLayer {
    program: Program,
    textures: Vec<Option<WebGlTexture>>,
    bursts: BurstSet<Mesh>,
}

impl FireworkLayer {
    pub fn new(gl: &GL, texture_count: usize, duration: f32) -> Result<Self> {
        let program = Program::new(
            gl,
            shaders::FIREWORK_VERTEX,
            shaders::FIREWORK_FRAGMENT,
            &[
                "uModel",
                "uView",
                "uProjection",
                "uSize",
                "uResolution",
                "uProgress",
                "uTexture",
                "uColor",
            ],
        )?;
        Ok(Self {
            program,
            textures: vec![None; texture_count],
            bursts: BurstSet::new(duration),
        })
    }

    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }

    pub fn install_texture(&mut self, gl: &GL, index: usize, image: &HtmlImageElement) -> Result<()> {
        let Some(slot) = self.textures.get_mut(index) else {
            return Ok(());
        };
        let texture = texture_from_image(gl, image)?;
        if let Some(old) = slot.replace(texture) {
            gl.delete_texture(Some(&old));
        }
        Ok(())
    }

    pub fn spawn(&mut self, gl: &GL, rng: &mut StdRng, spec: FireworkSpec) -> Result<()> {
        let cloud = ParticleCloud::generate(rng, spec.count, spec.radius);
        let mesh = Mesh::new(
            gl,
            &[
                (cloud.positions.as_slice(), 3),
                (cloud.sizes.as_slice(), 1),
                (cloud.timers.as_slice(), 1),
            ],
        )?;
        self.bursts.spawn(spec, mesh);
        Ok(())
    }

    /// Advances every burst and frees the ones that just finished.
    pub fn update(&mut self, gl: &GL, dt: f32) {
        for mesh in self.bursts.advance(dt) {
            mesh.dispose(gl);
        }
    }

    pub fn draw(&self, gl: &GL, camera: &PerspectiveCamera, sizes: &Sizes) {
        if self.bursts.is_empty() {
            return;
        }

        self.program.bind(gl);
        self.program.set_mat4(gl, "uView", &camera.view());
        self.program.set_mat4(gl, "uProjection", &camera.projection());
        self.program.set_vec2(gl, "uResolution", sizes.resolution());
        self.program.set_i32(gl, "uTexture", 0);
        gl.active_texture(GL::TEXTURE0);

        gl.enable(GL::BLEND);
        gl.blend_func(GL::SRC_ALPHA, GL::ONE);
        gl.depth_mask(false);

        for burst in self.bursts.iter() {
            let spec = &burst.spec;
            self.program
                .set_mat4(gl, "uModel", &Mat4::from_translation(spec.position));
            self.program.set_f32(gl, "uSize", spec.size);
            self.program.set_f32(gl, "uProgress", burst.progress());
            self.program.set_vec3(gl, "uColor", spec.color.to_array());
            let texture = self.textures.get(spec.texture).and_then(Option::as_ref);
            gl.bind_texture(GL::TEXTURE_2D, texture);
            burst.handle.draw(gl, GL::POINTS);
        }

        gl.bind_texture(GL::TEXTURE_2D, None);
        gl.depth_mask(true);
        gl.disable(GL::BLEND);
    }
}
