use rand::rngs::StdRng;
use rand::SeedableRng;
use wasm_bindgen::JsCast;
use web_sys::{HtmlCanvasElement, HtmlImageElement, WebGl2RenderingContext as GL};

use super::fireworks::FireworkLayer;
use super::sky_box::SkyBox;
use super::text_mesh::TextMesh;
use crate::camera::{PerspectiveCamera, Sizes};
use crate::color::Color;
use crate::config::SceneConfig;
use crate::error::{Result, SceneError};
use crate::firework::FireworkSpec;
use crate::orbit::OrbitControls;
use crate::sky::{SkyParameter, SkyParameters};
use crate::text::font::Typeface;
use crate::text::{normalize_input, text_for_resize, TextParams};

/// Everything the frame loop and the listeners share.
pub struct Scene {
    gl: GL,
    canvas: HtmlCanvasElement,
    config: SceneConfig,
    camera: PerspectiveCamera,
    controls: OrbitControls,
    sizes: Sizes,
    sky: SkyBox,
    text: TextMesh,
    fireworks: FireworkLayer,
    rng: StdRng,
    elapsed: f32,
}

impl Scene {
    pub fn new(canvas: HtmlCanvasElement, config: SceneConfig) -> Result<Self> {
        let gl: GL = canvas
            .get_context("webgl2")?
            .ok_or(SceneError::WebGl2Unsupported)?
            .dyn_into()
            .map_err(|_| SceneError::WebGl2Unsupported)?;

        gl.clear_color(0.0, 0.0, 0.0, 1.0);
        gl.enable(GL::DEPTH_TEST);

        let sizes = read_sizes(config.max_pixel_ratio)?;
        let camera = PerspectiveCamera::new(&config.camera, sizes.aspect());
        let controls = OrbitControls {
            damping: config.orbit_damping,
            ..OrbitControls::default()
        };

        let sky = SkyBox::new(&gl, config.sky)?;
        let text = TextMesh::new(&gl, config.default_text.clone(), config.text)?;
        let fireworks = FireworkLayer::new(
            &gl,
            config.particle_textures.len(),
            config.firework_duration,
        )?;

        let mut scene = Self {
            gl,
            canvas,
            config,
            camera,
            controls,
            sizes,
            sky,
            text,
            fireworks,
            rng: StdRng::from_os_rng(),
            elapsed: 0.0,
        };
        scene.apply_sizes();
        Ok(scene)
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn sky_parameters(&self) -> &SkyParameters {
        &self.sky.params
    }

    pub fn text_params(&self) -> &TextParams {
        &self.text.params
    }

    pub fn controls_mut(&mut self) -> &mut OrbitControls {
        &mut self.controls
    }

    pub fn viewport_height(&self) -> f32 {
        self.sizes.height
    }

    pub fn resize(&mut self) -> Result<()> {
        self.sizes = read_sizes(self.config.max_pixel_ratio)?;
        self.apply_sizes();
        Ok(())
    }

    fn apply_sizes(&mut self) {
        let (width, height) = self.sizes.buffer_size();
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        self.camera.set_aspect(self.sizes.aspect());
        self.gl.viewport(0, 0, width as i32, height as i32);
        tracing::debug!(width, height, ratio = self.sizes.pixel_ratio, "resized");
    }

    pub fn spawn_opening(&mut self) -> Result<()> {
        let spec = FireworkSpec::opening(&mut self.rng, self.fireworks.texture_count());
        self.fireworks.spawn(&self.gl, &mut self.rng, spec)
    }

    pub fn spawn_random(&mut self) -> Result<()> {
        let spec = FireworkSpec::random(&mut self.rng, self.fireworks.texture_count());
        self.fireworks.spawn(&self.gl, &mut self.rng, spec)
    }

    pub fn install_texture(&mut self, index: usize, image: &HtmlImageElement) -> Result<()> {
        self.fireworks.install_texture(&self.gl, index, image)
    }

    pub fn install_font(&mut self, face: Typeface) {
        self.text.set_face(&self.gl, face);
    }

    /// Text field edits: the mesh mirrors the normalised field, even when
    /// that leaves it empty.
    pub fn set_text_input(&mut self, raw: &str) {
        self.text.set_text(&self.gl, normalize_input(raw));
    }

    pub fn set_text_size(&mut self, size: f32, raw_input: &str) {
        let size = crate::text::SIZE_RANGE.clamp(size);
        let text = text_for_resize(raw_input, &self.config.default_text);
        self.text.set_size(&self.gl, size, text);
        self.render();
    }

    pub fn set_text_color(&mut self, color: Color) {
        self.text.params.color = color;
        self.render();
    }

    pub fn set_sky_parameter(&mut self, param: SkyParameter, value: f32) {
        self.sky.params.set(param, value);
        self.render();
    }

    pub fn tick(&mut self, dt: f32) {
        self.elapsed += dt;
        let target = self.camera.target;
        self.controls.update(&mut self.camera.position, target);
        self.fireworks.update(&self.gl, dt);
        self.render();
    }

    pub fn render(&self) {
        let gl = &self.gl;
        gl.clear(GL::COLOR_BUFFER_BIT | GL::DEPTH_BUFFER_BIT);
        self.sky.draw(gl, &self.camera);
        self.text.draw(gl, &self.camera, self.elapsed);
        self.fireworks.draw(gl, &self.camera, &self.sizes);
    }
}

fn read_sizes(max_pixel_ratio: f32) -> Result<Sizes> {
    let window = web_sys::window().ok_or(SceneError::Missing("window"))?;
    let width = window.inner_width()?.as_f64().unwrap_or(1.0);
    let height = window.inner_height()?.as_f64().unwrap_or(1.0);
    Ok(Sizes::from_window(
        width as f32,
        height as f32,
        window.device_pixel_ratio() as f32,
        max_pixel_ratio,
    ))
}
