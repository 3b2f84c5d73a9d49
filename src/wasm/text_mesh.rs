use glam::{EulerRot, Mat4};
use web_sys::WebGl2RenderingContext as GL;

use super::gl::{Mesh, Program};
use crate::camera::PerspectiveCamera;
use crate::error::Result;
use crate::shaders;
use crate::text::font::Typeface;
use crate::text::{build_text_geometry, TextParams};

/// The glitch text: the current string, its mesh, and the font once loaded.
pub struct TextMesh {
    program: Program,
    face: Option<Typeface>,
    mesh: Option<Mesh>,
    text: String,
    pub params: TextParams,
}

impl TextMesh {
    pub fn new(gl: &GL, text: String, params: TextParams) -> Result<Self> {
        let program = Program::new(
            gl,
            shaders::TEXT_VERTEX,
            shaders::TEXT_FRAGMENT,
            &["uModel", "uView", "uProjection", "uTime", "uColor", "uCameraPosition"],
        )?;
        Ok(Self {
            program,
            face: None,
            mesh: None,
            text,
            params,
        })
    }

    pub fn set_face(&mut self, gl: &GL, face: Typeface) {
        self.face = Some(face);
        self.rebuild(gl);
    }

    pub fn set_text(&mut self, gl: &GL, text: String) {
        self.text = text;
        self.rebuild(gl);
    }

    pub fn set_size(&mut self, gl: &GL, size: f32, text: String) {
        self.params.size = size;
        self.text = text;
        self.rebuild(gl);
    }

    fn rebuild(&mut self, gl: &GL) {
        let Some(face) = &self.face else {
            return;
        };
        let geometry = match build_text_geometry(face, &self.text, self.params.size) {
            Ok(geometry) => geometry,
            Err(err) => {
                tracing::warn!(text = %self.text, "keeping previous text mesh: {err}");
                return;
            }
        };

        if let Some(old) = self.mesh.take() {
            old.dispose(gl);
        }
        if geometry.is_empty() {
            return;
        }
        match Mesh::new(
            gl,
            &[(geometry.positions.as_slice(), 3), (geometry.normals.as_slice(), 3)],
        ) {
            Ok(mesh) => self.mesh = Some(mesh),
            Err(err) => tracing::error!("failed to upload text mesh: {err}"),
        }
    }

    pub fn draw(&self, gl: &GL, camera: &PerspectiveCamera, elapsed: f32) {
        let Some(mesh) = &self.mesh else {
            return;
        };
        let model = Mat4::from_euler(
            EulerRot::XYZ,
            (elapsed * 0.5).sin() * 0.1,
            (elapsed * 0.3).cos() * 0.1,
            0.0,
        );

        self.program.bind(gl);
        self.program.set_mat4(gl, "uModel", &model);
        self.program.set_mat4(gl, "uView", &camera.view());
        self.program.set_mat4(gl, "uProjection", &camera.projection());
        self.program.set_f32(gl, "uTime", elapsed);
        self.program.set_vec3(gl, "uColor", self.params.color.to_array());
        self.program
            .set_vec3(gl, "uCameraPosition", camera.position.to_array());

        gl.enable(GL::BLEND);
        gl.blend_func(GL::SRC_ALPHA, GL::ONE);
        gl.depth_mask(false);
        mesh.draw(gl, GL::TRIANGLES);
        gl.depth_mask(true);
        gl.disable(GL::BLEND);
    }
}
