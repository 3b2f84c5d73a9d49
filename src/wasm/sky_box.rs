use glam::{Mat4, Vec3};
use web_sys::WebGl2RenderingContext as GL;

use super::gl::{Mesh, Program};
use crate::camera::PerspectiveCamera;
use crate::error::Result;
use crate::geometry::inward_cube;
use crate::shaders;
use crate::sky::{SkyParameters, SKY_SCALE};

pub struct SkyBox {
    program: Program,
    cube: Mesh,
    pub params: SkyParameters,
}

impl SkyBox {
    pub fn new(gl: &GL, params: SkyParameters) -> Result<Self> {
        let program = Program::new(
            gl,
            shaders::SKY_VERTEX,
            shaders::SKY_FRAGMENT,
            &[
                "uModel",
                "uView",
                "uProjection",
                "sunPosition",
                "rayleigh",
                "turbidity",
                "mieCoefficient",
                "mieDirectionalG",
                "uExposure",
                "uCameraPosition",
            ],
        )?;
        let vertices = inward_cube();
        let cube = Mesh::new(gl, &[(vertices.as_slice(), 3)])?;
        Ok(Self { program, cube, params })
    }

    pub fn draw(&self, gl: &GL, camera: &PerspectiveCamera) {
        let p = &self.params;
        self.program.bind(gl);
        self.program
            .set_mat4(gl, "uModel", &Mat4::from_scale(Vec3::splat(SKY_SCALE)));
        self.program.set_mat4(gl, "uView", &camera.view());
        self.program.set_mat4(gl, "uProjection", &camera.projection());
        self.program
            .set_vec3(gl, "sunPosition", p.sun_position().to_array());
        self.program.set_f32(gl, "rayleigh", p.rayleigh);
        self.program.set_f32(gl, "turbidity", p.turbidity);
        self.program.set_f32(gl, "mieCoefficient", p.mie_coefficient);
        self.program.set_f32(gl, "mieDirectionalG", p.mie_directional_g);
        self.program.set_f32(gl, "uExposure", p.exposure);
        self.program
            .set_vec3(gl, "uCameraPosition", camera.position.to_array());

        gl.enable(GL::CULL_FACE);
        gl.cull_face(GL::BACK);
        gl.depth_func(GL::LEQUAL);
        gl.depth_mask(false);
        self.cube.draw(gl, GL::TRIANGLES);
        gl.depth_mask(true);
        gl.depth_func(GL::LESS);
        gl.disable(GL::CULL_FACE);
    }
}
