use std::collections::HashMap;

use js_sys::Float32Array;
use web_sys::{
    HtmlImageElement, WebGl2RenderingContext as GL, WebGlBuffer, WebGlProgram, WebGlShader,
    WebGlTexture, WebGlUniformLocation, WebGlVertexArrayObject,
};

use crate::error::{Result, SceneError};

/// A linked program plus the uniform locations looked up for it.
pub struct Program {
    pub program: WebGlProgram,
    uniforms: HashMap<&'static str, WebGlUniformLocation>,
}

impl Program {
    pub fn new(
        gl: &GL,
        vertex_src: &str,
        fragment_src: &str,
        uniform_names: &[&'static str],
    ) -> Result<Self> {
        let program = link_program(gl, vertex_src, fragment_src)?;
        let mut uniforms = HashMap::new();
        for &name in uniform_names {
            match gl.get_uniform_location(&program, name) {
                Some(location) => {
                    uniforms.insert(name, location);
                }
                // the driver strips uniforms the shader never reads
                None => tracing::debug!(name, "uniform not active"),
            }
        }
        Ok(Self { program, uniforms })
    }

    pub fn bind(&self, gl: &GL) {
        gl.use_program(Some(&self.program));
    }

    pub fn uniform(&self, name: &str) -> Option<&WebGlUniformLocation> {
        self.uniforms.get(name)
    }

    pub fn set_f32(&self, gl: &GL, name: &str, value: f32) {
        gl.uniform1f(self.uniform(name), value);
    }

    pub fn set_vec2(&self, gl: &GL, name: &str, value: [f32; 2]) {
        gl.uniform2f(self.uniform(name), value[0], value[1]);
    }

    pub fn set_vec3(&self, gl: &GL, name: &str, value: [f32; 3]) {
        gl.uniform3f(self.uniform(name), value[0], value[1], value[2]);
    }

    pub fn set_mat4(&self, gl: &GL, name: &str, value: &glam::Mat4) {
        gl.uniform_matrix4fv_with_f32_array(self.uniform(name), false, &value.to_cols_array());
    }

    pub fn set_i32(&self, gl: &GL, name: &str, value: i32) {
        gl.uniform1i(self.uniform(name), value);
    }
}

fn link_program(gl: &GL, vertex_src: &str, fragment_src: &str) -> Result<WebGlProgram> {
    let vertex_shader = compile_shader(gl, GL::VERTEX_SHADER, vertex_src)?;
    let fragment_shader = compile_shader(gl, GL::FRAGMENT_SHADER, fragment_src)?;
    let program = gl
        .create_program()
        .ok_or(SceneError::Allocation("program"))?;
    gl.attach_shader(&program, &vertex_shader);
    gl.attach_shader(&program, &fragment_shader);
    gl.link_program(&program);

    let linked = gl
        .get_program_parameter(&program, GL::LINK_STATUS)
        .as_bool()
        .unwrap_or(false);
    gl.detach_shader(&program, &vertex_shader);
    gl.detach_shader(&program, &fragment_shader);
    gl.delete_shader(Some(&vertex_shader));
    gl.delete_shader(Some(&fragment_shader));

    if linked {
        Ok(program)
    } else {
        let info = gl
            .get_program_info_log(&program)
            .unwrap_or_else(|| "unknown program error".to_string());
        gl.delete_program(Some(&program));
        Err(SceneError::ProgramLink(info))
    }
}

fn compile_shader(gl: &GL, shader_type: u32, source: &str) -> Result<WebGlShader> {
    let stage = if shader_type == GL::VERTEX_SHADER { "vertex" } else { "fragment" };
    let shader = gl
        .create_shader(shader_type)
        .ok_or(SceneError::Allocation("shader"))?;
    gl.shader_source(&shader, source);
    gl.compile_shader(&shader);
    if gl
        .get_shader_parameter(&shader, GL::COMPILE_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        Ok(shader)
    } else {
        let log = gl
            .get_shader_info_log(&shader)
            .unwrap_or_else(|| "unknown shader error".to_string());
        gl.delete_shader(Some(&shader));
        Err(SceneError::ShaderCompile { stage, log })
    }
}

/// A vertex array with its float attribute buffers.
pub struct Mesh {
    vao: WebGlVertexArrayObject,
    buffers: Vec<WebGlBuffer>,
    pub vertex_count: i32,
}

impl Mesh {
    /// `attributes` pairs each attribute's data with its component count;
    /// attribute `i` is bound to location `i`.
    pub fn new(gl: &GL, attributes: &[(&[f32], i32)]) -> Result<Self> {
        let vao = gl
            .create_vertex_array()
            .ok_or(SceneError::Allocation("vertex array"))?;
        gl.bind_vertex_array(Some(&vao));

        let mut buffers = Vec::with_capacity(attributes.len());
        let mut vertex_count = 0;
        for (location, (data, components)) in attributes.iter().enumerate() {
            let buffer = match gl.create_buffer() {
                Some(buffer) => buffer,
                None => {
                    gl.bind_vertex_array(None);
                    for b in &buffers {
                        gl.delete_buffer(Some(b));
                    }
                    gl.delete_vertex_array(Some(&vao));
                    return Err(SceneError::Allocation("buffer"));
                }
            };
            gl.bind_buffer(GL::ARRAY_BUFFER, Some(&buffer));
            let array = Float32Array::from(*data);
            gl.buffer_data_with_array_buffer_view(GL::ARRAY_BUFFER, &array, GL::STATIC_DRAW);
            let location = location as u32;
            gl.vertex_attrib_pointer_with_i32(location, *components, GL::FLOAT, false, 0, 0);
            gl.enable_vertex_attrib_array(location);

            if location == 0 {
                vertex_count = (data.len() as i32) / components;
            }
            buffers.push(buffer);
        }
        gl.bind_vertex_array(None);
        gl.bind_buffer(GL::ARRAY_BUFFER, None);

        Ok(Self { vao, buffers, vertex_count })
    }

    pub fn draw(&self, gl: &GL, mode: u32) {
        gl.bind_vertex_array(Some(&self.vao));
        gl.draw_arrays(mode, 0, self.vertex_count);
        gl.bind_vertex_array(None);
    }

    pub fn dispose(self, gl: &GL) {
        for buffer in &self.buffers {
            gl.delete_buffer(Some(buffer));
        }
        gl.delete_vertex_array(Some(&self.vao));
    }
}

/// Uploads a decoded image as an RGBA texture, mipmapped, without flipping.
pub fn texture_from_image(gl: &GL, image: &HtmlImageElement) -> Result<WebGlTexture> {
    let texture = gl
        .create_texture()
        .ok_or(SceneError::Allocation("texture"))?;
    gl.bind_texture(GL::TEXTURE_2D, Some(&texture));
    gl.pixel_storei(GL::UNPACK_FLIP_Y_WEBGL, 0);
    gl.tex_image_2d_with_u32_and_u32_and_html_image_element(
        GL::TEXTURE_2D,
        0,
        GL::RGBA as i32,
        GL::RGBA,
        GL::UNSIGNED_BYTE,
        image,
    )?;
    gl.generate_mipmap(GL::TEXTURE_2D);
    gl.tex_parameteri(GL::TEXTURE_2D, GL::TEXTURE_MIN_FILTER, GL::LINEAR_MIPMAP_LINEAR as i32);
    gl.tex_parameteri(GL::TEXTURE_2D, GL::TEXTURE_MAG_FILTER, GL::LINEAR as i32);
    gl.tex_parameteri(GL::TEXTURE_2D, GL::TEXTURE_WRAP_S, GL::CLAMP_TO_EDGE as i32);
    gl.tex_parameteri(GL::TEXTURE_2D, GL::TEXTURE_WRAP_T, GL::CLAMP_TO_EDGE as i32);
    gl.bind_texture(GL::TEXTURE_2D, None);
    Ok(texture)
}
