//! Rendering: uploads a [`GeometryBuffer`] and draws it with WebGL2.
//!
//! This module is the only place that touches [`web_sys::WebGl2RenderingContext`].
//! It receives a read-only buffer and colors and produces pixels. It does
//! not mutate any application state.
//!
//! GPU objects (program, vertex array, one vertex buffer, one index buffer)
//! are created once in [`Renderer::new`] and released on drop. Buffers grow
//! geometrically and are otherwise refilled in place, so a frame costs two
//! uploads and two draw calls no matter how many segments there are.
//!
//! Every entry point checks for a lost context first and reports
//! [`CanvasError::ContextLost`]. Recovery is the host's job.

use js_sys::{Float32Array, Uint32Array};
use web_sys::{
    WebGl2RenderingContext as Gl, WebGlBuffer, WebGlProgram, WebGlShader, WebGlUniformLocation,
    WebGlVertexArrayObject,
};

use crate::buffer::GeometryBuffer;
use crate::config::Rgb;
use crate::error::{CanvasError, Result};

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

const POSITION_ATTRIB: u32 = 0;

const VERTEX_SHADER: &str = r"#version 300 es
layout(location = 0) in vec2 position;
uniform float u_point_size;
void main() {
    gl_Position = vec4(position, 0.0, 1.0);
    gl_PointSize = u_point_size;
}
";

const FRAGMENT_SHADER: &str = r"#version 300 es
precision mediump float;
uniform vec3 u_color;
out vec4 out_color;
void main() {
    out_color = vec4(u_color, 1.0);
}
";

/// Owns every GPU resource used to draw the diagram.
pub struct Renderer {
    gl: Gl,
    program: WebGlProgram,
    vao: WebGlVertexArrayObject,
    position_buffer: WebGlBuffer,
    index_buffer: WebGlBuffer,
    u_color: WebGlUniformLocation,
    u_point_size: WebGlUniformLocation,
    /// Allocated sizes in elements (not bytes).
    position_capacity: usize,
    index_capacity: usize,
}

impl Renderer {
    /// Compile shaders and allocate GPU objects.
    ///
    /// # Errors
    ///
    /// [`CanvasError::ContextLost`] if the context is gone or refuses to
    /// allocate, [`CanvasError::Shader`] if compilation or linking fails.
    pub fn new(gl: Gl) -> Result<Self> {
        if gl.is_context_lost() {
            return Err(CanvasError::ContextLost);
        }

        let program = link_program(&gl, VERTEX_SHADER, FRAGMENT_SHADER)?;
        let u_color = uniform(&gl, &program, "u_color")?;
        let u_point_size = uniform(&gl, &program, "u_point_size")?;

        let vao = gl.create_vertex_array().ok_or(CanvasError::ContextLost)?;
        let position_buffer = gl.create_buffer().ok_or(CanvasError::ContextLost)?;
        let index_buffer = gl.create_buffer().ok_or(CanvasError::ContextLost)?;

        // The VAO records the attribute layout and the element binding.
        gl.bind_vertex_array(Some(&vao));
        gl.bind_buffer(Gl::ARRAY_BUFFER, Some(&position_buffer));
        gl.enable_vertex_attrib_array(POSITION_ATTRIB);
        gl.vertex_attrib_pointer_with_i32(POSITION_ATTRIB, 2, Gl::FLOAT, false, 0, 0);
        gl.bind_buffer(Gl::ELEMENT_ARRAY_BUFFER, Some(&index_buffer));
        gl.bind_vertex_array(None);

        log::info!("webgl2 renderer ready");
        Ok(Self {
            gl,
            program,
            vao,
            position_buffer,
            index_buffer,
            u_color,
            u_point_size,
            position_capacity: 0,
            index_capacity: 0,
        })
    }

    /// Clear the frame to `background`.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::ContextLost`] if the context is gone.
    pub fn clear(&self, background: Rgb) -> Result<()> {
        self.ensure_context()?;
        let [r, g, b] = background.normalized();
        self.gl.clear_color(r, g, b, 1.0);
        self.gl.clear(Gl::COLOR_BUFFER_BIT);
        Ok(())
    }

    /// Upload `buffer` and draw its segments as lines and its vertices as points.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::ContextLost`] if the context is gone before or
    /// after the draw.
    pub fn draw(&mut self, buffer: &GeometryBuffer, foreground: Rgb, point_size: f32) -> Result<()> {
        self.ensure_context()?;
        if buffer.is_empty() {
            return Ok(());
        }
        let vertex_count = gl_count(buffer.vertex_count())?;
        let index_count = gl_count(buffer.index_count())?;

        self.gl.use_program(Some(&self.program));
        self.gl.bind_vertex_array(Some(&self.vao));

        self.upload_positions(buffer.positions())?;
        self.upload_indices(buffer.indices())?;

        let [r, g, b] = foreground.normalized();
        self.gl.uniform3f(Some(&self.u_color), r, g, b);
        self.gl.uniform1f(Some(&self.u_point_size), point_size);

        self.gl.draw_elements_with_i32(Gl::LINES, index_count, Gl::UNSIGNED_INT, 0);
        self.gl.draw_arrays(Gl::POINTS, 0, vertex_count);

        self.gl.bind_vertex_array(None);
        self.ensure_context()
    }

    /// Forward the drawing-buffer size to `gl.viewport`.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::ContextLost`] if the context is gone.
    pub fn set_viewport(&self, width: u32, height: u32) -> Result<()> {
        self.ensure_context()?;
        self.gl.viewport(0, 0, gl_count(width as usize)?, gl_count(height as usize)?);
        Ok(())
    }

    fn ensure_context(&self) -> Result<()> {
        if self.gl.is_context_lost() {
            log::error!("webgl2 context lost");
            return Err(CanvasError::ContextLost);
        }
        Ok(())
    }

    fn upload_positions(&mut self, data: &[f32]) -> Result<()> {
        self.gl.bind_buffer(Gl::ARRAY_BUFFER, Some(&self.position_buffer));
        self.position_capacity = reserve(&self.gl, Gl::ARRAY_BUFFER, data.len(), self.position_capacity)?;
        // SAFETY: the view is handed to GL before any allocation can occur,
        // so the wasm memory it aliases cannot be moved underneath it.
        let view = unsafe { Float32Array::view(data) };
        self.gl.buffer_sub_data_with_i32_and_array_buffer_view(Gl::ARRAY_BUFFER, 0, &view);
        Ok(())
    }

    fn upload_indices(&mut self, data: &[u32]) -> Result<()> {
        self.gl.bind_buffer(Gl::ELEMENT_ARRAY_BUFFER, Some(&self.index_buffer));
        self.index_capacity = reserve(&self.gl, Gl::ELEMENT_ARRAY_BUFFER, data.len(), self.index_capacity)?;
        // SAFETY: as in `upload_positions`.
        let view = unsafe { Uint32Array::view(data) };
        self.gl.buffer_sub_data_with_i32_and_array_buffer_view(Gl::ELEMENT_ARRAY_BUFFER, 0, &view);
        Ok(())
    }
}

impl Drop for Renderer {
    fn drop(&mut self) {
        self.gl.delete_buffer(Some(&self.position_buffer));
        self.gl.delete_buffer(Some(&self.index_buffer));
        self.gl.delete_vertex_array(Some(&self.vao));
        self.gl.delete_program(Some(&self.program));
        log::debug!("webgl2 renderer released");
    }
}

// =============================================================
// Helpers
// =============================================================

/// Capacity, in elements, a buffer needs to hold `len` elements, or `None`
/// when `capacity` already suffices and the data can be refilled in place.
fn grown_capacity(len: usize, capacity: usize) -> Option<usize> {
    (len > capacity).then(|| len.next_power_of_two())
}

/// Grow the bound buffer to hold `len` 4-byte elements. Returns the new capacity.
fn reserve(gl: &Gl, target: u32, len: usize, capacity: usize) -> Result<usize> {
    let Some(grown) = grown_capacity(len, capacity) else {
        return Ok(capacity);
    };
    let bytes = grown
        .checked_mul(4)
        .ok_or_else(|| CanvasError::invalid(format!("{grown} elements exceed the WebGL size limit")))?;
    gl.buffer_data_with_i32(target, gl_count(bytes)?, Gl::DYNAMIC_DRAW);
    log::debug!("grew gl buffer {target:#x} from {capacity} to {grown} elements");
    Ok(grown)
}

fn gl_count(n: usize) -> Result<i32> {
    i32::try_from(n).map_err(|_| CanvasError::invalid(format!("{n} exceeds the WebGL size limit")))
}

fn uniform(gl: &Gl, program: &WebGlProgram, name: &str) -> Result<WebGlUniformLocation> {
    gl.get_uniform_location(program, name)
        .ok_or_else(|| CanvasError::Shader(format!("uniform `{name}` not found")))
}

fn compile_shader(gl: &Gl, source: &str, kind: u32) -> Result<WebGlShader> {
    let shader = gl.create_shader(kind).ok_or(CanvasError::ContextLost)?;
    gl.shader_source(&shader, source);
    gl.compile_shader(&shader);

    if gl.get_shader_parameter(&shader, Gl::COMPILE_STATUS).as_bool().unwrap_or(false) {
        Ok(shader)
    } else {
        let info = gl.get_shader_info_log(&shader).unwrap_or_default();
        gl.delete_shader(Some(&shader));
        Err(CanvasError::Shader(info))
    }
}

fn link_program(gl: &Gl, vertex_source: &str, fragment_source: &str) -> Result<WebGlProgram> {
    let vertex = compile_shader(gl, vertex_source, Gl::VERTEX_SHADER)?;
    let fragment = compile_shader(gl, fragment_source, Gl::FRAGMENT_SHADER)?;
    let program = gl.create_program().ok_or(CanvasError::ContextLost)?;
    gl.attach_shader(&program, &vertex);
    gl.attach_shader(&program, &fragment);
    gl.link_program(&program);

    // Shaders are owned by the program once linked.
    gl.delete_shader(Some(&vertex));
    gl.delete_shader(Some(&fragment));

    if gl.get_program_parameter(&program, Gl::LINK_STATUS).as_bool().unwrap_or(false) {
        Ok(program)
    } else {
        let info = gl.get_program_info_log(&program).unwrap_or_default();
        gl.delete_program(Some(&program));
        Err(CanvasError::Shader(info))
    }
}
