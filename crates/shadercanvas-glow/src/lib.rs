//! OpenGL / OpenGL ES backend for `shadercanvas` via [glow].
//!
//! [`GlowApi`] maps the component's narrow [`GlApi`] capability trait
//! onto a real GL context. The mapping is mechanical: every trait
//! method is one GL call (or a constant-folded variant of one), with
//! the component's enum stage kinds translated to GL constants and the
//! quad vertex data cast to bytes for the buffer upload.
//!
//! # Safety
//!
//! All glow calls are unsafe because they require a valid, current GL
//! context. The host owns context creation and currency: construct a
//! `GlowApi` only from a context that is current on the calling thread,
//! and keep it current for as long as the component runs. The component
//! itself is single-threaded, so no further synchronization is needed.
//!
//! [glow]: https://docs.rs/glow

use glow::HasContext;
use shadercanvas::{GlApi, ShaderStage};

/// A [`GlApi`] implementation over a glow context.
pub struct GlowApi {
    gl: glow::Context,
}

impl GlowApi {
    /// Wraps an already-created context. It must be current on the
    /// calling thread.
    pub fn new(gl: glow::Context) -> Self {
        Self { gl }
    }

    /// Builds the context from a GL symbol loader (the usual path when
    /// the host holds a native window with a current GL context).
    ///
    /// # Safety
    ///
    /// The loader must return valid function pointers for the context
    /// that is current on the calling thread.
    pub unsafe fn from_loader_function<F>(loader: F) -> Self
    where
        F: FnMut(&str) -> *const std::ffi::c_void,
    {
        Self::new(glow::Context::from_loader_function(loader))
    }

    /// The wrapped glow context, for hosts that render other content
    /// around the canvas.
    pub fn raw(&self) -> &glow::Context {
        &self.gl
    }
}

fn stage_constant(stage: ShaderStage) -> u32 {
    match stage {
        ShaderStage::Vertex => glow::VERTEX_SHADER,
        ShaderStage::Fragment => glow::FRAGMENT_SHADER,
    }
}

impl GlApi for GlowApi {
    type ShaderHandle = glow::NativeShader;
    type ProgramHandle = glow::NativeProgram;
    type BufferHandle = glow::NativeBuffer;
    type VertexArrayHandle = glow::NativeVertexArray;
    type UniformLocation = glow::NativeUniformLocation;

    fn create_shader(&self, stage: ShaderStage) -> Option<Self::ShaderHandle> {
        match unsafe { self.gl.create_shader(stage_constant(stage)) } {
            Ok(shader) => Some(shader),
            Err(err) => {
                tracing::warn!(%stage, error = %err, "failed to create shader object");
                None
            }
        }
    }

    fn shader_source(&self, shader: Self::ShaderHandle, source: &str) {
        unsafe { self.gl.shader_source(shader, source) }
    }

    fn compile_shader(&self, shader: Self::ShaderHandle) {
        unsafe { self.gl.compile_shader(shader) }
    }

    fn compile_succeeded(&self, shader: Self::ShaderHandle) -> bool {
        unsafe { self.gl.get_shader_compile_status(shader) }
    }

    fn shader_info_log(&self, shader: Self::ShaderHandle) -> String {
        unsafe { self.gl.get_shader_info_log(shader) }
    }

    fn delete_shader(&self, shader: Self::ShaderHandle) {
        unsafe { self.gl.delete_shader(shader) }
    }

    fn create_program(&self) -> Option<Self::ProgramHandle> {
        match unsafe { self.gl.create_program() } {
            Ok(program) => Some(program),
            Err(err) => {
                tracing::warn!(error = %err, "failed to create program object");
                None
            }
        }
    }

    fn attach_shader(&self, program: Self::ProgramHandle, shader: Self::ShaderHandle) {
        unsafe { self.gl.attach_shader(program, shader) }
    }

    fn detach_shader(&self, program: Self::ProgramHandle, shader: Self::ShaderHandle) {
        unsafe { self.gl.detach_shader(program, shader) }
    }

    fn link_program(&self, program: Self::ProgramHandle) {
        unsafe { self.gl.link_program(program) }
    }

    fn link_succeeded(&self, program: Self::ProgramHandle) -> bool {
        unsafe { self.gl.get_program_link_status(program) }
    }

    fn program_info_log(&self, program: Self::ProgramHandle) -> String {
        unsafe { self.gl.get_program_info_log(program) }
    }

    fn delete_program(&self, program: Self::ProgramHandle) {
        unsafe { self.gl.delete_program(program) }
    }

    fn use_program(&self, program: Option<Self::ProgramHandle>) {
        unsafe { self.gl.use_program(program) }
    }

    fn uniform_location(
        &self,
        program: Self::ProgramHandle,
        name: &str,
    ) -> Option<Self::UniformLocation> {
        unsafe { self.gl.get_uniform_location(program, name) }
    }

    fn attrib_location(&self, program: Self::ProgramHandle, name: &str) -> Option<u32> {
        unsafe { self.gl.get_attrib_location(program, name) }
    }

    fn create_vertex_array(&self) -> Option<Self::VertexArrayHandle> {
        match unsafe { self.gl.create_vertex_array() } {
            Ok(vertex_array) => Some(vertex_array),
            Err(err) => {
                tracing::warn!(error = %err, "failed to create vertex array object");
                None
            }
        }
    }

    fn bind_vertex_array(&self, vertex_array: Option<Self::VertexArrayHandle>) {
        unsafe { self.gl.bind_vertex_array(vertex_array) }
    }

    fn delete_vertex_array(&self, vertex_array: Self::VertexArrayHandle) {
        unsafe { self.gl.delete_vertex_array(vertex_array) }
    }

    fn create_buffer(&self) -> Option<Self::BufferHandle> {
        match unsafe { self.gl.create_buffer() } {
            Ok(buffer) => Some(buffer),
            Err(err) => {
                tracing::warn!(error = %err, "failed to create buffer object");
                None
            }
        }
    }

    fn bind_array_buffer(&self, buffer: Option<Self::BufferHandle>) {
        unsafe { self.gl.bind_buffer(glow::ARRAY_BUFFER, buffer) }
    }

    fn array_buffer_data_f32(&self, data: &[f32]) {
        unsafe {
            self.gl.buffer_data_u8_slice(
                glow::ARRAY_BUFFER,
                bytemuck::cast_slice(data),
                glow::STATIC_DRAW,
            )
        }
    }

    fn delete_buffer(&self, buffer: Self::BufferHandle) {
        unsafe { self.gl.delete_buffer(buffer) }
    }

    fn enable_vertex_attrib_array(&self, index: u32) {
        unsafe { self.gl.enable_vertex_attrib_array(index) }
    }

    fn vertex_attrib_pointer_f32(&self, index: u32, components: i32) {
        unsafe {
            self.gl
                .vertex_attrib_pointer_f32(index, components, glow::FLOAT, false, 0, 0)
        }
    }

    fn viewport(&self, width: i32, height: i32) {
        unsafe { self.gl.viewport(0, 0, width, height) }
    }

    fn clear_color(&self, red: f32, green: f32, blue: f32, alpha: f32) {
        unsafe { self.gl.clear_color(red, green, blue, alpha) }
    }

    fn clear_color_buffer(&self) {
        unsafe { self.gl.clear(glow::COLOR_BUFFER_BIT) }
    }

    fn uniform_1_f32(&self, location: &Self::UniformLocation, x: f32) {
        unsafe { self.gl.uniform_1_f32(Some(location), x) }
    }

    fn uniform_2_f32(&self, location: &Self::UniformLocation, x: f32, y: f32) {
        unsafe { self.gl.uniform_2_f32(Some(location), x, y) }
    }

    fn uniform_3_f32(&self, location: &Self::UniformLocation, x: f32, y: f32, z: f32) {
        unsafe { self.gl.uniform_3_f32(Some(location), x, y, z) }
    }

    fn uniform_4_f32(&self, location: &Self::UniformLocation, x: f32, y: f32, z: f32, w: f32) {
        unsafe { self.gl.uniform_4_f32(Some(location), x, y, z, w) }
    }

    fn draw_triangles(&self, vertex_count: i32) {
        unsafe { self.gl.draw_arrays(glow::TRIANGLES, 0, vertex_count) }
    }
}
