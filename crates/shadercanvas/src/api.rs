use std::fmt;

/// One half of a shader program.
///
/// Being an enum, a stage value outside vertex/fragment cannot be
/// constructed; backends map these onto their own stage constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

/// Capability surface the component needs from a graphics context.
///
/// This is deliberately narrow: shader compile, program link, one static
/// buffer upload, float uniform upload, and a triangle draw call. Method
/// names follow the `glow` vocabulary so the production backend is a thin
/// mapping; a recording fake implements the same trait for tests.
///
/// Object creation returns `None` when the context cannot allocate the
/// resource (exhausted or lost context); callers treat that as fatal.
/// Location lookups return `None` when the active program does not
/// reference the name, which is tolerated, never dereferenced.
pub trait GlApi {
    type ShaderHandle: Copy + PartialEq + fmt::Debug;
    type ProgramHandle: Copy + PartialEq + fmt::Debug;
    type BufferHandle: Copy + fmt::Debug;
    type VertexArrayHandle: Copy + fmt::Debug;
    type UniformLocation: Clone + fmt::Debug;

    fn create_shader(&self, stage: ShaderStage) -> Option<Self::ShaderHandle>;
    fn shader_source(&self, shader: Self::ShaderHandle, source: &str);
    fn compile_shader(&self, shader: Self::ShaderHandle);
    fn compile_succeeded(&self, shader: Self::ShaderHandle) -> bool;
    fn shader_info_log(&self, shader: Self::ShaderHandle) -> String;
    fn delete_shader(&self, shader: Self::ShaderHandle);

    fn create_program(&self) -> Option<Self::ProgramHandle>;
    fn attach_shader(&self, program: Self::ProgramHandle, shader: Self::ShaderHandle);
    fn detach_shader(&self, program: Self::ProgramHandle, shader: Self::ShaderHandle);
    fn link_program(&self, program: Self::ProgramHandle);
    fn link_succeeded(&self, program: Self::ProgramHandle) -> bool;
    fn program_info_log(&self, program: Self::ProgramHandle) -> String;
    fn delete_program(&self, program: Self::ProgramHandle);
    /// Binds the program for drawing; `None` unbinds.
    fn use_program(&self, program: Option<Self::ProgramHandle>);

    fn uniform_location(
        &self,
        program: Self::ProgramHandle,
        name: &str,
    ) -> Option<Self::UniformLocation>;
    fn attrib_location(&self, program: Self::ProgramHandle, name: &str) -> Option<u32>;

    fn create_vertex_array(&self) -> Option<Self::VertexArrayHandle>;
    fn bind_vertex_array(&self, vertex_array: Option<Self::VertexArrayHandle>);
    fn delete_vertex_array(&self, vertex_array: Self::VertexArrayHandle);

    fn create_buffer(&self) -> Option<Self::BufferHandle>;
    fn bind_array_buffer(&self, buffer: Option<Self::BufferHandle>);
    /// Uploads static vertex data into the bound array buffer.
    fn array_buffer_data_f32(&self, data: &[f32]);
    fn delete_buffer(&self, buffer: Self::BufferHandle);
    fn enable_vertex_attrib_array(&self, index: u32);
    /// Describes a tightly packed, unnormalized float attribute.
    fn vertex_attrib_pointer_f32(&self, index: u32, components: i32);

    fn viewport(&self, width: i32, height: i32);
    fn clear_color(&self, red: f32, green: f32, blue: f32, alpha: f32);
    fn clear_color_buffer(&self);

    fn uniform_1_f32(&self, location: &Self::UniformLocation, x: f32);
    fn uniform_2_f32(&self, location: &Self::UniformLocation, x: f32, y: f32);
    fn uniform_3_f32(&self, location: &Self::UniformLocation, x: f32, y: f32, z: f32);
    fn uniform_4_f32(&self, location: &Self::UniformLocation, x: f32, y: f32, z: f32, w: f32);

    /// Issues one triangle-list draw of `vertex_count` vertices.
    fn draw_triangles(&self, vertex_count: i32);
}
