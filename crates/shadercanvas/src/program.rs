use std::collections::HashMap;

use crate::api::{GlApi, ShaderStage};
use crate::compile::compile;
use crate::diagnostics::DiagnosticHub;
use crate::error::{AllocationKind, CanvasError};
use crate::uniforms::UniformDeclaration;

/// Built-in uniforms owned by the runtime rather than the caller.
pub const BUILTIN_RESOLUTION: &str = "resolution";
pub const BUILTIN_MOUSE: &str = "mouse";
pub const BUILTIN_TIME: &str = "time";

/// Vertex attribute carrying the quad corners.
pub const POSITION_ATTRIBUTE: &str = "a_position";

/// Two triangles covering the full clip-space quad, tightly packed as
/// x/y pairs. Uploaded exactly once per linked program.
pub const QUAD_VERTICES: [f32; 12] = [
    -1.0, -1.0, //
    1.0, -1.0, //
    -1.0, 1.0, //
    -1.0, 1.0, //
    1.0, -1.0, //
    1.0, 1.0,
];

pub const QUAD_VERTEX_COUNT: i32 = 6;

/// Uniform/attribute handles resolved once per successful link.
///
/// Entries whose name the program does not reference are kept as `None`
/// so frame code can skip them without re-asking the driver. A table is
/// only meaningful for the program it was built from and is dropped with
/// it on relink.
#[derive(Debug)]
pub struct LocationTable<L> {
    uniforms: HashMap<String, Option<L>>,
    position_attrib: Option<u32>,
}

impl<L> LocationTable<L> {
    /// Usable location for `name`, or `None` when the program does not
    /// reference it (or the name was never resolved).
    pub fn uniform(&self, name: &str) -> Option<&L> {
        self.uniforms.get(name).and_then(|slot| slot.as_ref())
    }

    pub fn position_attrib(&self) -> Option<u32> {
        self.position_attrib
    }
}

/// A linked program plus every GL object whose lifetime it owns: the
/// vertex array, the quad geometry buffer, and the location table.
///
/// Relinking never mutates an existing `ShaderProgram`; the component
/// builds a replacement and destroys this one.
pub struct ShaderProgram<G: GlApi> {
    handle: G::ProgramHandle,
    vertex_array: G::VertexArrayHandle,
    geometry: Option<G::BufferHandle>,
    locations: LocationTable<G::UniformLocation>,
}

impl<G: GlApi> ShaderProgram<G> {
    /// Compiles both stages and links them into a ready-to-draw program.
    ///
    /// Stage compile failures are reported but do not abort; the broken
    /// stage is attached anyway so the link fails with the driver's
    /// combined log. On link failure both stages are detached and
    /// deleted and the half-built program object is released before the
    /// error is returned. On success the stages are likewise deleted
    /// (the program holds the linked binary), locations for the
    /// built-ins and every declared uniform are resolved once, and if
    /// the vertex stage exposes [`POSITION_ATTRIBUTE`] the quad is
    /// uploaded, the viewport and clear state are set, the program is
    /// activated, and one initial draw is issued. A program without the
    /// position attribute links fine but renders nothing.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn link(
        gl: &G,
        vertex_source: &str,
        fragment_source: &str,
        declarations: &[UniformDeclaration],
        buffer_size: (u32, u32),
        pointer: (f32, f32),
        time_seconds: f32,
        diagnostics: &DiagnosticHub,
    ) -> Result<Self, CanvasError> {
        let handle = gl
            .create_program()
            .ok_or(CanvasError::Allocation(AllocationKind::Program))?;

        let vertex = compile(gl, vertex_source, ShaderStage::Vertex, diagnostics)?;
        let fragment = compile(gl, fragment_source, ShaderStage::Fragment, diagnostics)?;

        gl.attach_shader(handle, vertex);
        gl.attach_shader(handle, fragment);
        gl.link_program(handle);

        if !gl.link_succeeded(handle) {
            let log = gl.program_info_log(handle);
            gl.detach_shader(handle, vertex);
            gl.detach_shader(handle, fragment);
            gl.delete_shader(vertex);
            gl.delete_shader(fragment);
            gl.delete_program(handle);
            return Err(CanvasError::Link { log });
        }

        // Stages are not needed once the program holds the linked binary.
        gl.detach_shader(handle, vertex);
        gl.detach_shader(handle, fragment);
        gl.delete_shader(vertex);
        gl.delete_shader(fragment);

        let vertex_array = gl
            .create_vertex_array()
            .ok_or(CanvasError::Allocation(AllocationKind::VertexArray))?;
        gl.bind_vertex_array(Some(vertex_array));

        let mut uniforms = HashMap::new();
        for name in [BUILTIN_RESOLUTION, BUILTIN_MOUSE, BUILTIN_TIME] {
            uniforms.insert(name.to_string(), gl.uniform_location(handle, name));
        }
        for declaration in declarations {
            uniforms
                .entry(declaration.name.clone())
                .or_insert_with(|| gl.uniform_location(handle, &declaration.name));
        }
        let position_attrib = gl.attrib_location(handle, POSITION_ATTRIBUTE);
        let locations = LocationTable {
            uniforms,
            position_attrib,
        };

        let mut program = Self {
            handle,
            vertex_array,
            geometry: None,
            locations,
        };

        if let Some(index) = position_attrib {
            let buffer = gl
                .create_buffer()
                .ok_or(CanvasError::Allocation(AllocationKind::Buffer))?;
            gl.bind_array_buffer(Some(buffer));
            gl.array_buffer_data_f32(&QUAD_VERTICES);
            gl.enable_vertex_attrib_array(index);
            gl.vertex_attrib_pointer_f32(index, 2);

            gl.viewport(buffer_size.0 as i32, buffer_size.1 as i32);
            gl.clear_color(0.0, 0.0, 0.0, 1.0);
            gl.clear_color_buffer();

            gl.use_program(Some(handle));
            program.geometry = Some(buffer);
            program.bind_resolution(gl, (buffer_size.0 as f32, buffer_size.1 as f32));
            program.bind_frame_builtins(gl, pointer, time_seconds);
            program.draw(gl);
        } else {
            tracing::debug!(
                "program has no '{POSITION_ATTRIBUTE}' attribute; skipping geometry and draw"
            );
        }

        tracing::info!(drawable = program.geometry.is_some(), "linked shader program");
        Ok(program)
    }

    pub fn handle(&self) -> G::ProgramHandle {
        self.handle
    }

    pub fn locations(&self) -> &LocationTable<G::UniformLocation> {
        &self.locations
    }

    /// Whether the program has quad geometry to draw.
    pub fn drawable(&self) -> bool {
        self.geometry.is_some()
    }

    /// Resolves locations for declaration names the table has not seen
    /// yet. Runs on prop updates, never per frame.
    pub(crate) fn resolve_declared(&mut self, gl: &G, declarations: &[UniformDeclaration]) {
        for declaration in declarations {
            self.locations
                .uniforms
                .entry(declaration.name.clone())
                .or_insert_with(|| gl.uniform_location(self.handle, &declaration.name));
        }
    }

    fn bind_resolution(&self, gl: &G, resolution: (f32, f32)) {
        if let Some(location) = self.locations.uniform(BUILTIN_RESOLUTION) {
            gl.uniform_2_f32(location, resolution.0, resolution.1);
        }
    }

    /// Writes the per-frame built-ins through the cached locations.
    /// Missing locations mean the shader does not use them; skipped.
    pub(crate) fn bind_frame_builtins(&self, gl: &G, pointer: (f32, f32), time_seconds: f32) {
        if let Some(location) = self.locations.uniform(BUILTIN_MOUSE) {
            gl.uniform_2_f32(location, pointer.0, pointer.1);
        }
        if let Some(location) = self.locations.uniform(BUILTIN_TIME) {
            gl.uniform_1_f32(location, time_seconds);
        }
    }

    pub(crate) fn draw(&self, gl: &G) {
        gl.draw_triangles(QUAD_VERTEX_COUNT);
    }

    /// Releases every GL object the program owns. The context does not
    /// garbage-collect these.
    pub(crate) fn destroy(self, gl: &G) {
        gl.use_program(None);
        if let Some(buffer) = self.geometry {
            gl.delete_buffer(buffer);
        }
        gl.delete_vertex_array(self.vertex_array);
        gl.delete_program(self.handle);
    }
}
