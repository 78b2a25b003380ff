use crate::api::{GlApi, ShaderStage};
use crate::diagnostics::{Diagnostic, DiagnosticHub};
use crate::error::{AllocationKind, CanvasError};

/// Compiles a single stage and returns its handle.
///
/// A compile failure is not fatal here; it is reported through the
/// diagnostic hub and the failed handle is returned so the subsequent
/// link fails with the driver's combined log. Only an allocation
/// failure (the context cannot create a shader object) aborts. The
/// linker owns the handle's lifetime either way.
pub(crate) fn compile<G: GlApi>(
    gl: &G,
    source: &str,
    stage: ShaderStage,
    diagnostics: &DiagnosticHub,
) -> Result<G::ShaderHandle, CanvasError> {
    let handle = gl
        .create_shader(stage)
        .ok_or(CanvasError::Allocation(AllocationKind::Shader))?;
    gl.shader_source(handle, source);
    gl.compile_shader(handle);

    if !gl.compile_succeeded(handle) {
        diagnostics.report(Diagnostic::CompileFailed {
            stage,
            log: gl.shader_info_log(handle),
        });
    }

    Ok(handle)
}
