use crate::api::GlApi;
use crate::diagnostics::{Diagnostic, DiagnosticHub};
use crate::error::CanvasError;
use crate::program::LocationTable;

/// A scalar or small float vector pushed to the active program by name.
///
/// Arity is carried by the variant; [`UniformValue::from_components`]
/// infers it from a raw slice for callers that hold dynamic data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    Float(f32),
    Vec2([f32; 2]),
    Vec3([f32; 3]),
    Vec4([f32; 4]),
}

impl UniformValue {
    /// Infers the arity from the component count. One component is a
    /// scalar float, two to four become the matching vector; anything
    /// else is a caller bug.
    pub fn from_components(name: &str, components: &[f32]) -> Result<Self, CanvasError> {
        match *components {
            [x] => Ok(UniformValue::Float(x)),
            [x, y] => Ok(UniformValue::Vec2([x, y])),
            [x, y, z] => Ok(UniformValue::Vec3([x, y, z])),
            [x, y, z, w] => Ok(UniformValue::Vec4([x, y, z, w])),
            _ => Err(CanvasError::InvalidUniformArity {
                name: name.to_string(),
                count: components.len(),
            }),
        }
    }

    pub fn components(&self) -> &[f32] {
        match self {
            UniformValue::Float(x) => std::slice::from_ref(x),
            UniformValue::Vec2(v) => v,
            UniformValue::Vec3(v) => v,
            UniformValue::Vec4(v) => v,
        }
    }
}

/// A caller-declared uniform, re-applied every frame.
#[derive(Debug, Clone, PartialEq)]
pub struct UniformDeclaration {
    pub name: String,
    pub value: UniformValue,
}

impl UniformDeclaration {
    pub fn new(name: impl Into<String>, value: UniformValue) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    /// Builds a declaration from raw components, inferring the arity.
    pub fn from_components(
        name: impl Into<String>,
        components: &[f32],
    ) -> Result<Self, CanvasError> {
        let name = name.into();
        let value = UniformValue::from_components(&name, components)?;
        Ok(Self { name, value })
    }
}

/// Uploads every declared uniform through the cached location table.
///
/// A name without a usable location means the caller declared a uniform
/// the active shader does not use: reported and skipped, never fatal.
/// Built-ins (`resolution`, `mouse`, `time`) do not pass through here;
/// their values are owned by the runtime, not the caller.
pub(crate) fn bind_declared<G: GlApi>(
    gl: &G,
    declarations: &[UniformDeclaration],
    table: &LocationTable<G::UniformLocation>,
    diagnostics: &DiagnosticHub,
) {
    for declaration in declarations {
        let Some(location) = table.uniform(&declaration.name) else {
            diagnostics.report(Diagnostic::UniformNotFound {
                name: declaration.name.clone(),
            });
            continue;
        };
        match declaration.value {
            UniformValue::Float(x) => gl.uniform_1_f32(location, x),
            UniformValue::Vec2([x, y]) => gl.uniform_2_f32(location, x, y),
            UniformValue::Vec3([x, y, z]) => gl.uniform_3_f32(location, x, y, z),
            UniformValue::Vec4([x, y, z, w]) => gl.uniform_4_f32(location, x, y, z, w),
        }
    }
}
