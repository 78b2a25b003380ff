//! Fragment-shader canvas component.
//!
//! The crate renders a caller-supplied GLSL fragment shader onto a
//! full-surface quad and feeds it `resolution`, `mouse`, and `time`
//! built-ins plus any declared uniforms every frame. The overall flow:
//!
//! ```text
//!   host (mount / props / pointer / refresh ticks)
//!          │ CanvasProps
//!          ▼
//!   ShaderCanvas ──▶ Surface (context) ──▶ ShaderProgram (link + locations)
//!          │                                      │
//!          └─▶ FrameScheduler ─ tick ─▶ built-ins + uniforms ─▶ draw
//! ```
//!
//! `ShaderCanvas` owns every piece of graphics state for one surface:
//! the acquired context, the linked program with its location table and
//! quad geometry, and the repaint loop. The graphics API itself is a
//! trait ([`GlApi`]) covering exactly what the component needs — shader
//! compile, program link, buffer upload, uniform upload, draw — so the
//! production backend (`shadercanvas-glow`) and the test fakes plug into
//! the same seam.
//!
//! Failures split two ways: caller bugs and lost contexts surface as
//! [`CanvasError`]; compile failures and declared-but-unused uniforms
//! are reported as [`Diagnostic`] events and rendering carries on.

mod api;
mod canvas;
mod compile;
mod diagnostics;
mod error;
mod program;
mod scheduler;
mod surface;
mod uniforms;

pub use api::{GlApi, ShaderStage};
pub use canvas::{
    CanvasProps, PointerState, ProgramHandle, ShaderCanvas, ShaderResult, VERTEX_SHADER,
};
pub use diagnostics::{Diagnostic, DiagnosticHub};
pub use error::{AllocationKind, CanvasError};
pub use program::{
    LocationTable, ShaderProgram, BUILTIN_MOUSE, BUILTIN_RESOLUTION, BUILTIN_TIME,
    POSITION_ATTRIBUTE, QUAD_VERTEX_COUNT, QUAD_VERTICES,
};
pub use scheduler::{FrameScheduler, FrameTicket, SchedulerState};
pub use surface::{CanvasSurface, ContextOptions, PowerPreference};
pub use uniforms::{UniformDeclaration, UniformValue};
