use std::fmt;

/// Which GL object kind the context failed to hand out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllocationKind {
    Shader,
    Program,
    Buffer,
    VertexArray,
}

impl fmt::Display for AllocationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AllocationKind::Shader => f.write_str("shader"),
            AllocationKind::Program => f.write_str("program"),
            AllocationKind::Buffer => f.write_str("buffer"),
            AllocationKind::VertexArray => f.write_str("vertex array"),
        }
    }
}

/// Fatal failures surfaced to the caller.
///
/// Compile failures and missing uniform locations are deliberately not
/// here: they are reported through [`Diagnostic`](crate::Diagnostic)
/// and rendering continues (a failed compile surfaces as a link error).
#[derive(Debug, thiserror::Error)]
pub enum CanvasError {
    /// Caller bug: a declared uniform value with a component count the
    /// shader pipeline cannot dispatch.
    #[error("uniform '{name}' carries {count} components; expected 1 to 4")]
    InvalidUniformArity { name: String, count: usize },
    /// The context could not allocate a GL object; it is exhausted or lost.
    #[error("graphics context failed to allocate a {0} object")]
    Allocation(AllocationKind),
    /// Both stages were attached but the program did not link. Stage
    /// objects have already been detached and deleted by the time this
    /// is returned.
    #[error("shader program failed to link:\n{log}")]
    Link { log: String },
}
