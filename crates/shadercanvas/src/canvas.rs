use crate::api::GlApi;
use crate::diagnostics::DiagnosticHub;
use crate::error::CanvasError;
use crate::program::ShaderProgram;
use crate::scheduler::{FrameScheduler, FrameTicket, SchedulerState};
use crate::surface::{CanvasSurface, ContextOptions, Surface};
use crate::uniforms::{bind_declared, UniformDeclaration};

/// Fixed pass-through vertex stage; callers supply only the fragment.
pub const VERTEX_SHADER: &str = "#version 300 es
in vec4 a_position;
void main() {
    gl_Position = a_position;
}
";

/// Caller-facing configuration, applied at mount and on every update.
///
/// Visual styling and layout of the element (size, position, CSS-like
/// attributes) stay with the host; the component only reads the layout
/// size the host settled on.
#[derive(Debug, Clone, PartialEq)]
pub struct CanvasProps {
    /// Fragment stage source, compiled verbatim.
    pub glsl: String,
    /// Uniform declarations re-applied every frame; values may change
    /// between frames.
    pub uniforms: Vec<UniformDeclaration>,
    /// When false, pointer events stop updating the `mouse` built-in.
    pub enable_mouse: bool,
    /// When false, the `time` built-in stays frozen at its last value.
    pub enable_time: bool,
    /// Backing-buffer resolution relative to the layout size.
    pub pixel_ratio: f32,
    /// Overrides for context acquisition.
    pub context_options: ContextOptions,
}

impl CanvasProps {
    pub fn new(glsl: impl Into<String>) -> Self {
        Self {
            glsl: glsl.into(),
            ..Self::default()
        }
    }
}

impl Default for CanvasProps {
    fn default() -> Self {
        Self {
            glsl: String::new(),
            uniforms: Vec::new(),
            enable_mouse: true,
            enable_time: true,
            pixel_ratio: 1.0,
            context_options: ContextOptions::default(),
        }
    }
}

/// What the caller gets back after mount or a prop update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShaderResult<P> {
    /// Bumped on every successful (re)link.
    pub id: u64,
    /// Handle of the linked program, if one exists.
    pub program: Option<P>,
    /// True when a linked program with drawable geometry exists.
    pub ready: bool,
}

/// Normalized pointer position over the surface.
///
/// Both axes live in `[0, 1]`; the vertical axis is flipped relative to
/// raw pixel input so the origin sits at the bottom-left, matching
/// shader conventions. Mutated by pointer-move events, read by the
/// frame tick; last write wins, at most one frame stale.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerState {
    x: f32,
    y: f32,
}

impl PointerState {
    /// Records a raw pixel position against the given layout size.
    pub fn set_from_pixels(&mut self, x: f64, y: f64, layout: (u32, u32)) {
        let (width, height) = layout;
        if width == 0 || height == 0 {
            return;
        }
        self.x = (x / width as f64).clamp(0.0, 1.0) as f32;
        self.y = (1.0 - y / height as f64).clamp(0.0, 1.0) as f32;
    }

    pub fn position(&self) -> (f32, f32) {
        (self.x, self.y)
    }
}

/// Renders a fragment shader onto a full-surface quad.
///
/// The component owns the surface, the graphics context acquired from
/// it, the active program, and the repaint loop; collaborators receive
/// the context by injection, never through globals. The host drives it
/// with lifecycle calls:
///
/// ```text
///   mount ──▶ acquire context ──▶ link ──▶ initial draw
///     │                                        │
///     │   take_frame_request ◀── FrameTicket ──┘
///     │        │
///     │        └─▶ frame(ticket, t) ─▶ built-ins + uniforms + draw ─▶ re-arm
///     │
///   update(props) ─▶ relink when the source changed by value
///   unmount ─▶ cancel loop, release GL objects and context
/// ```
pub struct ShaderCanvas<S: CanvasSurface> {
    surface: Surface<S>,
    props: CanvasProps,
    program: Option<ShaderProgram<S::Api>>,
    scheduler: FrameScheduler,
    pointer: PointerState,
    diagnostics: DiagnosticHub,
    pending_tick: Option<FrameTicket>,
    result_id: u64,
    mounted: bool,
}

impl<S: CanvasSurface> ShaderCanvas<S> {
    pub fn new(element: S, props: CanvasProps) -> Self {
        Self {
            surface: Surface::new(element),
            props,
            program: None,
            scheduler: FrameScheduler::new(),
            pointer: PointerState::default(),
            diagnostics: DiagnosticHub::new(),
            pending_tick: None,
            result_id: 0,
            mounted: false,
        }
    }

    /// Mounts the component: acquires a context, sizes the backing
    /// buffer, and links the first program.
    ///
    /// A host without the required graphics capabilities is not an
    /// error; the component stays inert (`ready: false`) until
    /// unmounted. A failed link is returned as an error and leaves the
    /// component in its previous state.
    pub fn mount(&mut self) -> Result<ShaderResult<ProgramHandle<S>>, CanvasError> {
        self.mounted = true;
        if !self.surface.bind(&self.props.context_options) {
            return Ok(self.result());
        }
        self.surface.sync_size(self.props.pixel_ratio);
        self.relink()?;
        Ok(self.result())
    }

    /// Applies a prop change. The program is relinked only when the
    /// fragment source changed by value; everything else is picked up
    /// by the next tick.
    pub fn update(&mut self, props: CanvasProps) -> Result<ShaderResult<ProgramHandle<S>>, CanvasError> {
        let source_changed = props.glsl != self.props.glsl;
        let ratio_changed = props.pixel_ratio != self.props.pixel_ratio;
        self.props = props;

        if !self.mounted || self.surface.context().is_none() {
            return Ok(self.result());
        }
        if ratio_changed {
            self.surface.sync_size(self.props.pixel_ratio);
        }
        if source_changed {
            self.relink()?;
        } else if let (Some(program), Some(gl)) = (self.program.as_mut(), self.surface.context()) {
            // New declaration names need locations; resolved here once,
            // not per frame.
            program.resolve_declared(gl, &self.props.uniforms);
        }
        Ok(self.result())
    }

    /// Records a pointer-move event in surface pixel coordinates.
    pub fn pointer_moved(&mut self, x: f64, y: f64) {
        if !self.props.enable_mouse {
            return;
        }
        self.pointer.set_from_pixels(x, y, self.surface.layout_size());
    }

    /// Re-checks the element's layout size, resizing the backing buffer
    /// if it changed. Returns whether a resize happened.
    pub fn handle_resize(&mut self) -> bool {
        self.surface.sync_size(self.props.pixel_ratio)
    }

    /// Takes the armed tick, if any. The host exchanges it for a
    /// [`ShaderCanvas::frame`] call on the next display refresh; at most
    /// one ticket is outstanding at a time.
    pub fn take_frame_request(&mut self) -> Option<FrameTicket> {
        self.pending_tick.take()
    }

    /// Runs one tick of the repaint loop.
    ///
    /// `timestamp_ms` is the host's display-refresh timestamp in
    /// milliseconds. A stale ticket (the loop was cancelled or replaced
    /// since it was issued) is a no-op. A missing context or drawable
    /// program stops the loop without re-arming, so no callback chain
    /// outlives a torn-down target.
    pub fn frame(&mut self, ticket: FrameTicket, timestamp_ms: f64) {
        if !self.scheduler.begin_tick(&ticket) {
            return;
        }
        let Some(gl) = self.surface.context() else {
            self.scheduler.halt();
            return;
        };
        let Some(program) = self.program.as_ref() else {
            self.scheduler.halt();
            return;
        };
        if !program.drawable() {
            self.scheduler.halt();
            return;
        }

        if self.props.enable_time {
            self.scheduler.advance(timestamp_ms);
        }

        program.bind_frame_builtins(gl, self.pointer.position(), self.scheduler.time_seconds());
        bind_declared(gl, &self.props.uniforms, program.locations(), &self.diagnostics);
        program.draw(gl);

        self.pending_tick = Some(self.scheduler.reschedule());
    }

    /// Unmounts the component: cancels any pending tick and releases
    /// the program's GL objects and the context.
    pub fn unmount(&mut self) {
        self.scheduler.cancel();
        self.pending_tick = None;
        if let Some(program) = self.program.take() {
            if let Some(gl) = self.surface.context() {
                program.destroy(gl);
            }
        }
        self.surface.release();
        self.mounted = false;
    }

    pub fn result(&self) -> ShaderResult<ProgramHandle<S>> {
        ShaderResult {
            id: self.result_id,
            program: self.program.as_ref().map(|program| program.handle()),
            ready: self
                .program
                .as_ref()
                .map_or(false, |program| program.drawable()),
        }
    }

    /// Reported-but-not-fatal conditions (compile failures, undeclared
    /// uniforms) accumulate here.
    pub fn diagnostics(&self) -> &DiagnosticHub {
        &self.diagnostics
    }

    pub fn scheduler_state(&self) -> SchedulerState {
        self.scheduler.state()
    }

    pub fn pointer(&self) -> (f32, f32) {
        self.pointer.position()
    }

    pub fn element(&self) -> &S {
        self.surface.element()
    }

    pub fn element_mut(&mut self) -> &mut S {
        self.surface.element_mut()
    }

    /// Links a replacement program and swaps it in.
    ///
    /// The replacement is built before the active program is touched, so
    /// a failed relink leaves the last good program (and its running
    /// loop) on screen instead of going blank.
    fn relink(&mut self) -> Result<(), CanvasError> {
        let Some(gl) = self.surface.context() else {
            return Ok(());
        };
        let next = ShaderProgram::link(
            gl,
            VERTEX_SHADER,
            &self.props.glsl,
            &self.props.uniforms,
            self.surface.buffer_size(),
            self.pointer.position(),
            self.scheduler.time_seconds(),
            &self.diagnostics,
        )?;

        if let Some(previous) = self.program.take() {
            previous.destroy(gl);
            if next.drawable() {
                // destroy() unbinds the pipeline; the replacement must
                // be the active program for the ticks that follow.
                gl.use_program(Some(next.handle()));
            }
        }
        self.pending_tick = if next.drawable() {
            Some(self.scheduler.start())
        } else {
            // Degenerate shader: linked, but nothing to draw. The old
            // loop must still die with the old program.
            self.scheduler.cancel();
            None
        };
        self.program = Some(next);
        self.result_id += 1;
        Ok(())
    }
}

/// Program handle type produced by a surface's graphics API.
pub type ProgramHandle<S> = <<S as CanvasSurface>::Api as GlApi>::ProgramHandle;
