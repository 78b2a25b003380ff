use crate::api::GlApi;

/// GPU selection hint forwarded to context acquisition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PowerPreference {
    /// Let the platform pick.
    #[default]
    NoPreference,
    LowPower,
    HighPerformance,
}

/// Options applied when acquiring the graphics context.
///
/// Mirrors the attribute record of canvas-style context creation; every
/// field can be overridden by the caller through
/// [`CanvasProps`](crate::CanvasProps).
#[derive(Debug, Clone, PartialEq)]
pub struct ContextOptions {
    /// Back buffer carries an alpha channel.
    pub alpha: bool,
    /// Multisample antialiasing; off by default, fragment shaders cover
    /// every pixel anyway.
    pub antialias: bool,
    /// Allocate a depth buffer.
    pub depth: bool,
    /// Hint that presentation may bypass compositor synchronization.
    pub desynchronized: bool,
    /// `Some(true)` refuses a context that would fall back to software.
    pub fail_if_major_performance_caveat: Option<bool>,
    pub power_preference: PowerPreference,
    /// Back buffer colors are premultiplied by alpha.
    pub premultiplied_alpha: bool,
    /// Keep the back buffer contents after presentation.
    pub preserve_drawing_buffer: bool,
    /// Allocate a stencil buffer.
    pub stencil: bool,
}

impl Default for ContextOptions {
    fn default() -> Self {
        Self {
            alpha: true,
            antialias: false,
            depth: true,
            desynchronized: true,
            fail_if_major_performance_caveat: None,
            power_preference: PowerPreference::NoPreference,
            premultiplied_alpha: true,
            preserve_drawing_buffer: false,
            stencil: false,
        }
    }
}

/// The drawable element a host mounts the component on.
///
/// Hosts implement this for their window/widget type; tests implement it
/// with a fake. `acquire_context` returns `None` when the platform lacks
/// the required capabilities, which downstream code treats as "stay
/// inert", not as an error.
pub trait CanvasSurface {
    type Api: GlApi;

    /// Acquires a context honoring `options` as far as the platform allows.
    fn acquire_context(&mut self, options: &ContextOptions) -> Option<Self::Api>;
    /// Current layout size of the element in logical pixels.
    fn layout_size(&self) -> (u32, u32);
    /// Current size of the backing pixel buffer.
    fn buffer_size(&self) -> (u32, u32);
    /// Resizes the backing pixel buffer.
    fn set_buffer_size(&mut self, width: u32, height: u32);
}

/// Owns the surface element and the context acquired from it.
///
/// The context lives exactly as long as the mount: [`Surface::bind`] on
/// mount, [`Surface::release`] on unmount. Collaborators borrow the
/// context through [`Surface::context`]; it is never shared outside the
/// owning component instance.
pub(crate) struct Surface<S: CanvasSurface> {
    element: S,
    context: Option<S::Api>,
}

impl<S: CanvasSurface> Surface<S> {
    pub fn new(element: S) -> Self {
        Self {
            element,
            context: None,
        }
    }

    /// Acquires the context. Returns whether one is now available;
    /// an unsupported host logs and leaves the surface inert.
    pub fn bind(&mut self, options: &ContextOptions) -> bool {
        if self.context.is_some() {
            return true;
        }
        match self.element.acquire_context(options) {
            Some(context) => {
                tracing::info!("acquired graphics context");
                self.context = Some(context);
                true
            }
            None => {
                tracing::info!("graphics capabilities unavailable; surface stays inert");
                false
            }
        }
    }

    pub fn release(&mut self) {
        self.context = None;
    }

    pub fn context(&self) -> Option<&S::Api> {
        self.context.as_ref()
    }

    pub fn element(&self) -> &S {
        &self.element
    }

    pub fn element_mut(&mut self) -> &mut S {
        &mut self.element
    }

    pub fn layout_size(&self) -> (u32, u32) {
        self.element.layout_size()
    }

    pub fn buffer_size(&self) -> (u32, u32) {
        self.element.buffer_size()
    }

    /// Matches the backing buffer to the element's layout size scaled by
    /// `pixel_ratio`. Only writes when the size actually differs, so an
    /// unchanged layout never clears existing buffer content.
    pub fn sync_size(&mut self, pixel_ratio: f32) -> bool {
        let (layout_w, layout_h) = self.element.layout_size();
        let ratio = if pixel_ratio > 0.0 { pixel_ratio } else { 1.0 };
        let target_w = (layout_w as f32 * ratio).round() as u32;
        let target_h = (layout_h as f32 * ratio).round() as u32;
        if (target_w, target_h) == self.element.buffer_size() {
            return false;
        }
        tracing::debug!(width = target_w, height = target_h, "resizing backing buffer");
        self.element.set_buffer_size(target_w, target_h);
        true
    }
}
