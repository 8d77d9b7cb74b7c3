//! Renderer trait abstraction.

use inkpad_core::session::SketchSession;
use kurbo::Rect;
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Initialization failed: {0}")]
    InitFailed(String),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Stroke rendering algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StrokeMode {
    /// Raw polylines: straight segments between captured points.
    #[default]
    Raw,
    /// Midpoint-smoothed polylines ("optimize" pass): quadratic curves
    /// through midpoints of consecutive point pairs, at 90% line width.
    /// Strokes with fewer than three points fall back to `Raw`.
    Smoothed,
}

/// Context for a single render pass.
pub struct RenderContext<'a> {
    /// The session to render.
    pub session: &'a SketchSession,
    /// Stroke rendering algorithm for this pass.
    pub mode: StrokeMode,
    /// Optional region to restrict the redraw to, in surface coordinates.
    /// `None` repaints the whole surface.
    pub dirty_region: Option<Rect>,
}

impl<'a> RenderContext<'a> {
    /// Create a full-surface render context with raw stroke rendering.
    pub fn new(session: &'a SketchSession) -> Self {
        Self {
            session,
            mode: StrokeMode::default(),
            dirty_region: None,
        }
    }

    /// Set the stroke rendering algorithm.
    pub fn with_mode(mut self, mode: StrokeMode) -> Self {
        self.mode = mode;
        self
    }

    /// Restrict the redraw to a dirty region. Strokes whose bounds do not
    /// intersect it are skipped entirely.
    pub fn with_dirty_region(mut self, region: Option<Rect>) -> Self {
        self.dirty_region = region;
        self
    }
}

/// A renderer turns a session into pixels (or into an external scene).
///
/// Every pass repaints background first and ink second within the region it
/// covers; there is no way to repaint one without the other.
pub trait Renderer {
    fn render(&mut self, ctx: &RenderContext<'_>) -> RenderResult<()>;
}
