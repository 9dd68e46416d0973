//! Renderer trait abstraction.

use inkpage_core::camera::ViewTransform;
use inkpage_core::document::Document;
use inkpage_core::engine::Engine;
use inkpage_core::lasso::Selection;
use inkpage_core::paper::PaperSettings;
use inkpage_core::stroke::Stroke;
use kurbo::{Point, Size};
use peniko::Color;
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("No drawing surface")]
    NoSurface,
    #[error("Encoding failed: {0}")]
    Encode(String),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Context for a single render frame.
pub struct RenderContext<'a> {
    /// The strokes to render.
    pub document: &'a Document,
    /// Current zoom and pan.
    pub view: ViewTransform,
    pub paper: PaperSettings,
    /// Viewport size in logical pixels.
    pub viewport_size: Size,
    /// Device pixel ratio (for HiDPI).
    pub scale_factor: f64,
    /// Strokes drawn with a glow.
    pub selection: Option<&'a Selection>,
    /// The stroke being drawn.
    pub live_stroke: Option<&'a Stroke>,
    /// The lasso polygon being captured, in canvas space.
    pub lasso_polygon: Option<&'a [Point]>,
    /// Selection glow and lasso outline color.
    pub selection_color: Color,
    /// Apply moving-average smoothing before outlining.
    pub smoothing: bool,
}

impl<'a> RenderContext<'a> {
    /// Create a new render context.
    pub fn new(document: &'a Document, viewport_size: Size) -> Self {
        Self {
            document,
            view: ViewTransform::default(),
            paper: PaperSettings::default(),
            viewport_size,
            scale_factor: 1.0,
            selection: None,
            live_stroke: None,
            lasso_polygon: None,
            selection_color: Color::from_rgba8(59, 130, 246, 255), // Blue
            smoothing: true,
        }
    }

    /// Capture everything an engine shows on screen.
    pub fn from_engine(engine: &'a Engine, viewport_size: Size) -> Self {
        Self::new(engine.document(), viewport_size)
            .with_view(*engine.view())
            .with_paper(engine.paper())
            .with_selection(Some(engine.selection()))
            .with_live_stroke(engine.live_stroke())
            .with_lasso(engine.lasso_polygon())
            .with_smoothing(engine.config().smoothing)
    }

    pub fn with_view(mut self, view: ViewTransform) -> Self {
        self.view = view;
        self
    }

    pub fn with_paper(mut self, paper: PaperSettings) -> Self {
        self.paper = paper;
        self
    }

    /// Set the scale factor for HiDPI.
    pub fn with_scale_factor(mut self, scale_factor: f64) -> Self {
        self.scale_factor = scale_factor;
        self
    }

    pub fn with_selection(mut self, selection: Option<&'a Selection>) -> Self {
        self.selection = selection;
        self
    }

    pub fn with_live_stroke(mut self, stroke: Option<&'a Stroke>) -> Self {
        self.live_stroke = stroke;
        self
    }

    pub fn with_lasso(mut self, polygon: Option<&'a [Point]>) -> Self {
        self.lasso_polygon = polygon;
        self
    }

    pub fn with_smoothing(mut self, smoothing: bool) -> Self {
        self.smoothing = smoothing;
        self
    }

    /// Whether a stroke is selected.
    pub fn is_selected(&self, stroke: &Stroke) -> bool {
        self.selection.is_some_and(|s| s.contains(stroke.id()))
    }
}

/// Trait for rendering backends.
pub trait Renderer: Send + Sync {
    /// Draw a full frame: paper, strokes, live stroke and overlays.
    fn build_scene(&mut self, ctx: &RenderContext);

    /// Get the background color (for clearing).
    fn background_color(&self, ctx: &RenderContext) -> Color {
        ctx.paper.paper_color.background()
    }
}
