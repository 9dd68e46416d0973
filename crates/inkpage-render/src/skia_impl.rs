//! CPU raster renderer backed by tiny-skia.

use crate::ink::{InkBlend, InkStyle, ink_style, with_opacity};
use crate::outline::{OutlineOptions, stroke_path};
use crate::paper::{DOT_RADIUS, LINE_WIDTH, PaperPattern};
use crate::renderer::{RenderContext, RenderResult, Renderer, RendererError};
use inkpage_core::stroke::Stroke;
use kurbo::{Affine, BezPath, PathEl, Point, Size};
use peniko::Color;
use tiny_skia::{
    BlendMode, FillRule, LineCap, LineJoin, Paint, PathBuilder, Pixmap, StrokeDash, Transform,
};

/// Selection glow width in screen pixels.
const GLOW_WIDTH: f64 = 6.0;
const GLOW_OPACITY: f32 = 0.45;

/// Lasso outline width and dash pattern in screen pixels.
const LASSO_WIDTH: f64 = 1.5;
const LASSO_DASH: [f32; 2] = [6.0, 4.0];

/// Renders frames into an RGBA pixel buffer.
pub struct SkiaRenderer {
    /// `None` when the surface has zero area.
    pixmap: Option<Pixmap>,
}

impl SkiaRenderer {
    /// Create a renderer with a `width` x `height` pixel surface.
    pub fn new(width: u32, height: u32) -> Self {
        let pixmap = Pixmap::new(width, height);
        if pixmap.is_none() {
            log::warn!("Cannot allocate a {}x{} surface; rendering disabled", width, height);
        }
        Self { pixmap }
    }

    /// Replace the surface. Existing content is discarded.
    pub fn resize(&mut self, width: u32, height: u32) {
        if self.size() != Some((width, height)) {
            *self = Self::new(width, height);
        }
    }

    /// Surface size in pixels.
    pub fn size(&self) -> Option<(u32, u32)> {
        self.pixmap.as_ref().map(|p| (p.width(), p.height()))
    }

    pub fn pixmap(&self) -> Option<&Pixmap> {
        self.pixmap.as_ref()
    }

    /// Unpremultiplied RGBA of one pixel.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let color = self.pixmap.as_ref()?.pixel(x, y)?.demultiply();
        Some([color.red(), color.green(), color.blue(), color.alpha()])
    }

    /// Encode the current surface as PNG.
    pub fn export_png(&self) -> RenderResult<Vec<u8>> {
        let pixmap = self.pixmap.as_ref().ok_or(RendererError::NoSurface)?;
        let rgba: Vec<u8> = pixmap
            .pixels()
            .iter()
            .flat_map(|p| {
                let c = p.demultiply();
                [c.red(), c.green(), c.blue(), c.alpha()]
            })
            .collect();
        let png_data = encode_png(&rgba, pixmap.width(), pixmap.height())?;
        log::info!(
            "Exported {}x{} PNG ({} bytes)",
            pixmap.width(),
            pixmap.height(),
            png_data.len()
        );
        Ok(png_data)
    }

    fn render_paper(pixmap: &mut Pixmap, ctx: &RenderContext) {
        let screen = to_skia_transform(Affine::scale(ctx.scale_factor));
        let pattern = PaperPattern::new(ctx.paper.paper_type, ctx.viewport_size);
        if pattern.is_empty() {
            return;
        }
        let paint = solid_paint(ctx.paper.paper_color.pattern(), BlendMode::SourceOver);

        if !pattern.lines.is_empty() {
            let mut pb = PathBuilder::new();
            for line in &pattern.lines {
                pb.move_to(line.p0.x as f32, line.p0.y as f32);
                pb.line_to(line.p1.x as f32, line.p1.y as f32);
            }
            if let Some(path) = pb.finish() {
                let stroke = tiny_skia::Stroke {
                    width: LINE_WIDTH as f32,
                    ..tiny_skia::Stroke::default()
                };
                pixmap.stroke_path(&path, &paint, &stroke, screen, None);
            }
        }

        if !pattern.dots.is_empty() {
            let mut pb = PathBuilder::new();
            for dot in &pattern.dots {
                pb.push_circle(dot.x as f32, dot.y as f32, DOT_RADIUS as f32);
            }
            if let Some(path) = pb.finish() {
                pixmap.fill_path(&path, &paint, FillRule::Winding, screen, None);
            }
        }
    }

    fn render_stroke(
        pixmap: &mut Pixmap,
        stroke: &Stroke,
        style: &InkStyle,
        options: &OutlineOptions,
        smoothing: bool,
        transform: Transform,
    ) {
        let path = stroke_path(&stroke.points, options, smoothing);
        let Some(path) = to_skia_path(&path) else {
            return;
        };
        let blend = match style.blend {
            InkBlend::Normal => BlendMode::SourceOver,
            InkBlend::Multiply => BlendMode::Multiply,
        };
        let paint = solid_paint(style.color, blend);
        pixmap.fill_path(&path, &paint, FillRule::Winding, transform, None);
    }

    fn render_glow(
        pixmap: &mut Pixmap,
        stroke: &Stroke,
        ctx: &RenderContext,
        transform: Transform,
    ) {
        let Some(style) = ink_style(stroke) else {
            return;
        };
        let path = stroke_path(&stroke.points, &style.outline, ctx.smoothing);
        let Some(path) = to_skia_path(&path) else {
            return;
        };
        let paint = solid_paint(
            with_opacity(ctx.selection_color, GLOW_OPACITY),
            BlendMode::SourceOver,
        );
        let glow = tiny_skia::Stroke {
            width: (GLOW_WIDTH / ctx.view.zoom) as f32,
            line_join: LineJoin::Round,
            ..tiny_skia::Stroke::default()
        };
        pixmap.stroke_path(&path, &paint, &glow, transform, None);
    }

    fn render_lasso(
        pixmap: &mut Pixmap,
        polygon: &[Point],
        ctx: &RenderContext,
        transform: Transform,
    ) {
        let Some((first, rest)) = polygon.split_first() else {
            return;
        };
        if rest.is_empty() {
            return;
        }
        let mut pb = PathBuilder::new();
        pb.move_to(first.x as f32, first.y as f32);
        for p in rest {
            pb.line_to(p.x as f32, p.y as f32);
        }
        pb.close();
        let Some(path) = pb.finish() else {
            return;
        };

        let zoom = ctx.view.zoom as f32;
        let dash = StrokeDash::new(LASSO_DASH.iter().map(|d| d / zoom).collect(), 0.0);
        let outline = tiny_skia::Stroke {
            width: (LASSO_WIDTH / ctx.view.zoom) as f32,
            line_cap: LineCap::Round,
            dash,
            ..tiny_skia::Stroke::default()
        };
        let paint = solid_paint(ctx.selection_color, BlendMode::SourceOver);
        pixmap.stroke_path(&path, &paint, &outline, transform, None);
    }
}

impl Renderer for SkiaRenderer {
    fn build_scene(&mut self, ctx: &RenderContext) {
        let background = self.background_color(ctx);
        let Some(pixmap) = self.pixmap.as_mut() else {
            return;
        };

        pixmap.fill(to_skia_color(background));
        Self::render_paper(pixmap, ctx);

        let transform = to_skia_transform(Affine::scale(ctx.scale_factor) * ctx.view.transform());

        // Highlighters first so ink is never covered
        for stroke in ctx.document.render_order() {
            if let Some(style) = ink_style(stroke) {
                let options = style.outline;
                Self::render_stroke(pixmap, stroke, &style, &options, ctx.smoothing, transform);
            }
        }

        if let Some(stroke) = ctx.live_stroke {
            if let Some(style) = ink_style(stroke) {
                let options = OutlineOptions {
                    last: false,
                    ..style.outline
                };
                Self::render_stroke(pixmap, stroke, &style, &options, ctx.smoothing, transform);
            }
        }

        if ctx.selection.is_some_and(|s| !s.is_empty()) {
            for stroke in ctx.document.strokes().iter().filter(|s| ctx.is_selected(s)) {
                Self::render_glow(pixmap, stroke, ctx, transform);
            }
        }

        if let Some(polygon) = ctx.lasso_polygon {
            Self::render_lasso(pixmap, polygon, ctx, transform);
        }
    }
}

/// Render a frame into a new surface sized to the context's viewport.
pub fn render_to_png(ctx: &RenderContext) -> RenderResult<Vec<u8>> {
    let physical = Size::new(
        (ctx.viewport_size.width * ctx.scale_factor).round(),
        (ctx.viewport_size.height * ctx.scale_factor).round(),
    );
    if !(physical.width >= 1.0 && physical.height >= 1.0) {
        return Err(RendererError::NoSurface);
    }
    let mut renderer = SkiaRenderer::new(physical.width as u32, physical.height as u32);
    renderer.build_scene(ctx);
    renderer.export_png()
}

fn encode_png(rgba_data: &[u8], width: u32, height: u32) -> RenderResult<Vec<u8>> {
    let mut png_data = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut png_data, width, height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);

        let mut writer = encoder
            .write_header()
            .map_err(|e| RendererError::Encode(format!("PNG header: {}", e)))?;
        writer
            .write_image_data(rgba_data)
            .map_err(|e| RendererError::Encode(format!("PNG data: {}", e)))?;
    }
    Ok(png_data)
}

fn to_skia_color(color: Color) -> tiny_skia::Color {
    let c = color.to_rgba8();
    tiny_skia::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn solid_paint(color: Color, blend_mode: BlendMode) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(to_skia_color(color));
    paint.anti_alias = true;
    paint.blend_mode = blend_mode;
    paint
}

fn to_skia_transform(affine: Affine) -> Transform {
    let [a, b, c, d, e, f] = affine.as_coeffs();
    Transform::from_row(a as f32, b as f32, c as f32, d as f32, e as f32, f as f32)
}

fn to_skia_path(path: &BezPath) -> Option<tiny_skia::Path> {
    let mut pb = PathBuilder::new();
    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) => pb.move_to(p.x as f32, p.y as f32),
            PathEl::LineTo(p) => pb.line_to(p.x as f32, p.y as f32),
            PathEl::QuadTo(p1, p2) => {
                pb.quad_to(p1.x as f32, p1.y as f32, p2.x as f32, p2.y as f32)
            }
            PathEl::CurveTo(p1, p2, p3) => pb.cubic_to(
                p1.x as f32,
                p1.y as f32,
                p2.x as f32,
                p2.y as f32,
                p3.x as f32,
                p3.y as f32,
            ),
            PathEl::ClosePath => pb.close(),
        }
    }
    pb.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use inkpage_core::document::Document;
    use inkpage_core::lasso::Selection;
    use inkpage_core::paper::{PaperColor, PaperSettings, PaperType};
    use inkpage_core::stroke::{StrokePoint, StrokeTool};

    fn horizontal(tool: StrokeTool, color: &str, width: f64, y: f64) -> Stroke {
        Stroke::from_points(
            tool,
            color,
            width,
            (0..=10)
                .map(|i| StrokePoint::new(10.0 + i as f64 * 8.0, y, 0.5))
                .collect(),
        )
    }

    fn render(ctx: &RenderContext) -> SkiaRenderer {
        let mut renderer = SkiaRenderer::new(120, 80);
        renderer.build_scene(ctx);
        renderer
    }

    #[test]
    fn test_zero_size_surface() {
        let mut renderer = SkiaRenderer::new(0, 0);
        assert!(renderer.size().is_none());
        let doc = Document::new();
        renderer.build_scene(&RenderContext::new(&doc, Size::ZERO));
        assert!(matches!(renderer.export_png(), Err(RendererError::NoSurface)));
    }

    #[test]
    fn test_background_fill() {
        let doc = Document::new();
        let ctx = RenderContext::new(&doc, Size::new(120.0, 80.0))
            .with_paper(PaperSettings::new(PaperType::Blank, PaperColor::Dark));
        let renderer = render(&ctx);
        assert_eq!(renderer.pixel(5, 5), Some([0x1e, 0x1e, 0x24, 255]));
    }

    #[test]
    fn test_ruled_lines_are_drawn() {
        let doc = Document::new();
        let ctx = RenderContext::new(&doc, Size::new(120.0, 80.0))
            .with_paper(PaperSettings::new(PaperType::Ruled, PaperColor::White));
        let renderer = render(&ctx);
        let on_line = renderer.pixel(50, 32).unwrap();
        let off_line = renderer.pixel(50, 16).unwrap();
        assert_eq!(off_line, [255, 255, 255, 255]);
        assert!(on_line[0] < 255);
    }

    #[test]
    fn test_ink_is_drawn_over_highlighter() {
        let mut doc = Document::new();
        // Inserted after the highlighter would normally paint over it
        doc.push(horizontal(StrokeTool::Pen, "#000000", 6.0, 40.0));
        doc.push(horizontal(StrokeTool::Highlighter, "#ffd43b", 16.0, 40.0));
        let renderer = render(&RenderContext::new(&doc, Size::new(120.0, 80.0)));

        let ink = renderer.pixel(50, 40).unwrap();
        assert!(ink[0] < 40 && ink[1] < 40 && ink[2] < 40);

        // Highlighter only, multiplied over white paper
        let tinted = renderer.pixel(50, 47).unwrap();
        assert!(tinted[0] > 200);
        assert!(tinted[2] < 230);
    }

    #[test]
    fn test_eraser_strokes_are_skipped() {
        let mut doc = Document::new();
        doc.push(horizontal(StrokeTool::Eraser, "#000000", 6.0, 40.0));
        let renderer = render(&RenderContext::new(&doc, Size::new(120.0, 80.0)));
        assert_eq!(renderer.pixel(50, 40), Some([255, 255, 255, 255]));
    }

    #[test]
    fn test_view_transform_is_applied() {
        let mut doc = Document::new();
        doc.push(horizontal(StrokeTool::Pen, "#000000", 4.0, 10.0));
        let view = inkpage_core::camera::ViewTransform {
            zoom: 2.0,
            pan: kurbo::Vec2::new(0.0, 20.0),
        };
        let renderer = render(&RenderContext::new(&doc, Size::new(120.0, 80.0)).with_view(view));

        // Canvas y=10 lands at screen y=40
        let moved = renderer.pixel(60, 40).unwrap();
        assert!(moved[0] < 60);
        assert_eq!(renderer.pixel(60, 10), Some([255, 255, 255, 255]));
    }

    #[test]
    fn test_selection_glow() {
        let mut doc = Document::new();
        let stroke = horizontal(StrokeTool::Pen, "#000000", 4.0, 40.0);
        let mut selection = Selection::new();
        selection.insert(stroke.id());
        doc.push(stroke);

        let plain = render(&RenderContext::new(&doc, Size::new(120.0, 80.0)));
        let glowing = render(
            &RenderContext::new(&doc, Size::new(120.0, 80.0)).with_selection(Some(&selection)),
        );
        let probe = (50, 44);
        assert_eq!(plain.pixel(probe.0, probe.1), Some([255, 255, 255, 255]));
        let glow = glowing.pixel(probe.0, probe.1).unwrap();
        assert!(glow[2] > glow[0]);
    }

    #[test]
    fn test_export_png_signature() {
        let doc = Document::new();
        let renderer = render(&RenderContext::new(&doc, Size::new(120.0, 80.0)));
        let png = renderer.export_png().unwrap();
        assert_eq!(&png[..8], &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a]);
    }

    #[test]
    fn test_render_to_png_scales() {
        let doc = Document::new();
        let ctx = RenderContext::new(&doc, Size::new(50.0, 40.0)).with_scale_factor(2.0);
        assert!(render_to_png(&ctx).is_ok());
        let empty = RenderContext::new(&doc, Size::ZERO);
        assert!(matches!(render_to_png(&empty), Err(RendererError::NoSurface)));
    }
}
