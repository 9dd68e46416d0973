//! Ink presets and per-stroke render style.

use crate::outline::{OutlineOptions, Taper};
use inkpage_core::stroke::{Stroke, StrokeTool};
use peniko::Color;

/// Preset used when a stroke names no preset or an unknown one.
pub const DEFAULT_PEN_TYPE: &str = "ballpoint";

/// Highlighter strokes are drawn wider than their nominal width.
pub const HIGHLIGHTER_WIDTH_FACTOR: f64 = 1.5;
pub const HIGHLIGHTER_OPACITY: f32 = 0.35;

/// Outline parameters of a named pen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InkPreset {
    pub id: &'static str,
    pub size: f64,
    pub thinning: f64,
    pub smoothing: f64,
    pub streamline: f64,
    /// Taper both ends instead of round caps.
    pub tapered: bool,
    pub opacity: f32,
}

pub const PRESETS: [InkPreset; 5] = [
    InkPreset {
        id: "ballpoint",
        size: 4.0,
        thinning: 0.5,
        smoothing: 0.5,
        streamline: 0.5,
        tapered: false,
        opacity: 1.0,
    },
    InkPreset {
        id: "fountain",
        size: 4.0,
        thinning: 0.7,
        smoothing: 0.6,
        streamline: 0.4,
        tapered: true,
        opacity: 1.0,
    },
    InkPreset {
        id: "marker",
        size: 4.0,
        thinning: 0.1,
        smoothing: 0.7,
        streamline: 0.6,
        tapered: false,
        opacity: 1.0,
    },
    InkPreset {
        id: "fineliner",
        size: 4.0,
        thinning: 0.0,
        smoothing: 0.5,
        streamline: 0.6,
        tapered: false,
        opacity: 1.0,
    },
    InkPreset {
        id: "pencil",
        size: 4.0,
        thinning: 0.3,
        smoothing: 0.4,
        streamline: 0.3,
        tapered: false,
        opacity: 0.85,
    },
];

/// Look up a preset by id, falling back to the ballpoint pen.
pub fn preset(pen_type: Option<&str>) -> &'static InkPreset {
    let id = pen_type.unwrap_or(DEFAULT_PEN_TYPE);
    PRESETS
        .iter()
        .find(|p| p.id == id)
        .unwrap_or(&PRESETS[0])
}

/// How ink combines with what is beneath it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InkBlend {
    #[default]
    Normal,
    Multiply,
}

/// Everything needed to outline and fill one stroke.
#[derive(Debug, Clone)]
pub struct InkStyle {
    pub outline: OutlineOptions,
    /// Fill color with opacity applied.
    pub color: Color,
    pub blend: InkBlend,
}

/// Resolve the render style of a stroke.
///
/// Returns `None` for eraser strokes, which are never drawn.
pub fn ink_style(stroke: &Stroke) -> Option<InkStyle> {
    let base = parse_color(&stroke.color);
    match stroke.tool {
        StrokeTool::Eraser => None,
        StrokeTool::Highlighter => Some(InkStyle {
            outline: OutlineOptions {
                size: stroke.width * HIGHLIGHTER_WIDTH_FACTOR,
                thinning: 0.0,
                smoothing: 0.5,
                streamline: 0.5,
                ..OutlineOptions::default()
            },
            color: with_opacity(base, HIGHLIGHTER_OPACITY),
            blend: InkBlend::Multiply,
        }),
        StrokeTool::Pen => {
            let preset = preset(stroke.pen_type.as_deref());
            let taper = if preset.tapered { Taper::Full } else { Taper::None };
            Some(InkStyle {
                outline: OutlineOptions {
                    size: stroke.width,
                    thinning: preset.thinning,
                    smoothing: preset.smoothing,
                    streamline: preset.streamline,
                    taper_start: taper,
                    taper_end: taper,
                    ..OutlineOptions::default()
                },
                color: with_opacity(base, preset.opacity),
                blend: InkBlend::Normal,
            })
        }
    }
}

/// Scale a color's alpha.
pub fn with_opacity(color: Color, opacity: f32) -> Color {
    let rgba = color.to_rgba8();
    let alpha = (rgba.a as f32 * opacity.clamp(0.0, 1.0)).round() as u8;
    Color::from_rgba8(rgba.r, rgba.g, rgba.b, alpha)
}

/// Parse a CSS hex color (`#rgb`, `#rrggbb`, `#rrggbbaa`) or `transparent`.
///
/// Anything else renders black.
pub fn parse_color(color: &str) -> Color {
    let color = color.trim();
    if color == "transparent" {
        return Color::from_rgba8(0, 0, 0, 0);
    }

    if let Some((r, g, b, a)) = color.strip_prefix('#').and_then(parse_hex) {
        return Color::from_rgba8(r, g, b, a);
    }

    log::debug!("Unrecognized color {:?}, using black", color);
    Color::from_rgba8(0, 0, 0, 255)
}

fn parse_hex(hex: &str) -> Option<(u8, u8, u8, u8)> {
    if !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize, len: usize| u8::from_str_radix(&hex[i..i + len], 16).ok();
    match hex.len() {
        // #rgb -> #rrggbb
        3 => Some((channel(0, 1)? * 17, channel(1, 1)? * 17, channel(2, 1)? * 17, 255)),
        6 => Some((channel(0, 2)?, channel(2, 2)?, channel(4, 2)?, 255)),
        8 => Some((channel(0, 2)?, channel(2, 2)?, channel(4, 2)?, channel(6, 2)?)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inkpage_core::stroke::StrokePoint;

    fn rgba(color: Color) -> (u8, u8, u8, u8) {
        let c = color.to_rgba8();
        (c.r, c.g, c.b, c.a)
    }

    fn stroke(tool: StrokeTool, pen_type: Option<&str>) -> Stroke {
        Stroke::from_points(
            tool,
            "#e03131",
            6.0,
            vec![StrokePoint::new(0.0, 0.0, 0.5), StrokePoint::new(10.0, 0.0, 0.5)],
        )
        .with_pen_type(pen_type.map(str::to_string))
    }

    #[test]
    fn test_parse_color() {
        assert_eq!(rgba(parse_color("#1e1e1e")), (0x1e, 0x1e, 0x1e, 255));
        assert_eq!(rgba(parse_color("#f00")), (255, 0, 0, 255));
        assert_eq!(rgba(parse_color("#00ff0080")), (0, 255, 0, 0x80));
        assert_eq!(rgba(parse_color("transparent")).3, 0);
        assert_eq!(rgba(parse_color("rebeccapurple")), (0, 0, 0, 255));
        assert_eq!(rgba(parse_color("#zzzzzz")), (0, 0, 0, 255));
    }

    #[test]
    fn test_preset_lookup() {
        assert_eq!(preset(None).id, "ballpoint");
        assert_eq!(preset(Some("fountain")).id, "fountain");
        assert_eq!(preset(Some("quill")).id, "ballpoint");
    }

    #[test]
    fn test_pen_style_uses_stroke_width() {
        let style = ink_style(&stroke(StrokeTool::Pen, Some("marker"))).unwrap();
        assert!((style.outline.size - 6.0).abs() < f64::EPSILON);
        assert!((style.outline.thinning - 0.1).abs() < f64::EPSILON);
        assert_eq!(style.blend, InkBlend::Normal);
        assert_eq!(rgba(style.color).3, 255);
    }

    #[test]
    fn test_fountain_tapers() {
        let style = ink_style(&stroke(StrokeTool::Pen, Some("fountain"))).unwrap();
        assert_eq!(style.outline.taper_start, Taper::Full);
        assert_eq!(style.outline.taper_end, Taper::Full);
    }

    #[test]
    fn test_pencil_opacity() {
        let style = ink_style(&stroke(StrokeTool::Pen, Some("pencil"))).unwrap();
        assert_eq!(rgba(style.color).3, 217);
    }

    #[test]
    fn test_highlighter_style() {
        let style = ink_style(&stroke(StrokeTool::Highlighter, Some("fountain"))).unwrap();
        assert!((style.outline.size - 9.0).abs() < f64::EPSILON);
        assert!(style.outline.thinning.abs() < f64::EPSILON);
        assert_eq!(style.outline.taper_start, Taper::None);
        assert_eq!(style.blend, InkBlend::Multiply);
        assert_eq!(rgba(style.color).3, 89);
    }

    #[test]
    fn test_eraser_strokes_are_not_drawn() {
        assert!(ink_style(&stroke(StrokeTool::Eraser, None)).is_none());
    }
}
