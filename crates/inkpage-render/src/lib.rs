//! inkpage render library
//!
//! Stroke outlining, ink styles, paper patterns and a tiny-skia raster
//! renderer for inkpage documents.

pub mod ink;
pub mod outline;
pub mod paper;
mod renderer;
mod skia_impl;

pub use ink::{InkBlend, InkPreset, InkStyle, PRESETS, ink_style, parse_color, preset};
pub use outline::{OutlineOptions, StrokeSample, Taper, outline_path, outline_points, stroke_path};
pub use paper::PaperPattern;
pub use renderer::{RenderContext, RenderResult, Renderer, RendererError};
pub use skia_impl::{SkiaRenderer, render_to_png};
