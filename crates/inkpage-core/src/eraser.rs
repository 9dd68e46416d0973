//! Stroke-level and point-level erasing.

use crate::document::Document;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Eraser radius is the tool width times this factor.
pub const ERASER_RADIUS_FACTOR: f64 = 2.0;

/// Strokes trimmed by the pixel eraser below this many points are dropped.
pub const PIXEL_ERASE_MIN_POINTS: usize = 3;

/// How the eraser removes ink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EraserMode {
    /// Remove whole strokes touched by the eraser.
    #[default]
    Stroke,
    /// Remove only the points under the eraser.
    Pixel,
}

/// Hit radius for an eraser of the given tool width.
pub fn eraser_radius(width: f64) -> f64 {
    width * ERASER_RADIUS_FACTOR
}

/// Apply the eraser once at `position`.
///
/// Returns true if the document changed.
pub fn erase_at(document: &mut Document, position: Point, radius: f64, mode: EraserMode) -> bool {
    match mode {
        EraserMode::Stroke => erase_strokes(document, position, radius),
        EraserMode::Pixel => erase_points(document, position, radius),
    }
}

fn erase_strokes(document: &mut Document, position: Point, radius: f64) -> bool {
    let before = document.len();
    document.retain(|stroke| !stroke.any_point_within(position, radius));
    document.len() != before
}

fn erase_points(document: &mut Document, position: Point, radius: f64) -> bool {
    let mut changed = false;
    let mut trimmed = Vec::new();

    for stroke in document.iter_mut() {
        let before = stroke.points.len();
        stroke.points.retain(|p| p.distance_to(position) > radius);
        if stroke.points.len() != before {
            changed = true;
            if stroke.points.len() < PIXEL_ERASE_MIN_POINTS {
                trimmed.push(stroke.id());
            }
        }
    }

    if !trimmed.is_empty() {
        document.retain(|stroke| !trimmed.contains(&stroke.id()));
    }
    changed
}
