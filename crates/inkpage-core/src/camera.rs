//! View transform for pan/zoom.

use kurbo::{Affine, Point, Vec2};
use serde::{Deserialize, Serialize};

/// Smallest allowed zoom level.
pub const MIN_ZOOM: f64 = 0.25;
/// Largest allowed zoom level.
pub const MAX_ZOOM: f64 = 4.0;
/// Factor applied by a single zoom in/out step.
pub const ZOOM_STEP: f64 = 1.2;

/// Pan/zoom state of the canvas.
///
/// Converts between screen coordinates (relative to the canvas origin) and
/// canvas coordinates: `canvas = (screen - pan) / zoom`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewTransform {
    /// Current zoom level, always within `[MIN_ZOOM, MAX_ZOOM]`.
    pub zoom: f64,
    /// Translation in screen pixels.
    pub pan: Vec2,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            pan: Vec2::ZERO,
        }
    }
}

impl ViewTransform {
    /// Create the identity view.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the affine transform for rendering.
    ///
    /// This transform converts canvas coordinates to screen coordinates.
    pub fn transform(&self) -> Affine {
        Affine::translate(self.pan) * Affine::scale(self.zoom)
    }

    /// Get the inverse transform for input handling.
    pub fn inverse_transform(&self) -> Affine {
        Affine::scale(1.0 / self.zoom) * Affine::translate(-self.pan)
    }

    /// Convert a screen point to canvas coordinates.
    pub fn screen_to_canvas(&self, screen_point: Point) -> Point {
        self.inverse_transform() * screen_point
    }

    /// Convert a canvas point to screen coordinates.
    pub fn canvas_to_screen(&self, canvas_point: Point) -> Point {
        self.transform() * canvas_point
    }

    /// Pan by a delta in screen coordinates.
    pub fn pan_by(&mut self, delta: Vec2) {
        self.pan += delta;
    }

    /// Multiply zoom by one step.
    pub fn zoom_in(&mut self) {
        self.set_zoom(self.zoom * ZOOM_STEP);
    }

    /// Divide zoom by one step.
    pub fn zoom_out(&mut self) {
        self.set_zoom(self.zoom / ZOOM_STEP);
    }

    /// Set zoom, clamped to the allowed range.
    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
    }

    /// Zoom by `factor`, keeping the given screen point fixed.
    pub fn zoom_at(&mut self, screen_point: Point, factor: f64) {
        let new_zoom = (self.zoom * factor).clamp(MIN_ZOOM, MAX_ZOOM);
        if (new_zoom - self.zoom).abs() < f64::EPSILON {
            return;
        }

        let canvas_point = self.screen_to_canvas(screen_point);
        self.zoom = new_zoom;

        // Adjust pan so canvas_point stays under screen_point
        let new_screen = self.canvas_to_screen(canvas_point);
        self.pan += screen_point - new_screen;
    }

    /// Reset to zoom 1 and no pan.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_view() {
        let view = ViewTransform::new();
        assert_eq!(view.pan, Vec2::ZERO);
        assert!((view.zoom - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_screen_to_canvas_with_pan_and_zoom() {
        let view = ViewTransform {
            zoom: 2.0,
            pan: Vec2::new(50.0, 100.0),
        };
        let canvas = view.screen_to_canvas(Point::new(150.0, 300.0));
        assert!((canvas.x - 50.0).abs() < f64::EPSILON);
        assert!((canvas.y - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_roundtrip_conversion() {
        let view = ViewTransform {
            zoom: 1.5,
            pan: Vec2::new(30.0, -20.0),
        };
        let original = Point::new(123.0, 456.0);
        let back = view.canvas_to_screen(view.screen_to_canvas(original));
        assert!((back.x - original.x).abs() < 1e-10);
        assert!((back.y - original.y).abs() < 1e-10);
    }

    #[test]
    fn test_zoom_in_clamps_at_max() {
        let mut view = ViewTransform::new();
        for _ in 0..50 {
            view.zoom_in();
            assert!(view.zoom <= MAX_ZOOM);
        }
        assert!((view.zoom - MAX_ZOOM).abs() < f64::EPSILON);
    }

    #[test]
    fn test_zoom_out_clamps_at_min() {
        let mut view = ViewTransform::new();
        for _ in 0..50 {
            view.zoom_out();
            assert!(view.zoom >= MIN_ZOOM);
        }
        assert!((view.zoom - MIN_ZOOM).abs() < f64::EPSILON);
    }

    #[test]
    fn test_zoom_at_keeps_point_fixed() {
        let mut view = ViewTransform::new();
        let anchor = Point::new(200.0, 120.0);
        let before = view.screen_to_canvas(anchor);
        view.zoom_at(anchor, 2.0);
        let after = view.screen_to_canvas(anchor);
        assert!((before.x - after.x).abs() < 1e-10);
        assert!((before.y - after.y).abs() < 1e-10);
    }

    #[test]
    fn test_reset() {
        let mut view = ViewTransform::new();
        view.zoom_in();
        view.pan_by(Vec2::new(10.0, 20.0));
        view.reset();
        assert_eq!(view, ViewTransform::default());
    }
}
