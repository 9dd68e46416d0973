//! Ink stroke data model.

use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a stroke.
///
/// Assigned when the stroke is created and kept across undo/redo snapshots.
/// Never persisted; strokes loaded from storage receive fresh ids.
pub type StrokeId = Uuid;

/// Pressure used when the input device reports none.
pub const DEFAULT_PRESSURE: f64 = 0.5;

/// A single pressure-tagged sample in canvas space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrokePoint {
    pub x: f64,
    pub y: f64,
    /// Normalized pressure in `[0, 1]`.
    pub pressure: f64,
}

impl StrokePoint {
    /// Create a new point. Pressure is clamped to `[0, 1]`.
    pub fn new(x: f64, y: f64, pressure: f64) -> Self {
        Self {
            x,
            y,
            pressure: pressure.clamp(0.0, 1.0),
        }
    }

    /// Create a point at a canvas position.
    pub fn at(point: Point, pressure: f64) -> Self {
        Self::new(point.x, point.y, pressure)
    }

    /// Position without pressure.
    pub fn to_point(self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Euclidean distance to a canvas position.
    pub fn distance_to(&self, point: Point) -> f64 {
        self.to_point().distance(point)
    }

    /// Move the point by a delta.
    pub fn translate(&mut self, delta: Vec2) {
        self.x += delta.x;
        self.y += delta.y;
    }
}

/// Tool a stroke was drawn with, as stored in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrokeTool {
    #[default]
    Pen,
    Highlighter,
    /// Legacy documents may contain eraser strokes; they are kept but never drawn.
    Eraser,
}

/// One continuous ink gesture.
#[derive(Debug, Clone)]
pub struct Stroke {
    pub(crate) id: StrokeId,
    /// Samples in drawing order.
    pub points: Vec<StrokePoint>,
    /// CSS hex color, e.g. `#1e1e1e`.
    pub color: String,
    /// Base ink size.
    pub width: f64,
    pub tool: StrokeTool,
    /// Ink preset id. Only meaningful for pen strokes.
    pub pen_type: Option<String>,
    /// Creation time in milliseconds since the Unix epoch.
    pub timestamp: Option<u64>,
}

impl Stroke {
    /// Number of points a stroke needs to be committed to the document.
    pub const MIN_COMMIT_POINTS: usize = 2;

    /// Create an empty stroke with a fresh id.
    pub fn new(tool: StrokeTool, color: impl Into<String>, width: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            points: Vec::new(),
            color: color.into(),
            width,
            tool,
            pen_type: None,
            timestamp: None,
        }
    }

    /// Create a stroke from existing points.
    pub fn from_points(
        tool: StrokeTool,
        color: impl Into<String>,
        width: f64,
        points: Vec<StrokePoint>,
    ) -> Self {
        let mut stroke = Self::new(tool, color, width);
        stroke.points = points;
        stroke
    }

    /// Set the ink preset.
    pub fn with_pen_type(mut self, pen_type: Option<String>) -> Self {
        self.pen_type = pen_type;
        self
    }

    /// Set the creation timestamp.
    pub fn with_timestamp(mut self, timestamp: Option<u64>) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn id(&self) -> StrokeId {
        self.id
    }

    /// Append a sample.
    pub fn add_point(&mut self, point: StrokePoint) {
        self.points.push(point);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Whether the stroke has enough points to be kept.
    pub fn is_committable(&self) -> bool {
        self.points.len() >= Self::MIN_COMMIT_POINTS
    }

    pub fn is_highlighter(&self) -> bool {
        self.tool == StrokeTool::Highlighter
    }

    /// Check whether any point lies within `radius` of `center` (inclusive).
    pub fn any_point_within(&self, center: Point, radius: f64) -> bool {
        self.points.iter().any(|p| p.distance_to(center) <= radius)
    }

    /// Translate every point by a delta.
    pub fn translate(&mut self, delta: Vec2) {
        for point in &mut self.points {
            point.translate(delta);
        }
    }

    /// Bounding box of the point positions (ignores ink width).
    pub fn bounds(&self) -> Rect {
        let Some(first) = self.points.first() else {
            return Rect::ZERO;
        };
        self.points
            .iter()
            .skip(1)
            .fold(Rect::from_points(first.to_point(), first.to_point()), |rect, p| {
                rect.union_pt(p.to_point())
            })
    }
}

/// Strokes compare by ink content; the id is an identity handle, not content.
impl PartialEq for Stroke {
    fn eq(&self, other: &Self) -> bool {
        self.points == other.points
            && self.color == other.color
            && self.width == other.width
            && self.tool == other.tool
            && self.pen_type == other.pen_type
            && self.timestamp == other.timestamp
    }
}
