//! Persisted attribute shape and legacy point migration.

use super::StorageResult;
use crate::document::Document;
use crate::paper::{PaperColor, PaperSettings, PaperType};
use crate::stroke::{DEFAULT_PRESSURE, Stroke, StrokePoint, StrokeTool};
use serde::{Deserialize, Serialize};

/// A point as stored on disk.
///
/// Current documents write `[x, y, pressure]` tuples. Older documents wrote
/// `{x, y, pressure}` objects; both are accepted on read.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WirePoint {
    Tuple(f64, f64, f64),
    /// Tuple without pressure.
    Pair(f64, f64),
    Legacy {
        x: f64,
        y: f64,
        #[serde(default)]
        pressure: Option<f64>,
    },
}

impl WirePoint {
    pub fn is_legacy(&self) -> bool {
        matches!(self, WirePoint::Legacy { .. })
    }

    fn to_stroke_point(self) -> StrokePoint {
        match self {
            WirePoint::Tuple(x, y, pressure) => StrokePoint::new(x, y, pressure),
            WirePoint::Pair(x, y) => StrokePoint::new(x, y, DEFAULT_PRESSURE),
            WirePoint::Legacy { x, y, pressure } => {
                StrokePoint::new(x, y, pressure.unwrap_or(DEFAULT_PRESSURE))
            }
        }
    }
}

impl From<StrokePoint> for WirePoint {
    fn from(point: StrokePoint) -> Self {
        WirePoint::Tuple(point.x, point.y, point.pressure)
    }
}

fn default_color() -> String {
    "#000000".to_string()
}

fn default_width() -> f64 {
    4.0
}

/// A stroke as stored on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedStroke {
    pub points: Vec<WirePoint>,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default = "default_width")]
    pub width: f64,
    #[serde(default)]
    pub tool: StrokeTool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pen_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<u64>,
}

impl PersistedStroke {
    fn from_stroke(stroke: &Stroke) -> Self {
        Self {
            points: stroke.points.iter().copied().map(WirePoint::from).collect(),
            color: stroke.color.clone(),
            width: stroke.width,
            tool: stroke.tool,
            pen_type: stroke.pen_type.clone(),
            timestamp: stroke.timestamp,
        }
    }

    fn to_stroke(&self) -> Stroke {
        let points = self.points.iter().map(|p| p.to_stroke_point()).collect();
        Stroke::from_points(self.tool, self.color.clone(), self.width, points)
            .with_pen_type(self.pen_type.clone())
            .with_timestamp(self.timestamp)
    }
}

/// Attributes of a drawing block: `{ lines, paperType, paperColor }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedAttrs {
    #[serde(default)]
    pub lines: Vec<PersistedStroke>,
    #[serde(default)]
    pub paper_type: PaperType,
    #[serde(default)]
    pub paper_color: PaperColor,
}

impl PersistedAttrs {
    /// Parse attributes from JSON text.
    pub fn from_json(json: &str) -> StorageResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse attributes from an already-decoded JSON value.
    pub fn from_value(value: serde_json::Value) -> StorageResult<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// Serialize the attributes to JSON.
    pub fn to_json(&self) -> StorageResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Serialize the attributes to indented JSON.
    pub fn to_json_pretty(&self) -> StorageResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Number of points stored in the legacy object form.
    pub fn legacy_point_count(&self) -> usize {
        self.lines
            .iter()
            .flat_map(|line| line.points.iter())
            .filter(|p| p.is_legacy())
            .count()
    }

    pub fn paper(&self) -> PaperSettings {
        PaperSettings::new(self.paper_type, self.paper_color)
    }
}

/// Build the engine's document and paper settings from persisted attributes.
///
/// Legacy object points are migrated to the tuple form; every stroke gets a
/// fresh id.
pub fn load(attrs: &PersistedAttrs) -> (Document, PaperSettings) {
    let legacy = attrs.legacy_point_count();
    if legacy > 0 {
        log::info!("Migrating {} legacy points to tuple form", legacy);
    }
    let strokes = attrs.lines.iter().map(PersistedStroke::to_stroke).collect();
    (Document::from_strokes(strokes), attrs.paper())
}

/// Snapshot the document and paper settings into the persisted shape.
pub fn save(document: &Document, paper: PaperSettings) -> PersistedAttrs {
    PersistedAttrs {
        lines: document
            .strokes()
            .iter()
            .map(PersistedStroke::from_stroke)
            .collect(),
        paper_type: paper.paper_type,
        paper_color: paper.paper_color,
    }
}
