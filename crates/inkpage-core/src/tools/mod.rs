//! Tool system for the drawing engine.

use crate::eraser::EraserMode;
use crate::stroke::StrokeTool;
use serde::{Deserialize, Serialize};

/// Ink preset the pencil tool uses when no pen type is chosen.
pub const PENCIL_PEN_TYPE: &str = "pencil";

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    #[default]
    Pen,
    Pencil,
    Highlighter,
    Eraser,
    Lasso,
}

impl Tool {
    /// The stroke tool recorded for strokes drawn with this tool.
    /// `None` for tools that do not lay down ink.
    pub fn stroke_tool(self) -> Option<StrokeTool> {
        match self {
            Tool::Pen | Tool::Pencil => Some(StrokeTool::Pen),
            Tool::Highlighter => Some(StrokeTool::Highlighter),
            Tool::Eraser | Tool::Lasso => None,
        }
    }

    /// Get display name for this tool.
    pub fn name(self) -> &'static str {
        match self {
            Tool::Pen => "Pen",
            Tool::Pencil => "Pencil",
            Tool::Highlighter => "Highlighter",
            Tool::Eraser => "Eraser",
            Tool::Lasso => "Lasso",
        }
    }
}

/// Manages the current tool and the style applied to new strokes.
#[derive(Debug, Clone)]
pub struct ToolManager {
    /// Currently selected tool.
    pub current_tool: Tool,
    /// How the eraser removes ink.
    pub eraser_mode: EraserMode,
    /// Ink preset for pen strokes; `None` uses the default preset.
    pub pen_type: Option<String>,
    color_slots: Vec<String>,
    width_slots: Vec<f64>,
    color_index: usize,
    width_index: usize,
}

impl ToolManager {
    /// Create a tool manager with the given color and width slots.
    ///
    /// Empty slot lists fall back to a single black color / width 4.
    pub fn new(color_slots: Vec<String>, width_slots: Vec<f64>) -> Self {
        let color_slots = if color_slots.is_empty() {
            vec!["#000000".to_string()]
        } else {
            color_slots
        };
        let width_slots = if width_slots.is_empty() {
            vec![4.0]
        } else {
            width_slots
        };
        // Start on the middle width
        let width_index = width_slots.len() / 2;
        Self {
            current_tool: Tool::default(),
            eraser_mode: EraserMode::default(),
            pen_type: None,
            color_slots,
            width_slots,
            color_index: 0,
            width_index,
        }
    }

    /// Set the current tool.
    pub fn set_tool(&mut self, tool: Tool) {
        self.current_tool = tool;
    }

    /// Select a color slot. Out-of-range slots are ignored.
    pub fn select_color_slot(&mut self, slot: usize) -> bool {
        if slot < self.color_slots.len() {
            self.color_index = slot;
            true
        } else {
            false
        }
    }

    /// Move to the next width slot, wrapping around.
    pub fn next_width(&mut self) {
        self.width_index = (self.width_index + 1) % self.width_slots.len();
    }

    /// Move to the previous width slot, wrapping around.
    pub fn previous_width(&mut self) {
        self.width_index = (self.width_index + self.width_slots.len() - 1) % self.width_slots.len();
    }

    /// Color for new strokes.
    pub fn color(&self) -> &str {
        &self.color_slots[self.color_index]
    }

    /// Base width for new strokes and the eraser.
    pub fn width(&self) -> f64 {
        self.width_slots[self.width_index]
    }

    pub fn color_slot(&self) -> usize {
        self.color_index
    }

    pub fn width_slot(&self) -> usize {
        self.width_index
    }

    /// Ink preset recorded on strokes drawn with the current tool.
    pub fn stroke_pen_type(&self) -> Option<String> {
        match self.current_tool {
            Tool::Pen => self.pen_type.clone(),
            Tool::Pencil => Some(
                self.pen_type
                    .clone()
                    .unwrap_or_else(|| PENCIL_PEN_TYPE.to_string()),
            ),
            Tool::Highlighter | Tool::Eraser | Tool::Lasso => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager() -> ToolManager {
        ToolManager::new(
            vec!["#111111".into(), "#222222".into(), "#333333".into()],
            vec![2.0, 4.0, 8.0],
        )
    }

    #[test]
    fn test_tool_selection() {
        let mut tm = manager();
        assert_eq!(tm.current_tool, Tool::Pen);
        tm.set_tool(Tool::Lasso);
        assert_eq!(tm.current_tool, Tool::Lasso);
    }

    #[test]
    fn test_stroke_tool_mapping() {
        assert_eq!(Tool::Pencil.stroke_tool(), Some(StrokeTool::Pen));
        assert_eq!(Tool::Highlighter.stroke_tool(), Some(StrokeTool::Highlighter));
        assert_eq!(Tool::Lasso.stroke_tool(), None);
    }

    #[test]
    fn test_color_slots_bounds_checked() {
        let mut tm = manager();
        assert!(tm.select_color_slot(2));
        assert_eq!(tm.color(), "#333333");
        assert!(!tm.select_color_slot(3));
        assert_eq!(tm.color(), "#333333");
    }

    #[test]
    fn test_width_cycle_wraps() {
        let mut tm = manager();
        assert!((tm.width() - 4.0).abs() < f64::EPSILON);
        tm.next_width();
        tm.next_width();
        assert!((tm.width() - 2.0).abs() < f64::EPSILON);
        tm.previous_width();
        assert!((tm.width() - 8.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_pencil_pen_type() {
        let mut tm = manager();
        tm.set_tool(Tool::Pencil);
        assert_eq!(tm.stroke_pen_type().as_deref(), Some(PENCIL_PEN_TYPE));
        tm.set_tool(Tool::Highlighter);
        assert_eq!(tm.stroke_pen_type(), None);
    }

    #[test]
    fn test_empty_slots_fall_back() {
        let tm = ToolManager::new(Vec::new(), Vec::new());
        assert_eq!(tm.color(), "#000000");
        assert!((tm.width() - 4.0).abs() < f64::EPSILON);
    }
}
