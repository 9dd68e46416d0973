//! The interaction state machine tying input, tools, history and persistence together.

use crate::camera::ViewTransform;
use crate::config::EngineConfig;
use crate::document::Document;
use crate::eraser::{EraserMode, erase_at, eraser_radius};
use crate::frame::FrameScheduler;
use crate::history::History;
use crate::input::{
    PointerButton, PointerEvent, PointerSample, is_palm, is_pan_trigger, normalize_pressure,
};
use crate::lasso::{Lasso, LassoOutcome, LassoStart, Selection};
use crate::paper::{PaperColor, PaperSettings, PaperType};
use crate::shortcuts::{Command, KeyInput, ShortcutRegistry};
use crate::storage::{self, PersistedAttrs, Storage};
use crate::stroke::{Stroke, StrokePoint};
use crate::tools::{Tool, ToolManager};
use kurbo::{Point, Vec2};

#[cfg(not(target_arch = "wasm32"))]
use std::time::{SystemTime, UNIX_EPOCH};
#[cfg(target_arch = "wasm32")]
use web_time::{SystemTime, UNIX_EPOCH};

/// The gesture owned by the captured pointer.
#[derive(Debug, Clone, Default)]
pub enum Gesture {
    #[default]
    Idle,
    Pan {
        pointer_id: i64,
        last: Point,
    },
    Ink {
        pointer_id: i64,
        stroke: Stroke,
    },
    Erase {
        pointer_id: i64,
        changed: bool,
    },
    Lasso {
        pointer_id: i64,
    },
}

impl Gesture {
    /// The pointer that owns the gesture.
    pub fn pointer_id(&self) -> Option<i64> {
        match self {
            Gesture::Idle => None,
            Gesture::Pan { pointer_id, .. }
            | Gesture::Ink { pointer_id, .. }
            | Gesture::Erase { pointer_id, .. }
            | Gesture::Lasso { pointer_id } => Some(*pointer_id),
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Gesture::Idle)
    }
}

/// A drawing block's engine: document, tools, view and gesture state.
///
/// Every handler runs to completion synchronously. Redraws are never
/// performed here; mutations mark the [`FrameScheduler`] dirty and the host
/// paints on its next animation frame.
pub struct Engine {
    document: Document,
    paper: PaperSettings,
    view: ViewTransform,
    /// Canvas element top-left in client coordinates.
    origin: Point,
    tools: ToolManager,
    history: History,
    selection: Selection,
    lasso: Lasso,
    gesture: Gesture,
    config: EngineConfig,
    frames: FrameScheduler,
    storage: Option<Box<dyn Storage>>,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl Engine {
    /// Create an engine with an empty document.
    pub fn new(config: EngineConfig) -> Self {
        Self {
            document: Document::new(),
            paper: PaperSettings::default(),
            view: ViewTransform::default(),
            origin: Point::ZERO,
            tools: ToolManager::new(config.color_slots.clone(), config.width_slots.clone()),
            history: History::with_limit(config.history_limit),
            selection: Selection::new(),
            lasso: Lasso::new(config.lasso_pick_radius),
            gesture: Gesture::Idle,
            config,
            frames: FrameScheduler::new(),
            storage: None,
        }
    }

    /// Create an engine from a block's persisted attributes.
    pub fn from_attrs(attrs: &PersistedAttrs, config: EngineConfig) -> Self {
        let (document, paper) = storage::load(attrs);
        log::info!(
            "Loaded drawing with {} strokes ({} paper)",
            document.len(),
            paper.paper_type.name()
        );
        let mut engine = Self::new(config);
        engine.document = document;
        engine.paper = paper;
        engine.frames.mark_dirty();
        engine
    }

    /// Attach the sink written after every committed change.
    pub fn with_storage(mut self, storage: Box<dyn Storage>) -> Self {
        self.storage = Some(storage);
        self
    }

    pub fn set_storage(&mut self, storage: Option<Box<dyn Storage>>) {
        self.storage = storage;
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn paper(&self) -> PaperSettings {
        self.paper
    }

    pub fn view(&self) -> &ViewTransform {
        &self.view
    }

    pub fn tools(&self) -> &ToolManager {
        &self.tools
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    /// The stroke being drawn, not yet part of the document.
    pub fn live_stroke(&self) -> Option<&Stroke> {
        match &self.gesture {
            Gesture::Ink { stroke, .. } => Some(stroke),
            _ => None,
        }
    }

    /// The lasso polygon being captured, in canvas space.
    pub fn lasso_polygon(&self) -> Option<&[Point]> {
        self.lasso.polygon()
    }

    /// The persisted shape of the current state.
    pub fn attrs(&self) -> PersistedAttrs {
        storage::save(&self.document, self.paper)
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Set the canvas element's position in client coordinates.
    pub fn set_origin(&mut self, origin: Point) {
        self.origin = origin;
    }

    /// Convert a client position to canvas space with the current view.
    pub fn to_canvas(&self, client: Point) -> Point {
        self.view.screen_to_canvas(client - self.origin.to_vec2())
    }

    // --- Frames ---

    /// Whether the host must request an animation frame.
    pub fn take_frame_request(&mut self) -> bool {
        self.frames.take_request()
    }

    /// Called when the animation frame fires. Returns `true` if the canvas must be repainted.
    pub fn begin_frame(&mut self) -> bool {
        self.frames.begin_frame()
    }

    pub fn needs_redraw(&self) -> bool {
        self.frames.is_dirty()
    }

    fn invalidate(&mut self) {
        self.frames.mark_dirty();
    }

    // --- Pointer input ---

    /// Dispatch a pointer event. Returns `true` if the engine consumed it.
    pub fn handle_pointer_event(&mut self, event: &PointerEvent) -> bool {
        match event {
            PointerEvent::Down(sample) => self.pointer_down(sample),
            PointerEvent::Move(sample) => self.pointer_move(sample),
            PointerEvent::Up(sample) => self.pointer_up(sample),
            PointerEvent::Leave(sample) => self.pointer_leave(sample),
            PointerEvent::Cancel(sample) => self.pointer_cancel(sample),
        }
    }

    /// Start a gesture and capture the pointer.
    pub fn pointer_down(&mut self, sample: &PointerSample) -> bool {
        if !self.gesture.is_idle() {
            log::debug!(
                "Ignoring pointer {} while pointer {:?} is captured",
                sample.pointer_id,
                self.gesture.pointer_id()
            );
            return false;
        }
        if self.config.palm_rejection && is_palm(sample, self.config.palm_radius_threshold) {
            log::debug!("Rejected palm contact from pointer {}", sample.pointer_id);
            return false;
        }

        let pointer_id = sample.pointer_id;
        if is_pan_trigger(sample) {
            self.gesture = Gesture::Pan {
                pointer_id,
                last: sample.client,
            };
            return true;
        }
        if sample.button != PointerButton::Primary {
            log::debug!("Ignoring {:?} button from pointer {}", sample.button, pointer_id);
            return false;
        }

        let position = self.to_canvas(sample.client);
        match self.tools.current_tool {
            Tool::Pen | Tool::Pencil | Tool::Highlighter => {
                let Some(stroke_tool) = self.tools.current_tool.stroke_tool() else {
                    return false;
                };
                self.history.push(&self.document);
                let mut stroke = Stroke::new(stroke_tool, self.tools.color(), self.tools.width())
                    .with_pen_type(self.tools.stroke_pen_type())
                    .with_timestamp(now_millis());
                stroke.add_point(self.sample_point(sample, position));
                self.gesture = Gesture::Ink { pointer_id, stroke };
            }
            Tool::Eraser => {
                self.history.push(&self.document);
                let changed = erase(&mut self.document, &mut self.selection, &self.tools, position);
                self.gesture = Gesture::Erase {
                    pointer_id,
                    changed,
                };
            }
            Tool::Lasso => {
                if self.lasso.begin(&self.document, &self.selection, position) == LassoStart::Drag {
                    self.history.push(&self.document);
                }
                self.gesture = Gesture::Lasso { pointer_id };
            }
        }
        self.invalidate();
        true
    }

    /// Continue the gesture owned by this pointer.
    pub fn pointer_move(&mut self, sample: &PointerSample) -> bool {
        if self.gesture.pointer_id() != Some(sample.pointer_id) {
            return false;
        }

        let position = self.to_canvas(sample.client);
        let point = self.sample_point(sample, position);
        match &mut self.gesture {
            Gesture::Idle => return false,
            Gesture::Pan { last, .. } => {
                let delta = sample.client - *last;
                *last = sample.client;
                self.view.pan_by(delta);
            }
            Gesture::Ink { stroke, .. } => stroke.add_point(point),
            Gesture::Erase { changed, .. } => {
                *changed |= erase(&mut self.document, &mut self.selection, &self.tools, position);
            }
            Gesture::Lasso { .. } => {
                self.lasso.update(&mut self.document, &self.selection, position);
            }
        }
        self.invalidate();
        true
    }

    /// End the gesture owned by this pointer.
    pub fn pointer_up(&mut self, sample: &PointerSample) -> bool {
        if self.gesture.pointer_id() != Some(sample.pointer_id) {
            return false;
        }
        self.finish_gesture();
        true
    }

    /// Pointer left the canvas; ends the gesture like pointer-up.
    pub fn pointer_leave(&mut self, sample: &PointerSample) -> bool {
        self.pointer_up(sample)
    }

    /// Pointer was cancelled by the platform; ends the gesture like pointer-up.
    pub fn pointer_cancel(&mut self, sample: &PointerSample) -> bool {
        self.pointer_up(sample)
    }

    fn sample_point(&self, sample: &PointerSample, position: Point) -> StrokePoint {
        StrokePoint::at(
            position,
            normalize_pressure(sample.pressure, self.config.pressure_sensitivity),
        )
    }

    /// Complete whatever gesture is active, committing its result.
    fn finish_gesture(&mut self) {
        match std::mem::take(&mut self.gesture) {
            Gesture::Idle => return,
            Gesture::Pan { .. } => {}
            Gesture::Ink { stroke, .. } => {
                if stroke.is_committable() {
                    log::debug!("Committed {:?} stroke with {} points", stroke.tool, stroke.len());
                    self.document.push(stroke);
                    self.persist();
                } else {
                    log::debug!("Discarded degenerate stroke");
                    self.history.discard_last();
                }
            }
            Gesture::Erase { changed, .. } => {
                if changed {
                    log::debug!("Erase finished, {} strokes remain", self.document.len());
                    self.persist();
                } else {
                    self.history.discard_last();
                }
            }
            Gesture::Lasso { .. } => match self.lasso.finish(&self.document, &mut self.selection) {
                LassoOutcome::Unchanged => {}
                LassoOutcome::Selected { added } => {
                    log::debug!(
                        "Lasso added {} strokes, {} selected",
                        added,
                        self.selection.len()
                    );
                }
                LassoOutcome::Dragged { moved: true } => {
                    log::debug!("Moved {} selected strokes", self.selection.len());
                    self.persist();
                }
                LassoOutcome::Dragged { moved: false } => {
                    self.history.discard_last();
                }
            },
        }
        self.invalidate();
    }

    // --- Commands ---

    /// Restore the previous snapshot. Returns false if there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        self.finish_gesture();
        if !self.history.undo(&mut self.document) {
            return false;
        }
        self.after_restore();
        true
    }

    /// Re-apply the last undone snapshot. Returns false if there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        self.finish_gesture();
        if !self.history.redo(&mut self.document) {
            return false;
        }
        self.after_restore();
        true
    }

    fn after_restore(&mut self) {
        self.selection.retain_existing(&self.document);
        self.persist();
        self.invalidate();
    }

    /// Remove every stroke. Recorded in history; no-op on an empty document.
    pub fn clear(&mut self) -> bool {
        self.finish_gesture();
        if self.document.is_empty() {
            return false;
        }
        self.history.push(&self.document);
        self.document.clear();
        self.selection.clear();
        self.persist();
        self.invalidate();
        true
    }

    /// Switch tools. Leaving the lasso drops the selection.
    pub fn set_tool(&mut self, tool: Tool) {
        if tool == self.tools.current_tool {
            return;
        }
        self.finish_gesture();
        if self.tools.current_tool == Tool::Lasso {
            self.selection.clear();
        }
        self.tools.set_tool(tool);
        self.invalidate();
    }

    pub fn set_eraser_mode(&mut self, mode: EraserMode) {
        self.tools.eraser_mode = mode;
    }

    /// Set the ink preset for pen strokes.
    pub fn set_pen_type(&mut self, pen_type: Option<String>) {
        self.tools.pen_type = pen_type;
    }

    pub fn select_color_slot(&mut self, slot: usize) -> bool {
        self.tools.select_color_slot(slot)
    }

    pub fn clear_selection(&mut self) {
        if self.lasso.polygon().is_some() {
            self.lasso.cancel();
            self.gesture = Gesture::Idle;
        }
        if !self.selection.is_empty() {
            self.selection.clear();
        }
        self.invalidate();
    }

    pub fn set_paper_type(&mut self, paper_type: PaperType) {
        if self.paper.paper_type != paper_type {
            self.paper.paper_type = paper_type;
            self.persist();
            self.invalidate();
        }
    }

    pub fn set_paper_color(&mut self, paper_color: PaperColor) {
        if self.paper.paper_color != paper_color {
            self.paper.paper_color = paper_color;
            self.persist();
            self.invalidate();
        }
    }

    // --- View ---

    pub fn zoom_in(&mut self) {
        self.view.zoom_in();
        self.invalidate();
    }

    pub fn zoom_out(&mut self) {
        self.view.zoom_out();
        self.invalidate();
    }

    /// Zoom by `factor` keeping a client position fixed.
    pub fn zoom_at(&mut self, client: Point, factor: f64) {
        self.view.zoom_at(client - self.origin.to_vec2(), factor);
        self.invalidate();
    }

    pub fn pan_by(&mut self, delta: Vec2) {
        self.view.pan_by(delta);
        self.invalidate();
    }

    pub fn reset_view(&mut self) {
        self.view.reset();
        self.invalidate();
    }

    pub fn set_view(&mut self, view: ViewTransform) {
        self.view = view;
        self.view.set_zoom(view.zoom);
        self.invalidate();
    }

    // --- Keyboard ---

    /// Handle a key press. Shortcuts are ignored while a text input has focus.
    ///
    /// Returns `true` if the key was bound to a command.
    pub fn handle_key(&mut self, input: &KeyInput, text_input_focused: bool) -> bool {
        if text_input_focused {
            return false;
        }
        let Some(shortcut) = ShortcutRegistry::shortcut_for(input) else {
            return false;
        };
        log::debug!("{} ({})", shortcut.format(), shortcut.description);
        match shortcut.command {
            Command::SelectTool(tool) => self.set_tool(tool),
            Command::Undo => {
                self.undo();
            }
            Command::Redo => {
                self.redo();
            }
            Command::ColorSlot(slot) => {
                self.select_color_slot(slot);
            }
            Command::PreviousWidth => self.tools.previous_width(),
            Command::NextWidth => self.tools.next_width(),
            Command::ClearSelection => self.clear_selection(),
            Command::ZoomIn => self.zoom_in(),
            Command::ZoomOut => self.zoom_out(),
            Command::ResetView => self.reset_view(),
        }
        true
    }

    fn persist(&self) {
        let Some(storage) = &self.storage else {
            return;
        };
        if let Err(e) = storage.save(&self.attrs()) {
            log::warn!("Failed to persist drawing: {}", e);
        }
    }
}

/// Apply the eraser at `position` with the current tool width and mode.
fn erase(
    document: &mut Document,
    selection: &mut Selection,
    tools: &ToolManager,
    position: Point,
) -> bool {
    let radius = eraser_radius(tools.width());
    let changed = erase_at(document, position, radius, tools.eraser_mode);
    if changed {
        selection.retain_existing(document);
    }
    changed
}

fn now_millis() -> Option<u64> {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .ok()
        .map(|d| d.as_millis() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{Modifiers, PointerButton, PointerType};
    use crate::storage::MemoryStorage;
    use crate::stroke::StrokeTool;
    use kurbo::Size;
    use std::sync::Arc;

    fn engine_with_storage() -> (Engine, Arc<MemoryStorage>) {
        let storage = Arc::new(MemoryStorage::new());
        let engine = Engine::default().with_storage(Box::new(storage.clone()));
        (engine, storage)
    }

    fn draw(engine: &mut Engine, points: &[(f64, f64)]) {
        let mut iter = points.iter();
        let Some(&(x, y)) = iter.next() else {
            return;
        };
        engine.pointer_down(&PointerSample::new(1, Point::new(x, y)).with_pressure(0.5));
        for &(x, y) in iter {
            engine.pointer_move(&PointerSample::new(1, Point::new(x, y)).with_pressure(0.5));
        }
        let &(x, y) = points.last().unwrap();
        engine.pointer_up(&PointerSample::new(1, Point::new(x, y)));
    }

    #[test]
    fn test_stroke_commit_persists_once() {
        let (mut engine, storage) = engine_with_storage();
        draw(&mut engine, &[(0.0, 0.0), (10.0, 0.0), (20.0, 5.0)]);

        assert_eq!(engine.document().len(), 1);
        assert_eq!(storage.write_count(), 1);
        let stroke = &engine.document().strokes()[0];
        assert_eq!(stroke.len(), 3);
        assert_eq!(stroke.color, "#1e1e1e");
        assert!((stroke.width - 4.0).abs() < f64::EPSILON);
        assert!(stroke.timestamp.is_some());
        assert!(engine.can_undo());
    }

    #[test]
    fn test_tap_is_discarded_without_history() {
        let (mut engine, storage) = engine_with_storage();
        draw(&mut engine, &[(5.0, 5.0)]);

        assert!(engine.document().is_empty());
        assert_eq!(storage.write_count(), 0);
        assert!(!engine.can_undo());
    }

    #[test]
    fn test_canvas_conversion_uses_origin_and_view() {
        let mut engine = Engine::default();
        engine.set_origin(Point::new(100.0, 50.0));
        engine.set_view(ViewTransform {
            zoom: 2.0,
            pan: Vec2::new(10.0, 20.0),
        });
        let p = engine.to_canvas(Point::new(130.0, 90.0));
        assert!((p.x - 10.0).abs() < 1e-9);
        assert!((p.y - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_pan_gesture() {
        let mut engine = Engine::default();
        let down = PointerSample::new(3, Point::new(10.0, 10.0)).with_button(PointerButton::Middle);
        assert!(engine.pointer_down(&down));
        engine.pointer_move(&PointerSample::new(3, Point::new(25.0, 5.0)));
        engine.pointer_up(&PointerSample::new(3, Point::new(25.0, 5.0)));

        assert_eq!(engine.view().pan, Vec2::new(15.0, -5.0));
        assert!(engine.document().is_empty());
        assert!(!engine.can_undo());
    }

    #[test]
    fn test_alt_primary_pans() {
        let mut engine = Engine::default();
        let down = PointerSample::new(1, Point::ZERO).with_modifiers(Modifiers {
            alt: true,
            ..Modifiers::default()
        });
        engine.pointer_down(&down);
        assert!(matches!(engine.gesture(), Gesture::Pan { .. }));
    }

    #[test]
    fn test_other_pointers_are_ignored() {
        let mut engine = Engine::default();
        engine.pointer_down(&PointerSample::new(1, Point::new(0.0, 0.0)));
        assert!(!engine.pointer_down(&PointerSample::new(2, Point::new(50.0, 50.0))));
        assert!(!engine.pointer_move(&PointerSample::new(2, Point::new(60.0, 60.0))));
        assert!(!engine.pointer_up(&PointerSample::new(2, Point::new(60.0, 60.0))));
        engine.pointer_move(&PointerSample::new(1, Point::new(10.0, 0.0)));
        engine.pointer_up(&PointerSample::new(1, Point::new(10.0, 0.0)));

        assert_eq!(engine.document().len(), 1);
        assert_eq!(engine.document().strokes()[0].len(), 2);
    }

    #[test]
    fn test_secondary_button_is_ignored() {
        let (mut engine, storage) = engine_with_storage();
        let right = |x: f64| {
            PointerSample::new(1, Point::new(x, 0.0)).with_button(PointerButton::Secondary)
        };
        assert!(!engine.pointer_down(&right(0.0)));
        assert!(!engine.pointer_move(&right(10.0)));
        assert!(!engine.pointer_up(&right(10.0)));
        assert!(engine.gesture().is_idle());
        assert!(engine.document().is_empty());
        assert!(!engine.can_undo());

        draw(&mut engine, &[(0.0, 0.0), (10.0, 0.0)]);
        engine.set_tool(Tool::Eraser);
        assert!(!engine.pointer_down(&right(0.0)));
        assert_eq!(engine.document().len(), 1);
        assert_eq!(storage.write_count(), 1);
    }

    #[test]
    fn test_palm_is_rejected() {
        let mut engine = Engine::default();
        let palm = PointerSample::new(4, Point::ZERO)
            .with_pointer_type(PointerType::Touch)
            .with_contact(Size::new(60.0, 45.0));
        assert!(!engine.pointer_down(&palm));
        assert!(engine.gesture().is_idle());

        let mut config = EngineConfig::default();
        config.palm_rejection = false;
        let mut permissive = Engine::new(config);
        assert!(permissive.pointer_down(&palm));
    }

    #[test]
    fn test_pencil_and_highlighter_strokes() {
        let mut engine = Engine::default();
        engine.set_tool(Tool::Pencil);
        draw(&mut engine, &[(0.0, 0.0), (10.0, 10.0)]);
        engine.set_tool(Tool::Highlighter);
        draw(&mut engine, &[(0.0, 20.0), (10.0, 20.0)]);

        let strokes = engine.document().strokes();
        assert_eq!(strokes[0].tool, StrokeTool::Pen);
        assert_eq!(strokes[0].pen_type.as_deref(), Some("pencil"));
        assert_eq!(strokes[1].tool, StrokeTool::Highlighter);
        assert_eq!(strokes[1].pen_type, None);
    }

    #[test]
    fn test_pressure_is_normalized() {
        let mut config = EngineConfig::default();
        config.pressure_sensitivity = 0.5;
        let mut engine = Engine::new(config);
        engine.pointer_down(&PointerSample::new(1, Point::ZERO));
        engine.pointer_move(&PointerSample::new(1, Point::new(5.0, 0.0)).with_pressure(0.8));
        let stroke = engine.live_stroke().unwrap();
        assert!((stroke.points[0].pressure - 0.25).abs() < f64::EPSILON);
        assert!((stroke.points[1].pressure - 0.4).abs() < f64::EPSILON);
    }

    #[test]
    fn test_paper_changes_persist() {
        let (mut engine, storage) = engine_with_storage();
        engine.set_paper_type(PaperType::Ruled);
        engine.set_paper_type(PaperType::Ruled);
        engine.set_paper_color(PaperColor::Dark);

        assert_eq!(storage.write_count(), 2);
        let latest = storage.latest().unwrap();
        assert_eq!(latest.paper_type, PaperType::Ruled);
        assert_eq!(latest.paper_color, PaperColor::Dark);
    }

    #[test]
    fn test_clear_is_undoable() {
        let (mut engine, storage) = engine_with_storage();
        draw(&mut engine, &[(0.0, 0.0), (10.0, 0.0)]);
        assert!(engine.clear());
        assert!(engine.document().is_empty());
        assert!(!engine.clear());

        assert!(engine.undo());
        assert_eq!(engine.document().len(), 1);
        assert_eq!(storage.write_count(), 3);
    }

    #[test]
    fn test_redraws_coalesce() {
        let mut engine = Engine::default();
        engine.pointer_down(&PointerSample::new(1, Point::ZERO));
        engine.pointer_move(&PointerSample::new(1, Point::new(1.0, 0.0)));
        engine.pointer_move(&PointerSample::new(1, Point::new(2.0, 0.0)));

        assert!(engine.take_frame_request());
        assert!(!engine.take_frame_request());
        assert!(engine.begin_frame());
        assert!(!engine.begin_frame());
    }

    #[test]
    fn test_undo_during_stroke_commits_first() {
        let mut engine = Engine::default();
        engine.pointer_down(&PointerSample::new(1, Point::ZERO));
        engine.pointer_move(&PointerSample::new(1, Point::new(10.0, 0.0)));
        assert!(engine.undo());
        assert!(engine.document().is_empty());
        assert!(engine.gesture().is_idle());
        assert!(engine.redo());
        assert_eq!(engine.document().len(), 1);
    }
}
