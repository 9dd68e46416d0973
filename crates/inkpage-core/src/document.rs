//! Ordered stroke document.

use crate::stroke::{Stroke, StrokeId};
use kurbo::Rect;

/// The strokes of one drawing block, in insertion order.
///
/// Insertion order is the baseline z-order. Rendering uses
/// [`Document::render_order`], which lifts every highlighter beneath the ink.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    strokes: Vec<Stroke>,
}

impl Document {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a document from existing strokes.
    pub fn from_strokes(strokes: Vec<Stroke>) -> Self {
        Self { strokes }
    }

    /// All strokes in insertion order.
    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    /// Append a stroke on top of the others.
    pub fn push(&mut self, stroke: Stroke) {
        self.strokes.push(stroke);
    }

    /// Remove every stroke.
    pub fn clear(&mut self) {
        self.strokes.clear();
    }

    pub fn len(&self) -> usize {
        self.strokes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    /// Stroke at a position, bounds-checked.
    pub fn get(&self, index: usize) -> Option<&Stroke> {
        self.strokes.get(index)
    }

    /// Find a stroke by id.
    pub fn stroke(&self, id: StrokeId) -> Option<&Stroke> {
        self.strokes.iter().find(|s| s.id == id)
    }

    /// Find a stroke by id for mutation.
    pub fn stroke_mut(&mut self, id: StrokeId) -> Option<&mut Stroke> {
        self.strokes.iter_mut().find(|s| s.id == id)
    }

    /// Current position of a stroke.
    pub fn position(&self, id: StrokeId) -> Option<usize> {
        self.strokes.iter().position(|s| s.id == id)
    }

    pub fn contains(&self, id: StrokeId) -> bool {
        self.position(id).is_some()
    }

    /// Keep only the strokes matching the predicate.
    pub fn retain(&mut self, f: impl FnMut(&Stroke) -> bool) {
        self.strokes.retain(f);
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Stroke> {
        self.strokes.iter_mut()
    }

    /// Strokes in paint order: highlighters first, then everything else,
    /// each group keeping insertion order.
    pub fn render_order(&self) -> impl Iterator<Item = &Stroke> {
        let highlighters = self.strokes.iter().filter(|s| s.is_highlighter());
        let ink = self.strokes.iter().filter(|s| !s.is_highlighter());
        highlighters.chain(ink)
    }

    /// Bounding box of all stroke points.
    pub fn bounds(&self) -> Option<Rect> {
        self.strokes
            .iter()
            .filter(|s| !s.is_empty())
            .map(Stroke::bounds)
            .reduce(|a, b| a.union(b))
    }
}
