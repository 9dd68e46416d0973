//! Lasso selection: polygon capture, hit testing and drag.

use crate::document::Document;
use crate::stroke::StrokeId;
use kurbo::{Point, Vec2};

/// Distance within which a press on a selected stroke starts a drag.
pub const LASSO_PICK_RADIUS: f64 = 20.0;

/// Minimum polygon size (exclusive) for a capture to select anything.
const MIN_POLYGON_POINTS: usize = 2;

/// Even-odd ray casting point-in-polygon test.
///
/// The polygon is implicitly closed. Fewer than 3 vertices never contain a point.
pub fn point_in_polygon(point: Point, polygon: &[Point]) -> bool {
    if polygon.len() < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = polygon.len() - 1;
    for i in 0..polygon.len() {
        let (pi, pj) = (polygon[i], polygon[j]);
        if (pi.y > point.y) != (pj.y > point.y) {
            let cross_x = (pj.x - pi.x) * (point.y - pi.y) / (pj.y - pi.y) + pi.x;
            if point.x < cross_x {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Selected strokes, by stable id.
///
/// Ids are resolved against the document when used; ids whose stroke no
/// longer exists are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: Vec<StrokeId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a stroke. Returns false if it was already selected.
    pub fn insert(&mut self, id: StrokeId) -> bool {
        if self.ids.contains(&id) {
            false
        } else {
            self.ids.push(id);
            true
        }
    }

    pub fn contains(&self, id: StrokeId) -> bool {
        self.ids.contains(&id)
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn ids(&self) -> &[StrokeId] {
        &self.ids
    }

    /// Drop ids that no longer resolve in `document`.
    pub fn retain_existing(&mut self, document: &Document) {
        self.ids.retain(|&id| document.contains(id));
    }

    /// Current positions of the selected strokes, ascending.
    pub fn resolve(&self, document: &Document) -> Vec<usize> {
        let mut positions: Vec<usize> = self
            .ids
            .iter()
            .filter_map(|&id| document.position(id))
            .collect();
        positions.sort_unstable();
        positions
    }
}

/// Strokes with at least one point inside the polygon, in document order.
pub fn strokes_in_polygon(document: &Document, polygon: &[Point]) -> Vec<StrokeId> {
    document
        .strokes()
        .iter()
        .filter(|s| s.points.iter().any(|p| point_in_polygon(p.to_point(), polygon)))
        .map(|s| s.id())
        .collect()
}

/// Whether `point` lies within `radius` of any point of a selected stroke.
pub fn hits_selection(
    document: &Document,
    selection: &Selection,
    point: Point,
    radius: f64,
) -> bool {
    selection
        .ids()
        .iter()
        .filter_map(|&id| document.stroke(id))
        .any(|s| s.any_point_within(point, radius))
}

/// Translate every selected stroke by `delta`. Returns the number moved.
pub fn translate_selection(document: &mut Document, selection: &Selection, delta: Vec2) -> usize {
    let mut moved = 0;
    for &id in selection.ids() {
        if let Some(stroke) = document.stroke_mut(id) {
            stroke.translate(delta);
            moved += 1;
        }
    }
    moved
}

/// State of a lasso interaction.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum LassoState {
    #[default]
    Idle,
    /// Collecting the selection polygon.
    Capturing { polygon: Vec<Point> },
    /// Moving the current selection.
    Dragging { last: Point, moved: bool },
}

/// How a lasso gesture started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LassoStart {
    Capture,
    Drag,
}

/// Result of finishing a lasso gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LassoOutcome {
    /// No gesture was active, or the polygon was too small.
    Unchanged,
    /// A capture finished; `added` strokes joined the selection.
    Selected { added: usize },
    /// A drag finished; `moved` is false if the pointer never moved.
    Dragged { moved: bool },
}

/// Lasso tool state machine.
#[derive(Debug, Clone)]
pub struct Lasso {
    state: LassoState,
    pick_radius: f64,
}

impl Lasso {
    pub fn new(pick_radius: f64) -> Self {
        Self {
            state: LassoState::Idle,
            pick_radius,
        }
    }

    pub fn state(&self) -> &LassoState {
        &self.state
    }

    pub fn is_active(&self) -> bool {
        !matches!(self.state, LassoState::Idle)
    }

    /// The polygon being captured, for the overlay.
    pub fn polygon(&self) -> Option<&[Point]> {
        match &self.state {
            LassoState::Capturing { polygon } => Some(polygon),
            _ => None,
        }
    }

    /// Start a gesture at `point`: drag if it lands on the selection, capture otherwise.
    pub fn begin(
        &mut self,
        document: &Document,
        selection: &Selection,
        point: Point,
    ) -> LassoStart {
        if hits_selection(document, selection, point, self.pick_radius) {
            self.state = LassoState::Dragging {
                last: point,
                moved: false,
            };
            LassoStart::Drag
        } else {
            self.state = LassoState::Capturing {
                polygon: vec![point],
            };
            LassoStart::Capture
        }
    }

    /// Extend the polygon, or move the selection by the delta since the last event.
    pub fn update(&mut self, document: &mut Document, selection: &Selection, point: Point) {
        match &mut self.state {
            LassoState::Idle => {}
            LassoState::Capturing { polygon } => polygon.push(point),
            LassoState::Dragging { last, moved } => {
                let delta = point - *last;
                *last = point;
                if delta != Vec2::ZERO && translate_selection(document, selection, delta) > 0 {
                    *moved = true;
                }
            }
        }
    }

    /// Finish the gesture. The polygon is discarded.
    pub fn finish(&mut self, document: &Document, selection: &mut Selection) -> LassoOutcome {
        match std::mem::take(&mut self.state) {
            LassoState::Idle => LassoOutcome::Unchanged,
            LassoState::Capturing { polygon } => {
                if polygon.len() <= MIN_POLYGON_POINTS {
                    return LassoOutcome::Unchanged;
                }
                let added = strokes_in_polygon(document, &polygon)
                    .into_iter()
                    .filter(|&id| selection.insert(id))
                    .count();
                LassoOutcome::Selected { added }
            }
            LassoState::Dragging { moved, .. } => LassoOutcome::Dragged { moved },
        }
    }

    /// Abandon the gesture without applying it.
    pub fn cancel(&mut self) {
        self.state = LassoState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stroke::{Stroke, StrokePoint, StrokeTool};

    fn square(x0: f64, y0: f64, x1: f64, y1: f64) -> Vec<Point> {
        vec![
            Point::new(x0, y0),
            Point::new(x1, y0),
            Point::new(x1, y1),
            Point::new(x0, y1),
        ]
    }

    fn stroke_at(points: &[(f64, f64)]) -> Stroke {
        Stroke::from_points(
            StrokeTool::Pen,
            "#000000",
            2.0,
            points.iter().map(|&(x, y)| StrokePoint::new(x, y, 0.5)).collect(),
        )
    }

    #[test]
    fn test_point_in_square() {
        let poly = square(0.0, 0.0, 100.0, 100.0);
        assert!(point_in_polygon(Point::new(50.0, 50.0), &poly));
        assert!(!point_in_polygon(Point::new(150.0, 50.0), &poly));
        assert!(!point_in_polygon(Point::new(50.0, -1.0), &poly));
    }

    #[test]
    fn test_point_in_concave_polygon() {
        // U shape: the notch between the arms is outside
        let poly = vec![
            Point::new(0.0, 0.0),
            Point::new(30.0, 0.0),
            Point::new(30.0, 70.0),
            Point::new(70.0, 70.0),
            Point::new(70.0, 0.0),
            Point::new(100.0, 0.0),
            Point::new(100.0, 100.0),
            Point::new(0.0, 100.0),
        ];
        assert!(point_in_polygon(Point::new(15.0, 20.0), &poly));
        assert!(!point_in_polygon(Point::new(50.0, 20.0), &poly));
        assert!(point_in_polygon(Point::new(50.0, 90.0), &poly));
    }

    #[test]
    fn test_degenerate_polygon() {
        let line = vec![Point::new(0.0, 0.0), Point::new(10.0, 10.0)];
        assert!(!point_in_polygon(Point::new(5.0, 5.0), &line));
    }

    #[test]
    fn test_capture_selects_strokes_inside() {
        let mut doc = Document::new();
        let inside = stroke_at(&[(200.0, 200.0), (50.0, 50.0)]);
        let outside = stroke_at(&[(200.0, 200.0), (300.0, 300.0)]);
        let inside_id = inside.id();
        doc.push(inside);
        doc.push(outside);

        let mut selection = Selection::new();
        let mut lasso = Lasso::new(LASSO_PICK_RADIUS);
        let poly = square(0.0, 0.0, 100.0, 100.0);

        assert_eq!(lasso.begin(&doc, &selection, poly[0]), LassoStart::Capture);
        for &p in &poly[1..] {
            lasso.update(&mut doc, &selection, p);
        }
        assert_eq!(lasso.polygon().map(<[Point]>::len), Some(4));

        let outcome = lasso.finish(&doc, &mut selection);
        assert_eq!(outcome, LassoOutcome::Selected { added: 1 });
        assert_eq!(selection.ids(), &[inside_id]);
        assert!(lasso.polygon().is_none());
    }

    #[test]
    fn test_small_polygon_keeps_selection() {
        let mut doc = Document::new();
        let s = stroke_at(&[(5.0, 5.0), (6.0, 6.0)]);
        let id = s.id();
        doc.push(s);

        let mut selection = Selection::new();
        selection.insert(id);
        let mut lasso = Lasso::new(LASSO_PICK_RADIUS);
        lasso.begin(&doc, &selection, Point::new(500.0, 500.0));
        lasso.update(&mut doc, &selection, Point::new(600.0, 500.0));

        assert_eq!(lasso.finish(&doc, &mut selection), LassoOutcome::Unchanged);
        assert_eq!(selection.len(), 1);
    }

    #[test]
    fn test_drag_translates_selection() {
        let mut doc = Document::new();
        let s = stroke_at(&[(10.0, 10.0), (20.0, 20.0)]);
        let other = stroke_at(&[(300.0, 300.0), (310.0, 310.0)]);
        let id = s.id();
        doc.push(s);
        doc.push(other.clone());

        let mut selection = Selection::new();
        selection.insert(id);
        let mut lasso = Lasso::new(LASSO_PICK_RADIUS);

        assert_eq!(lasso.begin(&doc, &selection, Point::new(25.0, 25.0)), LassoStart::Drag);
        lasso.update(&mut doc, &selection, Point::new(35.0, 30.0));
        lasso.update(&mut doc, &selection, Point::new(45.0, 35.0));

        let moved = doc.stroke(id).unwrap();
        assert!((moved.points[0].x - 30.0).abs() < f64::EPSILON);
        assert!((moved.points[0].y - 20.0).abs() < f64::EPSILON);
        assert_eq!(doc.strokes()[1], other);
        assert_eq!(lasso.finish(&doc, &mut selection), LassoOutcome::Dragged { moved: true });
    }

    #[test]
    fn test_stale_ids_are_ignored() {
        let mut doc = Document::new();
        let s = stroke_at(&[(10.0, 10.0), (20.0, 20.0)]);
        let gone = s.id();
        doc.push(s);

        let mut selection = Selection::new();
        selection.insert(gone);
        doc.clear();

        assert!(selection.resolve(&doc).is_empty());
        assert_eq!(translate_selection(&mut doc, &selection, Vec2::new(1.0, 1.0)), 0);
        selection.retain_existing(&doc);
        assert!(selection.is_empty());
    }
}
