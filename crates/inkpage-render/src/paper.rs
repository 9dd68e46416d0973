//! Paper background pattern geometry.
//!
//! Patterns are laid out in screen space and are not affected by zoom or pan.

use inkpage_core::paper::PaperType;
use kurbo::{Line, Point, Size};

/// Distance between pattern lines and dots.
pub const PATTERN_SPACING: f64 = 32.0;

pub const DOT_RADIUS: f64 = 1.5;

pub const LINE_WIDTH: f64 = 1.0;

/// Isometric diagonals run at ±30° from horizontal.
const ISOMETRIC_ANGLE_DEGREES: f64 = 30.0;

/// Backend-independent pattern: segments to stroke and dots to fill.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PaperPattern {
    pub lines: Vec<Line>,
    pub dots: Vec<Point>,
}

impl PaperPattern {
    /// Lay out the pattern for a viewport.
    pub fn new(paper_type: PaperType, viewport: Size) -> Self {
        let mut pattern = Self::default();
        if viewport.width <= 0.0 || viewport.height <= 0.0 {
            return pattern;
        }

        match paper_type {
            PaperType::Blank => {}
            PaperType::Ruled => pattern.horizontal_lines(viewport),
            PaperType::Grid => {
                pattern.horizontal_lines(viewport);
                pattern.vertical_lines(viewport);
            }
            PaperType::Dot => {
                for x in steps(viewport.width) {
                    for y in steps(viewport.height) {
                        pattern.dots.push(Point::new(x, y));
                    }
                }
            }
            PaperType::Isometric => {
                pattern.horizontal_lines(viewport);
                pattern.diagonal_lines(viewport);
            }
        }
        pattern
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty() && self.dots.is_empty()
    }

    fn horizontal_lines(&mut self, viewport: Size) {
        for y in steps(viewport.height) {
            self.lines.push(Line::new((0.0, y), (viewport.width, y)));
        }
    }

    fn vertical_lines(&mut self, viewport: Size) {
        for x in steps(viewport.width) {
            self.lines.push(Line::new((x, 0.0), (x, viewport.height)));
        }
    }

    /// Two families of diagonals, each spaced `PATTERN_SPACING` apart
    /// perpendicular to its direction.
    fn diagonal_lines(&mut self, viewport: Size) {
        let slope = ISOMETRIC_ANGLE_DEGREES.to_radians().tan();
        let step = PATTERN_SPACING / ISOMETRIC_ANGLE_DEGREES.to_radians().cos();
        let rise = viewport.width * slope;

        // Rising lines: y = c - x * slope, c in (0, height + rise)
        let mut c = step;
        while c < viewport.height + rise {
            self.lines.push(Line::new((0.0, c), (viewport.width, c - rise)));
            c += step;
        }

        // Falling lines: y = c + x * slope, c in (-rise, height)
        let mut c = viewport.height - step;
        while c > -rise {
            self.lines.push(Line::new((0.0, c), (viewport.width, c + rise)));
            c -= step;
        }
    }
}

/// Multiples of the spacing strictly inside `(0, extent)`.
fn steps(extent: f64) -> impl Iterator<Item = f64> {
    (1..)
        .map(|i| i as f64 * PATTERN_SPACING)
        .take_while(move |v| *v < extent)
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Size = Size::new(320.0, 200.0);

    #[test]
    fn test_blank_is_empty() {
        assert!(PaperPattern::new(PaperType::Blank, VIEWPORT).is_empty());
    }

    #[test]
    fn test_ruled_lines() {
        let pattern = PaperPattern::new(PaperType::Ruled, VIEWPORT);
        // 32, 64, ..., 192
        assert_eq!(pattern.lines.len(), 6);
        assert!(pattern.dots.is_empty());
        assert!(pattern.lines.iter().all(|l| l.p0.y == l.p1.y));
        assert!((pattern.lines[0].p0.y - 32.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_grid_lines() {
        let pattern = PaperPattern::new(PaperType::Grid, VIEWPORT);
        // 6 horizontal, 9 vertical (32..288)
        assert_eq!(pattern.lines.len(), 15);
        let vertical = pattern.lines.iter().filter(|l| l.p0.x == l.p1.x).count();
        assert_eq!(vertical, 9);
    }

    #[test]
    fn test_dot_lattice() {
        let pattern = PaperPattern::new(PaperType::Dot, VIEWPORT);
        assert_eq!(pattern.dots.len(), 9 * 6);
        assert!(pattern.lines.is_empty());
        assert_eq!(pattern.dots[0], Point::new(32.0, 32.0));
    }

    #[test]
    fn test_isometric_diagonals() {
        let pattern = PaperPattern::new(PaperType::Isometric, VIEWPORT);
        let diagonals: Vec<&Line> = pattern.lines.iter().filter(|l| l.p0.y != l.p1.y).collect();
        assert!(!diagonals.is_empty());
        assert!(pattern.lines.len() > 6);
        for line in diagonals {
            let angle = ((line.p1.y - line.p0.y) / (line.p1.x - line.p0.x)).atan().to_degrees();
            assert!((angle.abs() - 30.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_zero_viewport() {
        assert!(PaperPattern::new(PaperType::Grid, Size::ZERO).is_empty());
    }
}
