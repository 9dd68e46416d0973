//! Variable-width stroke outlining.
//!
//! Turns a sequence of pressure-tagged points into a closed polygon whose
//! width follows pressure, with optional tapering and round caps. The
//! polygon is then converted into a smooth quadratic path for filling.

use inkpage_core::stroke::StrokePoint;
use kurbo::{BezPath, Point, Vec2};
use std::f64::consts::PI;

/// How quickly simulated pressure follows pointer speed.
const RATE_OF_PRESSURE_CHANGE: f64 = 0.275;

/// Slightly more than a half turn so cap arcs overlap the sides.
const FIXED_PI: f64 = PI + 0.0001;

const CORNER_CAP_SEGMENTS: usize = 13;
const END_CAP_SEGMENTS: usize = 29;

/// Samples closer than this to the end of the stroke are skipped.
const END_NOISE_LENGTH: f64 = 3.0;

/// Tapering applied to one end of a stroke.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Taper {
    #[default]
    None,
    /// Taper over the whole stroke length.
    Full,
    /// Taper over a fixed distance.
    Length(f64),
}

impl Taper {
    fn distance(self, size: f64, total_length: f64) -> f64 {
        match self {
            Taper::None => 0.0,
            Taper::Full => size.max(total_length),
            Taper::Length(d) => d.max(0.0),
        }
    }
}

/// Outline parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutlineOptions {
    /// Base diameter.
    pub size: f64,
    /// How much pressure affects width, in `[-1, 1]`.
    pub thinning: f64,
    /// Minimum distance between outline points, as a fraction of size.
    pub smoothing: f64,
    /// How much each input point is pulled toward the previous one.
    pub streamline: f64,
    /// Derive pressure from pointer speed instead of reported pressure.
    pub simulate_pressure: bool,
    pub taper_start: Taper,
    pub taper_end: Taper,
    /// Round cap at the start when not tapered.
    pub cap_start: bool,
    pub cap_end: bool,
    /// The stroke is finished: its last point is used as-is.
    pub last: bool,
}

impl Default for OutlineOptions {
    fn default() -> Self {
        Self {
            size: 16.0,
            thinning: 0.5,
            smoothing: 0.5,
            streamline: 0.5,
            simulate_pressure: false,
            taper_start: Taper::None,
            taper_end: Taper::None,
            cap_start: true,
            cap_end: true,
            last: true,
        }
    }
}

/// A streamlined input point with its direction and distance along the stroke.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeSample {
    pub point: Point,
    pub pressure: f64,
    /// Unit vector pointing back toward the previous sample.
    pub vector: Vec2,
    /// Distance from the previous sample.
    pub distance: f64,
    /// Distance from the first sample.
    pub running_length: f64,
}

/// 3-point moving average over positions. Endpoints and pressures are kept.
///
/// Strokes with 3 or fewer points are returned unchanged.
pub fn smooth_points(points: &[StrokePoint]) -> Vec<StrokePoint> {
    if points.len() <= 3 {
        return points.to_vec();
    }

    let mut smoothed = Vec::with_capacity(points.len());
    smoothed.push(points[0]);
    for window in points.windows(3) {
        smoothed.push(StrokePoint::new(
            (window[0].x + window[1].x + window[2].x) / 3.0,
            (window[0].y + window[1].y + window[2].y) / 3.0,
            window[1].pressure,
        ));
    }
    smoothed.push(points[points.len() - 1]);
    smoothed
}

/// Streamline the input and measure it.
pub fn stroke_samples(points: &[StrokePoint], options: &OutlineOptions) -> Vec<StrokeSample> {
    let Some(first) = points.first() else {
        return Vec::new();
    };

    let mut input: Vec<(Point, f64)> = points.iter().map(|p| (p.to_point(), p.pressure)).collect();
    if let &[(a, pa), (b, pb)] = &input[..] {
        // Interpolate so two-point strokes still get a proper outline
        input = (0..5)
            .map(|i| {
                let t = i as f64 / 4.0;
                (a.lerp(b, t), pa + (pb - pa) * t)
            })
            .collect();
    } else if input.len() == 1 {
        input.push((first.to_point() + Vec2::new(1.0, 1.0), first.pressure));
    }

    let t = 0.15 + (1.0 - options.streamline) * 0.85;
    let max = input.len() - 1;
    let mut samples = vec![StrokeSample {
        point: input[0].0,
        pressure: input[0].1,
        vector: Vec2::new(1.0, 1.0),
        distance: 0.0,
        running_length: 0.0,
    }];
    let mut running_length = 0.0;
    let mut reached_min_length = false;

    for (i, &(raw, pressure)) in input.iter().enumerate().skip(1) {
        let prev = samples[samples.len() - 1].point;
        let point = if options.last && i == max {
            raw
        } else {
            prev.lerp(raw, t)
        };
        if point == prev {
            continue;
        }

        let distance = point.distance(prev);
        running_length += distance;
        if i < max && !reached_min_length {
            if running_length < options.size {
                continue;
            }
            reached_min_length = true;
        }

        samples.push(StrokeSample {
            point,
            pressure,
            vector: unit(prev - point),
            distance,
            running_length,
        });
    }

    samples[0].vector = samples.get(1).map_or(Vec2::ZERO, |s| s.vector);
    samples
}

/// Compute the closed outline polygon of a stroke.
pub fn outline_points(samples: &[StrokeSample], options: &OutlineOptions) -> Vec<Point> {
    let size = options.size;
    if samples.is_empty() || size <= 0.0 {
        return Vec::new();
    }

    let last = samples[samples.len() - 1];
    let total_length = last.running_length;
    let taper_start = options.taper_start.distance(size, total_length);
    let taper_end = options.taper_end.distance(size, total_length);
    let min_distance = (size * options.smoothing).powi(2);

    let mut left: Vec<Point> = Vec::new();
    let mut right: Vec<Point> = Vec::new();

    let mut prev_pressure = samples.iter().take(10).fold(samples[0].pressure, |acc, s| {
        let pressure = if options.simulate_pressure {
            simulated_pressure(acc, s.distance, size)
        } else {
            s.pressure
        };
        (acc + pressure) / 2.0
    });

    let mut radius = stroke_radius(size, options.thinning, last.pressure);
    let mut first_radius = None;
    let mut prev_vector = samples[0].vector;
    let mut pl = samples[0].point;
    let mut pr = pl;
    let mut prev_was_corner = false;

    for (i, sample) in samples.iter().enumerate() {
        let is_last = i == samples.len() - 1;
        if !is_last && total_length - sample.running_length < END_NOISE_LENGTH {
            continue;
        }

        radius = if options.thinning != 0.0 {
            let pressure = if options.simulate_pressure {
                simulated_pressure(prev_pressure, sample.distance, size)
            } else {
                sample.pressure
            };
            prev_pressure = pressure;
            stroke_radius(size, options.thinning, pressure)
        } else {
            size / 2.0
        };
        first_radius.get_or_insert(radius);

        let ts = if sample.running_length < taper_start {
            let t = sample.running_length / taper_start;
            t * (2.0 - t)
        } else {
            1.0
        };
        let remaining = total_length - sample.running_length;
        let te = if remaining < taper_end {
            let t = remaining / taper_end - 1.0;
            t * t * t + 1.0
        } else {
            1.0
        };
        radius = (radius * ts.min(te)).max(0.01);

        let next_vector = if is_last {
            sample.vector
        } else {
            samples[i + 1].vector
        };
        let next_dot = if is_last { 1.0 } else { sample.vector.dot(next_vector) };
        let prev_dot = sample.vector.dot(prev_vector);

        let is_corner = prev_dot < 0.0 && !prev_was_corner;
        let next_is_corner = next_dot < 0.0;

        if is_corner || next_is_corner {
            // Draw a half-circle around a sharp turn
            let offset = perpendicular(prev_vector) * radius;
            for step in 0..=CORNER_CAP_SEGMENTS {
                let t = step as f64 / CORNER_CAP_SEGMENTS as f64;
                pl = rotate_around(sample.point - offset, sample.point, FIXED_PI * t);
                left.push(pl);
                pr = rotate_around(sample.point + offset, sample.point, -FIXED_PI * t);
                right.push(pr);
            }
            if next_is_corner {
                prev_was_corner = true;
            }
            continue;
        }
        prev_was_corner = false;

        if is_last {
            let offset = perpendicular(sample.vector) * radius;
            left.push(sample.point - offset);
            right.push(sample.point + offset);
            continue;
        }

        let offset = perpendicular(next_vector.lerp(sample.vector, next_dot)) * radius;
        let tl = sample.point - offset;
        if i <= 1 || (pl - tl).hypot2() > min_distance {
            left.push(tl);
            pl = tl;
        }
        let tr = sample.point + offset;
        if i <= 1 || (pr - tr).hypot2() > min_distance {
            right.push(tr);
            pr = tr;
        }

        prev_vector = sample.vector;
    }

    let first_point = samples[0].point;
    let first_radius = first_radius.unwrap_or(radius);

    if samples.len() == 1 || left.is_empty() || right.is_empty() {
        return dot(first_point, first_radius);
    }

    let last_point = last.point;
    let mut start_cap = Vec::new();
    if taper_start > 0.0 {
        // Tapered ends meet at a point
    } else if options.cap_start {
        for step in 0..=CORNER_CAP_SEGMENTS {
            let t = step as f64 / CORNER_CAP_SEGMENTS as f64;
            start_cap.push(rotate_around(right[0], first_point, FIXED_PI * t));
        }
    } else {
        let corners = left[0] - right[0];
        let (a, b) = (corners * 0.5, corners * 0.51);
        start_cap.extend([first_point - a, first_point - b, first_point + b, first_point + a]);
    }

    let mut end_cap = Vec::new();
    let direction = perpendicular(-last.vector);
    if taper_end > 0.0 {
        end_cap.push(last_point);
    } else if options.cap_end {
        let start = last_point + direction * radius;
        for step in 0..END_CAP_SEGMENTS {
            let t = step as f64 / END_CAP_SEGMENTS as f64;
            end_cap.push(rotate_around(start, last_point, FIXED_PI * 3.0 * t));
        }
    } else {
        end_cap.extend([
            last_point + direction * radius,
            last_point + direction * (radius * 0.99),
            last_point - direction * (radius * 0.99),
            last_point - direction * radius,
        ]);
    }

    let mut outline = left;
    outline.extend(end_cap);
    outline.extend(right.into_iter().rev());
    outline.extend(start_cap);
    outline
}

/// Convert an outline polygon into a closed path of quadratic curves
/// through the midpoints of its edges.
pub fn outline_path(outline: &[Point]) -> BezPath {
    let mut path = BezPath::new();
    let Some(&first) = outline.first() else {
        return path;
    };

    path.move_to(first);
    for (i, &p) in outline.iter().enumerate() {
        let next = outline[(i + 1) % outline.len()];
        path.quad_to(p, p.midpoint(next));
    }
    path.close_path();
    path
}

/// Outline a stroke's points into a fillable path.
pub fn stroke_path(points: &[StrokePoint], options: &OutlineOptions, smooth: bool) -> BezPath {
    let smoothed;
    let points = if smooth && points.len() > 3 {
        smoothed = smooth_points(points);
        &smoothed[..]
    } else {
        points
    };
    let samples = stroke_samples(points, options);
    outline_path(&outline_points(&samples, options))
}

fn stroke_radius(size: f64, thinning: f64, pressure: f64) -> f64 {
    size * (0.5 - thinning * (0.5 - pressure))
}

fn simulated_pressure(prev: f64, distance: f64, size: f64) -> f64 {
    let speed = (distance / size).min(1.0);
    let rest = (1.0 - speed).min(1.0);
    (prev + (rest - prev) * (speed * RATE_OF_PRESSURE_CHANGE)).min(1.0)
}

fn dot(center: Point, radius: f64) -> Vec<Point> {
    let start = center + Vec2::new(radius, 0.0);
    (0..=CORNER_CAP_SEGMENTS)
        .map(|step| {
            let t = step as f64 / CORNER_CAP_SEGMENTS as f64;
            rotate_around(start, center, FIXED_PI * 2.0 * t)
        })
        .collect()
}

fn unit(v: Vec2) -> Vec2 {
    let len = v.hypot();
    if len > 0.0 { v / len } else { Vec2::ZERO }
}

fn perpendicular(v: Vec2) -> Vec2 {
    Vec2::new(v.y, -v.x)
}

fn rotate_around(p: Point, center: Point, angle: f64) -> Point {
    let (sin, cos) = angle.sin_cos();
    let d = p - center;
    center + Vec2::new(d.x * cos - d.y * sin, d.x * sin + d.y * cos)
}
