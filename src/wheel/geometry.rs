//! Equal-angle pie layout of the wheel.
//!
//! Angles are in degrees, measured clockwise from 12 o'clock, and points use
//! screen orientation (y grows downwards) with the wheel centre at the origin.

use super::label::{layout_label, LabelLine};
use super::options::{Rgb, WheelOptions};

pub const FULL_TURN: f64 = 360.0;

/// Outline sampling resolution along each arc, in degrees.
const ARC_RESOLUTION: f64 = 2.0;

/// Offset from the centroid to the first label line.
const LABEL_OFFSET: Point = Point { x: -10.0, y: -20.0 };

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn polar(angle: f64, radius: f64) -> Self {
        let radians = angle.to_radians();
        Self::new(radius * radians.sin(), -radius * radians.cos())
    }

    /// Rotates clockwise (in screen orientation) around the origin.
    pub fn rotate(self, angle: f64) -> Self {
        let (sin, cos) = angle.to_radians().sin_cos();
        Self::new(self.x * cos - self.y * sin, self.x * sin + self.y * cos)
    }

    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    pub fn distance(self) -> f64 {
        self.x.hypot(self.y)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub index: usize,
    pub start_angle: f64,
    pub end_angle: f64,
    pub inner_radius: f64,
    pub outer_radius: f64,
    /// Closed outline: outer arc clockwise, then inner arc back.
    pub outline: Vec<Point>,
    pub centroid: Point,
    pub color: Rgb,
    pub text_color: Rgb,
    pub value: String,
    pub label_anchor: Point,
    pub label: Vec<LabelLine>,
}

impl Segment {
    pub fn span(&self) -> f64 {
        self.end_angle - self.start_angle
    }

    /// Samples the annular sector on a polar grid, for raster renderers.
    pub fn fill_points(&self, radial_steps: usize, angular_steps: usize) -> Vec<Point> {
        let radial_steps = radial_steps.max(1);
        let angular_steps = angular_steps.max(1);
        let depth = self.outer_radius - self.inner_radius;
        let span = self.span();

        let mut points = Vec::with_capacity((radial_steps + 1) * (angular_steps + 1));
        for r in 0..=radial_steps {
            let radius = self.inner_radius + depth * r as f64 / radial_steps as f64;
            for a in 0..=angular_steps {
                let angle = self.start_angle + span * a as f64 / angular_steps as f64;
                points.push(Point::polar(angle, radius));
            }
        }
        points
    }
}

pub fn segment_span(segments: usize) -> f64 {
    FULL_TURN / segments as f64
}

fn arc_outline(start: f64, end: f64, inner: f64, outer: f64) -> Vec<Point> {
    let steps = ((end - start) / ARC_RESOLUTION).ceil().max(1.0) as usize;
    let mut outline = Vec::with_capacity(2 * (steps + 1) + 1);

    for step in 0..=steps {
        let angle = start + (end - start) * step as f64 / steps as f64;
        outline.push(Point::polar(angle, outer));
    }
    for step in (0..=steps).rev() {
        let angle = start + (end - start) * step as f64 / steps as f64;
        outline.push(Point::polar(angle, inner));
    }
    if let Some(first) = outline.first().copied() {
        outline.push(first);
    }

    outline
}

/// Builds one segment per reward. Options are expected to be validated.
pub fn build_segments(options: &WheelOptions) -> Vec<Segment> {
    let count = options.segment_count();
    if count == 0 {
        return Vec::new();
    }

    let span = segment_span(count);
    let inner = options.inner_radius;
    let outer = options.outer_radius;

    options
        .rewards
        .iter()
        .enumerate()
        .map(|(index, value)| {
            let start_angle = index as f64 * span;
            let end_angle = start_angle + span;
            let centroid = Point::polar((start_angle + end_angle) / 2.0, (inner + outer) / 2.0);
            let label_anchor = centroid.offset(LABEL_OFFSET.x, LABEL_OFFSET.y);
            let text_color = options.text_colors[index];

            Segment {
                index,
                start_angle,
                end_angle,
                inner_radius: inner,
                outer_radius: outer,
                outline: arc_outline(start_angle, end_angle, inner, outer),
                centroid,
                color: options.colors[index],
                text_color,
                value: value.clone(),
                label_anchor,
                label: layout_label(value, label_anchor, options.font_size, text_color),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wheel::options::Winner;

    fn options(count: usize) -> WheelOptions {
        let rewards = (0..count).map(|i| format!("{}", (i + 1) * 10)).collect();
        WheelOptions::new(
            rewards,
            vec![Rgb::new(10, 20, 30); count],
            vec![Rgb::new(240, 240, 240); count],
            Winner::Index(0),
        )
    }

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{} != {}", a, b);
    }

    #[test]
    fn spans_cover_one_full_turn() {
        for count in 1..=24 {
            let segments = build_segments(&options(count));
            assert_eq!(segments.len(), count);

            let total: f64 = segments.iter().map(Segment::span).sum();
            assert_close(total, FULL_TURN);
            for segment in &segments {
                assert_close(segment.span(), FULL_TURN / count as f64);
            }
            assert_close(segments[count - 1].end_angle, FULL_TURN);
        }
    }

    #[test]
    fn centroid_sits_mid_angle_mid_radius() {
        let segments = build_segments(&options(4));
        // segment 0 spans 0..90, centred at 45 degrees, radius 150
        let expected = 150.0 * std::f64::consts::FRAC_1_SQRT_2;
        assert_close(segments[0].centroid.x, expected);
        assert_close(segments[0].centroid.y, -expected);
        assert_close(segments[0].centroid.distance(), 150.0);

        assert_close(segments[2].centroid.x, -expected);
        assert_close(segments[2].centroid.y, expected);

        assert_close(segments[1].label_anchor.x, segments[1].centroid.x - 10.0);
        assert_close(segments[1].label_anchor.y, segments[1].centroid.y - 20.0);
    }

    #[test]
    fn outline_is_closed_and_between_radii() {
        for segment in build_segments(&options(6)) {
            let first = segment.outline.first().copied().unwrap();
            let last = segment.outline.last().copied().unwrap();
            assert_eq!(first, last);

            for point in &segment.outline {
                let distance = point.distance();
                assert!(distance >= 100.0 - 1e-9 && distance <= 200.0 + 1e-9);
            }
        }
    }

    #[test]
    fn fill_points_stay_inside_segment() {
        let segments = build_segments(&options(3));
        let points = segments[1].fill_points(4, 8);
        assert_eq!(points.len(), 5 * 9);
        for point in points {
            let distance = point.distance();
            assert!(distance >= 100.0 - 1e-9 && distance <= 200.0 + 1e-9);
            // segment 1 of 3 spans 120..240, the lower half of the wheel
            assert!(point.y > 0.0);
        }
    }

    #[test]
    fn build_is_deterministic() {
        let opts = options(8);
        assert_eq!(build_segments(&opts), build_segments(&opts));
    }

    #[test]
    fn rotation_is_clockwise_on_screen() {
        let top = Point::polar(0.0, 1.0);
        let right = top.rotate(90.0);
        assert_close(right.x, 1.0);
        assert_close(right.y, 0.0);
    }
}
