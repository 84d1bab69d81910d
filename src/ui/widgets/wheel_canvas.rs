use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::canvas::{Canvas, Circle, Context, Line as CanvasLine, Points},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::ui::theme::{to_color, Theme};
use crate::wheel::{FontWeight, Point, Segment, Wheel};

/// Radial sample rows used to fill each segment.
const FILL_RINGS: usize = 24;
/// Angular sample spacing for the fill, in degrees.
const FILL_STEP_DEGREES: f64 = 1.5;

/// Canvas coordinates are y-up, wheel geometry is y-down.
fn to_canvas(point: Point) -> (f64, f64) {
    (point.x, -point.y)
}

/// Half the side of the square the wheel and knob are drawn in.
pub fn view_radius(wheel: &Wheel) -> f64 {
    let options = wheel.options();
    options.outer_radius + options.knob_size * 2.0
}

pub fn render(f: &mut Frame, area: Rect, wheel: &Wheel, theme: &Theme) {
    if area.width == 0 || area.height == 0 {
        return;
    }

    let radius = view_radius(wheel);
    // Units covered by one terminal row, used to space label lines.
    let row_units = 2.0 * radius / area.height as f64;
    let col_units = 2.0 * radius / area.width as f64;
    let rotation = wheel.current_angle() - wheel.angle_offset();

    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .background_color(theme.background)
        .x_bounds([-radius, radius])
        .y_bounds([-radius, radius])
        .paint(|ctx| {
            for segment in wheel.segments() {
                draw_segment(ctx, segment, rotation);
            }
            let border = to_color(wheel.options().border_color);
            for segment in wheel.segments() {
                draw_outline(ctx, segment, rotation, border);
            }
            draw_rims(ctx, wheel);

            ctx.layer();
            for segment in wheel.segments() {
                draw_label(ctx, segment, rotation, row_units, col_units, wheel.options().font_size);
            }

            ctx.layer();
            draw_knob(ctx, wheel);
        });

    f.render_widget(canvas, area);
}

fn draw_segment(ctx: &mut Context, segment: &Segment, rotation: f64) {
    let angular_steps = (segment.span() / FILL_STEP_DEGREES).ceil() as usize;
    let coords: Vec<(f64, f64)> = segment
        .fill_points(FILL_RINGS, angular_steps)
        .into_iter()
        .map(|point| to_canvas(point.rotate(rotation)))
        .collect();

    ctx.draw(&Points {
        coords: &coords,
        color: to_color(segment.color),
    });
}

/// Consecutive outline points as canvas line endpoints.
fn outline_edges(segment: &Segment, rotation: f64) -> Vec<((f64, f64), (f64, f64))> {
    let points: Vec<(f64, f64)> = segment
        .outline
        .iter()
        .map(|point| to_canvas(point.rotate(rotation)))
        .collect();

    points.windows(2).map(|pair| (pair[0], pair[1])).collect()
}

fn draw_outline(ctx: &mut Context, segment: &Segment, rotation: f64, color: Color) {
    for (from, to) in outline_edges(segment, rotation) {
        ctx.draw(&CanvasLine {
            x1: from.0,
            y1: from.1,
            x2: to.0,
            y2: to.1,
            color,
        });
    }
}

fn draw_rims(ctx: &mut Context, wheel: &Wheel) {
    let options = wheel.options();

    ctx.draw(&Circle {
        x: 0.0,
        y: 0.0,
        radius: options.outer_radius,
        color: to_color(options.border_color),
    });
    ctx.draw(&Circle {
        x: 0.0,
        y: 0.0,
        radius: options.inner_radius,
        color: to_color(options.background_color),
    });
}

fn draw_label(
    ctx: &mut Context,
    segment: &Segment,
    rotation: f64,
    row_units: f64,
    col_units: f64,
    font_size: f64,
) {
    // Label lines keep their layout relative to the centroid, scaled so one
    // line step equals one terminal row, and stay upright as the wheel turns.
    let scale = row_units / (font_size + 5.0);
    let centre = segment.centroid.rotate(rotation);

    for line in &segment.label {
        let dx = (line.position.x - segment.centroid.x) * scale;
        let dy = (line.position.y - segment.centroid.y) * scale;
        let half_width = line.text.width() as f64 * col_units / 2.0;
        let (x, y) = to_canvas(centre.offset(dx, dy));

        let mut style = Style::default().fg(to_color(line.color));
        if line.weight == FontWeight::Bold {
            style = style.add_modifier(Modifier::BOLD);
        }

        ctx.print(
            x - half_width,
            y,
            Line::from(Span::styled(line.text.clone(), style)),
        );
    }
}

/// Pointer above the rim at 12 o'clock, tilted as segment boundaries pass.
fn draw_knob(ctx: &mut Context, wheel: &Wheel) {
    let options = wheel.options();
    let size = options.knob_size;
    let pivot = Point::new(0.0, -(options.outer_radius + size * 1.5));
    let tilt = wheel.knob_tilt();

    let corner = |dx: f64, dy: f64| -> (f64, f64) {
        let local = Point::new(dx, dy).rotate(tilt);
        to_canvas(pivot.offset(local.x, local.y))
    };

    let tip = corner(0.0, size * 1.5);
    let left = corner(-size / 2.0, 0.0);
    let right = corner(size / 2.0, 0.0);
    let color = to_color(options.knob_color);

    for (from, to) in [(left, tip), (right, tip), (left, right)] {
        ctx.draw(&CanvasLine {
            x1: from.0,
            y1: from.1,
            x2: to.0,
            y2: to.1,
            color,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wheel::{build_segments, Rgb, WheelOptions, Winner};

    fn segments() -> Vec<Segment> {
        let rewards = ["10", "20", "30", "40"].map(String::from).to_vec();
        let options = WheelOptions::new(
            rewards,
            vec![Rgb::WHITE; 4],
            vec![Rgb::WHITE; 4],
            Winner::Index(1),
        );
        build_segments(&options)
    }

    #[test]
    fn outline_edges_form_a_closed_border() {
        let segment = &segments()[0];
        let edges = outline_edges(segment, 0.0);

        assert_eq!(edges.len(), segment.outline.len() - 1);
        let first = edges.first().unwrap().0;
        let last = edges.last().unwrap().1;
        assert!((first.0 - last.0).abs() < 1e-9);
        assert!((first.1 - last.1).abs() < 1e-9);

        // outer arc starts at 12 o'clock, which is up on the canvas
        assert!(first.0.abs() < 1e-9);
        assert!((first.1 - segment.outer_radius).abs() < 1e-9);
    }

    #[test]
    fn outline_edges_follow_rotation() {
        let segment = &segments()[0];
        // a quarter turn clockwise moves 12 o'clock to 3 o'clock
        let start = outline_edges(segment, 90.0)[0].0;
        assert!((start.0 - segment.outer_radius).abs() < 1e-9);
        assert!(start.1.abs() < 1e-9);
    }
}
