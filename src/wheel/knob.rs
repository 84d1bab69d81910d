use super::geometry::FULL_TURN;

const TICK_INPUT: [f64; 6] = [-1.0, -0.5, -0.0001, 0.0001, 0.5, 1.0];
const TICK_OUTPUT: [f64; 6] = [0.0, 0.0, 35.0, -35.0, 0.0, 0.0];

fn positive_mod(value: f64, modulus: f64) -> f64 {
    ((value % modulus) + modulus) % modulus
}

/// Piecewise-linear interpolation, extending the outer segments beyond the
/// input range.
pub fn interpolate(value: f64, input: &[f64], output: &[f64]) -> f64 {
    debug_assert_eq!(input.len(), output.len());
    if input.len() < 2 {
        return output.first().copied().unwrap_or(0.0);
    }

    let last = input.len() - 2;
    let i = input[1..=last]
        .iter()
        .position(|&edge| value < edge)
        .unwrap_or(last);

    let (x0, x1) = (input[i], input[i + 1]);
    let (y0, y1) = (output[i], output[i + 1]);
    if x1 == x0 {
        return y0;
    }
    y0 + (value - x0) / (x1 - x0) * (y1 - y0)
}

/// Fraction of the current segment that has passed the pointer, in `[0, 1)`.
pub fn tick_phase(angle: f64, span: f64) -> f64 {
    let offset = span / 2.0;
    positive_mod(positive_mod(angle - offset, FULL_TURN) / span, 1.0)
}

/// Knob tilt in degrees: it snaps to 35 as a boundary arrives and swings back
/// to rest over the first half of the segment.
pub fn knob_tilt(angle: f64, span: f64) -> f64 {
    interpolate(tick_phase(angle, span), &TICK_INPUT, &TICK_OUTPUT)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-6, "{} != {}", a, b);
    }

    #[test]
    fn phase_wraps_into_unit_interval() {
        assert_close(tick_phase(45.0, 90.0), 0.0);
        assert_close(tick_phase(90.0, 90.0), 0.5);
        assert_close(tick_phase(-45.0, 90.0), 0.0);
        assert_close(tick_phase(720.0 + 67.5, 90.0), 0.25);
        for step in 0..200 {
            let phase = tick_phase(step as f64 * 7.3 - 500.0, 30.0);
            assert!((0.0..1.0).contains(&phase));
        }
    }

    #[test]
    fn knob_swings_back_over_half_segment() {
        // right on a boundary the knob is at rest
        assert_close(knob_tilt(45.0, 90.0), 0.0);
        // just past it the knob is pushed all the way over
        assert!(knob_tilt(45.0 + 0.009, 90.0) < -34.0);
        assert!((knob_tilt(45.0 + 22.5, 90.0) + 17.5).abs() < 0.01);
        assert_close(knob_tilt(90.0, 90.0), 0.0);
        assert_close(knob_tilt(120.0, 90.0), 0.0);
    }

    #[test]
    fn interpolate_is_piecewise_linear() {
        assert_close(interpolate(0.0, &TICK_INPUT, &TICK_OUTPUT), 0.0);
        assert_close(interpolate(-0.75, &TICK_INPUT, &TICK_OUTPUT), 0.0);
        assert_close(interpolate(0.75, &TICK_INPUT, &TICK_OUTPUT), 0.0);
        assert_close(interpolate(-0.00005, &TICK_INPUT, &TICK_OUTPUT), 17.5);
    }
}
