use super::geometry::FULL_TURN;

/// Rounds half toward positive infinity, so `-2.5` becomes `-2`.
fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Index of the segment under the pointer when the wheel rests at `angle`.
pub fn winner_index(angle: f64, segments: usize) -> usize {
    if segments == 0 {
        return 0;
    }

    let span = FULL_TURN / segments as f64;
    let deg = round_half_up(angle % FULL_TURN).abs();
    let passed = (deg / span).floor() as usize;

    if angle < 0.0 {
        // counter-clockwise
        passed % segments
    } else {
        // clockwise
        (segments - passed % segments) % segments
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wheel::animator::target_angle;
    use crate::wheel::options::MAX_SEGMENTS;
    use std::time::Duration;

    #[test]
    fn scripted_target_always_resolves_to_winner() {
        let durations = [1, 300, 1000, 2000, 2500, 7321, 10_000, 60_000];
        for segments in 1..=MAX_SEGMENTS {
            for winner in 0..segments {
                for ms in durations {
                    let angle = target_angle(winner, segments, Duration::from_millis(ms));
                    assert_eq!(
                        winner_index(angle, segments),
                        winner,
                        "segments={} winner={} duration={}ms angle={}",
                        segments,
                        winner,
                        ms,
                        angle
                    );
                }
            }
        }
    }

    #[test]
    fn clockwise_rotation_moves_earlier_segments_under_pointer() {
        assert_eq!(winner_index(0.0, 4), 0);
        assert_eq!(winner_index(10.0, 4), 0);
        assert_eq!(winner_index(90.0, 4), 3);
        assert_eq!(winner_index(185.0, 4), 2);
        assert_eq!(winner_index(275.0, 4), 1);
        assert_eq!(winner_index(360.0 * 3.0 + 275.0, 4), 1);
    }

    #[test]
    fn counter_clockwise_rotation_counts_segments_forward() {
        assert_eq!(winner_index(-10.0, 4), 0);
        assert_eq!(winner_index(-95.0, 4), 1);
        assert_eq!(winner_index(-185.0, 4), 2);
        assert_eq!(winner_index(-720.0 - 275.0, 4), 3);
    }

    #[test]
    fn rounding_matches_half_up() {
        assert_eq!(round_half_up(2.5), 3.0);
        assert_eq!(round_half_up(-2.5), -2.0);
        assert_eq!(round_half_up(-2.6), -3.0);
    }
}
