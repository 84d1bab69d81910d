use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

use super::geometry::FULL_TURN;

/// Timing curve applied to timeline progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    Linear,
    #[default]
    EaseInOut,
    EaseOutQuart,
}

impl Easing {
    /// Maps linear progress in `[0, 1]` to eased progress in `[0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Easing::EaseOutQuart => 1.0 - (1.0 - t).powi(4),
        }
    }
}

/// Whole extra turns added to a spin of the given duration, one per second.
pub fn extra_turns(duration: Duration) -> f64 {
    (duration.as_millis() as f64 / 1000.0).round()
}

/// Resting angle that puts segment `winner` under the pointer.
///
/// `365 - w * span` places the winner just past the pointer; the extra turns
/// only lengthen the spin and never change where it stops.
pub fn target_angle(winner: usize, segments: usize, duration: Duration) -> f64 {
    let span = FULL_TURN / segments as f64;
    365.0 - winner as f64 * span + FULL_TURN * extra_turns(duration)
}

#[derive(Debug, Clone, Copy)]
pub struct Timeline {
    pub from: f64,
    pub to: f64,
    pub started_at: Instant,
    pub duration: Duration,
    pub easing: Easing,
}

impl Timeline {
    pub fn progress(&self, now: Instant) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started_at);
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    pub fn value_at(&self, now: Instant) -> f64 {
        let eased = self.easing.apply(self.progress(now));
        self.from + (self.to - self.from) * eased
    }

    pub fn is_complete(&self, now: Instant) -> bool {
        self.progress(now) >= 1.0
    }
}

/// Drives the wheel's rotation angle along a single-shot timeline.
#[derive(Debug, Clone, Default)]
pub struct SpinAnimator {
    resting: f64,
    timeline: Option<Timeline>,
}

impl SpinAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self, to: f64, duration: Duration, easing: Easing, now: Instant) {
        let from = self.angle_at(now);
        self.timeline = Some(Timeline {
            from,
            to,
            started_at: now,
            duration,
            easing,
        });
    }

    pub fn angle_at(&self, now: Instant) -> f64 {
        match &self.timeline {
            Some(timeline) => timeline.value_at(now),
            None => self.resting,
        }
    }

    pub fn is_running(&self) -> bool {
        self.timeline.is_some()
    }

    /// Settles the timeline once it has run out and returns the final angle.
    pub fn settle(&mut self, now: Instant) -> Option<f64> {
        let timeline = self.timeline?;
        if !timeline.is_complete(now) {
            return None;
        }
        self.resting = timeline.to;
        self.timeline = None;
        Some(self.resting)
    }
}
