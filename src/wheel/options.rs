use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use super::animator::Easing;
use super::error::WheelError;

/// Largest segment count for which the scripted target still resolves to
/// the configured winner (the 5 degree nudge must stay under half a span).
pub const MAX_SEGMENTS: usize = 64;

pub const DEFAULT_DURATION_MS: u64 = 10_000;
pub const DEFAULT_FONT_SIZE: f64 = 20.0;
pub const DEFAULT_INNER_RADIUS: f64 = 100.0;
pub const DEFAULT_OUTER_RADIUS: f64 = 200.0;
pub const DEFAULT_KNOB_SIZE: f64 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl FromStr for Rgb {
    type Err = WheelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("white") {
            return Ok(Rgb::WHITE);
        }

        let parsed = colorsys::Rgb::from_hex_str(trimmed)
            .map_err(|_| WheelError::InvalidColor(s.to_string()))?;

        Ok(Rgb::new(
            parsed.get_red().round() as u8,
            parsed.get_green().round() as u8,
            parsed.get_blue().round() as u8,
        ))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// The segment the spin is scripted to land on.
///
/// In TOML an integer selects a segment by index and a string selects it by
/// reward value.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Winner {
    Index(usize),
    Reward(String),
}

impl Winner {
    pub fn resolve(&self, rewards: &[String]) -> Result<usize, WheelError> {
        match self {
            Winner::Index(index) if *index < rewards.len() => Ok(*index),
            Winner::Index(index) => Err(WheelError::WinnerOutOfRange {
                index: *index,
                count: rewards.len(),
            }),
            Winner::Reward(value) => rewards
                .iter()
                .position(|reward| reward == value)
                .ok_or_else(|| WheelError::UnknownWinner(value.clone())),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayButton {
    pub label: String,
}

/// Everything the wheel needs for one spin cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct WheelOptions {
    pub rewards: Vec<String>,
    pub colors: Vec<Rgb>,
    pub text_colors: Vec<Rgb>,
    pub winner: Winner,
    pub duration: Duration,
    pub easing: Easing,
    pub font_size: f64,
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub knob_size: f64,
    pub background_color: Rgb,
    pub border_color: Rgb,
    pub knob_color: Rgb,
    pub play_button: Option<PlayButton>,
}

impl WheelOptions {
    pub fn new(
        rewards: Vec<String>,
        colors: Vec<Rgb>,
        text_colors: Vec<Rgb>,
        winner: Winner,
    ) -> Self {
        Self {
            rewards,
            colors,
            text_colors,
            winner,
            duration: Duration::from_millis(DEFAULT_DURATION_MS),
            easing: Easing::default(),
            font_size: DEFAULT_FONT_SIZE,
            inner_radius: DEFAULT_INNER_RADIUS,
            outer_radius: DEFAULT_OUTER_RADIUS,
            knob_size: DEFAULT_KNOB_SIZE,
            background_color: Rgb::WHITE,
            border_color: Rgb::WHITE,
            knob_color: Rgb::new(255, 215, 0),
            play_button: None,
        }
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn with_play_button(mut self, label: impl Into<String>) -> Self {
        self.play_button = Some(PlayButton {
            label: label.into(),
        });
        self
    }

    pub fn segment_count(&self) -> usize {
        self.rewards.len()
    }

    /// Checks the caller contract and returns the winner's segment index.
    pub fn validate(&self) -> Result<usize, WheelError> {
        let count = self.rewards.len();
        if count == 0 {
            return Err(WheelError::NoSegments);
        }
        if count > MAX_SEGMENTS {
            return Err(WheelError::TooManySegments {
                count,
                max: MAX_SEGMENTS,
            });
        }

        for (field, actual) in [
            ("colors", self.colors.len()),
            ("text_colors", self.text_colors.len()),
        ] {
            if actual != count {
                return Err(WheelError::LengthMismatch {
                    field,
                    expected: count,
                    actual,
                });
            }
        }

        if self.duration.is_zero() {
            return Err(WheelError::InvalidDuration);
        }

        if !(self.inner_radius >= 0.0 && self.outer_radius > self.inner_radius) {
            return Err(WheelError::InvalidRadius {
                inner: self.inner_radius,
                outer: self.outer_radius,
            });
        }

        self.winner.resolve(&self.rewards)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rewards(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn options(values: &[&str], winner: Winner) -> WheelOptions {
        let count = values.len();
        WheelOptions::new(
            rewards(values),
            vec![Rgb::new(200, 30, 30); count],
            vec![Rgb::WHITE; count],
            winner,
        )
    }

    #[test]
    fn parse_hex_colors() {
        assert_eq!("#ff8000".parse::<Rgb>().unwrap(), Rgb::new(255, 128, 0));
        assert_eq!("white".parse::<Rgb>().unwrap(), Rgb::WHITE);
        assert!(matches!(
            "#zz00zz".parse::<Rgb>(),
            Err(WheelError::InvalidColor(_))
        ));
        assert_eq!(Rgb::new(1, 2, 255).to_string(), "#0102ff");
    }

    #[test]
    fn winner_resolves_by_value_or_index() {
        let values = rewards(&["10", "20", "30", "40"]);
        assert_eq!(Winner::Reward("20".into()).resolve(&values), Ok(1));
        assert_eq!(Winner::Index(3).resolve(&values), Ok(3));
        assert_eq!(
            Winner::Index(4).resolve(&values),
            Err(WheelError::WinnerOutOfRange { index: 4, count: 4 })
        );
        assert_eq!(
            Winner::Reward("50".into()).resolve(&values),
            Err(WheelError::UnknownWinner("50".into()))
        );
    }

    #[test]
    fn validate_rejects_broken_configuration() {
        assert_eq!(
            options(&[], Winner::Index(0)).validate(),
            Err(WheelError::NoSegments)
        );

        let mut mismatched = options(&["a", "b", "c"], Winner::Index(0));
        mismatched.text_colors.pop();
        assert_eq!(
            mismatched.validate(),
            Err(WheelError::LengthMismatch {
                field: "text_colors",
                expected: 3,
                actual: 2
            })
        );

        let zero = options(&["a"], Winner::Index(0)).with_duration(Duration::ZERO);
        assert_eq!(zero.validate(), Err(WheelError::InvalidDuration));

        let many: Vec<String> = (0..=MAX_SEGMENTS).map(|i| i.to_string()).collect();
        let refs: Vec<&str> = many.iter().map(String::as_str).collect();
        assert!(matches!(
            options(&refs, Winner::Index(0)).validate(),
            Err(WheelError::TooManySegments { .. })
        ));

        let mut inverted = options(&["a", "b"], Winner::Index(1));
        inverted.inner_radius = 300.0;
        assert!(matches!(
            inverted.validate(),
            Err(WheelError::InvalidRadius { .. })
        ));
    }

    #[test]
    fn validate_returns_winner_index() {
        let opts = options(&["10", "20", "30", "40"], Winner::Reward("30".into()));
        assert_eq!(opts.validate(), Ok(2));
    }
}
