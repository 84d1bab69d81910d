use ratatui::style::Color;

use crate::app::Config;
use crate::wheel::Rgb;

pub fn parse_color(hex: &str) -> Color {
    match hex.parse::<Rgb>() {
        Ok(rgb) => to_color(rgb),
        Err(_) => Color::White,
    }
}

pub fn to_color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.r, rgb.g, rgb.b)
}

/// Theme helper that provides colors from the config
pub struct Theme {
    pub background: Color,
    pub foreground: Color,
    pub accent_color: Color,
    pub muted_color: Color,
    pub success_color: Color,
    pub warning_color: Color,
    pub error_color: Color,
}

impl Theme {
    pub fn from_config(config: &Config) -> Self {
        let dark_theme = &config.theme.dark;

        Self {
            background: parse_color(&dark_theme.background),
            foreground: parse_color(&dark_theme.foreground),
            accent_color: parse_color(&dark_theme.accent_color),
            muted_color: parse_color(&dark_theme.muted_color),
            success_color: parse_color(&dark_theme.success_color),
            warning_color: parse_color(&dark_theme.warning_color),
            error_color: parse_color(&dark_theme.error_color),
        }
    }
}
