use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::ui::theme::Theme;

const BUTTON_HEIGHT: u16 = 3;

/// Hit-box of the play control, centred in the wheel's hub.
pub fn button_rect(wheel_area: Rect, label: &str) -> Rect {
    let width = (label.width() as u16 + 4).min(wheel_area.width);
    let height = BUTTON_HEIGHT.min(wheel_area.height);

    Rect {
        x: wheel_area.x + (wheel_area.width - width) / 2,
        y: wheel_area.y + (wheel_area.height - height) / 2,
        width,
        height,
    }
}

pub fn render(f: &mut Frame, wheel_area: Rect, label: &str, theme: &Theme) {
    let area = button_rect(wheel_area, label);
    if area.width == 0 || area.height == 0 {
        return;
    }

    f.render_widget(Clear, area);

    let button = Paragraph::new(label.to_string())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.accent_color)),
        )
        .style(
            Style::default()
                .fg(theme.accent_color)
                .bg(theme.background)
                .add_modifier(Modifier::BOLD),
        );

    f.render_widget(button, area);
}
