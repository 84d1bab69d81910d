use chrono::{DateTime, Local};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::ui::theme::Theme;
use crate::wheel::{SpinPhase, SpinState};

pub fn render(
    f: &mut Frame,
    area: Rect,
    title: &str,
    state: &SpinState,
    last_spin: Option<DateTime<Local>>,
    theme: &Theme,
) {
    let (message, color) = match state.phase() {
        SpinPhase::Idle => ("Ready to spin", theme.foreground),
        SpinPhase::Spinning => ("Spinning...", theme.warning_color),
        SpinPhase::Finished => ("Finished", theme.success_color),
    };

    let last_spin_text = last_spin
        .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| "never".to_string());

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));

    let mut lines = vec![Line::from(Span::styled(
        message,
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    ))];

    if let Some(winner) = state.winner() {
        lines.push(Line::from(vec![
            Span::raw("Winner: "),
            Span::styled(
                winner.to_string(),
                Style::default()
                    .fg(theme.accent_color)
                    .add_modifier(Modifier::BOLD),
            ),
        ]));
    }

    lines.push(Line::from(vec![
        Span::raw("Last spin: "),
        Span::styled(
            last_spin_text,
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::ITALIC),
        ),
    ]));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(Style::default().fg(Color::White));

    f.render_widget(paragraph, area);
}
