pub mod theme;
pub mod widgets;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::app::config::HotkeysConfig;
use crate::app::App;
use crate::wheel::SpinPhase;
use theme::Theme;

const SIDE_PANEL_WIDTH: u16 = 32;

pub fn render(f: &mut Frame, app: &App) {
    let size = f.size();
    let config = app.state.config.read();
    let theme = Theme::from_config(&config);

    let background = Block::default().style(Style::default().bg(theme.background));
    f.render_widget(background, size);

    let chunks = vertical_chunks(size);
    render_header(f, chunks[0], &config.general.app_name, &theme);
    render_body(f, chunks[1], app, &theme);
    render_footer(f, chunks[2], app, &config.hotkeys, &theme);
}

fn vertical_chunks(size: Rect) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Wheel + side panel
            Constraint::Length(3), // Footer
        ])
        .split(size)
}

fn horizontal_chunks(body: Rect) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(SIDE_PANEL_WIDTH)])
        .split(body)
}

pub fn body_area(size: Rect) -> Rect {
    vertical_chunks(size)[1]
}

/// Largest area in the wheel column that draws as a circle, given terminal
/// cells are about twice as tall as they are wide.
pub fn wheel_area(body: Rect) -> Rect {
    let column = horizontal_chunks(body)[0];
    let height = column.height.min(column.width / 2);
    let width = height * 2;

    Rect {
        x: column.x + (column.width - width) / 2,
        y: column.y + (column.height - height) / 2,
        width,
        height,
    }
}

fn render_header(f: &mut Frame, area: Rect, app_name: &str, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.muted_color));

    let text = Paragraph::new(app_name.to_string())
        .block(block)
        .alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(theme.accent_color)
                .add_modifier(Modifier::BOLD),
        );

    f.render_widget(text, area);
}

fn render_body(f: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let columns = horizontal_chunks(area);
    let wheel = &app.state.wheel;

    let wheel_rect = wheel_area(area);
    widgets::wheel_canvas::render(f, wheel_rect, wheel, theme);

    if wheel.phase() == SpinPhase::Idle {
        if let Some(button) = &wheel.options().play_button {
            widgets::play_button::render(f, wheel_rect, &button.label, theme);
        }
    }

    let side = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(6), Constraint::Min(0)])
        .split(columns[1]);

    let history = app.state.history.lock();
    widgets::spin_status::render(
        f,
        side[0],
        "Spin",
        wheel.state(),
        history.latest().map(|entry| entry.at),
        theme,
    );

    let items: Vec<ListItem> = history
        .get_all()
        .iter()
        .map(|entry| {
            ListItem::new(Line::from(vec![
                Span::styled(
                    entry.at.format("%H:%M:%S ").to_string(),
                    Style::default().fg(theme.muted_color),
                ),
                Span::styled(
                    entry.reward.clone(),
                    Style::default().fg(theme.foreground),
                ),
            ]))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .title("History")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.muted_color)),
    );
    f.render_widget(list, side[1]);
}

fn render_footer(f: &mut Frame, area: Rect, app: &App, hotkeys: &HotkeysConfig, theme: &Theme) {
    let line = match &app.state.status_message {
        Some(message) => {
            let color = if message.starts_with("Config error") {
                theme.error_color
            } else {
                theme.success_color
            };
            Line::from(Span::styled(
                message.clone(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ))
        }
        None => Line::from(Span::raw(format!(
            "[{}] Spin │ [{}] Try again │ [{}] Reset │ [{}] Quit",
            hotkeys.spin, hotkeys.retry, hotkeys.reset, hotkeys.quit
        ))),
    };

    let paragraph = Paragraph::new(line)
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Gray));

    f.render_widget(paragraph, area);
}
