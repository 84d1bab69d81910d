use anyhow::{Context, Result};
use crossterm::event::{
    Event as CrosstermEvent, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use parking_lot::{Mutex, RwLock};
use ratatui::layout::Rect;
use std::sync::Arc;
use std::time::Instant;

use super::config::{Config, HotkeyAction};
use crate::ui;
use crate::utils::ResultHistory;
use crate::wheel::{SpinPhase, Wheel, WheelHandle};

pub struct AppState {
    pub config: Arc<RwLock<Config>>,
    pub wheel: Wheel,
    pub handle: WheelHandle,
    pub history: Arc<Mutex<ResultHistory>>,
    pub status_message: Option<String>,
    /// Last known terminal size, used for mouse hit-testing.
    pub viewport: Rect,
}

impl AppState {
    pub fn new(config: Arc<RwLock<Config>>) -> Result<Self> {
        let (options, history_size) = {
            let config = config.read();
            let options = config
                .wheel
                .to_options()
                .context("Invalid wheel configuration")?;
            (options, config.ui.history_size)
        };

        let history = Arc::new(Mutex::new(ResultHistory::new(history_size)));
        let sink = Arc::clone(&history);
        let (wheel, handle) = Wheel::new(options, move |reward: &str, index: usize| {
            sink.lock().record(reward, index);
        })
        .context("Invalid wheel configuration")?;

        Ok(Self {
            config,
            wheel,
            handle,
            history,
            status_message: None,
            viewport: Rect::default(),
        })
    }

    /// Advances the wheel animation by one frame.
    pub fn on_tick(&mut self, now: Instant) {
        let was_spinning = self.wheel.state().is_spinning();
        self.wheel.tick(now);

        if was_spinning && self.wheel.state().is_finished() {
            if let Some(winner) = self.wheel.state().winner() {
                self.status_message = Some(format!("You won: {}", winner));
            }
        }
    }

    pub async fn handle_event(&mut self, event: CrosstermEvent) -> Result<bool> {
        match event {
            CrosstermEvent::Key(key_event) => self.handle_key_event(key_event).await,
            CrosstermEvent::Mouse(mouse_event) => self.handle_mouse_event(mouse_event).await,
            CrosstermEvent::Resize(width, height) => {
                self.viewport = Rect::new(0, 0, width, height);
                Ok(true)
            }
            _ => Ok(true),
        }
    }

    async fn handle_key_event(&mut self, key: KeyEvent) -> Result<bool> {
        // Handle Ctrl+C to quit
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Ok(false);
        }

        let action = self.config.read().hotkeys.action_for(key.code);
        match action {
            Some(action) => self.apply(action),
            None => Ok(true),
        }
    }

    async fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<bool> {
        if !self.config.read().ui.mouse_support {
            return Ok(true);
        }

        if let MouseEventKind::Down(MouseButton::Left) = mouse.kind {
            if let Some(button) = self.play_button_rect() {
                let hit = mouse.column >= button.x
                    && mouse.column < button.x + button.width
                    && mouse.row >= button.y
                    && mouse.row < button.y + button.height;
                if hit {
                    return self.apply(HotkeyAction::Spin);
                }
            }
        }

        Ok(true)
    }

    /// Where the play control is drawn, if it is currently shown.
    pub fn play_button_rect(&self) -> Option<Rect> {
        if self.wheel.phase() != SpinPhase::Idle {
            return None;
        }
        let label = &self.wheel.options().play_button.as_ref()?.label;
        let wheel_area = ui::wheel_area(ui::body_area(self.viewport));
        Some(ui::widgets::play_button::button_rect(wheel_area, label))
    }

    pub fn apply(&mut self, action: HotkeyAction) -> Result<bool> {
        match action {
            HotkeyAction::Spin => {
                self.status_message = None;
                self.handle.spin()?;
            }
            HotkeyAction::Retry => {
                if self.wheel.state().can_retry() {
                    self.reload_wheel();
                    self.handle.spin()?;
                } else {
                    log::debug!("Retry ignored while the wheel is spinning");
                }
            }
            HotkeyAction::Reset => {
                self.reload_wheel();
            }
            HotkeyAction::Quit => return Ok(false),
        }

        Ok(true)
    }

    /// Rebuilds the wheel from the current configuration, keeping the old
    /// options when the new ones are invalid.
    fn reload_wheel(&mut self) {
        self.status_message = None;

        let options = self.config.read().wheel.to_options();
        let result = options.and_then(|options| self.wheel.reset_with(options));

        if let Err(e) = result {
            log::error!("Keeping previous wheel, configuration rejected: {}", e);
            self.status_message = Some(format!("Config error: {}", e));
            self.wheel.reset();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn state() -> AppState {
        let mut config = Config::bundled().unwrap();
        config.wheel.duration_ms = 1000;
        AppState::new(Arc::new(RwLock::new(config))).unwrap()
    }

    fn key(code: KeyCode) -> CrosstermEvent {
        CrosstermEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[tokio::test]
    async fn space_spins_and_history_records_winner() {
        let mut state = state();
        let start = Instant::now();

        assert!(state.handle_event(key(KeyCode::Char(' '))).await.unwrap());
        state.on_tick(start);
        assert_eq!(state.wheel.phase(), SpinPhase::Spinning);

        state.on_tick(start + Duration::from_secs(1));
        assert_eq!(state.wheel.phase(), SpinPhase::Finished);

        let history = state.history.lock();
        let latest = history.latest().expect("recorded");
        assert_eq!(latest.reward, "Win 50 Points");
        assert_eq!(latest.index, 2);
        assert_eq!(state.status_message.as_deref(), Some("You won: Win 50 Points"));
    }

    #[tokio::test]
    async fn reset_picks_up_new_configuration() {
        let mut state = state();
        state.config.write().wheel.winner = crate::wheel::Winner::Index(0);

        assert!(state.handle_event(key(KeyCode::Char('r'))).await.unwrap());
        assert_eq!(state.wheel.winner_index(), 0);

        state.config.write().wheel.colors.pop();
        state.handle_event(key(KeyCode::Char('r'))).await.unwrap();
        assert_eq!(state.wheel.winner_index(), 0);
        assert!(state.status_message.as_deref().unwrap().starts_with("Config error"));
    }

    #[tokio::test]
    async fn quit_keys_stop_the_loop() {
        let mut state = state();
        assert!(!state.handle_event(key(KeyCode::Char('q'))).await.unwrap());

        let ctrl_c = CrosstermEvent::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(!state.handle_event(ctrl_c).await.unwrap());
    }

    #[tokio::test]
    async fn clicking_play_button_spins() {
        let mut state = state();
        state
            .handle_event(CrosstermEvent::Resize(120, 40))
            .await
            .unwrap();

        let button = state.play_button_rect().expect("play button shown while idle");
        let click = CrosstermEvent::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: button.x + 1,
            row: button.y + 1,
            modifiers: KeyModifiers::NONE,
        });
        state.handle_event(click).await.unwrap();
        state.on_tick(Instant::now());

        assert_eq!(state.wheel.phase(), SpinPhase::Spinning);
        assert!(state.play_button_rect().is_none());
    }
}
