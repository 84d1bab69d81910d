pub mod config;
pub mod state;

pub use config::{Config, ConfigManager, HotkeyAction};
pub use state::AppState;

use anyhow::Result;
use crossterm::event::Event as CrosstermEvent;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use std::env;

pub struct App {
    pub state: AppState,
    pub config_manager: Option<Arc<ConfigManager>>,
}

impl App {
    /// Loads `config_path`, or `config.toml` next to the executable.
    pub fn new(config_path: Option<PathBuf>) -> Result<Self> {
        let config_path = match config_path {
            Some(path) => path,
            None => {
                let mut path = env::current_exe()?;
                path.set_file_name("config.toml");
                path
            }
        };

        let config = Config::load_or_default(&config_path)?;

        // Create config manager with hot reload
        let config_manager = ConfigManager::new(config, config_path);

        // Start watching for config changes
        if let Err(e) = config_manager.clone().watch() {
            log::warn!("Failed to start config hot reload: {}", e);
        } else {
            log::info!("Config hot reload enabled");
        }

        let state = AppState::new(config_manager.get_config())?;

        Ok(Self {
            state,
            config_manager: Some(config_manager),
        })
    }

    pub async fn handle_event(&mut self, event: CrosstermEvent) -> Result<bool> {
        self.state.handle_event(event).await
    }

    pub fn on_frame(&mut self, at: Instant) {
        self.state.on_tick(at);
    }
}
