use anyhow::{Context, Result};
use crossterm::event::KeyCode;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use crate::wheel::options::{
    DEFAULT_DURATION_MS, DEFAULT_FONT_SIZE, DEFAULT_INNER_RADIUS, DEFAULT_KNOB_SIZE,
    DEFAULT_OUTER_RADIUS,
};
use crate::wheel::{Easing, PlayButton, Rgb, WheelError, WheelOptions, Winner};

// Embedded default configuration that can be written next to the executable
// when an external config file is missing.
const DEFAULT_CONFIG: &str = include_str!("../../config.toml");

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub general: GeneralConfig,
    pub wheel: WheelConfig,
    pub ui: UiConfig,
    pub hotkeys: HotkeysConfig,
    pub theme: ThemeConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub app_name: String,
    pub frame_rate_ms: u64,
}

fn default_duration_ms() -> u64 {
    DEFAULT_DURATION_MS
}

fn default_font_size() -> f64 {
    DEFAULT_FONT_SIZE
}

fn default_inner_radius() -> f64 {
    DEFAULT_INNER_RADIUS
}

fn default_outer_radius() -> f64 {
    DEFAULT_OUTER_RADIUS
}

fn default_knob_size() -> f64 {
    DEFAULT_KNOB_SIZE
}

fn default_white() -> String {
    "#ffffff".to_string()
}

fn default_knob_color() -> String {
    "#ffd700".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WheelConfig {
    pub rewards: Vec<String>,
    pub colors: Vec<String>,
    pub text_colors: Vec<String>,
    pub winner: Winner,
    #[serde(default = "default_duration_ms")]
    pub duration_ms: u64,
    #[serde(default)]
    pub easing: Easing,
    #[serde(default = "default_font_size")]
    pub font_size: f64,
    #[serde(default = "default_inner_radius")]
    pub inner_radius: f64,
    #[serde(default = "default_outer_radius")]
    pub outer_radius: f64,
    #[serde(default = "default_knob_size")]
    pub knob_size: f64,
    #[serde(default = "default_white")]
    pub background_color: String,
    #[serde(default = "default_white")]
    pub border_color: String,
    #[serde(default = "default_knob_color")]
    pub knob_color: String,
    #[serde(default)]
    pub play_button: Option<PlayButtonConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlayButtonConfig {
    pub label: String,
}

impl WheelConfig {
    pub fn to_options(&self) -> Result<WheelOptions, WheelError> {
        let parse_all = |colors: &[String]| -> Result<Vec<Rgb>, WheelError> {
            colors.iter().map(|c| c.parse()).collect()
        };

        Ok(WheelOptions {
            rewards: self.rewards.clone(),
            colors: parse_all(&self.colors)?,
            text_colors: parse_all(&self.text_colors)?,
            winner: self.winner.clone(),
            duration: Duration::from_millis(self.duration_ms),
            easing: self.easing,
            font_size: self.font_size,
            inner_radius: self.inner_radius,
            outer_radius: self.outer_radius,
            knob_size: self.knob_size,
            background_color: self.background_color.parse()?,
            border_color: self.border_color.parse()?,
            knob_color: self.knob_color.parse()?,
            play_button: self.play_button.as_ref().map(|button| PlayButton {
                label: button.label.clone(),
            }),
        })
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UiConfig {
    pub mouse_support: bool,
    pub history_size: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HotkeyAction {
    Spin,
    Retry,
    Reset,
    Quit,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HotkeysConfig {
    pub spin: String,
    pub retry: String,
    pub reset: String,
    pub quit: String,
}

impl HotkeysConfig {
    pub fn action_for(&self, code: KeyCode) -> Option<HotkeyAction> {
        [
            (&self.spin, HotkeyAction::Spin),
            (&self.retry, HotkeyAction::Retry),
            (&self.reset, HotkeyAction::Reset),
            (&self.quit, HotkeyAction::Quit),
        ]
        .into_iter()
        .find(|(binding, _)| parse_key(binding) == Some(code))
        .map(|(_, action)| action)
    }
}

/// Parses a key binding such as `"space"`, `"enter"`, `"F5"` or `"r"`.
pub fn parse_key(binding: &str) -> Option<KeyCode> {
    let lower = binding.trim().to_lowercase();
    match lower.as_str() {
        "space" => Some(KeyCode::Char(' ')),
        "enter" => Some(KeyCode::Enter),
        "esc" | "escape" => Some(KeyCode::Esc),
        "tab" => Some(KeyCode::Tab),
        "backspace" => Some(KeyCode::Backspace),
        _ => {
            if let Some(number) = lower.strip_prefix('f').filter(|rest| !rest.is_empty()) {
                if let Ok(n) = number.parse::<u8>() {
                    return Some(KeyCode::F(n));
                }
            }

            let mut chars = binding.trim().chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Some(KeyCode::Char(c)),
                _ => None,
            }
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ThemeConfig {
    pub dark: DarkTheme,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DarkTheme {
    pub background: String,
    pub foreground: String,
    pub accent_color: String,
    pub muted_color: String,
    pub success_color: String,
    pub warning_color: String,
    pub error_color: String,
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;

        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(content).with_context(|| "Failed to parse config file")?;

        Ok(config)
    }

    pub fn bundled() -> Result<Self> {
        Self::parse(DEFAULT_CONFIG).context("Failed to parse bundled default config")
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self).with_context(|| "Failed to serialize config")?;

        fs::write(path.as_ref(), content)
            .with_context(|| format!("Failed to write config file: {:?}", path.as_ref()))?;

        Ok(())
    }

    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        match Self::load(path.as_ref()) {
            Ok(config) => Ok(config),
            Err(load_err) => {
                log::warn!(
                    "Falling back to bundled default config: {}. A new config will be written to {:?} if possible.",
                    load_err,
                    path.as_ref()
                );

                let default_config = Self::bundled()?;

                if let Err(save_err) = default_config.save(path.as_ref()) {
                    log::warn!("Failed to write default config: {}", save_err);
                }

                Ok(default_config)
            }
        }
    }
}

pub struct ConfigManager {
    config: Arc<RwLock<Config>>,
    config_path: std::path::PathBuf,
}

impl ConfigManager {
    pub fn new(config: Config, config_path: std::path::PathBuf) -> Arc<Self> {
        Arc::new(Self {
            config: Arc::new(RwLock::new(config)),
            config_path,
        })
    }

    pub fn get_config(&self) -> Arc<RwLock<Config>> {
        Arc::clone(&self.config)
    }

    pub fn watch(self: Arc<Self>) -> Result<()> {
        use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};
        use std::sync::mpsc::channel;

        let (tx, rx) = channel::<Result<Event, notify::Error>>();

        let mut watcher = RecommendedWatcher::new(tx, notify::Config::default())
            .context("Failed to create file watcher")?;

        watcher
            .watch(self.config_path.as_ref(), RecursiveMode::NonRecursive)
            .context("Failed to watch config file")?;

        let config = Arc::clone(&self.config);
        let config_path = self.config_path.clone();

        std::thread::spawn(move || {
            // Keep watcher alive
            let _watcher = watcher;

            loop {
                match rx.recv() {
                    Ok(Ok(event)) => {
                        use notify::EventKind;
                        if let EventKind::Modify(_) | EventKind::Create(_) = event.kind {
                            // Small delay to ensure file is fully written
                            std::thread::sleep(Duration::from_millis(100));

                            match Config::load(&config_path) {
                                Ok(new_config) => {
                                    *config.write() = new_config;
                                    log::info!(
                                        "Configuration reloaded, wheel changes apply on next reset"
                                    );
                                }
                                Err(e) => {
                                    log::error!("Failed to reload config: {}", e);
                                }
                            }
                        }
                    }
                    Ok(Err(e)) => {
                        log::error!("Watch error: {:?}", e);
                    }
                    Err(e) => {
                        log::error!("Channel error: {:?}", e);
                        break;
                    }
                }
            }
        });

        Ok(())
    }
}
