use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event as CrosstermEvent},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex; // Use tokio Mutex for async compatibility

use fortune_wheel::app::App;
use fortune_wheel::events::{AppEvent, EventHandler};
use fortune_wheel::ui;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logger
    env_logger::init();

    let config_path = std::env::args().nth(1).map(PathBuf::from);

    // Setup terminal with proper error handling
    if let Err(e) = setup_terminal(config_path).await {
        eprintln!("Failed to run wheel: {}", e);
        return Err(e);
    }

    Ok(())
}

async fn setup_terminal(config_path: Option<PathBuf>) -> Result<()> {
    // Build the app first so configuration errors print on a normal screen
    let mut app = App::new(config_path)?;

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    app.state.viewport = terminal.size()?;
    let frame_rate_ms = app.state.config.read().general.frame_rate_ms;

    let app_state = Arc::new(Mutex::new(app));

    let event_handler = EventHandler::new(frame_rate_ms.max(8)); // At most ~120fps

    let res = run_app(&mut terminal, app_state, event_handler).await;

    // Always cleanup terminal
    cleanup_terminal(&mut terminal)?;

    res
}

fn cleanup_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app_state: Arc<Mutex<App>>,
    mut event_handler: EventHandler,
) -> Result<()> {
    {
        let app = app_state.lock().await;
        terminal.draw(|f| {
            ui::render(f, &app);
        })?;
        io::stdout().flush()?;
    }

    let mut needs_clear = false;

    loop {
        let event = event_handler.next().await;

        if needs_clear {
            terminal.clear()?;
            needs_clear = false;
        }

        let should_continue = match event {
            AppEvent::Input(crossterm_event) => {
                // Check for resize to force full redraw
                if matches!(crossterm_event, CrosstermEvent::Resize(_, _)) {
                    needs_clear = true;
                }

                let mut app = app_state.lock().await;
                app.handle_event(crossterm_event).await?
            }
            AppEvent::Frame(at) => {
                let mut app = app_state.lock().await;
                app.on_frame(at);
                true
            }
        };

        if !should_continue {
            break;
        }

        {
            let app = app_state.lock().await;
            terminal.draw(|f| {
                ui::render(f, &app);
            })?;

            io::stdout().flush()?;
        }
    }

    Ok(())
}
