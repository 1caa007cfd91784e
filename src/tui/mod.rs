//! Terminal User Interface Module
//!
//! The interactive search page, built with Ratatui.
//!
//! # Layout
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │ OpenWords  Search transcripts & jump to timestamps  ● base url   │
//! ├──────────────────────────────────────────────────┬───────────────┤
//! │ Query: hello world                               │    Search     │
//! └──────────────────────────────────────────────────┴───────────────┘
//!  ✗ Request failed with status 500
//! ┌─ Results ────────────────────────────────────────────────────────┐
//! │ {                                                                │
//! │   "query": "hello world",                                        │
//! │   "results": []                                                  │
//! │ }                                                                │
//! └──────────────────────────────────────────────────────────────────┘
//! Ready │ [Enter] Search [↑/↓] Scroll [Ctrl+Q] Quit [F1] Help
//! ```

pub mod app;
pub mod event;
pub mod theme;
pub mod ui;
pub mod widgets;

pub use app::{ApiStatus, App, AppEvent, View};
pub use event::{AppAction, EventHandler};

use crate::config::Config;
use crate::search::SearchClient;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::Terminal;
use std::io::{self, Stdout};
use std::sync::Arc;
use tracing::{error, info};

/// Type alias for our terminal backend
pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Initialize the terminal for TUI mode
pub fn init_terminal() -> anyhow::Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore the terminal to its original state
pub fn restore_terminal(terminal: &mut Tui) -> anyhow::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Run the TUI application
pub async fn run(config: Config) -> anyhow::Result<()> {
    info!("Starting TUI against {}", config.api.base_url);

    let client = Arc::new(SearchClient::from_config(&config)?);

    let mut terminal = init_terminal()?;

    let mut app = App::new(config, client.clone());
    app.spawn_health_check(client);

    let mut events = EventHandler::new(std::time::Duration::from_millis(100));

    let result = run_app(&mut terminal, &mut app, &mut events).await;

    if let Err(e) = restore_terminal(&mut terminal) {
        error!("Failed to restore terminal: {}", e);
    }

    result
}

/// Main application loop
async fn run_app(
    terminal: &mut Tui,
    app: &mut App,
    events: &mut EventHandler,
) -> anyhow::Result<()> {
    loop {
        let size = terminal.size()?;
        let inner = ui::results_inner(Rect::new(0, 0, size.width, size.height));
        let content = widgets::wrapped_height(&widgets::panel_text(&app.page), inner.width);
        app.update_scroll_bounds(content, inner.height);

        terminal.draw(|frame| ui::render(frame, app))?;

        tokio::select! {
            Some(action) = events.next() => app.handle_action(action),
            Some(event) = app.next_event() => app.handle_event(event),
        }

        if app.should_quit {
            break;
        }
    }

    info!("TUI exited normally");
    Ok(())
}
