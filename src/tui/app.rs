//! Application State
//!
//! Wraps the [`QueryPage`] with the terminal-specific bits: the text input,
//! scrolling, the help overlay and the channel that background requests
//! report back on.

use crate::config::Config;
use crate::page::QueryPage;
use crate::search::{SearchClient, SearchService};
use crate::tui::event::AppAction;
use crate::types::{AppResult, SearchReply};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use tui_textarea::TextArea;

const INPUT_PLACEHOLDER: &str = "Search…";

/// Current view/screen
#[derive(Debug, Clone, PartialEq, Default)]
pub enum View {
    #[default]
    Search,
    Help,
}

/// Reachability of the search service, shown as a dot in the header
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ApiStatus {
    #[default]
    Unknown,
    Ready,
    Unreachable,
}

/// Events from background tasks
#[derive(Debug)]
pub enum AppEvent {
    /// A search request finished
    SearchFinished {
        seq: u64,
        outcome: AppResult<SearchReply>,
    },
    /// Health probe result
    HealthChecked(ApiStatus),
}

/// Main application state
pub struct App {
    pub config: Config,

    // UI State
    pub view: View,
    pub should_quit: bool,
    pub input: TextArea<'static>,
    pub scroll_offset: u16,
    pub max_scroll: u16,
    pub spinner_frame: usize,
    pub api_status: ApiStatus,

    // Search State
    pub page: QueryPage,
    service: Arc<dyn SearchService>,

    // Async communication
    event_rx: mpsc::Receiver<AppEvent>,
    event_tx: mpsc::Sender<AppEvent>,
}

impl App {
    /// Create a new application instance
    pub fn new(config: Config, service: Arc<dyn SearchService>) -> Self {
        let (tx, rx) = mpsc::channel(100);

        Self {
            config,
            view: View::Search,
            should_quit: false,
            input: Self::new_input(),
            scroll_offset: 0,
            max_scroll: 0,
            spinner_frame: 0,
            api_status: ApiStatus::Unknown,
            page: QueryPage::new(),
            service,
            event_rx: rx,
            event_tx: tx,
        }
    }

    fn new_input() -> TextArea<'static> {
        let mut input = TextArea::default();
        input.set_cursor_line_style(ratatui::style::Style::default());
        input.set_placeholder_text(INPUT_PLACEHOLDER);
        input
    }

    /// Probe the service's health endpoint in the background
    pub fn spawn_health_check(&self, client: Arc<SearchClient>) {
        let tx = self.event_tx.clone();
        tokio::spawn(async move {
            let status = match client.health().await {
                Ok(h) if h.ok => ApiStatus::Ready,
                Ok(_) => ApiStatus::Unreachable,
                Err(e) => {
                    warn!("Health check against {} failed: {}", client.base_url(), e);
                    ApiStatus::Unreachable
                }
            };
            tx.send(AppEvent::HealthChecked(status)).await.ok();
        });
    }

    /// Wait for the next background event
    pub async fn next_event(&mut self) -> Option<AppEvent> {
        self.event_rx.recv().await
    }

    /// Handle an async event
    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::SearchFinished { seq, outcome } => {
                if self.page.complete(seq, outcome) {
                    self.scroll_offset = 0;
                }
            }
            AppEvent::HealthChecked(status) => {
                debug!("Search service status: {:?}", status);
                self.api_status = status;
            }
        }
    }

    /// Handle a user action
    pub fn handle_action(&mut self, action: AppAction) {
        if self.view == View::Help {
            match action {
                AppAction::Quit | AppAction::ForceQuit => self.should_quit = true,
                AppAction::Tick => self.tick(),
                _ => self.view = View::Search,
            }
            return;
        }

        match action {
            AppAction::Quit | AppAction::ForceQuit => {
                self.should_quit = true;
            }
            AppAction::Submit => self.submit_search(),
            AppAction::ToggleHelp => self.view = View::Help,
            AppAction::Escape => {}
            AppAction::ScrollUp => {
                self.scroll_offset = self.scroll_offset.saturating_sub(1);
            }
            AppAction::ScrollDown => {
                if self.scroll_offset < self.max_scroll {
                    self.scroll_offset += 1;
                }
            }
            AppAction::ScrollPageUp => {
                self.scroll_offset = self.scroll_offset.saturating_sub(10);
            }
            AppAction::ScrollPageDown => {
                self.scroll_offset = (self.scroll_offset + 10).min(self.max_scroll);
            }
            AppAction::ScrollTop => self.scroll_offset = 0,
            AppAction::ScrollBottom => self.scroll_offset = self.max_scroll,
            AppAction::Input(key) => {
                self.input.input(key);
                self.page.set_query(self.input.lines().join(" "));
            }
            AppAction::Tick => self.tick(),
        }
    }

    fn tick(&mut self) {
        if self.page.is_loading() {
            self.spinner_frame = self.spinner_frame.wrapping_add(1);
        }
    }

    /// Start a search for whatever is in the input
    fn submit_search(&mut self) {
        let ticket = self.page.submit();
        info!("Searching for {:?} (#{})", ticket.query, ticket.seq);

        let tx = self.event_tx.clone();
        let service = Arc::clone(&self.service);

        tokio::spawn(async move {
            let outcome = service.search(&ticket.query).await;
            tx.send(AppEvent::SearchFinished {
                seq: ticket.seq,
                outcome,
            })
            .await
            .ok();
        });
    }

    /// Update max scroll based on content
    pub fn update_scroll_bounds(&mut self, content_height: u16, viewport_height: u16) {
        self.max_scroll = content_height.saturating_sub(viewport_height);
        if self.scroll_offset > self.max_scroll {
            self.scroll_offset = self.max_scroll;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::PageView;
    use crate::types::{AppError, SearchResponse};
    use async_trait::async_trait;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    /// Echoes the query back, or fails when the query is "fail".
    struct EchoService;

    #[async_trait]
    impl SearchService for EchoService {
        async fn search(&self, query: &str) -> AppResult<SearchReply> {
            if query == "fail" {
                return Err(AppError::Status {
                    status: 500,
                    detail: None,
                });
            }
            SearchReply::from_response(SearchResponse {
                query: query.to_string(),
                results: vec![],
            })
        }
    }

    fn app() -> App {
        App::new(Config::default(), Arc::new(EchoService))
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_action(AppAction::Input(KeyEvent::new(
                KeyCode::Char(c),
                KeyModifiers::NONE,
            )));
        }
    }

    async fn finish_next_search(app: &mut App) {
        let event = app.next_event().await.unwrap();
        app.handle_event(event);
    }

    #[tokio::test]
    async fn test_typing_updates_query() {
        let mut app = app();
        type_text(&mut app, "hello world");
        assert_eq!(app.page.query(), "hello world");

        app.handle_action(AppAction::Input(KeyEvent::new(
            KeyCode::Backspace,
            KeyModifiers::NONE,
        )));
        assert_eq!(app.page.query(), "hello worl");
    }

    #[tokio::test]
    async fn test_submit_round_trip() {
        let mut app = app();
        type_text(&mut app, "hello");
        app.handle_action(AppAction::Submit);
        assert!(app.page.is_loading());

        finish_next_search(&mut app).await;

        assert!(!app.page.is_loading());
        match app.page.view() {
            PageView::Results(r) => assert_eq!(r.response.query, "hello"),
            other => panic!("unexpected view: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_submit_error_shows_message() {
        let mut app = app();
        type_text(&mut app, "fail");
        app.handle_action(AppAction::Submit);
        finish_next_search(&mut app).await;

        assert_eq!(app.page.error(), Some("Request failed with status 500"));
        assert!(app.page.response().is_none());
    }

    #[tokio::test]
    async fn test_help_closes_on_any_key() {
        let mut app = app();
        app.handle_action(AppAction::ToggleHelp);
        assert_eq!(app.view, View::Help);

        type_text(&mut app, "x");
        assert_eq!(app.view, View::Search);
        // the key that closed help is not typed
        assert_eq!(app.page.query(), "");
    }

    #[tokio::test]
    async fn test_health_event_updates_status() {
        let mut app = app();
        app.handle_event(AppEvent::HealthChecked(ApiStatus::Ready));
        assert_eq!(app.api_status, ApiStatus::Ready);
    }

    #[tokio::test]
    async fn test_scroll_is_clamped() {
        let mut app = app();
        app.update_scroll_bounds(30, 10);
        app.handle_action(AppAction::ScrollPageDown);
        app.handle_action(AppAction::ScrollPageDown);
        app.handle_action(AppAction::ScrollPageDown);
        assert_eq!(app.scroll_offset, 20);

        app.update_scroll_bounds(15, 10);
        assert_eq!(app.scroll_offset, 5);

        app.handle_action(AppAction::ScrollTop);
        assert_eq!(app.scroll_offset, 0);
    }
}
