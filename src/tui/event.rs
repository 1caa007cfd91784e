//! Event Handling
//!
//! Turns terminal key presses and a steady tick into [`AppAction`]s.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::{FutureExt, StreamExt};
use std::time::Duration;
use tokio::sync::mpsc;

/// Actions that can be performed in the application
#[derive(Debug, Clone, PartialEq)]
pub enum AppAction {
    /// Quit the application
    Quit,
    /// Quit immediately (Ctrl+C)
    ForceQuit,
    /// Run a search for the current input (Enter key)
    Submit,
    /// Toggle help view
    ToggleHelp,
    /// Escape - close modals
    Escape,
    ScrollUp,
    ScrollDown,
    ScrollPageUp,
    ScrollPageDown,
    ScrollTop,
    ScrollBottom,
    /// Anything else goes to the query input
    Input(KeyEvent),
    /// Timer tick for the loading spinner
    Tick,
}

/// Event handler for the TUI
pub struct EventHandler {
    rx: mpsc::Receiver<AppAction>,
    _tx: mpsc::Sender<AppAction>,
}

impl EventHandler {
    /// Create a new event handler with specified tick rate
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::channel(100);
        let tx_clone = tx.clone();

        tokio::spawn(async move {
            let mut reader = crossterm::event::EventStream::new();
            let mut tick_interval = tokio::time::interval(tick_rate);

            loop {
                let tick = tick_interval.tick();
                let crossterm_event = reader.next().fuse();

                tokio::select! {
                    _ = tick => {
                        if tx_clone.send(AppAction::Tick).await.is_err() {
                            break;
                        }
                    }
                    Some(Ok(evt)) = crossterm_event => {
                        if let Some(action) = Self::map_event(evt) {
                            if tx_clone.send(action).await.is_err() {
                                break;
                            }
                        }
                    }
                }
            }
        });

        Self { rx, _tx: tx }
    }

    /// Wait for the next action
    pub async fn next(&mut self) -> Option<AppAction> {
        self.rx.recv().await
    }

    /// Map a crossterm event to an app action
    fn map_event(event: Event) -> Option<AppAction> {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => Self::map_key_event(key),
            _ => None,
        }
    }

    /// Map a key event to an app action
    pub fn map_key_event(key: KeyEvent) -> Option<AppAction> {
        match (key.modifiers, key.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(AppAction::ForceQuit),
            (KeyModifiers::CONTROL, KeyCode::Char('q')) => Some(AppAction::Quit),

            // The query is a single line, so Enter submits whatever is held
            (_, KeyCode::Enter) => Some(AppAction::Submit),
            (KeyModifiers::CONTROL, KeyCode::Home) => Some(AppAction::ScrollTop),
            (KeyModifiers::CONTROL, KeyCode::End) => Some(AppAction::ScrollBottom),

            (KeyModifiers::NONE, code) | (KeyModifiers::SHIFT, code) => match code {
                KeyCode::Esc => Some(AppAction::Escape),
                KeyCode::F(1) => Some(AppAction::ToggleHelp),

                // Results panel scrolling
                KeyCode::Up => Some(AppAction::ScrollUp),
                KeyCode::Down => Some(AppAction::ScrollDown),
                KeyCode::PageUp => Some(AppAction::ScrollPageUp),
                KeyCode::PageDown => Some(AppAction::ScrollPageDown),

                _ => Some(AppAction::Input(key)),
            },

            _ => Some(AppAction::Input(key)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_enter_submits() {
        assert_eq!(
            EventHandler::map_key_event(key(KeyCode::Enter, KeyModifiers::NONE)),
            Some(AppAction::Submit)
        );
    }

    #[test]
    fn test_enter_with_modifiers_submits() {
        for modifiers in [
            KeyModifiers::ALT,
            KeyModifiers::CONTROL,
            KeyModifiers::SHIFT,
            KeyModifiers::CONTROL | KeyModifiers::ALT,
        ] {
            assert_eq!(
                EventHandler::map_key_event(key(KeyCode::Enter, modifiers)),
                Some(AppAction::Submit),
                "{:?}",
                modifiers
            );
        }
    }

    #[test]
    fn test_quit_shortcuts() {
        assert_eq!(
            EventHandler::map_key_event(key(KeyCode::Char('q'), KeyModifiers::CONTROL)),
            Some(AppAction::Quit)
        );
        assert_eq!(
            EventHandler::map_key_event(key(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(AppAction::ForceQuit)
        );
    }

    #[test]
    fn test_characters_go_to_input() {
        let k = key(KeyCode::Char('A'), KeyModifiers::SHIFT);
        assert_eq!(EventHandler::map_key_event(k), Some(AppAction::Input(k)));

        let k = key(KeyCode::Backspace, KeyModifiers::NONE);
        assert_eq!(EventHandler::map_key_event(k), Some(AppAction::Input(k)));
    }

    #[test]
    fn test_navigation_scrolls_results() {
        assert_eq!(
            EventHandler::map_key_event(key(KeyCode::PageDown, KeyModifiers::NONE)),
            Some(AppAction::ScrollPageDown)
        );
        assert_eq!(
            EventHandler::map_key_event(key(KeyCode::Home, KeyModifiers::CONTROL)),
            Some(AppAction::ScrollTop)
        );
        assert_eq!(
            EventHandler::map_key_event(key(KeyCode::End, KeyModifiers::CONTROL)),
            Some(AppAction::ScrollBottom)
        );
    }

    #[test]
    fn test_home_and_end_move_the_cursor() {
        let k = key(KeyCode::Home, KeyModifiers::NONE);
        assert_eq!(EventHandler::map_key_event(k), Some(AppAction::Input(k)));

        let k = key(KeyCode::End, KeyModifiers::NONE);
        assert_eq!(EventHandler::map_key_event(k), Some(AppAction::Input(k)));
    }
}
