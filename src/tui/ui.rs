//! UI Rendering
//!
//! Layout and rendering for the search screen.

use crate::tui::app::{ApiStatus, App, View};
use crate::tui::theme::{Icons, Theme};
use crate::tui::widgets;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

const BUTTON_WIDTH: u16 = 14;

fn main_layout(area: Rect) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(3), // Input + button
            Constraint::Length(1), // Error line
            Constraint::Min(5),    // Results
            Constraint::Length(1), // Status bar
        ])
        .split(area)
}

/// Inner area of the results panel for a terminal of the given size
pub fn results_inner(area: Rect) -> Rect {
    Block::default().borders(Borders::ALL).inner(main_layout(area)[3])
}

/// Render the main UI
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = main_layout(frame.area());

    render_header(frame, chunks[0], app);
    render_input(frame, chunks[1], app);
    render_error(frame, chunks[2], app);
    widgets::render_results(
        frame,
        chunks[3],
        &app.page,
        app.scroll_offset,
        app.spinner_frame,
    );
    render_status_bar(frame, chunks[4], app);

    if app.view == View::Help {
        render_help(frame);
    }
}

/// Render the header with the API status indicator
fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let api_dot = match app.api_status {
        ApiStatus::Ready => Span::styled(Icons::DOT, Style::default().fg(Color::Green)),
        ApiStatus::Unreachable => Span::styled(Icons::DOT, Style::default().fg(Color::Red)),
        ApiStatus::Unknown => Span::styled(Icons::DOT, Theme::text_dim()),
    };

    let title_text = vec![Line::from(vec![
        Span::styled("OpenWords", Theme::title()),
        Span::styled(
            "  Search transcripts & jump to timestamps",
            Theme::text_secondary(),
        ),
        Span::raw("  "),
        api_dot,
        Span::raw(" "),
        Span::styled(app.config.api.base_url.clone(), Theme::text_dim()),
    ])];

    let title = Paragraph::new(title_text).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Theme::border()),
    );

    frame.render_widget(title, area);
}

/// Render the query input and the search button
fn render_input(frame: &mut Frame, area: Rect, app: &App) {
    let row = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(BUTTON_WIDTH)])
        .split(area);

    let is_focused = app.view == View::Search;
    let block = Block::default()
        .title(" Query ")
        .borders(Borders::ALL)
        .border_style(if is_focused {
            Theme::border_focused()
        } else {
            Theme::border()
        });

    let inner = block.inner(row[0]);
    frame.render_widget(block, row[0]);
    frame.render_widget(&app.input, inner);

    let (label, style) = if app.page.is_loading() {
        ("Searching…", Theme::button_busy())
    } else {
        ("Search", Theme::button())
    };
    let button = Paragraph::new(Line::from(Span::styled(label, style)))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Theme::border()),
        );
    frame.render_widget(button, row[1]);
}

/// Render the error line, empty when there is no error
fn render_error(frame: &mut Frame, area: Rect, app: &App) {
    if let Some(error) = app.page.error() {
        let line = Line::from(vec![
            Span::styled(format!(" {} ", Icons::ERROR), Theme::error()),
            Span::styled(error.to_string(), Theme::error()),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }
}

/// Render the status bar
fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let status = if app.page.is_loading() {
        Span::styled("Searching... (Enter to restart)", Theme::active())
    } else if app.page.error().is_some() {
        Span::styled("Failed", Theme::error())
    } else if let (Some(r), Some(at)) = (app.page.response(), app.page.completed_at()) {
        Span::styled(
            format!(
                "{} result(s) at {}",
                r.results.len(),
                at.with_timezone(&chrono::Local).format("%H:%M:%S")
            ),
            Theme::complete(),
        )
    } else {
        Span::styled("Ready", Theme::text_secondary())
    };

    let shortcuts = vec![
        Span::styled(" [Enter]", Theme::shortcut_key()),
        Span::styled(" Search ", Theme::shortcut_desc()),
        Span::styled("[↑/↓]", Theme::shortcut_key()),
        Span::styled(" Scroll ", Theme::shortcut_desc()),
        Span::styled("[Ctrl+Q]", Theme::shortcut_key()),
        Span::styled(" Quit ", Theme::shortcut_desc()),
        Span::styled("[F1]", Theme::shortcut_key()),
        Span::styled(" Help", Theme::shortcut_desc()),
    ];

    let line = Line::from(
        std::iter::once(status)
            .chain(std::iter::once(Span::raw(" │ ")))
            .chain(shortcuts)
            .collect::<Vec<_>>(),
    );

    frame.render_widget(Paragraph::new(line), area);
}

/// Render the help modal
fn render_help(frame: &mut Frame) {
    let area = centered_rect(60, 60, frame.area());
    frame.render_widget(Clear, area);

    let help_lines = vec![
        Line::from(Span::styled("Keyboard Shortcuts", Theme::heading())),
        Line::from(""),
        Line::from(vec![
            Span::styled("Enter        ", Theme::shortcut_key()),
            Span::styled("Search, or restart a running search", Theme::text()),
        ]),
        Line::from(vec![
            Span::styled("↑/↓          ", Theme::shortcut_key()),
            Span::styled("Scroll results", Theme::text()),
        ]),
        Line::from(vec![
            Span::styled("PageUp/Down  ", Theme::shortcut_key()),
            Span::styled("Scroll a page", Theme::text()),
        ]),
        Line::from(vec![
            Span::styled("Ctrl+Home/End", Theme::shortcut_key()),
            Span::styled("Jump to top / bottom", Theme::text()),
        ]),
        Line::from(vec![
            Span::styled("Ctrl+Q       ", Theme::shortcut_key()),
            Span::styled("Quit application", Theme::text()),
        ]),
        Line::from(vec![
            Span::styled("Ctrl+C       ", Theme::shortcut_key()),
            Span::styled("Force quit", Theme::text()),
        ]),
        Line::from(vec![
            Span::styled("F1           ", Theme::shortcut_key()),
            Span::styled("Show this help", Theme::text()),
        ]),
        Line::from(""),
        Line::from(Span::styled("Press any key to close", Theme::placeholder())),
    ];

    let paragraph = Paragraph::new(help_lines).block(
        Block::default()
            .title(" Help ")
            .borders(Borders::ALL)
            .border_style(Theme::border_focused()),
    );

    frame.render_widget(paragraph, area);
}

/// Helper to create a centered rect
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
