//! Results Widget
//!
//! The green-on-dark panel that shows loading text, the raw JSON response,
//! or the placeholder.

use crate::page::{render_json, PageView, QueryPage, EMPTY_TEXT, LOADING_TEXT};
use crate::tui::theme::{Icons, Theme};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthChar;

/// Render the results panel
pub fn render_results(frame: &mut Frame, area: Rect, page: &QueryPage, scroll: u16, spinner: usize) {
    let title = match page.view() {
        PageView::Results(r) => format!(" Results ({}) ", r.response.results.len()),
        _ => " Results ".to_string(),
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Theme::border_focused())
        .style(Theme::results());

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines: Vec<Line> = Vec::new();
    if page.is_loading() {
        let icon = Icons::SPINNER[spinner % Icons::SPINNER.len()];
        lines.push(Line::from(Span::styled(
            format!("{} {}", icon, LOADING_TEXT),
            Theme::results(),
        )));
    } else {
        for row in wrap_text(&panel_text(page), inner.width as usize) {
            lines.push(Line::from(Span::styled(row, Theme::results())));
        }
    }

    let paragraph = Paragraph::new(lines)
        .style(Theme::results())
        .scroll((scroll, 0));
    frame.render_widget(paragraph, inner);
}

/// Panel body. Errors are shown on their own line above the panel, so the
/// panel falls back to the placeholder for them.
pub fn panel_text(page: &QueryPage) -> String {
    match page.view() {
        PageView::Loading => LOADING_TEXT.to_string(),
        PageView::Results(r) => render_json(&r.body),
        PageView::Error(_) | PageView::Empty => EMPTY_TEXT.to_string(),
    }
}

/// Number of rows `text` takes once wrapped to `width`
pub fn wrapped_height(text: &str, width: u16) -> u16 {
    wrap_text(text, width as usize).len().min(u16::MAX as usize) as u16
}

/// Hard-wrap each line at `width` terminal columns, keeping indentation
/// visible. Wide characters (CJK, most emoji) take two columns and are never
/// split across rows.
fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let mut rows = Vec::new();
    if width == 0 {
        return rows;
    }

    for line in text.lines() {
        let mut row = String::new();
        let mut used = 0;
        for c in line.chars() {
            let w = c.width().unwrap_or(0);
            if used + w > width && !row.is_empty() {
                rows.push(std::mem::take(&mut row));
                used = 0;
            }
            row.push(c);
            used += w;
        }
        rows.push(row);
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_keeps_short_lines() {
        assert_eq!(wrap_text("{\n  \"a\": 1\n}", 40), vec!["{", "  \"a\": 1", "}"]);
    }

    #[test]
    fn test_wrap_splits_long_lines_on_char_boundaries() {
        let rows = wrap_text("ééééé", 2);
        assert_eq!(rows, vec!["éé", "éé", "é"]);
        assert_eq!(wrapped_height("ééééé", 2), 3);
    }

    #[test]
    fn test_wrap_counts_wide_characters_as_two_columns() {
        let rows = wrap_text("日本語のテキスト", 6);
        assert_eq!(rows, vec!["日本語", "のテキ", "スト"]);

        // a wide char never straddles the edge
        let rows = wrap_text("a日本", 4);
        assert_eq!(rows, vec!["a日", "本"]);
        assert_eq!(wrapped_height("日本語のテキスト", 6), 3);
    }

    #[test]
    fn test_zero_width() {
        assert!(wrap_text("abc", 0).is_empty());
    }
}
