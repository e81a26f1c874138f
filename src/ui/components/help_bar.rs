//! Status bar with contextual key hints.
//!
//! Shows the shortcuts for the current context on the left and a short
//! status text (selection size, loading state) on the right.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::events::{context_hints, KeyContext};
use crate::ui::theme::theme;

/// Render the status bar for `context` with `status` right-aligned.
pub fn render_status_bar(frame: &mut Frame, area: Rect, context: KeyContext, status: &str) {
    let status_width = (status.chars().count() as u16 + 2).min(area.width / 2);
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(1), Constraint::Length(status_width)])
        .split(area);

    let hints = Paragraph::new(Line::from(hint_spans(context_hints(context))));
    frame.render_widget(hints, chunks[0]);

    let status = Paragraph::new(Line::from(Span::styled(
        format!(" {} ", status),
        Style::default().fg(theme().selected),
    )))
    .alignment(Alignment::Right);
    frame.render_widget(status, chunks[1]);
}

/// Split hint text into styled spans, highlighting the bracketed keys.
fn hint_spans(hints: &str) -> Vec<Span<'static>> {
    let t = theme();
    let key_style = Style::default().fg(t.accent);
    let text_style = Style::default().fg(t.dim);

    let mut spans = Vec::new();
    let mut current = String::new();

    for c in hints.chars() {
        match c {
            '[' => {
                if !current.is_empty() {
                    spans.push(Span::styled(std::mem::take(&mut current), text_style));
                }
                current.push(c);
            }
            ']' if current.starts_with('[') => {
                current.push(c);
                spans.push(Span::styled(std::mem::take(&mut current), key_style));
            }
            _ => current.push(c),
        }
    }

    if !current.is_empty() {
        spans.push(Span::styled(current, text_style));
    }

    spans
}
