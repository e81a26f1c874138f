//! Page navigation bar.
//!
//! Mirrors a classic web pager: `« ‹ {page-1}  {page} out of {total} pages  {page+1} › »`.
//! Backward controls are hidden on the first page and forward controls on
//! the last one.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::catalog::PageWindow;
use crate::ui::theme::theme;

/// Which pager controls are visible for a given page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagerControls {
    /// Current 1-based page.
    pub page: u64,
    /// `ceil(total_records / page_size)`.
    pub total_pages: u64,
    /// "«" and "‹" and the previous page number.
    pub show_back: bool,
    /// The next page number and "›" and "»".
    pub show_forward: bool,
}

impl PagerControls {
    /// Compute the controls for `window` over `total_records` rows.
    pub fn new(window: PageWindow, total_records: u64) -> Self {
        let total_pages = window.total_pages(total_records).max(1);
        Self {
            page: window.page(),
            total_pages,
            show_back: !window.is_first(),
            show_forward: window.page() < total_pages,
        }
    }

    /// The page "first" jumps to, if visible.
    pub fn first(&self) -> Option<u64> {
        self.show_back.then_some(1)
    }

    /// The page "previous" goes to, if visible.
    pub fn previous(&self) -> Option<u64> {
        self.show_back.then(|| self.page - 1)
    }

    /// The page "next" goes to, if visible.
    pub fn next(&self) -> Option<u64> {
        self.show_forward.then(|| self.page + 1)
    }

    /// The page "last" jumps to, if visible.
    pub fn last(&self) -> Option<u64> {
        self.show_forward.then_some(self.total_pages)
    }

    /// The centre label.
    pub fn label(&self) -> String {
        format!("{} out of {} pages", self.page, self.total_pages)
    }

    /// Render the pager centred in `area`.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let t = theme();
        let control = Style::default().fg(t.accent);
        let current = Style::default()
            .fg(t.fg)
            .bg(t.highlight_bg)
            .add_modifier(Modifier::BOLD);

        let mut spans = Vec::new();
        if let Some(prev) = self.previous() {
            spans.push(Span::styled(" « ", control));
            spans.push(Span::raw("  "));
            spans.push(Span::styled(" ‹ ", control));
            spans.push(Span::raw("  "));
            spans.push(Span::styled(format!(" {} ", prev), control));
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(format!(" {} ", self.label()), current));
        if let Some(next) = self.next() {
            spans.push(Span::raw("  "));
            spans.push(Span::styled(format!(" {} ", next), control));
            spans.push(Span::raw("  "));
            spans.push(Span::styled(" › ", control));
            spans.push(Span::raw("  "));
            spans.push(Span::styled(" » ", control));
        }

        let pager = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
        frame.render_widget(pager, area);
    }
}
