//! Help panel view displaying keyboard shortcuts.
//!
//! Provides a scrollable panel listing the shortcuts of each context. The
//! panel is opened with '?' and closed with '?', 'q', or Escape.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::events::{keybindings_grouped, KeyContext};
use crate::ui::theme::theme;

/// Actions that can be returned from the help view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HelpAction {
    /// Close the help panel.
    Close,
}

/// The help panel view.
pub struct HelpView {
    /// Keybindings grouped by context.
    grouped: Vec<(KeyContext, Vec<(&'static str, &'static str)>)>,
    /// Current scroll position.
    scroll: usize,
    /// Visible height (updated on render).
    visible_height: usize,
}

impl HelpView {
    /// Create a help view for the active binding mode.
    pub fn new(vim_mode: bool) -> Self {
        Self {
            grouped: keybindings_grouped(vim_mode),
            scroll: 0,
            visible_height: 0,
        }
    }

    /// Header, blank line, bindings and a trailing blank per section, plus the footer.
    fn total_lines(&self) -> usize {
        self.grouped.iter().map(|(_, b)| b.len() + 3).sum::<usize>() + 1
    }

    fn max_scroll(&self) -> usize {
        self.total_lines().saturating_sub(self.visible_height)
    }

    /// Reset scroll position to top.
    pub fn reset_scroll(&mut self) {
        self.scroll = 0;
    }

    /// Handle keyboard input for the help view.
    pub fn handle_input(&mut self, key_event: KeyEvent) -> Option<HelpAction> {
        match (key_event.code, key_event.modifiers) {
            (KeyCode::Char('?'), _) | (KeyCode::Char('q'), KeyModifiers::NONE) | (KeyCode::Esc, _) => {
                Some(HelpAction::Close)
            }
            (KeyCode::Char('j'), KeyModifiers::NONE) | (KeyCode::Down, _) => {
                self.scroll = (self.scroll + 1).min(self.max_scroll());
                None
            }
            (KeyCode::Char('k'), KeyModifiers::NONE) | (KeyCode::Up, _) => {
                self.scroll = self.scroll.saturating_sub(1);
                None
            }
            _ => None,
        }
    }

    /// Render the help view.
    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let t = theme();

        frame.render_widget(Clear, area);

        let block = Block::default()
            .title(" Help - Keyboard Shortcuts ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(t.accent));

        let inner = block.inner(area);
        frame.render_widget(block, area);

        self.visible_height = inner.height as usize;
        self.scroll = self.scroll.min(self.max_scroll());

        let paragraph = Paragraph::new(self.build_content_lines()).scroll((self.scroll as u16, 0));
        frame.render_widget(paragraph, inner);
    }

    /// Build the content lines for the help panel.
    fn build_content_lines(&self) -> Vec<Line<'static>> {
        let t = theme();
        let mut lines = Vec::new();

        for (context, bindings) in &self.grouped {
            lines.push(Line::from(Span::styled(
                format!("── {} ──", context.title()),
                Style::default().fg(t.warning).add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(""));

            for (key, description) in bindings {
                lines.push(Line::from(vec![
                    Span::styled(
                        format!("{:>12}", key),
                        Style::default().fg(t.success).add_modifier(Modifier::BOLD),
                    ),
                    Span::raw("  "),
                    Span::raw(*description),
                ]));
            }

            lines.push(Line::from(""));
        }

        lines.push(Line::from(Span::styled(
            "Press ?, q, or Esc to close",
            Style::default().fg(t.dim),
        )));

        lines
    }
}
