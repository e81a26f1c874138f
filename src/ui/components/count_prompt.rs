//! "Select rows" prompt.
//!
//! A small popup with a free-text field for the number of rows to select.
//! Parsing is lenient: text that is not a number leaves the last accepted
//! count in place, so a typo never clears a previously entered target.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::ui::theme::theme;

/// Actions returned by the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptAction {
    /// Run the selection for this many rows.
    Submit(usize),
    /// Enter was pressed but no valid count was ever entered.
    Invalid,
    /// Close the prompt without selecting.
    Cancel,
}

/// Popup text field for the target row count.
#[derive(Debug, Clone, Default)]
pub struct CountPrompt {
    /// Raw text as typed.
    value: String,
    /// Cursor position within `value` (in chars, all input is ASCII-safe).
    cursor: usize,
    /// Last successfully parsed count.
    count: Option<usize>,
    /// Whether the popup is shown.
    visible: bool,
}

impl CountPrompt {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show the prompt, keeping the previous text.
    pub fn show(&mut self) {
        self.visible = true;
        self.cursor = self.value.chars().count();
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// The current raw text.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// The last accepted count.
    pub fn count(&self) -> Option<usize> {
        self.count
    }

    /// Handle keyboard input while visible.
    pub fn handle_input(&mut self, key: KeyEvent) -> Option<PromptAction> {
        match (key.code, key.modifiers) {
            (KeyCode::Esc, _) => {
                self.hide();
                Some(PromptAction::Cancel)
            }
            (KeyCode::Enter, _) => {
                let action = match self.count {
                    Some(count) => PromptAction::Submit(count),
                    None => PromptAction::Invalid,
                };
                if action != PromptAction::Invalid {
                    self.hide();
                }
                Some(action)
            }
            (KeyCode::Char('u'), KeyModifiers::CONTROL) => {
                self.value.clear();
                self.cursor = 0;
                None
            }
            (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
                let byte = self.byte_index();
                self.value.insert(byte, c);
                self.cursor += 1;
                self.reparse();
                None
            }
            (KeyCode::Backspace, _) => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    let byte = self.byte_index();
                    self.value.remove(byte);
                    self.reparse();
                }
                None
            }
            (KeyCode::Left, _) => {
                self.cursor = self.cursor.saturating_sub(1);
                None
            }
            (KeyCode::Right, _) => {
                self.cursor = (self.cursor + 1).min(self.value.chars().count());
                None
            }
            (KeyCode::Home, _) => {
                self.cursor = 0;
                None
            }
            (KeyCode::End, _) => {
                self.cursor = self.value.chars().count();
                None
            }
            _ => None,
        }
    }

    /// Byte offset of the cursor.
    fn byte_index(&self) -> usize {
        self.value
            .char_indices()
            .nth(self.cursor)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    /// Accept the text as the new count when it parses.
    fn reparse(&mut self) {
        if let Ok(count) = self.value.trim().parse::<usize>() {
            self.count = Some(count);
        }
    }

    /// Render the popup centred in `area`.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        if !self.visible {
            return;
        }

        let t = theme();
        let width = 40u16.min(area.width);
        let height = 5u16.min(area.height);
        let popup = Rect::new(
            area.x + (area.width - width) / 2,
            area.y + (area.height - height) / 2,
            width,
            height,
        );

        frame.render_widget(Clear, popup);

        let block = Block::default()
            .title(Span::styled(
                " Select Rows ",
                Style::default().fg(t.accent).add_modifier(Modifier::BOLD),
            ))
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(t.accent));
        let inner = block.inner(popup);
        frame.render_widget(block, popup);

        let field = if self.value.is_empty() {
            Line::from(Span::styled("Enter Rows", Style::default().fg(t.dim)))
        } else {
            Line::from(Span::styled(self.value.clone(), Style::default().fg(t.warning)))
        };
        let hint = match self.count {
            Some(count) => format!("Enter to select {} rows", count),
            None => "Enter a number".to_string(),
        };
        let lines = vec![
            field,
            Line::from(""),
            Line::from(Span::styled(hint, Style::default().fg(t.dim))),
        ];
        frame.render_widget(Paragraph::new(lines), inner);

        if let Some(cursor_x) = cursor_column(inner, self.cursor) {
            frame.set_cursor_position(Position::new(cursor_x, inner.y));
        }
    }
}

/// Screen column of a text cursor `cursor` chars into `area`, if it fits.
fn cursor_column(area: Rect, cursor: usize) -> Option<u16> {
    let offset = u16::try_from(cursor).unwrap_or(u16::MAX);
    let x = area.x.saturating_add(offset);
    (offset < area.width).then_some(x)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_text(prompt: &mut CountPrompt, text: &str) {
        for c in text.chars() {
            prompt.handle_input(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE));
        }
    }

    fn press(prompt: &mut CountPrompt, code: KeyCode) -> Option<PromptAction> {
        prompt.handle_input(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_submit_parsed_count() {
        let mut prompt = CountPrompt::new();
        prompt.show();
        type_text(&mut prompt, "15");
        assert_eq!(prompt.count(), Some(15));
        assert_eq!(press(&mut prompt, KeyCode::Enter), Some(PromptAction::Submit(15)));
        assert!(!prompt.is_visible());
    }

    #[test]
    fn test_non_numeric_keeps_previous_count() {
        let mut prompt = CountPrompt::new();
        prompt.show();
        type_text(&mut prompt, "20");
        type_text(&mut prompt, "x");
        assert_eq!(prompt.value(), "20x");
        assert_eq!(prompt.count(), Some(20));
        assert_eq!(press(&mut prompt, KeyCode::Enter), Some(PromptAction::Submit(20)));
    }

    #[test]
    fn test_enter_without_count_is_invalid() {
        let mut prompt = CountPrompt::new();
        prompt.show();
        type_text(&mut prompt, "abc");
        assert_eq!(press(&mut prompt, KeyCode::Enter), Some(PromptAction::Invalid));
        assert!(prompt.is_visible());
    }

    #[test]
    fn test_backspace_reparses() {
        let mut prompt = CountPrompt::new();
        prompt.show();
        type_text(&mut prompt, "123");
        press(&mut prompt, KeyCode::Backspace);
        assert_eq!(prompt.value(), "12");
        assert_eq!(prompt.count(), Some(12));
    }

    #[test]
    fn test_cursor_editing() {
        let mut prompt = CountPrompt::new();
        prompt.show();
        type_text(&mut prompt, "15");
        press(&mut prompt, KeyCode::Home);
        type_text(&mut prompt, "1");
        assert_eq!(prompt.value(), "115");
        press(&mut prompt, KeyCode::End);
        press(&mut prompt, KeyCode::Left);
        press(&mut prompt, KeyCode::Backspace);
        assert_eq!(prompt.value(), "15");
    }

    #[test]
    fn test_escape_cancels() {
        let mut prompt = CountPrompt::new();
        prompt.show();
        assert_eq!(press(&mut prompt, KeyCode::Esc), Some(PromptAction::Cancel));
        assert!(!prompt.is_visible());
    }

    #[test]
    fn test_zero_is_a_valid_count() {
        let mut prompt = CountPrompt::new();
        prompt.show();
        type_text(&mut prompt, "0");
        assert_eq!(press(&mut prompt, KeyCode::Enter), Some(PromptAction::Submit(0)));
    }

    #[test]
    fn test_cursor_column_inside_area() {
        assert_eq!(cursor_column(Rect::new(10, 0, 20, 1), 3), Some(13));
        assert_eq!(cursor_column(Rect::new(10, 0, 20, 1), 20), None);
    }

    #[test]
    fn test_cursor_column_huge_cursor_does_not_overflow() {
        let area = Rect::new(u16::MAX - 5, 0, 5, 1);
        assert_eq!(cursor_column(area, usize::MAX), None);
        assert_eq!(cursor_column(Rect::new(0, 0, 0, 1), 0), None);
    }
}
