//! Loading spinner.

use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    widgets::Paragraph,
    Frame,
};

use crate::ui::theme::theme;

/// Spinner animation frames.
const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// A message with an animated spinner, advanced on every tick.
#[derive(Debug, Clone)]
pub struct LoadingIndicator {
    message: String,
    frame: usize,
    active: bool,
}

impl Default for LoadingIndicator {
    fn default() -> Self {
        Self::new()
    }
}

impl LoadingIndicator {
    pub fn new() -> Self {
        Self {
            message: "Loading...".to_string(),
            frame: 0,
            active: false,
        }
    }

    /// Start spinning with `message`.
    pub fn start_with_message(&mut self, message: impl Into<String>) {
        self.message = message.into();
        self.frame = 0;
        self.active = true;
    }

    pub fn stop(&mut self) {
        self.active = false;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Advance the animation.
    pub fn tick(&mut self) {
        if self.active {
            self.frame = (self.frame + 1) % SPINNER_FRAMES.len();
        }
    }

    /// Spinner and message, or an empty string when idle.
    pub fn text(&self) -> String {
        if self.active {
            format!("{} {}", SPINNER_FRAMES[self.frame], self.message)
        } else {
            String::new()
        }
    }

    /// Render centred in `area` while active.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        if !self.active {
            return;
        }

        let paragraph = Paragraph::new(self.text())
            .style(Style::default().fg(theme().accent))
            .alignment(Alignment::Center);
        frame.render_widget(paragraph, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_has_no_text() {
        let loader = LoadingIndicator::new();
        assert!(!loader.is_active());
        assert_eq!(loader.text(), "");
    }

    #[test]
    fn test_start_and_stop() {
        let mut loader = LoadingIndicator::new();
        loader.start_with_message("Selecting 15 rows...");
        assert!(loader.is_active());
        assert!(loader.text().ends_with("Selecting 15 rows..."));
        assert_eq!(loader.message(), "Selecting 15 rows...");

        loader.stop();
        assert!(!loader.is_active());
    }

    #[test]
    fn test_tick_wraps() {
        let mut loader = LoadingIndicator::new();
        loader.start_with_message("x");
        for _ in 0..SPINNER_FRAMES.len() {
            loader.tick();
        }
        assert_eq!(loader.frame, 0);
    }

    #[test]
    fn test_tick_while_idle_does_nothing() {
        let mut loader = LoadingIndicator::new();
        loader.tick();
        assert_eq!(loader.frame, 0);
    }
}
