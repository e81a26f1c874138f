//! Event handling for the application.
//!
//! This module handles keyboard input, terminal resizes and ticks.

mod handler;
mod keys;

use crossterm::event::KeyEvent;

pub use handler::EventHandler;
pub use keys::{context_hints, keybindings_grouped, KeyAction, KeyBindings, KeyContext};

/// Events consumed by `App::update`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A key was pressed.
    Key(KeyEvent),
    /// The terminal was resized.
    Resize(u16, u16),
    /// The tick rate elapsed without input.
    Tick,
    /// The application should exit.
    Quit,
}
