//! Key binding definitions.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Where the user currently is, for hints and help grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyContext {
    /// Browsing the artwork table.
    Browsing,
    /// Typing a row count into the select prompt.
    SelectPrompt,
    /// Reading the help screen.
    Help,
}

impl KeyContext {
    /// Section title in the help screen.
    pub fn title(&self) -> &'static str {
        match self {
            KeyContext::Browsing => "Artwork Table",
            KeyContext::SelectPrompt => "Select Rows Prompt",
            KeyContext::Help => "Help",
        }
    }
}

/// One-line hint text for the status bar. Keys go in brackets.
pub fn context_hints(context: KeyContext) -> &'static str {
    match context {
        KeyContext::Browsing => {
            "[j/k] row  [space] toggle  [n/p] page  [g/G] first/last  [s] select rows  [c] clear  [?] help  [q] quit"
        }
        KeyContext::SelectPrompt => "[0-9] count  [Enter] select  [Esc] cancel",
        KeyContext::Help => "[Esc/q/?] close",
    }
}

/// Key and description pairs for the help screen.
pub fn keybindings_grouped(vim_mode: bool) -> Vec<(KeyContext, Vec<(&'static str, &'static str)>)> {
    let mut browsing = vec![
        ("↓ / ↑", "Move row cursor"),
        ("space", "Toggle selection of the current row"),
        ("n / →", "Next page"),
        ("p / ←", "Previous page"),
        ("g", "First page"),
        ("G", "Last page"),
        ("s", "Select the first N rows across pages"),
        ("c", "Clear selection"),
        ("o", "Open artwork in browser"),
        ("r", "Reload current page"),
        ("?", "Show this help"),
        ("q / Ctrl+C", "Quit"),
    ];
    if vim_mode {
        browsing.insert(1, ("j / k", "Move row cursor"));
        browsing.insert(4, ("l / h", "Next / previous page"));
    }

    vec![
        (KeyContext::Browsing, browsing),
        (
            KeyContext::SelectPrompt,
            vec![
                ("0-9", "Enter the number of rows"),
                ("Enter", "Select rows"),
                ("Esc", "Cancel"),
            ],
        ),
    ]
}

/// Commands the artwork table understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    RowDown,
    RowUp,
    ToggleRow,
    NextPage,
    PrevPage,
    FirstPage,
    LastPage,
    OpenSelectPrompt,
    ClearSelection,
    OpenInBrowser,
    Reload,
    Help,
    Quit,
}

/// Key binding configuration.
#[derive(Debug, Clone, Copy)]
pub struct KeyBindings {
    /// Whether vim-style bindings are enabled.
    pub vim_mode: bool,
}

impl KeyBindings {
    /// Create new key bindings.
    pub fn new(vim_mode: bool) -> Self {
        Self { vim_mode }
    }

    /// Resolve a key press in the artwork table.
    pub fn action_for(&self, key: KeyEvent) -> Option<KeyAction> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Some(KeyAction::Quit);
        }
        if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
            return None;
        }

        let action = match key.code {
            KeyCode::Down => KeyAction::RowDown,
            KeyCode::Up => KeyAction::RowUp,
            KeyCode::Right | KeyCode::PageDown | KeyCode::Char('n') => KeyAction::NextPage,
            KeyCode::Left | KeyCode::PageUp | KeyCode::Char('p') => KeyAction::PrevPage,
            KeyCode::Home | KeyCode::Char('g') => KeyAction::FirstPage,
            KeyCode::End | KeyCode::Char('G') => KeyAction::LastPage,
            KeyCode::Char(' ') => KeyAction::ToggleRow,
            KeyCode::Char('s') => KeyAction::OpenSelectPrompt,
            KeyCode::Char('c') => KeyAction::ClearSelection,
            KeyCode::Char('o') => KeyAction::OpenInBrowser,
            KeyCode::Char('r') => KeyAction::Reload,
            KeyCode::Char('?') => KeyAction::Help,
            KeyCode::Char('q') => KeyAction::Quit,
            KeyCode::Char('j') if self.vim_mode => KeyAction::RowDown,
            KeyCode::Char('k') if self.vim_mode => KeyAction::RowUp,
            KeyCode::Char('l') if self.vim_mode => KeyAction::NextPage,
            KeyCode::Char('h') if self.vim_mode => KeyAction::PrevPage,
            _ => return None,
        };
        Some(action)
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::new(true)
    }
}
