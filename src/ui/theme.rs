//! Theme and styling configuration.
//!
//! The active theme is installed once at startup with [`init_theme`] and read
//! everywhere else through [`theme`].

use std::sync::OnceLock;

use ratatui::style::Color;

static THEME: OnceLock<Theme> = OnceLock::new();

/// Color theme for the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    /// Primary foreground color.
    pub fg: Color,
    /// Borders, titles and key hints.
    pub accent: Color,
    /// Background of the row under the cursor.
    pub highlight_bg: Color,
    /// Marker and text color for selected rows.
    pub selected: Color,
    /// Table header color.
    pub header: Color,
    /// Section headers and warnings.
    pub warning: Color,
    /// Key names in the help screen.
    pub success: Color,
    /// Secondary text.
    pub dim: Color,
}

impl Theme {
    /// Theme for dark terminals.
    pub fn dark() -> Self {
        Self {
            fg: Color::White,
            accent: Color::Cyan,
            highlight_bg: Color::DarkGray,
            selected: Color::Green,
            header: Color::Yellow,
            warning: Color::Yellow,
            success: Color::Green,
            dim: Color::Gray,
        }
    }

    /// Theme for light terminals.
    pub fn light() -> Self {
        Self {
            fg: Color::Black,
            accent: Color::Blue,
            highlight_bg: Color::Gray,
            selected: Color::Green,
            header: Color::Magenta,
            warning: Color::Red,
            success: Color::Blue,
            dim: Color::DarkGray,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

/// Look up a theme by name. Unknown names fall back to dark.
pub fn load_theme(name: &str) -> Theme {
    match name.to_ascii_lowercase().as_str() {
        "light" => Theme::light(),
        _ => Theme::dark(),
    }
}

/// Install the global theme. Later calls are ignored.
pub fn init_theme(theme: Theme) {
    let _ = THEME.set(theme);
}

/// The active theme, dark if none was installed.
pub fn theme() -> &'static Theme {
    THEME.get_or_init(Theme::dark)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_theme() {
        assert_eq!(load_theme("light"), Theme::light());
        assert_eq!(load_theme("LIGHT"), Theme::light());
        assert_eq!(load_theme("dark"), Theme::dark());
        assert_eq!(load_theme("solarized"), Theme::dark());
    }

    #[test]
    fn test_theme_always_available() {
        let t = theme();
        assert_ne!(t.accent, t.highlight_bg);
    }
}
