//! User interface components and views.
//!
//! This module contains all TUI rendering logic, including views for the
//! artwork table and help screen plus the reusable components they share.

mod components;
pub mod theme;
mod views;

pub use components::{
    render_status_bar, ArtworkTable, CountPrompt, LoadingIndicator, Notification,
    NotificationManager, NotificationType, PagerControls, PromptAction,
};
pub use theme::{init_theme, load_theme};
pub use views::{HelpAction, HelpView, ListAction, ListView};
