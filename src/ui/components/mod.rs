//! Reusable UI components.

mod count_prompt;
mod help_bar;
mod loading;
mod notification;
mod pager;
mod table;

pub use count_prompt::{CountPrompt, PromptAction};
pub use help_bar::render_status_bar;
pub use loading::LoadingIndicator;
pub use notification::{Notification, NotificationManager, NotificationType};
pub use pager::PagerControls;
pub use table::ArtworkTable;
