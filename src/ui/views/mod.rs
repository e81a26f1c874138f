//! Application views (screens).

mod help;
mod list;

pub use help::{HelpAction, HelpView};
pub use list::{ListAction, ListView};
