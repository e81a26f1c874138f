//! Catalog paging and cross-page selection.
//!
//! [`PageFetcher`] loads one fixed-size page at a time from a
//! [`PageSource`]; [`CrossPageSelector`] drives it page by page to collect
//! the first N rows of the catalog.

mod fetcher;
#[cfg(test)]
pub(crate) mod mock;
mod selection;
mod selector;
mod window;

pub use fetcher::{PageFetcher, PageSource};
pub use selection::SelectionSet;
pub use selector::{
    CrossPageSelector, GenerationTicket, SelectionGeneration, SelectionOutcome, StopReason,
};
pub use window::PageWindow;
