//! Cross-page "select the first N rows" routine.
//!
//! The selector walks the catalog from page 1, one page at a time, until it
//! has collected the requested number of rows or the source runs out. Each
//! run can be tied to a [`GenerationTicket`]; once a newer request is issued
//! the older run stops at the next page boundary.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use super::fetcher::{PageFetcher, PageSource};
use super::selection::SelectionSet;

/// Why a selection run stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    /// The requested number of rows was collected.
    TargetReached,
    /// A short page, or a full page of rows already collected, was seen.
    SourceExhausted,
    /// A page could not be fetched; the result holds the rows before it.
    FetchFailed { page: u64, message: String },
    /// A newer selection request was issued while this one was running.
    Superseded,
}

impl StopReason {
    /// Whether the result may hold fewer rows than the source could provide.
    pub fn is_truncated(&self) -> bool {
        matches!(self, StopReason::FetchFailed { .. } | StopReason::Superseded)
    }
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopReason::TargetReached => write!(f, "target reached"),
            StopReason::SourceExhausted => write!(f, "no more data"),
            StopReason::FetchFailed { page, message } => {
                write!(f, "fetch of page {} failed: {}", page, message)
            }
            StopReason::Superseded => write!(f, "superseded by a newer request"),
        }
    }
}

/// Result of one selection run.
#[derive(Debug, Clone)]
pub struct SelectionOutcome {
    /// How many rows were asked for.
    pub target: usize,
    /// The collected rows, in source order.
    pub selection: SelectionSet,
    /// Pages successfully fetched.
    pub pages_fetched: u64,
    /// Why the run ended.
    pub stop: StopReason,
}

impl SelectionOutcome {
    /// Whether fewer rows than requested were collected.
    pub fn is_short(&self) -> bool {
        self.selection.len() < self.target
    }

    /// Warning for a run that was cut short or came up short, if any.
    pub fn shortfall_warning(&self) -> Option<String> {
        if !self.stop.is_truncated() && !self.is_short() {
            return None;
        }
        Some(format!(
            "selected {} of {} rows ({})",
            self.selection.len(),
            self.target,
            self.stop
        ))
    }
}

/// Monotonic counter identifying the latest selection request.
#[derive(Debug, Clone, Default)]
pub struct SelectionGeneration {
    current: Arc<AtomicU64>,
}

impl SelectionGeneration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new request, invalidating every earlier ticket.
    pub fn begin(&self) -> GenerationTicket {
        let id = self.current.fetch_add(1, Ordering::SeqCst) + 1;
        GenerationTicket {
            id,
            current: Arc::clone(&self.current),
        }
    }

    /// Id of the latest request (0 before any request).
    pub fn current(&self) -> u64 {
        self.current.load(Ordering::SeqCst)
    }

    /// Whether `id` is the latest request.
    pub fn is_current(&self, id: u64) -> bool {
        self.current() == id
    }
}

/// Handle for one selection request.
#[derive(Debug, Clone)]
pub struct GenerationTicket {
    id: u64,
    current: Arc<AtomicU64>,
}

impl GenerationTicket {
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Whether no newer request has been issued.
    pub fn is_current(&self) -> bool {
        self.current.load(Ordering::SeqCst) == self.id
    }
}

/// Collects the first N rows of the catalog across pages.
#[derive(Debug, Clone)]
pub struct CrossPageSelector<S> {
    fetcher: PageFetcher<S>,
}

impl<S: PageSource> CrossPageSelector<S> {
    pub fn new(fetcher: PageFetcher<S>) -> Self {
        Self { fetcher }
    }

    /// The fetcher driving this selector.
    pub fn fetcher(&self) -> &PageFetcher<S> {
        &self.fetcher
    }

    /// Select the first `target` rows of the catalog.
    ///
    /// Never fails. A fetch error ends the run with the rows collected so
    /// far and is reported through [`SelectionOutcome::stop`].
    pub async fn select(&self, target: usize) -> SelectionOutcome {
        self.run(target, None).await
    }

    /// Like [`Self::select`], but stops early once `ticket` is stale.
    pub async fn select_for(&self, target: usize, ticket: &GenerationTicket) -> SelectionOutcome {
        self.run(target, Some(ticket)).await
    }

    #[instrument(skip(self, ticket), fields(generation = ticket.map(|t| t.id())))]
    async fn run(&self, target: usize, ticket: Option<&GenerationTicket>) -> SelectionOutcome {
        let page_size = self.fetcher.page_size() as usize;
        let mut selection = SelectionSet::new();
        let mut pages_fetched = 0;

        if target == 0 {
            return SelectionOutcome {
                target,
                selection,
                pages_fetched,
                stop: StopReason::TargetReached,
            };
        }

        let mut page = 1;
        let stop = loop {
            if ticket.is_some_and(|t| !t.is_current()) {
                debug!(page, "Selection superseded");
                break StopReason::Superseded;
            }

            let rows = match self.fetcher.try_fetch(page).await {
                Ok(rows) => rows,
                Err(e) => {
                    warn!(page, error = %e, "Selection stopped by failed fetch");
                    break StopReason::FetchFailed {
                        page,
                        message: e.to_string(),
                    };
                }
            };
            pages_fetched += 1;

            let page_len = rows.len();
            let before = selection.len();
            for row in rows {
                if selection.len() >= target {
                    break;
                }
                if !selection.insert(row) {
                    debug!(page, "Skipping repeated artwork id");
                }
            }

            if selection.len() >= target {
                break StopReason::TargetReached;
            }
            if page_len < page_size {
                break StopReason::SourceExhausted;
            }
            // A full page of ids already seen means the source is cycling.
            if selection.len() == before {
                warn!(page, "Page added no new artworks, stopping");
                break StopReason::SourceExhausted;
            }
            page += 1;
        };

        info!(
            target,
            selected = selection.len(),
            pages_fetched,
            stop = %stop,
            "Selection finished"
        );

        SelectionOutcome {
            target,
            selection,
            pages_fetched,
            stop,
        }
    }
}
