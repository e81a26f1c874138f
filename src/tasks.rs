//! Async task management for non-blocking catalog operations.
//!
//! This module runs fetches in background tasks while keeping the UI
//! responsive. Results come back to the main event loop over a tokio channel.
//!
//! # Architecture
//!
//! 1. The app asks the `TaskSpawner` for a page fetch or a selection run
//! 2. The spawner starts a tokio task and hands back its `JoinHandle`
//! 3. The main loop keeps rendering and handling events
//! 4. When the task completes, it sends an `ApiMessage` through the channel
//! 5. The main loop polls the channel with `try_recv()` and passes the
//!    message to `App::handle_message`

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::trace;

use crate::api::ArtworkRecord;
use crate::catalog::{CrossPageSelector, GenerationTicket, PageFetcher, PageSource, SelectionOutcome};

/// Messages sent from background tasks to the main event loop.
#[derive(Debug)]
pub enum ApiMessage {
    /// Rows for the visible page. Empty when the fetch failed.
    PageFetched { page: u64, rows: Vec<ArtworkRecord> },

    /// A cross-page selection run finished.
    SelectionFinished {
        generation: u64,
        outcome: SelectionOutcome,
    },
}

/// Spawns background tasks for catalog operations.
#[derive(Debug, Clone)]
pub struct TaskSpawner {
    tx: mpsc::UnboundedSender<ApiMessage>,
}

impl TaskSpawner {
    /// Create a new TaskSpawner with the given channel sender.
    pub fn new(tx: mpsc::UnboundedSender<ApiMessage>) -> Self {
        Self { tx }
    }

    /// Spawn a task that fetches one page for display.
    pub fn spawn_fetch_page<S>(&self, fetcher: &PageFetcher<S>, page: u64) -> JoinHandle<()>
    where
        S: PageSource + Clone + 'static,
    {
        let tx = self.tx.clone();
        let fetcher = fetcher.clone();
        tokio::spawn(async move {
            let rows = fetcher.fetch(page).await;
            if tx.send(ApiMessage::PageFetched { page, rows }).is_err() {
                trace!(page, "Event loop gone, dropping page");
            }
        })
    }

    /// Spawn a cross-page selection run bound to `ticket`.
    pub fn spawn_select<S>(
        &self,
        selector: &CrossPageSelector<S>,
        target: usize,
        ticket: GenerationTicket,
    ) -> JoinHandle<()>
    where
        S: PageSource + Clone + 'static,
    {
        let tx = self.tx.clone();
        let selector = selector.clone();
        tokio::spawn(async move {
            let outcome = selector.select_for(target, &ticket).await;
            let message = ApiMessage::SelectionFinished {
                generation: ticket.id(),
                outcome,
            };
            if tx.send(message).is_err() {
                trace!("Event loop gone, dropping selection");
            }
        })
    }
}

/// Create a new task channel and spawner.
///
/// Returns a tuple of (receiver, spawner). The receiver should be polled
/// in the main event loop, and the spawner should be used to spawn tasks.
pub fn create_task_channel() -> (mpsc::UnboundedReceiver<ApiMessage>, TaskSpawner) {
    let (tx, rx) = mpsc::unbounded_channel();
    (rx, TaskSpawner::new(tx))
}
