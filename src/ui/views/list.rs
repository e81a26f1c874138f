//! Artwork list view: the paged table plus its pager.

use crossterm::event::KeyEvent;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};

use crate::api::ArtworkRecord;
use crate::catalog::{PageWindow, SelectionSet};
use crate::events::{KeyAction, KeyBindings};
use crate::ui::components::{ArtworkTable, LoadingIndicator, PagerControls};

/// Actions the list view asks the app to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListAction {
    /// Show another page.
    GoToPage(u64),
    /// Toggle the selection of this artwork.
    Toggle(ArtworkRecord),
    /// Open the "select rows" prompt.
    OpenSelectPrompt,
    /// Drop the whole selection.
    ClearSelection,
    /// Open this artwork's web page.
    OpenInBrowser(ArtworkRecord),
    /// Fetch the current page again.
    Reload,
    /// Show the help screen.
    Help,
    /// Quit the application.
    Quit,
}

/// The paged artwork table.
#[derive(Debug)]
pub struct ListView {
    window: PageWindow,
    total_records: u64,
    rows: Vec<ArtworkRecord>,
    table: ArtworkTable,
    loading: LoadingIndicator,
}

impl ListView {
    /// Create a view on page 1.
    pub fn new(page_size: u32, total_records: u64) -> Self {
        Self {
            window: PageWindow::first(page_size),
            total_records,
            rows: Vec::new(),
            table: ArtworkTable::new(),
            loading: LoadingIndicator::new(),
        }
    }

    /// The visible page.
    pub fn window(&self) -> PageWindow {
        self.window
    }

    /// Pager controls for the visible page.
    pub fn pager(&self) -> PagerControls {
        PagerControls::new(self.window, self.total_records)
    }

    /// Rows of the visible page.
    pub fn rows(&self) -> &[ArtworkRecord] {
        &self.rows
    }

    /// Switch to `page` and mark it loading. Rows of the old page are cleared.
    pub fn begin_page(&mut self, page: u64) -> PageWindow {
        self.window = self.window.with_page(page);
        self.rows.clear();
        self.table.reset(0);
        self.loading
            .start_with_message(format!("Loading page {}...", self.window.page()));
        self.window
    }

    /// Install fetched rows. Returns `false` (and ignores them) if `page`
    /// is no longer the visible page.
    pub fn set_rows(&mut self, page: u64, rows: Vec<ArtworkRecord>) -> bool {
        if page != self.window.page() {
            return false;
        }
        self.table.reset(rows.len());
        self.rows = rows;
        self.loading.stop();
        true
    }

    pub fn is_loading(&self) -> bool {
        self.loading.is_active()
    }

    /// The artwork under the cursor.
    pub fn selected_record(&self) -> Option<&ArtworkRecord> {
        self.table.cursor().and_then(|i| self.rows.get(i))
    }

    /// Advance animations.
    pub fn tick(&mut self) {
        self.loading.tick();
    }

    /// Handle keyboard input.
    ///
    /// Page moves whose pager control is hidden produce no action.
    pub fn handle_input(&mut self, key: KeyEvent, bindings: &KeyBindings) -> Option<ListAction> {
        let pager = self.pager();
        match bindings.action_for(key)? {
            KeyAction::RowDown => {
                self.table.next(self.rows.len());
                None
            }
            KeyAction::RowUp => {
                self.table.previous(self.rows.len());
                None
            }
            KeyAction::ToggleRow => self.selected_record().cloned().map(ListAction::Toggle),
            KeyAction::NextPage => pager.next().map(ListAction::GoToPage),
            KeyAction::PrevPage => pager.previous().map(ListAction::GoToPage),
            KeyAction::FirstPage => pager.first().map(ListAction::GoToPage),
            KeyAction::LastPage => pager.last().map(ListAction::GoToPage),
            KeyAction::OpenSelectPrompt => Some(ListAction::OpenSelectPrompt),
            KeyAction::ClearSelection => Some(ListAction::ClearSelection),
            KeyAction::OpenInBrowser => {
                self.selected_record().cloned().map(ListAction::OpenInBrowser)
            }
            KeyAction::Reload => Some(ListAction::Reload),
            KeyAction::Help => Some(ListAction::Help),
            KeyAction::Quit => Some(ListAction::Quit),
        }
    }

    /// Render the table and pager.
    pub fn render(&mut self, frame: &mut Frame, area: Rect, selection: &SelectionSet) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(1)])
            .split(area);

        let title = format!("Artworks · page {}", self.window.page());
        self.table.render(frame, chunks[0], &title, &self.rows, selection);

        if self.loading.is_active() {
            let inner = Rect::new(
                chunks[0].x,
                chunks[0].y + chunks[0].height / 2,
                chunks[0].width,
                1,
            );
            self.loading.render(frame, inner);
        }

        self.pager().render(frame, chunks[1]);
    }
}
