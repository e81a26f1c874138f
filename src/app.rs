//! Main application state and event loop.
//!
//! This module implements The Elm Architecture (TEA) pattern for predictable
//! state management in the TUI application. Keyboard events arrive through
//! [`App::update`], background results through [`App::handle_message`], and
//! [`App::view`] draws the current state.

use crossterm::event::KeyEvent;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tokio::task::JoinHandle;
use tracing::{debug, info, trace, warn};

use crate::api::{ArtworkRecord, CatalogClient};
use crate::catalog::{
    CrossPageSelector, PageFetcher, PageSource, SelectionGeneration, SelectionOutcome,
    SelectionSet, StopReason,
};
use crate::config::Settings;
use crate::events::{Event, KeyBindings, KeyContext};
use crate::tasks::{ApiMessage, TaskSpawner};
use crate::ui::theme::theme;
use crate::ui::{
    render_status_bar, CountPrompt, HelpAction, HelpView, ListAction, ListView, LoadingIndicator,
    NotificationManager, PromptAction,
};

/// The current view/screen state of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppState {
    /// Waiting for the first page.
    #[default]
    Loading,
    /// Browsing the artwork table.
    Browsing,
    /// The "select rows" prompt is open.
    SelectPrompt,
    /// Help screen is displayed.
    Help,
    /// Application is in the process of exiting.
    Exiting,
}

/// The main application struct that holds all state.
///
/// Generic over the page source so the whole update loop can run against an
/// in-memory catalog.
pub struct App<S: PageSource + Clone + 'static = CatalogClient> {
    /// The current view state.
    state: AppState,
    /// Whether the application should quit.
    should_quit: bool,
    /// Key map for the configured binding mode.
    bindings: KeyBindings,
    /// The paged artwork table.
    list_view: ListView,
    /// Rows the user has selected, kept across page changes.
    selection: SelectionSet,
    /// Target row count prompt.
    count_prompt: CountPrompt,
    /// Help panel.
    help_view: HelpView,
    /// Notification manager for toast messages.
    notifications: NotificationManager,
    /// Shown in the status bar while a selection runs.
    selecting: LoadingIndicator,
    /// Cross-page selector, which also owns the page fetcher.
    selector: CrossPageSelector<S>,
    /// Identifies the newest selection request.
    generation: SelectionGeneration,
    /// Starts background fetches.
    spawner: TaskSpawner,
    /// The in-flight page fetch, if any.
    page_task: Option<JoinHandle<()>>,
    /// The in-flight selection run, if any.
    selection_task: Option<JoinHandle<()>>,
}

impl<S: PageSource + Clone + 'static> App<S> {
    /// Create an application reading from `source`.
    ///
    /// Nothing is fetched until [`App::start`] is called.
    pub fn new(settings: &Settings, source: S, spawner: TaskSpawner) -> Self {
        debug!(
            page_size = settings.page_size,
            total_records = settings.total_records,
            "Creating new application instance"
        );

        let fetcher = PageFetcher::new(source, settings.page_size);

        Self {
            state: AppState::Loading,
            should_quit: false,
            bindings: KeyBindings::new(settings.vim_mode),
            list_view: ListView::new(fetcher.page_size(), settings.total_records),
            selection: SelectionSet::new(),
            count_prompt: CountPrompt::new(),
            help_view: HelpView::new(settings.vim_mode),
            notifications: NotificationManager::new(),
            selecting: LoadingIndicator::new(),
            selector: CrossPageSelector::new(fetcher),
            generation: SelectionGeneration::new(),
            spawner,
            page_task: None,
            selection_task: None,
        }
    }

    /// Fetch the first page. Must be called inside a tokio runtime.
    pub fn start(&mut self) {
        info!("Loading first page");
        self.go_to_page(1);
    }

    /// Returns whether the application should quit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Returns the current application state.
    pub fn state(&self) -> AppState {
        self.state
    }

    pub fn list_view(&self) -> &ListView {
        &self.list_view
    }

    /// The current selection.
    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn notifications(&self) -> &NotificationManager {
        &self.notifications
    }

    /// Whether a selection run is in flight.
    pub fn is_selecting(&self) -> bool {
        self.selecting.is_active()
    }

    /// Update the application state based on an event.
    ///
    /// This implements the Update part of The Elm Architecture (TEA).
    pub fn update(&mut self, event: Event) {
        match event {
            Event::Quit => {
                info!("Quit event received");
                self.quit();
            }
            Event::Key(key_event) => {
                trace!(key = ?key_event.code, modifiers = ?key_event.modifiers, "Key event");
                self.handle_key_event(key_event);
            }
            Event::Resize(width, height) => {
                trace!(width, height, "Terminal resize event");
            }
            Event::Tick => self.handle_tick(),
        }
    }

    /// Apply a result sent back by a background task.
    pub fn handle_message(&mut self, message: ApiMessage) {
        match message {
            ApiMessage::PageFetched { page, rows } => {
                let count = rows.len();
                if self.list_view.set_rows(page, rows) {
                    debug!(page, rows = count, "Page loaded");
                    self.page_task = None;
                    if self.state == AppState::Loading {
                        self.state = AppState::Browsing;
                    }
                } else {
                    debug!(page, "Dropping rows for a page that is no longer visible");
                }
            }
            ApiMessage::SelectionFinished {
                generation,
                outcome,
            } => {
                if !self.generation.is_current(generation) {
                    debug!(
                        generation,
                        current = self.generation.current(),
                        "Ignoring stale selection result"
                    );
                    return;
                }
                self.finish_selection(outcome);
            }
        }
    }

    fn quit(&mut self) {
        self.should_quit = true;
        self.state = AppState::Exiting;
        self.abort_tasks();
    }

    fn abort_tasks(&mut self) {
        if let Some(task) = self.page_task.take() {
            task.abort();
        }
        if let Some(task) = self.selection_task.take() {
            task.abort();
        }
    }

    /// Handle keyboard input events.
    fn handle_key_event(&mut self, key_event: KeyEvent) {
        use crossterm::event::{KeyCode, KeyModifiers};

        if key_event.code == KeyCode::Char('c') && key_event.modifiers == KeyModifiers::CONTROL {
            info!("Ctrl+C received");
            self.quit();
            return;
        }

        match self.state {
            AppState::SelectPrompt => {
                if let Some(action) = self.count_prompt.handle_input(key_event) {
                    self.handle_prompt_action(action);
                }
            }
            AppState::Help => {
                if let Some(HelpAction::Close) = self.help_view.handle_input(key_event) {
                    self.state = AppState::Browsing;
                }
            }
            AppState::Loading | AppState::Browsing => {
                if let Some(action) = self.list_view.handle_input(key_event, &self.bindings) {
                    self.handle_list_action(action);
                }
            }
            AppState::Exiting => {}
        }
    }

    fn handle_list_action(&mut self, action: ListAction) {
        match action {
            ListAction::GoToPage(page) => self.go_to_page(page),
            ListAction::Toggle(record) => {
                let selected = self.selection.toggle(&record);
                debug!(id = record.id, selected, "Toggled row");
            }
            ListAction::OpenSelectPrompt => {
                self.count_prompt.show();
                self.state = AppState::SelectPrompt;
            }
            ListAction::ClearSelection => self.clear_selection(),
            ListAction::OpenInBrowser(record) => self.open_in_browser(&record),
            ListAction::Reload => {
                let page = self.list_view.window().page();
                self.go_to_page(page);
            }
            ListAction::Help => {
                self.help_view.reset_scroll();
                self.state = AppState::Help;
            }
            ListAction::Quit => {
                info!("Quit requested");
                self.quit();
            }
        }
    }

    fn handle_prompt_action(&mut self, action: PromptAction) {
        match action {
            PromptAction::Submit(target) => {
                self.state = AppState::Browsing;
                self.start_selection(target);
            }
            PromptAction::Invalid => {
                self.notifications.warning("Enter the number of rows to select");
            }
            PromptAction::Cancel => {
                self.state = AppState::Browsing;
            }
        }
    }

    /// Show `page` and fetch its rows, replacing any fetch still in flight.
    fn go_to_page(&mut self, page: u64) {
        if let Some(task) = self.page_task.take() {
            task.abort();
        }
        let window = self.list_view.begin_page(page);
        debug!(page = window.page(), "Fetching page");
        self.page_task = Some(
            self.spawner
                .spawn_fetch_page(self.selector.fetcher(), window.page()),
        );
    }

    /// Start selecting the first `target` rows, superseding any earlier run.
    fn start_selection(&mut self, target: usize) {
        if let Some(task) = self.selection_task.take() {
            task.abort();
        }
        let ticket = self.generation.begin();
        info!(target, generation = ticket.id(), "Starting cross-page selection");

        self.selecting
            .start_with_message(format!("Selecting {} rows...", target));
        self.selection_task = Some(self.spawner.spawn_select(&self.selector, target, ticket));
    }

    fn finish_selection(&mut self, outcome: SelectionOutcome) {
        self.selection_task = None;
        self.selecting.stop();

        let selected = outcome.selection.len();
        match &outcome.stop {
            StopReason::FetchFailed { page, .. } => {
                self.notifications.warning(format!(
                    "Selected {} of {} rows: page {} could not be loaded",
                    selected, outcome.target, page
                ));
            }
            StopReason::SourceExhausted if outcome.is_short() => {
                self.notifications.warning(format!(
                    "Selected {} of {} rows: the catalog has no more rows",
                    selected, outcome.target
                ));
            }
            _ => {
                self.notifications.success(format!("Selected {} rows", selected));
            }
        }

        self.selection = outcome.selection;
        self.go_to_page(1);
    }

    /// Drop the selection and invalidate any run still in flight.
    fn clear_selection(&mut self) {
        if let Some(task) = self.selection_task.take() {
            task.abort();
            self.selecting.stop();
        }
        self.generation.begin();
        self.selection.clear();
        self.notifications.info("Selection cleared");
    }

    fn open_in_browser(&mut self, record: &ArtworkRecord) {
        let url = record.web_url();
        debug!(id = record.id, url = %url, "Opening artwork in browser");
        if let Err(e) = open::that(&url) {
            warn!(error = %e, url = %url, "Failed to open browser");
            self.notifications.error(format!("Could not open browser: {}", e));
        }
    }

    /// Handle periodic tick events.
    fn handle_tick(&mut self) {
        self.list_view.tick();
        self.selecting.tick();
        self.notifications.tick();
    }

    /// Render the application UI.
    ///
    /// This implements the View part of The Elm Architecture (TEA).
    pub fn view(&mut self, frame: &mut Frame) {
        let area = frame.area();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // Header
                Constraint::Min(1),    // Content
                Constraint::Length(1), // Status bar
            ])
            .split(area);

        self.render_header(frame, chunks[0]);
        self.list_view.render(frame, chunks[1], &self.selection);
        self.render_footer(frame, chunks[2]);

        match self.state {
            AppState::SelectPrompt => self.count_prompt.render(frame, area),
            AppState::Help => self.help_view.render(frame, centered(area, 70, 80)),
            _ => {}
        }

        self.notifications.render(frame, area);
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let t = theme();
        let title = Paragraph::new(Line::from(vec![
            Span::styled(
                "artpager",
                Style::default().fg(t.accent).add_modifier(Modifier::BOLD),
            ),
            Span::styled("  artwork catalog", Style::default().fg(t.dim)),
        ]))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(t.dim)),
        );
        frame.render_widget(title, area);
    }

    fn render_footer(&self, frame: &mut Frame, area: Rect) {
        let context = match self.state {
            AppState::SelectPrompt => KeyContext::SelectPrompt,
            AppState::Help => KeyContext::Help,
            _ => KeyContext::Browsing,
        };
        render_status_bar(frame, area, context, &self.status_text());
    }

    /// Right-hand status text: selection size plus any running selection.
    fn status_text(&self) -> String {
        let selected = format!("{} selected", self.selection.len());
        if self.selecting.is_active() {
            format!("{}  {}", self.selecting.text(), selected)
        } else {
            selected
        }
    }
}

/// A rectangle of `percent_x` by `percent_y` centred in `area`.
fn centered(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let width = (u32::from(area.width) * u32::from(percent_x) / 100) as u16;
    let height = (u32::from(area.height) * u32::from(percent_y) / 100) as u16;
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::test_record;
    use crate::catalog::mock::MockSource;
    use crate::tasks::create_task_channel;
    use crossterm::event::{KeyCode, KeyModifiers};
    use tokio::sync::mpsc::UnboundedReceiver;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_text(app: &mut App<MockSource>, text: &str) {
        for c in text.chars() {
            app.update(key(KeyCode::Char(c)));
        }
    }

    fn test_app(total: u64) -> (App<MockSource>, UnboundedReceiver<ApiMessage>) {
        let (rx, spawner) = create_task_channel();
        let app = App::new(&Settings::default(), MockSource::new(total), spawner);
        (app, rx)
    }

    /// Wait for the next message and apply it.
    async fn pump(app: &mut App<MockSource>, rx: &mut UnboundedReceiver<ApiMessage>) {
        let message = rx.recv().await.expect("channel closed");
        app.handle_message(message);
    }

    async fn started_app(total: u64) -> (App<MockSource>, UnboundedReceiver<ApiMessage>) {
        let (mut app, mut rx) = test_app(total);
        app.start();
        pump(&mut app, &mut rx).await;
        (app, rx)
    }

    #[tokio::test]
    async fn test_start_loads_first_page() {
        let (app, _rx) = started_app(100).await;
        assert_eq!(app.state(), AppState::Browsing);
        assert_eq!(app.list_view().window().page(), 1);
        assert_eq!(app.list_view().rows().len(), 12);
        assert_eq!(app.list_view().rows()[0].id, 1);
    }

    #[tokio::test]
    async fn test_quit_on_q_key() {
        let (mut app, _rx) = started_app(100).await;
        app.update(key(KeyCode::Char('q')));
        assert!(app.should_quit());
        assert_eq!(app.state(), AppState::Exiting);
    }

    #[tokio::test]
    async fn test_quit_on_ctrl_c() {
        let (mut app, _rx) = started_app(100).await;
        app.update(Event::Key(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL,
        )));
        assert!(app.should_quit());
    }

    #[tokio::test]
    async fn test_next_page_fetches_page_two() {
        let (mut app, mut rx) = started_app(100).await;
        app.update(key(KeyCode::Char('n')));
        assert_eq!(app.list_view().window().page(), 2);
        assert!(app.list_view().is_loading());

        pump(&mut app, &mut rx).await;
        assert_eq!(app.list_view().rows()[0].id, 13);
    }

    #[tokio::test]
    async fn test_previous_page_hidden_on_first_page() {
        let (mut app, _rx) = started_app(100).await;
        app.update(key(KeyCode::Char('p')));
        assert_eq!(app.list_view().window().page(), 1);
        assert!(!app.list_view().is_loading());
    }

    #[tokio::test]
    async fn test_stale_page_is_dropped() {
        let (mut app, _rx) = started_app(100).await;
        app.update(key(KeyCode::Char('n')));
        app.handle_message(ApiMessage::PageFetched {
            page: 1,
            rows: vec![test_record(1)],
        });
        assert_eq!(app.list_view().window().page(), 2);
        assert!(app.list_view().rows().is_empty());
    }

    #[tokio::test]
    async fn test_toggle_keeps_selection_across_pages() {
        let (mut app, mut rx) = started_app(100).await;
        app.update(key(KeyCode::Char(' ')));
        assert!(app.selection().contains(1));

        app.update(key(KeyCode::Char('n')));
        pump(&mut app, &mut rx).await;
        assert!(app.selection().contains(1));

        app.update(key(KeyCode::Char('c')));
        assert!(app.selection().is_empty());
    }

    #[tokio::test]
    async fn test_help_opens_and_closes() {
        let (mut app, _rx) = started_app(100).await;
        app.update(key(KeyCode::Char('?')));
        assert_eq!(app.state(), AppState::Help);
        app.update(key(KeyCode::Esc));
        assert_eq!(app.state(), AppState::Browsing);
    }

    #[tokio::test]
    async fn test_prompt_cancel() {
        let (mut app, _rx) = started_app(100).await;
        app.update(key(KeyCode::Char('s')));
        assert_eq!(app.state(), AppState::SelectPrompt);
        app.update(key(KeyCode::Esc));
        assert_eq!(app.state(), AppState::Browsing);
        assert!(!app.is_selecting());
    }

    #[tokio::test]
    async fn test_prompt_without_number_warns() {
        let (mut app, _rx) = started_app(100).await;
        app.update(key(KeyCode::Char('s')));
        type_text(&mut app, "abc");
        app.update(key(KeyCode::Enter));
        assert_eq!(app.state(), AppState::SelectPrompt);
        assert!(!app.is_selecting());
        assert!(!app.notifications().is_empty());
    }

    #[tokio::test]
    async fn test_selection_replaces_and_resets_to_first_page() {
        let (mut app, mut rx) = started_app(100).await;
        app.update(key(KeyCode::Char('n')));
        pump(&mut app, &mut rx).await;
        app.update(key(KeyCode::Char(' ')));
        assert!(app.selection().contains(13));

        app.update(key(KeyCode::Char('s')));
        type_text(&mut app, "15");
        app.update(key(KeyCode::Enter));
        assert!(app.is_selecting());

        pump(&mut app, &mut rx).await;
        assert!(!app.is_selecting());
        assert_eq!(app.selection().len(), 15);
        assert!(app.selection().contains(13));
        assert!(!app.selection().contains(16));
        assert_eq!(app.list_view().window().page(), 1);
        assert!(app.list_view().is_loading());

        pump(&mut app, &mut rx).await;
        assert_eq!(app.list_view().rows()[0].id, 1);
    }

    #[tokio::test]
    async fn test_stale_selection_result_is_ignored() {
        let (mut app, _rx) = started_app(100).await;
        app.start_selection(5);
        app.start_selection(3);

        let stale = app.generation.current() - 1;
        let outcome = CrossPageSelector::new(PageFetcher::new(MockSource::new(100), 12))
            .select(5)
            .await;
        app.handle_message(ApiMessage::SelectionFinished {
            generation: stale,
            outcome,
        });

        assert!(app.selection().is_empty());
        assert!(app.is_selecting());
    }

    #[tokio::test]
    async fn test_truncated_selection_warns() {
        let (mut rx, spawner) = create_task_channel();
        let source = MockSource::new(100).failing_on(2);
        let mut app = App::new(&Settings::default(), source, spawner);
        app.start();
        pump(&mut app, &mut rx).await;

        app.start_selection(20);
        pump(&mut app, &mut rx).await;

        assert_eq!(app.selection().len(), 12);
        let latest = app.notifications().latest().expect("notification");
        assert!(latest.message.contains("12 of 20"));
    }

    #[tokio::test]
    async fn test_clear_supersedes_running_selection() {
        let (mut app, _rx) = started_app(100).await;
        app.start_selection(30);
        let generation = app.generation.current();
        app.update(key(KeyCode::Char('c')));

        assert!(!app.is_selecting());
        assert!(!app.generation.is_current(generation));
    }

    #[test]
    fn test_centered_rect() {
        let rect = centered(Rect::new(0, 0, 100, 50), 50, 50);
        assert_eq!(rect, Rect::new(25, 12, 50, 25));
    }
}
