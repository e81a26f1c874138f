//! artpager - a terminal pager for a public artwork catalog.
//!
//! Runs the TUI by default. The `page` and `select` subcommands print to
//! stdout instead, for scripting.

use std::io::{self, Stdout, Write};

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{error, info, warn};

use artpager::api::{ArtworkRecord, CatalogClient};
use artpager::app::App;
use artpager::catalog::{CrossPageSelector, PageFetcher};
use artpager::config::{config_path, Settings};
use artpager::error::AppError;
use artpager::events::EventHandler;
use artpager::logging;
use artpager::tasks::create_task_channel;
use artpager::ui::{init_theme, load_theme};

#[derive(Debug, Parser)]
#[command(name = "artpager", version, about = "Page through the artwork catalog")]
struct Cli {
    /// Artwork listing endpoint, overriding the config file.
    #[arg(long, global = true, env = "ARTPAGER_ENDPOINT")]
    endpoint: Option<String>,

    /// Rows per page, overriding the config file.
    #[arg(long, global = true)]
    page_size: Option<u32>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print one page of artworks.
    Page {
        /// Page number, starting at 1.
        page: u64,
    },
    /// Print the first N artworks of the catalog.
    Select {
        /// Number of rows to select.
        count: usize,
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// Write the current settings, with any overrides, to the config file.
    Init {
        /// Replace an existing config file.
        #[arg(long)]
        force: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Err(e) = logging::init() {
        eprintln!("Warning: could not initialize logging: {}", e);
    }

    let result = run(cli).await;

    if let Err(e) = &result {
        error!(error = %e, "Exiting with error");
    }
    logging::shutdown();
    result
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let settings = load_settings(&cli)?;

    if let Some(Command::Init { force }) = cli.command {
        return write_config(&settings, force);
    }

    let client = CatalogClient::new(&settings).map_err(reported)?;
    match cli.command {
        None => run_tui(&settings, client).await,
        Some(Command::Page { page }) => print_page(&settings, client, page).await,
        Some(Command::Select { count, format }) => {
            print_selection(&settings, client, count, format).await
        }
        Some(Command::Init { .. }) => Ok(()),
    }
}

/// Turn a domain error into the message shown on the terminal.
fn reported(e: impl Into<AppError>) -> anyhow::Error {
    anyhow::anyhow!(e.into().report())
}

/// Load the config file and apply command-line overrides.
fn load_settings(cli: &Cli) -> anyhow::Result<Settings> {
    let mut settings = Settings::load().map_err(reported)?;

    if let Some(endpoint) = &cli.endpoint {
        settings.endpoint = endpoint.clone();
    }
    if let Some(page_size) = cli.page_size {
        settings.page_size = page_size;
    }

    settings.validate().map_err(reported)?;
    Ok(settings)
}

fn write_config(settings: &Settings, force: bool) -> anyhow::Result<()> {
    let path = config_path().map_err(reported)?;
    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Pass --force to replace it.",
            path.display()
        );
    }

    settings.save_to(&path).map_err(reported)?;
    info!(path = %path.display(), "Wrote configuration");
    println!("Wrote {}", path.display());
    Ok(())
}

async fn print_page(settings: &Settings, client: CatalogClient, page: u64) -> anyhow::Result<()> {
    let fetcher = PageFetcher::new(client, settings.page_size);
    let rows = fetcher
        .try_fetch(page)
        .await
        .map_err(reported)?;
    write_table(&rows)
}

async fn print_selection(
    settings: &Settings,
    client: CatalogClient,
    count: usize,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let selector = CrossPageSelector::new(PageFetcher::new(client, settings.page_size));
    let outcome = selector.select(count).await;

    if let Some(warning) = outcome.shortfall_warning() {
        eprintln!("warning: {}", warning);
    }

    let rows = outcome.selection.into_records();
    match format {
        OutputFormat::Table => write_table(&rows),
        OutputFormat::Json => {
            let mut out = io::stdout().lock();
            serde_json::to_writer_pretty(&mut out, &rows)?;
            writeln!(out)?;
            Ok(())
        }
    }
}

/// Print rows as tab-separated id and title.
fn write_table(rows: &[ArtworkRecord]) -> anyhow::Result<()> {
    let mut out = io::stdout().lock();
    for row in rows {
        writeln!(
            out,
            "{}\t{}\t{}\t{}\t{}",
            row.id,
            row.title.replace('\n', " "),
            row.place_of_origin,
            row.date_start,
            row.date_end
        )?;
    }
    Ok(())
}

type Tui = Terminal<CrosstermBackend<Stdout>>;

fn setup_terminal() -> anyhow::Result<Tui> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
    Terminal::new(CrosstermBackend::new(stdout)).context("Failed to create terminal")
}

fn restore_terminal(terminal: &mut Tui) -> anyhow::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

async fn run_tui(settings: &Settings, client: CatalogClient) -> anyhow::Result<()> {
    init_theme(load_theme(&settings.theme));

    let mut terminal = setup_terminal()?;
    let result = event_loop(&mut terminal, settings, client).await;

    if let Err(e) = restore_terminal(&mut terminal) {
        warn!(error = %e, "Failed to restore terminal");
    }
    result
}

async fn event_loop(
    terminal: &mut Tui,
    settings: &Settings,
    client: CatalogClient,
) -> anyhow::Result<()> {
    let (mut rx, spawner) = create_task_channel();
    let mut app = App::new(settings, client, spawner);
    let events = EventHandler::with_tick_rate(settings.tick_rate_ms);

    app.start();
    info!("Entering event loop");

    while !app.should_quit() {
        terminal
            .draw(|frame| app.view(frame))
            .map_err(|e| AppError::terminal(e.to_string()))?;

        let event = tokio::task::block_in_place(|| events.next())?;
        app.update(event);

        while let Ok(message) = rx.try_recv() {
            app.handle_message(message);
        }
    }

    Ok(())
}
