//! Artwork table widget.

use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Cell, Row, Table, TableState},
    Frame,
};

use crate::api::ArtworkRecord;
use crate::catalog::SelectionSet;
use crate::ui::theme::theme;

/// Column headers after the checkbox column.
pub const COLUMNS: [&str; 6] = [
    "Title",
    "Place of Origin",
    "Artist Display",
    "Inscriptions",
    "Date Start",
    "Date End",
];

/// Table of one page of artworks with a checkbox column bound to artwork id.
#[derive(Debug, Default)]
pub struct ArtworkTable {
    state: TableState,
}

impl ArtworkTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the row under the cursor.
    pub fn cursor(&self) -> Option<usize> {
        self.state.selected()
    }

    /// Put the cursor on the first row, or nowhere if the page is empty.
    pub fn reset(&mut self, len: usize) {
        self.state.select(if len == 0 { None } else { Some(0) });
    }

    /// Move the cursor down, stopping at the last row.
    pub fn next(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        let i = self.state.selected().map_or(0, |i| (i + 1).min(len - 1));
        self.state.select(Some(i));
    }

    /// Move the cursor up, stopping at the first row.
    pub fn previous(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        let i = self.state.selected().map_or(0, |i| i.saturating_sub(1));
        self.state.select(Some(i));
    }

    /// Render `rows`, marking those in `selection`.
    pub fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        title: &str,
        rows: &[ArtworkRecord],
        selection: &SelectionSet,
    ) {
        let t = theme();

        let header = Row::new(
            std::iter::once(Cell::from("[ ]"))
                .chain(COLUMNS.iter().map(|c| Cell::from(*c)))
                .collect::<Vec<_>>(),
        )
        .style(Style::default().fg(t.header).add_modifier(Modifier::BOLD));

        let body = rows.iter().map(|record| {
            let selected = selection.contains(record.id);
            let (mark, style) = if selected {
                ("[x]", Style::default().fg(t.selected))
            } else {
                ("[ ]", Style::default().fg(t.fg))
            };
            Row::new(vec![
                Cell::from(mark),
                Cell::from(flatten(&record.title)),
                Cell::from(flatten(&record.place_of_origin)),
                Cell::from(flatten(&record.artist_display)),
                Cell::from(flatten(&record.inscriptions)),
                Cell::from(record.date_start.clone()),
                Cell::from(record.date_end.clone()),
            ])
            .style(style)
        });

        let widths = [
            Constraint::Length(3),
            Constraint::Percentage(22),
            Constraint::Percentage(12),
            Constraint::Percentage(22),
            Constraint::Percentage(26),
            Constraint::Length(10),
            Constraint::Length(10),
        ];

        let table = Table::new(body, widths)
            .header(header)
            .block(
                Block::default()
                    .title(Span::styled(format!(" {} ", title), Style::default().fg(t.accent)))
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(t.dim)),
            )
            .highlight_style(Style::default().bg(t.highlight_bg).add_modifier(Modifier::BOLD));

        frame.render_stateful_widget(table, area, &mut self.state);
    }
}

/// Collapse multi-line catalog text onto one line.
fn flatten(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join(" / ")
}
