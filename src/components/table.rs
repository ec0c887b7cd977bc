//! Table component - header, current page of rows and pagination bar
//!
//! The component renders whatever snapshot it was last given and remembers
//! where the column headers and Prev/Next controls were drawn, so mouse
//! clicks can be mapped back to actions.

use crate::action::Action;
use crate::component::Component;
use crate::model::{Column, DataSource, Row, SortConfig, Status, TableSnapshot, ViewState};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Constraint, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Widest a column may grow before its cells are truncated
const MAX_COLUMN_WIDTH: usize = 30;
const COLUMN_SEPARATOR: &str = " │ ";
const PREV_LABEL: &str = "◀ Prev";
const NEXT_LABEL: &str = "Next ▶";

/// Table component for the current page of rows
pub struct TableComponent {
    rows: Vec<Row>,
    sort: SortConfig,
    matched: usize,
    total_rows: usize,
    current_page: usize,
    total_pages: usize,
    can_prev: bool,
    can_next: bool,
    currency: String,
    title: String,
    /// Header cells as drawn in the last frame
    header_hits: Vec<(Column, Rect)>,
    /// Enabled pagination controls as drawn in the last frame
    prev_hit: Option<Rect>,
    next_hit: Option<Rect>,
}

impl TableComponent {
    pub fn new(currency: impl Into<String>) -> Self {
        Self {
            rows: Vec::new(),
            sort: SortConfig::default(),
            matched: 0,
            total_rows: 0,
            current_page: 1,
            total_pages: 1,
            can_prev: false,
            can_next: false,
            currency: currency.into(),
            title: String::new(),
            header_hits: Vec::new(),
            prev_hit: None,
            next_hit: None,
        }
    }

    /// Take the rows and counters of a pipeline run for the next draw
    pub fn set_snapshot(&mut self, snapshot: &TableSnapshot, view: &ViewState, source: &DataSource) {
        let view = view.clamped(snapshot.total_pages);
        self.rows = snapshot.rows.iter().map(|row| (*row).clone()).collect();
        self.sort = view.sort;
        self.matched = snapshot.matched;
        self.total_rows = snapshot.total_rows;
        self.current_page = snapshot.current_page;
        self.total_pages = snapshot.total_pages;
        self.can_prev = view.can_go_prev();
        self.can_next = view.can_go_next(snapshot.total_pages);
        self.title = source.to_string();
    }

    fn header_label(&self, column: Column) -> String {
        match self.sort.indicator(column) {
            Some(arrow) => format!("{} {}", column.title(), arrow),
            None => column.title().to_string(),
        }
    }

    /// Width of every column, from header and cell content
    pub fn column_widths(&self) -> Vec<usize> {
        Column::all()
            .iter()
            .map(|column| {
                // leave room for the sort arrow so headers don't jump
                let header = column.title().width() + 2;
                let cells = self
                    .rows
                    .iter()
                    .map(|row| column.cell_text(row, &self.currency).width())
                    .max()
                    .unwrap_or(0);
                header.max(cells).min(MAX_COLUMN_WIDTH)
            })
            .collect()
    }

    /// Header, separator and one line per row
    pub fn build_lines(&self, widths: &[usize]) -> Vec<Line<'static>> {
        let mut lines = Vec::new();

        let header_spans: Vec<Span> = Column::all()
            .iter()
            .zip(widths)
            .flat_map(|(column, width)| {
                let style = if self.sort.key == Some(*column) {
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD)
                };
                vec![
                    Span::styled(fit(&self.header_label(*column), *width), style),
                    Span::raw(COLUMN_SEPARATOR),
                ]
            })
            .collect();
        lines.push(Line::from(header_spans));

        let separator: String = widths
            .iter()
            .map(|w| "─".repeat(*w))
            .collect::<Vec<_>>()
            .join("─┼─");
        lines.push(Line::from(Span::styled(
            separator,
            Style::default().fg(Color::DarkGray),
        )));

        if self.rows.is_empty() {
            lines.push(Line::from(Span::styled(
                "No matching rows",
                Style::default().fg(Color::DarkGray),
            )));
            return lines;
        }

        for (index, row) in self.rows.iter().enumerate() {
            let base = if index % 2 == 0 {
                Style::default().fg(Color::White)
            } else {
                Style::default().fg(Color::Gray)
            };
            let row_spans: Vec<Span> = Column::all()
                .iter()
                .zip(widths)
                .flat_map(|(column, width)| {
                    let style = match column {
                        Column::Status => status_style(&row.status),
                        _ => base,
                    };
                    vec![
                        Span::styled(fit(&column.cell_text(row, &self.currency), *width), style),
                        Span::raw(COLUMN_SEPARATOR),
                    ]
                })
                .collect();
            lines.push(Line::from(row_spans));
        }

        lines
    }

    fn draw_pagination(&mut self, frame: &mut Frame, area: Rect) {
        let enabled = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        let disabled = Style::default().fg(Color::DarkGray);

        let indicator = format!("   Page {} of {}   ", self.current_page, self.total_pages);
        let prev_width = PREV_LABEL.width() as u16;
        let next_width = NEXT_LABEL.width() as u16;
        let total_width = prev_width + indicator.width() as u16 + next_width;

        let start_x = area.x + area.width.saturating_sub(total_width) / 2;
        let bar = Rect::new(start_x, area.y, total_width.min(area.width), area.height.min(1));

        let line = Line::from(vec![
            Span::styled(PREV_LABEL, if self.can_prev { enabled } else { disabled }),
            Span::styled(indicator, Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(NEXT_LABEL, if self.can_next { enabled } else { disabled }),
        ]);
        frame.render_widget(Paragraph::new(line), bar);

        self.prev_hit = self
            .can_prev
            .then(|| Rect::new(start_x, area.y, prev_width, 1).intersection(area));
        self.next_hit = self.can_next.then(|| {
            Rect::new(start_x + total_width - next_width, area.y, next_width, 1).intersection(area)
        });
    }

    fn record_header_hits(&mut self, inner: Rect, widths: &[usize]) {
        self.header_hits.clear();
        if inner.height == 0 {
            return;
        }

        let mut x = inner.x;
        for (column, width) in Column::all().iter().zip(widths) {
            if x >= inner.right() {
                break;
            }
            let width = (*width as u16).min(inner.right() - x);
            self.header_hits
                .push((*column, Rect::new(x, inner.y, width, 1)));
            x = x.saturating_add(width + COLUMN_SEPARATOR.width() as u16);
        }
    }
}

/// Pad or truncate `text` to exactly `width` display columns
fn fit(text: &str, width: usize) -> String {
    if text.width() <= width {
        return format!("{}{}", text, " ".repeat(width - text.width()));
    }

    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    used += 1;
    out.push_str(&" ".repeat(width.saturating_sub(used)));
    out
}

fn status_style(status: &Status) -> Style {
    let color = match status {
        Status::Active => Color::Green,
        Status::Inactive => Color::Red,
        Status::Other(_) => Color::Yellow,
    };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

impl Component for TableComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Char('/') => Some(Action::EnterSearchMode),
            KeyCode::Char(c @ '1'..='5') => c
                .to_digit(10)
                .and_then(|d| Column::from_position(d as usize))
                .map(Action::SortBy),
            KeyCode::Left | KeyCode::Char('h') | KeyCode::PageUp => Some(Action::PrevPage),
            KeyCode::Right | KeyCode::Char('l') | KeyCode::PageDown => Some(Action::NextPage),
            KeyCode::Home | KeyCode::Char('g') => Some(Action::FirstPage),
            KeyCode::End | KeyCode::Char('G') => Some(Action::LastPage),
            KeyCode::Esc => Some(Action::ClearSearch),
            KeyCode::Char('?') => Some(Action::OpenHelp),
            KeyCode::Char('q') => Some(Action::OpenQuitDialog),
            _ => None,
        };
        Ok(action)
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        let position = Position::new(mouse.column, mouse.row);
        let action = match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some((column, _)) = self
                    .header_hits
                    .iter()
                    .find(|(_, rect)| rect.contains(position))
                {
                    Some(Action::SortBy(*column))
                } else if self.prev_hit.is_some_and(|rect| rect.contains(position)) {
                    Some(Action::PrevPage)
                } else if self.next_hit.is_some_and(|rect| rect.contains(position)) {
                    Some(Action::NextPage)
                } else {
                    None
                }
            }
            MouseEventKind::ScrollDown if self.can_next => Some(Action::NextPage),
            MouseEventKind::ScrollUp if self.can_prev => Some(Action::PrevPage),
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let [table_area, pager_area] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);

        let title = format!(
            " {} ({} of {} rows) ",
            self.title, self.matched, self.total_rows
        );
        let block = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(Style::default().fg(Color::DarkGray));
        let inner = block.inner(table_area);

        let widths = self.column_widths();
        let paragraph = Paragraph::new(self.build_lines(&widths)).block(block);
        frame.render_widget(paragraph, table_area);

        self.record_header_hits(inner, &widths);
        self.draw_pagination(frame, pager_area);

        Ok(())
    }
}
