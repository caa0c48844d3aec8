//! Scrollable entity table used by every screen.

use crossterm::event::KeyCode;
use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Row, Table, TableState},
    Frame,
};

pub struct EntityTable {
    /// Row cells, one inner vec per entity. The entity id rides alongside
    /// in `row_ids` at the same index.
    rows: Vec<Vec<String>>,
    row_ids: Vec<String>,
    /// Header cells, already localized by the caller.
    headers: Vec<String>,
    state: TableState,
    page_size: usize,
}

impl EntityTable {
    pub fn new(headers: Vec<String>, page_size: usize) -> Self {
        Self {
            rows: Vec::new(),
            row_ids: Vec::new(),
            headers,
            state: TableState::default(),
            page_size: page_size.max(1),
        }
    }

    /// Replace all rows, keeping the selection on the same index when it
    /// still exists (refresh should not jump the cursor).
    pub fn set_rows(&mut self, rows: Vec<(String, Vec<String>)>) {
        let (ids, cells): (Vec<_>, Vec<_>) = rows.into_iter().unzip();
        self.row_ids = ids;
        self.rows = cells;
        if self.rows.is_empty() {
            self.state.select(None);
        } else {
            match self.state.selected() {
                Some(sel) if sel < self.rows.len() => {}
                Some(_) => self.state.select(Some(self.rows.len() - 1)),
                None => self.state.select(Some(0)),
            }
        }
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.state
            .selected()
            .and_then(|idx| self.row_ids.get(idx))
            .map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn handle_key(&mut self, key: KeyCode) -> bool {
        if self.rows.is_empty() {
            return false;
        }
        let last = self.rows.len() - 1;
        let current = self.state.selected().unwrap_or(0);
        let next = match key {
            KeyCode::Up | KeyCode::Char('k') => current.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => (current + 1).min(last),
            KeyCode::PageUp => current.saturating_sub(self.page_size),
            KeyCode::PageDown => (current + self.page_size).min(last),
            KeyCode::Home => 0,
            KeyCode::End => last,
            _ => return false,
        };
        self.state.select(Some(next));
        true
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, title: &str, focused: bool) {
        let border_style = if focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let header = Row::new(self.headers.clone())
            .style(Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD));

        let rows: Vec<Row> = self.rows.iter().map(|cells| Row::new(cells.clone())).collect();

        let width = 100 / self.headers.len().max(1) as u16;
        let constraints: Vec<Constraint> = self
            .headers
            .iter()
            .map(|_| Constraint::Percentage(width))
            .collect();

        let table = Table::new(rows, constraints)
            .header(header)
            .block(
                Block::default()
                    .title(format!(" {title} "))
                    .borders(Borders::ALL)
                    .border_style(border_style),
            )
            .row_highlight_style(
                Style::default()
                    .add_modifier(Modifier::REVERSED)
                    .fg(Color::Cyan),
            )
            .highlight_symbol("▶ ");

        frame.render_stateful_widget(table, area, &mut self.state);
    }
}
