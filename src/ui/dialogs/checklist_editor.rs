//! Station checklist editor: Start/End tabs, bilingual rows, reordering.
//!
//! The working copy lives in two `OrderedStore`s (min one item each, per
//! domain rule). Validation failures focus the offending tab; the save
//! sends both ordered sides in one call.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::centered_rect;
use crate::i18n::{self, Lang};
use crate::ordered::{Direction as MoveDirection, OrderedStore, RemoveError};
use crate::session::{BannerKind, EditSession};
use crate::types::{ChecklistItem, ChecklistSide};
use crate::validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LabelColumn {
    He,
    Ru,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChecklistOutcome {
    Save {
        station_id: String,
        start: Vec<ChecklistItem>,
        end: Vec<ChecklistItem>,
    },
    Cancelled,
}

pub struct ChecklistEditor {
    pub visible: bool,
    pub session: EditSession,
    lang: Lang,
    station_id: String,
    station_label: String,
    start: OrderedStore<ChecklistItem>,
    end: OrderedStore<ChecklistItem>,
    side: ChecklistSide,
    row: usize,
    col: LabelColumn,
}

impl ChecklistEditor {
    pub fn new(lang: Lang) -> Self {
        Self {
            visible: false,
            session: EditSession::new(),
            lang,
            station_id: String::new(),
            station_label: String::new(),
            start: OrderedStore::with_min_items(1),
            end: OrderedStore::with_min_items(1),
            side: ChecklistSide::Start,
            row: 0,
            col: LabelColumn::He,
        }
    }

    /// Open for a station; the caller fetches current checklists and calls
    /// `hydrate` (or `hide` on fetch failure).
    pub fn open(&mut self, station_id: &str, station_label: &str) {
        self.station_id = station_id.to_string();
        self.station_label = station_label.to_string();
        self.start = OrderedStore::with_min_items(1);
        self.end = OrderedStore::with_min_items(1);
        self.side = ChecklistSide::Start;
        self.row = 0;
        self.col = LabelColumn::He;
        self.session.begin_loading();
        self.visible = true;
    }

    /// Install server state. Empty sides get one blank row so the min-one
    /// rule holds from the first keystroke.
    pub fn hydrate(&mut self, start: Vec<ChecklistItem>, end: Vec<ChecklistItem>) {
        self.start.hydrate(start);
        self.end.hydrate(end);
        if self.start.is_empty() {
            self.start.push(ChecklistItem::blank());
        }
        if self.end.is_empty() {
            self.end.push(ChecklistItem::blank());
        }
        self.session.loaded();
    }

    pub fn hide(&mut self) {
        self.visible = false;
        self.session.reset();
    }

    pub fn station_id(&self) -> &str {
        &self.station_id
    }

    pub fn side(&self) -> ChecklistSide {
        self.side
    }

    fn active(&mut self) -> &mut OrderedStore<ChecklistItem> {
        match self.side {
            ChecklistSide::Start => &mut self.start,
            ChecklistSide::End => &mut self.end,
        }
    }

    fn active_len(&self) -> usize {
        match self.side {
            ChecklistSide::Start => self.start.len(),
            ChecklistSide::End => self.end.len(),
        }
    }

    fn clamp_row(&mut self) {
        let last = self.active_len().saturating_sub(1);
        if self.row > last {
            self.row = last;
        }
    }

    fn focused_key(&self) -> Option<String> {
        let items = match self.side {
            ChecklistSide::Start => self.start.items(),
            ChecklistSide::End => self.end.items(),
        };
        items.get(self.row).map(|i| i.key.clone())
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<ChecklistOutcome> {
        if !self.visible {
            return None;
        }
        if key.code == KeyCode::Esc {
            self.hide();
            return Some(ChecklistOutcome::Cancelled);
        }
        if !self.session.phase().accepts_edits() {
            return None;
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::BackTab => {
                self.side = match self.side {
                    ChecklistSide::Start => ChecklistSide::End,
                    ChecklistSide::End => ChecklistSide::Start,
                };
                self.row = 0;
                self.col = LabelColumn::He;
                None
            }
            KeyCode::Tab => {
                self.col = match self.col {
                    LabelColumn::He => LabelColumn::Ru,
                    LabelColumn::Ru => LabelColumn::He,
                };
                None
            }
            KeyCode::Up if ctrl => {
                let row = self.row;
                self.active().move_step(row, MoveDirection::Up);
                self.row = row.saturating_sub(1);
                None
            }
            KeyCode::Down if ctrl => {
                let row = self.row;
                let last = self.active_len().saturating_sub(1);
                self.active().move_step(row, MoveDirection::Down);
                if row < last {
                    self.row = row + 1;
                }
                None
            }
            KeyCode::Up => {
                self.row = self.row.saturating_sub(1);
                None
            }
            KeyCode::Down => {
                self.row = (self.row + 1).min(self.active_len().saturating_sub(1));
                None
            }
            KeyCode::Char('a') if ctrl => {
                self.active().push(ChecklistItem::blank());
                self.row = self.active_len() - 1;
                self.col = LabelColumn::He;
                None
            }
            KeyCode::Char('d') if ctrl => {
                if let Some(item_key) = self.focused_key() {
                    match self.active().remove(&item_key) {
                        Ok(_) => self.clamp_row(),
                        Err(RemoveError::MinItems(_)) => {
                            let text = i18n::text(self.lang, "validation.checklist_min");
                            self.session.save_failed(text);
                        }
                        Err(RemoveError::NotFound) => {}
                    }
                }
                None
            }
            KeyCode::Enter => self.submit(),
            KeyCode::Char(c) if !ctrl => {
                self.edit_focused(|label| label.push(c));
                None
            }
            KeyCode::Backspace => {
                self.edit_focused(|label| {
                    label.pop();
                });
                None
            }
            _ => None,
        }
    }

    fn edit_focused<F: FnOnce(&mut String)>(&mut self, f: F) {
        let Some(item_key) = self.focused_key() else {
            return;
        };
        let col = self.col;
        self.active().update(&item_key, |item| match col {
            LabelColumn::He => f(&mut item.label_he),
            LabelColumn::Ru => f(&mut item.label_ru),
        });
    }

    fn submit(&mut self) -> Option<ChecklistOutcome> {
        match validate::validate_checklists(self.start.items(), self.end.items()) {
            Err(err) => {
                if let Some(side) = err.focus_side() {
                    self.side = side;
                    self.row = 0;
                }
                let text = i18n::text(self.lang, err.message_key());
                self.session.save_failed(text);
                None
            }
            Ok(()) => {
                if !self.session.begin_saving() {
                    return None;
                }
                Some(ChecklistOutcome::Save {
                    station_id: self.station_id.clone(),
                    start: self.start.items().to_vec(),
                    end: self.end.items().to_vec(),
                })
            }
        }
    }

    pub fn render(&self, frame: &mut Frame) {
        if !self.visible {
            return;
        }
        let lang = self.lang;
        let area = centered_rect(70, 70, frame.area());
        frame.render_widget(Clear, area);

        let block = Block::default()
            .title(format!(" {} ", self.station_label))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Tabs
                Constraint::Min(3),    // Rows
                Constraint::Length(1), // Banner
                Constraint::Length(1), // Hints
            ])
            .margin(1)
            .split(inner);

        let tab_style = |side| {
            if self.side == side {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
            } else {
                Style::default().fg(Color::Gray)
            }
        };
        let tabs = Line::from(vec![
            Span::styled(
                i18n::text(lang, "dialog.checklist_start"),
                tab_style(ChecklistSide::Start),
            ),
            Span::raw("   "),
            Span::styled(
                i18n::text(lang, "dialog.checklist_end"),
                tab_style(ChecklistSide::End),
            ),
        ]);
        frame.render_widget(Paragraph::new(tabs), chunks[0]);

        let items = match self.side {
            ChecklistSide::Start => self.start.items(),
            ChecklistSide::End => self.end.items(),
        };
        let busy = self.session.phase().is_busy();
        let mut lines = Vec::new();
        if busy {
            lines.push(Line::from(Span::styled(
                i18n::text(lang, "status.loading"),
                Style::default().fg(Color::Yellow),
            )));
        }
        for (idx, item) in items.iter().enumerate() {
            let focused_row = idx == self.row && !busy;
            let cell = |label: &str, col| {
                let focused = focused_row && self.col == col;
                let display = if label.is_empty() { "…" } else { label };
                Span::styled(
                    format!(" {display} "),
                    if focused {
                        Style::default()
                            .fg(Color::Black)
                            .bg(Color::Cyan)
                            .add_modifier(Modifier::BOLD)
                    } else {
                        Style::default().fg(Color::White)
                    },
                )
            };
            lines.push(Line::from(vec![
                Span::styled(
                    format!("{:>2}. ", item.position + 1),
                    Style::default().fg(Color::DarkGray),
                ),
                cell(&item.label_he, LabelColumn::He),
                Span::raw(" │ "),
                cell(&item.label_ru, LabelColumn::Ru),
            ]));
        }
        frame.render_widget(Paragraph::new(lines), chunks[1]);

        if let Some(banner) = self.session.banner() {
            let color = match banner.kind {
                BannerKind::Error => Color::Red,
                BannerKind::Success => Color::Green,
                BannerKind::Info => Color::Yellow,
            };
            frame.render_widget(
                Paragraph::new(Span::styled(
                    banner.text.clone(),
                    Style::default().fg(color),
                )),
                chunks[2],
            );
        }

        let hints = Line::from(Span::styled(
            format!(
                "Tab ⇄  ⇧Tab {}  ^A {}  ^D {}  ^↑/^↓ {}",
                i18n::text(lang, "dialog.checklist_end"),
                i18n::text(lang, "action.add_item"),
                i18n::text(lang, "action.delete"),
                i18n::text(lang, "action.move_up"),
            ),
            Style::default().fg(Color::DarkGray),
        ));
        frame.render_widget(hints, chunks[3]);
    }
}
