//! Station create/edit form with the ordered failure-reason grid.
//!
//! Scalar fields and the bilingual reason rows save together; reasons are
//! validated for per-language uniqueness before anything is sent.

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
use crate::ordered::{Direction as MoveDirection, OrderedStore};
use crate::session::{BannerKind, EditSession};
use crate::types::{Station, StationReason};
use crate::ui::form_field::{EntityForm, FormField, FormRow};
use crate::validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Form,
    Reasons,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LabelColumn {
    He,
    Ru,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StationOutcome {
    Save {
        station_id: Option<String>,
        code: String,
        name: String,
        reasons: Vec<StationReason>,
    },
    Cancelled,
}

pub struct StationForm {
    pub visible: bool,
    pub session: EditSession,
    lang: Lang,
    station_id: Option<String>,
    form: EntityForm,
    reasons: OrderedStore<StationReason>,
    focus: Focus,
    row: usize,
    col: LabelColumn,
}

fn blank_form() -> EntityForm {
    EntityForm::new(vec![
        FormRow {
            label_key: "field.code",
            required: true,
            field: FormField::text_with_max("", 16),
        },
        FormRow {
            label_key: "field.name",
            required: true,
            field: FormField::text(""),
        },
    ])
}

impl StationForm {
    pub fn new(lang: Lang) -> Self {
        Self {
            visible: false,
            session: EditSession::new(),
            lang,
            station_id: None,
            form: blank_form(),
            reasons: OrderedStore::new(),
            focus: Focus::Form,
            row: 0,
            col: LabelColumn::He,
        }
    }

    pub fn open_new(&mut self) {
        self.station_id = None;
        self.form = blank_form();
        self.reasons = OrderedStore::new();
        self.focus = Focus::Form;
        self.row = 0;
        self.col = LabelColumn::He;
        self.session.begin_editing();
        self.visible = true;
    }

    /// Open for an existing station; the caller fetches its reasons and
    /// calls `hydrate_reasons` (or `hide` on fetch failure).
    pub fn open_edit(&mut self, station: &Station) {
        self.open_new();
        self.station_id = Some(station.id.clone());
        self.form.rows[0].field.set_value(&station.code);
        self.form.rows[1].field.set_value(&station.name);
        self.session.begin_loading();
    }

    pub fn hydrate_reasons(&mut self, reasons: Vec<StationReason>) {
        self.reasons.hydrate(reasons);
        self.session.loaded();
    }

    pub fn hide(&mut self) {
        self.visible = false;
        self.session.reset();
    }

    pub fn station_id(&self) -> Option<&str> {
        self.station_id.as_deref()
    }

    fn focused_reason_key(&self) -> Option<String> {
        self.reasons.items().get(self.row).map(|r| r.key.clone())
    }

    fn clamp_row(&mut self) {
        self.row = self.row.min(self.reasons.len().saturating_sub(1));
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<StationOutcome> {
        if !self.visible {
            return None;
        }
        if key.code == KeyCode::Esc {
            self.hide();
            return Some(StationOutcome::Cancelled);
        }
        if !self.session.phase().accepts_edits() {
            return None;
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        if key.code == KeyCode::Enter {
            return self.submit();
        }

        match self.focus {
            Focus::Form => match key.code {
                KeyCode::Tab if self.form.is_last_field() => {
                    self.focus = Focus::Reasons;
                    None
                }
                KeyCode::Tab | KeyCode::Down => {
                    self.form.next_field();
                    None
                }
                KeyCode::BackTab | KeyCode::Up => {
                    self.form.prev_field();
                    None
                }
                code => {
                    if let Some(field) = self.form.focused_field_mut() {
                        field.handle_key(code);
                    }
                    None
                }
            },
            Focus::Reasons => match key.code {
                KeyCode::Tab => {
                    self.col = match self.col {
                        LabelColumn::He => LabelColumn::Ru,
                        LabelColumn::Ru => LabelColumn::He,
                    };
                    None
                }
                KeyCode::BackTab => {
                    self.focus = Focus::Form;
                    None
                }
                KeyCode::Up if ctrl => {
                    let row = self.row;
                    self.reasons.move_step(row, MoveDirection::Up);
                    self.row = row.saturating_sub(1);
                    None
                }
                KeyCode::Down if ctrl => {
                    let row = self.row;
                    let last = self.reasons.len().saturating_sub(1);
                    self.reasons.move_step(row, MoveDirection::Down);
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
                    self.row = (self.row + 1).min(self.reasons.len().saturating_sub(1));
                    None
                }
                KeyCode::Char('a') if ctrl => {
                    self.reasons.push(StationReason::blank());
                    self.row = self.reasons.len() - 1;
                    self.col = LabelColumn::He;
                    None
                }
                KeyCode::Char('d') if ctrl => {
                    if let Some(reason_key) = self.focused_reason_key() {
                        let _ = self.reasons.remove(&reason_key);
                        self.clamp_row();
                    }
                    None
                }
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
            },
        }
    }

    fn edit_focused<F: FnOnce(&mut String)>(&mut self, f: F) {
        let Some(reason_key) = self.focused_reason_key() else {
            return;
        };
        let col = self.col;
        self.reasons.update(&reason_key, |reason| match col {
            LabelColumn::He => f(&mut reason.label_he),
            LabelColumn::Ru => f(&mut reason.label_ru),
        });
    }

    fn submit(&mut self) -> Option<StationOutcome> {
        if !self.form.is_valid() {
            let text = i18n::text(self.lang, "validation.required");
            self.session.save_failed(text);
            self.focus = Focus::Form;
            return None;
        }
        if let Err(err) = validate::validate_reasons(self.reasons.items()) {
            let text = i18n::text(self.lang, err.message_key());
            self.session.save_failed(text);
            self.focus = Focus::Reasons;
            return None;
        }
        if !self.session.begin_saving() {
            return None;
        }
        Some(StationOutcome::Save {
            station_id: self.station_id.clone(),
            code: self.form.value_of("field.code").trim().to_string(),
            name: self.form.value_of("field.name").trim().to_string(),
            reasons: self.reasons.items().to_vec(),
        })
    }

    pub fn render(&self, frame: &mut Frame) {
        if !self.visible {
            return;
        }
        let lang = self.lang;
        let area = centered_rect(65, 70, frame.area());
        frame.render_widget(Clear, area);

        let title = if self.station_id.is_some() {
            i18n::text(lang, "action.edit")
        } else {
            i18n::text(lang, "action.new")
        };
        let block = Block::default()
            .title(format!(
                " {} — {} ",
                i18n::text(lang, "screen.stations"),
                title
            ))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // Scalar fields
                Constraint::Min(3),    // Reasons grid
                Constraint::Length(1), // Banner
            ])
            .margin(1)
            .split(inner);

        let field_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Length(1)])
            .split(chunks[0]);
        for (idx, row) in self.form.rows.iter().enumerate() {
            let cols = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Length(16), Constraint::Min(10)])
                .split(field_rows[idx]);
            let marker = if row.required { "*" } else { " " };
            frame.render_widget(
                Paragraph::new(format!("{marker}{}: ", i18n::text(lang, row.label_key)))
                    .style(Style::default().fg(Color::Gray)),
                cols[0],
            );
            let focused = self.focus == Focus::Form && self.form.focused == idx;
            row.field.render(frame, cols[1], focused);
        }

        self.render_reasons(frame, chunks[1]);

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
    }

    fn render_reasons(&self, frame: &mut Frame, area: ratatui::layout::Rect) {
        let focused_pane = self.focus == Focus::Reasons;
        let block = Block::default()
            .title(format!(" {} ", i18n::text(self.lang, "dialog.reasons")))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(if focused_pane {
                Color::Cyan
            } else {
                Color::DarkGray
            }));

        let busy = self.session.phase().is_busy();
        let mut lines = Vec::new();
        if busy {
            lines.push(Line::from(Span::styled(
                i18n::text(self.lang, "status.loading"),
                Style::default().fg(Color::Yellow),
            )));
        }
        for (idx, reason) in self.reasons.items().iter().enumerate() {
            let focused_row = focused_pane && idx == self.row && !busy;
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
                    format!("{:>2}. ", reason.position + 1),
                    Style::default().fg(Color::DarkGray),
                ),
                cell(&reason.label_he, LabelColumn::He),
                Span::raw(" │ "),
                cell(&reason.label_ru, LabelColumn::Ru),
            ]));
        }
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}
