//! Worker create/edit form with the station-assignment pick list.
//!
//! Assignments are edited as a checkbox list over the station catalog; on
//! save the dialog hands back the full desired set and the owner reconciles
//! it against the server with explicit per-station calls.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::centered_rect;
use crate::api::WorkerPayload;
use crate::i18n::{self, Lang};
use crate::session::{BannerKind, EditSession};
use crate::types::{Station, Worker, WorkerRole};
use crate::ui::form_field::{EntityForm, FormField, FormRow};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Form,
    Assignments,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkerOutcome {
    Save {
        worker_id: Option<String>,
        payload: WorkerPayload,
        /// Full desired assignment set; the owner diffs it against the
        /// server's current set.
        desired: Vec<String>,
    },
    Cancelled,
}

pub struct WorkerForm {
    pub visible: bool,
    pub session: EditSession,
    lang: Lang,
    worker_id: Option<String>,
    form: EntityForm,
    /// Station catalog with a checked flag per row.
    assignments: Vec<(Station, bool)>,
    focus: Focus,
    row: usize,
}

fn blank_form() -> EntityForm {
    EntityForm::new(vec![
        FormRow {
            label_key: "field.name",
            required: true,
            field: FormField::text(""),
        },
        FormRow {
            label_key: "field.badge",
            required: true,
            field: FormField::number(""),
        },
        FormRow {
            label_key: "field.role",
            required: true,
            field: FormField::select(
                WorkerRole::ALL.iter().map(ToString::to_string).collect(),
                0,
            ),
        },
    ])
}

impl WorkerForm {
    pub fn new(lang: Lang) -> Self {
        Self {
            visible: false,
            session: EditSession::new(),
            lang,
            worker_id: None,
            form: blank_form(),
            assignments: Vec::new(),
            focus: Focus::Form,
            row: 0,
        }
    }

    pub fn open_new(&mut self, catalog: Vec<Station>) {
        self.worker_id = None;
        self.form = blank_form();
        self.assignments = catalog.into_iter().map(|s| (s, false)).collect();
        self.focus = Focus::Form;
        self.row = 0;
        self.session.begin_editing();
        self.visible = true;
    }

    /// Open for an existing worker; the caller fetches current assignments
    /// and calls `hydrate_assignments` (or `hide` on fetch failure).
    pub fn open_edit(&mut self, worker: &Worker, catalog: Vec<Station>) {
        self.open_new(catalog);
        self.worker_id = Some(worker.id.clone());
        self.form.rows[0].field.set_value(&worker.name);
        self.form.rows[1].field.set_value(&worker.badge);
        self.form.rows[2].field.set_value(&worker.role.to_string());
        self.session.begin_loading();
    }

    pub fn hydrate_assignments(&mut self, assigned: &[String]) {
        for (station, checked) in &mut self.assignments {
            *checked = assigned.contains(&station.id);
        }
        self.session.loaded();
    }

    pub fn hide(&mut self) {
        self.visible = false;
        self.session.reset();
    }

    pub fn worker_id(&self) -> Option<&str> {
        self.worker_id.as_deref()
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<WorkerOutcome> {
        if !self.visible {
            return None;
        }
        if key.code == KeyCode::Esc {
            self.hide();
            return Some(WorkerOutcome::Cancelled);
        }
        if !self.session.phase().accepts_edits() {
            return None;
        }

        if key.code == KeyCode::Enter {
            return self.submit();
        }

        match self.focus {
            Focus::Form => match key.code {
                KeyCode::Tab if self.form.is_last_field() => {
                    self.focus = Focus::Assignments;
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
            Focus::Assignments => match key.code {
                KeyCode::BackTab | KeyCode::Tab => {
                    self.focus = Focus::Form;
                    None
                }
                KeyCode::Up => {
                    self.row = self.row.saturating_sub(1);
                    None
                }
                KeyCode::Down => {
                    self.row = (self.row + 1).min(self.assignments.len().saturating_sub(1));
                    None
                }
                KeyCode::Char(' ') => {
                    if let Some((_, checked)) = self.assignments.get_mut(self.row) {
                        *checked = !*checked;
                    }
                    None
                }
                _ => None,
            },
        }
    }

    fn submit(&mut self) -> Option<WorkerOutcome> {
        if !self.form.is_valid() {
            let text = i18n::text(self.lang, "validation.required");
            self.session.save_failed(text);
            self.focus = Focus::Form;
            return None;
        }
        let role = WorkerRole::parse(&self.form.value_of("field.role"))
            .unwrap_or(WorkerRole::Operator);
        if !self.session.begin_saving() {
            return None;
        }
        Some(WorkerOutcome::Save {
            worker_id: self.worker_id.clone(),
            payload: WorkerPayload {
                name: self.form.value_of("field.name").trim().to_string(),
                badge: self.form.value_of("field.badge").trim().to_string(),
                role,
            },
            desired: self
                .assignments
                .iter()
                .filter(|(_, checked)| *checked)
                .map(|(station, _)| station.id.clone())
                .collect(),
        })
    }

    pub fn render(&self, frame: &mut Frame) {
        if !self.visible {
            return;
        }
        let lang = self.lang;
        let area = centered_rect(60, 70, frame.area());
        frame.render_widget(Clear, area);

        let title = if self.worker_id.is_some() {
            i18n::text(lang, "action.edit")
        } else {
            i18n::text(lang, "action.new")
        };
        let block = Block::default()
            .title(format!(
                " {} — {} ",
                i18n::text(lang, "screen.workers"),
                title
            ))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Scalar fields
                Constraint::Min(3),    // Assignment list
                Constraint::Length(1), // Banner
            ])
            .margin(1)
            .split(inner);

        let field_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(chunks[0]);
        for (idx, row) in self.form.rows.iter().enumerate() {
            let cols = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Length(18), Constraint::Min(10)])
                .split(field_rows[idx]);
            frame.render_widget(
                Paragraph::new(format!("*{}: ", i18n::text(lang, row.label_key)))
                    .style(Style::default().fg(Color::Gray)),
                cols[0],
            );
            let focused = self.focus == Focus::Form && self.form.focused == idx;
            row.field.render(frame, cols[1], focused);
        }

        self.render_assignments(frame, chunks[1]);

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

    fn render_assignments(&self, frame: &mut Frame, area: ratatui::layout::Rect) {
        let focused_pane = self.focus == Focus::Assignments;
        let block = Block::default()
            .title(format!(" {} ", i18n::text(self.lang, "dialog.assignments")))
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
        for (idx, (station, checked)) in self.assignments.iter().enumerate() {
            let mark = if *checked { "[x]" } else { "[ ]" };
            let style = if focused_pane && idx == self.row && !busy {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            lines.push(Line::from(Span::styled(
                format!("{mark} {} {}", station.code, station.name),
                style,
            )));
        }
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn catalog() -> Vec<Station> {
        vec![
            Station {
                id: "s1".to_string(),
                code: "SAW".to_string(),
                name: "מסור".to_string(),
            },
            Station {
                id: "s2".to_string(),
                code: "CNC".to_string(),
                name: "כרסומת".to_string(),
            },
        ]
    }

    fn worker() -> Worker {
        Worker {
            id: "w1".to_string(),
            name: "Dana".to_string(),
            badge: "1042".to_string(),
            role: WorkerRole::Manager,
        }
    }

    fn type_text(form: &mut WorkerForm, text: &str) {
        for c in text.chars() {
            form.handle_key(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_empty_required_fields_block_save() {
        let mut form = WorkerForm::new(Lang::He);
        form.open_new(catalog());
        assert_eq!(form.handle_key(key(KeyCode::Enter)), None);
        assert_eq!(form.session.banner().unwrap().kind, BannerKind::Error);
    }

    #[test]
    fn test_new_worker_outcome_carries_desired_assignments() {
        let mut form = WorkerForm::new(Lang::He);
        form.open_new(catalog());
        type_text(&mut form, "Dana");
        form.handle_key(key(KeyCode::Tab));
        type_text(&mut form, "1042");
        form.handle_key(key(KeyCode::Tab)); // Role select
        form.handle_key(key(KeyCode::Tab)); // Into assignments
        form.handle_key(key(KeyCode::Down)); // Row s2
        form.handle_key(key(KeyCode::Char(' ')));

        match form.handle_key(key(KeyCode::Enter)) {
            Some(WorkerOutcome::Save {
                worker_id,
                payload,
                desired,
            }) => {
                assert_eq!(worker_id, None);
                assert_eq!(payload.name, "Dana");
                assert_eq!(payload.badge, "1042");
                assert_eq!(payload.role, WorkerRole::Operator);
                assert_eq!(desired, vec!["s2"]);
            }
            other => panic!("expected save outcome, got {other:?}"),
        }
    }

    #[test]
    fn test_edit_hydrates_checkboxes_from_server_set() {
        let mut form = WorkerForm::new(Lang::He);
        form.open_edit(&worker(), catalog());
        // Loading until assignments arrive
        assert_eq!(form.handle_key(key(KeyCode::Char('x'))), None);
        form.hydrate_assignments(&["s1".to_string()]);

        match form.handle_key(key(KeyCode::Enter)) {
            Some(WorkerOutcome::Save {
                worker_id,
                payload,
                desired,
            }) => {
                assert_eq!(worker_id.as_deref(), Some("w1"));
                assert_eq!(payload.role, WorkerRole::Manager);
                assert_eq!(desired, vec!["s1"]);
            }
            other => panic!("expected save outcome, got {other:?}"),
        }
    }

    #[test]
    fn test_toggle_off_removes_from_desired_set() {
        let mut form = WorkerForm::new(Lang::He);
        form.open_edit(&worker(), catalog());
        form.hydrate_assignments(&["s1".to_string(), "s2".to_string()]);
        form.handle_key(key(KeyCode::Tab)); // badge
        form.handle_key(key(KeyCode::Tab)); // role
        form.handle_key(key(KeyCode::Tab)); // assignments
        form.handle_key(key(KeyCode::Char(' '))); // Uncheck s1

        match form.handle_key(key(KeyCode::Enter)) {
            Some(WorkerOutcome::Save { desired, .. }) => {
                assert_eq!(desired, vec!["s2"]);
            }
            other => panic!("expected save outcome, got {other:?}"),
        }
    }

    #[test]
    fn test_badge_field_rejects_letters() {
        let mut form = WorkerForm::new(Lang::He);
        form.open_new(catalog());
        type_text(&mut form, "Dana");
        form.handle_key(key(KeyCode::Tab));
        type_text(&mut form, "10x42");

        match form.handle_key(key(KeyCode::Enter)) {
            Some(WorkerOutcome::Save { payload, .. }) => {
                assert_eq!(payload.badge, "1042");
            }
            other => panic!("expected save outcome, got {other:?}"),
        }
    }

    #[test]
    fn test_escape_cancels() {
        let mut form = WorkerForm::new(Lang::He);
        form.open_new(catalog());
        assert_eq!(
            form.handle_key(key(KeyCode::Esc)),
            Some(WorkerOutcome::Cancelled)
        );
        assert!(!form.visible);
    }
}
