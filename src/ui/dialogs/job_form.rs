//! Production-job create/edit form.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    text::Span,
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::centered_rect;
use crate::api::JobPayload;
use crate::i18n::{self, Lang};
use crate::session::{BannerKind, EditSession};
use crate::types::{Job, JobStatus};
use crate::ui::form_field::{EntityForm, FormField, FormRow};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobOutcome {
    Save {
        job_id: Option<String>,
        payload: JobPayload,
    },
    Cancelled,
}

pub struct JobForm {
    pub visible: bool,
    pub session: EditSession,
    lang: Lang,
    job_id: Option<String>,
    form: EntityForm,
}

fn blank_form() -> EntityForm {
    EntityForm::new(vec![
        FormRow {
            label_key: "field.number",
            required: true,
            field: FormField::text(""),
        },
        FormRow {
            label_key: "field.product",
            required: true,
            field: FormField::text(""),
        },
        FormRow {
            label_key: "field.quantity",
            required: true,
            field: FormField::number(""),
        },
        FormRow {
            label_key: "field.status",
            required: true,
            field: FormField::select(
                JobStatus::ALL.iter().map(ToString::to_string).collect(),
                0,
            ),
        },
    ])
}

impl JobForm {
    pub fn new(lang: Lang) -> Self {
        Self {
            visible: false,
            session: EditSession::new(),
            lang,
            job_id: None,
            form: blank_form(),
        }
    }

    pub fn open_new(&mut self) {
        self.job_id = None;
        self.form = blank_form();
        self.session.begin_editing();
        self.visible = true;
    }

    pub fn open_edit(&mut self, job: &Job) {
        self.open_new();
        self.job_id = Some(job.id.clone());
        self.form.rows[0].field.set_value(&job.number);
        self.form.rows[1].field.set_value(&job.product);
        self.form.rows[2].field.set_value(&job.quantity.to_string());
        self.form.rows[3].field.set_value(&job.status.to_string());
    }

    pub fn hide(&mut self) {
        self.visible = false;
        self.session.reset();
    }

    pub fn job_id(&self) -> Option<&str> {
        self.job_id.as_deref()
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<JobOutcome> {
        if !self.visible {
            return None;
        }
        if key.code == KeyCode::Esc {
            self.hide();
            return Some(JobOutcome::Cancelled);
        }
        if !self.session.phase().accepts_edits() {
            return None;
        }
        match key.code {
            KeyCode::Enter => self.submit(),
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
        }
    }

    fn submit(&mut self) -> Option<JobOutcome> {
        if !self.form.is_valid() {
            let text = i18n::text(self.lang, "validation.required");
            self.session.save_failed(text);
            return None;
        }
        let quantity: u32 = match self.form.value_of("field.quantity").trim().parse() {
            Ok(q) => q,
            Err(_) => {
                let text = i18n::text(self.lang, "validation.required");
                self.session.save_failed(text);
                return None;
            }
        };
        let status = JobStatus::parse(&self.form.value_of("field.status"))
            .unwrap_or(JobStatus::Open);
        if !self.session.begin_saving() {
            return None;
        }
        Some(JobOutcome::Save {
            job_id: self.job_id.clone(),
            payload: JobPayload {
                number: self.form.value_of("field.number").trim().to_string(),
                product: self.form.value_of("field.product").trim().to_string(),
                quantity,
                status,
            },
        })
    }

    pub fn render(&self, frame: &mut Frame) {
        if !self.visible {
            return;
        }
        let lang = self.lang;
        let area = centered_rect(50, 45, frame.area());
        frame.render_widget(Clear, area);

        let title = if self.job_id.is_some() {
            i18n::text(lang, "action.edit")
        } else {
            i18n::text(lang, "action.new")
        };
        let block = Block::default()
            .title(format!(" {} — {} ", i18n::text(lang, "screen.jobs"), title))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1), // Banner
            ])
            .margin(1)
            .split(inner);

        for (idx, row) in self.form.rows.iter().enumerate() {
            let cols = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Length(18), Constraint::Min(10)])
                .split(chunks[idx]);
            frame.render_widget(
                Paragraph::new(format!("*{}: ", i18n::text(lang, row.label_key)))
                    .style(Style::default().fg(Color::Gray)),
                cols[0],
            );
            row.field.render(frame, cols[1], self.form.focused == idx);
        }

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
                chunks[4],
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(form: &mut JobForm, text: &str) {
        for c in text.chars() {
            form.handle_key(key(KeyCode::Char(c)));
        }
    }

    fn job() -> Job {
        Job {
            id: "j1".to_string(),
            number: "WO-7731".to_string(),
            product: "bracket".to_string(),
            quantity: 250,
            status: JobStatus::InProgress,
        }
    }

    #[test]
    fn test_empty_form_blocks_save() {
        let mut form = JobForm::new(Lang::He);
        form.open_new();
        assert_eq!(form.handle_key(key(KeyCode::Enter)), None);
        assert_eq!(form.session.banner().unwrap().kind, BannerKind::Error);
    }

    #[test]
    fn test_new_job_save_payload() {
        let mut form = JobForm::new(Lang::He);
        form.open_new();
        type_text(&mut form, "WO-8001");
        form.handle_key(key(KeyCode::Tab));
        type_text(&mut form, "flange");
        form.handle_key(key(KeyCode::Tab));
        type_text(&mut form, "120");

        match form.handle_key(key(KeyCode::Enter)) {
            Some(JobOutcome::Save { job_id, payload }) => {
                assert_eq!(job_id, None);
                assert_eq!(payload.number, "WO-8001");
                assert_eq!(payload.quantity, 120);
                assert_eq!(payload.status, JobStatus::Open);
            }
            other => panic!("expected save outcome, got {other:?}"),
        }
    }

    #[test]
    fn test_edit_prefills_and_keeps_id() {
        let mut form = JobForm::new(Lang::Ru);
        form.open_edit(&job());

        match form.handle_key(key(KeyCode::Enter)) {
            Some(JobOutcome::Save { job_id, payload }) => {
                assert_eq!(job_id.as_deref(), Some("j1"));
                assert_eq!(payload.number, "WO-7731");
                assert_eq!(payload.quantity, 250);
                assert_eq!(payload.status, JobStatus::InProgress);
            }
            other => panic!("expected save outcome, got {other:?}"),
        }
    }

    #[test]
    fn test_status_select_cycles_through_all() {
        let mut form = JobForm::new(Lang::He);
        form.open_edit(&job());
        form.handle_key(key(KeyCode::Tab));
        form.handle_key(key(KeyCode::Tab));
        form.handle_key(key(KeyCode::Tab)); // Status field
        form.handle_key(key(KeyCode::Right)); // in_progress -> done

        match form.handle_key(key(KeyCode::Enter)) {
            Some(JobOutcome::Save { payload, .. }) => {
                assert_eq!(payload.status, JobStatus::Done);
            }
            other => panic!("expected save outcome, got {other:?}"),
        }
    }

    #[test]
    fn test_saving_blocks_further_edits() {
        let mut form = JobForm::new(Lang::He);
        form.open_edit(&job());
        assert!(form.handle_key(key(KeyCode::Enter)).is_some());
        assert_eq!(form.handle_key(key(KeyCode::Char('x'))), None);
    }

    #[test]
    fn test_escape_cancels() {
        let mut form = JobForm::new(Lang::He);
        form.open_new();
        assert_eq!(form.handle_key(key(KeyCode::Esc)), Some(JobOutcome::Cancelled));
        assert!(!form.visible);
    }
}
