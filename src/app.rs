//! The console application: four entity screens, one modal dialog at a
//! time, and all network calls. Dialogs are synchronous state machines;
//! their save outcomes are executed here and reported back into their
//! edit sessions.

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame, Terminal,
};
use std::io;
use std::time::Duration;

use crate::api::{
    ApiError, AssignmentDiff, Client, NewStation, StationUpdate,
};
use crate::config::Config;
use crate::i18n::{self, Lang};
use crate::session::BannerKind;
use crate::types::{Job, PipelinePreset, Station, Worker};
use crate::ui::dialogs::{
    ChecklistEditor, ChecklistOutcome, ConfirmDeleteDialog, DeleteOutcome, DeleteTarget, JobForm,
    JobOutcome, PresetEditor, PresetOutcome, StationForm, StationOutcome, WorkerForm,
    WorkerOutcome,
};
use crate::ui::EntityTable;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Stations,
    Workers,
    Presets,
    Jobs,
}

impl Screen {
    const ALL: [Screen; 4] = [
        Screen::Stations,
        Screen::Workers,
        Screen::Presets,
        Screen::Jobs,
    ];

    fn title_key(self) -> &'static str {
        match self {
            Screen::Stations => "screen.stations",
            Screen::Workers => "screen.workers",
            Screen::Presets => "screen.presets",
            Screen::Jobs => "screen.jobs",
        }
    }
}

pub struct App {
    config: Config,
    lang: Lang,
    client: Client,
    screen: Screen,

    stations: Vec<Station>,
    workers: Vec<Worker>,
    presets: Vec<PipelinePreset>,
    jobs: Vec<Job>,

    stations_table: EntityTable,
    workers_table: EntityTable,
    presets_table: EntityTable,
    jobs_table: EntityTable,

    station_form: StationForm,
    worker_form: WorkerForm,
    preset_editor: PresetEditor,
    checklist_editor: ChecklistEditor,
    job_form: JobForm,
    confirm_delete: ConfirmDeleteDialog,

    /// Status line under the table (refresh errors, delete rejections).
    status: Option<(BannerKind, String)>,
    should_quit: bool,
}

impl App {
    pub fn new(config: Config) -> Result<Self> {
        let lang = config.ui.language;
        let client = Client::new(&config.server)?;
        let page = config.ui.page_size;

        let headers = |keys: &[&str]| -> Vec<String> {
            keys.iter().map(|k| i18n::text(lang, k).to_string()).collect()
        };

        Ok(Self {
            config,
            lang,
            client,
            screen: Screen::Stations,
            stations: Vec::new(),
            workers: Vec::new(),
            presets: Vec::new(),
            jobs: Vec::new(),
            stations_table: EntityTable::new(headers(&["field.code", "field.name"]), page),
            workers_table: EntityTable::new(
                headers(&["field.name", "field.badge", "field.role"]),
                page,
            ),
            presets_table: EntityTable::new(headers(&["field.name"]), page),
            jobs_table: EntityTable::new(
                headers(&["field.number", "field.product", "field.quantity", "field.status"]),
                page,
            ),
            station_form: StationForm::new(lang),
            worker_form: WorkerForm::new(lang),
            preset_editor: PresetEditor::new(lang),
            checklist_editor: ChecklistEditor::new(lang),
            job_form: JobForm::new(lang),
            confirm_delete: ConfirmDeleteDialog::new(lang),
            status: None,
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        self.refresh_all().await;

        let tick_rate = Duration::from_millis(self.config.ui.refresh_rate_ms);
        while !self.should_quit {
            terminal.draw(|f| self.render(f))?;

            if event::poll(tick_rate)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key).await;
                    }
                }
            }
        }

        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;
        Ok(())
    }

    fn dialog_open(&self) -> bool {
        self.station_form.visible
            || self.worker_form.visible
            || self.preset_editor.visible
            || self.checklist_editor.visible
            || self.job_form.visible
            || self.confirm_delete.visible
    }

    fn error_text(&self, err: &ApiError) -> String {
        match err.domain_code() {
            Some(code) => i18n::code_message(self.lang, code).to_string(),
            None => {
                tracing::error!(%err, "request failed");
                i18n::code_message(self.lang, "UNKNOWN").to_string()
            }
        }
    }

    fn set_status(&mut self, kind: BannerKind, text: impl Into<String>) {
        self.status = Some((kind, text.into()));
    }

    // ---- data refresh ----------------------------------------------------

    async fn refresh_all(&mut self) {
        self.refresh_stations().await;
        self.refresh_workers().await;
        self.refresh_presets().await;
        self.refresh_jobs().await;
    }

    async fn refresh_current(&mut self) {
        match self.screen {
            Screen::Stations => self.refresh_stations().await,
            Screen::Workers => self.refresh_workers().await,
            Screen::Presets => self.refresh_presets().await,
            Screen::Jobs => self.refresh_jobs().await,
        }
    }

    async fn refresh_stations(&mut self) {
        match self.client.list_stations().await {
            Ok(stations) => {
                self.stations_table.set_rows(
                    stations
                        .iter()
                        .map(|s| (s.id.clone(), vec![s.code.clone(), s.name.clone()]))
                        .collect(),
                );
                self.stations = stations;
            }
            Err(err) => {
                let text = self.error_text(&err);
                self.set_status(BannerKind::Error, text);
            }
        }
    }

    async fn refresh_workers(&mut self) {
        match self.client.list_workers().await {
            Ok(workers) => {
                self.workers_table.set_rows(
                    workers
                        .iter()
                        .map(|w| {
                            (
                                w.id.clone(),
                                vec![w.name.clone(), w.badge.clone(), w.role.to_string()],
                            )
                        })
                        .collect(),
                );
                self.workers = workers;
            }
            Err(err) => {
                let text = self.error_text(&err);
                self.set_status(BannerKind::Error, text);
            }
        }
    }

    async fn refresh_presets(&mut self) {
        match self.client.list_presets().await {
            Ok(presets) => {
                self.presets_table.set_rows(
                    presets
                        .iter()
                        .map(|p| (p.id.clone(), vec![p.name.clone()]))
                        .collect(),
                );
                self.presets = presets;
            }
            Err(err) => {
                let text = self.error_text(&err);
                self.set_status(BannerKind::Error, text);
            }
        }
    }

    async fn refresh_jobs(&mut self) {
        match self.client.list_jobs().await {
            Ok(jobs) => {
                self.jobs_table.set_rows(
                    jobs.iter()
                        .map(|j| {
                            (
                                j.id.clone(),
                                vec![
                                    j.number.clone(),
                                    j.product.clone(),
                                    j.quantity.to_string(),
                                    j.status.to_string(),
                                ],
                            )
                        })
                        .collect(),
                );
                self.jobs = jobs;
            }
            Err(err) => {
                let text = self.error_text(&err);
                self.set_status(BannerKind::Error, text);
            }
        }
    }

    // ---- key handling ----------------------------------------------------

    async fn handle_key(&mut self, key: KeyEvent) {
        if self.dialog_open() {
            self.handle_dialog_key(key).await;
            return;
        }

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('1') => self.screen = Screen::Stations,
            KeyCode::Char('2') => self.screen = Screen::Workers,
            KeyCode::Char('3') => self.screen = Screen::Presets,
            KeyCode::Char('4') => self.screen = Screen::Jobs,
            KeyCode::Tab => {
                let idx = Screen::ALL.iter().position(|s| *s == self.screen).unwrap_or(0);
                self.screen = Screen::ALL[(idx + 1) % Screen::ALL.len()];
            }
            KeyCode::Char('r') => {
                self.status = None;
                self.refresh_current().await;
            }
            KeyCode::Char('n') => self.open_new_dialog(),
            KeyCode::Char('e') | KeyCode::Enter => self.open_edit_dialog().await,
            KeyCode::Char('c') if self.screen == Screen::Stations => {
                self.open_checklists().await;
            }
            KeyCode::Char('d') | KeyCode::Delete => self.open_delete_dialog().await,
            code => {
                self.current_table_mut().handle_key(code);
            }
        }
    }

    fn current_table_mut(&mut self) -> &mut EntityTable {
        match self.screen {
            Screen::Stations => &mut self.stations_table,
            Screen::Workers => &mut self.workers_table,
            Screen::Presets => &mut self.presets_table,
            Screen::Jobs => &mut self.jobs_table,
        }
    }

    fn open_new_dialog(&mut self) {
        self.status = None;
        match self.screen {
            Screen::Stations => self.station_form.open_new(),
            Screen::Workers => self.worker_form.open_new(self.stations.clone()),
            Screen::Presets => self.preset_editor.open_new(self.stations.clone()),
            Screen::Jobs => self.job_form.open_new(),
        }
    }

    async fn open_edit_dialog(&mut self) {
        self.status = None;
        match self.screen {
            Screen::Stations => {
                let Some(station) = self.selected_station().cloned() else {
                    return;
                };
                self.station_form.open_edit(&station);
                match self.client.fetch_reasons(&station.id).await {
                    Ok(reasons) => self.station_form.hydrate_reasons(reasons),
                    Err(err) => {
                        self.station_form.hide();
                        let text = self.error_text(&err);
                        self.set_status(BannerKind::Error, text);
                    }
                }
            }
            Screen::Workers => {
                let Some(worker) = self.selected_worker().cloned() else {
                    return;
                };
                self.worker_form.open_edit(&worker, self.stations.clone());
                match self.client.worker_assignments(&worker.id).await {
                    Ok(assigned) => self.worker_form.hydrate_assignments(&assigned),
                    Err(err) => {
                        self.worker_form.hide();
                        let text = self.error_text(&err);
                        self.set_status(BannerKind::Error, text);
                    }
                }
            }
            Screen::Presets => {
                let Some(preset) = self.selected_preset().cloned() else {
                    return;
                };
                self.preset_editor.open_edit(&preset, self.stations.clone());
            }
            Screen::Jobs => {
                let Some(job) = self.selected_job().cloned() else {
                    return;
                };
                self.job_form.open_edit(&job);
            }
        }
    }

    async fn open_checklists(&mut self) {
        let Some(station) = self.selected_station().cloned() else {
            return;
        };
        self.status = None;
        self.checklist_editor.open(&station.id, &station.name);
        match self.client.fetch_checklists(&station.id).await {
            Ok((start, end)) => self.checklist_editor.hydrate(start, end),
            Err(err) => {
                self.checklist_editor.hide();
                let text = self.error_text(&err);
                self.set_status(BannerKind::Error, text);
            }
        }
    }

    async fn open_delete_dialog(&mut self) {
        self.status = None;
        match self.screen {
            Screen::Stations => {
                let Some(station) = self.selected_station().cloned() else {
                    return;
                };
                self.confirm_delete
                    .show(DeleteTarget::Station, &station.id, &station.name);
                let result = self.client.station_active_session(&station.id).await;
                self.confirm_delete.set_session_result(result);
            }
            Screen::Workers => {
                let Some(worker) = self.selected_worker().cloned() else {
                    return;
                };
                self.confirm_delete
                    .show(DeleteTarget::Worker, &worker.id, &worker.name);
                let result = self.client.worker_active_session(&worker.id).await;
                self.confirm_delete.set_session_result(result);
            }
            Screen::Presets => {
                let Some(preset) = self.selected_preset().cloned() else {
                    return;
                };
                self.confirm_delete
                    .show_unchecked(DeleteTarget::Preset, &preset.id, &preset.name);
            }
            Screen::Jobs => {
                let Some(job) = self.selected_job().cloned() else {
                    return;
                };
                self.confirm_delete
                    .show(DeleteTarget::Job, &job.id, &job.number);
                let result = self.client.job_active_session(&job.id).await;
                self.confirm_delete.set_session_result(result);
            }
        }
    }

    fn selected_station(&self) -> Option<&Station> {
        let id = self.stations_table.selected_id()?;
        self.stations.iter().find(|s| s.id == id)
    }

    fn selected_worker(&self) -> Option<&Worker> {
        let id = self.workers_table.selected_id()?;
        self.workers.iter().find(|w| w.id == id)
    }

    fn selected_preset(&self) -> Option<&PipelinePreset> {
        let id = self.presets_table.selected_id()?;
        self.presets.iter().find(|p| p.id == id)
    }

    fn selected_job(&self) -> Option<&Job> {
        let id = self.jobs_table.selected_id()?;
        self.jobs.iter().find(|j| j.id == id)
    }

    // ---- dialog outcomes -------------------------------------------------

    async fn handle_dialog_key(&mut self, key: KeyEvent) {
        if self.confirm_delete.visible {
            if let Some(outcome) = self.confirm_delete.handle_key(key) {
                self.apply_delete(outcome).await;
            }
            return;
        }
        if self.station_form.visible {
            if let Some(outcome) = self.station_form.handle_key(key) {
                self.apply_station(outcome).await;
            }
            return;
        }
        if self.worker_form.visible {
            if let Some(outcome) = self.worker_form.handle_key(key) {
                self.apply_worker(outcome).await;
            }
            return;
        }
        if self.preset_editor.visible {
            if let Some(outcome) = self.preset_editor.handle_key(key) {
                self.apply_preset(outcome).await;
            }
            return;
        }
        if self.checklist_editor.visible {
            if let Some(outcome) = self.checklist_editor.handle_key(key) {
                self.apply_checklists(outcome).await;
            }
            return;
        }
        if self.job_form.visible {
            if let Some(outcome) = self.job_form.handle_key(key) {
                self.apply_job(outcome).await;
            }
        }
    }

    async fn apply_delete(&mut self, outcome: DeleteOutcome) {
        let DeleteOutcome::Confirmed { target, id } = outcome else {
            return;
        };
        let result = match target {
            DeleteTarget::Station => self.client.delete_station(&id).await,
            DeleteTarget::Worker => self.client.delete_worker(&id).await,
            DeleteTarget::Preset => self.client.delete_preset(&id).await,
            DeleteTarget::Job => self.client.delete_job(&id).await,
        };
        match result {
            Ok(()) => {
                self.set_status(BannerKind::Success, i18n::text(self.lang, "status.saved"));
                self.refresh_current().await;
            }
            Err(err) => {
                let text = self.error_text(&err);
                self.set_status(BannerKind::Error, text);
            }
        }
    }

    async fn apply_station(&mut self, outcome: StationOutcome) {
        let StationOutcome::Save {
            station_id,
            code,
            name,
            reasons,
        } = outcome
        else {
            return;
        };

        let is_edit = station_id.is_some();
        let saved = match station_id {
            None => {
                self.client
                    .create_station(&NewStation {
                        code: code.clone(),
                        name: name.clone(),
                    })
                    .await
                    .map(|created| created.id)
            }
            Some(id) => self
                .client
                .update_station(&id, &StationUpdate { code, name })
                .await
                .map(|()| id),
        };
        let id = match saved {
            Ok(id) => id,
            Err(err) => {
                let text = self.error_text(&err);
                self.station_form.session.save_failed(text);
                return;
            }
        };

        if let Err(err) = self.client.save_reasons(&id, &reasons).await {
            let text = self.error_text(&err);
            self.station_form.session.save_failed(text);
            return;
        }

        // Create closes the dialog; edit stays open for further changes
        if is_edit {
            self.station_form
                .session
                .save_succeeded_editing(i18n::text(self.lang, "status.saved"));
        } else {
            self.station_form.hide();
            self.set_status(BannerKind::Success, i18n::text(self.lang, "status.saved"));
        }
        self.refresh_stations().await;
    }

    async fn apply_worker(&mut self, outcome: WorkerOutcome) {
        let WorkerOutcome::Save {
            worker_id,
            payload,
            desired,
        } = outcome
        else {
            return;
        };

        let is_edit = worker_id.is_some();
        let saved = match worker_id {
            None => self.client.create_worker(&payload).await.map(|w| w.id),
            Some(id) => self.client.update_worker(&id, &payload).await.map(|()| id),
        };
        let id = match saved {
            Ok(id) => id,
            Err(err) => {
                let text = self.error_text(&err);
                self.worker_form.session.save_failed(text);
                return;
            }
        };

        let current = match self.client.worker_assignments(&id).await {
            Ok(current) => current,
            Err(err) => {
                let text = self.error_text(&err);
                self.worker_form.session.save_failed(text);
                return;
            }
        };

        let diff = AssignmentDiff::compute(&current, &desired);
        if !diff.is_empty() {
            let report = self.client.reconcile_assignments(&id, &diff).await;
            if !report.all_succeeded() {
                // Partial state stands on the server; the user retries from
                // a fresh fetch on the next edit.
                let text = report
                    .first_error()
                    .map(|err| self.error_text(err))
                    .unwrap_or_default();
                self.worker_form.session.save_failed(text);
                return;
            }
        }

        if is_edit {
            self.worker_form
                .session
                .save_succeeded_editing(i18n::text(self.lang, "status.saved"));
        } else {
            self.worker_form.hide();
            self.set_status(BannerKind::Success, i18n::text(self.lang, "status.saved"));
        }
        self.refresh_workers().await;
    }

    async fn apply_preset(&mut self, outcome: PresetOutcome) {
        let PresetOutcome::Save {
            preset_id,
            name,
            station_ids,
        } = outcome
        else {
            return;
        };

        let is_edit = preset_id.is_some();
        let saved = match preset_id {
            None => self.client.create_preset(&name).await.map(|p| p.id),
            Some(id) => self.client.rename_preset(&id, &name).await.map(|()| id),
        };
        let id = match saved {
            Ok(id) => id,
            Err(err) => {
                let text = self.error_text(&err);
                self.preset_editor.session.save_failed(text);
                return;
            }
        };

        if let Err(err) = self.client.save_preset_steps(&id, &station_ids, None).await {
            let text = self.error_text(&err);
            self.preset_editor.session.save_failed(text);
            return;
        }

        if is_edit {
            self.preset_editor
                .session
                .save_succeeded_editing(i18n::text(self.lang, "status.saved"));
        } else {
            self.preset_editor.hide();
            self.set_status(BannerKind::Success, i18n::text(self.lang, "status.saved"));
        }
        self.refresh_presets().await;
    }

    async fn apply_checklists(&mut self, outcome: ChecklistOutcome) {
        let ChecklistOutcome::Save {
            station_id,
            start,
            end,
        } = outcome
        else {
            return;
        };

        match self.client.save_checklists(&station_id, &start, &end).await {
            Ok(()) => {
                // Checklists are always edited on an existing station; the
                // editor stays open for further changes
                self.checklist_editor
                    .session
                    .save_succeeded_editing(i18n::text(self.lang, "status.saved"));
            }
            Err(err) => {
                let text = self.error_text(&err);
                self.checklist_editor.session.save_failed(text);
            }
        }
    }

    async fn apply_job(&mut self, outcome: JobOutcome) {
        let JobOutcome::Save { job_id, payload } = outcome else {
            return;
        };

        let is_edit = job_id.is_some();
        let result = match job_id {
            None => self.client.create_job(&payload).await.map(|_| ()),
            Some(id) => self.client.update_job(&id, &payload).await,
        };
        match result {
            Ok(()) => {
                if is_edit {
                    self.job_form
                        .session
                        .save_succeeded_editing(i18n::text(self.lang, "status.saved"));
                } else {
                    self.job_form.hide();
                    self.set_status(BannerKind::Success, i18n::text(self.lang, "status.saved"));
                }
                self.refresh_jobs().await;
            }
            Err(err) => {
                let text = self.error_text(&err);
                self.job_form.session.save_failed(text);
            }
        }
    }

    // ---- rendering -------------------------------------------------------

    fn render(&mut self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Screen tabs
                Constraint::Min(5),    // Table
                Constraint::Length(1), // Status line
                Constraint::Length(1), // Key hints
            ])
            .split(frame.area());

        let lang = self.lang;
        let mut tabs = Vec::new();
        for (idx, screen) in Screen::ALL.iter().enumerate() {
            if idx > 0 {
                tabs.push(Span::raw("  "));
            }
            let style = if *screen == self.screen {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
            } else {
                Style::default().fg(Color::Gray)
            };
            tabs.push(Span::styled(
                format!("{} {}", idx + 1, i18n::text(lang, screen.title_key())),
                style,
            ));
        }
        frame.render_widget(Paragraph::new(Line::from(tabs)), chunks[0]);

        let title = i18n::text(lang, self.screen.title_key()).to_string();
        let focused = !self.dialog_open();
        match self.screen {
            Screen::Stations => self.stations_table.render(frame, chunks[1], &title, focused),
            Screen::Workers => self.workers_table.render(frame, chunks[1], &title, focused),
            Screen::Presets => self.presets_table.render(frame, chunks[1], &title, focused),
            Screen::Jobs => self.jobs_table.render(frame, chunks[1], &title, focused),
        }

        if let Some((kind, text)) = &self.status {
            let color = match kind {
                BannerKind::Error => Color::Red,
                BannerKind::Success => Color::Green,
                BannerKind::Info => Color::Yellow,
            };
            frame.render_widget(
                Paragraph::new(Span::styled(text.clone(), Style::default().fg(color))),
                chunks[2],
            );
        }

        let mut hints = format!(
            "n {}  e {}  d {}  r {}  q ✕",
            i18n::text(lang, "action.new"),
            i18n::text(lang, "action.edit"),
            i18n::text(lang, "action.delete"),
            i18n::text(lang, "action.refresh"),
        );
        if self.screen == Screen::Stations {
            hints.push_str(&format!("  c {}", i18n::text(lang, "dialog.checklist_start")));
        }
        frame.render_widget(
            Paragraph::new(Span::styled(hints, Style::default().fg(Color::DarkGray))),
            chunks[3],
        );

        self.station_form.render(frame);
        self.worker_form.render(frame);
        self.preset_editor.render(frame);
        self.checklist_editor.render(frame);
        self.job_form.render(frame);
        self.confirm_delete.render(frame);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_tab_order_wraps() {
        let idx = Screen::ALL
            .iter()
            .position(|s| *s == Screen::Jobs)
            .unwrap();
        assert_eq!(Screen::ALL[(idx + 1) % Screen::ALL.len()], Screen::Stations);
    }

    #[test]
    fn test_app_builds_from_default_config() {
        let app = App::new(Config::default()).unwrap();
        assert_eq!(app.screen, Screen::Stations);
        assert!(!app.dialog_open());
    }
}
