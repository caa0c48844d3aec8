//! Pipeline preset editor: name, ordered steps, and a station catalog.
//!
//! The step list is the working copy; stations are picked from the catalog
//! pane and may appear at most once. The whole ordered list ships in a
//! single save call.

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
use crate::types::{PipelinePreset, PresetStep, Station};
use crate::ui::form_field::FormField;
use crate::validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Name,
    Steps,
    Catalog,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresetOutcome {
    Save {
        preset_id: Option<String>,
        name: String,
        station_ids: Vec<String>,
    },
    Cancelled,
}

pub struct PresetEditor {
    pub visible: bool,
    pub session: EditSession,
    lang: Lang,
    preset_id: Option<String>,
    name: FormField,
    steps: OrderedStore<PresetStep>,
    catalog: Vec<Station>,
    focus: Focus,
    step_row: usize,
    catalog_row: usize,
}

impl PresetEditor {
    pub fn new(lang: Lang) -> Self {
        Self {
            visible: false,
            session: EditSession::new(),
            lang,
            preset_id: None,
            name: FormField::text(""),
            steps: OrderedStore::new(),
            catalog: Vec::new(),
            focus: Focus::Name,
            step_row: 0,
            catalog_row: 0,
        }
    }

    pub fn open_new(&mut self, catalog: Vec<Station>) {
        self.preset_id = None;
        self.name = FormField::text("");
        self.steps = OrderedStore::new();
        self.catalog = catalog;
        self.focus = Focus::Name;
        self.step_row = 0;
        self.catalog_row = 0;
        self.session.begin_editing();
        self.visible = true;
    }

    pub fn open_edit(&mut self, preset: &PipelinePreset, catalog: Vec<Station>) {
        self.preset_id = Some(preset.id.clone());
        self.name = FormField::text(&preset.name);
        self.steps = OrderedStore::new();
        self.steps.hydrate(preset.steps.clone());
        self.catalog = catalog;
        self.focus = Focus::Steps;
        self.step_row = 0;
        self.catalog_row = 0;
        self.session.begin_editing();
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
        self.session.reset();
    }

    pub fn preset_id(&self) -> Option<&str> {
        self.preset_id.as_deref()
    }

    fn clamp_rows(&mut self) {
        self.step_row = self.step_row.min(self.steps.len().saturating_sub(1));
        self.catalog_row = self.catalog_row.min(self.catalog.len().saturating_sub(1));
    }

    fn add_selected_station(&mut self) {
        let Some(station) = self.catalog.get(self.catalog_row) else {
            return;
        };
        // A station appears at most once per preset
        if self.steps.get(&station.id).is_some() {
            return;
        }
        self.steps.push(PresetStep {
            station_id: station.id.clone(),
            station_name: station.name.clone(),
            position: 0, // Renumbered by the store
        });
        self.step_row = self.steps.len() - 1;
    }

    fn remove_selected_step(&mut self) {
        let Some(key) = self
            .steps
            .items()
            .get(self.step_row)
            .map(|s| s.station_id.clone())
        else {
            return;
        };
        let _ = self.steps.remove(&key);
        self.clamp_rows();
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<PresetOutcome> {
        if !self.visible {
            return None;
        }
        if key.code == KeyCode::Esc {
            self.hide();
            return Some(PresetOutcome::Cancelled);
        }
        if !self.session.phase().accepts_edits() {
            return None;
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        if key.code == KeyCode::Tab {
            self.focus = match self.focus {
                Focus::Name => Focus::Steps,
                Focus::Steps => Focus::Catalog,
                Focus::Catalog => Focus::Name,
            };
            return None;
        }

        match self.focus {
            Focus::Name => match key.code {
                KeyCode::Enter => self.submit(),
                code => {
                    self.name.handle_key(code);
                    None
                }
            },
            Focus::Steps => match key.code {
                KeyCode::Up if ctrl => {
                    let row = self.step_row;
                    self.steps.move_step(row, MoveDirection::Up);
                    self.step_row = row.saturating_sub(1);
                    None
                }
                KeyCode::Down if ctrl => {
                    let row = self.step_row;
                    let last = self.steps.len().saturating_sub(1);
                    self.steps.move_step(row, MoveDirection::Down);
                    if row < last {
                        self.step_row = row + 1;
                    }
                    None
                }
                KeyCode::Up => {
                    self.step_row = self.step_row.saturating_sub(1);
                    None
                }
                KeyCode::Down => {
                    self.step_row =
                        (self.step_row + 1).min(self.steps.len().saturating_sub(1));
                    None
                }
                KeyCode::Char('d') if ctrl => {
                    self.remove_selected_step();
                    None
                }
                KeyCode::Delete => {
                    self.remove_selected_step();
                    None
                }
                KeyCode::Enter => self.submit(),
                _ => None,
            },
            Focus::Catalog => match key.code {
                KeyCode::Up => {
                    self.catalog_row = self.catalog_row.saturating_sub(1);
                    None
                }
                KeyCode::Down => {
                    self.catalog_row =
                        (self.catalog_row + 1).min(self.catalog.len().saturating_sub(1));
                    None
                }
                KeyCode::Enter | KeyCode::Char(' ') => {
                    self.add_selected_station();
                    None
                }
                _ => None,
            },
        }
    }

    fn submit(&mut self) -> Option<PresetOutcome> {
        let name = self.name.value();
        match validate::validate_preset(&name, self.steps.items()) {
            Err(err) => {
                let text = i18n::text(self.lang, err.message_key());
                self.session.save_failed(text);
                None
            }
            Ok(()) => {
                if !self.session.begin_saving() {
                    return None;
                }
                Some(PresetOutcome::Save {
                    preset_id: self.preset_id.clone(),
                    name: name.trim().to_string(),
                    station_ids: self.steps.keys_in_order(),
                })
            }
        }
    }

    pub fn render(&self, frame: &mut Frame) {
        if !self.visible {
            return;
        }
        let lang = self.lang;
        let area = centered_rect(75, 75, frame.area());
        frame.render_widget(Clear, area);

        let title = if self.preset_id.is_some() {
            i18n::text(lang, "action.edit")
        } else {
            i18n::text(lang, "action.new")
        };
        let block = Block::default()
            .title(format!(" {} — {} ", i18n::text(lang, "screen.presets"), title))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Name row
                Constraint::Min(4),    // Steps + catalog
                Constraint::Length(1), // Banner
            ])
            .margin(1)
            .split(inner);

        let name_label = Span::styled(
            format!("{}: ", i18n::text(lang, "field.name")),
            Style::default().fg(Color::Gray),
        );
        let name_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(14), Constraint::Min(10)])
            .split(chunks[0]);
        frame.render_widget(Paragraph::new(Line::from(name_label)), name_chunks[0]);
        self.name
            .render(frame, name_chunks[1], self.focus == Focus::Name);

        let panes = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(chunks[1]);

        self.render_steps(frame, panes[0]);
        self.render_catalog(frame, panes[1]);

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

    fn render_steps(&self, frame: &mut Frame, area: ratatui::layout::Rect) {
        let focused = self.focus == Focus::Steps;
        let block = Block::default()
            .title(format!(" {} ", i18n::text(self.lang, "screen.stations")))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(if focused {
                Color::Cyan
            } else {
                Color::DarkGray
            }));
        let lines: Vec<Line> = self
            .steps
            .items()
            .iter()
            .enumerate()
            .map(|(idx, step)| {
                let style = if focused && idx == self.step_row {
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::Cyan)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::White)
                };
                Line::from(Span::styled(
                    format!("{:>2}. {}", step.position + 1, step.station_name),
                    style,
                ))
            })
            .collect();
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn render_catalog(&self, frame: &mut Frame, area: ratatui::layout::Rect) {
        let focused = self.focus == Focus::Catalog;
        let block = Block::default()
            .title(" + ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(if focused {
                Color::Cyan
            } else {
                Color::DarkGray
            }));
        let lines: Vec<Line> = self
            .catalog
            .iter()
            .enumerate()
            .map(|(idx, station)| {
                let in_use = self.steps.get(&station.id).is_some();
                let style = if focused && idx == self.catalog_row {
                    Style::default().fg(Color::Black).bg(Color::Cyan)
                } else if in_use {
                    Style::default().fg(Color::DarkGray)
                } else {
                    Style::default().fg(Color::White)
                };
                Line::from(Span::styled(
                    format!("{} {}", station.code, station.name),
                    style,
                ))
            })
            .collect();
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}
