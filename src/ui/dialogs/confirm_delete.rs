//! Delete confirmation dialog with the advisory active-session gate.
//!
//! On open the dialog waits for the backend's session answer; while the
//! answer is pending, failed, or positive, the confirm action stays
//! disabled and no delete call can be issued. The check is advisory: the
//! delete itself may still come back with a domain code.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::centered_rect;
use crate::api::ApiError;
use crate::i18n::{self, Lang};
use crate::types::ActiveSession;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteTarget {
    Station,
    Worker,
    Preset,
    Job,
}

/// Progress of the advisory session lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCheck {
    /// Answer not yet received; confirm disabled.
    Checking,
    /// No blocking session; confirm enabled.
    Clear,
    /// A session is active; confirm disabled.
    Blocked { worker: Option<String> },
    /// Lookup failed; treated like blocked (fail closed).
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Selection {
    Confirm,
    Cancel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    Confirmed { target: DeleteTarget, id: String },
    Cancelled,
}

pub struct ConfirmDeleteDialog {
    pub visible: bool,
    lang: Lang,
    target: Option<(DeleteTarget, String, String)>,
    session: SessionCheck,
    selection: Selection,
}

impl ConfirmDeleteDialog {
    pub fn new(lang: Lang) -> Self {
        Self {
            visible: false,
            lang,
            target: None,
            session: SessionCheck::Checking,
            selection: Selection::Cancel,
        }
    }

    /// Open for a target that has an active-session endpoint. The caller
    /// fires the lookup and reports back via `set_session_result`.
    pub fn show(&mut self, target: DeleteTarget, id: &str, label: &str) {
        self.target = Some((target, id.to_string(), label.to_string()));
        self.session = SessionCheck::Checking;
        self.selection = Selection::Cancel; // Safe default
        self.visible = true;
    }

    /// Open for a target with no session endpoint (presets); the backend's
    /// in-use rejection is the only guard.
    pub fn show_unchecked(&mut self, target: DeleteTarget, id: &str, label: &str) {
        self.show(target, id, label);
        self.session = SessionCheck::Clear;
    }

    pub fn hide(&mut self) {
        self.visible = false;
        self.target = None;
    }

    pub fn set_session_result(&mut self, result: Result<ActiveSession, ApiError>) {
        self.session = match result {
            Ok(session) if session.has_active_session => SessionCheck::Blocked {
                worker: session.worker_name,
            },
            Ok(_) => SessionCheck::Clear,
            Err(err) => {
                tracing::warn!(%err, "active-session check failed");
                SessionCheck::Failed
            }
        };
    }

    pub fn session(&self) -> &SessionCheck {
        &self.session
    }

    /// Deletion is only offered when the advisory answer came back clear.
    pub fn can_confirm(&self) -> bool {
        self.session == SessionCheck::Clear
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<DeleteOutcome> {
        if !self.visible {
            return None;
        }
        match key.code {
            KeyCode::Esc | KeyCode::Char('n') => {
                self.hide();
                Some(DeleteOutcome::Cancelled)
            }
            KeyCode::Left | KeyCode::Right | KeyCode::Tab => {
                self.selection = match self.selection {
                    Selection::Confirm => Selection::Cancel,
                    Selection::Cancel if self.can_confirm() => Selection::Confirm,
                    Selection::Cancel => Selection::Cancel,
                };
                None
            }
            KeyCode::Char('y') if self.can_confirm() => self.confirm(),
            KeyCode::Enter => match self.selection {
                Selection::Confirm if self.can_confirm() => self.confirm(),
                Selection::Confirm => None,
                Selection::Cancel => {
                    self.hide();
                    Some(DeleteOutcome::Cancelled)
                }
            },
            _ => None,
        }
    }

    fn confirm(&mut self) -> Option<DeleteOutcome> {
        let (target, id, _) = self.target.clone()?;
        self.hide();
        Some(DeleteOutcome::Confirmed { target, id })
    }

    pub fn render(&self, frame: &mut Frame) {
        if !self.visible {
            return;
        }
        let Some((_, _, label)) = &self.target else {
            return;
        };
        let lang = self.lang;

        let area = centered_rect(50, 30, frame.area());
        frame.render_widget(Clear, area);

        let block = Block::default()
            .title(format!(" {} ", i18n::text(lang, "dialog.delete_title")))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // Target label
                Constraint::Min(2),    // Session status
                Constraint::Length(1), // Buttons
            ])
            .margin(1)
            .split(inner);

        let name = Paragraph::new(label.as_str())
            .style(Style::default().add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center);
        frame.render_widget(name, chunks[0]);

        let status_line = match &self.session {
            SessionCheck::Checking => Line::from(Span::styled(
                i18n::text(lang, "status.session_check"),
                Style::default().fg(Color::Yellow),
            )),
            SessionCheck::Clear => Line::from(""),
            SessionCheck::Blocked { worker } => {
                let mut text = i18n::text(lang, "status.session_blocked").to_string();
                if let Some(worker) = worker {
                    text.push_str(&format!(" ({worker})"));
                }
                Line::from(Span::styled(text, Style::default().fg(Color::Red)))
            }
            SessionCheck::Failed => Line::from(Span::styled(
                i18n::code_message(lang, "UNKNOWN"),
                Style::default().fg(Color::Red),
            )),
        };
        frame.render_widget(
            Paragraph::new(status_line).alignment(Alignment::Center),
            chunks[1],
        );

        let confirm_style = if !self.can_confirm() {
            Style::default().fg(Color::DarkGray)
        } else if self.selection == Selection::Confirm {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Red)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Red)
        };
        let cancel_style = if self.selection == Selection::Cancel {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Green)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Green)
        };

        let buttons = Line::from(vec![
            Span::styled(
                format!(" {} ", i18n::text(lang, "action.delete")),
                confirm_style,
            ),
            Span::raw("   "),
            Span::styled(
                format!(" {} ", i18n::text(lang, "action.cancel")),
                cancel_style,
            ),
        ]);
        frame.render_widget(
            Paragraph::new(buttons).alignment(Alignment::Center),
            chunks[2],
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn blocked_session() -> Result<ActiveSession, ApiError> {
        Ok(ActiveSession {
            has_active_session: true,
            worker_name: Some("Dana".to_string()),
        })
    }

    fn clear_session() -> Result<ActiveSession, ApiError> {
        Ok(ActiveSession {
            has_active_session: false,
            worker_name: None,
        })
    }

    #[test]
    fn test_confirm_disabled_while_checking() {
        let mut dialog = ConfirmDeleteDialog::new(Lang::He);
        dialog.show(DeleteTarget::Station, "s1", "CNC-1");
        assert!(!dialog.can_confirm());

        // 'y' and Enter-on-confirm must be inert
        assert_eq!(dialog.handle_key(key(KeyCode::Char('y'))), None);
        assert!(dialog.visible);
    }

    #[test]
    fn test_active_session_keeps_confirm_disabled() {
        let mut dialog = ConfirmDeleteDialog::new(Lang::He);
        dialog.show(DeleteTarget::Job, "j1", "WO-7731");
        dialog.set_session_result(blocked_session());

        assert!(!dialog.can_confirm());
        assert_eq!(dialog.handle_key(key(KeyCode::Char('y'))), None);
        // Selection cannot even reach the confirm button
        dialog.handle_key(key(KeyCode::Left));
        assert_eq!(dialog.handle_key(key(KeyCode::Enter)), Some(DeleteOutcome::Cancelled));
    }

    #[test]
    fn test_worker_delete_waits_for_session_lookup() {
        let mut dialog = ConfirmDeleteDialog::new(Lang::He);
        dialog.show(DeleteTarget::Worker, "w1", "Dana");
        // Checking until the lookup answers
        assert!(!dialog.can_confirm());
        dialog.set_session_result(blocked_session());
        assert!(!dialog.can_confirm());
        assert_eq!(dialog.handle_key(key(KeyCode::Char('y'))), None);
    }

    #[test]
    fn test_clear_session_enables_confirm() {
        let mut dialog = ConfirmDeleteDialog::new(Lang::He);
        dialog.show(DeleteTarget::Worker, "w1", "Dana");
        dialog.set_session_result(clear_session());

        assert!(dialog.can_confirm());
        assert_eq!(
            dialog.handle_key(key(KeyCode::Char('y'))),
            Some(DeleteOutcome::Confirmed {
                target: DeleteTarget::Worker,
                id: "w1".to_string()
            })
        );
        assert!(!dialog.visible);
    }

    #[test]
    fn test_failed_lookup_fails_closed() {
        let mut dialog = ConfirmDeleteDialog::new(Lang::Ru);
        dialog.show(DeleteTarget::Station, "s1", "CNC-1");
        dialog.set_session_result(Err(ApiError::network("timeout")));
        assert_eq!(*dialog.session(), SessionCheck::Failed);
        assert!(!dialog.can_confirm());
    }

    #[test]
    fn test_unchecked_show_skips_lookup() {
        let mut dialog = ConfirmDeleteDialog::new(Lang::He);
        dialog.show_unchecked(DeleteTarget::Preset, "p1", "anodize");
        assert!(dialog.can_confirm());
    }

    #[test]
    fn test_escape_cancels() {
        let mut dialog = ConfirmDeleteDialog::new(Lang::He);
        dialog.show(DeleteTarget::Station, "s1", "CNC-1");
        assert_eq!(dialog.handle_key(key(KeyCode::Esc)), Some(DeleteOutcome::Cancelled));
        assert!(!dialog.visible);
    }

    #[test]
    fn test_default_selection_is_cancel() {
        let mut dialog = ConfirmDeleteDialog::new(Lang::He);
        dialog.show(DeleteTarget::Station, "s1", "CNC-1");
        dialog.set_session_result(clear_session());
        // Enter without navigation cancels, never deletes
        assert_eq!(dialog.handle_key(key(KeyCode::Enter)), Some(DeleteOutcome::Cancelled));
    }
}
