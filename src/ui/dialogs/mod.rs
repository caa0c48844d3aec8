mod checklist_editor;
mod confirm_delete;
mod job_form;
mod preset_editor;
mod station_form;
mod worker_form;

pub use checklist_editor::{ChecklistEditor, ChecklistOutcome};
pub use confirm_delete::{ConfirmDeleteDialog, DeleteOutcome, DeleteTarget, SessionCheck};
pub use job_form::{JobForm, JobOutcome};
pub use preset_editor::{PresetEditor, PresetOutcome};
pub use station_form::{StationForm, StationOutcome};
pub use worker_form::{WorkerForm, WorkerOutcome};

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Helper to create a centered rect
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
