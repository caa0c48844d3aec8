//! Per-dialog edit-session state machine.
//!
//! `Idle -> Loading -> Editing -> Saving`. A create-mode success closes the
//! dialog (`-> Idle`); an edit-mode success stays open for further edits
//! (`-> Editing`, success banner). Failure always returns to `Editing` with
//! an error banner. A save is atomic from the UI's perspective: there is no
//! partial-save state, and a failed save leaves the working sequence
//! untouched.

/// Lifecycle phase of one edit dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditPhase {
    /// No dialog open (or dialog closed after a successful save).
    #[default]
    Idle,
    /// Initial data fetch in flight; edit keys are ignored.
    Loading,
    /// Store mutations accepted; validation runs only on submit.
    Editing,
    /// Save request in flight; edit keys are ignored.
    Saving,
}

impl EditPhase {
    /// Whether local store mutations and submits are accepted.
    pub fn accepts_edits(self) -> bool {
        self == EditPhase::Editing
    }

    /// Whether a network call is in flight and a busy indicator shows.
    pub fn is_busy(self) -> bool {
        matches!(self, EditPhase::Loading | EditPhase::Saving)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    Error,
    Success,
    Info,
}

/// In-dialog message line. Errors keep the dialog open; successes show a
/// transient confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub kind: BannerKind,
    pub text: String,
}

/// Session state shared by every edit dialog: the phase plus the banner.
#[derive(Debug, Clone, Default)]
pub struct EditSession {
    phase: EditPhase,
    banner: Option<Banner>,
}

impl EditSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> EditPhase {
        self.phase
    }

    pub fn banner(&self) -> Option<&Banner> {
        self.banner.as_ref()
    }

    /// Dialog opened; initial fetch starts.
    pub fn begin_loading(&mut self) {
        self.phase = EditPhase::Loading;
        self.banner = None;
    }

    /// Initial data arrived; mutations are now accepted.
    pub fn loaded(&mut self) {
        self.phase = EditPhase::Editing;
    }

    /// Dialog opened directly in edit mode (create flows have no fetch).
    pub fn begin_editing(&mut self) {
        self.phase = EditPhase::Editing;
        self.banner = None;
    }

    /// Submit accepted; save request in flight. Only legal from `Editing`.
    /// Returns false (and stays put) otherwise.
    pub fn begin_saving(&mut self) -> bool {
        if self.phase != EditPhase::Editing {
            return false;
        }
        self.phase = EditPhase::Saving;
        self.banner = None;
        true
    }

    /// Save succeeded in create mode; the dialog closes.
    pub fn save_succeeded(&mut self, message: impl Into<String>) {
        self.phase = EditPhase::Idle;
        self.banner = Some(Banner {
            kind: BannerKind::Success,
            text: message.into(),
        });
    }

    /// Save succeeded in edit mode; the dialog stays open and accepts
    /// further edits immediately.
    pub fn save_succeeded_editing(&mut self, message: impl Into<String>) {
        self.phase = EditPhase::Editing;
        self.banner = Some(Banner {
            kind: BannerKind::Success,
            text: message.into(),
        });
    }

    /// Save (or validation) failed; back to editing with the error shown,
    /// sequence unchanged.
    pub fn save_failed(&mut self, message: impl Into<String>) {
        self.phase = EditPhase::Editing;
        self.banner = Some(Banner {
            kind: BannerKind::Error,
            text: message.into(),
        });
    }

    /// Dialog closed without saving; working copy is discarded by the owner.
    pub fn reset(&mut self) {
        self.phase = EditPhase::Idle;
        self.banner = None;
    }

    pub fn show_info(&mut self, message: impl Into<String>) {
        self.banner = Some(Banner {
            kind: BannerKind::Info,
            text: message.into(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_save_cycle() {
        let mut session = EditSession::new();
        assert_eq!(session.phase(), EditPhase::Idle);

        session.begin_loading();
        assert!(session.phase().is_busy());
        assert!(!session.phase().accepts_edits());

        session.loaded();
        assert!(session.phase().accepts_edits());

        assert!(session.begin_saving());
        assert_eq!(session.phase(), EditPhase::Saving);

        session.save_succeeded("נשמר");
        assert_eq!(session.phase(), EditPhase::Idle);
        assert_eq!(session.banner().unwrap().kind, BannerKind::Success);
    }

    #[test]
    fn test_failed_save_returns_to_editing() {
        let mut session = EditSession::new();
        session.begin_editing();
        assert!(session.begin_saving());

        session.save_failed("duplicate");
        assert_eq!(session.phase(), EditPhase::Editing);
        assert_eq!(session.banner().unwrap().kind, BannerKind::Error);
    }

    #[test]
    fn test_edit_mode_success_returns_to_editing() {
        let mut session = EditSession::new();
        session.begin_editing();
        assert!(session.begin_saving());

        session.save_succeeded_editing("נשמר");
        assert_eq!(session.phase(), EditPhase::Editing);
        assert_eq!(session.banner().unwrap().kind, BannerKind::Success);

        // Another submit is accepted right away
        assert!(session.begin_saving());
    }

    #[test]
    fn test_submit_rejected_outside_editing() {
        let mut session = EditSession::new();
        assert!(!session.begin_saving());

        session.begin_loading();
        assert!(!session.begin_saving());
        assert_eq!(session.phase(), EditPhase::Loading);
    }

    #[test]
    fn test_begin_saving_clears_previous_banner() {
        let mut session = EditSession::new();
        session.begin_editing();
        session.save_failed("first error");
        assert!(session.banner().is_some());

        assert!(session.begin_saving());
        assert!(session.banner().is_none());
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut session = EditSession::new();
        session.begin_editing();
        session.save_failed("err");
        session.reset();
        assert_eq!(session.phase(), EditPhase::Idle);
        assert!(session.banner().is_none());
    }
}
