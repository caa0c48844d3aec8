//! Validation gate: synchronous domain checks run over the full working
//! sequence immediately before a save request. On violation nothing is
//! persisted; the error carries a message key for `i18n` and, for
//! checklists, which tab to focus.

use std::collections::HashSet;

use crate::i18n::Lang;
use crate::types::{ChecklistItem, ChecklistSide, PresetStep, StationReason};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A required text field is empty after trimming.
    #[error("required field is empty")]
    Required,
    /// A checklist would drop below one item.
    #[error("checklist needs at least one item ({side})")]
    ChecklistMin { side: ChecklistSide },
    /// A checklist row has an empty label in either language.
    #[error("checklist row has an empty label ({side})")]
    ChecklistLabels { side: ChecklistSide },
    /// Two reasons share a label in the given language.
    #[error("duplicate reason label ({lang})")]
    DuplicateReason { lang: Lang },
    /// A preset has no steps.
    #[error("preset has no steps")]
    NoSteps,
}

impl ValidationError {
    /// Stable key into the `i18n` text table.
    pub fn message_key(&self) -> &'static str {
        match self {
            ValidationError::Required => "validation.required",
            ValidationError::ChecklistMin { .. } => "validation.checklist_min",
            ValidationError::ChecklistLabels { .. } => "validation.checklist_labels",
            ValidationError::DuplicateReason { .. } => "validation.duplicate_reason",
            ValidationError::NoSteps => "validation.no_steps",
        }
    }

    /// Which checklist tab should be focused to show the offending row.
    pub fn focus_side(&self) -> Option<ChecklistSide> {
        match self {
            ValidationError::ChecklistMin { side }
            | ValidationError::ChecklistLabels { side } => Some(*side),
            _ => None,
        }
    }
}

/// All listed fields must be non-empty after trimming.
pub fn require_non_empty(fields: &[&str]) -> Result<(), ValidationError> {
    if fields.iter().any(|f| f.trim().is_empty()) {
        return Err(ValidationError::Required);
    }
    Ok(())
}

/// One checklist side: at least one item, both labels filled on every row.
pub fn validate_checklist(
    side: ChecklistSide,
    items: &[ChecklistItem],
) -> Result<(), ValidationError> {
    if items.is_empty() {
        return Err(ValidationError::ChecklistMin { side });
    }
    for item in items {
        if item.label_he.trim().is_empty() || item.label_ru.trim().is_empty() {
            return Err(ValidationError::ChecklistLabels { side });
        }
    }
    Ok(())
}

/// Both sides of a station's checklists; the start side is checked first so
/// the dialog focuses tabs left-to-right.
pub fn validate_checklists(
    start: &[ChecklistItem],
    end: &[ChecklistItem],
) -> Result<(), ValidationError> {
    validate_checklist(ChecklistSide::Start, start)?;
    validate_checklist(ChecklistSide::End, end)
}

/// Reason labels: non-empty, and unique per language evaluated
/// independently (duplicate Hebrew fails even when Russian differs).
pub fn validate_reasons(reasons: &[StationReason]) -> Result<(), ValidationError> {
    let mut seen_he = HashSet::new();
    let mut seen_ru = HashSet::new();
    for reason in reasons {
        let he = reason.label_he.trim();
        let ru = reason.label_ru.trim();
        if he.is_empty() || ru.is_empty() {
            return Err(ValidationError::Required);
        }
        if !seen_he.insert(he) {
            return Err(ValidationError::DuplicateReason { lang: Lang::He });
        }
        if !seen_ru.insert(ru) {
            return Err(ValidationError::DuplicateReason { lang: Lang::Ru });
        }
    }
    Ok(())
}

/// Preset: non-empty name and at least one step.
pub fn validate_preset(name: &str, steps: &[PresetStep]) -> Result<(), ValidationError> {
    require_non_empty(&[name])?;
    if steps.is_empty() {
        return Err(ValidationError::NoSteps);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_non_empty_trims() {
        assert!(require_non_empty(&["ok", "גם כן"]).is_ok());
        assert_eq!(
            require_non_empty(&["ok", "   "]),
            Err(ValidationError::Required)
        );
    }

    #[test]
    fn test_empty_checklist_fails_with_side() {
        let err = validate_checklist(ChecklistSide::End, &[]).unwrap_err();
        assert_eq!(err, ValidationError::ChecklistMin {
            side: ChecklistSide::End
        });
        assert_eq!(err.focus_side(), Some(ChecklistSide::End));
    }

    #[test]
    fn test_checklist_row_with_blank_label_fails() {
        let items = vec![
            ChecklistItem::new("a", "בדיקת שמן", "Проверка масла", 0),
            ChecklistItem::new("b", "  ", "Проверка ножа", 1),
        ];
        let err = validate_checklist(ChecklistSide::Start, &items).unwrap_err();
        assert_eq!(err.message_key(), "validation.checklist_labels");
        assert_eq!(err.focus_side(), Some(ChecklistSide::Start));
    }

    #[test]
    fn test_checklists_start_side_reported_first() {
        let end = vec![ChecklistItem::new("b", "ניקוי", "Уборка", 0)];
        let err = validate_checklists(&[], &end).unwrap_err();
        assert_eq!(err.focus_side(), Some(ChecklistSide::Start));
    }

    #[test]
    fn test_duplicate_hebrew_reason_fails_even_when_russian_differs() {
        let reasons = vec![
            StationReason::new("r1", "תקלה", "X", 0),
            StationReason::new("r2", "תקלה", "Y", 1),
        ];
        assert_eq!(
            validate_reasons(&reasons),
            Err(ValidationError::DuplicateReason { lang: Lang::He })
        );
    }

    #[test]
    fn test_duplicate_russian_reason_fails() {
        let reasons = vec![
            StationReason::new("r1", "תקלה א", "Поломка", 0),
            StationReason::new("r2", "תקלה ב", "Поломка", 1),
        ];
        assert_eq!(
            validate_reasons(&reasons),
            Err(ValidationError::DuplicateReason { lang: Lang::Ru })
        );
    }

    #[test]
    fn test_distinct_reasons_pass() {
        let reasons = vec![
            StationReason::new("r1", "תקלה א", "Поломка", 0),
            StationReason::new("r2", "תקלה ב", "Нет материала", 1),
        ];
        assert!(validate_reasons(&reasons).is_ok());
    }

    #[test]
    fn test_preset_needs_name_and_steps() {
        assert_eq!(
            validate_preset("  ", &[]),
            Err(ValidationError::Required)
        );
        assert_eq!(validate_preset("anodize", &[]), Err(ValidationError::NoSteps));
    }
}
