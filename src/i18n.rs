//! Bilingual (Hebrew / Russian) user-facing strings.
//!
//! Two lookup tables: `text` for console chrome and validation messages
//! (keyed by stable message keys), and `code_message` for backend domain
//! error codes. Unknown codes fall back to a generic message; the
//! persistence adapter never interprets codes itself.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    #[default]
    He,
    Ru,
}

impl Lang {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "he" => Some(Lang::He),
            "ru" => Some(Lang::Ru),
            _ => None,
        }
    }
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lang::He => write!(f, "he"),
            Lang::Ru => write!(f, "ru"),
        }
    }
}

/// (hebrew, russian) pairs keyed by message key.
static TEXTS: Lazy<HashMap<&'static str, (&'static str, &'static str)>> = Lazy::new(|| {
    HashMap::from([
        // Screen titles
        ("screen.stations", ("תחנות", "Станции")),
        ("screen.workers", ("עובדים", "Работники")),
        ("screen.presets", ("תהליכים", "Процессы")),
        ("screen.jobs", ("עבודות", "Задания")),
        // Actions
        ("action.new", ("חדש", "Создать")),
        ("action.edit", ("עריכה", "Редактировать")),
        ("action.delete", ("מחיקה", "Удалить")),
        ("action.save", ("שמירה", "Сохранить")),
        ("action.cancel", ("ביטול", "Отмена")),
        ("action.refresh", ("רענון", "Обновить")),
        ("action.confirm", ("אישור", "Подтвердить")),
        ("action.add_item", ("הוספת שורה", "Добавить строку")),
        ("action.move_up", ("הזזה למעלה", "Вверх")),
        ("action.move_down", ("הזזה למטה", "Вниз")),
        // Dialog chrome
        ("dialog.delete_title", ("אישור מחיקה", "Подтверждение удаления")),
        ("dialog.checklist_start", ("צ'ק ליסט התחלה", "Чек-лист начала")),
        ("dialog.checklist_end", ("צ'ק ליסט סיום", "Чек-лист окончания")),
        ("dialog.reasons", ("סיבות תקלה", "Причины остановки")),
        ("dialog.assignments", ("שיוך תחנות", "Назначение станций")),
        // Status lines
        ("status.loading", ("טוען...", "Загрузка...")),
        ("status.saving", ("שומר...", "Сохранение...")),
        ("status.saved", ("נשמר בהצלחה", "Сохранено")),
        (
            "status.session_check",
            ("בודק סשן פעיל...", "Проверка активной сессии..."),
        ),
        (
            "status.session_blocked",
            (
                "לא ניתן למחוק: קיים סשן פעיל",
                "Удаление невозможно: есть активная сессия",
            ),
        ),
        // Field labels
        ("field.code", ("קוד", "Код")),
        ("field.name", ("שם", "Название")),
        ("field.badge", ("מספר תג", "Номер пропуска")),
        ("field.role", ("תפקיד", "Роль")),
        ("field.number", ("מספר עבודה", "Номер задания")),
        ("field.product", ("מוצר", "Изделие")),
        ("field.quantity", ("כמות", "Количество")),
        ("field.status", ("סטטוס", "Статус")),
        ("field.label_he", ("תווית בעברית", "Текст на иврите")),
        ("field.label_ru", ("תווית ברוסית", "Текст на русском")),
        // Validation messages
        (
            "validation.required",
            ("יש למלא את כל שדות החובה", "Заполните все обязательные поля"),
        ),
        (
            "validation.checklist_min",
            (
                "צ'ק ליסט חייב להכיל לפחות פריט אחד",
                "Чек-лист должен содержать хотя бы один пункт",
            ),
        ),
        (
            "validation.checklist_labels",
            (
                "יש למלא את שתי התוויות בכל שורה",
                "Заполните обе подписи в каждой строке",
            ),
        ),
        (
            "validation.duplicate_reason",
            (
                "תוויות הסיבות חייבות להיות ייחודיות",
                "Названия причин должны быть уникальными",
            ),
        ),
        (
            "validation.no_steps",
            (
                "תהליך חייב להכיל לפחות תחנה אחת",
                "Процесс должен содержать хотя бы одну станцию",
            ),
        ),
    ])
});

/// Backend domain error codes → (hebrew, russian).
static CODES: Lazy<HashMap<&'static str, (&'static str, &'static str)>> = Lazy::new(|| {
    HashMap::from([
        (
            "DUPLICATE_STATION",
            ("קוד תחנה כבר קיים", "Код станции уже существует"),
        ),
        (
            "DUPLICATE_REASON",
            ("סיבה בשם זה כבר קיימת", "Причина с таким названием уже есть"),
        ),
        (
            "PRESET_IN_USE",
            (
                "התהליך בשימוש ולא ניתן למחיקה",
                "Процесс используется и не может быть удалён",
            ),
        ),
        (
            "STATION_IN_USE",
            (
                "התחנה בשימוש ולא ניתנת למחיקה",
                "Станция используется и не может быть удалена",
            ),
        ),
        (
            "ASSIGNMENT_EXISTS",
            ("השיוך כבר קיים", "Назначение уже существует"),
        ),
        (
            "WORKER_HAS_SESSION",
            (
                "לעובד יש סשן פעיל",
                "У работника есть активная сессия",
            ),
        ),
        (
            "JOB_IN_USE",
            (
                "העבודה בביצוע ולא ניתנת למחיקה",
                "Задание выполняется и не может быть удалено",
            ),
        ),
    ])
});

const GENERIC_ERROR: (&str, &str) = ("אירעה שגיאה, נסה שוב", "Произошла ошибка, попробуйте ещё раз");

fn pick(lang: Lang, pair: (&'static str, &'static str)) -> &'static str {
    match lang {
        Lang::He => pair.0,
        Lang::Ru => pair.1,
    }
}

/// Resolve a chrome/validation message key. A missing entry is logged and
/// shown as the generic message rather than crashing the console.
pub fn text(lang: Lang, key: &str) -> &'static str {
    match TEXTS.get(key) {
        Some(&pair) => pick(lang, pair),
        None => {
            tracing::warn!(key, "missing i18n text key");
            pick(lang, GENERIC_ERROR)
        }
    }
}

/// Resolve a backend domain error code to a localized message.
/// Unknown codes get the generic fallback.
pub fn code_message(lang: Lang, code: &str) -> &'static str {
    match CODES.get(code) {
        Some(&pair) => pick(lang, pair),
        None => pick(lang, GENERIC_ERROR),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lang_parse() {
        assert_eq!(Lang::parse("he"), Some(Lang::He));
        assert_eq!(Lang::parse("ru"), Some(Lang::Ru));
        assert_eq!(Lang::parse("en"), None);
    }

    #[test]
    fn test_known_code_resolves_per_language() {
        assert_eq!(
            code_message(Lang::He, "DUPLICATE_STATION"),
            "קוד תחנה כבר קיים"
        );
        assert_eq!(
            code_message(Lang::Ru, "DUPLICATE_STATION"),
            "Код станции уже существует"
        );
    }

    #[test]
    fn test_unknown_code_gets_generic_fallback() {
        assert_eq!(code_message(Lang::He, "SOMETHING_NEW"), GENERIC_ERROR.0);
        assert_eq!(code_message(Lang::Ru, "SOMETHING_NEW"), GENERIC_ERROR.1);
    }

    #[test]
    fn test_every_text_key_has_both_languages() {
        for (key, (he, ru)) in TEXTS.iter() {
            assert!(!he.is_empty(), "empty hebrew text for {key}");
            assert!(!ru.is_empty(), "empty russian text for {key}");
        }
    }
}
