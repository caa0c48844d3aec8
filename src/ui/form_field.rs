//! Reusable single-line form field widgets for the edit dialogs.

use crossterm::event::KeyCode;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// A form field widget that can handle different input types.
pub enum FormField {
    /// Single-line text input. Cursor position is a char index.
    TextInput {
        value: String,
        cursor_pos: usize,
        max_length: Option<usize>,
    },
    /// Digits-only input (quantities, badge numbers).
    NumberInput { value: String, cursor_pos: usize },
    /// Selection cycled with left/right from a fixed option list.
    Select { options: Vec<String>, selected: usize },
}

impl FormField {
    pub fn text(initial: &str) -> Self {
        FormField::TextInput {
            value: initial.to_string(),
            cursor_pos: initial.chars().count(),
            max_length: None,
        }
    }

    pub fn text_with_max(initial: &str, max_length: usize) -> Self {
        FormField::TextInput {
            value: initial.to_string(),
            cursor_pos: initial.chars().count(),
            max_length: Some(max_length),
        }
    }

    pub fn number(initial: &str) -> Self {
        FormField::NumberInput {
            value: initial.to_string(),
            cursor_pos: initial.chars().count(),
        }
    }

    pub fn select(options: Vec<String>, selected: usize) -> Self {
        let selected = selected.min(options.len().saturating_sub(1));
        FormField::Select { options, selected }
    }

    /// Get the current value as a string.
    pub fn value(&self) -> String {
        match self {
            FormField::TextInput { value, .. } | FormField::NumberInput { value, .. } => {
                value.clone()
            }
            FormField::Select {
                options, selected, ..
            } => options.get(*selected).cloned().unwrap_or_default(),
        }
    }

    pub fn set_value(&mut self, new_value: &str) {
        match self {
            FormField::TextInput {
                value, cursor_pos, ..
            }
            | FormField::NumberInput { value, cursor_pos } => {
                *value = new_value.to_string();
                *cursor_pos = value.chars().count();
            }
            FormField::Select { options, selected } => {
                if let Some(idx) = options.iter().position(|o| o == new_value) {
                    *selected = idx;
                }
            }
        }
    }

    /// Non-empty after trimming for required fields.
    pub fn is_valid(&self, required: bool) -> bool {
        if !required {
            return true;
        }
        match self {
            FormField::TextInput { value, .. } | FormField::NumberInput { value, .. } => {
                !value.trim().is_empty()
            }
            FormField::Select { options, .. } => !options.is_empty(),
        }
    }

    /// Handle a key event, returns true if the key was consumed.
    pub fn handle_key(&mut self, key: KeyCode) -> bool {
        match self {
            FormField::TextInput {
                value,
                cursor_pos,
                max_length,
            } => match key {
                KeyCode::Char(c) => {
                    if max_length.map_or(true, |m| value.chars().count() < m) {
                        insert_char(value, *cursor_pos, c);
                        *cursor_pos += 1;
                    }
                    true
                }
                KeyCode::Backspace => {
                    if *cursor_pos > 0 {
                        *cursor_pos -= 1;
                        remove_char(value, *cursor_pos);
                    }
                    true
                }
                KeyCode::Delete => {
                    if *cursor_pos < value.chars().count() {
                        remove_char(value, *cursor_pos);
                    }
                    true
                }
                KeyCode::Left => {
                    *cursor_pos = cursor_pos.saturating_sub(1);
                    true
                }
                KeyCode::Right => {
                    if *cursor_pos < value.chars().count() {
                        *cursor_pos += 1;
                    }
                    true
                }
                KeyCode::Home => {
                    *cursor_pos = 0;
                    true
                }
                KeyCode::End => {
                    *cursor_pos = value.chars().count();
                    true
                }
                _ => false,
            },
            FormField::NumberInput { value, cursor_pos } => match key {
                KeyCode::Char(c) if c.is_ascii_digit() => {
                    insert_char(value, *cursor_pos, c);
                    *cursor_pos += 1;
                    true
                }
                KeyCode::Backspace => {
                    if *cursor_pos > 0 {
                        *cursor_pos -= 1;
                        remove_char(value, *cursor_pos);
                    }
                    true
                }
                KeyCode::Left => {
                    *cursor_pos = cursor_pos.saturating_sub(1);
                    true
                }
                KeyCode::Right => {
                    if *cursor_pos < value.chars().count() {
                        *cursor_pos += 1;
                    }
                    true
                }
                _ => false,
            },
            FormField::Select { options, selected } => match key {
                KeyCode::Left | KeyCode::Up => {
                    if *selected == 0 {
                        *selected = options.len().saturating_sub(1);
                    } else {
                        *selected -= 1;
                    }
                    true
                }
                KeyCode::Right | KeyCode::Down | KeyCode::Char(' ') => {
                    if !options.is_empty() {
                        *selected = (*selected + 1) % options.len();
                    }
                    true
                }
                _ => false,
            },
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, focused: bool) {
        let value_style = Style::default().fg(if focused { Color::White } else { Color::Gray });

        match self {
            FormField::TextInput {
                value, cursor_pos, ..
            }
            | FormField::NumberInput { value, cursor_pos } => {
                let mut text = value.clone();
                if focused {
                    let byte_pos = char_to_byte(&text, *cursor_pos);
                    text.insert(byte_pos, '|');
                }
                frame.render_widget(Paragraph::new(text).style(value_style), area);
            }
            FormField::Select { options, selected } => {
                let current = options.get(*selected).cloned().unwrap_or_default();
                let line = Line::from(vec![
                    Span::styled("◀ ", Style::default().fg(Color::DarkGray)),
                    Span::styled(
                        current,
                        if focused {
                            value_style.add_modifier(Modifier::BOLD)
                        } else {
                            value_style
                        },
                    ),
                    Span::styled(" ▶", Style::default().fg(Color::DarkGray)),
                ]);
                frame.render_widget(Paragraph::new(line), area);
            }
        }
    }
}

// Hebrew/Russian input is multi-byte; cursor math works in chars.
fn char_to_byte(s: &str, char_pos: usize) -> usize {
    s.char_indices()
        .nth(char_pos)
        .map_or(s.len(), |(idx, _)| idx)
}

fn insert_char(s: &mut String, char_pos: usize, c: char) {
    let byte_pos = char_to_byte(s, char_pos);
    s.insert(byte_pos, c);
}

fn remove_char(s: &mut String, char_pos: usize) {
    let byte_pos = char_to_byte(s, char_pos);
    s.remove(byte_pos);
}

/// A labeled field row in an edit form.
pub struct FormRow {
    /// Message key for the label (resolved through `i18n` at render time).
    pub label_key: &'static str,
    pub required: bool,
    pub field: FormField,
}

/// A vertical form with focus handling, in the shape every entity dialog
/// uses for its scalar fields.
pub struct EntityForm {
    pub rows: Vec<FormRow>,
    pub focused: usize,
}

impl EntityForm {
    pub fn new(rows: Vec<FormRow>) -> Self {
        Self { rows, focused: 0 }
    }

    pub fn focused_field_mut(&mut self) -> Option<&mut FormField> {
        self.rows.get_mut(self.focused).map(|r| &mut r.field)
    }

    pub fn next_field(&mut self) {
        if self.focused + 1 < self.rows.len() {
            self.focused += 1;
        }
    }

    pub fn prev_field(&mut self) {
        self.focused = self.focused.saturating_sub(1);
    }

    pub fn is_last_field(&self) -> bool {
        self.focused + 1 >= self.rows.len()
    }

    /// All required fields non-empty after trimming.
    pub fn is_valid(&self) -> bool {
        self.rows.iter().all(|r| r.field.is_valid(r.required))
    }

    pub fn value_of(&self, label_key: &str) -> String {
        self.rows
            .iter()
            .find(|r| r.label_key == label_key)
            .map(|r| r.field.value())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_input_handles_hebrew_chars() {
        let mut field = FormField::text("");
        for c in "תקלה".chars() {
            assert!(field.handle_key(KeyCode::Char(c)));
        }
        assert_eq!(field.value(), "תקלה");

        field.handle_key(KeyCode::Backspace);
        assert_eq!(field.value(), "תקל");
    }

    #[test]
    fn test_text_input_cursor_insert_mid_word() {
        let mut field = FormField::text("ab");
        field.handle_key(KeyCode::Left);
        field.handle_key(KeyCode::Char('X'));
        assert_eq!(field.value(), "aXb");
    }

    #[test]
    fn test_text_input_respects_max_length() {
        let mut field = FormField::text_with_max("", 3);
        for c in "abcd".chars() {
            field.handle_key(KeyCode::Char(c));
        }
        assert_eq!(field.value(), "abc");
    }

    #[test]
    fn test_number_input_rejects_letters() {
        let mut field = FormField::number("");
        field.handle_key(KeyCode::Char('2'));
        field.handle_key(KeyCode::Char('x'));
        field.handle_key(KeyCode::Char('5'));
        assert_eq!(field.value(), "25");
    }

    #[test]
    fn test_select_cycles_and_wraps() {
        let mut field = FormField::select(
            vec!["open".to_string(), "in_progress".to_string(), "done".to_string()],
            0,
        );
        field.handle_key(KeyCode::Right);
        assert_eq!(field.value(), "in_progress");
        field.handle_key(KeyCode::Left);
        field.handle_key(KeyCode::Left);
        assert_eq!(field.value(), "done"); // Wraps backwards
    }

    #[test]
    fn test_form_validation_requires_trimmed_values() {
        let mut form = EntityForm::new(vec![
            FormRow {
                label_key: "field.code",
                required: true,
                field: FormField::text(""),
            },
            FormRow {
                label_key: "field.name",
                required: false,
                field: FormField::text(""),
            },
        ]);
        assert!(!form.is_valid());

        form.rows[0].field.set_value("   ");
        assert!(!form.is_valid());

        form.rows[0].field.set_value("CNC-1");
        assert!(form.is_valid());
        assert_eq!(form.value_of("field.code"), "CNC-1");
    }

    #[test]
    fn test_form_focus_stops_at_ends() {
        let mut form = EntityForm::new(vec![
            FormRow {
                label_key: "field.code",
                required: true,
                field: FormField::text(""),
            },
            FormRow {
                label_key: "field.name",
                required: true,
                field: FormField::text(""),
            },
        ]);
        form.prev_field();
        assert_eq!(form.focused, 0);
        form.next_field();
        form.next_field();
        assert_eq!(form.focused, 1);
        assert!(form.is_last_field());
    }
}
