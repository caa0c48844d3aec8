use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::ordered::Sequenced;

/// Which checklist a station item belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChecklistSide {
    /// Verified before the worker starts on the station.
    Start,
    /// Verified when the worker finishes.
    End,
}

impl fmt::Display for ChecklistSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChecklistSide::Start => write!(f, "start"),
            ChecklistSide::End => write!(f, "end"),
        }
    }
}

/// One verification item, bilingual. Rows created in the editor get a
/// client-side key so remove/reorder can address them before the backend
/// assigns an id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistItem {
    pub key: String,
    pub label_he: String,
    pub label_ru: String,
    pub position: usize,
}

impl ChecklistItem {
    /// A blank editor row with a fresh client-side key.
    pub fn blank() -> Self {
        Self {
            key: Uuid::new_v4().to_string(),
            label_he: String::new(),
            label_ru: String::new(),
            position: 0,
        }
    }

    pub fn new(key: &str, label_he: &str, label_ru: &str, position: usize) -> Self {
        Self {
            key: key.to_string(),
            label_he: label_he.to_string(),
            label_ru: label_ru.to_string(),
            position,
        }
    }
}

impl Sequenced for ChecklistItem {
    fn key(&self) -> &str {
        &self.key
    }
    fn position(&self) -> usize {
        self.position
    }
    fn set_position(&mut self, position: usize) {
        self.position = position;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_rows_get_distinct_keys() {
        let a = ChecklistItem::blank();
        let b = ChecklistItem::blank();
        assert_ne!(a.key, b.key);
    }

    #[test]
    fn test_side_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&ChecklistSide::Start).unwrap(),
            r#""start""#
        );
        assert_eq!(
            serde_json::to_string(&ChecklistSide::End).unwrap(),
            r#""end""#
        );
    }
}
