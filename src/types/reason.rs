use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ordered::Sequenced;

/// A configurable failure/stoppage cause for a station, bilingual.
/// Labels must be unique per language across the station's reasons.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StationReason {
    pub key: String,
    pub label_he: String,
    pub label_ru: String,
    pub position: usize,
}

impl StationReason {
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

impl Sequenced for StationReason {
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
