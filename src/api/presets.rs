//! Pipeline-preset endpoints. The steps save takes the finalized ordered
//! station-id list (positions are implied by list order) plus an optional
//! per-station flags map.

use serde::Serialize;
use std::collections::HashMap;

use super::client::{Client, ItemsEnvelope};
use super::error::ApiError;
use crate::types::PipelinePreset;

#[derive(Debug, Serialize)]
pub struct PresetName {
    pub name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StepsBody<'a> {
    station_ids: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    flags: Option<&'a HashMap<String, bool>>,
}

impl Client {
    pub async fn list_presets(&self) -> Result<Vec<PipelinePreset>, ApiError> {
        let envelope: ItemsEnvelope<PipelinePreset> = self.get_json("/presets").await?;
        Ok(envelope.items)
    }

    pub async fn create_preset(&self, name: &str) -> Result<PipelinePreset, ApiError> {
        self.post_json(
            "/presets",
            &PresetName {
                name: name.to_string(),
            },
        )
        .await
    }

    pub async fn rename_preset(&self, id: &str, name: &str) -> Result<(), ApiError> {
        self.put_unit(
            &format!("/presets/{id}"),
            &PresetName {
                name: name.to_string(),
            },
        )
        .await
    }

    /// Rejected with `PRESET_IN_USE` while a job references the preset.
    pub async fn delete_preset(&self, id: &str) -> Result<(), ApiError> {
        self.delete_unit(&format!("/presets/{id}")).await
    }

    /// Persist the finalized step order. `flags` marks stations that need
    /// special handling (e.g. mandatory quality gates); `None` leaves the
    /// backend's flags untouched.
    pub async fn save_preset_steps(
        &self,
        id: &str,
        station_ids: &[String],
        flags: Option<&HashMap<String, bool>>,
    ) -> Result<(), ApiError> {
        self.put_unit(
            &format!("/presets/{id}/steps"),
            &StepsBody { station_ids, flags },
        )
        .await
    }
}
